use crate::foundation::core::{ensure_finite, ensure_finite_non_negative};
use crate::foundation::error::LayerclockResult;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Maps a parent's time onto a node's local animation time.
///
/// `local = (parent - begin_time) * speed + time_offset`. A node with `speed == 0` is frozen at
/// `time_offset`, which is how playback is paused without touching the animations themselves.
pub struct TimeVirtualization {
    /// Local time added after speed scaling, in seconds.
    #[serde(default)]
    pub time_offset: f64,
    /// Parent time at which the local clock starts, in seconds.
    #[serde(default)]
    pub begin_time: f64,
    /// Local playback rate. `0` freezes the node.
    #[serde(default = "default_speed")]
    pub speed: f64,
    /// Number of repetitions. Carried for observers, never written by the controller.
    #[serde(default)]
    pub repeat_count: f64,
    /// Total repeat span in seconds. Carried for observers, never written by the controller.
    #[serde(default)]
    pub repeat_duration: f64,
}

fn default_speed() -> f64 {
    1.0
}

impl Default for TimeVirtualization {
    fn default() -> Self {
        Self {
            time_offset: 0.0,
            begin_time: 0.0,
            speed: default_speed(),
            repeat_count: 0.0,
            repeat_duration: 0.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Playback state derived from a [`TimeVirtualization`]; never stored on its own.
pub enum PlaybackState {
    /// Frozen at the very beginning (`speed == 0`, `time_offset == 0`).
    Stopped,
    /// Time advances (`speed > 0`).
    Playing,
    /// Frozen at `time_offset != 0`.
    Paused,
}

impl TimeVirtualization {
    /// Convert a parent time into this node's local time.
    #[inline]
    pub fn local_time(&self, parent_time: f64) -> f64 {
        (parent_time - self.begin_time) * self.speed + self.time_offset
    }

    /// Classify the triple.
    pub fn state(&self) -> PlaybackState {
        if self.speed > 0.0 {
            PlaybackState::Playing
        } else if self.time_offset == 0.0 {
            PlaybackState::Stopped
        } else {
            PlaybackState::Paused
        }
    }

    /// Check the fields an archive is allowed to populate.
    pub fn validate(&self) -> LayerclockResult<()> {
        ensure_finite(self.time_offset, "time_offset")?;
        ensure_finite(self.begin_time, "begin_time")?;
        ensure_finite_non_negative(self.speed, "speed")?;
        ensure_finite_non_negative(self.repeat_count, "repeat_count")?;
        ensure_finite_non_negative(self.repeat_duration, "repeat_duration")?;
        Ok(())
    }
}

/// Evaluate a root-to-node chain of virtualizations at wall-clock `now`.
///
/// Each node's local time becomes the parent time of the next one, which is how a compositor
/// derives the painted time of a nested node. An empty chain yields `now`.
pub fn local_time_through<'a, I>(chain: I, now: f64) -> f64
where
    I: IntoIterator<Item = &'a TimeVirtualization>,
{
    chain.into_iter().fold(now, |t, tv| tv.local_time(t))
}

#[cfg(test)]
#[path = "../../tests/unit/timing/virtualization.rs"]
mod tests;
