use crate::{
    foundation::core::Size,
    foundation::error::{LayerclockError, LayerclockResult},
    layout::fit::{FitTransform, fit_transform},
    scene::model::SceneNode,
    timing::clock::MediaClock,
    timing::resolver,
    timing::virtualization::PlaybackState,
};

/// What [`ClockController::pause`] does when playback is stopped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoppedPause {
    /// Resume from the frozen offset, which is `0` when stopped, so playback starts over.
    #[default]
    Resume,
    /// Leave the controller stopped.
    Ignore,
}

/// Options controlling [`ClockController`] behavior.
#[derive(Clone, Debug, Default)]
pub struct ControllerOpts {
    /// Behavior of the pause toggle while stopped.
    pub pause_when_stopped: StoppedPause,
}

/// Root timing as seen by observers after an operation returns.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct TimingSnapshot {
    /// Root `time_offset`.
    pub time_offset: f64,
    /// Root `begin_time`.
    pub begin_time: f64,
    /// Resolved natural duration, if resolution has run.
    pub duration: Option<f64>,
    /// Root `repeat_duration`.
    pub repeat_duration: f64,
    /// Root `repeat_count`.
    pub repeat_count: f64,
    /// Root `speed`.
    pub speed: f64,
    /// Derived playback state.
    pub state: PlaybackState,
}

/// Handle returned by [`ClockController::observe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type Observer = Box<dyn FnMut(&TimingSnapshot)>;

/// Play/pause/stop/seek over a scene tree by rewriting only the root's time virtualization.
///
/// Children inherit the root mapping through the compositor, so the whole subtree follows. The
/// controller is single-threaded; every mutation takes `&mut self` and runs to completion.
pub struct ClockController<C: MediaClock> {
    root: SceneNode,
    clock: C,
    opts: ControllerOpts,
    observers: Vec<(ObserverId, Observer)>,
    next_observer: u64,
}

impl<C: MediaClock> ClockController<C> {
    /// Take ownership of `root` with default options. Starts stopped.
    pub fn new(root: SceneNode, clock: C) -> LayerclockResult<Self> {
        Self::with_opts(root, clock, ControllerOpts::default())
    }

    /// Take ownership of `root`. Starts stopped.
    ///
    /// Any duration already stored on `root` is discarded; [`resolve_duration`] must run before
    /// [`seek`].
    ///
    /// [`resolve_duration`]: Self::resolve_duration
    /// [`seek`]: Self::seek
    pub fn with_opts(
        mut root: SceneNode,
        clock: C,
        opts: ControllerOpts,
    ) -> LayerclockResult<Self> {
        root.validate()?;
        root.duration = None;
        root.timing.time_offset = 0.0;
        root.timing.speed = 0.0;
        Ok(Self {
            root,
            clock,
            opts,
            observers: Vec::new(),
            next_observer: 0,
        })
    }

    /// Resolve the natural duration of the tree and store it on the root.
    ///
    /// Runs the traversal once per controller; later calls return the stored value.
    #[tracing::instrument(skip(self), fields(scene = %self.root.name))]
    pub fn resolve_duration(&mut self) -> LayerclockResult<f64> {
        if let Some(d) = self.root.duration {
            return Ok(d);
        }
        let d = resolver::resolve_duration(&mut self.root)?;
        self.notify();
        Ok(d)
    }

    /// Play from the start.
    pub fn play(&mut self) {
        let now = self.clock.now();
        let t = &mut self.root.timing;
        t.speed = 1.0;
        t.begin_time = now;
        t.time_offset = 0.0;
        self.transitioned("play");
    }

    /// Toggle between playing and frozen.
    ///
    /// Freezing stores the current local time in `time_offset`; resuming rebuilds `begin_time` so
    /// local time continues from that value.
    pub fn pause(&mut self) {
        match self.state() {
            PlaybackState::Playing => {
                let now = self.clock.now();
                let t = &mut self.root.timing;
                let paused_at = t.local_time(now);
                t.speed = 0.0;
                t.time_offset = paused_at;
                self.transitioned("pause");
            }
            PlaybackState::Paused => self.resume_at(1.0, "resume"),
            PlaybackState::Stopped => match self.opts.pause_when_stopped {
                StoppedPause::Resume => self.resume_at(1.0, "resume"),
                StoppedPause::Ignore => {
                    tracing::debug!("pause ignored while stopped");
                }
            },
        }
    }

    /// Freeze at the beginning.
    pub fn stop(&mut self) {
        let t = &mut self.root.timing;
        t.time_offset = 0.0;
        t.speed = 0.0;
        self.transitioned("stop");
    }

    /// Jump to `progress * duration`. Leaves `speed` untouched, so a playing controller keeps
    /// playing from the new offset.
    ///
    /// Fails without side effects if the duration is unresolved or `progress` is outside `[0, 1]`.
    #[tracing::instrument(skip(self))]
    pub fn seek(&mut self, progress: f64) -> LayerclockResult<()> {
        let Some(duration) = self.root.duration else {
            tracing::warn!("seek before duration resolution");
            return Err(LayerclockError::precondition(
                "seek called before the natural duration was resolved",
            ));
        };
        if !(0.0..=1.0).contains(&progress) {
            tracing::warn!("seek progress out of range");
            return Err(LayerclockError::precondition(format!(
                "seek progress must be within [0, 1] (got {progress})"
            )));
        }
        self.root.timing.time_offset = progress * duration;
        self.transitioned("seek");
        Ok(())
    }

    /// Change the playback rate.
    ///
    /// While playing, local time is continuous across the change and a rate of `0` freezes like
    /// [`pause`](Self::pause). While frozen, a positive rate resumes from the frozen offset.
    #[tracing::instrument(skip(self))]
    pub fn set_speed(&mut self, rate: f64) -> LayerclockResult<()> {
        if !rate.is_finite() || rate < 0.0 {
            tracing::warn!("invalid playback rate");
            return Err(LayerclockError::precondition(format!(
                "speed must be finite and >= 0 (got {rate})"
            )));
        }

        match self.state() {
            PlaybackState::Playing => {
                let now = self.clock.now();
                let t = &mut self.root.timing;
                let local = t.local_time(now);
                if rate == 0.0 {
                    t.speed = 0.0;
                    t.time_offset = local;
                } else {
                    t.begin_time = now - (local - t.time_offset) / rate;
                    t.speed = rate;
                }
                self.transitioned("set_speed");
            }
            PlaybackState::Paused | PlaybackState::Stopped if rate > 0.0 => {
                self.resume_at(rate, "set_speed");
            }
            PlaybackState::Paused | PlaybackState::Stopped => {}
        }
        Ok(())
    }

    /// Resolve the duration if needed, then fit the root into `viewport`.
    pub fn install(&mut self, viewport: Size) -> LayerclockResult<FitTransform> {
        self.resolve_duration()?;
        self.layout(viewport)
    }

    /// Fit the root's bounds into `viewport`. Call again whenever the viewport changes.
    pub fn layout(&self, viewport: Size) -> LayerclockResult<FitTransform> {
        fit_transform(self.root.bounds, viewport)
    }

    /// Derived playback state.
    pub fn state(&self) -> PlaybackState {
        self.root.timing.state()
    }

    /// Root local time at the current wall-clock instant.
    pub fn local_time(&self) -> f64 {
        self.root.timing.local_time(self.clock.now())
    }

    /// Local time as a fraction of the natural duration; `None` until resolved.
    ///
    /// Not clamped: a playing controller runs past `1.0` once the animations are over.
    pub fn progress(&self) -> Option<f64> {
        self.root.duration.map(|d| self.local_time() / d)
    }

    /// Current root timing.
    pub fn snapshot(&self) -> TimingSnapshot {
        let t = &self.root.timing;
        TimingSnapshot {
            time_offset: t.time_offset,
            begin_time: t.begin_time,
            duration: self.root.duration,
            repeat_duration: t.repeat_duration,
            repeat_count: t.repeat_count,
            speed: t.speed,
            state: t.state(),
        }
    }

    /// Register a callback that receives the current snapshot now and after every operation.
    pub fn observe<F>(&mut self, mut callback: F) -> ObserverId
    where
        F: FnMut(&TimingSnapshot) + 'static,
    {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        callback(&self.snapshot());
        self.observers.push((id, Box::new(callback)));
        id
    }

    /// Drop a callback. Returns `false` if `id` was not registered.
    pub fn unobserve(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(oid, _)| *oid != id);
        self.observers.len() != before
    }

    /// Read-only view of the owned tree.
    pub fn root(&self) -> &SceneNode {
        &self.root
    }

    /// The wall clock driving this controller.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Options in effect.
    pub fn opts(&self) -> &ControllerOpts {
        &self.opts
    }

    /// Give the tree back, ending the playback session.
    pub fn into_root(self) -> SceneNode {
        self.root
    }

    fn resume_at(&mut self, rate: f64, op: &'static str) {
        let now = self.clock.now();
        let t = &mut self.root.timing;
        let frozen = t.time_offset;
        t.speed = rate;
        t.time_offset = 0.0;
        t.begin_time = now - frozen / rate;
        self.transitioned(op);
    }

    fn transitioned(&mut self, op: &'static str) {
        let t = &self.root.timing;
        tracing::debug!(
            op,
            time_offset = t.time_offset,
            begin_time = t.begin_time,
            speed = t.speed,
            "root timing updated"
        );
        self.notify();
    }

    fn notify(&mut self) {
        if self.observers.is_empty() {
            return;
        }
        let snap = self.snapshot();
        for (_, cb) in &mut self.observers {
            cb(&snap);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/control/controller.rs"]
mod tests;
