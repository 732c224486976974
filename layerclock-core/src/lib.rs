//! layerclock drives playback of a hierarchical layer animation by virtualizing time.
//!
//! A scene is a tree of [`SceneNode`]s, each carrying keyframe animation envelopes and a
//! [`TimeVirtualization`] that maps its parent's time onto its own local time:
//!
//! ```text
//! local = (parent - begin_time) * speed + time_offset
//! ```
//!
//! The compositor applies these mappings down the tree, so rewriting the root's triple is enough
//! to play, pause, seek or stop the whole animation. [`ClockController`] owns the root and is the
//! only writer of that triple.
//!
//! # Lifecycle
//!
//! 1. **Load**: an [`AnimationArchive`] yields a validated root node.
//! 2. **Resolve**: the natural duration (latest animation end anywhere in the tree) is computed
//!    once and stored on the root ([`resolve_duration`]).
//! 3. **Control**: [`ClockController::play`], [`pause`](ClockController::pause) (a toggle),
//!    [`stop`](ClockController::stop) and [`seek`](ClockController::seek) rewrite the root triple
//!    against a [`MediaClock`].
//! 4. **Fit**: [`fit_transform`] scales the root bounds into a viewport whenever it changes.
//!
//! Everything is single-threaded and synchronous; nothing here blocks or does IO except
//! [`AnimationArchive::from_path`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod control;
mod foundation;
mod layout;
mod scene;
mod timing;

pub use control::controller::{
    ClockController, ControllerOpts, ObserverId, StoppedPause, TimingSnapshot,
};
pub use foundation::core::{Affine, MIN_DURATION, Size, Vec2};
pub use foundation::error::{LayerclockError, LayerclockResult};
pub use layout::fit::{FitTransform, fit_transform};
pub use scene::archive::AnimationArchive;
pub use scene::model::{KeyframeAnimation, SceneNode};
pub use timing::clock::{ManualClock, MediaClock, SystemClock};
pub use timing::resolver::{natural_duration, resolve_duration};
pub use timing::virtualization::{PlaybackState, TimeVirtualization, local_time_through};
