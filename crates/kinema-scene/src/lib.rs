//! # kinema-scene
//!
//! The runtime half of Kinema: drawable objects, single-channel animations,
//! the time manager that advances them in lockstep, and the director that
//! drives a scene through a render sink frame by frame.
//!
//! Everything here is single-threaded. Objects are shared through
//! `Rc<RefCell<_>>`; the scene owns them and animations hold weak handles.

pub mod animation;
pub mod channel;
pub mod director;
pub mod object;
pub mod pacing;
pub mod render;
pub mod scene;
pub mod time_manager;

pub use animation::{color_to, move_to, rotate_to, scale_to, Animation, AnimationState};
pub use channel::Channel;
pub use director::{Director, Outcome, PlaybackReport};
pub use object::{shared, Drawable, SharedObject, Triangle};
pub use pacing::{FixedRatePacer, NoPacing, Pacer, SimulatedPacer};
pub use render::{DrawCall, RecordedFrame, RecordingSink, RenderSink};
pub use scene::Scene;
pub use time_manager::TimeManager;
