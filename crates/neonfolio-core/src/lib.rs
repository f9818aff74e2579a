//! Behaviour core for the neonfolio portfolio page.
//!
//! Every component here is a plain state machine: calls come in with the
//! current pointer/scroll/geometry facts and a [`timers::Scheduler`], and the
//! component answers with a list of effects for the presentation layer to
//! apply. Nothing in this crate touches a rendering surface, which keeps the
//! timing contracts testable on the virtual [`timers::TimerQueue`].

pub mod carousel;
pub mod cursor;
pub mod decor;
pub mod dimming;
pub mod geometry;
pub mod loading;
pub mod motion;
pub mod preview;
pub mod scroll;
pub mod text_fx;
pub mod timers;
pub mod viewer;
pub mod visual_mode;

pub use geometry::{Point, Rect, Size};
pub use timers::{Fired, Scheduler, TimerHandle, TimerQueue};
