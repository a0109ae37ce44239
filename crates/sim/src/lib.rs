#![deny(unsafe_code)]
//! Particle network simulation for the animated page background.
//!
//! A [`FieldState`] snapshot is advanced by the pure [`step`] function and
//! painted by [`render`] onto any [`particle_field_core::Surface`]. The
//! [`Controller`] ties both to a host frame scheduler and input listeners
//! and guarantees teardown on unmount.

pub mod config;
pub mod lifecycle;
pub mod particle;
pub mod render;
pub mod state;
pub mod step;

pub use config::FieldConfig;
pub use lifecycle::{Controller, FrameRequest, Host, MountOutcome, TickOutcome};
pub use particle::Particle;
pub use render::{edge_opacity, render, FrameStats};
pub use state::{init_field, particle_count, resize_field, FieldState};
pub use step::{clamp_dt, pointer_push, step};
