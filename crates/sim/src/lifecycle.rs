//! Lifecycle Controller: owns a surface, a frame loop and the input
//! listeners for one mounted field.
//!
//! The controller is host-agnostic. A [`Host`] supplies frame scheduling and
//! listener registration (the browser binding implements it over
//! `requestAnimationFrame`, `ResizeObserver` and pointer events), and calls
//! back into [`Controller::on_frame`], [`Controller::resized`],
//! [`Controller::pointer_moved`] and [`Controller::pointer_left`].
//!
//! ```text
//! Unmounted --mount--> Mounted(running) --unmount--> Unmounted
//! ```
//!
//! Teardown order matters: on unmount the pending frame request is
//! cancelled and the listeners detached before the surface is dropped, so
//! no callback ever reaches a detached surface.

use crate::config::FieldConfig;
use crate::render::{render, FrameStats};
use crate::state::{init_field, resize_field, FieldState};
use crate::step::step;
use glam::DVec2;
use log::{debug, info, warn};
use particle_field_core::{Bounds, FieldError, Surface, Xorshift64};

/// Opaque handle for a scheduled frame, as returned by the host scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRequest(pub i32);

/// Side-effecting services the controller needs from its environment.
pub trait Host {
    /// Schedules one call to [`Controller::on_frame`].
    fn request_frame(&mut self) -> Result<FrameRequest, FieldError>;

    /// Cancels a request made by [`Host::request_frame`]. Cancelling a
    /// request that already fired must be harmless.
    fn cancel_frame(&mut self, request: FrameRequest);

    /// Starts delivering resize and pointer events.
    fn attach_listeners(&mut self) -> Result<(), FieldError>;

    /// Stops delivering resize and pointer events. Must be idempotent.
    fn detach_listeners(&mut self);
}

/// Result of [`Controller::mount`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountOutcome {
    /// The loop is running (or waiting for a non-empty container).
    Running,
    /// No drawing context or the host refused; nothing was registered.
    Degraded,
    /// The controller was already mounted; nothing changed.
    AlreadyMounted,
}

/// Result of [`Controller::on_frame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Stepped and rendered the field.
    Rendered(FrameStats),
    /// Mounted, but the container has no area yet.
    Waiting,
    /// Not mounted; the call was ignored.
    Idle,
}

struct Running<S, H> {
    surface: S,
    host: H,
    /// `None` while the container has zero area.
    field: Option<FieldState>,
    rng: Xorshift64,
    last_tick_ms: f64,
    pending: Option<FrameRequest>,
}

enum Phase<S, H> {
    Unmounted,
    Mounted(Running<S, H>),
}

/// Drives one particle field from mount to unmount.
pub struct Controller<S: Surface, H: Host> {
    config: FieldConfig,
    phase: Phase<S, H>,
}

impl<S: Surface, H: Host> Controller<S, H> {
    pub fn new(config: FieldConfig) -> Self {
        Self {
            config,
            phase: Phase::Unmounted,
        }
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn is_mounted(&self) -> bool {
        matches!(self.phase, Phase::Mounted(_))
    }

    /// Current field, if mounted and the container has area.
    pub fn field(&self) -> Option<&FieldState> {
        match &self.phase {
            Phase::Mounted(running) => running.field.as_ref(),
            Phase::Unmounted => None,
        }
    }

    /// Whether a frame request is outstanding.
    pub fn has_pending_frame(&self) -> bool {
        matches!(&self.phase, Phase::Mounted(r) if r.pending.is_some())
    }

    /// Starts the field on `surface`.
    ///
    /// A missing surface (no 2D context) or a host that refuses to schedule
    /// degrades to a no-op: anything already registered is unwound and the
    /// controller stays unmounted. Invalid `bounds` defer seeding until the
    /// first [`Controller::resized`] with a usable size.
    pub fn mount(
        &mut self,
        surface: Option<S>,
        mut host: H,
        bounds: Result<Bounds, FieldError>,
        now_ms: f64,
        seed: u64,
    ) -> MountOutcome {
        if self.is_mounted() {
            return MountOutcome::AlreadyMounted;
        }
        let Some(mut surface) = surface else {
            warn!("no 2d drawing context, particle field disabled");
            return MountOutcome::Degraded;
        };

        let mut rng = Xorshift64::new(seed);
        let field = match bounds {
            Ok(bounds) => {
                surface.resize(bounds);
                Some(init_field(bounds, self.config, &mut rng))
            }
            Err(e) => {
                debug!("deferring field seeding: {e}");
                None
            }
        };

        if let Err(e) = host.attach_listeners() {
            warn!("listener registration failed, particle field disabled: {e}");
            host.detach_listeners();
            return MountOutcome::Degraded;
        }
        let pending = match host.request_frame() {
            Ok(request) => request,
            Err(e) => {
                warn!("frame scheduling failed, particle field disabled: {e}");
                host.detach_listeners();
                return MountOutcome::Degraded;
            }
        };

        info!(
            "particle field mounted with {} particles",
            field.as_ref().map_or(0, |f| f.particles.len())
        );
        self.phase = Phase::Mounted(Running {
            surface,
            host,
            field,
            rng,
            last_tick_ms: now_ms,
            pending: Some(pending),
        });
        MountOutcome::Running
    }

    /// Runs one tick: step, render, schedule the next frame.
    ///
    /// Ignored when unmounted, so a stray callback after teardown can
    /// neither mutate the field nor touch the surface. If the next frame
    /// cannot be scheduled the controller unmounts itself.
    pub fn on_frame(&mut self, now_ms: f64) -> TickOutcome {
        let Phase::Mounted(running) = &mut self.phase else {
            return TickOutcome::Idle;
        };
        running.pending = None;
        let dt_seconds = (now_ms - running.last_tick_ms) / 1000.0;
        running.last_tick_ms = now_ms;

        let outcome = match running.field.take() {
            Some(field) => {
                let next = step(&field, dt_seconds);
                let stats = render(&mut running.surface, &next);
                running.field = Some(next);
                TickOutcome::Rendered(stats)
            }
            None => TickOutcome::Waiting,
        };

        match running.host.request_frame() {
            Ok(request) => running.pending = Some(request),
            Err(e) => {
                warn!("could not schedule next frame, particle field stopped: {e}");
                self.unmount();
            }
        }
        outcome
    }

    /// Adapts to a new container size.
    ///
    /// Zero-area sizes seen during layout are skipped; the next usable size
    /// seeds or resizes the field.
    pub fn resized(&mut self, bounds: Result<Bounds, FieldError>) {
        let Phase::Mounted(running) = &mut self.phase else {
            return;
        };
        let bounds = match bounds {
            Ok(b) => b,
            Err(e) => {
                debug!("skipping resize: {e}");
                return;
            }
        };
        running.surface.resize(bounds);
        let next = match running.field.take() {
            Some(field) => resize_field(&field, bounds, &mut running.rng),
            None => init_field(bounds, self.config, &mut running.rng),
        };
        running.field = Some(next);
    }

    /// Records the pointer at surface-relative `(x, y)`.
    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        self.set_pointer(Some(DVec2::new(x, y)));
    }

    /// Forgets the pointer once it leaves the surface.
    pub fn pointer_left(&mut self) {
        self.set_pointer(None);
    }

    fn set_pointer(&mut self, pointer: Option<DVec2>) {
        if let Phase::Mounted(running) = &mut self.phase {
            if let Some(field) = running.field.take() {
                running.field = Some(field.with_pointer(pointer.filter(|p| p.is_finite())));
            }
        }
    }

    /// Cancels the pending frame, detaches listeners and releases the
    /// surface. Safe to call when already unmounted.
    pub fn unmount(&mut self) {
        let Phase::Mounted(mut running) = std::mem::replace(&mut self.phase, Phase::Unmounted)
        else {
            return;
        };
        if let Some(request) = running.pending.take() {
            running.host.cancel_frame(request);
        }
        running.host.detach_listeners();
        drop(running);
        info!("particle field unmounted");
    }
}

impl<S: Surface, H: Host> Drop for Controller<S, H> {
    fn drop(&mut self) {
        self.unmount();
    }
}
