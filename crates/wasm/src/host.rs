//! [`Host`] implementation over browser APIs.
//!
//! Frames come from `requestAnimationFrame`, container size from a
//! `ResizeObserver`, and pointer position from `pointermove` /
//! `pointerleave` on the canvas. Every closure holds a `Weak` handle to the
//! controller, so the controller owning this host never forms an `Rc` cycle.

use crate::Shared;
use log::{debug, warn};
use particle_field_core::{Bounds, FieldError};
use particle_field_sim::{FrameRequest, Host};
use std::rc::Weak;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, HtmlElement, PointerEvent, ResizeObserver, Window};

pub struct WebHost {
    window: Window,
    canvas: HtmlCanvasElement,
    container: HtmlElement,
    on_frame: Closure<dyn FnMut(f64)>,
    on_pointer_move: Closure<dyn FnMut(PointerEvent)>,
    on_pointer_leave: Closure<dyn FnMut(PointerEvent)>,
    on_resize: Closure<dyn FnMut(js_sys::Array)>,
    observer: Option<ResizeObserver>,
    listening: bool,
}

/// Runs `f` against the controller if it is still alive and not already
/// borrowed by an outer callback.
fn with_controller(weak: &Weak<Shared>, what: &str, f: impl FnOnce(&mut crate::FieldController)) {
    let Some(shared) = weak.upgrade() else {
        return;
    };
    match shared.try_borrow_mut() {
        Ok(mut controller) => f(&mut controller),
        Err(_) => debug!("skipping re-entrant {what} callback"),
    };
}

/// Bounds of the canvas from its layout rect.
///
/// The canvas is stretched over the container's padding box, so its own
/// rect is the drawable area on mount, on every resize, and for pointer
/// coordinates alike.
pub fn measure(canvas: &HtmlCanvasElement) -> Result<Bounds, FieldError> {
    let rect = canvas.get_bounding_client_rect();
    Bounds::new(rect.width(), rect.height())
}

impl WebHost {
    pub fn new(
        weak: Weak<Shared>,
        window: Window,
        canvas: HtmlCanvasElement,
        container: HtmlElement,
    ) -> Self {
        let on_frame = {
            let weak = weak.clone();
            Closure::<dyn FnMut(f64)>::new(move |now_ms: f64| {
                with_controller(&weak, "frame", |c| {
                    c.on_frame(now_ms);
                });
            })
        };

        let on_pointer_move = {
            let weak = weak.clone();
            let canvas = canvas.clone();
            Closure::<dyn FnMut(PointerEvent)>::new(move |event: PointerEvent| {
                let rect = canvas.get_bounding_client_rect();
                let x = f64::from(event.client_x()) - rect.left();
                let y = f64::from(event.client_y()) - rect.top();
                with_controller(&weak, "pointermove", |c| c.pointer_moved(x, y));
            })
        };

        let on_pointer_leave = {
            let weak = weak.clone();
            Closure::<dyn FnMut(PointerEvent)>::new(move |_event: PointerEvent| {
                with_controller(&weak, "pointerleave", |c| c.pointer_left());
            })
        };

        let on_resize = {
            let canvas = canvas.clone();
            Closure::<dyn FnMut(js_sys::Array)>::new(move |_entries: js_sys::Array| {
                let bounds = measure(&canvas);
                with_controller(&weak, "resize", |c| c.resized(bounds));
            })
        };

        Self {
            window,
            canvas,
            container,
            on_frame,
            on_pointer_move,
            on_pointer_leave,
            on_resize,
            observer: None,
            listening: false,
        }
    }
}

fn host_error(context: &str, err: JsValue) -> FieldError {
    FieldError::Host(format!("{context}: {err:?}"))
}

impl Host for WebHost {
    fn request_frame(&mut self) -> Result<FrameRequest, FieldError> {
        self.window
            .request_animation_frame(self.on_frame.as_ref().unchecked_ref())
            .map(FrameRequest)
            .map_err(|e| host_error("requestAnimationFrame", e))
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        if let Err(e) = self.window.cancel_animation_frame(request.0) {
            warn!("cancelAnimationFrame failed: {e:?}");
        }
    }

    fn attach_listeners(&mut self) -> Result<(), FieldError> {
        if self.listening {
            return Ok(());
        }
        self.listening = true;
        self.canvas
            .add_event_listener_with_callback(
                "pointermove",
                self.on_pointer_move.as_ref().unchecked_ref(),
            )
            .map_err(|e| host_error("pointermove", e))?;
        self.canvas
            .add_event_listener_with_callback(
                "pointerleave",
                self.on_pointer_leave.as_ref().unchecked_ref(),
            )
            .map_err(|e| host_error("pointerleave", e))?;
        let observer = ResizeObserver::new(self.on_resize.as_ref().unchecked_ref())
            .map_err(|e| host_error("ResizeObserver", e))?;
        observer.observe(&self.container);
        self.observer = Some(observer);
        Ok(())
    }

    fn detach_listeners(&mut self) {
        if !self.listening {
            return;
        }
        self.listening = false;
        // Removing a listener that was never added is a no-op in the DOM.
        let _ = self.canvas.remove_event_listener_with_callback(
            "pointermove",
            self.on_pointer_move.as_ref().unchecked_ref(),
        );
        let _ = self.canvas.remove_event_listener_with_callback(
            "pointerleave",
            self.on_pointer_leave.as_ref().unchecked_ref(),
        );
        if let Some(observer) = self.observer.take() {
            observer.disconnect();
        }
    }
}
