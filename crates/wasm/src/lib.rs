#![deny(unsafe_code)]
//! WASM bindings that mount the particle field behind page content.
//!
//! ```js
//! import init, { ParticleField } from "particle-field-wasm";
//! await init();
//! const field = new ParticleField();          // or new ParticleField('{"max_count": 60}')
//! field.mount(document.getElementById("hero-bg"));
//! // ...
//! field.unmount();                            // or field.free()
//! ```
//!
//! The field never throws into the page: a missing 2D context, a refused
//! scheduler, or bad parameters are logged to the console and the effect is
//! simply absent.

pub mod canvas;
pub mod host;
mod logger;

use canvas::CanvasSurface;
use host::{measure, WebHost};
use log::{warn, LevelFilter};
use particle_field_core::Xorshift64;
use particle_field_sim::{Controller, FieldConfig, MountOutcome};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, HtmlElement};

pub(crate) type FieldController = Controller<CanvasSurface, WebHost>;
pub(crate) type Shared = RefCell<FieldController>;

/// Inline style placing the canvas over the container's full box.
const CANVAS_STYLE: &str = "position:absolute;inset:0;width:100%;height:100%;display:block;";

/// Parses optional JSON tunables, falling back to defaults on any problem.
pub fn config_from_params(params_json: Option<&str>) -> FieldConfig {
    let Some(raw) = params_json.filter(|s| !s.trim().is_empty()) else {
        return FieldConfig::default();
    };
    let parsed = serde_json::from_str::<serde_json::Value>(raw)
        .map_err(|e| e.to_string())
        .and_then(|v| FieldConfig::from_json(&v).map_err(|e| e.to_string()));
    parsed.unwrap_or_else(|e| {
        warn!("ignoring particle field params: {e}");
        FieldConfig::default()
    })
}

/// A particle field that can be mounted into one container at a time.
#[wasm_bindgen]
pub struct ParticleField {
    controller: Rc<Shared>,
    canvas: Option<HtmlCanvasElement>,
}

#[wasm_bindgen]
impl ParticleField {
    /// Creates an unmounted field from optional JSON parameters.
    #[wasm_bindgen(constructor)]
    pub fn new(params_json: Option<String>) -> ParticleField {
        logger::init(LevelFilter::Info);
        let config = config_from_params(params_json.as_deref());
        ParticleField {
            controller: Rc::new(RefCell::new(Controller::new(config))),
            canvas: None,
        }
    }

    /// Creates a canvas inside `container` and starts the animation loop.
    ///
    /// Does nothing if already mounted or if the browser cannot provide a
    /// 2D context.
    pub fn mount(&mut self, container: HtmlElement) {
        match self.controller.try_borrow() {
            Ok(controller) if controller.is_mounted() => return,
            Ok(_) => {}
            Err(_) => {
                warn!("mount while a frame is running, skipped");
                return;
            }
        }
        let Some(window) = web_sys::window() else {
            warn!("no window, particle field disabled");
            return;
        };
        let Some(canvas) = create_canvas(&window, &container) else {
            warn!("could not create canvas, particle field disabled");
            return;
        };

        let surface = CanvasSurface::from_canvas(canvas.clone(), window.device_pixel_ratio());
        let host = WebHost::new(
            Rc::downgrade(&self.controller),
            window.clone(),
            canvas.clone(),
            container.clone(),
        );
        let now_ms = window.performance().map_or(0.0, |p| p.now());
        let seed = Xorshift64::seed_from_parts(&[
            (js_sys::Math::random() * (1u64 << 53) as f64) as u64,
            now_ms.to_bits(),
        ]);

        let bounds = measure(&canvas);
        let Ok(mut controller) = self.controller.try_borrow_mut() else {
            canvas.remove();
            return;
        };
        let outcome = controller.mount(surface, host, bounds, now_ms, seed);
        drop(controller);
        match outcome {
            MountOutcome::Running => self.canvas = Some(canvas),
            MountOutcome::Degraded | MountOutcome::AlreadyMounted => canvas.remove(),
        }
    }

    /// Stops the loop, detaches listeners and removes the canvas.
    pub fn unmount(&mut self) {
        match self.controller.try_borrow_mut() {
            Ok(mut controller) => controller.unmount(),
            Err(_) => warn!("unmount while a frame is running, skipped"),
        }
        if let Some(canvas) = self.canvas.take() {
            canvas.remove();
        }
    }

    /// Whether the animation loop is mounted.
    ///
    /// Returns `false` when called from inside one of the field's own
    /// callbacks, where the controller is busy and its state unknown.
    pub fn is_running(&self) -> bool {
        self.controller
            .try_borrow()
            .is_ok_and(|c| c.is_mounted())
    }

    /// JSON schema of the accepted parameters.
    pub fn param_schema() -> String {
        FieldConfig::param_schema().to_string()
    }
}

impl Drop for ParticleField {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn create_canvas(window: &web_sys::Window, container: &HtmlElement) -> Option<HtmlCanvasElement> {
    let document = container.owner_document().or_else(|| window.document())?;
    let canvas = document
        .create_element("canvas")
        .ok()?
        .dyn_into::<HtmlCanvasElement>()
        .ok()?;
    canvas.set_attribute("style", CANVAS_STYLE).ok()?;
    canvas.set_attribute("aria-hidden", "true").ok()?;
    container.append_child(&canvas).ok()?;
    Some(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_blank_params_use_defaults() {
        assert_eq!(config_from_params(None), FieldConfig::default());
        assert_eq!(config_from_params(Some("  ")), FieldConfig::default());
    }

    #[test]
    fn valid_params_are_applied() {
        let config = config_from_params(Some(r#"{"max_count": 40, "edge_threshold": 100}"#));
        assert_eq!(config.max_count, 40);
        assert_eq!(config.edge_threshold, 100.0);
    }

    #[test]
    fn malformed_or_invalid_params_fall_back() {
        assert_eq!(config_from_params(Some("{nope")), FieldConfig::default());
        assert_eq!(
            config_from_params(Some(r#"{"min_count": 99, "max_count": 1}"#)),
            FieldConfig::default()
        );
    }

    fn unmounted_field() -> ParticleField {
        ParticleField {
            controller: Rc::new(RefCell::new(Controller::new(FieldConfig::default()))),
            canvas: None,
        }
    }

    #[test]
    fn unmounted_field_is_not_running() {
        assert!(!unmounted_field().is_running());
    }

    #[test]
    fn busy_controller_is_not_reported_running() {
        let field = unmounted_field();
        let _busy = field.controller.borrow_mut();
        assert!(!field.is_running());
    }
}
