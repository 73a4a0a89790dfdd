//! Browser bridge: a wasm-bindgen class that lets page script drive the
//! engine and a panel that writes the current stop into the DOM.

use js_sys::Float32Array;
use wasm_bindgen::prelude::*;
use web_time::{Duration, Instant};

use crate::engine::{IsleCommand, IsleEngine};
use crate::input::{InputEvent, InputProcessor, MouseButton};
use crate::options::Options;
use crate::timeline::{InfoPanel, Timeline};

/// Writes the current stop into `#event-title` / `#event-description` and
/// reveals `#info-panel`.
pub struct DomPanel {
    document: Option<web_sys::Document>,
}

impl DomPanel {
    /// Panel bound to the page's document, if there is one.
    #[must_use]
    pub fn new() -> Self {
        Self {
            document: web_sys::window().and_then(|w| w.document()),
        }
    }

    fn element(&self, id: &str) -> Option<web_sys::Element> {
        self.document.as_ref()?.get_element_by_id(id)
    }
}

impl Default for DomPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl InfoPanel for DomPanel {
    fn show(&mut self, title: &str, description: &str) {
        let (Some(title_el), Some(desc_el), Some(panel)) = (
            self.element("event-title"),
            self.element("event-description"),
            self.element("info-panel"),
        ) else {
            log::warn!("info panel elements missing; '{title}' not shown");
            return;
        };
        title_el.set_text_content(Some(title));
        desc_el.set_text_content(Some(description));
        if let Err(e) = panel.set_attribute("style", "display: block") {
            log::warn!("could not reveal info panel: {e:?}");
        }
    }
}

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn performance_now() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map_or(0.0, |p| p.now())
}

/// The island engine as seen from JavaScript.
#[wasm_bindgen]
pub struct WebIsle {
    engine: IsleEngine,
    input: InputProcessor,
    panel: DomPanel,
    origin: Instant,
    origin_ms: f64,
}

#[wasm_bindgen]
impl WebIsle {
    /// Build the island. `timeline_toml` replaces the bundled timeline;
    /// `options_json` overrides any subset of the options.
    #[wasm_bindgen(constructor)]
    pub fn new(
        timeline_toml: Option<String>,
        options_json: Option<String>,
    ) -> Result<WebIsle, JsValue> {
        let options: Options = match options_json.as_deref() {
            Some(json) => serde_json::from_str(json).map_err(js_err)?,
            None => Options::default(),
        };
        let ring = options.scene.ring();
        let timeline = match timeline_toml.as_deref() {
            Some(toml) => Timeline::from_toml_str(toml, ring),
            None => Timeline::builtin(ring),
        }
        .map_err(js_err)?;

        let origin = Instant::now();
        let input = InputProcessor::with_key_bindings(options.keybindings.clone());
        Ok(Self {
            engine: IsleEngine::new(options, timeline, origin),
            input,
            panel: DomPanel::new(),
            origin,
            origin_ms: performance_now(),
        })
    }

    /// JSON schema of the UI-exposed options.
    #[wasm_bindgen(js_name = optionsSchema)]
    pub fn options_schema() -> Result<String, JsValue> {
        serde_json::to_string(&Options::json_schema()).map_err(js_err)
    }

    fn instant(&self, now_ms: f64) -> Instant {
        let secs = ((now_ms - self.origin_ms) / 1000.0).max(0.0);
        self.origin + Duration::try_from_secs_f64(secs).unwrap_or_default()
    }

    fn run(&mut self, command: IsleCommand) -> bool {
        let now = self.instant(performance_now());
        self.engine.execute(command, &mut self.panel, now).is_ok()
    }

    /// Fly to the next stop.
    pub fn next(&mut self) {
        let _ = self.run(IsleCommand::Next);
    }

    /// Fly to the previous stop.
    pub fn prev(&mut self) {
        let _ = self.run(IsleCommand::Prev);
    }

    /// Fly to stop `index`; `false` if it does not exist.
    pub fn goto(&mut self, index: i32) -> bool {
        self.run(IsleCommand::Goto {
            index: i64::from(index),
        })
    }

    /// Treat a click at canvas pixel (`x`, `y`). Returns whether it
    /// landed on a stop.
    pub fn pick(&mut self, x: f32, y: f32) -> bool {
        let before = self.engine.navigator().visits();
        let _ = self.run(IsleCommand::Pick { x, y });
        self.engine.navigator().visits() > before
    }

    /// Forward a pointer move.
    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.feed(InputEvent::CursorMoved { x, y });
    }

    /// Forward a pointer button change (`MouseEvent.button` codes).
    #[wasm_bindgen(js_name = pointerButton)]
    pub fn pointer_button(&mut self, button: i16, pressed: bool) {
        self.feed(InputEvent::MouseButton {
            button: MouseButton::from_dom(button),
            pressed,
        });
    }

    /// Forward a wheel event (positive = zoom in).
    pub fn wheel(&mut self, delta: f32) {
        self.feed(InputEvent::Scroll { delta });
    }

    /// Forward the shift key state.
    pub fn shift(&mut self, held: bool) {
        self.feed(InputEvent::ModifiersChanged { shift: held });
    }

    /// Forward a key press (`KeyboardEvent.code`). Returns whether it was
    /// bound.
    pub fn key(&mut self, code: &str) -> bool {
        match self.input.handle_key_press(code) {
            Some(command) => {
                let _ = self.run(command);
                true
            }
            None => false,
        }
    }

    fn feed(&mut self, event: InputEvent) {
        if let Some(command) = self.input.handle_event(event) {
            let _ = self.run(command);
        }
    }

    /// Advance one frame at `now_ms` (`performance.now()`). Returns the
    /// camera as `[eye.x, eye.y, eye.z, target.x, target.y, target.z]`.
    pub fn update(&mut self, now_ms: f64) -> Float32Array {
        let now = self.instant(now_ms);
        let frame = self.engine.update(&mut self.panel, now);
        let (eye, target) = (frame.pose.eye, frame.pose.target);
        Float32Array::from(&[eye.x, eye.y, eye.z, target.x, target.y, target.z][..])
    }

    /// Column-major view-projection matrix of the current frame.
    #[wasm_bindgen(js_name = viewProj)]
    #[must_use]
    pub fn view_proj(&self) -> Float32Array {
        Float32Array::from(&self.engine.frame_state().view_proj.to_cols_array()[..])
    }

    /// Canvas size changed.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.feed(InputEvent::Resized { width, height });
    }

    /// Current stop index.
    #[wasm_bindgen(js_name = currentIndex)]
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.engine.current_index()
    }
}

/// Module start: route panics and `log` output to the browser console.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}
