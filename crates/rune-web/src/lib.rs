#![cfg(target_arch = "wasm32")]
use glam::Vec3;
use instant::Instant;
use rune_core::{GamePhase, Target};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

mod app;
mod camera;
mod constants;
mod dom;
mod events;
mod input;
mod overlay;
mod trail;

use app::App;

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement, app: &Rc<RefCell<App>>) {
    let canvas_resize = canvas.clone();
    let app = app.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
        app.borrow_mut().refresh_guide();
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

fn init(canvas_id: &str) -> anyhow::Result<Rc<RefCell<App>>> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", canvas_id))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    dom::sync_canvas_backing_size(&canvas);

    let profile = input::detect_profile(&window);
    log::info!(
        "[init] canvas #{} {}x{} profile={:?}",
        canvas_id,
        canvas.width(),
        canvas.height(),
        profile
    );
    let app = Rc::new(RefCell::new(App::new(canvas.clone(), document, profile)?));
    events::wire_input_handlers(&app, &canvas);
    wire_canvas_resize(&canvas, &app);
    Ok(app)
}

#[inline]
fn to_js(e: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{:#}", e))
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("rune-web starting");
    Ok(())
}

/// Rune-tracing controller driven by the JS host that owns the 3D scene.
///
/// The host forwards its camera every frame via `set_camera`, calls `tick`
/// from its animation loop and listens for `spellCast` / `phaseChange` on
/// `window`.
#[wasm_bindgen]
pub struct RuneCaster {
    app: Rc<RefCell<App>>,
}

#[wasm_bindgen]
impl RuneCaster {
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> Result<RuneCaster, JsValue> {
        init(canvas_id).map(|app| RuneCaster { app }).map_err(to_js)
    }

    /// `view_proj`: 16 floats, column-major. `eye`, `forward`: 3 floats.
    pub fn set_camera(&self, view_proj: &[f32], eye: &[f32], forward: &[f32]) -> Result<(), JsValue> {
        self.app
            .borrow_mut()
            .set_camera(view_proj, eye, forward)
            .map_err(to_js)
    }

    pub fn set_rock(&self, x: f32, y: f32, z: f32) {
        self.app.borrow_mut().set_rock(Vec3::new(x, y, z));
    }

    pub fn enter_phase(&self, name: &str) -> Result<(), JsValue> {
        let phase = GamePhase::from_name(name)
            .ok_or_else(|| JsValue::from_str(&format!("unknown phase '{}'", name)))?;
        self.app.borrow_mut().enter_phase(phase, Instant::now());
        Ok(())
    }

    /// Spawn a fresh serpent wave from `seed` and enter the battle.
    pub fn start_battle(&self, seed: u32) {
        self.app
            .borrow_mut()
            .start_battle(seed as u64, Instant::now());
    }

    pub fn tick(&self, dt_sec: f32, elapsed_sec: f32) {
        let entered = self
            .app
            .borrow_mut()
            .tick(dt_sec, elapsed_sec, Instant::now());
        if let Some(phase) = entered {
            app::announce_phase(phase);
        }
    }

    /// Flat `[x, y, z, rune_height]` per serpent, in spawn order.
    pub fn serpent_positions(&self) -> Vec<f32> {
        let app = self.app.borrow();
        let mut out = Vec::with_capacity(app.wave().serpents().len() * 4);
        for s in app.wave().serpents() {
            out.extend_from_slice(&[s.position.x, s.position.y, s.position.z, s.rune_height]);
        }
        out
    }

    /// One byte per serpent, 1 while alive.
    pub fn serpent_alive(&self) -> Vec<u8> {
        self.app
            .borrow()
            .wave()
            .serpents()
            .iter()
            .map(|s| u8::from(s.is_alive()))
            .collect()
    }

    pub fn phase(&self) -> String {
        self.app.borrow().phase().name().to_string()
    }

    pub fn training_progress(&self) -> u32 {
        self.app.borrow().training_progress()
    }
}
