use crate::app::{announce_spell, App};
use crate::dom;
use crate::input;
use instant::Instant;
use rune_core::InputSource;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

// Touch pointers are handled by the touch listeners, which carry identifiers.
#[inline]
fn is_touch(ev: &web::PointerEvent) -> bool {
    ev.pointer_type() == "touch"
}

pub fn wire_pointer_handlers(app: &Rc<RefCell<App>>, canvas: &web::HtmlCanvasElement) {
    wire_pointerdown(app, canvas);
    wire_pointermove(app, canvas);
    wire_pointerup(app);
    wire_pointercancel(app);
}

fn wire_pointerdown(app: &Rc<RefCell<App>>, canvas: &web::HtmlCanvasElement) {
    let app = app.clone();
    let canvas_for_handler = canvas.clone();
    dom::add_listener(canvas, "pointerdown", move |ev: web::PointerEvent| {
        if is_touch(&ev) {
            return;
        }
        let p = input::pointer_canvas_px(&ev, &canvas_for_handler);
        let started = app
            .borrow_mut()
            .pointer_down(p, InputSource::Pointer, Instant::now());
        if started {
            _ = canvas_for_handler.set_pointer_capture(ev.pointer_id());
            ev.prevent_default();
        }
    });
}

fn wire_pointermove(app: &Rc<RefCell<App>>, canvas: &web::HtmlCanvasElement) {
    let app = app.clone();
    let canvas_for_handler = canvas.clone();
    let Some(window) = web::window() else {
        return;
    };
    dom::add_listener(&window, "pointermove", move |ev: web::PointerEvent| {
        if is_touch(&ev) {
            return;
        }
        let p = input::pointer_canvas_px(&ev, &canvas_for_handler);
        _ = app.borrow_mut().pointer_move(p, InputSource::Pointer);
    });
}

fn wire_pointerup(app: &Rc<RefCell<App>>) {
    let app = app.clone();
    let Some(window) = web::window() else {
        return;
    };
    dom::add_listener(&window, "pointerup", move |ev: web::PointerEvent| {
        if is_touch(&ev) {
            return;
        }
        let report = app
            .borrow_mut()
            .pointer_up(InputSource::Pointer, Instant::now());
        if let Some(report) = report {
            announce_spell(&report);
        }
    });
}

fn wire_pointercancel(app: &Rc<RefCell<App>>) {
    let app = app.clone();
    let Some(window) = web::window() else {
        return;
    };
    dom::add_listener(&window, "pointercancel", move |ev: web::PointerEvent| {
        if is_touch(&ev) {
            return;
        }
        app.borrow_mut()
            .cancel(InputSource::Pointer, Instant::now());
    });
}
