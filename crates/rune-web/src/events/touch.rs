use crate::app::{announce_spell, App};
use crate::dom;
use crate::input;
use instant::Instant;
use rune_core::InputSource;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

// One finger owns a gesture; the core ignores the others until it lifts.
pub fn wire_touch_handlers(app: &Rc<RefCell<App>>, canvas: &web::HtmlCanvasElement) {
    wire_touchstart(app, canvas);
    wire_touchmove(app, canvas);
    wire_touchend(app, canvas);
    wire_touchcancel(app, canvas);
}

fn wire_touchstart(app: &Rc<RefCell<App>>, canvas: &web::HtmlCanvasElement) {
    let app = app.clone();
    let canvas_for_handler = canvas.clone();
    dom::add_listener(canvas, "touchstart", move |ev: web::TouchEvent| {
        let now = Instant::now();
        for (id, p) in input::changed_touches(&ev, &canvas_for_handler) {
            if app.borrow_mut().pointer_down(p, InputSource::Touch(id), now) {
                ev.prevent_default();
                break;
            }
        }
    });
}

fn wire_touchmove(app: &Rc<RefCell<App>>, canvas: &web::HtmlCanvasElement) {
    let app = app.clone();
    let canvas_for_handler = canvas.clone();
    dom::add_listener(canvas, "touchmove", move |ev: web::TouchEvent| {
        let mut app_ref = app.borrow_mut();
        let mut drawing = false;
        for (id, p) in input::changed_touches(&ev, &canvas_for_handler) {
            drawing |= app_ref.pointer_move(p, InputSource::Touch(id));
        }
        // keep the page from scrolling under the drawing finger only
        if drawing {
            ev.prevent_default();
        }
    });
}

fn wire_touchend(app: &Rc<RefCell<App>>, canvas: &web::HtmlCanvasElement) {
    let app = app.clone();
    let canvas_for_handler = canvas.clone();
    dom::add_listener(canvas, "touchend", move |ev: web::TouchEvent| {
        let now = Instant::now();
        for (id, _) in input::changed_touches(&ev, &canvas_for_handler) {
            let report = app.borrow_mut().pointer_up(InputSource::Touch(id), now);
            if let Some(report) = report {
                announce_spell(&report);
            }
        }
    });
}

fn wire_touchcancel(app: &Rc<RefCell<App>>, canvas: &web::HtmlCanvasElement) {
    let app = app.clone();
    let canvas_for_handler = canvas.clone();
    dom::add_listener(canvas, "touchcancel", move |ev: web::TouchEvent| {
        let now = Instant::now();
        for (id, _) in input::changed_touches(&ev, &canvas_for_handler) {
            app.borrow_mut().cancel(InputSource::Touch(id), now);
        }
    });
}
