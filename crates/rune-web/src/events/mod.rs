pub mod pointer;
pub mod touch;

use crate::app::App;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

pub fn wire_input_handlers(app: &Rc<RefCell<App>>, canvas: &web::HtmlCanvasElement) {
    pointer::wire_pointer_handlers(app, canvas);
    touch::wire_touch_handlers(app, canvas);
}
