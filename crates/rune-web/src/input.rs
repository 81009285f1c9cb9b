use crate::constants::{MOBILE_MAX_WIDTH_PX, MOBILE_UA_MARKERS};
use glam::Vec2;
use rune_core::InputProfile;
use web_sys as web;

/// Client (CSS px) coordinates to the canvas' backing-store pixels.
#[inline]
pub fn client_to_canvas_px(client_x: f32, client_y: f32, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    let x_css = client_x - rect.left() as f32;
    let y_css = client_y - rect.top() as f32;
    let w = rect.width() as f32;
    let h = rect.height() as f32;
    if w <= 0.0 || h <= 0.0 {
        return Vec2::new(x_css, y_css);
    }
    let sx = (x_css / w) * canvas.width() as f32;
    let sy = (y_css / h) * canvas.height() as f32;
    Vec2::new(sx, sy)
}

#[inline]
pub fn pointer_canvas_px(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    client_to_canvas_px(ev.client_x() as f32, ev.client_y() as f32, canvas)
}

#[inline]
pub fn touch_canvas_px(touch: &web::Touch, canvas: &web::HtmlCanvasElement) -> Vec2 {
    client_to_canvas_px(touch.client_x() as f32, touch.client_y() as f32, canvas)
}

/// Changed touches of a touch event as `(identifier, canvas px)`.
pub fn changed_touches(ev: &web::TouchEvent, canvas: &web::HtmlCanvasElement) -> Vec<(i32, Vec2)> {
    let list = ev.changed_touches();
    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(|t| (t.identifier(), touch_canvas_px(&t, canvas)))
        .collect()
}

/// Touch profile for phones and small viewports, desktop otherwise.
pub fn detect_profile(window: &web::Window) -> InputProfile {
    let ua = window.navigator().user_agent().unwrap_or_default();
    let mobile_ua = MOBILE_UA_MARKERS.iter().any(|m| ua.contains(m));
    let narrow = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .map(|w| w <= MOBILE_MAX_WIDTH_PX)
        .unwrap_or(false);
    if mobile_ua || narrow {
        InputProfile::Touch
    } else {
        InputProfile::Desktop
    }
}
