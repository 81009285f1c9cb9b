use crate::constants::*;
use crate::dom;
use rune_core::scoring::percent;
use rune_core::AccuracyTier;
use web_sys as web;

#[inline]
fn set_display(document: &web::Document, id: &str, visible: bool) {
    if let Some(el) = document.get_element_by_id(id) {
        let style = if visible { "" } else { "display:none" };
        _ = el.set_attribute("style", style);
    }
}

fn status_text(tier: AccuracyTier, drawing: bool) -> &'static str {
    match tier {
        AccuracyTier::Excellent => "Excellent! Perfect tracing!",
        AccuracyTier::Good => "Great! Keep following the line!",
        AccuracyTier::Fair => "Good start! Stay closer to the line",
        AccuracyTier::Poor if drawing => "Follow the S-shape line more closely",
        AccuracyTier::Poor => "Start tracing the 'S' shape",
    }
}

#[inline]
pub fn show_accuracy(document: &web::Document) {
    set_display(document, ACCURACY_PANEL_ID, true);
    update_accuracy(document, 0.0, false);
}

#[inline]
pub fn hide_accuracy(document: &web::Document) {
    set_display(document, ACCURACY_PANEL_ID, false);
}

/// Live readout: bar width, percentage and a tier-coloured status line.
pub fn update_accuracy(document: &web::Document, score: f32, drawing: bool) {
    let pct = percent(score);
    let tier = AccuracyTier::from_score(score);
    let color = tier.color_hex();
    if let Some(fill) = dom::html_element(document, ACCURACY_FILL_ID) {
        let style = fill.style();
        _ = style.set_property("width", &format!("{pct}%"));
        _ = style.set_property("background-color", color);
    }
    if let Some(text) = dom::html_element(document, ACCURACY_TEXT_ID) {
        text.set_text_content(Some(&format!("{pct}%")));
        _ = text.style().set_property("color", color);
    }
    if let Some(status) = document.get_element_by_id(ACCURACY_STATUS_ID) {
        status.set_text_content(Some(status_text(tier, drawing)));
    }
}

pub fn notify(document: &web::Document, message: &str) {
    if let Some(el) = document.get_element_by_id(NOTIFICATION_ID) {
        el.set_text_content(Some(message));
        _ = el.set_attribute("style", "");
    }
    log::info!("[notice] {}", message);
}

#[inline]
pub fn hide_notification(document: &web::Document) {
    set_display(document, NOTIFICATION_ID, false);
}
