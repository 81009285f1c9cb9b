// Front-end tuning constants and DOM hooks

// Trail stroke
pub const TRAIL_START_COLOR: &str = "#00FFFF"; // before the first live score arrives
pub const TRAIL_WIDTH_PX: f64 = 6.0;
pub const TOUCH_TRAIL_WIDTH_PX: f64 = 8.0; // thicker under a finger
pub const TRAIL_GLOW_PX: f64 = 10.0;
pub const TOUCH_TRAIL_GLOW_PX: f64 = 15.0;
pub const TRAIL_CLEAR_DELAY_MS: u64 = 2500; // after the gesture ends

// Cage popup guide (the golden S)
pub const GUIDE_COLOR: &str = "#FFD700";
pub const GUIDE_WIDTH_PX: f64 = 4.0;

// Notifications
pub const NOTIFICATION_MS: u64 = 3000;

// Input profile detection
pub const MOBILE_MAX_WIDTH_PX: f64 = 768.0;
pub const MOBILE_UA_MARKERS: [&str; 8] = [
    "Android",
    "webOS",
    "iPhone",
    "iPad",
    "iPod",
    "BlackBerry",
    "IEMobile",
    "Opera Mini",
];

// Element ids the host page provides (all optional)
pub const ACCURACY_PANEL_ID: &str = "accuracy-display";
pub const ACCURACY_FILL_ID: &str = "accuracy-fill";
pub const ACCURACY_TEXT_ID: &str = "accuracy-text";
pub const ACCURACY_STATUS_ID: &str = "accuracy-status";
pub const NOTIFICATION_ID: &str = "spell-notification";

// Events dispatched on `window`
pub const SPELL_CAST_EVENT: &str = "spellCast";
pub const PHASE_CHANGE_EVENT: &str = "phaseChange";
