//! Semantic action IDs for Cookie Clicker click targets.
//!
//! These IDs are registered during render and dispatched via `InputEvent::Click`.

pub const CLICK_COOKIE: u16 = 0;
pub const BUY_MULTIPLIER: u16 = 10;
pub const BUY_AUTO_UPGRADE: u16 = 11;
