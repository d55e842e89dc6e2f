//! Shared CSS selectors used by admin datastar responses.

pub const PANEL: &str = "[data-role=\"panel\"]";
pub const TOAST_STACK: &str = "[data-admin-toast=\"stack\"]";
