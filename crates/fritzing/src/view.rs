//! View-name suffix convention.
//!
//! Fritzing XML names each view element `<name>View` (`breadboardView`,
//! `pcbView`, ...) while the object model stores the bare view name. The
//! mapping is purely textual: any name is accepted, not just the four
//! well-known views.

/// The literal suffix appended to bare view names in XML.
pub const VIEW_SUFFIX: &str = "View";

/// `breadboard` -> `breadboardView`
pub fn append_suffix(name: &str) -> String {
    let mut s = String::with_capacity(name.len() + VIEW_SUFFIX.len());
    s.push_str(name);
    s.push_str(VIEW_SUFFIX);
    s
}

/// `breadboardView` -> `breadboard`; names without the suffix pass through.
pub fn strip_suffix(name: &str) -> &str {
    name.strip_suffix(VIEW_SUFFIX).unwrap_or(name)
}
