//! Accessor naming conventions
//!
//! Attribute names are derived from exposed accessor names: `getCounter`,
//! `isRunning`, and `setCounter` all map to an attribute by stripping the
//! prefix and decapitalizing the first letter. The reverse direction is used
//! at dispatch time to rebuild the accessor name from the attribute name.

/// Upper-case the first letter of `s`, leaving the rest untouched.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lower-case the first letter of `s`, leaving the rest untouched.
pub fn decapitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
