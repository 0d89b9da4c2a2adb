//! Input Normalization Utilities
//!
//! Converts raw categorical strings (previous crop, soil type, season) into
//! canonical form: surrounding whitespace stripped, first character uppercase,
//! remainder lowercase.
//!
//! This is "capitalize" semantics, not per-word title casing:
//! `"black soil"` becomes `"Black soil"`, not `"Black Soil"`.

/// Canonicalize a raw categorical value.
///
/// No vocabulary validation happens here; unrecognized values are returned in
/// canonical form and left for the feature encoder to accept or reject.
pub fn canonicalize(raw: &str) -> String {
    let mut chars = raw.trim().chars();
    match chars.next() {
        None => String::new(),
        Some(first) => {
            let mut out = String::with_capacity(raw.len());
            out.extend(first.to_uppercase());
            out.push_str(&chars.as_str().to_lowercase());
            out
        }
    }
}
