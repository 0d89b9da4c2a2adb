//! Upload filename handling
//!
//! Accepts only image uploads by extension and derives a collision-resistant
//! storage name for each accepted file.

use uuid::Uuid;

/// Image extensions accepted by the disease endpoint (compared lowercase)
pub const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Extension after the last '.', or None if the name has no dot
pub fn file_extension(filename: &str) -> Option<&str> {
    filename.rsplit_once('.').map(|(_, ext)| ext)
}

/// Check whether a filename carries an allowed image extension
///
/// Matching is case-insensitive on the text after the last dot, so
/// `leaf.JPG` passes and `leaf.png.exe` does not.
pub fn allowed_file(filename: &str) -> bool {
    match file_extension(filename) {
        Some(ext) => {
            let ext = ext.to_ascii_lowercase();
            ALLOWED_EXTENSIONS.contains(&ext.as_str())
        }
        None => false,
    }
}

/// Generate a unique storage name keeping the original extension
///
/// Returns `<32 hex chars>.<ext>`. The extension keeps the caller's casing.
/// Callers must validate with [`allowed_file`] first; the extension is the
/// only part of the client-supplied name that reaches the filesystem.
pub fn unique_upload_name(filename: &str) -> String {
    let stem = Uuid::new_v4().simple().to_string();
    match file_extension(filename) {
        Some(ext) if !ext.is_empty() => format!("{}.{}", stem, ext),
        _ => stem,
    }
}
