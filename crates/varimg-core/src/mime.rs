//! MIME type and filename inference for image URLs.
//!
//! Staged uploads require a filename and MIME type up front, but CSV rows only
//! carry URLs. Both are inferred from the URL's last path segment; query
//! strings and fragments are ignored.

/// Fallback when the URL carries no recognizable image extension.
const DEFAULT_MIME: &str = "image/jpeg";

/// Infers the MIME type from the URL's file extension.
///
/// Unknown or missing extensions fall back to `image/jpeg`.
pub fn mime_type_for_url(url: &str) -> &'static str {
    let Some(ext) = extension(url) else {
        return DEFAULT_MIME;
    };
    match ext.as_str() {
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "jpg" | "jpeg" => "image/jpeg",
        _ => DEFAULT_MIME,
    }
}

/// Derives an upload filename from the URL's last path segment.
///
/// Falls back to `image.jpg` when the segment is empty (e.g. a bare domain or
/// a URL ending in `/`).
pub fn filename_for_url(url: &str) -> String {
    let name = last_segment(url);
    if name.is_empty() {
        "image.jpg".to_owned()
    } else {
        name.to_owned()
    }
}

fn last_segment(url: &str) -> &str {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.rsplit('/').next().unwrap_or(path)
}

fn extension(url: &str) -> Option<String> {
    let name = last_segment(url);
    name.rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
}

#[cfg(test)]
#[path = "mime_test.rs"]
mod tests;
