//! Image assets: data URIs and files on disk.
//!
//! Slide backgrounds are configured as either a `data:` URI or a path. They
//! are normalised to data URIs so the deck IR stays self-contained.

use std::{fs, path::PathBuf, thread};

use base64::{engine::general_purpose::STANDARD as BASE64_STD, Engine as _};
use futures::channel::oneshot;

/// Parse a `data:<mime>;base64,<data>` URI and return the raw decoded bytes.
///
/// Returns `Err` if `src` is not a data URI or does not use base64 encoding.
pub fn parse_data_uri(src: &str) -> Result<Vec<u8>, String> {
    let Some(rest) = src.strip_prefix("data:") else {
        let preview: String = src.chars().take(80).collect();
        return Err(format!(
            "Image src must be a base64 data URI \
             (e.g. `data:image/png;base64,...`). Got: {preview:?}"
        ));
    };
    let comma_pos = rest.find(',').ok_or_else(|| {
        "Invalid data URI: missing `,` separator between header and data".to_string()
    })?;
    let header = &rest[..comma_pos];
    if !header.contains(";base64") {
        return Err("Only base64-encoded data URIs are supported. \
             The header must contain `;base64` (e.g. `data:image/png;base64,...`)."
            .to_string());
    }
    let b64_data = rest[comma_pos + 1..].trim();
    BASE64_STD
        .decode(b64_data)
        .map_err(|e| format!("Base64 decode error: {e}"))
}

/// Wrap raw image bytes in a data URI, sniffing the format.
pub fn to_data_uri(bytes: &[u8]) -> Result<String, String> {
    let format = ::image::guess_format(bytes).map_err(|e| e.to_string())?;
    let mime = format.to_mime_type();
    Ok(format!("data:{mime};base64,{}", BASE64_STD.encode(bytes)))
}

/// Pixel size of a data-URI image, without decoding the pixels.
pub fn data_uri_dimensions(src: &str) -> Option<(u32, u32)> {
    let bytes = parse_data_uri(src).ok()?;
    ::image::ImageReader::new(std::io::Cursor::new(bytes))
        .with_guessed_format()
        .ok()?
        .into_dimensions()
        .ok()
}

/// Load one image source: a `data:` URI is validated and used as-is, any
/// other string is read as a file path.
pub async fn load_image_source(src: &str) -> Result<String, String> {
    let src = src.trim();
    if src.is_empty() {
        return Err("empty image source".to_string());
    }
    if src.starts_with("data:") {
        parse_data_uri(src)?;
        return Ok(src.to_string());
    }
    let bytes = read_file(PathBuf::from(src))
        .await
        .map_err(|e| format!("{src}: {e}"))?;
    to_data_uri(&bytes).map_err(|e| format!("{src}: {e}"))
}

/// Read a file on a worker thread so the calling executor is never blocked.
async fn read_file(path: PathBuf) -> Result<Vec<u8>, String> {
    let (tx, rx) = oneshot::channel();
    thread::Builder::new()
        .name("deck-forge-read".into())
        .spawn(move || {
            let _ = tx.send(fs::read(&path));
        })
        .map_err(|e| format!("cannot start reader thread: {e}"))?;
    rx.await
        .map_err(|_| "reader thread exited early".to_string())?
        .map_err(|e| e.to_string())
}

/// Try `primary`, then `fallback`. `None` when neither loads; callers then
/// fall back to text-only slides.
pub async fn load_with_fallback(primary: Option<&str>, fallback: Option<&str>) -> Option<String> {
    for src in [primary, fallback].into_iter().flatten() {
        match load_image_source(src).await {
            Ok(uri) => return Some(uri),
            Err(e) => log::warn!("Failed to load image: {e}"),
        }
    }
    None
}
