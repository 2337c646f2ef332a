//! Content-type detection for image queries.

use crate::error::DriverError;
use crate::fs::FileSystem;

/// Detect the media type of `data` from its leading bytes.
///
/// The file name plays no part in detection.
pub fn detect_content_type(data: &[u8]) -> Result<String, String> {
    if data.is_empty() {
        return Err("empty content".to_string());
    }
    let kind = infer::get(data).ok_or_else(|| "unrecognized content".to_string())?;
    parse_media_type(kind.mime_type())
}

/// Parse a media type, dropping parameters and normalizing case.
///
/// `"Image/PNG; charset=binary"` becomes `"image/png"`.
pub fn parse_media_type(value: &str) -> Result<String, String> {
    let essence = value.split(';').next().unwrap_or_default().trim();
    let (kind, subtype) = essence
        .split_once('/')
        .ok_or_else(|| format!("missing subtype in {value:?}"))?;
    if !is_token(kind) || !is_token(subtype) {
        return Err(format!("invalid media type {value:?}"));
    }
    Ok(essence.to_ascii_lowercase())
}

fn is_token(s: &str) -> bool {
    !s.is_empty()
        && s.chars().all(|c| {
            c.is_ascii_alphanumeric() || "!#$%&'*+-.^_`|~".contains(c)
        })
}

/// Read an image through `fs` and detect its media type.
pub async fn read_image(fs: &dyn FileSystem, path: &str) -> Result<(Vec<u8>, String), DriverError> {
    let data = fs.read_file(path).await.map_err(|source| DriverError::Io {
        path: path.to_string(),
        source,
    })?;
    let content_type = detect_content_type(&data).map_err(|message| DriverError::ContentType {
        path: path.to_string(),
        message,
    })?;
    Ok((data, content_type))
}

#[cfg(test)]
#[path = "media_tests.rs"]
mod tests;
