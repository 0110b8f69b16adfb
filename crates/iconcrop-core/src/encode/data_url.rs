//! `data:` URL wrapping, the form in which icons are stored and embedded.

use base64::{engine::general_purpose, Engine as _};

use super::EncodeError;

/// Wrap encoded bytes as `data:<mime>;base64,<payload>`.
pub fn to_data_url(mime_type: &str, bytes: &[u8]) -> String {
    format!(
        "data:{};base64,{}",
        mime_type,
        general_purpose::STANDARD.encode(bytes)
    )
}

/// Split a base64 `data:` URL into its MIME type and decoded bytes.
pub fn parse_data_url(url: &str) -> Result<(String, Vec<u8>), EncodeError> {
    let rest = url
        .trim()
        .strip_prefix("data:")
        .ok_or_else(|| EncodeError::MalformedDataUrl("missing data: prefix".to_string()))?;

    let (mime, payload) = rest
        .split_once(";base64,")
        .ok_or_else(|| EncodeError::MalformedDataUrl("missing ;base64, marker".to_string()))?;

    let bytes = general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| EncodeError::MalformedDataUrl(e.to_string()))?;

    Ok((mime.to_string(), bytes))
}
