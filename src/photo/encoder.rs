/// Base64 encoding of the selected photo
///
/// The API takes images inline in the JSON body, so the file is read
/// into memory and encoded as plain base64 text.

use std::path::Path;

use base64::{engine::general_purpose, Engine as _};
use tracing::debug;

use crate::error::ReadError;

/// Read an image file and return its base64 encoding
///
/// # Arguments
/// * `path` - Path to the selected image
///
/// # Returns
/// * `Ok(String)` - Standard base64 with no `data:` prefix
/// * `Err(ReadError)` - The file could not be read
pub async fn encode_image(path: &Path) -> Result<String, ReadError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| ReadError {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("Read {} bytes from {}", bytes.len(), path.display());

    let encoded = general_purpose::STANDARD.encode(&bytes);
    Ok(strip_data_url_prefix(&encoded).to_string())
}

/// Drop a `data:<mime>;base64,` prefix, keeping only the payload
pub fn strip_data_url_prefix(encoded: &str) -> &str {
    if !encoded.starts_with("data:") {
        return encoded;
    }

    match encoded.split_once(',') {
        Some((_, payload)) => payload,
        None => encoded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_encode_image_is_plain_base64() {
        let mut file = tempfile::Builder::new().suffix(".jpg").tempfile().unwrap();
        let bytes = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F'];
        file.write_all(&bytes).unwrap();

        let encoded = encode_image(file.path()).await.unwrap();

        assert!(!encoded.starts_with("data:"));
        assert_eq!(general_purpose::STANDARD.decode(&encoded).unwrap(), bytes);
    }

    #[tokio::test]
    async fn test_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gone.png");

        let err = encode_image(&path).await.unwrap_err();

        assert_eq!(err.path, path);
        assert_eq!(err.source.kind(), std::io::ErrorKind::NotFound);
    }

    #[test]
    fn test_strip_data_url_prefix() {
        assert_eq!(strip_data_url_prefix("data:image/png;base64,iVBORw0KGgo="), "iVBORw0KGgo=");
        assert_eq!(strip_data_url_prefix("iVBORw0KGgo="), "iVBORw0KGgo=");
        assert_eq!(strip_data_url_prefix("data:broken"), "data:broken");
    }
}
