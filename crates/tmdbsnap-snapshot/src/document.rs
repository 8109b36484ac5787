//! JSON document encoding and file I/O.

use std::path::Path;

use serde_json::Value;

/// Encodes a document as pretty-printed UTF-8 JSON with a trailing newline.
///
/// Non-ASCII text is written literally, never `\u`-escaped, and object keys
/// keep the order the API sent them in.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn encode_document(document: &Value) -> serde_json::Result<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(document)?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Reads a stored document back.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid JSON.
pub fn read_document(path: &Path) -> std::io::Result<Value> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use serde_json::json;

    use super::*;

    #[test]
    fn test_encode_keeps_non_ascii_literal() {
        // Arrange
        let document = json!({"title": "搏击俱乐部", "tagline": "Mischief. Mayhem. Soap."});

        // Act
        let text = String::from_utf8(encode_document(&document).unwrap()).unwrap();

        // Assert
        assert!(text.contains("搏击俱乐部"));
        assert!(!text.contains("\\u"));
        assert!(text.ends_with("}\n"));
    }

    #[test]
    fn test_encode_uses_two_space_indent() {
        // Arrange
        let document = json!({"id": 550});

        // Act
        let text = String::from_utf8(encode_document(&document).unwrap()).unwrap();

        // Assert
        assert_eq!(text, "{\n  \"id\": 550\n}\n");
    }

    #[test]
    fn test_encode_preserves_key_order() {
        // Arrange
        let document: Value = serde_json::from_str(r#"{"zeta":1,"alpha":2}"#).unwrap();

        // Act
        let text = String::from_utf8(encode_document(&document).unwrap()).unwrap();

        // Assert
        assert!(text.find("zeta").unwrap() < text.find("alpha").unwrap());
    }

    #[test]
    fn test_written_document_reads_back_equal() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("details.json");
        let json_body = include_str!("../../../fixtures/tmdb/tv_1399_details.json");
        let document: Value = serde_json::from_str(json_body).unwrap();

        // Act
        std::fs::write(&path, encode_document(&document).unwrap()).unwrap();
        let loaded = read_document(&path).unwrap();

        // Assert
        assert_eq!(loaded, document);
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("权力的游戏"));
    }

    #[test]
    fn test_encode_round_trips_full_precision_floats() {
        // Arrange
        let document: Value = serde_json::from_str(r#"{"v":9.0402102123842989}"#).unwrap();

        // Act
        let bytes = encode_document(&document).unwrap();
        let reparsed: Value = serde_json::from_slice(&bytes).unwrap();

        // Assert
        assert_eq!(reparsed, document);
    }

    #[test]
    fn test_encode_round_trips_popularity_values() {
        // Arrange
        let document: Value =
            serde_json::from_str(r#"{"popularity":73.4338,"vote_average":8.438,"runtime":139}"#)
                .unwrap();

        // Act
        let bytes = encode_document(&document).unwrap();
        let reparsed: Value = serde_json::from_slice(&bytes).unwrap();

        // Assert
        assert_eq!(reparsed, document);
    }

    #[test]
    fn test_read_document_rejects_invalid_json() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{").unwrap();

        // Act
        let result = read_document(&path);

        // Assert
        assert!(result.is_err());
    }
}
