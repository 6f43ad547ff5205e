use crate::models::Highlight;
use std::fs;
use std::path::Path;

#[derive(Debug)]
pub enum JsonError {
    Serialize(String),
    Write(String),
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JsonError::Serialize(e) => write!(f, "Failed to serialize highlights: {}", e),
            JsonError::Write(e) => write!(f, "Failed to write JSON file: {}", e),
        }
    }
}

impl std::error::Error for JsonError {}

impl From<serde_json::Error> for JsonError {
    fn from(e: serde_json::Error) -> Self {
        JsonError::Serialize(e.to_string())
    }
}

/// Write all highlights as a pretty-printed JSON array, replacing any
/// existing file. Serialization happens fully in memory first, so a failure
/// leaves no partial output.
pub fn write_highlights(highlights: &[Highlight], destination: &Path) -> Result<(), JsonError> {
    let json = serde_json::to_string_pretty(highlights)?;
    fs::write(destination, json)
        .map_err(|e| JsonError::Write(format!("{}: {}", destination.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn make_highlight(text: &str, page: Option<&str>) -> Highlight {
        Highlight {
            author: "Virginia Woolf".to_string(),
            title: "The Waves".to_string(),
            text: text.to_string(),
            timestamp: "1 June 2020 21:04:10".to_string(),
            loc: "1034".to_string(),
            page: page.map(String::from),
        }
    }

    #[test]
    fn test_written_json_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("highlights.json");
        let highlights = vec![
            make_highlight("I am made and remade continually.", Some("12")),
            make_highlight("The wave paused, and then drew out again.", None),
        ];

        write_highlights(&highlights, &destination).unwrap();

        let parsed: Value =
            serde_json::from_str(&fs::read_to_string(&destination).unwrap()).unwrap();
        let records = parsed.as_array().unwrap();

        assert_eq!(records.len(), highlights.len());
        for record in records {
            for key in ["author", "title", "text", "timestamp", "loc", "page"] {
                assert!(record.get(key).is_some(), "missing key {}", key);
            }
        }
        assert_eq!(records[0]["page"], Value::String("12".to_string()));
        assert_eq!(records[1]["page"], Value::Null);
    }

    #[test]
    fn test_existing_file_is_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let destination = dir.path().join("highlights.json");
        fs::write(&destination, "stale content").unwrap();

        write_highlights(&[make_highlight("fresh", None)], &destination).unwrap();

        let parsed: Value =
            serde_json::from_str(&fs::read_to_string(&destination).unwrap()).unwrap();

        assert_eq!(parsed.as_array().unwrap().len(), 1);
    }
}
