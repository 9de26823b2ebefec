//! JSONL transcript writer for collaboration events.
//!
//! Each [`ConversationEvent`] becomes one JSON object per line, with the
//! payload's fields merged alongside `type` and an RFC 3339 `timestamp`.

use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tandem_application::ports::conversation_logger::{ConversationEvent, ConversationLogger};
use tracing::warn;

/// Transcript logger appending one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes after every event and
/// on `Drop`.
pub struct JsonlConversationLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlConversationLogger {
    /// Open `path` for appending, creating it and its parent directories.
    /// Returns `None` (after a warning) if the file cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create transcript directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open transcript {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Open a fresh, timestamped transcript inside `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Option<Self> {
        let name = format!("tandem-{}.jsonl", Utc::now().format("%Y%m%d-%H%M%S"));
        Self::new(dir.as_ref().join(name))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn record(event: ConversationEvent) -> Value {
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let mut map = match event.payload {
            Value::Object(map) => map,
            other => {
                let mut map = Map::new();
                map.insert("data".to_string(), other);
                map
            }
        };
        map.insert("type".to_string(), Value::from(event.event_type));
        map.insert("timestamp".to_string(), Value::from(timestamp));
        Value::Object(map)
    }
}

impl ConversationLogger for JsonlConversationLogger {
    fn log(&self, event: ConversationEvent) {
        let Ok(line) = serde_json::to_string(&Self::record(event)) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            if let Err(e) = writeln!(writer, "{}", line).and_then(|_| writer.flush()) {
                warn!("Failed to write transcript {}: {}", self.path.display(), e);
            }
        }
    }
}

impl Drop for JsonlConversationLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tandem_application::event_types;

    fn read_lines(path: &Path) -> Vec<Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_writes_one_object_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.jsonl");
        let logger = JsonlConversationLogger::new(&path).unwrap();

        logger.log(ConversationEvent::new(
            event_types::SESSION_START,
            json!({"session_id": "abc", "prompt": "Explain photosynthesis"}),
        ));
        logger.log(ConversationEvent::new(
            event_types::EXCHANGE,
            json!({"index": 0, "exchange": {"personality": "INITIAL_GENERATOR"}}),
        ));
        drop(logger);

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["type"], "session_start");
        assert_eq!(lines[0]["session_id"], "abc");
        assert_eq!(lines[1]["type"], "exchange");
        assert_eq!(lines[1]["exchange"]["personality"], "INITIAL_GENERATOR");
        for line in &lines {
            let timestamp = line["timestamp"].as_str().unwrap();
            assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
        }
    }

    #[test]
    fn test_non_object_payload_wrapped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.jsonl");
        let logger = JsonlConversationLogger::new(&path).unwrap();

        logger.log(ConversationEvent::new(
            event_types::SUMMARY,
            json!("Short summary"),
        ));
        drop(logger);

        let lines = read_lines(&path);
        assert_eq!(lines[0]["type"], "summary");
        assert_eq!(lines[0]["data"], "Short summary");
    }

    #[test]
    fn test_reopening_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("chat.jsonl");

        for id in ["first", "second"] {
            let logger = JsonlConversationLogger::new(&path).unwrap();
            logger.log(ConversationEvent::new(
                event_types::SESSION_COMPLETE,
                json!({"session_id": id}),
            ));
        }

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1]["session_id"], "second");
    }

    #[test]
    fn test_in_dir_names_file() {
        let dir = tempfile::tempdir().unwrap();
        let logger = JsonlConversationLogger::in_dir(dir.path()).unwrap();

        let name = logger.path().file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("tandem-"));
        assert!(name.ends_with(".jsonl"));
        assert!(logger.path().starts_with(dir.path()));
    }
}
