use crate::domain::document::Document;
use crate::domain::model::Command;
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use chrono::{DateTime, Local};

/// Writes finished documents to storage as pretty-printed Tiptap JSON.
pub struct DocumentSink<S: Storage> {
    storage: S,
}

impl<S: Storage> DocumentSink<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub async fn save(&self, note_id: &str, command: Command, document: &Document) -> Result<String> {
        let filename = filename_for(note_id, command, Local::now());
        let json = serde_json::to_string_pretty(document)?;

        tracing::debug!("Writing {} ({} bytes)", filename, json.len());
        self.storage.write_file(&filename, json.as_bytes()).await?;

        Ok(filename)
    }
}

/// `tiptap_{note_id}_{command}_{YYYYMMDD_HHMMSS}.json`
pub fn filename_for(note_id: &str, command: Command, at: DateTime<Local>) -> String {
    format!(
        "tiptap_{}_{}_{}.json",
        sanitize_component(note_id),
        command.as_str(),
        at.format("%Y%m%d_%H%M%S")
    )
}

// 只保留安全字元，避免寫出輸出目錄之外
fn sanitize_component(value: &str) -> String {
    value
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
