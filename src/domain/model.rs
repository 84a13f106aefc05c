use crate::utils::error::NoteError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Note {
    pub fn joined_tags(&self) -> String {
        self.tags.join(", ")
    }
}

/// 支援的處理指令，對外以 snake_case 名稱表示
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    Summarize,
    Enlarge,
    Format,
    ProfileInsight,
}

impl Command {
    pub const ALL: [Command; 4] = [
        Command::Summarize,
        Command::Enlarge,
        Command::Format,
        Command::ProfileInsight,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Summarize => "summarize",
            Command::Enlarge => "enlarge",
            Command::Format => "format",
            Command::ProfileInsight => "profile_insight",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Command {
    type Err = NoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Command::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| {
                NoteError::invalid_command(format!(
                    "unknown command '{}', expected one of: {}",
                    s,
                    Command::ALL.map(|c| c.as_str()).join(", ")
                ))
            })
    }
}

/// Sampling settings sent with every generation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodingParams {
    pub model: String,
    pub temperature: f32,
    pub top_p: f32,
    pub max_tokens: u32,
}

impl Default for DecodingParams {
    fn default() -> Self {
        Self {
            model: "llama-3.1-8b-instant".to_string(),
            temperature: 0.7,
            top_p: 0.9,
            max_tokens: 2048,
        }
    }
}

/// A fully assembled prompt pair ready for the generator.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub system: String,
    pub user: String,
    pub params: DecodingParams,
}
