pub mod adapters;
pub mod api;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, ConfigArgs};

pub use adapters::{ChatClient, LocalStorage};
pub use config::AppConfig;
pub use crate::core::{
    converter::plain_text_to_document, pipeline::NotePipeline, store::NoteRepository,
};
pub use utils::error::{NoteError, Result};
