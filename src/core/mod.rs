pub mod converter;
pub mod dispatcher;
pub mod pipeline;
pub mod prompts;
pub mod sink;
pub mod store;

pub use crate::domain::document::{Block, Document, ListItem, Paragraph, TextRun};
pub use crate::domain::model::{Command, DecodingParams, GenerationRequest, Note};
pub use crate::domain::ports::{Storage, TextGenerator};
pub use crate::utils::error::Result;
