use crate::core::converter::plain_text_to_document;
use crate::core::dispatcher::InstructionDispatcher;
use crate::core::sink::DocumentSink;
use crate::core::store::NoteRepository;
use crate::domain::document::Document;
use crate::domain::model::{Command, DecodingParams, Note};
use crate::domain::ports::{Storage, TextGenerator};
use crate::utils::error::{NoteError, Result};
use serde::Serialize;
use std::sync::Arc;

/// Note id used when persisting an aggregate profile report.
pub const AGGREGATE_NOTE_ID: &str = "recent";

#[derive(Debug, Clone, Serialize)]
pub struct ProcessOutcome {
    pub note_id: String,
    pub action: Command,
    pub tiptap_doc: Document,
    pub filename: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileOutcome {
    pub note_ids: Vec<String>,
    pub action: Command,
    pub tiptap_doc: Document,
    pub filename: String,
}

/// lookup → generate → convert → persist.
///
/// Any stage failing aborts the whole request; nothing is written unless
/// generation and conversion succeeded.
pub struct NotePipeline<S: Storage, G: TextGenerator> {
    repository: Arc<NoteRepository>,
    dispatcher: InstructionDispatcher<G>,
    sink: DocumentSink<S>,
}

impl<S: Storage, G: TextGenerator> NotePipeline<S, G> {
    pub fn new(
        repository: Arc<NoteRepository>,
        storage: S,
        generator: Arc<G>,
        params: DecodingParams,
    ) -> Self {
        Self {
            repository,
            dispatcher: InstructionDispatcher::new(generator, params),
            sink: DocumentSink::new(storage),
        }
    }

    pub fn repository(&self) -> &NoteRepository {
        &self.repository
    }

    pub fn extract(&self, note_id: &str) -> Result<&Note> {
        self.repository
            .get_by_id(note_id)
            .ok_or_else(|| NoteError::not_found(note_id))
    }

    pub async fn transform(&self, note: &Note, command: Command) -> Result<Document> {
        let text = self.dispatcher.process_note(note, command).await?;
        tracing::debug!("Generated {} chars for {}", text.len(), note.id);
        Ok(plain_text_to_document(&text))
    }

    pub async fn load(&self, note_id: &str, command: Command, document: &Document) -> Result<String> {
        self.sink.save(note_id, command, document).await
    }

    pub async fn run(&self, note_id: &str, command: Command) -> Result<ProcessOutcome> {
        tracing::info!("Processing note {} with {}", note_id, command);

        let note = self.extract(note_id)?;
        let document = self.transform(note, command).await?;
        tracing::info!("Converted into {} blocks", document.blocks.len());

        let filename = self.load(note_id, command, &document).await?;
        tracing::info!("📁 Saved {}", filename);

        Ok(ProcessOutcome {
            note_id: note_id.to_string(),
            action: command,
            tiptap_doc: document,
            filename,
        })
    }

    /// Profile report over the `limit` most recent notes.
    pub async fn run_profile_insight(&self, limit: usize) -> Result<ProfileOutcome> {
        let notes = self.repository.recent(limit);
        tracing::info!("Building profile insight from {} notes", notes.len());

        let text = self.dispatcher.profile_insight(&notes).await?;
        let document = plain_text_to_document(&text);
        let filename = self
            .load(AGGREGATE_NOTE_ID, Command::ProfileInsight, &document)
            .await?;
        tracing::info!("📁 Saved {}", filename);

        Ok(ProfileOutcome {
            note_ids: notes.into_iter().map(|n| n.id).collect(),
            action: Command::ProfileInsight,
            tiptap_doc: document,
            filename,
        })
    }
}
