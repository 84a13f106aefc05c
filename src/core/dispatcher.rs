use crate::core::prompts;
use crate::domain::model::{Command, DecodingParams, GenerationRequest, Note};
use crate::domain::ports::TextGenerator;
use crate::utils::error::{NoteError, Result};
use std::sync::Arc;

/// Turns a command plus its input notes into a generation call.
pub struct InstructionDispatcher<G: TextGenerator> {
    generator: Arc<G>,
    params: DecodingParams,
}

impl<G: TextGenerator> InstructionDispatcher<G> {
    pub fn new(generator: Arc<G>, params: DecodingParams) -> Self {
        Self { generator, params }
    }

    pub fn params(&self) -> &DecodingParams {
        &self.params
    }

    /// Single-note path. `profile_insight` treats the note as a one-element set.
    pub async fn process_note(&self, note: &Note, command: Command) -> Result<String> {
        let request = self.build_request(command, prompts::note_prompt(command, note));
        self.generate(request).await
    }

    /// Aggregate path for `profile_insight`.
    pub async fn profile_insight(&self, notes: &[Note]) -> Result<String> {
        if notes.is_empty() {
            return Err(NoteError::invalid_command(
                "profile_insight requires at least one note",
            ));
        }
        let request =
            self.build_request(Command::ProfileInsight, prompts::profile_prompt(notes));
        self.generate(request).await
    }

    fn build_request(&self, command: Command, user: String) -> GenerationRequest {
        GenerationRequest {
            system: prompts::system_prompt(command).to_string(),
            user,
            params: self.params.clone(),
        }
    }

    async fn generate(&self, request: GenerationRequest) -> Result<String> {
        let text = self
            .generator
            .generate(&request)
            .await
            .map_err(NoteError::into_generation_failure)?;

        let text = text.trim();
        if text.is_empty() {
            return Err(NoteError::generation("No content in generation response"));
        }
        Ok(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use tokio::sync::Mutex;

    struct RecordingGenerator {
        reply: std::result::Result<String, String>,
        seen: Mutex<Vec<GenerationRequest>>,
    }

    impl RecordingGenerator {
        fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                reply: Err(message.to_string()),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for RecordingGenerator {
        async fn generate(&self, request: &GenerationRequest) -> Result<String> {
            self.seen.lock().await.push(request.clone());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(message) => Err(NoteError::IoError(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    message.clone(),
                ))),
            }
        }
    }

    fn note(id: &str) -> Note {
        Note {
            id: id.to_string(),
            title: Some("Groceries".to_string()),
            content: "milk eggs bread".to_string(),
            tags: vec!["home".to_string()],
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_process_note_trims_output_and_sends_params() {
        let generator = Arc::new(RecordingGenerator::replying("  A short summary.\n\n"));
        let dispatcher = InstructionDispatcher::new(generator.clone(), DecodingParams::default());

        let text = dispatcher
            .process_note(&note("n1"), Command::Summarize)
            .await
            .unwrap();
        assert_eq!(text, "A short summary.");

        let seen = generator.seen.lock().await;
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].system, prompts::system_prompt(Command::Summarize));
        assert!(seen[0].user.contains("Content: milk eggs bread"));
        assert_eq!(seen[0].params.max_tokens, 2048);
    }

    #[tokio::test]
    async fn test_upstream_error_becomes_generation_failure() {
        let generator = Arc::new(RecordingGenerator::failing("connection refused"));
        let dispatcher = InstructionDispatcher::new(generator, DecodingParams::default());

        let err = dispatcher
            .process_note(&note("n1"), Command::Format)
            .await
            .unwrap_err();
        assert!(matches!(err, NoteError::GenerationFailed { .. }));
        assert!(err.to_string().contains("connection refused"));
    }

    #[tokio::test]
    async fn test_blank_output_becomes_generation_failure() {
        let generator = Arc::new(RecordingGenerator::replying("   \n"));
        let dispatcher = InstructionDispatcher::new(generator, DecodingParams::default());

        let err = dispatcher
            .process_note(&note("n1"), Command::Enlarge)
            .await
            .unwrap_err();
        assert!(matches!(err, NoteError::GenerationFailed { .. }));
    }

    #[tokio::test]
    async fn test_single_note_profile_insight_uses_profile_prompt() {
        let generator = Arc::new(RecordingGenerator::replying("- Interests: cooking"));
        let dispatcher = InstructionDispatcher::new(generator.clone(), DecodingParams::default());

        dispatcher
            .process_note(&note("n1"), Command::ProfileInsight)
            .await
            .unwrap();

        let seen = generator.seen.lock().await;
        assert!(seen[0].user.starts_with("Here are the notes:"));
        assert!(seen[0].user.contains("Title: Groceries"));
    }

    #[tokio::test]
    async fn test_profile_insight_over_many_notes() {
        let generator = Arc::new(RecordingGenerator::replying("- Interests: home"));
        let dispatcher = InstructionDispatcher::new(generator.clone(), DecodingParams::default());

        dispatcher
            .profile_insight(&[note("a"), note("b"), note("c")])
            .await
            .unwrap();

        let seen = generator.seen.lock().await;
        assert_eq!(seen[0].user.matches("Title: Groceries").count(), 3);
    }

    #[tokio::test]
    async fn test_profile_insight_rejects_empty_set_without_calling() {
        let generator = Arc::new(RecordingGenerator::replying("unused"));
        let dispatcher = InstructionDispatcher::new(generator.clone(), DecodingParams::default());

        let err = dispatcher.profile_insight(&[]).await.unwrap_err();
        assert!(matches!(err, NoteError::InvalidCommand { .. }));
        assert!(generator.seen.lock().await.is_empty());
    }
}
