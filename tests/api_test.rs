use httpmock::prelude::*;
use std::sync::Arc;
use std::time::Duration;
use sticky_notes::api;
use sticky_notes::core::DecodingParams;
use sticky_notes::{ChatClient, LocalStorage, NotePipeline, NoteRepository};
use tempfile::TempDir;

async fn spawn_test_server(llm: &MockServer, output: &TempDir) -> String {
    let repository = Arc::new(NoteRepository::seeded());
    let generator =
        Arc::new(ChatClient::new(&llm.base_url(), "test-key", Duration::from_secs(5)).unwrap());
    let pipeline = Arc::new(NotePipeline::new(
        repository,
        LocalStorage::new(output.path()),
        generator,
        DecodingParams::default(),
    ));

    let router = api::router(pipeline);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{}", addr)
}

fn mock_summary(server: &MockServer) -> httpmock::Mock<'_> {
    server.mock(|when, then| {
        when.method(POST).path("/chat/completions");
        then.status(200).json_body(serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": "Python is a readable language.\n\n- Interpreted\n- Dynamic"}}]
        }));
    })
}

#[tokio::test]
async fn test_health_and_list_notes() {
    let llm = MockServer::start();
    let output = TempDir::new().unwrap();
    let base_url = spawn_test_server(&llm, &output).await;
    let client = reqwest::Client::new();

    let health: serde_json::Value = client.get(&base_url).send().await.unwrap().json().await.unwrap();
    assert_eq!(health["message"], "Sticky Notes Processing API is running");

    let notes: serde_json::Value = client
        .get(format!("{}/notes", base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(notes["notes"][0]["id"], "note-1");

    let recent = client
        .get(format!("{}/notes/recent?limit=0", base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(recent.status(), 200);
    let recent: serde_json::Value = recent.json().await.unwrap();
    assert_eq!(recent["notes"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_process_note_returns_document_and_filename() {
    let llm = MockServer::start();
    let api_mock = mock_summary(&llm);
    let output = TempDir::new().unwrap();
    let base_url = spawn_test_server(&llm, &output).await;

    let response = reqwest::Client::new()
        .post(format!("{}/process-note", base_url))
        .json(&serde_json::json!({"note_id": "note-1", "command": "summarize"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();

    api_mock.assert();
    assert_eq!(body["note_id"], "note-1");
    assert_eq!(body["action"], "summarize");
    assert_eq!(body["tiptap_doc"]["type"], "doc");
    assert_eq!(body["tiptap_doc"]["content"][1]["type"], "bulletList");

    let filename = body["filename"].as_str().unwrap();
    assert!(filename.starts_with("tiptap_note-1_summarize_"));
    assert!(output.path().join(filename).exists());
}

#[tokio::test]
async fn test_unknown_note_is_404() {
    let llm = MockServer::start();
    let api_mock = mock_summary(&llm);
    let output = TempDir::new().unwrap();
    let base_url = spawn_test_server(&llm, &output).await;

    let response = reqwest::Client::new()
        .post(format!("{}/process-note", base_url))
        .json(&serde_json::json!({"note_id": "nope", "command": "summarize"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 404);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "not_found");
    api_mock.assert_hits(0);
}

#[tokio::test]
async fn test_invalid_command_is_422() {
    let llm = MockServer::start();
    let api_mock = mock_summary(&llm);
    let output = TempDir::new().unwrap();
    let base_url = spawn_test_server(&llm, &output).await;
    let client = reqwest::Client::new();

    for payload in [
        serde_json::json!({"note_id": "note-1", "command": "translate"}),
        serde_json::json!({"note_id": "note-1"}),
        serde_json::json!({"command": "summarize"}),
    ] {
        let response = client
            .post(format!("{}/process-note", base_url))
            .json(&payload)
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), 422, "payload: {}", payload);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["error"], "invalid_request");
    }

    api_mock.assert_hits(0);
}

#[tokio::test]
async fn test_generation_failure_is_503() {
    let llm = MockServer::start();
    llm.mock(|when, then| {
        when.method(POST).path("/chat/completions");
        then.status(200).json_body(serde_json::json!({"choices": []}));
    });
    let output = TempDir::new().unwrap();
    let base_url = spawn_test_server(&llm, &output).await;

    let response = reqwest::Client::new()
        .post(format!("{}/process-note", base_url))
        .json(&serde_json::json!({"note_id": "note-1", "command": "enlarge"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 503);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "service_unavailable");
    assert!(std::fs::read_dir(output.path()).unwrap().next().is_none());
}

#[tokio::test]
async fn test_profile_insight_endpoint() {
    let llm = MockServer::start();
    let api_mock = llm.mock(|when, then| {
        when.method(POST)
            .path("/chat/completions")
            .body_contains("Here are the notes:");
        then.status(200).json_body(serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": "- Interests: python\n- Recent Focus: learning"}}]
        }));
    });
    let output = TempDir::new().unwrap();
    let base_url = spawn_test_server(&llm, &output).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/profile-insight", base_url))
        .json(&serde_json::json!({"command": "profile_insight", "limit": 5}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    api_mock.assert();
    assert_eq!(body["note_ids"], serde_json::json!(["note-1"]));
    assert_eq!(body["action"], "profile_insight");

    let wrong = client
        .post(format!("{}/profile-insight", base_url))
        .json(&serde_json::json!({"command": "summarize"}))
        .send()
        .await
        .unwrap();
    assert_eq!(wrong.status(), 422);
}
