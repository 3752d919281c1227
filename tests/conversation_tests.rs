// Multi-turn conversation tests
// Author: kelexine (https://github.com/kelexine)

mod common;

use common::{orchestrator, ScriptedBackend};
use wayfarer::backend::BackendError;
use wayfarer::error::OrchestratorError;
use wayfarer::models::{GenerationOptions, Role};

#[tokio::test]
async fn test_new_session_gets_generated_id() {
    let backend = ScriptedBackend::replying("Hi there!");
    let orchestrator = orchestrator(&backend);

    let turn = orchestrator
        .converse(None, "Hello", &GenerationOptions::default())
        .await
        .unwrap();

    assert!(uuid::Uuid::parse_str(&turn.session_id).is_ok());
    assert_eq!(turn.response, "Hi there!");
    assert_eq!(turn.conversation_length, 2);
    assert_eq!(orchestrator.session_count(), 1);
}

#[tokio::test]
async fn test_history_is_sent_and_bounded() {
    let backend = ScriptedBackend::new();
    let orchestrator = orchestrator(&backend);
    let options = GenerationOptions::default();

    for i in 0..11 {
        backend.push(Ok(format!("reply {}", i)));
        let turn = orchestrator
            .converse(Some("trip"), &format!("question {}", i), &options)
            .await
            .unwrap();
        assert!(turn.conversation_length <= 10);
    }

    assert_eq!(orchestrator.session_length("trip"), 10);

    // The last request carried the newest history, ending in the new question
    let last_call = backend.calls().pop().unwrap();
    let last_message = last_call.messages.last().unwrap();
    assert_eq!(last_message.role, Role::User);
    assert_eq!(last_message.content, "question 10");
    assert!(last_call.messages.len() <= 10);

    let turn = orchestrator
        .converse(Some("trip"), "question 11", &options)
        .await
        .unwrap();
    assert_eq!(turn.conversation_length, 10);

    let sent: Vec<String> = backend
        .calls()
        .pop()
        .unwrap()
        .messages
        .into_iter()
        .map(|m| m.content)
        .collect();
    assert_eq!(
        sent,
        vec![
            "reply 6", "question 7", "reply 7", "question 8", "reply 8",
            "question 9", "reply 9", "question 10", "reply 10", "question 11",
        ]
    );

    // Stored history is the ten most recent messages in order; the queue
    // is drained so the last reply repeats
    let stored: Vec<String> = orchestrator
        .session_history("trip")
        .unwrap()
        .into_iter()
        .map(|m| m.content)
        .collect();
    assert_eq!(
        stored,
        vec![
            "question 7", "reply 7", "question 8", "reply 8", "question 9",
            "reply 9", "question 10", "reply 10", "question 11", "reply 10",
        ]
    );
}

#[tokio::test]
async fn test_conversations_are_never_cached() {
    let backend = ScriptedBackend::replying("same");
    let orchestrator = orchestrator(&backend);
    let options = GenerationOptions::default();

    orchestrator.converse(Some("a"), "Hello", &options).await.unwrap();
    orchestrator.converse(Some("b"), "Hello", &options).await.unwrap();

    assert_eq!(backend.call_count(), 2);
    assert_eq!(orchestrator.metrics().cache_entries, 0);
}

#[tokio::test(start_paused = true)]
async fn test_failed_turn_keeps_user_message() {
    let backend = ScriptedBackend::with_replies(vec![Err(BackendError::auth("bad key"))]);
    let orchestrator = orchestrator(&backend);

    let err = orchestrator
        .converse(Some("s1"), "Are you there?", &GenerationOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, OrchestratorError::Auth(_)));
    assert_eq!(orchestrator.session_length("s1"), 1);
}

#[tokio::test]
async fn test_forget_session() {
    let backend = ScriptedBackend::replying("ok");
    let orchestrator = orchestrator(&backend);

    let turn = orchestrator
        .converse(None, "Hello", &GenerationOptions::default())
        .await
        .unwrap();

    assert!(orchestrator.forget_session(&turn.session_id));
    assert!(!orchestrator.forget_session(&turn.session_id));
    assert_eq!(orchestrator.session_length(&turn.session_id), 0);
}

#[tokio::test]
async fn test_empty_prompt_rejected() {
    let backend = ScriptedBackend::new();
    let orchestrator = orchestrator(&backend);

    let err = orchestrator
        .converse(Some("s"), "  ", &GenerationOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, OrchestratorError::Validation(_)));
    assert_eq!(backend.call_count(), 0);
    assert_eq!(orchestrator.session_count(), 0);
}
