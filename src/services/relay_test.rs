use super::*;
use events::{Request, Role};

fn transcript(texts: &[&str]) -> ExecuteRequest {
    ExecuteRequest { messages: texts.iter().map(|t| Request::new(*t, Role::User)).collect() }
}

fn scheduled_execution() -> Execution {
    let mut execution = create_execution(&transcript(&["price of steel?"])).unwrap();
    let _ = schedule(&mut execution);
    execution
}

fn updated_status(event: &ServerEvent) -> ExecutionStatus {
    match event {
        ServerEvent::ExecutionUpdated(execution) => execution.status,
        other => panic!("expected execution_updated, got {other:?}"),
    }
}

fn token_text(event: &ServerEvent) -> &str {
    match event {
        ServerEvent::TextReceived(token) => &token.text,
        other => panic!("expected text_received, got {other:?}"),
    }
}

#[test]
fn create_execution_uses_last_message_as_request() {
    let execution = create_execution(&transcript(&["first", "second"])).unwrap();
    assert_eq!(execution.request.content, "second");
    assert_eq!(execution.status, ExecutionStatus::Requested);
    assert_eq!(execution.progress, None);
    assert!(Uuid::parse_str(&execution.id).is_ok());
}

#[test]
fn create_execution_assigns_fresh_ids() {
    let a = create_execution(&transcript(&["hi"])).unwrap();
    let b = create_execution(&transcript(&["hi"])).unwrap();
    assert_ne!(a.id, b.id);
}

#[test]
fn create_execution_rejects_empty_transcript() {
    assert_eq!(create_execution(&ExecuteRequest::default()), Err(RelayError::EmptyTranscript));
}

#[test]
fn schedule_emits_scheduled_update() {
    let mut execution = create_execution(&transcript(&["hi"])).unwrap();
    let event = schedule(&mut execution);
    assert_eq!(updated_status(&event), ExecutionStatus::Scheduled);
    assert_eq!(execution.status, ExecutionStatus::Scheduled);
}

#[test]
fn first_text_starts_execution_before_token() {
    let mut execution = scheduled_execution();
    let step = apply_executor_event(&mut execution, ExecutorEvent::SendText("Hello".into()));

    assert_eq!(step.events.len(), 2);
    assert_eq!(updated_status(&step.events[0]), ExecutionStatus::Started);
    assert_eq!(token_text(&step.events[1]), "Hello");
    assert!(!step.finished);
}

#[test]
fn later_text_does_not_repeat_started_update() {
    let mut execution = scheduled_execution();
    let _ = apply_executor_event(&mut execution, ExecutorEvent::SendText("Hello".into()));
    let step = apply_executor_event(&mut execution, ExecutorEvent::SendText(" world".into()));

    assert_eq!(step.events.len(), 1);
    assert_eq!(token_text(&step.events[0]), " world");
}

#[test]
fn tokens_carry_execution_id() {
    let mut execution = scheduled_execution();
    let step = apply_executor_event(&mut execution, ExecutorEvent::SendText("x".into()));
    let ServerEvent::TextReceived(token) = &step.events[1] else {
        panic!("expected text_received");
    };
    assert_eq!(token.id, execution.id);
}

#[test]
fn assets_become_marker_tokens() {
    let mut execution = scheduled_execution();
    let _ = apply_executor_event(&mut execution, ExecutorEvent::SendText("start".into()));

    let image = apply_executor_event(&mut execution, ExecutorEvent::SendImage("https://i.imgur.com/2X2IDEA.jpeg".into()));
    assert_eq!(token_text(&image.events[0]), "<asset:image:https://i.imgur.com/2X2IDEA.jpeg>");

    let html = apply_executor_event(&mut execution, ExecutorEvent::SendHtml("https://plots.test/a.html".into()));
    assert_eq!(token_text(&html.events[0]), "<asset:html:https://plots.test/a.html>");

    let error = apply_executor_event(&mut execution, ExecutorEvent::SendError("model failed".into()));
    assert_eq!(token_text(&error.events[0]), "<asset:error:model failed>");
}

#[test]
fn debug_thoughts_are_forwarded_and_start_execution() {
    let mut execution = scheduled_execution();
    let step = apply_executor_event(&mut execution, ExecutorEvent::SendDebugThoughts("classify".into()));

    assert_eq!(updated_status(&step.events[0]), ExecutionStatus::Started);
    assert_eq!(step.events[1], ServerEvent::DebugThoughtReceived(TokenEvent::new(execution.id.clone(), "classify")));
}

#[test]
fn status_message_naming_a_status_sets_status() {
    let mut execution = scheduled_execution();
    let step = apply_executor_event(&mut execution, ExecutorEvent::UpdateStatusMessage("started".into()));

    assert_eq!(execution.status, ExecutionStatus::Started);
    assert_eq!(execution.status_message, None);
    assert_eq!(updated_status(&step.events[0]), ExecutionStatus::Started);
}

#[test]
fn free_form_status_message_is_kept_verbatim() {
    let mut execution = scheduled_execution();
    let step = apply_executor_event(&mut execution, ExecutorEvent::UpdateStatusMessage("Loading steel data".into()));

    assert_eq!(execution.status, ExecutionStatus::Scheduled);
    assert_eq!(execution.status_message.as_deref(), Some("Loading steel data"));
    assert_eq!(step.events.len(), 1);
}

#[test]
fn named_status_replaces_earlier_free_form_message() {
    let mut execution = scheduled_execution();
    let _ = apply_executor_event(&mut execution, ExecutorEvent::UpdateStatusMessage("Loading forecast model".into()));
    let step = apply_executor_event(&mut execution, ExecutorEvent::UpdateStatusMessage("started".into()));

    assert_eq!(execution.status, ExecutionStatus::Started);
    assert_eq!(execution.status_message, None);
    let ServerEvent::ExecutionUpdated(updated) = &step.events[0] else {
        panic!("expected execution_updated");
    };
    assert_eq!(updated.status_message, None);
}

#[test]
fn progress_updates_are_forwarded() {
    let mut execution = scheduled_execution();
    let step = apply_executor_event(&mut execution, ExecutorEvent::UpdateStatusProgress(Some(40.0)));
    let ServerEvent::ExecutionUpdated(updated) = &step.events[0] else {
        panic!("expected execution_updated");
    };
    assert_eq!(updated.progress, Some(40.0));

    let _ = apply_executor_event(&mut execution, ExecutorEvent::UpdateStatusProgress(None));
    assert_eq!(execution.progress, None);
}

#[test]
fn finalize_completes_and_clears_progress() {
    let mut execution = scheduled_execution();
    let _ = apply_executor_event(&mut execution, ExecutorEvent::UpdateStatusProgress(Some(90.0)));
    let step = apply_executor_event(&mut execution, ExecutorEvent::Finalize);

    assert!(step.finished);
    assert_eq!(step.events.len(), 2);
    assert_eq!(updated_status(&step.events[0]), ExecutionStatus::Completed);
    let ServerEvent::Finalize(Some(done)) = &step.events[1] else {
        panic!("expected finalize with execution");
    };
    assert!(done.is_completed());
    assert_eq!(done.progress, None);
}

#[test]
fn abort_sends_error_marker_then_finalize() {
    let mut execution = scheduled_execution();
    let events = abort(&mut execution, EXECUTOR_LOST);

    assert_eq!(events.len(), 3);
    assert_eq!(token_text(&events[0]), "<asset:error:executor disconnected>");
    assert_eq!(updated_status(&events[1]), ExecutionStatus::Completed);
    assert!(matches!(events[2], ServerEvent::Finalize(Some(_))));
}
