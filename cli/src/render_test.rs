use super::*;
use events::Request;

#[test]
fn render_token_passes_text_through() {
    assert_eq!(render_token("Prices rise "), "Prices rise ");
}

#[test]
fn render_token_replaces_markers() {
    assert_eq!(
        render_token("chart: <asset:image:https://i.imgur.com/2X2IDEA.jpeg> done"),
        "chart: [image: https://i.imgur.com/2X2IDEA.jpeg] done"
    );
    assert_eq!(render_token("<asset:error:executor disconnected>"), "[error: executor disconnected]");
    assert_eq!(render_token("<asset:html:https://plots.test/a.html>"), "[html: https://plots.test/a.html]");
}

#[test]
fn render_status_includes_message_and_progress() {
    let mut execution = Execution::new("e1", Request::default());
    execution.status = ExecutionStatus::Started;
    execution.status_message = Some("run energy module, horizon 9".to_owned());
    execution.progress = Some(49.6);
    assert_eq!(render_status(&execution), "started: run energy module, horizon 9 (50%)");
}

#[test]
fn render_status_hides_unknown_progress() {
    let mut execution = Execution::new("e1", Request::default());
    execution.progress = Some(-1.0);
    assert_eq!(render_status(&execution), "requested");
}

#[test]
fn render_status_drops_message_once_completed() {
    let mut execution = Execution::new("e1", Request::default());
    execution.status = ExecutionStatus::Completed;
    execution.status_message = Some("stale".to_owned());
    assert_eq!(render_status(&execution), "completed");
}
