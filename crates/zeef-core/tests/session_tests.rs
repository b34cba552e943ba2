use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zeef_core::{Session, Turn};
use zeef_kernel::{Charter, Kernel, KernelConfig};
use zeef_ledger::{Ledger, LedgerConfig};

struct Fixture {
    _dir: tempfile::TempDir,
    session: Session,
    cwd: PathBuf,
}

async fn fixture(server: &MockServer) -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let cwd = dir.path().to_path_buf();
    let ledger = Arc::new(Ledger::open(&LedgerConfig::new(dir.path().join("logs"))).unwrap());
    let kernel = Kernel::new(KernelConfig {
        base_url: server.uri(),
        model: "llama3".to_string(),
        request_timeout: Duration::from_secs(2),
        max_tokens: None,
    })
    .unwrap();
    let session = Session::new(ledger, kernel, Charter::default(), cwd.clone());
    Fixture { _dir: dir, session, cwd }
}

fn ledger_lines(session: &Session) -> Vec<Value> {
    let path = session.ledger().path();
    if !path.exists() {
        return Vec::new();
    }
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

fn events(turn: Turn) -> Vec<zeef_core::DisplayEvent> {
    match turn {
        Turn::Continue(events) => events,
        Turn::Terminated => panic!("session terminated unexpectedly"),
    }
}

async fn mount_completion(server: &MockServer, text: &str) {
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": text } }]
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn shell_line_executes_and_reaches_the_ledger() {
    let server = MockServer::start().await;
    let mut fx = fixture(&server).await;

    let events = events(fx.session.handle_line("echo hello\n").await);
    assert_eq!(events[0].source, "user");
    assert!(events.iter().any(|e| e.source == "shell[stdout]" && e.content == "hello"));

    let lines = ledger_lines(&fx.session);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["kind"], "command");
    assert_eq!(lines[0]["payload"]["cwd"], fx.cwd.display().to_string());
}

#[tokio::test]
async fn blocked_shell_line_surfaces_an_error_event() {
    let server = MockServer::start().await;
    let mut fx = fixture(&server).await;

    let events = events(fx.session.handle_line("ls && reboot").await);
    assert!(events
        .iter()
        .any(|e| e.source == "error" && e.content.contains("metacharacter")));
    assert!(ledger_lines(&fx.session).is_empty());
}

#[tokio::test]
async fn ai_line_returns_the_enveloped_completion() {
    let server = MockServer::start().await;
    mount_completion(&server, "a deterministic answer").await;
    let mut fx = fixture(&server).await;

    let events = events(fx.session.handle_line("!ai what is this?").await);
    assert!(events
        .iter()
        .any(|e| e.source == "model[OK]" && e.content == "a deterministic answer"));

    let lines = ledger_lines(&fx.session);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["kind"], "kernel_call");
}

#[tokio::test]
async fn failed_model_call_is_rendered_not_hidden() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let mut fx = fixture(&server).await;

    let events = events(fx.session.handle_line("!ai hello?").await);
    assert!(events
        .iter()
        .any(|e| e.source == "error" && e.content.contains("law layer failure")));
    assert!(ledger_lines(&fx.session).is_empty());
}

#[tokio::test]
async fn explain_without_history_is_an_error_event() {
    let server = MockServer::start().await;
    let mut fx = fixture(&server).await;

    let events = events(fx.session.handle_line("!explain").await);
    assert!(events
        .iter()
        .any(|e| e.source == "error" && e.content == "No previous command to explain."));
}

#[tokio::test]
async fn explain_after_a_command_sends_its_outcome_to_the_model() {
    let server = MockServer::start().await;
    mount_completion(&server, "it prints hello").await;
    let mut fx = fixture(&server).await;

    fx.session.handle_line("echo hello").await;
    let events = events(fx.session.handle_line("!explain").await);
    assert!(events
        .iter()
        .any(|e| e.source == "model[OK]" && e.content == "it prints hello"));

    // One command event plus one kernel_call event.
    let lines = ledger_lines(&fx.session);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["kind"], "command");
    assert_eq!(lines[1]["kind"], "kernel_call");
}

#[tokio::test]
async fn fix_without_history_is_an_error_event() {
    let server = MockServer::start().await;
    let mut fx = fixture(&server).await;

    let events = events(fx.session.handle_line("!fix").await);
    assert!(events
        .iter()
        .any(|e| e.source == "error" && e.content == "No previous command to fix."));
}

#[tokio::test]
async fn exit_terminates_and_empty_lines_do_nothing() {
    let server = MockServer::start().await;
    let mut fx = fixture(&server).await;

    assert!(matches!(
        fx.session.handle_line("   ").await,
        Turn::Continue(ref events) if events.is_empty()
    ));
    assert!(matches!(fx.session.handle_line("QUIT").await, Turn::Terminated));
}
