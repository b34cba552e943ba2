use std::fs;
use std::sync::Arc;

use pretty_assertions::assert_eq;
use serde_json::Value;
use zeef_agent::{AgentError, DeterministicAgent};
use zeef_gate::InvariantViolation;
use zeef_ledger::{Ledger, LedgerConfig};

fn setup() -> (tempfile::TempDir, DeterministicAgent) {
    let dir = tempfile::tempdir().unwrap();
    let ledger = Ledger::open(&LedgerConfig::new(dir.path().join("logs"))).unwrap();
    (dir, DeterministicAgent::new(Arc::new(ledger)))
}

fn ledger_lines(agent: &DeterministicAgent) -> Vec<Value> {
    let path = agent.ledger().path();
    if !path.exists() {
        return Vec::new();
    }
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[tokio::test]
async fn echo_runs_and_appends_exactly_one_command_event() {
    let (dir, agent) = setup();

    let outcome = agent.execute_command("echo hello", dir.path()).await.unwrap();
    assert_eq!(outcome.exit_code, Some(0));
    assert_eq!(outcome.stdout, "hello\n");
    assert_eq!(outcome.stderr, "");

    let lines = ledger_lines(&agent);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["kind"], "command");
    assert_eq!(lines[0]["payload"]["command"], "echo hello");
    assert_eq!(lines[0]["payload"]["exit_code"], 0);
    assert_eq!(
        lines[0]["payload"]["cwd"],
        dir.path().display().to_string()
    );
}

#[tokio::test]
async fn failing_command_is_still_recorded() {
    let (dir, agent) = setup();

    let outcome = agent.execute_command("ls no-such-entry", dir.path()).await.unwrap();
    assert_ne!(outcome.exit_code, Some(0));
    assert!(!outcome.stderr.is_empty());

    let lines = ledger_lines(&agent);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["payload"]["exit_code"], outcome.exit_code.unwrap());
}

#[tokio::test]
async fn blocked_command_spawns_nothing_and_leaves_ledger_untouched() {
    let (dir, agent) = setup();
    let marker = dir.path().join("marker");

    agent
        .execute_command(&format!("touch {}", marker.display()), dir.path())
        .await
        .unwrap();
    let err = agent.execute_command("rm -rf /", dir.path()).await.unwrap_err();
    assert!(matches!(
        err,
        AgentError::Violation(InvariantViolation::ForbiddenToken { .. })
    ));

    // Only the first (allowed) command reached the ledger.
    let lines = ledger_lines(&agent);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["payload"]["command"].as_str().unwrap(),
        format!("touch {}", marker.display()));
}

#[tokio::test]
async fn chained_command_is_rejected_before_any_side_effect() {
    let (dir, agent) = setup();
    let marker = dir.path().join("should-not-exist");

    let err = agent
        .execute_command(
            &format!("true && touch {}", marker.display()),
            dir.path(),
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AgentError::Violation(InvariantViolation::Metacharacter { .. })
    ));
    assert!(!marker.exists());
    assert!(ledger_lines(&agent).is_empty());
}

#[tokio::test]
async fn spawn_failure_writes_no_ledger_entry() {
    let (dir, agent) = setup();

    let err = agent
        .execute_command("definitely-not-a-binary-zeef", dir.path())
        .await
        .unwrap_err();
    assert!(matches!(err, AgentError::Spawn(_)));
    assert!(ledger_lines(&agent).is_empty());
}

#[tokio::test]
async fn writing_a_new_file_records_null_before_digest() {
    let (dir, agent) = setup();
    let target = dir.path().join("nested/dir/out.txt");

    let change = agent.write_file(&target, "abc").await.unwrap();
    assert_eq!(change.before_hash, None);
    assert_eq!(
        change.after_hash.as_deref(),
        // SHA-256 of "abc"
        Some("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")
    );
    assert_eq!(fs::read_to_string(&target).unwrap(), "abc");

    let lines = ledger_lines(&agent);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["kind"], "file_change");
    assert_eq!(lines[0]["payload"]["before_hash"], Value::Null);
    assert_eq!(
        lines[0]["payload"]["after_hash"],
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
}

#[tokio::test]
async fn overwriting_records_both_digests() {
    let (dir, agent) = setup();
    let target = dir.path().join("file.txt");

    let first = agent.write_file(&target, "one").await.unwrap();
    let second = agent.write_file(&target, "two").await.unwrap();

    assert_eq!(second.before_hash, first.after_hash);
    assert_ne!(second.after_hash, second.before_hash);

    let lines = ledger_lines(&agent);
    assert_eq!(lines.len(), 2);
    assert_eq!(
        lines[1]["payload"]["before_hash"],
        lines[0]["payload"]["after_hash"]
    );
}

#[tokio::test]
async fn verify_command_alone_has_no_side_effects() {
    let (_dir, agent) = setup();

    assert!(agent.verify_command("echo ok").is_ok());
    assert!(agent.verify_command("shutdown now").is_err());
    assert!(ledger_lines(&agent).is_empty());
}
