//! ZEEF terminal entry point
//!
//! Establishes the deterministic substrate (ledger, kernel, charter),
//! then runs a single-actor read-eval loop over stdin. Rendering is a
//! plain line printer; the session layer owns all semantics.

use clap::{Arg, Command};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use zeef_core::{DisplayEvent, Session, Turn};
use zeef_kernel::{Charter, Kernel, KernelConfig};
use zeef_ledger::{Ledger, LedgerConfig};

fn render(event: &DisplayEvent) {
    println!("[{}] {}", event.source, event.content);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let matches = Command::new("zeef")
        .version("0.1.0")
        .about("ZEEF deterministic terminal substrate")
        .arg(
            Arg::new("model")
                .long("model")
                .default_value("llama3")
                .help("Local model name served by the inference endpoint"),
        )
        .arg(
            Arg::new("endpoint")
                .long("endpoint")
                .default_value("http://localhost:11434")
                .help("Base URL of the local inference endpoint"),
        )
        .arg(
            Arg::new("log-dir")
                .long("log-dir")
                .default_value(".zeef_logs")
                .help("Directory for the ledger and structured logs"),
        )
        .arg(
            Arg::new("timeout-secs")
                .long("timeout-secs")
                .default_value("120")
                .value_parser(clap::value_parser!(u64))
                .help("Hard timeout on each model call, in seconds"),
        )
        .get_matches();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let log_dir = PathBuf::from(matches.get_one::<String>("log-dir").unwrap());
    let ledger = Arc::new(Ledger::open(&LedgerConfig::new(&log_dir))?);

    let kernel = Kernel::new(KernelConfig {
        base_url: matches.get_one::<String>("endpoint").unwrap().clone(),
        model: matches.get_one::<String>("model").unwrap().clone(),
        request_timeout: Duration::from_secs(
            *matches.get_one::<u64>("timeout-secs").unwrap(),
        ),
        max_tokens: None,
    })?;

    let cwd = std::env::current_dir()?;
    let mut session = Session::new(
        Arc::clone(&ledger),
        kernel,
        Charter::default(),
        cwd,
    );

    println!("ZEEF Deterministic Terminal Substrate");
    println!(
        "Ledger: {} (latest event: {})",
        ledger.path().display(),
        ledger
            .latest_timestamp()
            .unwrap_or_else(|| "no events recorded yet".to_string())
    );
    println!("Type commands, '!ai <text>', '!explain', '!fix', or 'exit' to leave.");

    let stdin = io::stdin();
    loop {
        print!("zeef> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            // EOF: treat like an explicit exit.
            println!();
            break;
        }

        match session.handle_line(&line).await {
            Turn::Terminated => {
                println!("Deterministic session closed.");
                break;
            }
            Turn::Continue(events) => {
                for event in &events {
                    render(event);
                }
                if !events.is_empty() {
                    if let Some(latest) = session.ledger().latest_timestamp() {
                        println!("(ledger: latest event {latest})");
                    }
                }
            }
        }
    }

    Ok(())
}
