//! `parley chat`: Interactive or single-message chat mode.

use std::io::Write;

use parley_agent::{Session, SessionEvent, TurnOutcome};
use parley_config::AppConfig;
use tokio::sync::mpsc;
use tracing::trace;

use super::Overrides;
use crate::input;

pub async fn run(
    overrides: &Overrides,
    message: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = overrides
        .load()
        .map_err(|e| format!("Failed to load config: {e}"))?;
    let mut session = Session::from_config(&config)?;

    if let Some(msg) = message {
        // Single message mode
        return match run_turn(&mut session, &msg).await {
            TurnOutcome::Failed(e) => Err(e.into()),
            _ => Ok(()),
        };
    }

    print_banner(&config);

    let mut lines = input::stdin_lines();
    prompt()?;

    while let Some(line) = lines.recv().await {
        if let TurnOutcome::Ended = run_turn(&mut session, &line).await {
            break;
        }
        prompt()?;
    }

    println!();
    println!("  👋 Goodbye!");
    println!();
    Ok(())
}

fn print_banner(config: &AppConfig) {
    let exit_word = config
        .session
        .exit_commands
        .iter()
        .find(|c| !c.trim().is_empty())
        .map(String::as_str)
        .unwrap_or("sair");

    println!();
    println!("  ╔══════════════════════════════════════════════╗");
    println!("  ║          Parley: Interactive Chat           ║");
    println!("  ╚══════════════════════════════════════════════╝");
    println!();
    println!("  Backend:   {} ({})", config.backend.kind, config.backend.base_url);
    println!("  Model:     {}", config.backend.model);
    println!("  Routes:    {}", config.routes.len());
    println!();
    println!("  Type your message and press Enter.");
    println!("  Type '{exit_word}' or Ctrl+D to quit.");
    println!();
}

fn prompt() -> std::io::Result<()> {
    print!("  You > ");
    std::io::stdout().flush()
}

/// Run one turn, printing its events while the session produces them.
async fn run_turn(session: &mut Session, line: &str) -> TurnOutcome {
    let (tx, mut rx) = mpsc::unbounded_channel();

    let turn = async move {
        let outcome = session.handle_turn(line, &tx).await;
        drop(tx);
        outcome
    };
    let printer = async move {
        let mut stdout = std::io::stdout();
        while let Some(event) = rx.recv().await {
            trace!(event = event.event_type(), "Session event");
            let _ = render(&event, &mut stdout);
        }
    };

    let (outcome, ()) = tokio::join!(turn, printer);
    outcome
}

/// Write one session event to the terminal.
fn render(event: &SessionEvent, out: &mut impl Write) -> std::io::Result<()> {
    match event {
        SessionEvent::LocalAnswer { content, .. } => {
            writeln!(out, "  Assistant (local) > {content}")?;
            writeln!(out)?;
        }
        SessionEvent::Thinking => {
            writeln!(out)?;
            writeln!(out, "  💭 Thinking...")?;
            writeln!(out)?;
        }
        SessionEvent::Chunk { content } => write!(out, "{content}")?,
        SessionEvent::Done { .. } => {
            writeln!(out)?;
            writeln!(out)?;
        }
        SessionEvent::Error { message } => {
            writeln!(out)?;
            writeln!(out, "  [Error] {message}")?;
            writeln!(out)?;
        }
        SessionEvent::Ended => {}
    }
    out.flush()
}
