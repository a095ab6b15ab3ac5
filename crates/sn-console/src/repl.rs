//! Interactive command loop.
//!
//! Each non-empty stdin line runs through the same translate-then-execute
//! path as the HTTP front end; results print as pretty JSON. The loop
//! ends on a quit keyword or EOF.

use std::io::Write;

use tokio::io::AsyncBufReadExt;

use sn_protocol::{Intent, NormalizedResult};
use sn_transport::RecordOps;

const QUIT_KEYWORDS: &[&str] = &["quit", "exit", "q"];

/// Outcome of one input line.
#[derive(Debug, PartialEq, Eq)]
pub enum LineOutcome {
    /// Quit keyword — end the session.
    Quit,
    /// Blank line — nothing to do.
    Skip,
    /// Rendered result to print.
    Output(String),
}

/// Handle one line of input.
pub async fn handle_line(records: &RecordOps, line: &str) -> LineOutcome {
    let line = line.trim();
    if line.is_empty() {
        return LineOutcome::Skip;
    }
    if QUIT_KEYWORDS.contains(&line.to_lowercase().as_str()) {
        return LineOutcome::Quit;
    }

    let result = match sn_translate::resolve(line) {
        Intent::Search { table, spec } => records.search(&table, &spec).await,
        Intent::Update { record, payload } => records.update(&record, &payload).await,
        Intent::Unknown { raw } => {
            NormalizedResult::error(format!("could not resolve command: {raw:?}"))
        }
    };

    let rendered = serde_json::to_string_pretty(&result)
        .unwrap_or_else(|e| format!(r#"{{"status":"error","message":"render failed: {e}"}}"#));
    LineOutcome::Output(rendered)
}

/// Run the interactive loop over stdin until quit or EOF.
pub async fn run(records: &RecordOps) -> anyhow::Result<()> {
    println!("SnowLink console — type a command, or 'quit' to exit");
    println!("{}", "-".repeat(50));

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("\n> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break; // EOF
        };
        match handle_line(records, &line).await {
            LineOutcome::Quit => {
                println!("Goodbye!");
                break;
            }
            LineOutcome::Skip => {}
            LineOutcome::Output(text) => println!("{text}"),
        }
    }

    Ok(())
}
