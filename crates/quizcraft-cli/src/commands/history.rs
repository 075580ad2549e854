//! The `quizcraft history` command.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Table};

use quizcraft_core::error::user_message;
use quizcraft_core::ledger::Ledger;
use quizcraft_core::model::Attempt;
use quizcraft_core::stats::HistorySummary;
use quizcraft_providers::config::load_config_from;
use quizcraft_store::JsonFileStore;

pub fn execute(user: String, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let ledger = Ledger::new(Arc::new(JsonFileStore::new(&config.ledger_path)));

    let history = match ledger.history(&user) {
        Ok(history) => history,
        Err(err) => anyhow::bail!(user_message(&err)),
    };

    if history.is_empty() {
        println!("No attempts recorded for {user}.");
        return Ok(());
    }

    // The ledger preserves insertion order; display newest first.
    let mut rows: Vec<&Attempt> = history.iter().collect();
    rows.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["When", "Topic", "Score", "Percent"]);
    for attempt in rows {
        table.add_row(vec![
            attempt.timestamp.format("%Y-%m-%d %H:%M").to_string(),
            attempt.topic.clone(),
            format!("{}/{}", attempt.score, attempt.total),
            format!("{:.0}%", attempt.percentage()),
        ]);
    }
    println!("{table}");

    let summary = HistorySummary::compute(&history);
    println!(
        "{} attempts, mean {:.1}%, best {:.1}%",
        summary.attempts, summary.mean_percentage, summary.best_percentage
    );

    Ok(())
}
