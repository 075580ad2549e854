//! The `quizcraft take` command: one full quiz session.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use quizcraft_core::engine::SessionEngine;
use quizcraft_core::error::user_message;
use quizcraft_core::ledger::Ledger;
use quizcraft_core::stats::HistorySummary;
use quizcraft_providers::config::{create_gateway, load_config_from};
use quizcraft_store::JsonFileStore;

pub async fn execute(
    topic: String,
    user: String,
    provider: Option<String>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let gateway = create_gateway(&config, provider.as_deref())?;
    let ledger = Ledger::new(Arc::new(JsonFileStore::new(&config.ledger_path)));

    let mut engine = SessionEngine::new(Arc::new(gateway), ledger);
    engine
        .login(&user)
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;

    eprintln!("Generating a quiz about \"{topic}\"...");
    let quiz = match engine.request_quiz(&topic).await {
        Ok(quiz) => quiz.clone(),
        Err(err) => anyhow::bail!(user_message(&err)),
    };

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();

    for (i, question) in quiz.questions().iter().enumerate() {
        println!();
        println!("Question {} of {}: {}", i + 1, quiz.len(), question.text);
        for (n, option) in question.options.iter().enumerate() {
            println!("  {}) {}", n + 1, option);
        }
        let choice = read_choice(&mut lines, question.options.len())?;
        engine.select_answer(i, choice)?;
    }

    let outcome = match engine.submit() {
        Ok(outcome) => outcome,
        Err(err) => anyhow::bail!(user_message(&err)),
    };

    println!();
    for (i, entry) in outcome.card.feedback.iter().enumerate() {
        if entry.correct {
            println!("Question {}: correct.", i + 1);
        } else {
            let correct = entry.correct_option.as_deref().unwrap_or_default();
            println!(
                "Question {}: wrong. You picked \"{}\"; the answer is \"{}\".",
                i + 1,
                entry.selected_option,
                correct
            );
        }
        println!("  {}", entry.explanation);
    }

    println!();
    println!("Score: {}/{}", outcome.card.score, outcome.card.total);

    let summary = HistorySummary::compute(&outcome.history);
    println!(
        "Recorded to {}. {user} now has {} attempts, best {:.0}%.",
        config.ledger_path.display(),
        summary.attempts,
        summary.best_percentage
    );

    Ok(())
}

/// Read a 1-based option choice from stdin, reprompting on invalid input.
fn read_choice(
    lines: &mut impl Iterator<Item = std::io::Result<String>>,
    option_count: usize,
) -> Result<usize> {
    loop {
        print!("Your answer (1-{option_count}): ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next() else {
            anyhow::bail!("input ended before all questions were answered");
        };
        match line?.trim().parse::<usize>() {
            Ok(n) if (1..=option_count).contains(&n) => return Ok(n - 1),
            _ => println!("Please enter a number between 1 and {option_count}."),
        }
    }
}
