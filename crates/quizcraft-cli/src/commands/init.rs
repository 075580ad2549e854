//! The `quizcraft init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("quizcraft.toml").exists() {
        println!("quizcraft.toml already exists, skipping.");
    } else {
        std::fs::write("quizcraft.toml", SAMPLE_CONFIG)?;
        println!("Created quizcraft.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit quizcraft.toml with your API key (or export QUIZCRAFT_ANTHROPIC_KEY)");
    println!("  2. Run: quizcraft take --topic \"Space\" --user yourname");
    println!("  3. Run: quizcraft history --user yourname");

    Ok(())
}

// Top-level keys must precede the provider tables: anything after a
// `[providers.*]` header belongs to that provider in TOML.
const SAMPLE_CONFIG: &str = r#"# quizcraft configuration

default_provider = "anthropic"
default_model = "claude-sonnet-4-20250514"
temperature = 0.7
ledger_path = "./quizcraft-scores.json"

[providers.anthropic]
type = "anthropic"
api_key = "${ANTHROPIC_API_KEY}"

[providers.openai]
type = "openai"
api_key = "${OPENAI_API_KEY}"

[providers.ollama]
type = "ollama"
base_url = "http://localhost:11434"
"#;
