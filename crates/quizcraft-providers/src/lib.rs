//! quizcraft-providers — LLM provider integrations and the quiz gateway.
//!
//! Implements the `QuizProvider` trait for Anthropic, OpenAI, and Ollama,
//! and the `QuizGateway` that turns a topic into a validated quiz.

pub mod anthropic;
pub mod config;
pub mod error;
pub mod gateway;
pub mod mock;
pub mod ollama;
pub mod openai;

pub use config::{
    create_gateway, create_provider, load_config, load_config_from, ProviderConfig,
    QuizcraftConfig,
};
pub use error::ProviderError;
pub use gateway::{QuizGateway, QUIZ_SYSTEM_PROMPT};
