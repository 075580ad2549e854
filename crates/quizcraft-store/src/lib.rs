//! quizcraft-store — file-backed persistence for the score ledger.

pub mod json_file;

pub use json_file::JsonFileStore;
