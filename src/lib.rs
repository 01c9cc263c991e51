pub mod cli;
pub mod completion;
pub mod core;
pub mod file_scanner;
pub mod flashcards;
pub mod generator;
pub mod prompt;
pub mod reporting;

pub use crate::core::{FlashcardError, GeneratorConfig, ProcessingSummary};
pub use completion::{CompletionBackend, CompletionRequest, CompletionResponse};
pub use generator::FlashcardGenerator;
