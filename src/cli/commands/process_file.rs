use crate::completion::openai::OpenAiClient;
use crate::core::{FileOutcome, GeneratorConfig};
use crate::generator::FlashcardGenerator;
use crate::reporting::ConsoleProgressReporter;
use anyhow::Result;
use std::path::PathBuf;

/// Configuration struct for the process-file command
pub struct ProcessFileConfig {
    pub input_file: PathBuf,
    pub output_file: Option<PathBuf>,
    pub print: bool,
}

/// Generate flashcards for a single markdown file
pub async fn execute_process_file(
    config: GeneratorConfig,
    command: ProcessFileConfig,
) -> Result<FileOutcome> {
    config.validate()?;

    if !command.input_file.is_file() {
        anyhow::bail!(
            "Input file does not exist: {}",
            command.input_file.display()
        );
    }

    let backend = OpenAiClient::from_config(&config)?;
    // --print では標準出力をフラッシュカード本文だけにする
    let reporter = ConsoleProgressReporter::for_verbosity(config.verbose() && !command.print);
    let generator = FlashcardGenerator::new(backend, reporter, config);

    let outcome = generator
        .process_single_file(&command.input_file, command.output_file, command.print)
        .await?;

    if let FileOutcome::Written { output, .. } = &outcome {
        if !command.print {
            println!("📄 結果は {} に保存されました", output.display());
        }
    }

    Ok(outcome)
}
