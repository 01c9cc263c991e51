use clap::Parser;
use generate_flashcards::{
    cli::{execute_process_file, execute_process_files, Cli, Commands, ProcessFileConfig},
    FlashcardError,
};
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

/// 一部のファイルだけ失敗した場合の終了コード
const EXIT_PARTIAL_FAILURE: i32 = 2;

#[tokio::main]
async fn main() {
    // .env の OPENAI_API_KEY を読み込む
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // RUST_LOG があれば優先、なければ --verbose で debug、通常は warn
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cli.verbose {
            "generate_flashcards=debug"
        } else {
            "generate_flashcards=warn"
        })
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();

    let result = match &cli.command {
        Commands::ProcessFiles => execute_process_files(cli.generator_config(None))
            .await
            .map(|summary| summary.has_failures()),
        Commands::ProcessFile {
            input_file,
            output_file,
            print,
        } => execute_process_file(
            cli.generator_config(Some(input_file.clone())),
            ProcessFileConfig {
                input_file: input_file.clone(),
                output_file: output_file.clone(),
                print: *print,
            },
        )
        .await
        .map(|outcome| !outcome.is_success()),
    };

    match result {
        Ok(false) => {}
        Ok(true) => std::process::exit(EXIT_PARTIAL_FAILURE),
        Err(error) => {
            eprintln!("❌ エラー: {error}");
            if let Some(flashcard_error) = error.downcast_ref::<FlashcardError>() {
                let context = flashcard_error.context();
                match &context.resource {
                    Some(resource) => eprintln!("   [{}] {resource}", context.operation),
                    None => eprintln!("   [{}]", context.operation),
                }
                if let Some(suggestion) = context.suggestion {
                    eprintln!("💡 {suggestion}");
                }
            }
            std::process::exit(1);
        }
    }
}
