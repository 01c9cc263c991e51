use crate::completion::openai::OpenAiClient;
use crate::core::{GeneratorConfig, ProcessingSummary};
use crate::generator::FlashcardGenerator;
use crate::reporting::ConsoleProgressReporter;
use anyhow::Result;

/// Recursively generate flashcards for every markdown file under the input path
pub async fn execute_process_files(config: GeneratorConfig) -> Result<ProcessingSummary> {
    // 設定エラーはネットワーククライアントを作る前に報告する
    config.validate()?;

    let backend = OpenAiClient::from_config(&config)?;
    let reporter = ConsoleProgressReporter::for_verbosity(config.verbose());
    let generator = FlashcardGenerator::new(backend, reporter, config);

    let summary = generator.process_files().await?;
    print_summary(&summary);

    Ok(summary)
}

fn print_summary(summary: &ProcessingSummary) {
    println!("📊 処理結果:");
    println!("   - 対象ファイル数: {}", summary.total_files);
    println!("   - 成功処理数: {}", summary.processed_files);
    println!("   - エラー数: {}", summary.error_count);
    if summary.total_tokens > 0 {
        println!("   - 使用トークン数: {}", summary.total_tokens);
    }
    println!("   - 処理時間: {}ms", summary.total_processing_time_ms);

    if summary.has_failures() {
        println!("⚠️  {}個のファイルでエラーが発生しました", summary.error_count);
        for (path, error) in summary.failed_files() {
            println!("   - {}: {error}", path.display());
        }
    }
}
