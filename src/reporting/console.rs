// 進捗報告の具象実装

use super::ProgressReporter;
use crate::core::ProcessingSummary;
use async_trait::async_trait;
use std::path::Path;

/// コンソール出力による進捗報告実装
#[derive(Debug, Default)]
pub struct ConsoleProgressReporter {
    quiet: bool,
}

impl ConsoleProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// エラーのみ出力する
    pub fn quiet() -> Self {
        Self { quiet: true }
    }

    pub fn for_verbosity(verbose: bool) -> Self {
        if verbose {
            Self::new()
        } else {
            Self::quiet()
        }
    }
}

#[async_trait]
impl ProgressReporter for ConsoleProgressReporter {
    async fn report_started(&self, total_files: usize, output_root: &Path) {
        if !self.quiet {
            println!("🚀 {total_files} 個のmarkdownファイルを処理します");
            println!("📁 出力先: {}", output_root.display());
        }
    }

    async fn report_file_started(&self, file_path: &Path, index: usize, total: usize) {
        if !self.quiet {
            println!("📄 [{index}/{total}] {}", file_path.display());
        }
    }

    async fn report_file_written(
        &self,
        _file_path: &Path,
        output_path: &Path,
        card_count: Option<usize>,
    ) {
        if !self.quiet {
            match card_count {
                Some(count) => println!("   ✓ {count} 枚 → {}", output_path.display()),
                None => println!("   ✓ → {}", output_path.display()),
            }
        }
    }

    // エラーは静音モードでも出力する
    async fn report_error(&self, file_path: &Path, error: &str) {
        eprintln!("❌ {} の処理に失敗しました: {error}", file_path.display());
    }

    async fn report_completed(&self, summary: &ProcessingSummary) {
        if !self.quiet {
            println!(
                "✅ 完了! 処理済: {}, エラー: {}",
                summary.processed_files, summary.error_count
            );
        }
    }
}

/// 何もしない進捗報告実装
#[derive(Debug, Default)]
pub struct NoOpProgressReporter;

impl NoOpProgressReporter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProgressReporter for NoOpProgressReporter {
    async fn report_started(&self, _total_files: usize, _output_root: &Path) {}

    async fn report_file_started(&self, _file_path: &Path, _index: usize, _total: usize) {}

    async fn report_file_written(
        &self,
        _file_path: &Path,
        _output_path: &Path,
        _card_count: Option<usize>,
    ) {
    }

    async fn report_error(&self, _file_path: &Path, _error: &str) {}

    async fn report_completed(&self, _summary: &ProcessingSummary) {}
}
