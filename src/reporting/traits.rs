// 進捗報告のトレイト定義

use crate::core::ProcessingSummary;
use std::path::Path;

/// 進捗報告を抽象化するトレイト
#[async_trait::async_trait]
pub trait ProgressReporter: Send + Sync {
    /// 処理開始時の報告
    async fn report_started(&self, total_files: usize, output_root: &Path);

    /// ファイル単位の処理開始の報告
    async fn report_file_started(&self, file_path: &Path, index: usize, total: usize);

    /// フラッシュカード書き込み完了の報告
    async fn report_file_written(
        &self,
        file_path: &Path,
        output_path: &Path,
        card_count: Option<usize>,
    );

    /// エラー発生時の報告
    async fn report_error(&self, file_path: &Path, error: &str);

    /// 処理完了時の報告
    async fn report_completed(&self, summary: &ProcessingSummary);
}
