// テスト用の進捗報告モック実装

use super::traits::ProgressReporter;
use crate::core::ProcessingSummary;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

#[derive(Default)]
pub struct MockProgressReporter {
    pub started_calls: Arc<Mutex<Vec<(usize, PathBuf)>>>,
    pub written_calls: Arc<Mutex<Vec<(PathBuf, PathBuf, Option<usize>)>>>,
    pub error_calls: Arc<Mutex<Vec<(PathBuf, String)>>>,
    pub completed_called: Arc<Mutex<Option<(usize, usize)>>>,
}

impl MockProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl ProgressReporter for MockProgressReporter {
    async fn report_started(&self, total_files: usize, output_root: &Path) {
        self.started_calls
            .lock()
            .unwrap()
            .push((total_files, output_root.to_path_buf()));
    }

    async fn report_file_started(&self, _file_path: &Path, _index: usize, _total: usize) {}

    async fn report_file_written(
        &self,
        file_path: &Path,
        output_path: &Path,
        card_count: Option<usize>,
    ) {
        self.written_calls.lock().unwrap().push((
            file_path.to_path_buf(),
            output_path.to_path_buf(),
            card_count,
        ));
    }

    async fn report_error(&self, file_path: &Path, error: &str) {
        self.error_calls
            .lock()
            .unwrap()
            .push((file_path.to_path_buf(), error.to_string()));
    }

    async fn report_completed(&self, summary: &ProcessingSummary) {
        *self.completed_called.lock().unwrap() =
            Some((summary.processed_files, summary.error_count));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_progress_reporter_trait() {
        let reporter = MockProgressReporter::new();

        reporter.report_started(2, Path::new("notes/flashcards")).await;
        assert_eq!(
            reporter.started_calls.lock().unwrap()[0],
            (2, PathBuf::from("notes/flashcards"))
        );

        reporter
            .report_file_written(Path::new("notes/a.md"), Path::new("notes/flashcards/a.md"), None)
            .await;
        assert_eq!(reporter.written_calls.lock().unwrap().len(), 1);

        reporter.report_error(Path::new("notes/b.md"), "rate limited").await;
        let error_calls = reporter.error_calls.lock().unwrap();
        assert_eq!(
            error_calls[0],
            (PathBuf::from("notes/b.md"), "rate limited".to_string())
        );

        let mut summary = ProcessingSummary::new(2);
        summary.processed_files = 1;
        summary.error_count = 1;
        reporter.report_completed(&summary).await;
        assert_eq!(*reporter.completed_called.lock().unwrap(), Some((1, 1)));
    }
}
