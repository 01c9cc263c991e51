// 処理に関連するデータ型定義

use std::path::PathBuf;

/// 探索で見つかった入力ファイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// 入力ファイルのパス
    pub path: PathBuf,
    /// 入力ルートからの相対パス（出力先のミラーに使う）
    pub relative_path: PathBuf,
}

impl SourceFile {
    /// 出力ルート配下の対応するパスを返す
    pub fn output_path(&self, output_root: &std::path::Path) -> PathBuf {
        output_root.join(&self.relative_path)
    }
}

/// 1ファイル分の処理結果
#[derive(Debug, Clone, PartialEq)]
pub enum FileOutcome {
    Written {
        input: PathBuf,
        output: PathBuf,
        total_tokens: Option<u64>,
    },
    Printed {
        input: PathBuf,
        total_tokens: Option<u64>,
    },
    Failed {
        input: PathBuf,
        error: String,
    },
}

impl FileOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Failed { .. })
    }

    pub fn total_tokens(&self) -> Option<u64> {
        match self {
            Self::Written { total_tokens, .. } | Self::Printed { total_tokens, .. } => {
                *total_tokens
            }
            Self::Failed { .. } => None,
        }
    }
}

/// 処理全体のサマリー
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessingSummary {
    pub total_files: usize,
    pub processed_files: usize,
    pub error_count: usize,
    pub total_tokens: u64,
    pub total_processing_time_ms: u64,
    pub outcomes: Vec<FileOutcome>,
}

impl ProcessingSummary {
    pub fn new(total_files: usize) -> Self {
        Self {
            total_files,
            ..Self::default()
        }
    }

    pub fn record(&mut self, outcome: FileOutcome) {
        if outcome.is_success() {
            self.processed_files += 1;
            self.total_tokens += outcome.total_tokens().unwrap_or(0);
        } else {
            self.error_count += 1;
        }
        self.outcomes.push(outcome);
    }

    pub fn has_failures(&self) -> bool {
        self.error_count > 0
    }

    pub fn failed_files(&self) -> impl Iterator<Item = (&PathBuf, &str)> {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            FileOutcome::Failed { input, error } => Some((input, error.as_str())),
            _ => None,
        })
    }
}
