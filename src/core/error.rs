// フラッシュカード生成のカスタムエラー型定義

use std::path::{Path, PathBuf};
use thiserror::Error;

/// 補完API呼び出しのエラー型
#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("認証エラー: APIキーが拒否されました ({message})")]
    Authentication { message: String },

    #[error("モデルが見つかりません: {model} ({message})")]
    ModelNotFound { model: String, message: String },

    #[error("レート制限エラー: {message}")]
    RateLimited { message: String },

    #[error("APIエラー: HTTP {status} - {message}")]
    Api { status: u16, message: String },

    #[error("ネットワークエラー: {source}")]
    Network {
        #[source]
        source: reqwest::Error,
    },

    #[error("不正なレスポンス: {reason}")]
    MalformedResponse { reason: String },
}

impl CompletionError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            reason: reason.into(),
        }
    }

    /// 以降のファイルも同じ理由で失敗するエラーかどうか
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Authentication { .. } | Self::ModelNotFound { .. }
        )
    }
}

impl From<reqwest::Error> for CompletionError {
    fn from(source: reqwest::Error) -> Self {
        Self::Network { source }
    }
}

/// フラッシュカード生成全体のエラー型
#[derive(Error, Debug)]
pub enum FlashcardError {
    #[error("設定エラー: {message}")]
    Configuration { message: String },

    #[error("入力パスが存在しません: {}", .path.display())]
    InputNotFound { path: PathBuf },

    #[error("ファイル探索エラー: {} - {source}", .path.display())]
    FileDiscovery {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("読み込みエラー: {} - {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("書き込みエラー: {} - {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("補完APIエラー: {} - {source}", .path.display())]
    Completion {
        path: PathBuf,
        #[source]
        source: CompletionError,
    },

    #[error("フラッシュカード形式エラー: {} - {reason}", .path.display())]
    InvalidFlashcards { path: PathBuf, reason: String },
}

impl FlashcardError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn input_not_found(path: impl AsRef<Path>) -> Self {
        Self::InputNotFound {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn read(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn write(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn completion(path: impl AsRef<Path>, source: CompletionError) -> Self {
        Self::Completion {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn invalid_flashcards(path: impl AsRef<Path>, reason: impl Into<String>) -> Self {
        Self::InvalidFlashcards {
            path: path.as_ref().to_path_buf(),
            reason: reason.into(),
        }
    }

    /// エラーの重要度を取得
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Configuration { .. } => ErrorSeverity::Critical,
            Self::InputNotFound { .. } | Self::FileDiscovery { .. } => ErrorSeverity::High,
            Self::Read { .. } | Self::Write { .. } => ErrorSeverity::High,
            Self::Completion { source, .. } if source.is_fatal() => ErrorSeverity::Critical,
            Self::Completion { .. } | Self::InvalidFlashcards { .. } => ErrorSeverity::Medium,
        }
    }

    /// 次のファイルの処理に進んでよいかどうかを判定
    ///
    /// 補完APIの失敗はファイル単位で記録して続行する。
    /// 設定・ファイルシステム・認証のエラーは実行全体を中断する。
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Configuration { .. } => false,
            Self::InputNotFound { .. } | Self::FileDiscovery { .. } => false,
            Self::Read { .. } | Self::Write { .. } => false,
            Self::Completion { source, .. } => !source.is_fatal(),
            Self::InvalidFlashcards { .. } => true,
        }
    }

    /// エラーコンテキストを取得
    pub fn context(&self) -> ErrorContext {
        match self {
            Self::Configuration { message } => ErrorContext::new("configuration")
                .with_suggestion(format!("設定を確認してください: {message}")),
            Self::InputNotFound { path } => ErrorContext::new("path_resolution")
                .with_resource(path.display().to_string())
                .with_suggestion("--input-dir に存在するファイルかディレクトリを指定してください"),
            Self::FileDiscovery { path, .. } | Self::Read { path, .. } => {
                ErrorContext::new("file_discovery")
                    .with_resource(path.display().to_string())
                    .with_suggestion("ファイルパスとアクセス権限を確認してください")
            }
            Self::Write { path, .. } => ErrorContext::new("write_output")
                .with_resource(path.display().to_string())
                .with_suggestion("出力ディレクトリの書き込み権限を確認してください"),
            Self::Completion { path, source } => {
                let context =
                    ErrorContext::new("completion").with_resource(path.display().to_string());
                match source {
                    CompletionError::Authentication { .. } => {
                        context.with_suggestion("APIキーが有効か確認してください")
                    }
                    CompletionError::ModelNotFound { .. } => {
                        context.with_suggestion(
                            "--model に利用可能なモデル名を指定するか、--api-base-url のパスを確認してください",
                        )
                    }
                    _ => context,
                }
            }
            Self::InvalidFlashcards { path, .. } => {
                ErrorContext::new("render_flashcards").with_resource(path.display().to_string())
            }
        }
    }
}

/// エラーの重要度レベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// 中重要度 - 該当ファイルのみ失敗
    Medium,
    /// 高重要度 - 要対応
    High,
    /// 致命的 - 処理を継続できない
    Critical,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

/// エラーコンテキスト情報
#[derive(Debug, Clone)]
pub struct ErrorContext {
    /// 実行していた操作
    pub operation: String,
    /// 関連するリソース（ファイルパス等）
    pub resource: Option<String>,
    /// エラー解決のための提案
    pub suggestion: Option<String>,
}

impl ErrorContext {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            resource: None,
            suggestion: None,
        }
    }

    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

/// フラッシュカード生成の結果型
pub type FlashcardResult<T> = std::result::Result<T, FlashcardError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn io_error() -> std::io::Error {
        std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied")
    }

    #[test]
    fn test_completion_errors_are_recoverable_except_auth() {
        let rate_limited = FlashcardError::completion(
            "a.md",
            CompletionError::RateLimited {
                message: "slow down".to_string(),
            },
        );
        assert!(rate_limited.is_recoverable());
        assert_eq!(rate_limited.severity(), ErrorSeverity::Medium);

        let auth = FlashcardError::completion(
            "a.md",
            CompletionError::Authentication {
                message: "invalid key".to_string(),
            },
        );
        assert!(!auth.is_recoverable());
        assert_eq!(auth.severity(), ErrorSeverity::Critical);

        let missing_model = FlashcardError::completion(
            "a.md",
            CompletionError::ModelNotFound {
                model: "gpt-0".to_string(),
                message: "does not exist".to_string(),
            },
        );
        assert!(!missing_model.is_recoverable());
    }

    #[test]
    fn test_network_errors_are_recoverable() {
        let source = reqwest::Client::new()
            .get("not a url")
            .build()
            .unwrap_err();
        let error = FlashcardError::completion("a.md", CompletionError::from(source));

        assert!(matches!(
            error,
            FlashcardError::Completion {
                source: CompletionError::Network { .. },
                ..
            }
        ));
        assert!(error.is_recoverable());
        assert_eq!(error.severity(), ErrorSeverity::Medium);
    }

    #[test]
    fn test_model_not_found_suggestion_mentions_base_url() {
        let context = FlashcardError::completion(
            "a.md",
            CompletionError::ModelNotFound {
                model: "gpt-0".to_string(),
                message: "Not Found".to_string(),
            },
        )
        .context();

        let suggestion = context.suggestion.unwrap();
        assert!(suggestion.contains("--model"));
        assert!(suggestion.contains("--api-base-url"));
    }

    #[test]
    fn test_filesystem_errors_are_fatal() {
        assert!(!FlashcardError::read("a.md", io_error()).is_recoverable());
        assert!(!FlashcardError::write("out/a.md", io_error()).is_recoverable());
        assert!(!FlashcardError::input_not_found("missing").is_recoverable());
        assert!(!FlashcardError::configuration("no key").is_recoverable());
    }

    #[test]
    fn test_malformed_flashcards_are_recoverable() {
        let error = FlashcardError::invalid_flashcards("notes/a.md", "missing cards");
        assert!(error.is_recoverable());
        assert!(error.to_string().contains("notes/a.md"));
        assert!(error.to_string().contains("missing cards"));
    }

    #[test]
    fn test_error_context_includes_path() {
        let context = FlashcardError::input_not_found("nowhere/notes").context();
        assert_eq!(context.operation, "path_resolution");
        assert_eq!(context.resource.as_deref(), Some("nowhere/notes"));
        assert!(context.suggestion.is_some());

        let auth_context = FlashcardError::completion(
            "a.md",
            CompletionError::Authentication {
                message: "bad".to_string(),
            },
        )
        .context();
        assert_eq!(auth_context.operation, "completion");
        assert!(auth_context.suggestion.unwrap().contains("APIキー"));
    }

    #[test]
    fn test_severity_ordering() {
        assert!(ErrorSeverity::Critical > ErrorSeverity::High);
        assert!(ErrorSeverity::High > ErrorSeverity::Medium);
        assert_eq!(ErrorSeverity::Critical.as_str(), "CRITICAL");
    }
}
