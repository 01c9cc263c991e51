// 実行設定 - 起動時に一度だけ組み立てて生成処理に明示的に渡す

use super::error::{FlashcardError, FlashcardResult};
use crate::flashcards::OutputFormat;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gpt-4-turbo";
pub const DEFAULT_API_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
/// 出力ルートのディレクトリ名
pub const OUTPUT_DIR_NAME: &str = "flashcards";

/// APIキー（Debug出力ではマスクする）
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(****)")
    }
}

/// フラッシュカード生成の設定
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    api_key: ApiKey,
    model: String,
    input_path: PathBuf,
    output_dir: Option<PathBuf>,
    api_base_url: String,
    format: OutputFormat,
    include_tag: bool,
    verbose: bool,
    request_timeout: Duration,
}

impl GeneratorConfig {
    pub fn new(api_key: impl Into<String>, input_path: impl Into<PathBuf>) -> Self {
        Self {
            api_key: ApiKey::new(api_key),
            model: DEFAULT_MODEL.to_string(),
            input_path: input_path.into(),
            output_dir: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            format: OutputFormat::default(),
            include_tag: true,
            verbose: false,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_output_dir(mut self, output_dir: Option<PathBuf>) -> Self {
        self.output_dir = output_dir;
        self
    }

    pub fn with_api_base_url(mut self, api_base_url: impl Into<String>) -> Self {
        self.api_base_url = api_base_url.into();
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_tag(mut self, include_tag: bool) -> Self {
        self.include_tag = include_tag;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn include_tag(&self) -> bool {
        self.include_tag
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// 処理開始前の設定検証
    pub fn validate(&self) -> FlashcardResult<()> {
        if self.api_key.is_blank() {
            return Err(FlashcardError::configuration(
                "APIキーが指定されていません (--api-key または OPENAI_API_KEY)",
            ));
        }

        if self.model.trim().is_empty() {
            return Err(FlashcardError::configuration("モデル名が空です"));
        }

        if !(self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://"))
        {
            return Err(FlashcardError::configuration(format!(
                "APIのURLが不正です: {}",
                self.api_base_url
            )));
        }

        if self.request_timeout.is_zero() {
            return Err(FlashcardError::configuration(
                "タイムアウトは1秒以上を指定してください",
            ));
        }

        Ok(())
    }

    /// 入力ルート: ディレクトリならそのもの、ファイルならその親
    pub fn input_root(&self) -> PathBuf {
        if self.input_path.is_file() {
            match self.input_path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => PathBuf::from("."),
            }
        } else {
            self.input_path.clone()
        }
    }

    /// 出力ルート: `<output_dir または入力ルート>/flashcards`
    pub fn output_root(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| self.input_root())
            .join(OUTPUT_DIR_NAME)
    }
}
