use crate::core::CompletionError;
use crate::prompt::Prompt;
use async_trait::async_trait;
use mockall::automock;

pub mod openai;

/// 補完APIへのリクエスト
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    /// モデル識別子
    pub model: String,
    pub prompt: Prompt,
    /// JSONオブジェクトでの応答を要求するか
    pub json_response: bool,
}

/// 補完APIからのレスポンス
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionResponse {
    /// モデルが生成したテキスト
    pub content: String,
    /// 消費トークン数（APIが返した場合のみ）
    pub total_tokens: Option<u64>,
}

impl CompletionResponse {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            total_tokens: None,
        }
    }

    pub fn with_total_tokens(mut self, total_tokens: u64) -> Self {
        self.total_tokens = Some(total_tokens);
        self
    }
}

/// 補完APIバックエンドのトレイト
///
/// (モデル, プロンプト) からテキストへの不透明な関数として扱う。
#[automock]
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// プロンプトを送信して生成テキストを受け取る
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, CompletionError>;
}

// CompletionBackend for Box<dyn CompletionBackend>
#[async_trait]
impl CompletionBackend for Box<dyn CompletionBackend> {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, CompletionError> {
        self.as_ref().complete(request).await
    }
}
