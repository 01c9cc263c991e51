// コアレイヤー - 設定、型、エラー定義
// 他のレイヤーから参照される基本的な定義を提供

pub mod config;
pub mod error;
pub mod types;

// 公開API
pub use config::{ApiKey, GeneratorConfig, DEFAULT_MODEL, OUTPUT_DIR_NAME};
pub use error::{CompletionError, ErrorSeverity, FlashcardError, FlashcardResult};
pub use types::{FileOutcome, ProcessingSummary, SourceFile};
