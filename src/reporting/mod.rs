// 進捗報告
//
// 生成処理の進捗をユーザーへ伝える。診断ログは tracing 側で扱う。

pub mod console;
pub mod traits;

#[cfg(test)]
pub mod test_mocks;

// 公開API
pub use console::{ConsoleProgressReporter, NoOpProgressReporter};
pub use traits::*;

// テストモック（テスト時のみ）
#[cfg(test)]
pub use test_mocks::*;
