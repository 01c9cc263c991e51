// フラッシュカードの解析と出力フォーマット

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Obsidian Spaced Repetition プラグインが認識するタグ
pub const FLASHCARDS_TAG: &str = "#flashcards";

/// 1枚のフラッシュカード
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub front: String,
    pub back: String,
}

/// 出力ファイルの形式
#[derive(clap::ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Write the model response verbatim
    #[default]
    Raw,
    /// Ask for JSON cards and render them for the Obsidian spaced repetition plugin
    Obsidian,
}

impl OutputFormat {
    /// JSONレスポンスをモデルに要求するかどうか
    pub fn expects_json(&self) -> bool {
        matches!(self, Self::Obsidian)
    }
}

/// `{"cards": [{"front": .., "back": ..}]}` 形式のレスポンスを解析する
///
/// `front`/`back` が文字列でないカードは読み飛ばす。
pub fn parse_cards(content: &str) -> Result<Vec<Flashcard>, String> {
    let value: Value =
        serde_json::from_str(content).map_err(|e| format!("JSONとして解析できません: {e}"))?;

    let cards = value
        .get("cards")
        .and_then(Value::as_array)
        .ok_or_else(|| "\"cards\" 配列がありません".to_string())?;

    let mut flashcards = Vec::with_capacity(cards.len());
    for card in cards {
        match serde_json::from_value::<Flashcard>(card.clone()) {
            Ok(flashcard) => flashcards.push(flashcard),
            Err(_) => tracing::debug!(card = %card, "skipping invalid flashcard"),
        }
    }

    Ok(flashcards)
}

/// モデルのレスポンスを出力ファイルの内容に整形する
#[derive(Debug, Clone)]
pub struct FlashcardFormatter {
    format: OutputFormat,
    include_tag: bool,
}

impl FlashcardFormatter {
    pub fn new(format: OutputFormat, include_tag: bool) -> Self {
        Self { format, include_tag }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// 整形結果とカード枚数（Rawでは不明なのでNone）を返す
    pub fn render(&self, response: &str) -> Result<(String, Option<usize>), String> {
        match self.format {
            OutputFormat::Raw => Ok((response.to_string(), None)),
            OutputFormat::Obsidian => {
                let cards = parse_cards(response)?;
                Ok((self.render_obsidian(&cards), Some(cards.len())))
            }
        }
    }

    pub fn render_obsidian(&self, cards: &[Flashcard]) -> String {
        let mut output = String::new();

        if self.include_tag {
            output.push_str(FLASHCARDS_TAG);
            output.push_str("\n\n");
        }

        for card in cards {
            output.push_str(&format!("{}\n?\n{}\n\n", card.front, card.back));
        }

        output
    }
}
