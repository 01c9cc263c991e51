// プロンプトテンプレートとプロンプト生成

use crate::flashcards::OutputFormat;

/// プレーンテキスト出力用のシステム指示
pub const TEXT_SYSTEM_PROMPT: &str = "\
You are a flashcard generation bot. Given a piece of text, you produce flashcards \
that capture every fact worth remembering from it.

Write each flashcard as a question line followed by an answer line:
Q: What is the capital of France?
A: Paris

Separate flashcards with a blank line. Return only the flashcards, without any \
introduction or closing remarks.";

/// JSON出力用のシステム指示
pub const JSON_SYSTEM_PROMPT: &str = r#"You are a flashcard generation bot. Given a piece of text, you will generate flashcards as a JSON
object with the following format:
{
    "cards": [
        {
            "front": "Front of the flashcard",
            "back": "Back of the flashcard"
        }
    ]
}

For example, given the text:
The capital of France is Paris. The capital of Spain is Madrid.

You would generate the flashcards:
{
    "cards": [
        {
            "front": "What is the capital of France?",
            "back": "Paris"
        },
        {
            "front": "What is the capital of Spain?",
            "back": "Madrid"
        }
    ]
}

If multiple flashcards can be generated from the text, you should generate all of them.

NB: Return a valid JSON object."#;

const JSON_REMINDER: &str = "NB: Return a valid JSON object.";

/// 1回のAPI呼び出しに使うプロンプト
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

/// 出力形式に応じたプロンプトを組み立てる
pub fn build_prompt(format: OutputFormat, content: &str) -> Prompt {
    let system = if format.expects_json() {
        JSON_SYSTEM_PROMPT
    } else {
        TEXT_SYSTEM_PROMPT
    };

    let mut user = format!("Create flashcards from the following content:\n{content}");
    if format.expects_json() {
        user.push('\n');
        user.push_str(JSON_REMINDER);
    }

    Prompt {
        system: system.to_string(),
        user,
    }
}
