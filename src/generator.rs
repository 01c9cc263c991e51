// フラッシュカード生成ドライバ
//
// 探索 → (プロンプト生成 → API呼び出し → 整形 → 書き込み) をファイルごとに逐次実行する。

use crate::completion::{CompletionBackend, CompletionRequest, CompletionResponse};
use crate::core::{
    FileOutcome, FlashcardError, FlashcardResult, GeneratorConfig, ProcessingSummary,
};
use crate::file_scanner::FileScanner;
use crate::flashcards::FlashcardFormatter;
use crate::prompt::build_prompt;
use crate::reporting::ProgressReporter;
use std::path::{Path, PathBuf};
use std::time::Instant;

pub struct FlashcardGenerator<C, R>
where
    C: CompletionBackend,
    R: ProgressReporter,
{
    backend: C,
    reporter: R,
    config: GeneratorConfig,
    formatter: FlashcardFormatter,
}

impl<C, R> FlashcardGenerator<C, R>
where
    C: CompletionBackend,
    R: ProgressReporter,
{
    pub fn new(backend: C, reporter: R, config: GeneratorConfig) -> Self {
        let formatter = FlashcardFormatter::new(config.format(), config.include_tag());
        Self {
            backend,
            reporter,
            config,
            formatter,
        }
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// 入力パス配下のmarkdownを再帰的に処理し、出力ルートへミラーして書き込む
    ///
    /// 回復可能なエラー（レート制限など）は記録して次のファイルへ進む。
    /// 回復不能なエラーはその時点で処理を中断して返す。
    pub async fn process_files(&self) -> FlashcardResult<ProcessingSummary> {
        self.config.validate()?;

        let output_root = self.config.output_root();
        let sources = FileScanner::discover(self.config.input_path(), &output_root)?;
        let total = sources.len();

        tracing::info!(
            input = %self.config.input_path().display(),
            output = %output_root.display(),
            files = total,
            "starting flashcard generation"
        );

        let start = Instant::now();
        let mut summary = ProcessingSummary::new(total);
        self.reporter.report_started(total, &output_root).await;

        for (index, source) in sources.iter().enumerate() {
            self.reporter
                .report_file_started(&source.path, index + 1, total)
                .await;
            let output_path = source.output_path(&output_root);

            match self.process_file(&source.path, Some(&output_path)).await {
                Ok(outcome) => summary.record(outcome),
                Err(error) if error.is_recoverable() => {
                    tracing::debug!(
                        file = %source.path.display(),
                        severity = error.severity().as_str(),
                        "skipping file: {error}"
                    );
                    self.reporter
                        .report_error(&source.path, &error.to_string())
                        .await;
                    summary.record(FileOutcome::Failed {
                        input: source.path.clone(),
                        error: error.to_string(),
                    });
                }
                // 致命的なエラーは呼び出し側が一度だけ表示する
                Err(error) => return Err(error),
            }
        }

        summary.total_processing_time_ms = start.elapsed().as_millis() as u64;
        self.reporter.report_completed(&summary).await;

        Ok(summary)
    }

    /// 単一ファイルを処理する
    ///
    /// `output` が None の場合は入力ファイルの隣の `flashcards` に書き込む。
    /// `print` が true の場合はファイルに書かず標準出力へ出す。
    pub async fn process_single_file(
        &self,
        input: &Path,
        output: Option<PathBuf>,
        print: bool,
    ) -> FlashcardResult<FileOutcome> {
        self.config.validate()?;

        if print {
            return self.process_file(input, None).await;
        }

        let output_path = match output {
            Some(path) => path,
            None => {
                let output_root = self.config.output_root();
                let sources = FileScanner::discover(input, &output_root)?;
                let source = sources
                    .first()
                    .ok_or_else(|| FlashcardError::input_not_found(input))?;
                source.output_path(&output_root)
            }
        };

        self.process_file(input, Some(&output_path)).await
    }

    /// 1ファイル分の 読み込み → 生成 → 整形 → 書き込み
    pub async fn process_file(
        &self,
        input: &Path,
        output: Option<&Path>,
    ) -> FlashcardResult<FileOutcome> {
        tracing::debug!(file = %input.display(), "reading content");
        let content = tokio::fs::read_to_string(input)
            .await
            .map_err(|source| FlashcardError::read(input, source))?;

        let response = self.create_flashcards(input, &content).await?;

        let (rendered, card_count) = self
            .formatter
            .render(&response.content)
            .map_err(|reason| FlashcardError::invalid_flashcards(input, reason))?;

        match output {
            Some(output_path) => {
                tracing::debug!(output = %output_path.display(), "writing flashcards");
                write_output(output_path, &rendered).await?;
                self.reporter
                    .report_file_written(input, output_path, card_count)
                    .await;
                Ok(FileOutcome::Written {
                    input: input.to_path_buf(),
                    output: output_path.to_path_buf(),
                    total_tokens: response.total_tokens,
                })
            }
            None => {
                println!("{rendered}");
                Ok(FileOutcome::Printed {
                    input: input.to_path_buf(),
                    total_tokens: response.total_tokens,
                })
            }
        }
    }

    /// ファイルの内容からプロンプトを組み立てて補完APIを呼び出す
    pub async fn create_flashcards(
        &self,
        input: &Path,
        content: &str,
    ) -> FlashcardResult<CompletionResponse> {
        let format = self.formatter.format();
        let request = CompletionRequest {
            model: self.config.model().to_string(),
            prompt: build_prompt(format, content),
            json_response: format.expects_json(),
        };

        let response = self
            .backend
            .complete(&request)
            .await
            .map_err(|source| FlashcardError::completion(input, source))?;

        tracing::info!(
            file = %input.display(),
            tokens = ?response.total_tokens,
            "generated flashcards"
        );
        tracing::debug!(content = %response.content, "model response");

        Ok(response)
    }
}

/// 親ディレクトリを作成してから書き込む（既存ファイルは上書き）
async fn write_output(path: &Path, contents: &str) -> FlashcardResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| FlashcardError::write(parent, source))?;
        }
    }

    tokio::fs::write(path, contents)
        .await
        .map_err(|source| FlashcardError::write(path, source))
}
