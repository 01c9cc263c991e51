use crate::core::config::{DEFAULT_API_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};
use crate::core::GeneratorConfig;
use crate::flashcards::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "generate_flashcards")]
#[command(about = "Generate flashcards from markdown notes using an LLM")]
#[command(version)]
pub struct Cli {
    /// API key for the completion API
    #[arg(
        short = 'a',
        long = "api-key",
        alias = "api_key",
        env = "OPENAI_API_KEY",
        hide_env_values = true,
        global = true
    )]
    pub api_key: Option<String>,

    /// Model identifier used for completions
    #[arg(long, default_value = DEFAULT_MODEL, global = true)]
    pub model: String,

    /// Print progress and debug logs
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Markdown file or directory to process
    #[arg(long = "input-dir", alias = "input_dir", default_value = ".", global = true)]
    pub input_dir: PathBuf,

    /// Directory in which the `flashcards` output directory is created (defaults to the input root)
    #[arg(long = "output-dir", alias = "output_dir", global = true)]
    pub output_dir: Option<PathBuf>,

    /// Base URL of the OpenAI-compatible completion API
    #[arg(
        long = "api-base-url",
        env = "OPENAI_BASE_URL",
        default_value = DEFAULT_API_BASE_URL,
        global = true
    )]
    pub api_base_url: String,

    /// Output format of the generated flashcards
    #[arg(long, value_enum, default_value = "raw", global = true)]
    pub format: OutputFormat,

    /// Omit the `#flashcards` tag in obsidian output
    #[arg(long, global = true)]
    pub no_tag: bool,

    /// Request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, global = true)]
    pub timeout: u64,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Recursively generate flashcards for every markdown file under the input path
    #[command(name = "process-files", alias = "process_files")]
    ProcessFiles,

    /// Generate flashcards for a single markdown file
    #[command(name = "process-file", alias = "process_file")]
    ProcessFile {
        /// Markdown file to process
        input_file: PathBuf,

        /// Output file path (defaults to a sibling `flashcards` directory)
        #[arg(short, long, conflicts_with = "print")]
        output_file: Option<PathBuf>,

        /// Print the flashcards to stdout instead of writing a file
        #[arg(long)]
        print: bool,
    },
}

impl Cli {
    /// コマンドライン引数から実行設定を組み立てる
    ///
    /// `input` を指定した場合は `--input-dir` の代わりに使う。
    pub fn generator_config(&self, input: Option<PathBuf>) -> GeneratorConfig {
        GeneratorConfig::new(
            self.api_key.clone().unwrap_or_default(),
            input.unwrap_or_else(|| self.input_dir.clone()),
        )
        .with_model(self.model.clone())
        .with_output_dir(self.output_dir.clone())
        .with_api_base_url(self.api_base_url.clone())
        .with_format(self.format)
        .with_tag(!self.no_tag)
        .with_verbose(self.verbose)
        .with_request_timeout(Duration::from_secs(self.timeout))
    }
}
