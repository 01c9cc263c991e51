use crate::core::{FlashcardError, FlashcardResult, SourceFile};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub struct FileScanner;

impl FileScanner {
    /// 入力パス（ファイルまたはディレクトリ）から処理対象を探索する
    ///
    /// ファイルが指定された場合はそれ自体を唯一の入力とする。
    /// 出力ルート配下は探索しない。
    pub fn discover(input: &Path, output_root: &Path) -> FlashcardResult<Vec<SourceFile>> {
        if !input.exists() {
            return Err(FlashcardError::input_not_found(input));
        }

        if input.is_file() {
            let file_name = input
                .file_name()
                .map(PathBuf::from)
                .ok_or_else(|| FlashcardError::input_not_found(input))?;
            return Ok(vec![SourceFile {
                path: input.to_path_buf(),
                relative_path: file_name,
            }]);
        }

        Self::scan_directory(input, output_root)
    }

    pub fn scan_directory(directory: &Path, output_root: &Path) -> FlashcardResult<Vec<SourceFile>> {
        let output_root = output_root.canonicalize().ok();
        let mut files = Vec::new();

        let walker = WalkDir::new(directory)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                !(entry.file_type().is_dir() && Self::is_output_root(entry.path(), &output_root))
            });

        for entry in walker {
            let entry = entry.map_err(|source| FlashcardError::FileDiscovery {
                path: source
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| directory.to_path_buf()),
                source,
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            if let Some(extension) = entry.path().extension() {
                let ext = extension.to_string_lossy().to_lowercase();
                if Self::is_markdown_extension(&ext) {
                    let relative_path = entry
                        .path()
                        .strip_prefix(directory)
                        .unwrap_or(entry.path())
                        .to_path_buf();
                    files.push(SourceFile {
                        path: entry.path().to_path_buf(),
                        relative_path,
                    });
                }
            }
        }

        Ok(files)
    }

    fn is_output_root(path: &Path, output_root: &Option<PathBuf>) -> bool {
        match output_root {
            Some(root) => path
                .canonicalize()
                .map(|canonical| &canonical == root)
                .unwrap_or(false),
            None => false,
        }
    }

    fn is_markdown_extension(extension: &str) -> bool {
        matches!(extension, "md" | "markdown")
    }
}
