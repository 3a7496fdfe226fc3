//! PDF discovery and page-wise text extraction.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::ExtractError;
use crate::models::{DocumentText, ExtractionConfig, PageText};

/// PDF text extractor over a document directory.
///
/// Extraction is best-effort: unreadable or unparseable files are logged
/// and skipped rather than failing the run.
#[derive(Debug)]
pub struct PdfExtractor {
    recursive: bool,
    exclude_patterns: Vec<String>,
    max_file_size: u64,
}

impl PdfExtractor {
    pub fn new(config: &ExtractionConfig) -> Self {
        Self {
            recursive: config.recursive,
            exclude_patterns: config.exclude_patterns.clone(),
            max_file_size: config.max_file_size,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(&ExtractionConfig::default())
    }

    /// Collect PDF files under `dir`, sorted by path for deterministic
    /// document order.
    pub fn collect_pdf_files(&self, dir: &Path) -> Result<Vec<PathBuf>, ExtractError> {
        if !dir.exists() {
            return Err(ExtractError::DirectoryNotFound(
                dir.to_string_lossy().to_string(),
            ));
        }

        if dir.is_file() {
            return if is_pdf_file(dir) {
                Ok(vec![dir.to_path_buf()])
            } else {
                Ok(Vec::new())
            };
        }

        let max_depth = if self.recursive { usize::MAX } else { 1 };
        let mut files = Vec::new();

        for entry in WalkDir::new(dir).max_depth(max_depth).follow_links(false) {
            let entry = entry.map_err(|e| ExtractError::WalkError(e.to_string()))?;
            let path = entry.path();

            if !path.is_file() || !is_pdf_file(path) {
                continue;
            }

            let path_str = path.to_string_lossy();
            let excluded = self.exclude_patterns.iter().any(|pattern| {
                glob::Pattern::new(pattern)
                    .map(|p| p.matches(&path_str))
                    .unwrap_or(false)
            });

            if !excluded {
                files.push(path.to_path_buf());
            }
        }

        files.sort();
        Ok(files)
    }

    /// Extract per-page text from a single PDF.
    pub fn extract_document(&self, path: &Path) -> Result<DocumentText, ExtractError> {
        let display = path.to_string_lossy().to_string();

        let metadata = std::fs::metadata(path).map_err(|e| ExtractError::ReadError {
            path: display.clone(),
            reason: e.to_string(),
        })?;
        if metadata.len() > self.max_file_size {
            return Err(ExtractError::ReadError {
                path: display,
                reason: format!(
                    "file exceeds maximum size: {} > {}",
                    metadata.len(),
                    self.max_file_size
                ),
            });
        }

        let page_texts =
            pdf_extract::extract_text_by_pages(path).map_err(|e| ExtractError::ParseError {
                path: display,
                reason: e.to_string(),
            })?;

        let pages: Vec<PageText> = page_texts
            .into_iter()
            .enumerate()
            .filter(|(_, text)| !text.trim().is_empty())
            .map(|(i, text)| PageText {
                page_number: (i + 1) as u32,
                text,
            })
            .collect();

        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());

        Ok(DocumentText::new(filename, pages))
    }

    /// Extract a list of PDF files, skipping failures.
    pub fn extract_files(&self, files: &[PathBuf]) -> Vec<DocumentText> {
        info!(count = files.len(), "processing PDF files");
        let mut documents = Vec::new();

        for path in files {
            debug!(file = %path.display(), "extracting text");
            match self.extract_document(path) {
                Ok(doc) if doc.has_text() => {
                    debug!(
                        file = %doc.filename,
                        pages = doc.pages.len(),
                        chars = doc.char_count(),
                        "extracted document"
                    );
                    documents.push(doc);
                }
                Ok(doc) => {
                    warn!(file = %doc.filename, "no extractable text, skipping");
                }
                Err(e) => {
                    warn!(file = %path.display(), error = %e, "extraction failed, skipping");
                }
            }
        }

        documents
    }
}

fn is_pdf_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_is_pdf_file() {
        assert!(is_pdf_file(Path::new("report.pdf")));
        assert!(is_pdf_file(Path::new("REPORT.PDF")));
        assert!(!is_pdf_file(Path::new("report.txt")));
        assert!(!is_pdf_file(Path::new("report")));
    }

    #[test]
    fn test_collect_missing_directory() {
        let extractor = PdfExtractor::with_defaults();
        let result = extractor.collect_pdf_files(Path::new("/nonexistent/pdfs"));
        assert!(matches!(result, Err(ExtractError::DirectoryNotFound(_))));
    }

    #[test]
    fn test_collect_sorted_pdfs_only() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.pdf"), b"").unwrap();
        fs::write(dir.path().join("a.pdf"), b"").unwrap();
        fs::write(dir.path().join("notes.txt"), b"").unwrap();

        let extractor = PdfExtractor::with_defaults();
        let files = extractor.collect_pdf_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.pdf", "b.pdf"]);
    }

    #[test]
    fn test_collect_non_recursive_by_default() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("top.pdf"), b"").unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("nested.pdf"), b"").unwrap();

        let extractor = PdfExtractor::with_defaults();
        let files = extractor.collect_pdf_files(dir.path()).unwrap();
        assert_eq!(files.len(), 1);

        let recursive = PdfExtractor::new(&ExtractionConfig {
            recursive: true,
            ..Default::default()
        });
        let files = recursive.collect_pdf_files(dir.path()).unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_collect_respects_exclude_patterns() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("keep.pdf"), b"").unwrap();
        fs::write(dir.path().join("draft.pdf"), b"").unwrap();

        let extractor = PdfExtractor::new(&ExtractionConfig {
            exclude_patterns: vec!["**/draft.pdf".to_string()],
            ..Default::default()
        });
        let files = extractor.collect_pdf_files(dir.path()).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("keep.pdf"));
    }

    #[test]
    fn test_extract_document_size_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.pdf");
        fs::write(&path, vec![0u8; 128]).unwrap();

        let extractor = PdfExtractor::new(&ExtractionConfig {
            max_file_size: 64,
            ..Default::default()
        });
        let result = extractor.extract_document(&path);
        assert!(matches!(result, Err(ExtractError::ReadError { .. })));
    }

    #[test]
    fn test_extract_files_skips_invalid_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        fs::write(&path, b"not actually a pdf").unwrap();

        let extractor = PdfExtractor::with_defaults();
        let documents = extractor.extract_files(&[path]);
        assert!(documents.is_empty());
    }
}
