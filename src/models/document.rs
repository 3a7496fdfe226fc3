use serde::{Deserialize, Serialize};

/// Text of a single PDF page, 1-based page number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageText {
    pub page_number: u32,
    pub text: String,
}

/// Extracted text of one document, pages in reading order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentText {
    pub filename: String,
    pub checksum: String,
    pub pages: Vec<PageText>,
}

impl DocumentText {
    pub fn new(filename: impl Into<String>, pages: Vec<PageText>) -> Self {
        let filename = filename.into();
        let checksum = {
            use sha2::{Digest, Sha256};
            let mut hasher = Sha256::new();
            hasher.update(filename.as_bytes());
            for page in &pages {
                hasher.update(page.text.as_bytes());
            }
            hex::encode(&hasher.finalize()[..16])
        };
        Self {
            filename,
            checksum,
            pages,
        }
    }

    pub fn has_text(&self) -> bool {
        !self.pages.is_empty()
    }

    pub fn char_count(&self) -> usize {
        self.pages.iter().map(|p| p.text.len()).sum()
    }
}

/// A paragraph-level span of extracted text, the ranking unit.
///
/// Chunks are ordered by document discovery order, then page number, then
/// paragraph position; that order is preserved through the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    pub id: String,
    pub document: String,
    pub page_number: u32,
    pub text: String,
    pub char_count: usize,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub embedding: Vec<f32>,
}

impl Chunk {
    /// Deterministic chunk id from the owning document and its position.
    pub fn generate_id(document_checksum: &str, sequence: u32) -> String {
        use uuid::Uuid;
        let name = format!("{}:{}", document_checksum, sequence);
        Uuid::new_v5(&Uuid::NAMESPACE_OID, name.as_bytes()).to_string()
    }

    pub fn new(document: &DocumentText, page_number: u32, sequence: u32, text: String) -> Self {
        let id = Self::generate_id(&document.checksum, sequence);
        let char_count = text.chars().count();
        Self {
            id,
            document: document.filename.clone(),
            page_number,
            text,
            char_count,
            embedding: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_checksum_stable() {
        let pages = vec![PageText {
            page_number: 1,
            text: "hello".to_string(),
        }];
        let a = DocumentText::new("report.pdf", pages.clone());
        let b = DocumentText::new("report.pdf", pages);
        assert_eq!(a.checksum, b.checksum);
        assert_eq!(a.checksum.len(), 32);
    }

    #[test]
    fn test_document_checksum_varies_with_content() {
        let a = DocumentText::new(
            "report.pdf",
            vec![PageText {
                page_number: 1,
                text: "hello".to_string(),
            }],
        );
        let b = DocumentText::new(
            "report.pdf",
            vec![PageText {
                page_number: 1,
                text: "goodbye".to_string(),
            }],
        );
        assert_ne!(a.checksum, b.checksum);
    }

    #[test]
    fn test_chunk_generate_id() {
        let id = Chunk::generate_id("abc123", 5);
        assert_eq!(id.len(), 36);
        assert_eq!(id.chars().filter(|c| *c == '-').count(), 4);
        let id2 = Chunk::generate_id("abc123", 5);
        assert_eq!(id, id2);
        let id3 = Chunk::generate_id("abc123", 6);
        assert_ne!(id, id3);
    }

    #[test]
    fn test_chunk_new() {
        let doc = DocumentText::new(
            "report.pdf",
            vec![PageText {
                page_number: 3,
                text: "some paragraph".to_string(),
            }],
        );
        let chunk = Chunk::new(&doc, 3, 0, "some paragraph".to_string());
        assert_eq!(chunk.document, "report.pdf");
        assert_eq!(chunk.page_number, 3);
        assert_eq!(chunk.char_count, 14);
        assert!(chunk.embedding.is_empty());
    }
}
