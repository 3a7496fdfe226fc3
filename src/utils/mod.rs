//! Utility modules.

pub mod text;

pub use text::{
    has_meaningful_content, section_title, split_sentences, truncate_words, word_count,
};
