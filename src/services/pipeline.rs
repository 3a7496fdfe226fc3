//! Shared pipeline steps used by the analyze and batch commands.

use tracing::info;

use crate::error::ModelError;
use crate::models::Chunk;
use crate::services::Embedder;

/// Embed all chunks in place, batch by batch.
///
/// `progress` is called with the size of each completed batch so callers
/// can drive a progress bar without the service depending on one.
pub fn embed_chunks<F>(
    embedder: &Embedder,
    chunks: &mut [Chunk],
    mut progress: F,
) -> Result<(), ModelError>
where
    F: FnMut(usize),
{
    let batch_size = embedder.batch_size();
    info!(chunks = chunks.len(), batch_size, "computing chunk embeddings");

    for batch in chunks.chunks_mut(batch_size) {
        let texts: Vec<String> = batch.iter().map(|c| c.text.clone()).collect();
        let embeddings = embedder.embed_batch(&texts)?;
        for (chunk, embedding) in batch.iter_mut().zip(embeddings) {
            chunk.embedding = embedding;
        }
        progress(batch.len());
    }

    Ok(())
}

/// Distinct document names over a chunk list, in first-seen order.
pub fn input_documents(chunks: &[Chunk]) -> Vec<String> {
    let mut seen = Vec::new();
    for chunk in chunks {
        if !seen.contains(&chunk.document) {
            seen.push(chunk.document.clone());
        }
    }
    seen
}

/// Elapsed seconds rounded to two decimals for report metadata.
pub fn elapsed_seconds(start: std::time::Instant) -> f64 {
    (start.elapsed().as_secs_f64() * 100.0).round() / 100.0
}
