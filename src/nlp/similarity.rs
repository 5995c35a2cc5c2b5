use super::tfidf::{SparseVector, TfidfMatrix};
use crate::core::types::{DuplicatePair, QualityLabel, ScoredDocument};
use tracing::info;

/// Cosine similarity; 0.0 when either side has zero norm.
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    let denom = a.norm() * b.norm();
    if denom == 0.0 {
        return 0.0;
    }
    a.dot(b) / denom
}

/// Rank reference documents labelled `quality` by similarity to `query`.
///
/// `vectors` holds one row per entry of `documents`, in the same order. The
/// sort is stable, so equal scores keep their original relative order.
pub fn find_similar<'a>(
    query: &SparseVector,
    documents: &'a [ScoredDocument],
    vectors: &TfidfMatrix,
    quality: QualityLabel,
    top_k: usize,
) -> Vec<(&'a ScoredDocument, f64)> {
    let mut scored: Vec<(&ScoredDocument, f64)> = documents
        .iter()
        .zip(&vectors.rows)
        .filter(|(doc, _)| doc.quality_label == quality)
        .map(|(doc, row)| (doc, cosine_similarity(query, row)))
        .collect();

    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.truncate(top_k);

    info!(
        "Similarity search over {} {} documents returned {} results",
        documents.iter().filter(|d| d.quality_label == quality).count(),
        quality,
        scored.len()
    );
    scored
}

/// Every pair `(i, j)`, `i < j`, whose similarity is at least `threshold`.
///
/// Compares every pair densely, so cost grows with the square of the corpus:
/// fine for interactive datasets, not for large ones.
pub fn find_duplicates(vectors: &TfidfMatrix, urls: &[Option<String>], threshold: f64) -> Vec<DuplicatePair> {
    let n = vectors.n_rows();
    let mut duplicates = Vec::new();
    if n < 2 {
        return duplicates;
    }

    for i in 0..n {
        for j in (i + 1)..n {
            let sim = cosine_similarity(&vectors.rows[i], &vectors.rows[j]);
            if sim >= threshold {
                duplicates.push(DuplicatePair {
                    first: i,
                    second: j,
                    url1: urls.get(i).cloned().flatten(),
                    url2: urls.get(j).cloned().flatten(),
                    similarity: (sim * 10_000.0).round() / 10_000.0,
                });
            }
        }
    }

    info!(
        "Duplicate scan over {} documents found {} pairs (threshold: {:.2})",
        n,
        duplicates.len(),
        threshold
    );
    duplicates
}
