//! Nearest-section lookup over section embeddings.

use anyhow::Result;

use crate::embedding::{cosine_similarity, embed_checked, Embedder};
use crate::models::{SectionKind, SectionSet};

/// One embedding per section, stored in taxonomy order.
///
/// Built wholesale from a [`SectionSet`]; there is no incremental update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmbeddingIndex {
    entries: Vec<(SectionKind, Vec<f32>)>,
}

impl EmbeddingIndex {
    /// Embeds `title + " " + content` for every section in one batch.
    pub fn build(sections: &SectionSet, embedder: &dyn Embedder) -> Result<Self> {
        let texts: Vec<String> = sections.iter().map(|s| s.embedding_text()).collect();
        if texts.is_empty() {
            return Ok(Self::default());
        }
        let vectors = embed_checked(embedder, &texts)?;
        Ok(Self::from_vectors(
            sections.iter().map(|s| s.kind).zip(vectors).collect(),
        ))
    }

    /// Wraps precomputed vectors. Entries are reordered into taxonomy order.
    pub fn from_vectors(mut entries: Vec<(SectionKind, Vec<f32>)>) -> Self {
        entries.sort_by_key(|(kind, _)| *kind);
        Self { entries }
    }

    /// Returns the section with the highest cosine similarity to `query`.
    ///
    /// Ties resolve to the earliest section in taxonomy order. `None` when
    /// the index is empty.
    pub fn lookup(&self, query: &[f32]) -> Option<(SectionKind, f32)> {
        let mut best: Option<(SectionKind, f32)> = None;
        for (kind, vector) in &self.entries {
            let score = cosine_similarity(query, vector);
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((*kind, score)),
            }
        }
        best
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn vector(&self, kind: SectionKind) -> Option<&[f32]> {
        self.entries
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, v)| v.as_slice())
    }
}
