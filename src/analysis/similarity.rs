//! Pluggable semantic similarity between skill phrases

use crate::config::{MatchingConfig, SimilarityBackend};
use crate::error::{JobScoutError, Result};
use log::{info, warn};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use strsim::jaro_winkler;
use unicode_segmentation::UnicodeSegmentation;

/// Capability interface for semantic skill comparison.
///
/// `None` means the pair cannot be compared (empty phrase, vocabulary miss).
/// Callers treat an undefined comparison as "not a semantic match" rather
/// than an error, so the engine keeps working without any model resource.
pub trait SimilarityProvider: Send + Sync {
    /// Similarity in [0, 1], or `None` when undefined for this pair.
    fn similarity(&self, a: &str, b: &str) -> Option<f32>;

    /// Short backend name for logging and reports.
    fn name(&self) -> &'static str;
}

/// Null provider: never reports a semantic match, leaving exact matching as
/// the only signal.
pub struct ExactOnly;

impl SimilarityProvider for ExactOnly {
    fn similarity(&self, _a: &str, _b: &str) -> Option<f32> {
        None
    }

    fn name(&self) -> &'static str {
        "exact-only"
    }
}

/// String-metric provider using Jaro-Winkler similarity. Defined for every
/// non-empty pair, so it needs no model files.
pub struct LexicalSimilarity;

impl SimilarityProvider for LexicalSimilarity {
    fn similarity(&self, a: &str, b: &str) -> Option<f32> {
        if a.trim().is_empty() || b.trim().is_empty() {
            return None;
        }
        Some(jaro_winkler(&a.to_lowercase(), &b.to_lowercase()) as f32)
    }

    fn name(&self) -> &'static str {
        "lexical"
    }
}

/// Pretrained word-vector provider. A phrase embeds as the mean of its
/// in-vocabulary token vectors; similarity is cosine, clamped to [0, 1].
pub struct WordVectorModel {
    vectors: HashMap<String, Vec<f32>>,
    dimension: usize,
}

impl WordVectorModel {
    /// Load a vocabulary from a JSON file shaped `{ "token": [f32, ...] }`.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let raw: HashMap<String, Vec<f32>> = serde_json::from_str(&content)?;
        Self::from_vocabulary(raw)
    }

    /// Build from an in-memory vocabulary. All vectors must share one
    /// dimension.
    pub fn from_vocabulary(raw: HashMap<String, Vec<f32>>) -> Result<Self> {
        let dimension = raw
            .values()
            .next()
            .map(|v| v.len())
            .ok_or_else(|| JobScoutError::SimilarityModel("empty vocabulary".to_string()))?;

        if dimension == 0 {
            return Err(JobScoutError::SimilarityModel(
                "zero-dimensional vectors".to_string(),
            ));
        }

        if let Some((token, bad)) = raw.iter().find(|(_, v)| v.len() != dimension) {
            return Err(JobScoutError::SimilarityModel(format!(
                "vector for '{}' has dimension {} (expected {})",
                token,
                bad.len(),
                dimension
            )));
        }

        let vectors = raw
            .into_iter()
            .map(|(token, vector)| (token.to_lowercase(), vector))
            .collect();

        Ok(Self { vectors, dimension })
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vectors.len()
    }

    /// Mean-pooled phrase vector, or `None` when no token is in vocabulary.
    fn embed(&self, phrase: &str) -> Option<Vec<f32>> {
        let mut sum = vec![0.0f32; self.dimension];
        let mut hits = 0usize;

        for token in phrase.unicode_words() {
            if let Some(vector) = self.vectors.get(&token.to_lowercase()) {
                for (acc, value) in sum.iter_mut().zip(vector) {
                    *acc += value;
                }
                hits += 1;
            }
        }

        if hits == 0 {
            return None;
        }

        for value in &mut sum {
            *value /= hits as f32;
        }
        Some(sum)
    }

    fn cosine(a: &[f32], b: &[f32]) -> Option<f32> {
        let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
        let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

        if norm_a == 0.0 || norm_b == 0.0 {
            return None;
        }
        Some((dot / (norm_a * norm_b)).clamp(0.0, 1.0))
    }
}

impl SimilarityProvider for WordVectorModel {
    fn similarity(&self, a: &str, b: &str) -> Option<f32> {
        let va = self.embed(a)?;
        let vb = self.embed(b)?;
        Self::cosine(&va, &vb)
    }

    fn name(&self) -> &'static str {
        "word-vectors"
    }
}

/// Build the configured provider, degrading instead of failing: a vectors
/// backend without a loadable vocabulary falls back to lexical matching.
pub fn provider_from_config(config: &MatchingConfig) -> Arc<dyn SimilarityProvider> {
    match config.provider {
        SimilarityBackend::Exact => Arc::new(ExactOnly),
        SimilarityBackend::Lexical => Arc::new(LexicalSimilarity),
        SimilarityBackend::Vectors => match &config.vectors_path {
            Some(path) => match WordVectorModel::from_path(path) {
                Ok(model) => {
                    info!(
                        "Loaded word-vector vocabulary ({} tokens) from {}",
                        model.vocabulary_size(),
                        path.display()
                    );
                    Arc::new(model)
                }
                Err(e) => {
                    warn!(
                        "Could not load word vectors from {}: {}. Falling back to lexical matching.",
                        path.display(),
                        e
                    );
                    Arc::new(LexicalSimilarity)
                }
            },
            None => {
                warn!("Vectors backend selected but no vectors_path configured. Falling back to lexical matching.");
                Arc::new(LexicalSimilarity)
            }
        },
    }
}
