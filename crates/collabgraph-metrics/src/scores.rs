use std::ops::Index;

use serde::Serialize;

/// Per-vertex metric values, indexed by vertex.
///
/// Each metric defines its own scale; `Scores` only guarantees that there is
/// exactly one value per vertex of the analysed snapshot.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Scores(Vec<f64>);

impl Scores {
    #[must_use]
    pub const fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn get(&self, vertex: usize) -> Option<f64> {
        self.0.get(vertex).copied()
    }

    /// `(vertex, score)` pairs in vertex order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.0.iter().copied().enumerate()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<f64> {
        self.0
    }

    /// Sum of all scores.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    /// `(vertex, score)` pairs by descending score; equal scores keep
    /// ascending vertex order.
    #[must_use]
    pub fn ranked(&self) -> Vec<(usize, f64)> {
        let mut ranked: Vec<(usize, f64)> = self.iter().collect();
        // Stable sort keeps index order among ties.
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
    }

    /// The `k` highest-scoring vertices, ordered as in [`Scores::ranked`].
    #[must_use]
    pub fn top(&self, k: usize) -> Vec<(usize, f64)> {
        let mut ranked = self.ranked();
        ranked.truncate(k);
        ranked
    }
}

impl Index<usize> for Scores {
    type Output = f64;

    fn index(&self, vertex: usize) -> &f64 {
        &self.0[vertex]
    }
}

impl From<Vec<f64>> for Scores {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}
