//! Canonical undirected edge set.
//!
//! Keyed by the ordered id pair `(min, max)`. Inserting a pair that already
//! exists keeps the lower weight; equal weights keep the first insert.

use std::collections::BTreeMap;

use crate::models::EdgeRow;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeAttrs {
    pub weight: f64,
    pub accessible: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct EdgeSet {
    edges: BTreeMap<(String, String), EdgeAttrs>,
}

fn canonical(a: &str, b: &str) -> (String, String) {
    if a <= b { (a.to_string(), b.to_string()) } else { (b.to_string(), a.to_string()) }
}

impl EdgeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when the pair was added or its weight lowered.
    /// Self-edges and non-finite or negative weights are ignored.
    pub fn insert(&mut self, a: &str, b: &str, weight: f64, accessible: bool) -> bool {
        if a == b || !weight.is_finite() || weight < 0.0 { return false; }
        let attrs = EdgeAttrs { weight, accessible };
        match self.edges.get_mut(&canonical(a, b)) {
            Some(existing) => {
                if weight < existing.weight {
                    *existing = attrs;
                    true
                } else {
                    false
                }
            }
            None => {
                self.edges.insert(canonical(a, b), attrs);
                true
            }
        }
    }

    pub fn get(&self, a: &str, b: &str) -> Option<&EdgeAttrs> {
        self.edges.get(&canonical(a, b))
    }

    pub fn contains(&self, a: &str, b: &str) -> bool {
        self.get(a, b).is_some()
    }

    /// Number of undirected edges.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &EdgeAttrs)> {
        self.edges.iter().map(|((a, b), attrs)| (a.as_str(), b.as_str(), attrs))
    }

    /// Two directed rows per edge, sorted by `(from, to)`.
    pub fn to_rows(&self) -> Vec<EdgeRow> {
        let mut rows = Vec::with_capacity(self.edges.len() * 2);
        for ((a, b), attrs) in &self.edges {
            rows.push(EdgeRow { from: a.clone(), to: b.clone(), distance: attrs.weight, accessible: attrs.accessible });
            rows.push(EdgeRow { from: b.clone(), to: a.clone(), distance: attrs.weight, accessible: attrs.accessible });
        }
        rows.sort_by(|x, y| (x.from.as_str(), x.to.as_str()).cmp(&(y.from.as_str(), y.to.as_str())));
        rows
    }
}
