//! The blog registry: an ordered list of entries loaded from and saved to a store.
//!
//! The registry is loaded in full before a run and rewritten in full after it.
//! Entry order is the store's order; nothing here sorts.

mod entry;
mod store;

pub use entry::{Category, EntryStatus, RegistryEntry};
pub use store::{JsonRegistryStore, RegistryError, RegistryStore};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Identity key used to spot duplicate URLs: trimmed, trailing `/` removed, lower-cased.
///
/// Probing always uses the URL verbatim; this is only for comparison.
pub fn url_key(url: &str) -> String {
    url.trim().trim_end_matches('/').to_lowercase()
}

/// In-memory registry, passed by value through a validation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Registry {
    entries: Vec<RegistryEntry>,
}

impl Registry {
    pub fn new(entries: Vec<RegistryEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }

    pub fn entries_mut(&mut self) -> &mut [RegistryEntry] {
        &mut self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Groups of entry indices whose URLs share a [`url_key`], in first-seen order.
    /// Only groups with more than one entry are returned.
    pub fn duplicate_urls(&self) -> Vec<(String, Vec<usize>)> {
        let mut order: Vec<String> = Vec::new();
        let mut groups: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, e) in self.entries.iter().enumerate() {
            let key = url_key(&e.url);
            let slot = groups.entry(key.clone()).or_default();
            if slot.is_empty() {
                order.push(key);
            }
            slot.push(i);
        }
        order
            .into_iter()
            .filter_map(|k| {
                let idx = groups.remove(&k)?;
                (idx.len() > 1).then_some((k, idx))
            })
            .collect()
    }
}
