use std::ops::AddAssign;

use serde::Serialize;

/// Insertion-ordered name → quantity accumulator. Adding to an existing
/// name sums into it. Lookups are linear; meant for the handful of
/// panels, products and kits in one quote.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Tally<V> {
    entries: Vec<(String, V)>,
}

impl<V> Default for Tally<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<V: Copy + AddAssign> Tally<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: &str, value: V) {
        match self.entries.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v += value,
            None => self.entries.push((name.to_string(), value)),
        }
    }

    #[cfg(test)]
    pub fn get(&self, name: &str) -> Option<V> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, V)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Tally<u32> {
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, v)| u64::from(*v)).sum()
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/tally.rs"]
mod tests;
