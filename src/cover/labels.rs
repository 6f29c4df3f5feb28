//! Variable label bookkeeping for covers
//!
//! Labels are optional; when the dimensions grow past the named variables,
//! fresh sequential names are generated, skipping any the user already took.

use std::collections::HashMap;
use std::sync::Arc;

/// Ordered variable labels with O(1) name lookup
#[derive(Debug, Clone)]
pub(super) struct Labels {
    prefix: char,
    names: Vec<Arc<str>>,
    index: HashMap<Arc<str>, usize>,
}

impl Labels {
    pub(super) fn new(prefix: char) -> Self {
        Labels {
            prefix,
            names: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub(super) fn from_names(prefix: char, names: Vec<Arc<str>>) -> Self {
        let index = names
            .iter()
            .enumerate()
            .map(|(i, n)| (Arc::clone(n), i))
            .collect();
        Labels {
            prefix,
            names,
            index,
        }
    }

    pub(super) fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub(super) fn len(&self) -> usize {
        self.names.len()
    }

    pub(super) fn as_slice(&self) -> &[Arc<str>] {
        &self.names
    }

    pub(super) fn get(&self, position: usize) -> Option<&Arc<str>> {
        self.names.get(position)
    }

    pub(super) fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Append `name`, or a generated one when `name` is `None`
    pub(super) fn push(&mut self, name: Option<Arc<str>>) {
        let position = self.names.len();
        let name = name.unwrap_or_else(|| self.generated(position));
        self.index.insert(Arc::clone(&name), position);
        self.names.push(name);
    }

    /// Generate labels until `target` variables are named
    pub(super) fn fill_to(&mut self, target: usize) {
        while self.names.len() < target {
            self.push(None);
        }
    }

    /// First free generated name at or after `start`
    fn generated(&self, start: usize) -> Arc<str> {
        let mut n = start;
        loop {
            let candidate: Arc<str> = Arc::from(format!("{}{}", self.prefix, n).as_str());
            if !self.index.contains_key(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_names_skip_taken_ones() {
        let mut labels = Labels::from_names('x', vec![Arc::from("x1")]);
        labels.fill_to(3);
        assert_eq!(labels.as_slice()[0], Arc::from("x1"));
        // Position 1 would be "x1", which is taken; the next free is "x2".
        assert_eq!(labels.as_slice()[1], Arc::from("x2"));
        assert_eq!(labels.as_slice()[2], Arc::from("x3"));
    }

    #[test]
    fn lookup_by_name() {
        let labels = Labels::from_names('y', vec![Arc::from("sum"), Arc::from("carry")]);
        assert_eq!(labels.position("carry"), Some(1));
        assert_eq!(labels.position("borrow"), None);
    }
}
