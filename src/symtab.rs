//! Interned symbol names with stable insertion-order indices.

use std::collections::HashMap;

use smartstring::alias::String;

/// Maps symbol names to dense indices and back. Indices are assigned in
/// insertion order and never change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Symtab {
    map: HashMap<String, usize>,
    vec: Vec<String>,
}

impl Symtab {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns `name`, returning its index. Re-adding an existing name
    /// returns the original index.
    pub fn add(&mut self, name: &str) -> usize {
        if let Some(&idx) = self.map.get(name) {
            return idx;
        }
        let idx = self.vec.len();
        self.vec.push(String::from(name));
        self.map.insert(String::from(name), idx);
        idx
    }

    pub fn get(&self, name: &str) -> Option<usize> {
        self.map.get(name).copied()
    }

    /// Name at `idx`. Panics if `idx` was never assigned.
    pub fn name(&self, idx: usize) -> &str {
        &self.vec[idx]
    }

    pub fn len(&self) -> usize {
        self.vec.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vec.is_empty()
    }

    /// Names in index order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.vec.iter().map(|s| s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_assigns_dense_indices() {
        let mut tab = Symtab::new();
        assert_eq!(tab.add("E"), 0);
        assert_eq!(tab.add("T"), 1);
        assert_eq!(tab.add("+"), 2);
        assert_eq!(tab.len(), 3);
    }

    #[test]
    fn add_is_idempotent() {
        let mut tab = Symtab::new();
        assert_eq!(tab.add("E"), 0);
        assert_eq!(tab.add("E"), 0);
        assert_eq!(tab.len(), 1);
    }

    #[test]
    fn lookup_both_ways() {
        let mut tab = Symtab::new();
        tab.add("E");
        tab.add("i");
        assert_eq!(tab.get("i"), Some(1));
        assert_eq!(tab.get("x"), None);
        assert_eq!(tab.name(0), "E");
    }

    #[test]
    fn iter_preserves_insertion_order() {
        let mut tab = Symtab::new();
        for name in ["E", "T", "+", "i"] {
            tab.add(name);
        }
        let names: Vec<&str> = tab.iter().collect();
        assert_eq!(names, ["E", "T", "+", "i"]);
    }
}
