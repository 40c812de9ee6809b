//! Prefix tree keyed by string segments.
//!
//! Nodes live in a flat arena and refer to their children by index, so
//! `insert` and `get` cost O(k) in the key depth no matter how many keys
//! are stored. A node may hold a value and have children at the same time
//! (`item` and `item.one` coexist).

use std::collections::BTreeMap;

#[derive(Debug, Clone)]
struct Node<V> {
    value: Option<V>,
    children: BTreeMap<String, usize>,
}

impl<V> Node<V> {
    fn empty() -> Self {
        Self {
            value: None,
            children: BTreeMap::new(),
        }
    }
}

/// Arena-backed trie storing one value per full key path.
#[derive(Debug, Clone)]
pub struct Trie<V> {
    nodes: Vec<Node<V>>,
    len: usize,
}

const ROOT: usize = 0;

impl<V> Trie<V> {
    /// Create an empty trie.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::empty()],
            len: 0,
        }
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no value is stored.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Store `value` at `key_parts`, returning the value it replaced.
    ///
    /// Values at ancestor or descendant paths are left untouched.
    pub fn insert<S: AsRef<str>>(&mut self, key_parts: &[S], value: V) -> Option<V> {
        let mut current = ROOT;
        for part in key_parts {
            current = self.child_or_create(current, part.as_ref());
        }

        let previous = self.nodes[current].value.replace(value);
        if previous.is_none() {
            self.len += 1;
        }
        previous
    }

    /// Consuming form of [`insert`](Self::insert) for building tries in expressions.
    pub fn with<S: AsRef<str>>(mut self, key_parts: &[S], value: V) -> Self {
        self.insert(key_parts, value);
        self
    }

    /// Exact lookup. Misses when a segment is absent or the node is only a branch.
    pub fn get<S: AsRef<str>>(&self, key_parts: &[S]) -> Option<&V> {
        let node = self.find(key_parts)?;
        self.nodes[node].value.as_ref()
    }

    /// Whether a value is stored at exactly `key_parts`.
    pub fn contains<S: AsRef<str>>(&self, key_parts: &[S]) -> bool {
        self.get(key_parts).is_some()
    }

    /// Visit every stored value in pre-order (a node before its children,
    /// siblings in lexicographic segment order).
    pub fn fold<'a, A, F>(&'a self, init: A, mut f: F) -> A
    where
        F: FnMut(A, &[String], &'a V) -> A,
    {
        let mut path = Vec::new();
        self.fold_from(ROOT, &mut path, init, &mut f)
    }

    /// Fold over the values at or below `prefix`, with full key paths.
    pub fn fold_prefix<'a, S, A, F>(&'a self, prefix: &[S], init: A, mut f: F) -> A
    where
        S: AsRef<str>,
        F: FnMut(A, &[String], &'a V) -> A,
    {
        let Some(start) = self.find(prefix) else {
            return init;
        };
        let mut path: Vec<String> = prefix.iter().map(|p| p.as_ref().to_string()).collect();
        self.fold_from(start, &mut path, init, &mut f)
    }

    /// All `(key_parts, value)` pairs, in fold order.
    pub fn entries(&self) -> Vec<(Vec<String>, &V)> {
        self.fold(Vec::with_capacity(self.len), |mut acc, parts, value| {
            acc.push((parts.to_vec(), value));
            acc
        })
    }

    fn fold_from<'a, A, F>(&'a self, node: usize, path: &mut Vec<String>, init: A, f: &mut F) -> A
    where
        F: FnMut(A, &[String], &'a V) -> A,
    {
        let mut acc = init;
        if let Some(value) = &self.nodes[node].value {
            acc = f(acc, path, value);
        }
        for (segment, &child) in &self.nodes[node].children {
            path.push(segment.clone());
            acc = self.fold_from(child, path, acc, f);
            path.pop();
        }
        acc
    }

    fn find<S: AsRef<str>>(&self, key_parts: &[S]) -> Option<usize> {
        key_parts.iter().try_fold(ROOT, |node, part| {
            self.nodes[node].children.get(part.as_ref()).copied()
        })
    }

    fn child_or_create(&mut self, parent: usize, segment: &str) -> usize {
        if let Some(&child) = self.nodes[parent].children.get(segment) {
            return child;
        }
        let child = self.nodes.len();
        self.nodes.push(Node::empty());
        self.nodes[parent].children.insert(segment.to_string(), child);
        child
    }
}

impl<V> Default for Trie<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, S: AsRef<str>> FromIterator<(Vec<S>, V)> for Trie<V> {
    fn from_iter<I: IntoIterator<Item = (Vec<S>, V)>>(iter: I) -> Self {
        let mut trie = Self::new();
        for (parts, value) in iter {
            trie.insert(&parts, value);
        }
        trie
    }
}
