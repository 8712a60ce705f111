//! Prefix tree keyed by paths.
//!
//! Each node of a [`PathTrie`] may hold a value and has children indexed by a key; a node is
//! addressed by the sequence of keys leading to it from the root. In this crate the keys are
//! child indices, so a trie is a sparse map from expression paths to values.

use std::collections::{BTreeMap, btree_map};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTrie<K: Ord, V> {
    value: Option<V>,
    children: BTreeMap<K, PathTrie<K, V>>,
}

impl<K: Ord, V> Default for PathTrie<K, V> {
    fn default() -> Self {
        Self {
            value: None,
            children: BTreeMap::new(),
        }
    }
}

impl<K: Ord + Clone, V> PathTrie<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value stored at this node.
    #[inline]
    pub fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    #[inline]
    pub fn value_mut(&mut self) -> Option<&mut V> {
        self.value.as_mut()
    }

    #[inline]
    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }

    /// Store `value` at this node, returning the previous one.
    #[inline]
    pub fn set_value(&mut self, value: V) -> Option<V> {
        self.value.replace(value)
    }

    #[inline]
    pub fn take_value(&mut self) -> Option<V> {
        self.value.take()
    }

    #[inline]
    pub fn child(&self, key: &K) -> Option<&Self> {
        self.children.get(key)
    }

    #[inline]
    pub fn child_mut(&mut self, key: &K) -> Option<&mut Self> {
        self.children.get_mut(key)
    }

    /// Child under `key`, created empty if missing.
    pub fn child_or_insert(&mut self, key: K) -> &mut Self {
        self.children.entry(key).or_default()
    }

    /// Direct children in key order.
    pub fn children(&self) -> btree_map::Iter<'_, K, Self> {
        self.children.iter()
    }

    pub fn clear_children(&mut self) {
        self.children.clear();
    }

    /// Node at `path`, if the trie has one.
    pub fn node(&self, path: &[K]) -> Option<&Self> {
        let mut current = self;
        for key in path {
            current = current.children.get(key)?;
        }
        Some(current)
    }

    pub fn node_mut(&mut self, path: &[K]) -> Option<&mut Self> {
        let mut current = self;
        for key in path {
            current = current.children.get_mut(key)?;
        }
        Some(current)
    }

    /// Node at `path`, creating every missing node on the way.
    pub fn node_or_insert(&mut self, path: &[K]) -> &mut Self {
        let mut current = self;
        for key in path {
            current = current.children.entry(key.clone()).or_default();
        }
        current
    }

    #[inline]
    pub fn get(&self, path: &[K]) -> Option<&V> {
        self.node(path).and_then(Self::value)
    }

    #[inline]
    pub fn get_mut(&mut self, path: &[K]) -> Option<&mut V> {
        self.node_mut(path).and_then(Self::value_mut)
    }

    /// Store `value` at `path`, returning the value previously stored there.
    #[inline]
    pub fn insert(&mut self, path: &[K], value: V) -> Option<V> {
        self.node_or_insert(path).set_value(value)
    }

    /// Take the value at `path` out of the trie.
    ///
    /// Nodes left without value and without children are pruned.
    pub fn remove(&mut self, path: &[K]) -> Option<V> {
        let Some((key, rest)) = path.split_first() else {
            return self.value.take();
        };
        let child = self.children.get_mut(key)?;
        let removed = child.remove(rest);
        if child.is_empty() {
            self.children.remove(key);
        }
        removed
    }

    /// Whether a node exists at `path`, with or without a value.
    #[inline]
    pub fn contains_path(&self, path: &[K]) -> bool {
        self.node(path).is_some()
    }

    /// Whether a value is stored exactly at `path`.
    #[inline]
    pub fn contains_value(&self, path: &[K]) -> bool {
        self.get(path).is_some()
    }

    /// Whether a value is stored at some non-empty prefix of `path` (`path` itself included).
    pub fn prefix_contains_value(&self, path: &[K]) -> bool {
        self.longest_prefix_with_value(path).is_some_and(|prefix| !prefix.is_empty())
    }

    /// Longest prefix of `path` (possibly empty, possibly `path` itself) at which a value is
    /// stored.
    pub fn longest_prefix_with_value<'p>(&self, path: &'p [K]) -> Option<&'p [K]> {
        let mut current = self;
        let mut longest = current.has_value().then_some(0);
        for (depth, key) in path.iter().enumerate() {
            match current.children.get(key) {
                Some(child) => current = child,
                None => break,
            }
            if current.has_value() {
                longest = Some(depth + 1);
            }
        }
        longest.map(|len| &path[..len])
    }

    /// Whether this node or any node below it holds a value.
    pub fn subtree_has_value(&self) -> bool {
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            if node.has_value() {
                return true;
            }
            pending.extend(node.children.values());
        }
        false
    }

    /// No value here and no children.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.value.is_none() && self.children.is_empty()
    }

    /// Number of values stored in this subtree.
    pub fn len(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            count += node.has_value() as usize;
            pending.extend(node.children.values());
        }
        count
    }

    /// Every stored value with its path, in prefix order.
    pub fn entries(&self) -> Vec<(Vec<K>, &V)> {
        let mut out = Vec::new();
        let mut pending: Vec<(Vec<K>, &Self)> = vec![(Vec::new(), self)];
        while let Some((path, node)) = pending.pop() {
            if let Some(value) = &node.value {
                out.push((path.clone(), value));
            }
            // Reverse so that the smallest key is explored first.
            for (key, child) in node.children.iter().rev() {
                let mut child_path = path.clone();
                child_path.push(key.clone());
                pending.push((child_path, child));
            }
        }
        out
    }
}

impl<K, V, P> FromIterator<(P, V)> for PathTrie<K, V>
where
    K: Ord + Clone,
    P: AsRef<[K]>,
{
    fn from_iter<T: IntoIterator<Item = (P, V)>>(iter: T) -> Self {
        let mut trie = Self::new();
        for (path, value) in iter {
            trie.insert(path.as_ref(), value);
        }
        trie
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PathTrie<usize, &'static str> {
        let mut trie = PathTrie::new();
        trie.insert(&[0, 1], "a");
        trie.insert(&[0, 1, 2], "b");
        trie.insert(&[3], "c");
        trie
    }

    #[test]
    fn stores_values_at_paths() {
        let trie = sample();
        assert_eq!(trie.get(&[0, 1]), Some(&"a"));
        assert_eq!(trie.get(&[0, 1, 2]), Some(&"b"));
        assert_eq!(trie.get(&[0]), None);
        assert_eq!(trie.get(&[7]), None);
        assert!(trie.contains_path(&[0]));
        assert!(!trie.contains_value(&[0]));
        assert_eq!(trie.len(), 3);
    }

    #[test]
    fn insert_replaces_and_returns_previous() {
        let mut trie = sample();
        assert_eq!(trie.insert(&[3], "d"), Some("c"));
        assert_eq!(trie.get(&[3]), Some(&"d"));
        assert_eq!(trie.insert(&[], "root"), None);
        assert_eq!(trie.value(), Some(&"root"));
    }

    #[test]
    fn prefix_queries() {
        let trie = sample();
        assert!(trie.prefix_contains_value(&[0, 1, 5, 6]));
        assert!(trie.prefix_contains_value(&[0, 1]));
        assert!(!trie.prefix_contains_value(&[0]));
        assert!(!trie.prefix_contains_value(&[]));
        assert_eq!(trie.longest_prefix_with_value(&[0, 1, 2, 9]), Some(&[0, 1, 2][..]));
        assert_eq!(trie.longest_prefix_with_value(&[0, 1, 4]), Some(&[0, 1][..]));
        assert_eq!(trie.longest_prefix_with_value(&[4]), None);
    }

    #[test]
    fn root_value_is_an_empty_prefix() {
        let mut trie = sample();
        trie.set_value("root");
        assert_eq!(trie.longest_prefix_with_value(&[9]), Some(&[][..]));
        assert!(!trie.prefix_contains_value(&[9]));
    }

    #[test]
    fn remove_prunes_empty_branches() {
        let mut trie = sample();
        assert_eq!(trie.remove(&[3]), Some("c"));
        assert!(!trie.contains_path(&[3]));
        assert_eq!(trie.remove(&[0, 1]), Some("a"));
        assert!(trie.contains_path(&[0, 1]));
        assert_eq!(trie.remove(&[0, 1, 2]), Some("b"));
        assert!(trie.is_empty());
        assert_eq!(trie.remove(&[0]), None);
    }

    #[test]
    fn subtree_and_iteration() {
        let mut trie = sample();
        assert!(trie.node(&[0]).is_some_and(PathTrie::subtree_has_value));
        trie.node_or_insert(&[5, 5]);
        assert!(!trie.node(&[5]).is_some_and(PathTrie::subtree_has_value));

        let entries: Vec<_> = trie.entries().into_iter().map(|(p, v)| (p, *v)).collect();
        assert_eq!(
            entries,
            vec![(vec![0, 1], "a"), (vec![0, 1, 2], "b"), (vec![3], "c")]
        );
    }

    #[test]
    fn children_are_addressable() {
        let mut trie = sample();
        trie.child_or_insert(0).child_or_insert(4).set_value("e");
        assert_eq!(trie.get(&[0, 4]), Some(&"e"));
        let keys: Vec<_> = trie.child(&0).into_iter().flat_map(|c| c.children().map(|(k, _)| *k)).collect();
        assert_eq!(keys, vec![1, 4]);
        if let Some(v) = trie.get_mut(&[0, 4]) {
            *v = "f";
        }
        assert_eq!(trie.get(&[0, 4]), Some(&"f"));
    }
}
