use core::hash::Hash;
use rustc_hash::FxHashMap;
use std::collections::hash_map::Entry;
use thiserror::Error;

/// The identifier was never registered via [`DisjointSet::make_set`].
///
/// Carries the offending key. Repeated queries against not-yet-created
/// elements are an expected usage pattern (probing before creation), so this
/// is an ordinary recoverable result, not a panic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown identifier: {0}")]
pub struct UnknownIdentifier<K>(pub K);

#[derive(Clone, Debug)]
struct Node<K> {
    key: K,
    // Index of the parent node, or the node's own index at a root. Parent
    // links are indices into `DisjointSet::nodes` rather than pointers, so
    // map rehashing and vec growth can never invalidate them.
    parent: u32,
    // Upper bound on the height of the subtree below this node. Only
    // meaningful while the node is a root; never reset afterwards.
    rank: u32,
}

/// Disjoint-set (union-find) structure over application-supplied keys, with
/// union by rank and full path compression.
///
/// Elements are registered with [`make_set`](Self::make_set), merged with
/// [`union_set`](Self::union_set), and queried with
/// [`find_set`](Self::find_set), which returns the canonical representative
/// of the element's current set. Lookups are amortized near-constant time.
///
/// Nodes are never deleted; the structure grows with the set of distinct
/// keys ever registered. Not synchronized: callers needing concurrent access
/// must serialize externally.
#[derive(Clone, Debug)]
pub struct DisjointSet<K> {
    nodes: Vec<Node<K>>,
    index: FxHashMap<K, u32>,
}

impl<K> Default for DisjointSet<K> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            index: FxHashMap::default(),
        }
    }
}

impl<K: Eq + Hash + Clone> DisjointSet<K> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            index: FxHashMap::default(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Number of distinct keys ever registered.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether `key` has been registered via [`make_set`](Self::make_set).
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Registers `key` as a new singleton set. Returns whether a node was
    /// created; registering an existing key is a no-op returning `false`.
    pub fn make_set(&mut self, key: K) -> bool {
        match self.index.entry(key.clone()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                let id = self.nodes.len().try_into().expect("node ID overflow");
                entry.insert(id);
                self.nodes.push(Node {
                    key,
                    parent: id,
                    rank: 0,
                });
                true
            }
        }
    }

    /// Returns the canonical representative of the set containing `key`, or
    /// [`UnknownIdentifier`] if `key` was never registered.
    ///
    /// Compresses the walked path: every node visited on the way to the root
    /// is repointed directly at it, so future lookups for any of them are
    /// amortized O(1).
    pub fn find_set(&mut self, key: &K) -> Result<K, UnknownIdentifier<K>> {
        let Some(&id) = self.index.get(key) else {
            return Err(UnknownIdentifier(key.clone()));
        };
        let root = self.find_root(id);
        Ok(self.nodes[root as usize].key.clone())
    }

    /// Merges the sets containing `key1` and `key2` by rank. Returns `false`
    /// without mutating anything if either key is unregistered (no nodes are
    /// created as a side effect); returns `true` both on a performed union
    /// and when the keys were already in the same set.
    pub fn union_set(&mut self, key1: &K, key2: &K) -> bool {
        let (Some(&id1), Some(&id2)) = (self.index.get(key1), self.index.get(key2)) else {
            return false;
        };

        let root1 = self.find_root(id1);
        let root2 = self.find_root(id2);
        if root1 == root2 {
            return true;
        }

        let rank1 = self.nodes[root1 as usize].rank;
        let rank2 = self.nodes[root2 as usize].rank;
        if rank1 < rank2 {
            self.nodes[root1 as usize].parent = root2;
        } else {
            // On a rank tie the first key's root wins. Deterministic, but
            // callers may only rely on equivalence-class correctness, not on
            // which root is chosen.
            self.nodes[root2 as usize].parent = root1;
            if rank1 == rank2 {
                self.nodes[root1 as usize].rank += 1;
            }
        }
        true
    }

    /// Whether both keys currently resolve to the same representative.
    /// Errors on the first unregistered key. Compresses both walked paths.
    pub fn same_set(&mut self, key1: &K, key2: &K) -> Result<bool, UnknownIdentifier<K>> {
        let Some(&id1) = self.index.get(key1) else {
            return Err(UnknownIdentifier(key1.clone()));
        };
        let Some(&id2) = self.index.get(key2) else {
            return Err(UnknownIdentifier(key2.clone()));
        };
        Ok(self.find_root(id1) == self.find_root(id2))
    }

    // Two passes: walk to the root, then repoint everything on the path at
    // it. Iterative on purpose -- a recursive walk is bounded by the path
    // length, which can get long on adversarial union orders before the
    // first compressing lookup.
    fn find_root(&mut self, start: u32) -> u32 {
        let mut root = start;
        while self.nodes[root as usize].parent != root {
            root = self.nodes[root as usize].parent;
        }
        let mut id = start;
        while id != root {
            id = core::mem::replace(&mut self.nodes[id as usize].parent, root);
        }
        root
    }
}
