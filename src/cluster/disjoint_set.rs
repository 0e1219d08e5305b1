//! Union-find over dense cell indices.
//!
//! Union by size keeps trees shallow while the registry is being built, and
//! `find` repoints every node it walked past at the root. Once `flatten`
//! has run every element points straight at its root, so the read-only
//! `root` used during scoring is a single hop.

/// Disjoint-set forest keyed by `usize` indices.
#[derive(Debug, Clone)]
pub struct DisjointSet {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl DisjointSet {
    /// Creates `n` singleton sets.
    pub fn new(n: usize) -> Self {
        DisjointSet {
            parent: (0..n).collect(),
            size: vec![1; n],
        }
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Returns the root of `i`, compressing the path behind it.
    pub fn find(&mut self, i: usize) -> usize {
        let mut root = i;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut cur = i;
        while self.parent[cur] != root {
            let next = self.parent[cur];
            self.parent[cur] = root;
            cur = next;
        }
        root
    }

    /// Returns the root of `i` without mutating the forest.
    #[inline]
    pub fn root(&self, i: usize) -> usize {
        let mut root = i;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        root
    }

    /// Merges the sets of `a` and `b`, returning the surviving root.
    ///
    /// The larger set absorbs the smaller; on a tie `a`'s root survives.
    pub fn union(&mut self, a: usize, b: usize) -> usize {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return ra;
        }
        let (big, small) = if self.size[ra] >= self.size[rb] {
            (ra, rb)
        } else {
            (rb, ra)
        };
        self.parent[small] = big;
        self.size[big] += self.size[small];
        big
    }

    /// Number of elements in the set containing `i`.
    pub fn set_size(&self, i: usize) -> usize {
        self.size[self.root(i)]
    }

    /// Points every element directly at its root.
    pub fn flatten(&mut self) {
        for i in 0..self.parent.len() {
            self.find(i);
        }
    }
}
