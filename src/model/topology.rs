use crate::model::Interaction;

/// An unsigned wiring diagram: a set of distinct directed `(source, destination)` pairs
/// over nodes `0..node_count` (self-loops allowed).
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Topology {
    node_count: usize,
    pairs: Vec<(usize, usize)>,
}

/// A [`Topology`] where every edge carries an [`Interaction`].
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct SignedTopology {
    node_count: usize,
    edges: Vec<(usize, usize, Interaction)>,
}

impl Topology {
    pub fn new(node_count: usize, pairs: Vec<(usize, usize)>) -> Topology {
        debug_assert!(
            pairs
                .iter()
                .all(|(s, d)| *s < node_count && *d < node_count)
        );
        Topology { node_count, pairs }
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn edge_count(&self) -> usize {
        self.pairs.len()
    }

    pub fn pairs(&self) -> &[(usize, usize)] {
        &self.pairs
    }

    /// True if the undirected projection of this topology touches every node and
    /// forms a single connected component. A node touched only by a self-loop is
    /// still considered touched.
    pub fn is_connected(&self) -> bool {
        if self.node_count == 0 {
            return false;
        }

        let mut touched = vec![false; self.node_count];
        let mut parent: Vec<usize> = (0..self.node_count).collect();

        fn find(parent: &mut [usize], mut x: usize) -> usize {
            while parent[x] != x {
                parent[x] = parent[parent[x]];
                x = parent[x];
            }
            x
        }

        for &(source, destination) in &self.pairs {
            touched[source] = true;
            touched[destination] = true;
            let a = find(&mut parent, source);
            let b = find(&mut parent, destination);
            if a != b {
                parent[a] = b;
            }
        }

        if touched.iter().any(|it| !it) {
            return false;
        }

        let root = find(&mut parent, 0);
        (1..self.node_count).all(|node| find(&mut parent, node) == root)
    }

    /// Attach interactions to the edges of this topology (in edge order).
    pub fn sign(&self, interactions: &[Interaction]) -> SignedTopology {
        assert_eq!(interactions.len(), self.pairs.len());
        SignedTopology {
            node_count: self.node_count,
            edges: self
                .pairs
                .iter()
                .zip(interactions)
                .map(|(&(s, d), &i)| (s, d, i))
                .collect(),
        }
    }
}

impl SignedTopology {
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn edges(&self) -> &[(usize, usize, Interaction)] {
        &self.edges
    }

    /// Number of edges pointing into each node.
    pub fn in_degrees(&self) -> Vec<usize> {
        let mut degrees = vec![0; self.node_count];
        for &(_, destination, _) in &self.edges {
            degrees[destination] += 1;
        }
        degrees
    }
}
