use std::{
    collections::{BTreeSet, HashMap, HashSet, VecDeque},
    hash::Hash,
};

/// Undirected graph stored as adjacency sets.
///
/// Vertices remember their insertion order, which drives `color_vertices` and
/// the tie order of `degree_ordered_vertices`. Adjacency sets are ordered so
/// that traversals are deterministic for a given edge set.
#[derive(Debug, Clone, Default)]
pub struct Graph<V> {
    adjacency: HashMap<V, BTreeSet<V>>,
    /// Vertices in insertion order
    order: Vec<V>,
}

impl<V> Graph<V>
where
    V: Copy + Eq + Hash + Ord,
{
    pub fn new() -> Self {
        Graph {
            adjacency: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Adds `v` with an empty adjacency set. Does nothing if `v` is already present.
    pub fn add_vertex(&mut self, v: V) {
        if !self.adjacency.contains_key(&v) {
            self.adjacency.insert(v, BTreeSet::new());
            self.order.push(v);
        }
    }

    /// Adds the undirected edge `a - b`, adding missing endpoints first.
    pub fn add_edge(&mut self, a: V, b: V) {
        self.add_vertex(a);
        self.add_vertex(b);
        if let Some(set) = self.adjacency.get_mut(&a) {
            set.insert(b);
        }
        if let Some(set) = self.adjacency.get_mut(&b) {
            set.insert(a);
        }
    }

    /// Removes the undirected edge `a - b`. Missing vertices or edges are ignored.
    pub fn remove_edge(&mut self, a: V, b: V) {
        if let Some(set) = self.adjacency.get_mut(&a) {
            set.remove(&b);
        }
        if let Some(set) = self.adjacency.get_mut(&b) {
            set.remove(&a);
        }
    }

    /// Neighbors of `v` in ascending order. An absent vertex has no neighbors.
    pub fn neighbors(&self, v: V) -> impl Iterator<Item = V> + '_ {
        self.adjacency.get(&v).into_iter().flatten().copied()
    }

    pub fn has_edge(&self, a: V, b: V) -> bool {
        self.adjacency.get(&a).is_some_and(|set| set.contains(&b))
    }

    pub fn contains_vertex(&self, v: V) -> bool {
        self.adjacency.contains_key(&v)
    }

    pub fn degree(&self, v: V) -> usize {
        self.adjacency.get(&v).map_or(0, BTreeSet::len)
    }

    pub fn vertex_count(&self) -> usize {
        self.order.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeSet::len).sum::<usize>() / 2
    }

    /// Vertices in insertion order.
    pub fn vertices(&self) -> &[V] {
        &self.order
    }

    /// Removes every edge but keeps all vertices.
    pub fn clear_edges(&mut self) {
        self.adjacency.values_mut().for_each(BTreeSet::clear);
    }

    /// Removes every vertex and edge.
    pub fn clear_vertices(&mut self) {
        self.adjacency.clear();
        self.order.clear();
    }

    /// Vertices reachable from `from`, in breadth-first visitation order.
    pub fn breadth_first_order(&self, from: V) -> Vec<V> {
        self.traverse(from, |frontier| frontier.pop_front())
    }

    /// Vertices reachable from `from`, in depth-first visitation order.
    pub fn depth_first_order(&self, from: V) -> Vec<V> {
        self.traverse(from, |frontier| frontier.pop_back())
    }

    /// Shared traversal loop: `next` decides whether the frontier behaves as a queue or a stack.
    /// A vertex is recorded when it leaves the frontier, so duplicates in the frontier are skipped.
    fn traverse(&self, from: V, next: impl Fn(&mut VecDeque<V>) -> Option<V>) -> Vec<V> {
        if !self.contains_vertex(from) {
            return Vec::new();
        }
        let mut order = Vec::new();
        let mut seen = HashSet::new();
        let mut frontier = VecDeque::from([from]);
        while let Some(v) = next(&mut frontier) {
            if seen.insert(v) {
                order.push(v);
                frontier.extend(self.neighbors(v).filter(|n| !seen.contains(n)));
            }
        }
        order
    }

    /// Breadth-first predecessor map rooted at `from`. The root maps to `None`.
    fn predecessors(&self, from: V) -> HashMap<V, Option<V>> {
        let mut parents = HashMap::new();
        if !self.contains_vertex(from) {
            return parents;
        }
        parents.insert(from, None);
        let mut frontier = VecDeque::from([from]);
        while let Some(v) = frontier.pop_front() {
            for n in self.neighbors(v) {
                if !parents.contains_key(&n) {
                    parents.insert(n, Some(v));
                    frontier.push_back(n);
                }
            }
        }
        parents
    }

    /// Shortest path by hop count from `from` to `to`, both included.
    /// Empty if `to` cannot be reached.
    pub fn shortest_path(&self, from: V, to: V) -> Vec<V> {
        let parents = self.predecessors(from);
        if !parents.contains_key(&to) {
            return Vec::new();
        }
        let mut path = vec![to];
        let mut current = to;
        while let Some(&Some(parent)) = parents.get(&current) {
            path.push(parent);
            current = parent;
        }
        path.reverse();
        path
    }

    /// All vertices sorted by ascending degree.
    pub fn degree_ordered_vertices(&self) -> Vec<V> {
        let mut vertices = self.order.clone();
        vertices.sort_by_key(|&v| self.degree(v));
        vertices
    }

    /// Greedy coloring in insertion order: each vertex takes the lowest color
    /// not used by an already colored neighbor. Not guaranteed to be minimal.
    pub fn color_vertices(&self) -> HashMap<V, usize> {
        let mut colors: HashMap<V, usize> = HashMap::with_capacity(self.order.len());
        for &v in &self.order {
            let taken: HashSet<usize> = self
                .neighbors(v)
                .filter_map(|n| colors.get(&n).copied())
                .collect();
            let color = (0..).find(|c| !taken.contains(c)).unwrap_or_default();
            colors.insert(v, color);
        }
        colors
    }
}
