use std::{
    collections::{BTreeSet, HashMap, VecDeque},
    fmt::Debug,
    hash::Hash,
};

use crate::error::{MazeError, Result};

/// Supertrait that collects all the requirements on the values stored in a graph.
/// Must be copy, hashable and not references (hence 'static)
pub trait VertexValue: Copy + Eq + Hash + Debug + 'static {}

impl<T: Copy + Eq + Hash + Debug + 'static> VertexValue for T {}

/// Handle of a vertex inside the vertex store of a [`Graph`]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct VertexId(usize);

#[derive(Debug, Clone)]
pub struct Vertex<T> {
    value: T,
    // ordered by registration, this makes the traversal order (and thus BFS tie-breaking)
    // deterministic
    neighbors: BTreeSet<VertexId>,
}

impl<T> Vertex<T> {
    fn new(value: T) -> Self {
        Self {
            value,
            neighbors: BTreeSet::new(),
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn neighbors(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.neighbors.iter().copied()
    }

    pub fn degree(&self) -> usize {
        self.neighbors.len()
    }
}

impl<T: PartialEq> PartialEq for Vertex<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: Eq> Eq for Vertex<T> {}

/// An undirected graph whose vertices are identified by their value.
///
/// Vertices live in a contiguous store and refer to each other by [`VertexId`], the lookup
/// table maps a value to its id.
#[derive(Debug, Clone)]
pub struct Graph<T: VertexValue> {
    vertices: Vec<Vertex<T>>,
    lookup: HashMap<T, VertexId>,
}

impl<T: VertexValue> Default for Graph<T> {
    fn default() -> Self {
        Self {
            vertices: Vec::new(),
            lookup: HashMap::new(),
        }
    }
}

impl<T: VertexValue> Graph<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `value`, doing nothing if it is already present
    pub fn add_value(&mut self, value: T) -> VertexId {
        if let Some(id) = self.lookup.get(&value) {
            return *id;
        }

        let id = VertexId(self.vertices.len());
        self.vertices.push(Vertex::new(value));
        self.lookup.insert(value, id);
        id
    }

    /// Adds `b` as a neighbor of `a` and vice versa. Both values must already be registered.
    pub fn connect_undirected(&mut self, a: T, b: T) -> Result<()> {
        let ia = self.require(a)?;
        let ib = self.require(b)?;

        if ia == ib {
            return Err(MazeError::SelfLoop(format!("{:?}", a)));
        }

        self.vertices[ia.0].neighbors.insert(ib);
        self.vertices[ib.0].neighbors.insert(ia);
        Ok(())
    }

    pub fn id_of(&self, value: &T) -> Option<VertexId> {
        self.lookup.get(value).copied()
    }

    /// The vertex behind `id`, `None` if the id was not handed out by this graph
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex<T>> {
        self.vertices.get(id.0)
    }

    // ids stored inside this graph always index into `vertices`
    fn node(&self, id: VertexId) -> &Vertex<T> {
        &self.vertices[id.0]
    }

    pub fn contains(&self, value: &T) -> bool {
        self.lookup.contains_key(value)
    }

    /// Number of vertices
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Number of undirected edges
    pub fn edge_count(&self) -> usize {
        self.vertices.iter().map(Vertex::degree).sum::<usize>() / 2
    }

    /// All values in registration order
    pub fn values(&self) -> impl Iterator<Item = T> + '_ {
        self.vertices.iter().map(|v| v.value)
    }

    /// The values adjacent to `value`, empty if it is not registered
    pub fn neighbors(&self, value: &T) -> Vec<T> {
        match self.id_of(value) {
            Some(id) => self
                .node(id)
                .neighbors()
                .map(|n| self.node(n).value)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Returns the values along a path with the fewest edges from `start` to `goal`, both
    /// inclusive, or `None` if `goal` cannot be reached. When several shortest paths exist the
    /// one through earlier registered vertices is returned.
    pub fn breadth_first_path(&self, start: T, goal: T) -> Option<Vec<T>> {
        let start = self.id_of(&start)?;
        let goal = self.id_of(&goal)?;

        // predecessor in the BFS tree, `Some(None)` marks the root
        let mut visited: Vec<Option<Option<VertexId>>> = vec![None; self.vertices.len()];
        let mut visit_list = VecDeque::from([start]);
        visited[start.0] = Some(None);

        while let Some(current) = visit_list.pop_front() {
            if current == goal {
                break;
            }

            for next in self.node(current).neighbors() {
                if visited[next.0].is_none() {
                    visited[next.0] = Some(Some(current));
                    visit_list.push_back(next);
                }
            }
        }

        visited[goal.0]?;

        // backtrack from the goal to find the path
        let mut path = vec![self.node(goal).value];
        let mut previous = visited[goal.0];

        loop {
            previous = match previous {
                // we found the starting point, we are done
                Some(None) => break,
                Some(Some(from)) => {
                    path.push(self.node(from).value);
                    visited[from.0]
                }
                None => unreachable!("backtracking lead to a vertex that was never visited"),
            }
        }

        path.reverse();
        Some(path)
    }

    fn require(&self, value: T) -> Result<VertexId> {
        self.id_of(&value)
            .ok_or_else(|| MazeError::UnknownVertex(format!("{:?}", value)))
    }
}
