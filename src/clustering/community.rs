use std::cmp::Ordering;

use super::{Grouping, IndexedEdge};

/// Union-find owned by a single clustering run.
struct DisjointSet {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl DisjointSet {
    fn new(count: usize) -> Self {
        Self {
            parent: (0..count).collect(),
            size: vec![1; count],
        }
    }

    fn find(&mut self, item: usize) -> usize {
        let mut root = item;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut cursor = item;
        while self.parent[cursor] != root {
            let next = self.parent[cursor];
            self.parent[cursor] = root;
            cursor = next;
        }
        root
    }

    fn union(&mut self, a: usize, b: usize) -> bool {
        let (mut root_a, mut root_b) = (self.find(a), self.find(b));
        if root_a == root_b {
            return false;
        }
        if self.size[root_a] < self.size[root_b] {
            std::mem::swap(&mut root_a, &mut root_b);
        }
        self.parent[root_b] = root_a;
        self.size[root_a] += self.size[root_b];
        true
    }
}

/// Merges the endpoint communities of every edge stronger than `threshold`,
/// strongest first. Groups are ordered by their first member.
pub(super) fn group_by_community(
    node_count: usize,
    edges: &[IndexedEdge<'_>],
    threshold: f32,
    min_size: usize,
) -> Grouping {
    let mut ordered = edges.iter().collect::<Vec<_>>();
    ordered.sort_by(|a, b| {
        b.edge
            .strength
            .partial_cmp(&a.edge.strength)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.edge.id.cmp(&b.edge.id))
    });

    let mut communities = DisjointSet::new(node_count);
    for indexed in ordered {
        if indexed.edge.strength > threshold {
            communities.union(indexed.source, indexed.target);
        }
    }

    let mut group_by_root = vec![usize::MAX; node_count];
    let mut groups: Vec<Vec<usize>> = Vec::new();
    for node in 0..node_count {
        let root = communities.find(node);
        if group_by_root[root] == usize::MAX {
            group_by_root[root] = groups.len();
            groups.push(Vec::new());
        }
        groups[group_by_root[root]].push(node);
    }

    let mut grouping = Grouping::default();
    for group in groups {
        grouping.push(group, min_size);
    }
    grouping
}
