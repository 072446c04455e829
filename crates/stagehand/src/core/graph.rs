//! Shared graph algorithms over index-addressed nodes
//!
//! Callers map their identifiers to dense indices `0..node_count` and pass
//! edges as `(from, to)` index pairs. Parallel edges are allowed and counted
//! individually.

use std::collections::VecDeque;

/// Kahn topological order with a caller-supplied tie-break key.
///
/// Among all nodes whose remaining in-degree is zero, the one with the
/// smallest `tie_key` is emitted next (ties on the key fall back to the lower
/// index). Nodes that never reach in-degree zero, i.e. cycle members and
/// everything downstream of a cycle, are appended in index order.
pub fn topological_order<F>(node_count: usize, edges: &[(usize, usize)], tie_key: F) -> Vec<usize>
where
    F: Fn(usize) -> f64,
{
    let mut in_degree = vec![0usize; node_count];
    let mut successors: Vec<Vec<usize>> = vec![Vec::new(); node_count];
    for &(from, to) in edges {
        if from >= node_count || to >= node_count {
            continue;
        }
        in_degree[to] += 1;
        successors[from].push(to);
    }

    let mut ready: Vec<usize> = (0..node_count).filter(|&n| in_degree[n] == 0).collect();
    let mut emitted = vec![false; node_count];
    let mut order = Vec::with_capacity(node_count);

    while !ready.is_empty() {
        let pick = (0..ready.len())
            .min_by(|&i, &j| {
                let (a, b) = (ready[i], ready[j]);
                tie_key(a).total_cmp(&tie_key(b)).then(a.cmp(&b))
            })
            .unwrap_or(0);
        let node = ready.swap_remove(pick);
        emitted[node] = true;
        order.push(node);

        for &next in &successors[node] {
            in_degree[next] -= 1;
            if in_degree[next] == 0 {
                ready.push(next);
            }
        }
    }

    order.extend((0..node_count).filter(|&n| !emitted[n]));
    order
}

/// Breadth-first levels from a set of roots.
///
/// Every root starts at level 0; a node reached for the first time gets its
/// parent's level plus one. Unreached nodes stay `None`.
pub fn bfs_levels(node_count: usize, edges: &[(usize, usize)], roots: &[usize]) -> Vec<Option<usize>> {
    let mut successors: Vec<Vec<usize>> = vec![Vec::new(); node_count];
    for &(from, to) in edges {
        if from < node_count && to < node_count {
            successors[from].push(to);
        }
    }

    let mut levels: Vec<Option<usize>> = vec![None; node_count];
    let mut queue = VecDeque::new();
    for &root in roots {
        if root < node_count && levels[root].is_none() {
            levels[root] = Some(0);
            queue.push_back(root);
        }
    }

    while let Some(node) = queue.pop_front() {
        let level = levels[node].unwrap_or(0);
        for &next in &successors[node] {
            if levels[next].is_none() {
                levels[next] = Some(level + 1);
                queue.push_back(next);
            }
        }
    }

    levels
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(order: &[usize], node: usize) -> usize {
        order.iter().position(|&n| n == node).unwrap()
    }

    #[test]
    fn test_chain_is_ordered() {
        let order = topological_order(3, &[(0, 1), (1, 2)], |_| 0.0);
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn test_ties_break_by_key_then_index() {
        // Two independent sources: node 1 sits higher (smaller y) than node 0
        let ys = [50.0, 10.0, 30.0];
        let order = topological_order(3, &[], |n| ys[n]);
        assert_eq!(order, vec![1, 2, 0]);

        let flat = topological_order(3, &[], |_| 0.0);
        assert_eq!(flat, vec![0, 1, 2]);
    }

    #[test]
    fn test_diamond_respects_edges() {
        let edges = [(0, 1), (0, 2), (1, 3), (2, 3)];
        let order = topological_order(4, &edges, |_| 0.0);
        for &(from, to) in &edges {
            assert!(position(&order, from) < position(&order, to));
        }
    }

    #[test]
    fn test_cycle_members_appended_in_index_order() {
        // 0 -> 1, and 2 <-> 3 form a cycle
        let order = topological_order(4, &[(0, 1), (2, 3), (3, 2)], |_| 0.0);
        assert_eq!(order, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_out_of_range_edges_ignored() {
        let order = topological_order(2, &[(0, 9), (1, 0)], |_| 0.0);
        assert_eq!(order, vec![1, 0]);
    }

    #[test]
    fn test_bfs_levels_from_single_root() {
        let levels = bfs_levels(4, &[(0, 1), (1, 2), (0, 2)], &[0]);
        assert_eq!(levels, vec![Some(0), Some(1), Some(1), None]);
    }

    #[test]
    fn test_bfs_levels_multiple_roots() {
        let levels = bfs_levels(4, &[(0, 2), (1, 3), (3, 2)], &[0, 1]);
        assert_eq!(levels, vec![Some(0), Some(0), Some(1), Some(1)]);
    }

    #[test]
    fn test_bfs_levels_cycle_unreached() {
        let levels = bfs_levels(3, &[(1, 2), (2, 1)], &[0]);
        assert_eq!(levels, vec![Some(0), None, None]);
    }
}
