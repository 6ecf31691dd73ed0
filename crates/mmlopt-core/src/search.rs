//! A* search over implicitly defined graphs.
//!
//! Uses a `BinaryHeap` as a min-heap via reversed ordering, with best-known
//! costs and predecessors kept in hash maps keyed by node. Nodes are generated
//! on demand by a `SearchProblem`, so the graph never exists in full.
//!
//! Ordering is fully deterministic: entries with equal f-score prefer the
//! larger g-score (deeper partial paths) and then the smaller node.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::hash::Hash;

/// A shortest-path problem with non-negative integer edge costs.
pub trait SearchProblem {
    type Node: Clone + Eq + Hash + Ord;

    fn start(&self) -> Self::Node;

    fn is_goal(&self, node: &Self::Node) -> bool;

    /// Push every `(neighbour, edge cost)` of `node` onto `out`.
    fn neighbors(&self, node: &Self::Node, out: &mut Vec<(Self::Node, usize)>);

    /// Lower bound on the remaining cost. Must be consistent.
    fn heuristic(&self, node: &Self::Node) -> usize;
}

/// A cheapest path from the start to a goal node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPath<N> {
    /// Nodes from start to goal, inclusive.
    pub nodes: Vec<N>,
    pub total_cost: usize,
    /// Nodes popped and expanded before the goal was reached.
    pub expanded: usize,
}

/// The open set ran dry without reaching a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exhausted {
    pub expanded: usize,
}

struct OpenEntry<N> {
    node: N,
    f_score: usize,
    g_score: usize,
}

impl<N: Ord> PartialEq for OpenEntry<N> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<N: Ord> Eq for OpenEntry<N> {}

impl<N: Ord> PartialOrd for OpenEntry<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<N: Ord> Ord for OpenEntry<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for min-heap: smallest f_score is "greatest".
        other
            .f_score
            .cmp(&self.f_score)
            .then_with(|| self.g_score.cmp(&other.g_score))
            .then_with(|| other.node.cmp(&self.node))
    }
}

/// Find a cheapest path from `problem.start()` to any goal node.
pub fn astar<P: SearchProblem>(problem: &P) -> Result<SearchPath<P::Node>, Exhausted> {
    let start = problem.start();

    // g_score[node] = cost of cheapest known path from start to node.
    let mut g_score: HashMap<P::Node, usize> = HashMap::new();
    let mut came_from: HashMap<P::Node, P::Node> = HashMap::new();
    let mut closed: HashSet<P::Node> = HashSet::new();
    let mut open = BinaryHeap::new();
    let mut neighbors = Vec::new();
    let mut expanded = 0usize;

    g_score.insert(start.clone(), 0);
    open.push(OpenEntry {
        f_score: problem.heuristic(&start),
        g_score: 0,
        node: start.clone(),
    });

    while let Some(current) = open.pop() {
        if problem.is_goal(&current.node) {
            let nodes = reconstruct_path(&came_from, &start, current.node);
            return Ok(SearchPath {
                nodes,
                total_cost: current.g_score,
                expanded,
            });
        }

        if !closed.insert(current.node.clone()) {
            continue;
        }
        expanded += 1;

        neighbors.clear();
        problem.neighbors(&current.node, &mut neighbors);
        for (neighbor, cost) in neighbors.drain(..) {
            if closed.contains(&neighbor) {
                continue;
            }
            let tentative_g = current.g_score + cost;
            let improved = g_score
                .get(&neighbor)
                .map_or(true, |&known| tentative_g < known);
            if improved {
                g_score.insert(neighbor.clone(), tentative_g);
                came_from.insert(neighbor.clone(), current.node.clone());
                open.push(OpenEntry {
                    f_score: tentative_g + problem.heuristic(&neighbor),
                    g_score: tentative_g,
                    node: neighbor,
                });
            }
        }
    }

    Err(Exhausted { expanded })
}

fn reconstruct_path<N: Clone + Eq + Hash>(
    came_from: &HashMap<N, N>,
    start: &N,
    goal: N,
) -> Vec<N> {
    let mut nodes = vec![goal];
    while let Some(last) = nodes.last() {
        if last == start {
            break;
        }
        match came_from.get(last) {
            Some(prev) => nodes.push(prev.clone()),
            None => break,
        }
    }
    nodes.reverse();
    nodes
}
