//! This module implements a greedy best-first search in the shape of
//! [pathfinding's astar function](https://docs.rs/pathfinding/latest/pathfinding/directed/astar/index.html).
//! Frontier entries are ranked by heuristic estimate alone; no accumulated cost enters the
//! priority, so the path found is not necessarily the shortest one.
use fxhash::{FxBuildHasher, FxHashSet};
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use log::trace;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt::Debug;
use std::hash::Hash;
use std::ops::ControlFlow;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Parent index of the start node.
const NO_PARENT: usize = usize::MAX;

struct FrontierEntry<K> {
    estimate: K,
    index: usize,
}

impl<K: PartialEq> Eq for FrontierEntry<K> {}

impl<K: PartialEq> PartialEq for FrontierEntry<K> {
    fn eq(&self, other: &Self) -> bool {
        self.estimate.eq(&other.estimate) && self.index == other.index
    }
}

impl<K: Ord> PartialOrd for FrontierEntry<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for FrontierEntry<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // The heap is a max-heap: the smallest estimate ranks highest and among equal estimates
        // the earliest discovered node (lowest index) does.
        match other.estimate.cmp(&self.estimate) {
            Ordering::Equal => other.index.cmp(&self.index),
            s => s,
        }
    }
}

/// Result of an exploration that was not interrupted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Exploration<N> {
    pub path: Option<Vec<N>>,
    pub expanded: usize,
    pub discovered: usize,
}

/// Walks parent links back from `goal` and reverses them. Terminates at the start because
/// `get_index(NO_PARENT)` yields nothing.
fn reverse_path<N: Clone>(parents: &FxIndexMap<N, usize>, goal: usize) -> Vec<N> {
    let mut cursor = goal;
    let mut path: Vec<N> = std::iter::from_fn(|| {
        parents.get_index(cursor).map(|(node, &parent)| {
            cursor = parent;
            node.clone()
        })
    })
    .collect();
    path.reverse();
    path
}

/// Explores from `start` until `success` holds for a popped node or the frontier runs dry.
///
/// Every node is pushed at most once: the parent map records each discovered node, and a
/// successor that already has an entry (still on the frontier or already expanded) is skipped.
/// `on_expand` is called once per expansion, after the node joins the visited set and before its
/// successors are generated; breaking from it aborts the exploration with the given value.
pub(crate) fn best_first<N, K, B, FN, IN, FH, FS, FE>(
    start: &N,
    mut successors: FN,
    mut heuristic: FH,
    mut success: FS,
    mut on_expand: FE,
) -> Result<Exploration<N>, B>
where
    N: Eq + Hash + Clone + Debug,
    K: Ord + Copy,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = N>,
    FH: FnMut(&N) -> K,
    FS: FnMut(&N) -> bool,
    FE: FnMut(&N) -> ControlFlow<B>,
{
    let mut frontier = BinaryHeap::new();
    frontier.push(FrontierEntry {
        estimate: heuristic(start),
        index: 0,
    });
    let mut parents: FxIndexMap<N, usize> = FxIndexMap::default();
    parents.insert(start.clone(), NO_PARENT);
    let mut visited: FxHashSet<usize> = FxHashSet::default();

    while let Some(FrontierEntry { index, .. }) = frontier.pop() {
        let successors = {
            let Some((node, _)) = parents.get_index(index) else {
                continue;
            };
            if success(node) {
                return Ok(Exploration {
                    path: Some(reverse_path(&parents, index)),
                    expanded: visited.len(),
                    discovered: parents.len(),
                });
            }
            visited.insert(index);
            trace!("Expanding {:?}", node);
            if let ControlFlow::Break(b) = on_expand(node) {
                return Err(b);
            }
            successors(node)
        };
        for successor in successors {
            match parents.entry(successor) {
                // Covers visited nodes too, since every expanded node was discovered first.
                Occupied(_) => continue,
                Vacant(e) => {
                    let estimate = heuristic(e.key());
                    let n = e.index();
                    e.insert(index);
                    frontier.push(FrontierEntry { estimate, index: n });
                }
            }
        }
    }
    debug_assert!(visited.len() <= parents.len());
    Ok(Exploration {
        path: None,
        expanded: visited.len(),
        discovered: parents.len(),
    })
}
