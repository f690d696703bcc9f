use itertools::Itertools;
use tracing::{debug, trace};

use super::minimize::DistinguishTable;
use super::reachable::ReachableStates;
use super::StateId;

/// 并查集，每个状态记录自己的父节点，根节点就是所在等价类的代表元。
///
/// 合并两棵树时，编号较小的根成为新的根，所以每个等价类的代表元都是其中编号最小的状态。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnionFind {
    parent: Vec<StateId>,
}

impl UnionFind {
    /// 每个状态单独成为一个集合。
    pub fn new(state_num: usize) -> Self {
        Self {
            parent: (0..state_num).collect(),
        }
    }

    /// 沿着父节点一直走到根。不做路径压缩，因此只需要不可变引用。
    pub fn find(&self, mut state: StateId) -> StateId {
        while self.parent[state] != state {
            state = self.parent[state];
        }
        state
    }

    pub fn union(&mut self, state1: StateId, state2: StateId) {
        let root1 = self.find(state1);
        let root2 = self.find(state2);
        if root1 == root2 {
            return;
        }
        let (root, child) = if root1 < root2 {
            (root1, root2)
        } else {
            (root2, root1)
        };
        trace!("merging q{} into q{}", child, root);
        self.parent[child] = root;
    }

    pub fn same_set(&self, state1: StateId, state2: StateId) -> bool {
        self.find(state1) == self.find(state2)
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }
}

/// 把所有不可区分的可达状态对合并到同一个集合里。
///
/// 不可区分关系本身已经是等价关系，所以这里只需要逐对合并，不需要再求传递闭包。
pub fn partition(reachable: &ReachableStates, distin_table: &DistinguishTable) -> UnionFind {
    let mut forest = UnionFind::new(reachable.as_mask().len());
    let mut merges = 0;
    for (state1, state2) in reachable.iter().tuple_combinations() {
        if !distin_table.is_distinguishable(state1, state2) && !forest.same_set(state1, state2) {
            forest.union(state1, state2);
            merges += 1;
        }
    }
    debug!("{} merges among {} reachable states", merges, reachable.len());
    forest
}
