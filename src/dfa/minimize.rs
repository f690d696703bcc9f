use itertools::Itertools;
use tracing::{debug, trace};

use super::partition::partition;
use super::quotient::{build, MinimizedDfa};
use super::reachable::{compute_reachable, ReachableStates};
use super::{CompletedDfa, StateId};

/// 将DFA极小化。
///
/// 极小化DFA的具体实现步骤如下：
///
/// 1. 从开始状态出发做深度优先搜索，求出可达状态。不可达状态不参与之后的任何一步。
/// 2. 用填表法计算可达状态之间的可区分关系。
/// 3. 用并查集把所有不可区分的状态对合并，得到等价类。
/// 4. 每个等价类成为极小化DFA的一个状态，转移函数取代表元的转移函数。
pub fn minimize(dfa: &impl CompletedDfa) -> MinimizedDfa {
    let reachable = compute_reachable(dfa, dfa.start_state());
    let distin_table = compute_distinguishable(dfa, &reachable);
    let forest = partition(&reachable, &distin_table);
    build(dfa, reachable, &forest)
}

/// 计算可达状态之间的可区分关系（填表法）。
///
/// 先标记接受状态和非接受状态为可区分状态，然后反复扫描整张表，
/// 直到某一遍扫描没有标记任何新的状态对为止。
pub fn compute_distinguishable(
    dfa: &impl CompletedDfa,
    reachable: &ReachableStates,
) -> DistinguishTable {
    let mut distin_table = DistinguishTable::new(dfa.number_of_states());

    for (state1, state2) in reachable.iter().tuple_combinations() {
        if dfa.is_accept(state1) != dfa.is_accept(state2) {
            distin_table.distinguish(state1, state2);
        }
    }
    let initial = distin_table.number_of_distinguishable();

    while distin_table.refine_once(dfa, reachable) {}

    debug!(
        "{} distinguishable pairs ({} by finality) after {} passes",
        distin_table.number_of_distinguishable(),
        initial,
        distin_table.passes()
    );
    distin_table
}

fn order_pair(state1: StateId, state2: StateId) -> (StateId, StateId) {
    if state1 < state2 {
        (state1, state2)
    } else {
        (state2, state1)
    }
}

/// 可区分状态表。
///
/// 只使用 `state1 < state2` 的那一半，查询时两个状态的顺序无所谓。
/// 一个状态对一旦被标记为可区分，就不会再被取消。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistinguishTable {
    state_num: usize,
    table: Vec<bool>,
    passes: usize,
}

impl DistinguishTable {
    fn new(state_num: usize) -> Self {
        Self {
            state_num,
            table: vec![false; state_num * state_num],
            passes: 0,
        }
    }

    pub fn is_distinguishable(&self, state1: StateId, state2: StateId) -> bool {
        if state1 == state2 {
            return false;
        }
        let (state1, state2) = order_pair(state1, state2);
        self.table[state1 * self.state_num + state2]
    }

    fn distinguish(&mut self, state1: StateId, state2: StateId) {
        let (state1, state2) = order_pair(state1, state2);
        self.table[state1 * self.state_num + state2] = true;
    }

    /// 扫描一遍所有还没被标记的可达状态对。
    ///
    /// 对于状态对(p, q)，只要有一个输入字符a使得(δ(p, a), δ(q, a))已经可区分，
    /// 就标记(p, q)，并且不用再看剩下的字符。返回这一遍是否标记了新的状态对。
    pub fn refine_once(
        &mut self,
        dfa: &impl CompletedDfa,
        reachable: &ReachableStates,
    ) -> bool {
        let mut changed = false;
        for (state1, state2) in reachable.iter().tuple_combinations() {
            // 如果这两个状态已经被标记为可区分状态，就不用再检查了。
            if self.is_distinguishable(state1, state2) {
                continue;
            }
            for input in 0..dfa.number_of_symbols() {
                let to1 = dfa.delta(state1, input);
                let to2 = dfa.delta(state2, input);
                if to1 == to2 {
                    continue;
                }
                if self.is_distinguishable(to1, to2) {
                    trace!(
                        "q{} and q{} distinguished by q{} and q{} on {}",
                        state1,
                        state2,
                        to1,
                        to2,
                        input
                    );
                    self.distinguish(state1, state2);
                    changed = true;
                    break;
                }
            }
        }
        self.passes += 1;
        changed
    }

    /// 已经扫描了几遍表，包括最后那一遍没有任何变化的扫描。
    pub fn passes(&self) -> usize {
        self.passes
    }

    pub fn number_of_distinguishable(&self) -> usize {
        self.table.iter().filter(|marked| **marked).count()
    }

    /// 所有被标记为可区分的状态对，每对只出现一次，并且 `state1 < state2`。
    pub fn distinguishable_pairs(&self) -> impl Iterator<Item = (StateId, StateId)> + '_ {
        (0..self.state_num)
            .tuple_combinations()
            .filter(move |(state1, state2)| self.is_distinguishable(*state1, *state2))
    }
}
