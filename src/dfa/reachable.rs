use super::{CompletedDfa, StateId};
use tracing::{debug, trace};

/// 可达状态集合，用一个覆盖全部状态的布尔掩码表示。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReachableStates {
    mask: Vec<bool>,
    len: usize,
}

impl ReachableStates {
    pub fn contains(&self, state: StateId) -> bool {
        self.mask.get(state).copied().unwrap_or(false)
    }

    /// 按状态编号从小到大迭代所有可达状态。
    pub fn iter(&self) -> impl Iterator<Item = StateId> + Clone + '_ {
        self.mask
            .iter()
            .enumerate()
            .filter(|(_, reachable)| **reachable)
            .map(|(state, _)| state)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_mask(&self) -> &[bool] {
        &self.mask
    }
}

/// 从 `start` 出发做深度优先搜索，标记所有可达状态。
///
/// 状态在入栈之前就被标记，所以每个状态最多入栈一次，环和自环都不会让搜索停不下来。
pub fn compute_reachable(dfa: &impl CompletedDfa, start: StateId) -> ReachableStates {
    let mut mask = vec![false; dfa.number_of_states()];
    let mut stack = vec![start];
    mask[start] = true;
    let mut len = 1;

    while let Some(state) = stack.pop() {
        for input in 0..dfa.number_of_symbols() {
            let next = dfa.delta(state, input);
            if !mask[next] {
                trace!("q{} reached from q{} on {}", next, state, input);
                mask[next] = true;
                len += 1;
                stack.push(next);
            }
        }
    }

    debug!(
        "{} of {} states are reachable from q{}",
        len,
        mask.len(),
        start
    );
    ReachableStates { mask, len }
}
