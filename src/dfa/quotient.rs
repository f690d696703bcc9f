use tracing::debug;

use super::partition::UnionFind;
use super::reachable::ReachableStates;
use super::{CompletedDfa, StateId, Symbol};

/// 极小化DFA中状态（也就是等价类）的编号。
pub type ClassId = usize;

/// 一组互相不可区分的可达状态，合并之后成为极小化DFA的一个状态。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquivalenceClass {
    representative: StateId,
    members: Vec<StateId>,
    transitions: Vec<ClassId>,
    accepting: bool,
}

impl EquivalenceClass {
    /// 并查集的根，也是这个类里编号最小的状态。
    pub fn representative(&self) -> StateId {
        self.representative
    }

    /// 按编号从小到大排列的成员。
    pub fn members(&self) -> &[StateId] {
        &self.members
    }

    pub fn contains(&self, state: StateId) -> bool {
        self.members.binary_search(&state).is_ok()
    }

    /// 第 `k` 项是代表元读入字符 `k` 之后所在的等价类。
    pub fn transitions(&self) -> &[ClassId] {
        &self.transitions
    }

    pub fn is_accept(&self) -> bool {
        self.accepting
    }
}

/// 极小化DFA。
///
/// 等价类按照最小成员的编号排序，因此开始状态所在的类总是0号类。
/// 它本身也是一个完全的DFA，可以直接运行或者再极小化一次。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinimizedDfa {
    classes: Vec<EquivalenceClass>,
    class_of: Vec<Option<ClassId>>,
    reachable: ReachableStates,
    number_of_symbols: usize,
}

impl MinimizedDfa {
    pub fn classes(&self) -> &[EquivalenceClass] {
        &self.classes
    }

    pub fn class(&self, id: ClassId) -> Option<&EquivalenceClass> {
        self.classes.get(id)
    }

    /// 原DFA中的状态所在的等价类。不可达状态没有等价类。
    pub fn class_of(&self, state: StateId) -> Option<ClassId> {
        self.class_of.get(state).copied().flatten()
    }

    /// 原DFA中的可达状态。
    pub fn reachable_states(&self) -> &ReachableStates {
        &self.reachable
    }

    pub fn number_of_classes(&self) -> usize {
        self.classes.len()
    }
}

impl CompletedDfa for MinimizedDfa {
    fn number_of_states(&self) -> usize {
        self.classes.len()
    }

    fn number_of_symbols(&self) -> usize {
        self.number_of_symbols
    }

    fn delta(&self, from: StateId, input: Symbol) -> StateId {
        self.classes[from].transitions[input]
    }

    fn is_accept(&self, state: StateId) -> bool {
        self.classes[state].accepting
    }
}

/// 由并查集构造极小化DFA。
///
/// 按编号从小到大扫描可达状态，遇到一个新的根就新建一个等价类。
/// 因为同一个类里的状态不可区分，它们的转移函数都会落在相同的类里，只需取代表元的转移函数即可。
///
/// `reachable` 和 `forest` 必须是由同一个 `dfa` 算出来的。
pub(crate) fn build(
    dfa: &impl CompletedDfa,
    reachable: ReachableStates,
    forest: &UnionFind,
) -> MinimizedDfa {
    let mut class_of = vec![None; dfa.number_of_states()];
    let mut class_of_root = vec![None; dfa.number_of_states()];
    let mut classes: Vec<EquivalenceClass> = Vec::new();

    for state in reachable.iter() {
        let root = forest.find(state);
        let id = match class_of_root[root] {
            Some(id) => id,
            None => {
                let id = classes.len();
                class_of_root[root] = Some(id);
                classes.push(EquivalenceClass {
                    representative: root,
                    members: Vec::new(),
                    transitions: Vec::with_capacity(dfa.number_of_symbols()),
                    accepting: dfa.is_accept(root),
                });
                id
            }
        };
        classes[id].members.push(state);
        class_of[state] = Some(id);
    }

    // 可达状态的后继一定可达，所以这里的查表总能找到等价类。
    for class in classes.iter_mut() {
        for input in 0..dfa.number_of_symbols() {
            let to = forest.find(dfa.delta(class.representative, input));
            let target = class_of_root[to]
                .expect("successor of a reachable state must be reachable");
            class.transitions.push(target);
        }
    }

    debug!(
        "minimized {} reachable states into {} classes",
        reachable.len(),
        classes.len()
    );
    MinimizedDfa {
        classes,
        class_of,
        reachable,
        number_of_symbols: dfa.number_of_symbols(),
    }
}
