use crate::error::MalformedAutomatonError;
use tracing::debug;

/// DFA的极小化相关的方法，包括可区分状态表的计算。
pub mod minimize;

/// 用并查集把不可区分的状态合并成等价类。
pub mod partition;

/// 由等价类构造出来的极小化DFA。
pub mod quotient;

/// 从开始状态出发的可达性分析。
pub mod reachable;

pub use minimize::minimize;
pub use quotient::MinimizedDfa;

pub type StateId = usize;

/// 输入字符的编号，字母表就是 `0..number_of_symbols()`。
pub type Symbol = usize;

/// 已经构造完成的DFA，可以读取状态转移函数、开始状态、接受状态等信息。
///
/// 这里的DFA都是完全的：每个状态在每个输入字符上都恰好有一个转移。
/// 极小化的每一步都只通过这个trait读取DFA，因此极小化之后的DFA也可以再极小化一次。
pub trait CompletedDfa {
    fn number_of_states(&self) -> usize;
    fn number_of_symbols(&self) -> usize;

    /// 开始状态固定为0号状态。
    fn start_state(&self) -> StateId {
        0
    }

    /// delta 是状态转移函数δ的读音。这个函数等价于 δ(from, input)。
    fn delta(&self, from: StateId, input: Symbol) -> StateId;

    fn is_accept(&self, state: StateId) -> bool;

    /// 从开始状态出发读入整个字符串，返回最后停留的状态。
    fn run(&self, word: &[Symbol]) -> StateId {
        word.iter()
            .fold(self.start_state(), |state, &input| self.delta(state, input))
    }

    fn accepts(&self, word: &[Symbol]) -> bool {
        self.is_accept(self.run(word))
    }
}

/// 稠密DFA。
///
/// 所有的状态转移函数统一储存在一个Vec中，按出发状态排列。
/// 构造之后就不再修改。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenseDfa {
    number_of_symbols: usize,
    out_transitions: Transitions,
    accept_states: Vec<bool>,
}

impl DenseDfa {
    /// 从一张按行排列的状态转移表构造DFA。
    ///
    /// `transitions[state * symbols + input]` 是 δ(state, input)，`finals[state]` 表示这个状态是否是接受状态。
    pub fn new(
        states: usize,
        symbols: usize,
        transitions: Vec<StateId>,
        finals: Vec<bool>,
    ) -> Result<Self, MalformedAutomatonError> {
        if states == 0 {
            return Err(MalformedAutomatonError::NoStates);
        }
        if symbols == 0 {
            return Err(MalformedAutomatonError::NoSymbols);
        }
        // 状态转移表按2的幂对齐之后也必须放得下，否则后面的下标计算会溢出。
        let expected = states
            .checked_mul(symbols)
            .filter(|_| {
                symbols
                    .checked_next_power_of_two()
                    .and_then(|stride| states.checked_mul(stride))
                    .is_some()
            })
            .ok_or(MalformedAutomatonError::TooLarge { states, symbols })?;
        if transitions.len() != expected {
            return Err(MalformedAutomatonError::TableSize {
                expected,
                found: transitions.len(),
            });
        }
        if finals.len() != states {
            return Err(MalformedAutomatonError::FinalFlags {
                expected: states,
                found: finals.len(),
            });
        }
        if let Some((index, &target)) = transitions
            .iter()
            .enumerate()
            .find(|(_, target)| **target >= states)
        {
            return Err(MalformedAutomatonError::TargetOutOfRange {
                state: index / symbols,
                symbol: index % symbols,
                target,
                states,
            });
        }

        let mut out_transitions = Transitions::with_num_and_stride(states, symbols);
        for (index, target) in transitions.into_iter().enumerate() {
            out_transitions.set(index / symbols, index % symbols, target);
        }
        debug!(states, symbols, "built dense dfa");

        Ok(DenseDfa {
            number_of_symbols: symbols,
            out_transitions,
            accept_states: finals,
        })
    }

    /// 每个状态一行的状态转移表，第 `i` 行第 `k` 列是 δ(i, k)。
    /// 字母表的大小取第一行的长度。
    pub fn from_rows(
        rows: Vec<Vec<StateId>>,
        finals: Vec<bool>,
    ) -> Result<Self, MalformedAutomatonError> {
        let symbols = rows.first().map(Vec::len).unwrap_or(0);
        if let Some((state, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != symbols) {
            return Err(MalformedAutomatonError::RaggedRow {
                state,
                expected: symbols,
                found: row.len(),
            });
        }
        let states = rows.len();
        Self::new(states, symbols, rows.concat(), finals)
    }

    /// 将这个DFA极小化。
    pub fn minimize(&self) -> MinimizedDfa {
        minimize::minimize(self)
    }
}

impl CompletedDfa for DenseDfa {
    fn number_of_states(&self) -> usize {
        self.out_transitions.number_of_states()
    }

    fn number_of_symbols(&self) -> usize {
        self.number_of_symbols
    }

    /// 输入给定的状态id和输入字符，返回下一个状态。
    fn delta(&self, from: StateId, input: Symbol) -> StateId {
        if from >= self.number_of_states() {
            panic!("no such a state: q{}", from)
        }
        if input >= self.number_of_symbols {
            panic!("no such a input: {}", input)
        }
        self.out_transitions.get(from, input)
    }

    fn is_accept(&self, state: StateId) -> bool {
        self.accept_states[state]
    }
}

/// 状态转移函数表。
///
/// 每个状态占用的长度（stride）是字母表大小向上取到2的幂，
/// 这样定位一个转移只需要移位和加法。
#[derive(Debug, Clone, PartialEq, Eq)]
struct Transitions {
    trans: Vec<StateId>,
    stride_as_power_of_2: u32,
}

impl Transitions {
    fn with_num_and_stride(number_of_states: usize, alphabet_len: usize) -> Self {
        let stride = alphabet_len.next_power_of_two();
        Transitions {
            trans: vec![0; number_of_states * stride],
            stride_as_power_of_2: stride.trailing_zeros(),
        }
    }

    fn index(&self, from: StateId, input: Symbol) -> usize {
        (from << self.stride_as_power_of_2) + input
    }

    fn get(&self, from: StateId, input: Symbol) -> StateId {
        self.trans[self.index(from, input)]
    }

    fn set(&mut self, from: StateId, input: Symbol, to: StateId) {
        let index = self.index(from, input);
        self.trans[index] = to;
    }

    fn number_of_states(&self) -> usize {
        self.trans.len() >> self.stride_as_power_of_2
    }
}
