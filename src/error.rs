use thiserror::Error;

/// 构造DFA时发现的错误。
///
/// 出现这个错误说明输入的状态转移表本身不是一个完整的DFA，极小化无从谈起，
/// 调用者只能放弃整个极小化过程。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedAutomatonError {
    #[error("automaton must have at least one state")]
    NoStates,

    #[error("automaton must have at least one input symbol")]
    NoSymbols,

    #[error("a table of {states} states by {symbols} symbols cannot be indexed")]
    TooLarge { states: usize, symbols: usize },

    #[error("transition table has {found} entries, expected {expected}")]
    TableSize { expected: usize, found: usize },

    #[error("got {found} final flags for {expected} states")]
    FinalFlags { expected: usize, found: usize },

    #[error("row of q{state} has {found} transitions, expected {expected}")]
    RaggedRow {
        state: usize,
        expected: usize,
        found: usize,
    },

    #[error("δ(q{state}, {symbol}) = q{target} is outside of the {states} states")]
    TargetOutOfRange {
        state: usize,
        symbol: usize,
        target: usize,
        states: usize,
    },
}
