/*!
本项目实现了DFA的极小化，适用于完成《形式语言与自动机》课程的实验作业。

极小化分为以下几步：
- 从开始状态出发求可达状态，删除不可达状态
- 用填表法求出可达状态之间的可区分关系
- 用并查集把不可区分的状态合并为等价类
- 以等价类为状态构造极小化DFA

输入是一张完整的状态转移表，状态编号为 `0..n`，0号状态是开始状态，输入字符编号为 `0..m`。

# 用法

```
use wasm_dfa_min::dfa::{CompletedDfa, DenseDfa};

let dfa = DenseDfa::from_rows(
    vec![vec![2, 2], vec![1, 3], vec![1, 2], vec![1, 2]],
    vec![false, true, false, false],
)?;
let minimized = dfa.minimize();

assert_eq!(minimized.number_of_classes(), 3);
assert_eq!(minimized.classes()[2].members(), &[2, 3]);
assert!(minimized.accepts(&[0, 0]));
# Ok::<(), wasm_dfa_min::error::MalformedAutomatonError>(())
```
*/
mod utils;

/// DFA 相关的结构体和方法。
///
/// 本模块包含了稠密DFA的结构体，以及极小化的每一个步骤：
/// 可达性分析、可区分状态表、并查集和极小化DFA的构造。
pub mod dfa;

/// 构造DFA时可能出现的错误。
pub mod error;

use wasm_bindgen::prelude::*;

use crate::dfa::DenseDfa;

/// 输入状态转移表，返回每个状态在极小化DFA中所在的等价类编号。
///
/// `transitions` 按行排列，第 `state * symbols + input` 项是 δ(state, input)；
/// `finals` 中非0表示接受状态。不可达状态对应的返回值是 `u32::MAX`。
#[wasm_bindgen]
pub fn minimize_table(
    states: u32,
    symbols: u32,
    transitions: Vec<u32>,
    finals: Vec<u8>,
) -> Result<Vec<u32>, JsError> {
    utils::set_panic_hook();

    let dfa = DenseDfa::new(
        states as usize,
        symbols as usize,
        transitions.into_iter().map(|to| to as usize).collect(),
        finals.into_iter().map(|flag| flag != 0).collect(),
    )?;
    let minimized = dfa.minimize();

    Ok((0..states as usize)
        .map(|state| {
            minimized
                .class_of(state)
                .map_or(u32::MAX, |class| class as u32)
        })
        .collect())
}
