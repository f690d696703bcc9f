use itertools::Itertools;
use wasm_dfa_min::dfa::{minimize, CompletedDfa, DenseDfa, MinimizedDfa};
use wasm_dfa_min::error::MalformedAutomatonError;

fn members(minimized: &MinimizedDfa) -> Vec<Vec<usize>> {
    minimized
        .classes()
        .iter()
        .map(|class| class.members().to_vec())
        .collect()
}

/// 所有长度不超过 `max_len` 的字符串。
fn words(symbols: usize, max_len: usize) -> impl Iterator<Item = Vec<usize>> {
    std::iter::once(vec![]).chain((1..=max_len).flat_map(move |len| {
        std::iter::repeat(0..symbols)
            .take(len)
            .multi_cartesian_product()
    }))
}

fn assert_same_language(dfa: &DenseDfa, minimized: &MinimizedDfa) {
    let max_len = dfa.number_of_states() + 1;
    for word in words(dfa.number_of_symbols(), max_len) {
        assert_eq!(
            dfa.accepts(&word),
            minimized.accepts(&word),
            "word {:?}",
            word
        );
    }
}

fn assert_minimal(minimized: &MinimizedDfa) {
    let again = minimize(minimized);
    assert_eq!(again.number_of_classes(), minimized.number_of_classes());
    assert!(again.classes().iter().all(|class| class.members().len() == 1));
}

fn sample_dfas() -> Vec<DenseDfa> {
    vec![
        DenseDfa::from_rows(
            vec![vec![1, 2], vec![1, 3], vec![1, 2], vec![1, 2]],
            vec![false, true, false, false],
        )
        .unwrap(),
        DenseDfa::from_rows(
            vec![vec![2, 2], vec![1, 3], vec![1, 2], vec![1, 2]],
            vec![false, true, false, false],
        )
        .unwrap(),
        DenseDfa::from_rows(
            (0..6).map(|count| vec![(count + 1) % 6, count]).collect(),
            (0..6).map(|count| count % 3 == 0).collect(),
        )
        .unwrap(),
        // 以 "01" 结尾的字符串，带两个多余的状态和一个不可达状态。
        DenseDfa::from_rows(
            vec![
                vec![1, 3],
                vec![1, 2],
                vec![4, 3],
                vec![1, 3],
                vec![1, 2],
                vec![5, 5],
            ],
            vec![false, false, true, false, false, true],
        )
        .unwrap(),
    ]
}

#[test_log::test]
fn merges_states_with_identical_behavior() {
    // 0、2、3都是非接受状态，在字符0上都到达1，在字符1上都到达2，所以三者等价。
    let dfa = DenseDfa::from_rows(
        vec![vec![1, 2], vec![1, 3], vec![1, 2], vec![1, 2]],
        vec![false, true, false, false],
    )
    .unwrap();
    let minimized = dfa.minimize();

    assert_eq!(minimized.reachable_states().iter().collect_vec(), vec![0, 1, 2, 3]);
    assert_eq!(members(&minimized), vec![vec![0, 2, 3], vec![1]]);
    assert!(minimized.classes()[1].is_accept());
    assert_eq!(minimized.classes()[0].transitions(), &[1, 0]);
    assert_eq!(minimized.classes()[1].transitions(), &[1, 0]);
}

#[test_log::test]
fn keeps_the_start_state_apart_when_it_differs() {
    let dfa = DenseDfa::from_rows(
        vec![vec![2, 2], vec![1, 3], vec![1, 2], vec![1, 2]],
        vec![false, true, false, false],
    )
    .unwrap();
    let minimized = dfa.minimize();

    assert_eq!(members(&minimized), vec![vec![0], vec![1], vec![2, 3]]);
    assert_eq!(
        minimized
            .classes()
            .iter()
            .map(|class| class.is_accept())
            .collect_vec(),
        vec![false, true, false]
    );
}

#[test_log::test]
fn drops_unreachable_states_whatever_their_finality() {
    // q3没有来自可达状态的入边。
    let dfa = DenseDfa::from_rows(
        vec![vec![1, 2], vec![2, 1], vec![0, 0], vec![3, 0]],
        vec![false, true, false, true],
    )
    .unwrap();
    let minimized = dfa.minimize();

    assert!(!minimized.reachable_states().contains(3));
    assert_eq!(minimized.class_of(3), None);
    assert!(members(&minimized).iter().flatten().all(|state| *state != 3));
    assert_eq!(minimized.reachable_states().len(), 3);
}

#[test_log::test]
fn all_final_states_collapse_into_one() {
    let dfa = DenseDfa::from_rows(
        vec![vec![1, 2], vec![2, 0], vec![0, 1]],
        vec![true, true, true],
    )
    .unwrap();
    let minimized = dfa.minimize();

    assert_eq!(members(&minimized), vec![vec![0, 1, 2]]);
    assert_eq!(minimized.classes()[0].transitions(), &[0, 0]);
    assert!(minimized.classes()[0].is_accept());
    assert_eq!(minimized.classes()[0].representative(), 0);
}

#[test_log::test]
fn representative_is_the_smallest_member() {
    for dfa in sample_dfas() {
        let minimized = dfa.minimize();
        for class in minimized.classes() {
            assert_eq!(Some(&class.representative()), class.members().first());
        }
    }
}

#[test_log::test]
fn reachable_states_are_reachable_by_short_words() {
    for dfa in sample_dfas() {
        let minimized = dfa.minimize();
        let reached = words(dfa.number_of_symbols(), dfa.number_of_states())
            .map(|word| dfa.run(&word))
            .unique()
            .sorted()
            .collect_vec();
        assert_eq!(minimized.reachable_states().iter().collect_vec(), reached);
    }
}

#[test_log::test]
fn minimization_preserves_the_language() {
    for dfa in sample_dfas() {
        let minimized = dfa.minimize();
        assert_same_language(&dfa, &minimized);
    }
}

#[test_log::test]
fn minimized_automata_cannot_be_minimized_further() {
    for dfa in sample_dfas() {
        assert_minimal(&dfa.minimize());
    }
}

#[test_log::test]
fn ends_with_zero_one() {
    let dfa = sample_dfas().pop().unwrap();
    let minimized = dfa.minimize();

    assert_eq!(members(&minimized), vec![vec![0, 3], vec![1, 4], vec![2]]);
    assert!(minimized.accepts(&[1, 1, 0, 1]));
    assert!(!minimized.accepts(&[0, 1, 0]));
}

#[test_log::test]
fn malformed_tables_are_rejected() {
    assert_eq!(
        DenseDfa::from_rows(vec![vec![0, 1], vec![0, 5]], vec![false, true]),
        Err(MalformedAutomatonError::TargetOutOfRange {
            state: 1,
            symbol: 1,
            target: 5,
            states: 2,
        })
    );
    assert_eq!(
        DenseDfa::new(1, 0, vec![], vec![true]),
        Err(MalformedAutomatonError::NoSymbols)
    );
}
