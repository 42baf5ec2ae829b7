//! End-to-end tests driving the public API the same way the CLI does: parse a
//! matrix-format instance, run the parallel engine over it at a couple of
//! thread counts, and check the solution count each of the worked scenarios
//! calls for.

use std::io::Cursor;

use xcover::{parse, solve_parallel, NullReporter, SearchConfig, SingleProcessTopology};

fn solutions_at(src: &str, nb_threads: usize, config: SearchConfig) -> u64 {
    let instance = parse(Cursor::new(src)).expect("instance should parse");
    let outcome = solve_parallel(&instance, &config, &NullReporter, &SingleProcessTopology, nb_threads);
    outcome.solutions
}

#[test]
fn s1_trivial_single_solution() {
    let src = "3 3\nA B C\nA\nB\nC\n";
    for threads in [1, 2, 4] {
        assert_eq!(solutions_at(src, threads, SearchConfig::default()), 1);
    }
}

#[test]
fn s2_empty_cover_one_option() {
    let src = "1 1\nA\nA\n";
    for threads in [1, 4] {
        assert_eq!(solutions_at(src, threads, SearchConfig::default()), 1);
    }
}

#[test]
fn s3_no_solution_when_an_item_is_never_covered() {
    let src = "2 2\nA B\nA\n";
    for threads in [1, 4] {
        assert_eq!(solutions_at(src, threads, SearchConfig::default()), 0);
    }
}

#[test]
fn s4_exactly_one_partition_among_four_options() {
    // {A,B}, {A,C}, {B,C}, {A}: only {B,C} + {A} partitions {A,B,C} exactly.
    let src = "3 4\nA B C\nA B\nA C\nB C\nA\n";
    for threads in [1, 2, 4] {
        assert_eq!(solutions_at(src, threads, SearchConfig::default()), 1);
    }
}

#[test]
fn s5_secondary_items_allow_three_solutions() {
    let src = "3 3\nA | B C\nA B\nA C\nA B C\n";
    for threads in [1, 2, 4] {
        assert_eq!(solutions_at(src, threads, SearchConfig::default()), 3);
    }
}

#[test]
fn s6_stop_after_one_caps_the_local_count() {
    let src = "3 3\nA | B C\nA B\nA C\nA B C\n";
    let config = SearchConfig { max_solutions: 1, ..SearchConfig::default() };
    let solutions = solutions_at(src, 1, config);
    assert!(solutions >= 1 && solutions <= 3);
}

#[test]
fn count_is_invariant_across_thread_counts() {
    let src = "4 4\nW X Y Z\nW X\nW Y\nX Z\nY Z\nW X Y Z\n";
    let counts: Vec<u64> = [1usize, 2, 3, 8]
        .iter()
        .map(|&t| solutions_at(src, t, SearchConfig::default()))
        .collect();
    assert!(counts.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn rejects_malformed_input_with_a_readable_error() {
    let err = parse(Cursor::new("2 1\nA A\nA\n")).unwrap_err();
    assert!(err.to_string().contains("duplicate"));
}
