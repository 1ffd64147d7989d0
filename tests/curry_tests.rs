#![cfg(feature = "curry")]
//! Integration tests for the Curry Engine.
//!
//! Tests cover:
//! - Arity threshold for every way of splitting the arguments
//! - Independence of branches derived from one link
//! - Excess arguments and empty applications
//! - Failure propagation from the target

use curry_memo::curry;
use curry_memo::curry::{Application, Curried};
use rstest::rstest;
use std::cell::RefCell;
use std::panic::{AssertUnwindSafe, catch_unwind};

fn sum(arguments: Vec<i32>) -> i32 {
    arguments.iter().sum()
}

fn partial<A: Clone, F, R>(application: Application<Curried<A, F>, R>) -> Curried<A, F> {
    application
        .into_partial()
        .expect("chain should still be accumulating")
}

// =============================================================================
// Arity Threshold
// =============================================================================

#[rstest]
fn one_argument_per_call() {
    let curried = curry(3, sum);
    let result = partial(partial(curried.apply([1])).apply([2])).apply([3]);
    assert_eq!(result.into_complete(), Some(6));
}

#[rstest]
fn all_arguments_in_one_call() {
    let curried = curry(3, sum);
    assert_eq!(curried.apply([1, 2, 3]).into_complete(), Some(6));
}

#[rstest]
#[case(vec![1, 2], vec![3])]
#[case(vec![1], vec![2, 3])]
fn two_calls_any_split(#[case] first: Vec<i32>, #[case] second: Vec<i32>) {
    let curried = curry(3, sum);
    let link = partial(curried.apply(first));
    assert_eq!(link.apply(second).into_complete(), Some(6));
}

#[rstest]
fn excess_arguments_are_all_passed() {
    let seen = RefCell::new(Vec::new());
    let curried = curry(3, |arguments: Vec<i32>| {
        seen.borrow_mut().push(arguments.clone());
        arguments.len()
    });

    let link = partial(curried.apply([1, 2]));
    assert_eq!(link.apply([3, 4]).into_complete(), Some(4));
    assert_eq!(*seen.borrow(), vec![vec![1, 2, 3, 4]]);
}

#[rstest]
fn remaining_counts_down() {
    let curried = curry(4, sum);
    assert_eq!(curried.remaining(), 4);

    let link = partial(curried.apply([1, 2]));
    assert_eq!(link.remaining(), 2);
    assert_eq!(link.arity(), 4);
}

// =============================================================================
// Independence
// =============================================================================

#[rstest]
fn branches_do_not_share_state() {
    let calls = RefCell::new(Vec::new());
    let curried = curry(2, |arguments: Vec<i32>| {
        calls.borrow_mut().push(arguments.clone());
        arguments[0] * 10 + arguments[1]
    });
    let one = partial(curried.apply([1]));

    for _ in 0..2 {
        assert_eq!(one.apply([2]).into_complete(), Some(12));
        assert_eq!(one.apply([3]).into_complete(), Some(13));
    }

    assert_eq!(one.accumulated(), &[1]);
    assert_eq!(
        *calls.borrow(),
        vec![vec![1, 2], vec![1, 3], vec![1, 2], vec![1, 3]]
    );
}

#[rstest]
fn incrementers_from_one_root_are_independent() {
    let curried = curry(3, sum);

    let increment = partial(curried.apply([1]));
    let increment_two = partial(increment.apply([2]));
    let increment_three = partial(increment.apply([3]));

    assert_eq!(increment.apply([4, 5]).into_complete(), Some(10));
    assert_eq!(increment_two.apply([6]).into_complete(), Some(9));
    assert_eq!(increment_three.apply([4]).into_complete(), Some(8));

    let second = partial(curried.apply([1]));
    assert_eq!(second.apply([5, 6]).into_complete(), Some(12));
    assert_eq!(increment_two.apply([4]).into_complete(), Some(7));
    assert_eq!(increment_three.apply([2]).into_complete(), Some(6));
}

#[rstest]
fn separate_curry_calls_are_separate_chains() {
    let first = curry(2, sum);
    let second = curry(2, sum);

    let from_first = partial(first.apply([1]));
    assert!(second.accumulated().is_empty());
    assert!(!from_first.ptr_eq(&first));
    assert!(!first.ptr_eq(&second));
}

#[rstest]
fn clone_shares_the_link() {
    let curried = curry(2, sum);
    let link = partial(curried.apply([5]));
    let cloned = link.clone();

    assert!(cloned.ptr_eq(&link));
    assert_eq!(cloned.apply([1]).into_complete(), Some(6));
}

// =============================================================================
// Empty Applications
// =============================================================================

#[rstest]
fn empty_application_is_a_no_op() {
    let calls = RefCell::new(0);
    let curried = curry(2, |arguments: Vec<i32>| {
        *calls.borrow_mut() += 1;
        arguments.len()
    });
    let link = partial(curried.apply([7]));

    let same = partial(link.apply(std::iter::empty()));
    assert!(same.ptr_eq(&link));
    assert_eq!(same.accumulated(), &[7]);
    assert_eq!(*calls.borrow(), 0);
}

#[rstest]
fn empty_application_on_root_returns_root() {
    let curried = curry(3, sum);
    let same = partial(curried.apply(Vec::new()));
    assert!(same.ptr_eq(&curried));
}

// =============================================================================
// Failure Propagation
// =============================================================================

#[rstest]
fn target_errors_pass_through() {
    let curried = curry(2, |arguments: Vec<i32>| {
        arguments[0]
            .checked_div(arguments[1])
            .ok_or("division by zero")
    });

    assert_eq!(curried.apply([8, 0]).into_complete(), Some(Err("division by zero")));
    assert_eq!(curried.apply([8, 2]).into_complete(), Some(Ok(4)));
}

#[rstest]
fn target_panics_propagate_and_leave_link_usable() {
    let curried = curry(2, |arguments: Vec<i32>| {
        assert!(arguments[1] != 0, "second argument must be non-zero");
        arguments[0] / arguments[1]
    });
    let eight = partial(curried.apply([8]));

    let failed = catch_unwind(AssertUnwindSafe(|| eight.apply([0])));
    assert!(failed.is_err());
    assert_eq!(eight.apply([4]).into_complete(), Some(2));
}

// =============================================================================
// Heterogeneous Arguments
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
enum Operand {
    Number(i32),
    Text(&'static str),
}

#[rstest]
fn enum_arguments_support_mixed_types() {
    let curried = curry(2, |arguments: Vec<Operand>| match (&arguments[0], &arguments[1]) {
        (Operand::Text(name), Operand::Number(value)) => format!("{name}={value}"),
        _ => String::from("unsupported"),
    });

    let named = partial(curried.apply([Operand::Text("a")]));
    assert_eq!(
        named.apply([Operand::Number(5)]).into_complete(),
        Some("a=5".to_string())
    );
}

#[rstest]
fn debug_output_lists_accumulated_arguments() {
    let curried = curry(3, |arguments: Vec<Operand>| arguments.len());
    let link = partial(curried.apply([Operand::Text("x")]));
    assert_eq!(
        format!("{link:?}"),
        r#"Curried { arity: 3, accumulated: [Text("x")], .. }"#
    );
}
