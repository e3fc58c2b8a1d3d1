//! End-to-end tests: RPAL source in, `Print` output out.

use ruspal::cse::evaluate_captured;
use ruspal::lexer::tokenize;
use ruspal::parser::{parse, ParseState};
use ruspal::standardize::standardize;

/// Run a program and return everything it printed.
fn run_program(input: &str) -> String {
    let tokens = tokenize(input).expect("lexing failed");
    let mut state = ParseState::new(tokens);
    let program = parse(&mut state).expect("parsing failed");
    let standardized = standardize(program).expect("standardization failed");
    let (_, output) = evaluate_captured(&standardized).expect("evaluation failed");
    output
}

#[test]
fn e2e_print_addition() {
    assert_eq!(run_program("Print (2 + 3)"), "5");
}

#[test]
fn e2e_tuple_sum_with_multi_binding() {
    let program = "let Sum(A) = let rec S(T,N) = N eq 0 -> T | S(T+A(N), N-1) \
                   in S(0, Order A) in Print(Sum(1,2,3,4,5))";
    assert_eq!(run_program(program), "15");
}

#[test]
fn e2e_factorial_via_ystar() {
    let program = "let rec F N = N eq 0 -> 1 | N * F(N-1) in Print(F 5)";
    assert_eq!(run_program(program), "120");
}

#[test]
fn e2e_string_concatenation() {
    assert_eq!(run_program("Print (Conc 'hello' ' world')"), "hello world");
}

#[test]
fn e2e_tuple_selection() {
    assert_eq!(run_program("let T = 1, 2, 3 in Print (T 2)"), "2");
}

#[test]
fn e2e_conditional_on_strings() {
    assert_eq!(run_program("Print ('a' eq 'a' -> 'yes' | 'no')"), "yes");
}

#[test]
fn e2e_fibonacci() {
    let program = "let rec Fib n = n le 1 -> n | Fib(n-1) + Fib(n-2) in Print (Fib 10)";
    assert_eq!(run_program(program), "55");
}

#[test]
fn e2e_within_definition() {
    assert_eq!(
        run_program("let x = 3 within sq = x * x in Print sq"),
        "9"
    );
}

#[test]
fn e2e_simultaneous_definitions() {
    assert_eq!(
        run_program("let x = 1 and y = 2 and z = 3 in Print (x + y + z)"),
        "6"
    );
}

#[test]
fn e2e_at_infix_application() {
    assert_eq!(
        run_program("let Add x y = x + y in Print (2 @ Add 3)"),
        "5"
    );
}

#[test]
fn e2e_recursive_string_building() {
    let program = "let rec Rep s n = n eq 0 -> '' | Conc s (Rep s (n-1)) \
                   in Print (Rep 'ab' 3)";
    assert_eq!(run_program(program), "ababab");
}

#[test]
fn e2e_tuple_walk_by_selection() {
    let program = "let rec Sum t n = n eq 0 -> 0 | t n + Sum t (n-1) \
                   in Print (Sum (1,2,3,4) 4)";
    assert_eq!(run_program(program), "10");
}

#[test]
fn e2e_building_a_tuple_with_aug() {
    let program = "let rec Iota n = n eq 0 -> nil | (Iota (n-1)) aug n in Print (Iota 3)";
    assert_eq!(run_program(program), "(1, 2, 3)");
}

#[test]
fn e2e_nested_tuple_printing() {
    assert_eq!(
        run_program("Print ((1, (2, 3), 'x'), nil)"),
        "((1, (2, 3), x), nil)"
    );
}

#[test]
fn e2e_where_clause() {
    assert_eq!(run_program("Print Sum where Sum = 3 + 4"), "7");
}

#[test]
fn e2e_higher_order_functions() {
    let program = "let Twice f x = f (f x) in let Inc n = n + 1 in Print (Twice Inc 5)";
    assert_eq!(run_program(program), "7");
}

#[test]
fn e2e_multiple_prints_in_order() {
    let program = "let t = (Print 1, Print 2) in Print 3";
    assert_eq!(run_program(program), "123");
}
