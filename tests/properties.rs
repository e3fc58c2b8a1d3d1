//! Property tests for the machine invariants.

use proptest::prelude::*;

use ruspal::ast::{BinaryOp, Ident};
use ruspal::cse::{evaluate_captured, Environment, EvalError, Value};
use ruspal::st::StExpr;

fn name(text: &str) -> StExpr {
    StExpr::Ident(Ident::new(text, 1))
}

fn gamma(rator: StExpr, rand: StExpr) -> StExpr {
    StExpr::Gamma(Box::new(rator), Box::new(rand))
}

fn binary(op: BinaryOp, left: StExpr, right: StExpr) -> StExpr {
    StExpr::Binary(op, Box::new(left), Box::new(right))
}

fn lambda(binder: &str, body: StExpr) -> StExpr {
    StExpr::Lambda {
        binders: vec![binder.to_string()],
        body: Box::new(body),
    }
}

/// Reference semantics for the generated arithmetic expressions; `None`
/// means the checked operation overflowed.
fn reference(expr: &StExpr) -> Option<i64> {
    match expr {
        StExpr::Integer(value) => Some(*value),
        StExpr::Binary(op, left, right) => {
            let left = reference(left)?;
            let right = reference(right)?;
            match op {
                BinaryOp::Plus => left.checked_add(right),
                BinaryOp::Minus => left.checked_sub(right),
                BinaryOp::Mult => left.checked_mul(right),
                _ => unreachable!("generator only emits +, -, *"),
            }
        }
        _ => unreachable!("generator only emits integers and binaries"),
    }
}

fn arb_arith() -> impl Strategy<Value = StExpr> {
    let leaf = any::<i32>().prop_map(|value| StExpr::Integer(value as i64));
    leaf.prop_recursive(4, 24, 2, |inner| {
        (
            prop::sample::select(vec![BinaryOp::Plus, BinaryOp::Minus, BinaryOp::Mult]),
            inner.clone(),
            inner,
        )
            .prop_map(|(op, left, right)| binary(op, left, right))
    })
}

proptest! {
    /// Strict arithmetic matches a direct interpretation, and every
    /// successful run leaves exactly one value (enforced inside `run`).
    #[test]
    fn arithmetic_matches_reference(expr in arb_arith()) {
        match (reference(&expr), evaluate_captured(&expr)) {
            (Some(expected), Ok((value, output))) => {
                prop_assert_eq!(value, Value::Integer(expected));
                prop_assert_eq!(output, "");
            }
            (None, Err(EvalError::Arithmetic(_))) => {}
            (expected, got) => {
                prop_assert!(false, "reference {expected:?} vs machine {got:?}");
            }
        }
    }

    /// Applying a tuple to k returns its k-th element, 1-based.
    #[test]
    fn tuple_selection_is_one_based(
        (elements, index) in (1usize..8).prop_flat_map(|n| {
            (prop::collection::vec(any::<i64>(), n..=n), 0..n)
        })
    ) {
        let tau = StExpr::Tau(elements.iter().copied().map(StExpr::Integer).collect());
        let expr = gamma(tau, StExpr::Integer(index as i64 + 1));
        let (value, _) = evaluate_captured(&expr).unwrap();
        prop_assert_eq!(value, Value::Integer(elements[index]));
    }

    /// `Conc (Stem s) (Stern s)` reassembles any non-empty string.
    #[test]
    fn stem_stern_conc_reassembles(text in "[a-zA-Z0-9 ]{1,20}") {
        let stem = gamma(name("Stem"), StExpr::Str(text.clone()));
        let stern = gamma(name("Stern"), StExpr::Str(text.clone()));
        let expr = gamma(gamma(name("Conc"), stem), stern);
        let (value, _) = evaluate_captured(&expr).unwrap();
        prop_assert_eq!(value, Value::Str(text));
    }

    /// `Y* L` is structurally an eta wrapping L.
    #[test]
    fn ystar_produces_an_eta(binder in "[a-z]{1,8}") {
        let inner = lambda(&binder, name(&binder));
        let expr = gamma(StExpr::YStar, inner);
        let (value, _) = evaluate_captured(&expr).unwrap();
        match value {
            Value::Eta(eta) => prop_assert_eq!(eta.lambda.binders, vec![binder]),
            other => prop_assert!(false, "expected eta, got {other:?}"),
        }
    }

    /// Applying `Y* L` equals applying `L (Y* L)`: one manual unrolling
    /// of the fixed point.
    #[test]
    fn ystar_unrolls_like_its_definition(input in 0i64..9) {
        // fn f . fn n . n eq 0 -> 1 | n * f (n - 1)
        let fact = || {
            lambda(
                "f",
                lambda(
                    "n",
                    StExpr::Cond(
                        Box::new(binary(BinaryOp::Eq, name("n"), StExpr::Integer(0))),
                        Box::new(StExpr::Integer(1)),
                        Box::new(binary(
                            BinaryOp::Mult,
                            name("n"),
                            gamma(name("f"), binary(BinaryOp::Minus, name("n"), StExpr::Integer(1))),
                        )),
                    ),
                ),
            )
        };

        let fixed = gamma(StExpr::YStar, fact());
        let direct = gamma(fixed.clone(), StExpr::Integer(input));
        let unrolled = gamma(gamma(fact(), fixed), StExpr::Integer(input));

        let (a, _) = evaluate_captured(&direct).unwrap();
        let (b, _) = evaluate_captured(&unrolled).unwrap();
        prop_assert_eq!(a, b);
    }

    /// Two lookups of the same name yield equal but independent values.
    #[test]
    fn lookup_copies_are_independent(values in prop::collection::vec(any::<i64>(), 0..6)) {
        let mut env = Environment::new();
        let tuple = Value::Tuple(values.iter().copied().map(Value::Integer).collect());
        env.bind("t", tuple.clone());

        let mut first = env.lookup("t").unwrap();
        if let Value::Tuple(elements) = &mut first {
            elements.push(Value::Dummy);
        }

        prop_assert_eq!(env.lookup("t").unwrap(), tuple);
    }
}
