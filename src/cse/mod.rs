//! The CSE (Control-Stack-Environment) machine.
//!
//! The standardized tree is first flattened by the delta compiler into
//! control sequences ([`compile`]), then reduced by the evaluator
//! ([`Machine`]) against a chain of immutable environment frames.

mod builtins;
mod compile;
mod env;
mod error;
mod machine;
mod value;

pub use compile::{compile, Body, ControlItem, Program};
pub use env::Environment;
pub use error::EvalError;
pub use machine::Machine;
pub use value::{Builtin, Eta, Lambda, Value};

use crate::st::StExpr;

/// Evaluate a standardized tree, writing `Print` output to stdout.
pub fn evaluate(expr: &StExpr) -> Result<Value, EvalError> {
    let program = compile(expr);
    let mut machine = Machine::new(program, std::io::stdout());
    machine.run()
}

/// Evaluate a standardized tree, capturing `Print` output.
pub fn evaluate_captured(expr: &StExpr) -> Result<(Value, String), EvalError> {
    let program = compile(expr);
    let mut machine = Machine::new(program, Vec::new());
    let value = machine.run()?;
    let output = String::from_utf8_lossy(&machine.into_output()).into_owned();
    Ok((value, output))
}
