//! Standardization: rewrite the surface AST into the standardized tree.
//!
//! Every sugar form is eliminated by the classic RPAL rewrites:
//!
//! - `let (X = E) in P`   becomes `(lambda X. P) E`
//! - `P where (X = E)`    becomes `(lambda X. P) E`
//! - `fn V1 … Vn . E`     becomes `lambda V1. … lambda Vn. E`
//! - `P V1 … Vn = E`      becomes `P = lambda V1. … lambda Vn. E`
//! - `D1 within (X = E)`  becomes `X = (lambda X1. E) E1`
//! - `X1 = E1 and … and Xn = En` becomes `(X1,…,Xn) = (E1,…,En)`
//! - `rec (X = E)`        becomes `X = Y* (lambda X. E)`
//! - `E1 @ N E2`          becomes `(N E1) E2`

use log::debug;
use thiserror::Error;

use crate::ast::{BinaryOp, Def, Expr, Param};
use crate::st::StExpr;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StandardizeError {
    #[error("line {line}: 'rec' must bind a single name")]
    RecBindsTuple { line: usize },
    #[error("line {line}: each member of 'and' must bind a single name")]
    SimultaneousBindsTuple { line: usize },
}

/// The placeholder binder produced by the empty parameter marker `()`.
/// No identifier can lex to this, so the binding is unreachable.
pub const EMPTY_BINDER: &str = "()";

/// Rewrite a surface expression into standardized form.
pub fn standardize(expr: Expr) -> Result<StExpr, StandardizeError> {
    match expr {
        Expr::Let(def, body) => {
            debug!("standardizing 'let'");
            let (binders, value) = standardize_def(*def)?;
            let body = standardize(*body)?;
            Ok(apply(lambda(binders, body), value))
        }
        Expr::Where(body, def) => {
            debug!("standardizing 'where'");
            let (binders, value) = standardize_def(*def)?;
            let body = standardize(*body)?;
            Ok(apply(lambda(binders, body), value))
        }
        Expr::Fn(params, body) => {
            let body = standardize(*body)?;
            Ok(lambda_chain(params, body))
        }
        Expr::At(left, name, right) => {
            let left = standardize(*left)?;
            let right = standardize(*right)?;
            Ok(apply(apply(StExpr::Ident(name), left), right))
        }
        Expr::Tau(elements) => {
            let elements = elements
                .into_iter()
                .map(standardize)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(StExpr::Tau(elements))
        }
        Expr::Aug(left, right) => {
            let left = standardize(*left)?;
            let right = standardize(*right)?;
            Ok(StExpr::Binary(BinaryOp::Aug, Box::new(left), Box::new(right)))
        }
        Expr::Cond(cond, then, other) => Ok(StExpr::Cond(
            Box::new(standardize(*cond)?),
            Box::new(standardize(*then)?),
            Box::new(standardize(*other)?),
        )),
        Expr::Binary(op, left, right) => Ok(StExpr::Binary(
            op,
            Box::new(standardize(*left)?),
            Box::new(standardize(*right)?),
        )),
        Expr::Unary(op, operand) => Ok(StExpr::Unary(op, Box::new(standardize(*operand)?))),
        Expr::Gamma(rator, rand) => Ok(apply(standardize(*rator)?, standardize(*rand)?)),
        Expr::Ident(ident) => Ok(StExpr::Ident(ident)),
        Expr::Integer(value) => Ok(StExpr::Integer(value)),
        Expr::Str(value) => Ok(StExpr::Str(value)),
        Expr::Truth(value) => Ok(StExpr::Truth(value)),
        Expr::Nil => Ok(StExpr::Nil),
        Expr::Dummy => Ok(StExpr::Dummy),
    }
}

/// Standardize a definition into the binder list and the expression whose
/// value(s) it binds.
fn standardize_def(def: Def) -> Result<(Vec<String>, StExpr), StandardizeError> {
    match def {
        Def::Equal(names, value) => {
            let binders = names.iter().map(|n| n.name.clone()).collect();
            Ok((binders, standardize(*value)?))
        }
        Def::FcnForm(name, params, body) => {
            debug!("standardizing function form '{}'", name.name);
            let body = standardize(*body)?;
            Ok((vec![name.name], lambda_chain(params, body)))
        }
        Def::Within(outer, inner) => {
            debug!("standardizing 'within'");
            let (outer_binders, outer_value) = standardize_def(*outer)?;
            let (inner_binders, inner_value) = standardize_def(*inner)?;
            Ok((
                inner_binders,
                apply(lambda(outer_binders, inner_value), outer_value),
            ))
        }
        Def::Simultaneous(defs) => {
            debug!("standardizing 'and' of {} definitions", defs.len());
            let mut binders = Vec::new();
            let mut values = Vec::new();
            for def in defs {
                let line = first_line(&def);
                let (names, value) = standardize_def(def)?;
                match names.as_slice() {
                    [name] => binders.push(name.clone()),
                    _ => return Err(StandardizeError::SimultaneousBindsTuple { line }),
                }
                values.push(value);
            }
            Ok((binders, StExpr::Tau(values)))
        }
        Def::Rec(def) => {
            let line = first_line(&def);
            let (binders, value) = standardize_def(*def)?;
            let [name] = binders.as_slice() else {
                return Err(StandardizeError::RecBindsTuple { line });
            };
            debug!("standardizing 'rec {}' via Y*", name);
            let fixed = apply(StExpr::YStar, lambda(binders.clone(), value));
            Ok((binders, fixed))
        }
    }
}

/// Line of the first name a definition binds, for diagnostics.
fn first_line(def: &Def) -> usize {
    match def {
        Def::Within(outer, _) => first_line(outer),
        Def::Simultaneous(defs) => defs.first().map_or(0, first_line),
        Def::Rec(def) => first_line(def),
        Def::Equal(names, _) => names.first().map_or(0, |n| n.line),
        Def::FcnForm(name, _, _) => name.line,
    }
}

fn apply(rator: StExpr, rand: StExpr) -> StExpr {
    StExpr::Gamma(Box::new(rator), Box::new(rand))
}

fn lambda(binders: Vec<String>, body: StExpr) -> StExpr {
    StExpr::Lambda {
        binders,
        body: Box::new(body),
    }
}

/// `fn V1 … Vn . E` and function forms: one lambda per binder, innermost
/// last.
fn lambda_chain(params: Vec<Param>, body: StExpr) -> StExpr {
    params
        .into_iter()
        .rev()
        .fold(body, |acc, param| lambda(binder_names(param), acc))
}

fn binder_names(param: Param) -> Vec<String> {
    match param {
        Param::Single(ident) => vec![ident.name],
        Param::Comma(idents) => idents.into_iter().map(|i| i.name).collect(),
        Param::Empty => vec![EMPTY_BINDER.to_string()],
    }
}
