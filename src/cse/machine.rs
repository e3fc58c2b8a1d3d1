//! The evaluator: pops control items and applies the reduction rules.

use std::io::Write;
use std::rc::Rc;

use log::trace;

use crate::ast::{BinaryOp, UnaryOp};

use super::compile::{Body, ControlItem, Program};
use super::env::Environment;
use super::error::EvalError;
use super::value::{Builtin, Eta, Lambda, Value};

/// The machine owns the compiled lambda bodies, the value stack (shared
/// across nested activations), and the sink `Print` writes to.
pub struct Machine<W> {
    root: Body,
    bodies: Vec<Body>,
    pub(crate) stack: Vec<Value>,
    pub(crate) out: W,
}

impl<W: Write> Machine<W> {
    pub fn new(program: Program, out: W) -> Self {
        Machine {
            root: program.root,
            bodies: program.bodies,
            stack: Vec::new(),
            out,
        }
    }

    /// Run the program to completion. A terminating, well-formed program
    /// leaves exactly one value on the stack; that value is returned.
    pub fn run(&mut self) -> Result<Value, EvalError> {
        let root = self.root.clone();
        let env = Rc::new(Environment::new());
        self.exec_body(&root, env)?;

        let value = self
            .stack
            .pop()
            .ok_or_else(|| EvalError::Internal("value stack empty after evaluation".into()))?;
        if !self.stack.is_empty() {
            return Err(EvalError::Internal(format!(
                "{} extra values left on the stack",
                self.stack.len()
            )));
        }
        Ok(value)
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// One activation: copy the body onto a fresh control stack and pop
    /// until it is exhausted. The value stack and the current environment
    /// persist across the loop; gamma on a lambda recurses in here with
    /// the callee's body and a child environment.
    fn exec_body(&mut self, body: &[ControlItem], env: Rc<Environment>) -> Result<(), EvalError> {
        let mut control: Vec<ControlItem> = body.iter().rev().cloned().collect();
        while let Some(item) = control.pop() {
            self.step(item, &mut control, &env)?;
        }
        Ok(())
    }

    fn step(
        &mut self,
        item: ControlItem,
        control: &mut Vec<ControlItem>,
        env: &Rc<Environment>,
    ) -> Result<(), EvalError> {
        trace!("step: {item:?}");
        match item {
            ControlItem::Literal(value) => self.stack.push(value),

            // Rule 1: environment first, then the reserved identifiers.
            ControlItem::Name { name, line } => match env.lookup(&name) {
                Some(value) => self.stack.push(value),
                None => match Builtin::from_name(&name) {
                    Some(builtin) => self.stack.push(Value::Builtin(builtin)),
                    None => return Err(EvalError::UndeclaredIdentifier { name, line }),
                },
            },

            // Rule 2: the environment is captured here, by reference.
            ControlItem::LambdaForm { binders, index } => {
                self.stack.push(Value::Lambda(Lambda {
                    binders,
                    index,
                    env: Rc::clone(env),
                }));
            }

            // Rule 3 and friends.
            ControlItem::Gamma => self.apply_gamma(control)?,

            // Rule 8: splice the chosen branch so its first element is
            // the next item popped.
            ControlItem::Beta {
                then_body,
                else_body,
            } => {
                let cond = self.pop()?;
                let Value::Truth(cond) = cond else {
                    return Err(EvalError::Type(format!(
                        "expecting a truthvalue, found '{cond}'"
                    )));
                };
                let chosen = if cond { then_body } else { else_body };
                control.extend(chosen.into_iter().rev());
            }

            // Rule 9: the first element of the tuple is the deepest of
            // the popped values.
            ControlItem::TupleFormer(arity) => {
                let mut elements = Vec::with_capacity(arity);
                for _ in 0..arity {
                    elements.push(self.pop()?);
                }
                elements.reverse();
                self.stack.push(Value::Tuple(elements));
            }

            // Rule 6.
            ControlItem::Binary(op) => self.apply_binary(op)?,

            // Rule 7.
            ControlItem::Unary(op) => self.apply_unary(op)?,
        }
        Ok(())
    }

    /// Rule 3: application. The rator sits on top of the value stack with
    /// the rand below it.
    fn apply_gamma(&mut self, control: &mut Vec<ControlItem>) -> Result<(), EvalError> {
        let rator = self.pop()?;
        let rand = self.pop()?;

        match rator {
            Value::Lambda(lambda) => self.apply_lambda(lambda, rand),

            // Rule 12: Y* accepts only a lambda and wraps it in a
            // recursion closure.
            Value::YStar => match rand {
                Value::Lambda(lambda) => {
                    self.stack.push(Value::Eta(Eta { lambda }));
                    Ok(())
                }
                other => Err(EvalError::Application(format!(
                    "Y* expects a lambda, was given '{other}'"
                ))),
            },

            // Rule 13: unroll one recursion step by applying the inner
            // lambda to the rand in a context where the eta stands for
            // the function itself. Top-down the value stack reads
            // lambda, eta, rand; the two gammas consume lambda+eta and
            // then (lambda eta)+rand.
            Value::Eta(eta) => {
                let lambda = eta.lambda.clone();
                self.stack.push(rand);
                self.stack.push(Value::Eta(eta));
                self.stack.push(Value::Lambda(lambda));
                control.push(ControlItem::Gamma);
                control.push(ControlItem::Gamma);
                Ok(())
            }

            Value::Tuple(elements) => self.select_tuple(&elements, rand),

            Value::Builtin(builtin) => self.apply_builtin(builtin, rand, control),

            other => Err(EvalError::Application(format!(
                "cannot apply '{other}', which is not a function"
            ))),
        }
    }

    /// Rules 4 and 11: bind the single variable to the rand, or
    /// distribute a tuple rand over the binder list, then run the body
    /// against the fresh frame.
    fn apply_lambda(&mut self, lambda: Lambda, rand: Value) -> Result<(), EvalError> {
        let mut env = Environment::child(Rc::clone(&lambda.env));

        match lambda.binders.as_slice() {
            [] => {
                return Err(EvalError::Internal(
                    "lambda closure with no bound variables".into(),
                ));
            }
            [single] => env.bind(single.clone(), rand),
            binders => {
                let Value::Tuple(elements) = rand else {
                    return Err(EvalError::Arity(format!(
                        "expected a tuple for {} bound variables, was given '{rand}'",
                        binders.len()
                    )));
                };
                if elements.len() != binders.len() {
                    return Err(EvalError::Arity(format!(
                        "expected a tuple of {} elements, was given one of {}",
                        binders.len(),
                        elements.len()
                    )));
                }
                for (binder, element) in binders.iter().zip(elements) {
                    env.bind(binder.clone(), element);
                }
            }
        }

        let body = self
            .bodies
            .get(lambda.index)
            .ok_or_else(|| EvalError::Internal(format!("no body for delta {}", lambda.index)))?
            .clone();
        self.exec_body(&body, Rc::new(env))
    }

    /// Rule 10: tuple selection, 1-based.
    fn select_tuple(&mut self, elements: &[Value], rand: Value) -> Result<(), EvalError> {
        let Value::Integer(index) = rand else {
            return Err(EvalError::Type(format!(
                "non-integer tuple selection with '{rand}'"
            )));
        };
        if index < 1 || index as usize > elements.len() {
            return Err(EvalError::Arity(format!(
                "tuple selection index {index} out of bounds for arity {}",
                elements.len()
            )));
        }
        self.stack.push(elements[index as usize - 1].clone());
        Ok(())
    }

    /// Rule 6. The left operand is popped first.
    fn apply_binary(&mut self, op: BinaryOp) -> Result<(), EvalError> {
        let left = self.pop()?;
        let right = self.pop()?;

        match op {
            BinaryOp::Plus
            | BinaryOp::Minus
            | BinaryOp::Mult
            | BinaryOp::Div
            | BinaryOp::Exp
            | BinaryOp::Ls
            | BinaryOp::Le
            | BinaryOp::Gr
            | BinaryOp::Ge => {
                let (Value::Integer(a), Value::Integer(b)) = (&left, &right) else {
                    return Err(EvalError::Type(format!(
                        "expected two integers for '{op}', was given '{left}', '{right}'"
                    )));
                };
                let result = match op {
                    BinaryOp::Plus => Value::Integer(checked(a.checked_add(*b))?),
                    BinaryOp::Minus => Value::Integer(checked(a.checked_sub(*b))?),
                    BinaryOp::Mult => Value::Integer(checked(a.checked_mul(*b))?),
                    BinaryOp::Div => {
                        if *b == 0 {
                            return Err(EvalError::Arithmetic("division by zero".into()));
                        }
                        Value::Integer(checked(a.checked_div(*b))?)
                    }
                    BinaryOp::Exp => Value::Integer(int_pow(*a, *b)?),
                    BinaryOp::Ls => Value::Truth(a < b),
                    BinaryOp::Le => Value::Truth(a <= b),
                    BinaryOp::Gr => Value::Truth(a > b),
                    BinaryOp::Ge => Value::Truth(a >= b),
                    _ => unreachable!(),
                };
                self.stack.push(result);
                Ok(())
            }

            // Truthvalues compare by variant; otherwise both operands
            // must be of the same scalar kind.
            BinaryOp::Eq | BinaryOp::Ne => {
                let equal = match (&left, &right) {
                    (Value::Truth(a), Value::Truth(b)) => a == b,
                    (Value::Integer(a), Value::Integer(b)) => a == b,
                    (Value::Str(a), Value::Str(b)) => a == b,
                    _ => {
                        return Err(EvalError::Type(format!(
                            "cannot compare '{left}' and '{right}' with '{op}'"
                        )));
                    }
                };
                let result = if op == BinaryOp::Eq { equal } else { !equal };
                self.stack.push(Value::Truth(result));
                Ok(())
            }

            // Strict, no short-circuiting: both operands were already
            // evaluated by the time the marker is popped.
            BinaryOp::Or | BinaryOp::And => {
                let (Value::Truth(a), Value::Truth(b)) = (&left, &right) else {
                    return Err(EvalError::Type(format!(
                        "expected two truthvalues for '{op}', was given '{left}', '{right}'"
                    )));
                };
                let result = if op == BinaryOp::Or { *a || *b } else { *a && *b };
                self.stack.push(Value::Truth(result));
                Ok(())
            }

            // Augment appends one element, never splats.
            BinaryOp::Aug => {
                let Value::Tuple(mut elements) = left else {
                    return Err(EvalError::Type(format!(
                        "cannot augment a non-tuple '{left}'"
                    )));
                };
                elements.push(right);
                self.stack.push(Value::Tuple(elements));
                Ok(())
            }
        }
    }

    /// Rule 7.
    fn apply_unary(&mut self, op: UnaryOp) -> Result<(), EvalError> {
        let operand = self.pop()?;
        let result = match (op, operand) {
            (UnaryOp::Not, Value::Truth(value)) => Value::Truth(!value),
            (UnaryOp::Not, other) => {
                return Err(EvalError::Type(format!(
                    "expecting a truthvalue for 'not', was given '{other}'"
                )));
            }
            (UnaryOp::Neg, Value::Integer(value)) => Value::Integer(checked(value.checked_neg())?),
            (UnaryOp::Neg, other) => {
                return Err(EvalError::Type(format!(
                    "expecting an integer for 'neg', was given '{other}'"
                )));
            }
        };
        self.stack.push(result);
        Ok(())
    }

    pub(crate) fn pop(&mut self) -> Result<Value, EvalError> {
        self.stack
            .pop()
            .ok_or_else(|| EvalError::Internal("value stack underflow".into()))
    }
}

fn checked(value: Option<i64>) -> Result<i64, EvalError> {
    value.ok_or_else(|| EvalError::Arithmetic("integer overflow".into()))
}

/// Integer exponentiation. Negative exponents truncate toward zero the
/// way the usual float-then-cast implementations do: only bases 1 and -1
/// survive, everything else collapses to 0.
fn int_pow(base: i64, exp: i64) -> Result<i64, EvalError> {
    if exp < 0 {
        return Ok(match base {
            1 => 1,
            -1 => {
                if exp % 2 == 0 {
                    1
                } else {
                    -1
                }
            }
            _ => 0,
        });
    }
    let exp = u32::try_from(exp)
        .map_err(|_| EvalError::Arithmetic(format!("exponent {exp} too large")))?;
    checked(base.checked_pow(exp))
}
