//! The reserved built-in functions, dispatched from Rule 3 when the rator
//! is an unapplied reserved identifier.

use std::io::Write;

use super::compile::ControlItem;
use super::error::EvalError;
use super::machine::Machine;
use super::value::{Builtin, Value};

impl<W: Write> Machine<W> {
    pub(crate) fn apply_builtin(
        &mut self,
        builtin: Builtin,
        rand: Value,
        control: &mut Vec<ControlItem>,
    ) -> Result<(), EvalError> {
        match builtin {
            Builtin::Isinteger => self.push_truth(matches!(rand, Value::Integer(_))),
            Builtin::Isstring => self.push_truth(matches!(rand, Value::Str(_))),
            Builtin::Istuple => self.push_truth(matches!(rand, Value::Tuple(_))),
            Builtin::Isdummy => self.push_truth(matches!(rand, Value::Dummy)),
            Builtin::Istruthvalue => self.push_truth(matches!(rand, Value::Truth(_))),
            Builtin::Isfunction => self.push_truth(matches!(
                rand,
                Value::Lambda(_) | Value::Eta(_) | Value::Builtin(_)
            )),

            Builtin::Stem => {
                let value = expect_string("Stem", &rand)?;
                let stem: String = value.chars().take(1).collect();
                self.stack.push(Value::Str(stem));
            }

            Builtin::Stern => {
                let value = expect_string("Stern", &rand)?;
                let stern: String = value.chars().skip(1).collect();
                self.stack.push(Value::Str(stern));
            }

            // Conc is curried: the first application only collects the
            // first operand, so the marker of the second application is
            // consumed here along with the second operand.
            Builtin::Conc => {
                match control.pop() {
                    Some(ControlItem::Gamma) => {}
                    _ => {
                        return Err(EvalError::Application(
                            "'Conc' applied to a single argument".into(),
                        ));
                    }
                }
                let first = expect_string("Conc", &rand)?.to_string();
                let second = self.pop()?;
                let second = expect_string("Conc", &second)?;
                self.stack.push(Value::Str(first + second));
            }

            Builtin::ItoS => match rand {
                Value::Integer(value) => self.stack.push(Value::Str(value.to_string())),
                other => {
                    return Err(EvalError::Type(format!(
                        "'ItoS' expected an integer, was given '{other}'"
                    )));
                }
            },

            Builtin::Order => {
                let elements = expect_tuple("Order", &rand)?;
                self.stack.push(Value::Integer(elements.len() as i64));
            }

            Builtin::Null => {
                let elements = expect_tuple("Null", &rand)?;
                self.push_truth(elements.is_empty());
            }

            Builtin::Print => {
                let rendered = expand_escapes(&rand.to_string());
                write!(self.out, "{rendered}")?;
                self.stack.push(Value::Dummy);
            }

            // Reserved so the name resolves, but not applicable: `neg`
            // the operator is produced by the grammar, not by lookup.
            Builtin::Neg => {
                return Err(EvalError::Application(format!(
                    "cannot apply 'neg' to '{rand}'"
                )));
            }
        }
        Ok(())
    }

    fn push_truth(&mut self, value: bool) {
        self.stack.push(Value::Truth(value));
    }
}

fn expect_string<'a>(name: &str, value: &'a Value) -> Result<&'a str, EvalError> {
    match value {
        Value::Str(s) => Ok(s),
        other => Err(EvalError::Type(format!(
            "'{name}' expected a string, was given '{other}'"
        ))),
    }
}

fn expect_tuple<'a>(name: &str, value: &'a Value) -> Result<&'a [Value], EvalError> {
    match value {
        Value::Tuple(elements) => Ok(elements),
        other => Err(EvalError::Type(format!(
            "'{name}' expected a tuple, was given '{other}'"
        ))),
    }
}

/// Expand the `\n` and `\t` escape sequences over fully rendered text.
/// This is the only place escapes are interpreted.
fn expand_escapes(text: &str) -> String {
    text.replace("\\t", "\t").replace("\\n", "\n")
}
