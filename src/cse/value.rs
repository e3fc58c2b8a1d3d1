//! Runtime values.

use std::fmt;
use std::rc::Rc;

use super::env::Environment;

/// A runtime value. `Clone` is the deep copy the environment hands out on
/// lookup: scalars copy by value, tuples copy their children recursively,
/// and closures copy their binder list and body index while sharing the
/// captured environment through the `Rc` (frames are immutable once a
/// closure holds them, so sharing is safe).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    /// Escape sequences stay verbatim; `Print` expands `\n` and `\t`.
    Str(String),
    Truth(bool),
    Dummy,
    /// The empty tuple is `nil`.
    Tuple(Vec<Value>),
    Lambda(Lambda),
    Eta(Eta),
    /// An unapplied reserved identifier.
    Builtin(Builtin),
    /// The fixed-point operator; only ever applied to a lambda.
    YStar,
}

/// A lambda closure: the binder list, the index of its compiled body, and
/// the environment in effect when the lambda was reduced to a value.
#[derive(Debug, Clone, PartialEq)]
pub struct Lambda {
    pub binders: Vec<String>,
    pub index: usize,
    pub env: Rc<Environment>,
}

/// A recursion closure, the result of `Y* lambda`. Each application
/// unrolls one step by re-applying the inner lambda with the eta itself
/// standing in for the recursive name.
#[derive(Debug, Clone, PartialEq)]
pub struct Eta {
    pub lambda: Lambda,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Isinteger,
    Isstring,
    Istuple,
    Isdummy,
    Istruthvalue,
    Isfunction,
    Stem,
    Stern,
    Conc,
    ItoS,
    Order,
    Null,
    Print,
    Neg,
}

impl Builtin {
    /// Resolve a reserved identifier. `Conc`/`conc` and `Print`/`print`
    /// are synonyms; any other casing is an ordinary identifier.
    pub fn from_name(name: &str) -> Option<Builtin> {
        Some(match name {
            "Isinteger" => Builtin::Isinteger,
            "Isstring" => Builtin::Isstring,
            "Istuple" => Builtin::Istuple,
            "Isdummy" => Builtin::Isdummy,
            "Istruthvalue" => Builtin::Istruthvalue,
            "Isfunction" => Builtin::Isfunction,
            "Stem" => Builtin::Stem,
            "Stern" => Builtin::Stern,
            "Conc" | "conc" => Builtin::Conc,
            "ItoS" => Builtin::ItoS,
            "Order" => Builtin::Order,
            "Null" => Builtin::Null,
            "Print" | "print" => Builtin::Print,
            "neg" => Builtin::Neg,
            _ => return None,
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Builtin::Isinteger => "Isinteger",
            Builtin::Isstring => "Isstring",
            Builtin::Istuple => "Istuple",
            Builtin::Isdummy => "Isdummy",
            Builtin::Istruthvalue => "Istruthvalue",
            Builtin::Isfunction => "Isfunction",
            Builtin::Stem => "Stem",
            Builtin::Stern => "Stern",
            Builtin::Conc => "Conc",
            Builtin::ItoS => "ItoS",
            Builtin::Order => "Order",
            Builtin::Null => "Null",
            Builtin::Print => "Print",
            Builtin::Neg => "neg",
        }
    }
}

/// Canonical printed form. Strings show their contents verbatim (escape
/// expansion happens in `Print`, over the fully rendered text).
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(value) => write!(f, "{value}"),
            Value::Str(value) => write!(f, "{value}"),
            Value::Truth(true) => write!(f, "true"),
            Value::Truth(false) => write!(f, "false"),
            Value::Dummy => write!(f, "dummy"),
            Value::Tuple(elements) => {
                if elements.is_empty() {
                    return write!(f, "nil");
                }
                write!(f, "(")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{element}")?;
                }
                write!(f, ")")
            }
            Value::Lambda(lambda) => {
                write!(
                    f,
                    "[lambda closure: {}: {}]",
                    lambda.binders[0], lambda.index
                )
            }
            Value::Eta(eta) => {
                write!(
                    f,
                    "[eta closure: {}: {}]",
                    eta.lambda.binders[0], eta.lambda.index
                )
            }
            Value::Builtin(builtin) => write!(f, "{}", builtin.name()),
            Value::YStar => write!(f, "Y*"),
        }
    }
}

impl Value {
    /// Short variant name for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Integer(_) => "integer",
            Value::Str(_) => "string",
            Value::Truth(_) => "truthvalue",
            Value::Dummy => "dummy",
            Value::Tuple(_) => "tuple",
            Value::Lambda(_) => "lambda closure",
            Value::Eta(_) => "eta closure",
            Value::Builtin(_) => "builtin",
            Value::YStar => "Y*",
        }
    }
}
