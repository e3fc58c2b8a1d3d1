use thiserror::Error;

/// Fatal evaluation errors. There is no recovery construct in the
/// language; the machine stops at the first of these.
#[derive(Debug, Error)]
pub enum EvalError {
    #[error("type error: {0}")]
    Type(String),

    #[error("line {line}: undeclared identifier '{name}'")]
    UndeclaredIdentifier { name: String, line: usize },

    #[error("arity error: {0}")]
    Arity(String),

    #[error("application error: {0}")]
    Application(String),

    #[error("arithmetic error: {0}")]
    Arithmetic(String),

    /// Reachable only through a bug in the standardizer or compiler.
    #[error("internal error: {0}")]
    Internal(String),

    #[error("output error: {0}")]
    Io(#[from] std::io::Error),
}
