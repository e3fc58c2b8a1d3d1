use super::{BinaryOp, Def, Ident, Param, UnaryOp};

/// An RPAL expression as parsed, sugar included.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// `let D in E`
    Let(Box<Def>, Box<Expr>),
    /// `fn Vb+ . E`
    Fn(Vec<Param>, Box<Expr>),
    /// `E where Dr`
    Where(Box<Expr>, Box<Def>),
    /// `E1, E2, …` (two or more elements)
    Tau(Vec<Expr>),
    /// `E1 aug E2`
    Aug(Box<Expr>, Box<Expr>),
    /// `B -> T | E`
    Cond(Box<Expr>, Box<Expr>, Box<Expr>),
    /// `E1 @ N E2`
    At(Box<Expr>, Ident, Box<Expr>),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
    Unary(UnaryOp, Box<Expr>),
    /// Function application by juxtaposition, left-associative.
    Gamma(Box<Expr>, Box<Expr>),
    Ident(Ident),
    Integer(i64),
    Str(String),
    Truth(bool),
    Nil,
    Dummy,
}
