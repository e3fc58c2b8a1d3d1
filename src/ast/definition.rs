use super::{Expr, Ident};

/// A definition (the `D` productions of the grammar).
#[derive(Debug, Clone, PartialEq)]
pub enum Def {
    /// `Da within D`
    Within(Box<Def>, Box<Def>),
    /// `Dr and Dr and …` (two or more)
    Simultaneous(Vec<Def>),
    /// `rec Db`
    Rec(Box<Def>),
    /// `Vl = E`: one or more names bound to one expression.
    Equal(Vec<Ident>, Box<Expr>),
    /// `P Vb+ = E`: function form.
    FcnForm(Ident, Vec<Param>, Box<Expr>),
}

/// A single binder (the `Vb` production): one name, a parenthesized
/// comma-list, or the empty parameter marker `()`.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    Single(Ident),
    Comma(Vec<Ident>),
    Empty,
}
