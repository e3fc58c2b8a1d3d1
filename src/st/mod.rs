//! The standardized tree: the reduced expression alphabet the CSE machine
//! evaluates. All sugar has been rewritten away; what remains is lambdas
//! (each with one binder list), applications, conditionals, tuple formers,
//! operators, `Y*`, and leaves.

use std::fmt::Write;

use crate::ast::{BinaryOp, Ident, UnaryOp};

#[derive(Debug, Clone, PartialEq)]
pub enum StExpr {
    /// A lambda with its bound-variable list: one name, the names of a
    /// comma-list, or the single unbindable `"()"` placeholder.
    Lambda {
        binders: Vec<String>,
        body: Box<StExpr>,
    },
    Gamma(Box<StExpr>, Box<StExpr>),
    Cond(Box<StExpr>, Box<StExpr>, Box<StExpr>),
    Tau(Vec<StExpr>),
    Binary(BinaryOp, Box<StExpr>, Box<StExpr>),
    Unary(UnaryOp, Box<StExpr>),
    YStar,
    Ident(Ident),
    Integer(i64),
    Str(String),
    Truth(bool),
    Nil,
    Dummy,
}

impl StExpr {
    /// Dot-indented preorder form (the `--st` switch).
    pub fn pretty(&self) -> String {
        let mut out = String::new();
        write_st(&mut out, self, 0);
        out
    }
}

fn line(out: &mut String, depth: usize, label: &str) {
    for _ in 0..depth {
        out.push('.');
    }
    let _ = writeln!(out, "{label}");
}

fn write_st(out: &mut String, expr: &StExpr, depth: usize) {
    match expr {
        StExpr::Lambda { binders, body } => {
            line(out, depth, "lambda");
            if let [binder] = binders.as_slice() {
                line(out, depth + 1, &binder_label(binder));
            } else {
                line(out, depth + 1, ",");
                for binder in binders {
                    line(out, depth + 2, &binder_label(binder));
                }
            }
            write_st(out, body, depth + 1);
        }
        StExpr::Gamma(rator, rand) => {
            line(out, depth, "gamma");
            write_st(out, rator, depth + 1);
            write_st(out, rand, depth + 1);
        }
        StExpr::Cond(cond, then, other) => {
            line(out, depth, "->");
            write_st(out, cond, depth + 1);
            write_st(out, then, depth + 1);
            write_st(out, other, depth + 1);
        }
        StExpr::Tau(elements) => {
            line(out, depth, "tau");
            for element in elements {
                write_st(out, element, depth + 1);
            }
        }
        StExpr::Binary(op, left, right) => {
            line(out, depth, &op.to_string());
            write_st(out, left, depth + 1);
            write_st(out, right, depth + 1);
        }
        StExpr::Unary(op, operand) => {
            line(out, depth, &op.to_string());
            write_st(out, operand, depth + 1);
        }
        StExpr::YStar => line(out, depth, "<Y*>"),
        StExpr::Ident(ident) => line(out, depth, &format!("<ID:{}>", ident.name)),
        StExpr::Integer(value) => line(out, depth, &format!("<INT:{value}>")),
        StExpr::Str(value) => line(out, depth, &format!("<STR:'{value}'>")),
        StExpr::Truth(true) => line(out, depth, "<true>"),
        StExpr::Truth(false) => line(out, depth, "<false>"),
        StExpr::Nil => line(out, depth, "<nil>"),
        StExpr::Dummy => line(out, depth, "<dummy>"),
    }
}

fn binder_label(binder: &str) -> String {
    if binder == "()" {
        "()".to_string()
    } else {
        format!("<ID:{binder}>")
    }
}
