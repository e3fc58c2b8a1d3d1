//! Dot-indented preorder printing of the surface AST (the `--ast` switch).

use std::fmt::Write;

use super::{Def, Expr, Ident, Param};

impl Expr {
    pub fn pretty(&self) -> String {
        let mut out = String::new();
        write_expr(&mut out, self, 0);
        out
    }
}

fn line(out: &mut String, depth: usize, label: &str) {
    for _ in 0..depth {
        out.push('.');
    }
    let _ = writeln!(out, "{label}");
}

fn write_ident(out: &mut String, ident: &Ident, depth: usize) {
    line(out, depth, &format!("<ID:{}>", ident.name));
}

fn write_expr(out: &mut String, expr: &Expr, depth: usize) {
    match expr {
        Expr::Let(def, body) => {
            line(out, depth, "let");
            write_def(out, def, depth + 1);
            write_expr(out, body, depth + 1);
        }
        Expr::Fn(params, body) => {
            line(out, depth, "lambda");
            for param in params {
                write_param(out, param, depth + 1);
            }
            write_expr(out, body, depth + 1);
        }
        Expr::Where(body, def) => {
            line(out, depth, "where");
            write_expr(out, body, depth + 1);
            write_def(out, def, depth + 1);
        }
        Expr::Tau(elements) => {
            line(out, depth, "tau");
            for element in elements {
                write_expr(out, element, depth + 1);
            }
        }
        Expr::Aug(left, right) => {
            line(out, depth, "aug");
            write_expr(out, left, depth + 1);
            write_expr(out, right, depth + 1);
        }
        Expr::Cond(cond, then, other) => {
            line(out, depth, "->");
            write_expr(out, cond, depth + 1);
            write_expr(out, then, depth + 1);
            write_expr(out, other, depth + 1);
        }
        Expr::At(left, ident, right) => {
            line(out, depth, "@");
            write_expr(out, left, depth + 1);
            write_ident(out, ident, depth + 1);
            write_expr(out, right, depth + 1);
        }
        Expr::Binary(op, left, right) => {
            line(out, depth, &op.to_string());
            write_expr(out, left, depth + 1);
            write_expr(out, right, depth + 1);
        }
        Expr::Unary(op, operand) => {
            line(out, depth, &op.to_string());
            write_expr(out, operand, depth + 1);
        }
        Expr::Gamma(rator, rand) => {
            line(out, depth, "gamma");
            write_expr(out, rator, depth + 1);
            write_expr(out, rand, depth + 1);
        }
        Expr::Ident(ident) => write_ident(out, ident, depth),
        Expr::Integer(value) => line(out, depth, &format!("<INT:{value}>")),
        Expr::Str(value) => line(out, depth, &format!("<STR:'{value}'>")),
        Expr::Truth(true) => line(out, depth, "<true>"),
        Expr::Truth(false) => line(out, depth, "<false>"),
        Expr::Nil => line(out, depth, "<nil>"),
        Expr::Dummy => line(out, depth, "<dummy>"),
    }
}

fn write_def(out: &mut String, def: &Def, depth: usize) {
    match def {
        Def::Within(outer, inner) => {
            line(out, depth, "within");
            write_def(out, outer, depth + 1);
            write_def(out, inner, depth + 1);
        }
        Def::Simultaneous(defs) => {
            line(out, depth, "and");
            for def in defs {
                write_def(out, def, depth + 1);
            }
        }
        Def::Rec(def) => {
            line(out, depth, "rec");
            write_def(out, def, depth + 1);
        }
        Def::Equal(names, value) => {
            line(out, depth, "=");
            if let [name] = names.as_slice() {
                write_ident(out, name, depth + 1);
            } else {
                line(out, depth + 1, ",");
                for name in names {
                    write_ident(out, name, depth + 2);
                }
            }
            write_expr(out, value, depth + 1);
        }
        Def::FcnForm(name, params, body) => {
            line(out, depth, "function_form");
            write_ident(out, name, depth + 1);
            for param in params {
                write_param(out, param, depth + 1);
            }
            write_expr(out, body, depth + 1);
        }
    }
}

fn write_param(out: &mut String, param: &Param, depth: usize) {
    match param {
        Param::Single(ident) => write_ident(out, ident, depth),
        Param::Comma(idents) => {
            line(out, depth, ",");
            for ident in idents {
                write_ident(out, ident, depth + 1);
            }
        }
        Param::Empty => line(out, depth, "()"),
    }
}
