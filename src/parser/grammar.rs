//! The grammar productions of RPAL, one function each.

use crate::ast::{BinaryOp, Def, Expr, Ident, Param, UnaryOp};
use crate::lexer::TokenKind;

use super::{ParseResult, ParseState};

/// Parse a complete program: a single expression followed by end of input.
pub fn parse(state: &mut ParseState) -> ParseResult<Expr> {
    let expr = expression(state)?;
    if state.peek().is_some() {
        return Err(state.unexpected("end of input"));
    }
    Ok(expr)
}

/// E -> 'let' D 'in' E
///   -> 'fn' Vb+ '.' E
///   -> Ew
fn expression(state: &mut ParseState) -> ParseResult<Expr> {
    if state.take_keyword("let") {
        let def = definition(state)?;
        state.expect_keyword("in")?;
        let body = expression(state)?;
        return Ok(Expr::Let(Box::new(def), Box::new(body)));
    }

    if state.take_keyword("fn") {
        let mut params = Vec::new();
        while starts_binder(state) {
            params.push(binder(state)?);
        }
        if params.is_empty() {
            return Err(state.unexpected("a parameter"));
        }
        state.expect_operator(".")?;
        let body = expression(state)?;
        return Ok(Expr::Fn(params, Box::new(body)));
    }

    where_expression(state)
}

/// Ew -> T 'where' Dr
///    -> T
fn where_expression(state: &mut ParseState) -> ParseResult<Expr> {
    let body = tuple_expression(state)?;
    if state.take_keyword("where") {
        let def = rec_definition(state)?;
        return Ok(Expr::Where(Box::new(body), Box::new(def)));
    }
    Ok(body)
}

/// T -> Ta (',' Ta)+
///   -> Ta
fn tuple_expression(state: &mut ParseState) -> ParseResult<Expr> {
    let first = aug_expression(state)?;
    if !state.peek_kind(TokenKind::Comma) {
        return Ok(first);
    }
    let mut elements = vec![first];
    while state.peek_kind(TokenKind::Comma) {
        state.advance();
        elements.push(aug_expression(state)?);
    }
    Ok(Expr::Tau(elements))
}

/// Ta -> Ta 'aug' Tc
///    -> Tc
fn aug_expression(state: &mut ParseState) -> ParseResult<Expr> {
    let mut left = cond_expression(state)?;
    while state.take_keyword("aug") {
        let right = cond_expression(state)?;
        left = Expr::Aug(Box::new(left), Box::new(right));
    }
    Ok(left)
}

/// Tc -> B '->' Tc '|' Tc
///    -> B
fn cond_expression(state: &mut ParseState) -> ParseResult<Expr> {
    let cond = or_expression(state)?;
    if state.take_operator("->") {
        let then = cond_expression(state)?;
        state.expect_operator("|")?;
        let other = cond_expression(state)?;
        return Ok(Expr::Cond(Box::new(cond), Box::new(then), Box::new(other)));
    }
    Ok(cond)
}

/// B -> B 'or' Bt
///   -> Bt
fn or_expression(state: &mut ParseState) -> ParseResult<Expr> {
    let mut left = and_expression(state)?;
    while state.take_keyword("or") {
        let right = and_expression(state)?;
        left = Expr::Binary(BinaryOp::Or, Box::new(left), Box::new(right));
    }
    Ok(left)
}

/// Bt -> Bt '&' Bs
///    -> Bs
fn and_expression(state: &mut ParseState) -> ParseResult<Expr> {
    let mut left = not_expression(state)?;
    while state.take_operator("&") {
        let right = not_expression(state)?;
        left = Expr::Binary(BinaryOp::And, Box::new(left), Box::new(right));
    }
    Ok(left)
}

/// Bs -> 'not' Bp
///    -> Bp
fn not_expression(state: &mut ParseState) -> ParseResult<Expr> {
    if state.take_keyword("not") {
        let operand = compare_expression(state)?;
        return Ok(Expr::Unary(UnaryOp::Not, Box::new(operand)));
    }
    compare_expression(state)
}

/// Bp -> A ('gr'|'>') A | A ('ge'|'>=') A | A ('ls'|'<') A
///    -> A ('le'|'<=') A | A 'eq' A | A 'ne' A | A
fn compare_expression(state: &mut ParseState) -> ParseResult<Expr> {
    let left = additive_expression(state)?;
    let op = if state.take_keyword("gr") || state.take_operator(">") {
        BinaryOp::Gr
    } else if state.take_keyword("ge") || state.take_operator(">=") {
        BinaryOp::Ge
    } else if state.take_keyword("ls") || state.take_operator("<") {
        BinaryOp::Ls
    } else if state.take_keyword("le") || state.take_operator("<=") {
        BinaryOp::Le
    } else if state.take_keyword("eq") {
        BinaryOp::Eq
    } else if state.take_keyword("ne") {
        BinaryOp::Ne
    } else {
        return Ok(left);
    };
    let right = additive_expression(state)?;
    Ok(Expr::Binary(op, Box::new(left), Box::new(right)))
}

/// A -> A '+' At | A '-' At | '+' At | '-' At | At
fn additive_expression(state: &mut ParseState) -> ParseResult<Expr> {
    let mut left = if state.take_operator("+") {
        multiplicative_expression(state)?
    } else if state.take_operator("-") {
        let operand = multiplicative_expression(state)?;
        Expr::Unary(UnaryOp::Neg, Box::new(operand))
    } else {
        multiplicative_expression(state)?
    };

    loop {
        let op = if state.take_operator("+") {
            BinaryOp::Plus
        } else if state.take_operator("-") {
            BinaryOp::Minus
        } else {
            return Ok(left);
        };
        let right = multiplicative_expression(state)?;
        left = Expr::Binary(op, Box::new(left), Box::new(right));
    }
}

/// At -> At '*' Af | At '/' Af | Af
fn multiplicative_expression(state: &mut ParseState) -> ParseResult<Expr> {
    let mut left = power_expression(state)?;
    loop {
        let op = if state.take_operator("*") {
            BinaryOp::Mult
        } else if state.take_operator("/") {
            BinaryOp::Div
        } else {
            return Ok(left);
        };
        let right = power_expression(state)?;
        left = Expr::Binary(op, Box::new(left), Box::new(right));
    }
}

/// Af -> Ap '**' Af
///    -> Ap
fn power_expression(state: &mut ParseState) -> ParseResult<Expr> {
    let left = at_expression(state)?;
    if state.take_operator("**") {
        let right = power_expression(state)?;
        return Ok(Expr::Binary(BinaryOp::Exp, Box::new(left), Box::new(right)));
    }
    Ok(left)
}

/// Ap -> Ap '@' <Id> R
///    -> R
fn at_expression(state: &mut ParseState) -> ParseResult<Expr> {
    let mut left = application(state)?;
    while state.take_operator("@") {
        let name = identifier(state)?;
        let right = application(state)?;
        left = Expr::At(Box::new(left), name, Box::new(right));
    }
    Ok(left)
}

/// R -> R Rn
///   -> Rn
///
/// Application is juxtaposition: keep absorbing operands for as long as
/// the next token can start one.
fn application(state: &mut ParseState) -> ParseResult<Expr> {
    let mut rator = atom(state)?;
    while starts_atom(state) {
        let rand = atom(state)?;
        rator = Expr::Gamma(Box::new(rator), Box::new(rand));
    }
    Ok(rator)
}

fn starts_atom(state: &ParseState) -> bool {
    state.peek_kind(TokenKind::Identifier)
        || state.peek_kind(TokenKind::Integer)
        || state.peek_kind(TokenKind::Str)
        || state.peek_kind(TokenKind::LParen)
        || state.peek_keyword("true")
        || state.peek_keyword("false")
        || state.peek_keyword("nil")
        || state.peek_keyword("dummy")
}

/// Rn -> <Id> | <Int> | <Str>
///    -> 'true' | 'false' | 'nil' | 'dummy'
///    -> '(' E ')'
fn atom(state: &mut ParseState) -> ParseResult<Expr> {
    if state.peek_kind(TokenKind::Identifier) {
        return Ok(Expr::Ident(identifier(state)?));
    }
    if state.peek_kind(TokenKind::Integer) {
        let token = state.advance().unwrap();
        let value = token.value.parse::<i64>().map_err(|_| {
            super::ParseError::new("integer literal out of range")
                .found(format!("'{}'", token.value))
                .at(token.line)
        })?;
        return Ok(Expr::Integer(value));
    }
    if state.peek_kind(TokenKind::Str) {
        let token = state.advance().unwrap();
        return Ok(Expr::Str(token.value));
    }
    if state.take_keyword("true") {
        return Ok(Expr::Truth(true));
    }
    if state.take_keyword("false") {
        return Ok(Expr::Truth(false));
    }
    if state.take_keyword("nil") {
        return Ok(Expr::Nil);
    }
    if state.take_keyword("dummy") {
        return Ok(Expr::Dummy);
    }
    if state.peek_kind(TokenKind::LParen) {
        state.advance();
        let inner = expression(state)?;
        state.expect_kind(TokenKind::RParen, "')'")?;
        return Ok(inner);
    }
    Err(state.unexpected("an expression"))
}

/// D -> Da 'within' D
///   -> Da
fn definition(state: &mut ParseState) -> ParseResult<Def> {
    let outer = and_definition(state)?;
    if state.take_keyword("within") {
        let inner = definition(state)?;
        return Ok(Def::Within(Box::new(outer), Box::new(inner)));
    }
    Ok(outer)
}

/// Da -> Dr ('and' Dr)+
///    -> Dr
fn and_definition(state: &mut ParseState) -> ParseResult<Def> {
    let first = rec_definition(state)?;
    if !state.peek_keyword("and") {
        return Ok(first);
    }
    let mut defs = vec![first];
    while state.take_keyword("and") {
        defs.push(rec_definition(state)?);
    }
    Ok(Def::Simultaneous(defs))
}

/// Dr -> 'rec' Db
///    -> Db
fn rec_definition(state: &mut ParseState) -> ParseResult<Def> {
    if state.take_keyword("rec") {
        let def = basic_definition(state)?;
        return Ok(Def::Rec(Box::new(def)));
    }
    basic_definition(state)
}

/// Db -> Vl '=' E
///    -> <Id> Vb+ '=' E
///    -> '(' D ')'
fn basic_definition(state: &mut ParseState) -> ParseResult<Def> {
    if state.peek_kind(TokenKind::LParen) {
        state.advance();
        let def = definition(state)?;
        state.expect_kind(TokenKind::RParen, "')'")?;
        return Ok(def);
    }

    let first = identifier(state)?;

    // Vl '=' E with more than one name
    if state.peek_kind(TokenKind::Comma) {
        let mut names = vec![first];
        while state.peek_kind(TokenKind::Comma) {
            state.advance();
            names.push(identifier(state)?);
        }
        state.expect_operator("=")?;
        let value = expression(state)?;
        return Ok(Def::Equal(names, Box::new(value)));
    }

    // Vl '=' E with a single name
    if state.take_operator("=") {
        let value = expression(state)?;
        return Ok(Def::Equal(vec![first], Box::new(value)));
    }

    // <Id> Vb+ '=' E
    let mut params = Vec::new();
    while starts_binder(state) {
        params.push(binder(state)?);
    }
    if params.is_empty() {
        return Err(state.unexpected("'=' or a parameter"));
    }
    state.expect_operator("=")?;
    let body = expression(state)?;
    Ok(Def::FcnForm(first, params, Box::new(body)))
}

fn starts_binder(state: &ParseState) -> bool {
    state.peek_kind(TokenKind::Identifier) || state.peek_kind(TokenKind::LParen)
}

/// Vb -> <Id>
///    -> '(' Vl ')'
///    -> '(' ')'
fn binder(state: &mut ParseState) -> ParseResult<Param> {
    if state.peek_kind(TokenKind::Identifier) {
        return Ok(Param::Single(identifier(state)?));
    }

    state.expect_kind(TokenKind::LParen, "'(' or an identifier")?;
    if state.peek_kind(TokenKind::RParen) {
        state.advance();
        return Ok(Param::Empty);
    }

    // Vl -> <Id> (',' <Id>)*
    let mut names = vec![identifier(state)?];
    while state.peek_kind(TokenKind::Comma) {
        state.advance();
        names.push(identifier(state)?);
    }
    state.expect_kind(TokenKind::RParen, "')'")?;

    if names.len() == 1 {
        Ok(Param::Single(names.into_iter().next().unwrap()))
    } else {
        Ok(Param::Comma(names))
    }
}

fn identifier(state: &mut ParseState) -> ParseResult<Ident> {
    let token = state.expect_kind(TokenKind::Identifier, "an identifier")?;
    Ok(Ident::new(token.value, token.line))
}
