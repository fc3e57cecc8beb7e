//! Source text to AST, in two stages (§6). `read_datum` turns a token
//! stream into raw data (`Num`/`Str`/`Bool`/`Char`/`Sym`/`List`/`Vector`);
//! `analyze` walks that data recognizing the special-form keywords and
//! building the AST node `eval` actually dispatches on. Quoted data never
//! reaches `analyze` — `quote` hands its argument back untouched.

use crate::cons;
use crate::error::ParseError;
use crate::expr::{intern, CondClause, DoBinding, Expr};
use crate::lexer::tokenize;
use crate::list::{self, List};
use crate::number::Number;
use crate::proc::LambdaNode;
use crate::token::Token;
use std::cell::RefCell;
use std::rc::Rc;

/// Parses a whole program: every top-level form, analyzed, in order.
pub fn parse(text: &str) -> Result<Expr, ParseError> {
    let tokens = tokenize(text)?;
    let mut reader = Reader::new(tokens);
    let mut forms = Vec::new();
    while reader.peek().is_some() {
        let datum = reader.read_datum()?;
        forms.push(analyze(datum)?);
    }
    Ok(Expr::Root(forms))
}

struct Reader {
    tokens: Vec<Token>,
    pos: usize,
}

impl Reader {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn read_datum(&mut self) -> Result<Expr, ParseError> {
        match self.advance().ok_or(ParseError::IncompleteExpr)? {
            Token::OpenParen(_) => self.read_list(),
            Token::VecOpen(_) => self.read_vector(),
            Token::CloseParen(_) => Err(ParseError::UnexpectedCloseParen),
            Token::Quote(_) => {
                let datum = self.read_datum()?;
                Ok(Expr::from(vec![intern("quote"), datum]))
            }
            Token::Num(text, _) => Number::parse(&text)
                .map(Expr::Num)
                .ok_or(ParseError::MalformedForm(format!("not a number: {text}"))),
            Token::Str(text, _) => Ok(Expr::Str(text)),
            Token::Sym(name, _) => Ok(Expr::Sym(name)),
            Token::Bool(value, _) => Ok(Expr::Bool(value)),
            Token::Char(ch, _) => Ok(Expr::Char(ch)),
        }
    }

    /// Reads up to the matching `)`, handling `(a b . c)` dotted tails.
    fn read_list(&mut self) -> Result<Expr, ParseError> {
        let mut items = Vec::new();
        loop {
            match self.peek() {
                None => return Err(ParseError::IncompleteExpr),
                Some(Token::CloseParen(_)) => {
                    self.advance();
                    return Ok(Expr::from(items));
                }
                Some(Token::Sym(name, _)) if name == "." => {
                    self.advance();
                    let tail = self.read_datum()?;
                    match self.advance() {
                        Some(Token::CloseParen(_)) => {}
                        _ => return Err(ParseError::UnexpectedToken(".".into())),
                    }
                    let mut built = tail;
                    for item in items.into_iter().rev() {
                        built = Expr::List(list::cons(item, built));
                    }
                    return Ok(built);
                }
                Some(_) => items.push(self.read_datum()?),
            }
        }
    }

    fn read_vector(&mut self) -> Result<Expr, ParseError> {
        let mut items = Vec::new();
        loop {
            match self.peek() {
                None => return Err(ParseError::IncompleteExpr),
                Some(Token::CloseParen(_)) => {
                    self.advance();
                    return Ok(Expr::Vector(Rc::new(RefCell::new(items))));
                }
                Some(_) => items.push(self.read_datum()?),
            }
        }
    }
}

/// Elaborates one raw datum into the AST `eval` understands. Bare symbols
/// in expression position become `Var`; lists whose head names a special
/// form become the matching node; everything else becomes an
/// `Application`. Also the other half of `(eval datum)` (§4.1): a quoted
/// datum produced at runtime is raw data, not AST, so `eval::eval` routes
/// it back through this function before re-entering itself.
pub(crate) fn analyze(datum: Expr) -> Result<Expr, ParseError> {
    match datum {
        Expr::Sym(name) => Ok(Expr::Var(name)),
        Expr::List(List::Cons(cell)) => analyze_list(cell),
        other => Ok(other),
    }
}

fn analyze_list(cell: cons::ConsCell) -> Result<Expr, ParseError> {
    let (head, tail) = {
        let node = cell.borrow();
        (node.car.clone(), node.cdr.clone())
    };
    let rest = proper_items(&tail, "a special form's argument list must be proper")?;

    if let Expr::Sym(name) = &head {
        match name.as_str() {
            "quote" => return analyze_quote(&rest),
            "if" => return analyze_if(&rest),
            "cond" => return analyze_cond(&rest),
            "lambda" | "λ" => return analyze_lambda(None, &rest),
            "define" => return analyze_define(&rest),
            "begin" => return analyze_begin(&rest),
            "let" => return analyze_let(&rest),
            "let*" => return analyze_let_star(&rest),
            "letrec" => return analyze_letrec(&rest),
            "set!" => return analyze_set(&rest),
            "set-car!" => return analyze_set_car(&rest),
            "set-cdr!" => return analyze_set_cdr(&rest),
            "vector-set!" => return analyze_set_vector(&rest),
            "do" => return analyze_do(&rest),
            "and" => return analyze_and(&rest),
            "or" => return analyze_or(&rest),
            "apply" => return analyze_apply(&rest),
            "eval" => return analyze_eval(&rest),
            _ => {}
        }
    }

    let operator = analyze(head)?;
    let args = analyze_each(&rest)?;
    Ok(Expr::Application(Box::new(operator), args))
}

fn proper_items(tail: &Expr, message: &str) -> Result<Vec<Expr>, ParseError> {
    match tail {
        Expr::List(l) if l.is_proper() || l.is_nil() => Ok(l.iter().collect()),
        _ => Err(ParseError::MalformedForm(message.into())),
    }
}

fn analyze_each(exprs: &[Expr]) -> Result<Vec<Expr>, ParseError> {
    exprs.iter().cloned().map(analyze).collect()
}

fn sequence_of(body: Vec<Expr>) -> Expr {
    match body.len() {
        0 => Expr::Bool(false),
        1 => body.into_iter().next().unwrap(),
        _ => Expr::Sequence(body),
    }
}

fn symbol_list(expr: &Expr, message: &str) -> Result<Vec<String>, ParseError> {
    let Expr::List(l) = expr else {
        return Err(ParseError::MalformedForm(message.into()));
    };
    if !l.is_proper() {
        return Err(ParseError::MalformedForm(message.into()));
    }
    l.iter()
        .map(|item| match item {
            Expr::Sym(name) => Ok(name),
            _ => Err(ParseError::MalformedForm("a parameter must be a symbol".into())),
        })
        .collect()
}

fn binding_pairs(expr: &Expr) -> Result<(Vec<String>, Vec<Expr>), ParseError> {
    let Expr::List(l) = expr else {
        return Err(ParseError::MalformedForm("expected a list of bindings".into()));
    };
    if !l.is_proper() {
        return Err(ParseError::MalformedForm("a binding list must be proper".into()));
    }
    let mut names = Vec::new();
    let mut inits = Vec::new();
    for binding in l.iter() {
        let Expr::List(bl) = &binding else {
            return Err(ParseError::MalformedForm("each binding must be (name init)".into()));
        };
        let items: Vec<Expr> = bl.iter().collect();
        let [Expr::Sym(name), init] = items.as_slice() else {
            return Err(ParseError::MalformedForm("each binding must be (name init)".into()));
        };
        names.push(name.clone());
        inits.push(init.clone());
    }
    Ok((names, inits))
}

fn analyze_quote(rest: &[Expr]) -> Result<Expr, ParseError> {
    let [datum] = rest else {
        return Err(ParseError::MalformedForm("quote takes exactly one datum".into()));
    };
    Ok(datum.clone())
}

fn analyze_if(rest: &[Expr]) -> Result<Expr, ParseError> {
    if rest.len() < 2 || rest.len() > 3 {
        return Err(ParseError::MalformedForm(
            "if requires (if test conseq [alt])".into(),
        ));
    }
    let mut clauses = vec![CondClause {
        pred: Some(analyze(rest[0].clone())?),
        conseq: analyze(rest[1].clone())?,
    }];
    if let Some(alt) = rest.get(2) {
        clauses.push(CondClause {
            pred: None,
            conseq: analyze(alt.clone())?,
        });
    }
    Ok(Expr::Cond(clauses))
}

fn analyze_cond(rest: &[Expr]) -> Result<Expr, ParseError> {
    let mut clauses = Vec::with_capacity(rest.len());
    for clause in rest {
        let Expr::List(l) = clause else {
            return Err(ParseError::MalformedForm("a cond clause must be a list".into()));
        };
        if !l.is_proper() {
            return Err(ParseError::MalformedForm("a cond clause must be a proper list".into()));
        }
        let items: Vec<Expr> = l.iter().collect();
        let (head, body) = items
            .split_first()
            .ok_or_else(|| ParseError::MalformedForm("a cond clause cannot be empty".into()))?;
        let pred = match head {
            Expr::Sym(name) if name == "else" => None,
            other => Some(analyze(other.clone())?),
        };
        let conseq = sequence_of(analyze_each(body)?);
        clauses.push(CondClause { pred, conseq });
    }
    Ok(Expr::Cond(clauses))
}

fn analyze_lambda(name: Option<String>, rest: &[Expr]) -> Result<Expr, ParseError> {
    let (params, body) = rest
        .split_first()
        .ok_or_else(|| ParseError::MalformedForm("lambda requires a parameter list".into()))?;
    let params = symbol_list(params, "a lambda parameter list must be a proper list of symbols")?;
    let body = analyze_each(body)?;
    Ok(Expr::Lambda(Rc::new(LambdaNode { name, params, body })))
}

fn analyze_define(rest: &[Expr]) -> Result<Expr, ParseError> {
    let (target, body) = rest
        .split_first()
        .ok_or_else(|| ParseError::MalformedForm("define requires a target".into()))?;
    match target {
        Expr::Sym(name) => {
            let value = match body.first() {
                Some(value) => analyze(value.clone())?,
                None => Expr::Bool(false),
            };
            Ok(Expr::Declaration(name.clone(), Box::new(value)))
        }
        Expr::List(List::Cons(cell)) => {
            let (head, params) = {
                let node = cell.borrow();
                (node.car.clone(), node.cdr.clone())
            };
            let Expr::Sym(name) = head else {
                return Err(ParseError::MalformedForm(
                    "a define procedure header must name a symbol".into(),
                ));
            };
            let params = symbol_list(&params, "a define parameter list must be a proper list of symbols")?;
            let body = analyze_each(body)?;
            let lambda = Expr::Lambda(Rc::new(LambdaNode {
                name: Some(name.clone()),
                params,
                body,
            }));
            Ok(Expr::Declaration(name, Box::new(lambda)))
        }
        _ => Err(ParseError::MalformedForm(
            "define target must be a symbol or a procedure header".into(),
        )),
    }
}

fn analyze_begin(rest: &[Expr]) -> Result<Expr, ParseError> {
    Ok(Expr::Sequence(analyze_each(rest)?))
}

fn analyze_let(rest: &[Expr]) -> Result<Expr, ParseError> {
    let (bindings, body) = rest
        .split_first()
        .ok_or_else(|| ParseError::MalformedForm("let requires a binding list".into()))?;
    let (names, inits) = binding_pairs(bindings)?;
    let args = analyze_each(&inits)?;
    let body = analyze_each(body)?;
    let lambda = Expr::Lambda(Rc::new(LambdaNode {
        name: None,
        params: names,
        body,
    }));
    Ok(Expr::Application(Box::new(lambda), args))
}

/// Desugars right-to-left: `(let* ((a 1) (b a)) b)` becomes nested
/// single-parameter lambda applications, each body seeing the previous
/// binding in scope.
fn analyze_let_star(rest: &[Expr]) -> Result<Expr, ParseError> {
    let (bindings, body) = rest
        .split_first()
        .ok_or_else(|| ParseError::MalformedForm("let* requires a binding list".into()))?;
    let (names, inits) = binding_pairs(bindings)?;
    build_let_star(&names, &inits, body)
}

fn build_let_star(names: &[String], inits: &[Expr], body: &[Expr]) -> Result<Expr, ParseError> {
    match (names.split_first(), inits.split_first()) {
        (Some((name, rest_names)), Some((init, rest_inits))) => {
            let inner = build_let_star(rest_names, rest_inits, body)?;
            let lambda = Expr::Lambda(Rc::new(LambdaNode {
                name: None,
                params: vec![name.clone()],
                body: vec![inner],
            }));
            Ok(Expr::Application(Box::new(lambda), vec![analyze(init.clone())?]))
        }
        _ => Ok(sequence_of(analyze_each(body)?)),
    }
}

fn analyze_letrec(rest: &[Expr]) -> Result<Expr, ParseError> {
    let (bindings, body) = rest
        .split_first()
        .ok_or_else(|| ParseError::MalformedForm("letrec requires a binding list".into()))?;
    let (names, inits) = binding_pairs(bindings)?;
    let inits = analyze_each(&inits)?;
    let body = analyze_each(body)?;
    Ok(Expr::Letrec(names.into_iter().zip(inits).collect(), body))
}

fn analyze_set(rest: &[Expr]) -> Result<Expr, ParseError> {
    let [Expr::Sym(name), value] = rest else {
        return Err(ParseError::MalformedForm("set! requires (set! name expr)".into()));
    };
    Ok(Expr::Set(name.clone(), Box::new(analyze(value.clone())?)))
}

fn analyze_set_car(rest: &[Expr]) -> Result<Expr, ParseError> {
    let [pair, value] = rest else {
        return Err(ParseError::MalformedForm(
            "set-car! requires (set-car! pair value)".into(),
        ));
    };
    Ok(Expr::SetCar(
        Box::new(analyze(pair.clone())?),
        Box::new(analyze(value.clone())?),
    ))
}

fn analyze_set_cdr(rest: &[Expr]) -> Result<Expr, ParseError> {
    let [pair, value] = rest else {
        return Err(ParseError::MalformedForm(
            "set-cdr! requires (set-cdr! pair value)".into(),
        ));
    };
    Ok(Expr::SetCdr(
        Box::new(analyze(pair.clone())?),
        Box::new(analyze(value.clone())?),
    ))
}

fn analyze_set_vector(rest: &[Expr]) -> Result<Expr, ParseError> {
    let [vector, index, value] = rest else {
        return Err(ParseError::MalformedForm(
            "vector-set! requires (vector-set! vector index value)".into(),
        ));
    };
    Ok(Expr::SetVector(
        Box::new(analyze(vector.clone())?),
        Box::new(analyze(index.clone())?),
        Box::new(analyze(value.clone())?),
    ))
}

fn analyze_do(rest: &[Expr]) -> Result<Expr, ParseError> {
    let (bindings_expr, rest) = rest
        .split_first()
        .ok_or_else(|| ParseError::MalformedForm("do requires a binding list".into()))?;
    let (test_expr, commands) = rest
        .split_first()
        .ok_or_else(|| ParseError::MalformedForm("do requires a test clause".into()))?;

    let Expr::List(bindings_list) = bindings_expr else {
        return Err(ParseError::MalformedForm("do bindings must be a list".into()));
    };
    if !bindings_list.is_proper() {
        return Err(ParseError::MalformedForm("do bindings must be a proper list".into()));
    }
    let mut bindings = Vec::new();
    for binding in bindings_list.iter() {
        let Expr::List(bl) = &binding else {
            return Err(ParseError::MalformedForm(
                "each do binding must be (var init step)".into(),
            ));
        };
        let items: Vec<Expr> = bl.iter().collect();
        let [Expr::Sym(name), init, step] = items.as_slice() else {
            return Err(ParseError::MalformedForm(
                "each do binding must be (var init step)".into(),
            ));
        };
        bindings.push(DoBinding {
            name: name.clone(),
            init: analyze(init.clone())?,
            step: analyze(step.clone())?,
        });
    }

    let Expr::List(test_list) = test_expr else {
        return Err(ParseError::MalformedForm("do test clause must be a list".into()));
    };
    if !test_list.is_proper() {
        return Err(ParseError::MalformedForm("do test clause must be a proper list".into()));
    }
    let test_items: Vec<Expr> = test_list.iter().collect();
    let (test, result) = test_items
        .split_first()
        .ok_or_else(|| ParseError::MalformedForm("do test clause cannot be empty".into()))?;
    let test = analyze(test.clone())?;
    let result = analyze_each(result)?;
    let commands = analyze_each(commands)?;

    Ok(Expr::Do(bindings, Box::new(test), result, commands))
}

fn analyze_and(rest: &[Expr]) -> Result<Expr, ParseError> {
    Ok(Expr::And(analyze_each(rest)?))
}

fn analyze_or(rest: &[Expr]) -> Result<Expr, ParseError> {
    Ok(Expr::Or(analyze_each(rest)?))
}

fn analyze_apply(rest: &[Expr]) -> Result<Expr, ParseError> {
    let [callee, args] = rest else {
        return Err(ParseError::MalformedForm("apply requires (apply proc args)".into()));
    };
    Ok(Expr::Apply(
        Box::new(analyze(callee.clone())?),
        Box::new(analyze(args.clone())?),
    ))
}

fn analyze_eval(rest: &[Expr]) -> Result<Expr, ParseError> {
    let [datum] = rest else {
        return Err(ParseError::MalformedForm("eval takes exactly one argument".into()));
    };
    Ok(Expr::Eval(Box::new(analyze(datum.clone())?)))
}

/// Incremental reader for the REPL (§6): accumulates lines until parens
/// balance, then hands the whole buffer to `parse`. Mirrors the teacher's
/// feed-then-parse loop rather than re-tokenizing on every keystroke.
#[derive(Default)]
pub struct Parser {
    buffer: String,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&mut self, line: &str) {
        self.buffer.push_str(line);
        self.buffer.push('\n');
    }

    /// True once the buffer holds unparsed, non-whitespace input.
    pub fn is_pending(&self) -> bool {
        !self.buffer.trim().is_empty()
    }

    /// `None` means the buffer's parens aren't balanced yet — keep
    /// feeding lines. `Some` drains the buffer and parses it.
    pub fn parse_next(&mut self) -> Option<Result<Expr, ParseError>> {
        if balanced(&self.buffer) {
            let text = std::mem::take(&mut self.buffer);
            Some(parse(&text))
        } else {
            None
        }
    }
}

fn balanced(text: &str) -> bool {
    let mut depth: i32 = 0;
    let mut in_string = false;
    let mut escaped = false;
    for ch in text.chars() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '(' => depth += 1,
            ')' => depth -= 1,
            _ => {}
        }
    }
    depth <= 0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root_forms(text: &str) -> Vec<Expr> {
        match parse(text).unwrap() {
            Expr::Root(forms) => forms,
            other => panic!("expected Root, got {other:?}"),
        }
    }

    #[test]
    fn test_self_evaluating_literals() {
        let forms = root_forms("42 \"hi\" #t #\\a");
        assert!(matches!(forms[0], Expr::Num(_)));
        assert!(matches!(forms[1], Expr::Str(ref s) if s == "hi"));
        assert_eq!(forms[2], Expr::Bool(true));
        assert_eq!(forms[3], Expr::Char('a'));
    }

    #[test]
    fn test_numeric_literal_keeps_precision_beyond_f64() {
        let forms = root_forms("100000000000000000001");
        let Expr::Num(n) = &forms[0] else {
            panic!("expected a number, got {:?}", forms[0]);
        };
        let from_text = Number::parse("100000000000000000001").unwrap();
        assert_eq!(format!("{n}"), format!("{from_text}"));
        assert_ne!(format!("{n}"), format!("{}", Number::from_real(100000000000000000001.0)));
    }

    #[test]
    fn test_quote_is_literal_data() {
        let forms = root_forms("'(1 2 3)");
        match &forms[0] {
            Expr::List(l) => assert_eq!(l.len(), 3),
            other => panic!("expected a list datum, got {other:?}"),
        }
    }

    #[test]
    fn test_dotted_pair_literal() {
        let forms = root_forms("(quote (1 . 2))");
        assert_eq!(format!("{}", forms[0]), "(1 . 2)");
    }

    #[test]
    fn test_application_and_var_promotion() {
        let forms = root_forms("(+ x 1)");
        match &forms[0] {
            Expr::Application(op, args) => {
                assert!(matches!(**op, Expr::Var(ref s) if s == "+"));
                assert!(matches!(args[0], Expr::Var(ref s) if s == "x"));
            }
            other => panic!("expected Application, got {other:?}"),
        }
    }

    #[test]
    fn test_if_without_else() {
        let forms = root_forms("(if #t 1)");
        match &forms[0] {
            Expr::Cond(clauses) => assert_eq!(clauses.len(), 1),
            other => panic!("expected Cond, got {other:?}"),
        }
    }

    #[test]
    fn test_define_function_shorthand() {
        let forms = root_forms("(define (square x) (* x x))");
        match &forms[0] {
            Expr::Declaration(name, value) => {
                assert_eq!(name, "square");
                assert!(matches!(**value, Expr::Lambda(_)));
            }
            other => panic!("expected Declaration, got {other:?}"),
        }
    }

    #[test]
    fn test_let_desugars_to_application() {
        let forms = root_forms("(let ((x 1) (y 2)) (+ x y))");
        assert!(matches!(forms[0], Expr::Application(_, _)));
    }

    #[test]
    fn test_let_star_nests_right_to_left() {
        let forms = root_forms("(let* ((a 1) (b a)) b)");
        match &forms[0] {
            Expr::Application(lambda, args) => {
                assert_eq!(args.len(), 1);
                match &**lambda {
                    Expr::Lambda(node) => assert_eq!(node.params, vec!["a".to_string()]),
                    other => panic!("expected Lambda, got {other:?}"),
                }
            }
            other => panic!("expected Application, got {other:?}"),
        }
    }

    #[test]
    fn test_letrec_structural_node() {
        let forms = root_forms("(letrec ((f (lambda (n) n))) (f 1))");
        assert!(matches!(forms[0], Expr::Letrec(_, _)));
    }

    #[test]
    fn test_do_loop_shape() {
        let forms =
            root_forms("(do ((i 0 (+ i 1)) (s 0 (+ s i))) ((= i 5) s))");
        match &forms[0] {
            Expr::Do(bindings, ..) => assert_eq!(bindings.len(), 2),
            other => panic!("expected Do, got {other:?}"),
        }
    }

    #[test]
    fn test_vector_literal() {
        let forms = root_forms("#(1 2 3)");
        assert!(matches!(forms[0], Expr::Vector(_)));
    }

    #[test]
    fn test_malformed_if_reports_parse_error() {
        assert!(parse("(if)").is_err());
    }

    #[test]
    fn test_unexpected_close_paren() {
        assert_eq!(parse(")"), Err(ParseError::UnexpectedCloseParen));
    }

    #[test]
    fn test_incremental_parser_waits_for_balance() {
        let mut parser = Parser::new();
        parser.feed("(+ 1");
        assert!(parser.parse_next().is_none());
        parser.feed(" 2)");
        let result = parser.parse_next().unwrap().unwrap();
        assert!(matches!(result, Expr::Root(_)));
    }
}
