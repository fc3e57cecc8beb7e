//! Lexer: source text to a flat token stream. Adds boolean (`#t`/`#f`/
//! `#true`/`#false`) and character (`#\x`) literals to the teacher's
//! scanner; drops its quasiquote/unquote/unquote-splicing tokens, since
//! MicroScheme's grammar (§6) has no backquote syntax.

use crate::span::{Loc, Span};
use crate::token::Token;
use std::fmt;
use std::iter::{Iterator, Peekable};

const SYMBOL_DELIMITERS: &str = " \t\r\n()'\";";

#[derive(Debug, PartialEq)]
pub enum LexError {
    IncompleteString,
    InvalidNumber,
    UnknownHashLiteral(String),
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::IncompleteString => write!(f, "incomplete string"),
            LexError::InvalidNumber => write!(f, "invalid number"),
            LexError::UnknownHashLiteral(text) => write!(f, "unknown literal: {text}"),
        }
    }
}

type LexResult = Result<Option<Token>, LexError>;

pub struct Lexer<Iter>
where
    Iter: Iterator<Item = char>,
{
    iter: Peekable<Iter>,
    loc: Loc,
}

impl<Iter> Lexer<Iter>
where
    Iter: Iterator<Item = char>,
{
    pub fn new(iter: Iter) -> Self {
        Self {
            iter: iter.peekable(),
            loc: Loc::new(1, 1),
        }
    }

    pub fn get_token(&mut self) -> LexResult {
        loop {
            self.skip_spaces();
            if !self.skip_comment() {
                break;
            }
        }

        match self.next_char() {
            Some('(') => Ok(Some(Token::OpenParen(Span::new(self.loc, self.loc)))),
            Some(')') => Ok(Some(Token::CloseParen(Span::new(self.loc, self.loc)))),
            Some('\'') => Ok(Some(Token::Quote(Span::new(self.loc, self.loc)))),
            Some('"') => self.read_string(),
            Some('#') => self.read_hash(),

            Some(ch) if ch.is_ascii_digit() || ch == '.' => self.read_number(String::new(), ch),

            Some('-') => {
                if let Some(ch) = self.next_char_if(|ch| ch.is_ascii_digit()) {
                    self.read_number("-".into(), ch)
                } else {
                    self.read_symbol('-')
                }
            }

            Some(ch) => self.read_symbol(ch),

            None => Ok(None),
        }
    }

    fn skip_spaces(&mut self) {
        while self.next_char_if(|&ch| ch.is_whitespace()).is_some() {}
    }

    fn skip_comment(&mut self) -> bool {
        if self.iter.next_if_eq(&';').is_some() {
            self.advance_loc(&Some(';'));
            loop {
                match self.next_char() {
                    Some('\n') | None => break,
                    Some(_) => {}
                }
            }
            true
        } else {
            false
        }
    }

    /// Reads up to the closing `"`, resolving `\n`/`\r`/`\t`/`\\`-style
    /// escapes inline. A bare newline before the closer means the string
    /// was never closed, same as running out of input.
    fn read_string(&mut self) -> LexResult {
        let loc = self.loc;
        let mut contents = String::new();
        loop {
            match self.next_char() {
                None | Some('\n') => return Err(LexError::IncompleteString),
                Some('"') => return Ok(Some(Token::Str(contents, Span::new(loc, self.loc)))),
                Some('\\') => match self.next_char() {
                    None | Some('\n') => return Err(LexError::IncompleteString),
                    Some('n') => contents.push('\n'),
                    Some('r') => contents.push('\r'),
                    Some('t') => contents.push('\t'),
                    Some(other) => contents.push(other),
                },
                Some(ch) => contents.push(ch),
            }
        }
    }

    /// Scans the rest of a numeric literal and hands back its raw text
    /// (`prefix` carries a leading sign already consumed by `get_token`).
    /// No `f64` conversion happens here — that would throw away everything
    /// past the mantissa's 53 usable bits before the literal ever reaches
    /// `Number::parse`, so the text itself is the token payload.
    fn read_number(&mut self, prefix: String, leading: char) -> LexResult {
        let loc = self.loc;
        let mut seen_point = leading == '.';
        let mut text = prefix;
        text.push(leading);

        loop {
            let accept_point = !seen_point;
            match self.next_char_if(|&ch| ch.is_ascii_digit() || (accept_point && ch == '.')) {
                Some('.') => {
                    seen_point = true;
                    text.push('.');
                }
                Some(ch) => text.push(ch),
                None => break,
            }
        }

        if text.parse::<f64>().is_err() {
            return Err(LexError::InvalidNumber);
        }
        Ok(Some(Token::Num(text, Span::new(loc, self.loc))))
    }

    fn read_symbol(&mut self, first_char: char) -> LexResult {
        let loc = self.loc;
        let is_delimiter = |ch: &char| SYMBOL_DELIMITERS.contains(*ch);
        let mut name = first_char.to_string();

        while let Some(ch) = self.next_char_if(|ch| !is_delimiter(ch)) {
            name.push(ch);
        }

        Ok(Some(Token::Sym(name, Span::new(loc, self.loc))))
    }

    /// `#t`/`#f`/`#true`/`#false` booleans, `#\x` character literals, and
    /// `#(` vector-literal openers.
    fn read_hash(&mut self) -> LexResult {
        let loc = self.loc;
        match self.next_char() {
            Some('\\') => {
                let ch = self.next_char().ok_or(LexError::IncompleteString)?;
                Ok(Some(Token::Char(ch, Span::new(loc, self.loc))))
            }
            Some('(') => Ok(Some(Token::VecOpen(Span::new(loc, self.loc)))),
            Some(ch) => {
                let mut text = String::new();
                text.push(ch);
                while let Some(c) = self.next_char_if(|c| !SYMBOL_DELIMITERS.contains(*c)) {
                    text.push(c);
                }
                match text.to_ascii_lowercase().as_str() {
                    "t" | "true" => Ok(Some(Token::Bool(true, Span::new(loc, self.loc)))),
                    "f" | "false" => Ok(Some(Token::Bool(false, Span::new(loc, self.loc)))),
                    _ => Err(LexError::UnknownHashLiteral(format!("#{text}"))),
                }
            }
            None => Err(LexError::IncompleteString),
        }
    }
}

impl<Iter> Lexer<Iter>
where
    Iter: Iterator<Item = char>,
{
    fn next_char(&mut self) -> Option<char> {
        let ch = self.iter.next();
        self.advance_loc(&ch);
        ch
    }

    fn next_char_if(&mut self, func: impl FnOnce(&char) -> bool) -> Option<char> {
        let ch = self.iter.next_if(func);
        self.advance_loc(&ch);
        ch
    }

    fn advance_loc(&mut self, ch: &Option<char>) {
        if let Some(ch) = ch {
            if *ch == '\n' {
                self.loc.line += 1;
                self.loc.column = 1;
            } else {
                self.loc.column += 1;
            }
        }
    }
}

pub fn tokenize(text: &str) -> Result<Vec<Token>, LexError> {
    let mut tokens = Vec::new();
    let mut lexer = Lexer::new(text.chars());

    while let Some(token) = lexer.get_token()? {
        tokens.push(token);
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_string() {
        let mut lexer = Lexer::new(r#""valid string""#.chars());
        lexer.next_char();
        let token = lexer.read_string().unwrap().unwrap();
        assert_eq!(token, Token::Str("valid string".into(), token.span()));
    }

    #[test]
    fn test_incomplete_string() {
        let mut lexer = Lexer::new(r#""incomplete"#.chars());
        lexer.next_char();
        assert_eq!(lexer.read_string(), Err(LexError::IncompleteString));
    }

    #[test]
    fn test_read_number() {
        assert_eq!(
            tokenize("1.5").unwrap(),
            vec![Token::Num("1.5".into(), Span::new(Loc::new(1, 1), Loc::new(1, 4)))]
        );
        assert_eq!(
            tokenize("-3").unwrap(),
            vec![Token::Num("-3".into(), Span::new(Loc::new(1, 1), Loc::new(1, 3)))]
        );
    }

    #[test]
    fn test_read_number_keeps_full_precision_text() {
        let tokens = tokenize("100000000000000000001").unwrap();
        assert!(matches!(tokens[0], Token::Num(ref s, _) if s == "100000000000000000001"));
    }

    #[test]
    fn test_bool_and_char_literals() {
        let tokens = tokenize("#t #f #true #false #\\x").unwrap();
        assert!(matches!(tokens[0], Token::Bool(true, _)));
        assert!(matches!(tokens[1], Token::Bool(false, _)));
        assert!(matches!(tokens[2], Token::Bool(true, _)));
        assert!(matches!(tokens[3], Token::Bool(false, _)));
        assert!(matches!(tokens[4], Token::Char('x', _)));
    }

    #[test]
    fn test_vector_open_token() {
        let tokens = tokenize("#(1 2)").unwrap();
        assert!(matches!(tokens[0], Token::VecOpen(_)));
    }

    #[test]
    fn test_parens_and_symbols() {
        let tokens = tokenize("(add 1 2.34 (x y) \"test\")").unwrap();
        assert!(matches!(tokens[0], Token::OpenParen(_)));
        assert!(matches!(tokens[1], Token::Sym(ref s, _) if s == "add"));
        assert!(matches!(tokens[2], Token::Num(ref s, _) if s == "1"));
        assert!(matches!(tokens[3], Token::Num(ref s, _) if s == "2.34"));
    }
}
