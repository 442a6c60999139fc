use std::collections::HashMap;
use std::iter;
use std::str;

use lazy_static::lazy_static;

use super::token::{Token, TokenKind};

const STRING_CHAR: char = '"';
const UNDERSCORE: char = '_';

lazy_static! {
    /// KEYWORDS maps reserved words to their token kinds; any other word is an identifier.
    static ref KEYWORDS: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();

        map.insert("fn", TokenKind::Function);
        map.insert("let", TokenKind::Let);
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("return", TokenKind::Return);

        map
    };
}

/// lex is a convenience function to take some `input` and produce the resulting `Vec<Token>`, ending with `EOF`.
pub fn lex(input: &str) -> Vec<Token> {
    Lexer::new(input).collect()
}

/// Lexer contains the logic to lex individual tokens from the input source.
///
/// Lexing never fails: characters outside the language become `ILLEGAL` tokens
/// and are left for the parser to reject.
#[derive(Debug)]
pub struct Lexer<'input> {
    input: &'input str,
    iter: iter::Peekable<str::CharIndices<'input>>,
    finished: bool,
}

impl<'input> Lexer<'input> {
    /// new constructs a Lexer instance from the input but does not do any lexing.
    pub fn new(input: &'input str) -> Self {
        Self {
            input,
            iter: input.char_indices().peekable(),
            finished: false,
        }
    }

    /// consume advances the state of the lexer to the next char, yielding an Option of the current char from the input source
    fn consume(&mut self) -> Option<(usize, char)> {
        self.iter.next()
    }

    /// peek returns the next element in the iterator without consuming it
    fn peek(&mut self) -> Option<&(usize, char)> {
        self.iter.peek()
    }

    /// offset is the byte index of the next unconsumed char, or the input length at the end.
    fn offset(&mut self) -> usize {
        let end = self.input.len();
        self.peek().map_or(end, |&(index, _)| index)
    }

    /// take_while advances the input while `predicate` is true and then returns a str slice of the traversed span.
    fn take_while<P>(&mut self, predicate: P) -> &'input str
    where
        P: Fn(char) -> bool,
    {
        let start = self.offset();
        while self.peek().map_or(false, |&(_, ch)| predicate(ch)) {
            self.consume();
        }
        let end = self.offset();
        &self.input[start..end]
    }

    fn skip_whitespace(&mut self) {
        self.take_while(char::is_whitespace);
    }

    fn single(&mut self, kind: TokenKind, ch: char) -> Token {
        self.consume();
        Token::new(kind, ch.to_string())
    }

    // `=` / `==` and `!` / `!=` share a first char
    fn single_or_double(&mut self, single: TokenKind, double: TokenKind, ch: char) -> Token {
        self.consume();
        match self.peek() {
            Some(&(_, '=')) => {
                self.consume();
                let mut literal = ch.to_string();
                literal.push('=');
                Token::new(double, literal)
            }
            _ => Token::new(single, ch.to_string()),
        }
    }

    fn is_identifier_start(ch: char) -> bool {
        ch.is_alphabetic() || ch == UNDERSCORE
    }

    fn is_identifier(ch: char) -> bool {
        ch.is_alphanumeric() || ch == UNDERSCORE
    }

    fn consume_identifier(&mut self) -> Token {
        let word = self.take_while(Lexer::is_identifier);
        let kind = KEYWORDS.get(word).copied().unwrap_or(TokenKind::Ident);
        Token::new(kind, word)
    }

    fn consume_numeric(&mut self) -> Token {
        let digits = self.take_while(|ch| ch.is_ascii_digit());
        Token::new(TokenKind::Int, digits)
    }

    // no escape sequences; an unterminated string runs to the end of input
    fn consume_string(&mut self) -> Token {
        self.consume();
        let value = self.take_while(|ch| ch != STRING_CHAR);
        self.consume();
        Token::new(TokenKind::String, value)
    }
}

impl<'a> iter::Iterator for Lexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        self.skip_whitespace();

        let ch = match self.peek() {
            Some(&(_, ch)) => ch,
            None => {
                self.finished = true;
                return Some(Token::eof());
            }
        };

        let token = match ch {
            '=' => self.single_or_double(TokenKind::Assign, TokenKind::Eq, ch),
            '!' => self.single_or_double(TokenKind::Bang, TokenKind::NotEq, ch),
            '+' => self.single(TokenKind::Plus, ch),
            '-' => self.single(TokenKind::Minus, ch),
            '*' => self.single(TokenKind::Asterisk, ch),
            '/' => self.single(TokenKind::Slash, ch),
            '<' => self.single(TokenKind::Lt, ch),
            '>' => self.single(TokenKind::Gt, ch),
            ',' => self.single(TokenKind::Comma, ch),
            ';' => self.single(TokenKind::Semicolon, ch),
            ':' => self.single(TokenKind::Colon, ch),
            '(' => self.single(TokenKind::LParen, ch),
            ')' => self.single(TokenKind::RParen, ch),
            '{' => self.single(TokenKind::LBrace, ch),
            '}' => self.single(TokenKind::RBrace, ch),
            '[' => self.single(TokenKind::LBracket, ch),
            ']' => self.single(TokenKind::RBracket, ch),
            STRING_CHAR => self.consume_string(),
            ch if Lexer::is_identifier_start(ch) => self.consume_identifier(),
            ch if ch.is_ascii_digit() => self.consume_numeric(),
            ch => self.single(TokenKind::Illegal, ch),
        };
        Some(token)
    }
}
