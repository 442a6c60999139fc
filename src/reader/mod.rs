pub mod ast;
mod lexer;
mod parser;
mod token;

pub use self::ast::{
    BlockStatement, Expression, Identifier, InfixOperator, PrefixOperator, Program, Statement,
};
pub use self::lexer::{lex, Lexer};
pub use self::parser::{parse, Error, Parser, Precedence};
pub use self::token::{Token, TokenKind};

/// read lexes and parses `input` in one step.
pub fn read(input: &str) -> (Program, Vec<Error>) {
    parse(Lexer::new(input))
}
