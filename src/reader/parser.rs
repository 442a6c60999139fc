use std::collections::HashMap;
use std::mem;
use std::vec;

use lazy_static::lazy_static;
use tracing::debug;

use super::ast::{
    BlockStatement, Expression, Identifier, InfixOperator, PrefixOperator, Program, Statement,
};
use super::token::{Token, TokenKind};

/// Remaining stack below which parsing a nested expression first grows the stack.
const RED_ZONE: usize = 100 * 1024;
const STACK_GROWTH: usize = 1024 * 1024;

#[derive(Debug, PartialEq, Eq, Clone, thiserror::Error)]
pub enum Error {
    #[error("expected next token to be {expected}, got {got} instead")]
    UnexpectedToken { expected: TokenKind, got: TokenKind },
    #[error("no prefix parse function for {0} found")]
    NoPrefixParseFn(TokenKind),
    #[error("could not parse {0} as integer")]
    InvalidInteger(String),
}

/// Binding power of an operator; `LOWEST < EQUALS < LESSGREATER < SUM < PRODUCT < PREFIX < CALL < INDEX`.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub enum Precedence {
    Lowest,
    Equals,
    LessGreater,
    Sum,
    Product,
    Prefix,
    Call,
    Index,
}

type PrefixParseFn = fn(&mut Parser) -> Option<Expression>;
type InfixParseFn = fn(&mut Parser, Expression) -> Option<Expression>;

lazy_static! {
    static ref PRECEDENCES: HashMap<TokenKind, Precedence> = {
        let mut map = HashMap::new();

        map.insert(TokenKind::Eq, Precedence::Equals);
        map.insert(TokenKind::NotEq, Precedence::Equals);
        map.insert(TokenKind::Lt, Precedence::LessGreater);
        map.insert(TokenKind::Gt, Precedence::LessGreater);
        map.insert(TokenKind::Plus, Precedence::Sum);
        map.insert(TokenKind::Minus, Precedence::Sum);
        map.insert(TokenKind::Slash, Precedence::Product);
        map.insert(TokenKind::Asterisk, Precedence::Product);
        map.insert(TokenKind::LParen, Precedence::Call);
        map.insert(TokenKind::LBracket, Precedence::Index);

        map
    };

    static ref PREFIX_PARSE_FNS: HashMap<TokenKind, PrefixParseFn> = {
        let mut map: HashMap<TokenKind, PrefixParseFn> = HashMap::new();

        map.insert(TokenKind::Ident, Parser::parse_identifier);
        map.insert(TokenKind::Int, Parser::parse_integer_literal);
        map.insert(TokenKind::String, Parser::parse_string_literal);
        map.insert(TokenKind::True, Parser::parse_boolean);
        map.insert(TokenKind::False, Parser::parse_boolean);
        map.insert(TokenKind::Bang, Parser::parse_prefix_expression);
        map.insert(TokenKind::Minus, Parser::parse_prefix_expression);
        map.insert(TokenKind::LParen, Parser::parse_grouped_expression);
        map.insert(TokenKind::If, Parser::parse_if_expression);
        map.insert(TokenKind::Function, Parser::parse_function_literal);
        map.insert(TokenKind::LBracket, Parser::parse_array_literal);
        map.insert(TokenKind::LBrace, Parser::parse_hash_literal);

        map
    };

    static ref INFIX_PARSE_FNS: HashMap<TokenKind, InfixParseFn> = {
        let mut map: HashMap<TokenKind, InfixParseFn> = HashMap::new();

        for kind in &[
            TokenKind::Eq,
            TokenKind::NotEq,
            TokenKind::Lt,
            TokenKind::Gt,
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Slash,
            TokenKind::Asterisk,
        ] {
            map.insert(*kind, Parser::parse_infix_expression as InfixParseFn);
        }
        map.insert(TokenKind::LParen, Parser::parse_call_expression);
        map.insert(TokenKind::LBracket, Parser::parse_index_expression);

        map
    };
}

fn precedence_of(kind: TokenKind) -> Precedence {
    PRECEDENCES
        .get(&kind)
        .copied()
        .unwrap_or(Precedence::Lowest)
}

fn prefix_operator(kind: TokenKind) -> Option<PrefixOperator> {
    match kind {
        TokenKind::Bang => Some(PrefixOperator::Bang),
        TokenKind::Minus => Some(PrefixOperator::Minus),
        _ => None,
    }
}

fn infix_operator(kind: TokenKind) -> Option<InfixOperator> {
    let operator = match kind {
        TokenKind::Plus => InfixOperator::Plus,
        TokenKind::Minus => InfixOperator::Minus,
        TokenKind::Asterisk => InfixOperator::Asterisk,
        TokenKind::Slash => InfixOperator::Slash,
        TokenKind::Lt => InfixOperator::Lt,
        TokenKind::Gt => InfixOperator::Gt,
        TokenKind::Eq => InfixOperator::Eq,
        TokenKind::NotEq => InfixOperator::NotEq,
        _ => return None,
    };
    Some(operator)
}

/// parse builds a `Program` from `tokens`, collecting syntax errors instead of stopping at the first one.
#[tracing::instrument(level = "debug", skip_all)]
pub fn parse<T>(tokens: T) -> (Program, Vec<Error>)
where
    T: IntoIterator<Item = Token>,
{
    let mut parser = Parser::new(tokens);
    let program = parser.parse_program();
    (program, parser.into_errors())
}

/// Parser is a Pratt parser over a token stream with one token of lookahead.
///
/// Handlers signal failure by returning `None` after recording an `Error`; the
/// enclosing statement is dropped and parsing resumes at the next token.
pub struct Parser {
    tokens: vec::IntoIter<Token>,
    current: Token,
    peek: Token,
    errors: Vec<Error>,
}

impl Parser {
    pub fn new<T>(tokens: T) -> Self
    where
        T: IntoIterator<Item = Token>,
    {
        let mut tokens = tokens.into_iter().collect::<Vec<_>>().into_iter();
        let current = tokens.next().unwrap_or_else(Token::eof);
        let peek = tokens.next().unwrap_or_else(Token::eof);

        Self {
            tokens,
            current,
            peek,
            errors: vec![],
        }
    }

    pub fn into_errors(self) -> Vec<Error> {
        self.errors
    }

    /// parse_program consumes every token up to `EOF`.
    pub fn parse_program(&mut self) -> Program {
        let mut program = Program::default();

        while !self.current.is(TokenKind::Eof) {
            if let Some(statement) = self.parse_statement() {
                program.statements.push(statement);
            }
            self.next_token();
        }

        program
    }

    // an exhausted stream keeps reading as EOF
    fn next_token(&mut self) {
        let next = self.tokens.next().unwrap_or_else(Token::eof);
        self.current = mem::replace(&mut self.peek, next);
    }

    fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek.is(kind)
    }

    /// expect_peek advances only if the lookahead is `kind`, otherwise records an error.
    fn expect_peek(&mut self, kind: TokenKind) -> Option<()> {
        if self.peek_is(kind) {
            self.next_token();
            Some(())
        } else {
            self.error(Error::UnexpectedToken {
                expected: kind,
                got: self.peek.kind,
            });
            None
        }
    }

    fn error(&mut self, error: Error) {
        debug!(%error, "syntax error");
        self.errors.push(error);
    }

    fn skip_optional_semicolon(&mut self) {
        if self.peek_is(TokenKind::Semicolon) {
            self.next_token();
        }
    }

    fn parse_statement(&mut self) -> Option<Statement> {
        match self.current.kind {
            TokenKind::Let => self.parse_let_statement(),
            TokenKind::Return => self.parse_return_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    // let <identifier> = <expression>;
    fn parse_let_statement(&mut self) -> Option<Statement> {
        let token = self.current.clone();

        self.expect_peek(TokenKind::Ident)?;
        let name = self.current_identifier();

        self.expect_peek(TokenKind::Assign)?;
        self.next_token();
        let value = self.parse_expression(Precedence::Lowest)?;
        self.skip_optional_semicolon();

        Some(Statement::Let { token, name, value })
    }

    // return [<expression>];
    fn parse_return_statement(&mut self) -> Option<Statement> {
        let token = self.current.clone();

        let value = match self.peek.kind {
            TokenKind::Semicolon | TokenKind::RBrace | TokenKind::Eof => None,
            _ => {
                self.next_token();
                Some(self.parse_expression(Precedence::Lowest)?)
            }
        };
        self.skip_optional_semicolon();

        Some(Statement::Return { token, value })
    }

    fn parse_expression_statement(&mut self) -> Option<Statement> {
        let token = self.current.clone();
        let expression = self.parse_expression(Precedence::Lowest)?;
        self.skip_optional_semicolon();

        Some(Statement::Expression { token, expression })
    }

    fn parse_block_statement(&mut self) -> BlockStatement {
        let token = self.current.clone();
        let mut statements = vec![];
        self.next_token();

        while !self.current.is(TokenKind::RBrace) && !self.current.is(TokenKind::Eof) {
            if let Some(statement) = self.parse_statement() {
                statements.push(statement);
            }
            self.next_token();
        }

        BlockStatement { token, statements }
    }

    fn parse_expression(&mut self, precedence: Precedence) -> Option<Expression> {
        stacker::maybe_grow(RED_ZONE, STACK_GROWTH, || {
            self.parse_expression_with(precedence)
        })
    }

    fn parse_expression_with(&mut self, precedence: Precedence) -> Option<Expression> {
        let prefix = match PREFIX_PARSE_FNS.get(&self.current.kind) {
            Some(prefix) => *prefix,
            None => {
                self.error(Error::NoPrefixParseFn(self.current.kind));
                return None;
            }
        };
        let mut left = prefix(self)?;

        while !self.peek_is(TokenKind::Semicolon) && precedence < precedence_of(self.peek.kind) {
            let infix = match INFIX_PARSE_FNS.get(&self.peek.kind) {
                Some(infix) => *infix,
                None => return Some(left),
            };
            self.next_token();
            left = infix(self, left)?;
        }

        Some(left)
    }

    fn current_identifier(&self) -> Identifier {
        Identifier {
            token: self.current.clone(),
            value: self.current.literal.clone(),
        }
    }

    fn parse_identifier(&mut self) -> Option<Expression> {
        Some(Expression::Identifier(self.current_identifier()))
    }

    fn parse_integer_literal(&mut self) -> Option<Expression> {
        let token = self.current.clone();
        match token.literal.parse::<i64>() {
            Ok(value) => Some(Expression::IntegerLiteral { token, value }),
            Err(_) => {
                self.error(Error::InvalidInteger(token.literal));
                None
            }
        }
    }

    fn parse_string_literal(&mut self) -> Option<Expression> {
        let token = self.current.clone();
        let value = token.literal.clone();
        Some(Expression::StringLiteral { token, value })
    }

    fn parse_boolean(&mut self) -> Option<Expression> {
        let token = self.current.clone();
        let value = token.is(TokenKind::True);
        Some(Expression::BooleanLiteral { token, value })
    }

    fn parse_prefix_expression(&mut self) -> Option<Expression> {
        let token = self.current.clone();
        let operator = prefix_operator(token.kind)?;

        self.next_token();
        let right = self.parse_expression(Precedence::Prefix)?;

        Some(Expression::Prefix {
            token,
            operator,
            right: Box::new(right),
        })
    }

    fn parse_grouped_expression(&mut self) -> Option<Expression> {
        self.next_token();
        let expression = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RParen)?;
        Some(expression)
    }

    // if (<condition>) { <consequence> } [else { <alternative> }]
    fn parse_if_expression(&mut self) -> Option<Expression> {
        let token = self.current.clone();

        self.expect_peek(TokenKind::LParen)?;
        self.next_token();
        let condition = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RParen)?;

        self.expect_peek(TokenKind::LBrace)?;
        let consequence = self.parse_block_statement();

        let alternative = if self.peek_is(TokenKind::Else) {
            self.next_token();
            self.expect_peek(TokenKind::LBrace)?;
            Some(self.parse_block_statement())
        } else {
            None
        };

        Some(Expression::If {
            token,
            condition: Box::new(condition),
            consequence,
            alternative,
        })
    }

    // fn(<parameters>) { <body> }
    fn parse_function_literal(&mut self) -> Option<Expression> {
        let token = self.current.clone();

        self.expect_peek(TokenKind::LParen)?;
        let parameters = self.parse_function_parameters()?;
        self.expect_peek(TokenKind::LBrace)?;
        let body = self.parse_block_statement();

        Some(Expression::FunctionLiteral {
            token,
            parameters,
            body,
        })
    }

    fn parse_function_parameters(&mut self) -> Option<Vec<Identifier>> {
        let mut parameters = vec![];

        if self.peek_is(TokenKind::RParen) {
            self.next_token();
            return Some(parameters);
        }

        self.expect_peek(TokenKind::Ident)?;
        parameters.push(self.current_identifier());

        while self.peek_is(TokenKind::Comma) {
            self.next_token();
            self.expect_peek(TokenKind::Ident)?;
            parameters.push(self.current_identifier());
        }

        self.expect_peek(TokenKind::RParen)?;
        Some(parameters)
    }

    /// parse_expression_list reads comma-separated expressions up to and including `end`.
    fn parse_expression_list(&mut self, end: TokenKind) -> Option<Vec<Expression>> {
        let mut expressions = vec![];

        if self.peek_is(end) {
            self.next_token();
            return Some(expressions);
        }

        self.next_token();
        expressions.push(self.parse_expression(Precedence::Lowest)?);

        while self.peek_is(TokenKind::Comma) {
            self.next_token();
            self.next_token();
            expressions.push(self.parse_expression(Precedence::Lowest)?);
        }

        self.expect_peek(end)?;
        Some(expressions)
    }

    fn parse_array_literal(&mut self) -> Option<Expression> {
        let token = self.current.clone();
        let elements = self.parse_expression_list(TokenKind::RBracket)?;
        Some(Expression::ArrayLiteral { token, elements })
    }

    // {<key>: <value>, ...}
    fn parse_hash_literal(&mut self) -> Option<Expression> {
        let token = self.current.clone();
        let mut pairs = vec![];

        while !self.peek_is(TokenKind::RBrace) {
            self.next_token();
            let key = self.parse_expression(Precedence::Lowest)?;

            self.expect_peek(TokenKind::Colon)?;
            self.next_token();
            let value = self.parse_expression(Precedence::Lowest)?;
            pairs.push((key, value));

            if !self.peek_is(TokenKind::RBrace) {
                self.expect_peek(TokenKind::Comma)?;
            }
        }

        self.expect_peek(TokenKind::RBrace)?;
        Some(Expression::HashLiteral { token, pairs })
    }

    fn parse_infix_expression(&mut self, left: Expression) -> Option<Expression> {
        let token = self.current.clone();
        let operator = infix_operator(token.kind)?;
        let precedence = precedence_of(token.kind);

        self.next_token();
        let right = self.parse_expression(precedence)?;

        Some(Expression::Infix {
            token,
            left: Box::new(left),
            operator,
            right: Box::new(right),
        })
    }

    fn parse_call_expression(&mut self, function: Expression) -> Option<Expression> {
        let token = self.current.clone();
        let arguments = self.parse_expression_list(TokenKind::RParen)?;

        Some(Expression::Call {
            token,
            function: Box::new(function),
            arguments,
        })
    }

    fn parse_index_expression(&mut self, left: Expression) -> Option<Expression> {
        let token = self.current.clone();

        self.next_token();
        let index = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RBracket)?;

        Some(Expression::Index {
            token,
            left: Box::new(left),
            index: Box::new(index),
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::super::lexer::Lexer;
    use super::*;

    fn run_parse(input: &str) -> (Program, Vec<Error>) {
        parse(Lexer::new(input))
    }

    fn parse_ok(input: &str) -> Program {
        let (program, errors) = run_parse(input);
        assert!(
            errors.is_empty(),
            "parser has {} error(s) for {:?}: {:?}",
            errors.len(),
            input,
            errors
        );
        program
    }

    fn single_expression(input: &str) -> Expression {
        let mut program = parse_ok(input);
        assert_eq!(program.statements.len(), 1, "for {:?}", input);
        match program.statements.remove(0) {
            Statement::Expression { expression, .. } => expression,
            other => panic!("not an expression statement: {:?}", other),
        }
    }

    macro_rules! precedence_tests {
        ($($name:ident: $value:expr,)*) => {
            $(
                #[test]
                fn $name() {
                    let (input, expected): (&str, &str) = $value;
                    let program = parse_ok(input);
                    assert_eq!(expected, program.to_string());
                }
            )*
        }
    }

    precedence_tests! {
        prefix_binds_tighter_than_product: ("-a * b", "((-a) * b)"),
        bang_then_minus: ("!-a", "(!(-a))"),
        sum_is_left_associative: ("a + b + c", "((a + b) + c)"),
        sum_then_difference: ("a + b - c", "((a + b) - c)"),
        product_is_left_associative: ("a * b * c", "((a * b) * c)"),
        product_then_quotient: ("a * b / c", "((a * b) / c)"),
        product_inside_sum: ("a + b / c", "(a + (b / c))"),
        mixed_arithmetic: ("a + b * c + d / e - f", "(((a + (b * c)) + (d / e)) - f)"),
        two_statements: ("3 + 4; -5 * 5", "(3 + 4)((-5) * 5)"),
        comparison_below_sum: ("5 > 4 == 3 < 4", "((5 > 4) == (3 < 4))"),
        inequality: ("5 < 4 != 3 > 4", "((5 < 4) != (3 > 4))"),
        comparison_with_arithmetic: (
            "3 + 4 * 5 == 3 * 1 + 4 * 5",
            "((3 + (4 * 5)) == ((3 * 1) + (4 * 5)))"
        ),
        boolean_comparison: ("3 > 5 == false", "((3 > 5) == false)"),
        grouping_overrides: ("1 + (2 + 3) + 4", "((1 + (2 + 3)) + 4)"),
        grouped_product: ("(5 + 5) * 2", "((5 + 5) * 2)"),
        grouped_prefix: ("-(5 + 5)", "(-(5 + 5))"),
        bang_grouped: ("!(true == true)", "(!(true == true))"),
        call_binds_tightest: ("a + add(b * c) + d", "((a + add((b * c))) + d)"),
        nested_calls: (
            "add(a, b, 1, 2 * 3, 4 + 5, add(6, 7 * 8))",
            "add(a, b, 1, (2 * 3), (4 + 5), add(6, (7 * 8)))"
        ),
        call_in_product: ("add(a + b + c * d / f + g)", "add((((a + b) + ((c * d) / f)) + g))"),
        index_binds_tighter_than_product: (
            "a * [1, 2, 3, 4][b * c] * d",
            "((a * ([1, 2, 3, 4][(b * c)])) * d)"
        ),
        index_in_call: (
            "add(a * b[2], b[1], 2 * [1, 2][1])",
            "add((a * (b[2])), (b[1]), (2 * ([1, 2][1])))"
        ),
    }

    #[test]
    fn can_parse_let_statements() {
        let program = parse_ok("let x = 5;\nlet y = true;\nlet foobar = y;");
        assert_eq!(program.statements.len(), 3);

        let names = program
            .statements
            .iter()
            .map(|statement| match statement {
                Statement::Let { token, name, .. } => {
                    assert_eq!(token.literal, "let");
                    name.value.clone()
                }
                other => panic!("not a let statement: {:?}", other),
            })
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["x", "y", "foobar"]);
        assert_eq!(program.to_string(), "let x = 5;let y = true;let foobar = y;");
    }

    #[test]
    fn can_parse_return_statements() {
        let program = parse_ok("return 5;\nreturn x + y;\nreturn;");
        assert_eq!(program.statements.len(), 3);
        assert_eq!(program.to_string(), "return 5;return (x + y);return;");
    }

    #[test]
    fn can_parse_literals() {
        match &single_expression("5;") {
            Expression::IntegerLiteral { value, token } => {
                assert_eq!(*value, 5);
                assert_eq!(token.literal, "5");
            }
            other => panic!("not an integer literal: {:?}", other),
        }
        match &single_expression(r#""hello world";"#) {
            Expression::StringLiteral { value, .. } => assert_eq!(value, "hello world"),
            other => panic!("not a string literal: {:?}", other),
        }
        match &single_expression("false") {
            Expression::BooleanLiteral { value, .. } => assert!(!*value),
            other => panic!("not a boolean literal: {:?}", other),
        }
    }

    #[test]
    fn can_parse_if_else() {
        match &single_expression("if (x < y) { x } else { y }") {
            Expression::If {
                condition,
                consequence,
                alternative,
                ..
            } => {
                assert_eq!(condition.to_string(), "(x < y)");
                assert_eq!(consequence.to_string(), "x");
                assert_eq!(
                    alternative.as_ref().map(|block| block.to_string()),
                    Some("y".into())
                );
            }
            other => panic!("not an if expression: {:?}", other),
        }
    }

    #[test]
    fn can_parse_function_literals() {
        let cases = vec![
            ("fn() {};", vec![]),
            ("fn(x) {};", vec!["x"]),
            ("fn(x, y, z) { x + y; };", vec!["x", "y", "z"]),
        ];

        for (input, expected) in cases {
            match &single_expression(input) {
                Expression::FunctionLiteral { parameters, .. } => {
                    let names = parameters
                        .iter()
                        .map(|param| param.value.as_str())
                        .collect::<Vec<_>>();
                    assert_eq!(names, expected);
                }
                other => panic!("not a function literal: {:?}", other),
            }
        }
    }

    #[test]
    fn can_parse_call_expression() {
        match &single_expression("add(1, 2 * 3, 4 + 5);") {
            Expression::Call {
                function,
                arguments,
                ..
            } => {
                assert_eq!(function.to_string(), "add");
                let arguments = arguments.iter().map(|a| a.to_string()).collect::<Vec<_>>();
                assert_eq!(arguments, vec!["1", "(2 * 3)", "(4 + 5)"]);
            }
            other => panic!("not a call expression: {:?}", other),
        }
    }

    #[test]
    fn can_parse_array_and_index() {
        assert_eq!(
            single_expression("[1, 2 * 2, 3 + 3]").to_string(),
            "[1, (2 * 2), (3 + 3)]"
        );
        assert_eq!(single_expression("[]").to_string(), "[]");
        assert_eq!(
            single_expression("myArray[1 + 1]").to_string(),
            "(myArray[(1 + 1)])"
        );
    }

    #[test]
    fn can_parse_hash_literals() {
        assert_eq!(
            single_expression(r#"{"one": 1, "two": 2, 3: "three", true: 4}"#).to_string(),
            "{one: 1, two: 2, 3: three, true: 4}"
        );
        assert_eq!(single_expression("{}").to_string(), "{}");
        assert_eq!(
            single_expression(r#"{"one": 0 + 1, "two": 10 - 8}"#).to_string(),
            "{one: (0 + 1), two: (10 - 8)}"
        );
    }

    #[test]
    fn reports_missing_tokens() {
        let (_, errors) = run_parse("let = 5;");
        assert_eq!(
            errors.first(),
            Some(&Error::UnexpectedToken {
                expected: TokenKind::Ident,
                got: TokenKind::Assign,
            })
        );
        assert_eq!(
            errors[0].to_string(),
            "expected next token to be IDENT, got ASSIGN instead"
        );

        let (_, errors) = run_parse("let x 5;");
        assert_eq!(
            errors,
            vec![Error::UnexpectedToken {
                expected: TokenKind::Assign,
                got: TokenKind::Int,
            }]
        );
    }

    #[test]
    fn reports_missing_prefix_parse_fn() {
        let (_, errors) = run_parse("@");
        assert_eq!(errors, vec![Error::NoPrefixParseFn(TokenKind::Illegal)]);
        assert_eq!(
            errors[0].to_string(),
            "no prefix parse function for ILLEGAL found"
        );
    }

    #[test]
    fn reports_oversized_integer() {
        let (_, errors) = run_parse("99999999999999999999");
        assert_eq!(
            errors,
            vec![Error::InvalidInteger("99999999999999999999".into())]
        );
    }

    #[test]
    fn recovers_after_an_error() {
        let (program, errors) = run_parse("let x 5; let y = 10;");
        assert!(!errors.is_empty());
        let last = program.statements.last().map(|s| s.to_string());
        assert_eq!(last, Some("let y = 10;".into()));
    }

    #[test]
    fn empty_stream_parses_to_empty_program() {
        let (program, errors) = parse(Vec::<Token>::new());
        assert!(errors.is_empty());
        assert_eq!(program, Program::default());
    }
}
