use std::fmt;
use std::mem;

use itertools::Itertools;

use super::token::Token;

/// Program is the root of every parse: the ordered top-level statements.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Program {
    pub statements: Vec<Statement>,
}

#[derive(Debug, PartialEq, Clone)]
pub enum Statement {
    Let {
        token: Token,
        name: Identifier,
        value: Expression,
    },
    Return {
        token: Token,
        value: Option<Expression>,
    },
    Expression {
        token: Token,
        expression: Expression,
    },
    Block(BlockStatement),
}

/// BlockStatement is a brace-delimited statement list, the body of `if` arms and functions.
#[derive(Debug, PartialEq, Clone)]
pub struct BlockStatement {
    pub token: Token,
    pub statements: Vec<Statement>,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Identifier {
    pub token: Token,
    pub value: String,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PrefixOperator {
    Bang,
    Minus,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum InfixOperator {
    Plus,
    Minus,
    Asterisk,
    Slash,
    Lt,
    Gt,
    Eq,
    NotEq,
}

#[derive(Debug, PartialEq, Clone)]
pub enum Expression {
    Identifier(Identifier),
    IntegerLiteral {
        token: Token,
        value: i64,
    },
    StringLiteral {
        token: Token,
        value: String,
    },
    BooleanLiteral {
        token: Token,
        value: bool,
    },
    Prefix {
        token: Token,
        operator: PrefixOperator,
        right: Box<Expression>,
    },
    Infix {
        token: Token,
        left: Box<Expression>,
        operator: InfixOperator,
        right: Box<Expression>,
    },
    If {
        token: Token,
        condition: Box<Expression>,
        consequence: BlockStatement,
        alternative: Option<BlockStatement>,
    },
    FunctionLiteral {
        token: Token,
        parameters: Vec<Identifier>,
        body: BlockStatement,
    },
    Call {
        token: Token,
        function: Box<Expression>,
        arguments: Vec<Expression>,
    },
    ArrayLiteral {
        token: Token,
        elements: Vec<Expression>,
    },
    Index {
        token: Token,
        left: Box<Expression>,
        index: Box<Expression>,
    },
    HashLiteral {
        token: Token,
        pairs: Vec<(Expression, Expression)>,
    },
}

impl Expression {
    /// token is the token this node was parsed from, kept for diagnostics.
    pub fn token(&self) -> &Token {
        use self::Expression::*;

        match self {
            Expression::Identifier(ident) => &ident.token,
            IntegerLiteral { token, .. }
            | StringLiteral { token, .. }
            | BooleanLiteral { token, .. }
            | Prefix { token, .. }
            | Infix { token, .. }
            | If { token, .. }
            | FunctionLiteral { token, .. }
            | Call { token, .. }
            | ArrayLiteral { token, .. }
            | Index { token, .. }
            | HashLiteral { token, .. } => token,
        }
    }

    fn placeholder() -> Self {
        Expression::BooleanLiteral {
            token: Token::eof(),
            value: false,
        }
    }

    // moves every child expression into `pending`, leaving `self` a leaf
    fn detach_children(&mut self, pending: &mut Vec<Expression>) {
        use self::Expression::*;

        let take = |node: &mut Box<Expression>| {
            mem::replace(&mut **node, Expression::placeholder())
        };

        match self {
            Expression::Identifier(_)
            | IntegerLiteral { .. }
            | StringLiteral { .. }
            | BooleanLiteral { .. } => {}
            Prefix { right, .. } => pending.push(take(right)),
            Infix { left, right, .. } => {
                pending.push(take(left));
                pending.push(take(right));
            }
            If {
                condition,
                consequence,
                alternative,
                ..
            } => {
                pending.push(take(condition));
                detach_statements(mem::take(&mut consequence.statements), pending);
                if let Some(alternative) = alternative {
                    detach_statements(mem::take(&mut alternative.statements), pending);
                }
            }
            FunctionLiteral { body, .. } => {
                detach_statements(mem::take(&mut body.statements), pending)
            }
            Call {
                function,
                arguments,
                ..
            } => {
                pending.push(take(function));
                pending.append(arguments);
            }
            ArrayLiteral { elements, .. } => pending.append(elements),
            Index { left, index, .. } => {
                pending.push(take(left));
                pending.push(take(index));
            }
            HashLiteral { pairs, .. } => {
                for (key, value) in pairs.drain(..) {
                    pending.push(key);
                    pending.push(value);
                }
            }
        }
    }
}

fn detach_statements(mut statements: Vec<Statement>, pending: &mut Vec<Expression>) {
    while let Some(statement) = statements.pop() {
        match statement {
            Statement::Let { value, .. } => pending.push(value),
            Statement::Return { value, .. } => pending.extend(value),
            Statement::Expression { expression, .. } => pending.push(expression),
            Statement::Block(mut block) => statements.append(&mut block.statements),
        }
    }
}

// Nested expressions are torn down from a heap worklist so the depth of a tree
// never shows up on the native stack.
impl Drop for Expression {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);

        while let Some(mut expression) = pending.pop() {
            expression.detach_children(&mut pending);
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for statement in &self.statements {
            write!(f, "{}", statement)?;
        }
        Ok(())
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Statement::Let { token, name, value } => write!(f, "{} {} = {};", token, name, value),
            Statement::Return {
                token,
                value: Some(value),
            } => write!(f, "{} {};", token, value),
            Statement::Return { token, value: None } => write!(f, "{};", token),
            Statement::Expression { expression, .. } => write!(f, "{}", expression),
            Statement::Block(block) => write!(f, "{}", block),
        }
    }
}

impl fmt::Display for BlockStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.statements.iter().format(""))
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl fmt::Display for PrefixOperator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PrefixOperator::Bang => write!(f, "!"),
            PrefixOperator::Minus => write!(f, "-"),
        }
    }
}

impl fmt::Display for InfixOperator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::InfixOperator::*;

        let symbol = match self {
            Plus => "+",
            Minus => "-",
            Asterisk => "*",
            Slash => "/",
            Lt => "<",
            Gt => ">",
            Eq => "==",
            NotEq => "!=",
        };
        write!(f, "{}", symbol)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::Expression::*;

        match self {
            Expression::Identifier(ident) => write!(f, "{}", ident),
            IntegerLiteral { value, .. } => write!(f, "{}", value),
            StringLiteral { value, .. } => write!(f, "{}", value),
            BooleanLiteral { value, .. } => write!(f, "{}", value),
            Prefix {
                operator, right, ..
            } => write!(f, "({}{})", operator, right),
            Infix {
                left,
                operator,
                right,
                ..
            } => write!(f, "({} {} {})", left, operator, right),
            If {
                condition,
                consequence,
                alternative,
                ..
            } => {
                write!(f, "if{} {}", condition, consequence)?;
                if let Some(alternative) = alternative {
                    write!(f, "else {}", alternative)?;
                }
                Ok(())
            }
            FunctionLiteral {
                token,
                parameters,
                body,
            } => write!(f, "{}({}) {}", token, parameters.iter().format(", "), body),
            Call {
                function,
                arguments,
                ..
            } => write!(f, "{}({})", function, arguments.iter().format(", ")),
            ArrayLiteral { elements, .. } => write!(f, "[{}]", elements.iter().format(", ")),
            Index { left, index, .. } => write!(f, "({}[{}])", left, index),
            HashLiteral { pairs, .. } => write!(
                f,
                "{{{}}}",
                pairs
                    .iter()
                    .map(|(key, value)| format!("{}: {}", key, value))
                    .format(", ")
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::token::TokenKind;
    use super::*;

    fn ident(name: &str) -> Identifier {
        Identifier {
            token: Token::new(TokenKind::Ident, name),
            value: name.into(),
        }
    }

    #[test]
    fn can_display_let_statement() {
        let program = Program {
            statements: vec![Statement::Let {
                token: Token::new(TokenKind::Let, "let"),
                name: ident("myVar"),
                value: Expression::Identifier(ident("anotherVar")),
            }],
        };

        assert_eq!(program.to_string(), "let myVar = anotherVar;");
    }

    fn integer(value: i64) -> Expression {
        Expression::IntegerLiteral {
            token: Token::new(TokenKind::Int, value.to_string()),
            value,
        }
    }

    #[test]
    fn can_drop_deeply_nested_expressions() {
        let mut expression = integer(1);
        for depth in 0..200_000 {
            expression = if depth % 2 == 0 {
                Expression::Prefix {
                    token: Token::new(TokenKind::Minus, "-"),
                    operator: PrefixOperator::Minus,
                    right: Box::new(expression),
                }
            } else {
                Expression::Infix {
                    token: Token::new(TokenKind::Plus, "+"),
                    left: Box::new(expression),
                    operator: InfixOperator::Plus,
                    right: Box::new(integer(2)),
                }
            };
        }
        drop(expression);
    }

    #[test]
    fn can_drop_deeply_nested_blocks() {
        let mut expression = integer(1);
        for _ in 0..100_000 {
            let body = BlockStatement {
                token: Token::new(TokenKind::LBrace, "{"),
                statements: vec![Statement::Return {
                    token: Token::new(TokenKind::Return, "return"),
                    value: Some(expression),
                }],
            };
            expression = Expression::FunctionLiteral {
                token: Token::new(TokenKind::Function, "fn"),
                parameters: vec![],
                body,
            };
        }
        drop(expression);
    }

    #[test]
    fn can_display_nested_expressions() {
        let expression = Expression::Infix {
            token: Token::new(TokenKind::Asterisk, "*"),
            left: Box::new(Expression::Prefix {
                token: Token::new(TokenKind::Minus, "-"),
                operator: PrefixOperator::Minus,
                right: Box::new(Expression::Identifier(ident("a"))),
            }),
            operator: InfixOperator::Asterisk,
            right: Box::new(Expression::Index {
                token: Token::new(TokenKind::LBracket, "["),
                left: Box::new(Expression::Identifier(ident("b"))),
                index: Box::new(Expression::IntegerLiteral {
                    token: Token::new(TokenKind::Int, "1"),
                    value: 1,
                }),
            }),
        };

        assert_eq!(expression.to_string(), "((-a) * (b[1]))");
        assert_eq!(expression.token().literal, "*");
    }

    #[test]
    fn can_display_bare_return() {
        let statement = Statement::Return {
            token: Token::new(TokenKind::Return, "return"),
            value: None,
        };
        assert_eq!(statement.to_string(), "return;");
    }
}
