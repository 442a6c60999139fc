use std::cell::Cell;
use std::convert::TryFrom;
use std::rc::Rc;
use std::result;

use tracing::{debug, trace};

use super::env::{Env, SharedEnv};
use super::object::{Function, HashPairs, Object, NULL};
use super::prelude::Builtins;
use crate::reader::{
    BlockStatement, Expression, Identifier, InfixOperator, PrefixOperator, Program, Statement,
};

/// Result carries either a value or a `Signal` that unwinds the evaluation.
pub type Result<T> = result::Result<T, Signal>;

/// Nested calls allowed before evaluation gives up with `CallDepthExceeded`.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 10_000;

const RED_ZONE: usize = 100 * 1024;
const STACK_GROWTH: usize = 1024 * 1024;

#[derive(Debug, PartialEq, Clone, thiserror::Error)]
pub enum Error {
    #[error("type mismatch: {left} {operator} {right}")]
    TypeMismatch {
        left: &'static str,
        operator: InfixOperator,
        right: &'static str,
    },
    #[error("unknown operator: {operator}{right}")]
    UnknownPrefixOperator {
        operator: PrefixOperator,
        right: &'static str,
    },
    #[error("unknown operator: {left} {operator} {right}")]
    UnknownInfixOperator {
        left: &'static str,
        operator: InfixOperator,
        right: &'static str,
    },
    #[error("identifier not found: {0}")]
    IdentifierNotFound(String),
    #[error("not a function: {0}")]
    NotAFunction(&'static str),
    /// WrongArity is a call whose argument count does not match the function's parameter count.
    #[error("wrong number of arguments: want={expected}, got={got}")]
    WrongArity { expected: usize, got: usize },
    #[error("index operator not supported: {0}")]
    IndexNotSupported(&'static str),
    #[error("object type not supported for key, got={0}")]
    UnusableHashKey(&'static str),
    #[error("division by zero")]
    DivisionByZero,
    #[error("maximum call depth exceeded ({0})")]
    CallDepthExceeded(usize),
    /// Builtin wraps the message of an error object returned by a builtin.
    #[error("{0}")]
    Builtin(String),
}

/// Signal is everything that stops a statement sequence early.
#[derive(Debug, PartialEq, Clone)]
pub enum Signal {
    /// Return unwinds to the nearest function call, or to the top of the program.
    Return(Object),
    /// Error unwinds all the way to the top; call boundaries do not stop it.
    Error(Error),
}

impl From<Error> for Signal {
    fn from(error: Error) -> Self {
        Signal::Error(error)
    }
}

/// Evaluator walks a `Program` against an environment, resolving unbound
/// identifiers through its builtin registry.
#[derive(Debug)]
pub struct Evaluator {
    builtins: Builtins,
    max_call_depth: usize,
    depth: Cell<usize>,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    pub fn new() -> Self {
        Self::with_builtins(Builtins::prelude())
    }

    pub fn with_builtins(builtins: Builtins) -> Self {
        Self {
            builtins,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            depth: Cell::new(0),
        }
    }

    pub fn with_max_call_depth(mut self, max_call_depth: usize) -> Self {
        self.max_call_depth = max_call_depth;
        self
    }

    pub fn builtins_mut(&mut self) -> &mut Builtins {
        &mut self.builtins
    }

    /// eval runs `program` in `env`. A top-level `return` yields its value and
    /// a runtime error becomes an `Object::Error`.
    #[tracing::instrument(level = "debug", skip_all, fields(statements = program.statements.len()))]
    pub fn eval(&self, program: &Program, env: &SharedEnv) -> Object {
        self.depth.set(0);

        match self.eval_statements(&program.statements, env) {
            Ok(value) | Err(Signal::Return(value)) => value,
            Err(Signal::Error(error)) => {
                debug!(%error, "evaluation failed");
                Object::Error(error.to_string())
            }
        }
    }

    fn eval_statements(&self, statements: &[Statement], env: &SharedEnv) -> Result<Object> {
        statements
            .iter()
            .try_fold(NULL, |_, statement| self.eval_statement(statement, env))
    }

    // blocks share the enclosing frame; only calls open a new one
    fn eval_block(&self, block: &BlockStatement, env: &SharedEnv) -> Result<Object> {
        self.eval_statements(&block.statements, env)
    }

    fn eval_statement(&self, statement: &Statement, env: &SharedEnv) -> Result<Object> {
        match statement {
            Statement::Let { name, value, .. } => {
                let value = self.eval_expression(value, env)?;
                env.borrow_mut().set(name.value.clone(), value);
                Ok(NULL)
            }
            Statement::Return { value, .. } => {
                let value = match value {
                    Some(value) => self.eval_expression(value, env)?,
                    None => NULL,
                };
                Err(Signal::Return(value))
            }
            Statement::Expression { expression, .. } => self.eval_expression(expression, env),
            Statement::Block(block) => self.eval_block(block, env),
        }
    }

    fn eval_expression(&self, expression: &Expression, env: &SharedEnv) -> Result<Object> {
        stacker::maybe_grow(RED_ZONE, STACK_GROWTH, || {
            self.eval_expression_with(expression, env)
        })
    }

    fn eval_expression_with(&self, expression: &Expression, env: &SharedEnv) -> Result<Object> {
        use self::Expression::*;

        let node = match expression {
            IntegerLiteral { value, .. } => Object::Integer(*value),
            StringLiteral { value, .. } => Object::String(value.clone()),
            BooleanLiteral { value, .. } => Object::from_bool(*value),
            Expression::Identifier(ident) => self.eval_identifier(ident, env)?,
            Prefix {
                operator, right, ..
            } => {
                let right = self.eval_expression(right, env)?;
                eval_prefix_expression(*operator, right)?
            }
            Infix {
                left,
                operator,
                right,
                ..
            } => {
                let left = self.eval_expression(left, env)?;
                let right = self.eval_expression(right, env)?;
                eval_infix_expression(*operator, left, right)?
            }
            If {
                condition,
                consequence,
                alternative,
                ..
            } => {
                let condition = self.eval_expression(condition, env)?;
                if condition.is_truthy() {
                    self.eval_block(consequence, env)?
                } else if let Some(alternative) = alternative {
                    self.eval_block(alternative, env)?
                } else {
                    NULL
                }
            }
            FunctionLiteral {
                parameters, body, ..
            } => Object::Function(Rc::new(Function {
                parameters: parameters.clone(),
                body: body.clone(),
                env: Rc::clone(env),
            })),
            Call {
                function,
                arguments,
                ..
            } => {
                let function = self.eval_expression(function, env)?;
                let args = self.eval_expressions(arguments, env)?;
                self.apply(&function, args)?
            }
            ArrayLiteral { elements, .. } => Object::Array(self.eval_expressions(elements, env)?),
            Index { left, index, .. } => {
                let left = self.eval_expression(left, env)?;
                let index = self.eval_expression(index, env)?;
                eval_index_expression(&left, &index)?
            }
            HashLiteral { pairs, .. } => self.eval_hash_literal(pairs, env)?,
        };
        Ok(node)
    }

    // frames first, then the builtin registry
    fn eval_identifier(&self, ident: &Identifier, env: &SharedEnv) -> Result<Object> {
        let bound = env.borrow().get(&ident.value);
        bound
            .or_else(|| self.builtins.get(&ident.value))
            .ok_or_else(|| Error::IdentifierNotFound(ident.value.clone()).into())
    }

    /// eval_expressions evaluates left to right and stops at the first signal.
    fn eval_expressions(&self, expressions: &[Expression], env: &SharedEnv) -> Result<Vec<Object>> {
        expressions
            .iter()
            .map(|expression| self.eval_expression(expression, env))
            .collect::<Result<Vec<_>>>()
    }

    fn eval_hash_literal(
        &self,
        pairs: &[(Expression, Expression)],
        env: &SharedEnv,
    ) -> Result<Object> {
        let mut hash = HashPairs::with_capacity(pairs.len());

        for (key, value) in pairs {
            let key = self.eval_expression(key, env)?;
            let hash_key = key
                .hash_key()
                .ok_or_else(|| Error::UnusableHashKey(key.type_name()))?;
            let value = self.eval_expression(value, env)?;
            hash.insert(hash_key, (key, value));
        }

        Ok(Object::Hash(hash))
    }

    fn apply(&self, function: &Object, args: Vec<Object>) -> Result<Object> {
        match function {
            Object::Function(function) => self.apply_function(function, args),
            Object::Builtin(builtin) => {
                trace!(name = %builtin.name, args = args.len(), "calling builtin");
                let result = builtin.call(args);
                if let Object::Error(message) = &result {
                    return Err(Error::Builtin(message.clone()).into());
                }
                Ok(result)
            }
            other => Err(Error::NotAFunction(other.type_name()).into()),
        }
    }

    fn apply_function(&self, function: &Function, args: Vec<Object>) -> Result<Object> {
        if function.parameters.len() != args.len() {
            return Err(Error::WrongArity {
                expected: function.parameters.len(),
                got: args.len(),
            }
            .into());
        }

        let depth = self.depth.get();
        if depth >= self.max_call_depth {
            return Err(Error::CallDepthExceeded(self.max_call_depth).into());
        }
        trace!(depth, arity = args.len(), "applying function");

        let mut local_env = Env::with_parent(&function.env);
        local_env.add_bindings(zip_for_env(&function.parameters, args).as_slice());
        let local_env = local_env.shared();

        self.depth.set(depth + 1);
        let result = self.eval_block(&function.body, &local_env);
        self.depth.set(depth);

        match result {
            Ok(value) | Err(Signal::Return(value)) => Ok(value),
            Err(error) => Err(error),
        }
    }
}

// zip_for_env pairs each parameter name with its positional argument.
fn zip_for_env(params: &[Identifier], args: Vec<Object>) -> Vec<(String, Object)> {
    params
        .iter()
        .map(|param| param.value.clone())
        .zip(args)
        .collect::<Vec<_>>()
}

fn eval_prefix_expression(operator: PrefixOperator, right: Object) -> result::Result<Object, Error> {
    match operator {
        PrefixOperator::Bang => Ok(Object::from_bool(!right.is_truthy())),
        PrefixOperator::Minus => match &right {
            Object::Integer(value) => Ok(Object::Integer(value.wrapping_neg())),
            other => Err(Error::UnknownPrefixOperator {
                operator,
                right: other.type_name(),
            }),
        },
    }
}

fn eval_infix_expression(
    operator: InfixOperator,
    left: Object,
    right: Object,
) -> result::Result<Object, Error> {
    let unknown = |left: &Object, right: &Object| Error::UnknownInfixOperator {
        left: left.type_name(),
        operator,
        right: right.type_name(),
    };

    match (&left, &right) {
        (Object::Integer(l), Object::Integer(r)) => eval_integer_infix_expression(operator, *l, *r),
        (Object::Boolean(l), Object::Boolean(r)) => match operator {
            InfixOperator::Eq => Ok(Object::from_bool(l == r)),
            InfixOperator::NotEq => Ok(Object::from_bool(l != r)),
            _ => Err(unknown(&left, &right)),
        },
        (Object::String(l), Object::String(r)) => match operator {
            InfixOperator::Plus => Ok(Object::String(format!("{}{}", l, r))),
            _ => Err(unknown(&left, &right)),
        },
        _ => Err(Error::TypeMismatch {
            left: left.type_name(),
            operator,
            right: right.type_name(),
        }),
    }
}

// Arithmetic wraps on overflow; `/` truncates toward zero.
fn eval_integer_infix_expression(
    operator: InfixOperator,
    left: i64,
    right: i64,
) -> result::Result<Object, Error> {
    use self::InfixOperator::*;

    let result = match operator {
        Plus => Object::Integer(left.wrapping_add(right)),
        Minus => Object::Integer(left.wrapping_sub(right)),
        Asterisk => Object::Integer(left.wrapping_mul(right)),
        Slash => {
            if right == 0 {
                return Err(Error::DivisionByZero);
            }
            Object::Integer(left.wrapping_div(right))
        }
        Lt => Object::from_bool(left < right),
        Gt => Object::from_bool(left > right),
        Eq => Object::from_bool(left == right),
        NotEq => Object::from_bool(left != right),
    };
    Ok(result)
}

// out-of-range array indexes, negative ones included, read as null
fn eval_index_expression(left: &Object, index: &Object) -> result::Result<Object, Error> {
    match (left, index) {
        (Object::Array(elements), Object::Integer(i)) => Ok(usize::try_from(*i)
            .ok()
            .and_then(|i| elements.get(i))
            .cloned()
            .unwrap_or(NULL)),
        (Object::Hash(pairs), key) => match key.hash_key() {
            Some(hash_key) => Ok(pairs
                .get(&hash_key)
                .map(|(_, value)| value.clone())
                .unwrap_or(NULL)),
            None => Err(Error::IndexNotSupported(left.type_name())),
        },
        _ => Err(Error::IndexNotSupported(left.type_name())),
    }
}
