use std::fmt;
use std::mem;
use std::rc::Rc;

use indexmap::IndexMap;
use itertools::Itertools;

use super::env::SharedEnv;
use crate::reader::{BlockStatement, Identifier};

pub const TRUE: Object = Object::Boolean(true);
pub const FALSE: Object = Object::Boolean(false);
pub const NULL: Object = Object::Null;

const RED_ZONE: usize = 100 * 1024;
const STACK_GROWTH: usize = 1024 * 1024;

pub type BuiltinFn = fn(Vec<Object>) -> Object;

/// HashPairs keeps the original key object next to each value, in insertion order.
pub type HashPairs = IndexMap<HashKey, (Object, Object)>;

#[derive(Debug, PartialEq)]
pub enum Object {
    Integer(i64),
    Boolean(bool),
    String(String),
    Null,
    Array(Vec<Object>),
    Hash(HashPairs),
    Function(Rc<Function>),
    Builtin(Builtin),
    Error(String),
}

/// HashKey is the subset of objects usable as map keys. The variant is part of
/// the key, so `1` and `"1"` are distinct entries.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub enum HashKey {
    Integer(i64),
    Boolean(bool),
    String(String),
}

/// Function is a closure: its code plus the frame it was defined in.
pub struct Function {
    pub parameters: Vec<Identifier>,
    pub body: BlockStatement,
    pub env: SharedEnv,
}

#[derive(Clone)]
pub struct Builtin {
    pub name: String,
    pub func: BuiltinFn,
}

impl Object {
    pub fn from_bool(value: bool) -> Self {
        if value {
            TRUE
        } else {
            FALSE
        }
    }

    /// type_name is the upper-case tag used in runtime error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Object::Integer(_) => "INTEGER",
            Object::Boolean(_) => "BOOLEAN",
            Object::String(_) => "STRING",
            Object::Null => "NULL",
            Object::Array(_) => "ARRAY",
            Object::Hash(_) => "HASH",
            Object::Function(_) => "FUNCTION",
            Object::Builtin(_) => "BUILTIN",
            Object::Error(_) => "ERROR",
        }
    }

    /// is_truthy treats only `null` and `false` as false.
    pub fn is_truthy(&self) -> bool {
        match self {
            Object::Null | Object::Boolean(false) => false,
            _ => true,
        }
    }

    pub fn is_error(&self) -> bool {
        match self {
            Object::Error(_) => true,
            _ => false,
        }
    }

    pub fn hash_key(&self) -> Option<HashKey> {
        match self {
            Object::Integer(value) => Some(HashKey::Integer(*value)),
            Object::Boolean(value) => Some(HashKey::Boolean(*value)),
            Object::String(value) => Some(HashKey::String(value.clone())),
            _ => None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Object::Error(message.into())
    }
}

// containers may nest arbitrarily deep, so copying them grows the stack on demand
impl Clone for Object {
    fn clone(&self) -> Self {
        match self {
            Object::Integer(n) => Object::Integer(*n),
            Object::Boolean(b) => Object::Boolean(*b),
            Object::String(s) => Object::String(s.clone()),
            Object::Null => Object::Null,
            Object::Array(elements) => {
                stacker::maybe_grow(RED_ZONE, STACK_GROWTH, || Object::Array(elements.clone()))
            }
            Object::Hash(pairs) => {
                stacker::maybe_grow(RED_ZONE, STACK_GROWTH, || Object::Hash(pairs.clone()))
            }
            Object::Function(function) => Object::Function(Rc::clone(function)),
            Object::Builtin(builtin) => Object::Builtin(builtin.clone()),
            Object::Error(message) => Object::Error(message.clone()),
        }
    }
}

impl Drop for Object {
    fn drop(&mut self) {
        let mut pending = match self {
            Object::Array(elements) => mem::take(elements),
            Object::Hash(pairs) => detach_values(pairs),
            _ => return,
        };

        while let Some(mut object) = pending.pop() {
            match &mut object {
                Object::Array(elements) => pending.append(elements),
                Object::Hash(pairs) => pending.extend(detach_values(pairs)),
                _ => {}
            }
        }
    }
}

// keys are always scalars; only values can hold further containers
fn detach_values(pairs: &mut HashPairs) -> Vec<Object> {
    pairs.drain(..).map(|(_, (_, value))| value).collect()
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Object::Integer(n) => write!(f, "{}", n),
            Object::Boolean(b) => write!(f, "{}", b),
            Object::String(s) => write!(f, "{}", s),
            Object::Null => write!(f, "null"),
            Object::Array(elements) => stacker::maybe_grow(RED_ZONE, STACK_GROWTH, || {
                write!(f, "[{}]", elements.iter().format(", "))
            }),
            Object::Hash(pairs) => stacker::maybe_grow(RED_ZONE, STACK_GROWTH, || {
                write!(
                    f,
                    "{{{}}}",
                    pairs
                        .values()
                        .map(|(key, value)| format!("{}: {}", key, value))
                        .format(", ")
                )
            }),
            Object::Function(function) => write!(f, "{}", function),
            Object::Builtin(builtin) => write!(f, "builtin function {}", builtin.name),
            Object::Error(message) => write!(f, "ERROR: {}", message),
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "fn({}) {{\n{}\n}}",
            self.parameters.iter().format(", "),
            self.body
        )
    }
}

// the captured frame may hold this function, so it is never printed or compared structurally
impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Function")
            .field("parameters", &self.parameters)
            .field("body", &self.body)
            .finish()
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.parameters == other.parameters
            && self.body == other.body
            && Rc::ptr_eq(&self.env, &other.env)
    }
}

impl Builtin {
    pub fn new(name: impl Into<String>, func: BuiltinFn) -> Self {
        Self {
            name: name.into(),
            func,
        }
    }

    pub fn call(&self, args: Vec<Object>) -> Object {
        (self.func)(args)
    }
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Builtin({})", self.name)
    }
}

// builtins are identified by their registered name
impl PartialEq for Builtin {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_values_share_a_hash_key() {
        let hello1 = Object::String("Hello World".into());
        let hello2 = Object::String("Hello World".into());
        let diff = Object::String("My name is johnny".into());

        assert_eq!(hello1.hash_key(), hello2.hash_key());
        assert_ne!(hello1.hash_key(), diff.hash_key());
        assert_eq!(Object::Integer(4).hash_key(), Object::Integer(4).hash_key());
    }

    #[test]
    fn hash_keys_are_tagged_by_type() {
        assert_ne!(
            Object::Integer(1).hash_key(),
            Object::String("1".into()).hash_key()
        );
        assert_ne!(
            Object::Boolean(true).hash_key(),
            Object::String("true".into()).hash_key()
        );
    }

    #[test]
    fn only_scalars_are_hashable() {
        assert_eq!(NULL.hash_key(), None);
        assert_eq!(Object::Array(vec![]).hash_key(), None);
        assert_eq!(Object::error("boom").hash_key(), None);
    }

    #[test]
    fn can_inspect_objects() {
        let mut pairs = HashPairs::new();
        pairs.insert(
            HashKey::String("a".into()),
            (Object::String("a".into()), Object::Integer(1)),
        );
        pairs.insert(HashKey::Integer(2), (Object::Integer(2), TRUE));

        let cases = vec![
            (Object::Integer(-5), "-5"),
            (TRUE, "true"),
            (NULL, "null"),
            (Object::String("hi".into()), "hi"),
            (
                Object::Array(vec![Object::Integer(1), Object::Integer(2)]),
                "[1, 2]",
            ),
            (Object::Hash(pairs), "{a: 1, 2: true}"),
            (Object::error("type mismatch"), "ERROR: type mismatch"),
        ];

        for (object, expected) in cases {
            assert_eq!(object.to_string(), expected);
        }
    }

    fn nested_arrays(depth: usize) -> Object {
        (0..depth).fold(Object::Integer(0), |inner, _| Object::Array(vec![inner]))
    }

    #[test]
    fn can_drop_deeply_nested_containers() {
        drop(nested_arrays(200_000));

        let mut object = Object::Integer(0);
        for depth in 0..200_000 {
            let mut pairs = HashPairs::new();
            pairs.insert(HashKey::Integer(depth), (Object::Integer(depth), object));
            object = Object::Hash(pairs);
        }
        drop(object);
    }

    #[test]
    fn can_copy_and_inspect_deeply_nested_arrays() {
        let depth = 50_000;
        let original = nested_arrays(depth);
        let copy = original.clone();
        drop(original);

        let rendered = copy.to_string();
        assert_eq!(rendered.len(), 2 * depth + 1);
        assert!(rendered.starts_with("[[[") && rendered.ends_with("0]]]"));
    }

    #[test]
    fn truthiness() {
        assert!(!NULL.is_truthy());
        assert!(!FALSE.is_truthy());
        assert!(TRUE.is_truthy());
        assert!(Object::Integer(0).is_truthy());
        assert!(Object::String("".into()).is_truthy());
    }
}
