use std::collections::HashMap;

use tracing::trace;

use super::object::{Builtin, BuiltinFn, Object, NULL};

fn wrong_arity(got: usize, want: usize) -> Object {
    Object::error(format!(
        "wrong number of arguments. got={}, want={}",
        got, want
    ))
}

fn expect_array<'a>(name: &str, arg: &'a Object) -> Result<&'a [Object], Object> {
    match arg {
        Object::Array(elements) => Ok(elements),
        other => Err(Object::error(format!(
            "argument to `{}` must be ARRAY, got {}",
            name,
            other.type_name()
        ))),
    }
}

fn len(args: Vec<Object>) -> Object {
    if args.len() != 1 {
        return wrong_arity(args.len(), 1);
    }
    match &args[0] {
        Object::String(s) => Object::Integer(s.len() as i64),
        Object::Array(elements) => Object::Integer(elements.len() as i64),
        other => Object::error(format!(
            "argument to `len` not supported, got {}",
            other.type_name()
        )),
    }
}

fn first(args: Vec<Object>) -> Object {
    if args.len() != 1 {
        return wrong_arity(args.len(), 1);
    }
    match expect_array("first", &args[0]) {
        Ok(elements) => elements.first().cloned().unwrap_or(NULL),
        Err(e) => e,
    }
}

fn last(args: Vec<Object>) -> Object {
    if args.len() != 1 {
        return wrong_arity(args.len(), 1);
    }
    match expect_array("last", &args[0]) {
        Ok(elements) => elements.last().cloned().unwrap_or(NULL),
        Err(e) => e,
    }
}

fn rest(args: Vec<Object>) -> Object {
    if args.len() != 1 {
        return wrong_arity(args.len(), 1);
    }
    match expect_array("rest", &args[0]) {
        Ok(elements) => match elements.split_first() {
            Some((_, rest)) => Object::Array(rest.to_vec()),
            None => NULL,
        },
        Err(e) => e,
    }
}

fn push(args: Vec<Object>) -> Object {
    if args.len() != 2 {
        return wrong_arity(args.len(), 2);
    }
    match expect_array("push", &args[0]) {
        Ok(elements) => {
            let mut elements = elements.to_vec();
            elements.push(args[1].clone());
            Object::Array(elements)
        }
        Err(e) => e,
    }
}

fn puts(args: Vec<Object>) -> Object {
    for arg in args {
        println!("{}", arg);
    }
    NULL
}

static PRELUDE_BINDINGS: &[(&str, BuiltinFn)] = &[
    ("len", len),
    ("first", first),
    ("last", last),
    ("rest", rest),
    ("push", push),
    ("puts", puts),
];

/// Builtins is the registry consulted when an identifier is unbound in every frame.
#[derive(Debug, Clone, Default)]
pub struct Builtins {
    bindings: HashMap<String, Builtin>,
}

impl Builtins {
    /// new is an empty registry; see `prelude` for the standard one.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prelude() -> Self {
        let mut builtins = Self::new();
        for (name, func) in PRELUDE_BINDINGS {
            builtins.register(*name, *func);
        }
        builtins
    }

    /// register adds or replaces the builtin called `name`.
    pub fn register(&mut self, name: impl Into<String>, func: BuiltinFn) {
        let name = name.into();
        trace!(%name, "registering builtin");
        self.bindings.insert(name.clone(), Builtin::new(name, func));
    }

    pub fn get(&self, name: &str) -> Option<Object> {
        self.bindings.get(name).cloned().map(Object::Builtin)
    }
}
