use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use itertools::Itertools;

use super::object::Object;

type Scope = HashMap<String, Object>;

/// SharedEnv is a frame handle held by child frames, closures and the host.
pub type SharedEnv = Rc<RefCell<Env>>;

/// Env is one lexical frame. Frames only point outward to their parent, so the
/// parent links form an acyclic forest.
#[derive(Debug, Default)]
pub struct Env {
    bindings: Scope,
    parent: Option<SharedEnv>,
}

impl Env {
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
            parent: None,
        }
    }

    pub fn with_parent(parent: &SharedEnv) -> Self {
        Self {
            bindings: HashMap::new(),
            parent: Some(Rc::clone(parent)),
        }
    }

    pub fn shared(self) -> SharedEnv {
        Rc::new(RefCell::new(self))
    }

    pub fn add_bindings(&mut self, bindings: &[(String, Object)]) {
        bindings.iter().for_each(|(k, v)| {
            self.bindings.insert(k.clone(), v.clone());
        })
    }

    /// set always binds in this frame, shadowing any outer binding.
    pub fn set(&mut self, key: impl Into<String>, value: Object) {
        self.bindings.insert(key.into(), value);
    }

    /// get walks outward through parent frames. `None` means unbound, which is
    /// distinct from a name bound to `null`.
    pub fn get(&self, key: &str) -> Option<Object> {
        match self.bindings.get(key) {
            Some(value) => Some(value.clone()),
            None => self
                .parent
                .as_ref()
                .and_then(|parent| parent.borrow().get(key)),
        }
    }
}

impl fmt::Display for Env {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Env (some-parent? {:?}) {{", self.parent.is_some())?;
        write!(
            f,
            "{}",
            self.bindings
                .iter()
                .sorted_by(|(a, _), (b, _)| a.cmp(b))
                .map(|(k, v)| format!("{:?} {}", k, v))
                .format(" ")
        )?;
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::super::object::NULL;
    use super::*;

    #[test]
    fn can_nest_envs() {
        let mut parent = Env::new();
        let bindings = &[("hi".into(), Object::Boolean(true)), ("there".into(), NULL)];
        parent.add_bindings(bindings);
        let parent = parent.shared();

        let mut child = Env::with_parent(&parent);
        child.add_bindings(&[("in-the-child".into(), Object::Integer(22))]);

        assert_eq!(child.get("hi"), Some(Object::Boolean(true)));
        assert_eq!(child.get("in-the-child"), Some(Object::Integer(22)));
        assert_eq!(parent.borrow().get("in-the-child"), None);
    }

    #[test]
    fn unbound_is_distinct_from_null() {
        let mut env = Env::new();
        env.set("nothing", NULL);

        assert_eq!(env.get("nothing"), Some(NULL));
        assert_eq!(env.get("missing"), None);
    }

    #[test]
    fn set_shadows_without_touching_parent() {
        let parent = Env::new().shared();
        parent.borrow_mut().set("x", Object::Integer(1));

        let mut child = Env::with_parent(&parent);
        child.set("x", Object::Integer(2));

        assert_eq!(child.get("x"), Some(Object::Integer(2)));
        assert_eq!(parent.borrow().get("x"), Some(Object::Integer(1)));
    }

    #[test]
    fn child_sees_later_parent_bindings() {
        let parent = Env::new().shared();
        let child = Env::with_parent(&parent);
        parent.borrow_mut().set("late", Object::Integer(7));

        assert_eq!(child.get("late"), Some(Object::Integer(7)));
    }

    #[test]
    fn can_display_env() {
        let mut env = Env::new();
        env.set("b", Object::Integer(2));
        env.set("a", Object::Integer(1));

        assert_eq!(env.to_string(), r#"Env (some-parent? false) {"a" 1 "b" 2}"#);
    }
}
