//! Environment frames.
//!
//! A frame maps names to values and links to its parent. Frames are built
//! up mutably (one `bind` per bound variable) and then sealed by wrapping
//! them in an `Rc` before any lambda body runs against them; after that
//! point nothing can mutate them, which is what makes sharing a captured
//! frame between closures sound.

use std::collections::HashMap;
use std::rc::Rc;

use super::value::Value;

#[derive(Debug, Default, PartialEq)]
pub struct Environment {
    bindings: HashMap<String, Value>,
    parent: Option<Rc<Environment>>,
}

impl Environment {
    /// The primordial frame: empty, no parent.
    pub fn new() -> Self {
        Environment::default()
    }

    /// A fresh frame on top of `parent`.
    pub fn child(parent: Rc<Environment>) -> Self {
        Environment {
            bindings: HashMap::new(),
            parent: Some(parent),
        }
    }

    pub fn bind(&mut self, name: impl Into<String>, value: Value) {
        self.bindings.insert(name.into(), value);
    }

    /// Walk the chain from this frame outward and return a deep copy of
    /// the first binding found. The copy keeps later tuple mutations (via
    /// `aug`) from ever leaking back into a frame.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        match self.bindings.get(name) {
            Some(value) => Some(value.clone()),
            None => self.parent.as_ref()?.lookup(name),
        }
    }
}
