//! Lexical scope chain.
//!
//! A scope is a parent-linked list of binding nodes. Nodes are never mutated
//! once published: binding a name pushes a new child node and returns a new
//! `Scope` handle, leaving every existing handle (and every closure that
//! captured one) unchanged.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::value::Value;

/// Handle to a node of the scope chain. Cloning is cheap.
#[derive(Clone, Default)]
pub struct Scope(Option<Arc<ScopeNode>>);

struct ScopeNode {
    /// Bindings introduced by this node (`FxHashMap` for fast hashing of short names).
    vars: FxHashMap<String, Value>,
    parent: Scope,
}

impl Scope {
    /// The empty root scope.
    pub fn new() -> Self {
        Scope(None)
    }

    /// A root scope holding the given presets.
    pub fn with_presets(presets: FxHashMap<String, Value>) -> Self {
        Scope::new().bind_all(presets)
    }

    /// A child scope binding `name` to `value`.
    pub fn bind(&self, name: impl Into<String>, value: Value) -> Scope {
        let mut vars = FxHashMap::default();
        vars.insert(name.into(), value);
        self.push(vars)
    }

    /// A child scope binding every entry of `bindings`.
    ///
    /// An empty iterator returns this scope unchanged.
    pub fn bind_all(&self, bindings: impl IntoIterator<Item = (String, Value)>) -> Scope {
        let vars: FxHashMap<String, Value> = bindings.into_iter().collect();
        if vars.is_empty() {
            return self.clone();
        }
        self.push(vars)
    }

    fn push(&self, vars: FxHashMap<String, Value>) -> Scope {
        Scope(Some(Arc::new(ScopeNode {
            vars,
            parent: self.clone(),
        })))
    }

    /// Look `name` up, walking outward from the innermost node.
    pub fn lookup(&self, name: &str) -> Option<&Value> {
        let mut current = self;
        while let Some(node) = &current.0 {
            if let Some(value) = node.vars.get(name) {
                return Some(value);
            }
            current = &node.parent;
        }
        None
    }

    /// Number of nodes in the chain.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self;
        while let Some(node) = &current.0 {
            depth += 1;
            current = &node.parent;
        }
        depth
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        let mut current = self;
        while let Some(node) = &current.0 {
            let mut names: Vec<&String> = node.vars.keys().collect();
            names.sort_unstable();
            list.entry(&names);
            current = &node.parent;
        }
        list.finish()
    }
}

#[cfg(test)]
mod tests;
