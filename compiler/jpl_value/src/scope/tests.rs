use pretty_assertions::assert_eq;
use rustc_hash::FxHashMap;

use super::*;

#[test]
fn lookup_walks_outward() {
    let root = Scope::new().bind("a", Value::Number(1.0));
    let child = root.bind("b", Value::Number(2.0));
    assert_eq!(child.lookup("a"), Some(&Value::Number(1.0)));
    assert_eq!(child.lookup("b"), Some(&Value::Number(2.0)));
    assert_eq!(child.lookup("c"), None);
}

#[test]
fn inner_bindings_shadow_outer_ones() {
    let outer = Scope::new().bind("x", Value::Number(1.0));
    let inner = outer.bind("x", Value::Number(2.0));
    assert_eq!(inner.lookup("x"), Some(&Value::Number(2.0)));
    // The outer handle still sees the original binding.
    assert_eq!(outer.lookup("x"), Some(&Value::Number(1.0)));
}

#[test]
fn binding_never_touches_the_parent() {
    let root = Scope::new();
    let _child = root.bind("x", Value::Null);
    assert_eq!(root.lookup("x"), None);
    assert_eq!(root.depth(), 0);
}

#[test]
fn presets_form_a_single_node() {
    let mut presets = FxHashMap::default();
    presets.insert("a".to_owned(), Value::Bool(true));
    presets.insert("b".to_owned(), Value::Bool(false));
    let scope = Scope::with_presets(presets);
    assert_eq!(scope.depth(), 1);
    assert_eq!(scope.lookup("b"), Some(&Value::Bool(false)));
}

#[test]
fn binding_nothing_reuses_the_scope() {
    let scope = Scope::new().bind("a", Value::Null);
    let same = scope.bind_all(Vec::new());
    assert_eq!(same.depth(), 1);
}
