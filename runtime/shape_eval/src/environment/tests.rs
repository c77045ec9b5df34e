use super::*;
use pretty_assertions::assert_eq;

fn name(s: &str) -> Name {
    Name::new(s)
}

#[test]
fn test_scope_define_lookup() {
    let mut scope = Scope::new();
    scope.define(name("x"), Value::int(42));
    assert_eq!(scope.lookup("x"), Some(Value::int(42)));
    assert_eq!(scope.lookup("y"), None);
}

#[test]
fn test_scope_shadowing() {
    let parent = LocalScope::new(Scope::new());
    parent
        .borrow_mut()
        .define(name("x"), Value::int(1));

    let mut child = Scope::with_parent(parent);
    child.define(name("x"), Value::int(2));
    assert_eq!(child.lookup("x"), Some(Value::int(2)));
}

#[test]
fn test_environment_push_pop() {
    let mut env = Environment::new();
    env.define(name("x"), Value::int(1));

    env.push_scope();
    env.define(name("x"), Value::int(2));
    assert_eq!(env.lookup("x"), Some(Value::int(2)));

    env.pop_scope();
    assert_eq!(env.lookup("x"), Some(Value::int(1)));
}

#[test]
fn test_global_scope_is_never_popped() {
    let mut env = Environment::new();
    env.define(name("g"), Value::Bool(true));
    env.pop_scope();
    env.pop_scope();
    assert_eq!(env.depth(), 1);
    assert_eq!(env.lookup("g"), Some(Value::Bool(true)));
}

#[test]
fn test_define_all_targets_current_scope() {
    let mut env = Environment::new();
    env.define(name("a"), Value::int(0));

    env.push_scope();
    env.define_all([(name("a"), Value::int(1))].into_iter().collect());
    assert_eq!(env.lookup("a"), Some(Value::int(1)));
    env.pop_scope();

    assert_eq!(env.lookup("a"), Some(Value::int(0)));
}

#[test]
fn test_define_all_merges_bindings() {
    let bindings: Bindings = [
        (name("a"), Value::int(1)),
        (name("b"), Value::string("two")),
    ]
    .into_iter()
    .collect();
    let mut env = Environment::new();
    env.define_all(bindings);
    assert_eq!(env.lookup("a"), Some(Value::int(1)));
    assert_eq!(env.lookup("b"), Some(Value::string("two")));
}

#[test]
fn test_scoped_guard_pops_on_drop() {
    let mut env = Environment::new();
    {
        let mut scoped = env.scoped();
        scoped.define(name("tmp"), Value::None);
        assert_eq!(scoped.depth(), 2);
        assert_eq!(scoped.lookup("tmp"), Some(Value::None));
    }
    assert_eq!(env.depth(), 1);
    assert_eq!(env.lookup("tmp"), None);
}
