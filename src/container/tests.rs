//! Tests for the container.

use super::*;
use crate::test_support::{CONSTRUCTED, CallableTask, test_container};

fn label_of(instance: &Instance) -> String {
    match instance {
        Instance::Component(component) => {
            let container = Arc::new(Container::new());
            let context = crate::test_support::test_context(&container);
            let task = crate::task::Task::from_shell("true", context);
            component.call("whoami", &task).unwrap()
        }
        other => panic!("expected a component, got {other:?}"),
    }
}

#[test]
fn test_classes_are_not_bindings() {
    let container = test_container();

    assert!(container.has_class("CallableTask"));
    assert!(!container.is_bound("CallableTask"));
    assert!(container.try_get("CallableTask").is_none());
}

#[test]
fn test_resolve_constructs_unbound_class() {
    let container = test_container();

    let instance = container.resolve("CallableTask").unwrap();
    assert_eq!(instance.class_name(), "CallableTask");
    assert_eq!(label_of(&instance), CONSTRUCTED);
}

#[test]
fn test_resolve_prefers_binding_over_class() {
    let container = test_container();
    container.instance("CallableTask", CallableTask::labelled("bound"));

    let instance = container.resolve("CallableTask").unwrap();
    assert_eq!(label_of(&instance), "bound");
}

#[test]
fn test_resolve_unknown_name_is_none() {
    let container = test_container();
    assert!(container.resolve("Nope").is_none());
}

#[test]
fn test_shared_instance_is_the_same_object() {
    let container = test_container();
    let bound = CallableTask::labelled("bound");
    container.instance("foobar", bound.clone());

    let first = container.try_get("foobar").unwrap();
    let second = container.try_get("foobar").unwrap();
    assert!(first.same_as(&bound));
    assert!(second.same_as(&first));
}

#[test]
fn test_factory_builds_fresh_instances() {
    let container = test_container();
    container.bind("fresh", |_| CallableTask::labelled("fresh"));

    let first = container.try_get("fresh").unwrap();
    let second = container.try_get("fresh").unwrap();
    assert!(!first.same_as(&second));
}

#[test]
fn test_factory_can_resolve_other_names() {
    let container = test_container();
    container.instance("inner", CallableTask::labelled("inner"));
    container.bind("outer", |c: &Container| c.resolve("inner").unwrap());

    let instance = container.try_get("outer").unwrap();
    assert_eq!(label_of(&instance), "inner");
}

#[test]
fn test_unbind_removes_binding() {
    let container = test_container();
    container.instance("foobar", CallableTask::labelled("bound"));
    assert!(container.is_bound("foobar"));

    assert!(container.unbind("foobar"));
    assert!(!container.is_bound("foobar"));
    assert!(container.try_get("foobar").is_none());
    assert!(!container.unbind("foobar"));
}

#[test]
fn test_alias_class_binds_constructor() {
    let container = test_container();

    assert!(container.alias_class("strategies.check", "CheckPhpStrategy"));
    assert!(container.is_bound("strategies.check"));
    let instance = container.try_get("strategies.check").unwrap();
    assert_eq!(instance.kind(), "strategy");
    assert_eq!(instance.class_name(), "CheckPhpStrategy");
}

#[test]
fn test_alias_unknown_class_binds_nothing() {
    let container = test_container();

    assert!(!container.alias_class("strategies.check", "CheckCobolStrategy"));
    assert!(!container.is_bound("strategies.check"));
}

#[test]
fn test_names_are_sorted() {
    let container = test_container();
    container.instance("zeta", CallableTask::labelled("z"));
    container.instance("alpha", CallableTask::labelled("a"));

    assert_eq!(container.bound_names(), vec!["alpha", "zeta"]);
    let classes = container.class_names();
    let mut sorted = classes.clone();
    sorted.sort();
    assert_eq!(classes, sorted);
    assert!(classes.contains(&"EchoTask".to_string()));
}

#[test]
fn test_instance_supports_methods_by_kind() {
    let container = test_container();

    let component = container.resolve("CallableTask").unwrap();
    assert!(component.supports("someMethod"));
    assert!(!component.supports("execute"));

    let task = container.resolve("EchoTask").unwrap();
    assert!(task.supports("execute"));
    assert!(task.supports("fire"));
    assert!(!task.supports("someMethod"));

    let strategy = container.resolve("CheckPhpStrategy").unwrap();
    assert!(strategy.supports("run"));
    assert!(!strategy.supports("execute"));
}
