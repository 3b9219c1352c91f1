//! Tests for the built-in tasks.

use super::SequenceTask;
use crate::app::Application;
use crate::binding::strategy_key;
use crate::config::Config;
use crate::container::{Instance, Registry};
use crate::error::HoistError;
use crate::resolver::task_alias;
use crate::test_support::fixed_strategy;
use std::sync::Arc;
use tempfile::TempDir;

fn app_with(config: Config) -> Application {
    Application::new(config).unwrap()
}

#[test]
fn test_phase_task_runs_bound_strategy() {
    let app = app_with(Config::default());
    app.container()
        .instance(strategy_key("check"), fixed_strategy("Check", "all good"));

    let task = app.builder().build_task_from_class("Check").unwrap();
    assert_eq!(task.execute().unwrap(), "all good");
}

#[test]
fn test_phase_task_skips_without_strategy() {
    let app = app_with(Config::default());
    app.container().unbind(&strategy_key("migrate"));

    let task = app.builder().build_task_from_class("Migrate").unwrap();
    assert_eq!(
        task.execute().unwrap(),
        "No Migrate strategy configured, skipping"
    );
}

#[test]
fn test_phase_task_sees_binding_changes() {
    let app = app_with(Config::default());
    let task = app.builder().build_task_from_class("Test").unwrap();

    app.container()
        .instance(strategy_key("test"), fixed_strategy("Test", "first"));
    assert_eq!(task.execute().unwrap(), "first");

    app.container()
        .instance(strategy_key("test"), fixed_strategy("Test", "second"));
    assert_eq!(task.execute().unwrap(), "second");
}

#[test]
fn test_deploy_runs_queue_in_order() {
    let mut config = Config::default();
    config.deploy_queue = vec!["echo one".to_string(), "echo two".to_string()];
    let app = app_with(config);

    let task = app.builder().build_task_from_class("Deploy").unwrap();
    assert_eq!(task.class_name(), "Deploy");
    assert_eq!(task.execute().unwrap(), "one\ntwo");
}

#[test]
fn test_deploy_queue_can_mix_phases_and_commands() {
    let mut config = Config::default();
    config.deploy_queue = vec!["Check".to_string(), "echo shipped".to_string()];
    let app = app_with(config);
    app.container()
        .instance(strategy_key("check"), fixed_strategy("Check", "checked"));

    let task = app.builder().build_task_from_class("Deploy").unwrap();
    assert_eq!(task.execute().unwrap(), "checked\nshipped");
}

#[test]
fn test_custom_task_resolves_by_name() {
    let mut config = Config::default();
    config.tasks.insert(
        "warm-cache".to_string(),
        vec!["echo warming".to_string(), "echo warm".to_string()],
    );
    let app = app_with(config);

    let task = app.builder().build_task("warm-cache").unwrap();
    assert_eq!(task.class_name(), "warm-cache");
    assert_eq!(task.description(), "Custom task 'warm-cache'");
    assert_eq!(task.execute().unwrap(), "warming\nwarm");
}

#[test]
fn test_sequence_forwards_arguments_to_steps() {
    let mut config = Config::default();
    config
        .tasks
        .insert("say".to_string(), vec!["echo said".to_string()]);
    let app = app_with(config);

    let task = app
        .builder()
        .build_task("say")
        .unwrap()
        .with_arguments(vec!["hello".to_string()]);
    assert_eq!(task.execute().unwrap(), "said hello");
}

#[test]
fn test_sequence_with_bad_step_runs_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let marker = temp_dir.path().join("marker");
    let mut config = Config::default();
    config.tasks.insert(
        "broken".to_string(),
        vec![
            format!("touch {}", shell_words::quote(&marker.to_string_lossy())),
            "Nope".to_string(),
        ],
    );
    let app = app_with(config);

    let task = app.builder().build_task("broken").unwrap();
    let err = task.execute().unwrap_err();

    assert!(matches!(
        err,
        HoistError::TaskComposition { index: Some(1), .. }
    ));
    assert!(!marker.exists());
}

#[test]
fn test_sequence_stops_at_first_failing_step() {
    let mut config = Config::default();
    config.tasks.insert(
        "halts".to_string(),
        vec!["exit 4".to_string(), "echo unreachable".to_string()],
    );
    let app = app_with(config);

    let err = app.builder().build_task("halts").unwrap().execute().unwrap_err();
    assert!(matches!(err, HoistError::CommandFailed { .. }));
}

#[test]
fn test_custom_tasks_are_bindings_not_classes() {
    let mut config = Config::default();
    config
        .tasks
        .insert("warm-cache".to_string(), vec!["echo warm".to_string()]);
    let app = app_with(config);

    assert!(app.container().is_bound("tasks.warm-cache"));
    assert!(!app.container().has_class("warm-cache"));
}

#[test]
fn test_sequences_running_each_other_fail_instead_of_recursing() {
    let app = app_with(Config::default());
    for (name, step) in [("a", "b"), ("b", "a")] {
        app.container().instance(
            task_alias(name),
            Instance::Task(Arc::new(SequenceTask::new(
                name,
                "bound directly",
                vec![step.to_string()],
            ))),
        );
    }

    let err = app.builder().build_task("a").unwrap().execute().unwrap_err();
    match err {
        HoistError::TaskComposition {
            reference, reason, ..
        } => {
            assert_eq!(reference, "a");
            assert!(reason.contains("a -> b -> a"));
        }
        other => panic!("expected a composition error, got {other}"),
    }
}

#[test]
fn test_sequence_may_run_the_same_step_twice() {
    let mut config = Config::default();
    config
        .tasks
        .insert("hello".to_string(), vec!["echo hello".to_string()]);
    config
        .tasks
        .insert("twice".to_string(), vec!["hello".to_string(), "hello".to_string()]);
    let app = app_with(config);

    let task = app.builder().build_task("twice").unwrap();
    assert_eq!(task.execute().unwrap(), "hello\nhello");
}
