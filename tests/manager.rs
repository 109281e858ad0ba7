//! Tests for manager-level settings: factories and the disable threshold.

use scopelog::{CaptureDestination, Context, Error, Level, Logger};
use std::sync::Arc;

#[test]
fn custom_logger_factory_presets_new_loggers() {
    let ctx = Context::new();
    ctx.manager()
        .set_logger_factory(Arc::new(|scope: &str| {
            Logger::new(scope).with_level(Level::DEBUG)
        }))
        .unwrap();

    let logger = ctx.get_logger("svc.worker");
    assert_eq!(logger.level(), Level::DEBUG);
    assert!(logger.is_enabled_for(Level::DEBUG));
}

#[test]
fn factory_is_not_applied_to_existing_loggers() {
    let ctx = Context::new();
    let before = ctx.get_logger("early");
    ctx.manager()
        .set_logger_factory(Arc::new(|scope: &str| {
            Logger::new(scope).with_propagate(false)
        }))
        .unwrap();

    assert!(before.propagate());
    assert!(!ctx.get_logger("late").propagate());
}

#[test]
fn factory_returning_wrong_scope_is_rejected() {
    let ctx = Context::new();
    let err = ctx
        .manager()
        .set_logger_factory(Arc::new(|_: &str| Logger::new("fixed")))
        .unwrap_err();
    assert!(matches!(err, Error::TypeConstraint(_)));

    // The default factory stays in place.
    assert_eq!(ctx.get_logger("x.y").scope(), "x.y");
}

#[test]
fn factory_destinations_are_used() {
    let ctx = Context::new();
    let sink = Arc::new(CaptureDestination::new());
    let factory_sink = Arc::clone(&sink);
    ctx.manager()
        .set_logger_factory(Arc::new(move |scope: &str| {
            Logger::new(scope).with_destination(factory_sink.clone())
        }))
        .unwrap();

    ctx.get_logger("svc").error("hello");
    // The probe logger was built too but never attached to the tree.
    assert_eq!(sink.lines(), vec!["ERROR:svc:hello"]);
}

#[test]
fn disable_threshold_is_tree_wide() {
    let ctx = Context::new();
    let sink = Arc::new(CaptureDestination::new());
    ctx.root().add_destination(sink.clone());
    ctx.root().set_level(Level::DEBUG);

    ctx.disable(Level::INFO);
    assert_eq!(ctx.manager().disable_threshold(), Level::INFO);

    let logger = ctx.get_logger("svc");
    logger.info("dropped");
    logger.warning("kept");
    ctx.root().debug("dropped too");

    assert_eq!(sink.lines(), vec!["WARNING:svc:kept"]);
}

#[test]
fn contexts_are_isolated() {
    let a = Context::new();
    let b = Context::new();
    a.get_logger("svc").set_level(Level::DEBUG);
    a.register_level(Level::new(5), "TRACE");

    assert_eq!(b.get_logger("svc").level(), Level::NOTSET);
    assert_eq!(b.levels().number_of("TRACE"), None);
}

#[test]
fn logger_knows_its_context() {
    let ctx = Context::new();
    let logger = ctx.get_logger("svc");
    let back = logger.context().unwrap();
    assert!(Arc::ptr_eq(&back.get_logger("svc"), &logger));
    assert!(Logger::new("loose").context().is_none());
}
