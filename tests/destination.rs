//! Tests for the destination contract and the name table.

use scopelog::{
    CaptureDestination, Context, Destination, DestinationCore, Error, Level, LogOptions,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A destination that never learned to write.
struct Unfinished {
    core: DestinationCore,
}

#[test]
fn default_emit_is_not_implemented() {
    let ctx = Context::new();
    ctx.set_raise_errors(true);
    ctx.root().add_destination(Arc::new(Unfinished {
        core: DestinationCore::new(Level::NOTSET),
    }));

    let err = ctx
        .get_logger("svc")
        .try_log(Level::ERROR, "x", LogOptions::new())
        .unwrap_err();
    assert!(matches!(err, Error::NotImplemented("emit")));
}

impl Destination for Unfinished {
    fn core(&self) -> &DestinationCore {
        &self.core
    }
}

#[test]
fn registered_destination_is_found_by_name() {
    let ctx = Context::new();
    let sink: Arc<dyn Destination> = Arc::new(CaptureDestination::new());
    ctx.register_destination("audit", &sink);

    let found = ctx.destination("audit").unwrap();
    assert!(std::ptr::addr_eq(Arc::as_ptr(&found), Arc::as_ptr(&sink)));
    assert_eq!(sink.core().name().as_deref(), Some("audit"));
    assert_eq!(ctx.destination_names(), vec!["audit"]);
}

#[test]
fn close_removes_the_name() {
    let ctx = Context::new();
    let sink: Arc<dyn Destination> = Arc::new(CaptureDestination::new());
    ctx.register_destination("audit", &sink);

    sink.close();

    assert!(sink.core().is_closed());
    assert!(ctx.destination("audit").is_none());
    assert!(ctx.destination_names().is_empty());
}

#[test]
fn dropped_destination_disappears() {
    let ctx = Context::new();
    let sink: Arc<dyn Destination> = Arc::new(CaptureDestination::new());
    ctx.register_destination("temp", &sink);
    drop(sink);

    assert!(ctx.destination("temp").is_none());
    assert!(ctx.destination_names().is_empty());
}

#[test]
fn later_registration_takes_the_name() {
    let ctx = Context::new();
    let first: Arc<dyn Destination> = Arc::new(CaptureDestination::new());
    let second: Arc<dyn Destination> = Arc::new(CaptureDestination::new());
    ctx.register_destination("main", &first);
    ctx.register_destination("main", &second);

    let found = ctx.destination("main").unwrap();
    assert!(std::ptr::addr_eq(Arc::as_ptr(&found), Arc::as_ptr(&second)));
}

#[test]
fn shutdown_closes_attached_destinations() {
    let ctx = Context::new();
    let root_sink = Arc::new(CaptureDestination::new());
    let svc_sink = Arc::new(CaptureDestination::new());
    ctx.root().add_destination(root_sink.clone());
    ctx.get_logger("svc").add_destination(svc_sink.clone());

    ctx.shutdown();

    assert!(root_sink.core().is_closed());
    assert!(svc_sink.core().is_closed());
}

/// Accepts records but cannot flush them.
struct Unflushable {
    core: DestinationCore,
    flush_called: AtomicBool,
}

impl Destination for Unflushable {
    fn core(&self) -> &DestinationCore {
        &self.core
    }

    fn emit(&self, _record: &scopelog::Record) -> Result<(), Error> {
        Ok(())
    }

    fn flush(&self) -> Result<(), Error> {
        self.flush_called.store(true, Ordering::SeqCst);
        Err(Error::Io(std::io::Error::other("sink gone")))
    }
}

#[test]
fn shutdown_survives_failing_last_resort_flush() {
    let ctx = Context::new();
    let sink = Arc::new(Unflushable {
        core: DestinationCore::new(Level::WARNING),
        flush_called: AtomicBool::new(false),
    });
    ctx.set_last_resort(Some(sink.clone()));
    ctx.get_logger("svc").error("to the last resort");

    ctx.shutdown();

    assert!(sink.flush_called.load(Ordering::SeqCst));
}

#[test]
fn threshold_and_formatter_are_per_destination() {
    let sink = CaptureDestination::with_threshold(Level::WARNING);
    assert_eq!(sink.threshold(), Level::WARNING);
    sink.set_threshold(Level::ERROR);
    assert_eq!(sink.threshold(), Level::ERROR);
    assert!(sink.core().formatter().is_none());
}

#[test]
fn capture_can_be_cleared() {
    let ctx = Context::new();
    let sink = Arc::new(CaptureDestination::new());
    ctx.root().add_destination(sink.clone());

    ctx.root().error("one");
    assert_eq!(sink.len(), 1);
    sink.clear();
    assert!(sink.is_empty());
}
