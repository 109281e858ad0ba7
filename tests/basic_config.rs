//! Tests for one-call root setup.

use scopelog::{
    BasicConfig, CaptureDestination, Context, Destination, Error, FileMode, Level,
    StreamDestination,
};
use std::fs;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn stream_target_with_format_and_level() {
    let ctx = Context::new();
    let buf = SharedBuf::default();
    ctx.configure_root(
        BasicConfig::new()
            .stream(buf.clone())
            .format("{level} [{scope}] {msg}")
            .level(Level::INFO),
    )
    .unwrap();

    ctx.get_logger("app").info("started");
    ctx.get_logger("app").debug("hidden");

    assert_eq!(buf.contents(), "INFO [app] started\n");
    assert_eq!(ctx.root().level(), Level::INFO);
}

#[test]
fn default_target_is_single_stderr_destination() {
    let ctx = Context::new();
    ctx.configure_root(BasicConfig::new()).unwrap();

    let destinations = ctx.root().destinations();
    assert_eq!(destinations.len(), 1);
    assert!(destinations[0].core().formatter().is_some());
    assert_eq!(ctx.root().level(), Level::WARNING);
}

#[test]
fn second_call_without_force_is_a_no_op() {
    let ctx = Context::new();
    let first = SharedBuf::default();
    let second = SharedBuf::default();
    ctx.configure_root(BasicConfig::new().stream(first.clone()))
        .unwrap();
    ctx.configure_root(
        BasicConfig::new()
            .stream(second.clone())
            .level(Level::DEBUG),
    )
    .unwrap();

    ctx.root().warning("once");
    assert_eq!(first.contents(), "WARNING::once\n");
    assert!(second.contents().is_empty());
    assert_eq!(ctx.root().level(), Level::WARNING);
}

#[test]
fn force_replaces_and_closes_existing_destinations() {
    let ctx = Context::new();
    let old = Arc::new(CaptureDestination::new());
    ctx.root().add_destination(old.clone());

    let buf = SharedBuf::default();
    ctx.configure_root(BasicConfig::new().stream(buf.clone()).force(true))
        .unwrap();

    assert!(old.core().is_closed());
    assert_eq!(ctx.root().destinations().len(), 1);

    ctx.get_logger("svc").error("new home");
    assert!(old.is_empty());
    assert_eq!(buf.contents(), "ERROR:svc:new home\n");
}

#[test]
fn filename_and_stream_conflict() {
    let ctx = Context::new();
    let err = ctx
        .configure_root(
            BasicConfig::new()
                .filename("/tmp/never-created.log")
                .stream(io::sink()),
        )
        .unwrap_err();
    assert!(matches!(err, Error::ConflictingConfig(_)));
    assert!(ctx.root().destinations().is_empty());
}

#[test]
fn destinations_conflict_with_stream() {
    let ctx = Context::new();
    let err = ctx
        .configure_root(
            BasicConfig::new()
                .destination(Arc::new(CaptureDestination::new()))
                .stream(io::sink()),
        )
        .unwrap_err();
    assert!(matches!(err, Error::ConflictingConfig(_)));
}

#[test]
fn conflicts_are_reported_even_when_root_is_configured() {
    let ctx = Context::new();
    ctx.root().add_destination(Arc::new(CaptureDestination::new()));

    let result = ctx.configure_root(
        BasicConfig::new()
            .filename("/tmp/never-created.log")
            .stream(io::sink()),
    );
    assert!(matches!(result, Err(Error::ConflictingConfig(_))));
}

#[test]
fn explicit_destinations_keep_their_own_formatter() {
    let ctx = Context::new();
    let plain = Arc::new(CaptureDestination::new());
    let custom = Arc::new(CaptureDestination::new());
    custom.set_formatter(Arc::new(|record: &scopelog::Record| {
        format!("custom:{}", record.message())
    }));

    ctx.configure_root(
        BasicConfig::new()
            .destinations(vec![plain.clone() as Arc<dyn Destination>, custom.clone()])
            .format("{scope}|{msg}"),
    )
    .unwrap();

    ctx.get_logger("svc").error("hi");
    assert_eq!(plain.lines(), vec!["svc|hi"]);
    assert_eq!(custom.lines(), vec!["custom:hi"]);
}

#[test]
fn file_target_appends_by_default() {
    let tmp_dir = TempDir::new().unwrap();
    let path = tmp_dir.path().join("app.log");
    fs::write(&path, "existing\n").unwrap();

    let ctx = Context::new();
    ctx.configure_root(BasicConfig::new().filename(&path)).unwrap();
    ctx.get_logger("svc").error("appended");
    ctx.shutdown();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "existing\nERROR:svc:appended\n"
    );
}

#[test]
fn file_target_truncates_in_write_mode() {
    let tmp_dir = TempDir::new().unwrap();
    let path = tmp_dir.path().join("app.log");
    fs::write(&path, "stale\n").unwrap();

    let ctx = Context::new();
    ctx.configure_root(
        BasicConfig::new()
            .filename(&path)
            .mode(FileMode::Truncate),
    )
    .unwrap();
    ctx.get_logger("svc").error("fresh");
    ctx.shutdown();

    assert_eq!(fs::read_to_string(&path).unwrap(), "ERROR:svc:fresh\n");
}

#[test]
fn file_mode_parses_short_and_long_names() {
    assert_eq!("a".parse::<FileMode>().unwrap(), FileMode::Append);
    assert_eq!("w".parse::<FileMode>().unwrap(), FileMode::Truncate);
    assert_eq!("truncate".parse::<FileMode>().unwrap(), FileMode::Truncate);
    assert!(matches!(
        "x".parse::<FileMode>(),
        Err(Error::InvalidConfig(_))
    ));
}

#[test]
fn timestamp_format_is_applied() {
    let ctx = Context::new();
    let buf = SharedBuf::default();
    ctx.configure_root(
        BasicConfig::new()
            .stream(buf.clone())
            .format("{timestamp}|{msg}")
            .timestamp_format("%Y"),
    )
    .unwrap();

    ctx.root().error("x");
    let line = buf.contents();
    let (year, rest) = line.split_once('|').unwrap();
    assert_eq!(year.len(), 4);
    assert!(year.chars().all(|c| c.is_ascii_digit()));
    assert_eq!(rest, "x\n");
}

#[test]
fn stream_destination_writes_lines() {
    let buf = SharedBuf::default();
    let destination = StreamDestination::new(buf.clone()).with_threshold(Level::ERROR);
    assert_eq!(destination.threshold(), Level::ERROR);
    assert_eq!(destination.label(), "<stream>");

    let ctx = Context::new();
    ctx.root().add_destination(Arc::new(destination));
    ctx.get_logger("svc").warning("below threshold");
    ctx.get_logger("svc").error("written");

    assert_eq!(buf.contents(), "ERROR:svc:written\n");
}
