//! Tests for level values and names.

use scopelog::{Context, Error, Level, LevelLookup, LevelSpec};

#[test]
fn level_ordering() {
    assert!(Level::NOTSET < Level::DEBUG);
    assert!(Level::DEBUG < Level::INFO);
    assert!(Level::INFO < Level::WARNING);
    assert!(Level::WARNING < Level::ERROR);
    assert!(Level::ERROR < Level::CRITICAL);
}

#[test]
fn level_values() {
    assert_eq!(Level::NOTSET.value(), 0);
    assert_eq!(Level::DEBUG.value(), 10);
    assert_eq!(Level::INFO.value(), 20);
    assert_eq!(Level::WARNING.value(), 30);
    assert_eq!(Level::ERROR.value(), 40);
    assert_eq!(Level::CRITICAL.value(), 50);
    assert_eq!(Level::WARN, Level::WARNING);
    assert_eq!(Level::FATAL, Level::CRITICAL);
}

#[test]
fn level_display() {
    assert_eq!(Level::WARNING.to_string(), "WARNING");
    assert_eq!(Level::CRITICAL.to_string(), "CRITICAL");
    assert_eq!(Level::new(25).to_string(), "Level 25");
}

#[test]
fn level_from_str() {
    assert_eq!("debug".parse::<Level>().unwrap(), Level::DEBUG);
    assert_eq!("Warn".parse::<Level>().unwrap(), Level::WARNING);
    assert_eq!("FATAL".parse::<Level>().unwrap(), Level::CRITICAL);
    assert_eq!("15".parse::<Level>().unwrap(), Level::new(15));
}

#[test]
fn level_from_str_invalid() {
    assert!("verbose".parse::<Level>().is_err());
}

#[test]
fn level_default_is_notset() {
    assert_eq!(Level::default(), Level::NOTSET);
}

#[test]
fn registry_names_reserved_levels() {
    let ctx = Context::new();
    assert_eq!(ctx.level_name(Level::INFO), "INFO");
    assert_eq!(ctx.levels().number_of("WARN"), Some(Level::WARNING));
    assert_eq!(ctx.levels().number_of("FATAL"), Some(Level::CRITICAL));
}

#[test]
fn unnamed_number_renders_as_level_n() {
    let ctx = Context::new();
    assert_eq!(ctx.level_name(Level::new(25)), "Level 25");
}

#[test]
fn custom_level_resolves_both_ways() {
    let ctx = Context::new();
    ctx.register_level(Level::new(25), "NOTICE");

    assert_eq!(ctx.level_name(Level::new(25)), "NOTICE");
    assert_eq!(ctx.levels().number_of("NOTICE"), Some(Level::new(25)));
}

#[test]
fn combined_lookup() {
    let ctx = Context::new();
    let levels = ctx.levels();

    assert_eq!(
        levels.lookup(&LevelSpec::from(40)),
        LevelLookup::Name("ERROR".to_string())
    );
    assert_eq!(
        levels.lookup(&LevelSpec::from("ERROR")),
        LevelLookup::Number(Level::ERROR)
    );
    assert_eq!(
        levels.lookup(&LevelSpec::from("LOUD")),
        LevelLookup::Name("Level LOUD".to_string())
    );
}

#[test]
fn validate_rejects_unknown_names() {
    let ctx = Context::new();
    let err = ctx.levels().validate("LOUD").unwrap_err();
    assert!(matches!(err, Error::UnknownLevel(ref name) if name == "LOUD"));
}

#[test]
fn validate_passes_numbers_through() {
    let ctx = Context::new();
    assert_eq!(ctx.levels().validate(37).unwrap(), Level::new(37));
}

#[test]
fn validate_value_rejects_non_level_types() {
    let ctx = Context::new();
    let levels = ctx.levels();

    assert_eq!(
        levels.validate_value(&toml::Value::String("INFO".into())).unwrap(),
        Level::INFO
    );
    assert_eq!(
        levels.validate_value(&toml::Value::Integer(15)).unwrap(),
        Level::new(15)
    );
    assert!(matches!(
        levels.validate_value(&toml::Value::Boolean(true)),
        Err(Error::InvalidLevelType(_))
    ));
    assert!(matches!(
        levels.validate_value(&toml::Value::Float(1.5)),
        Err(Error::InvalidLevelType(_))
    ));
    assert!(matches!(
        levels.validate_value(&toml::Value::Integer(-10)),
        Err(Error::InvalidLevelType(_))
    ));
}

#[test]
fn records_carry_the_registered_name() {
    let ctx = Context::new();
    ctx.register_level(Level::ERROR, "BAD");

    let capture = std::sync::Arc::new(scopelog::CaptureDestination::new());
    ctx.root().add_destination(capture.clone());
    ctx.get_logger("svc").error("boom");

    assert_eq!(capture.records()[0].level_name(), "BAD");
    assert_eq!(capture.lines(), vec!["BAD:svc:boom"]);
}
