use gmsec_spec::{validate, Config, ErrorCodes, Field, FieldValue, MessageFactory, Specification};

fn testdata_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/testdata")
}

fn load_specification() -> Specification {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let mut config = Config::new();
    config
        .set("GMSEC-SCHEMA-PATH", testdata_path())
        .set("GMSEC-MESSAGE-SPEC-VERSION", "201900")
        .set("GMSEC-SCHEMA-LEVEL", "0");
    Specification::load(&config).unwrap()
}

#[test]
fn test_scenario_1_load_and_iterate() {
    let spec = load_specification();
    let ids: std::collections::HashSet<&str> = spec.schema_id_iterator().collect();
    for expected in ["HEADER", "MSG.LOG", "MSG.HB", "REQ.DIR", "RESP.DIR", "MSG.C2CX.HB"] {
        assert!(ids.contains(expected), "missing schema ID {expected}");
    }
}

#[test]
fn test_scenario_2_compose_message_header_then_fails_on_empty_body() {
    let spec = load_specification();
    let factory = MessageFactory::new(spec);

    let message = factory.create_message("MSG.LOG").unwrap();
    assert_eq!(message.get_string_value("MESSAGE-TYPE").unwrap(), "MSG");
    assert_eq!(message.get_string_value("MESSAGE-SUBTYPE").unwrap(), "LOG");

    let status = validate(factory.specification(), &message);
    assert!(!status.is_ok());

    let missing: std::collections::HashSet<&str> = status
        .errors()
        .filter(|v| v.code == ErrorCodes::MISSING_REQUIRED_FIELD)
        .filter_map(|v| v.field.as_deref())
        .collect();
    for expected in ["SEVERITY", "SUBCLASS", "OCCURRENCE-TYPE", "MSG-TEXT", "EVENT-TIME"] {
        assert!(missing.contains(expected), "expected {expected} to be reported missing");
    }
}

fn populated_log_message(factory: &MessageFactory) -> gmsec_spec::Message {
    let mut message = factory.create_message("MSG.LOG").unwrap();
    message.add_field(Field::new("SEVERITY", FieldValue::I16(1))).unwrap();
    message
        .add_field(Field::new("SUBCLASS", FieldValue::String("TAC".to_string())))
        .unwrap();
    message
        .add_field(Field::new(
            "OCCURRENCE-TYPE",
            FieldValue::String("NORM".to_string()),
        ))
        .unwrap();
    message
        .add_field(Field::new("MSG-TEXT", FieldValue::String("hello".to_string())))
        .unwrap();
    message
        .add_field(Field::new(
            "EVENT-TIME",
            FieldValue::String("2024-123T12:34:56.000".to_string()),
        ))
        .unwrap();
    message
}

#[test]
fn test_scenario_3_valid_log_message_passes() {
    let spec = load_specification();
    let factory = MessageFactory::new(spec);
    let message = populated_log_message(&factory);

    let status = validate(factory.specification(), &message);
    assert!(status.is_ok(), "{status}");
}

#[test]
fn test_scenario_4_enum_violation_names_field_and_permitted_values() {
    let spec = load_specification();
    let factory = MessageFactory::new(spec);
    let mut message = populated_log_message(&factory);
    message.clear_field("OCCURRENCE-TYPE");
    message
        .add_field(Field::new("OCCURRENCE-TYPE", FieldValue::String("BOGUS".to_string())))
        .unwrap();

    let status = validate(factory.specification(), &message);
    assert!(!status.is_ok());
    let reason = status.reason();
    assert!(reason.contains("OCCURRENCE-TYPE"));
    assert!(reason.contains("NORM"));
}

#[test]
fn test_scenario_5_unsigned_overflow_is_invalid_field_value() {
    let spec = load_specification();
    let factory = MessageFactory::new(spec);
    let mut message = factory.create_message("MSG.HB").unwrap();
    message.add_field(Field::new("PUB-RATE", FieldValue::U32(70_000))).unwrap();

    let status = validate(factory.specification(), &message);
    assert!(status
        .errors()
        .any(|v| v.code == ErrorCodes::INVALID_FIELD_VALUE && v.field.as_deref() == Some("PUB-RATE")));
}

#[test]
fn test_scenario_6_subject_binding_fills_unspecified_elements() {
    let spec = load_specification();
    let factory = MessageFactory::new(spec);
    let mut message = factory.create_message("MSG.LOG").unwrap();
    message.set_subject_element("ME", "ACME");

    assert_eq!(message.subject(), "C2MS.FILL.ACME.MSG.LOG");
}
