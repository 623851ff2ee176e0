use std::fs;
use std::path::PathBuf;

use command_output_core::{Platform, Value};
use command_output_engine::config::{load_spec, save_spec};
use command_output_engine::converters::{rpm_qi, schtasks, uptime};
use command_output_engine::diagnostics::{CollectingSink, Diagnostic};
use command_output_engine::registry::Registry;
use command_output_engine::{Converter, ParseOptions};

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()))
}

#[test]
fn test_uptime_fixture() {
    let converter = uptime::converter().unwrap();
    let mut sink = CollectingSink::new();
    let records = converter
        .parse(&fixture("uptime.txt"), ParseOptions::default().quiet(), &mut sink)
        .unwrap()
        .into_typed()
        .unwrap();

    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.get("time"), Some(&Value::from("16:52:09")));
    assert_eq!(record.get("time_second"), Some(&Value::Integer(9)));
    assert_eq!(record.get("uptime"), Some(&Value::from("3 days, 2:54")));
    assert_eq!(record.get("uptime_days"), Some(&Value::Integer(3)));
    assert_eq!(record.get("uptime_hours"), Some(&Value::Integer(2)));
    assert_eq!(record.get("uptime_minutes"), Some(&Value::Integer(54)));
    assert_eq!(record.get("uptime_total_seconds"), Some(&Value::Integer(269_640)));
    assert_eq!(record.get("users"), Some(&Value::Integer(2)));
    assert_eq!(record.get("load_1m"), Some(&Value::Float(0.0)));
    assert_eq!(record.get("load_5m"), Some(&Value::Float(0.01)));
}

#[test]
fn test_rpm_qia_fixture() {
    let converter = rpm_qi::converter().unwrap();
    let raw = converter.parse_raw(&fixture("rpm-qia.txt"));

    assert_eq!(raw.len(), 2, "repeated Name line must not open a record");
    assert_eq!(raw[0].get("name").map(String::as_str), Some("make"));
    assert_eq!(raw[1].get("name").map(String::as_str), Some("kbd-legacy"));
    assert_eq!(
        raw[1].get("description").map(String::as_str),
        Some(
            "The kbd-legacy package contains original keymaps for kbd package. \
             Please note that kbd-legacy is not helpful without kbd."
        )
    );

    let typed = converter.process(&raw).unwrap();
    let make = &typed[0];
    assert_eq!(make.get("epoch"), Some(&Value::Integer(1)));
    assert_eq!(make.get("size"), Some(&Value::Integer(1_160_660)));
    assert_eq!(make.get("install_date"), Some(&Value::from("Wed 16 Oct 2019 09:21:42 AM PDT")));
    assert!(make.get("build_epoch").is_some_and(|v| v.as_i64().is_some()));
    assert_eq!(make.get("build_epoch_utc"), Some(&Value::Null));
    assert!(
        make.get("description")
            .and_then(Value::as_str)
            .is_some_and(|d| d.starts_with("A GNU tool") && d.ends_with("makefile."))
    );

    let kbd = &typed[1];
    assert_eq!(kbd.get("epoch"), Some(&Value::Null));
    assert_eq!(kbd.get("build_epoch_utc"), Some(&Value::Integer(1_540_914_000)));
}

#[test]
fn test_rpm_qia_raw_mode_keeps_strings() {
    let converter = rpm_qi::converter().unwrap();
    let mut sink = CollectingSink::new();
    let raw = converter
        .parse(&fixture("rpm-qia.txt"), ParseOptions::raw().quiet(), &mut sink)
        .unwrap()
        .into_raw()
        .unwrap();

    assert_eq!(raw[0].get("size").map(String::as_str), Some("1160660"));
    assert!(!raw[0].contains_key("build_epoch"));
}

#[test]
fn test_schtasks_fixture() {
    let converter = schtasks::converter().unwrap();
    let records = converter.process(&converter.parse_raw(&fixture("schtasks.txt"))).unwrap();

    assert_eq!(records.len(), 5);
    assert_eq!(records[0].get("folder"), Some(&Value::from("\\")));
    assert_eq!(records[1].get("taskname"), Some(&Value::from("GoogleUpdateTaskMachineCore")));
    assert_eq!(records[1].get("next_run_time"), Some(&Value::from("10/21/2026 9:15:00 AM")));
    assert!(records[1].get("next_run_epoch").is_some_and(|v| !v.is_null()));
    assert_eq!(records[2].get("status"), Some(&Value::from("Disabled")));
    assert_eq!(records[2].get("next_run_epoch"), Some(&Value::Null));

    assert_eq!(
        records[3].get("folder"),
        Some(&Value::from("\\Microsoft\\Windows\\AppID"))
    );
    assert_eq!(records[4].get("taskname"), Some(&Value::from("VerifiedPublisherCertStoreCheck")));
}

#[test]
fn test_typed_records_serialize_in_insertion_order() {
    let converter = uptime::converter().unwrap();
    let typed = converter.process(&converter.parse_raw(&fixture("uptime.txt"))).unwrap();

    let json = serde_json::to_string(&typed[0]).unwrap();
    assert!(json.starts_with(r#"{"time":"16:52:09","uptime":"3 days, 2:54","users":2,"#));

    let value = serde_json::to_value(&typed).unwrap();
    assert_eq!(value[0]["time_hour"], 16);
    assert_eq!(value[0]["uptime_total_seconds"], 269_640);
    assert!(value[0]["load_15m"].is_f64());
}

#[test]
fn test_compatibility_advisory_through_registry() {
    let registry = Registry::builtin().unwrap();
    let converter = registry.by_command("schtasks").unwrap();

    let mut sink = CollectingSink::new();
    converter
        .parse(&fixture("schtasks.txt"), ParseOptions::default(), &mut sink)
        .unwrap();

    if Platform::current() == Some(Platform::Win32) {
        assert!(sink.is_empty());
    } else {
        assert!(matches!(
            sink.diagnostics.as_slice(),
            [Diagnostic::Incompatible { converter, compatible, .. }]
                if converter == "schtasks" && compatible == &[Platform::Win32]
        ));
        assert!(sink.warnings()[0].contains("compatible platforms: win32"));
    }
}

#[test]
fn test_spec_file_drives_engine() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rpm_qi.yml");
    save_spec(&rpm_qi::spec(), &path).unwrap();

    let spec = load_spec(&path).unwrap();
    assert_eq!(spec, rpm_qi::spec());

    let from_file = Converter::new(spec).unwrap();
    let builtin = rpm_qi::converter().unwrap();
    let text = fixture("rpm-qia.txt");
    assert_eq!(
        from_file.process(&from_file.parse_raw(&text)).unwrap(),
        builtin.process(&builtin.parse_raw(&text)).unwrap()
    );
}
