//! Extra-context fields as they appear in persisted lines.

use serde_json::{json, Value};

use proxykit::logging::RequestMetadata;
use proxykit::{Adapter, InterceptionSpec, Invocable};

mod common;

use common::{read_log, MongoClient};

/// The trailing `<context> <extra>` pair of a line with an empty context.
fn extra_of(rest: &str) -> Value {
    let (_, extra) = rest.split_once(" [] ").expect("empty context");
    serde_json::from_str(extra).unwrap_or(Value::Null)
}

#[test]
fn test_default_extras_stamp_uid_and_request() {
    let dir = tempfile::tempdir().unwrap();
    let adapter = Adapter::from_value(&json!({
        "logging": {
            "level": "DEBUG",
            "file": { "dir": dir.path().to_string_lossy(), "filename": "access.log" }
        }
    }));
    let logger = adapter.logger();

    logger.info("outside", None);
    {
        let _request = RequestMetadata {
            url: Some("/orders/42".into()),
            http_method: Some("POST".into()),
            unique_id: Some("req-7".into()),
            ..Default::default()
        }
        .enter();
        logger.info("inside", None);
    }

    let lines = read_log(&dir.path().join("access.log"));
    let outside = extra_of(&lines[0].rest);
    let inside = extra_of(&lines[1].rest);

    assert_eq!(outside["uid"].as_str().map(str::len), Some(24));
    assert!(outside.get("url").is_none());
    assert_eq!(inside["uid"], outside["uid"]);
    assert_eq!(inside["url"], "/orders/42");
    assert_eq!(inside["http_method"], "POST");
    assert_eq!(inside["unique_id"], "req-7");
}

#[test]
fn test_process_id_and_introspection_on_call_records() {
    let dir = tempfile::tempdir().unwrap();
    let adapter = Adapter::from_value(&json!({
        "logging": {
            "level": "DEBUG",
            "file": { "dir": dir.path().to_string_lossy(), "filename": "access.log" },
            "extra": { "Uid": false, "Web": false, "ProcessId": true, "Introspection": true }
        }
    }));
    let mut db = adapter.wrap(MongoClient::default(), &InterceptionSpec::from_methods(["count"]));
    db.invoke("count", &[]).unwrap();

    let lines = read_log(&dir.path().join("access.log"));
    let suffix = &lines[1].rest;
    assert!(suffix.starts_with("MongoClient.count - [] "));

    let extra = extra_of(suffix);
    assert_eq!(extra["process_id"], json!(std::process::id()));
    assert!(extra["file"].as_str().is_some());
    assert!(extra["line"].as_u64().is_some());
}
