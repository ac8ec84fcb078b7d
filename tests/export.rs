use quant_solver::session::export::{from_json, to_json, write_export, EXPORT_FILE_NAME};
use quant_solver::session::{Role, Transcript};
use serde_json::Value;

fn two_messages() -> Transcript {
    let mut t = Transcript::new();
    t.append(Role::User, "Reverse a linked list");
    t.append(Role::Assistant, "def reverse(head):\n    ...");
    t
}

#[test]
fn export_round_trips() {
    let t = two_messages();
    let json = to_json(&t).unwrap();
    assert_eq!(from_json(&json).unwrap(), t);
}

#[test]
fn export_is_array_of_role_content_timestamp() {
    let t = two_messages();
    let value: Value = serde_json::from_str(&to_json(&t).unwrap()).unwrap();
    let items = value.as_array().unwrap();
    assert_eq!(items.len(), 2);
    for (item, msg) in items.iter().zip(t.all()) {
        let obj = item.as_object().unwrap();
        assert_eq!(obj.len(), 3);
        assert_eq!(obj["role"], msg.role().to_string());
        assert_eq!(obj["content"], msg.content());
        assert_eq!(obj["timestamp"], msg.timestamp());
    }
}

#[test]
fn export_indents_by_two_spaces() {
    let json = to_json(&two_messages()).unwrap();
    assert!(json.starts_with("[\n  {\n    \"role\": \"user\","));
}

#[test]
fn empty_transcript_exports_empty_array() {
    assert_eq!(to_json(&Transcript::new()).unwrap(), "[]");
}

#[test]
fn write_export_creates_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(EXPORT_FILE_NAME);
    let t = two_messages();
    write_export(&t, &path).unwrap();
    let back = from_json(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(back, t);
}

#[test]
fn write_export_reports_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join(EXPORT_FILE_NAME);
    let err = write_export(&two_messages(), &path).unwrap_err();
    assert!(err.to_string().contains("missing"));
}

#[test]
fn import_rejects_unknown_role() {
    let json = r#"[{"role":"system","content":"x","timestamp":"10:00"}]"#;
    assert!(from_json(json).is_err());
}
