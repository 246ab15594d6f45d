use std::collections::HashMap;

use codable_core::{CodableError, JsonDecoder, JsonEncoder, KeyNamingStrategy, Value};
use serde::{Deserialize, Serialize};

// ============================================================================
// Transform contract
// ============================================================================

#[test]
fn snake_case_splits_camel_case_words() {
    let naming = KeyNamingStrategy::SnakeCase;
    assert_eq!(naming.native_to_wire("camelCasedProperty"), "camel_cased_property");
    assert_eq!(naming.native_to_wire("userId"), "user_id");
}

#[test]
fn snake_case_treats_an_uppercase_run_as_one_word() {
    assert_eq!(KeyNamingStrategy::SnakeCase.native_to_wire("abcHTTPNice"), "abc_http_nice");
}

#[test]
fn snake_case_is_idempotent_on_snake_input() {
    let naming = KeyNamingStrategy::SnakeCase;
    assert_eq!(naming.native_to_wire("abc_def_ghi"), "abc_def_ghi");
    let once = naming.native_to_wire("someHTTPHeaderValue").into_owned();
    assert_eq!(naming.native_to_wire(&once), once);
}

#[test]
fn snake_case_keeps_underscore_runs_in_snake_input() {
    let naming = KeyNamingStrategy::SnakeCase;
    assert_eq!(naming.native_to_wire("_id"), "_id");
    assert_eq!(naming.native_to_wire("a__b"), "a__b");
    assert_eq!(naming.native_to_wire("__typeName"), "__type_name");
}

#[test]
fn reverse_transform_keeps_leading_underscores() {
    let naming = KeyNamingStrategy::SnakeCase;
    assert_eq!(naming.wire_to_native("_id"), "_id");
    assert_eq!(naming.wire_to_native("__type_name"), "__typeName");
}

#[test]
fn snake_case_of_empty_is_empty() {
    assert_eq!(KeyNamingStrategy::SnakeCase.native_to_wire(""), "");
}

#[test]
fn reverse_transform_inverts_lower_camel_names() {
    let naming = KeyNamingStrategy::SnakeCase;
    for native in ["camelCasedProperty", "id", "firstName", "httpStatus"] {
        let wire = naming.native_to_wire(native);
        assert_eq!(naming.wire_to_native(&wire), native);
    }
}

#[test]
fn default_keys_are_identity() {
    let naming = KeyNamingStrategy::default();
    assert!(naming.is_identity());
    assert_eq!(naming.native_to_wire("camelCase"), "camelCase");
    assert_eq!(naming.wire_to_native("snake_case"), "snake_case");
}

fn shout(native: &str) -> String {
    native.to_uppercase()
}

fn whisper(wire: &str) -> String {
    wire.to_lowercase()
}

fn custom() -> KeyNamingStrategy {
    KeyNamingStrategy::Custom {
        native_to_wire: shout,
        wire_to_native: whisper,
    }
}

#[test]
fn custom_strategy_uses_the_given_functions() {
    assert_eq!(custom().native_to_wire("name"), "NAME");
    assert_eq!(custom().wire_to_native("NAME"), "name");
    assert!(!custom().is_identity());
}

// ============================================================================
// Through the engines
// ============================================================================

#[allow(non_snake_case)]
#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Project {
    camelCasedProperty: String,
}

#[test]
fn end_to_end_snake_case_bytes() {
    let project = Project {
        camelCasedProperty: "CodableKit".to_string(),
    };
    let bytes = JsonEncoder::new()
        .with_key_naming(KeyNamingStrategy::SnakeCase)
        .encode(&project)
        .unwrap();
    assert_eq!(bytes, br#"{"camel_cased_property":"CodableKit"}"#);

    let back: Project = JsonDecoder::new()
        .with_key_naming(KeyNamingStrategy::SnakeCase)
        .decode(&bytes)
        .unwrap();
    assert_eq!(back, project);
}

#[test]
fn default_decoder_does_not_match_snake_keys() {
    let err = JsonDecoder::new()
        .decode::<Project>(br#"{"camel_cased_property":"CodableKit"}"#)
        .unwrap_err();
    match err {
        CodableError::KeyNotFound { key, .. } => assert_eq!(key, "camelCasedProperty"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_key_is_reported_in_wire_form() {
    let err = JsonDecoder::new()
        .with_key_naming(KeyNamingStrategy::SnakeCase)
        .decode::<Project>(b"{}")
        .unwrap_err();
    match err {
        CodableError::KeyNotFound { key, .. } => assert_eq!(key, "camel_cased_property"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn native_spelled_key_is_not_a_wire_key() {
    let decoder = JsonDecoder::new().with_key_naming(KeyNamingStrategy::SnakeCase);
    let value = codable_core::bridge::parse(br#"{"camelCasedProperty":"x"}"#).unwrap();

    let derived = decoder.decode_value::<Project>(&value).unwrap_err();
    let by_hand = decoder
        .decode_with(&value, |d| d.keyed_container()?.decode::<String, _>("camelCasedProperty"))
        .unwrap_err();
    for err in [derived, by_hand] {
        match err {
            CodableError::KeyNotFound { key, .. } => assert_eq!(key, "camel_cased_property"),
            other => panic!("unexpected error: {other}"),
        }
    }
}

#[test]
fn native_spelled_key_next_to_wire_key_is_ignored() {
    let back: Project = JsonDecoder::new()
        .with_key_naming(KeyNamingStrategy::SnakeCase)
        .decode(br#"{"camel_cased_property":"a","camelCasedProperty":"b"}"#)
        .unwrap();
    assert_eq!(back.camelCasedProperty, "a");
}

#[test]
fn unrelated_keys_are_still_ignored_under_snake_case() {
    let back: Project = JsonDecoder::new()
        .with_key_naming(KeyNamingStrategy::SnakeCase)
        .decode(br#"{"extra":1,"camel_cased_property":"a"}"#)
        .unwrap();
    assert_eq!(back.camelCasedProperty, "a");
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
struct Account {
    display_name: String,
    login_count: u32,
    preferences: Preferences,
    labels: HashMap<String, String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
struct Preferences {
    dark_mode: bool,
}

fn account() -> Account {
    Account {
        display_name: "kit".into(),
        login_count: 4,
        preferences: Preferences { dark_mode: true },
        labels: HashMap::from([("teamName".to_string(), "core".to_string())]),
    }
}

#[test]
fn nested_struct_fields_are_renamed_but_map_keys_are_not() {
    let value = JsonEncoder::new()
        .with_key_naming(KeyNamingStrategy::SnakeCase)
        .encode_value(&account())
        .unwrap();
    assert_eq!(value["display_name"], Value::from("kit"));
    assert_eq!(value["login_count"], Value::from(4));
    assert_eq!(value["preferences"]["dark_mode"], Value::True);
    assert_eq!(value["labels"]["teamName"], Value::from("core"));
    assert!(value.get("displayName").is_none());
}

#[test]
fn snake_case_round_trips_nested_structures() {
    let encoder = JsonEncoder::new().with_key_naming(KeyNamingStrategy::SnakeCase);
    let decoder = JsonDecoder::new().with_key_naming(KeyNamingStrategy::SnakeCase);
    let bytes = encoder.encode(&account()).unwrap();
    assert_eq!(decoder.decode::<Account>(&bytes).unwrap(), account());
}

#[test]
fn error_paths_use_wire_keys() {
    let err = JsonDecoder::new()
        .with_key_naming(KeyNamingStrategy::SnakeCase)
        .decode::<Account>(
            br#"{"display_name":"kit","login_count":4,"preferences":{"dark_mode":"yes"},"labels":{}}"#,
        )
        .unwrap_err();
    assert_eq!(err.coding_path().unwrap().to_string(), "$.preferences.dark_mode");
}

#[test]
fn custom_strategy_through_the_engines() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Tag {
        name: String,
    }

    let value = JsonEncoder::new()
        .with_key_naming(custom())
        .encode_value(&Tag { name: "x".into() })
        .unwrap();
    assert_eq!(value["NAME"], Value::from("x"));

    let back: Tag = JsonDecoder::new().with_key_naming(custom()).decode_value(&value).unwrap();
    assert_eq!(back.name, "x");
}

#[test]
fn keyed_container_lists_native_keys() {
    let value = codable_core::bridge::parse(br#"{"first_name":"a","last_name":"b"}"#).unwrap();
    let keys = JsonDecoder::new()
        .with_key_naming(KeyNamingStrategy::SnakeCase)
        .decode_with(&value, |d| Ok(d.keyed_container()?.all_keys()))
        .unwrap();
    assert_eq!(keys, ["firstName", "lastName"]);
}
