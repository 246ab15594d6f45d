use std::collections::BTreeMap;

use codable_core::{CodableError, CodingKey, JsonEncoder, Value};
use serde::Serialize;

fn to_json(value: &Value) -> String {
    String::from_utf8(codable_core::bridge::serialize(value).unwrap()).unwrap()
}

// ============================================================================
// serde-driven encoding
// ============================================================================

#[test]
fn scalars_encode_to_their_natural_variant() {
    assert_eq!(codable_core::to_value(&true).unwrap(), Value::True);
    assert_eq!(codable_core::to_value(&-3i16).unwrap(), Value::from(-3));
    assert_eq!(codable_core::to_value(&0.25f32).unwrap(), Value::from(0.25));
    assert_eq!(codable_core::to_value("s").unwrap(), Value::from("s"));
    assert_eq!(codable_core::to_value(&'c').unwrap(), Value::from("c"));
    assert_eq!(codable_core::to_value(&None::<u8>).unwrap(), Value::Null);
    assert_eq!(codable_core::to_value(&()).unwrap(), Value::Null);
}

#[derive(Serialize)]
struct Order {
    id: u32,
    note: Option<String>,
    tags: Vec<&'static str>,
}

#[test]
fn structs_encode_as_objects_in_field_order() {
    let order = Order {
        id: 9,
        note: None,
        tags: vec!["new", "gift"],
    };
    assert_eq!(
        codable_core::to_string(&order).unwrap(),
        r#"{"id":9,"note":null,"tags":["new","gift"]}"#
    );
}

#[test]
fn skipped_none_fields_are_omitted() {
    #[derive(Serialize)]
    struct Sparse {
        #[serde(skip_serializing_if = "Option::is_none")]
        nickname: Option<String>,
        age: u8,
    }

    let json = codable_core::to_string(&Sparse { nickname: None, age: 3 }).unwrap();
    assert_eq!(json, r#"{"age":3}"#);
}

#[derive(Serialize)]
enum Event {
    Started,
    Moved(i32),
    Resized { w: u32, h: u32 },
    Swapped(u8, u8),
}

#[test]
fn enums_encode_externally_tagged() {
    assert_eq!(codable_core::to_string(&Event::Started).unwrap(), r#""Started""#);
    assert_eq!(codable_core::to_string(&Event::Moved(-2)).unwrap(), r#"{"Moved":-2}"#);
    assert_eq!(
        codable_core::to_string(&Event::Resized { w: 1, h: 2 }).unwrap(),
        r#"{"Resized":{"w":1,"h":2}}"#
    );
    assert_eq!(codable_core::to_string(&Event::Swapped(1, 2)).unwrap(), r#"{"Swapped":[1,2]}"#);
}

#[test]
fn map_keys_are_stringified() {
    let map = BTreeMap::from([(1u8, "one"), (2u8, "two")]);
    assert_eq!(codable_core::to_string(&map).unwrap(), r#"{"1":"one","2":"two"}"#);

    let flags = BTreeMap::from([(false, 0), (true, 1)]);
    assert_eq!(codable_core::to_string(&flags).unwrap(), r#"{"false":0,"true":1}"#);
}

#[test]
fn non_string_map_keys_are_invalid() {
    let map = BTreeMap::from([((1u8, 2u8), "pair")]);
    let err = codable_core::to_value(&map).unwrap_err();
    assert!(matches!(err, CodableError::InvalidValue { .. }), "{err}");
}

#[test]
fn bytes_encode_as_number_arrays() {
    struct Raw(&'static [u8]);

    impl Serialize for Raw {
        fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_bytes(self.0)
        }
    }

    assert_eq!(to_json(&codable_core::to_value(&Raw(b"\x01\xff")).unwrap()), "[1,255]");
}

#[test]
fn custom_serialize_errors_carry_the_path() {
    struct Refuses;

    impl Serialize for Refuses {
        fn serialize<S: serde::Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("refused"))
        }
    }

    let err = codable_core::to_value(&BTreeMap::from([("inner", vec![Refuses])])).unwrap_err();
    assert!(matches!(err, CodableError::InvalidValue { .. }), "{err}");
    assert_eq!(err.coding_path().unwrap().to_string(), "$.inner[0]");
}

#[test]
fn pretty_output_is_indented() {
    let bytes = JsonEncoder::new().encode_pretty(&Order {
        id: 1,
        note: Some("x".into()),
        tags: vec![],
    });
    let text = String::from_utf8(bytes.unwrap()).unwrap();
    assert!(text.contains("\n  \"id\": 1"), "{text}");
}

// ============================================================================
// Container API
// ============================================================================

enum PointKeys {
    XCoord,
    YCoord,
}

impl CodingKey for PointKeys {
    fn string_value(&self) -> &str {
        match self {
            PointKeys::XCoord => "xCoord",
            PointKeys::YCoord => "yCoord",
        }
    }
}

#[test]
fn keyed_container_applies_key_naming() {
    let value = JsonEncoder::new()
        .with_key_naming(codable_core::KeyNamingStrategy::SnakeCase)
        .encode_with(|encoder| {
            let mut keyed = encoder.keyed_container()?;
            keyed.encode(&PointKeys::XCoord, &1)?;
            keyed.encode(&PointKeys::YCoord, &2)?;
            Ok(())
        })
        .unwrap();
    assert_eq!(to_json(&value), r#"{"x_coord":1,"y_coord":2}"#);
}

#[test]
fn keyed_container_if_present_and_nil() {
    let value = JsonEncoder::new()
        .encode_with(|encoder| {
            let mut keyed = encoder.keyed_container()?;
            keyed.encode_if_present("present", Some(&"yes"))?;
            keyed.encode_if_present::<_, str>("absent", None)?;
            keyed.encode_nil("empty")?;
            Ok(())
        })
        .unwrap();
    assert_eq!(to_json(&value), r#"{"present":"yes","empty":null}"#);
}

#[test]
fn nested_containers_build_deep_trees() {
    let value = JsonEncoder::new()
        .encode_with(|encoder| {
            let mut root = encoder.keyed_container()?;
            {
                let mut meta = root.nested_keyed_container("meta")?;
                meta.encode("version", &2)?;
            }
            let mut rows = root.nested_unkeyed_container("rows")?;
            rows.encode(&"first")?;
            rows.encode_nil()?;
            let mut cell = rows.nested_keyed_container()?;
            cell.encode("n", &3)?;
            Ok(())
        })
        .unwrap();
    assert_eq!(to_json(&value), r#"{"meta":{"version":2},"rows":["first",null,{"n":3}]}"#);
}

#[test]
fn unkeyed_container_counts_elements() {
    let value = JsonEncoder::new()
        .encode_with(|encoder| {
            let mut unkeyed = encoder.unkeyed_container()?;
            for i in 0..3 {
                unkeyed.encode(&i)?;
            }
            assert_eq!(unkeyed.count(), 3);
            let mut inner = unkeyed.nested_unkeyed_container()?;
            inner.encode(&true)?;
            Ok(())
        })
        .unwrap();
    assert_eq!(to_json(&value), "[0,1,2,[true]]");
}

#[test]
fn encode_with_nests_hand_written_frames() {
    let value = JsonEncoder::new()
        .encode_with(|encoder| {
            let mut keyed = encoder.keyed_container()?;
            keyed.encode_with("celsius", |frame| {
                let boxed = frame.box_number(21.5)?;
                frame.single_value_container().encode(&boxed)
            })?;
            Ok(())
        })
        .unwrap();
    assert_eq!(to_json(&value), r#"{"celsius":21.5}"#);
}

#[test]
fn single_value_container_sets_the_root() {
    let value = JsonEncoder::new()
        .encode_with(|encoder| encoder.single_value_container().encode("only"))
        .unwrap();
    assert_eq!(value, Value::from("only"));
}

#[test]
fn single_value_container_rejects_a_second_value() {
    let err = JsonEncoder::new()
        .encode_with(|encoder| {
            let mut single = encoder.single_value_container();
            single.encode(&1)?;
            single.encode(&2)
        })
        .unwrap_err();
    assert!(matches!(err, CodableError::InvalidValue { .. }), "{err}");
}

#[test]
fn frame_without_values_is_invalid() {
    let err = JsonEncoder::new().encode_with(|_| Ok(())).unwrap_err();
    assert!(matches!(err, CodableError::InvalidValue { .. }), "{err}");

    let err = JsonEncoder::new()
        .encode_with(|encoder| {
            let mut unkeyed = encoder.unkeyed_container()?;
            unkeyed.encode_with(|_| Ok(()))
        })
        .unwrap_err();
    assert_eq!(err.coding_path().unwrap().to_string(), "$[0]");
}

#[test]
fn conflicting_container_kinds_are_invalid() {
    let err = JsonEncoder::new()
        .encode_with(|encoder| {
            encoder.keyed_container()?;
            encoder.unkeyed_container().map(|_| ())
        })
        .unwrap_err();
    assert!(matches!(err, CodableError::InvalidValue { .. }), "{err}");
}

#[test]
fn requesting_the_same_keyed_container_twice_merges() {
    let value = JsonEncoder::new()
        .encode_with(|encoder| {
            encoder.keyed_container()?.encode("a", &1)?;
            encoder.keyed_container()?.encode("b", &2)?;
            Ok(())
        })
        .unwrap();
    assert_eq!(to_json(&value), r#"{"a":1,"b":2}"#);
}
