use codable_core::{
    CodableError, JsonDecoder, JsonEncoder, NumberDecodingStrategy, NumberEncodingStrategy, StrategyOutcome,
    Value,
};
use serde::{Deserialize, Serialize};

fn decoder(strategies: &[NumberDecodingStrategy]) -> JsonDecoder {
    JsonDecoder::new().with_number_strategies(strategies.iter().copied())
}

fn non_finite_strings() -> NumberEncodingStrategy {
    NumberEncodingStrategy::ConvertNonFiniteToString {
        positive_infinity: "+Inf".into(),
        negative_infinity: "-Inf".into(),
        nan: "NaN".into(),
    }
}

// ============================================================================
// Decoding: individual strategies
// ============================================================================

#[test]
fn convert_from_string_parses_integers_and_floats() {
    let d = decoder(&[NumberDecodingStrategy::ConvertFromString]);
    assert_eq!(d.decode_value::<i32>(&Value::from("42")).unwrap(), 42);
    assert_eq!(d.decode_value::<i8>(&Value::from("-8")).unwrap(), -8);
    assert_eq!(d.decode_value::<f64>(&Value::from("2.25")).unwrap(), 2.25);
}

#[test]
fn convert_from_string_rejects_garbage() {
    let d = decoder(&[NumberDecodingStrategy::ConvertFromString]);
    let err = d.decode_value::<i32>(&Value::from("string")).unwrap_err();
    assert!(
        matches!(err, CodableError::TypeMismatch { .. } | CodableError::DataCorrupted { .. }),
        "{err}"
    );
}

#[test]
fn convert_from_string_respects_target_range() {
    let d = decoder(&[NumberDecodingStrategy::ConvertFromString]);
    assert!(d.decode_value::<u8>(&Value::from("300")).is_err());
    assert!(d.decode_value::<u32>(&Value::from("-1")).is_err());
}

#[test]
fn convert_from_string_rejects_float_overflow_like_a_number_node() {
    let d = decoder(&[NumberDecodingStrategy::ConvertFromString]);
    assert!(d.decode_value::<f32>(&Value::from(1e39)).is_err());
    let err = d.decode_value::<f32>(&Value::from("1e39")).unwrap_err();
    assert!(matches!(err, CodableError::DataCorrupted { .. }), "{err}");
    assert!(d.decode_value::<f64>(&Value::from("1e400")).is_err());
    assert_eq!(d.decode_value::<f32>(&Value::from("3.0e38")).unwrap(), 3.0e38);
}

#[test]
fn convert_from_string_accepts_spelled_out_infinity() {
    let d = decoder(&[NumberDecodingStrategy::ConvertFromString]);
    assert_eq!(d.decode_value::<f32>(&Value::from("-inf")).unwrap(), f32::NEG_INFINITY);
    assert_eq!(d.decode_value::<f64>(&Value::from("Infinity")).unwrap(), f64::INFINITY);
}

#[test]
fn convert_from_true_yields_one() {
    let d = decoder(&[NumberDecodingStrategy::ConvertFromTrue]);
    assert_eq!(d.decode_value::<i64>(&Value::True).unwrap(), 1);
    assert_eq!(d.decode_value::<f32>(&Value::True).unwrap(), 1.0);
    assert!(d.decode_value::<i64>(&Value::False).is_err());
}

#[test]
fn convert_from_false_yields_zero() {
    let d = decoder(&[NumberDecodingStrategy::ConvertFromFalse]);
    assert_eq!(d.decode_value::<u16>(&Value::False).unwrap(), 0);
    assert!(d.decode_value::<u16>(&Value::True).is_err());
}

#[test]
fn no_strategies_means_strict_numbers() {
    let d = JsonDecoder::new();
    let err = d.decode_value::<i32>(&Value::from("42")).unwrap_err();
    assert!(matches!(err, CodableError::TypeMismatch { .. }), "{err}");
}

#[test]
fn strategies_never_apply_to_bool_or_string_targets() {
    let d = decoder(&[
        NumberDecodingStrategy::ConvertFromString,
        NumberDecodingStrategy::ConvertFromTrue,
    ]);
    assert!(d.decode_value::<bool>(&Value::from(1)).is_err());
    assert!(d.decode_value::<String>(&Value::from(1)).is_err());
}

// ============================================================================
// Decoding: ordering
// ============================================================================

#[test]
fn strategies_are_tried_in_declaration_order() {
    let d = decoder(&[
        NumberDecodingStrategy::ConvertFromString,
        NumberDecodingStrategy::ConvertFromTrue,
    ]);
    assert_eq!(d.decode_value::<u8>(&Value::from("7")).unwrap(), 7);
    assert_eq!(d.decode_value::<u8>(&Value::True).unwrap(), 1);
}

#[test]
fn unlisted_strategy_does_not_apply() {
    let d = decoder(&[
        NumberDecodingStrategy::ConvertFromTrue,
        NumberDecodingStrategy::ConvertFromFalse,
    ]);
    assert!(d.decode_value::<u8>(&Value::from("7")).is_err());
}

#[test]
fn a_number_node_never_consults_strategies() {
    let d = decoder(&[NumberDecodingStrategy::ConvertFromString]);
    let err = d.decode_value::<u8>(&Value::from(1000)).unwrap_err();
    assert!(matches!(err, CodableError::DataCorrupted { .. }), "{err}");
}

#[test]
fn null_with_strategies_is_still_value_not_found() {
    let d = decoder(&[NumberDecodingStrategy::ConvertFromString]);
    let err = d.decode_value::<u8>(&Value::Null).unwrap_err();
    assert!(matches!(err, CodableError::ValueNotFound { .. }), "{err}");
}

#[test]
fn strategies_apply_inside_nested_structures() {
    #[derive(Deserialize, Debug, PartialEq)]
    struct Stats {
        views: u64,
        ratio: f32,
        flagged: u8,
    }

    let d = decoder(&[
        NumberDecodingStrategy::ConvertFromString,
        NumberDecodingStrategy::ConvertFromTrue,
        NumberDecodingStrategy::ConvertFromFalse,
    ]);
    let stats: Vec<Stats> = d
        .decode(br#"[{"views": "12", "ratio": 0.5, "flagged": true}, {"views": 3, "ratio": "1.5", "flagged": false}]"#)
        .unwrap();
    assert_eq!(
        stats,
        [
            Stats {
                views: 12,
                ratio: 0.5,
                flagged: 1
            },
            Stats {
                views: 3,
                ratio: 1.5,
                flagged: 0
            },
        ]
    );
}

#[test]
fn attempt_reports_each_outcome() {
    let strategy = NumberDecodingStrategy::ConvertFromString;
    assert_eq!(strategy.attempt::<u8>(&Value::from("5")), StrategyOutcome::Matched(5));
    assert!(matches!(
        strategy.attempt::<u8>(&Value::from("five")),
        StrategyOutcome::Malformed(_)
    ));
    assert_eq!(strategy.attempt::<u8>(&Value::True), StrategyOutcome::NoMatch);
    assert_eq!(NumberDecodingStrategy::ConvertFromTrue.apply::<i32>(&Value::True), Some(1));
}

// ============================================================================
// Encoding
// ============================================================================

#[test]
fn convert_to_string_boxes_every_number() {
    let encoder = JsonEncoder::new().with_number_strategies([NumberEncodingStrategy::ConvertToString]);
    let value = encoder.encode_value(&(42u32, -1i8, 1.5f64)).unwrap();
    assert_eq!(
        value,
        Value::from(vec![Value::from("42"), Value::from("-1"), Value::from("1.5")])
    );
}

#[test]
fn non_finite_strategy_leaves_finite_numbers_alone() {
    let encoder = JsonEncoder::new().with_number_strategies([non_finite_strings()]);
    let value = encoder
        .encode_value(&[1.0, f64::INFINITY, f64::NEG_INFINITY, f64::NAN])
        .unwrap();
    assert_eq!(value[0], Value::from(1.0));
    assert_eq!(value[1], Value::from("+Inf"));
    assert_eq!(value[2], Value::from("-Inf"));
    assert_eq!(value[3], Value::from("NaN"));
}

#[test]
fn first_applicable_encoding_strategy_wins() {
    let encoder = JsonEncoder::new()
        .with_number_strategies([non_finite_strings(), NumberEncodingStrategy::ConvertToString]);
    let value = encoder.encode_value(&[2.0, f64::INFINITY]).unwrap();
    assert_eq!(value, Value::from(vec![Value::from("2"), Value::from("+Inf")]));
}

#[test]
fn non_finite_without_strategy_is_invalid_value() {
    #[derive(Serialize)]
    struct Reading {
        celsius: f64,
    }

    let err = JsonEncoder::new()
        .encode_value(&Reading { celsius: f64::NAN })
        .unwrap_err();
    assert!(matches!(err, CodableError::InvalidValue { .. }), "{err}");
    assert_eq!(err.coding_path().unwrap().to_string(), "$.celsius");
}

#[test]
fn non_finite_strings_decode_back_with_convert_from_string() {
    let encoder = JsonEncoder::new().with_number_strategies([non_finite_strings()]);
    let bytes = encoder.encode(&f64::NEG_INFINITY).unwrap();
    assert_eq!(bytes, br#""-Inf""#);

    // Rust's float parser spells infinity "inf"; "-Inf" parses case-insensitively.
    let d = decoder(&[NumberDecodingStrategy::ConvertFromString]);
    let back: f64 = d.decode(&bytes).unwrap();
    assert_eq!(back, f64::NEG_INFINITY);
}
