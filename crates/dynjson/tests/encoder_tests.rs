use dynjson::{parse, serialize, Kind, Value};

// ============================================================================
// Scalars
// ============================================================================

#[test]
fn encode_null_and_bools() {
    assert_eq!(serialize(&Value::Null), "null");
    assert_eq!(serialize(&Value::from(true)), "true");
    assert_eq!(serialize(&Value::from(false)), "false");
}

#[test]
fn encode_integers() {
    assert_eq!(serialize(&Value::from(0)), "0");
    assert_eq!(serialize(&Value::from(-42)), "-42");
    assert_eq!(serialize(&Value::from(i64::MAX)), "9223372036854775807");
    assert_eq!(serialize(&Value::from(i64::MIN)), "-9223372036854775808");
}

#[test]
fn encode_doubles_with_fifteen_fraction_digits() {
    assert_eq!(serialize(&Value::from(3.25)), "3.250000000000000");
    assert_eq!(serialize(&Value::from(0.0)), "0.000000000000000");
    assert_eq!(serialize(&Value::from(-0.125)), "-0.125000000000000");
}

#[test]
fn large_doubles_are_not_exponential() {
    let text = serialize(&Value::from(1e20));
    assert_eq!(text, "100000000000000000000.000000000000000");
    assert!(!text.contains('e'));
}

#[test]
fn tiny_doubles_round_to_fixed_point() {
    assert_eq!(serialize(&Value::from(1e-20)), "0.000000000000000");
}

// ============================================================================
// Strings
// ============================================================================

#[test]
fn encode_plain_string() {
    assert_eq!(serialize(&Value::from("hello")), r#""hello""#);
    assert_eq!(serialize(&Value::from("")), r#""""#);
}

#[test]
fn encode_named_escapes() {
    let v = Value::from("\"\\\u{08}\u{0C}\n\r\t");
    assert_eq!(serialize(&v), r#""\"\\\b\f\n\r\t""#);
}

#[test]
fn solidus_is_not_escaped() {
    assert_eq!(serialize(&Value::from("a/b")), r#""a/b""#);
}

#[test]
fn other_control_characters_use_unicode_escape() {
    let v = Value::from("\u{0}\u{1b}\u{1f}");
    let expected = format!("\"{0}u0000{0}u001b{0}u001f\"", '\\');
    assert_eq!(serialize(&v), expected);
}

#[test]
fn non_ascii_is_written_unescaped() {
    assert_eq!(
        serialize(&Value::from("\u{4f60}\u{597d} \u{1F600}")),
        "\"\u{4f60}\u{597d} \u{1F600}\""
    );
}

// ============================================================================
// Containers
// ============================================================================

#[test]
fn encode_empty_containers() {
    assert_eq!(serialize(&Value::from(Kind::Array)), "[]");
    assert_eq!(serialize(&Value::from(Kind::Object)), "{}");
}

#[test]
fn encode_array_without_whitespace() {
    let mut v = Value::Null;
    v.append(1);
    v.append("two");
    v.append(Value::Null);
    v.append(Value::from(Kind::Array));
    assert_eq!(serialize(&v), r#"[1,"two",null,[]]"#);
}

#[test]
fn object_keys_are_sorted() {
    let mut v = Value::Null;
    v["b"] = Value::from(2);
    v["a"] = Value::from(1);
    v["c"] = Value::from(3);
    assert_eq!(serialize(&v), r#"{"a":1,"b":2,"c":3}"#);
}

#[test]
fn key_order_is_bytewise() {
    let mut v = Value::Null;
    v["b"] = Value::Null;
    v["B"] = Value::Null;
    v["aa"] = Value::Null;
    v["a"] = Value::Null;
    assert_eq!(serialize(&v), r#"{"B":null,"a":null,"aa":null,"b":null}"#);
}

#[test]
fn object_keys_are_escaped() {
    let mut v = Value::Null;
    v["line\nbreak"] = Value::from(true);
    assert_eq!(serialize(&v), r#"{"line\nbreak":true}"#);
}

#[test]
fn nested_document() {
    let v = parse(r#"{ "z": [ {"y": 1, "x": [true, false]} ], "a": null }"#).unwrap();
    assert_eq!(serialize(&v), r#"{"a":null,"z":[{"x":[true,false],"y":1}]}"#);
}

// ============================================================================
// Display & idempotence
// ============================================================================

#[test]
fn display_matches_serialize() {
    let v = parse(r#"{"k":[1,2.5,"s"]}"#).unwrap();
    assert_eq!(v.to_string(), serialize(&v));
    assert_eq!(v.to_json_string(), serialize(&v));
}

#[test]
fn serialization_is_idempotent() {
    let v = parse(r#"{"b":[1,{"d":2.5,"c":"x"}],"a":false}"#).unwrap();
    let first = serialize(&v);
    let second = serialize(&v);
    assert_eq!(first, second);
}
