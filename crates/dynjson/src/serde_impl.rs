//! `serde` support and conversions to and from `serde_json::Value`.

use crate::value::{Map, Value};
use serde::de::{Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::fmt;

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::Double(d) => serializer.serialize_f64(*d),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Object(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map {
                    out.serialize_entry(k, v)?;
                }
                out.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any valid JSON value")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Value, E> {
                Ok(Value::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Value, E> {
                Ok(Value::Int(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Value, E> {
                Ok(match i64::try_from(value) {
                    Ok(n) => Value::Int(n),
                    Err(_) => Value::Double(value as f64),
                })
            }

            fn visit_f64<E>(self, value: f64) -> Result<Value, E> {
                Ok(Value::Double(value))
            }

            fn visit_str<E>(self, value: &str) -> Result<Value, E> {
                Ok(Value::String(value.to_owned()))
            }

            fn visit_string<E>(self, value: String) -> Result<Value, E> {
                Ok(Value::String(value))
            }

            fn visit_unit<E>(self) -> Result<Value, E> {
                Ok(Value::Null)
            }

            fn visit_none<E>(self) -> Result<Value, E> {
                Ok(Value::Null)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(item) = seq.next_element()? {
                    items.push(item);
                }
                Ok(Value::Array(items))
            }

            fn visit_map<A>(self, mut access: A) -> Result<Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut map = Map::new();
                while let Some((key, value)) = access.next_entry::<String, Value>()? {
                    map.insert(key, value);
                }
                Ok(Value::Object(map))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

/// Integers above `i64::MAX` become Doubles.
impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Double(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

/// Non-finite Doubles become `null`, matching the canonical serializer.
impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Int(n) => serde_json::Value::Number(n.into()),
            Value::Double(d) => serde_json::Number::from_f64(d)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s),
            Value::Array(items) => {
                serde_json::Value::Array(items.into_iter().map(Into::into).collect())
            }
            Value::Object(map) => serde_json::Value::Object(
                map.into_iter().map(|(k, v)| (k, v.into())).collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Kind;
    use serde_json::json;

    #[test]
    fn serde_json_conversion_keeps_int_double_split() {
        let v = Value::from(json!({"i": 3, "d": 3.5, "big": 18446744073709551615u64}));
        assert_eq!(v["i"], Value::Int(3));
        assert_eq!(v["d"], Value::Double(3.5));
        assert!(v["big"].is_double());
    }

    #[test]
    fn nan_converts_to_json_null() {
        let back: serde_json::Value = Value::Double(f64::NAN).into();
        assert!(back.is_null());
    }

    #[test]
    fn serialize_keeps_int_double_split() {
        let v = crate::parse(r#"{"n":null,"b":true,"i":7,"d":7.5,"s":"x","a":[1,2.0],"o":{}}"#)
            .unwrap();
        let out = serde_json::to_value(&v).unwrap();
        assert_eq!(
            out,
            json!({"n": null, "b": true, "i": 7, "d": 7.5, "s": "x", "a": [1, 2.0], "o": {}})
        );
        assert!(out["i"].is_i64());
        assert!(out["d"].is_f64());
        assert!(out["a"][0].is_i64());
        assert!(out["a"][1].is_f64());
    }

    #[test]
    fn conversion_through_serde_json_value_is_lossless() {
        let mut v = Value::Null;
        v["list"].append(1);
        v["list"].append(-0.5);
        v["list"].append("two");
        v["nested"]["flag"] = Value::from(false);
        v["nested"]["empty"] = Value::from(Kind::Array);
        v["nested"]["none"] = Value::Null;

        let json: serde_json::Value = v.clone().into();
        assert_eq!(json["list"][1], json!(-0.5));
        assert_eq!(Value::from(json), v);
    }

    #[test]
    fn nan_serializes_as_null() {
        assert_eq!(serde_json::to_string(&Value::Double(f64::NAN)).unwrap(), "null");
    }

    #[test]
    fn deserialize_through_serde_json() {
        let v: Value = serde_json::from_str(r#"{"a":[1,2.5,"x",null,true]}"#).unwrap();
        assert_eq!(
            v["a"],
            Value::Array(vec![
                Value::Int(1),
                Value::Double(2.5),
                Value::from("x"),
                Value::Null,
                Value::Bool(true),
            ])
        );
    }
}
