//! Two-pass decoding of JSON objects into typed records.
//!
//! # Design
//! Pass one checks that every key a record declares in `Record::REQUIRED_KEYS`
//! is present in the raw object. Pass two decodes each field on its own, so a
//! failure names the exact key (`data[1].day`) instead of the whole body.
//! The presence check runs first because a deserializer that defaults absent
//! numbers to zero would otherwise accept a body of the wrong record type.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::{OuraError, Result};
use crate::types::Page;

/// Keys a list page must carry for the body to count as a page at all.
pub const PAGE_REQUIRED_KEYS: &[&str] = &["data"];

/// A record type that can be decoded from a raw JSON object.
pub trait Record: Sized {
    /// Resource name used in log events.
    const KIND: &'static str;

    /// Keys that must be present before a typed decode is attempted.
    const REQUIRED_KEYS: &'static [&'static str];

    /// Second pass. Runs only after every required key was found.
    fn from_fields(fields: &Fields<'_>) -> Result<Self>;
}

/// A JSON key that may be absent, explicitly `null`, or set.
///
/// Deserializing a present key never yields `Missing`; pair the field with
/// `#[serde(default)]` so an absent key does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence<T> {
    Missing,
    Null,
    Value(T),
}

impl<T> Default for Presence<T> {
    fn default() -> Self {
        Self::Missing
    }
}

impl<T> Presence<T> {
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    pub fn as_option(&self) -> Option<&T> {
        match self {
            Self::Value(value) => Some(value),
            Self::Missing | Self::Null => None,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Value(value) => Some(value),
            Self::Missing | Self::Null => None,
        }
    }
}

impl<T: Serialize> Serialize for Presence<T> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Value(value) => value.serialize(serializer),
            Self::Missing | Self::Null => serializer.serialize_none(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Presence<T> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Self::Value(value),
            None => Self::Null,
        })
    }
}

/// Field accessor over a raw JSON object, carrying the path used in errors.
pub struct Fields<'a> {
    object: &'a Map<String, Value>,
    prefix: String,
}

impl<'a> Fields<'a> {
    pub fn new(object: &'a Map<String, Value>) -> Self {
        Self::with_prefix(object, String::new())
    }

    fn with_prefix(object: &'a Map<String, Value>, prefix: String) -> Self {
        Self { object, prefix }
    }

    fn path(&self, key: &str) -> String {
        format!("{}{key}", self.prefix)
    }

    /// First pass: fail with every absent key named at once.
    pub fn require_all(&self, keys: &[&str]) -> Result<()> {
        let missing: Vec<String> = keys
            .iter()
            .filter(|key| !self.object.contains_key(**key))
            .map(|key| self.path(key))
            .collect();
        if missing.is_empty() {
            return Ok(());
        }
        Err(OuraError::decode(
            missing.join(", "),
            "required field not found",
        ))
    }

    /// Decode a key that must be present and non-null.
    pub fn required<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let value = self
            .object
            .get(key)
            .ok_or_else(|| OuraError::decode(self.path(key), "required field not found"))?;
        T::deserialize(value).map_err(|e| OuraError::decode(self.path(key), e.to_string()))
    }

    /// Decode a key whose absence and `null` are both acceptable.
    pub fn optional<T: DeserializeOwned>(&self, key: &str) -> Result<Presence<T>> {
        match self.object.get(key) {
            None => Ok(Presence::Missing),
            Some(Value::Null) => Ok(Presence::Null),
            Some(value) => T::deserialize(value)
                .map(Presence::Value)
                .map_err(|e| OuraError::decode(self.path(key), e.to_string())),
        }
    }
}

/// Run both passes over an already-parsed object.
pub fn decode_object<T: Record>(object: &Map<String, Value>) -> Result<T> {
    decode_with(&Fields::new(object))
}

fn decode_with<T: Record>(fields: &Fields<'_>) -> Result<T> {
    fields.require_all(T::REQUIRED_KEYS)?;
    T::from_fields(fields)
}

/// Decode a raw body into a record without envelope classification.
pub fn decode_record<T: Record>(body: &str) -> Result<T> {
    decode_object(&parse_object(body)?)
}

/// Decode a `{data: [...], next_token}` page, record by record.
pub fn decode_page<T: Record>(object: &Map<String, Value>) -> Result<Page<T>> {
    let page = Fields::new(object);
    page.require_all(PAGE_REQUIRED_KEYS)?;

    let items = match object.get("data") {
        Some(Value::Array(items)) => items,
        _ => return Err(OuraError::decode("data", "expected an array")),
    };

    let data = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let Value::Object(record) = item else {
                return Err(OuraError::decode(format!("data[{index}]"), "expected an object"));
            };
            decode_with(&Fields::with_prefix(record, format!("data[{index}].")))
        })
        .collect::<Result<Vec<T>>>()?;

    let next_token = page.optional::<String>("next_token")?.into_option();
    Ok(Page { data, next_token })
}

fn parse_object(body: &str) -> Result<Map<String, Value>> {
    match serde_json::from_str(body) {
        Ok(Value::Object(object)) => Ok(object),
        Ok(_) => Err(OuraError::decode("body", "expected a JSON object")),
        Err(e) => Err(OuraError::decode("body", e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, PartialEq)]
    struct Reading {
        id: String,
        value: i32,
        note: Presence<String>,
    }

    impl Record for Reading {
        const KIND: &'static str = "reading";
        const REQUIRED_KEYS: &'static [&'static str] = &["id", "value"];

        fn from_fields(fields: &Fields<'_>) -> Result<Self> {
            Ok(Self {
                id: fields.required("id")?,
                value: fields.required("value")?,
                note: fields.optional("note")?,
            })
        }
    }

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    #[test]
    fn missing_keys_are_all_named() {
        let err = decode_object::<Reading>(&object(json!({"note": "x"}))).unwrap_err();
        assert_eq!(err, OuraError::decode("id, value", "required field not found"));
    }

    #[test]
    fn zero_defaults_do_not_mask_missing_keys() {
        let err = decode_object::<Reading>(&object(json!({"id": "a"}))).unwrap_err();
        assert!(matches!(err, OuraError::Decode { ref field, .. } if field == "value"));
    }

    #[test]
    fn type_mismatch_names_field() {
        let err = decode_object::<Reading>(&object(json!({"id": "a", "value": "ten"}))).unwrap_err();
        match err {
            OuraError::Decode { field, reason } => {
                assert_eq!(field, "value");
                assert!(reason.contains("invalid type"), "{reason}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn tri_state_keys() {
        let absent = decode_object::<Reading>(&object(json!({"id": "a", "value": 1}))).unwrap();
        assert_eq!(absent.note, Presence::Missing);

        let null = decode_object::<Reading>(&object(json!({"id": "a", "value": 1, "note": null}))).unwrap();
        assert_eq!(null.note, Presence::Null);
        assert_eq!(null.note.as_option(), None);

        let set = decode_object::<Reading>(&object(json!({"id": "a", "value": 1, "note": "hi"}))).unwrap();
        assert_eq!(set.note, Presence::Value("hi".to_string()));
    }

    #[test]
    fn required_rejects_null() {
        let err = decode_object::<Reading>(&object(json!({"id": null, "value": 1}))).unwrap_err();
        assert!(matches!(err, OuraError::Decode { ref field, .. } if field == "id"));
    }

    #[test]
    fn page_errors_carry_index() {
        let body = json!({
            "data": [{"id": "a", "value": 1}, {"id": "b"}],
            "next_token": null
        });
        let err = decode_page::<Reading>(&object(body)).unwrap_err();
        assert_eq!(err, OuraError::decode("data[1].value", "required field not found"));
    }

    #[test]
    fn page_keeps_order_and_token() {
        let body = json!({
            "data": [{"id": "a", "value": 1}, {"id": "b", "value": 2}],
            "next_token": "abc"
        });
        let page = decode_page::<Reading>(&object(body)).unwrap();
        let ids: Vec<&str> = page.data.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
        assert_eq!(page.next_token.as_deref(), Some("abc"));
    }

    #[test]
    fn page_token_may_be_absent() {
        let page = decode_page::<Reading>(&object(json!({"data": []}))).unwrap();
        assert!(page.data.is_empty());
        assert!(page.next_token.is_none());
    }

    #[test]
    fn page_rejects_non_array_data() {
        let err = decode_page::<Reading>(&object(json!({"data": {}}))).unwrap_err();
        assert_eq!(err, OuraError::decode("data", "expected an array"));
    }

    #[test]
    fn raw_body_must_be_an_object() {
        let err = decode_record::<Reading>("[1, 2]").unwrap_err();
        assert_eq!(err, OuraError::decode("body", "expected a JSON object"));
        assert!(decode_record::<Reading>("not json").unwrap_err().is_decode());
    }

    #[test]
    fn presence_serializes_absent_as_null() {
        let missing: Presence<i32> = Presence::Missing;
        assert_eq!(serde_json::to_value(missing).unwrap(), Value::Null);
        assert_eq!(serde_json::to_value(Presence::Value(3)).unwrap(), json!(3));
        let parsed: Presence<i32> = serde_json::from_value(Value::Null).unwrap();
        assert_eq!(parsed, Presence::Null);
    }
}
