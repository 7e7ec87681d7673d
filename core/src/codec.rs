//! JSON codec shared by both directions of a typed exchange.
//!
//! Request payloads are encoded with null-valued fields omitted, so a caller's
//! `Option::None` never reaches the enclave as an explicit `null`. The
//! omission applies to object members at any depth. `null` elements inside
//! arrays are positional values rather than fields and are kept.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::TransportError;

/// Stateless `serde_json` codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl JsonCodec {
    pub fn encode<S: Serialize + ?Sized>(&self, value: &S) -> Result<String, TransportError> {
        let mut json = serde_json::to_value(value).map_err(|e| TransportError::Encode(e.to_string()))?;
        strip_nulls(&mut json);
        serde_json::to_string(&json).map_err(|e| TransportError::Encode(e.to_string()))
    }

    pub fn decode<T: DeserializeOwned>(&self, text: &str) -> Result<T, TransportError> {
        serde_json::from_str(text).map_err(|e| TransportError::Decode(e.to_string()))
    }
}

fn strip_nulls(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, v| !v.is_null());
            map.values_mut().for_each(strip_nulls);
        }
        Value::Array(items) => items.iter_mut().for_each(strip_nulls),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Inner {
        key: Option<String>,
        flag: bool,
    }

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Outer {
        payload: String,
        from: Option<String>,
        to: Vec<String>,
        inner: Inner,
        list: Vec<Inner>,
    }

    fn sample() -> Outer {
        Outer {
            payload: "cGF5bG9hZA==".to_string(),
            from: None,
            to: vec!["QfeDAys9MPDs2XHExtc84jKGHxZg/aj52DTh0vtA3Xc=".to_string()],
            inner: Inner { key: None, flag: true },
            list: vec![
                Inner {
                    key: Some("k".to_string()),
                    flag: false,
                },
                Inner { key: None, flag: false },
            ],
        }
    }

    #[test]
    fn encode_omits_null_fields() {
        let text = JsonCodec.encode(&sample()).unwrap();
        let json: Value = serde_json::from_str(&text).unwrap();
        assert!(json.get("from").is_none());
        assert_eq!(json["payload"], "cGF5bG9hZA==");
    }

    #[test]
    fn encode_omits_nested_null_fields() {
        let text = JsonCodec.encode(&sample()).unwrap();
        let json: Value = serde_json::from_str(&text).unwrap();
        assert!(json["inner"].get("key").is_none());
        assert_eq!(json["inner"]["flag"], true);
        assert_eq!(json["list"][0]["key"], "k");
        assert!(json["list"][1].get("key").is_none());
    }

    #[test]
    fn encode_keeps_null_array_elements() {
        let text = JsonCodec.encode(&vec![Some(1), None, Some(3)]).unwrap();
        assert_eq!(text, "[1,null,3]");
    }

    #[test]
    fn encode_rejects_non_string_map_keys() {
        let mut map = BTreeMap::new();
        map.insert((1, 2), "value");
        let err = JsonCodec.encode(&map).unwrap_err();
        assert!(matches!(err, TransportError::Encode(_)));
    }

    #[test]
    fn decode_reads_missing_options_as_none() {
        let inner: Inner = JsonCodec.decode(r#"{"flag":true}"#).unwrap();
        assert_eq!(inner, Inner { key: None, flag: true });
    }

    #[test]
    fn decode_empty_text_fails() {
        let err = JsonCodec.decode::<Inner>("").unwrap_err();
        assert!(matches!(err, TransportError::Decode(_)));
    }

    #[test]
    fn decode_wrong_shape_fails() {
        let err = JsonCodec.decode::<Inner>(r#"{"flag":"yes"}"#).unwrap_err();
        assert!(matches!(err, TransportError::Decode(_)));
    }
}
