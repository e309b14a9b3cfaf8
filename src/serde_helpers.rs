// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Serde helpers for lenient archive fields and byte payloads in exports.

use base64::Engine;
use bytes::Bytes;
use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;

/// Accept a port as a number or a numeric string. Anything that is not a
/// valid TCP port (`1..=65535`) decodes as `None`.
pub fn deserialize_lenient_port<'de, D>(deserializer: D) -> Result<Option<u16>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    let port = match raw {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite() && *f >= 0.0).map(|f| f as u64)),
        Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    Ok(port
        .and_then(|p| u16::try_from(p).ok())
        .filter(|p| *p != 0))
}

/// Accept a boolean or its string spelling (`"true"`/`"false"`, any case).
pub fn deserialize_lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::Bool(b)) => Some(b),
        Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => None,
    })
}

/// Accept text, or a number or boolean spelled out as text. Arrays and
/// objects decode as `None`.
pub fn deserialize_lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

pub fn serialize_base64<S>(bytes: &Bytes, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&base64::engine::general_purpose::STANDARD.encode(bytes))
}

pub fn deserialize_base64<'de, D>(deserializer: D) -> Result<Bytes, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    base64::engine::general_purpose::STANDARD
        .decode(s.as_bytes())
        .map(Bytes::from)
        .map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[derive(Deserialize)]
    struct PortHolder {
        #[serde(default, deserialize_with = "deserialize_lenient_port")]
        port: Option<u16>,
    }

    #[derive(Deserialize)]
    struct FlagHolder {
        #[serde(default, deserialize_with = "deserialize_lenient_bool")]
        flag: Option<bool>,
    }

    #[rstest]
    #[case(json!({"port": 8080}), Some(8080))]
    #[case(json!({"port": "443"}), Some(443))]
    #[case(json!({"port": " 80 "}), Some(80))]
    #[case(json!({"port": 8443.0}), Some(8443))]
    #[case(json!({"port": 0}), None)]
    #[case(json!({"port": 70000}), None)]
    #[case(json!({"port": -1}), None)]
    #[case(json!({"port": "http"}), None)]
    #[case(json!({"port": null}), None)]
    #[case(json!({}), None)]
    fn lenient_port(#[case] raw: Value, #[case] expected: Option<u16>) -> anyhow::Result<()> {
        let h: PortHolder = serde_json::from_value(raw)?;
        assert_eq!(h.port, expected);
        Ok(())
    }

    #[rstest]
    #[case(json!({"flag": true}), Some(true))]
    #[case(json!({"flag": "FALSE"}), Some(false))]
    #[case(json!({"flag": "yes"}), None)]
    #[case(json!({"flag": 1}), None)]
    #[case(json!({}), None)]
    fn lenient_bool(#[case] raw: Value, #[case] expected: Option<bool>) -> anyhow::Result<()> {
        let h: FlagHolder = serde_json::from_value(raw)?;
        assert_eq!(h.flag, expected);
        Ok(())
    }

    #[derive(Deserialize)]
    struct TextHolder {
        #[serde(default, deserialize_with = "deserialize_lenient_string")]
        text: Option<String>,
    }

    #[rstest]
    #[case(json!({"text": "gzip"}), Some("gzip"))]
    #[case(json!({"text": 42}), Some("42"))]
    #[case(json!({"text": false}), Some("false"))]
    #[case(json!({"text": ["a"]}), None)]
    #[case(json!({"text": null}), None)]
    #[case(json!({}), None)]
    fn lenient_string(#[case] raw: Value, #[case] expected: Option<&str>) -> anyhow::Result<()> {
        let h: TextHolder = serde_json::from_value(raw)?;
        assert_eq!(h.text.as_deref(), expected);
        Ok(())
    }

    #[test]
    fn base64_bytes_roundtrip() -> anyhow::Result<()> {
        #[derive(serde::Serialize, Deserialize)]
        struct Holder {
            #[serde(
                serialize_with = "serialize_base64",
                deserialize_with = "deserialize_base64"
            )]
            data: Bytes,
        }
        let h = Holder {
            data: Bytes::from_static(b"GET / HTTP/1.1\r\n\r\n"),
        };
        let s = serde_json::to_string(&h)?;
        assert!(s.contains("R0VUIC8gSFRUUC8xLjENCg0K"));
        let back: Holder = serde_json::from_str(&s)?;
        assert_eq!(back.data, h.data);
        Ok(())
    }
}
