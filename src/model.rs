// SPDX-FileCopyrightText: 2026 Alexandre Gomes Gaigalas <alganet@gmail.com>
//
// SPDX-License-Identifier: ISC

//! Serde shape of one captured transaction as stored in the archive.
//!
//! Producers disagree on the JSON type of several fields across schema
//! versions, so those fields decode into [`Scalar`] and are resolved later by
//! [`crate::scalar`]. Everything else is optional: a member only fails to
//! decode when its JSON is malformed or a field has an impossible type.

use serde::Deserialize;
use serde_json::{Map, Number, Value};

/// A JSON value whose type varies between producer versions.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Scalar {
    Text(String),
    Number(Number),
    Object(Map<String, Value>),
    Other(Value),
}

/// One decoded archive member.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct LogEntry {
    #[serde(default)]
    pub request: Option<Request>,
    #[serde(default)]
    pub response: Option<Response>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    #[serde(default)]
    pub method: Option<Scalar>,
    #[serde(default)]
    pub full_path: Option<String>,
    #[serde(default)]
    pub version: Option<Scalar>,
    #[serde(default)]
    pub scheme: Option<String>,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default, deserialize_with = "crate::serde_helpers::deserialize_lenient_port")]
    pub port: Option<u16>,
    #[serde(
        default,
        rename = "isSSL",
        deserialize_with = "crate::serde_helpers::deserialize_lenient_bool"
    )]
    pub is_ssl: Option<bool>,
    #[serde(default)]
    pub header: Option<HeaderBlock>,
    #[serde(default)]
    pub body_data: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    #[serde(default)]
    pub status: Option<Scalar>,
    #[serde(default)]
    pub version: Option<Scalar>,
    #[serde(default)]
    pub header: Option<HeaderBlock>,
    #[serde(default)]
    pub body_data: Option<String>,
}

/// Ordered header list. Null slots inside `entries` are tolerated.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct HeaderBlock {
    #[serde(default)]
    pub entries: Option<Vec<Option<HeaderEntry>>>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct HeaderEntry {
    #[serde(default)]
    pub key: Option<HeaderKey>,
    #[serde(default, deserialize_with = "crate::serde_helpers::deserialize_lenient_string")]
    pub value: Option<String>,
    #[serde(default, deserialize_with = "crate::serde_helpers::deserialize_lenient_bool")]
    pub is_enabled: Option<bool>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct HeaderKey {
    #[serde(default)]
    pub name: Option<String>,
    /// Lowercase copy written by some producers; the wire name is `name`.
    #[serde(default)]
    pub name_in_lowercase: Option<String>,
}

impl HeaderBlock {
    /// Iterate entries that carry a key, skipping null slots.
    pub fn keyed_entries(&self) -> impl Iterator<Item = (&HeaderKey, &HeaderEntry)> {
        self.entries
            .iter()
            .flatten()
            .flatten()
            .filter_map(|e| e.key.as_ref().map(|k| (k, e)))
    }

    /// True if any keyed entry, enabled or not, is named `name` (ASCII case-insensitive).
    pub fn contains(&self, name: &str) -> bool {
        self.keyed_entries()
            .any(|(k, _)| k.name().eq_ignore_ascii_case(name))
    }
}

impl HeaderKey {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }
}

impl HeaderEntry {
    /// Absent or `true` means the entry takes part in the message.
    pub fn enabled(&self) -> bool {
        self.is_enabled != Some(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!("GET"), Scalar::Text("GET".into()))]
    #[case(json!(404), Scalar::Number(Number::from(404u16)))]
    #[case(json!(true), Scalar::Other(json!(true)))]
    #[case(json!([1, 2]), Scalar::Other(json!([1, 2])))]
    fn scalar_variants(#[case] raw: Value, #[case] expected: Scalar) -> anyhow::Result<()> {
        let s: Scalar = serde_json::from_value(raw)?;
        assert_eq!(s, expected);
        Ok(())
    }

    #[test]
    fn scalar_object_variant() -> anyhow::Result<()> {
        let s: Scalar = serde_json::from_value(json!({"code": 500, "phrase": "x"}))?;
        match s {
            Scalar::Object(m) => assert_eq!(m.get("code"), Some(&json!(500))),
            other => panic!("unexpected {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn request_decodes_camel_case_fields() -> anyhow::Result<()> {
        let raw = r#"{
            "request": {
                "method": {"name": "POST"},
                "fullPath": "/a?b=1",
                "version": {"major": 1, "minor": 1},
                "scheme": "https",
                "host": "example.com",
                "port": "8443",
                "isSSL": true,
                "header": {"entries": [
                    {"key": {"name": "Accept", "nameInLowercase": "accept"}, "value": "*/*"},
                    null,
                    {"key": null, "value": "orphan"}
                ]},
                "bodyData": "aGk="
            },
            "response": null
        }"#;
        let entry: LogEntry = serde_json::from_str(raw)?;
        let req = entry.request.ok_or_else(|| anyhow::anyhow!("missing request"))?;
        assert_eq!(req.full_path.as_deref(), Some("/a?b=1"));
        assert_eq!(req.port, Some(8443));
        assert_eq!(req.is_ssl, Some(true));
        assert_eq!(req.body_data.as_deref(), Some("aGk="));
        let header = req.header.ok_or_else(|| anyhow::anyhow!("missing header"))?;
        let keyed: Vec<_> = header.keyed_entries().collect();
        assert_eq!(keyed.len(), 1);
        assert_eq!(keyed[0].0.name_in_lowercase.as_deref(), Some("accept"));
        assert!(entry.response.is_none());
        Ok(())
    }

    #[test]
    fn contains_counts_disabled_entries() -> anyhow::Result<()> {
        let block: HeaderBlock = serde_json::from_value(json!({
            "entries": [
                {"key": {"name": "content-length"}, "value": "3", "isEnabled": false}
            ]
        }))?;
        assert!(block.contains("Content-Length"));
        assert!(!block.contains("Host"));
        Ok(())
    }

    #[test]
    fn header_entry_accepts_loose_types() -> anyhow::Result<()> {
        let block: HeaderBlock = serde_json::from_value(json!({
            "entries": [
                {"key": {"name": "X-Off"}, "value": "1", "isEnabled": "false"},
                {"key": {"name": "X-Retry"}, "value": 3, "isEnabled": "TRUE"},
                {"key": {"name": "X-Flag"}, "value": true, "isEnabled": 0}
            ]
        }))?;
        let entries: Vec<&HeaderEntry> = block.keyed_entries().map(|(_, e)| e).collect();
        assert!(!entries[0].enabled());
        assert_eq!(entries[1].value.as_deref(), Some("3"));
        assert!(entries[1].enabled());
        assert_eq!(entries[2].value.as_deref(), Some("true"));
        assert!(entries[2].enabled());
        Ok(())
    }

    #[test]
    fn enabled_defaults_to_true() {
        let e = HeaderEntry::default();
        assert!(e.enabled());
        let off = HeaderEntry {
            is_enabled: Some(false),
            ..Default::default()
        };
        assert!(!off.enabled());
    }
}
