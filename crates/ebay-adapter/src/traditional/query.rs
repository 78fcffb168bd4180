//! Query-string encoding for Client Alerts
//!
//! Nested fields are flattened the way the Client Alerts API expects:
//! - object members join with a dot: `ChannelDescriptor.ChannelType`
//! - array items are indexed in parentheses: `ChannelDescriptor(0).ChannelID`
//!
//! Later keys replace earlier keys of the same name in place.

use serde_json::Value;
use url::form_urlencoded::byte_serialize;
use url::Url;

use crate::error::Result;
use crate::types::Fields;

/// Ordered query parameters with replace-in-place semantics
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some(pair) => pair.1 = value,
            None => self.pairs.push((key, value)),
        }
    }

    /// Flatten `fields` and set every resulting key
    pub fn extend_fields(&mut self, fields: &Fields) {
        for (key, value) in fields {
            flatten(&encode(key), value, self);
        }
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// `k=v&k=v`; keys are expected to be already encoded
    pub fn to_query_string(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={}", k, encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Absolute URL carrying these parameters as its query
    pub fn apply_to(&self, endpoint: &str) -> Result<String> {
        let mut url = Url::parse(endpoint)?;
        if !self.pairs.is_empty() {
            url.set_query(Some(&self.to_query_string()));
        }
        Ok(url.into())
    }
}

fn encode(text: &str) -> String {
    byte_serialize(text.as_bytes()).collect()
}

fn flatten(prefix: &str, value: &Value, params: &mut QueryParams) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                flatten(&format!("{}.{}", prefix, encode(key)), child, params);
            }
        }
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                flatten(&format!("{}({})", prefix, index), item, params);
            }
        }
        Value::String(s) => params.set(prefix, s.clone()),
        Value::Number(n) => params.set(prefix, n.to_string()),
        Value::Bool(b) => params.set(prefix, b.to_string()),
        Value::Null => params.set(prefix, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Fields {
        match value {
            Value::Object(map) => map,
            _ => panic!("fields must be an object"),
        }
    }

    #[test]
    fn test_flatten_dots_and_parentheses() {
        let mut params = QueryParams::new();
        params.extend_fields(&fields(json!({
            "ChannelDescriptor": [
                {"ChannelType": "Item", "ChannelID": 123},
                {"ChannelType": "User", "ChannelID": "bob smith"}
            ]
        })));

        let query = params.to_query_string();
        assert!(query.contains("ChannelDescriptor(0).ChannelID=123"));
        assert!(query.contains("ChannelDescriptor(0).ChannelType=Item"));
        assert!(query.contains("ChannelDescriptor(1).ChannelID=bob+smith"));
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut params = QueryParams::new();
        params.set("appid", "a");
        params.set("siteid", "0");
        params.set("appid", "b");
        assert_eq!(
            params.pairs(),
            &[("appid".to_string(), "b".to_string()), ("siteid".to_string(), "0".to_string())]
        );
    }

    #[test]
    fn test_apply_to_endpoint() {
        let mut params = QueryParams::new();
        params.set("callname", "GetPublicAlerts");
        params.extend_fields(&fields(json!({"ChannelDescriptor": [{"ChannelID": 1}]})));

        let url = params.apply_to("https://clientalerts.ebay.com/ws/ecasvc/ClientAlerts").unwrap();
        assert_eq!(
            url,
            "https://clientalerts.ebay.com/ws/ecasvc/ClientAlerts?callname=GetPublicAlerts&ChannelDescriptor(0).ChannelID=1"
        );
    }
}
