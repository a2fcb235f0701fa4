//! Addressing and payload types accepted by [`HttpRepository`].
//!
//! Records are generic: callers pick their own serde types, and the
//! repository only inspects them through their JSON form.
//!
//! [`HttpRepository`]: crate::repository::http_repository::HttpRepository

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Name of the member that identifies a record.
pub const ID_KEY: &str = "id";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    Number(i64),
    Unsigned(u64),
    Text(String),
}

impl ResourceId {
    /// Reads an id out of a JSON value. Integral numbers of any width
    /// identify, as do integral floats such as `123.0`; `null`, booleans,
    /// fractional numbers and containers do not.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => {
                if let Some(signed) = n.as_i64() {
                    Some(ResourceId::Number(signed))
                } else if let Some(unsigned) = n.as_u64() {
                    Some(ResourceId::Unsigned(unsigned))
                } else {
                    n.as_f64().and_then(integral)
                }
            }
            Value::String(s) => Some(ResourceId::Text(s.clone())),
            _ => None,
        }
    }
}

impl Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceId::Number(n) => write!(f, "{}", n),
            ResourceId::Unsigned(n) => write!(f, "{}", n),
            ResourceId::Text(s) => write!(f, "{}", s),
        }
    }
}

fn integral(value: f64) -> Option<ResourceId> {
    if !value.is_finite() || value.fract() != 0.0 {
        return None;
    }

    if value >= i64::MIN as f64 && value < i64::MAX as f64 {
        Some(ResourceId::Number(value as i64))
    } else if value >= 0.0 && value < u64::MAX as f64 {
        Some(ResourceId::Unsigned(value as u64))
    } else {
        None
    }
}

impl From<i64> for ResourceId {
    fn from(value: i64) -> Self {
        ResourceId::Number(value)
    }
}

impl From<u64> for ResourceId {
    fn from(value: u64) -> Self {
        i64::try_from(value)
            .map(ResourceId::Number)
            .unwrap_or(ResourceId::Unsigned(value))
    }
}

impl From<&str> for ResourceId {
    fn from(value: &str) -> Self {
        ResourceId::Text(value.to_string())
    }
}

impl From<String> for ResourceId {
    fn from(value: String) -> Self {
        ResourceId::Text(value)
    }
}

/// A collection, or one item of it when `id` is set or already part of `url`.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceRef {
    pub url: String,
    pub id: Option<ResourceId>,
}

impl ResourceRef {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            id: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<ResourceId>) -> Self {
        self.id = Some(id.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub url: String,
    pub cursor: Option<String>,
}

impl Query {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            cursor: None,
        }
    }

    pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Payload<T> {
    pub url: String,
    pub data: T,
}

impl<T> Payload<T> {
    pub fn new(url: impl Into<String>, data: T) -> Self {
        Self {
            url: url.into(),
            data,
        }
    }
}

impl<T: Serialize> Payload<T> {
    /// The identifying member of `data`, if it serializes to an object
    /// carrying one.
    pub fn id(&self) -> Result<Option<ResourceId>, serde_json::Error> {
        let value = serde_json::to_value(&self.data)?;
        Ok(identify(&value))
    }

    /// Splits the payload into an explicit create or update.
    pub fn classify(self) -> Result<Write<T>, serde_json::Error> {
        let Payload { url, data } = self;
        let id = identify(&serde_json::to_value(&data)?);

        Ok(match id {
            Some(id) => Write::Update {
                url,
                id,
                fields: data,
            },
            None => Write::Create { url, fields: data },
        })
    }
}

fn identify(value: &Value) -> Option<ResourceId> {
    value
        .as_object()
        .and_then(|fields| fields.get(ID_KEY))
        .and_then(ResourceId::from_value)
}

#[derive(Debug, Clone, PartialEq)]
pub enum Write<T> {
    Create { url: String, fields: T },
    Update { url: String, id: ResourceId, fields: T },
}

impl<T> Write<T> {
    pub fn url(&self) -> &str {
        match self {
            Write::Create { url, .. } | Write::Update { url, .. } => url,
        }
    }
}

/// The `{}` record a successful destroy resolves to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Empty {}

#[cfg(test)]
mod tests {
    use serde::Serialize;
    use serde_json::json;

    use crate::repository::resource::{Empty, Payload, ResourceId, ResourceRef, Write};

    #[derive(Debug, Clone, PartialEq, Serialize)]
    struct Stuff {
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<i64>,
        name: String,
    }

    #[test]
    fn payload_without_id_is_a_create() {
        let write = Payload::new("/good_stuff", json!({"name": "stuff"}))
            .classify()
            .unwrap();

        assert_eq!(
            write,
            Write::Create {
                url: "/good_stuff".to_string(),
                fields: json!({"name": "stuff"}),
            }
        );
    }

    #[test]
    fn payload_with_id_is_an_update() {
        let write = Payload::new("/good_stuff", json!({"id": 123, "name": "updated_stuff"}))
            .classify()
            .unwrap();

        assert!(matches!(write, Write::Update { id: ResourceId::Number(123), .. }));
    }

    #[test]
    fn null_or_non_scalar_ids_do_not_identify() {
        for data in [
            json!({"id": null, "name": "stuff"}),
            json!({"id": [1], "name": "stuff"}),
            json!({"id": 1.5}),
            json!({"id": true}),
            json!(["id", 123]),
        ] {
            let write = Payload::new("/good_stuff", data).classify().unwrap();
            assert!(matches!(write, Write::Create { .. }));
        }
    }

    #[test]
    fn unsigned_ids_beyond_i64_are_an_update() {
        let payload = Payload::new("/good_stuff", json!({"id": u64::MAX, "name": "x"}));

        assert_eq!(payload.id().unwrap(), Some(ResourceId::Unsigned(u64::MAX)));
        let write = payload.classify().unwrap();
        assert!(matches!(write, Write::Update { id: ResourceId::Unsigned(u64::MAX), .. }));
    }

    #[test]
    fn integral_float_ids_are_an_update() {
        let write = Payload::new("/good_stuff", json!({"id": 123.0, "name": "x"}))
            .classify()
            .unwrap();

        assert!(matches!(write, Write::Update { id: ResourceId::Number(123), .. }));
    }

    #[test]
    fn unsigned_ids_display_and_convert_without_loss() {
        assert_eq!(ResourceId::Unsigned(u64::MAX).to_string(), "18446744073709551615");
        assert_eq!(ResourceId::from(7_u64), ResourceId::Number(7));
        assert_eq!(ResourceId::from(u64::MAX), ResourceId::Unsigned(u64::MAX));

        let parsed: ResourceId = serde_json::from_value(json!(u64::MAX)).unwrap();
        assert_eq!(parsed, ResourceId::Unsigned(u64::MAX));
    }

    #[test]
    fn typed_records_are_classified_through_their_json_form() {
        let create = Payload::new("/good_stuff", Stuff { id: None, name: "stuff".into() });
        let update = Payload::new("/good_stuff", Stuff { id: Some(7), name: "stuff".into() });

        assert_eq!(create.id().unwrap(), None);
        assert_eq!(update.id().unwrap(), Some(ResourceId::Number(7)));
        assert_eq!(update.classify().unwrap().url(), "/good_stuff");
    }

    #[test]
    fn resource_ids_accept_numbers_and_strings() {
        let number: ResourceId = serde_json::from_value(json!(123)).unwrap();
        let text: ResourceId = serde_json::from_value(json!("abc-1")).unwrap();

        assert_eq!(number, ResourceId::Number(123));
        assert_eq!(text, ResourceId::Text("abc-1".to_string()));
        assert_eq!(number.to_string(), "123");
        assert_eq!(text.to_string(), "abc-1");
    }

    #[test]
    fn resource_ref_builder_sets_the_id() {
        let reference = ResourceRef::new("/good_stuff").with_id(123_i64);

        assert_eq!(reference.url, "/good_stuff");
        assert_eq!(reference.id, Some(ResourceId::Number(123)));
    }

    #[test]
    fn empty_serializes_to_an_empty_object() {
        assert_eq!(serde_json::to_value(Empty {}).unwrap(), json!({}));
    }
}
