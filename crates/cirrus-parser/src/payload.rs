//! The structured architecture payload an AI response may embed.
//!
//! Every field is optional: payloads are produced by a language model and are
//! only loosely shaped. Consumers presence-check each field and fall back to
//! defaults. Decoding is lenient: `null` lists read as empty, numeric ids read
//! as text, and an entry or field of the wrong shape is dropped on its own
//! instead of failing the whole payload.
//!
//! ```
//! # use cirrus_parser::payload::RawPayload;
//! let payload: RawPayload = serde_json::from_str(r#"{
//!     "services": [{"id": "fn", "title": "Azure Functions", "groupIds": ["rg"]}, "Cosmos DB"],
//!     "groups": [{"id": "rg", "type": "resourceGroup"}],
//!     "connections": [{"source": "fn", "target": "Cosmos DB"}]
//! }"#).unwrap();
//!
//! assert_eq!(payload.services().len(), 2);
//! assert_eq!(payload.connections()[0].from(), Some("fn"));
//! ```

use log::{debug, warn};
use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use serde_json::{Map, Value};

use cirrus_core::service::LayoutHint;

/// Top-level fields that identify a JSON object as an architecture payload.
pub const RECOGNISED_FIELDS: [&str; 3] = ["services", "groups", "connections"];

/// Returns true if `value` is an object with at least one recognised field.
pub fn is_architecture_object(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|object| RECOGNISED_FIELDS.iter().any(|field| object.contains_key(*field)))
}

/// The decoded payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPayload {
    #[serde(default, deserialize_with = "lenient_list")]
    services: Vec<RawService>,
    #[serde(default, deserialize_with = "lenient_list")]
    groups: Vec<RawGroup>,
    #[serde(default, deserialize_with = "lenient_list")]
    connections: Vec<RawConnection>,
    #[serde(default, deserialize_with = "lenient_text")]
    layout: Option<String>,
}

impl RawPayload {
    pub fn services(&self) -> &[RawService] {
        &self.services
    }

    pub fn groups(&self) -> &[RawGroup] {
        &self.groups
    }

    pub fn connections(&self) -> &[RawConnection] {
        &self.connections
    }

    /// The requested layout mode, unparsed.
    pub fn layout(&self) -> Option<&str> {
        self.layout.as_deref()
    }
}

/// A service entry: either a bare name or an object.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawService {
    Name(String),
    Entry(Box<RawServiceEntry>),
}

impl RawService {
    /// The explicit id, if the entry carries one.
    pub fn id(&self) -> Option<&str> {
        match self {
            RawService::Name(_) => None,
            RawService::Entry(entry) => non_blank(entry.id.as_deref()),
        }
    }

    /// The text to resolve: `title`, then `name`, then `type`, then `id`.
    pub fn query(&self) -> Option<&str> {
        match self {
            RawService::Name(name) => non_blank(Some(name.as_str())),
            RawService::Entry(entry) => non_blank(entry.title.as_deref())
                .or_else(|| non_blank(entry.name.as_deref()))
                .or_else(|| non_blank(entry.service_type.as_deref()))
                .or_else(|| non_blank(entry.id.as_deref())),
        }
    }

    /// The display title the payload asked for, if any.
    pub fn title(&self) -> Option<&str> {
        match self {
            RawService::Name(_) => None,
            RawService::Entry(entry) => {
                non_blank(entry.title.as_deref()).or_else(|| non_blank(entry.name.as_deref()))
            }
        }
    }

    pub fn entry(&self) -> Option<&RawServiceEntry> {
        match self {
            RawService::Name(_) => None,
            RawService::Entry(entry) => Some(entry.as_ref()),
        }
    }

    /// Group ids this service declares membership of.
    pub fn group_ids(&self) -> &[String] {
        match self {
            RawService::Name(_) => &[],
            RawService::Entry(entry) => &entry.group_ids,
        }
    }

    /// The explicit layout hint built from `position` and `data`.
    pub fn layout_hint(&self) -> Option<LayoutHint> {
        let entry = self.entry()?;
        layout_hint(entry.position.as_ref(), entry.data.as_ref())
    }
}

/// The object form of a service entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawServiceEntry {
    #[serde(default, deserialize_with = "lenient_text")]
    id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    name: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "lenient_text")]
    service_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    category: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    description: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    provider: Option<String>,
    #[serde(default, alias = "iconRef", deserialize_with = "lenient_text")]
    icon: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    position: Option<RawPosition>,
    #[serde(default, deserialize_with = "lenient")]
    data: Option<RawDimensions>,
    #[serde(default, alias = "groups", deserialize_with = "lenient_text_list")]
    group_ids: Vec<String>,
}

impl RawServiceEntry {
    pub fn category(&self) -> Option<&str> {
        non_blank(self.category.as_deref())
    }

    pub fn description(&self) -> Option<&str> {
        non_blank(self.description.as_deref())
    }

    pub fn provider(&self) -> Option<&str> {
        non_blank(self.provider.as_deref())
    }

    pub fn icon(&self) -> Option<&str> {
        non_blank(self.icon.as_deref())
    }
}

/// A group entry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGroup {
    #[serde(default, deserialize_with = "lenient_text")]
    id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    label: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    name: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "lenient_text")]
    group_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_text_list")]
    members: Vec<String>,
    #[serde(default, alias = "parent", deserialize_with = "lenient_text")]
    parent_id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    metadata: Option<Map<String, Value>>,
    #[serde(default, deserialize_with = "lenient")]
    position: Option<RawPosition>,
    #[serde(default, deserialize_with = "lenient")]
    data: Option<RawDimensions>,
}

impl RawGroup {
    pub fn id(&self) -> Option<&str> {
        non_blank(self.id.as_deref())
    }

    /// The display label: `label`, then `name`.
    pub fn label(&self) -> Option<&str> {
        non_blank(self.label.as_deref()).or_else(|| non_blank(self.name.as_deref()))
    }

    pub fn group_type(&self) -> Option<&str> {
        non_blank(self.group_type.as_deref())
    }

    pub fn members(&self) -> &[String] {
        &self.members
    }

    pub fn parent_id(&self) -> Option<&str> {
        non_blank(self.parent_id.as_deref())
    }

    pub fn metadata(&self) -> Option<&Map<String, Value>> {
        self.metadata.as_ref()
    }

    pub fn layout_hint(&self) -> Option<LayoutHint> {
        layout_hint(self.position.as_ref(), self.data.as_ref())
    }
}

/// A connection entry; accepts `from`/`to` or `source`/`target`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConnection {
    #[serde(default, alias = "source", deserialize_with = "lenient_text")]
    from: Option<String>,
    #[serde(default, alias = "target", deserialize_with = "lenient_text")]
    to: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    label: Option<String>,
}

impl RawConnection {
    pub fn from(&self) -> Option<&str> {
        non_blank(self.from.as_deref())
    }

    pub fn to(&self) -> Option<&str> {
        non_blank(self.to.as_deref())
    }

    pub fn label(&self) -> Option<&str> {
        non_blank(self.label.as_deref())
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RawPosition {
    x: f32,
    y: f32,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct RawDimensions {
    #[serde(default, deserialize_with = "lenient")]
    width: Option<f32>,
    #[serde(default, deserialize_with = "lenient")]
    height: Option<f32>,
}

fn layout_hint(position: Option<&RawPosition>, data: Option<&RawDimensions>) -> Option<LayoutHint> {
    let position = position?;
    let data = data.copied().unwrap_or_default();
    let positive = |value: Option<f32>| value.filter(|value| value.is_finite() && *value > 0.0);

    (position.x.is_finite() && position.y.is_finite()).then(|| {
        LayoutHint::new(position.x, position.y)
            .with_dimensions(positive(data.width), positive(data.height))
    })
}

/// Decodes any value as `T`, reading a value of the wrong shape as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| match T::deserialize(value) {
        Ok(decoded) => Some(decoded),
        Err(err) => {
            debug!(err:% = err; "Ignoring payload field of the wrong shape");
            None
        }
    }))
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(text_of))
}

/// A list of ids: `null` is empty, a lone id is a list of one.
fn lenient_text_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let ids = match Option::<Value>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(Value::Array(items)) => items.into_iter().filter_map(text_of).collect(),
        Some(other) => text_of(other).into_iter().collect(),
    };
    Ok(ids)
}

/// A list of entries where each entry that does not decode is skipped.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = match Option::<Value>::deserialize(deserializer)? {
        None => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(other) => {
            warn!(value:% = other; "Payload list is not an array, ignoring it");
            return Ok(Vec::new());
        }
    };

    Ok(items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match T::deserialize(item) {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!(index, err:% = err; "Skipping malformed payload entry");
                None
            }
        })
        .collect())
}

/// Strings are kept as is and numbers are read as their decimal text.
fn text_of(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognised_object() {
        assert!(is_architecture_object(&serde_json::json!({"groups": []})));
        assert!(!is_architecture_object(&serde_json::json!({"name": "x"})));
        assert!(!is_architecture_object(&serde_json::json!(["services"])));
    }

    #[test]
    fn test_service_query_order() {
        let payload: RawPayload = serde_json::from_str(
            r#"{"services": [
                {"id": "a", "type": "Amazon S3"},
                {"id": "b"},
                {"name": "Payments API", "title": "  "}
            ]}"#,
        )
        .unwrap();
        let queries: Vec<_> = payload.services().iter().map(RawService::query).collect();

        assert_eq!(queries, [Some("Amazon S3"), Some("b"), Some("Payments API")]);
    }

    #[test]
    fn test_layout_hint_from_position_and_data() {
        let payload: RawPayload = serde_json::from_str(
            r#"{"services": [{"title": "x", "position": {"x": 10, "y": 20}, "data": {"width": 200}}]}"#,
        )
        .unwrap();
        let hint = payload.services()[0].layout_hint().unwrap();

        assert_eq!(hint.width(), Some(200.0));
        assert_eq!(hint.height(), None);
    }

    #[test]
    fn test_group_fields() {
        let payload: RawPayload = serde_json::from_str(
            r#"{"groups": [{"id": "rg", "name": "Core", "type": "rg", "parent": "sub",
                "metadata": {"owner": "platform"}}], "layout": "vertical"}"#,
        )
        .unwrap();
        let group = &payload.groups()[0];

        assert_eq!(group.label(), Some("Core"));
        assert_eq!(group.parent_id(), Some("sub"));
        assert_eq!(group.metadata().unwrap()["owner"], "platform");
        assert_eq!(payload.layout(), Some("vertical"));
    }

    #[test]
    fn test_wrong_list_type_reads_as_empty() {
        let payload: RawPayload =
            serde_json::from_str(r#"{"services": 5, "groups": null, "layout": 3}"#).unwrap();

        assert!(payload.services().is_empty());
        assert!(payload.groups().is_empty());
        assert_eq!(payload.layout(), Some("3"));
    }

    #[test]
    fn test_null_lists_read_as_empty() {
        let payload: RawPayload = serde_json::from_str(
            r#"{"services": [{"id": "db", "title": "Cosmos DB", "groupIds": null}],
                "groups": [{"id": "rg", "members": null, "parentId": null, "metadata": null}],
                "connections": [{"from": "fn", "to": "db", "label": null}]}"#,
        )
        .unwrap();

        assert!(payload.services()[0].group_ids().is_empty());
        assert!(payload.groups()[0].members().is_empty());
        assert_eq!(payload.groups()[0].parent_id(), None);
        assert_eq!(payload.connections()[0].label(), None);
    }

    #[test]
    fn test_numeric_ids_read_as_text() {
        let payload: RawPayload = serde_json::from_str(
            r#"{"services": [{"id": 1, "title": "Azure Functions", "groupIds": [7, "rg"]}],
                "groups": [{"id": 7, "members": [1]}],
                "connections": [{"source": 1, "target": 2}]}"#,
        )
        .unwrap();

        assert_eq!(payload.services()[0].id(), Some("1"));
        assert_eq!(payload.services()[0].group_ids(), ["7", "rg"]);
        assert_eq!(payload.groups()[0].id(), Some("7"));
        assert_eq!(payload.groups()[0].members(), ["1"]);
        assert_eq!(payload.connections()[0].from(), Some("1"));
        assert_eq!(payload.connections()[0].to(), Some("2"));
    }

    #[test]
    fn test_malformed_entry_skipped_among_good_ones() {
        let payload: RawPayload = serde_json::from_str(
            r#"{"services": ["Amazon S3", 42, {"title": "AWS Lambda", "position": "top"}],
                "groups": [{"id": "rg"}, "not-a-group"],
                "connections": [[1, 2], {"from": "a", "to": "b"}]}"#,
        )
        .unwrap();

        assert_eq!(payload.services().len(), 2);
        assert_eq!(payload.services()[1].query(), Some("AWS Lambda"));
        assert!(payload.services()[1].layout_hint().is_none());
        assert_eq!(payload.groups().len(), 1);
        assert_eq!(payload.connections().len(), 1);
        assert_eq!(payload.connections()[0].from(), Some("a"));
    }

    #[test]
    fn test_single_group_id_reads_as_list() {
        let payload: RawPayload =
            serde_json::from_str(r#"{"services": [{"title": "x", "groupIds": "rg"}]}"#).unwrap();

        assert_eq!(payload.services()[0].group_ids(), ["rg"]);
    }
}
