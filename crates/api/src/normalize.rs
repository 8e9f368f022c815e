//! JSON-API document normalization.
//!
//! A response document is flattened into an [`EntityStore`]: one map per
//! resource type, keyed by id. Normalization is best effort. Records without a
//! usable `type` or `id` are skipped, and input that is not a document at all
//! simply yields an empty store.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A flattened resource: its attributes plus `id`, `type` and one member per
/// relationship holding the related identifier(s).
pub type Entity = Map<String, Value>;

/// Type name → id → entity.
pub type EntityStore = BTreeMap<String, BTreeMap<String, Entity>>;

static NULL: Value = Value::Null;

/// Resource identifier (`{type, id}`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
}

impl EntityRef {
    pub fn new(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            id: id.into(),
        }
    }

    /// Reads an identifier from a JSON object. Numeric ids are stringified.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let kind = object.get("type")?.as_str().filter(|s| !s.is_empty())?;
        let id = match object.get("id")? {
            Value::String(id) if !id.is_empty() => id.clone(),
            Value::Number(id) => id.to_string(),
            _ => return None,
        };
        Some(Self::new(kind, id))
    }

    fn to_value(&self) -> Value {
        serde_json::json!({ "type": self.kind, "id": self.id })
    }
}

/// Primary data of a document, reduced to identifiers in response order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResultRef {
    One(EntityRef),
    Many(Vec<EntityRef>),
}

impl ResultRef {
    pub fn refs(&self) -> &[EntityRef] {
        match self {
            Self::One(one) => std::slice::from_ref(one),
            Self::Many(many) => many,
        }
    }
}

/// Shapes how a response is normalized.
///
/// `key` names where the primary result is stored in state; `many` marks
/// endpoints that return collections, so a single object is still recorded as
/// a one-element list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    pub key: String,
    #[serde(default)]
    pub many: bool,
}

impl Schema {
    pub fn entity(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            many: false,
        }
    }

    pub fn array(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            many: true,
        }
    }

    pub fn normalize(&self, document: &Value) -> Normalized {
        let mut normalized = format_jsonapi_result(document, Some(&self.key));
        if self.many
            && let Some(ResultRef::One(one)) = &normalized.result
        {
            normalized.result = Some(ResultRef::Many(vec![one.clone()]));
        }
        normalized
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Normalized {
    pub entities: EntityStore,
    pub result: Option<ResultRef>,
    pub key: Option<String>,
    pub meta: Option<Value>,
    pub links: Option<Value>,
}

impl Normalized {
    pub fn entity(&self, kind: &str, id: &str) -> Option<&Entity> {
        self.entities.get(kind)?.get(id)
    }

    pub fn is_empty(&self) -> bool {
        self.entities.values().all(BTreeMap::is_empty)
    }

    /// Renders the result as a state fragment: one member per entity type and,
    /// when a key is known, `key` holding the primary identifiers.
    pub fn into_state_patch(self) -> Value {
        let mut patch = Map::new();
        for (kind, by_id) in self.entities {
            let by_id = by_id
                .into_iter()
                .map(|(id, entity)| (id, Value::Object(entity)))
                .collect();
            patch.insert(kind, Value::Object(by_id));
        }

        if let (Some(key), Some(result)) = (self.key, self.result) {
            let value = serde_json::to_value(result).unwrap_or(Value::Null);
            patch.insert(key, value);
        }

        Value::Object(patch)
    }
}

/// Normalizes a JSON-API document or bare primary data.
///
/// `input` is either a full document (`{data, included, meta, links}`) or the
/// value of its `data` member. `key` is recorded on the result so callers can
/// store the primary identifiers under it, which is how a lone polymorphic
/// resource such as the current user stays addressable.
pub fn format_jsonapi_result(input: &Value, key: Option<&str>) -> Normalized {
    let mut normalized = Normalized {
        key: key.map(str::to_string),
        ..Default::default()
    };

    let (primary, included) = match input {
        Value::Object(document) if is_document(document) => {
            normalized.meta = document.get("meta").cloned();
            normalized.links = document.get("links").cloned();
            (
                document.get("data").unwrap_or(&NULL),
                document.get("included"),
            )
        }
        other => (other, None),
    };

    normalized.result = match primary {
        Value::Array(items) => Some(ResultRef::Many(
            items
                .iter()
                .filter_map(|item| add_resource(&mut normalized.entities, item))
                .collect(),
        )),
        Value::Object(_) => add_resource(&mut normalized.entities, primary).map(ResultRef::One),
        _ => None,
    };

    if let Some(Value::Array(included)) = included {
        for item in included {
            add_resource(&mut normalized.entities, item);
        }
    }

    tracing::trace!(
        types = normalized.entities.len(),
        key = key,
        "normalized json-api document"
    );

    normalized
}

/// A resource object carries `type` and `id`; a document carries `data`.
fn is_document(object: &Map<String, Value>) -> bool {
    (object.contains_key("data") || object.contains_key("errors"))
        && !(object.contains_key("type") && object.contains_key("id"))
}

fn add_resource(store: &mut EntityStore, resource: &Value) -> Option<EntityRef> {
    let Some(reference) = EntityRef::from_value(resource) else {
        tracing::debug!("dropping resource without type or id");
        return None;
    };

    let mut entity = Entity::new();
    if let Some(attributes) = resource
        .get("attributes")
        .or_else(|| resource.get("attrs"))
        .and_then(Value::as_object)
    {
        entity.extend(attributes.clone());
    }

    if let Some(relationships) = resource.get("relationships").and_then(Value::as_object) {
        for (name, relationship) in relationships {
            entity.insert(name.clone(), flatten_relationship(relationship));
        }
    }

    entity.insert("id".to_string(), Value::String(reference.id.clone()));
    entity.insert("type".to_string(), Value::String(reference.kind.clone()));

    store
        .entry(reference.kind.clone())
        .or_default()
        .entry(reference.id.clone())
        .or_default()
        .extend(entity);

    Some(reference)
}

fn flatten_relationship(relationship: &Value) -> Value {
    match relationship.get("data") {
        Some(Value::Array(items)) => Value::Array(
            items
                .iter()
                .filter_map(EntityRef::from_value)
                .map(|r| r.to_value())
                .collect(),
        ),
        Some(data @ Value::Object(_)) => EntityRef::from_value(data)
            .map(|r| r.to_value())
            .unwrap_or(Value::Null),
        _ => Value::Null,
    }
}
