use std::collections::BTreeMap;

use serde_json::Value;
use trellis_api::{Entity, EntityStore, Normalized, ResultRef};

/// Progress of the most recent call for one action name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestStatus {
    #[default]
    Idle,
    Pending,
    Loaded,
    Failed(String),
}

impl RequestStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct State {
    pub entities: EntityStore,
    pub current_user: Option<Value>,
    /// Primary identifiers of the latest response, keyed by schema key.
    pub results: BTreeMap<String, ResultRef>,
    pub requests: BTreeMap<String, RequestStatus>,
    /// Free-form UI flags such as `showLogin`.
    pub flags: BTreeMap<String, Value>,
}

impl State {
    /// Initial state built from a normalized bootstrap payload and the
    /// current user record, either of which may be missing.
    pub fn from_preload(payload: Option<Normalized>, current_user: Option<Value>) -> Self {
        let mut state = Self {
            current_user,
            ..Default::default()
        };
        if let Some(payload) = payload {
            state.merge(payload);
        }
        state
    }

    /// Merges entities into the store and records the primary result under its key.
    pub fn merge(&mut self, normalized: Normalized) {
        merge_entities(&mut self.entities, normalized.entities);
        if let (Some(key), Some(result)) = (normalized.key, normalized.result) {
            self.results.insert(key, result);
        }
    }

    pub fn entity(&self, kind: &str, id: &str) -> Option<&Entity> {
        self.entities.get(kind)?.get(id)
    }

    /// All entities of one type, ordered by id.
    pub fn entities_of(&self, kind: &str) -> Vec<&Entity> {
        self.entities
            .get(kind)
            .map(|by_id| by_id.values().collect())
            .unwrap_or_default()
    }

    /// Entities referenced by the result stored under `key`, in response order.
    /// References that are not in the store are skipped.
    pub fn result_entities(&self, key: &str) -> Vec<&Entity> {
        self.results
            .get(key)
            .map(|result| {
                result
                    .refs()
                    .iter()
                    .filter_map(|r| self.entity(&r.kind, &r.id))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn request_status(&self, name: &str) -> RequestStatus {
        self.requests.get(name).cloned().unwrap_or_default()
    }

    pub fn flag(&self, name: &str) -> bool {
        self.flags
            .get(name)
            .is_some_and(|value| value.as_bool().unwrap_or(!value.is_null()))
    }

    /// Current user id as a string, whether the record stores it as a string or a number.
    pub fn current_user_id(&self) -> Option<String> {
        match self.current_user.as_ref()?.get("id")? {
            Value::String(id) => Some(id.clone()),
            Value::Number(id) => Some(id.to_string()),
            _ => None,
        }
    }
}

fn merge_entities(into: &mut EntityStore, from: EntityStore) {
    for (kind, by_id) in from {
        let target = into.entry(kind).or_default();
        for (id, entity) in by_id {
            target.entry(id).or_default().extend(entity);
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use trellis_api::format_jsonapi_result;

    use super::*;

    #[test]
    fn preload_seeds_entities_and_user() {
        let payload = format_jsonapi_result(
            &json!([{ "type": "story", "id": "1", "attributes": { "title": "Ask HN" } }]),
            Some("frontpage"),
        );
        let state = State::from_preload(Some(payload), Some(json!({ "id": 7, "name": "pg" })));

        assert_eq!(state.entity("story", "1").unwrap()["title"], "Ask HN");
        assert_eq!(state.result_entities("frontpage").len(), 1);
        assert_eq!(state.current_user_id().as_deref(), Some("7"));
    }

    #[test]
    fn merge_keeps_existing_fields() {
        let mut state = State::default();
        state.merge(format_jsonapi_result(
            &json!({ "type": "user", "id": "1", "attributes": { "name": "ada" } }),
            None,
        ));
        state.merge(format_jsonapi_result(
            &json!({ "type": "user", "id": "1", "attributes": { "karma": 10 } }),
            None,
        ));

        let user = state.entity("user", "1").unwrap();
        assert_eq!(user["name"], "ada");
        assert_eq!(user["karma"], 10);
    }

    #[test]
    fn missing_results_are_empty() {
        let state = State::default();
        assert!(state.result_entities("nothing").is_empty());
        assert!(state.entities_of("user").is_empty());
        assert_eq!(state.request_status("COMMENTS"), RequestStatus::Idle);
        assert!(!state.flag("showLogin"));
    }
}
