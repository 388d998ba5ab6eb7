use serde::Serialize;
use serde_json::{Map, Value};

/// A single entry of a CMS mutation transaction.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Mutation {
    Create(Value),
    Delete { id: String },
    Patch(Patch),
}

impl Mutation {
    pub fn create(document: Value) -> Self {
        Mutation::Create(document)
    }

    pub fn delete(id: impl Into<String>) -> Self {
        Mutation::Delete { id: id.into() }
    }

    pub fn patch(patch: Patch) -> Self {
        Mutation::Patch(patch)
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Patch {
    pub id: String,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub set_if_missing: Map<String, Value>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub set: Map<String, Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unset: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insert: Option<Insert>,
}

/// Appends `items` after the array element addressed by `after`.
#[derive(Debug, Clone, Serialize)]
pub struct Insert {
    pub after: String,
    pub items: Vec<Value>,
}

impl Patch {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn set(mut self, path: &str, value: impl Into<Value>) -> Self {
        self.set.insert(path.to_string(), value.into());
        self
    }

    /// Sets `path` only when `value` is present.
    pub fn set_opt<T: Into<Value>>(self, path: &str, value: Option<T>) -> Self {
        match value {
            Some(value) => self.set(path, value),
            None => self,
        }
    }

    pub fn set_if_missing(mut self, path: &str, value: impl Into<Value>) -> Self {
        self.set_if_missing.insert(path.to_string(), value.into());
        self
    }

    pub fn unset(mut self, path: impl Into<String>) -> Self {
        self.unset.push(path.into());
        self
    }

    pub fn append(mut self, array: &str, items: Vec<Value>) -> Self {
        self.insert = Some(Insert {
            after: format!("{array}[-1]"),
            items,
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
            && self.set_if_missing.is_empty()
            && self.unset.is_empty()
            && self.insert.is_none()
    }
}

/// A `{_type: "reference", _ref: id}` object.
pub fn reference(id: &str) -> Value {
    serde_json::json!({ "_type": "reference", "_ref": id })
}

/// Array members need a `_key`; references also get one.
pub fn keyed_reference(id: &str) -> Value {
    serde_json::json!({
        "_type": "reference",
        "_ref": id,
        "_key": new_key(),
    })
}

pub fn new_key() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..12].to_string()
}
