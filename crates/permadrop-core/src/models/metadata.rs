//! Custom metadata attachment model
//!
//! Every upload produces two ledger transactions: a data transaction carrying
//! the raw bytes and a metadata transaction carrying descriptive state.
//! Custom metadata can be attached at three independent surfaces:
//!
//! - `metadata_json`: fields merged into the metadata transaction's JSON payload
//! - `metadata_tags`: indexable tags on the metadata transaction
//! - `data_tags`: indexable tags on the data transaction
//!
//! No invariant couples the three maps; each is independently optional and
//! independently consumed by the orchestrator.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;

/// One-or-many string values for a single tag name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum TagValues {
    One(String),
    Many(Vec<String>),
}

impl TagValues {
    /// View the tag values as a slice regardless of arity
    pub fn as_slice(&self) -> &[String] {
        match self {
            TagValues::One(v) => std::slice::from_ref(v),
            TagValues::Many(vs) => vs.as_slice(),
        }
    }
}

impl From<String> for TagValues {
    fn from(value: String) -> Self {
        TagValues::One(value)
    }
}

impl From<&str> for TagValues {
    fn from(value: &str) -> Self {
        TagValues::One(value.to_string())
    }
}

impl From<Vec<String>> for TagValues {
    fn from(values: Vec<String>) -> Self {
        TagValues::Many(values)
    }
}

/// Custom metadata destined for the three attachment surfaces
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CustomMetadata {
    /// Fields merged into the metadata transaction's JSON payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_json: Option<BTreeMap<String, JsonValue>>,
    /// Indexable tags attached to the metadata transaction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_tags: Option<BTreeMap<String, TagValues>>,
    /// Indexable tags attached to the data transaction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_tags: Option<BTreeMap<String, TagValues>>,
}

impl CustomMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Metadata carrying an advisory owner identifier, attached both as a
    /// JSON field and as a metadata-transaction tag. The owner value never
    /// affects custody: the configured uploader wallet owns every upload.
    pub fn for_owner(owner: &str) -> Self {
        Self::new()
            .with_json_field("Owner", JsonValue::String(owner.to_string()))
            .with_metadata_tag("Owner", vec![owner.to_string()])
    }

    pub fn with_json_field(mut self, name: impl Into<String>, value: JsonValue) -> Self {
        self.metadata_json
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), value);
        self
    }

    pub fn with_metadata_tag(
        mut self,
        name: impl Into<String>,
        values: impl Into<TagValues>,
    ) -> Self {
        self.metadata_tags
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), values.into());
        self
    }

    pub fn with_data_tag(mut self, name: impl Into<String>, values: impl Into<TagValues>) -> Self {
        self.data_tags
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), values.into());
        self
    }

    /// True when no surface carries any entries
    pub fn is_empty(&self) -> bool {
        self.metadata_json.as_ref().map_or(true, |m| m.is_empty())
            && self.metadata_tags.as_ref().map_or(true, |m| m.is_empty())
            && self.data_tags.as_ref().map_or(true, |m| m.is_empty())
    }
}
