//! Item metadata models.
//!
//! These are the off-chain JSON shapes uploaded to content storage during a
//! lazy mint, plus the small on-chain registration entry (name + URI).
//! Models are mostly "dumb" data; validation is an explicit step applied by
//! callers before upload.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{DropError, DropResult};

/// A single trait entry in item metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemAttribute {
    pub trait_type: String,
    pub value: String,
}

/// Off-chain metadata for one drop item, in the common NFT JSON layout.
///
/// Only `name` is required. Everything else is carried through to storage
/// untouched apart from whitespace normalization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemMetadata {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<ItemAttribute>,
}

impl ItemMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    /// Validate and normalize in one pass.
    ///
    /// Rejects empty names; trims surrounding whitespace from string fields.
    pub fn normalized(mut self) -> DropResult<Self> {
        self.name = self.name.trim().to_string();
        if self.name.is_empty() {
            return Err(DropError::invalid_argument("item metadata requires a non-empty name"));
        }
        self.description = self.description.map(|s| s.trim().to_string());
        self.image = self.image.map(|s| s.trim().to_string());
        self.animation_url = self.animation_url.map(|s| s.trim().to_string());
        self.external_url = self.external_url.map(|s| s.trim().to_string());
        Ok(self)
    }

    /// The JSON payload uploaded to content storage.
    pub fn to_json(&self) -> DropResult<Value> {
        serde_json::to_value(self).map_err(|e| DropError::serialization(e.to_string()))
    }

    pub fn from_json(value: Value) -> DropResult<Self> {
        serde_json::from_value(value).map_err(|e| DropError::serialization(e.to_string()))
    }
}

/// The on-chain registration entry for one item: its display name and the
/// content URI obtained from storage upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemEntry {
    pub name: String,
    pub uri: String,
}

impl ItemEntry {
    pub fn new(name: impl Into<String>, uri: impl Into<String>) -> Self {
        Self { name: name.into(), uri: uri.into() }
    }

    /// Enforce the registration size limits carried by the collection config.
    pub fn check_limits(&self, max_name_len: usize, max_uri_len: usize) -> DropResult<()> {
        if self.name.len() > max_name_len {
            return Err(DropError::invalid_argument(format!(
                "item name exceeds {} bytes: {}",
                max_name_len, self.name
            )));
        }
        if self.uri.len() > max_uri_len {
            return Err(DropError::invalid_argument(format!(
                "item uri exceeds {} bytes: {}",
                max_uri_len, self.uri
            )));
        }
        Ok(())
    }
}
