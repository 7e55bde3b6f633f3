use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::{MovieId, OptionId};

/// One selectable value of a facet. Identity is `id`; `name` is display-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacetOption {
    pub id: OptionId,
    pub name: String,
}

impl FacetOption {
    pub fn new(id: OptionId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl PartialEq for FacetOption {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for FacetOption {}

/// Movie record as served by the catalog. Only `id` and `title` are read;
/// every other field is carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    #[serde(default)]
    pub title: String,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl Movie {
    pub fn new(id: MovieId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            details: Map::new(),
        }
    }
}

/// Page envelope shared by every list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub results: Vec<T>,
    #[serde(default)]
    pub next: Option<String>,
}

impl<T> Paginated<T> {
    pub fn has_more(&self) -> bool {
        self.next.is_some()
    }
}
