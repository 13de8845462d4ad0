//! Input records for one family tree.
//!
//! These mirror what the persistence layer hands over: people with a few
//! attributes the core actually reads (id, name, gender, dates, liveness) and
//! an opaque payload it never inspects, plus pairwise relationship records
//! whose `type` tag is validated only when the graph is built.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::KinshipError;

/// Gender tag carried on a person.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

/// A person in the tree. Identity is the caller-supplied `id`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    /// Stable, unique, opaque identifier (typically a UUID string).
    pub id: String,
    /// Display name.
    pub name: String,
    pub gender: Gender,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub death_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_living: Option<bool>,
    /// Everything else (photos, places, notes). Carried through untouched.
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl Person {
    /// Minimal constructor; dates and payload start empty.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, gender: Gender) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            gender,
            birth_date: None,
            death_date: None,
            is_living: None,
            payload: Map::new(),
        }
    }

    #[must_use]
    pub fn born(mut self, date: impl Into<String>) -> Self {
        self.birth_date = Some(date.into());
        self
    }
}

/// The fixed set of relationship types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipKind {
    /// Directed: `person1` is a parent of `person2`.
    Parent,
    /// Undirected; may carry marriage/divorce markers.
    Spouse,
    /// Undirected; explicit record of siblinghood.
    Sibling,
}

impl RelationshipKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Parent => "parent",
            Self::Spouse => "spouse",
            Self::Sibling => "sibling",
        }
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RelationshipKind {
    type Err = KinshipError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "parent" => Ok(Self::Parent),
            "spouse" => Ok(Self::Spouse),
            "sibling" => Ok(Self::Sibling),
            other => Err(KinshipError::InvalidRelationshipType {
                value: other.to_owned(),
                person1: String::new(),
                person2: String::new(),
            }),
        }
    }
}

/// A pairwise relationship record as stored by the persistence layer.
///
/// The type tag stays a raw string so that an out-of-set value surfaces as
/// [`KinshipError::InvalidRelationshipType`] at build time rather than as a
/// deserialization failure somewhere upstream.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub person1_id: String,
    pub person2_id: String,
    #[serde(rename = "type")]
    pub relationship_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marriage_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub divorce_date: Option<String>,
}

impl Relationship {
    #[must_use]
    pub fn new(person1: impl Into<String>, person2: impl Into<String>, kind: RelationshipKind) -> Self {
        Self {
            person1_id: person1.into(),
            person2_id: person2.into(),
            relationship_type: kind.as_str().to_owned(),
            marriage_date: None,
            divorce_date: None,
        }
    }

    /// `parent` is a parent of `child`.
    #[must_use]
    pub fn parent(parent: impl Into<String>, child: impl Into<String>) -> Self {
        Self::new(parent, child, RelationshipKind::Parent)
    }

    #[must_use]
    pub fn spouse(a: impl Into<String>, b: impl Into<String>) -> Self {
        Self::new(a, b, RelationshipKind::Spouse)
    }

    #[must_use]
    pub fn sibling(a: impl Into<String>, b: impl Into<String>) -> Self {
        Self::new(a, b, RelationshipKind::Sibling)
    }

    #[must_use]
    pub fn married(mut self, date: impl Into<String>) -> Self {
        self.marriage_date = Some(date.into());
        self
    }

    #[must_use]
    pub fn divorced(mut self, date: impl Into<String>) -> Self {
        self.divorce_date = Some(date.into());
        self
    }

    /// Validate the type tag.
    ///
    /// # Errors
    ///
    /// Returns [`KinshipError::InvalidRelationshipType`] naming both endpoints
    /// when the tag is outside the fixed set.
    pub fn kind(&self) -> Result<RelationshipKind, KinshipError> {
        self.relationship_type.parse().map_err(|_| KinshipError::InvalidRelationshipType {
            value: self.relationship_type.clone(),
            person1: self.person1_id.clone(),
            person2: self.person2_id.clone(),
        })
    }
}

/// One tree's worth of records, as exchanged with the persistence layer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyTree {
    #[serde(default)]
    pub persons: Vec<Person>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

#[cfg(test)]
#[path = "model_test.rs"]
mod tests;
