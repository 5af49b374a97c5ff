//! String-backed identifiers from the generator's catalogue.
//!
//! The generator names cards and expansions with concatenated-word strings
//! ("YoungWitch", "Base2"). Those raw strings are the identities everything
//! in this crate keys on; display formatting lives in [`crate::text`] and
//! never feeds back into these types.

use std::fmt;

/// Card identifier exactly as the catalogue spells it (e.g. "YoungWitch").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct CardId(pub String);

/// Expansion identifier exactly as the catalogue spells it (e.g. "Base2").
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct ExpansionId(pub String);

impl CardId {
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl ExpansionId {
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for ExpansionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for ExpansionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}
