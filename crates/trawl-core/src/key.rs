//! Selection keys and their token codec.
//!
//! A selection key addresses one row of a listing independently of
//! pagination state: locale, entity id, and optionally a revision id when
//! the listing exposes revision-level rows. Keys travel as compact tokens
//! (checkbox values, batch job payloads) and must decode back to exactly
//! the triple that was encoded.

use serde::{Deserialize, Serialize};

use crate::error::KeyError;

/// Separator between the fields of an encoded token.
pub const KEY_DELIMITER: char = '-';

/// Addresses one row of a listing: locale, id, optional revision.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectionKey {
    /// Locale the row was rendered in.
    pub locale: String,

    /// Entity identifier.
    pub id: String,

    /// Revision identifier, present only when the listing addresses rows
    /// at revision granularity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
}

impl SelectionKey {
    /// Create a key without a revision.
    pub fn new(locale: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            id: id.into(),
            revision: None,
        }
    }

    /// Create a key addressing a specific revision.
    pub fn with_revision(
        locale: impl Into<String>,
        id: impl Into<String>,
        revision: impl Into<String>,
    ) -> Self {
        Self {
            locale: locale.into(),
            id: id.into(),
            revision: Some(revision.into()),
        }
    }

    /// Encode to a `locale-id[-revision]` token.
    ///
    /// A field containing the delimiter cannot be represented
    /// unambiguously, so it is rejected rather than escaped; empty fields
    /// are rejected as well.
    pub fn encode(&self) -> Result<String, KeyError> {
        check_field("locale", &self.locale)?;
        check_field("id", &self.id)?;

        let mut token = format!("{}{}{}", self.locale, KEY_DELIMITER, self.id);
        if let Some(revision) = &self.revision {
            check_field("revision", revision)?;
            token.push(KEY_DELIMITER);
            token.push_str(revision);
        }
        Ok(token)
    }

    /// Decode a token produced by [`encode`](Self::encode).
    ///
    /// Two fields decode as `(locale, id)`, three as
    /// `(locale, id, revision)`; anything else is malformed.
    pub fn decode(token: &str) -> Result<Self, KeyError> {
        let parts: Vec<&str> = token.split(KEY_DELIMITER).collect();
        if parts.iter().any(|part| part.is_empty()) {
            return Err(KeyError::Malformed(token.to_string()));
        }

        match parts.as_slice() {
            [locale, id] => Ok(Self::new(*locale, *id)),
            [locale, id, revision] => Ok(Self::with_revision(*locale, *id, *revision)),
            _ => Err(KeyError::Malformed(token.to_string())),
        }
    }
}

fn check_field(field: &'static str, value: &str) -> Result<(), KeyError> {
    if value.is_empty() {
        return Err(KeyError::EmptyField { field });
    }
    if value.contains(KEY_DELIMITER) {
        return Err(KeyError::ReservedDelimiter { field });
    }
    Ok(())
}
