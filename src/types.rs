//! NewType wrappers for strong typing across the API.
//!
//! Record keys are the part of a SurrealDB id after the table prefix, which is
//! what clients see and send back in URL paths. Wrapping them per table keeps
//! a job key from being used to look up a project.

use serde::{Deserialize, Serialize};
use std::fmt;
use surrealdb::RecordId;

/// Macro to generate a record key wrapper bound to one table.
macro_rules! record_key {
    (
        $(#[$meta:meta])*
        $name:ident => $table:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Table this key belongs to.
            pub const TABLE: &'static str = $table;

            /// Create a new instance.
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Get the inner value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Full SurrealDB record id for this key.
            pub fn record_id(&self) -> RecordId {
                RecordId::from_table_key(Self::TABLE, self.0.as_str())
            }

            /// Extract the key from a SurrealDB record id.
            pub fn from_record(id: &RecordId) -> Self {
                Self(record_key_of(id))
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

record_key!(
    /// Key of an admin credential record (table `admin`).
    ///
    /// This is also the `id` claim embedded in issued tokens.
    AdminId => "admin"
);

record_key!(
    /// Key of a job opening (table `career`).
    JobId => "career"
);

record_key!(
    /// Key of a job application (table `applicant`).
    ApplicantId => "applicant"
);

record_key!(
    /// Key of a portfolio project (table `project`).
    ProjectId => "project"
);

record_key!(
    /// Key of a tender notice (table `tender`).
    TenderId => "tender"
);

/// Strip the table prefix and identifier escaping from a record id.
///
/// SurrealDB renders ids as `table:key`, wrapping keys that are not plain
/// identifiers in `⟨…⟩` or backticks.
pub fn record_key_of(id: &RecordId) -> String {
    let rendered = id.to_string();
    let key = rendered
        .split_once(':')
        .map(|(_, key)| key)
        .unwrap_or(rendered.as_str());
    key.trim_start_matches(['⟨', '`'])
        .trim_end_matches(['⟩', '`'])
        .to_string()
}

/// Email address normalised for case-insensitive comparison.
///
/// Input is trimmed and lowercased on construction, so two addresses that
/// differ only in case or surrounding whitespace compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Normalise a raw address. Returns `None` for blank input.
    pub fn parse(raw: &str) -> Option<Self> {
        let normalised = raw.trim().to_lowercase();
        if normalised.is_empty() {
            None
        } else {
            Some(Self(normalised))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_key_roundtrip() {
        let id = JobId::new("abc123");
        let record = id.record_id();
        assert_eq!(JobId::from_record(&record), id);
        assert_eq!(record.table(), "career");
    }

    #[test]
    fn test_record_key_strips_escaping() {
        let record = RecordId::from_table_key("project", "with-dash");
        assert_eq!(record_key_of(&record), "with-dash");
    }

    #[test]
    fn test_email_normalisation() {
        let a = EmailAddress::parse("  Admin@Zeba.COM ").unwrap();
        let b = EmailAddress::parse("admin@zeba.com").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "admin@zeba.com");
        assert!(EmailAddress::parse("   ").is_none());
    }
}
