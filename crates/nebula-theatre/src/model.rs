//! Theatre representations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Client-supplied theatre fields, used by both create and full replace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TheatreDraft {
    /// Display name.
    pub name: String,
    /// Street address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// City.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// State or region.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Postal code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    /// Country.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Contact phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Contact email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Total seats across all screens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
}

impl TheatreDraft {
    /// Draft with only a name set.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: None,
            city: None,
            state: None,
            postal_code: None,
            country: None,
            phone: None,
            email: None,
            capacity: None,
        }
    }
}

/// A stored theatre.
///
/// The ETag covers every member except `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Theatre {
    /// Stable identifier assigned at creation.
    pub id: Uuid,
    /// Business fields.
    #[serde(flatten)]
    pub fields: TheatreDraft,
    /// Creation time; never changes afterwards.
    #[serde(with = "nebula_canonical::timestamp")]
    pub created_at: DateTime<Utc>,
    /// Time of the last replace that changed a business field.
    #[serde(with = "nebula_canonical::timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Theatre {
    /// Builds a new theatre from a draft.
    pub fn create(id: Uuid, fields: TheatreDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            fields,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns the full replacement of `self` by `fields`.
    ///
    /// `id` and `created_at` carry over. `updated_at` moves to `now` only
    /// when some business field actually differs, so replacing a theatre
    /// with identical content leaves its ETag unchanged.
    pub fn replaced_by(&self, fields: TheatreDraft, now: DateTime<Utc>) -> Self {
        let updated_at = if fields == self.fields {
            self.updated_at
        } else {
            now
        };
        Self {
            id: self.id,
            fields,
            created_at: self.created_at,
            updated_at,
        }
    }
}
