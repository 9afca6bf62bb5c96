//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Declares a UUID-backed identifier newtype.
///
/// Every generated type gets `new`, `from_uuid`, `as_uuid`, `parse_field`,
/// plus `Default`, `Display` and `FromStr`.
macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates an identifier from an existing UUID.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Parses a client-supplied identifier, naming `field` on failure.
            pub fn parse_field(field: impl Into<String>, raw: &str) -> Result<Self, ValidationError> {
                raw.trim()
                    .parse()
                    .map_err(|_| ValidationError::invalid_format(field, format!("'{}' is not a valid identifier", raw)))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

uuid_id!(
    /// Unique identifier for a workspace (tenant).
    WorkspaceId
);

uuid_id!(
    /// Unique identifier for a workspace membership row.
    MemberId
);

uuid_id!(
    /// Unique identifier for a campaign.
    CampaignId
);

uuid_id!(
    /// Unique identifier for one field definition of a campaign form.
    CampaignFormId
);

uuid_id!(
    /// Unique identifier for one selectable option of a choice field.
    CampaignFormAttributeId
);

uuid_id!(
    /// Unique identifier for a form type in the seeded catalog.
    FormTypeId
);

uuid_id!(
    /// Unique identifier for a submission.
    FormEntryId
);

uuid_id!(
    /// Unique identifier for one answered field of a submission.
    FormDetailEntryId
);

uuid_id!(
    /// Opaque reference to a store product.
    ProductId
);

/// User identifier issued by the credential service.
///
/// Opaque string; the crate never interprets its contents beyond non-emptiness.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Creates a new UserId, rejecting empty strings.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::empty_field("user_id"));
        }
        Ok(Self(id))
    }

    /// Returns the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
