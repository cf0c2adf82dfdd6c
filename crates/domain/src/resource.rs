//! Resource vocabulary of the target API.
//!
//! The five entity kinds the suite creates and lists all share the
//! same wire shape: POST to the collection path to create, GET the
//! collection path to list. Create responses identify the new entity
//! under `id` or, on some deployments, `<singular>_id`; extraction
//! tolerates both.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An entity identifier captured from a create response.
///
/// The target API returns numeric ids on some endpoints and string ids
/// on others; both are normalized to their string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Extracts an id from a JSON value (string or number).
    #[must_use]
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(s) if !s.is_empty() => Some(Self(s.clone())),
            serde_json::Value::Number(n) => Some(Self(n.to_string())),
            _ => None,
        }
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The entity kinds exposed by the target API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    /// Bank and cash accounts.
    Accounts,
    /// Income/expense categories.
    Categories,
    /// Individual transactions.
    Transactions,
    /// Per-category budgets.
    Budgets,
    /// Shared expense groups.
    Groups,
}

impl Resource {
    /// Returns all resource kinds.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Accounts,
            Self::Categories,
            Self::Transactions,
            Self::Budgets,
            Self::Groups,
        ]
    }

    /// Returns the collection path segment (e.g., "accounts").
    #[must_use]
    pub const fn collection(self) -> &'static str {
        match self {
            Self::Accounts => "accounts",
            Self::Categories => "categories",
            Self::Transactions => "transactions",
            Self::Budgets => "budgets",
            Self::Groups => "groups",
        }
    }

    /// Returns the singular entity name (e.g., "account").
    #[must_use]
    pub const fn singular(self) -> &'static str {
        match self {
            Self::Accounts => "account",
            Self::Categories => "category",
            Self::Transactions => "transaction",
            Self::Budgets => "budget",
            Self::Groups => "group",
        }
    }

    /// Returns the resource-specific id field name (e.g., "account_id").
    #[must_use]
    pub const fn id_field(self) -> &'static str {
        match self {
            Self::Accounts => "account_id",
            Self::Categories => "category_id",
            Self::Transactions => "transaction_id",
            Self::Budgets => "budget_id",
            Self::Groups => "group_id",
        }
    }

    /// Extracts the entity id from a create-response JSON object,
    /// looking under `id` first and falling back to the
    /// resource-specific field.
    #[must_use]
    pub fn extract_id(self, body: &serde_json::Value) -> Option<EntityId> {
        body.get("id")
            .and_then(EntityId::from_value)
            .or_else(|| body.get(self.id_field()).and_then(EntityId::from_value))
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.collection())
    }
}
