//! Shared input types: identity claims and routing path parameters
//!
//! These are the engine's boundary with the authentication and routing
//! collaborators. The engine never fetches anything itself; the caller hands
//! over already-verified claims and already-extracted path parameters.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Unique policy identifier
pub type PolicyId = String;

/// Separator used in delimited-string-encoded claim lists
pub const CODE_LIST_SEPARATOR: char = ',';

/// Parse a delimited claim list into a typed list
///
/// An empty or blank string yields an empty list, not an error.
pub fn parse_code_list(raw: &str) -> Vec<String> {
    raw.split(CODE_LIST_SEPARATOR)
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(String::from)
        .collect()
}

/// Identity claims supplied by the authentication collaborator
///
/// The employment code lists arrive delimited-string-encoded and are parsed
/// once during entity building.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserClaims {
    /// Subject identifier
    pub sub: String,

    /// E-mail address, when the token carries one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Group names the subject belongs to
    #[serde(default)]
    pub groups: Vec<String>,

    /// Delimited store codes the subject is employed by
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employment_store_codes: Option<String>,

    /// Delimited franchise codes the subject is employed by
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employment_franchise_codes: Option<String>,
}

impl UserClaims {
    /// Create claims for a subject with no group or employment memberships
    pub fn new(sub: impl Into<String>) -> Self {
        Self {
            sub: sub.into(),
            email: None,
            groups: Vec::new(),
            employment_store_codes: None,
            employment_franchise_codes: None,
        }
    }

    /// Add a group membership
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.groups.push(group.into());
        self
    }

    /// Set the e-mail claim
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Set the delimited employment store code claim
    pub fn with_employment_store_codes(mut self, codes: impl Into<String>) -> Self {
        self.employment_store_codes = Some(codes.into());
        self
    }

    /// Set the delimited employment franchise code claim
    pub fn with_employment_franchise_codes(mut self, codes: impl Into<String>) -> Self {
        self.employment_franchise_codes = Some(codes.into());
        self
    }
}

/// Path parameters extracted by the routing collaborator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathParams {
    /// Composite store code from the `{storeId}` placeholder
    pub store_id: Option<String>,

    /// Pet identifier from the `{petId}` placeholder
    pub pet_id: Option<String>,

    /// Order number from the `{orderNumber}` placeholder
    pub order_number: Option<String>,
}

impl PathParams {
    /// Build from the router's string-keyed parameter map
    pub fn from_map(params: &HashMap<String, String>) -> Self {
        Self {
            store_id: params.get("storeId").cloned(),
            pet_id: params.get("petId").cloned(),
            order_number: params.get("orderNumber").cloned(),
        }
    }

    /// Set the store code parameter
    pub fn with_store_id(mut self, store_id: impl Into<String>) -> Self {
        self.store_id = Some(store_id.into());
        self
    }

    /// Set the pet identifier parameter
    pub fn with_pet_id(mut self, pet_id: impl Into<String>) -> Self {
        self.pet_id = Some(pet_id.into());
        self
    }

    /// Set the order number parameter
    pub fn with_order_number(mut self, order_number: impl Into<String>) -> Self {
        self.order_number = Some(order_number.into());
        self
    }
}
