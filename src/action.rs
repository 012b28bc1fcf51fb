//! Action resolution: mapping routes to a closed action vocabulary
//!
//! The routing collaborator hands over the HTTP method and the templated path
//! (not the raw path). A static lookup maps the pair to one of the named
//! actions; anything unknown resolves to the [`Action::Unknown`] sentinel,
//! which matches no policy and therefore always denies.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Named operations of the pet store API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    SearchPets,
    AddPet,
    UpdatePet,
    DeletePet,
    PlaceOrder,
    GetOrder,
    CancelOrder,
    ListOrders,
    GetStoreInventory,
    ListStores,
    /// Sentinel for unmapped routes; matches no policy
    Unknown,
}

/// Resource shape family an action belongs to
///
/// Drives the entity builder's resource dispatch: the compiler checks the
/// mapping stays exhaustive when actions are added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionFamily {
    /// Acts on a single pet
    Pet,
    /// Acts on a single order
    Order,
    /// Acts on the store itself
    Store,
    /// Everything else; resource is the application singleton
    Application,
}

impl Action {
    /// Resolve an `(http_method, path_template)` pair to an action
    pub fn resolve(method: &str, path_template: &str) -> Self {
        let key = format!("{} {}", method.to_ascii_uppercase(), path_template);
        match key.as_str() {
            "GET /store/{storeId}/pets" => Self::SearchPets,
            "POST /store/{storeId}/pet" => Self::AddPet,
            "PUT /store/{storeId}/pet/{petId}" => Self::UpdatePet,
            "DELETE /store/{storeId}/pet/{petId}" => Self::DeletePet,
            "POST /store/{storeId}/order" => Self::PlaceOrder,
            "GET /store/{storeId}/order/{orderNumber}" => Self::GetOrder,
            "DELETE /store/{storeId}/order/{orderNumber}" => Self::CancelOrder,
            "GET /store/{storeId}/orders" => Self::ListOrders,
            "GET /store/{storeId}/inventory" => Self::GetStoreInventory,
            "GET /stores" => Self::ListStores,
            _ => Self::Unknown,
        }
    }

    /// Stable action name used in policies and audit output
    pub fn name(&self) -> &'static str {
        match self {
            Self::SearchPets => "SearchPets",
            Self::AddPet => "AddPet",
            Self::UpdatePet => "UpdatePet",
            Self::DeletePet => "DeletePet",
            Self::PlaceOrder => "PlaceOrder",
            Self::GetOrder => "GetOrder",
            Self::CancelOrder => "CancelOrder",
            Self::ListOrders => "ListOrders",
            Self::GetStoreInventory => "GetStoreInventory",
            Self::ListStores => "ListStores",
            Self::Unknown => "UnknownAction",
        }
    }

    /// The resource shape family this action belongs to
    pub fn family(&self) -> ActionFamily {
        match self {
            Self::UpdatePet | Self::DeletePet => ActionFamily::Pet,
            Self::GetOrder | Self::CancelOrder => ActionFamily::Order,
            Self::SearchPets
            | Self::AddPet
            | Self::PlaceOrder
            | Self::ListOrders
            | Self::GetStoreInventory => ActionFamily::Store,
            Self::ListStores | Self::Unknown => ActionFamily::Application,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
