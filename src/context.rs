//! Per-request authorization context

use crate::action::Action;
use crate::entity::{Entities, EntityId};
use crate::error::{AuthzError, Result};

/// Everything the decision engine needs for one request
///
/// Constructed once per request and immutable thereafter. The entity
/// collection is request-scoped; nothing here is shared across requests.
#[derive(Debug, Clone)]
pub struct AuthorizationContext {
    /// Identity requesting access
    pub principal: EntityId,

    /// Operation being attempted
    pub action: Action,

    /// Entity being acted upon
    pub resource: EntityId,

    /// Entity graph assembled for this request
    pub entities: Entities,
}

impl AuthorizationContext {
    /// Create a context
    pub fn new(
        principal: EntityId,
        action: Action,
        resource: EntityId,
        entities: Entities,
    ) -> Self {
        Self {
            principal,
            action,
            resource,
            entities,
        }
    }

    /// Reject structurally invalid input before any policy is evaluated
    ///
    /// Missing entities or attributes are never errors; only malformed
    /// identifiers count as caller misuse.
    pub fn validate(&self) -> Result<()> {
        if self.principal.entity_type.is_empty() || self.principal.id.is_empty() {
            return Err(AuthzError::InvalidInput(
                "principal identifier must carry a type and an id".to_string(),
            ));
        }
        if self.resource.entity_type.is_empty() || self.resource.id.is_empty() {
            return Err(AuthzError::InvalidInput(
                "resource identifier must carry a type and an id".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::entity_type;

    #[test]
    fn test_valid_context() {
        let context = AuthorizationContext::new(
            EntityId::new(entity_type::USER, "user-123"),
            Action::SearchPets,
            EntityId::new(entity_type::STORE, "store-001#main"),
            Entities::new(),
        );
        assert!(context.validate().is_ok());
    }

    #[test]
    fn test_empty_principal_id_is_caller_misuse() {
        let context = AuthorizationContext::new(
            EntityId::new(entity_type::USER, ""),
            Action::SearchPets,
            EntityId::new(entity_type::STORE, "store-001#main"),
            Entities::new(),
        );
        assert!(matches!(
            context.validate(),
            Err(AuthzError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_empty_resource_type_is_caller_misuse() {
        let context = AuthorizationContext::new(
            EntityId::new(entity_type::USER, "user-123"),
            Action::SearchPets,
            EntityId::new("", "store-001#main"),
            Entities::new(),
        );
        assert!(context.validate().is_err());
    }
}
