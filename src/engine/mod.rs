//! Decision engine: policy evaluation over the request context
//!
//! The engine is pure and synchronous: each decision is a stateless function
//! of the context and the policy list loaded at startup. Nothing is shared
//! across requests, so concurrent callers need no coordination.
//!
//! Evaluation is forbid-first: every `Forbid` policy is considered before
//! any `Permit`, so an applicable forbid always wins regardless of list
//! position. Within an effect class the first satisfied policy in list order
//! determines the outcome. No policy matching at all is a default deny.

pub mod decision;

pub use decision::{AuthorizationResult, Decision};

use crate::action::Action;
use crate::builder::EntityBuilder;
use crate::context::AuthorizationContext;
use crate::entity::{entity_type, EntityId};
use crate::error::Result;
use crate::policy::{defaults, Effect, Policy};
use crate::records::RecordStore;
use crate::types::{PathParams, UserClaims};
use tracing::{debug, info};

/// Authorization decision engine over an immutable policy list
pub struct AuthorizationEngine {
    policies: Vec<Policy>,
}

impl AuthorizationEngine {
    /// Create an engine over a policy list; the list is fixed for the
    /// engine's lifetime
    pub fn new(policies: Vec<Policy>) -> Self {
        Self { policies }
    }

    /// Create an engine over the pet store platform's static policy set
    pub fn with_default_policies() -> Self {
        Self::new(defaults::petstore_policies())
    }

    /// The policy list, in evaluation order
    pub fn policies(&self) -> &[Policy] {
        &self.policies
    }

    /// Decide one request
    ///
    /// Structurally invalid input fails before any policy is considered;
    /// everything else produces a normal `Allow`/`Deny` value.
    pub fn decide(&self, context: &AuthorizationContext) -> Result<AuthorizationResult> {
        context.validate()?;

        debug!(
            "authorization request: principal={}, action={}, resource={}",
            context.principal, context.action, context.resource
        );

        if let Some(policy) = self.first_satisfied(Effect::Forbid, context) {
            info!("DENY by policy '{}'", policy.id);
            return Ok(AuthorizationResult::deny(
                &policy.id,
                format!("policy '{}' forbids this request", policy.id),
            ));
        }

        if let Some(policy) = self.first_satisfied(Effect::Permit, context) {
            info!("ALLOW by policy '{}'", policy.id);
            return Ok(AuthorizationResult::allow(
                &policy.id,
                format!("policy '{}' permits this request", policy.id),
            ));
        }

        debug!("no policy matched");
        Ok(AuthorizationResult::default_deny())
    }

    /// Full pipeline for one request: build the entity graph from claims and
    /// records, assemble the context, decide
    pub fn authorize(
        &self,
        claims: &UserClaims,
        action: Action,
        params: &PathParams,
        records: &dyn RecordStore,
    ) -> Result<AuthorizationResult> {
        let builder = EntityBuilder::new(records);
        let entities = builder.build_entities(claims, action, params);
        let context = AuthorizationContext::new(
            EntityId::new(entity_type::USER, &claims.sub),
            action,
            builder.resource_id(action, params),
            entities,
        );
        self.decide(&context)
    }

    fn first_satisfied(
        &self,
        effect: Effect,
        context: &AuthorizationContext,
    ) -> Option<&Policy> {
        self.policies
            .iter()
            .filter(|policy| policy.effect == effect)
            .find(|policy| {
                let satisfied = policy.is_satisfied(context);
                debug!(
                    "policy '{}' ({:?}): {}",
                    policy.id,
                    policy.effect,
                    if satisfied { "satisfied" } else { "not applicable" }
                );
                satisfied
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Entities, Entity};
    use crate::error::AuthzError;

    fn customer_context(action: Action) -> AuthorizationContext {
        let principal = EntityId::new(entity_type::USER, "user-123");
        let group = EntityId::new(entity_type::GROUP, "Customer");
        let mut entities = Entities::new();
        entities.add(Entity::new(group.clone()));
        entities.add(Entity::new(principal.clone()).with_parent(group));
        AuthorizationContext::new(
            principal,
            action,
            EntityId::new(entity_type::STORE, "store-001#main"),
            entities,
        )
    }

    #[test]
    fn test_default_deny_when_nothing_matches() {
        let engine = AuthorizationEngine::new(vec![]);
        let result = engine.decide(&customer_context(Action::SearchPets)).unwrap();

        assert_eq!(result.decision, Decision::Deny);
        assert!(result.determining_policies.is_empty());
    }

    #[test]
    fn test_single_unconditional_policy_decides() {
        let engine = AuthorizationEngine::new(vec![Policy::permit("customer-browse")
            .principal_in_group("Customer")
            .on_action(Action::SearchPets)]);

        let result = engine.decide(&customer_context(Action::SearchPets)).unwrap();

        assert_eq!(result.decision, Decision::Allow);
        assert_eq!(result.determining_policies, vec!["customer-browse".to_string()]);
    }

    #[test]
    fn test_forbid_wins_over_earlier_permit() {
        // The permit comes first in list order; the forbid still wins.
        let engine = AuthorizationEngine::new(vec![
            Policy::permit("broad-permit").principal_in_group("Customer"),
            Policy::forbid("lockout").principal_in_group("Customer"),
        ]);

        let result = engine.decide(&customer_context(Action::SearchPets)).unwrap();

        assert_eq!(result.decision, Decision::Deny);
        assert_eq!(result.determining_policies, vec!["lockout".to_string()]);
    }

    #[test]
    fn test_list_order_breaks_ties_within_effect_class() {
        let engine = AuthorizationEngine::new(vec![
            Policy::permit("first").principal_in_group("Customer"),
            Policy::permit("second").principal_in_group("Customer"),
        ]);

        let result = engine.decide(&customer_context(Action::SearchPets)).unwrap();

        assert_eq!(result.determining_policies, vec!["first".to_string()]);
    }

    #[test]
    fn test_unknown_action_denies_even_with_match_any_policy() {
        let engine = AuthorizationEngine::new(vec![Policy::permit("anything")]);

        let result = engine.decide(&customer_context(Action::Unknown)).unwrap();

        assert_eq!(result.decision, Decision::Deny);
        assert!(result.determining_policies.is_empty());
    }

    #[test]
    fn test_invalid_context_fails_before_evaluation() {
        let engine = AuthorizationEngine::new(vec![Policy::permit("anything")]);
        let context = AuthorizationContext::new(
            EntityId::new(entity_type::USER, ""),
            Action::SearchPets,
            EntityId::new(entity_type::STORE, "store-001#main"),
            Entities::new(),
        );

        assert!(matches!(
            engine.decide(&context),
            Err(AuthzError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_decide_is_idempotent() {
        let engine = AuthorizationEngine::with_default_policies();
        let context = customer_context(Action::SearchPets);

        let first = engine.decide(&context).unwrap();
        let second = engine.decide(&context).unwrap();

        assert_eq!(first, second);
    }
}
