//! Policy definitions and pattern matching
//!
//! Policies pair principal/action/resource patterns with an effect and an
//! optional condition tree. The patterns are closed enums rather than
//! wildcard strings, so matching needs no runtime parsing.

pub mod defaults;

use crate::action::Action;
use crate::condition::Condition;
use crate::context::AuthorizationContext;
use crate::entity::{entity_type, EntityId};
use crate::types::PolicyId;
use serde::{Deserialize, Serialize};

/// Policy effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Effect {
    /// Grant the request
    Permit,
    /// Refuse the request; forbids take precedence over permits
    Forbid,
}

/// Principal slot of a policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrincipalPattern {
    /// Any principal
    Any,
    /// Exactly this identifier
    Exact(EntityId),
    /// Transitively a member of this group
    InGroup(EntityId),
}

impl PrincipalPattern {
    fn matches(&self, context: &AuthorizationContext) -> bool {
        match self {
            Self::Any => true,
            Self::Exact(id) => *id == context.principal,
            Self::InGroup(group) => context.entities.is_member_of(&context.principal, group),
        }
    }
}

/// Action slot of a policy
///
/// [`Action::Unknown`] matches no pattern, including `Any`; unmapped routes
/// can never be granted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionPattern {
    /// Any known action
    Any,
    /// Exactly this action
    Exact(Action),
    /// Any action in the set
    OneOf(Vec<Action>),
}

impl ActionPattern {
    fn matches(&self, action: Action) -> bool {
        if action == Action::Unknown {
            return false;
        }
        match self {
            Self::Any => true,
            Self::Exact(expected) => *expected == action,
            Self::OneOf(actions) => actions.contains(&action),
        }
    }
}

/// Resource slot of a policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourcePattern {
    /// Any resource
    Any,
    /// Exactly this identifier
    Exact(EntityId),
    /// Any resource of this entity type
    OfType(String),
}

impl ResourcePattern {
    fn matches(&self, resource: &EntityId) -> bool {
        match self {
            Self::Any => true,
            Self::Exact(id) => id == resource,
            Self::OfType(entity_type) => *entity_type == resource.entity_type,
        }
    }
}

/// One rule in the (static, ordered) policy list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    /// Unique identifier, used in audit output
    pub id: PolicyId,

    /// Permit or forbid
    pub effect: Effect,

    /// Principal pattern
    pub principal: PrincipalPattern,

    /// Action pattern
    pub action: ActionPattern,

    /// Resource pattern
    pub resource: ResourcePattern,

    /// Optional condition; absent means unconditional
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
}

impl Policy {
    /// Start a permit policy matching everything, unconditionally
    pub fn permit(id: impl Into<PolicyId>) -> Self {
        Self::with_effect(id, Effect::Permit)
    }

    /// Start a forbid policy matching everything, unconditionally
    pub fn forbid(id: impl Into<PolicyId>) -> Self {
        Self::with_effect(id, Effect::Forbid)
    }

    fn with_effect(id: impl Into<PolicyId>, effect: Effect) -> Self {
        Self {
            id: id.into(),
            effect,
            principal: PrincipalPattern::Any,
            action: ActionPattern::Any,
            resource: ResourcePattern::Any,
            condition: None,
        }
    }

    /// Restrict the principal slot
    pub fn for_principal(mut self, pattern: PrincipalPattern) -> Self {
        self.principal = pattern;
        self
    }

    /// Restrict the principal slot to members of a named group
    pub fn principal_in_group(self, group: impl Into<String>) -> Self {
        self.for_principal(PrincipalPattern::InGroup(EntityId::new(
            entity_type::GROUP,
            group,
        )))
    }

    /// Restrict the action slot to a single action
    pub fn on_action(mut self, action: Action) -> Self {
        self.action = ActionPattern::Exact(action);
        self
    }

    /// Restrict the action slot to a set of actions
    pub fn on_actions(mut self, actions: Vec<Action>) -> Self {
        self.action = ActionPattern::OneOf(actions);
        self
    }

    /// Restrict the resource slot
    pub fn on_resource(mut self, pattern: ResourcePattern) -> Self {
        self.resource = pattern;
        self
    }

    /// Attach a condition
    pub fn when(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Whether all three patterns match the context
    pub fn applies_to(&self, context: &AuthorizationContext) -> bool {
        self.principal.matches(context)
            && self.action.matches(context.action)
            && self.resource.matches(&context.resource)
    }

    /// Whether the policy applies and its condition (if any) holds
    pub fn is_satisfied(&self, context: &AuthorizationContext) -> bool {
        self.applies_to(context)
            && self
                .condition
                .as_ref()
                .map_or(true, |condition| condition.evaluate(context))
    }
}
