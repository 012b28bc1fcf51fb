//! Condition trees and their evaluator
//!
//! Conditions are constructed programmatically, not parsed from a textual
//! DSL. Evaluation is a total, pure function of the request context: a
//! missing entity or attribute makes the node false, it never raises an
//! error.

use crate::context::AuthorizationContext;
use crate::entity::{attr, AttributeValue};
use serde::{Deserialize, Serialize};

/// A value position a condition can reference in the request context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperandRef {
    /// The principal's identifier
    Principal,
    /// The resource's identifier
    Resource,
    /// A named attribute of the principal entity
    PrincipalAttribute(String),
    /// A named attribute of the resource entity
    ResourceAttribute(String),
}

impl OperandRef {
    /// Resolve the operand against the context; `None` when the referenced
    /// entity or attribute is absent
    fn resolve(&self, context: &AuthorizationContext) -> Option<AttributeValue> {
        match self {
            Self::Principal => Some(AttributeValue::EntityRef(context.principal.clone())),
            Self::Resource => Some(AttributeValue::EntityRef(context.resource.clone())),
            Self::PrincipalAttribute(name) => context
                .entities
                .get(&context.principal)?
                .attribute(name)
                .cloned(),
            Self::ResourceAttribute(name) => context
                .entities
                .get(&context.resource)?
                .attribute(name)
                .cloned(),
        }
    }
}

/// Boolean condition tree attached to a policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Condition {
    /// Structural equality of two resolved context values
    Equal(OperandRef, OperandRef),
    /// The principal entity exists and carries the named attribute
    HasAttribute(String),
    /// The principal's named entity-ref set contains the resource, directly
    /// or through the resource's `store` reference
    InSet(String),
    /// All children hold; empty means true
    And(Vec<Condition>),
    /// At least one child holds; empty means false
    Or(Vec<Condition>),
}

impl Condition {
    /// Evaluate the condition against the request context
    pub fn evaluate(&self, context: &AuthorizationContext) -> bool {
        match self {
            Self::Equal(left, right) => {
                match (left.resolve(context), right.resolve(context)) {
                    (Some(a), Some(b)) => a == b,
                    _ => false,
                }
            }
            Self::HasAttribute(name) => context
                .entities
                .get(&context.principal)
                .is_some_and(|principal| principal.attribute(name).is_some()),
            Self::InSet(name) => Self::evaluate_in_set(name, context),
            Self::And(children) => children.iter().all(|child| child.evaluate(context)),
            Self::Or(children) => children.iter().any(|child| child.evaluate(context)),
        }
    }

    /// Set-membership check with one level of indirection
    ///
    /// The set must be an entity-ref set on the principal. It matches when it
    /// contains the resource id itself, or when it contains the id of the
    /// resource's `store` reference. The indirection is what lets a policy
    /// keyed on employment stores match an order or pet, whose owning store
    /// is what determines access.
    fn evaluate_in_set(name: &str, context: &AuthorizationContext) -> bool {
        let Some(principal) = context.entities.get(&context.principal) else {
            return false;
        };
        let Some(AttributeValue::EntitySet(refs)) = principal.attribute(name) else {
            return false;
        };

        if refs.iter().any(|entry| entry.id == context.resource.id) {
            return true;
        }

        let Some(resource) = context.entities.get(&context.resource) else {
            return false;
        };
        match resource.attribute(attr::STORE) {
            Some(AttributeValue::EntityRef(store)) => {
                refs.iter().any(|entry| entry.id == store.id)
            }
            _ => false,
        }
    }
}
