//! Authorization decision values

use crate::types::PolicyId;
use serde::{Deserialize, Serialize};

/// The two possible outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Decision {
    Allow,
    Deny,
}

/// Outcome of one authorization request
///
/// A pure output value: two calls over an identical context and policy list
/// produce an equal result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationResult {
    /// Allow or deny
    pub decision: Decision,

    /// Policies that determined the outcome; empty on default deny
    pub determining_policies: Vec<PolicyId>,

    /// Human-readable rationale for audit output
    pub message: String,
}

impl AuthorizationResult {
    /// Allow, determined by one policy
    pub fn allow(policy_id: impl Into<PolicyId>, message: impl Into<String>) -> Self {
        Self {
            decision: Decision::Allow,
            determining_policies: vec![policy_id.into()],
            message: message.into(),
        }
    }

    /// Deny, determined by one policy
    pub fn deny(policy_id: impl Into<PolicyId>, message: impl Into<String>) -> Self {
        Self {
            decision: Decision::Deny,
            determining_policies: vec![policy_id.into()],
            message: message.into(),
        }
    }

    /// Deny because no policy matched
    pub fn default_deny() -> Self {
        Self {
            decision: Decision::Deny,
            determining_policies: Vec::new(),
            message: "no matching policy - default deny".to_string(),
        }
    }

    /// Whether the request was allowed
    pub fn is_allowed(&self) -> bool {
        self.decision == Decision::Allow
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allow_result() {
        let result = AuthorizationResult::allow("customer-browse", "policy permits this request");
        assert!(result.is_allowed());
        assert_eq!(result.determining_policies, vec!["customer-browse".to_string()]);
    }

    #[test]
    fn test_default_deny_has_no_determining_policies() {
        let result = AuthorizationResult::default_deny();
        assert!(!result.is_allowed());
        assert!(result.determining_policies.is_empty());
    }

    #[test]
    fn test_result_is_a_pure_value() {
        // Equal inputs must produce equal results, so the serialized form
        // carries no per-call identifier or clock reading.
        let result = AuthorizationResult::allow("customer-browse", "ok");
        assert_eq!(result, AuthorizationResult::allow("customer-browse", "ok"));

        let json = serde_json::to_value(&result).unwrap();
        let fields: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(fields, vec!["decision", "determining_policies", "message"]);
    }
}
