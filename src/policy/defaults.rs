//! The static pet store policy list
//!
//! Loaded once at engine startup and read-only thereafter. The set is kept
//! deliberately small and auditable; evaluation is a linear scan.

use super::Policy;
use crate::action::Action;
use crate::condition::{Condition, OperandRef};
use crate::entity::attr;

/// Actions a store operator may perform against a store it works for
fn store_operations() -> Vec<Action> {
    vec![
        Action::SearchPets,
        Action::AddPet,
        Action::UpdatePet,
        Action::DeletePet,
        Action::PlaceOrder,
        Action::GetOrder,
        Action::CancelOrder,
        Action::ListOrders,
        Action::GetStoreInventory,
    ]
}

/// The pet store platform's policy set, in evaluation order
pub fn petstore_policies() -> Vec<Policy> {
    vec![
        // Suspended accounts are locked out of everything, regardless of any
        // permit further down the list.
        Policy::forbid("suspended-account-lockout").principal_in_group("Suspended"),
        // Platform administrators.
        Policy::permit("admin-full-access").principal_in_group("Administrator"),
        // Customers may browse any store and place orders.
        Policy::permit("customer-browse").principal_in_group("Customer").on_actions(vec![
            Action::SearchPets,
            Action::PlaceOrder,
            Action::ListStores,
        ]),
        // Customers may inspect and cancel their own orders only.
        Policy::permit("customer-own-orders")
            .principal_in_group("Customer")
            .on_actions(vec![Action::GetOrder, Action::CancelOrder])
            .when(Condition::Equal(
                OperandRef::Principal,
                OperandRef::ResourceAttribute(attr::OWNER.to_string()),
            )),
        // Store owners operate the stores listed in their employment claim.
        Policy::permit("store-owner-operations")
            .principal_in_group("StoreOwnerRole")
            .on_actions(store_operations())
            .when(Condition::InSet(attr::EMPLOYMENT_STORE_CODES.to_string())),
        // Franchise owners operate every store of their franchises.
        Policy::permit("franchise-owner-operations")
            .principal_in_group("FranchiseOwnerRole")
            .on_actions(store_operations())
            .when(Condition::InSet(attr::FRANCHISE_STORE_CODES.to_string())),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::Effect;
    use std::collections::HashSet;

    #[test]
    fn test_policy_ids_are_unique() {
        let policies = petstore_policies();
        let ids: HashSet<_> = policies.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids.len(), policies.len());
    }

    #[test]
    fn test_forbids_carry_no_condition() {
        // Lockout forbids must stay unconditional.
        for policy in petstore_policies() {
            if policy.effect == Effect::Forbid {
                assert!(policy.condition.is_none(), "policy '{}'", policy.id);
            }
        }
    }

    #[test]
    fn test_customer_policies_present() {
        let policies = petstore_policies();
        assert!(policies.iter().any(|p| p.id == "customer-browse"));
        assert!(policies.iter().any(|p| p.id == "customer-own-orders"));
    }
}
