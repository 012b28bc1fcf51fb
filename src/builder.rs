//! Entity builder: turns domain records and claims into the per-request
//! entity graph
//!
//! A missing domain record is a resolution gap, not a failure: the affected
//! entity is logged and omitted, so downstream membership checks simply do
//! not match it. That can only ever turn an allow into a deny, never the
//! reverse.

use crate::action::{Action, ActionFamily};
use crate::entity::{attr, entity_type, Entities, Entity, EntityId};
use crate::records::{FranchiseRecord, RecordStore, StoreRecord};
use crate::types::{parse_code_list, PathParams, UserClaims};
use tracing::{debug, warn};

/// Identifier of the application singleton resource
pub const APPLICATION_ID: &str = "PetStore";

/// Builds one request's [`Entities`] collection from claims, path
/// parameters, and pre-resolved domain records
pub struct EntityBuilder<'a> {
    records: &'a dyn RecordStore,
}

impl<'a> EntityBuilder<'a> {
    /// Create a builder over the caller's record store
    pub fn new(records: &'a dyn RecordStore) -> Self {
        Self { records }
    }

    /// Build the principal entity from identity claims
    ///
    /// Employment code claims are parsed into entity-ref sets; an empty
    /// claim yields an empty set. Each group claim becomes a parent edge.
    /// `franchise_store_codes` is the resolved union of all stores owned by
    /// the principal's employment franchises, so franchise-scoped policies
    /// can use the same set-membership condition as store-scoped ones.
    pub fn build_principal_entity(&self, claims: &UserClaims) -> Entity {
        let store_codes = parse_code_list(claims.employment_store_codes.as_deref().unwrap_or(""));
        let franchise_codes =
            parse_code_list(claims.employment_franchise_codes.as_deref().unwrap_or(""));

        let store_refs: Vec<EntityId> = store_codes
            .iter()
            .map(|code| EntityId::new(entity_type::STORE, code))
            .collect();
        let franchise_refs: Vec<EntityId> = franchise_codes
            .iter()
            .map(|code| EntityId::new(entity_type::FRANCHISE, code))
            .collect();
        let franchise_store_refs: Vec<EntityId> = franchise_codes
            .iter()
            .flat_map(|code| self.records.franchise_stores(code))
            .map(|store| EntityId::new(entity_type::STORE, store.code()))
            .collect();

        let mut principal = Entity::new(EntityId::new(entity_type::USER, &claims.sub))
            .with_attribute(attr::EMPLOYMENT_STORE_CODES, store_refs)
            .with_attribute(attr::EMPLOYMENT_FRANCHISE_CODES, franchise_refs)
            .with_attribute(attr::FRANCHISE_STORE_CODES, franchise_store_refs);

        if let Some(email) = &claims.email {
            principal = principal.with_attribute(attr::EMAIL, email.as_str());
        }
        for group in &claims.groups {
            principal = principal.with_parent(EntityId::new(entity_type::GROUP, group));
        }
        principal
    }

    /// One leaf entity per group claim
    pub fn build_group_entities(&self, claims: &UserClaims) -> Vec<Entity> {
        claims
            .groups
            .iter()
            .map(|group| Entity::new(EntityId::new(entity_type::GROUP, group)))
            .collect()
    }

    /// Store entity keyed by the composite natural key
    pub fn build_store_entity(&self, record: &StoreRecord) -> Entity {
        let mut store = Entity::new(EntityId::new(entity_type::STORE, record.code()))
            .with_attribute(attr::LOCATION, record.location.as_str());
        if let Some(franchise_code) = &record.franchise_code {
            store = store.with_parent(EntityId::new(entity_type::FRANCHISE, franchise_code));
        }
        store
    }

    /// Franchise entity carrying its owned store set
    pub fn build_franchise_entity(
        &self,
        record: &FranchiseRecord,
        owned_stores: &[StoreRecord],
    ) -> Entity {
        let store_refs: Vec<EntityId> = owned_stores
            .iter()
            .map(|store| EntityId::new(entity_type::STORE, store.code()))
            .collect();
        Entity::new(EntityId::new(entity_type::FRANCHISE, &record.code))
            .with_attribute(attr::NAME, record.name.as_str())
            .with_attribute(attr::STORES, store_refs)
    }

    /// Resource entities for the request, shaped by the action family
    pub fn build_resource_entities(&self, action: Action, params: &PathParams) -> Vec<Entity> {
        match action.family() {
            ActionFamily::Pet => {
                let (Some(store_code), Some(pet_id)) =
                    (params.store_id.as_deref(), params.pet_id.as_deref())
                else {
                    warn!("pet action {} without storeId/petId path parameters", action);
                    return Vec::new();
                };
                match self.records.pet(store_code, pet_id) {
                    Some(pet) => vec![Entity::new(EntityId::new(entity_type::PET, &pet.id))
                        .with_attribute(
                            attr::STORE,
                            EntityId::new(entity_type::STORE, &pet.store_code),
                        )],
                    None => {
                        warn!(
                            "pet '{}' not found in store '{}', omitting resource entity",
                            pet_id, store_code
                        );
                        Vec::new()
                    }
                }
            }
            ActionFamily::Order => {
                let (Some(store_code), Some(order_number)) =
                    (params.store_id.as_deref(), params.order_number.as_deref())
                else {
                    warn!("order action {} without storeId/orderNumber path parameters", action);
                    return Vec::new();
                };
                match self.records.order(store_code, order_number) {
                    Some(order) => {
                        vec![Entity::new(EntityId::new(entity_type::ORDER, &order.order_number))
                            .with_attribute(
                                attr::STORE,
                                EntityId::new(entity_type::STORE, &order.store_code),
                            )
                            .with_attribute(
                                attr::OWNER,
                                EntityId::new(entity_type::USER, &order.owner_sub),
                            )]
                    }
                    None => {
                        warn!(
                            "order '{}' not found in store '{}', omitting resource entity",
                            order_number, store_code
                        );
                        Vec::new()
                    }
                }
            }
            ActionFamily::Store => {
                let Some(store_code) = params.store_id.as_deref() else {
                    warn!("store action {} without storeId path parameter", action);
                    return Vec::new();
                };
                match self.records.store(store_code) {
                    Some(store) => {
                        let mut out = vec![self.build_store_entity(&store)];
                        if let Some(franchise_code) = &store.franchise_code {
                            match self.records.franchise(franchise_code) {
                                Some(franchise) => {
                                    let owned = self.records.franchise_stores(franchise_code);
                                    out.push(self.build_franchise_entity(&franchise, &owned));
                                }
                                None => warn!(
                                    "franchise '{}' referenced by store '{}' not found",
                                    franchise_code, store_code
                                ),
                            }
                        }
                        out
                    }
                    None => {
                        warn!("store '{}' not found, omitting resource entity", store_code);
                        Vec::new()
                    }
                }
            }
            ActionFamily::Application => {
                let mut application =
                    Entity::new(EntityId::new(entity_type::APPLICATION, APPLICATION_ID));
                if let Some(store_code) = &params.store_id {
                    application = application.with_attribute(
                        attr::STORE,
                        EntityId::new(entity_type::STORE, store_code),
                    );
                }
                vec![application]
            }
        }
    }

    /// The context resource identifier for an action and its path parameters
    ///
    /// Derived from the path alone, so it exists even when the backing
    /// record does not; an unresolvable record only removes the entity, not
    /// the identifier.
    pub fn resource_id(&self, action: Action, params: &PathParams) -> EntityId {
        match action.family() {
            ActionFamily::Pet => EntityId::new(
                entity_type::PET,
                params.pet_id.as_deref().unwrap_or_default(),
            ),
            ActionFamily::Order => EntityId::new(
                entity_type::ORDER,
                params.order_number.as_deref().unwrap_or_default(),
            ),
            ActionFamily::Store => EntityId::new(
                entity_type::STORE,
                params.store_id.as_deref().unwrap_or_default(),
            ),
            ActionFamily::Application => {
                EntityId::new(entity_type::APPLICATION, APPLICATION_ID)
            }
        }
    }

    /// Assemble the full per-request collection: principal, groups,
    /// employment stores and franchises, and the resource with its ancestry
    pub fn build_entities(
        &self,
        claims: &UserClaims,
        action: Action,
        params: &PathParams,
    ) -> Entities {
        let mut entities = Entities::new();

        for group in self.build_group_entities(claims) {
            entities.add(group);
        }
        entities.add(self.build_principal_entity(claims));

        // Employment stores, with their franchises for ancestry checks.
        for code in parse_code_list(claims.employment_store_codes.as_deref().unwrap_or("")) {
            match self.records.store(&code) {
                Some(store) => {
                    if let Some(franchise_code) = &store.franchise_code {
                        match self.records.franchise(franchise_code) {
                            Some(franchise) => {
                                let owned = self.records.franchise_stores(franchise_code);
                                entities.add(self.build_franchise_entity(&franchise, &owned));
                            }
                            None => warn!(
                                "franchise '{}' referenced by store '{}' not found",
                                franchise_code, code
                            ),
                        }
                    }
                    entities.add(self.build_store_entity(&store));
                }
                None => warn!(
                    "employment store code '{}' does not resolve to a store, omitting",
                    code
                ),
            }
        }

        // Employment franchises and every store they own.
        for code in parse_code_list(claims.employment_franchise_codes.as_deref().unwrap_or("")) {
            match self.records.franchise(&code) {
                Some(franchise) => {
                    let owned = self.records.franchise_stores(&code);
                    for store in &owned {
                        entities.add(self.build_store_entity(store));
                    }
                    entities.add(self.build_franchise_entity(&franchise, &owned));
                }
                None => warn!(
                    "employment franchise code '{}' does not resolve to a franchise, omitting",
                    code
                ),
            }
        }

        for resource in self.build_resource_entities(action, params) {
            entities.add(resource);
        }

        debug!("built entity collection with {} entities", entities.len());
        entities
    }
}
