//! # Pet Store Authorization Engine
//!
//! Fine-grained, relationship-aware authorization decisions for the pet
//! store platform, without a hosted policy-evaluation service.
//!
//! Given a requesting identity, an action, and a target resource, the engine
//! decides ALLOW or DENY by evaluating a static, auditable policy list
//! against a per-request entity graph (users, groups, stores, franchises,
//! pets, orders) linked by attribute and parent edges.
//!
//! ## Design
//!
//! - **Default deny**: no matching policy means the request is refused.
//! - **Forbid-first**: an applicable `Forbid` policy always wins over any
//!   `Permit`, regardless of list order.
//! - **Fails closed**: unresolvable domain records and unknown actions can
//!   only ever turn an allow into a deny.
//! - **Pure per request**: no I/O, no shared mutable state; `decide()` may
//!   be called concurrently without coordination.
//!
//! ## Example
//!
//! ```rust
//! use petstore_authz::{
//!     Action, AuthorizationEngine, InMemoryRecordStore, PathParams, StoreRecord, UserClaims,
//! };
//!
//! let records = InMemoryRecordStore::new().with_store(StoreRecord {
//!     id: "store-001".to_string(),
//!     location: "main".to_string(),
//!     franchise_code: None,
//! });
//!
//! let claims = UserClaims::new("user-123").with_group("Customer");
//! let action = Action::resolve("GET", "/store/{storeId}/pets");
//! let params = PathParams::default().with_store_id("store-001#main");
//!
//! let engine = AuthorizationEngine::with_default_policies();
//! let result = engine.authorize(&claims, action, &params, &records).unwrap();
//!
//! assert!(result.is_allowed());
//! ```

pub mod action;
pub mod builder;
pub mod condition;
pub mod context;
pub mod engine;
pub mod entity;
pub mod error;
pub mod policy;
pub mod records;
pub mod types;

// Re-export commonly used types
pub use action::{Action, ActionFamily};
pub use builder::EntityBuilder;
pub use condition::{Condition, OperandRef};
pub use context::AuthorizationContext;
pub use engine::{AuthorizationEngine, AuthorizationResult, Decision};
pub use entity::{AttributeValue, Entities, Entity, EntityId};
pub use error::{AuthzError, Result};
pub use policy::{
    defaults::petstore_policies, ActionPattern, Effect, Policy, PrincipalPattern, ResourcePattern,
};
pub use records::{
    FranchiseRecord, InMemoryRecordStore, OrderRecord, PetRecord, RecordStore, StoreRecord,
};
pub use types::{PathParams, PolicyId, UserClaims};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
