//! Entity model: identifiers, attribute values, entities, and the
//! per-request entity collection
//!
//! Entities form a small graph: each node carries an attribute map and a set
//! of parent edges pointing upward (user -> group, store -> franchise). One
//! collection is built per authorization request and discarded afterwards.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;
use tracing::debug;

/// Entity type vocabulary used across the pet store domain
pub mod entity_type {
    pub const USER: &str = "User";
    pub const GROUP: &str = "Group";
    pub const STORE: &str = "Store";
    pub const FRANCHISE: &str = "Franchise";
    pub const PET: &str = "Pet";
    pub const ORDER: &str = "Order";
    pub const APPLICATION: &str = "Application";
}

/// Attribute names shared between the entity builder and the policy set
pub mod attr {
    pub const EMAIL: &str = "email";
    pub const EMPLOYMENT_STORE_CODES: &str = "employment_store_codes";
    pub const EMPLOYMENT_FRANCHISE_CODES: &str = "employment_franchise_codes";
    pub const FRANCHISE_STORE_CODES: &str = "franchise_store_codes";
    pub const LOCATION: &str = "location";
    pub const NAME: &str = "name";
    pub const STORES: &str = "stores";
    pub const STORE: &str = "store";
    pub const OWNER: &str = "owner";
}

/// Unique entity identifier: a `(type, id)` pair
///
/// Two identifiers are equal iff both fields match exactly (case-sensitive).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId {
    /// Entity type (e.g., "User", "Store")
    pub entity_type: String,

    /// Identifier unique within the type (e.g., a subject id, a store code)
    pub id: String,
}

impl EntityId {
    /// Create a new entity identifier
    pub fn new(entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            id: id.into(),
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::\"{}\"", self.entity_type, self.id)
    }
}

/// Attribute value: a closed union instead of an open bag of `any`
///
/// The condition evaluator pattern-matches these exhaustively, so no runtime
/// type probing is needed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// String scalar
    String(String),
    /// Integer scalar
    Long(i64),
    /// Boolean scalar
    Bool(bool),
    /// Reference to a single entity
    EntityRef(EntityId),
    /// Set of entity references (e.g., employment store codes)
    EntitySet(Vec<EntityId>),
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        Self::Long(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<EntityId> for AttributeValue {
    fn from(value: EntityId) -> Self {
        Self::EntityRef(value)
    }
}

impl From<Vec<EntityId>> for AttributeValue {
    fn from(value: Vec<EntityId>) -> Self {
        Self::EntitySet(value)
    }
}

/// One node in the entity graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Unique identifier within a collection
    pub id: EntityId,

    /// Attribute map
    #[serde(default)]
    pub attributes: HashMap<String, AttributeValue>,

    /// Parent edges, directed upward only (group / hierarchy membership)
    #[serde(default)]
    pub parents: Vec<EntityId>,
}

impl Entity {
    /// Create a new entity with no attributes and no parents
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            attributes: HashMap::new(),
            parents: Vec::new(),
        }
    }

    /// Add an attribute to the entity
    pub fn with_attribute(
        mut self,
        name: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Add a parent edge, preserving insertion order and ignoring duplicates
    pub fn with_parent(mut self, parent: EntityId) -> Self {
        if !self.parents.contains(&parent) {
            self.parents.push(parent);
        }
        self
    }

    /// Look up an attribute by name
    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }
}

/// Request-scoped entity collection
///
/// Built fresh per authorization request by the entity builder, consumed
/// read-only by the decision engine, discarded after the request.
#[derive(Debug, Clone, Default)]
pub struct Entities {
    entities: HashMap<EntityId, Entity>,
}

impl Entities {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entity; a colliding identifier keeps the last write
    pub fn add(&mut self, entity: Entity) {
        if self.entities.contains_key(&entity.id) {
            debug!("replacing entity {} in collection", entity.id);
        }
        self.entities.insert(entity.id.clone(), entity);
    }

    /// Look up an entity by identifier
    pub fn get(&self, id: &EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    /// Number of entities in the collection
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the collection is empty
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Check whether `start` is transitively a member of `group`
    ///
    /// Walks parent edges upward from `start`. Parent identifiers that do not
    /// resolve to an entity in the collection terminate that branch, so
    /// membership against an absent group silently fails.
    pub fn is_member_of(&self, start: &EntityId, group: &EntityId) -> bool {
        let Some(entity) = self.get(start) else {
            return false;
        };

        let mut queue: VecDeque<&EntityId> = entity.parents.iter().collect();
        let mut seen: HashSet<&EntityId> = HashSet::new();

        while let Some(parent) = queue.pop_front() {
            if parent == group {
                return true;
            }
            if !seen.insert(parent) {
                continue;
            }
            if let Some(next) = self.get(parent) {
                queue.extend(next.parents.iter());
            }
        }

        false
    }
}
