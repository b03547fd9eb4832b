//! Ambient type loading by canonical name
//!
//! Declared attribute and parameter types travel as strings in descriptors
//! and caller signatures, and must resolve back to a concrete type identity
//! at dispatch time. The eight scalar slots plus the unit type are a fixed
//! table; everything else (application enums, structs, `String`) resolves
//! through a [`TypeRegistry`] populated at startup by the embedding
//! application. Resolution fails closed: an unknown name is an error at the
//! call site, never a silent pass.

use std::any::{Any, TypeId};

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

/// A resolved type: canonical name plus runtime identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeToken {
    name: String,
    id: TypeId,
}

impl TypeToken {
    /// Create a token for `T` under the given canonical name.
    pub fn of<T: Any>(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: TypeId::of::<T>(),
        }
    }

    /// The canonical name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The runtime type identity.
    pub fn id(&self) -> TypeId {
        self.id
    }
}

static PRIMITIVES: Lazy<FxHashMap<&'static str, TypeToken>> = Lazy::new(|| {
    let mut table = FxHashMap::default();
    table.insert("bool", TypeToken::of::<bool>("bool"));
    table.insert("char", TypeToken::of::<char>("char"));
    table.insert("i8", TypeToken::of::<i8>("i8"));
    table.insert("i16", TypeToken::of::<i16>("i16"));
    table.insert("i32", TypeToken::of::<i32>("i32"));
    table.insert("i64", TypeToken::of::<i64>("i64"));
    table.insert("f32", TypeToken::of::<f32>("f32"));
    table.insert("f64", TypeToken::of::<f64>("f64"));
    table.insert("()", TypeToken::of::<()>("()"));
    table
});

/// Resolve one of the fixed scalar slots (or the unit type) by name.
pub fn primitive(name: &str) -> Option<TypeToken> {
    PRIMITIVES.get(name).cloned()
}

/// Check whether a value of type `from` may be assigned where `to` is
/// declared. Scalar and boxed-scalar values already share one identity, so
/// assignability reduces to identity equality.
pub fn is_assignable(to: &TypeToken, from: &TypeToken) -> bool {
    to.id == from.id
}

#[derive(Default)]
struct Tables {
    by_name: FxHashMap<String, TypeToken>,
    names: FxHashMap<TypeId, String>,
}

/// Registry of application types keyed by canonical name.
///
/// Populated at startup with the types the embedding application exposes
/// through managed attributes and operations. The fixed primitive table is
/// consulted first on every lookup, so primitive names cannot be shadowed.
pub struct TypeRegistry {
    tables: RwLock<Tables>,
}

impl TypeRegistry {
    /// Create an empty registry (primitives still resolve).
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
        }
    }

    /// Create a registry pre-seeded with `String`.
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        registry.register::<String>("String");
        registry
    }

    /// Register `T` under a canonical name. Re-registering a name replaces
    /// the previous entry.
    pub fn register<T: Any>(&self, name: &str) {
        let token = TypeToken::of::<T>(name);
        let mut tables = self.tables.write();
        tables.names.insert(token.id, name.to_string());
        tables.by_name.insert(name.to_string(), token);
    }

    /// Resolve a canonical name to a token; `None` means the name is
    /// unknown and the caller must fail closed.
    pub fn resolve(&self, name: &str) -> Option<TypeToken> {
        primitive(name).or_else(|| self.tables.read().by_name.get(name).cloned())
    }

    /// Reverse lookup for diagnostics: the canonical name of a runtime
    /// type identity, if registered.
    pub fn name_of(&self, id: TypeId) -> Option<String> {
        PRIMITIVES
            .values()
            .find(|token| token.id == id)
            .map(|token| token.name.clone())
            .or_else(|| self.tables.read().names.get(&id).cloned())
    }

    /// Check whether a name resolves.
    pub fn contains(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    /// Number of registered (non-primitive) types.
    pub fn len(&self) -> usize {
        self.tables.read().by_name.len()
    }

    /// Check if no application types are registered.
    pub fn is_empty(&self) -> bool {
        self.tables.read().by_name.is_empty()
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
