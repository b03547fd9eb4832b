//! Registry of managed class declarations
//!
//! Keyed by the concrete Rust type identity and by exposed name. Populated
//! at startup by the embedding application; consulted by the facade at
//! registration time and by the dispatcher on every call with the resolved
//! instance's runtime type.

use std::any::TypeId;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::decl::ClassDecl;

#[derive(Default)]
struct Tables {
    by_id: FxHashMap<TypeId, Arc<ClassDecl>>,
    by_name: FxHashMap<String, TypeId>,
}

/// Registry of [`ClassDecl`]s for the types the application manages.
pub struct ClassRegistry {
    tables: RwLock<Tables>,
}

impl ClassRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
        }
    }

    /// Register a class declaration. Re-registering a type replaces the
    /// previous declaration.
    pub fn register(&self, class: ClassDecl) -> Arc<ClassDecl> {
        let class = Arc::new(class);
        let mut tables = self.tables.write();
        tables
            .by_name
            .insert(class.type_name().to_string(), class.type_id());
        tables.by_id.insert(class.type_id(), class.clone());
        class
    }

    /// Look a declaration up by concrete type identity.
    pub fn get(&self, id: TypeId) -> Option<Arc<ClassDecl>> {
        self.tables.read().by_id.get(&id).cloned()
    }

    /// Look a declaration up by exposed type name.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<ClassDecl>> {
        let tables = self.tables.read();
        let id = tables.by_name.get(name)?;
        tables.by_id.get(id).cloned()
    }

    /// Check whether a type has a declaration.
    pub fn contains(&self, id: TypeId) -> bool {
        self.tables.read().by_id.contains_key(&id)
    }

    /// Number of registered declarations.
    pub fn len(&self) -> usize {
        self.tables.read().by_id.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.tables.read().by_id.is_empty()
    }
}

impl Default for ClassRegistry {
    fn default() -> Self {
        Self::new()
    }
}
