//! Bean server boundary
//!
//! The engine never assumes a process-wide server: it talks to an injected
//! [`BeanServer`] handle, which keeps the core testable without a live
//! external registry. [`LocalBeanServer`] is the in-process implementation
//! that external front ends (or tests) can hand beans out of by name.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::bean::DynamicBean;
use crate::error::{ManagementError, Result};

/// The registry the facade hands built beans to.
pub trait BeanServer: Send + Sync {
    /// Store a bean under a name. Fails with
    /// [`ManagementError::AlreadyExists`] if the name is taken.
    fn register(&self, name: &str, bean: Arc<DynamicBean>) -> Result<()>;

    /// Remove a bean by name. Removing an unknown name is not an error.
    fn unregister(&self, name: &str) -> Result<()>;

    /// Check whether a name is registered.
    fn is_registered(&self, name: &str) -> Result<bool>;
}

/// In-process bean server backed by a concurrent map.
pub struct LocalBeanServer {
    beans: DashMap<String, Arc<DynamicBean>>,
}

impl LocalBeanServer {
    /// Create an empty server.
    pub fn new() -> Self {
        Self {
            beans: DashMap::new(),
        }
    }

    /// Fetch a registered bean for dispatch.
    pub fn lookup(&self, name: &str) -> Option<Arc<DynamicBean>> {
        self.beans.get(name).map(|entry| entry.value().clone())
    }

    /// The registered names, in no particular order.
    pub fn names(&self) -> Vec<String> {
        self.beans.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Number of registered beans.
    pub fn len(&self) -> usize {
        self.beans.len()
    }

    /// Check if no beans are registered.
    pub fn is_empty(&self) -> bool {
        self.beans.is_empty()
    }
}

impl Default for LocalBeanServer {
    fn default() -> Self {
        Self::new()
    }
}

impl BeanServer for LocalBeanServer {
    fn register(&self, name: &str, bean: Arc<DynamicBean>) -> Result<()> {
        match self.beans.entry(name.to_string()) {
            Entry::Occupied(_) => Err(ManagementError::AlreadyExists(name.to_string())),
            Entry::Vacant(entry) => {
                entry.insert(bean);
                Ok(())
            }
        }
    }

    fn unregister(&self, name: &str) -> Result<()> {
        self.beans.remove(name);
        Ok(())
    }

    fn is_registered(&self, name: &str) -> Result<bool> {
        Ok(self.beans.contains_key(name))
    }
}
