//! Management facade
//!
//! The embedding-facing entry point: register an object under a name and it
//! becomes a dispatchable bean in the configured server. Descriptors are
//! built eagerly at registration time from the concrete runtime type of the
//! target (or of whatever a supplied resolver currently yields), never from
//! a statically declared type.

use std::any::Any;
use std::sync::Arc;

use log::debug;

use crate::decl::ClassDecl;
use crate::error::{ManagementError, Result};
use crate::factory::BeanFactory;
use crate::registry::ClassRegistry;
use crate::resolver::{FixedResolver, InstanceResolver};
use crate::server::BeanServer;
use crate::types::TypeRegistry;

/// Registers and unregisters managed objects as beans.
pub struct Management {
    classes: Arc<ClassRegistry>,
    types: Arc<TypeRegistry>,
    server: Arc<dyn BeanServer>,
}

impl Management {
    /// Create a facade over the given registries and server handle.
    pub fn new(
        classes: Arc<ClassRegistry>,
        types: Arc<TypeRegistry>,
        server: Arc<dyn BeanServer>,
    ) -> Self {
        Self {
            classes,
            types,
            server,
        }
    }

    /// Expose `target` as a bean under `name`.
    ///
    /// The descriptor is built from the target's concrete runtime type; the
    /// instance itself is captured in a fixed resolver. Fails with
    /// [`ManagementError::AlreadyExists`] if the name is taken and with
    /// [`ManagementError::Configuration`] if the target's type has no class
    /// declaration or a declaration that does not classify.
    pub fn register(&self, target: Arc<dyn Any + Send + Sync>, name: &str) -> Result<()> {
        validate_name(name)?;
        let class = self.class_of(&target)?;
        let bean = BeanFactory::create(
            class.as_ref(),
            Box::new(FixedResolver::new(target)),
            self.classes.clone(),
            self.types.clone(),
        )?;
        debug!("registering {} as {}", class.type_name(), name);
        self.server.register(name, Arc::new(bean))
    }

    /// Expose a lazily resolved instance as a bean under `name`.
    ///
    /// The resolver is consulted once, eagerly, to discover the concrete
    /// runtime type the descriptor is built from; afterwards it is consulted
    /// on every dispatch.
    pub fn register_with_resolver(
        &self,
        resolver: Box<dyn InstanceResolver>,
        name: &str,
    ) -> Result<()> {
        validate_name(name)?;
        let probe = resolver.resolve();
        let class = self.class_of(&probe)?;
        let bean = BeanFactory::create(
            class.as_ref(),
            resolver,
            self.classes.clone(),
            self.types.clone(),
        )?;
        debug!("registering resolved {} as {}", class.type_name(), name);
        self.server.register(name, Arc::new(bean))
    }

    /// Remove the bean registered under `name`. Unknown names are not an
    /// error.
    pub fn unregister(&self, name: &str) -> Result<()> {
        validate_name(name)?;
        debug!("unregistering {}", name);
        self.server.unregister(name)
    }

    /// Check whether `name` is registered.
    pub fn is_registered(&self, name: &str) -> Result<bool> {
        validate_name(name)?;
        self.server.is_registered(name)
    }

    fn class_of(&self, target: &Arc<dyn Any + Send + Sync>) -> Result<Arc<ClassDecl>> {
        self.classes.get((**target).type_id()).ok_or_else(|| {
            ManagementError::Configuration(
                "no managed class declared for the target's runtime type".to_string(),
            )
        })
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(ManagementError::Registration("no name specified".to_string()));
    }
    Ok(())
}
