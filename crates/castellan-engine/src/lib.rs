//! Castellan Engine
//!
//! This crate turns declared objects into dynamically introspected
//! management beans:
//! - **Declarations**: static descriptions of a type's exposed methods with
//!   markers and bound handles (`decl` module)
//! - **Metadata builder**: classifies declared methods into attributes and
//!   operations and produces the immutable descriptor (`factory` module)
//! - **Dispatch**: attribute get/set and operation invocation against a
//!   lazily resolved instance (`bean`, `resolver` modules)
//! - **Registration**: facade and injected bean-server boundary
//!   (`management`, `server` modules)
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use castellan_engine::{
//!     AttributeMarker, ClassDecl, ClassRegistry, LocalBeanServer, Management,
//!     MethodDecl, TypeRegistry,
//! };
//! use castellan_sdk::{bind, ManagedValue};
//!
//! let classes = Arc::new(ClassRegistry::new());
//! classes.register(
//!     ClassDecl::new::<Counter>("Counter").method(
//!         MethodDecl::new("getCounter", bind(|c: &Counter, _| Ok(c.get().into())))
//!             .returns("i32")
//!             .attribute(AttributeMarker::new()),
//!     ),
//! );
//!
//! let server = Arc::new(LocalBeanServer::new());
//! let management = Management::new(classes, Arc::new(TypeRegistry::with_defaults()), server.clone());
//! management.register(Arc::new(Counter::default()), "org.app:type=Counter")?;
//!
//! let bean = server.lookup("org.app:type=Counter").unwrap();
//! let value = bean.get_attribute("counter")?;
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod bean;
pub mod decl;
pub mod error;
pub mod factory;
pub mod info;
pub mod management;
pub mod naming;
pub mod registry;
pub mod resolver;
pub mod server;
pub mod types;

pub use bean::{Attribute, DynamicBean};
pub use decl::{AttributeMarker, ClassDecl, MethodDecl, OperationMarker};
pub use error::{ManagementError, Result};
pub use factory::BeanFactory;
pub use info::{AttributeInfo, BeanInfo, Impact, OperationInfo, ParameterInfo};
pub use management::Management;
pub use registry::ClassRegistry;
pub use resolver::{ComputedResolver, FixedResolver, InstanceResolver};
pub use server::{BeanServer, LocalBeanServer};
pub use types::{is_assignable, primitive, TypeRegistry, TypeToken};

// Re-export SDK types (canonical definitions live in castellan-sdk)
pub use castellan_sdk::{
    arg, bind, expect_args, CallError, CallResult, FromManaged, IntoManaged, ManagedValue,
    MethodHandle,
};
