//! Managed class declarations
//!
//! A [`ClassDecl`] is the static declaration a managed type brings to the
//! metadata builder: the concrete Rust type's identity, an exposed type
//! name, a description, and the exposed methods (marked or not — unmarked
//! methods still participate in getter/setter counterpart search and in
//! dispatch-time lookup).

use std::any::{Any, TypeId};

use super::method::MethodDecl;

/// Declaration of a managed class for a concrete Rust type.
pub struct ClassDecl {
    type_name: String,
    type_id: TypeId,
    description: String,
    methods: Vec<MethodDecl>,
}

impl ClassDecl {
    /// Declare a managed class for `T` under an exposed type name.
    pub fn new<T: Any>(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            type_id: TypeId::of::<T>(),
            description: String::new(),
            methods: Vec::new(),
        }
    }

    /// Attach a description.
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Append an exposed method.
    pub fn method(mut self, method: MethodDecl) -> Self {
        self.methods.push(method);
        self
    }

    /// The exposed type name.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The concrete Rust type identity this declaration is bound to.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// The class description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The exposed methods, in declaration order.
    pub fn methods(&self) -> &[MethodDecl] {
        &self.methods
    }

    /// Find a zero-parameter method by exposed name (getter lookup).
    pub fn find_zero_arg(&self, name: &str) -> Option<&MethodDecl> {
        self.methods
            .iter()
            .find(|m| m.name() == name && m.params().is_empty())
    }

    /// Find a one-parameter method by exposed name and parameter type name
    /// (setter lookup).
    pub fn find_setter(&self, name: &str, type_name: &str) -> Option<&MethodDecl> {
        self.methods
            .iter()
            .find(|m| m.name() == name && m.params() == [type_name])
    }
}

impl std::fmt::Debug for ClassDecl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassDecl")
            .field("type_name", &self.type_name)
            .field("methods", &self.methods.len())
            .finish()
    }
}
