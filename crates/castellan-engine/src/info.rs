//! Bean descriptors
//!
//! The structural metadata built once per managed type and shared read-only
//! with the bean server and external callers. Serialization produces the
//! boundary shape consumed by management front ends (camelCase keys, `type`
//! for type names, upper-case impact values).

use serde::{Deserialize, Serialize};

/// Advisory classification of an operation's side-effect category.
///
/// Informational only; dispatch never consults it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Impact {
    /// The operation mutates the target
    Action,
    /// The operation only reads information
    Info,
    /// The operation both mutates and reads
    ActionInfo,
    /// Unclassified
    Unknown,
}

impl Default for Impact {
    fn default() -> Self {
        Impact::Unknown
    }
}

/// Descriptor of one managed attribute.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeInfo {
    /// Canonical attribute name (accessor prefix stripped, decapitalized)
    pub name: String,
    /// Declared type name
    #[serde(rename = "type")]
    pub type_name: String,
    /// Free-text description
    pub description: String,
    /// Whether reads are exposed
    pub readable: bool,
    /// Whether writes are exposed
    pub writable: bool,
    /// Whether the getter uses the `is` prefix (affects dispatch lookup)
    #[serde(rename = "isBooleanStyle")]
    pub is_style: bool,
}

/// Descriptor of one managed operation parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterInfo {
    /// Parameter name (`p<index>` unless overridden by a descriptor field)
    pub name: String,
    /// Declared type name
    #[serde(rename = "type")]
    pub type_name: String,
    /// Free-text description
    pub description: String,
}

/// Descriptor of one managed operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationInfo {
    /// Exposed method name, case preserved
    pub name: String,
    /// Free-text description
    pub description: String,
    /// Positional parameters
    pub parameters: Vec<ParameterInfo>,
    /// Declared return type name
    pub return_type: String,
    /// Advisory impact classification
    pub impact: Impact,
}

/// Descriptor of a managed type: everything the bean server needs to expose
/// it. Built once at registration time, never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeanInfo {
    /// Exposed type name
    pub type_name: String,
    /// Free-text description
    pub description: String,
    /// Managed attributes; names are unique within the set
    pub attributes: Vec<AttributeInfo>,
    /// Managed operations; one entry per marked method, overloads included
    pub operations: Vec<OperationInfo>,
}

impl BeanInfo {
    /// Find an attribute descriptor by name.
    pub fn attribute(&self, name: &str) -> Option<&AttributeInfo> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Iterate the operation descriptors sharing a name, in build order.
    pub fn operations_named<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a OperationInfo> {
        self.operations.iter().filter(move |op| op.name == name)
    }
}
