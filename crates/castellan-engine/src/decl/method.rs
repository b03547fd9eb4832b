//! Method declarations and markers
//!
//! A [`MethodDecl`] describes one exposed method: its name, signature (as
//! canonical type names), optional attribute/operation markers, optional
//! descriptor-field strings, and the bound handle that actually invokes the
//! method on a concrete receiver. Markers are plain data; a method may carry
//! both so the metadata builder can detect and reject the conflict.

use castellan_sdk::MethodHandle;

use crate::info::Impact;

/// Marks a method as a managed attribute accessor.
#[derive(Debug, Clone)]
pub struct AttributeMarker {
    /// Whether the attribute should be readable (defaults to true; only
    /// effective when a getter exists)
    pub readable: bool,
    /// Whether the attribute should be writable (defaults to true; only
    /// effective when a setter exists)
    pub writable: bool,
    /// Free-text description carried into the descriptor
    pub description: String,
}

impl AttributeMarker {
    /// Create a marker with the defaults: readable, writable, no
    /// description.
    pub fn new() -> Self {
        Self {
            readable: true,
            writable: true,
            description: String::new(),
        }
    }

    /// Override the readable flag.
    pub fn readable(mut self, readable: bool) -> Self {
        self.readable = readable;
        self
    }

    /// Override the writable flag.
    pub fn writable(mut self, writable: bool) -> Self {
        self.writable = writable;
        self
    }

    /// Attach a description.
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

impl Default for AttributeMarker {
    fn default() -> Self {
        Self::new()
    }
}

/// Marks a method as a managed operation.
#[derive(Debug, Clone, Default)]
pub struct OperationMarker {
    /// Advisory impact classification (defaults to [`Impact::Unknown`])
    pub impact: Impact,
    /// Free-text description carried into the descriptor
    pub description: String,
}

impl OperationMarker {
    /// Create a marker with the defaults: unknown impact, no description.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the impact classification.
    pub fn impact(mut self, impact: Impact) -> Self {
        self.impact = impact;
        self
    }

    /// Attach a description.
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Declaration of one exposed method on a managed class.
pub struct MethodDecl {
    name: String,
    params: Vec<String>,
    return_type: String,
    attribute: Option<AttributeMarker>,
    operation: Option<OperationMarker>,
    descriptor_fields: Vec<String>,
    handle: MethodHandle,
}

impl MethodDecl {
    /// Declare a method with its exposed name and bound handle. The return
    /// type defaults to `()`.
    pub fn new(name: impl Into<String>, handle: MethodHandle) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            return_type: "()".to_string(),
            attribute: None,
            operation: None,
            descriptor_fields: Vec::new(),
            handle,
        }
    }

    /// Append a positional parameter by canonical type name.
    pub fn param(mut self, type_name: impl Into<String>) -> Self {
        self.params.push(type_name.into());
        self
    }

    /// Set the return type by canonical type name.
    pub fn returns(mut self, type_name: impl Into<String>) -> Self {
        self.return_type = type_name.into();
        self
    }

    /// Attach an attribute marker.
    pub fn attribute(mut self, marker: AttributeMarker) -> Self {
        self.attribute = Some(marker);
        self
    }

    /// Attach an operation marker.
    pub fn operation(mut self, marker: OperationMarker) -> Self {
        self.operation = Some(marker);
        self
    }

    /// Append a `p<index>=name;description` descriptor field used to name
    /// operation parameters.
    pub fn descriptor_field(mut self, field: impl Into<String>) -> Self {
        self.descriptor_fields.push(field.into());
        self
    }

    /// The exposed method name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Positional parameter type names.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// The declared return type name.
    pub fn return_type(&self) -> &str {
        &self.return_type
    }

    /// Whether the method returns nothing.
    pub fn is_void(&self) -> bool {
        self.return_type == "()"
    }

    /// The attribute marker, if any.
    pub fn attribute_marker(&self) -> Option<&AttributeMarker> {
        self.attribute.as_ref()
    }

    /// The operation marker, if any.
    pub fn operation_marker(&self) -> Option<&OperationMarker> {
        self.operation.as_ref()
    }

    /// The descriptor-field strings attached to this method.
    pub fn descriptor_fields(&self) -> &[String] {
        &self.descriptor_fields
    }

    /// The bound handle invoked by the dispatcher.
    pub fn handle(&self) -> &MethodHandle {
        &self.handle
    }
}

impl std::fmt::Debug for MethodDecl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MethodDecl")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("return_type", &self.return_type)
            .field("attribute", &self.attribute)
            .field("operation", &self.operation)
            .finish()
    }
}
