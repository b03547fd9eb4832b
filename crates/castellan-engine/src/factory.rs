//! Bean factory — builds descriptors from class declarations
//!
//! This is the classification core. Each declared method is inspected once:
//! a method carrying both markers is a configuration error; an operation
//! marker always yields exactly one [`OperationInfo`]; an attribute marker
//! is classified as getter or setter by naming convention, paired with its
//! missing counterpart, and folded into a deduplicated attribute list with
//! computed readable/writable flags.

use std::sync::Arc;

use log::debug;
use rustc_hash::FxHashMap;

use crate::bean::DynamicBean;
use crate::decl::{AttributeMarker, ClassDecl, MethodDecl, OperationMarker};
use crate::error::{ManagementError, Result};
use crate::info::{AttributeInfo, BeanInfo, OperationInfo, ParameterInfo};
use crate::naming::{capitalize, decapitalize};
use crate::registry::ClassRegistry;
use crate::resolver::InstanceResolver;
use crate::types::TypeRegistry;

/// Factory of dynamic beans.
///
/// Users can call [`BeanFactory::build_info`] directly to inspect the
/// descriptor a declaration produces; the preferred entry point is the
/// `Management` facade, which uses this factory internally.
pub struct BeanFactory;

impl BeanFactory {
    /// Build a descriptor and pair it with a resolver into a dispatchable
    /// bean.
    pub fn create(
        class: &ClassDecl,
        resolver: Box<dyn InstanceResolver>,
        classes: Arc<ClassRegistry>,
        types: Arc<TypeRegistry>,
    ) -> Result<DynamicBean> {
        let info = Self::build_info(class)?;
        Ok(DynamicBean::new(info, resolver, classes, types))
    }

    /// Build the immutable descriptor for a class declaration.
    pub fn build_info(class: &ClassDecl) -> Result<BeanInfo> {
        let mut scan = MethodScan::new(class);
        for method in class.methods() {
            scan.handle_method(method)?;
        }
        let (attributes, operations) = scan.finish();
        debug!(
            "built descriptor for {}: {} attributes, {} operations",
            class.type_name(),
            attributes.len(),
            operations.len()
        );
        Ok(BeanInfo {
            type_name: class.type_name().to_string(),
            description: class.description().to_string(),
            attributes,
            operations,
        })
    }
}

/// Accumulates attribute and operation descriptors over one pass through a
/// declaration's methods. The attribute relation is not 1:1 — an attribute
/// that ends up neither readable nor writable is dropped; operations are
/// 1:1 with marked methods.
struct MethodScan<'a> {
    class: &'a ClassDecl,
    attributes: Vec<AttributeInfo>,
    operations: Vec<OperationInfo>,
}

impl<'a> MethodScan<'a> {
    fn new(class: &'a ClassDecl) -> Self {
        Self {
            class,
            attributes: Vec::new(),
            operations: Vec::new(),
        }
    }

    fn finish(self) -> (Vec<AttributeInfo>, Vec<OperationInfo>) {
        (self.attributes, self.operations)
    }

    fn handle_method(&mut self, method: &'a MethodDecl) -> Result<()> {
        match (method.attribute_marker(), method.operation_marker()) {
            (Some(_), Some(_)) => Err(ManagementError::Configuration(format!(
                "method {} cannot carry both attribute and operation markers",
                method.name()
            ))),
            (Some(marker), None) => self.handle_attribute(method, marker),
            (None, Some(marker)) => self.handle_operation(method, marker),
            (None, None) => Ok(()),
        }
    }

    fn handle_attribute(&mut self, method: &'a MethodDecl, marker: &AttributeMarker) -> Result<()> {
        // the marked method is not necessarily a valid accessor
        let mut getter = is_getter(method).then_some(method);
        let mut setter = is_setter(method).then_some(method);

        if getter.is_none() && setter.is_none() {
            return Err(ManagementError::Configuration(format!(
                "method {} is marked as an attribute but is not a valid getter or setter",
                method.name()
            )));
        }

        let attribute_name = accessor_attribute_name(method.name());
        if attribute_name.is_empty() {
            return Err(ManagementError::Configuration(format!(
                "method {} derives an empty attribute name",
                method.name()
            )));
        }

        // setter parameter type wins, else the getter return type
        let attribute_type = if setter.is_some() {
            method.params()[0].clone()
        } else {
            method.return_type().to_string()
        };

        // locate the missing counterpart; absence is not an error
        if getter.is_none() {
            getter = self.find_getter(&attribute_name);
        }
        if setter.is_none() {
            setter = self.find_setter(&attribute_name, &attribute_type);
        }

        if self.exists_attribute(&attribute_name, &attribute_type) {
            return Err(ManagementError::Configuration(format!(
                "both getter and setter are marked for attribute {}; remove one of the markers",
                attribute_name
            )));
        }

        let readable = marker.readable && getter.is_some();
        let writable = marker.writable && setter.is_some();
        let is_style = getter.map(|g| g.name().starts_with("is")).unwrap_or(false);

        // neither readable nor writable: the attribute is dropped, not an error
        if readable || writable {
            self.attributes.push(AttributeInfo {
                name: attribute_name,
                type_name: attribute_type,
                description: marker.description.clone(),
                readable,
                writable,
                is_style,
            });
        }

        Ok(())
    }

    fn handle_operation(&mut self, method: &MethodDecl, marker: &OperationMarker) -> Result<()> {
        let parameters = build_parameters(method)?;
        self.operations.push(OperationInfo {
            name: method.name().to_string(),
            description: marker.description.clone(),
            parameters,
            return_type: method.return_type().to_string(),
            impact: marker.impact,
        });
        Ok(())
    }

    fn find_getter(&self, attribute_name: &str) -> Option<&'a MethodDecl> {
        let capitalized = capitalize(attribute_name);
        self.class
            .find_zero_arg(&format!("get{}", capitalized))
            .or_else(|| self.class.find_zero_arg(&format!("is{}", capitalized)))
    }

    fn find_setter(&self, attribute_name: &str, attribute_type: &str) -> Option<&'a MethodDecl> {
        self.class
            .find_setter(&format!("set{}", capitalize(attribute_name)), attribute_type)
    }

    fn exists_attribute(&self, name: &str, type_name: &str) -> bool {
        self.attributes
            .iter()
            .any(|a| a.name == name && a.type_name == type_name)
    }
}

fn is_getter(method: &MethodDecl) -> bool {
    (method.name().starts_with("get") || method.name().starts_with("is"))
        && method.params().is_empty()
        && !method.is_void()
}

fn is_setter(method: &MethodDecl) -> bool {
    method.name().starts_with("set") && method.is_void() && method.params().len() == 1
}

fn accessor_attribute_name(method_name: &str) -> String {
    let stripped = if method_name.starts_with("is") {
        &method_name[2..]
    } else {
        &method_name[3..]
    };
    decapitalize(stripped)
}

/// Build the positional parameter descriptors of an operation, applying
/// `p<index>=name;description` descriptor fields.
fn build_parameters(method: &MethodDecl) -> Result<Vec<ParameterInfo>> {
    let mut names: FxHashMap<String, String> = FxHashMap::default();
    let mut descriptions: FxHashMap<String, String> = FxHashMap::default();

    for field in method.descriptor_fields() {
        let (key_value, description) = match field.split_once(';') {
            Some((key_value, description)) => (key_value, description),
            None => (field.as_str(), ""),
        };
        let (key, value) = key_value.split_once('=').ok_or_else(|| {
            ManagementError::Configuration(format!(
                "malformed descriptor field {:?} on method {}",
                field,
                method.name()
            ))
        })?;
        names.insert(key.to_string(), value.to_string());
        descriptions.insert(key.to_string(), description.to_string());
    }

    Ok(method
        .params()
        .iter()
        .enumerate()
        .map(|(index, type_name)| {
            let key = format!("p{}", index);
            ParameterInfo {
                name: names.get(&key).cloned().unwrap_or_else(|| key.clone()),
                type_name: type_name.clone(),
                description: descriptions.get(&key).cloned().unwrap_or_default(),
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::info::Impact;
    use castellan_sdk::{bind, ManagedValue, MethodHandle};

    struct Counter;

    fn noop() -> MethodHandle {
        bind(|_: &Counter, _args| Ok(ManagedValue::Unit))
    }

    fn getter(name: &str, type_name: &str) -> MethodDecl {
        MethodDecl::new(name, noop()).returns(type_name)
    }

    fn setter(name: &str, type_name: &str) -> MethodDecl {
        MethodDecl::new(name, noop()).param(type_name)
    }

    #[test]
    fn test_read_write_pair() {
        let class = ClassDecl::new::<Counter>("Counter")
            .method(getter("getCounter", "i32").attribute(AttributeMarker::new()))
            .method(setter("setCounter", "i32"));

        let info = BeanFactory::build_info(&class).unwrap();
        assert_eq!(info.attributes.len(), 1);
        let attribute = &info.attributes[0];
        assert_eq!(attribute.name, "counter");
        assert_eq!(attribute.type_name, "i32");
        assert!(attribute.readable);
        assert!(attribute.writable);
        assert!(!attribute.is_style);
    }

    #[test]
    fn test_marked_setter_finds_getter() {
        let class = ClassDecl::new::<Counter>("Counter")
            .method(getter("getCounter", "i32"))
            .method(setter("setCounter", "i32").attribute(AttributeMarker::new()));

        let info = BeanFactory::build_info(&class).unwrap();
        assert_eq!(info.attributes.len(), 1);
        assert!(info.attributes[0].readable);
        assert!(info.attributes[0].writable);
    }

    #[test]
    fn test_boolean_style_getter() {
        let class = ClassDecl::new::<Counter>("Counter")
            .method(getter("isRunning", "bool").attribute(AttributeMarker::new()));

        let info = BeanFactory::build_info(&class).unwrap();
        let attribute = &info.attributes[0];
        assert_eq!(attribute.name, "running");
        assert!(attribute.is_style);
        assert!(attribute.readable);
        assert!(!attribute.writable);
    }

    #[test]
    fn test_not_readable_getter_only_is_dropped() {
        let class = ClassDecl::new::<Counter>("Counter")
            .method(getter("getCounter", "i32").attribute(AttributeMarker::new().readable(false)));

        let info = BeanFactory::build_info(&class).unwrap();
        assert!(info.attributes.is_empty());
    }

    #[test]
    fn test_read_only_attribute() {
        let class = ClassDecl::new::<Counter>("Counter")
            .method(getter("getCounter", "i32").attribute(AttributeMarker::new()));

        let info = BeanFactory::build_info(&class).unwrap();
        let attribute = &info.attributes[0];
        assert!(attribute.readable);
        assert!(!attribute.writable);
    }

    #[test]
    fn test_write_only_attribute() {
        let class = ClassDecl::new::<Counter>("Counter")
            .method(setter("setCounter", "i32").attribute(AttributeMarker::new()));

        let info = BeanFactory::build_info(&class).unwrap();
        let attribute = &info.attributes[0];
        assert!(!attribute.readable);
        assert!(attribute.writable);
    }

    #[test]
    fn test_both_markers_rejected() {
        let class = ClassDecl::new::<Counter>("Counter").method(
            getter("getCounter", "i32")
                .attribute(AttributeMarker::new())
                .operation(OperationMarker::new()),
        );

        let err = BeanFactory::build_info(&class).unwrap_err();
        assert!(matches!(err, ManagementError::Configuration(_)));
    }

    #[test]
    fn test_marker_on_non_accessor_rejected() {
        // one parameter and a non-void return is neither getter nor setter
        let class = ClassDecl::new::<Counter>("Counter").method(
            MethodDecl::new("getThings", noop())
                .param("i32")
                .returns("i32")
                .attribute(AttributeMarker::new()),
        );

        let err = BeanFactory::build_info(&class).unwrap_err();
        assert!(matches!(err, ManagementError::Configuration(_)));
    }

    #[test]
    fn test_doubly_marked_accessor_pair_rejected() {
        let class = ClassDecl::new::<Counter>("Counter")
            .method(getter("getCounter", "i32").attribute(AttributeMarker::new()))
            .method(setter("setCounter", "i32").attribute(AttributeMarker::new()));

        let err = BeanFactory::build_info(&class).unwrap_err();
        assert!(matches!(err, ManagementError::Configuration(_)));
    }

    #[test]
    fn test_empty_attribute_name_rejected() {
        let class = ClassDecl::new::<Counter>("Counter")
            .method(getter("get", "i32").attribute(AttributeMarker::new()));

        let err = BeanFactory::build_info(&class).unwrap_err();
        assert!(matches!(err, ManagementError::Configuration(_)));
    }

    #[test]
    fn test_operations_one_per_marked_method() {
        let class = ClassDecl::new::<Counter>("Counter")
            .method(
                MethodDecl::new("resetCounter", noop())
                    .operation(OperationMarker::new().impact(Impact::Action)),
            )
            .method(
                MethodDecl::new("addCounter", noop())
                    .param("i32")
                    .returns("bool")
                    .operation(OperationMarker::new().impact(Impact::Action)),
            );

        let info = BeanFactory::build_info(&class).unwrap();
        assert_eq!(info.operations.len(), 2);
        assert_eq!(info.operations[0].name, "resetCounter");
        assert_eq!(info.operations[0].return_type, "()");
        assert!(info.operations[0].parameters.is_empty());
        assert_eq!(info.operations[1].name, "addCounter");
        assert_eq!(info.operations[1].parameters.len(), 1);
        assert_eq!(info.operations[1].parameters[0].name, "p0");
        assert_eq!(info.operations[1].impact, Impact::Action);
    }

    #[test]
    fn test_overloads_not_deduplicated() {
        let class = ClassDecl::new::<Counter>("Counter")
            .method(MethodDecl::new("tick", noop()).operation(OperationMarker::new()))
            .method(
                MethodDecl::new("tick", noop())
                    .param("i32")
                    .operation(OperationMarker::new()),
            );

        let info = BeanFactory::build_info(&class).unwrap();
        assert_eq!(info.operations.len(), 2);
    }

    #[test]
    fn test_descriptor_fields_name_parameters() {
        let class = ClassDecl::new::<Counter>("Counter").method(
            MethodDecl::new("addCounter", noop())
                .param("i32")
                .param("bool")
                .returns("bool")
                .operation(OperationMarker::new())
                .descriptor_field("p0=amount;the amount to add")
                .descriptor_field("p1=saturating"),
        );

        let info = BeanFactory::build_info(&class).unwrap();
        let parameters = &info.operations[0].parameters;
        assert_eq!(parameters[0].name, "amount");
        assert_eq!(parameters[0].description, "the amount to add");
        assert_eq!(parameters[1].name, "saturating");
        assert_eq!(parameters[1].description, "");
    }

    #[test]
    fn test_malformed_descriptor_field_rejected() {
        let class = ClassDecl::new::<Counter>("Counter").method(
            MethodDecl::new("addCounter", noop())
                .param("i32")
                .operation(OperationMarker::new())
                .descriptor_field("p0;no key value pair"),
        );

        let err = BeanFactory::build_info(&class).unwrap_err();
        assert!(matches!(err, ManagementError::Configuration(_)));
    }

    #[test]
    fn test_class_description_carried() {
        let class = ClassDecl::new::<Counter>("Counter").describe("Annotated");
        let info = BeanFactory::build_info(&class).unwrap();
        assert_eq!(info.type_name, "Counter");
        assert_eq!(info.description, "Annotated");
        assert!(info.attributes.is_empty());
        assert!(info.operations.is_empty());
    }
}
