//! Dynamic bean — attribute and operation dispatch
//!
//! A [`DynamicBean`] pairs an immutable descriptor with an instance
//! resolver. Every call re-resolves the target, looks the accessor or
//! operation up on the *resolved instance's* runtime type, and invokes the
//! bound handle. Nothing is cached from build time besides the descriptor
//! itself, so resolvers whose resolved object varies between calls keep
//! working as long as the current type's declaration exposes the expected
//! member.

use std::any::Any;
use std::sync::Arc;

use castellan_sdk::ManagedValue;
use log::trace;

use crate::decl::{ClassDecl, MethodDecl};
use crate::error::{ManagementError, Result};
use crate::info::BeanInfo;
use crate::naming::capitalize;
use crate::registry::ClassRegistry;
use crate::resolver::InstanceResolver;
use crate::types::{is_assignable, TypeRegistry, TypeToken};

/// A named attribute value, as exchanged across the dispatch boundary.
#[derive(Debug, Clone)]
pub struct Attribute {
    /// Attribute name
    pub name: String,
    /// Attribute value
    pub value: ManagedValue,
}

impl Attribute {
    /// Pair a name with a value.
    pub fn new(name: impl Into<String>, value: ManagedValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// The dispatchable form of a managed object: descriptor + resolver.
pub struct DynamicBean {
    info: BeanInfo,
    resolver: Box<dyn InstanceResolver>,
    classes: Arc<ClassRegistry>,
    types: Arc<TypeRegistry>,
}

impl DynamicBean {
    pub(crate) fn new(
        info: BeanInfo,
        resolver: Box<dyn InstanceResolver>,
        classes: Arc<ClassRegistry>,
        types: Arc<TypeRegistry>,
    ) -> Self {
        Self {
            info,
            resolver,
            classes,
            types,
        }
    }

    /// The descriptor this bean was built with.
    pub fn info(&self) -> &BeanInfo {
        &self.info
    }

    /// Read one attribute from the resolved instance.
    pub fn get_attribute(&self, name: &str) -> Result<ManagedValue> {
        let attribute = self.info.attribute(name).ok_or_else(|| {
            ManagementError::NotFound(format!(
                "attribute {} in {}",
                name, self.info.type_name
            ))
        })?;

        let target = self.resolver.resolve();
        let class = self.runtime_class(&target).ok_or_else(|| {
            ManagementError::NotFound(format!(
                "no managed class declared for the resolved instance of {}",
                self.info.type_name
            ))
        })?;

        let prefix = if attribute.is_style { "is" } else { "get" };
        let getter_name = format!("{}{}", prefix, capitalize(name));
        let getter = class.find_zero_arg(&getter_name).ok_or_else(|| {
            ManagementError::NotFound(format!(
                "attribute {} or equivalent getter {} in {}",
                name,
                getter_name,
                class.type_name()
            ))
        })?;

        self.call(getter, &target, &[])
    }

    /// Read several attributes in input order. The batch aborts on the
    /// first failure; an empty input yields an empty result.
    pub fn get_attributes(&self, names: &[&str]) -> Result<Vec<Attribute>> {
        let mut result = Vec::with_capacity(names.len());
        for name in names {
            let value = self.get_attribute(name)?;
            result.push(Attribute::new(*name, value));
        }
        Ok(result)
    }

    /// Write one attribute on the resolved instance.
    pub fn set_attribute(&self, name: &str, value: ManagedValue) -> Result<()> {
        let attribute = self.info.attribute(name).ok_or_else(|| {
            ManagementError::NotFound(format!(
                "attribute {} in {}",
                name, self.info.type_name
            ))
        })?;

        if value.is_unit() {
            return Err(ManagementError::InvalidValue(format!(
                "cannot set attribute {} to the unit value",
                name
            )));
        }

        let declared = self.resolve_type(&attribute.type_name)?;
        if declared.id() != value.runtime_type_id() {
            let got = self
                .types
                .name_of(value.runtime_type_id())
                .unwrap_or_else(|| value.type_name().to_string());
            return Err(ManagementError::InvalidValue(format!(
                "cannot set attribute {} to a {} value, {} expected",
                name,
                got,
                declared.name()
            )));
        }

        let target = self.resolver.resolve();
        let class = self.runtime_class(&target).ok_or_else(|| {
            ManagementError::NotFound(format!(
                "no managed class declared for the resolved instance of {}",
                self.info.type_name
            ))
        })?;

        let setter_name = format!("set{}", capitalize(name));
        let setter = class
            .find_setter(&setter_name, &attribute.type_name)
            .ok_or_else(|| {
                ManagementError::NotFound(format!(
                    "setter {} for attribute {} in {}",
                    setter_name,
                    name,
                    class.type_name()
                ))
            })?;

        let args = [value];
        self.call(setter, &target, &args)?;
        Ok(())
    }

    /// Write several attributes in list order, re-reading each one to build
    /// the confirmation list. Aborts on the first failure; writes already
    /// performed are not rolled back.
    pub fn set_attributes(&self, attributes: Vec<Attribute>) -> Result<Vec<Attribute>> {
        let mut result = Vec::with_capacity(attributes.len());
        for attribute in attributes {
            self.set_attribute(&attribute.name, attribute.value)?;
            let value = self.get_attribute(&attribute.name)?;
            result.push(Attribute::new(attribute.name, value));
        }
        Ok(result)
    }

    /// Invoke an operation by name and signature.
    ///
    /// The descriptor is matched first (name plus assignable signature,
    /// first match in build order); the method is then located on the
    /// resolved instance's runtime type using the *exact* requested
    /// signature.
    pub fn invoke(
        &self,
        name: &str,
        args: &[ManagedValue],
        signature: &[&str],
    ) -> Result<ManagedValue> {
        trace!(
            "invoke {} on {} with {} argument(s)",
            name,
            self.info.type_name,
            args.len()
        );

        if !self.has_matching_operation(name, signature)? {
            return Err(ManagementError::NotFound(format!(
                "operation {} with the supplied signature in {}",
                name, self.info.type_name
            )));
        }

        let target = self.resolver.resolve();
        let class = self.runtime_class(&target).ok_or_else(|| {
            ManagementError::Reflection(format!(
                "no managed class declared for the resolved instance of {}",
                self.info.type_name
            ))
        })?;

        let method = self.locate_exact(class.as_ref(), name, signature)?;
        self.call(method, &target, args)
    }

    /// First operation descriptor (in build order) whose name matches and
    /// whose declared parameter types are assignable from the caller's
    /// signature. Declared-type resolution failures surface here, but only
    /// for candidates that match by name and arity.
    fn has_matching_operation(&self, name: &str, signature: &[&str]) -> Result<bool> {
        for operation in &self.info.operations {
            if operation.name != name || operation.parameters.len() != signature.len() {
                continue;
            }
            let mut assignable = true;
            for (declared, received) in operation.parameters.iter().zip(signature) {
                let to = self.resolve_type(&declared.type_name)?;
                let from = self.resolve_type(received)?;
                if !is_assignable(&to, &from) {
                    assignable = false;
                    break;
                }
            }
            if assignable {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Locate the declared method whose name and parameter types match the
    /// requested signature exactly.
    fn locate_exact<'c>(
        &self,
        class: &'c ClassDecl,
        name: &str,
        signature: &[&str],
    ) -> Result<&'c MethodDecl> {
        let mut requested = Vec::with_capacity(signature.len());
        for type_name in signature {
            requested.push(self.resolve_type(type_name)?);
        }

        'methods: for method in class.methods() {
            if method.name() != name || method.params().len() != requested.len() {
                continue;
            }
            for (declared, token) in method.params().iter().zip(&requested) {
                let declared_token = self.resolve_type(declared)?;
                if declared_token.id() != token.id() {
                    continue 'methods;
                }
            }
            return Ok(method);
        }

        Err(ManagementError::Reflection(format!(
            "cannot find method {} with the requested signature in {}",
            name,
            class.type_name()
        )))
    }

    fn resolve_type(&self, name: &str) -> Result<TypeToken> {
        self.types
            .resolve(name)
            .ok_or_else(|| ManagementError::UnknownType(name.to_string()))
    }

    fn runtime_class(&self, target: &Arc<dyn Any + Send + Sync>) -> Option<Arc<ClassDecl>> {
        self.classes.get((**target).type_id())
    }

    fn call(
        &self,
        method: &MethodDecl,
        target: &Arc<dyn Any + Send + Sync>,
        args: &[ManagedValue],
    ) -> Result<ManagedValue> {
        let erased: &dyn Any = &**target;
        (method.handle())(erased, args).map_err(|source| ManagementError::Invocation {
            target: format!("{}.{}", self.info.type_name, method.name()),
            source,
        })
    }
}

impl std::fmt::Debug for DynamicBean {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamicBean")
            .field("type_name", &self.info.type_name)
            .field("attributes", &self.info.attributes.len())
            .field("operations", &self.info.operations.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decl::{AttributeMarker, OperationMarker};
    use crate::factory::BeanFactory;
    use crate::resolver::FixedResolver;
    use castellan_sdk::{arg, bind, CallError};
    use std::sync::atomic::{AtomicI32, Ordering};

    #[derive(Default)]
    struct Counter {
        value: AtomicI32,
    }

    impl Counter {
        fn get(&self) -> i32 {
            self.value.load(Ordering::SeqCst)
        }

        fn set(&self, value: i32) {
            self.value.store(value, Ordering::SeqCst);
        }
    }

    fn counter_class() -> ClassDecl {
        ClassDecl::new::<Counter>("Counter")
            .method(
                MethodDecl::new(
                    "getCounter",
                    bind(|c: &Counter, _args: &[ManagedValue]| Ok(ManagedValue::I32(c.get()))),
                )
                .returns("i32")
                .attribute(AttributeMarker::new()),
            )
            .method(
                MethodDecl::new(
                    "setCounter",
                    bind(|c: &Counter, args: &[ManagedValue]| {
                        c.set(arg(args, 0)?);
                        Ok(ManagedValue::Unit)
                    }),
                )
                .param("i32"),
            )
            .method(
                MethodDecl::new(
                    "failCounter",
                    bind(|_: &Counter, _args: &[ManagedValue]| {
                        Err(CallError::Failed("boom".to_string()))
                    }),
                )
                .operation(OperationMarker::new()),
            )
    }

    fn counter_bean() -> (Arc<Counter>, DynamicBean) {
        let classes = Arc::new(ClassRegistry::new());
        classes.register(counter_class());
        let types = Arc::new(TypeRegistry::with_defaults());
        let counter = Arc::new(Counter::default());
        let class = classes.get(std::any::TypeId::of::<Counter>()).unwrap();
        let bean = BeanFactory::create(
            class.as_ref(),
            Box::new(FixedResolver::new(counter.clone())),
            classes,
            types,
        )
        .unwrap();
        (counter, bean)
    }

    #[test]
    fn test_get_and_set_round_trip() {
        let (_, bean) = counter_bean();
        assert_eq!(bean.get_attribute("counter").unwrap().as_i32(), Some(0));
        bean.set_attribute("counter", ManagedValue::I32(10)).unwrap();
        assert_eq!(bean.get_attribute("counter").unwrap().as_i32(), Some(10));
    }

    #[test]
    fn test_set_with_boxed_scalar() {
        let (_, bean) = counter_bean();
        bean.set_attribute("counter", ManagedValue::object(7i32))
            .unwrap();
        assert_eq!(bean.get_attribute("counter").unwrap().as_i32(), Some(7));
    }

    #[test]
    fn test_unknown_attribute() {
        let (_, bean) = counter_bean();
        assert!(matches!(
            bean.get_attribute("missing"),
            Err(ManagementError::NotFound(_))
        ));
        assert!(matches!(
            bean.set_attribute("missing", ManagedValue::I32(1)),
            Err(ManagementError::NotFound(_))
        ));
    }

    #[test]
    fn test_set_unit_rejected() {
        let (_, bean) = counter_bean();
        assert!(matches!(
            bean.set_attribute("counter", ManagedValue::Unit),
            Err(ManagementError::InvalidValue(_))
        ));
    }

    #[test]
    fn test_set_type_mismatch_rejected() {
        let (_, bean) = counter_bean();
        assert!(matches!(
            bean.set_attribute("counter", ManagedValue::Bool(true)),
            Err(ManagementError::InvalidValue(_))
        ));
    }

    #[test]
    fn test_empty_batches() {
        let (_, bean) = counter_bean();
        assert!(bean.get_attributes(&[]).unwrap().is_empty());
        assert!(bean.set_attributes(Vec::new()).unwrap().is_empty());
    }

    #[test]
    fn test_batch_set_confirms_values() {
        let (_, bean) = counter_bean();
        let result = bean
            .set_attributes(vec![Attribute::new("counter", ManagedValue::I32(5))])
            .unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "counter");
        assert_eq!(result[0].value.as_i32(), Some(5));
    }

    #[test]
    fn test_batch_aborts_on_first_failure() {
        let (counter, bean) = counter_bean();
        let result = bean.set_attributes(vec![
            Attribute::new("counter", ManagedValue::I32(3)),
            Attribute::new("missing", ManagedValue::I32(4)),
        ]);
        assert!(result.is_err());
        // the first write already happened; batches are not atomic
        assert_eq!(counter.get(), 3);
    }

    #[test]
    fn test_invoke_unknown_operation() {
        let (_, bean) = counter_bean();
        assert!(matches!(
            bean.invoke("missing", &[], &[]),
            Err(ManagementError::NotFound(_))
        ));
        // getCounter is an attribute accessor, not an operation
        assert!(matches!(
            bean.invoke("getCounter", &[], &[]),
            Err(ManagementError::NotFound(_))
        ));
    }

    #[test]
    fn test_invocation_failure_preserves_cause() {
        let (_, bean) = counter_bean();
        let err = bean.invoke("failCounter", &[], &[]).unwrap_err();
        match err {
            ManagementError::Invocation { target, source } => {
                assert_eq!(target, "Counter.failCounter");
                assert!(matches!(source, CallError::Failed(_)));
            }
            other => panic!("expected Invocation, got {:?}", other),
        }
    }

    #[test]
    fn test_signature_types_only_resolved_for_name_matches() {
        let (_, bean) = counter_bean();
        // no operation named failCounter takes one parameter, so the
        // descriptor match fails before the unknown name is resolved
        let err = bean
            .invoke("failCounter", &[ManagedValue::I32(1)], &["NoSuchType"])
            .unwrap_err();
        assert!(matches!(err, ManagementError::NotFound(_)));
    }
}
