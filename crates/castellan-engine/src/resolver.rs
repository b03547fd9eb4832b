//! Instance resolution strategies
//!
//! The dispatcher never holds the target directly: it asks its resolver on
//! every call. A [`FixedResolver`] hands back the same instance each time; a
//! [`ComputedResolver`] re-evaluates a strategy closure, which allows proxy
//! style indirection where the concrete instance (and even its concrete
//! type) may change between calls.

use std::any::Any;
use std::sync::Arc;

/// Yields the object to dispatch against, once per call.
pub trait InstanceResolver: Send + Sync {
    /// Return the current target instance.
    fn resolve(&self) -> Arc<dyn Any + Send + Sync>;
}

/// Resolver that returns the instance captured at construction, every time.
pub struct FixedResolver {
    target: Arc<dyn Any + Send + Sync>,
}

impl FixedResolver {
    /// Capture the instance to resolve.
    pub fn new(target: Arc<dyn Any + Send + Sync>) -> Self {
        Self { target }
    }
}

impl InstanceResolver for FixedResolver {
    fn resolve(&self) -> Arc<dyn Any + Send + Sync> {
        self.target.clone()
    }
}

/// Resolver that re-evaluates a strategy closure on every call.
pub struct ComputedResolver {
    strategy: Box<dyn Fn() -> Arc<dyn Any + Send + Sync> + Send + Sync>,
}

impl ComputedResolver {
    /// Wrap a resolution strategy.
    pub fn new(strategy: impl Fn() -> Arc<dyn Any + Send + Sync> + Send + Sync + 'static) -> Self {
        Self {
            strategy: Box::new(strategy),
        }
    }
}

impl InstanceResolver for ComputedResolver {
    fn resolve(&self) -> Arc<dyn Any + Send + Sync> {
        (self.strategy)()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[test]
    fn test_fixed_resolver_returns_same_instance() {
        let target: Arc<dyn Any + Send + Sync> = Arc::new(41i32);
        let resolver = FixedResolver::new(target.clone());

        let first = resolver.resolve();
        let second = resolver.resolve();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(Arc::ptr_eq(&first, &target));
    }

    #[test]
    fn test_computed_resolver_reevaluates() {
        let slot: Arc<Mutex<Arc<dyn Any + Send + Sync>>> =
            Arc::new(Mutex::new(Arc::new(1i32) as Arc<dyn Any + Send + Sync>));

        let strategy_slot = slot.clone();
        let resolver = ComputedResolver::new(move || strategy_slot.lock().clone());

        assert_eq!(resolver.resolve().downcast_ref::<i32>(), Some(&1));

        *slot.lock() = Arc::new("swapped".to_string());
        assert_eq!(
            resolver.resolve().downcast_ref::<String>().map(String::as_str),
            Some("swapped")
        );
    }
}
