//! Bound method handles
//!
//! A [`MethodHandle`] is the erased, dispatch-ready form of one method on a
//! managed class: it receives the resolved target as `&dyn Any` plus the
//! caller's argument slice and produces a [`CallResult`]. Handles are built
//! once per declared method and invoked against whatever instance the
//! resolver yields at call time.

use std::any::Any;
use std::sync::Arc;

use crate::convert::FromManaged;
use crate::error::{CallError, CallResult};
use crate::value::ManagedValue;

/// A bound method handle: erased receiver in, managed value out.
pub type MethodHandle = Arc<dyn Fn(&dyn Any, &[ManagedValue]) -> CallResult + Send + Sync>;

/// Bind a typed closure over a concrete receiver into a [`MethodHandle`].
///
/// The returned handle downcasts the erased target to `T` and fails with
/// [`CallError::ReceiverMismatch`] if the dispatcher hands it an instance of
/// a different concrete type.
pub fn bind<T, F>(f: F) -> MethodHandle
where
    T: Any,
    F: Fn(&T, &[ManagedValue]) -> CallResult + Send + Sync + 'static,
{
    Arc::new(move |target: &dyn Any, args: &[ManagedValue]| {
        let target = target
            .downcast_ref::<T>()
            .ok_or_else(|| CallError::ReceiverMismatch {
                expected: std::any::type_name::<T>().to_string(),
            })?;
        f(target, args)
    })
}

/// Extract the argument at `index` as a typed value.
pub fn arg<T: FromManaged>(args: &[ManagedValue], index: usize) -> Result<T, CallError> {
    let value = args
        .get(index)
        .ok_or_else(|| CallError::ArgumentError(format!("missing argument {}", index)))?;
    T::from_managed(value)
}

/// Validate the argument count before extraction.
pub fn expect_args(args: &[ManagedValue], expected: usize) -> Result<(), CallError> {
    if args.len() != expected {
        return Err(CallError::ArgumentError(format!(
            "expected {} arguments, got {}",
            expected,
            args.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter {
        value: i32,
    }

    #[test]
    fn test_bind_and_invoke() {
        let handle = bind(|c: &Counter, _args: &[ManagedValue]| Ok(ManagedValue::I32(c.value)));
        let counter = Counter { value: 7 };
        let result = handle(&counter, &[]).unwrap();
        assert_eq!(result.as_i32(), Some(7));
    }

    #[test]
    fn test_bind_wrong_receiver() {
        let handle = bind(|c: &Counter, _args: &[ManagedValue]| Ok(ManagedValue::I32(c.value)));
        let not_a_counter = "something else".to_string();
        let err = handle(&not_a_counter, &[]).unwrap_err();
        assert!(matches!(err, CallError::ReceiverMismatch { .. }));
    }

    #[test]
    fn test_arg_extraction() {
        let args = vec![ManagedValue::I32(5), ManagedValue::Bool(true)];
        assert_eq!(arg::<i32>(&args, 0).unwrap(), 5);
        assert_eq!(arg::<bool>(&args, 1).unwrap(), true);
        assert!(matches!(
            arg::<i32>(&args, 2),
            Err(CallError::ArgumentError(_))
        ));
        assert!(matches!(
            arg::<bool>(&args, 0),
            Err(CallError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_expect_args() {
        let args = vec![ManagedValue::I32(5)];
        assert!(expect_args(&args, 1).is_ok());
        assert!(expect_args(&args, 2).is_err());
    }
}
