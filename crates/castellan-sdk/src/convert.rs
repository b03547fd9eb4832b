//! Conversion traits between Rust types and [`ManagedValue`]
//!
//! Handle bodies use [`FromManaged`] to extract typed arguments and
//! [`IntoManaged`] to produce return values. Boxed scalars unwrap
//! transparently, so a caller may pass `ManagedValue::object(10i32)` where a
//! declared `i32` is expected.

use crate::error::CallError;
use crate::value::ManagedValue;

/// Convert a borrowed [`ManagedValue`] into a Rust type.
pub trait FromManaged: Sized {
    /// Convert from a managed value, failing with a type mismatch if the
    /// carried value is of a different type.
    fn from_managed(value: &ManagedValue) -> Result<Self, CallError>;
}

/// Convert a Rust type into a [`ManagedValue`].
pub trait IntoManaged {
    /// Convert into a managed value.
    fn into_managed(self) -> ManagedValue;
}

macro_rules! scalar_conversions {
    ($($ty:ty => $variant:ident, $extract:ident, $name:expr;)*) => {
        $(
            impl FromManaged for $ty {
                fn from_managed(value: &ManagedValue) -> Result<Self, CallError> {
                    value.$extract().ok_or_else(|| CallError::TypeMismatch {
                        expected: $name.to_string(),
                        got: value.type_name().to_string(),
                    })
                }
            }

            impl IntoManaged for $ty {
                fn into_managed(self) -> ManagedValue {
                    ManagedValue::$variant(self)
                }
            }

            impl From<$ty> for ManagedValue {
                fn from(value: $ty) -> Self {
                    ManagedValue::$variant(value)
                }
            }
        )*
    };
}

scalar_conversions! {
    bool => Bool, as_bool, "bool";
    char => Char, as_char, "char";
    i8 => I8, as_i8, "i8";
    i16 => I16, as_i16, "i16";
    i32 => I32, as_i32, "i32";
    i64 => I64, as_i64, "i64";
    f32 => F32, as_f32, "f32";
    f64 => F64, as_f64, "f64";
}

impl FromManaged for String {
    fn from_managed(value: &ManagedValue) -> Result<Self, CallError> {
        value
            .as_text()
            .map(str::to_string)
            .ok_or_else(|| CallError::TypeMismatch {
                expected: "String".to_string(),
                got: value.type_name().to_string(),
            })
    }
}

impl IntoManaged for String {
    fn into_managed(self) -> ManagedValue {
        ManagedValue::Text(self)
    }
}

impl From<String> for ManagedValue {
    fn from(value: String) -> Self {
        ManagedValue::Text(value)
    }
}

impl From<&str> for ManagedValue {
    fn from(value: &str) -> Self {
        ManagedValue::Text(value.to_string())
    }
}

// Unit type (for methods that return nothing)
impl IntoManaged for () {
    fn into_managed(self) -> ManagedValue {
        ManagedValue::Unit
    }
}

impl FromManaged for () {
    fn from_managed(value: &ManagedValue) -> Result<Self, CallError> {
        if value.is_unit() {
            Ok(())
        } else {
            Err(CallError::TypeMismatch {
                expected: "()".to_string(),
                got: value.type_name().to_string(),
            })
        }
    }
}

impl IntoManaged for ManagedValue {
    fn into_managed(self) -> ManagedValue {
        self
    }
}
