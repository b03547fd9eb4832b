//! Castellan SDK - value and handle vocabulary for managed objects
//!
//! This crate provides the minimal types needed to write method handles for
//! Castellan managed classes without depending on the full castellan-engine:
//!
//! - [`ManagedValue`]: the dynamic value that crosses the dispatch boundary
//! - [`FromManaged`] / [`IntoManaged`]: conversion between Rust types and
//!   managed values
//! - [`MethodHandle`] / [`bind`] / [`arg`]: bound handles that adapt a typed
//!   closure over a concrete receiver into the erased form the dispatcher
//!   invokes
//! - [`CallError`]: handle-level failures, carried as the cause inside the
//!   engine's invocation errors
//!
//! # Example
//!
//! ```ignore
//! use castellan_sdk::{arg, bind, CallResult, ManagedValue};
//!
//! struct Counter { value: std::sync::atomic::AtomicI32 }
//!
//! let getter = bind(|c: &Counter, _args: &[ManagedValue]| {
//!     Ok(ManagedValue::I32(c.value.load(std::sync::atomic::Ordering::SeqCst)))
//! });
//! let setter = bind(|c: &Counter, args: &[ManagedValue]| {
//!     c.value.store(arg(args, 0)?, std::sync::atomic::Ordering::SeqCst);
//!     Ok(ManagedValue::Unit)
//! });
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

mod convert;
mod error;
mod handler;
mod value;

pub use convert::{FromManaged, IntoManaged};
pub use error::{CallError, CallResult};
pub use handler::{arg, bind, expect_args, MethodHandle};
pub use value::ManagedValue;
