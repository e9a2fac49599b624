//! Declaration emission for a whole namespace.
//!
//! Walks the entity tables in a fixed order and turns each item into a
//! [`Fragment`]: constants, enumerations, interfaces with their carriers,
//! objects with their mirror interfaces, structs and unions, then the
//! namespace's free functions. [`generate`] joins the fragments under the
//! file header.

mod emitter;
mod header;
mod naming;
mod render;

#[cfg(test)]
mod emit_tests;

pub use emitter::{Emitter, Fragment, FragmentKind, generate};
pub use naming::{constant_literal, enum_value_names};
