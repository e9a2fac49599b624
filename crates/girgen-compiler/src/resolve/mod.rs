//! Type resolution: primitive table and descriptor resolver.

mod basic;
mod resolver;

pub use basic::{TagClass, classify, host_name, native_name};
pub use resolver::{
    check_shape, container_stores_pointer, element_host, pointer_slot_host, resolve_host,
    resolve_native,
};
pub(crate) use resolver::{array_info, element, entity};

#[cfg(test)]
mod basic_tests;
#[cfg(test)]
mod resolver_tests;
