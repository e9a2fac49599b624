//! Call-boundary synthesis: argument roles, marshalling, and wrappers.

pub mod arg;
mod code;
mod containers;
pub mod marshal;
pub mod wrapper;

pub use arg::{Arg, Binding, Hidden, Role, host_ident};
pub use marshal::{Marshal, marshal};
pub use wrapper::{Wrapper, host_name, synthesize};
