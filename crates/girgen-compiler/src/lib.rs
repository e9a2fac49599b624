//! girgen compiler: turns an introspected namespace into Go/cgo bindings.
//!
//! Pipeline, bottom-up:
//! - [`resolve`] - primitive tag table and descriptor to native/host type tokens
//! - [`synth`] - argument roles, conversion code, and one host function per
//!   native function
//! - [`emit`] - declarations for a whole namespace under the file header
//! - [`dump`] - human-readable view of a namespace

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod config;
mod context;
pub mod dump;
pub mod emit;
pub mod resolve;
pub mod synth;

#[cfg(test)]
mod test_utils;

pub use config::Config;
pub use context::GenContext;
pub use dump::dump;
pub use emit::generate;

/// Errors raised while synthesizing bindings. Every error is fatal for the
/// namespace being generated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Element count or named-entity presence disagrees with the tag.
    #[error("malformed type `{ty}`: {reason}")]
    MalformedType { ty: String, reason: &'static str },

    #[error("array type `{ty}` carries no array info")]
    MissingArrayInfo { ty: String },

    /// Output C array with no length argument, fixed size, or terminator.
    #[error("cannot determine the length of array `{name}`")]
    UnboundedArray { name: String },

    #[error("array length refers to argument {index}, but there are only {count}")]
    LengthIndexOutOfRange { index: usize, count: usize },

    /// Role and tag combination without a conversion rule.
    #[error("no conversion for {role} of type `{ty}`")]
    Unsupported { role: &'static str, ty: String },

    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    pub(crate) fn unsupported(role: &'static str, ty: &girgen_core::TypeInfo) -> Self {
        Error::Unsupported {
            role,
            ty: ty.to_string(),
        }
    }

    /// Wraps the error with the item being synthesized.
    pub fn within(self, context: impl Into<String>) -> Self {
        Error::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Innermost error, skipping context layers.
    pub fn root(&self) -> &Error {
        match self {
            Error::Context { source, .. } => source.root(),
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
