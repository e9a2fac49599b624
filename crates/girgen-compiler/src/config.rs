//! Generation options.

use girgen_core::Colors;

/// Configuration for binding generation.
#[derive(Clone, Debug)]
pub struct Config {
    /// Package name override; derived from the namespace when unset.
    pub(crate) package: Option<String>,
    /// C headers included by the cgo preamble.
    pub(crate) includes: Vec<String>,
    /// pkg-config packages named in the cgo preamble.
    pub(crate) pkg_config: Vec<String>,
    /// Import path under which sibling namespace packages live.
    pub(crate) import_prefix: Option<String>,
    /// Emit getters for readable struct and union fields.
    pub(crate) field_getters: bool,
    /// Leave out items marked deprecated.
    pub(crate) skip_deprecated: bool,
    /// Palette for the namespace dump.
    pub(crate) colors: Colors,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            package: None,
            includes: Vec::new(),
            pkg_config: Vec::new(),
            import_prefix: None,
            field_getters: true,
            skip_deprecated: false,
            colors: Colors::OFF,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the package name of the generated file.
    pub fn package(mut self, name: impl Into<String>) -> Self {
        self.package = Some(name.into());
        self
    }

    /// Add a C header to the preamble.
    pub fn include(mut self, header: impl Into<String>) -> Self {
        self.includes.push(header.into());
        self
    }

    /// Add a pkg-config package to the preamble.
    pub fn pkg_config(mut self, package: impl Into<String>) -> Self {
        self.pkg_config.push(package.into());
        self
    }

    /// Set the import path prefix of sibling namespace packages.
    pub fn import_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.import_prefix = Some(prefix.into());
        self
    }

    /// Set whether to emit field getters.
    pub fn field_getters(mut self, value: bool) -> Self {
        self.field_getters = value;
        self
    }

    /// Set whether to leave out deprecated items.
    pub fn skip_deprecated(mut self, value: bool) -> Self {
        self.skip_deprecated = value;
        self
    }

    /// Set whether to use colored output.
    pub fn colored(mut self, enabled: bool) -> Self {
        self.colors = Colors::new(enabled);
        self
    }
}
