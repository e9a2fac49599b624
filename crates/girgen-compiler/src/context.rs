//! Generation context threaded through every resolver and synthesizer call.

use girgen_core::utils::package_name;
use girgen_core::{EntityRef, Namespace};

use crate::Config;

/// Namespace currently being generated, plus where foreign packages live.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenContext {
    namespace: String,
    package: String,
    import_prefix: Option<String>,
}

impl GenContext {
    pub fn new(namespace: impl Into<String>) -> Self {
        let namespace = namespace.into();
        let package = package_name(&namespace);
        Self {
            namespace,
            package,
            import_prefix: None,
        }
    }

    pub fn for_namespace(ns: &Namespace, config: &Config) -> Self {
        let mut ctx = Self::new(&ns.name);
        if let Some(package) = &config.package {
            ctx.package = package.clone();
        }
        ctx.import_prefix = config.import_prefix.clone();
        ctx
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Package name of the generated file.
    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn is_local(&self, namespace: &str) -> bool {
        namespace == self.namespace
    }

    /// Host name of `name` declared by `namespace`, package-qualified when foreign.
    pub fn qualify(&self, namespace: &str, name: &str) -> String {
        if self.is_local(namespace) {
            name.to_string()
        } else {
            format!("{}.{}", package_name(namespace), name)
        }
    }

    /// Host function that wraps a native handle of `entity`.
    pub fn wrap_fn(&self, entity: &EntityRef) -> String {
        self.qualify(&entity.namespace, &format!("Wrap{}", entity.name))
    }

    /// Import path of a foreign namespace's package.
    pub fn import_path(&self, namespace: &str) -> String {
        let package = package_name(namespace);
        match &self.import_prefix {
            Some(prefix) => format!("{}/{}", prefix.trim_end_matches('/'), package),
            None => package,
        }
    }
}
