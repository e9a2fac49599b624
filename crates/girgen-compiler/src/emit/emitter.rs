//! Core emitter struct and main emit logic.

use girgen_core::Namespace;

use super::header;
use crate::{Config, GenContext, Result};

/// What a fragment declares.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FragmentKind {
    Constant,
    /// Enumeration type and its values.
    Enum,
    /// Go interface plus its private carrier.
    Interface,
    /// Wrapper struct of an object, struct, or union, with its `Wrap` function.
    Type,
    /// Mirroring `I<Name>` interface of an object.
    Mirror,
    Method,
    Function,
    FieldGetter,
}

/// One ready-to-print declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fragment {
    /// Dotted name of the declaring item, e.g. `Gtk.Button.set_label`.
    pub owner: String,
    pub kind: FragmentKind,
    pub text: String,
}

/// Declaration emitter for one namespace.
pub struct Emitter<'a> {
    pub(super) ns: &'a Namespace,
    pub(super) config: &'a Config,
    pub(super) ctx: GenContext,
    /// Output buffer
    pub(super) fragments: Vec<Fragment>,
}

impl<'a> Emitter<'a> {
    pub fn new(ns: &'a Namespace, config: &'a Config) -> Self {
        Self {
            ns,
            config,
            ctx: GenContext::for_namespace(ns, config),
            fragments: Vec::new(),
        }
    }

    pub fn context(&self) -> &GenContext {
        &self.ctx
    }

    /// Declarations in output order: constants, enums, interfaces, objects,
    /// structs, unions, then namespace functions.
    pub fn emit(mut self) -> Result<Vec<Fragment>> {
        tracing::debug!(namespace = %self.ns.name, package = %self.ctx.package(), "emitting namespace");
        let ns = self.ns;
        for constant in ns.constants.values() {
            self.emit_constant(constant)?;
        }
        for info in ns.enums.values() {
            self.emit_enum(info)?;
        }
        for info in ns.interfaces.values() {
            self.emit_interface(info)?;
        }
        for info in ns.objects.values() {
            self.emit_object(info)?;
        }
        for info in ns.structs.values() {
            self.emit_struct(info)?;
        }
        for info in ns.unions.values() {
            self.emit_union(info)?;
        }
        for func in ns.functions.values() {
            self.emit_function(func, None)?;
        }
        Ok(self.fragments)
    }

    pub(super) fn push(&mut self, owner: impl Into<String>, kind: FragmentKind, text: String) {
        self.fragments.push(Fragment {
            owner: owner.into(),
            kind,
            text,
        });
    }

    /// Whether an item is left out of the output.
    pub(super) fn skips(&self, deprecated: bool) -> bool {
        deprecated && self.config.skip_deprecated
    }
}

/// Go source of a whole namespace. Fails without partial output.
pub fn generate(ns: &Namespace, config: &Config) -> Result<String> {
    let emitter = Emitter::new(ns, config);
    let ctx = emitter.context().clone();
    let fragments = emitter.emit()?;

    let mut body = String::new();
    let mut previous = None;
    for fragment in &fragments {
        let grouped =
            previous == Some(FragmentKind::Constant) && fragment.kind == FragmentKind::Constant;
        if previous.is_some() && !grouped {
            body.push('\n');
        }
        body.push_str(&fragment.text);
        previous = Some(fragment.kind);
    }

    let mut output = header::render(ns, config, &ctx, &body);
    if !body.is_empty() {
        output.push('\n');
        output.push_str(&body);
    }

    // Ensure exactly one trailing newline
    output.truncate(output.trim_end().len());
    output.push('\n');
    Ok(output)
}
