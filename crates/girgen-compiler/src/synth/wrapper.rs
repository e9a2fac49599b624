//! Host wrapper functions.
//!
//! A wrapper is assembled from the arguments of one native function in
//! registration order: receiver, parameters, error slot, return value.
//! Conversion statements run in that order before the call, releases are
//! deferred in reverse, and output conversions run in reverse after it.

use girgen_core::utils::to_pascal_case;
use girgen_core::{EntityRef, FunctionInfo};

use super::arg::{Arg, Binding, Hidden, Role};
use super::code::Code;
use super::marshal::Marshal;
use crate::{Error, GenContext, Result};

/// One native function prepared for wrapping.
#[derive(Debug)]
pub struct Wrapper<'a> {
    ctx: &'a GenContext,
    func: &'a FunctionInfo,
    owner: Option<&'a EntityRef>,
    args: Vec<Arg<'a>>,
}

/// Host name of a function: methods keep their own name, constructors and
/// static functions of an entity are prefixed with the entity's name.
pub fn host_name(func: &FunctionInfo, owner: Option<&EntityRef>) -> String {
    let name = to_pascal_case(&func.name);
    match owner {
        Some(owner) if !func.is_method() => format!("{}{name}", owner.name),
        _ => name,
    }
}

impl<'a> Wrapper<'a> {
    /// Classifies the arguments of `func`.
    ///
    /// `owner` is the entity the function is emitted on. `via` names the
    /// interface declaring a method emitted on an implementing type.
    pub fn new(
        ctx: &'a GenContext,
        func: &'a FunctionInfo,
        owner: Option<&'a EntityRef>,
        via: Option<&'a EntityRef>,
    ) -> Result<Self> {
        let mut wrapper = Wrapper {
            ctx,
            func,
            owner,
            args: Vec::new(),
        };
        wrapper
            .classify(via)
            .map_err(|err| err.within(wrapper.path()))?;
        Ok(wrapper)
    }

    fn classify(&mut self, via: Option<&'a EntityRef>) -> Result<()> {
        let func = self.func;
        if func.is_method() {
            if let Some(owner) = self.owner {
                self.args.push(Arg::receiver(owner, via));
            }
        }
        let first_param = self.args.len();
        self.args.extend(func.args.iter().map(Arg::param));
        if func.flags.throws {
            self.args.push(Arg::error());
        }
        self.args.push(Arg::ret(func));

        let count = func.args.len();
        let lengths = func
            .args
            .iter()
            .map(|arg| &arg.ty)
            .enumerate()
            .map(|(i, ty)| (Some(first_param + i), ty))
            .chain(std::iter::once((None, &func.return_type)));
        let mut couplings = Vec::new();
        for (array, ty) in lengths {
            let Some(index) = ty.array.as_ref().and_then(|info| info.length) else {
                continue;
            };
            if index >= count {
                return Err(Error::LengthIndexOutOfRange { index, count });
            }
            couplings.push((array, first_param + index));
        }
        for (array, length) in couplings {
            self.couple(array, length);
        }
        Ok(())
    }

    /// Hides the length argument and points the array at its native local.
    fn couple(&mut self, array: Option<usize>, length: usize) {
        let array = array.unwrap_or(self.args.len() - 1);
        let local = self.args[length].native_local();
        let source = self.args[array].host_value();
        match &mut self.args[array].role {
            Role::Param(p) => p.length = Some(local),
            Role::Return(r) => r.length = Some(local),
            Role::Receiver(_) => {}
        }
        if let Role::Param(p) = &mut self.args[length].role {
            p.hidden = Some(Hidden::LengthOf(source));
        }
    }

    /// Dotted name used in error messages, e.g. `Gtk.Button.set_label`.
    fn path(&self) -> String {
        match self.owner {
            Some(owner) => format!("{owner}.{}", self.func.name),
            None => format!("{}.{}", self.ctx.namespace(), self.func.name),
        }
    }

    pub fn args(&self) -> &[Arg<'a>] {
        &self.args
    }

    pub fn host_name(&self) -> String {
        host_name(self.func, self.owner)
    }

    /// Name, parameters, and results, e.g. `SetLabel(label string)`.
    pub fn signature(&self) -> Result<String> {
        self.signature_inner()
            .map_err(|err| err.within(self.path()))
    }

    fn signature_inner(&self) -> Result<String> {
        let mut params = Vec::new();
        let mut results = Vec::new();
        for arg in &self.args {
            params.extend(arg.host_param(self.ctx)?);
        }
        // The return value leads the result list.
        for arg in self.args.iter().rev() {
            results.extend(arg.host_result(self.ctx)?);
        }
        let mut sig = format!("{}({})", self.host_name(), params.join(", "));
        if !results.is_empty() {
            sig.push_str(&format!(" ({})", results.join(", ")));
        }
        Ok(sig)
    }

    /// Complete host function declaration.
    pub fn render(&self) -> Result<String> {
        self.render_inner().map_err(|err| err.within(self.path()))
    }

    fn render_inner(&self) -> Result<String> {
        tracing::debug!(function = %self.path(), symbol = %self.func.symbol, "synthesizing wrapper");
        let marshals = self
            .args
            .iter()
            .map(|arg| arg.marshal(self.ctx))
            .collect::<Result<Vec<Marshal>>>()?;

        let receiver = self.args.iter().find_map(Arg::receiver_decl);
        let mut out = String::from("func ");
        if let Some(receiver) = receiver {
            out.push_str(&format!("({receiver}) "));
        }
        out.push_str(&self.signature_inner()?);
        out.push_str(" {\n");

        for m in &marshals {
            out.push_str(&m.prefix);
        }
        out.push_str(&deferred(&marshals));
        out.push_str(&self.call());
        for m in marshals.iter().rev() {
            out.push_str(&m.suffix);
        }

        let results: Vec<&str> = self
            .args
            .iter()
            .rev()
            .filter(|arg| match &arg.role {
                Role::Return(_) => arg.is_output(),
                Role::Param(p) => p.binding == Binding::Result,
                Role::Receiver(_) => false,
            })
            .map(|arg| arg.name.as_str())
            .collect();
        if !results.is_empty() {
            out.push_str(&format!("\treturn {}\n", results.join(", ")));
        }
        out.push_str("}\n");
        Ok(out)
    }

    fn call(&self) -> String {
        let args: Vec<String> = self.args.iter().filter_map(Arg::call_arg).collect();
        let call = format!("C.{}({})", self.func.symbol, args.join(", "));
        match self.args.iter().find(|arg| arg.captures_return()) {
            Some(ret) => format!("\t{} = {call}\n", ret.native_local()),
            None => format!("\t{call}\n"),
        }
    }
}

/// One `defer` releasing everything the prefixes allocated, newest first.
fn deferred(marshals: &[Marshal]) -> String {
    let releases: Vec<&str> = marshals
        .iter()
        .rev()
        .map(|m| m.release.as_str())
        .filter(|release| !release.is_empty())
        .collect();
    match releases.as_slice() {
        [] => String::new(),
        [single] if single.lines().count() == 1 => format!("\tdefer {single}"),
        _ => {
            let mut code = Code::new(1);
            code.open("defer func()");
            for release in releases {
                code.block(release);
            }
            code.close_with("()");
            code.finish()
        }
    }
}

/// Complete host function for `func`, see [`Wrapper::new`].
pub fn synthesize(
    ctx: &GenContext,
    func: &FunctionInfo,
    owner: Option<&EntityRef>,
    via: Option<&EntityRef>,
) -> Result<String> {
    Wrapper::new(ctx, func, owner, via)?.render()
}
