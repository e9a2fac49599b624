//! Conversion code around one native call.
//!
//! For each argument three fragments are produced:
//! - prefix: declares the native local `real_<name>` and fills it
//! - release: frees what the prefix allocated; run deferred, after the call
//! - suffix: converts native results back into host values
//!
//! Prefix and suffix lines carry one tab of indentation (function body).
//! Release blocks start at column zero; the wrapper places them.

use girgen_core::{Direction, EntityKind, Transfer, TypeInfo};

use super::arg::{Arg, Hidden, Param, Receiver, Return, Role};
use super::code::Code;
use super::containers;
use crate::resolve::{
    TagClass, array_info, classify, element, entity, resolve_host, resolve_native,
};
use crate::{Error, GenContext, Result};

/// Generated conversion fragments of one argument.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Marshal {
    pub prefix: String,
    pub release: String,
    pub suffix: String,
}

pub fn marshal(ctx: &GenContext, arg: &Arg<'_>) -> Result<Marshal> {
    match &arg.role {
        Role::Receiver(r) => receiver(arg, r),
        Role::Param(p) => param(ctx, arg, p),
        Role::Return(r) => ret(ctx, arg, r),
    }
}

fn receiver(arg: &Arg<'_>, receiver: &Receiver) -> Result<Marshal> {
    let owner = entity(&arg.ty)?;
    let real = arg.native_local();
    let prefix = if owner.kind == EntityKind::Enum {
        format!("\t{real} := C.{}({})\n", owner.c_type(), arg.name)
    } else {
        let target = receiver.real.as_ref().unwrap_or(owner);
        let native = resolve_native(&TypeInfo::named(target.clone()))?;
        format!("\t{real} := ({native})({}.Native())\n", arg.name)
    };
    Ok(Marshal {
        prefix,
        ..Marshal::default()
    })
}

fn param(ctx: &GenContext, arg: &Arg<'_>, param: &Param) -> Result<Marshal> {
    let real = arg.native_local();
    if let Some(hidden) = &param.hidden {
        return hidden_param(arg, param, hidden, &real);
    }

    let mut out = Marshal::default();
    if param.direction == Direction::InOut {
        // The callee may overwrite the local; release what was passed in.
        let passed = format!("{real}_in");
        let (prefix, release) = input(&arg.ty, &arg.host_value(), &passed, param)?;
        if release.is_empty() {
            (out.prefix, _) = input(&arg.ty, &arg.host_value(), &real, param)?;
        } else {
            out.prefix = format!("{prefix}\t{real} := {passed}\n");
            out.release = release;
        }
    } else if param.direction == Direction::In {
        (out.prefix, out.release) = input(&arg.ty, &arg.host_value(), &real, param)?;
    }
    if param.direction != Direction::In {
        if arg.fills_buffer() {
            return caller_buffer(ctx, arg, param, &real);
        }
        let target = arg.host_target();
        if param.direction == Direction::Out && is_caller_allocated(&arg.ty, param) {
            // The callee fills a structure living in the wrapper's frame.
            let local = arg.ty.clone().into_owned().by_value();
            out.prefix = format!("\tvar {real} {}\n", resolve_native(&local)?);
            out.suffix = format!("\t{target} = {}\n", heap_copy(ctx, &local, &real)?);
            return Ok(out);
        }
        if param.direction == Direction::Out {
            out.prefix = format!("\tvar {real} {}\n", resolve_native(&arg.ty)?);
        }
        let output = Output {
            real: &real,
            target: &target,
            transfer: param.transfer,
            length: param.length.as_deref(),
        };
        out.suffix = output.convert(ctx, &arg.ty)?;
    }
    Ok(out)
}

fn is_caller_allocated(ty: &TypeInfo, param: &Param) -> bool {
    param.caller_allocates
        && ty.is_pointer
        && matches!(
            ty.entity_kind(),
            Some(EntityKind::Struct | EntityKind::Union)
        )
}

/// A C array the wrapper allocates and the callee fills in place. Without a
/// fixed size the host slice's length decides the capacity.
fn caller_buffer(ctx: &GenContext, arg: &Arg<'_>, param: &Param, real: &str) -> Result<Marshal> {
    let info = array_info(&arg.ty)?;
    let native = resolve_native(element(&arg.ty, 0)?)?;
    let count = match info.fixed_size {
        Some(size) => size.to_string(),
        None => format!("len({})", arg.host_value()),
    };
    let output = Output {
        real,
        target: &arg.host_target(),
        transfer: Transfer::None,
        length: Some(param.length.as_deref().unwrap_or(&count)),
    };
    Ok(Marshal {
        prefix: format!(
            "\t{real} := (*{native})(C.g_malloc0_n(C.gsize({count}), C.gsize(unsafe.Sizeof(*new({native})))))\n"
        ),
        release: format!("C.g_free(C.gpointer(unsafe.Pointer({real})))\n"),
        suffix: output.convert(ctx, &arg.ty)?,
    })
}

fn hidden_param(arg: &Arg<'_>, param: &Param, hidden: &Hidden, real: &str) -> Result<Marshal> {
    let native = resolve_native(&arg.ty)?;
    let prefix = match hidden {
        Hidden::LengthOf(array) if param.direction != Direction::Out => {
            format!("\t{real} := {native}(len({array}))\n")
        }
        Hidden::LengthOf(_) | Hidden::Skipped => format!("\tvar {real} {native}\n"),
    };
    Ok(Marshal {
        prefix,
        ..Marshal::default()
    })
}

fn ret(ctx: &GenContext, arg: &Arg<'_>, ret: &Return) -> Result<Marshal> {
    if !arg.captures_return() {
        return Ok(Marshal::default());
    }
    let real = arg.native_local();
    let prefix = format!("\tvar {real} {}\n", resolve_native(&arg.ty)?);
    let output = Output {
        real: &real,
        target: &arg.host_target(),
        transfer: ret.transfer,
        length: ret.length.as_deref(),
    };
    Ok(Marshal {
        prefix,
        release: String::new(),
        suffix: output.convert(ctx, &arg.ty)?,
    })
}

/// Host to native: returns the prefix and the release block.
fn input(
    ty: &TypeInfo,
    host: &str,
    real: &str,
    param: &Param,
) -> Result<(String, String)> {
    let mut code = Code::new(1);
    let mut release = Code::new(0);
    match classify(ty.tag) {
        TagClass::Void => {
            if !ty.is_pointer {
                return Err(Error::unsupported("input", ty));
            }
            code.line(format!("{real} := C.gpointer({host})"));
        }
        TagClass::Basic | TagClass::TypeHandle => {
            let native = resolve_native(ty)?;
            if ty.is_pointer {
                code.line(format!("{real} := ({native})(unsafe.Pointer({host}))"));
            } else {
                code.line(format!("{real} := {native}({host})"));
            }
        }
        TagClass::Boolean => {
            if ty.is_pointer {
                return Err(Error::unsupported("input", ty));
            }
            code.line(format!("{real} := C.gboolean(C.TRUE)"))
                .open(format!("if !({host})"))
                .line(format!("{real} = C.gboolean(C.FALSE)"))
                .close();
        }
        TagClass::String => {
            code.line(format!(
                "{real} := (*C.gchar)(unsafe.Pointer(C.CString({host})))"
            ));
            if param.transfer != Transfer::Full {
                release.line(format!("C.free(unsafe.Pointer({real}))"));
            }
        }
        TagClass::Named => named_input(&mut code, ty, host, real, param.nullable)?,
        TagClass::Array | TagClass::List | TagClass::Hash => {
            let input = Input {
                real,
                host,
                transfer: param.transfer,
            };
            let mut sink = Sink {
                code: &mut code,
                release: &mut release,
            };
            match classify(ty.tag) {
                TagClass::Array => containers::array_input(&mut sink, ty, &input)?,
                TagClass::List => containers::list_input(&mut sink, ty, &input)?,
                _ => containers::hash_input(&mut sink, ty, &input)?,
            }
        }
        TagClass::Error => return Err(Error::unsupported("input", ty)),
    }
    Ok((code.finish(), release.finish()))
}

fn named_input(
    code: &mut Code,
    ty: &TypeInfo,
    host: &str,
    real: &str,
    nullable: bool,
) -> Result<()> {
    let native = resolve_native(ty)?;
    if entity(ty)?.kind == EntityKind::Enum {
        if ty.is_pointer {
            code.line(format!("{real} := ({native})(unsafe.Pointer({host}))"));
        } else {
            code.line(format!("{real} := {native}({host})"));
        }
    } else if !ty.is_pointer {
        code.line(format!("{real} := *(*{native})({host}.Native())"));
    } else if nullable {
        code.line(format!("var {real} {native}"))
            .open(format!("if {host} != nil"))
            .line(format!("{real} = ({native})({host}.Native())"))
            .close();
    } else {
        code.line(format!("{real} := ({native})({host}.Native())"));
    }
    Ok(())
}

/// Host to native conversion of one input value.
pub(crate) struct Input<'s> {
    /// Native local being declared.
    pub real: &'s str,
    /// Host expression holding the value.
    pub host: &'s str,
    pub transfer: Transfer,
}

/// Destination of input conversion code.
pub(crate) struct Sink<'c> {
    pub code: &'c mut Code,
    pub release: &'c mut Code,
}

/// Native to host conversion of one output value.
pub(crate) struct Output<'s> {
    /// Native local holding the value.
    pub real: &'s str,
    /// Host place receiving the converted value.
    pub target: &'s str,
    pub transfer: Transfer,
    /// Native local holding an array's element count.
    pub length: Option<&'s str>,
}

impl Output<'_> {
    pub fn convert(&self, ctx: &GenContext, ty: &TypeInfo) -> Result<String> {
        let (real, target) = (self.real, self.target);
        let mut code = Code::new(1);
        match classify(ty.tag) {
            TagClass::Void => {
                if ty.is_pointer {
                    code.line(format!("{target} = unsafe.Pointer({real})"));
                }
            }
            TagClass::Basic | TagClass::TypeHandle => {
                let host = resolve_host(ctx, ty, false)?;
                if ty.is_pointer {
                    code.line(format!("{target} = ({host})(unsafe.Pointer({real}))"));
                } else {
                    code.line(format!("{target} = {host}({real})"));
                }
            }
            TagClass::Boolean => {
                if ty.is_pointer {
                    return Err(Error::unsupported("output", ty));
                }
                code.line(format!("{target} = {real} != C.FALSE"));
            }
            TagClass::String => {
                code.line(format!(
                    "{target} = C.GoString((*C.char)(unsafe.Pointer({real})))"
                ));
                if self.transfer == Transfer::Full {
                    code.line(format!("C.g_free(C.gpointer(unsafe.Pointer({real})))"));
                }
            }
            TagClass::Named => self.named(ctx, &mut code, ty)?,
            TagClass::Array => containers::array_output(ctx, &mut code, ty, self)?,
            TagClass::List => containers::list_output(ctx, &mut code, ty, self)?,
            TagClass::Hash => containers::hash_output(ctx, &mut code, ty, self)?,
            TagClass::Error => {
                code.line(format!("{target} = nil"))
                    .open(format!("if {real} != nil"))
                    .line(format!(
                        "{target} = errors.New(C.GoString((*C.char)(unsafe.Pointer({real}.message))))"
                    ));
                if self.transfer == Transfer::Full {
                    code.line(format!("C.g_error_free({real})"));
                }
                code.close();
            }
        }
        Ok(code.finish())
    }

    fn named(&self, ctx: &GenContext, code: &mut Code, ty: &TypeInfo) -> Result<()> {
        let (real, target) = (self.real, self.target);
        let entity = entity(ty)?;
        match entity.kind {
            EntityKind::Enum => {
                let host = resolve_host(ctx, ty, false)?;
                if ty.is_pointer {
                    code.line(format!("{target} = ({host})(unsafe.Pointer({real}))"));
                } else {
                    code.line(format!("{target} = {host}({real})"));
                }
            }
            _ if ty.is_pointer => {
                code.open(format!("if {real} != nil"))
                    .line(format!(
                        "{target} = {}(unsafe.Pointer({real}))",
                        ctx.wrap_fn(entity)
                    ))
                    .close();
            }
            EntityKind::Struct | EntityKind::Union => {
                code.line(format!("{target} = *{}", heap_copy(ctx, ty, real)?));
            }
            EntityKind::Object | EntityKind::Interface => {
                return Err(Error::unsupported("by-value output", ty));
            }
        }
        Ok(())
    }
}

/// Wraps a heap copy of the by-value structure held in `place`.
pub(crate) fn heap_copy(ctx: &GenContext, ty: &TypeInfo, place: &str) -> Result<String> {
    Ok(format!(
        "{}(C.g_memdup2(C.gconstpointer(unsafe.Pointer(&{place})), C.gsize(unsafe.Sizeof({place}))))",
        ctx.wrap_fn(entity(ty)?)
    ))
}
