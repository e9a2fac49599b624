//! Argument classification.
//!
//! An [`Arg`] is one value crossing the native call boundary, tagged with the
//! role it plays there. The role decides where the value appears in the host
//! signature and which marshalling rules apply.

use std::borrow::Cow;

use girgen_core::utils::{lower_first, safe_ident};
use girgen_core::{
    ArgInfo, ArrayType, Direction, EntityKind, EntityRef, FieldInfo, FunctionInfo, Transfer,
    TypeInfo,
};

use super::marshal::{self, Marshal};
use crate::resolve::resolve_host;
use crate::{GenContext, Result};

/// Identifiers the wrapper itself declares.
const RESERVED: [&str; 3] = ["this", "ret", "err"];

#[derive(Clone, Debug, PartialEq)]
pub struct Arg<'a> {
    /// Host identifier; the native local is `real_<name>`.
    pub name: String,
    pub ty: Cow<'a, TypeInfo>,
    pub role: Role,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Role {
    Receiver(Receiver),
    Param(Param),
    Return(Return),
}

/// The implicit instance argument of a method.
#[derive(Clone, Debug, PartialEq)]
pub struct Receiver {
    /// Entity declaring the method when it differs from the receiver's own
    /// type; the handle is cast to this entity's native type.
    pub real: Option<EntityRef>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Param {
    pub direction: Direction,
    pub transfer: Transfer,
    pub nullable: bool,
    pub caller_allocates: bool,
    pub binding: Binding,
    pub hidden: Option<Hidden>,
    /// Native local holding this array's element count.
    pub length: Option<String>,
}

/// Where an output parameter's converted value goes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Binding {
    /// Written through a host pointer parameter.
    Reference,
    /// Assigned to a named host result.
    Result,
}

/// Why a parameter is absent from the host signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Hidden {
    /// Passed as the native zero value.
    Skipped,
    /// Element count of the array held in the given host expression.
    LengthOf(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Return {
    pub transfer: Transfer,
    pub nullable: bool,
    /// Value is dropped instead of returned.
    pub skipped: bool,
    /// Native local holding the returned array's element count.
    pub length: Option<String>,
}

/// Host identifier for a native parameter name.
pub fn host_ident(name: &str) -> String {
    let mut ident = safe_ident(name);
    if RESERVED.contains(&ident.as_str()) {
        ident.push('_');
    }
    ident
}

impl<'a> Arg<'a> {
    /// Instance argument of a method declared on `owner`.
    ///
    /// With `real` set the method comes from an interface `owner` implements,
    /// and the handle is passed as that interface's native type.
    pub fn receiver(owner: &EntityRef, real: Option<&EntityRef>) -> Arg<'static> {
        Arg {
            name: "this".to_string(),
            ty: Cow::Owned(TypeInfo::named(owner.clone())),
            role: Role::Receiver(Receiver {
                real: real.cloned(),
            }),
        }
    }

    pub fn param(info: &'a ArgInfo) -> Self {
        Arg {
            name: host_ident(&info.name),
            ty: Cow::Borrowed(&info.ty),
            role: Role::Param(Param {
                direction: info.direction,
                transfer: info.transfer,
                nullable: info.nullable,
                caller_allocates: info.caller_allocates,
                binding: Binding::Reference,
                hidden: info.skip.then_some(Hidden::Skipped),
                length: None,
            }),
        }
    }

    pub fn ret(func: &'a FunctionInfo) -> Self {
        Arg {
            name: "ret".to_string(),
            ty: Cow::Borrowed(&func.return_type),
            role: Role::Return(Return {
                transfer: func.return_transfer,
                nullable: func.may_return_null,
                skipped: func.skip_return,
                length: None,
            }),
        }
    }

    /// Value of a struct field, read like a return value.
    pub fn field(info: &'a FieldInfo) -> Self {
        Arg {
            name: "ret".to_string(),
            ty: Cow::Borrowed(&info.ty),
            role: Role::Return(Return {
                transfer: Transfer::None,
                nullable: true,
                skipped: false,
                length: None,
            }),
        }
    }

    /// Trailing error slot of a throwing function, bound to the `err` result.
    pub fn error() -> Arg<'static> {
        Arg {
            name: "err".to_string(),
            ty: Cow::Owned(TypeInfo::error()),
            role: Role::Param(Param {
                direction: Direction::Out,
                transfer: Transfer::Full,
                nullable: false,
                caller_allocates: false,
                binding: Binding::Result,
                hidden: None,
                length: None,
            }),
        }
    }

    pub fn native_local(&self) -> String {
        format!("real_{}", self.name)
    }

    pub fn is_receiver(&self) -> bool {
        matches!(self.role, Role::Receiver(_))
    }

    /// Whether the value flows from host to native.
    pub fn is_input(&self) -> bool {
        match &self.role {
            Role::Receiver(_) => true,
            Role::Param(p) => p.direction != Direction::Out,
            Role::Return(_) => false,
        }
    }

    /// Whether the value flows from native back to host.
    pub fn is_output(&self) -> bool {
        match &self.role {
            Role::Receiver(_) => false,
            Role::Param(p) => p.direction != Direction::In,
            Role::Return(r) => !r.skipped && !self.ty.is_void(),
        }
    }

    /// Whether a return value is actually captured from the call.
    pub fn captures_return(&self) -> bool {
        matches!(self.role, Role::Return(_)) && self.is_output()
    }

    /// Host expression reading the argument's current value; parameters
    /// passed by reference are dereferenced.
    pub fn host_value(&self) -> String {
        match &self.role {
            Role::Param(p) if p.direction != Direction::In && p.binding == Binding::Reference => {
                format!("(*{})", self.name)
            }
            _ => self.name.clone(),
        }
    }

    /// Whether the callee fills a C array the wrapper allocates.
    pub fn fills_buffer(&self) -> bool {
        let Role::Param(p) = &self.role else {
            return false;
        };
        p.caller_allocates
            && p.direction == Direction::Out
            && self
                .ty
                .array
                .as_ref()
                .is_some_and(|info| info.array_type == ArrayType::C)
    }

    /// Host place an output argument's converted value is assigned to.
    pub fn host_target(&self) -> String {
        match &self.role {
            Role::Param(p) if p.binding == Binding::Reference => format!("*{}", self.name),
            _ => self.name.clone(),
        }
    }

    /// Receiver clause of the host method, e.g. `this *Button`.
    pub fn receiver_decl(&self) -> Option<String> {
        if !self.is_receiver() {
            return None;
        }
        let entity = self.ty.interface.as_ref()?;
        let ty = match entity.kind {
            EntityKind::Enum => entity.name.clone(),
            EntityKind::Interface => format!("*{}", lower_first(&entity.name)),
            EntityKind::Object | EntityKind::Struct | EntityKind::Union => {
                format!("*{}", entity.name)
            }
        };
        Some(format!("{} {ty}", self.name))
    }

    /// Entry of the host parameter list, if the argument has one.
    pub fn host_param(&self, ctx: &GenContext) -> Result<Option<String>> {
        let Role::Param(p) = &self.role else {
            return Ok(None);
        };
        if p.hidden.is_some() || p.binding == Binding::Result {
            return Ok(None);
        }
        let decl = match p.direction {
            Direction::In => format!("{} {}", self.name, resolve_host(ctx, &self.ty, true)?),
            Direction::Out | Direction::InOut => {
                format!("{} *{}", self.name, resolve_host(ctx, &self.ty, false)?)
            }
        };
        Ok(Some(decl))
    }

    /// Entry of the host result list, if the argument has one.
    pub fn host_result(&self, ctx: &GenContext) -> Result<Option<String>> {
        let bound = match &self.role {
            Role::Return(_) => self.is_output(),
            Role::Param(p) => p.binding == Binding::Result,
            Role::Receiver(_) => false,
        };
        if !bound {
            return Ok(None);
        }
        let host = resolve_host(ctx, &self.ty, false)?;
        Ok(Some(format!("{} {host}", self.name)))
    }

    /// Expression passed to the native function.
    pub fn call_arg(&self) -> Option<String> {
        let local = self.native_local();
        match &self.role {
            Role::Receiver(_) => Some(local),
            Role::Param(p) if p.direction == Direction::In => Some(local),
            Role::Param(_) if self.fills_buffer() => Some(local),
            Role::Param(_) => Some(format!("&{local}")),
            Role::Return(_) => None,
        }
    }

    /// Statements run before the call.
    pub fn prefix(&self, ctx: &GenContext) -> Result<String> {
        Ok(marshal::marshal(ctx, self)?.prefix)
    }

    /// Statements run after the call.
    pub fn suffix(&self, ctx: &GenContext) -> Result<String> {
        Ok(marshal::marshal(ctx, self)?.suffix)
    }

    /// Full conversion: prefix, deferred release, and suffix.
    pub fn marshal(&self, ctx: &GenContext) -> Result<Marshal> {
        marshal::marshal(ctx, self)
    }
}
