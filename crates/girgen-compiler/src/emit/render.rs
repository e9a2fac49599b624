//! Per-entity declaration rendering.

use std::collections::HashSet;

use girgen_core::utils::{c_field_name, lower_first, to_pascal_case};
use girgen_core::{
    ConstantInfo, EntityKind, EntityRef, EnumInfo, FieldInfo, FunctionInfo, InterfaceInfo,
    ObjectInfo, StructInfo, Transfer, TypeInfo, UnionInfo,
};

use super::emitter::{Emitter, FragmentKind};
use super::naming::{constant_literal, enum_value_names};
use crate::resolve::{TagClass, classify, resolve_host};
use crate::synth::Wrapper;
use crate::synth::marshal::Output;
use crate::{GenContext, Result};

const DEPRECATED: &str = "// Deprecated.\n";

fn deprecated_note(deprecated: bool) -> &'static str {
    if deprecated { DEPRECATED } else { "" }
}

impl Emitter<'_> {
    pub(super) fn emit_constant(&mut self, constant: &ConstantInfo) -> Result<()> {
        if self.skips(constant.deprecated) {
            return Ok(());
        }
        let owner = format!("{}.{}", self.ns.name, constant.name);
        let host = resolve_host(&self.ctx, &constant.ty, false).map_err(|e| e.within(&owner))?;
        let literal = constant_literal(constant).map_err(|e| e.within(&owner))?;
        let text = format!(
            "{}const {} {host} = {literal}\n",
            deprecated_note(constant.deprecated),
            to_pascal_case(&constant.name)
        );
        self.push(owner, FragmentKind::Constant, text);
        Ok(())
    }

    pub(super) fn emit_enum(&mut self, info: &EnumInfo) -> Result<()> {
        if self.skips(info.deprecated) {
            return Ok(());
        }
        let owner = self.ns.reference(EntityKind::Enum, &info.name);
        tracing::debug!(entity = %owner, "emitting enum");
        let storage = resolve_host(&self.ctx, &TypeInfo::new(info.storage), false)
            .map_err(|e| e.within(owner.to_string()))?;

        let mut text = String::from(deprecated_note(info.deprecated));
        text.push_str(&format!("type {} {storage}\n", info.name));
        let names = enum_value_names(self.ns, info);
        let values: Vec<_> = info
            .values
            .iter()
            .zip(names)
            .filter(|(value, _)| !self.skips(value.deprecated))
            .collect();
        if !values.is_empty() {
            text.push_str("\nconst (\n");
            for (_, (name, c_name)) in values {
                text.push_str(&format!("\t{name} {} = C.{c_name}\n", info.name));
            }
            text.push_str(")\n");
        }
        self.push(owner.to_string(), FragmentKind::Enum, text);
        self.emit_methods(&owner, &info.methods)
    }

    pub(super) fn emit_interface(&mut self, info: &InterfaceInfo) -> Result<()> {
        if self.skips(info.deprecated) {
            return Ok(());
        }
        let owner = self.ns.reference(EntityKind::Interface, &info.name);
        tracing::debug!(entity = %owner, "emitting interface");
        let carrier = lower_first(&info.name);

        let prerequisites = self.local_interfaces(&owner, &info.prerequisites);
        let mut text = String::from(deprecated_note(info.deprecated));
        text.push_str(&format!("type {} interface {{\n", info.name));
        text.push_str("\tNative() unsafe.Pointer\n");
        for prerequisite in &prerequisites {
            text.push_str(&format!("\t{}\n", prerequisite.name));
        }
        for sig in self.signatures(&owner, &info.methods)? {
            text.push_str(&format!("\t{sig}\n"));
        }
        text.push_str("}\n\n");
        text.push_str(&handle_struct(&carrier));
        text.push_str(&format!(
            "\nfunc Wrap{}(p unsafe.Pointer) {} {{\n\treturn &{carrier}{{native: p}}\n}}\n",
            info.name, info.name
        ));
        self.push(owner.to_string(), FragmentKind::Interface, text);

        self.emit_methods(&owner, &info.methods)?;
        let mut seen = method_names(&info.methods);
        // The carrier stands in for any implementor, so it carries the
        // prerequisite interfaces' methods as well.
        for prerequisite in self.transitive_prerequisites(&owner, info) {
            self.emit_polymorphic(&owner, &prerequisite, &mut seen)?;
        }
        Ok(())
    }

    pub(super) fn emit_object(&mut self, info: &ObjectInfo) -> Result<()> {
        if self.skips(info.deprecated) {
            return Ok(());
        }
        let owner = self.ns.reference(EntityKind::Object, &info.name);
        tracing::debug!(entity = %owner, "emitting object");
        let name = &info.name;

        let mut text = String::from(deprecated_note(info.deprecated));
        let mirror_base = match &info.parent {
            Some(parent) => {
                let parent_type = self.ctx.qualify(&parent.namespace, &parent.name);
                text.push_str(&format!("type {name} struct {{\n\t{parent_type}\n}}\n"));
                text.push_str(&format!(
                    "\nfunc Wrap{name}(p unsafe.Pointer) *{name} {{\n\treturn &{name}{{{}: *{}(p)}}\n}}\n",
                    parent.name,
                    self.ctx.wrap_fn(parent)
                ));
                self.ctx
                    .qualify(&parent.namespace, &format!("I{}", parent.name))
            }
            None => {
                text.push_str(&handle_struct(name));
                text.push_str(&format!(
                    "\nfunc Wrap{name}(p unsafe.Pointer) *{name} {{\n\treturn &{name}{{native: p}}\n}}\n"
                ));
                "Native() unsafe.Pointer".to_string()
            }
        };
        self.push(owner.to_string(), FragmentKind::Type, text);

        let interfaces = self.local_interfaces(&owner, &info.interfaces);
        let mut mirror = format!("type I{name} interface {{\n\t{mirror_base}\n");
        for iface in &interfaces {
            mirror.push_str(&format!("\t{}\n", iface.name));
        }
        for sig in self.signatures(&owner, &info.methods)? {
            mirror.push_str(&format!("\t{sig}\n"));
        }
        mirror.push_str("}\n");
        self.push(owner.to_string(), FragmentKind::Mirror, mirror);

        self.emit_methods(&owner, &info.methods)?;
        let mut seen = method_names(&info.methods);
        for iface in &interfaces {
            self.emit_polymorphic(&owner, iface, &mut seen)?;
        }
        Ok(())
    }

    pub(super) fn emit_struct(&mut self, info: &StructInfo) -> Result<()> {
        if self.skips(info.deprecated) {
            return Ok(());
        }
        if info.is_gtype_struct {
            tracing::debug!(entity = %info.name, "skipping class struct");
            return Ok(());
        }
        let owner = self.ns.reference(EntityKind::Struct, &info.name);
        self.emit_record(&owner, info.deprecated, &info.fields, &info.methods)
    }

    pub(super) fn emit_union(&mut self, info: &UnionInfo) -> Result<()> {
        if self.skips(info.deprecated) {
            return Ok(());
        }
        let owner = self.ns.reference(EntityKind::Union, &info.name);
        self.emit_record(&owner, info.deprecated, &info.fields, &info.methods)
    }

    /// Structs and unions: wrapper type, methods, and field getters.
    fn emit_record(
        &mut self,
        owner: &EntityRef,
        deprecated: bool,
        fields: &[FieldInfo],
        methods: &[FunctionInfo],
    ) -> Result<()> {
        tracing::debug!(entity = %owner, "emitting record");
        let name = &owner.name;
        let mut text = String::from(deprecated_note(deprecated));
        text.push_str(&handle_struct(name));
        text.push_str(&format!(
            "\nfunc Wrap{name}(p unsafe.Pointer) *{name} {{\n\treturn &{name}{{native: p}}\n}}\n"
        ));
        self.push(owner.to_string(), FragmentKind::Type, text);
        self.emit_methods(owner, methods)?;

        if !self.config.field_getters {
            return Ok(());
        }
        let mut taken = method_names(methods);
        taken.insert("Native".to_string());
        for field in fields.iter().filter(|f| f.readable) {
            let getter = to_pascal_case(&field.name);
            if taken.contains(&getter) {
                tracing::debug!(entity = %owner, field = %field.name, "getter name taken");
                continue;
            }
            let Some(text) = field_getter(&self.ctx, owner, field, &getter) else {
                tracing::debug!(entity = %owner, field = %field.name, ty = %field.ty, "no getter for field type");
                continue;
            };
            taken.insert(getter);
            self.push(
                format!("{owner}.{}", field.name),
                FragmentKind::FieldGetter,
                text,
            );
        }
        Ok(())
    }

    /// Methods, constructors, and static functions declared on `owner`.
    fn emit_methods(&mut self, owner: &EntityRef, methods: &[FunctionInfo]) -> Result<()> {
        for func in methods {
            self.emit_function(func, Some(owner))?;
        }
        Ok(())
    }

    pub(super) fn emit_function(
        &mut self,
        func: &FunctionInfo,
        owner: Option<&EntityRef>,
    ) -> Result<()> {
        if self.skips(func.deprecated) {
            return Ok(());
        }
        let wrapper = Wrapper::new(&self.ctx, func, owner, None)?;
        let text = format!("{}{}", deprecated_note(func.deprecated), wrapper.render()?);
        let path = match owner {
            Some(owner) => format!("{owner}.{}", func.name),
            None => format!("{}.{}", self.ns.name, func.name),
        };
        let kind = if func.is_method() {
            FragmentKind::Method
        } else {
            FragmentKind::Function
        };
        self.push(path, kind, text);
        Ok(())
    }

    /// Methods of `iface` emitted on `owner`, skipping names already present.
    fn emit_polymorphic(
        &mut self,
        owner: &EntityRef,
        iface: &EntityRef,
        seen: &mut HashSet<String>,
    ) -> Result<()> {
        let ns = self.ns;
        let Some(info) = ns.interface(iface) else {
            return Ok(());
        };
        for func in info.methods.iter().filter(|m| m.is_method()) {
            if self.skips(func.deprecated) {
                continue;
            }
            if !seen.insert(to_pascal_case(&func.name)) {
                tracing::debug!(entity = %owner, method = %func.name, "method already present");
                continue;
            }
            let text = Wrapper::new(&self.ctx, func, Some(owner), Some(iface))?.render()?;
            self.push(
                format!("{owner}.{}", func.name),
                FragmentKind::Method,
                format!("{}{text}", deprecated_note(func.deprecated)),
            );
        }
        Ok(())
    }

    /// Signatures of the instance methods, for interface declarations.
    fn signatures(&self, owner: &EntityRef, methods: &[FunctionInfo]) -> Result<Vec<String>> {
        methods
            .iter()
            .filter(|m| m.is_method() && !self.skips(m.deprecated))
            .map(|m| Wrapper::new(&self.ctx, m, Some(owner), None)?.signature())
            .collect()
    }

    /// Interfaces from `refs` whose methods are known. Foreign interfaces
    /// cannot be implemented without their method lists and are left out.
    fn local_interfaces(&self, owner: &EntityRef, refs: &[EntityRef]) -> Vec<EntityRef> {
        refs.iter()
            .filter(|r| {
                if r.kind != EntityKind::Interface {
                    return false;
                }
                let known = self.ns.interface(r).is_some();
                if !known {
                    tracing::warn!(entity = %owner, interface = %r, "interface methods unknown, leaving it out");
                }
                known
            })
            .cloned()
            .collect()
    }

    /// Local interface prerequisites of `info`, nearest first, without repeats.
    fn transitive_prerequisites(&self, owner: &EntityRef, info: &InterfaceInfo) -> Vec<EntityRef> {
        let mut found: Vec<EntityRef> = Vec::new();
        let mut queue = self.local_interfaces(owner, &info.prerequisites);
        while !queue.is_empty() {
            let next = queue.remove(0);
            if next == *owner || found.contains(&next) {
                continue;
            }
            if let Some(iface) = self.ns.interface(&next) {
                queue.extend(self.local_interfaces(&next, &iface.prerequisites));
            }
            found.push(next);
        }
        found
    }
}

/// Handle-holding struct with its `Native` accessor.
fn handle_struct(name: &str) -> String {
    format!(
        "type {name} struct {{\n\tnative unsafe.Pointer\n}}\n\nfunc (this *{name}) Native() unsafe.Pointer {{\n\treturn this.native\n}}\n"
    )
}

/// Pascal names of the instance methods.
fn method_names(methods: &[FunctionInfo]) -> HashSet<String> {
    methods
        .iter()
        .filter(|m| m.is_method())
        .map(|m| to_pascal_case(&m.name))
        .collect()
}

/// Getter reading one field through the native struct. Fields whose type
/// has no plain value conversion get none.
fn field_getter(
    ctx: &GenContext,
    owner: &EntityRef,
    field: &FieldInfo,
    getter: &str,
) -> Option<String> {
    let ty = &field.ty;
    match classify(ty.tag) {
        TagClass::Basic
        | TagClass::Boolean
        | TagClass::TypeHandle
        | TagClass::String
        | TagClass::Named => {}
        TagClass::Void
        | TagClass::Array
        | TagClass::List
        | TagClass::Hash
        | TagClass::Error => return None,
    }
    let host = resolve_host(ctx, ty, false).ok()?;
    let place = format!("real_this.{}", c_field_name(&field.name));
    let output = Output {
        real: &place,
        target: "ret",
        transfer: Transfer::None,
        length: None,
    };
    let conversion = output.convert(ctx, ty).ok()?;
    Some(format!(
        "func (this *{name}) {getter}() (ret {host}) {{\n\treal_this := (*C.{c_type})(this.Native())\n{conversion}\treturn ret\n}}\n",
        name = owner.name,
        c_type = owner.c_type(),
    ))
}
