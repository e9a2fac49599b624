//! Human-readable namespace dump for debugging.
//!
//! One block per entity, in the emitter's order. Every type occurrence is
//! shown with both its native and its host spelling, so resolution problems
//! are visible without generating a whole file. Types that fail to resolve
//! print the error in place instead of aborting the dump.

use girgen_core::{
    ArgInfo, Colors, ConstantValue, Direction, EnumInfo, FieldInfo, FunctionInfo, InterfaceInfo,
    Namespace, ObjectInfo, PropertyInfo, SignalInfo, StructInfo, TypeInfo, UnionInfo, VFuncInfo,
};

use crate::resolve::{resolve_host, resolve_native};
use crate::{Config, GenContext};

/// Generate a human-readable dump of the namespace.
pub fn dump(ns: &Namespace, config: &Config) -> String {
    let mut dumper = Dumper {
        ctx: GenContext::for_namespace(ns, config),
        c: config.colors,
        out: String::new(),
    };
    dumper.header(ns);
    for constant in ns.constants.values() {
        let value = match &constant.value {
            ConstantValue::Bool(b) => b.to_string(),
            ConstantValue::Int(i) => i.to_string(),
            ConstantValue::Float(f) => f.to_string(),
            ConstantValue::String(s) => format!("{s:?}"),
        };
        let ty = dumper.ty(&constant.ty, false);
        dumper.gap();
        dumper.line(0, format!("constant {}: {ty} = {value}", dumper.name(&constant.name)));
    }
    for info in ns.enums.values() {
        dumper.enumeration(info);
    }
    for info in ns.interfaces.values() {
        dumper.interface(info);
    }
    for info in ns.objects.values() {
        dumper.object(info);
    }
    for info in ns.structs.values() {
        dumper.record("struct", info);
    }
    for info in ns.unions.values() {
        dumper.record("union", info);
    }
    for func in ns.functions.values() {
        dumper.gap();
        dumper.function(0, func);
    }
    dumper.out
}

struct Dumper {
    ctx: GenContext,
    c: Colors,
    out: String,
}

impl Dumper {
    fn line(&mut self, depth: usize, text: impl AsRef<str>) {
        for _ in 0..depth {
            self.out.push_str("  ");
        }
        self.out.push_str(text.as_ref());
        self.out.push('\n');
    }

    /// Blank line between blocks.
    fn gap(&mut self) {
        if !self.out.is_empty() {
            self.out.push('\n');
        }
    }

    fn name(&self, name: &str) -> String {
        format!("{}{name}{}", self.c.name, self.c.reset)
    }

    fn keyword(&self, word: &str) -> String {
        format!("{}{word}{}", self.c.dim, self.c.reset)
    }

    /// `native / host`, with `void` standing in for an empty spelling.
    fn ty(&self, ty: &TypeInfo, is_arg: bool) -> String {
        let c = &self.c;
        let native = resolve_native(ty);
        let host = resolve_host(&self.ctx, ty, is_arg);
        match (native, host) {
            (Ok(native), Ok(host)) => {
                let native = if native.is_empty() { "void".to_string() } else { native };
                let host = if host.is_empty() { "void".to_string() } else { host };
                format!(
                    "{}{native}{} {}/{} {}{host}{}",
                    c.native, c.reset, c.dim, c.reset, c.host, c.reset
                )
            }
            (Err(err), _) | (_, Err(err)) => format!("{}<{err}>{}", c.dim, c.reset),
        }
    }

    fn header(&mut self, ns: &Namespace) {
        let title = format!("{} {}", self.keyword("namespace"), self.name(&ns.name));
        self.line(0, title);
        if let Some(version) = &ns.version {
            let text = format!("{} {version}", self.keyword("version"));
            self.line(1, text);
        }
        let text = format!("{} {}", self.keyword("package"), self.ctx.package());
        self.line(1, text);
        for dependency in &ns.dependencies {
            let text = format!("{} {dependency}", self.keyword("depends"));
            self.line(1, text);
        }
    }

    fn enumeration(&mut self, info: &EnumInfo) {
        self.gap();
        let kind = if info.is_flags { "flags" } else { "enum" };
        let storage = self.ty(&TypeInfo::new(info.storage), false);
        let title = format!("{} {}: {storage}", self.keyword(kind), self.name(&info.name));
        self.line(0, title);
        if let Some(domain) = &info.error_domain {
            let text = format!("{} {domain}", self.keyword("error domain"));
            self.line(1, text);
        }
        for value in &info.values {
            let text = format!("{} = {}{}", value.name, value.value, deprecated(value.deprecated));
            self.line(1, text);
        }
        for func in &info.methods {
            self.function(1, func);
        }
    }

    fn interface(&mut self, info: &InterfaceInfo) {
        self.gap();
        let title = format!(
            "{} {}{}",
            self.keyword("interface"),
            self.name(&info.name),
            deprecated(info.deprecated)
        );
        self.line(0, title);
        for prerequisite in &info.prerequisites {
            let text = format!("{} {prerequisite}", self.keyword("requires"));
            self.line(1, text);
        }
        self.members(&info.methods, &info.properties, &info.signals, &info.vfuncs);
    }

    fn object(&mut self, info: &ObjectInfo) {
        self.gap();
        let mut title = format!("{} {}", self.keyword("object"), self.name(&info.name));
        if let Some(parent) = &info.parent {
            title.push_str(&format!(": {parent}"));
        }
        if info.is_abstract {
            title.push_str(&format!(" {}", self.keyword("abstract")));
        }
        title.push_str(deprecated(info.deprecated));
        self.line(0, title);
        for iface in &info.interfaces {
            let text = format!("{} {iface}", self.keyword("implements"));
            self.line(1, text);
        }
        self.fields(&info.fields);
        self.members(&info.methods, &info.properties, &info.signals, &info.vfuncs);
    }

    fn record(&mut self, kind: &str, info: &impl Record) {
        self.gap();
        let mut title = format!(
            "{} {} {}",
            self.keyword(kind),
            self.name(info.name()),
            self.keyword(&format!("({} bytes)", info.size()))
        );
        if info.is_class() {
            title.push_str(&format!(" {}", self.keyword("class")));
        }
        title.push_str(deprecated(info.deprecated()));
        self.line(0, title);
        self.fields(info.fields());
        for func in info.methods() {
            self.function(1, func);
        }
    }

    fn fields(&mut self, fields: &[FieldInfo]) {
        for field in fields {
            let ty = self.ty(&field.ty, false);
            let access = match (field.readable, field.writable) {
                (true, true) => "",
                (true, false) => " (read-only)",
                (false, true) => " (write-only)",
                (false, false) => " (private)",
            };
            let text = format!("{} {}: {ty}{access}", self.keyword("field"), field.name);
            self.line(1, text);
        }
    }

    fn members(
        &mut self,
        methods: &[FunctionInfo],
        properties: &[PropertyInfo],
        signals: &[SignalInfo],
        vfuncs: &[VFuncInfo],
    ) {
        for property in properties {
            let ty = self.ty(&property.ty, false);
            let text = format!("{} {}: {ty}", self.keyword("property"), property.name);
            self.line(1, text);
        }
        for func in methods {
            self.function(1, func);
        }
        for signal in signals {
            let text = format!(
                "{} {}{}",
                self.keyword("signal"),
                signal.name,
                deprecated(signal.deprecated)
            );
            self.line(1, text);
            self.args(2, &signal.args, &signal.return_type);
        }
        for vfunc in vfuncs {
            let mut text = format!("{} {}", self.keyword("vfunc"), vfunc.name);
            if let Some(invoker) = &vfunc.invoker {
                text.push_str(&format!(" {} {invoker}", self.keyword("invoked by")));
            }
            self.line(1, text);
            self.args(2, &vfunc.args, &vfunc.return_type);
        }
    }

    fn function(&mut self, depth: usize, func: &FunctionInfo) {
        let kind = if func.flags.is_constructor {
            "constructor"
        } else if func.is_method() {
            "method"
        } else {
            "function"
        };
        let mut text = format!(
            "{} {} {}",
            self.keyword(kind),
            self.name(&func.name),
            self.keyword(&format!("({})", func.symbol))
        );
        if func.flags.throws {
            text.push_str(&format!(" {}", self.keyword("throws")));
        }
        text.push_str(deprecated(func.deprecated));
        self.line(depth, text);
        self.args(depth + 1, &func.args, &func.return_type);
    }

    fn args(&mut self, depth: usize, args: &[ArgInfo], return_type: &TypeInfo) {
        for arg in args {
            let direction = match arg.direction {
                Direction::In => "in",
                Direction::Out => "out",
                Direction::InOut => "inout",
            };
            let ty = self.ty(&arg.ty, arg.direction == Direction::In);
            let mut text = format!("{} {}: {ty}", self.keyword(direction), arg.name);
            if arg.skip {
                text.push_str(&format!(" {}", self.keyword("skip")));
            }
            self.line(depth, text);
        }
        if !return_type.is_void() {
            let text = format!("{} {}", self.keyword("return"), self.ty(return_type, false));
            self.line(depth, text);
        }
    }
}

fn deprecated(deprecated: bool) -> &'static str {
    if deprecated { " (deprecated)" } else { "" }
}

/// Common view of structs and unions.
trait Record {
    fn name(&self) -> &str;
    fn size(&self) -> usize;
    fn is_class(&self) -> bool;
    fn deprecated(&self) -> bool;
    fn fields(&self) -> &[FieldInfo];
    fn methods(&self) -> &[FunctionInfo];
}

impl Record for StructInfo {
    fn name(&self) -> &str {
        &self.name
    }
    fn size(&self) -> usize {
        self.size
    }
    fn is_class(&self) -> bool {
        self.is_gtype_struct
    }
    fn deprecated(&self) -> bool {
        self.deprecated
    }
    fn fields(&self) -> &[FieldInfo] {
        &self.fields
    }
    fn methods(&self) -> &[FunctionInfo] {
        &self.methods
    }
}

impl Record for UnionInfo {
    fn name(&self) -> &str {
        &self.name
    }
    fn size(&self) -> usize {
        self.size
    }
    fn is_class(&self) -> bool {
        false
    }
    fn deprecated(&self) -> bool {
        self.deprecated
    }
    fn fields(&self) -> &[FieldInfo] {
        &self.fields
    }
    fn methods(&self) -> &[FunctionInfo] {
        &self.methods
    }
}
