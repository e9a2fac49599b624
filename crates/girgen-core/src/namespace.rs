//! Namespace: the unit of generation.
//!
//! Entity tables are `IndexMap`s keyed by name, preserving the order of the
//! source data. On the wire each table is a plain JSON array.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::entity::{
    ArgInfo, ConstantInfo, EnumInfo, FunctionInfo, InterfaceInfo, ObjectInfo, StructInfo, UnionInfo,
};
use crate::types::{EntityKind, EntityRef, TypeInfo};

/// Errors raised while loading or validating a namespace.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("invalid namespace data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("`{owner}` references `{reference}`, which is not defined")]
    UnknownEntity { owner: String, reference: EntityRef },

    #[error("`{owner}` expects {expected} `{reference}`, found {found}")]
    WrongKind {
        owner: String,
        reference: EntityRef,
        expected: EntityKind,
        found: EntityKind,
    },

    #[error("inheritance cycle through `{entity}`")]
    InheritanceCycle { entity: String },

    #[error("prerequisite cycle through `{entity}`")]
    PrerequisiteCycle { entity: String },

    #[error("malformed type `{ty}` in `{owner}`: {reason}")]
    MalformedType {
        owner: String,
        ty: String,
        reason: &'static str,
    },
}

/// Borrowed view of one registered type.
#[derive(Debug, Clone, Copy)]
pub enum Entity<'a> {
    Enum(&'a EnumInfo),
    Interface(&'a InterfaceInfo),
    Object(&'a ObjectInfo),
    Struct(&'a StructInfo),
    Union(&'a UnionInfo),
}

impl<'a> Entity<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            Entity::Enum(e) => &e.name,
            Entity::Interface(i) => &i.name,
            Entity::Object(o) => &o.name,
            Entity::Struct(s) => &s.name,
            Entity::Union(u) => &u.name,
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Enum(_) => EntityKind::Enum,
            Entity::Interface(_) => EntityKind::Interface,
            Entity::Object(_) => EntityKind::Object,
            Entity::Struct(_) => EntityKind::Struct,
            Entity::Union(_) => EntityKind::Union,
        }
    }

    pub fn methods(&self) -> &'a [FunctionInfo] {
        match self {
            Entity::Enum(e) => &e.methods,
            Entity::Interface(i) => &i.methods,
            Entity::Object(o) => &o.methods,
            Entity::Struct(s) => &s.methods,
            Entity::Union(u) => &u.methods,
        }
    }

    pub fn is_deprecated(&self) -> bool {
        match self {
            Entity::Enum(e) => e.deprecated,
            Entity::Interface(i) => i.deprecated,
            Entity::Object(o) => o.deprecated,
            Entity::Struct(s) => s.deprecated,
            Entity::Union(u) => u.deprecated,
        }
    }
}

/// All introspected content of one library namespace.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Namespace {
    /// Namespace name, e.g. `Gtk`. Also the prefix of every native type name.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Namespaces this one depends on, as `Name-Version` strings.
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default, with = "by_name")]
    pub constants: IndexMap<String, ConstantInfo>,
    #[serde(default, with = "by_name")]
    pub enums: IndexMap<String, EnumInfo>,
    #[serde(default, with = "by_name")]
    pub interfaces: IndexMap<String, InterfaceInfo>,
    #[serde(default, with = "by_name")]
    pub objects: IndexMap<String, ObjectInfo>,
    #[serde(default, with = "by_name")]
    pub structs: IndexMap<String, StructInfo>,
    #[serde(default, with = "by_name")]
    pub unions: IndexMap<String, UnionInfo>,
    #[serde(default, with = "by_name")]
    pub functions: IndexMap<String, FunctionInfo>,
}

impl Namespace {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Parse and validate namespace JSON.
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let ns: Namespace = serde_json::from_str(json)?;
        ns.validate()?;
        Ok(ns)
    }

    pub fn to_json(&self) -> Result<String, ModelError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Handle to an entity of this namespace.
    pub fn reference(&self, kind: EntityKind, name: &str) -> EntityRef {
        EntityRef::new(&self.name, name, kind)
    }

    /// Resolve a handle. Handles into other namespaces resolve to `None`.
    pub fn lookup(&self, entity: &EntityRef) -> Option<Entity<'_>> {
        if entity.namespace != self.name {
            return None;
        }
        let name = entity.name.as_str();
        match entity.kind {
            EntityKind::Enum => self.enums.get(name).map(Entity::Enum),
            EntityKind::Interface => self.interfaces.get(name).map(Entity::Interface),
            EntityKind::Object => self.objects.get(name).map(Entity::Object),
            EntityKind::Struct => self.structs.get(name).map(Entity::Struct),
            EntityKind::Union => self.unions.get(name).map(Entity::Union),
        }
    }

    pub fn object(&self, entity: &EntityRef) -> Option<&ObjectInfo> {
        match self.lookup(entity)? {
            Entity::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn interface(&self, entity: &EntityRef) -> Option<&InterfaceInfo> {
        match self.lookup(entity)? {
            Entity::Interface(i) => Some(i),
            _ => None,
        }
    }

    /// All entities in emission order: enums, interfaces, objects, structs, unions.
    pub fn entities(&self) -> impl Iterator<Item = Entity<'_>> {
        self.enums
            .values()
            .map(Entity::Enum)
            .chain(self.interfaces.values().map(Entity::Interface))
            .chain(self.objects.values().map(Entity::Object))
            .chain(self.structs.values().map(Entity::Struct))
            .chain(self.unions.values().map(Entity::Union))
    }

    /// Visits every top-level type descriptor together with a readable owner path.
    pub fn for_each_type(&self, mut f: impl FnMut(&str, &TypeInfo)) {
        let ns = &self.name;
        for c in self.constants.values() {
            f(&format!("{ns}.{}", c.name), &c.ty);
        }
        for func in self.functions.values() {
            visit_function(&format!("{ns}.{}", func.name), func, &mut f);
        }
        for entity in self.entities() {
            let owner = format!("{ns}.{}", entity.name());
            for method in entity.methods() {
                visit_function(&format!("{owner}.{}", method.name), method, &mut f);
            }
            match entity {
                Entity::Enum(_) => {}
                Entity::Interface(i) => {
                    for c in &i.constants {
                        f(&format!("{owner}.{}", c.name), &c.ty);
                    }
                    for p in &i.properties {
                        f(&format!("{owner}:{}", p.name), &p.ty);
                    }
                    for s in &i.signals {
                        let path = format!("{owner}::{}", s.name);
                        visit_signature(&path, &s.args, &s.return_type, &mut f);
                    }
                    for v in &i.vfuncs {
                        let path = format!("{owner}.{}", v.name);
                        visit_signature(&path, &v.args, &v.return_type, &mut f);
                    }
                }
                Entity::Object(o) => {
                    for c in &o.constants {
                        f(&format!("{owner}.{}", c.name), &c.ty);
                    }
                    for field in &o.fields {
                        f(&format!("{owner}.{}", field.name), &field.ty);
                    }
                    for p in &o.properties {
                        f(&format!("{owner}:{}", p.name), &p.ty);
                    }
                    for s in &o.signals {
                        let path = format!("{owner}::{}", s.name);
                        visit_signature(&path, &s.args, &s.return_type, &mut f);
                    }
                    for v in &o.vfuncs {
                        let path = format!("{owner}.{}", v.name);
                        visit_signature(&path, &v.args, &v.return_type, &mut f);
                    }
                }
                Entity::Struct(s) => {
                    for field in &s.fields {
                        f(&format!("{owner}.{}", field.name), &field.ty);
                    }
                }
                Entity::Union(u) => {
                    for field in &u.fields {
                        f(&format!("{owner}.{}", field.name), &field.ty);
                    }
                }
            }
        }
    }

    /// Check references, descriptor shapes, and the acyclicity of the
    /// inheritance and prerequisite relations.
    pub fn validate(&self) -> Result<(), ModelError> {
        let mut failure = None;
        self.for_each_type(|owner, ty| {
            if failure.is_some() {
                return;
            }
            if let Some(reason) = ty.shape_error() {
                failure = Some(ModelError::MalformedType {
                    owner: owner.to_string(),
                    ty: ty.to_string(),
                    reason,
                });
                return;
            }
            ty.walk(&mut |t| {
                if failure.is_some() {
                    return;
                }
                if let Some(entity) = &t.interface {
                    failure = self.check_ref(owner, entity, None).err();
                }
            });
        });
        if let Some(err) = failure {
            return Err(err);
        }

        for object in self.objects.values() {
            let owner = format!("{}.{}", self.name, object.name);
            if let Some(parent) = &object.parent {
                self.check_ref(&owner, parent, Some(EntityKind::Object))?;
            }
            for iface in &object.interfaces {
                self.check_ref(&owner, iface, Some(EntityKind::Interface))?;
            }
            self.check_inheritance(object)?;
        }

        for iface in self.interfaces.values() {
            let owner = format!("{}.{}", self.name, iface.name);
            for prereq in &iface.prerequisites {
                if prereq.kind != EntityKind::Interface && prereq.kind != EntityKind::Object {
                    return Err(ModelError::WrongKind {
                        owner,
                        reference: prereq.clone(),
                        expected: EntityKind::Interface,
                        found: prereq.kind,
                    });
                }
                self.check_ref(&owner, prereq, None)?;
            }
            self.check_prerequisites(iface, &mut Vec::new())?;
        }

        Ok(())
    }

    fn check_ref(
        &self,
        owner: &str,
        reference: &EntityRef,
        expected: Option<EntityKind>,
    ) -> Result<(), ModelError> {
        if let Some(expected) = expected {
            if reference.kind != expected {
                return Err(ModelError::WrongKind {
                    owner: owner.to_string(),
                    reference: reference.clone(),
                    expected,
                    found: reference.kind,
                });
            }
        }
        if reference.namespace == self.name && self.lookup(reference).is_none() {
            return Err(ModelError::UnknownEntity {
                owner: owner.to_string(),
                reference: reference.clone(),
            });
        }
        Ok(())
    }

    /// Walks the parent chain while it stays inside this namespace.
    fn check_inheritance(&self, object: &ObjectInfo) -> Result<(), ModelError> {
        let mut seen = HashSet::new();
        seen.insert(object.name.as_str());
        let mut current = object;
        while let Some(parent) = current.parent.as_ref().and_then(|p| self.object(p)) {
            if !seen.insert(parent.name.as_str()) {
                return Err(ModelError::InheritanceCycle {
                    entity: format!("{}.{}", self.name, object.name),
                });
            }
            current = parent;
        }
        Ok(())
    }

    fn check_prerequisites<'a>(
        &'a self,
        iface: &'a InterfaceInfo,
        stack: &mut Vec<&'a str>,
    ) -> Result<(), ModelError> {
        if stack.contains(&iface.name.as_str()) {
            return Err(ModelError::PrerequisiteCycle {
                entity: format!("{}.{}", self.name, iface.name),
            });
        }
        stack.push(&iface.name);
        for prereq in &iface.prerequisites {
            if let Some(next) = self.interface(prereq) {
                self.check_prerequisites(next, stack)?;
            }
        }
        stack.pop();
        Ok(())
    }

    pub fn with_constant(mut self, constant: ConstantInfo) -> Self {
        self.constants.insert(constant.name.clone(), constant);
        self
    }

    pub fn with_enum(mut self, info: EnumInfo) -> Self {
        self.enums.insert(info.name.clone(), info);
        self
    }

    pub fn with_interface(mut self, info: InterfaceInfo) -> Self {
        self.interfaces.insert(info.name.clone(), info);
        self
    }

    pub fn with_object(mut self, info: ObjectInfo) -> Self {
        self.objects.insert(info.name.clone(), info);
        self
    }

    pub fn with_struct(mut self, info: StructInfo) -> Self {
        self.structs.insert(info.name.clone(), info);
        self
    }

    pub fn with_union(mut self, info: UnionInfo) -> Self {
        self.unions.insert(info.name.clone(), info);
        self
    }

    pub fn with_function(mut self, info: FunctionInfo) -> Self {
        self.functions.insert(info.name.clone(), info);
        self
    }
}

fn visit_function(owner: &str, func: &FunctionInfo, f: &mut impl FnMut(&str, &TypeInfo)) {
    visit_signature(owner, &func.args, &func.return_type, f);
}

fn visit_signature(
    owner: &str,
    args: &[ArgInfo],
    ret: &TypeInfo,
    f: &mut impl FnMut(&str, &TypeInfo),
) {
    for arg in args {
        f(&format!("{owner}({})", arg.name), &arg.ty);
    }
    f(owner, ret);
}

/// Serializes a name-keyed table as a JSON array and rejects duplicate names.
mod by_name {
    use indexmap::IndexMap;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use crate::entity::Named;

    pub fn serialize<S, T>(map: &IndexMap<String, T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Serialize,
    {
        serializer.collect_seq(map.values())
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<IndexMap<String, T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de> + Named,
    {
        let items = Vec::<T>::deserialize(deserializer)?;
        let mut map = IndexMap::with_capacity(items.len());
        for item in items {
            let name = item.name().to_string();
            if map.contains_key(&name) {
                return Err(D::Error::custom(format!("duplicate entry `{name}`")));
            }
            map.insert(name, item);
        }
        Ok(map)
    }
}
