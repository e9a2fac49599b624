//! Type descriptors.
//!
//! A [`TypeInfo`] is the language-neutral shape of one introspected type
//! occurrence: an argument, a return value, a field, or a container element.
//! Descriptors are plain values; they never point back into the namespace
//! they came from. Named types carry an [`EntityRef`] instead.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of an introspected type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeTag {
    Void,
    Boolean,
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Float,
    Double,
    GType,
    Utf8,
    Filename,
    Array,
    Interface,
    GList,
    GSList,
    GHash,
    Error,
    Unichar,
}

impl TypeTag {
    pub const ALL: [TypeTag; 22] = [
        TypeTag::Void,
        TypeTag::Boolean,
        TypeTag::Int8,
        TypeTag::UInt8,
        TypeTag::Int16,
        TypeTag::UInt16,
        TypeTag::Int32,
        TypeTag::UInt32,
        TypeTag::Int64,
        TypeTag::UInt64,
        TypeTag::Float,
        TypeTag::Double,
        TypeTag::GType,
        TypeTag::Utf8,
        TypeTag::Filename,
        TypeTag::Array,
        TypeTag::Interface,
        TypeTag::GList,
        TypeTag::GSList,
        TypeTag::GHash,
        TypeTag::Error,
        TypeTag::Unichar,
    ];

    /// Number of element parameters a descriptor with this tag carries.
    pub fn arity(self) -> usize {
        match self {
            TypeTag::Array | TypeTag::GList | TypeTag::GSList => 1,
            TypeTag::GHash => 2,
            _ => 0,
        }
    }

    pub fn is_string(self) -> bool {
        matches!(self, TypeTag::Utf8 | TypeTag::Filename)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TypeTag::Void => "void",
            TypeTag::Boolean => "boolean",
            TypeTag::Int8 => "int8",
            TypeTag::UInt8 => "uint8",
            TypeTag::Int16 => "int16",
            TypeTag::UInt16 => "uint16",
            TypeTag::Int32 => "int32",
            TypeTag::UInt32 => "uint32",
            TypeTag::Int64 => "int64",
            TypeTag::UInt64 => "uint64",
            TypeTag::Float => "float",
            TypeTag::Double => "double",
            TypeTag::GType => "gtype",
            TypeTag::Utf8 => "utf8",
            TypeTag::Filename => "filename",
            TypeTag::Array => "array",
            TypeTag::Interface => "interface",
            TypeTag::GList => "glist",
            TypeTag::GSList => "gslist",
            TypeTag::GHash => "ghash",
            TypeTag::Error => "error",
            TypeTag::Unichar => "unichar",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Storage flavour of an array descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrayType {
    /// Plain C array: pointer to the first element.
    #[default]
    C,
    /// `GArray`: growable array of fixed-size elements.
    Array,
    /// `GPtrArray`: growable array of pointer-sized words.
    PtrArray,
    /// `GByteArray`: growable array of bytes.
    ByteArray,
}

impl ArrayType {
    pub const ALL: [ArrayType; 4] = [
        ArrayType::C,
        ArrayType::Array,
        ArrayType::PtrArray,
        ArrayType::ByteArray,
    ];
}

/// Extra facts about an array descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ArrayInfo {
    #[serde(default, rename = "type")]
    pub array_type: ArrayType,
    /// Index of the sibling argument carrying the element count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<usize>,
    /// Element count known at compile time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_size: Option<usize>,
    #[serde(default)]
    pub zero_terminated: bool,
}

impl ArrayInfo {
    pub fn new(array_type: ArrayType) -> Self {
        Self {
            array_type,
            ..Self::default()
        }
    }

    pub fn with_length(mut self, index: usize) -> Self {
        self.length = Some(index);
        self
    }

    pub fn with_fixed_size(mut self, size: usize) -> Self {
        self.fixed_size = Some(size);
        self
    }

    pub fn zero_terminated(mut self) -> Self {
        self.zero_terminated = true;
        self
    }
}

/// Kind of a registered type.
///
/// Flags are enums with [`EnumInfo::is_flags`](crate::EnumInfo::is_flags) set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Enum,
    Interface,
    Object,
    Struct,
    Union,
}

impl EntityKind {
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Enum,
        EntityKind::Interface,
        EntityKind::Object,
        EntityKind::Struct,
        EntityKind::Union,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Enum => "enum",
            EntityKind::Interface => "interface",
            EntityKind::Object => "object",
            EntityKind::Struct => "struct",
            EntityKind::Union => "union",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handle to a registered type, possibly living in another namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityRef {
    pub namespace: String,
    pub name: String,
    pub kind: EntityKind,
}

impl EntityRef {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>, kind: EntityKind) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            kind,
        }
    }

    /// Name of the native C type, e.g. `GtkButton` or `GObject`.
    pub fn c_type(&self) -> String {
        format!("{}{}", crate::utils::c_type_prefix(&self.namespace), self.name)
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.namespace, self.name)
    }
}

/// Descriptor of one type occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeInfo {
    pub tag: TypeTag,
    /// Whether the native value is reached through one level of indirection.
    #[serde(default, rename = "pointer")]
    pub is_pointer: bool,
    /// Element descriptors; length must equal `tag.arity()`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<TypeInfo>,
    /// Present exactly when `tag` is [`TypeTag::Interface`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface: Option<EntityRef>,
    /// Present exactly when `tag` is [`TypeTag::Array`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub array: Option<ArrayInfo>,
}

impl TypeInfo {
    pub fn new(tag: TypeTag) -> Self {
        Self {
            tag,
            is_pointer: false,
            params: Vec::new(),
            interface: None,
            array: None,
        }
    }

    pub fn void() -> Self {
        Self::new(TypeTag::Void)
    }

    pub fn utf8() -> Self {
        Self::new(TypeTag::Utf8).pointer()
    }

    pub fn named(entity: EntityRef) -> Self {
        let is_pointer = entity.kind != EntityKind::Enum;
        Self {
            is_pointer,
            interface: Some(entity),
            ..Self::new(TypeTag::Interface)
        }
    }

    pub fn array(info: ArrayInfo, element: TypeInfo) -> Self {
        Self {
            is_pointer: true,
            params: vec![element],
            array: Some(info),
            ..Self::new(TypeTag::Array)
        }
    }

    pub fn list(element: TypeInfo) -> Self {
        Self {
            is_pointer: true,
            params: vec![element],
            ..Self::new(TypeTag::GList)
        }
    }

    pub fn slist(element: TypeInfo) -> Self {
        Self {
            is_pointer: true,
            params: vec![element],
            ..Self::new(TypeTag::GSList)
        }
    }

    pub fn hash(key: TypeInfo, value: TypeInfo) -> Self {
        Self {
            is_pointer: true,
            params: vec![key, value],
            ..Self::new(TypeTag::GHash)
        }
    }

    pub fn error() -> Self {
        Self::new(TypeTag::Error).pointer()
    }

    pub fn pointer(mut self) -> Self {
        self.is_pointer = true;
        self
    }

    pub fn by_value(mut self) -> Self {
        self.is_pointer = false;
        self
    }

    pub fn is_void(&self) -> bool {
        self.tag == TypeTag::Void && !self.is_pointer
    }

    /// Element descriptor at `index`, if the descriptor has one.
    pub fn param(&self, index: usize) -> Option<&TypeInfo> {
        self.params.get(index)
    }

    /// Visits this descriptor and every nested element descriptor, outermost first.
    pub fn walk(&self, f: &mut impl FnMut(&TypeInfo)) {
        f(self);
        for param in &self.params {
            param.walk(f);
        }
    }

    /// Describes the first structural defect found in this descriptor tree.
    pub fn shape_error(&self) -> Option<&'static str> {
        if self.params.len() != self.tag.arity() {
            return Some("wrong number of element types");
        }
        if (self.tag == TypeTag::Interface) != self.interface.is_some() {
            return Some("named type without entity reference");
        }
        match (self.tag == TypeTag::Array, self.array.is_some()) {
            (true, false) => return Some("array without array info"),
            (false, true) => return Some("array info on a non-array type"),
            _ => {}
        }
        self.params.iter().find_map(TypeInfo::shape_error)
    }

    /// Entity kind for named descriptors.
    pub fn entity_kind(&self) -> Option<EntityKind> {
        self.interface.as_ref().map(|e| e.kind)
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_pointer {
            f.write_str("*")?;
        }
        match (&self.interface, &self.array) {
            (Some(entity), _) => write!(f, "{entity}")?,
            (None, Some(array)) => write!(f, "{:?}", array.array_type)?,
            (None, None) => f.write_str(self.tag.as_str())?,
        }
        if self.params.is_empty() {
            return Ok(());
        }
        f.write_str("<")?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{param}")?;
        }
        f.write_str(">")
    }
}
