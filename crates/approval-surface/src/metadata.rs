//! Surface metadata document emitted by the build for each component.

use serde::{Deserialize, Serialize};

/// The only document version this crate understands.
pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Public,
    Crate,
    Restricted,
    #[default]
    Private,
}

impl Visibility {
    pub fn is_public(self) -> bool {
        self == Visibility::Public
    }

    fn public() -> Self {
        Visibility::Public
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentMetadata {
    pub format_version: u32,
    pub component: String,
    #[serde(default)]
    pub modules: Vec<ModuleMetadata>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleMetadata {
    /// `::`-separated path; empty for the crate root.
    pub path: String,
    #[serde(default = "Visibility::public")]
    pub visibility: Visibility,
    #[serde(default)]
    pub types: Vec<TypeMetadata>,
    #[serde(default)]
    pub functions: Vec<MemberMetadata>,
    #[serde(default)]
    pub constants: Vec<MemberMetadata>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Struct,
    Enum,
    Union,
    Trait,
    TypeAlias,
}

impl TypeKind {
    pub fn keyword(self) -> &'static str {
        match self {
            TypeKind::Struct => "struct",
            TypeKind::Enum => "enum",
            TypeKind::Union => "union",
            TypeKind::Trait => "trait",
            TypeKind::TypeAlias => "type",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeMetadata {
    pub name: String,
    pub kind: TypeKind,
    #[serde(default)]
    pub visibility: Visibility,
    /// Generic parameters in declaration order, e.g. `["T", "const N: usize"]`.
    #[serde(default)]
    pub generics: Vec<String>,
    /// Traits implemented for this type.
    #[serde(default)]
    pub implements: Vec<String>,
    #[serde(default)]
    pub supertraits: Vec<String>,
    #[serde(default)]
    pub members: Vec<MemberMetadata>,
    /// Enum variants in declaration order, payload included (`Some(T)`).
    #[serde(default)]
    pub variants: Vec<String>,
    #[serde(default)]
    pub alias_of: Option<String>,
}

/// Member kinds, declared in rendering order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    Field,
    Constant,
    AssociatedType,
    AssociatedFn,
    #[default]
    Method,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberMetadata {
    pub name: String,
    #[serde(default)]
    pub kind: MemberKind,
    #[serde(default)]
    pub visibility: Visibility,
    /// Field type, constant type, or function signature such as `(&self) -> u32`.
    #[serde(default)]
    pub signature: String,
}
