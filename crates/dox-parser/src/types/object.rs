use serde::Serialize;

use super::{Description, Location, Parameter};

/// The variant of a [`DoxygenObject`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    Compound,
    Define,
    Enum,
    Function,
    Variable,
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Compound => "compound",
            Self::Define => "define",
            Self::Enum => "enum",
            Self::Function => "function",
            Self::Variable => "variable",
        };
        write!(f, "{s}")
    }
}

/// Kind of a compound, from the `kind` attribute of `<compounddef>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompoundType {
    Group,
    Struct,
    Union,
}

impl CompoundType {
    #[must_use]
    pub fn from_kind(kind: &str) -> Option<Self> {
        match kind {
            "group" => Some(Self::Group),
            "struct" => Some(Self::Struct),
            "union" => Some(Self::Union),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Group => "group",
            Self::Struct => "struct",
            Self::Union => "union",
        }
    }
}

impl std::fmt::Display for CompoundType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A function declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Function {
    /// Return type, normalized.
    #[serde(rename = "type")]
    pub return_type: String,
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub description: Option<Description>,
    pub location: Location,
}

/// A preprocessor macro.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Define {
    pub name: String,
    /// `None` for object-like macros, `Some(vec![])` for `NAME()`.
    pub parameters: Option<Vec<Parameter>>,
    /// Macro body, verbatim.
    pub value: Option<String>,
    pub description: Option<Description>,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumValue {
    pub name: String,
    /// Raw initializer text including the `=`, e.g. `= 5`.
    pub initializer: Option<String>,
    pub description: Option<Description>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Enum {
    pub name: String,
    pub values: Vec<EnumValue>,
    pub description: Option<Description>,
    pub location: Location,
}

/// A variable, or a field when it is a member of a struct or union.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Variable {
    #[serde(rename = "type")]
    pub var_type: String,
    pub name: String,
    pub qualified_name: String,
    pub initializer: Option<String>,
    pub description: Option<Description>,
    pub location: Location,
}

/// A struct, union, or documentation group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Compound {
    #[serde(rename = "type")]
    pub compound_type: CompoundType,
    pub name: String,
    pub title: String,
    /// Nested compounds first, then direct members, each in declaration order.
    pub members: Vec<DoxygenObject>,
    pub description: Option<Description>,
    pub location: Option<Location>,
}

/// Any documented entity that can be collected from the index.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DoxygenObject {
    Function(Function),
    Define(Define),
    Enum(Enum),
    Variable(Variable),
    Compound(Compound),
}

impl DoxygenObject {
    #[must_use]
    pub const fn kind(&self) -> ObjectKind {
        match self {
            Self::Function(_) => ObjectKind::Function,
            Self::Define(_) => ObjectKind::Define,
            Self::Enum(_) => ObjectKind::Enum,
            Self::Variable(_) => ObjectKind::Variable,
            Self::Compound(_) => ObjectKind::Compound,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Function(f) => &f.name,
            Self::Define(d) => &d.name,
            Self::Enum(e) => &e.name,
            Self::Variable(v) => &v.name,
            Self::Compound(c) => &c.name,
        }
    }

    /// Name used as the cross-reference target.
    #[must_use]
    pub fn qualified_name(&self) -> &str {
        match self {
            Self::Variable(v) => &v.qualified_name,
            _ => self.name(),
        }
    }

    /// Cross-reference role: `func`, `macro`, `enum`, `var`, or the compound type.
    #[must_use]
    pub const fn role(&self) -> &'static str {
        match self {
            Self::Function(_) => "func",
            Self::Define(_) => "macro",
            Self::Enum(_) => "enum",
            Self::Variable(_) => "var",
            Self::Compound(c) => c.compound_type.as_str(),
        }
    }

    #[must_use]
    pub const fn description(&self) -> Option<&Description> {
        match self {
            Self::Function(f) => f.description.as_ref(),
            Self::Define(d) => d.description.as_ref(),
            Self::Enum(e) => e.description.as_ref(),
            Self::Variable(v) => v.description.as_ref(),
            Self::Compound(c) => c.description.as_ref(),
        }
    }

    #[must_use]
    pub const fn location(&self) -> Option<&Location> {
        match self {
            Self::Function(f) => Some(&f.location),
            Self::Define(d) => Some(&d.location),
            Self::Enum(e) => Some(&e.location),
            Self::Variable(v) => Some(&v.location),
            Self::Compound(c) => c.location.as_ref(),
        }
    }

    /// Context attached to cross-references emitted while rendering this
    /// object, so broken links can be reported against a source position.
    #[must_use]
    pub fn ref_context(&self) -> RefContext {
        let (filepath, lineno) = self
            .location()
            .map_or_else(|| (String::new(), 0), |l| (l.file.clone(), l.line));
        RefContext {
            domain: "c",
            role: self.role(),
            origin: self.qualified_name().to_string(),
            filepath,
            lineno,
        }
    }
}

/// Cross-reference context for the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefContext {
    pub domain: &'static str,
    pub role: &'static str,
    pub origin: String,
    pub filepath: String,
    pub lineno: u32,
}
