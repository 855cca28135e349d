//! Data model exchanged across the script bridge
//!
//! Bookmarks and declarations are built from guest arguments, handed to the
//! event bus and never retained by the bridge itself.

use std::fmt;

use serde::Serialize;

// ============================================================================
// Bookmark
// ============================================================================

/// A named region of the opened data.
///
/// Whether `address + size` lies inside the data is up to the consumer of
/// the bookmark event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bookmark {
    /// Start address
    pub address: u64,
    /// Region length in bytes
    pub size: u64,
    /// Display name
    pub name: String,
    /// Free-form comment
    pub comment: String,
}

// ============================================================================
// PatchRequest
// ============================================================================

/// A byte patch to apply to the opened data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchRequest {
    /// First address to overwrite
    pub address: u64,
    /// Replacement bytes, never empty once validated
    pub bytes: Vec<u8>,
}

impl PatchRequest {
    /// One past the last address written.
    pub fn end(&self) -> u64 {
        self.address.saturating_add(self.bytes.len() as u64)
    }
}

// ============================================================================
// TypeDescriptor
// ============================================================================

/// A single member of a translated type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Member {
    /// Field name
    pub name: String,
    /// Name of the field's declared type
    pub type_name: String,
}

/// Name and ordered members of a guest class.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TypeDescriptor {
    /// Name of the type being declared
    pub type_name: String,
    /// Members in declaration order
    pub members: Vec<Member>,
}

impl TypeDescriptor {
    /// Create a descriptor with no members.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            members: Vec::new(),
        }
    }

    /// Append a member, keeping declaration order.
    pub fn push(&mut self, name: impl Into<String>, type_name: impl Into<String>) {
        self.members.push(Member {
            name: name.into(),
            type_name: type_name.into(),
        });
    }
}

// ============================================================================
// Declaration
// ============================================================================

/// Which pattern-language keyword a declaration uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclarationKind {
    /// `struct`
    Struct,
    /// `union`
    Union,
}

impl DeclarationKind {
    /// Keyword as written in pattern source
    pub fn keyword(self) -> &'static str {
        match self {
            DeclarationKind::Struct => "struct",
            DeclarationKind::Union => "union",
        }
    }
}

impl fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A struct or union declaration in pattern-language source form.
///
/// `Display` renders the text handed to the pattern parser:
///
/// ```text
/// struct Header {
///    u32 magic;
///    u16 version;
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Declaration {
    /// Keyword to emit
    pub kind: DeclarationKind,
    /// Type name and members
    pub descriptor: TypeDescriptor,
}

impl Declaration {
    /// Pair a keyword with a descriptor.
    pub fn new(kind: DeclarationKind, descriptor: TypeDescriptor) -> Self {
        Self { kind, descriptor }
    }

    /// Rendered source text
    pub fn to_source(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {} {{", self.kind, self.descriptor.type_name)?;
        for member in &self.descriptor.members {
            writeln!(f, "   {} {};", member.type_name, member.name)?;
        }
        writeln!(f, "}};")
    }
}
