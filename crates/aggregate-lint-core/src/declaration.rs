//! Declaration snapshots supplied by a host.
//!
//! These are read-only, syntactic views of source declarations. Nothing in
//! them is resolved: base types are kept as the text written in the source.

use crate::types::Location;

/// Access or other keyword modifier on a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Modifier {
    /// `public`
    Public,
    /// `private`
    Private,
    /// `protected`
    Protected,
    /// `internal`
    Internal,
    /// Any other modifier keyword (`static`, `sealed`, `partial`, ...).
    Other(String),
}

impl Modifier {
    /// Maps a modifier keyword to its variant.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword {
            "public" => Self::Public,
            "private" => Self::Private,
            "protected" => Self::Protected,
            "internal" => Self::Internal,
            other => Self::Other(other.to_owned()),
        }
    }
}

fn has_modifier(modifiers: &[Modifier], wanted: &Modifier) -> bool {
    modifiers.iter().any(|m| m == wanted)
}

/// Kind of type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    /// `class Foo`
    Class,
    /// `struct Foo`
    Struct,
    /// `record Foo` / `record struct Foo`
    Record,
    /// `interface IFoo`
    Interface,
}

/// A type declaration with its base-type list and members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDeclaration {
    /// Type name, without type parameters.
    pub name: String,
    /// Kind of type.
    pub kind: TypeKind,
    /// Base-type references as written. `None` when there is no base list.
    pub base_types: Option<Vec<String>>,
    /// Member declarations in source order.
    pub members: Vec<Member>,
    /// Location of the whole type declaration.
    pub location: Location,
}

impl TypeDeclaration {
    /// Creates a class declaration with no base list and no members.
    #[must_use]
    pub fn new(name: impl Into<String>, location: Location) -> Self {
        Self {
            name: name.into(),
            kind: TypeKind::Class,
            base_types: None,
            members: Vec::new(),
            location,
        }
    }

    /// Sets the base-type list.
    #[must_use]
    pub fn with_base_types<I, S>(mut self, base_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.base_types = Some(base_types.into_iter().map(Into::into).collect());
        self
    }

    /// Adds a member declaration.
    #[must_use]
    pub fn with_member(mut self, member: Member) -> Self {
        self.members.push(member);
        self
    }

    /// Iterates the base-type references, empty when there is no base list.
    pub fn base_type_refs(&self) -> impl Iterator<Item = &str> {
        self.base_types.iter().flatten().map(String::as_str)
    }
}

/// A member of a type declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Member {
    /// Instance or static constructor.
    Constructor(ConstructorDeclaration),
    /// Method.
    Method(MethodDeclaration),
    /// Nested type.
    Type(TypeDeclaration),
}

/// Body of a constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstructorBody {
    /// `{ ... }` with the number of statements directly inside the block.
    Block {
        /// Statement count.
        statements: usize,
    },
    /// `=> expr;`
    Expression,
    /// No body at all (`extern` or otherwise bodiless).
    Absent,
}

impl ConstructorBody {
    /// Whether the body is a block containing at least one statement.
    ///
    /// Expression bodies have no statement block and report `false`.
    #[must_use]
    pub fn has_statements(self) -> bool {
        matches!(self, Self::Block { statements } if statements > 0)
    }
}

/// A constructor declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorDeclaration {
    /// Name of the owning type.
    pub owner: String,
    /// Declared name.
    pub name: String,
    /// Modifiers in source order.
    pub modifiers: Vec<Modifier>,
    /// Number of declared parameters.
    pub parameter_count: usize,
    /// Constructor body.
    pub body: ConstructorBody,
    /// Location of the whole declaration.
    pub location: Location,
}

impl ConstructorDeclaration {
    /// Creates a parameterless constructor with an empty block body and no modifiers.
    #[must_use]
    pub fn new(name: impl Into<String>, location: Location) -> Self {
        let name = name.into();
        Self {
            owner: name.clone(),
            name,
            modifiers: Vec::new(),
            parameter_count: 0,
            body: ConstructorBody::Block { statements: 0 },
            location,
        }
    }

    /// Sets the modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: impl IntoIterator<Item = Modifier>) -> Self {
        self.modifiers = modifiers.into_iter().collect();
        self
    }

    /// Sets the parameter count.
    #[must_use]
    pub fn with_parameters(mut self, count: usize) -> Self {
        self.parameter_count = count;
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn with_body(mut self, body: ConstructorBody) -> Self {
        self.body = body;
        self
    }

    /// Whether `public` is among the modifiers.
    #[must_use]
    pub fn is_public(&self) -> bool {
        has_modifier(&self.modifiers, &Modifier::Public)
    }

    /// Whether `private` is among the modifiers (`private protected` counts).
    #[must_use]
    pub fn is_private(&self) -> bool {
        has_modifier(&self.modifiers, &Modifier::Private)
    }

    /// Whether any parameters are declared.
    #[must_use]
    pub fn has_parameters(&self) -> bool {
        self.parameter_count > 0
    }
}

/// A method declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDeclaration {
    /// Name of the owning type.
    pub owner: String,
    /// Declared name.
    pub name: String,
    /// Modifiers in source order.
    pub modifiers: Vec<Modifier>,
    /// Location of the whole declaration.
    pub location: Location,
}

impl MethodDeclaration {
    /// Creates a method with no modifiers.
    #[must_use]
    pub fn new(owner: impl Into<String>, name: impl Into<String>, location: Location) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
            modifiers: Vec::new(),
            location,
        }
    }

    /// Sets the modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: impl IntoIterator<Item = Modifier>) -> Self {
        self.modifiers = modifiers.into_iter().collect();
        self
    }

    /// Whether `public` is among the modifiers.
    #[must_use]
    pub fn is_public(&self) -> bool {
        has_modifier(&self.modifiers, &Modifier::Public)
    }
}

/// A declaration handed to the rules.
///
/// Methods travel with their owning type so rules can inspect its base list.
#[derive(Debug, Clone, Copy)]
pub enum Declaration<'a> {
    /// A constructor.
    Constructor(&'a ConstructorDeclaration),
    /// A method and the type declaring it.
    Method {
        /// The method.
        method: &'a MethodDeclaration,
        /// The type that declares the method.
        owner: &'a TypeDeclaration,
    },
}

impl Declaration<'_> {
    /// Location of the underlying declaration.
    #[must_use]
    pub fn location(&self) -> &Location {
        match self {
            Self::Constructor(ctor) => &ctor.location,
            Self::Method { method, .. } => &method.location,
        }
    }
}
