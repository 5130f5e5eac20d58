//! Declarations of the resolved tree.
//!
//! Declarations live in an arena owned by [`crate::ResolvedProgram`] and are
//! addressed by [`DeclId`]. Every declaration records its enclosing
//! declaration, which is all the lowering needs to compute its path.

use serde::{Deserialize, Serialize};
use tern_common::SourceLoc;

use crate::expr::{BoundVar, Expr};
use crate::stmt::Stmt;
use crate::ty::Type;

/// Index of a declaration in the program arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeclId(pub u32);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decl {
    pub name: String,
    pub loc: SourceLoc,
    /// Enclosing module, class or datatype. `None` only for the root module.
    pub parent: Option<DeclId>,
    pub kind: DeclKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeclKind {
    Module(ModuleDecl),
    Import(ImportDecl),
    Export(ExportDecl),
    Class(ClassDecl),
    Datatype(DatatypeDecl),
    Constructor(CtorDecl),
    Destructor(DestructorDecl),
    TypeSynonym(TypeSynonymDecl),
    SubsetType(SubsetTypeDecl),
    Newtype(NewtypeDecl),
    OpaqueType(OpaqueTypeDecl),
    Iterator(IteratorDecl),
    Function(FunctionDecl),
    Method(MethodDecl),
    Const(ConstDecl),
    Field(FieldDecl),
}

impl DeclKind {
    /// Short human-readable name of the declaration kind.
    pub fn describe(&self) -> &'static str {
        match self {
            DeclKind::Module(_) => "module",
            DeclKind::Import(_) => "import",
            DeclKind::Export(_) => "export set",
            DeclKind::Class(c) if c.is_trait => "trait",
            DeclKind::Class(_) => "class",
            DeclKind::Datatype(d) if d.is_codatatype => "codatatype",
            DeclKind::Datatype(_) => "datatype",
            DeclKind::Constructor(_) => "datatype constructor",
            DeclKind::Destructor(_) => "datatype destructor",
            DeclKind::TypeSynonym(_) => "type synonym",
            DeclKind::SubsetType(_) => "subset type",
            DeclKind::Newtype(_) => "newtype",
            DeclKind::OpaqueType(_) => "opaque type",
            DeclKind::Iterator(_) => "iterator",
            DeclKind::Function(f) => match f.kind {
                FunctionKind::Function => "function",
                FunctionKind::Predicate => "predicate",
            },
            DeclKind::Method(m) => match m.kind {
                MethodKind::Method => "method",
                MethodKind::Lemma => "lemma",
                MethodKind::Constructor => "constructor",
            },
            DeclKind::Const(_) => "const",
            DeclKind::Field(_) => "field",
        }
    }
}

/// Variance annotation on a type parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variance {
    /// `T` (non-variant, strict).
    #[default]
    NonVariantStrict,
    /// `!T`
    NonVariantLax,
    /// `+T`
    CovariantStrict,
    /// `*T`
    CovariantLax,
    /// `-T`
    Contravariant,
}

impl Variance {
    /// The source-level prefix of the annotation.
    pub fn prefix(self) -> &'static str {
        match self {
            Variance::NonVariantStrict => "",
            Variance::NonVariantLax => "!",
            Variance::CovariantStrict => "+",
            Variance::CovariantLax => "*",
            Variance::Contravariant => "-",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeParam {
    pub name: String,
    #[serde(default)]
    pub variance: Variance,
}

impl TypeParam {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variance: Variance::NonVariantStrict,
        }
    }

    pub fn with_variance(name: impl Into<String>, variance: Variance) -> Self {
        Self {
            name: name.into(),
            variance,
        }
    }
}

/// A routine parameter, routine output or constructor field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Formal {
    pub name: String,
    pub ty: Type,
    #[serde(default)]
    pub is_ghost: bool,
}

impl Formal {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
            is_ghost: false,
        }
    }

    pub fn ghost(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
            is_ghost: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ModuleDecl {
    #[serde(default)]
    pub members: Vec<DeclId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportDecl {
    pub target: DeclId,
    #[serde(default)]
    pub opened: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExportDecl {
    #[serde(default)]
    pub provides: Vec<String>,
    #[serde(default)]
    pub reveals: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClassDecl {
    #[serde(default)]
    pub is_trait: bool,
    /// The implicit class holding a module's top-level routines.
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub type_params: Vec<TypeParam>,
    #[serde(default)]
    pub parent_traits: Vec<Type>,
    #[serde(default)]
    pub members: Vec<DeclId>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DatatypeDecl {
    #[serde(default)]
    pub is_codatatype: bool,
    #[serde(default)]
    pub type_params: Vec<TypeParam>,
    #[serde(default)]
    pub ctors: Vec<DeclId>,
    #[serde(default)]
    pub members: Vec<DeclId>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CtorDecl {
    #[serde(default)]
    pub formals: Vec<Formal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DestructorDecl {
    pub ty: Type,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeSynonymDecl {
    #[serde(default)]
    pub type_params: Vec<TypeParam>,
    pub rhs: Type,
}

/// `type T = x: Base | constraint`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubsetTypeDecl {
    #[serde(default)]
    pub type_params: Vec<TypeParam>,
    pub var: BoundVar,
    pub constraint: Expr,
}

/// `newtype T = x: Base | constraint`, or `newtype T = Base`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewtypeDecl {
    pub var: BoundVar,
    #[serde(default)]
    pub constraint: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OpaqueTypeDecl {
    #[serde(default)]
    pub type_params: Vec<TypeParam>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IteratorDecl {
    #[serde(default)]
    pub type_params: Vec<TypeParam>,
    #[serde(default)]
    pub ins: Vec<Formal>,
    #[serde(default)]
    pub outs: Vec<Formal>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FunctionKind {
    Function,
    Predicate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDecl {
    /// `kind` on the wire is the tag of the enclosing [`DeclKind`].
    #[serde(rename = "function_kind")]
    pub kind: FunctionKind,
    #[serde(default)]
    pub is_ghost: bool,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub type_params: Vec<TypeParam>,
    #[serde(default)]
    pub formals: Vec<Formal>,
    /// Result type; the name is present for `function f(): (r: T)`.
    pub result: Formal,
    #[serde(default)]
    pub body: Option<Expr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodKind {
    Method,
    Lemma,
    Constructor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDecl {
    #[serde(rename = "method_kind")]
    pub kind: MethodKind,
    #[serde(default)]
    pub is_ghost: bool,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub type_params: Vec<TypeParam>,
    #[serde(default)]
    pub ins: Vec<Formal>,
    #[serde(default)]
    pub outs: Vec<Formal>,
    #[serde(default)]
    pub body: Option<Vec<Stmt>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstDecl {
    pub ty: Type,
    #[serde(default)]
    pub rhs: Option<Expr>,
    #[serde(default)]
    pub is_ghost: bool,
    #[serde(default)]
    pub is_static: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDecl {
    pub ty: Type,
    #[serde(default)]
    pub is_ghost: bool,
}
