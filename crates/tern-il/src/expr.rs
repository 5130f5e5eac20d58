//! IL expressions.
//!
//! The IL has no statement category: assignments, loops and returns are
//! expressions of unit type, sequenced with [`Expr::Block`]. Every operator
//! is monomorphic; collection operations name the collection they act on.

use serde::{Deserialize, Serialize};

use crate::path::Path;
use crate::ty::Type;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Literal {
    Bool {
        value: bool,
    },
    Char {
        value: char,
    },
    String {
        value: String,
    },
    /// Arbitrary-precision integer in decimal, with its resolved numeric type
    /// (`int`, `nat`, a bit-vector or a newtype).
    Int {
        value: String,
        ty: Type,
    },
    Real {
        value: String,
        ty: Type,
    },
    Null {
        ty: Type,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnOp {
    Not,
    BitNot,
    Neg,
    SeqLength,
    StringLength,
    SetCardinality,
    MultisetCardinality,
    MapCardinality,
    MapKeys,
    MapValues,
    MapItems,
    /// Length of the given array dimension.
    ArrayLength { dim: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    Neq,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
    Implies,
    Iff,
    BitAnd,
    BitOr,
    BitXor,
    LeftShift,
    RightShift,
    SeqConcat,
    SeqPrefix,
    SeqProperPrefix,
    SeqContains,
    StringConcat,
    StringPrefix,
    StringProperPrefix,
    StringContains,
    SetUnion,
    SetIntersection,
    SetDifference,
    SetSubset,
    SetProperSubset,
    SetSuperset,
    SetProperSuperset,
    SetContains,
    SetDisjoint,
    MultisetUnion,
    MultisetIntersection,
    MultisetDifference,
    MultisetSubset,
    MultisetProperSubset,
    MultisetSuperset,
    MultisetProperSuperset,
    MultisetContains,
    MultisetDisjoint,
    MapMerge,
    MapSubtract,
    MapContainsKey,
}

/// A typed binder: routine parameter, lambda parameter, bound variable or
/// pattern binding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub ty: Type,
    #[serde(default)]
    pub ghost: bool,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
            ghost: false,
        }
    }
}

/// How a `Let` treats its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LetMode {
    #[default]
    Plain,
    /// Bind the success value of a failure-compatible value, or propagate
    /// the failure out of the enclosing routine.
    OrFail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantKind {
    Forall,
    Exists,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CasePattern {
    Ctor { ctor: Path, binds: Vec<Param> },
    Tuple { binds: Vec<Param> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchArm {
    pub pattern: CasePattern,
    pub body: Expr,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AssignTarget {
    Var {
        name: String,
    },
    Field {
        receiver: Option<Box<Expr>>,
        field: Path,
    },
    Index {
        array: Box<Expr>,
        index: Box<Expr>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expr {
    Literal {
        value: Literal,
    },
    Var {
        name: String,
    },
    This,
    /// A static field, constant or function used as a value.
    Global {
        path: Path,
    },
    FieldAccess {
        receiver: Box<Expr>,
        field: Path,
    },
    TupleSelect {
        tuple: Box<Expr>,
        index: usize,
    },
    /// Datatype destructor applied to a value.
    Destruct {
        value: Box<Expr>,
        field: Path,
    },
    Call {
        callee: Path,
        #[serde(default)]
        receiver: Option<Box<Expr>>,
        #[serde(default)]
        type_args: Vec<Type>,
        args: Vec<Expr>,
    },
    /// Application of a function value.
    Apply {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    Construct {
        ctor: Path,
        #[serde(default)]
        type_args: Vec<Type>,
        args: Vec<Expr>,
    },
    Tuple {
        elems: Vec<Expr>,
    },
    SeqDisplay {
        elems: Vec<Expr>,
    },
    StringDisplay {
        elems: Vec<Expr>,
    },
    SetDisplay {
        elems: Vec<Expr>,
    },
    MultisetDisplay {
        elems: Vec<Expr>,
    },
    MapDisplay {
        entries: Vec<(Expr, Expr)>,
    },
    SeqIndex {
        seq: Box<Expr>,
        index: Box<Expr>,
    },
    StringIndex {
        string: Box<Expr>,
        index: Box<Expr>,
    },
    ArrayIndex {
        array: Box<Expr>,
        indices: Vec<Expr>,
    },
    MapLookup {
        map: Box<Expr>,
        key: Box<Expr>,
    },
    /// Multiplicity of an element in a multiset.
    MultisetCount {
        multiset: Box<Expr>,
        elem: Box<Expr>,
    },
    SeqSlice {
        seq: Box<Expr>,
        lo: Option<Box<Expr>>,
        hi: Option<Box<Expr>>,
    },
    StringSlice {
        string: Box<Expr>,
        lo: Option<Box<Expr>>,
        hi: Option<Box<Expr>>,
    },
    /// Array range as a sequence.
    ArraySlice {
        array: Box<Expr>,
        lo: Option<Box<Expr>>,
        hi: Option<Box<Expr>>,
    },
    SeqUpdate {
        seq: Box<Expr>,
        index: Box<Expr>,
        value: Box<Expr>,
    },
    StringUpdate {
        string: Box<Expr>,
        index: Box<Expr>,
        value: Box<Expr>,
    },
    MapUpdate {
        map: Box<Expr>,
        key: Box<Expr>,
        value: Box<Expr>,
    },
    MultisetUpdate {
        multiset: Box<Expr>,
        elem: Box<Expr>,
        count: Box<Expr>,
    },
    UnOp {
        op: UnOp,
        operand: Box<Expr>,
    },
    BinOp {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Convert {
        expr: Box<Expr>,
        from: Type,
        to: Type,
    },
    Lambda {
        params: Vec<Param>,
        body: Box<Expr>,
    },
    If {
        cond: Box<Expr>,
        then_body: Box<Expr>,
        #[serde(default)]
        else_body: Option<Box<Expr>>,
    },
    Match {
        scrutinee: Box<Expr>,
        arms: Vec<MatchArm>,
    },
    /// Scoped binding. `value` is absent for a declared but uninitialized
    /// local.
    Let {
        name: String,
        ty: Type,
        #[serde(default)]
        value: Option<Box<Expr>>,
        body: Box<Expr>,
        #[serde(default)]
        mode: LetMode,
        #[serde(default)]
        ghost: bool,
    },
    Quantifier {
        quantifier: QuantKind,
        vars: Vec<Param>,
        #[serde(default)]
        range: Option<Box<Expr>>,
        term: Box<Expr>,
    },
    SetComprehension {
        vars: Vec<Param>,
        range: Box<Expr>,
        term: Box<Expr>,
    },
    MapComprehension {
        var: Param,
        range: Box<Expr>,
        value: Box<Expr>,
    },
    Block {
        exprs: Vec<Expr>,
    },
    Assign {
        target: AssignTarget,
        value: Box<Expr>,
    },
    While {
        cond: Box<Expr>,
        body: Box<Expr>,
    },
    /// Counted loop over `[start, end)` (or downwards from `start` to `end`
    /// when `up` is false); unbounded when `end` is absent.
    ForRange {
        var: Param,
        start: Box<Expr>,
        #[serde(default)]
        end: Option<Box<Expr>>,
        up: bool,
        body: Box<Expr>,
    },
    Break,
    Return {
        #[serde(default)]
        value: Option<Box<Expr>>,
    },
    Print {
        args: Vec<Expr>,
    },
    Expect {
        cond: Box<Expr>,
        #[serde(default)]
        message: Option<Box<Expr>>,
    },
    New {
        class: Type,
        #[serde(default)]
        ctor: Option<Path>,
        args: Vec<Expr>,
    },
    NewArray {
        elem: Type,
        size: Box<Expr>,
        #[serde(default)]
        init: Option<Box<Expr>>,
    },
    /// `new T[] [e1, e2, ...]`
    ArrayDisplay {
        elem: Type,
        elems: Vec<Expr>,
    },
    Unit,
}

impl Expr {
    pub fn var(name: impl Into<String>) -> Self {
        Expr::Var { name: name.into() }
    }

    pub fn bool(value: bool) -> Self {
        Expr::Literal {
            value: Literal::Bool { value },
        }
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expr::Literal {
            value: Literal::String {
                value: value.into(),
            },
        }
    }

    pub fn int(value: impl Into<String>, ty: Type) -> Self {
        Expr::Literal {
            value: Literal::Int {
                value: value.into(),
                ty,
            },
        }
    }

    pub fn un(op: UnOp, operand: Expr) -> Self {
        Expr::UnOp {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn bin(op: BinOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::BinOp {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    /// Sequence `exprs`, collapsing the empty block to `Unit` and a single
    /// expression to itself.
    pub fn block(mut exprs: Vec<Expr>) -> Self {
        match exprs.len() {
            0 => Expr::Unit,
            1 => exprs.pop().unwrap_or(Expr::Unit),
            _ => Expr::Block { exprs },
        }
    }

    pub fn is_unit(&self) -> bool {
        matches!(self, Expr::Unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_collapses() {
        assert_eq!(Expr::block(vec![]), Expr::Unit);
        assert_eq!(Expr::block(vec![Expr::var("x")]), Expr::var("x"));
        assert!(matches!(
            Expr::block(vec![Expr::Break, Expr::Unit]),
            Expr::Block { .. }
        ));
    }

    #[test]
    fn let_defaults_to_plain() {
        let json = r#"{"kind":"let","name":"x","ty":{"kind":"int"},"body":{"kind":"unit"}}"#;
        let e: Expr = serde_json::from_str(json).unwrap();
        let Expr::Let {
            mode, ghost, value, ..
        } = e
        else {
            panic!("not a let");
        };
        assert_eq!(mode, LetMode::Plain);
        assert!(!ghost);
        assert!(value.is_none());
    }
}
