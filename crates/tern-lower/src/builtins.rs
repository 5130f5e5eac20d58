//! Recognizer for the built-in types the front end disguises as ordinary
//! user-defined types in the `_System` module.
//!
//! Names follow a prefix-plus-arity convention (`_tuple#2`, `_#TotalFunc1`,
//! `array3?`). Recognition runs before generic user-type lowering; a name in
//! `_System` that matches nothing here is rejected by the caller.

use tern_il::FunctionKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Tuple(usize),
    Function(FunctionKind, usize),
    /// Array of the given number of dimensions. Nullable and non-null
    /// variants are not distinguished.
    Array(u32),
    Object,
    Nat,
    String,
    Unrecognized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinMember {
    /// Tuple component by position.
    TupleField(usize),
    TupleCtor(usize),
    MapKeys,
    MapValues,
    MapItems,
    /// Length of an array dimension, 0-based.
    ArrayLength(u32),
    Unrecognized,
}

/// Parse a decimal arity with no sign and no leading zeros.
fn arity(digits: &str) -> Option<usize> {
    if digits.is_empty() || (digits.len() > 1 && digits.starts_with('0')) {
        return None;
    }
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

fn array_dims(name: &str) -> Option<u32> {
    let base = name.strip_suffix('?').unwrap_or(name);
    let digits = base.strip_prefix("array")?;
    if digits.is_empty() {
        return Some(1);
    }
    match arity(digits) {
        Some(n) if n >= 2 => u32::try_from(n).ok(),
        _ => None,
    }
}

pub fn recognize(name: &str) -> Builtin {
    if let Some(n) = name.strip_prefix("_tuple#").and_then(arity) {
        return Builtin::Tuple(n);
    }
    if let Some(n) = name.strip_prefix("_#TotalFunc").and_then(arity) {
        return Builtin::Function(FunctionKind::Total, n);
    }
    if let Some(n) = name.strip_prefix("_#PartialFunc").and_then(arity) {
        return Builtin::Function(FunctionKind::Partial, n);
    }
    if let Some(n) = name.strip_prefix("_#Func").and_then(arity) {
        return Builtin::Function(FunctionKind::Partial, n);
    }
    if let Some(dims) = array_dims(name) {
        return Builtin::Array(dims);
    }
    match name {
        "object" | "object?" => Builtin::Object,
        "nat" => Builtin::Nat,
        "string" => Builtin::String,
        _ => Builtin::Unrecognized,
    }
}

/// Recognize `member` of the `_System` type named `owner`.
pub fn recognize_member(owner: &str, member: &str) -> BuiltinMember {
    match recognize(owner) {
        Builtin::Tuple(n) => {
            if member == format!("_#Make{n}") {
                return BuiltinMember::TupleCtor(n);
            }
            match arity(member) {
                Some(i) if i < n => BuiltinMember::TupleField(i),
                _ => BuiltinMember::Unrecognized,
            }
        }
        Builtin::Array(dims) => {
            if member == "Length" {
                return BuiltinMember::ArrayLength(0);
            }
            match member.strip_prefix("Length").and_then(arity) {
                Some(k) if (k as u64) < dims as u64 => BuiltinMember::ArrayLength(k as u32),
                _ => BuiltinMember::Unrecognized,
            }
        }
        _ if owner == "map" || owner == "imap" => match member {
            "Keys" => BuiltinMember::MapKeys,
            "Values" => BuiltinMember::MapValues,
            "Items" => BuiltinMember::MapItems,
            _ => BuiltinMember::Unrecognized,
        },
        _ => BuiltinMember::Unrecognized,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tuples() {
        assert_eq!(recognize("_tuple#0"), Builtin::Tuple(0));
        assert_eq!(recognize("_tuple#3"), Builtin::Tuple(3));
        assert_eq!(recognize("_tuple#"), Builtin::Unrecognized);
        assert_eq!(recognize("_tuple#02"), Builtin::Unrecognized);
    }

    #[test]
    fn arrows() {
        assert_eq!(
            recognize("_#Func2"),
            Builtin::Function(FunctionKind::Partial, 2)
        );
        assert_eq!(
            recognize("_#PartialFunc0"),
            Builtin::Function(FunctionKind::Partial, 0)
        );
        assert_eq!(
            recognize("_#TotalFunc1"),
            Builtin::Function(FunctionKind::Total, 1)
        );
        assert_eq!(recognize("_#TotalFuncX"), Builtin::Unrecognized);
    }

    #[test]
    fn arrays() {
        assert_eq!(recognize("array"), Builtin::Array(1));
        assert_eq!(recognize("array?"), Builtin::Array(1));
        assert_eq!(recognize("array2"), Builtin::Array(2));
        assert_eq!(recognize("array3?"), Builtin::Array(3));
        assert_eq!(recognize("array1"), Builtin::Unrecognized);
        assert_eq!(recognize("arrays"), Builtin::Unrecognized);
    }

    #[test]
    fn named_builtins() {
        assert_eq!(recognize("object?"), Builtin::Object);
        assert_eq!(recognize("nat"), Builtin::Nat);
        assert_eq!(recognize("string"), Builtin::String);
        assert_eq!(recognize("_#Unknown"), Builtin::Unrecognized);
    }

    #[test]
    fn members() {
        assert_eq!(recognize_member("_tuple#2", "1"), BuiltinMember::TupleField(1));
        assert_eq!(recognize_member("_tuple#2", "2"), BuiltinMember::Unrecognized);
        assert_eq!(
            recognize_member("_tuple#2", "_#Make2"),
            BuiltinMember::TupleCtor(2)
        );
        assert_eq!(recognize_member("map", "Keys"), BuiltinMember::MapKeys);
        assert_eq!(recognize_member("map", "Size"), BuiltinMember::Unrecognized);
        assert_eq!(recognize_member("array", "Length"), BuiltinMember::ArrayLength(0));
        assert_eq!(recognize_member("array2", "Length1"), BuiltinMember::ArrayLength(1));
        assert_eq!(recognize_member("array2", "Length2"), BuiltinMember::Unrecognized);
    }
}
