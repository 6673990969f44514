//! Conversions between the textual forms a method name can take.
//!
//! Mapping documents and debug-log traces name a method in *colon form*
//! (`Game.Player:Update`), while exception traces use *dot form*
//! (`Game.Player.Update`). Constructors keep their leading dot in both forms,
//! so `Game.Player:.ctor` becomes `Game.Player..ctor` in dot form and a dot
//! form split must prefer the double-dot boundary.

use std::borrow::Cow;

/// Splits a stack-trace signature into its name and its parenthesized parameter list.
///
/// The split happens at the first `(`. A signature without parameters yields the whole
/// input as name and an empty parameter list.
///
/// ```rust
/// use symresolve::mapping::name::split_signature;
///
/// assert_eq!(split_signature("$A:$m(int,$B)"), ("$A:$m", "(int,$B)"));
/// assert_eq!(split_signature("$A:$m"), ("$A:$m", ""));
/// ```
#[must_use]
pub fn split_signature(signature: &str) -> (&str, &str) {
    match signature.find('(') {
        Some(index) => signature.split_at(index),
        None => (signature, ""),
    }
}

/// Splits a colon-form name into `(declaring_type, method_name)` at the last colon.
///
/// Method names never contain colons, declaring types might. Without any colon the
/// declaring type is empty and the whole input is the method name.
#[must_use]
pub fn split_colon_form(name: &str) -> (&str, &str) {
    match name.rfind(':') {
        Some(index) => (&name[..index], &name[index + 1..]),
        None => ("", name),
    }
}

/// Converts a dot-form name into colon form.
///
/// A `..` boundary (`.ctor`, `.cctor`) wins over the last single dot. Names without
/// any dot are returned unchanged.
///
/// ```rust
/// use symresolve::mapping::name::to_colon_form;
///
/// assert_eq!(to_colon_form("Game.Player.Update"), "Game.Player:Update");
/// assert_eq!(to_colon_form("Game.Player..ctor"), "Game.Player:.ctor");
/// assert_eq!(to_colon_form("Main"), "Main");
/// ```
#[must_use]
pub fn to_colon_form(name: &str) -> Cow<'_, str> {
    let boundary = name.rfind("..").or_else(|| name.rfind('.'));
    match boundary {
        Some(index) => Cow::Owned(format!("{}:{}", &name[..index], &name[index + 1..])),
        None => Cow::Borrowed(name),
    }
}

/// Converts a colon-form name into dot form by replacing the last colon.
#[must_use]
pub fn to_dot_form(name: &str) -> Cow<'_, str> {
    match name.rfind(':') {
        Some(index) => Cow::Owned(format!("{}.{}", &name[..index], &name[index + 1..])),
        None => Cow::Borrowed(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_signature_first_paren() {
        assert_eq!(
            split_signature("$A:$m(System.Func(int),$B)"),
            ("$A:$m", "(System.Func(int),$B)")
        );
        assert_eq!(split_signature("(int)"), ("", "(int)"));
    }

    #[test]
    fn test_split_colon_form() {
        assert_eq!(split_colon_form("Game.Player:Update"), ("Game.Player", "Update"));
        assert_eq!(split_colon_form("Outer:Inner:.ctor"), ("Outer:Inner", ".ctor"));
        assert_eq!(split_colon_form("Update"), ("", "Update"));
    }

    #[test]
    fn test_colon_form_constructors() {
        assert_eq!(to_colon_form("$A..cctor"), "$A:.cctor");
        assert_eq!(to_colon_form("Ns.$A..ctor"), "Ns.$A:.ctor");
        assert_eq!(to_colon_form("$A.$m"), "$A:$m");
    }

    #[test]
    fn test_dot_form() {
        assert_eq!(to_dot_form("Game.Player:.ctor"), "Game.Player..ctor");
        assert_eq!(to_dot_form("Game.Player:Update"), "Game.Player.Update");
        assert_eq!(to_dot_form("Update"), "Update");
    }

    #[test]
    fn test_forms_roundtrip_constructor() {
        let colon = to_colon_form("Game.Player..ctor");
        assert_eq!(to_dot_form(&colon), "Game.Player..ctor");
    }
}
