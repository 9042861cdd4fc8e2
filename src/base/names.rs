//! Identifier rules for class and member names.
//!
//! Class names are normalized so that generated identifiers are
//! deterministic: every whitespace-delimited token gets its first character
//! upper-cased and the tokens are concatenated. The result must start with
//! an ASCII letter and contain only ASCII letters, digits and `_`.

use smol_str::SmolStr;

use crate::error::ModelError;

/// Returns true if `name` is a valid generated identifier.
pub fn is_identifier(name: &str) -> bool {
    first_invalid_char(name).is_none() && !name.is_empty()
}

/// Normalize a user-typed class name.
///
/// ```
/// use devgen::base::normalize_class_name;
///
/// assert_eq!(normalize_class_name("power supply").unwrap(), "PowerSupply");
/// assert_eq!(normalize_class_name("Motor_2").unwrap(), "Motor_2");
/// assert!(normalize_class_name("2motor").is_err());
/// ```
pub fn normalize_class_name(raw: &str) -> Result<SmolStr, ModelError> {
    let mut name = String::with_capacity(raw.len());
    for token in raw.split_whitespace() {
        let mut chars = token.chars();
        if let Some(first) = chars.next() {
            name.extend(first.to_uppercase());
            name.push_str(chars.as_str());
        }
    }

    check_chars(&name)?;
    Ok(SmolStr::new(name))
}

/// Validate a member (attribute, command, property, pipe, state) name.
///
/// Member names follow the same character rules as class names but keep
/// the case the author chose.
pub fn validate_member_name(name: &str) -> Result<(), ModelError> {
    check_chars(name)
}

/// Lower snake case of a camel-case name: `GetPosition` -> `get_position`.
///
/// Used for generated method names of commands.
pub fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev: Option<char> = None;
    let mut chars = name.chars().peekable();
    while let Some(c) = chars.next() {
        if c.is_ascii_uppercase() {
            let next_lower = chars.peek().is_some_and(|n| n.is_ascii_lowercase());
            let boundary = match prev {
                Some(p) if p.is_ascii_lowercase() || p.is_ascii_digit() => true,
                Some(p) if p.is_ascii_uppercase() => next_lower,
                _ => false,
            };
            if boundary {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
        prev = Some(c);
    }
    out
}

fn check_chars(name: &str) -> Result<(), ModelError> {
    if name.is_empty() {
        return Err(ModelError::invalid_name(name, "name is empty"));
    }
    match first_invalid_char(name) {
        None => Ok(()),
        Some((0, _)) => Err(ModelError::invalid_name(
            name,
            "first character must be a letter",
        )),
        Some((_, c)) => Err(ModelError::invalid_name(
            name,
            format!("character '{c}' is not authorized"),
        )),
    }
}

fn first_invalid_char(name: &str) -> Option<(usize, char)> {
    name.chars().enumerate().find(|&(i, c)| {
        if i == 0 {
            !c.is_ascii_alphabetic()
        } else {
            !(c.is_ascii_alphanumeric() || c == '_')
        }
    })
}
