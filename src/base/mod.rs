//! Foundation helpers for the devgen toolchain.
//!
//! This module provides the small text primitives used throughout the
//! generator:
//! - [`normalize_class_name`], [`validate_member_name`], [`snake_case`] - identifier rules
//! - [`escape_comment`], [`indent_lines`], [`string_literal`] - text helpers for emitters
//!
//! This module has NO dependencies on other devgen modules besides the
//! error types.

pub mod names;
pub mod text;

pub use names::{is_identifier, normalize_class_name, snake_case, validate_member_name};
pub use text::{escape_comment, indent_lines, string_literal};
