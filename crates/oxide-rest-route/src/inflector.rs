//! Name casing between URL segments and handler identifiers.

use heck::{ToKebabCase, ToUpperCamelCase};

/// Converts a path segment to a handler identifier: `user-accounts` becomes
/// `UserAccounts`.
#[must_use]
pub fn studly_case(segment: &str) -> String {
    segment.to_upper_camel_case()
}

/// Converts a handler identifier to a path segment: `UserAccounts` becomes
/// `user-accounts`.
#[must_use]
pub fn spinal_case(identifier: &str) -> String {
    identifier.to_kebab_case()
}
