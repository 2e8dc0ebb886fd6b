//! Display-name derivation for profiles that carry no name of their own.

use crate::profile::Role;

/// Pick a name to show for a user.
///
/// A non-blank `display_name` wins. Otherwise the email local-part is used
/// with all ASCII digits removed and its first character upper-cased. When
/// neither yields anything, the role placeholder is returned.
pub fn derive_display_name(display_name: Option<&str>, email: Option<&str>, role: Role) -> String {
    if let Some(name) = display_name.map(str::trim).filter(|n| !n.is_empty()) {
        return name.to_string();
    }
    email
        .and_then(name_from_email)
        .unwrap_or_else(|| role.placeholder_name().to_string())
}

/// Name derived from the part of an email address before `@`.
pub fn name_from_email(email: &str) -> Option<String> {
    let (local, _) = email.split_once('@')?;
    let stripped: String = local.chars().filter(|c| !c.is_ascii_digit()).collect();
    let mut chars = stripped.chars();
    let first = chars.next()?;
    Some(first.to_uppercase().chain(chars).collect())
}
