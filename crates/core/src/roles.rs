//! Well-known role names carried in identity-provider claims.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_EDITOR: &str = "editor";
pub const ROLE_VOLUNTEER: &str = "volunteer";
pub const ROLE_MEMBER: &str = "member";

/// Roles allowed to manage sermon content.
pub const CONTENT_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_EDITOR];

/// Returns `true` if any of `held` appears in `required`.
pub fn has_any_role(held: &[String], required: &[&str]) -> bool {
    held.iter().any(|r| required.contains(&r.as_str()))
}
