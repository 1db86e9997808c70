/// Shared types used across the codebase

use serde::{Deserialize, Serialize};
use std::fmt;

/// Database roles a caller may assert through `x-user-role`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "app_user")]
    User,
    #[serde(rename = "app_admin")]
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "app_user",
            Role::Admin => "app_admin",
        }
    }

    /// Exact, case-sensitive match against the closed role set
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "app_user" => Some(Role::User),
            "app_admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which variant of a dual-privilege operation a caller gets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Owner,
    Admin,
}

impl Scope {
    pub fn for_role(role: Option<Role>) -> Self {
        match role {
            Some(Role::Admin) => Scope::Admin,
            _ => Scope::Owner,
        }
    }
}

/// Identity a request asserts about its caller. Lives for one request only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallerContext {
    pub user_id: Option<String>,
    pub role: Option<Role>,
}

impl CallerContext {
    /// Context with neither identity nor role, as used by register/login
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn is_anonymous(&self) -> bool {
        self.user_id.is_none() && self.role.is_none()
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.role == Some(role)
    }

    pub fn scope(&self) -> Scope {
        Scope::for_role(self.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_context_has_owner_scope() {
        let ctx = CallerContext::anonymous();
        assert!(ctx.is_anonymous());
        assert!(!ctx.has_role(Role::Admin));
        assert_eq!(ctx.scope(), Scope::Owner);
    }

    #[test]
    fn parses_only_known_roles() {
        assert_eq!(Role::parse("app_user"), Some(Role::User));
        assert_eq!(Role::parse("app_admin"), Some(Role::Admin));
        assert_eq!(Role::parse("APP_ADMIN"), None);
        assert_eq!(Role::parse(" app_admin"), None);
        assert_eq!(Role::parse("root"), None);
        assert_eq!(Role::parse(""), None);
    }

    #[test]
    fn role_round_trips_through_its_header_value() {
        for role in [Role::User, Role::Admin] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
            assert_eq!(role.to_string(), role.as_str());
        }
    }

    #[test]
    fn only_admin_gets_admin_scope() {
        assert_eq!(Scope::for_role(Some(Role::Admin)), Scope::Admin);
        assert_eq!(Scope::for_role(Some(Role::User)), Scope::Owner);
        assert_eq!(Scope::for_role(None), Scope::Owner);
    }
}
