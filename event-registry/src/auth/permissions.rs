//! Permission Definitions
//!
//! Permission classes carried in the JWT `permissions` claim.
//! - `Authenticated`: any valid token (shop audience)
//! - `ReadCatalog` / `UpdateCatalog`: admin queries / admin mutations
//! - `SuperAdmin`: grants everything

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Permission {
    Authenticated,
    ReadCatalog,
    UpdateCatalog,
    SuperAdmin,
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Authenticated => "Authenticated",
            Self::ReadCatalog => "ReadCatalog",
            Self::UpdateCatalog => "UpdateCatalog",
            Self::SuperAdmin => "SuperAdmin",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "Authenticated" => Some(Self::Authenticated),
            "ReadCatalog" => Some(Self::ReadCatalog),
            "UpdateCatalog" => Some(Self::UpdateCatalog),
            "SuperAdmin" => Some(Self::SuperAdmin),
            _ => None,
        }
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role names
pub const ROLE_CUSTOMER: &str = "customer";
pub const ROLE_ADMINISTRATOR: &str = "administrator";

/// Default permissions for a role name
pub fn get_default_permissions(role_name: &str) -> Vec<Permission> {
    match role_name {
        ROLE_ADMINISTRATOR => vec![Permission::ReadCatalog, Permission::UpdateCatalog],
        ROLE_CUSTOMER => vec![Permission::Authenticated],
        _ => vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roundtrip_names() {
        for p in [
            Permission::Authenticated,
            Permission::ReadCatalog,
            Permission::UpdateCatalog,
            Permission::SuperAdmin,
        ] {
            assert_eq!(Permission::parse(p.as_str()), Some(p));
        }
        assert_eq!(Permission::parse("DeleteEverything"), None);
    }

    #[test]
    fn test_default_permissions() {
        assert_eq!(
            get_default_permissions("administrator"),
            vec![Permission::ReadCatalog, Permission::UpdateCatalog]
        );
        assert!(get_default_permissions("guest").is_empty());
    }
}
