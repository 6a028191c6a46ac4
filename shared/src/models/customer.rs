//! Customer Model

use serde::{Deserialize, Serialize};

/// Customer profile, linked 1:1 to an authenticated user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: i64,
    /// Identity-provider user id (JWT `sub`)
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub phone_number: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Contact details a shop caller may attach when registering
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerContact {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email_address: Option<String>,
    pub phone_number: Option<String>,
}

impl CustomerContact {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email_address.is_none()
            && self.phone_number.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_empty() {
        assert!(CustomerContact::default().is_empty());
        let contact = CustomerContact {
            phone_number: Some("555".into()),
            ..Default::default()
        };
        assert!(!contact.is_empty());
    }
}
