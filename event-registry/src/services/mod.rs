//! Registration services
//!
//! - [`AdminRegistrationService`]: unrestricted CRUD for privileged callers
//! - [`ShopRegistrationService`]: CRUD scoped to the calling customer
//!
//! Both take a `&mut SqliteConnection`; handlers pass a transaction for
//! mutations and a pooled connection for reads.

pub mod admin;
pub mod shop;

pub use admin::AdminRegistrationService;
pub use shop::ShopRegistrationService;

use shared::Relation;
use shared::error::AppError;
use shared::models::{CustomFields, CustomerEventRegistration, RegistrationPatch};
use sqlx::SqliteConnection;

use crate::db::repository::{RepoResult, registration as registration_repo};
use crate::utils::validation::{
    MAX_CODE_LEN, MAX_NAME_LEN, MAX_TITLE_LEN, validate_custom_fields, validate_eventdate,
    validate_optional_text, validate_present_text, validate_required_text,
};

/// Fields every create payload carries, borrowed for validation
pub(crate) struct CreateFields<'a> {
    pub category: &'a Option<String>,
    pub title: &'a str,
    pub orgname: &'a Option<String>,
    pub eventdate: i64,
    pub code: &'a str,
    pub custom_fields: &'a Option<CustomFields>,
}

pub(crate) fn validate_create(fields: CreateFields<'_>) -> Result<(), AppError> {
    validate_required_text(fields.title, "title", MAX_TITLE_LEN)?;
    validate_required_text(fields.code, "code", MAX_CODE_LEN)?;
    validate_present_text(fields.category, "category", MAX_NAME_LEN)?;
    validate_optional_text(fields.orgname, "orgname", MAX_NAME_LEN)?;
    validate_eventdate(fields.eventdate)?;
    validate_custom_fields(fields.custom_fields)
}

pub(crate) fn validate_patch(patch: &RegistrationPatch) -> Result<(), AppError> {
    validate_present_text(&patch.title, "title", MAX_TITLE_LEN)?;
    validate_present_text(&patch.code, "code", MAX_CODE_LEN)?;
    validate_present_text(&patch.category, "category", MAX_NAME_LEN)?;
    validate_optional_text(&patch.orgname, "orgname", MAX_NAME_LEN)?;
    if let Some(eventdate) = patch.eventdate {
        validate_eventdate(eventdate)?;
    }
    validate_custom_fields(&patch.custom_fields)
}

/// Eager-load the requested relations
pub(crate) async fn load_relations(
    conn: &mut SqliteConnection,
    registrations: &mut [CustomerEventRegistration],
    relations: &[Relation],
) -> RepoResult<()> {
    if relations.contains(&Relation::Customer) {
        registration_repo::load_customers(conn, registrations).await?;
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use shared::models::Customer;
    use sqlx::SqliteConnection;

    use crate::db::repository::customer::{self as customer_repo, NewCustomer};

    pub async fn seed_customer(conn: &mut SqliteConnection, user_id: i64) -> Customer {
        customer_repo::create(
            conn,
            NewCustomer {
                user_id,
                first_name: format!("User{user_id}"),
                last_name: "Runner".into(),
                email_address: format!("user{user_id}@example.com"),
                phone_number: None,
            },
        )
        .await
        .unwrap()
    }
}
