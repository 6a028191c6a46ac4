//! Ownership scope
//!
//! One predicate (`customer_id = caller`) shared by every shop query and
//! every ownership check.

use shared::error::AppError;
use shared::models::CustomerEventRegistration;
use sqlx::{QueryBuilder, Sqlite};

use crate::security_log;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CustomerScope {
    customer_id: i64,
}

impl CustomerScope {
    pub fn new(customer_id: i64) -> Self {
        Self { customer_id }
    }

    /// Append ` AND <column> = ?` to a query that already has a WHERE clause
    pub fn push_predicate(&self, qb: &mut QueryBuilder<'_, Sqlite>, column: &str) {
        qb.push(" AND ")
            .push(column)
            .push(" = ")
            .push_bind(self.customer_id);
    }

    pub fn permits(&self, registration: &CustomerEventRegistration) -> bool {
        registration.customer_id == self.customer_id
    }

    /// Forbidden unless the registration belongs to this scope
    pub fn check(&self, registration: &CustomerEventRegistration) -> Result<(), AppError> {
        if self.permits(registration) {
            return Ok(());
        }
        security_log!(
            WARN,
            "ownership_denied",
            customer_id = self.customer_id,
            registration_id = registration.id
        );
        Err(AppError::forbidden(
            "You are not allowed to access this registration",
        ))
    }
}
