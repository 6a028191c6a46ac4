//! Customer Event Registration Repository

use super::{RepoError, RepoResult, customer};
use crate::auth::CustomerScope;
use shared::list::ListOptions;
use shared::models::{
    CustomFields, CustomerEventRegistration, RegistrationExportRow, RegistrationType,
};
use sqlx::types::Json;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};
use std::collections::HashMap;

const REGISTRATION_COLUMNS: &str = "id, created_at, updated_at, customer_id, reg_type, category, title, orgname, eventdate, code, custom_fields";

/// Fully resolved fields for an insert
#[derive(Debug, Clone)]
pub struct NewRegistration {
    pub customer_id: i64,
    pub reg_type: RegistrationType,
    pub category: String,
    pub title: String,
    pub orgname: Option<String>,
    pub eventdate: i64,
    pub code: String,
    pub custom_fields: CustomFields,
}

pub async fn find_by_id(
    conn: &mut SqliteConnection,
    id: i64,
) -> RepoResult<Option<CustomerEventRegistration>> {
    let sql =
        format!("SELECT {REGISTRATION_COLUMNS} FROM customer_event_registration WHERE id = ?");
    let row = sqlx::query_as::<_, CustomerEventRegistration>(&sql)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(row)
}

/// Most recent registration under `code` inside the scope
pub async fn find_by_code(
    conn: &mut SqliteConnection,
    code: &str,
    scope: &CustomerScope,
) -> RepoResult<Option<CustomerEventRegistration>> {
    let mut qb = QueryBuilder::<Sqlite>::new(format!(
        "SELECT {REGISTRATION_COLUMNS} FROM customer_event_registration WHERE code = "
    ));
    qb.push_bind(code);
    scope.push_predicate(&mut qb, "customer_id");
    qb.push(" ORDER BY created_at DESC, id DESC LIMIT 1");
    let row = qb
        .build_query_as::<CustomerEventRegistration>()
        .fetch_optional(&mut *conn)
        .await?;
    Ok(row)
}

/// Escape LIKE wildcards so `value` matches literally under `ESCAPE '\'`
fn escape_like(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Append list filters to a query ending in `WHERE 1 = 1`
///
/// With a scope, the caller-supplied `customer_id` filter is ignored.
fn push_filters(
    qb: &mut QueryBuilder<'_, Sqlite>,
    opts: &ListOptions,
    scope: Option<&CustomerScope>,
) {
    match scope {
        Some(scope) => scope.push_predicate(qb, "customer_id"),
        None => {
            if let Some(customer_id) = opts.customer_id {
                qb.push(" AND customer_id = ").push_bind(customer_id);
            }
        }
    }
    if let Some(category) = &opts.category {
        qb.push(" AND category = ").push_bind(category.clone());
    }
    if let Some(code) = &opts.code {
        qb.push(" AND code = ").push_bind(code.clone());
    }
    if let Some(reg_type) = opts.reg_type {
        qb.push(" AND reg_type = ").push_bind(reg_type);
    }
    if let Some(title) = &opts.title {
        qb.push(" AND title LIKE ")
            .push_bind(format!("%{}%", escape_like(title)))
            .push(" ESCAPE '\\'");
    }
    if let Some(from) = opts.eventdate_from {
        qb.push(" AND eventdate >= ").push_bind(from);
    }
    if let Some(to) = opts.eventdate_to {
        qb.push(" AND eventdate <= ").push_bind(to);
    }
}

/// Paginated, filtered, sorted listing plus the unpaginated total
pub async fn list(
    conn: &mut SqliteConnection,
    opts: &ListOptions,
    scope: Option<&CustomerScope>,
    take_limit: u32,
) -> RepoResult<(Vec<CustomerEventRegistration>, u64)> {
    let mut count_qb =
        QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM customer_event_registration WHERE 1 = 1");
    push_filters(&mut count_qb, opts, scope);
    let total = count_qb
        .build_query_scalar::<i64>()
        .fetch_one(&mut *conn)
        .await?;

    let mut qb = QueryBuilder::<Sqlite>::new(format!(
        "SELECT {REGISTRATION_COLUMNS} FROM customer_event_registration WHERE 1 = 1"
    ));
    push_filters(&mut qb, opts, scope);

    let sort = opts.sort.unwrap_or_default();
    qb.push(" ORDER BY ")
        .push(sort.column())
        .push(" ")
        .push(opts.order.as_sql());
    if sort.column() != "id" {
        qb.push(", id ").push(opts.order.as_sql());
    }
    qb.push(" LIMIT ")
        .push_bind(i64::from(opts.effective_take(take_limit)))
        .push(" OFFSET ")
        .push_bind(i64::from(opts.skip.unwrap_or(0)));

    let rows = qb
        .build_query_as::<CustomerEventRegistration>()
        .fetch_all(&mut *conn)
        .await?;

    Ok((rows, total.max(0) as u64))
}

/// Whether this customer already holds a registration under `code`
pub async fn exists_for_customer_code(
    conn: &mut SqliteConnection,
    customer_id: i64,
    code: &str,
) -> RepoResult<bool> {
    let found: Option<i64> = sqlx::query_scalar(
        "SELECT id FROM customer_event_registration WHERE customer_id = ? AND code = ? LIMIT 1",
    )
    .bind(customer_id)
    .bind(code)
    .fetch_optional(&mut *conn)
    .await?;
    Ok(found.is_some())
}

/// Ids drawn per insert; a second draw lands in another random slot
const MAX_ID_ATTEMPTS: usize = 2;

pub async fn create(
    conn: &mut SqliteConnection,
    data: NewRegistration,
) -> RepoResult<CustomerEventRegistration> {
    insert_with(conn, &data, shared::util::snowflake_id).await
}

/// Insert under ids from `next_id`, drawing again when the id is taken
///
/// The primary key is the table's only unique constraint, so `Duplicate`
/// here always means an id collision.
async fn insert_with(
    conn: &mut SqliteConnection,
    data: &NewRegistration,
    mut next_id: impl FnMut() -> i64,
) -> RepoResult<CustomerEventRegistration> {
    let now = shared::util::now_millis();
    let mut attempt = 1;
    let id = loop {
        let id = next_id();
        let inserted = sqlx::query(
            "INSERT INTO customer_event_registration (id, created_at, updated_at, customer_id, reg_type, category, title, orgname, eventdate, code, custom_fields) VALUES (?1, ?2, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        )
        .bind(id)
        .bind(now)
        .bind(data.customer_id)
        .bind(data.reg_type)
        .bind(&data.category)
        .bind(&data.title)
        .bind(&data.orgname)
        .bind(data.eventdate)
        .bind(&data.code)
        .bind(Json(&data.custom_fields))
        .execute(&mut *conn)
        .await
        .map_err(RepoError::from);

        match inserted {
            Ok(_) => break id,
            Err(RepoError::Duplicate(msg)) if attempt < MAX_ID_ATTEMPTS => {
                tracing::warn!(id, attempt, error = %msg, "Registration id collision, retrying");
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    };
    find_by_id(conn, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create registration".into()))
}

/// Write every mutable column of `registration` back to its row
///
/// `id` and `created_at` are never written.
pub async fn save(
    conn: &mut SqliteConnection,
    registration: &CustomerEventRegistration,
) -> RepoResult<()> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE customer_event_registration SET customer_id = ?1, reg_type = ?2, category = ?3, title = ?4, orgname = ?5, eventdate = ?6, code = ?7, custom_fields = ?8, updated_at = ?9 WHERE id = ?10",
    )
    .bind(registration.customer_id)
    .bind(registration.reg_type)
    .bind(&registration.category)
    .bind(&registration.title)
    .bind(&registration.orgname)
    .bind(registration.eventdate)
    .bind(&registration.code)
    .bind(Json(&registration.custom_fields))
    .bind(now)
    .bind(registration.id)
    .execute(&mut *conn)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!(
            "Registration {} not found",
            registration.id
        )));
    }
    Ok(())
}

pub async fn delete(conn: &mut SqliteConnection, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM customer_event_registration WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Populate `customer` on each registration with one batched lookup
pub async fn load_customers(
    conn: &mut SqliteConnection,
    registrations: &mut [CustomerEventRegistration],
) -> RepoResult<()> {
    let mut ids: Vec<i64> = registrations.iter().map(|r| r.customer_id).collect();
    ids.sort_unstable();
    ids.dedup();

    let customers: HashMap<i64, _> = customer::find_by_ids(conn, &ids)
        .await?
        .into_iter()
        .map(|c| (c.id, c))
        .collect();

    for registration in registrations.iter_mut() {
        registration.customer = customers.get(&registration.customer_id).cloned();
    }
    Ok(())
}

/// Registration rows joined with their customer, newest first
pub async fn export_rows(
    conn: &mut SqliteConnection,
    limit: u32,
) -> RepoResult<Vec<RegistrationExportRow>> {
    let rows = sqlx::query_as::<_, RegistrationExportRow>(
        "SELECT r.id, r.title, r.category, r.reg_type, r.orgname, r.eventdate, r.code, r.customer_id, TRIM(c.first_name || ' ' || c.last_name) AS customer_name, c.email_address AS customer_email, c.phone_number AS customer_phone, r.created_at FROM customer_event_registration r JOIN customer c ON c.id = r.customer_id ORDER BY r.created_at DESC, r.id DESC LIMIT ?",
    )
    .bind(i64::from(limit))
    .fetch_all(&mut *conn)
    .await?;
    Ok(rows)
}
