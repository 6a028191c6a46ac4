//! Customer Repository

use super::{RepoError, RepoResult};
use shared::models::{Customer, CustomerContact};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

const CUSTOMER_SELECT: &str = "SELECT id, user_id, first_name, last_name, email_address, phone_number, created_at, updated_at FROM customer";

/// Fields for a new customer profile
#[derive(Debug, Clone, Default)]
pub struct NewCustomer {
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub phone_number: Option<String>,
}

pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> RepoResult<Option<Customer>> {
    let sql = format!("{CUSTOMER_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Customer>(&sql)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(row)
}

pub async fn find_by_user_id(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> RepoResult<Option<Customer>> {
    let sql = format!("{CUSTOMER_SELECT} WHERE user_id = ?");
    let row = sqlx::query_as::<_, Customer>(&sql)
        .bind(user_id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(row)
}

/// Batch lookup (relation loading)
pub async fn find_by_ids(conn: &mut SqliteConnection, ids: &[i64]) -> RepoResult<Vec<Customer>> {
    if ids.is_empty() {
        return Ok(vec![]);
    }
    let mut qb = QueryBuilder::<Sqlite>::new(CUSTOMER_SELECT);
    qb.push(" WHERE id IN (");
    let mut separated = qb.separated(", ");
    for id in ids {
        separated.push_bind(*id);
    }
    separated.push_unseparated(")");
    let rows = qb
        .build_query_as::<Customer>()
        .fetch_all(&mut *conn)
        .await?;
    Ok(rows)
}

pub async fn create(conn: &mut SqliteConnection, data: NewCustomer) -> RepoResult<Customer> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO customer (id, user_id, first_name, last_name, email_address, phone_number, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
    )
    .bind(id)
    .bind(data.user_id)
    .bind(&data.first_name)
    .bind(&data.last_name)
    .bind(&data.email_address)
    .bind(&data.phone_number)
    .bind(now)
    .execute(&mut *conn)
    .await?;
    find_by_id(conn, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create customer".into()))
}

/// Overwrite the contact fields that are present
pub async fn update_contact(
    conn: &mut SqliteConnection,
    id: i64,
    contact: &CustomerContact,
) -> RepoResult<Customer> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE customer SET first_name = COALESCE(?1, first_name), last_name = COALESCE(?2, last_name), email_address = COALESCE(?3, email_address), phone_number = COALESCE(?4, phone_number), updated_at = ?5 WHERE id = ?6",
    )
    .bind(&contact.first_name)
    .bind(&contact.last_name)
    .bind(&contact.email_address)
    .bind(&contact.phone_number)
    .bind(now)
    .bind(id)
    .execute(&mut *conn)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Customer {id} not found")));
    }
    find_by_id(conn, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Customer {id} not found")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    fn new_customer(user_id: i64) -> NewCustomer {
        NewCustomer {
            user_id,
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email_address: format!("user{user_id}@example.com"),
            phone_number: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_find_by_user_id() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();

        let created = create(&mut conn, new_customer(7)).await.unwrap();
        let found = find_by_user_id(&mut conn, 7).await.unwrap().unwrap();
        assert_eq!(created, found);
        assert!(find_by_user_id(&mut conn, 8).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_user_id() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();

        create(&mut conn, new_customer(7)).await.unwrap();
        let err = create(&mut conn, new_customer(7)).await.unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_update_contact_keeps_absent_fields() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let c = create(&mut conn, new_customer(7)).await.unwrap();

        let contact = CustomerContact {
            phone_number: Some("555-0100".into()),
            ..Default::default()
        };
        let updated = update_contact(&mut conn, c.id, &contact).await.unwrap();
        assert_eq!(updated.phone_number.as_deref(), Some("555-0100"));
        assert_eq!(updated.first_name, "Ada");

        let err = update_contact(&mut conn, -1, &contact).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_find_by_ids() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let a = create(&mut conn, new_customer(1)).await.unwrap();
        let b = create(&mut conn, new_customer(2)).await.unwrap();
        create(&mut conn, new_customer(3)).await.unwrap();

        let mut found = find_by_ids(&mut conn, &[a.id, b.id]).await.unwrap();
        found.sort_by_key(|c| c.user_id);
        assert_eq!(found, vec![a, b]);
        assert!(find_by_ids(&mut conn, &[]).await.unwrap().is_empty());
    }
}
