//! Admin registration service
//!
//! Unrestricted CRUD over every registration. Permission checks happen in
//! the router; this layer trusts its caller.

use shared::error::{AppError, ErrorCode};
use shared::list::{ListOptions, PaginatedList, Relation};
use shared::models::{
    CreateRegistrationInput, CustomerEventRegistration, DeletionResponse, RegistrationExportRow,
    RegistrationPatch, UpdateRegistrationInput,
};
use sqlx::SqliteConnection;

use super::{CreateFields, load_relations, validate_create, validate_patch};
use crate::auth::RequestContext;
use crate::config::RegistrationOptions;
use crate::db::repository::registration::{self as registration_repo, NewRegistration};
use crate::db::repository::customer as customer_repo;
use crate::error::ServiceResult;

#[derive(Debug, Clone)]
pub struct AdminRegistrationService {
    options: RegistrationOptions,
}

impl AdminRegistrationService {
    pub fn new(options: RegistrationOptions) -> Self {
        Self { options }
    }

    pub async fn find_all(
        &self,
        ctx: &RequestContext,
        conn: &mut SqliteConnection,
        opts: &ListOptions,
    ) -> ServiceResult<PaginatedList<CustomerEventRegistration>> {
        let relations = opts.relations()?.unwrap_or_default();
        let (mut items, total) =
            registration_repo::list(conn, opts, None, self.options.admin_take_limit).await?;
        load_relations(conn, &mut items, &relations).await?;

        tracing::debug!(
            actor = %ctx.actor(),
            total,
            returned = items.len(),
            "Admin listed registrations"
        );
        Ok(PaginatedList::new(items, total))
    }

    pub async fn find_one(
        &self,
        _ctx: &RequestContext,
        conn: &mut SqliteConnection,
        id: i64,
        relations: &[Relation],
    ) -> ServiceResult<Option<CustomerEventRegistration>> {
        let Some(registration) = registration_repo::find_by_id(conn, id).await? else {
            return Ok(None);
        };
        let mut found = [registration];
        load_relations(conn, &mut found, relations).await?;
        let [registration] = found;
        Ok(Some(registration))
    }

    pub async fn create(
        &self,
        ctx: &RequestContext,
        conn: &mut SqliteConnection,
        input: CreateRegistrationInput,
    ) -> ServiceResult<CustomerEventRegistration> {
        validate_create(CreateFields {
            category: &input.category,
            title: &input.title,
            orgname: &input.orgname,
            eventdate: input.eventdate,
            code: &input.code,
            custom_fields: &input.custom_fields,
        })?;
        self.require_customer(conn, input.customer_id).await?;
        self.ensure_code_free(conn, input.customer_id, &input.code).await?;

        let created = registration_repo::create(
            conn,
            NewRegistration {
                customer_id: input.customer_id,
                reg_type: input.reg_type.unwrap_or_default(),
                category: input
                    .category
                    .unwrap_or_else(|| self.options.default_category.clone()),
                title: input.title,
                orgname: input.orgname,
                eventdate: input.eventdate,
                code: input.code,
                custom_fields: input.custom_fields.unwrap_or_default(),
            },
        )
        .await?;

        tracing::info!(
            actor = %ctx.actor(),
            registration_id = created.id,
            customer_id = created.customer_id,
            code = %created.code,
            "Admin created registration"
        );
        self.reload(ctx, conn, created.id).await
    }

    pub async fn update(
        &self,
        ctx: &RequestContext,
        conn: &mut SqliteConnection,
        input: UpdateRegistrationInput,
    ) -> ServiceResult<CustomerEventRegistration> {
        let id = input.id;
        let mut registration = registration_repo::find_by_id(conn, id)
            .await?
            .ok_or_else(|| AppError::registration_not_found(id))?;

        let patch = RegistrationPatch::from(input);
        validate_patch(&patch)?;

        let target_customer = patch.customer_id.unwrap_or(registration.customer_id);
        if target_customer != registration.customer_id {
            self.require_customer(conn, target_customer).await?;
        }
        let target_code = patch.code.as_deref().unwrap_or(&registration.code).to_string();
        if target_customer != registration.customer_id || target_code != registration.code {
            self.ensure_code_free(conn, target_customer, &target_code).await?;
        }

        patch.apply(&mut registration);
        registration_repo::save(conn, &registration).await?;

        tracing::info!(actor = %ctx.actor(), registration_id = id, "Admin updated registration");
        self.reload(ctx, conn, id).await
    }

    /// Delete; a storage failure comes back as `NOT_DELETED` with its message
    pub async fn delete(
        &self,
        ctx: &RequestContext,
        conn: &mut SqliteConnection,
        id: i64,
    ) -> ServiceResult<DeletionResponse> {
        registration_repo::find_by_id(conn, id)
            .await?
            .ok_or_else(|| AppError::registration_not_found(id))?;

        match registration_repo::delete(conn, id).await {
            Ok(true) => {
                tracing::info!(
                    actor = %ctx.actor(),
                    registration_id = id,
                    "Admin deleted registration"
                );
                Ok(DeletionResponse::deleted())
            }
            Ok(false) => Ok(DeletionResponse::not_deleted(format!(
                "Registration {id} was not deleted"
            ))),
            Err(e) => {
                tracing::warn!(
                    actor = %ctx.actor(),
                    registration_id = id,
                    error = %e,
                    "Admin delete failed"
                );
                Ok(DeletionResponse::not_deleted(e.to_string()))
            }
        }
    }

    /// Flattened rows for spreadsheet export, capped at the admin take limit
    pub async fn export(
        &self,
        ctx: &RequestContext,
        conn: &mut SqliteConnection,
    ) -> ServiceResult<Vec<RegistrationExportRow>> {
        let rows = registration_repo::export_rows(conn, self.options.admin_take_limit).await?;
        tracing::info!(actor = %ctx.actor(), rows = rows.len(), "Admin exported registrations");
        Ok(rows)
    }

    async fn reload(
        &self,
        ctx: &RequestContext,
        conn: &mut SqliteConnection,
        id: i64,
    ) -> ServiceResult<CustomerEventRegistration> {
        self.find_one(ctx, conn, id, &[Relation::Customer])
            .await?
            .ok_or_else(|| AppError::registration_not_found(id).into())
    }

    async fn require_customer(
        &self,
        conn: &mut SqliteConnection,
        customer_id: i64,
    ) -> ServiceResult<()> {
        customer_repo::find_by_id(conn, customer_id)
            .await?
            .ok_or_else(|| {
                AppError::new(ErrorCode::CustomerNotFound).with_detail("customerId", customer_id)
            })?;
        Ok(())
    }

    async fn ensure_code_free(
        &self,
        conn: &mut SqliteConnection,
        customer_id: i64,
        code: &str,
    ) -> ServiceResult<()> {
        if self.options.enforce_unique_code
            && registration_repo::exists_for_customer_code(conn, customer_id, code).await?
        {
            return Err(AppError::new(ErrorCode::AlreadyRegistered)
                .with_detail("code", code)
                .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use crate::services::test_support::seed_customer;
    use shared::models::{DeletionResult, RegistrationType};

    fn admin_ctx() -> RequestContext {
        RequestContext::for_user(1)
    }

    fn input(customer_id: i64, code: &str) -> CreateRegistrationInput {
        CreateRegistrationInput {
            customer_id,
            reg_type: None,
            category: Some("marathon".into()),
            title: "City Run".into(),
            orgname: None,
            eventdate: 1_746_057_600_000,
            code: code.into(),
            custom_fields: None,
        }
    }

    #[tokio::test]
    async fn test_create_defaults_and_reload() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let customer = seed_customer(&mut conn, 42).await;
        let service = AdminRegistrationService::new(RegistrationOptions::default());

        let mut data = input(customer.id, "RUN25");
        data.category = None;
        let created = service.create(&admin_ctx(), &mut conn, data).await.unwrap();

        assert_eq!(created.reg_type, RegistrationType::Individual);
        assert_eq!(created.category, "general");
        assert_eq!(created.customer.as_ref().map(|c| c.id), Some(customer.id));

        let found = service
            .find_one(&admin_ctx(), &mut conn, created.id, &[])
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.title, "City Run");
        assert!(found.customer.is_none());
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_customer_and_blank_title() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let service = AdminRegistrationService::new(RegistrationOptions::default());

        let err: AppError = service
            .create(&admin_ctx(), &mut conn, input(999, "RUN25"))
            .await
            .unwrap_err()
            .into();
        assert_eq!(err.code, ErrorCode::CustomerNotFound);

        let customer = seed_customer(&mut conn, 42).await;
        let mut data = input(customer.id, "RUN25");
        data.title = "  ".into();
        let err: AppError = service
            .create(&admin_ctx(), &mut conn, data)
            .await
            .unwrap_err()
            .into();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn test_update_patches_and_reassigns() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let a = seed_customer(&mut conn, 42).await;
        let b = seed_customer(&mut conn, 43).await;
        let service = AdminRegistrationService::new(RegistrationOptions::default());
        let created = service
            .create(&admin_ctx(), &mut conn, input(a.id, "RUN25"))
            .await
            .unwrap();

        let updated = service
            .update(
                &admin_ctx(),
                &mut conn,
                UpdateRegistrationInput {
                    id: created.id,
                    customer_id: Some(b.id),
                    orgname: Some("Harriers".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.customer_id, b.id);
        assert_eq!(updated.orgname.as_deref(), Some("Harriers"));
        assert_eq!(updated.title, "City Run");
        assert_eq!(updated.code, "RUN25");
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let service = AdminRegistrationService::new(RegistrationOptions::default());

        let err: AppError = service
            .update(
                &admin_ctx(),
                &mut conn,
                UpdateRegistrationInput {
                    id: 12345,
                    ..Default::default()
                },
            )
            .await
            .unwrap_err()
            .into();
        assert_eq!(err.code, ErrorCode::RegistrationNotFound);
    }

    #[tokio::test]
    async fn test_delete_outcomes() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let a = seed_customer(&mut conn, 42).await;
        let service = AdminRegistrationService::new(RegistrationOptions::default());
        let first = service
            .create(&admin_ctx(), &mut conn, input(a.id, "RUN25"))
            .await
            .unwrap();
        let second = service
            .create(&admin_ctx(), &mut conn, input(a.id, "SWIM25"))
            .await
            .unwrap();

        let res = service.delete(&admin_ctx(), &mut conn, first.id).await.unwrap();
        assert_eq!(res, DeletionResponse::deleted());

        // Missing id fails before the soft-outcome path
        let err: AppError = service
            .delete(&admin_ctx(), &mut conn, first.id)
            .await
            .unwrap_err()
            .into();
        assert_eq!(err.code, ErrorCode::RegistrationNotFound);

        // Storage failure becomes NOT_DELETED
        sqlx::query(
            "CREATE TRIGGER block_delete BEFORE DELETE ON customer_event_registration BEGIN SELECT RAISE(ABORT, 'registration is locked'); END",
        )
        .execute(&mut *conn)
        .await
        .unwrap();
        let res = service.delete(&admin_ctx(), &mut conn, second.id).await.unwrap();
        assert_eq!(res.result, DeletionResult::NotDeleted);
        assert!(res.message.unwrap().contains("registration is locked"));
    }

    #[tokio::test]
    async fn test_enforce_unique_code() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let a = seed_customer(&mut conn, 42).await;
        let b = seed_customer(&mut conn, 43).await;
        let service = AdminRegistrationService::new(RegistrationOptions {
            enforce_unique_code: true,
            ..Default::default()
        });

        service
            .create(&admin_ctx(), &mut conn, input(a.id, "RUN25"))
            .await
            .unwrap();
        let err: AppError = service
            .create(&admin_ctx(), &mut conn, input(a.id, "RUN25"))
            .await
            .unwrap_err()
            .into();
        assert_eq!(err.code, ErrorCode::AlreadyRegistered);

        // Same code, other customer is fine
        service
            .create(&admin_ctx(), &mut conn, input(b.id, "RUN25"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_find_all_and_export() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.unwrap();
        let a = seed_customer(&mut conn, 42).await;
        let b = seed_customer(&mut conn, 43).await;
        let service = AdminRegistrationService::new(RegistrationOptions::default());
        for (customer, code) in [(&a, "A1"), (&a, "A2"), (&b, "B1")] {
            service
                .create(&admin_ctx(), &mut conn, input(customer.id, code))
                .await
                .unwrap();
        }

        let opts = ListOptions {
            relations: Some("customer".into()),
            ..Default::default()
        };
        let list = service.find_all(&admin_ctx(), &mut conn, &opts).await.unwrap();
        assert_eq!(list.total_items, 3);
        assert!(list.items.iter().all(|r| r.customer.is_some()));

        let rows = service.export(&admin_ctx(), &mut conn).await.unwrap();
        assert_eq!(rows.len(), 3);
    }
}
