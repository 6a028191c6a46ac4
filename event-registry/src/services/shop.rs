//! Shop registration service
//!
//! Every operation is scoped to the authenticated customer through
//! [`CustomerScope`]. A context without an active user fails with Forbidden
//! before any storage access.

use shared::error::{AppError, ErrorCode};
use shared::list::{ListOptions, PaginatedList, Relation};
use shared::models::{
    Customer, CustomerEventRegistration, RegistrationPatch, ShopCreateRegistrationInput,
    ShopUpdateRegistrationInput,
};
use sqlx::SqliteConnection;

use super::{CreateFields, load_relations, validate_create, validate_patch};
use crate::auth::{CustomerScope, RequestContext};
use crate::config::RegistrationOptions;
use crate::db::repository::customer as customer_repo;
use crate::db::repository::registration::{self as registration_repo, NewRegistration};
use crate::error::ServiceResult;
use crate::security_log;
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_PERSON_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_present_text,
};

/// Relations loaded when the caller does not ask for any
const DEFAULT_RELATIONS: &[Relation] = &[Relation::Customer];

#[derive(Debug, Clone)]
pub struct ShopRegistrationService {
    options: RegistrationOptions,
}

impl ShopRegistrationService {
    pub fn new(options: RegistrationOptions) -> Self {
        Self { options }
    }

    /// Active user id, or Forbidden
    fn require_user(ctx: &RequestContext) -> Result<i64, AppError> {
        ctx.active_user_id.ok_or_else(|| {
            security_log!(WARN, "shop_anonymous_access", actor = %ctx.actor());
            AppError::forbidden("An authenticated customer is required")
        })
    }

    /// Customer profile of the active user
    async fn resolve_customer(
        &self,
        ctx: &RequestContext,
        conn: &mut SqliteConnection,
    ) -> ServiceResult<Customer> {
        let user_id = Self::require_user(ctx)?;
        let customer = customer_repo::find_by_user_id(conn, user_id)
            .await?
            .ok_or_else(|| {
                tracing::warn!(user_id, "Authenticated user has no customer profile");
                AppError::new(ErrorCode::CustomerProfileMissing)
            })?;
        Ok(customer)
    }

    async fn scope(
        &self,
        ctx: &RequestContext,
        conn: &mut SqliteConnection,
    ) -> ServiceResult<CustomerScope> {
        Ok(CustomerScope::new(self.resolve_customer(ctx, conn).await?.id))
    }

    pub async fn find_all_for_customer(
        &self,
        ctx: &RequestContext,
        conn: &mut SqliteConnection,
        opts: &ListOptions,
    ) -> ServiceResult<PaginatedList<CustomerEventRegistration>> {
        Self::require_user(ctx)?;
        let relations = opts
            .relations()?
            .unwrap_or_else(|| DEFAULT_RELATIONS.to_vec());
        let scope = self.scope(ctx, conn).await?;

        let (mut items, total) =
            registration_repo::list(conn, opts, Some(&scope), self.options.shop_take_limit).await?;
        load_relations(conn, &mut items, &relations).await?;
        Ok(PaginatedList::new(items, total))
    }

    /// Own registration by id; `None` when absent, Forbidden when someone else's
    pub async fn find_one(
        &self,
        ctx: &RequestContext,
        conn: &mut SqliteConnection,
        id: i64,
        relations: Option<&[Relation]>,
    ) -> ServiceResult<Option<CustomerEventRegistration>> {
        let scope = self.scope(ctx, conn).await?;
        let Some(registration) = registration_repo::find_by_id(conn, id).await? else {
            return Ok(None);
        };
        scope.check(&registration)?;

        let mut found = [registration];
        load_relations(conn, &mut found, relations.unwrap_or(DEFAULT_RELATIONS)).await?;
        let [registration] = found;
        Ok(Some(registration))
    }

    /// Create for the caller; the owner always comes from the context
    pub async fn create(
        &self,
        ctx: &RequestContext,
        conn: &mut SqliteConnection,
        input: ShopCreateRegistrationInput,
    ) -> ServiceResult<CustomerEventRegistration> {
        let customer = self.resolve_customer(ctx, conn).await?;
        validate_create(CreateFields {
            category: &input.category,
            title: &input.title,
            orgname: &input.orgname,
            eventdate: input.eventdate,
            code: &input.code,
            custom_fields: &input.custom_fields,
        })?;

        if self.options.enforce_unique_code
            && registration_repo::exists_for_customer_code(conn, customer.id, &input.code).await?
        {
            return Err(AppError::new(ErrorCode::AlreadyRegistered)
                .with_detail("code", input.code.as_str())
                .into());
        }

        if !input.contact.is_empty() {
            let contact = &input.contact;
            validate_present_text(&contact.first_name, "firstName", MAX_PERSON_NAME_LEN)?;
            validate_present_text(&contact.last_name, "lastName", MAX_PERSON_NAME_LEN)?;
            validate_present_text(&contact.email_address, "emailAddress", MAX_EMAIL_LEN)?;
            validate_present_text(&contact.phone_number, "phoneNumber", MAX_SHORT_TEXT_LEN)?;
            customer_repo::update_contact(conn, customer.id, contact).await?;
        }

        let created = registration_repo::create(
            conn,
            NewRegistration {
                customer_id: customer.id,
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
            customer_id = customer.id,
            registration_id = created.id,
            code = %created.code,
            "Customer registered for event"
        );
        self.reload(ctx, conn, created.id).await
    }

    /// Patch own registration; id and owner are always preserved
    pub async fn update(
        &self,
        ctx: &RequestContext,
        conn: &mut SqliteConnection,
        input: ShopUpdateRegistrationInput,
    ) -> ServiceResult<CustomerEventRegistration> {
        let id = input.id;
        let mut registration = self
            .find_one(ctx, conn, id, Some(&[]))
            .await?
            .ok_or_else(|| AppError::registration_not_found(id))?;
        let (original_id, original_customer) = (registration.id, registration.customer_id);

        let patch = RegistrationPatch::from(input);
        validate_patch(&patch)?;

        if let Some(code) = patch.code.as_deref().filter(|c| *c != registration.code) {
            if self.options.enforce_unique_code
                && registration_repo::exists_for_customer_code(conn, original_customer, code)
                    .await?
            {
                return Err(AppError::new(ErrorCode::AlreadyRegistered)
                    .with_detail("code", code)
                    .into());
            }
        }

        patch.apply(&mut registration);
        registration.id = original_id;
        registration.customer_id = original_customer;
        registration_repo::save(conn, &registration).await?;

        tracing::info!(
            customer_id = original_customer,
            registration_id = id,
            "Customer updated registration"
        );
        self.reload(ctx, conn, id).await
    }

    /// Delete own registration; a storage failure is a hard error
    pub async fn delete(
        &self,
        ctx: &RequestContext,
        conn: &mut SqliteConnection,
        id: i64,
    ) -> ServiceResult<bool> {
        let registration = self
            .find_one(ctx, conn, id, Some(&[]))
            .await?
            .ok_or_else(|| AppError::registration_not_found(id))?;

        match registration_repo::delete(conn, registration.id).await {
            Ok(deleted) => {
                tracing::info!(
                    customer_id = registration.customer_id,
                    registration_id = id,
                    deleted,
                    "Customer cancelled registration"
                );
                Ok(deleted)
            }
            Err(e) => Err(AppError::with_message(
                ErrorCode::RegistrationDeleteFailed,
                format!("Failed to delete registration: {e}"),
            )
            .with_detail("id", id)
            .into()),
        }
    }

    /// Own registration under `code`, if any
    pub async fn find_by_event_code(
        &self,
        ctx: &RequestContext,
        conn: &mut SqliteConnection,
        code: &str,
    ) -> ServiceResult<Option<CustomerEventRegistration>> {
        let scope = self.scope(ctx, conn).await?;
        let Some(registration) = registration_repo::find_by_code(conn, code, &scope).await? else {
            return Ok(None);
        };
        let mut found = [registration];
        load_relations(conn, &mut found, DEFAULT_RELATIONS).await?;
        let [registration] = found;
        Ok(Some(registration))
    }

    pub async fn is_registered(
        &self,
        ctx: &RequestContext,
        conn: &mut SqliteConnection,
        code: &str,
    ) -> ServiceResult<bool> {
        Ok(self.find_by_event_code(ctx, conn, code).await?.is_some())
    }

    async fn reload(
        &self,
        ctx: &RequestContext,
        conn: &mut SqliteConnection,
        id: i64,
    ) -> ServiceResult<CustomerEventRegistration> {
        self.find_one(ctx, conn, id, None)
            .await?
            .ok_or_else(|| AppError::registration_not_found(id).into())
    }
}
