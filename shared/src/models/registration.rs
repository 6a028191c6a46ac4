//! Customer Event Registration Model

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::customer::{Customer, CustomerContact};

/// Open custom-field bag, stored as a JSON object
pub type CustomFields = Map<String, Value>;

/// Registration type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum RegistrationType {
    #[default]
    Individual,
    Club,
    Organization,
    Gym,
}

impl RegistrationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Individual => "individual",
            Self::Club => "club",
            Self::Organization => "organization",
            Self::Gym => "gym",
        }
    }
}

impl std::fmt::Display for RegistrationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A customer's signup for a named event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct CustomerEventRegistration {
    pub id: i64,
    pub created_at: i64,
    pub updated_at: i64,
    pub customer_id: i64,
    pub reg_type: RegistrationType,
    /// e.g. "marathon", "food-fest", "competition"
    pub category: String,
    pub title: String,
    pub orgname: Option<String>,
    /// Event date (Unix millis)
    pub eventdate: i64,
    pub code: String,
    #[cfg_attr(feature = "db", sqlx(json))]
    #[serde(default)]
    pub custom_fields: CustomFields,

    // -- Relations (populated on request) --
    #[cfg_attr(feature = "db", sqlx(skip))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<Customer>,
}

/// Admin create payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRegistrationInput {
    pub customer_id: i64,
    pub reg_type: Option<RegistrationType>,
    pub category: Option<String>,
    pub title: String,
    pub orgname: Option<String>,
    pub eventdate: i64,
    pub code: String,
    pub custom_fields: Option<CustomFields>,
}

/// Admin update payload (patch: absent fields are left unchanged)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRegistrationInput {
    pub id: i64,
    /// Reassigns the registration to another customer
    pub customer_id: Option<i64>,
    pub reg_type: Option<RegistrationType>,
    pub category: Option<String>,
    pub title: Option<String>,
    pub orgname: Option<String>,
    pub eventdate: Option<i64>,
    pub code: Option<String>,
    pub custom_fields: Option<CustomFields>,
}

/// Shop create payload
///
/// The owner is always the authenticated caller; there is no customer field.
/// Contact fields, when present, are written to the caller's profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopCreateRegistrationInput {
    pub reg_type: Option<RegistrationType>,
    pub category: Option<String>,
    pub title: String,
    pub orgname: Option<String>,
    pub eventdate: i64,
    pub code: String,
    pub custom_fields: Option<CustomFields>,
    #[serde(flatten)]
    pub contact: CustomerContact,
}

/// Shop update payload
///
/// Carries no owner field; a `customerId` sent by the client is dropped
/// during deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopUpdateRegistrationInput {
    pub id: i64,
    pub reg_type: Option<RegistrationType>,
    pub category: Option<String>,
    pub title: Option<String>,
    pub orgname: Option<String>,
    pub eventdate: Option<i64>,
    pub code: Option<String>,
    pub custom_fields: Option<CustomFields>,
}

/// Field-by-field patch over a stored registration
///
/// Never touches `id` or `created_at`. `customer_id` is only set by the
/// admin path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistrationPatch {
    pub customer_id: Option<i64>,
    pub reg_type: Option<RegistrationType>,
    pub category: Option<String>,
    pub title: Option<String>,
    pub orgname: Option<String>,
    pub eventdate: Option<i64>,
    pub code: Option<String>,
    /// Merged key by key into the existing bag
    pub custom_fields: Option<CustomFields>,
}

impl RegistrationPatch {
    /// Apply present fields onto `target`
    pub fn apply(self, target: &mut CustomerEventRegistration) {
        if let Some(v) = self.customer_id {
            target.customer_id = v;
        }
        if let Some(v) = self.reg_type {
            target.reg_type = v;
        }
        if let Some(v) = self.category {
            target.category = v;
        }
        if let Some(v) = self.title {
            target.title = v;
        }
        if let Some(v) = self.orgname {
            target.orgname = Some(v);
        }
        if let Some(v) = self.eventdate {
            target.eventdate = v;
        }
        if let Some(v) = self.code {
            target.code = v;
        }
        if let Some(fields) = self.custom_fields {
            target.custom_fields.extend(fields);
        }
    }
}

impl From<UpdateRegistrationInput> for RegistrationPatch {
    fn from(input: UpdateRegistrationInput) -> Self {
        Self {
            customer_id: input.customer_id,
            reg_type: input.reg_type,
            category: input.category,
            title: input.title,
            orgname: input.orgname,
            eventdate: input.eventdate,
            code: input.code,
            custom_fields: input.custom_fields,
        }
    }
}

impl From<ShopUpdateRegistrationInput> for RegistrationPatch {
    fn from(input: ShopUpdateRegistrationInput) -> Self {
        Self {
            customer_id: None,
            reg_type: input.reg_type,
            category: input.category,
            title: input.title,
            orgname: input.orgname,
            eventdate: input.eventdate,
            code: input.code,
            custom_fields: input.custom_fields,
        }
    }
}

/// Outcome of an admin delete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeletionResult {
    Deleted,
    NotDeleted,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeletionResponse {
    pub result: DeletionResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl DeletionResponse {
    pub fn deleted() -> Self {
        Self {
            result: DeletionResult::Deleted,
            message: None,
        }
    }

    pub fn not_deleted(message: impl Into<String>) -> Self {
        Self {
            result: DeletionResult::NotDeleted,
            message: Some(message.into()),
        }
    }
}

/// Flattened registration + customer row for spreadsheet export
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct RegistrationExportRow {
    pub id: i64,
    pub title: String,
    pub category: String,
    pub reg_type: RegistrationType,
    pub orgname: Option<String>,
    pub eventdate: i64,
    pub code: String,
    pub customer_id: i64,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub created_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> CustomerEventRegistration {
        CustomerEventRegistration {
            id: 1,
            created_at: 10,
            updated_at: 10,
            customer_id: 42,
            reg_type: RegistrationType::Individual,
            category: "marathon".into(),
            title: "City Run".into(),
            orgname: None,
            eventdate: 1_746_057_600_000,
            code: "RUN25".into(),
            custom_fields: CustomFields::new(),
            customer: None,
        }
    }

    #[test]
    fn test_registration_type_default_and_serde() {
        assert_eq!(RegistrationType::default(), RegistrationType::Individual);
        let t: RegistrationType = serde_json::from_str("\"gym\"").unwrap();
        assert_eq!(t, RegistrationType::Gym);
        assert_eq!(RegistrationType::Organization.to_string(), "organization");
    }

    #[test]
    fn test_patch_only_touches_present_fields() {
        let mut reg = sample();
        RegistrationPatch {
            title: Some("Night Run".into()),
            orgname: Some("Harriers".into()),
            ..Default::default()
        }
        .apply(&mut reg);

        assert_eq!(reg.title, "Night Run");
        assert_eq!(reg.orgname.as_deref(), Some("Harriers"));
        assert_eq!(reg.category, "marathon");
        assert_eq!(reg.code, "RUN25");
        assert_eq!(reg.customer_id, 42);
        assert_eq!(reg.id, 1);
    }

    #[test]
    fn test_patch_merges_custom_fields() {
        let mut reg = sample();
        reg.custom_fields.insert("shirt".into(), json!("M"));
        reg.custom_fields.insert("bib".into(), json!(12));

        let mut incoming = CustomFields::new();
        incoming.insert("shirt".into(), json!("L"));
        RegistrationPatch {
            custom_fields: Some(incoming),
            ..Default::default()
        }
        .apply(&mut reg);

        assert_eq!(reg.custom_fields["shirt"], json!("L"));
        assert_eq!(reg.custom_fields["bib"], json!(12));
    }

    #[test]
    fn test_shop_update_ignores_customer_id() {
        let input: ShopUpdateRegistrationInput =
            serde_json::from_str(r#"{"id":1,"customerId":99,"title":"X"}"#).unwrap();
        let patch = RegistrationPatch::from(input);
        assert_eq!(patch.customer_id, None);
        assert_eq!(patch.title.as_deref(), Some("X"));
    }

    #[test]
    fn test_shop_create_flattens_contact() {
        let input: ShopCreateRegistrationInput = serde_json::from_str(
            r#"{"title":"City Run","eventdate":1,"code":"RUN25","firstName":"Ada","phoneNumber":"555"}"#,
        )
        .unwrap();
        assert_eq!(input.contact.first_name.as_deref(), Some("Ada"));
        assert_eq!(input.contact.phone_number.as_deref(), Some("555"));
        assert!(input.reg_type.is_none());
    }

    #[test]
    fn test_deletion_response_serde() {
        let json = serde_json::to_string(&DeletionResponse::deleted()).unwrap();
        assert_eq!(json, r#"{"result":"DELETED"}"#);

        let json = serde_json::to_string(&DeletionResponse::not_deleted("locked")).unwrap();
        assert_eq!(json, r#"{"result":"NOT_DELETED","message":"locked"}"#);
    }

    #[test]
    fn test_registration_serializes_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["customerId"], 42);
        assert_eq!(json["regType"], "individual");
        assert!(json.get("customer").is_none());
    }
}
