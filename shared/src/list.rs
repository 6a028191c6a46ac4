//! List query types
//!
//! Pagination, sorting and filtering options shared by the admin and shop
//! listing endpoints, plus the paginated result envelope.

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::models::RegistrationType;

/// Relations that can be eager-loaded with a registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Relation {
    Customer,
}

impl std::str::FromStr for Relation {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "customer" => Ok(Self::Customer),
            other => Err(AppError::validation(format!("Unknown relation: {other}"))
                .with_detail("field", "relations")),
        }
    }
}

/// Parse a comma separated relation list (`"customer"`, `""` for none)
pub fn parse_relations(raw: &str) -> AppResult<Vec<Relation>> {
    let mut relations = Vec::new();
    for part in raw.split(',').filter(|p| !p.trim().is_empty()) {
        let relation: Relation = part.parse()?;
        if !relations.contains(&relation) {
            relations.push(relation);
        }
    }
    Ok(relations)
}

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Sortable registration fields
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RegistrationSortField {
    Id,
    #[default]
    CreatedAt,
    UpdatedAt,
    Eventdate,
    Title,
    Category,
    Code,
    RegType,
}

impl RegistrationSortField {
    /// Column name backing this field (whitelisted, safe to splice into SQL)
    pub fn column(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
            Self::Eventdate => "eventdate",
            Self::Title => "title",
            Self::Category => "category",
            Self::Code => "code",
            Self::RegType => "reg_type",
        }
    }
}

/// List options - skip/take pagination, one sort key, equality and range filters
///
/// Deserialized straight from the query string, e.g.
/// `?skip=0&take=20&sort=eventdate&order=desc&category=marathon&relations=customer`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOptions {
    /// Rows to skip
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
    /// Rows to return (capped by the server's configured limit)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub take: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<RegistrationSortField>,
    #[serde(default)]
    pub order: SortOrder,

    // -- Filters --
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reg_type: Option<RegistrationType>,
    /// Substring match on title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Owner filter (admin only; the shop path always scopes to the caller)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<i64>,
    /// Inclusive lower bound on eventdate (Unix ms)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eventdate_from: Option<i64>,
    /// Inclusive upper bound on eventdate (Unix ms)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eventdate_to: Option<i64>,

    /// Comma separated relations to eager-load, e.g. `customer`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relations: Option<String>,
}

impl ListOptions {
    /// Add pagination
    pub fn paginate(mut self, skip: u32, take: u32) -> Self {
        self.skip = Some(skip);
        self.take = Some(take);
        self
    }

    /// Add sorting
    pub fn order_by(mut self, field: RegistrationSortField, order: SortOrder) -> Self {
        self.sort = Some(field);
        self.order = order;
        self
    }

    /// Requested relations, `None` when the caller did not ask
    pub fn relations(&self) -> AppResult<Option<Vec<Relation>>> {
        self.relations.as_deref().map(parse_relations).transpose()
    }

    /// Effective take: the requested value clamped to `limit`, or `limit` when absent
    pub fn effective_take(&self, limit: u32) -> u32 {
        self.take.map_or(limit, |t| t.min(limit))
    }
}

/// Paginated list result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedList<T> {
    pub items: Vec<T>,
    /// Total rows matching the filters, ignoring skip/take
    pub total_items: u64,
}

impl<T> PaginatedList<T> {
    pub fn new(items: Vec<T>, total_items: u64) -> Self {
        Self { items, total_items }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_options_builder() {
        let opts = ListOptions::default()
            .order_by(RegistrationSortField::Eventdate, SortOrder::Desc)
            .paginate(10, 20);

        assert_eq!(opts.skip, Some(10));
        assert_eq!(opts.take, Some(20));
        assert_eq!(opts.sort, Some(RegistrationSortField::Eventdate));
        assert_eq!(opts.order.as_sql(), "DESC");
    }

    #[test]
    fn test_effective_take_is_capped() {
        let opts = ListOptions::default().paginate(0, 5000);
        assert_eq!(opts.effective_take(1000), 1000);
        assert_eq!(ListOptions::default().effective_take(100), 100);
        assert_eq!(ListOptions::default().paginate(0, 7).effective_take(100), 7);
    }

    #[test]
    fn test_list_options_deserialize_camel_case() {
        let json = r#"{"take":5,"sort":"regType","order":"desc","regType":"club","eventdateFrom":1}"#;
        let opts: ListOptions = serde_json::from_str(json).unwrap();
        assert_eq!(opts.take, Some(5));
        assert_eq!(opts.sort, Some(RegistrationSortField::RegType));
        assert_eq!(opts.order, SortOrder::Desc);
        assert_eq!(opts.reg_type, Some(RegistrationType::Club));
        assert_eq!(opts.eventdate_from, Some(1));
    }

    #[test]
    fn test_parse_relations() {
        assert_eq!(
            parse_relations("customer, customer").unwrap(),
            vec![Relation::Customer]
        );
        assert!(parse_relations("").unwrap().is_empty());
        assert!(parse_relations("orders").is_err());

        let opts = ListOptions {
            relations: Some("customer".into()),
            ..Default::default()
        };
        assert_eq!(opts.relations().unwrap(), Some(vec![Relation::Customer]));
        assert_eq!(ListOptions::default().relations().unwrap(), None);
    }

    #[test]
    fn test_paginated_list_serializes_total_items() {
        let list = PaginatedList::new(vec!["a", "b"], 12);
        let json = serde_json::to_string(&list).unwrap();
        assert!(json.contains("\"totalItems\":12"));
    }
}
