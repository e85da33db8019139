//! List filters shared by every list endpoint.
//!
//! Raw query parameters are normalized into a [`ListFilter`] before any query
//! is built. The sort field must be one of the names an aggregate's
//! [`SortKey::SAFELIST`] declares; the repository then maps the typed key to a
//! column, so no request text ever reaches the SQL.

use std::fmt::Debug;

use serde::Deserialize;

use crate::domain::validation::FieldErrors;

pub const MAX_PAGE: i64 = 10_000_000;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Raw list parameters as they arrive from the query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub sort: Option<String>,
}

impl ListParams {
    pub fn page(mut self, page: impl ToString) -> Self {
        self.page = Some(page.to_string());
        self
    }

    pub fn page_size(mut self, page_size: impl ToString) -> Self {
        self.page_size = Some(page_size.to_string());
        self
    }

    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }
}

/// Values used when the request omits `page` or `page_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageDefaults {
    pub page: i64,
    pub page_size: i64,
}

impl Default for PageDefaults {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Sortable fields of one aggregate type.
pub trait SortKey: Copy + Eq + Debug + 'static {
    /// Field names accepted in the `sort` parameter and the key each maps to.
    const SAFELIST: &'static [(&'static str, Self)];

    /// Sort applied when the request names none.
    const DEFAULT_SORT: &'static str = "-created_at";

    fn from_name(name: &str) -> Option<Self> {
        Self::SAFELIST
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, key)| *key)
    }

    fn name(self) -> &'static str {
        Self::SAFELIST
            .iter()
            .find(|(_, key)| *key == self)
            .map(|(name, _)| *name)
            .unwrap_or("created_at")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort<S> {
    pub key: S,
    pub direction: SortDirection,
}

impl<S: SortKey> Sort<S> {
    /// Parses `field` or `-field`, rejecting names outside the safelist.
    pub fn parse(value: &str) -> Option<Self> {
        let (direction, name) = match value.strip_prefix('-') {
            Some(name) => (SortDirection::Descending, name),
            None => (SortDirection::Ascending, value),
        };
        S::from_name(name).map(|key| Self { key, direction })
    }
}

/// Validated, injection-safe list query descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListFilter<S> {
    pub page: i64,
    pub page_size: i64,
    pub sort: Sort<S>,
}

impl<S: SortKey> ListFilter<S> {
    /// Normalizes raw parameters, collecting one message per invalid field.
    pub fn from_params(params: &ListParams, defaults: PageDefaults) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();

        let page = read_int(params.page.as_deref(), "page", defaults.page, &mut errors);
        let page_size = read_int(
            params.page_size.as_deref(),
            "page_size",
            defaults.page_size,
            &mut errors,
        );

        errors.check(page > 0, "page", "must be greater than zero");
        errors.check(page <= MAX_PAGE, "page", "must be a maximum of 10 million");
        errors.check(page_size > 0, "page_size", "must be greater than zero");
        errors.check(
            page_size <= MAX_PAGE_SIZE,
            "page_size",
            "must be a maximum of 100",
        );

        let sort_value = params
            .sort
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(S::DEFAULT_SORT);
        let sort = Sort::<S>::parse(sort_value);
        if sort.is_none() {
            errors.add("sort", "invalid sort value");
        }

        match sort {
            Some(sort) if errors.is_empty() => Ok(Self {
                page,
                page_size,
                sort,
            }),
            _ => Err(errors),
        }
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.page_size
    }
}

fn read_int(value: Option<&str>, field: &str, default: i64, errors: &mut FieldErrors) -> i64 {
    match value.map(str::trim).filter(|s| !s.is_empty()) {
        None => default,
        Some(raw) => raw.parse::<i64>().unwrap_or_else(|_| {
            errors.add(field, "must be a number value");
            default
        }),
    }
}
