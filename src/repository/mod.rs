//! Storage collaborators consumed by the service layer.
//!
//! Each aggregate gets a reader and a writer trait. [`DieselRepository`]
//! implements all of them against SQLite; services stay generic over the
//! traits so they can be exercised with in-memory or mocked repositories.

use diesel::dsl::sql;
use diesel::expression::SqlLiteral;
use diesel::sql_types::BigInt;

use crate::db::{DbConnection, DbPool, get_connection};
use crate::domain::company::{Company, CompanyData, CompanySort, CompanySummary};
use crate::domain::contact::{Contact, ContactData, ContactSort, ContactSummary};
use crate::domain::filter::ListFilter;
use crate::domain::patch::Reference;
use crate::domain::product::{NewProduct, Product, ProductData};
use crate::domain::quote::{Quote, QuoteData, QuoteSort, QuoteSummary};
use crate::domain::types::{CompanyId, ContactId, ProductId, QuoteId, UserId};
use crate::domain::user::{NewUser, User};
use crate::repository::errors::RepositoryResult;

pub mod company;
pub mod contact;
pub mod errors;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod product;
pub mod quote;
pub mod user;

/// Diesel-backed implementation of every repository trait.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}

/// Window total selected next to each row so one round trip yields the count.
pub(crate) fn total_count() -> SqlLiteral<BigInt> {
    sql::<BigInt>("COUNT(*) OVER ()")
}

pub(crate) fn now() -> chrono::NaiveDateTime {
    chrono::Utc::now().naive_utc()
}

/// Applies `column asc|desc` as the primary ordering of a boxed query.
macro_rules! sorted {
    ($query:expr, $column:expr, $direction:expr) => {
        match $direction {
            $crate::domain::filter::SortDirection::Ascending => $query.order_by($column.asc()),
            $crate::domain::filter::SortDirection::Descending => $query.order_by($column.desc()),
        }
    };
}
pub(crate) use sorted;

#[derive(Debug, Clone)]
pub struct CompanyListQuery {
    pub filter: ListFilter<CompanySort>,
}

#[derive(Debug, Clone)]
pub struct ContactListQuery {
    pub filter: ListFilter<ContactSort>,
    pub company_id: Option<CompanyId>,
}

#[derive(Debug, Clone)]
pub struct QuoteListQuery {
    pub filter: ListFilter<QuoteSort>,
    pub company_id: Option<CompanyId>,
}

impl CompanyListQuery {
    pub fn new(filter: ListFilter<CompanySort>) -> Self {
        Self { filter }
    }
}

impl ContactListQuery {
    pub fn new(filter: ListFilter<ContactSort>) -> Self {
        Self {
            filter,
            company_id: None,
        }
    }

    pub fn company_id(mut self, company_id: CompanyId) -> Self {
        self.company_id = Some(company_id);
        self
    }
}

impl QuoteListQuery {
    pub fn new(filter: ListFilter<QuoteSort>) -> Self {
        Self {
            filter,
            company_id: None,
        }
    }

    pub fn company_id(mut self, company_id: CompanyId) -> Self {
        self.company_id = Some(company_id);
        self
    }
}

pub trait UserReader {
    fn get_user_by_id(&self, id: UserId) -> RepositoryResult<Option<User>>;
}

pub trait UserWriter {
    fn create_user(&self, user: &NewUser) -> RepositoryResult<User>;
}

/// Reads ignore soft-deleted companies.
pub trait CompanyReader {
    fn get_company_by_id(&self, id: CompanyId) -> RepositoryResult<Option<Company>>;
    fn list_companies(
        &self,
        query: &CompanyListQuery,
    ) -> RepositoryResult<(i64, Vec<CompanySummary>)>;
}

pub trait CompanyWriter {
    fn create_company(&self, data: &CompanyData) -> RepositoryResult<Company>;
    fn update_company(&self, id: CompanyId, data: &CompanyData) -> RepositoryResult<Company>;
    /// Sets the soft-deletion marker.
    fn delete_company(&self, id: CompanyId) -> RepositoryResult<()>;
}

/// Reads ignore soft-deleted contacts.
pub trait ContactReader {
    fn get_contact_by_id(&self, id: ContactId) -> RepositoryResult<Option<Contact>>;
    fn list_contacts(
        &self,
        query: &ContactListQuery,
    ) -> RepositoryResult<(i64, Vec<ContactSummary>)>;
}

pub trait ContactWriter {
    fn create_contact(&self, data: &ContactData) -> RepositoryResult<Contact>;
    fn update_contact(&self, id: ContactId, data: &ContactData) -> RepositoryResult<Contact>;
    /// Sets the soft-deletion marker.
    fn delete_contact(&self, id: ContactId) -> RepositoryResult<()>;
}

pub trait QuoteReader {
    fn get_quote_by_id(&self, id: QuoteId) -> RepositoryResult<Option<Quote>>;
    fn list_quotes(&self, query: &QuoteListQuery) -> RepositoryResult<(i64, Vec<QuoteSummary>)>;
}

pub trait QuoteWriter {
    fn create_quote(&self, data: &QuoteData) -> RepositoryResult<Quote>;
    fn update_quote(&self, id: QuoteId, data: &QuoteData) -> RepositoryResult<Quote>;
    /// Removes the quote and all of its products.
    fn delete_quote(&self, id: QuoteId) -> RepositoryResult<()>;
}

pub trait ProductReader {
    fn get_product_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>>;
    /// Products of a quote in submission order.
    fn list_products_by_quote(&self, quote_id: QuoteId) -> RepositoryResult<Vec<Product>>;
}

pub trait ProductWriter {
    fn create_product(&self, product: &NewProduct) -> RepositoryResult<Product>;
    fn update_product(&self, id: ProductId, data: &ProductData) -> RepositoryResult<Product>;
    fn delete_product(&self, id: ProductId) -> RepositoryResult<()>;
}

/// Existence check for any foreign key an aggregate may carry.
pub trait ReferenceReader {
    /// True when the referenced aggregate exists and is not soft-deleted.
    fn reference_exists(&self, reference: &Reference) -> RepositoryResult<bool>;
}

impl<R> ReferenceReader for R
where
    R: CompanyReader + ContactReader + UserReader + ?Sized,
{
    fn reference_exists(&self, reference: &Reference) -> RepositoryResult<bool> {
        Ok(match *reference {
            Reference::Company(id) => self.get_company_by_id(id)?.is_some(),
            Reference::SalesOwner(id) | Reference::PreparedBy(id) => {
                self.get_user_by_id(id)?.is_some()
            }
            Reference::PreparedFor(id) => self.get_contact_by_id(id)?.is_some(),
        })
    }
}
