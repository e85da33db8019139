//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::company::{Company, CompanyData, CompanySummary};
use crate::domain::contact::{Contact, ContactData, ContactSummary};
use crate::domain::product::{NewProduct, Product, ProductData};
use crate::domain::quote::{Quote, QuoteData, QuoteSummary};
use crate::domain::types::{CompanyId, ContactId, ProductId, QuoteId, UserId};
use crate::domain::user::{NewUser, User};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    CompanyListQuery, CompanyReader, CompanyWriter, ContactListQuery, ContactReader,
    ContactWriter, ProductReader, ProductWriter, QuoteListQuery, QuoteReader, QuoteWriter,
    UserReader, UserWriter,
};

mock! {
    pub Repository {}

    impl UserReader for Repository {
        fn get_user_by_id(&self, id: UserId) -> RepositoryResult<Option<User>>;
    }

    impl UserWriter for Repository {
        fn create_user(&self, user: &NewUser) -> RepositoryResult<User>;
    }

    impl CompanyReader for Repository {
        fn get_company_by_id(&self, id: CompanyId) -> RepositoryResult<Option<Company>>;
        fn list_companies(
            &self,
            query: &CompanyListQuery,
        ) -> RepositoryResult<(i64, Vec<CompanySummary>)>;
    }

    impl CompanyWriter for Repository {
        fn create_company(&self, data: &CompanyData) -> RepositoryResult<Company>;
        fn update_company(&self, id: CompanyId, data: &CompanyData) -> RepositoryResult<Company>;
        fn delete_company(&self, id: CompanyId) -> RepositoryResult<()>;
    }

    impl ContactReader for Repository {
        fn get_contact_by_id(&self, id: ContactId) -> RepositoryResult<Option<Contact>>;
        fn list_contacts(
            &self,
            query: &ContactListQuery,
        ) -> RepositoryResult<(i64, Vec<ContactSummary>)>;
    }

    impl ContactWriter for Repository {
        fn create_contact(&self, data: &ContactData) -> RepositoryResult<Contact>;
        fn update_contact(&self, id: ContactId, data: &ContactData) -> RepositoryResult<Contact>;
        fn delete_contact(&self, id: ContactId) -> RepositoryResult<()>;
    }

    impl QuoteReader for Repository {
        fn get_quote_by_id(&self, id: QuoteId) -> RepositoryResult<Option<Quote>>;
        fn list_quotes(
            &self,
            query: &QuoteListQuery,
        ) -> RepositoryResult<(i64, Vec<QuoteSummary>)>;
    }

    impl QuoteWriter for Repository {
        fn create_quote(&self, data: &QuoteData) -> RepositoryResult<Quote>;
        fn update_quote(&self, id: QuoteId, data: &QuoteData) -> RepositoryResult<Quote>;
        fn delete_quote(&self, id: QuoteId) -> RepositoryResult<()>;
    }

    impl ProductReader for Repository {
        fn get_product_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>>;
        fn list_products_by_quote(&self, quote_id: QuoteId) -> RepositoryResult<Vec<Product>>;
    }

    impl ProductWriter for Repository {
        fn create_product(&self, product: &NewProduct) -> RepositoryResult<Product>;
        fn update_product(&self, id: ProductId, data: &ProductData) -> RepositoryResult<Product>;
        fn delete_product(&self, id: ProductId) -> RepositoryResult<()>;
    }
}
