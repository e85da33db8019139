#![allow(dead_code)]

use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tempfile::TempDir;

use zentrix_crm::db::{DEFAULT_STORAGE_TIMEOUT, DbPool, establish_connection_pool};
use zentrix_crm::domain::company::CompanyData;
use zentrix_crm::domain::contact::ContactData;
use zentrix_crm::domain::types::{CompanyId, ContactId, UserId};
use zentrix_crm::domain::user::NewUser;
use zentrix_crm::repository::{DieselRepository, UserWriter};
use zentrix_crm::services::{companies, contacts};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Migrated SQLite database living in a temporary directory.
///
/// The directory, and with it the database file, is removed on drop.
pub struct TestDb {
    pool: DbPool,
    _dir: TempDir,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join(name);
        let url = path.to_str().expect("utf-8 temp path");

        let pool = establish_connection_pool(url, DEFAULT_STORAGE_TIMEOUT).expect("create pool");
        let mut conn = pool.get().expect("get connection");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("run migrations");

        Self { pool, _dir: dir }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn repo(&self) -> DieselRepository {
        DieselRepository::new(self.pool())
    }
}

pub fn seed_user(repo: &DieselRepository, email: &str) -> UserId {
    repo.create_user(&NewUser::new("Ana", "Reyes", email, "sales"))
        .expect("seed user")
        .id
}

pub fn company_data(sales_owner: UserId, name: &str, email: &str) -> CompanyData {
    CompanyData {
        name: name.to_string(),
        address: "1 Road".to_string(),
        sales_owner,
        email: email.to_string(),
        company_size: "50".to_string(),
        industry: "Manufacturing".to_string(),
        business_type: "B2B".to_string(),
        country: "PH".to_string(),
        image: None,
        website: Some("https://acme.example".to_string()),
    }
}

pub fn seed_company(repo: &DieselRepository, sales_owner: UserId, name: &str) -> CompanyId {
    let email = format!("{}@companies.example", name.to_lowercase().replace(' ', "-"));
    companies::create_company(repo, company_data(sales_owner, name, &email))
        .expect("seed company")
        .id
}

pub fn seed_contact(repo: &DieselRepository, company_id: CompanyId, email: &str) -> ContactId {
    let data = ContactData {
        name: "Maria Santos".to_string(),
        email: email.to_string(),
        company_id,
        title: "Buyer".to_string(),
        status: "active".to_string(),
    };
    contacts::create_contact(repo, data).expect("seed contact").id
}
