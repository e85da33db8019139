//! Repository implementation for companies.

use diesel::prelude::*;

use crate::domain::company::{Company, CompanyData, CompanySort, CompanySummary};
use crate::domain::types::CompanyId;
use crate::models::company::{Company as DbCompany, NewCompany, UpdateCompany};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    CompanyListQuery, CompanyReader, CompanyWriter, DieselRepository, now, sorted, total_count,
};

impl CompanyReader for DieselRepository {
    fn get_company_by_id(&self, id: CompanyId) -> RepositoryResult<Option<Company>> {
        use crate::schema::companies;

        let mut conn = self.conn()?;
        let company = companies::table
            .filter(companies::id.eq(id.as_bytes().as_slice()))
            .filter(companies::deleted_at.is_null())
            .select(DbCompany::as_select())
            .first::<DbCompany>(&mut conn)
            .optional()?;

        company
            .map(Company::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_companies(
        &self,
        query: &CompanyListQuery,
    ) -> RepositoryResult<(i64, Vec<CompanySummary>)> {
        use crate::schema::{companies, users};

        let mut conn = self.conn()?;
        let filter = &query.filter;

        let items = companies::table
            .inner_join(users::table)
            .filter(companies::deleted_at.is_null())
            .select((
                DbCompany::as_select(),
                users::first_name,
                users::last_name,
                total_count(),
            ))
            .into_boxed::<diesel::sqlite::Sqlite>();

        let items = match filter.sort.key {
            CompanySort::Id => sorted!(items, companies::id, filter.sort.direction),
            CompanySort::Name => sorted!(items, companies::name, filter.sort.direction),
            CompanySort::Address => sorted!(items, companies::address, filter.sort.direction),
            CompanySort::Email => sorted!(items, companies::email, filter.sort.direction),
            CompanySort::CreatedAt => sorted!(items, companies::created_at, filter.sort.direction),
            CompanySort::UpdatedAt => sorted!(items, companies::updated_at, filter.sort.direction),
        };

        let rows = items
            .then_order_by(companies::created_at.desc())
            .then_order_by(companies::id.asc())
            .limit(filter.limit())
            .offset(filter.offset())
            .load::<(DbCompany, String, String, i64)>(&mut conn)?;

        let total = match rows.first() {
            Some((_, _, _, total)) => *total,
            None if filter.offset() > 0 => companies::table
                .filter(companies::deleted_at.is_null())
                .count()
                .get_result::<i64>(&mut conn)?,
            None => 0,
        };

        let companies = rows
            .into_iter()
            .map(|(company, first_name, last_name, _)| {
                Ok(CompanySummary {
                    company: Company::try_from(company)?,
                    sales_owner_name: format!("{first_name} {last_name}"),
                })
            })
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok((total, companies))
    }
}

impl CompanyWriter for DieselRepository {
    fn create_company(&self, data: &CompanyData) -> RepositoryResult<Company> {
        use crate::schema::companies;

        let mut conn = self.conn()?;
        let id = CompanyId::new();
        let new_company = NewCompany::new(&id, data, now());

        let db_company = diesel::insert_into(companies::table)
            .values(&new_company)
            .get_result::<DbCompany>(&mut conn)
            .map_err(RepositoryError::unique_on("email"))?;

        Company::try_from(db_company).map_err(RepositoryError::from)
    }

    fn update_company(&self, id: CompanyId, data: &CompanyData) -> RepositoryResult<Company> {
        use crate::schema::companies;

        let mut conn = self.conn()?;
        let updates = UpdateCompany::new(data, now());

        let db_company = diesel::update(
            companies::table
                .filter(companies::id.eq(id.as_bytes().as_slice()))
                .filter(companies::deleted_at.is_null()),
        )
        .set(&updates)
        .get_result::<DbCompany>(&mut conn)
        .map_err(RepositoryError::unique_on("email"))?;

        Company::try_from(db_company).map_err(RepositoryError::from)
    }

    fn delete_company(&self, id: CompanyId) -> RepositoryResult<()> {
        use crate::schema::companies;

        let mut conn = self.conn()?;
        let timestamp = now();

        let affected = diesel::update(
            companies::table
                .filter(companies::id.eq(id.as_bytes().as_slice()))
                .filter(companies::deleted_at.is_null()),
        )
        .set((
            companies::deleted_at.eq(Some(timestamp)),
            companies::updated_at.eq(timestamp),
        ))
        .execute(&mut conn)?;

        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
