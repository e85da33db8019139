//! Repository implementation for quotes.

use diesel::prelude::*;
use diesel::result::Error as DieselError;

use crate::domain::quote::{Quote, QuoteData, QuoteSort, QuoteSummary};
use crate::domain::types::QuoteId;
use crate::models::quote::{NewQuote, Quote as DbQuote, UpdateQuote};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    DieselRepository, QuoteListQuery, QuoteReader, QuoteWriter, now, sorted, total_count,
};

impl QuoteReader for DieselRepository {
    fn get_quote_by_id(&self, id: QuoteId) -> RepositoryResult<Option<Quote>> {
        use crate::schema::quotes;

        let mut conn = self.conn()?;
        let quote = quotes::table
            .filter(quotes::id.eq(id.as_bytes().as_slice()))
            .first::<DbQuote>(&mut conn)
            .optional()?;

        quote
            .map(Quote::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_quotes(&self, query: &QuoteListQuery) -> RepositoryResult<(i64, Vec<QuoteSummary>)> {
        use crate::schema::{companies, contacts, quotes, users};

        let mut conn = self.conn()?;
        let filter = &query.filter;
        let company_id = query.company_id.map(|id| id.as_bytes().to_vec());

        let mut items = quotes::table
            .inner_join(companies::table)
            .inner_join(users::table.on(users::id.eq(quotes::prepared_by)))
            .inner_join(contacts::table.on(contacts::id.eq(quotes::prepared_for)))
            .select((
                DbQuote::as_select(),
                companies::name,
                users::first_name,
                users::last_name,
                contacts::name,
                total_count(),
            ))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(company_id) = &company_id {
            items = items.filter(quotes::company_id.eq(company_id.clone()));
        }

        let items = match filter.sort.key {
            QuoteSort::Id => sorted!(items, quotes::id, filter.sort.direction),
            QuoteSort::CompanyId => sorted!(items, quotes::company_id, filter.sort.direction),
            QuoteSort::Name => sorted!(items, quotes::name, filter.sort.direction),
            QuoteSort::PreparedBy => sorted!(items, quotes::prepared_by, filter.sort.direction),
            QuoteSort::PreparedFor => sorted!(items, quotes::prepared_for, filter.sort.direction),
            QuoteSort::Stage => sorted!(items, quotes::stage, filter.sort.direction),
            QuoteSort::CreatedAt => sorted!(items, quotes::created_at, filter.sort.direction),
            QuoteSort::UpdatedAt => sorted!(items, quotes::updated_at, filter.sort.direction),
        };

        let rows = items
            .then_order_by(quotes::created_at.desc())
            .then_order_by(quotes::id.asc())
            .limit(filter.limit())
            .offset(filter.offset())
            .load::<(DbQuote, String, String, String, String, i64)>(&mut conn)?;

        let total = match rows.first() {
            Some((.., total)) => *total,
            None if filter.offset() > 0 => {
                let mut count = quotes::table.into_boxed::<diesel::sqlite::Sqlite>();
                if let Some(company_id) = company_id {
                    count = count.filter(quotes::company_id.eq(company_id));
                }
                count.count().get_result::<i64>(&mut conn)?
            }
            None => 0,
        };

        let quotes = rows
            .into_iter()
            .map(
                |(quote, company_name, first_name, last_name, prepared_for_name, _)| {
                    Ok(QuoteSummary {
                        quote: Quote::try_from(quote)?,
                        company_name,
                        prepared_by_name: format!("{first_name} {last_name}"),
                        prepared_for_name,
                    })
                },
            )
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok((total, quotes))
    }
}

impl QuoteWriter for DieselRepository {
    fn create_quote(&self, data: &QuoteData) -> RepositoryResult<Quote> {
        use crate::schema::quotes;

        let mut conn = self.conn()?;
        let id = QuoteId::new();
        let new_quote = NewQuote::new(&id, data, now());

        let db_quote = diesel::insert_into(quotes::table)
            .values(&new_quote)
            .get_result::<DbQuote>(&mut conn)?;

        Quote::try_from(db_quote).map_err(RepositoryError::from)
    }

    fn update_quote(&self, id: QuoteId, data: &QuoteData) -> RepositoryResult<Quote> {
        use crate::schema::quotes;

        let mut conn = self.conn()?;
        let updates = UpdateQuote::new(data, now());

        let db_quote = diesel::update(quotes::table.filter(quotes::id.eq(id.as_bytes().as_slice())))
            .set(&updates)
            .get_result::<DbQuote>(&mut conn)?;

        Quote::try_from(db_quote).map_err(RepositoryError::from)
    }

    fn delete_quote(&self, id: QuoteId) -> RepositoryResult<()> {
        use crate::schema::{products, quotes};

        let mut conn = self.conn()?;
        let id = id.as_bytes().as_slice();

        conn.transaction::<_, DieselError, _>(|conn| {
            diesel::delete(products::table.filter(products::quote_id.eq(id))).execute(conn)?;
            let affected = diesel::delete(quotes::table.filter(quotes::id.eq(id))).execute(conn)?;
            if affected == 0 {
                return Err(DieselError::NotFound);
            }
            Ok(())
        })?;

        Ok(())
    }
}
