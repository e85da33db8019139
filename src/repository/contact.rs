//! Repository implementation for contacts.

use diesel::prelude::*;

use crate::domain::contact::{Contact, ContactData, ContactSort, ContactSummary};
use crate::domain::types::ContactId;
use crate::models::contact::{Contact as DbContact, NewContact, UpdateContact};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    ContactListQuery, ContactReader, ContactWriter, DieselRepository, now, sorted, total_count,
};

impl ContactReader for DieselRepository {
    fn get_contact_by_id(&self, id: ContactId) -> RepositoryResult<Option<Contact>> {
        use crate::schema::contacts;

        let mut conn = self.conn()?;
        let contact = contacts::table
            .filter(contacts::id.eq(id.as_bytes().as_slice()))
            .filter(contacts::deleted_at.is_null())
            .select(DbContact::as_select())
            .first::<DbContact>(&mut conn)
            .optional()?;

        contact
            .map(Contact::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_contacts(
        &self,
        query: &ContactListQuery,
    ) -> RepositoryResult<(i64, Vec<ContactSummary>)> {
        use crate::schema::{companies, contacts};

        let mut conn = self.conn()?;
        let filter = &query.filter;
        let company_id = query.company_id.map(|id| id.as_bytes().to_vec());

        let mut items = contacts::table
            .inner_join(companies::table)
            .filter(contacts::deleted_at.is_null())
            .select((DbContact::as_select(), companies::name, total_count()))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(company_id) = &company_id {
            items = items.filter(contacts::company_id.eq(company_id.clone()));
        }

        let items = match filter.sort.key {
            ContactSort::Id => sorted!(items, contacts::id, filter.sort.direction),
            ContactSort::Name => sorted!(items, contacts::name, filter.sort.direction),
            ContactSort::Email => sorted!(items, contacts::email, filter.sort.direction),
            ContactSort::Title => sorted!(items, contacts::title, filter.sort.direction),
            ContactSort::Status => sorted!(items, contacts::status, filter.sort.direction),
            ContactSort::CreatedAt => sorted!(items, contacts::created_at, filter.sort.direction),
            ContactSort::UpdatedAt => sorted!(items, contacts::updated_at, filter.sort.direction),
        };

        let rows = items
            .then_order_by(contacts::created_at.desc())
            .then_order_by(contacts::id.asc())
            .limit(filter.limit())
            .offset(filter.offset())
            .load::<(DbContact, String, i64)>(&mut conn)?;

        let total = match rows.first() {
            Some((_, _, total)) => *total,
            None if filter.offset() > 0 => {
                let mut count = contacts::table
                    .filter(contacts::deleted_at.is_null())
                    .into_boxed::<diesel::sqlite::Sqlite>();
                if let Some(company_id) = company_id {
                    count = count.filter(contacts::company_id.eq(company_id));
                }
                count.count().get_result::<i64>(&mut conn)?
            }
            None => 0,
        };

        let contacts = rows
            .into_iter()
            .map(|(contact, company_name, _)| {
                Ok(ContactSummary {
                    contact: Contact::try_from(contact)?,
                    company_name,
                })
            })
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok((total, contacts))
    }
}

impl ContactWriter for DieselRepository {
    fn create_contact(&self, data: &ContactData) -> RepositoryResult<Contact> {
        use crate::schema::contacts;

        let mut conn = self.conn()?;
        let id = ContactId::new();
        let new_contact = NewContact::new(&id, data, now());

        let db_contact = diesel::insert_into(contacts::table)
            .values(&new_contact)
            .get_result::<DbContact>(&mut conn)
            .map_err(RepositoryError::unique_on("email"))?;

        Contact::try_from(db_contact).map_err(RepositoryError::from)
    }

    fn update_contact(&self, id: ContactId, data: &ContactData) -> RepositoryResult<Contact> {
        use crate::schema::contacts;

        let mut conn = self.conn()?;
        let updates = UpdateContact::new(data, now());

        let db_contact = diesel::update(
            contacts::table
                .filter(contacts::id.eq(id.as_bytes().as_slice()))
                .filter(contacts::deleted_at.is_null()),
        )
        .set(&updates)
        .get_result::<DbContact>(&mut conn)
        .map_err(RepositoryError::unique_on("email"))?;

        Contact::try_from(db_contact).map_err(RepositoryError::from)
    }

    fn delete_contact(&self, id: ContactId) -> RepositoryResult<()> {
        use crate::schema::contacts;

        let mut conn = self.conn()?;
        let timestamp = now();

        let affected = diesel::update(
            contacts::table
                .filter(contacts::id.eq(id.as_bytes().as_slice()))
                .filter(contacts::deleted_at.is_null()),
        )
        .set((
            contacts::deleted_at.eq(Some(timestamp)),
            contacts::updated_at.eq(timestamp),
        ))
        .execute(&mut conn)?;

        if affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
