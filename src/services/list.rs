//! List query engine shared by every list endpoint.

use crate::domain::filter::{ListFilter, ListParams, PageDefaults, SortKey};
use crate::pagination::Page;
use crate::repository::errors::RepositoryResult;
use crate::services::ServiceResult;

/// Validates raw list parameters, runs `fetch` with the resulting filter and
/// wraps the rows with pagination metadata.
///
/// An invalid filter fails before `fetch` runs. `fetch` returns the total row
/// count alongside the requested page.
pub fn list<S, T, F>(params: &ListParams, defaults: PageDefaults, fetch: F) -> ServiceResult<Page<T>>
where
    S: SortKey,
    F: FnOnce(ListFilter<S>) -> RepositoryResult<(i64, Vec<T>)>,
{
    let filter = ListFilter::<S>::from_params(params, defaults)?;
    let (total, rows) = fetch(filter)?;
    Ok(Page::new(rows, total, filter.page, filter.page_size))
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::domain::company::CompanySort;
    use crate::repository::errors::RepositoryError;
    use crate::services::ServiceError;

    #[test]
    fn invalid_sort_never_reaches_storage() {
        let called = Cell::new(false);
        let params = ListParams::default().sort("password");

        let result = list::<CompanySort, (), _>(&params, PageDefaults::default(), |_| {
            called.set(true);
            Ok((0, vec![]))
        });

        match result {
            Err(ServiceError::Validation(errors)) => {
                assert_eq!(errors.get("sort"), Some("invalid sort value"))
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(!called.get());
    }

    #[test]
    fn builds_metadata_from_total() {
        let params = ListParams::default().page(2).page_size(10);
        let page = list::<CompanySort, i32, _>(&params, PageDefaults::default(), |filter| {
            assert_eq!(filter.offset(), 10);
            Ok((25, (11..=20).collect()))
        })
        .unwrap();

        assert_eq!(page.data.len(), 10);
        assert_eq!(page.metadata.last_page, 3);
        assert_eq!(page.metadata.current_page, 2);
        assert_eq!(page.metadata.total_records, 25);
    }

    #[test]
    fn storage_failures_are_propagated() {
        let result = list::<CompanySort, i32, _>(&ListParams::default(), PageDefaults::default(), |_| {
            Err(RepositoryError::ConnectionError("pool timed out".into()))
        });
        assert!(matches!(result, Err(ServiceError::StorageUnavailable(_))));
    }
}
