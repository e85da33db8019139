//! Sparse updates and the references they may change.
//!
//! A patch is a struct of `Option` fields: `None` leaves the stored value
//! untouched, `Some(value)` overwrites it, including empty strings and zero.
//! Nullable columns use `Option<Option<T>>` so an explicit `null` clears the
//! value while an absent key keeps it.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Deserializer};

use crate::domain::types::{CompanyId, ContactId, UserId};

/// A sparse update for some aggregate.
pub trait Patch {
    /// True when no field carries an update.
    fn is_empty(&self) -> bool;
}

/// Result of merging a patch into an aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct Merged<T> {
    pub value: T,
    /// Foreign keys present in the patch, in field declaration order.
    pub references: Vec<Reference>,
}

/// Field-level overwrite of `Self` by a patch of type `P`.
pub trait MergePatch<P: Patch>: Sized {
    fn merge(&self, patch: &P) -> Merged<Self>;
}

/// Role a foreign key plays in its owning aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceField {
    Company,
    SalesOwner,
    PreparedBy,
    PreparedFor,
}

impl ReferenceField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReferenceField::Company => "company",
            ReferenceField::SalesOwner => "sales_owner",
            ReferenceField::PreparedBy => "prepared_by",
            ReferenceField::PreparedFor => "prepared_for",
        }
    }
}

impl Display for ReferenceField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A foreign key value that must resolve to a live aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reference {
    Company(CompanyId),
    SalesOwner(UserId),
    PreparedBy(UserId),
    PreparedFor(ContactId),
}

impl Reference {
    pub fn field(&self) -> ReferenceField {
        match self {
            Reference::Company(_) => ReferenceField::Company,
            Reference::SalesOwner(_) => ReferenceField::SalesOwner,
            Reference::PreparedBy(_) => ReferenceField::PreparedBy,
            Reference::PreparedFor(_) => ReferenceField::PreparedFor,
        }
    }
}

/// Overwrites `target` when the patch carries a value.
pub(crate) fn overwrite<T: Clone>(target: &mut T, value: &Option<T>) {
    if let Some(value) = value {
        *target = value.clone();
    }
}

/// Deserializes a present key (even `null`) as `Some(..)`.
///
/// Use together with `#[serde(default)]` so that a missing key stays `None`.
pub fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Body {
        #[serde(default, deserialize_with = "present")]
        website: Option<Option<String>>,
    }

    #[test]
    fn distinguishes_absent_null_and_value() {
        let absent: Body = serde_json::from_str("{}").unwrap();
        let null: Body = serde_json::from_str(r#"{"website": null}"#).unwrap();
        let value: Body = serde_json::from_str(r#"{"website": "x.io"}"#).unwrap();

        assert_eq!(absent.website, None);
        assert_eq!(null.website, Some(None));
        assert_eq!(value.website, Some(Some("x.io".to_string())));
    }

    #[test]
    fn overwrite_only_applies_present_values() {
        let mut name = "old".to_string();
        overwrite(&mut name, &None);
        assert_eq!(name, "old");
        overwrite(&mut name, &Some(String::new()));
        assert_eq!(name, "");
    }
}
