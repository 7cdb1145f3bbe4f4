//! Name search submission

use super::form::{FormFields, FromFormFields};
use super::limits::MAX_NAME_LEN;
use super::ValidationError;

/// Search box submission. The term is kept verbatim; an empty term is a
/// substring of every name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchForm {
    pub search_term: String,
}

impl FromFormFields for SearchForm {
    fn from_fields(f: &FormFields) -> Result<Self, ValidationError> {
        let term = f.get("search_term").ok_or(ValidationError::Missing {
            field: "search_term",
        })?;

        if term.chars().count() > MAX_NAME_LEN {
            return Err(ValidationError::TooLong {
                field: "search_term",
                max: MAX_NAME_LEN,
            });
        }

        Ok(Self {
            search_term: term.to_owned(),
        })
    }
}
