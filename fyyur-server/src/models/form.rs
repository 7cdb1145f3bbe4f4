//! Raw urlencoded form access
//!
//! Browsers submit multi-select widgets as repeated keys
//! (`genres=Jazz&genres=Reggae`), so the body is decoded into ordered
//! pairs first and each submission type pulls its fields out explicitly.

use super::ValidationError;

/// Submission types that can be built from decoded form pairs.
pub trait FromFormFields: Sized {
    fn from_fields(fields: &FormFields) -> Result<Self, ValidationError>;
}

/// Ordered key/value pairs of a decoded form body
#[derive(Debug, Clone, Default)]
pub struct FormFields(Vec<(String, String)>);

impl FormFields {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }

    /// First value submitted for `key`, untouched.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Every value submitted for `key`, in submission order.
    pub fn all(&self, key: &str) -> Vec<&str> {
        self.0
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Required text field: must be present and non-blank after trimming.
    pub fn required(&self, field: &'static str, max: usize) -> Result<String, ValidationError> {
        let value = self
            .get(field)
            .ok_or(ValidationError::Missing { field })?
            .trim();

        if value.is_empty() {
            return Err(ValidationError::Empty { field });
        }

        check_len(field, value, max)?;
        Ok(value.to_owned())
    }

    /// Optional text field: absent or blank becomes `None`.
    pub fn optional(
        &self,
        field: &'static str,
        max: usize,
    ) -> Result<Option<String>, ValidationError> {
        match self.get(field).map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => {
                check_len(field, value, max)?;
                Ok(Some(value.to_owned()))
            }
        }
    }

    /// Checkbox field. Unchecked boxes are not submitted at all.
    pub fn flag(&self, field: &str) -> bool {
        self.get(field).is_some_and(|v| {
            matches!(
                v.trim().to_ascii_lowercase().as_str(),
                "y" | "yes" | "on" | "true" | "1"
            )
        })
    }

    /// Required integer id field.
    pub fn id(&self, field: &'static str) -> Result<i64, ValidationError> {
        let value = self
            .get(field)
            .ok_or(ValidationError::Missing { field })?
            .trim();

        if value.is_empty() {
            return Err(ValidationError::Empty { field });
        }

        value.parse().map_err(|_| ValidationError::InvalidFormat {
            field,
            reason: "must be an integer id",
        })
    }

    /// Repeated multi-select values, trimmed, blanks dropped, exact duplicates
    /// collapsed while keeping first-seen order.
    pub fn list(&self, field: &'static str, max: usize) -> Result<Vec<String>, ValidationError> {
        let mut out: Vec<String> = Vec::new();
        for value in self.all(field) {
            let value = value.trim();
            if value.is_empty() || out.iter().any(|v| v == value) {
                continue;
            }
            check_len(field, value, max)?;
            out.push(value.to_owned());
        }
        Ok(out)
    }
}

impl From<Vec<(String, String)>> for FormFields {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self::new(pairs)
    }
}

fn check_len(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}
