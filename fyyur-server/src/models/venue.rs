//! Venue submission form

use super::form::{FormFields, FromFormFields};
use super::limits::*;
use super::ValidationError;

/// Validated venue submission (create and edit forms)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub genres: Vec<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub image_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

impl FromFormFields for VenueForm {
    /// # Rules
    /// - `name`, `city`, `state`, `address` are required
    /// - `genres` may repeat; blanks are dropped
    /// - `seeking_talent` is a checkbox
    fn from_fields(f: &FormFields) -> Result<Self, ValidationError> {
        Ok(Self {
            name: f.required("name", MAX_NAME_LEN)?,
            city: f.required("city", MAX_SHORT_LEN)?,
            state: f.required("state", MAX_SHORT_LEN)?,
            address: f.required("address", MAX_SHORT_LEN)?,
            phone: f.optional("phone", MAX_SHORT_LEN)?,
            genres: f.list("genres", MAX_GENRE_LEN)?,
            facebook_link: f.optional("facebook_link", MAX_SHORT_LEN)?,
            website: f.optional("website", MAX_LINK_LEN)?,
            image_link: f.optional("image_link", MAX_LINK_LEN)?,
            seeking_talent: f.flag("seeking_talent"),
            seeking_description: f.optional("seeking_description", MAX_DESCRIPTION_LEN)?,
        })
    }
}
