//! Form submissions with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod artist;
pub mod form;
pub mod search;
pub mod show;
pub mod validation;
pub mod venue;

pub use artist::ArtistForm;
pub use form::{FormFields, FromFormFields};
pub use search::SearchForm;
pub use show::{parse_start_time, ShowForm};
pub use validation::ValidationError;
pub use venue::VenueForm;

/// Column width limits shared by the submission types.
pub mod limits {
    pub const MAX_NAME_LEN: usize = 500;
    pub const MAX_SHORT_LEN: usize = 120;
    pub const MAX_LINK_LEN: usize = 500;
    pub const MAX_DESCRIPTION_LEN: usize = 1000;
    pub const MAX_GENRE_LEN: usize = 120;
}
