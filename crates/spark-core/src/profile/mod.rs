//! Dating profiles and the mock catalog.

mod catalog;
mod model;

pub use catalog::{CURRENT_USER_ID, current_user, mock_candidates};
pub use model::UserProfile;
