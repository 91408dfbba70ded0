//! Data models for restaurant review entities.
//!
//! - `Restaurant`, `LatLng`: restaurant listings as served by `/restaurants`
//! - `Review`, `ReviewDraft`: published reviews and user input for new ones
//!
//! The server is loose about JSON types (favorite flags arrive as strings
//! after a toggle, ids sometimes as numeric strings); the `de` helpers accept
//! both forms.

mod de;
pub mod restaurant;
pub mod review;

pub use restaurant::{LatLng, Restaurant};
pub use review::{Review, ReviewDraft, MAX_RATING, MIN_RATING};
