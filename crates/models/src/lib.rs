//! Storage-facing types for the `suivi` table: the entity, the duration
//! rule, input validation, and connection helpers.

pub mod errors;
pub mod db;
pub mod duration;
pub mod draft;
pub mod range;
pub mod suivi;

pub use draft::{RawKm, SuiviDraft};
pub use range::DateRange;
pub use suivi::SuiviFields;
