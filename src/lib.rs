//! Epochal: type a description of a historical period, see the date range.
//!
//! [`Session`] owns the typed text and the saved history and changes only in
//! response to [`SessionEvent`]s. The live result is re-derived from the text
//! on every read through an [`Interpreter`].

pub mod application;
pub mod entities;
pub mod infrastructure;

pub use application::*;
pub use entities::*;
pub use infrastructure::*;
