//! # Terms
//!
//! Shared glossary model used by both the server and the terminal client.
//!
//! ## Keys
//!
//! - Every entry is stored under its lower-cased name
//! - Lookups lower-case the requested name, so they are case-insensitive by construction
//! - The stored `name` keeps whatever casing the most recent write used
//! - Two names that differ only by case collapse into one entry
//!
//! ## Presentation
//!
//! - Clients fetch the full entry set once and keep it as a [`WorkingSet`]
//! - Search filters that set by name, never by description
//! - Descriptions longer than [`PREVIEW_LIMIT`] characters are shortened and linked to `/entry/<name>`

pub mod entry;
pub mod presentation;

pub use entry::{Dictionary, Entry, term_key};
pub use presentation::{PREVIEW_LIMIT, Preview, SearchOutcome, WorkingSet, detail_href, preview};
