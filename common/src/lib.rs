//! Shared model types for the lead sync service.
//!
//! Nothing in this crate performs I/O. The backend decodes uploads into
//! [`model::lead::LeadTable`]s, maps survivors into [`model::ledger::LedgerRecord`]s
//! and answers with the payloads in [`responses`].

pub mod model;
pub mod responses;
