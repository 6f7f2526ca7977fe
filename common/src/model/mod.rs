pub mod channel;
pub mod lead;
pub mod ledger;
