// sync module - decides which uploaded leads are new for each channel
//
//   filter.rs    -> required columns + row validity (PAN present, known channel)
//   datetime.rs  -> the one timestamp format shared by uploads and worksheets
//   watermark.rs -> latest createdAt already present in a worksheet
//   mapping.rs   -> input row -> 7-field ledger record
//   processor.rs -> per-channel pipeline and the upload summary

pub mod datetime;
pub mod filter;
pub mod mapping;
pub mod processor;
pub mod watermark;

pub use filter::apply_filters;
pub use processor::{summarize, sync_channel};
