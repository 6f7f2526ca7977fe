//! Lead export upload endpoint.
//!
//! `POST /upload` takes a multipart form whose `file` field carries a `.csv`
//! or `.xlsx` export. The file is decoded into a lead table, checked for the
//! required columns, filtered, and then every channel is synced in turn
//! against its own worksheet. A failing channel does not stop the next one;
//! its error is reported in the response next to the other channel's count.
//!
//! Responses:
//! - `200 OK` with an `UploadResponse` when every channel succeeded, even if
//!   nothing was appended.
//! - `500 Internal Server Error` with an `UploadResponse` when at least one
//!   channel failed against the spreadsheet service.
//! - `400 Bad Request` / `413 Payload Too Large` with an `ErrorBody` when the
//!   upload is rejected before any channel runs.

mod decode;
mod process;

use actix_web::web::{post, resource};
use actix_web::Resource;

const API_PATH: &str = "/upload";

pub fn configure_routes() -> Resource {
    resource(API_PATH).route(post().to(process::process))
}
