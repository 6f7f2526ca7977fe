//! The upload form, compiled into the binary from `static/`.
//!
//! The form posts the chosen export to `/upload` and shows the returned
//! summary. It is served for `/` and for any path that is not an API route.

use actix_web::{HttpRequest, HttpResponse};
use include_dir::{include_dir, Dir, File};
use mime_guess::{from_path, mime};

static STATIC_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/static");

const UPLOAD_FORM: &str = "index.html";

pub async fn serve_embedded(req: HttpRequest) -> HttpResponse {
    let requested = match req.path().trim_start_matches('/') {
        "" => UPLOAD_FORM,
        path => path,
    };

    match asset_or_form(requested) {
        Some((path, file)) => HttpResponse::Ok()
            .content_type(content_type(path))
            .body(file.contents()),
        None => HttpResponse::NotFound().body("Not Found"),
    }
}

/// The embedded file at `path`, or the upload form when there is none.
fn asset_or_form(path: &str) -> Option<(&str, &'static File<'static>)> {
    STATIC_DIR
        .get_file(path)
        .map(|file| (path, file))
        .or_else(|| STATIC_DIR.get_file(UPLOAD_FORM).map(|file| (UPLOAD_FORM, file)))
}

fn content_type(path: &str) -> String {
    let guessed = from_path(path).first_or_octet_stream();
    if guessed.type_() == mime::TEXT {
        format!("{}; charset=utf-8", guessed)
    } else {
        guessed.to_string()
    }
}
