mod embedded;
mod health;
mod upload;

use actix_web::web;

/// Registers every route. Unmatched paths serve the embedded upload page.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(upload::configure_routes())
        .service(health::configure_routes())
        .default_service(web::route().to(embedded::serve_embedded));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::memory::MemoryLedgers;
    use crate::state::AppState;
    use actix_web::{test, App};
    use std::sync::Arc;

    #[actix_web::test]
    async fn health_reports_ok() {
        let state = AppState {
            ledgers: Arc::new(MemoryLedgers::new()),
            max_upload_bytes: 1024,
        };
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure),
        )
        .await;
        let req = test::TestRequest::get().uri("/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "ok");
    }
}
