pub mod contact;

use actix_web::web;

/// Configure API v1 routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/contact")
            .route("/token", web::get().to(contact::token))
            .route("", web::post().to(contact::submit_message)),
    );
}
