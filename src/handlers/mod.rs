pub mod api_v1;
pub mod contact_handlers;

use actix_web::{HttpResponse, web};

/// Route table shared by the server binary and the test harness.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/",
        web::get().to(|| async {
            HttpResponse::SeeOther()
                .insert_header(("Location", "/contact"))
                .finish()
        }),
    )
    .route("/contact", web::get().to(contact_handlers::contact_page))
    .route("/contact", web::post().to(contact_handlers::contact_submit))
    .service(web::scope("/api/v1").configure(api_v1::configure))
    // Default 404 handler (must be registered last)
    .default_service(web::to(|| async {
        let html = include_str!("../../templates/errors/404.html");
        HttpResponse::NotFound()
            .content_type("text/html; charset=utf-8")
            .body(html)
    }));
}
