pub mod health;
pub mod users;
pub mod movies;

use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(health::health_check)
            .configure(users::users_routes)
            .configure(movies::movies_routes)
    );
}
