use actix_web::{get, web, HttpResponse};

use crate::error::AppError;
use crate::services::data_manager::{DataManager, SqliteDataManager};

/// GET /api/movies - Lister tous les films connus (toutes listes confondues)
#[get("")]
pub async fn list_movies(
    manager: web::Data<SqliteDataManager>,
) -> Result<HttpResponse, AppError> {
    let movies = manager.get_all_movies().await?;
    Ok(HttpResponse::Ok().json(movies))
}

/// GET /api/movies/{movie_id} - Détail d'un film
#[get("/{movie_id}")]
pub async fn get_movie(
    manager: web::Data<SqliteDataManager>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let movie = manager.get_movie(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(movie))
}

pub fn movies_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/movies")
            .service(list_movies)
            .service(get_movie)
    );
}
