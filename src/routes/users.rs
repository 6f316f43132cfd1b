use actix_web::{delete, get, post, put, web, HttpResponse};
use validator::Validate;

use crate::error::AppError;
use crate::models::dto::{
    AddMovieRequest, AddMovieOutcome, AddUserRequest, DeleteMovieOutcome, UpdateMovieRequest,
    UpdateUserRequest,
};
use crate::services::data_manager::{DataManager, MovieOverrides, SqliteDataManager};

/// GET /api/users - Lister tous les utilisateurs
#[get("")]
pub async fn list_users(
    manager: web::Data<SqliteDataManager>,
) -> Result<HttpResponse, AppError> {
    let users = manager.get_all_users().await?;
    Ok(HttpResponse::Ok().json(users))
}

/// POST /api/users - Créer un utilisateur
#[post("")]
pub async fn add_user(
    manager: web::Data<SqliteDataManager>,
    body: web::Json<AddUserRequest>,
) -> Result<HttpResponse, AppError> {
    if let Err(errors) = body.validate() {
        return Ok(HttpResponse::BadRequest().json(errors));
    }

    let user = manager.add_user(&body.name).await?;
    Ok(HttpResponse::Created().json(user))
}

/// GET /api/users/{user_id} - Détail d'un utilisateur
#[get("/{user_id}")]
pub async fn get_user(
    manager: web::Data<SqliteDataManager>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let user = manager.get_user(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(user))
}

/// PUT /api/users/{user_id} - Renommer un utilisateur
#[put("/{user_id}")]
pub async fn update_user(
    manager: web::Data<SqliteDataManager>,
    path: web::Path<i32>,
    body: web::Json<UpdateUserRequest>,
) -> Result<HttpResponse, AppError> {
    if let Err(errors) = body.validate() {
        return Ok(HttpResponse::BadRequest().json(errors));
    }

    let user = manager.update_user(path.into_inner(), &body.name).await?;
    Ok(HttpResponse::Ok().json(user))
}

/// DELETE /api/users/{user_id} - Supprimer un utilisateur et ses associations
#[delete("/{user_id}")]
pub async fn delete_user(
    manager: web::Data<SqliteDataManager>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let name = manager.delete_user(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": format!("User '{}' and all associated data were deleted", name)
    })))
}

/// GET /api/users/{user_id}/movies - Films de la liste d'un utilisateur
#[get("/{user_id}/movies")]
pub async fn get_user_movies(
    manager: web::Data<SqliteDataManager>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    // Liste vide -> 200 avec [] (un utilisateur sans films n'est pas une erreur)
    let movies = manager.get_user_movies(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(movies))
}

/// POST /api/users/{user_id}/movies - Ajouter un film à la liste d'un
/// utilisateur, avec enrichissement OMDb quand une clé API est configurée
#[post("/{user_id}/movies")]
pub async fn add_movie(
    manager: web::Data<SqliteDataManager>,
    path: web::Path<i32>,
    body: web::Json<AddMovieRequest>,
) -> Result<HttpResponse, AppError> {
    if let Err(errors) = body.validate() {
        return Ok(HttpResponse::BadRequest().json(errors));
    }

    let request = body.into_inner();
    let overrides = MovieOverrides {
        release_year: request.release_year,
        director: request.director,
        rating: request.rating,
        poster: request.poster,
    };

    let outcome = manager
        .add_movie(path.into_inner(), &request.title, overrides)
        .await?;

    let response = match &outcome {
        AddMovieOutcome::Created { .. } | AddMovieOutcome::Linked { .. } => {
            HttpResponse::Created().json(&outcome)
        }
        AddMovieOutcome::AlreadyLinked { .. } => HttpResponse::Ok().json(&outcome),
    };
    Ok(response)
}

/// PUT /api/users/{user_id}/movies/{movie_id} - Mettre à jour la note
/// (la note est globale au film, pas propre à l'utilisateur)
#[put("/{user_id}/movies/{movie_id}")]
pub async fn update_movie(
    manager: web::Data<SqliteDataManager>,
    path: web::Path<(i32, i32)>,
    body: web::Json<UpdateMovieRequest>,
) -> Result<HttpResponse, AppError> {
    if let Err(errors) = body.validate() {
        return Ok(HttpResponse::BadRequest().json(errors));
    }

    let (_user_id, movie_id) = path.into_inner();
    let movie = manager.update_movie(movie_id, body.rating).await?;
    Ok(HttpResponse::Ok().json(movie))
}

/// DELETE /api/users/{user_id}/movies/{movie_id} - Retirer un film de la
/// liste d'un utilisateur (supprime la ligne film si c'était la dernière
/// référence)
#[delete("/{user_id}/movies/{movie_id}")]
pub async fn delete_movie(
    manager: web::Data<SqliteDataManager>,
    path: web::Path<(i32, i32)>,
) -> Result<HttpResponse, AppError> {
    let (user_id, movie_id) = path.into_inner();
    let outcome = manager.delete_movie(user_id, movie_id).await?;

    let response = match &outcome {
        DeleteMovieOutcome::Deleted { .. } => HttpResponse::Ok().json(&outcome),
        DeleteMovieOutcome::NotFound => HttpResponse::NotFound().json(&outcome),
    };
    Ok(response)
}

pub fn users_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .service(list_users)
            .service(add_user)
            .service(get_user)
            .service(update_user)
            .service(delete_user)
            .service(get_user_movies)
            .service(add_movie)
            .service(update_movie)
            .service(delete_movie)
    );
}
