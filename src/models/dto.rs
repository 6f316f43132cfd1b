//pour les requêtes et réponses structurées
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::movies;

// DTO pour créer un utilisateur
#[derive(Debug, Deserialize, Validate)]
pub struct AddUserRequest {
    #[validate(length(min = 2, max = 50, message = "name must be 2-50 characters"))]
    pub name: String,
}

// DTO pour renommer un utilisateur
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 2, max = 50, message = "name must be 2-50 characters"))]
    pub name: String,
}

// DTO pour ajouter un film à la liste d'un utilisateur.
// Les champs optionnels priment sur les métadonnées OMDb.
#[derive(Debug, Deserialize, Validate)]
pub struct AddMovieRequest {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    pub release_year: Option<i32>,
    pub director: Option<String>,
    #[validate(range(min = 0.0, max = 10.0, message = "rating must be between 0 and 10"))]
    pub rating: Option<f64>,
    pub poster: Option<String>,
}

// DTO pour mettre à jour la note d'un film
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateMovieRequest {
    #[validate(range(min = 0.0, max = 10.0, message = "rating must be between 0 and 10"))]
    pub rating: Option<f64>,
}

/// Résultat d'un ajout de film : un seul des trois cas, avec le film concerné.
/// `low_confidence` signale une correspondance OMDb au titre différent de la
/// demande (comparaison insensible à la casse).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AddMovieOutcome {
    Created {
        movie: movies::Model,
        low_confidence: bool,
    },
    Linked {
        movie: movies::Model,
        low_confidence: bool,
    },
    AlreadyLinked {
        movie: movies::Model,
    },
}

/// Résultat d'une suppression de film pour un utilisateur.
/// `movie_removed` indique que la dernière association vient d'être retirée
/// et que la ligne film a été supprimée avec elle.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DeleteMovieOutcome {
    Deleted {
        movie: movies::Model,
        movie_removed: bool,
    },
    NotFound,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_user_request_length_bounds() {
        let too_short = AddUserRequest { name: "A".to_string() };
        assert!(too_short.validate().is_err());

        let ok = AddUserRequest { name: "Ada".to_string() };
        assert!(ok.validate().is_ok());

        let too_long = AddUserRequest { name: "x".repeat(51) };
        assert!(too_long.validate().is_err());
    }

    #[test]
    fn test_rating_range() {
        let bad = UpdateMovieRequest { rating: Some(10.5) };
        assert!(bad.validate().is_err());

        let ok = UpdateMovieRequest { rating: Some(8.8) };
        assert!(ok.validate().is_ok());

        // Pas de note -> rien à valider
        let none = UpdateMovieRequest { rating: None };
        assert!(none.validate().is_ok());
    }
}
