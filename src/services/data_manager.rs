use sea_orm::*;
use async_trait::async_trait;

use crate::error::AppError;
use crate::models::dto::{AddMovieOutcome, DeleteMovieOutcome};
use crate::models::{movies, user_movies, users};
use crate::services::omdb::OmdbClient;

/// Champs fournis par l'appelant lors d'un ajout de film.
/// Ils priment toujours sur les métadonnées récupérées via OMDb.
#[derive(Debug, Clone, Default)]
pub struct MovieOverrides {
    pub release_year: Option<i32>,
    pub director: Option<String>,
    pub rating: Option<f64>,
    pub poster: Option<String>,
}

//trait = Interface (une seule implémentation concrète, pas de hiérarchie)
#[async_trait]
pub trait DataManager: Send + Sync {
    async fn get_all_users(&self) -> Result<Vec<users::Model>, AppError>;
    async fn get_user(&self, user_id: i32) -> Result<users::Model, AppError>;
    async fn get_all_movies(&self) -> Result<Vec<movies::Model>, AppError>;
    async fn get_movie(&self, movie_id: i32) -> Result<movies::Model, AppError>;

    /// Films de la liste d'un utilisateur. Une liste vide n'est pas une
    /// erreur, seul un utilisateur inconnu l'est.
    async fn get_user_movies(&self, user_id: i32) -> Result<Vec<movies::Model>, AppError>;

    async fn add_user(&self, name: &str) -> Result<users::Model, AppError>;
    async fn update_user(&self, user_id: i32, name: &str) -> Result<users::Model, AppError>;

    /// Supprime l'utilisateur, toutes ses associations et les films devenus
    /// orphelins, en une transaction. Retourne le nom supprimé.
    async fn delete_user(&self, user_id: i32) -> Result<String, AppError>;

    async fn add_movie(
        &self,
        user_id: i32,
        title: &str,
        overrides: MovieOverrides,
    ) -> Result<AddMovieOutcome, AppError>;

    /// Met à jour la note (globale au film, pas par utilisateur)
    async fn update_movie(
        &self,
        movie_id: i32,
        rating: Option<f64>,
    ) -> Result<movies::Model, AppError>;

    /// Retire le film de la liste de l'utilisateur ; supprime la ligne film
    /// quand la dernière association vient d'être retirée.
    async fn delete_movie(
        &self,
        user_id: i32,
        movie_id: i32,
    ) -> Result<DeleteMovieOutcome, AppError>;
}

/// Implémentation SeaORM/SQLite du gestionnaire de données.
/// La connexion est passée explicitement au constructeur : pas de session
/// globale, chaque opération multi-étapes ouvre sa propre transaction.
pub struct SqliteDataManager {
    db: DatabaseConnection,
    lookup: Option<OmdbClient>,
}

impl SqliteDataManager {
    pub fn new(db: DatabaseConnection, lookup: Option<OmdbClient>) -> Self {
        Self { db, lookup }
    }

    fn validate_name(name: &str) -> Result<String, AppError> {
        let name = name.trim();
        let length = name.chars().count();
        if length < 2 || length > 50 {
            return Err(AppError::InvalidInput(
                "name must be 2-50 characters".to_string(),
            ));
        }
        Ok(name.to_string())
    }

    fn validate_rating(rating: f64) -> Result<(), AppError> {
        if !(0.0..=10.0).contains(&rating) {
            return Err(AppError::InvalidInput(
                "rating must be between 0 and 10".to_string(),
            ));
        }
        Ok(())
    }

    /// Cherche un film existant par (titre, année), égalité stricte sur le
    /// titre trimé (choix documenté : pas de normalisation de casse)
    async fn find_movie_by_title_year<C: ConnectionTrait>(
        conn: &C,
        title: &str,
        release_year: Option<i32>,
    ) -> Result<Option<movies::Model>, DbErr> {
        let mut query = movies::Entity::find().filter(movies::Column::Title.eq(title));
        query = match release_year {
            Some(year) => query.filter(movies::Column::ReleaseYear.eq(year)),
            None => query.filter(movies::Column::ReleaseYear.is_null()),
        };
        query.one(conn).await
    }

    /// Supprime la ligne film si plus aucune association ne la référence.
    /// Le comptage se fait dans la même transaction que la suppression de
    /// l'association : deux suppressions concurrentes de la "dernière"
    /// association ne peuvent pas se rater mutuellement.
    async fn remove_movie_if_orphaned<C: ConnectionTrait>(
        conn: &C,
        movie_id: i32,
    ) -> Result<bool, DbErr> {
        let remaining = user_movies::Entity::find()
            .filter(user_movies::Column::MovieId.eq(movie_id))
            .count(conn)
            .await?;

        if remaining > 0 {
            return Ok(false);
        }

        movies::Entity::delete_by_id(movie_id).exec(conn).await?;
        Ok(true)
    }
}

#[async_trait]
impl DataManager for SqliteDataManager {
    async fn get_all_users(&self) -> Result<Vec<users::Model>, AppError> {
        let all_users = users::Entity::find()
            .order_by_asc(users::Column::Id)
            .all(&self.db)
            .await?;
        Ok(all_users)
    }

    async fn get_user(&self, user_id: i32) -> Result<users::Model, AppError> {
        users::Entity::find_by_id(user_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user {}", user_id)))
    }

    async fn get_all_movies(&self) -> Result<Vec<movies::Model>, AppError> {
        let all_movies = movies::Entity::find()
            .order_by_asc(movies::Column::Id)
            .all(&self.db)
            .await?;
        Ok(all_movies)
    }

    async fn get_movie(&self, movie_id: i32) -> Result<movies::Model, AppError> {
        movies::Entity::find_by_id(movie_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("movie {}", movie_id)))
    }

    async fn get_user_movies(&self, user_id: i32) -> Result<Vec<movies::Model>, AppError> {
        let user = self.get_user(user_id).await?;

        let user_movies = user
            .find_related(movies::Entity)
            .order_by_asc(movies::Column::Id)
            .all(&self.db)
            .await?;

        Ok(user_movies)
    }

    async fn add_user(&self, name: &str) -> Result<users::Model, AppError> {
        let name = Self::validate_name(name)?;

        // Les doublons de nom sont refusés (choix de politique, voir DESIGN.md)
        let existing = users::Entity::find()
            .filter(users::Column::Name.eq(&name))
            .one(&self.db)
            .await?;
        if existing.is_some() {
            return Err(AppError::Conflict(format!(
                "user '{}' already exists",
                name
            )));
        }

        let new_user = users::ActiveModel {
            name: Set(name),
            ..Default::default()
        };

        Ok(new_user.insert(&self.db).await?)
    }

    async fn update_user(&self, user_id: i32, name: &str) -> Result<users::Model, AppError> {
        let name = Self::validate_name(name)?;
        let user = self.get_user(user_id).await?;

        let mut active: users::ActiveModel = user.into();
        active.name = Set(name);

        Ok(active.update(&self.db).await?)
    }

    async fn delete_user(&self, user_id: i32) -> Result<String, AppError> {
        let txn = self.db.begin().await?;

        let user = users::Entity::find_by_id(user_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user {}", user_id)))?;
        let name = user.name.clone();

        // 1. Relever les films de l'utilisateur avant de couper les liens
        let movie_ids: Vec<i32> = user_movies::Entity::find()
            .filter(user_movies::Column::UserId.eq(user_id))
            .all(&txn)
            .await?
            .into_iter()
            .map(|assoc| assoc.movie_id)
            .collect();

        // 2. Supprimer toutes ses associations
        user_movies::Entity::delete_many()
            .filter(user_movies::Column::UserId.eq(user_id))
            .exec(&txn)
            .await?;

        // 3. Supprimer les films devenus orphelins
        for movie_id in movie_ids {
            Self::remove_movie_if_orphaned(&txn, movie_id).await?;
        }

        // 4. Supprimer l'utilisateur
        user.delete(&txn).await?;

        txn.commit().await?;
        Ok(name)
    }

    async fn add_movie(
        &self,
        user_id: i32,
        title: &str,
        overrides: MovieOverrides,
    ) -> Result<AddMovieOutcome, AppError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(AppError::InvalidInput("title must not be empty".to_string()));
        }
        if let Some(rating) = overrides.rating {
            Self::validate_rating(rating)?;
        }

        self.get_user(user_id).await?;

        // Enrichissement OMDb hors transaction : un appel réseau qui échoue
        // dégrade en "pas de métadonnées", jamais en erreur
        let fetched = match &self.lookup {
            Some(client) => client.fetch(title, overrides.release_year).await,
            None => None,
        };

        let low_confidence = fetched.as_ref().is_some_and(|f| !f.exact_match);

        // Les champs fournis par l'appelant priment sur OMDb ; le titre
        // canonique d'OMDb remplace la saisie quand une fiche a été trouvée
        let effective_title = fetched
            .as_ref()
            .map(|f| f.title.trim().to_string())
            .unwrap_or_else(|| title.to_string());
        let release_year = overrides
            .release_year
            .or_else(|| fetched.as_ref().and_then(|f| f.release_year));
        let director = overrides
            .director
            .clone()
            .or_else(|| fetched.as_ref().and_then(|f| f.director.clone()));
        let rating = overrides
            .rating
            .or_else(|| fetched.as_ref().and_then(|f| f.rating));
        let poster = overrides
            .poster
            .clone()
            .or_else(|| fetched.as_ref().and_then(|f| f.poster.clone()));

        let txn = self.db.begin().await?;

        // 1. Réutiliser la ligne film si (titre, année) existe déjà
        if let Some(movie) =
            Self::find_movie_by_title_year(&txn, &effective_title, release_year).await?
        {
            // 2a. Déjà dans la liste de cet utilisateur ?
            let already = user_movies::Entity::find_by_id((user_id, movie.id))
                .one(&txn)
                .await?;
            if already.is_some() {
                txn.commit().await?;
                return Ok(AddMovieOutcome::AlreadyLinked { movie });
            }

            // 2b. Film partagé : on ne crée que l'association
            let association = user_movies::ActiveModel {
                user_id: Set(user_id),
                movie_id: Set(movie.id),
            };
            association.insert(&txn).await?;

            txn.commit().await?;
            return Ok(AddMovieOutcome::Linked {
                movie,
                low_confidence,
            });
        }

        // 3. Nouveau film + association, dans la même transaction : la ligne
        // film n'est jamais visible sans au moins une association
        let new_movie = movies::ActiveModel {
            title: Set(effective_title),
            release_year: Set(release_year),
            director: Set(director),
            rating: Set(rating),
            poster: Set(poster),
            ..Default::default()
        };
        let movie = new_movie.insert(&txn).await?;

        let association = user_movies::ActiveModel {
            user_id: Set(user_id),
            movie_id: Set(movie.id),
        };
        association.insert(&txn).await?;

        txn.commit().await?;
        Ok(AddMovieOutcome::Created {
            movie,
            low_confidence,
        })
    }

    async fn update_movie(
        &self,
        movie_id: i32,
        rating: Option<f64>,
    ) -> Result<movies::Model, AppError> {
        let movie = self.get_movie(movie_id).await?;

        let Some(rating) = rating else {
            // Rien à modifier
            return Ok(movie);
        };
        Self::validate_rating(rating)?;

        let mut active: movies::ActiveModel = movie.into();
        active.rating = Set(Some(rating));

        Ok(active.update(&self.db).await?)
    }

    async fn delete_movie(
        &self,
        user_id: i32,
        movie_id: i32,
    ) -> Result<DeleteMovieOutcome, AppError> {
        let txn = self.db.begin().await?;

        // L'association absente n'est pas une erreur : résultat "not found"
        let Some(association) = user_movies::Entity::find_by_id((user_id, movie_id))
            .one(&txn)
            .await?
        else {
            txn.rollback().await?;
            return Ok(DeleteMovieOutcome::NotFound);
        };

        // Snapshot du film avant suppression éventuelle, pour la confirmation
        let movie = movies::Entity::find_by_id(movie_id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("movie {}", movie_id)))?;

        association.delete(&txn).await?;
        let movie_removed = Self::remove_movie_if_orphaned(&txn, movie_id).await?;

        txn.commit().await?;
        Ok(DeleteMovieOutcome::Deleted {
            movie,
            movie_removed,
        })
    }
}
