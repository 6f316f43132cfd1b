// connexion BD

use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr, Schema};
use std::env;

use crate::models::{movies, user_movies, users};

pub async fn establish_connection() -> Result<DatabaseConnection, DbErr> {
    // Par défaut : fichier SQLite local, comme l'application d'origine
    let database_url = env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://movies.sqlite?mode=rwc".to_string());

    Database::connect(&database_url).await
}

/// Crée les tables à partir des entités si elles n'existent pas encore
/// (équivalent du `db.create_all()` exécuté au démarrage)
pub async fn init_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut users_table = schema.create_table_from_entity(users::Entity);
    let mut movies_table = schema.create_table_from_entity(movies::Entity);
    let mut join_table = schema.create_table_from_entity(user_movies::Entity);

    db.execute(backend.build(users_table.if_not_exists())).await?;
    db.execute(backend.build(movies_table.if_not_exists())).await?;
    db.execute(backend.build(join_table.if_not_exists())).await?;

    Ok(())
}
