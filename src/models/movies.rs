use serde::{Serialize, Deserialize};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "movies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub release_year: Option<i32>,
    pub director: Option<String>,
    pub rating: Option<f64>, // 0.0 à 10.0
    pub poster: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_movies::Entity")]
    UserMovies,
}

impl Related<super::user_movies::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserMovies.def()
    }
}

// Navigation N-N : movies -> user_movies -> users
impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        super::user_movies::Relation::User.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::user_movies::Relation::Movie.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
