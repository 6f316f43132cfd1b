use serde::{Serialize, Deserialize};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
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

// Navigation N-N : users -> user_movies -> movies
impl Related<super::movies::Entity> for Entity {
    fn to() -> RelationDef {
        super::user_movies::Relation::Movie.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::user_movies::Relation::User.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
