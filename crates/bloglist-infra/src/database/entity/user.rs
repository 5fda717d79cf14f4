//! User entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use bloglist_core::error::RepoError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub username: String,
    pub name: Option<String>,
    pub password_hash: String,
    /// `uuid[]` of owned blog ids, in creation order.
    pub blogs: Vec<Uuid>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain User.
impl TryFrom<Model> for bloglist_core::domain::User {
    type Error = RepoError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            username: model.username,
            name: model.name,
            password_hash: model.password_hash,
            blogs: model.blogs,
        })
    }
}

/// Conversion from Domain User to SeaORM ActiveModel.
impl From<bloglist_core::domain::User> for ActiveModel {
    fn from(user: bloglist_core::domain::User) -> Self {
        Self {
            id: Set(user.id),
            username: Set(user.username),
            name: Set(user.name),
            password_hash: Set(user.password_hash),
            blogs: Set(user.blogs),
        }
    }
}
