//! Blog entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use bloglist_core::error::RepoError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "blogs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub author: Option<String>,
    pub url: String,
    pub likes: i64,
    #[sea_orm(column_type = "Text")]
    pub summary: Option<String>,
    pub creator: Uuid,
}

// No foreign key to users: the creator's `blogs` list is maintained by the
// blog service, not by cascades.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Blog. Rejects `likes` outside `u32`.
impl TryFrom<Model> for bloglist_core::domain::Blog {
    type Error = RepoError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let likes = u32::try_from(model.likes).map_err(|_| {
            RepoError::Query(format!("blog {} has out-of-range likes {}", model.id, model.likes))
        })?;

        Ok(Self {
            id: model.id,
            title: model.title,
            author: model.author,
            url: model.url,
            likes,
            summary: model.summary,
            creator: model.creator,
        })
    }
}

/// Conversion from Domain Blog to SeaORM ActiveModel.
impl From<bloglist_core::domain::Blog> for ActiveModel {
    fn from(blog: bloglist_core::domain::Blog) -> Self {
        Self {
            id: Set(blog.id),
            title: Set(blog.title),
            author: Set(blog.author),
            url: Set(blog.url),
            likes: Set(i64::from(blog.likes)),
            summary: Set(blog.summary),
            creator: Set(blog.creator),
        }
    }
}
