//! Comment entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "comments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub tweet_id: Uuid,
    pub user_id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub body: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::tweet::Entity",
        from = "Column::TweetId",
        to = "super::tweet::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Tweet,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::tweet::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tweet.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for chirp_core::domain::Comment {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            tweet_id: model.tweet_id,
            user_id: model.user_id,
            body: model.body,
            created_at: model.created_at.into(),
        }
    }
}

impl From<chirp_core::domain::Comment> for ActiveModel {
    fn from(comment: chirp_core::domain::Comment) -> Self {
        Self {
            id: Set(comment.id),
            tweet_id: Set(comment.tweet_id),
            user_id: Set(comment.user_id),
            body: Set(comment.body),
            created_at: Set(comment.created_at.into()),
        }
    }
}
