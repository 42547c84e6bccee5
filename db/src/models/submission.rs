//! Submission entity: one student's document for a given assignment.
//!
//! Submissions are immutable once created; a re-submission is a new row and
//! therefore a new logical document to compare.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::Set, DatabaseConnection, QueryOrder};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "submissions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub assignment_id: i64,
    pub student_id: i64,

    /// Reference to the raw document content, relative to the storage root.
    pub file_path: String,

    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::assignment::Entity",
        from = "Column::AssignmentId",
        to = "super::assignment::Column::Id",
        on_delete = "Cascade"
    )]
    Assignment,
}

impl Related<super::assignment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn create(
        db: &DatabaseConnection,
        assignment_id: i64,
        student_id: i64,
        file_path: &str,
    ) -> Result<Model, DbErr> {
        let active = ActiveModel {
            assignment_id: Set(assignment_id),
            student_id: Set(student_id),
            file_path: Set(file_path.to_string()),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        active.insert(db).await
    }

    /// All submissions for an assignment, oldest first.
    pub async fn list_by_assignment(
        db: &DatabaseConnection,
        assignment_id: i64,
    ) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::AssignmentId.eq(assignment_id))
            .order_by_asc(Column::Id)
            .all(db)
            .await
    }

    pub async fn find_by_id(db: &DatabaseConnection, id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }
}
