//! 选课实体
//!
//! 每个 (student, course) 一行，成绩/进度/缴费三态同行存放，
//! 行级 NOT NULL 保证三态键集始终与选课集一致。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "student_courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub course: String,
    pub grade: String,
    pub progress: String,
    pub fee_paid: bool,
    pub enrolled_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id"
    )]
    Student,
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_enrollment(self) -> crate::models::students::entities::CourseEnrollment {
        use crate::models::students::entities::{CourseEnrollment, CourseProgress, GradeLabel};
        use chrono::{DateTime, Utc};

        CourseEnrollment {
            course: self.course,
            grade: self
                .grade
                .parse::<GradeLabel>()
                .unwrap_or(GradeLabel::NotAssessed),
            progress: self
                .progress
                .parse::<CourseProgress>()
                .unwrap_or(CourseProgress::P0),
            fee_paid: self.fee_paid,
            enrolled_at: DateTime::<Utc>::from_timestamp(self.enrolled_at, 0).unwrap_or_default(),
        }
    }
}
