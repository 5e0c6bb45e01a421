//! 测验实体
//!
//! 题目序列以 JSON 文本存放在 questions 列。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "quizzes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub quiz_id: String,
    pub title: String,
    pub course: String,
    pub duration_minutes: i32,
    pub questions: String,
    pub is_active: bool,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_quiz(self) -> crate::models::quizzes::entities::Quiz {
        use crate::models::quizzes::entities::{Quiz, QuizQuestion};
        use chrono::{DateTime, Utc};

        Quiz {
            id: self.id,
            quiz_id: self.quiz_id,
            title: self.title,
            course: self.course,
            duration_minutes: self.duration_minutes,
            questions: serde_json::from_str::<Vec<QuizQuestion>>(&self.questions)
                .unwrap_or_default(),
            is_active: self.is_active,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
