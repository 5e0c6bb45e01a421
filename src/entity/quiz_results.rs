//! 测验成绩实体
//!
//! 只追加不修改，同一 (quiz, student) 允许多次作答各存一行。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "quiz_results")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub quiz_id: String,
    pub student_id: String,
    pub score: i32,
    pub total_questions: i32,
    pub percentage: f64,
    pub answers: String,
    pub completed_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_quiz_result(self) -> crate::models::quizzes::entities::QuizResult {
        use crate::models::quizzes::entities::{OptionLabel, QuizResult};
        use chrono::{DateTime, Utc};
        use std::collections::BTreeMap;

        QuizResult {
            id: self.id,
            quiz_id: self.quiz_id,
            student_id: self.student_id,
            score: self.score,
            total_questions: self.total_questions,
            percentage: self.percentage,
            answers: serde_json::from_str::<BTreeMap<usize, OptionLabel>>(&self.answers)
                .unwrap_or_default(),
            completed_at: DateTime::<Utc>::from_timestamp(self.completed_at, 0).unwrap_or_default(),
        }
    }
}
