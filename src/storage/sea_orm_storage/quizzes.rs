//! 测验与成绩存储操作
//!
//! 题目与作答映射以 JSON 文本入库，下架走软删除，成绩只追加。

use std::collections::{BTreeMap, HashMap};

use super::SeaOrmStorage;
use crate::entity::quiz_results::{
    ActiveModel as ResultActiveModel, Column as ResultColumn, Entity as QuizResults,
};
use crate::entity::quizzes::{ActiveModel, Column, Entity as Quizzes};
use crate::errors::{Result, SRSystemError};
use crate::models::{
    PaginationInfo,
    common::PaginationQuery,
    quizzes::{
        entities::{OptionLabel, Quiz, QuizGradeOutcome, QuizResult},
        requests::{CreateQuizRequest, QuizListQuery},
        responses::{QuizListResponse, StudentResultItem, StudentResultsResponse},
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    sea_query::Expr,
};

impl SeaOrmStorage {
    /// 创建测验，quiz_id 唯一索引拦截重复
    pub async fn create_quiz_impl(&self, req: CreateQuizRequest) -> Result<Quiz> {
        let questions = serde_json::to_string(&req.questions)
            .map_err(|e| SRSystemError::serialization(format!("序列化题目失败: {e}")))?;

        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            quiz_id: Set(req.quiz_id),
            title: Set(req.title),
            course: Set(req.course),
            duration_minutes: Set(req.duration_minutes),
            questions: Set(questions),
            is_active: Set(true),
            created_at: Set(now),
            ..Default::default()
        };

        let quiz = model
            .insert(&self.db)
            .await
            .map_err(|e| SRSystemError::database_operation(format!("创建测验失败: {e}")))?;

        Ok(quiz.into_quiz())
    }

    /// 通过测验编号获取测验
    pub async fn get_quiz_by_quiz_id_impl(&self, quiz_id: &str) -> Result<Option<Quiz>> {
        let result = Quizzes::find()
            .filter(Column::QuizId.eq(quiz_id))
            .one(&self.db)
            .await
            .map_err(|e| SRSystemError::database_operation(format!("查询测验失败: {e}")))?;

        Ok(result.map(|m| m.into_quiz()))
    }

    /// 分页列出测验，默认只含在用的
    pub async fn list_quizzes_with_pagination_impl(
        &self,
        query: QuizListQuery,
    ) -> Result<QuizListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Quizzes::find();

        if let Some(ref course) = query.course
            && !course.trim().is_empty()
        {
            select = select.filter(Column::Course.eq(course.trim()));
        }

        if !query.include_inactive.unwrap_or(false) {
            select = select.filter(Column::IsActive.eq(true));
        }

        select = select.order_by_desc(Column::CreatedAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SRSystemError::database_operation(format!("查询测验总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SRSystemError::database_operation(format!("查询测验页数失败: {e}")))?;

        let rows = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SRSystemError::database_operation(format!("查询测验列表失败: {e}")))?;

        Ok(QuizListResponse {
            items: rows.into_iter().map(|m| m.into_quiz()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 下架测验（软删除），历史成绩保留
    pub async fn deactivate_quiz_impl(&self, quiz_id: &str) -> Result<bool> {
        let result = Quizzes::update_many()
            .col_expr(Column::IsActive, Expr::value(false))
            .filter(Column::QuizId.eq(quiz_id))
            .exec(&self.db)
            .await
            .map_err(|e| SRSystemError::database_operation(format!("下架测验失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 按课程集合列出可作答的在用测验
    pub async fn list_eligible_quizzes_impl(&self, courses: &[String]) -> Result<Vec<Quiz>> {
        if courses.is_empty() {
            return Ok(Vec::new());
        }

        let rows = Quizzes::find()
            .filter(Column::Course.is_in(courses.iter().map(String::as_str)))
            .filter(Column::IsActive.eq(true))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| SRSystemError::database_operation(format!("查询可作答测验失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_quiz()).collect())
    }

    /// 追加一条作答成绩
    pub async fn insert_quiz_result_impl(
        &self,
        quiz_id: &str,
        student_id: &str,
        outcome: QuizGradeOutcome,
        answers: &BTreeMap<usize, OptionLabel>,
    ) -> Result<QuizResult> {
        let answers_json = serde_json::to_string(answers)
            .map_err(|e| SRSystemError::serialization(format!("序列化作答失败: {e}")))?;

        let now = chrono::Utc::now().timestamp();

        let model = ResultActiveModel {
            quiz_id: Set(quiz_id.to_string()),
            student_id: Set(student_id.to_string()),
            score: Set(outcome.score),
            total_questions: Set(outcome.total_questions),
            percentage: Set(outcome.percentage),
            answers: Set(answers_json),
            completed_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SRSystemError::database_operation(format!("写入成绩失败: {e}")))?;

        Ok(result.into_quiz_result())
    }

    /// 分页列出学生成绩单，批量带出测验标题与课程
    pub async fn list_results_for_student_impl(
        &self,
        student_id: &str,
        pagination: PaginationQuery,
    ) -> Result<StudentResultsResponse> {
        let page = pagination.page.max(1) as u64;
        let size = pagination.size.clamp(1, 100) as u64;

        let paginator = QuizResults::find()
            .filter(ResultColumn::StudentId.eq(student_id))
            .order_by_desc(ResultColumn::CompletedAt)
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| SRSystemError::database_operation(format!("查询成绩总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SRSystemError::database_operation(format!("查询成绩页数失败: {e}")))?;

        let rows = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SRSystemError::database_operation(format!("查询成绩列表失败: {e}")))?;

        // 批量取出涉及的测验，避免逐条回查
        let quiz_ids: Vec<String> = rows.iter().map(|r| r.quiz_id.clone()).collect();
        let quiz_rows = Quizzes::find()
            .filter(Column::QuizId.is_in(quiz_ids))
            .all(&self.db)
            .await
            .map_err(|e| SRSystemError::database_operation(format!("查询测验失败: {e}")))?;

        let quiz_map: HashMap<String, (String, String)> = quiz_rows
            .into_iter()
            .map(|q| (q.quiz_id, (q.title, q.course)))
            .collect();

        let items = rows
            .into_iter()
            .map(|row| {
                let (quiz_title, course) = quiz_map
                    .get(&row.quiz_id)
                    .cloned()
                    .unwrap_or_default();
                let result = row.into_quiz_result();
                StudentResultItem {
                    id: result.id,
                    quiz_id: result.quiz_id,
                    quiz_title,
                    course,
                    score: result.score,
                    total_questions: result.total_questions,
                    percentage: result.percentage,
                    completed_at: result.completed_at,
                }
            })
            .collect();

        Ok(StudentResultsResponse {
            items,
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::quizzes::entities::QuizQuestion;

    fn create_request(quiz_id: &str, course: &str) -> CreateQuizRequest {
        CreateQuizRequest {
            quiz_id: quiz_id.to_string(),
            title: format!("{course} quiz"),
            course: course.to_string(),
            duration_minutes: 30,
            questions: vec![
                QuizQuestion {
                    prompt: "Pick A".to_string(),
                    options: vec!["a".to_string(), "b".to_string()],
                    correct_option: OptionLabel::A,
                },
                QuizQuestion {
                    prompt: "Pick B".to_string(),
                    options: vec!["a".to_string(), "b".to_string(), "c".to_string()],
                    correct_option: OptionLabel::B,
                },
            ],
        }
    }

    #[tokio::test]
    async fn quiz_round_trip_preserves_questions() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let created = storage
            .create_quiz_impl(create_request("QZ-001", "Data Science"))
            .await
            .unwrap();
        assert!(created.is_active);

        let quiz = storage
            .get_quiz_by_quiz_id_impl("QZ-001")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(quiz.questions.len(), 2);
        assert_eq!(quiz.questions[0].correct_option, OptionLabel::A);
        assert_eq!(quiz.questions[1].options.len(), 3);
    }

    #[tokio::test]
    async fn duplicate_quiz_id_is_rejected() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        storage
            .create_quiz_impl(create_request("QZ-001", "Data Science"))
            .await
            .unwrap();

        let err = storage
            .create_quiz_impl(create_request("QZ-001", "Web Development"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("UNIQUE constraint failed"));
    }

    #[tokio::test]
    async fn list_hides_inactive_by_default() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        storage
            .create_quiz_impl(create_request("QZ-001", "Data Science"))
            .await
            .unwrap();
        storage
            .create_quiz_impl(create_request("QZ-002", "Data Science"))
            .await
            .unwrap();
        assert!(storage.deactivate_quiz_impl("QZ-002").await.unwrap());

        let default_list = storage
            .list_quizzes_with_pagination_impl(QuizListQuery {
                page: None,
                size: None,
                course: None,
                include_inactive: None,
            })
            .await
            .unwrap();
        assert_eq!(default_list.pagination.total, 1);
        assert_eq!(default_list.items[0].quiz_id, "QZ-001");

        let full_list = storage
            .list_quizzes_with_pagination_impl(QuizListQuery {
                page: None,
                size: None,
                course: None,
                include_inactive: Some(true),
            })
            .await
            .unwrap();
        assert_eq!(full_list.pagination.total, 2);
    }

    #[tokio::test]
    async fn deactivate_keeps_results() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        storage
            .create_quiz_impl(create_request("QZ-001", "Data Science"))
            .await
            .unwrap();

        let answers = BTreeMap::from([(0, OptionLabel::A), (1, OptionLabel::B)]);
        storage
            .insert_quiz_result_impl(
                "QZ-001",
                "CL100001",
                QuizGradeOutcome {
                    score: 2,
                    total_questions: 2,
                    percentage: 100.0,
                },
                &answers,
            )
            .await
            .unwrap();

        assert!(storage.deactivate_quiz_impl("QZ-001").await.unwrap());

        let results = storage
            .list_results_for_student_impl("CL100001", PaginationQuery::default())
            .await
            .unwrap();
        assert_eq!(results.pagination.total, 1);
        assert_eq!(results.items[0].quiz_id, "QZ-001");
        // 下架后成绩单仍能带出标题
        assert_eq!(results.items[0].quiz_title, "Data Science quiz");
    }

    #[tokio::test]
    async fn deactivate_missing_quiz_returns_false() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        assert!(!storage.deactivate_quiz_impl("QZ-404").await.unwrap());
    }

    #[tokio::test]
    async fn eligible_quizzes_follow_course_union() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        storage
            .create_quiz_impl(create_request("QZ-001", "Data Science"))
            .await
            .unwrap();
        storage
            .create_quiz_impl(create_request("QZ-002", "Web Development"))
            .await
            .unwrap();
        storage
            .create_quiz_impl(create_request("QZ-003", "English Language"))
            .await
            .unwrap();
        storage.deactivate_quiz_impl("QZ-003").await.unwrap();

        let courses = vec![
            "Data Science".to_string(),
            "English Language".to_string(),
        ];
        let eligible = storage.list_eligible_quizzes_impl(&courses).await.unwrap();
        // 在用且属于所选课程的才可作答
        assert_eq!(eligible.len(), 1);
        assert_eq!(eligible[0].quiz_id, "QZ-001");

        let none = storage.list_eligible_quizzes_impl(&[]).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn results_are_append_only() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        storage
            .create_quiz_impl(create_request("QZ-001", "Data Science"))
            .await
            .unwrap();

        let first = BTreeMap::from([(0, OptionLabel::A)]);
        let second = BTreeMap::from([(0, OptionLabel::A), (1, OptionLabel::B)]);
        storage
            .insert_quiz_result_impl(
                "QZ-001",
                "CL100001",
                QuizGradeOutcome {
                    score: 1,
                    total_questions: 2,
                    percentage: 50.0,
                },
                &first,
            )
            .await
            .unwrap();
        storage
            .insert_quiz_result_impl(
                "QZ-001",
                "CL100001",
                QuizGradeOutcome {
                    score: 2,
                    total_questions: 2,
                    percentage: 100.0,
                },
                &second,
            )
            .await
            .unwrap();

        // 两次作答各存一行，互不覆盖
        let results = storage
            .list_results_for_student_impl("CL100001", PaginationQuery::default())
            .await
            .unwrap();
        assert_eq!(results.pagination.total, 2);
    }
}
