use std::collections::BTreeMap;
use std::sync::Arc;

use crate::models::{
    common::PaginationQuery,
    materials::{
        entities::{CourseMaterial, MaterialInfo},
        requests::MaterialListQuery,
        responses::MaterialListResponse,
    },
    quizzes::{
        entities::{OptionLabel, Quiz, QuizGradeOutcome, QuizResult},
        requests::{CreateQuizRequest, QuizListQuery},
        responses::{QuizListResponse, StudentResultsResponse},
    },
    students::{
        entities::{Student, StudentStatus},
        requests::{
            RegisterStudentRequest, StudentListQuery, UpdateProgressRequest, UpdateStudentRequest,
        },
        responses::StudentListResponse,
    },
    verification::entities::VerificationEntry,
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 学生管理方法
    // 登记学生，按选课列表同事务生成初始三态行
    async fn create_student(
        &self,
        request: RegisterStudentRequest,
        student_id: String,
        email_verified: bool,
    ) -> Result<Student>;
    // 通过学号获取学生
    async fn get_student_by_student_id(&self, student_id: &str) -> Result<Option<Student>>;
    // 通过邮箱获取学生
    async fn get_student_by_email(&self, email: &str) -> Result<Option<Student>>;
    // 学号是否已被占用
    async fn student_id_exists(&self, student_id: &str) -> Result<bool>;
    // 列出学生
    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse>;
    // 按筛选条件列出学生用于导出（带上限）
    async fn list_students_for_export_filtered(
        &self,
        limit: u64,
        course: Option<String>,
        status: Option<StudentStatus>,
        fee_paid: Option<bool>,
        search: Option<&str>,
    ) -> Result<Vec<Student>>;
    // 更新学生资料，email 与 student_id 不可变更
    async fn update_student(
        &self,
        student_id: &str,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>>;
    // 加选课程，返回更新后的学生
    async fn add_course(&self, student_id: &str, course: &str) -> Result<Option<Student>>;
    // 更新某门课的进度，grade 给出时一并写入
    async fn update_course_progress(
        &self,
        student_id: &str,
        course: &str,
        update: UpdateProgressRequest,
    ) -> Result<Option<Student>>;
    // 更新某门课的缴费状态
    async fn update_course_fee(
        &self,
        student_id: &str,
        course: &str,
        paid: bool,
    ) -> Result<Option<Student>>;

    /// 邮箱验证方法
    // 签发/覆盖验证码，同一邮箱只保留最新一条
    async fn upsert_verification(&self, email: &str, code: &str) -> Result<VerificationEntry>;
    // 查询验证条目
    async fn get_verification_by_email(&self, email: &str) -> Result<Option<VerificationEntry>>;
    // 核销验证码并同步学生的邮箱验证标记（事务）
    async fn mark_email_verified(&self, email: &str) -> Result<bool>;

    /// 课程资料方法
    // 发布资料，字节直接入库
    async fn create_material(
        &self,
        course: &str,
        title: &str,
        description: Option<String>,
        file_name: &str,
        content_type: &str,
        content: Vec<u8>,
    ) -> Result<MaterialInfo>;
    // 列出资料（只含元数据）
    async fn list_materials_with_pagination(
        &self,
        query: MaterialListQuery,
    ) -> Result<MaterialListResponse>;
    // 获取单个资料（含字节）
    async fn get_material_by_id(&self, id: i64) -> Result<Option<CourseMaterial>>;
    // 删除资料
    async fn delete_material(&self, id: i64) -> Result<bool>;

    /// 测验方法
    // 发布测验
    async fn create_quiz(&self, quiz: CreateQuizRequest) -> Result<Quiz>;
    // 通过测验编号获取测验
    async fn get_quiz_by_quiz_id(&self, quiz_id: &str) -> Result<Option<Quiz>>;
    // 列出测验
    async fn list_quizzes_with_pagination(&self, query: QuizListQuery) -> Result<QuizListResponse>;
    // 下架测验（软删除）
    async fn deactivate_quiz(&self, quiz_id: &str) -> Result<bool>;
    // 列出学生可作答的测验（按选课求并集，仅含上架中的）
    async fn list_eligible_quizzes(&self, courses: &[String]) -> Result<Vec<Quiz>>;
    // 落一条作答记录，只追加不覆盖
    async fn insert_quiz_result(
        &self,
        quiz_id: &str,
        student_id: &str,
        outcome: QuizGradeOutcome,
        answers: &BTreeMap<usize, OptionLabel>,
    ) -> Result<QuizResult>;
    // 学生成绩单，读侧拼上测验标题与课程
    async fn list_results_for_student(
        &self,
        student_id: &str,
        query: PaginationQuery,
    ) -> Result<StudentResultsResponse>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
