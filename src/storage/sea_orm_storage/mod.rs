//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod materials;
mod quizzes;
mod students;
mod verification;

use crate::config::AppConfig;
use crate::errors::{Result, SRSystemError};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| SRSystemError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| SRSystemError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| SRSystemError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| SRSystemError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(SRSystemError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }

    /// 测试专用：内存 SQLite，单连接避免各连接各见一库
    #[cfg(test)]
    pub(crate) async fn new_in_memory() -> Result<Self> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| SRSystemError::database_config(format!("SQLite URL 解析失败: {e}")))?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(opt)
            .await
            .map_err(|e| SRSystemError::database_connection(format!("SQLite 连接失败: {e}")))?;

        let db = SqlxSqliteConnector::from_sqlx_sqlite_pool(pool);

        Migrator::up(&db, None)
            .await
            .map_err(|e| SRSystemError::database_operation(format!("数据库迁移失败: {e}")))?;

        Ok(Self { db })
    }
}

// Storage trait 实现
use std::collections::BTreeMap;

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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 学生模块
    async fn create_student(
        &self,
        request: RegisterStudentRequest,
        student_id: String,
        email_verified: bool,
    ) -> Result<Student> {
        self.create_student_impl(request, student_id, email_verified)
            .await
    }

    async fn get_student_by_student_id(&self, student_id: &str) -> Result<Option<Student>> {
        self.get_student_by_student_id_impl(student_id).await
    }

    async fn get_student_by_email(&self, email: &str) -> Result<Option<Student>> {
        self.get_student_by_email_impl(email).await
    }

    async fn student_id_exists(&self, student_id: &str) -> Result<bool> {
        self.student_id_exists_impl(student_id).await
    }

    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse> {
        self.list_students_with_pagination_impl(query).await
    }

    async fn list_students_for_export_filtered(
        &self,
        limit: u64,
        course: Option<String>,
        status: Option<StudentStatus>,
        fee_paid: Option<bool>,
        search: Option<&str>,
    ) -> Result<Vec<Student>> {
        self.list_students_for_export_filtered_impl(limit, course, status, fee_paid, search)
            .await
    }

    async fn update_student(
        &self,
        student_id: &str,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        self.update_student_impl(student_id, update).await
    }

    async fn add_course(&self, student_id: &str, course: &str) -> Result<Option<Student>> {
        self.add_course_impl(student_id, course).await
    }

    async fn update_course_progress(
        &self,
        student_id: &str,
        course: &str,
        update: UpdateProgressRequest,
    ) -> Result<Option<Student>> {
        self.update_course_progress_impl(student_id, course, update)
            .await
    }

    async fn update_course_fee(
        &self,
        student_id: &str,
        course: &str,
        paid: bool,
    ) -> Result<Option<Student>> {
        self.update_course_fee_impl(student_id, course, paid).await
    }

    // 邮箱验证模块
    async fn upsert_verification(&self, email: &str, code: &str) -> Result<VerificationEntry> {
        self.upsert_verification_impl(email, code).await
    }

    async fn get_verification_by_email(&self, email: &str) -> Result<Option<VerificationEntry>> {
        self.get_verification_by_email_impl(email).await
    }

    async fn mark_email_verified(&self, email: &str) -> Result<bool> {
        self.mark_email_verified_impl(email).await
    }

    // 课程资料模块
    async fn create_material(
        &self,
        course: &str,
        title: &str,
        description: Option<String>,
        file_name: &str,
        content_type: &str,
        content: Vec<u8>,
    ) -> Result<MaterialInfo> {
        self.create_material_impl(course, title, description, file_name, content_type, content)
            .await
    }

    async fn list_materials_with_pagination(
        &self,
        query: MaterialListQuery,
    ) -> Result<MaterialListResponse> {
        self.list_materials_with_pagination_impl(query).await
    }

    async fn get_material_by_id(&self, id: i64) -> Result<Option<CourseMaterial>> {
        self.get_material_by_id_impl(id).await
    }

    async fn delete_material(&self, id: i64) -> Result<bool> {
        self.delete_material_impl(id).await
    }

    // 测验模块
    async fn create_quiz(&self, quiz: CreateQuizRequest) -> Result<Quiz> {
        self.create_quiz_impl(quiz).await
    }

    async fn get_quiz_by_quiz_id(&self, quiz_id: &str) -> Result<Option<Quiz>> {
        self.get_quiz_by_quiz_id_impl(quiz_id).await
    }

    async fn list_quizzes_with_pagination(&self, query: QuizListQuery) -> Result<QuizListResponse> {
        self.list_quizzes_with_pagination_impl(query).await
    }

    async fn deactivate_quiz(&self, quiz_id: &str) -> Result<bool> {
        self.deactivate_quiz_impl(quiz_id).await
    }

    async fn list_eligible_quizzes(&self, courses: &[String]) -> Result<Vec<Quiz>> {
        self.list_eligible_quizzes_impl(courses).await
    }

    async fn insert_quiz_result(
        &self,
        quiz_id: &str,
        student_id: &str,
        outcome: QuizGradeOutcome,
        answers: &BTreeMap<usize, OptionLabel>,
    ) -> Result<QuizResult> {
        self.insert_quiz_result_impl(quiz_id, student_id, outcome, answers)
            .await
    }

    async fn list_results_for_student(
        &self,
        student_id: &str,
        query: PaginationQuery,
    ) -> Result<StudentResultsResponse> {
        self.list_results_for_student_impl(student_id, query).await
    }
}
