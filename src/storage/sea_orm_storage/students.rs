//! 学生存储操作
//!
//! 选课三态（成绩/进度/缴费）存放在 student_courses 子表，
//! 读取时批量拉取后按学生分组拼装。

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::student_courses::{
    ActiveModel as CourseActiveModel, Column as CourseColumn, Entity as StudentCourses,
};
use crate::entity::students::{ActiveModel, Column, Entity as Students};
use crate::errors::{Result, SRSystemError};
use crate::models::{
    PaginationInfo,
    students::{
        entities::{CourseEnrollment, CourseProgress, GradeLabel, Student, StudentStatus},
        requests::{
            RegisterStudentRequest, StudentListQuery, UpdateProgressRequest, UpdateStudentRequest,
        },
        responses::StudentListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait, sea_query::Expr,
};

impl SeaOrmStorage {
    /// 登记学生
    ///
    /// 学生行与每门课的初始三态行在同一事务内写入，全部成功或全部回滚。
    pub async fn create_student_impl(
        &self,
        req: RegisterStudentRequest,
        student_id: String,
        email_verified: bool,
    ) -> Result<Student> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SRSystemError::database_operation(format!("开启事务失败: {e}")))?;

        let model = ActiveModel {
            student_id: Set(student_id.clone()),
            name: Set(req.name),
            age: Set(req.age),
            email: Set(req.email),
            phone: Set(req.phone),
            status: Set(StudentStatus::Active.to_string()),
            email_verified: Set(email_verified),
            registered_at: Set(now),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let student_row = model
            .insert(&txn)
            .await
            .map_err(|e| SRSystemError::database_operation(format!("登记学生失败: {e}")))?;

        // 每门课一行初始三态：未评定 / 0% / 未缴费
        for course in &req.courses {
            let row = CourseActiveModel {
                student_id: Set(student_row.id),
                course: Set(course.clone()),
                grade: Set(GradeLabel::NotAssessed.to_string()),
                progress: Set(CourseProgress::P0.to_string()),
                fee_paid: Set(false),
                enrolled_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            };
            row.insert(&txn)
                .await
                .map_err(|e| SRSystemError::database_operation(format!("写入选课记录失败: {e}")))?;
        }

        txn.commit()
            .await
            .map_err(|e| SRSystemError::database_operation(format!("提交事务失败: {e}")))?;

        match self.get_student_by_student_id_impl(&student_id).await? {
            Some(student) => Ok(student),
            None => Err(SRSystemError::database_operation(
                "登记成功但学生记录未找到",
            )),
        }
    }

    /// 通过学号获取学生
    pub async fn get_student_by_student_id_impl(
        &self,
        student_id: &str,
    ) -> Result<Option<Student>> {
        let result = Students::find()
            .filter(Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| SRSystemError::database_operation(format!("查询学生失败: {e}")))?;

        match result {
            Some(model) => Ok(self.assemble_students(vec![model]).await?.pop()),
            None => Ok(None),
        }
    }

    /// 通过邮箱获取学生
    pub async fn get_student_by_email_impl(&self, email: &str) -> Result<Option<Student>> {
        let result = Students::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| SRSystemError::database_operation(format!("查询学生失败: {e}")))?;

        match result {
            Some(model) => Ok(self.assemble_students(vec![model]).await?.pop()),
            None => Ok(None),
        }
    }

    /// 学号是否已被占用
    pub async fn student_id_exists_impl(&self, student_id: &str) -> Result<bool> {
        let count = Students::find()
            .filter(Column::StudentId.eq(student_id))
            .count(&self.db)
            .await
            .map_err(|e| SRSystemError::database_operation(format!("查询学号失败: {e}")))?;

        Ok(count > 0)
    }

    /// 分页列出学生
    pub async fn list_students_with_pagination_impl(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Students::find();

        // 搜索条件
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Name.contains(&escaped))
                    .add(Column::Email.contains(&escaped))
                    .add(Column::StudentId.contains(&escaped)),
            );
        }

        // 状态筛选
        if let Some(ref status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        // 课程/缴费筛选走子表，两步查询后按主键收敛
        if let Some(ids) = self
            .filter_student_ids_by_course(query.course.as_deref(), query.fee_paid)
            .await?
        {
            select = select.filter(Column::Id.is_in(ids));
        }

        // 排序
        select = select.order_by_desc(Column::CreatedAt);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SRSystemError::database_operation(format!("查询学生总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SRSystemError::database_operation(format!("查询学生页数失败: {e}")))?;

        let rows = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SRSystemError::database_operation(format!("查询学生列表失败: {e}")))?;

        Ok(StudentListResponse {
            items: self.assemble_students(rows).await?,
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 按筛选条件列出学生用于导出
    pub async fn list_students_for_export_filtered_impl(
        &self,
        limit: u64,
        course: Option<String>,
        status: Option<StudentStatus>,
        fee_paid: Option<bool>,
        search: Option<&str>,
    ) -> Result<Vec<Student>> {
        let mut select = Students::find();

        if let Some(search) = search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Name.contains(&escaped))
                    .add(Column::Email.contains(&escaped))
                    .add(Column::StudentId.contains(&escaped)),
            );
        }

        if let Some(ref status) = status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        if let Some(ids) = self
            .filter_student_ids_by_course(course.as_deref(), fee_paid)
            .await?
        {
            select = select.filter(Column::Id.is_in(ids));
        }

        let rows = select
            .order_by_desc(Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| SRSystemError::database_operation(format!("查询导出学生失败: {e}")))?;

        self.assemble_students(rows).await
    }

    /// 更新学生资料
    pub async fn update_student_impl(
        &self,
        student_id: &str,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        // 先检查学生是否存在
        let existing = Students::find()
            .filter(Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| SRSystemError::database_operation(format!("查询学生失败: {e}")))?;

        let student_row = match existing {
            Some(row) => row,
            None => return Ok(None),
        };

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(student_row.id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name);
        }

        if let Some(age) = update.age {
            model.age = Set(age);
        }

        if let Some(phone) = update.phone {
            model.phone = Set(Some(phone));
        }

        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| SRSystemError::database_operation(format!("更新学生失败: {e}")))?;

        self.get_student_by_student_id_impl(student_id).await
    }

    /// 加选课程
    ///
    /// (student, course) 上的唯一索引保证重复加选直接报错。
    pub async fn add_course_impl(&self, student_id: &str, course: &str) -> Result<Option<Student>> {
        let existing = Students::find()
            .filter(Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| SRSystemError::database_operation(format!("查询学生失败: {e}")))?;

        let student_row = match existing {
            Some(row) => row,
            None => return Ok(None),
        };

        let now = chrono::Utc::now().timestamp();
        let row = CourseActiveModel {
            student_id: Set(student_row.id),
            course: Set(course.to_string()),
            grade: Set(GradeLabel::NotAssessed.to_string()),
            progress: Set(CourseProgress::P0.to_string()),
            fee_paid: Set(false),
            enrolled_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        row.insert(&self.db)
            .await
            .map_err(|e| SRSystemError::database_operation(format!("写入选课记录失败: {e}")))?;

        self.get_student_by_student_id_impl(student_id).await
    }

    /// 更新某门课的进度，grade 给出时一并写入
    pub async fn update_course_progress_impl(
        &self,
        student_id: &str,
        course: &str,
        update: UpdateProgressRequest,
    ) -> Result<Option<Student>> {
        let existing = Students::find()
            .filter(Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| SRSystemError::database_operation(format!("查询学生失败: {e}")))?;

        let student_row = match existing {
            Some(row) => row,
            None => return Ok(None),
        };

        let now = chrono::Utc::now().timestamp();

        let mut update_query = StudentCourses::update_many()
            .col_expr(
                CourseColumn::Progress,
                Expr::value(update.progress.to_string()),
            )
            .col_expr(CourseColumn::UpdatedAt, Expr::value(now));

        if let Some(grade) = update.grade {
            update_query =
                update_query.col_expr(CourseColumn::Grade, Expr::value(grade.to_string()));
        }

        let result = update_query
            .filter(CourseColumn::StudentId.eq(student_row.id))
            .filter(CourseColumn::Course.eq(course))
            .exec(&self.db)
            .await
            .map_err(|e| SRSystemError::database_operation(format!("更新课程进度失败: {e}")))?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.get_student_by_student_id_impl(student_id).await
    }

    /// 更新某门课的缴费状态
    pub async fn update_course_fee_impl(
        &self,
        student_id: &str,
        course: &str,
        paid: bool,
    ) -> Result<Option<Student>> {
        let existing = Students::find()
            .filter(Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| SRSystemError::database_operation(format!("查询学生失败: {e}")))?;

        let student_row = match existing {
            Some(row) => row,
            None => return Ok(None),
        };

        let now = chrono::Utc::now().timestamp();

        let result = StudentCourses::update_many()
            .col_expr(CourseColumn::FeePaid, Expr::value(paid))
            .col_expr(CourseColumn::UpdatedAt, Expr::value(now))
            .filter(CourseColumn::StudentId.eq(student_row.id))
            .filter(CourseColumn::Course.eq(course))
            .exec(&self.db)
            .await
            .map_err(|e| SRSystemError::database_operation(format!("更新缴费状态失败: {e}")))?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.get_student_by_student_id_impl(student_id).await
    }

    /// 课程/缴费筛选：先查子表收集学生主键
    ///
    /// 返回 None 表示无须收敛，Some(ids) 表示命中子表条件的学生集合。
    async fn filter_student_ids_by_course(
        &self,
        course: Option<&str>,
        fee_paid: Option<bool>,
    ) -> Result<Option<Vec<i64>>> {
        if course.is_none() && fee_paid.is_none() {
            return Ok(None);
        }

        let mut course_select = StudentCourses::find();

        if let Some(course) = course
            && !course.trim().is_empty()
        {
            course_select = course_select.filter(CourseColumn::Course.eq(course));
        }

        if let Some(paid) = fee_paid {
            course_select = course_select.filter(CourseColumn::FeePaid.eq(paid));
        }

        let ids: Vec<i64> = course_select
            .all(&self.db)
            .await
            .map_err(|e| SRSystemError::database_operation(format!("查询选课记录失败: {e}")))?
            .into_iter()
            .map(|row| row.student_id)
            .collect();

        Ok(Some(ids))
    }

    /// 批量拉取选课行并按学生分组拼装业务模型
    async fn assemble_students(
        &self,
        rows: Vec<crate::entity::students::Model>,
    ) -> Result<Vec<Student>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = rows.iter().map(|m| m.id).collect();
        let course_rows = StudentCourses::find()
            .filter(CourseColumn::StudentId.is_in(ids))
            .order_by_asc(CourseColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| SRSystemError::database_operation(format!("查询选课记录失败: {e}")))?;

        let mut enrollment_map: HashMap<i64, Vec<CourseEnrollment>> = HashMap::new();
        for row in course_rows {
            enrollment_map
                .entry(row.student_id)
                .or_default()
                .push(row.into_enrollment());
        }

        Ok(rows
            .into_iter()
            .map(|m| {
                let courses = enrollment_map.remove(&m.id).unwrap_or_default();
                m.into_student(courses)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_request(name: &str, email: &str, courses: &[&str]) -> RegisterStudentRequest {
        RegisterStudentRequest {
            name: name.to_string(),
            age: 20,
            email: email.to_string(),
            phone: None,
            courses: courses.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn register_seeds_course_state() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let student = storage
            .create_student_impl(
                register_request(
                    "Ada Lovelace",
                    "ada@example.com",
                    &["Web Development", "Data Science"],
                ),
                "CL100001".to_string(),
                false,
            )
            .await
            .unwrap();

        assert_eq!(student.student_id, "CL100001");
        assert_eq!(student.status, StudentStatus::Active);
        assert!(!student.email_verified);
        assert_eq!(student.courses.len(), 2);
        for enrollment in &student.courses {
            assert_eq!(enrollment.grade, GradeLabel::NotAssessed);
            assert_eq!(enrollment.progress, CourseProgress::P0);
            assert!(!enrollment.fee_paid);
        }
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        storage
            .create_student_impl(
                register_request("Ada Lovelace", "ada@example.com", &["Data Science"]),
                "CL100001".to_string(),
                false,
            )
            .await
            .unwrap();

        let err = storage
            .create_student_impl(
                register_request("Eva Green", "ada@example.com", &["Data Science"]),
                "CL100002".to_string(),
                false,
            )
            .await
            .unwrap_err();
        assert!(err.to_string().contains("UNIQUE constraint failed"));

        // 事务回滚后新学号不应留下任何痕迹
        assert!(!storage.student_id_exists_impl("CL100002").await.unwrap());
    }

    #[tokio::test]
    async fn add_course_keeps_neighbor_state() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        storage
            .create_student_impl(
                register_request(
                    "Ada Lovelace",
                    "ada@example.com",
                    &["Web Development", "Data Science"],
                ),
                "CL100001".to_string(),
                false,
            )
            .await
            .unwrap();

        // 先推进一门课
        storage
            .update_course_progress_impl(
                "CL100001",
                "Web Development",
                UpdateProgressRequest {
                    progress: CourseProgress::P50,
                    grade: Some(GradeLabel::A),
                },
            )
            .await
            .unwrap()
            .unwrap();

        // 加选第三门课不影响已有三态
        let student = storage
            .add_course_impl("CL100001", "English Language")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(student.courses.len(), 3);

        let web = student
            .courses
            .iter()
            .find(|c| c.course == "Web Development")
            .unwrap();
        assert_eq!(web.progress, CourseProgress::P50);
        assert_eq!(web.grade, GradeLabel::A);

        let data = student
            .courses
            .iter()
            .find(|c| c.course == "Data Science")
            .unwrap();
        assert_eq!(data.progress, CourseProgress::P0);
        assert_eq!(data.grade, GradeLabel::NotAssessed);

        let english = student
            .courses
            .iter()
            .find(|c| c.course == "English Language")
            .unwrap();
        assert_eq!(english.grade, GradeLabel::NotAssessed);
        assert!(!english.fee_paid);
    }

    #[tokio::test]
    async fn duplicate_course_is_rejected() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        storage
            .create_student_impl(
                register_request("Ada Lovelace", "ada@example.com", &["Data Science"]),
                "CL100001".to_string(),
                false,
            )
            .await
            .unwrap();

        let err = storage
            .add_course_impl("CL100001", "Data Science")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("UNIQUE constraint failed"));
    }

    #[tokio::test]
    async fn progress_update_without_grade_keeps_grade() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        storage
            .create_student_impl(
                register_request("Ada Lovelace", "ada@example.com", &["Data Science"]),
                "CL100001".to_string(),
                false,
            )
            .await
            .unwrap();

        storage
            .update_course_progress_impl(
                "CL100001",
                "Data Science",
                UpdateProgressRequest {
                    progress: CourseProgress::P25,
                    grade: Some(GradeLabel::BPlus),
                },
            )
            .await
            .unwrap()
            .unwrap();

        let student = storage
            .update_course_progress_impl(
                "CL100001",
                "Data Science",
                UpdateProgressRequest {
                    progress: CourseProgress::P75,
                    grade: None,
                },
            )
            .await
            .unwrap()
            .unwrap();

        let enrollment = &student.courses[0];
        assert_eq!(enrollment.progress, CourseProgress::P75);
        assert_eq!(enrollment.grade, GradeLabel::BPlus);
    }

    #[tokio::test]
    async fn progress_update_unknown_course_returns_none() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        storage
            .create_student_impl(
                register_request("Ada Lovelace", "ada@example.com", &["Data Science"]),
                "CL100001".to_string(),
                false,
            )
            .await
            .unwrap();

        let result = storage
            .update_course_progress_impl(
                "CL100001",
                "Graphic Design",
                UpdateProgressRequest {
                    progress: CourseProgress::P25,
                    grade: None,
                },
            )
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn fee_flag_flips_per_course() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        storage
            .create_student_impl(
                register_request(
                    "Ada Lovelace",
                    "ada@example.com",
                    &["Web Development", "Data Science"],
                ),
                "CL100001".to_string(),
                false,
            )
            .await
            .unwrap();

        let student = storage
            .update_course_fee_impl("CL100001", "Web Development", true)
            .await
            .unwrap()
            .unwrap();

        let web = student
            .courses
            .iter()
            .find(|c| c.course == "Web Development")
            .unwrap();
        let data = student
            .courses
            .iter()
            .find(|c| c.course == "Data Science")
            .unwrap();
        assert!(web.fee_paid);
        assert!(!data.fee_paid);
    }

    #[tokio::test]
    async fn update_student_partial_fields() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        storage
            .create_student_impl(
                register_request("Ada Lovelace", "ada@example.com", &["Data Science"]),
                "CL100001".to_string(),
                false,
            )
            .await
            .unwrap();

        let student = storage
            .update_student_impl(
                "CL100001",
                UpdateStudentRequest {
                    name: Some("Ada King".to_string()),
                    age: None,
                    phone: None,
                    status: Some(StudentStatus::Completed),
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(student.name, "Ada King");
        assert_eq!(student.age, 20);
        assert_eq!(student.email, "ada@example.com");
        assert_eq!(student.status, StudentStatus::Completed);

        let missing = storage
            .update_student_impl(
                "CL999999",
                UpdateStudentRequest {
                    name: None,
                    age: None,
                    phone: None,
                    status: None,
                },
            )
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn list_students_filters() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        storage
            .create_student_impl(
                register_request("Ada Lovelace", "ada@example.com", &["Web Development"]),
                "CL100001".to_string(),
                false,
            )
            .await
            .unwrap();
        storage
            .create_student_impl(
                register_request("Grace Hopper", "grace@example.com", &["Data Science"]),
                "CL100002".to_string(),
                false,
            )
            .await
            .unwrap();
        storage
            .create_student_impl(
                register_request("Alan Turing", "alan@example.com", &["Data Science"]),
                "CL100003".to_string(),
                false,
            )
            .await
            .unwrap();

        storage
            .update_student_impl(
                "CL100003",
                UpdateStudentRequest {
                    name: None,
                    age: None,
                    phone: None,
                    status: Some(StudentStatus::Inactive),
                },
            )
            .await
            .unwrap();
        storage
            .update_course_fee_impl("CL100002", "Data Science", true)
            .await
            .unwrap();

        let query = |course: Option<&str>,
                     status: Option<StudentStatus>,
                     fee_paid: Option<bool>,
                     search: Option<&str>| StudentListQuery {
            page: None,
            size: None,
            course: course.map(|s| s.to_string()),
            status,
            fee_paid,
            search: search.map(|s| s.to_string()),
        };

        // 课程筛选
        let by_course = storage
            .list_students_with_pagination_impl(query(Some("Data Science"), None, None, None))
            .await
            .unwrap();
        assert_eq!(by_course.pagination.total, 2);

        // 状态筛选
        let by_status = storage
            .list_students_with_pagination_impl(query(
                None,
                Some(StudentStatus::Inactive),
                None,
                None,
            ))
            .await
            .unwrap();
        assert_eq!(by_status.pagination.total, 1);
        assert_eq!(by_status.items[0].student_id, "CL100003");

        // 缴费筛选（带课程）
        let by_fee = storage
            .list_students_with_pagination_impl(query(
                Some("Data Science"),
                None,
                Some(true),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(by_fee.pagination.total, 1);
        assert_eq!(by_fee.items[0].student_id, "CL100002");

        // 搜索
        let by_search = storage
            .list_students_with_pagination_impl(query(None, None, None, Some("grace")))
            .await
            .unwrap();
        assert_eq!(by_search.pagination.total, 1);
        assert_eq!(by_search.items[0].name, "Grace Hopper");
    }

    #[tokio::test]
    async fn export_respects_limit() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        for i in 0..3 {
            storage
                .create_student_impl(
                    register_request(
                        &format!("Student {i}"),
                        &format!("student{i}@example.com"),
                        &["English Language"],
                    ),
                    format!("CL10000{i}"),
                    false,
                )
                .await
                .unwrap();
        }

        let exported = storage
            .list_students_for_export_filtered_impl(2, None, None, None, None)
            .await
            .unwrap();
        assert_eq!(exported.len(), 2);

        let all = storage
            .list_students_for_export_filtered_impl(10000, None, None, None, None)
            .await
            .unwrap();
        assert_eq!(all.len(), 3);
    }
}
