use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建学生表
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Students::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Students::StudentId)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Students::Name).string().not_null())
                    .col(ColumnDef::new(Students::Age).integer().not_null())
                    .col(
                        ColumnDef::new(Students::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Students::Phone).string().null())
                    .col(ColumnDef::new(Students::Status).string().not_null())
                    .col(
                        ColumnDef::new(Students::EmailVerified)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Students::RegisteredAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Students::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Students::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建选课表:每个 (student, course) 一行,成绩/进度/缴费三态同行存放
        manager
            .create_table(
                Table::create()
                    .table(StudentCourses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StudentCourses::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(StudentCourses::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(StudentCourses::Course).string().not_null())
                    .col(
                        ColumnDef::new(StudentCourses::Grade)
                            .string()
                            .not_null()
                            .default("Not Assessed"),
                    )
                    .col(
                        ColumnDef::new(StudentCourses::Progress)
                            .string()
                            .not_null()
                            .default("0%"),
                    )
                    .col(
                        ColumnDef::new(StudentCourses::FeePaid)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(StudentCourses::EnrolledAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentCourses::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(StudentCourses::Table, StudentCourses::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建邮箱验证表
        manager
            .create_table(
                Table::create()
                    .table(EmailVerifications::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EmailVerifications::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(EmailVerifications::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(EmailVerifications::Code).string().not_null())
                    .col(
                        ColumnDef::new(EmailVerifications::IssuedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EmailVerifications::Verified)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建课程资料表,文件字节直接入库
        manager
            .create_table(
                Table::create()
                    .table(CourseMaterials::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CourseMaterials::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CourseMaterials::Course).string().not_null())
                    .col(ColumnDef::new(CourseMaterials::Title).string().not_null())
                    .col(ColumnDef::new(CourseMaterials::Description).text().null())
                    .col(
                        ColumnDef::new(CourseMaterials::FileName)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CourseMaterials::ContentType)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CourseMaterials::FileSize)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CourseMaterials::Content).binary().not_null())
                    .col(
                        ColumnDef::new(CourseMaterials::UploadedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建测验表,题目以 JSON 文本存放
        manager
            .create_table(
                Table::create()
                    .table(Quizzes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Quizzes::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Quizzes::QuizId)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Quizzes::Title).string().not_null())
                    .col(ColumnDef::new(Quizzes::Course).string().not_null())
                    .col(
                        ColumnDef::new(Quizzes::DurationMinutes)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Quizzes::Questions).text().not_null())
                    .col(
                        ColumnDef::new(Quizzes::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Quizzes::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建测验成绩表,只追加不修改
        manager
            .create_table(
                Table::create()
                    .table(QuizResults::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(QuizResults::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(QuizResults::QuizId).string().not_null())
                    .col(ColumnDef::new(QuizResults::StudentId).string().not_null())
                    .col(ColumnDef::new(QuizResults::Score).integer().not_null())
                    .col(
                        ColumnDef::new(QuizResults::TotalQuestions)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(QuizResults::Percentage).double().not_null())
                    .col(ColumnDef::new(QuizResults::Answers).text().not_null())
                    .col(
                        ColumnDef::new(QuizResults::CompletedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建索引
        // 学生表索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_students_student_id")
                    .table(Students::Table)
                    .col(Students::StudentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_students_email")
                    .table(Students::Table)
                    .col(Students::Email)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_students_status")
                    .table(Students::Table)
                    .col(Students::Status)
                    .to_owned(),
            )
            .await?;

        // 选课表索引,(student_id, course) 唯一保证一门课只有一行
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_student_courses_student_id")
                    .table(StudentCourses::Table)
                    .col(StudentCourses::StudentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uniq_student_courses_student_course")
                    .table(StudentCourses::Table)
                    .col(StudentCourses::StudentId)
                    .col(StudentCourses::Course)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 课程资料表索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_course_materials_course")
                    .table(CourseMaterials::Table)
                    .col(CourseMaterials::Course)
                    .to_owned(),
            )
            .await?;

        // 测验表索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_quizzes_course")
                    .table(Quizzes::Table)
                    .col(Quizzes::Course)
                    .to_owned(),
            )
            .await?;

        // 成绩表索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_quiz_results_student_id")
                    .table(QuizResults::Table)
                    .col(QuizResults::StudentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_quiz_results_quiz_id")
                    .table(QuizResults::Table)
                    .col(QuizResults::QuizId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(QuizResults::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Quizzes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CourseMaterials::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(EmailVerifications::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StudentCourses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Students {
    #[sea_orm(iden = "students")]
    Table,
    Id,
    StudentId,
    Name,
    Age,
    Email,
    Phone,
    Status,
    EmailVerified,
    RegisteredAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum StudentCourses {
    #[sea_orm(iden = "student_courses")]
    Table,
    Id,
    StudentId,
    Course,
    Grade,
    Progress,
    FeePaid,
    EnrolledAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum EmailVerifications {
    #[sea_orm(iden = "email_verifications")]
    Table,
    Id,
    Email,
    Code,
    IssuedAt,
    Verified,
}

#[derive(DeriveIden)]
enum CourseMaterials {
    #[sea_orm(iden = "course_materials")]
    Table,
    Id,
    Course,
    Title,
    Description,
    FileName,
    ContentType,
    FileSize,
    Content,
    UploadedAt,
}

#[derive(DeriveIden)]
enum Quizzes {
    #[sea_orm(iden = "quizzes")]
    Table,
    Id,
    QuizId,
    Title,
    Course,
    DurationMinutes,
    Questions,
    IsActive,
    CreatedAt,
}

#[derive(DeriveIden)]
enum QuizResults {
    #[sea_orm(iden = "quiz_results")]
    Table,
    Id,
    QuizId,
    StudentId,
    Score,
    TotalQuestions,
    Percentage,
    Answers,
    CompletedAt,
}
