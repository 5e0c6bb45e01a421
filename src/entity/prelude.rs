//! 预导入模块，方便使用

pub use super::course_materials::{
    ActiveModel as CourseMaterialActiveModel, Entity as CourseMaterials,
    Model as CourseMaterialModel,
};
pub use super::email_verifications::{
    ActiveModel as EmailVerificationActiveModel, Entity as EmailVerifications,
    Model as EmailVerificationModel,
};
pub use super::quiz_results::{
    ActiveModel as QuizResultActiveModel, Entity as QuizResults, Model as QuizResultModel,
};
pub use super::quizzes::{ActiveModel as QuizActiveModel, Entity as Quizzes, Model as QuizModel};
pub use super::student_courses::{
    ActiveModel as StudentCourseActiveModel, Entity as StudentCourses, Model as StudentCourseModel,
};
pub use super::students::{
    ActiveModel as StudentActiveModel, Entity as Students, Model as StudentModel,
};
