pub mod materials;
pub mod quizzes;
pub mod students;
pub mod verification;

pub use materials::MaterialService;
pub use quizzes::QuizService;
pub use students::StudentService;
pub use verification::VerificationService;
