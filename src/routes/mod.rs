pub mod materials;

pub mod quizzes;

pub mod students;

pub mod verification;

pub use materials::configure_material_routes;
pub use quizzes::configure_quiz_routes;
pub use students::configure_student_routes;
pub use verification::configure_verification_routes;
