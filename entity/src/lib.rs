mod assignable;

pub mod assignment_users;
pub mod assignments;
pub mod classroom_users;
pub mod classrooms;
pub mod lectures;
pub mod project_users;
pub mod projects;
pub mod quiz_users;
pub mod quizzes;
pub mod users;

pub use assignable::*;
