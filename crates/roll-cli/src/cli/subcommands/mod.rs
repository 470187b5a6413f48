pub mod course;
pub mod user;

pub use course::CourseCommands;
pub use user::UserCommands;
