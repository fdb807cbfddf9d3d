pub mod admin;
pub mod course;
pub mod role;
pub mod user;

pub use admin::Admin;
pub use course::{Course, CourseChanges};
pub use role::Role;
pub use user::User;
