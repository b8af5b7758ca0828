mod auth;
mod comment;
mod intervention;
mod student;
mod user;

pub use auth::{AuthCommands, AuthLoginArgs};
pub use comment::CommentCommands;
pub use intervention::{
    Direction, InterventionCommands, InterventionFields, InterventionListArgs, SortField,
};
pub use student::{StudentCommands, StudentFields, StudentListArgs};
pub use user::{UserCommands, UserListArgs};
