pub mod auth;
pub mod comment;
pub mod intervention;
pub mod shared;
pub mod student;
pub mod user;

use crate::cli::{Commands, GlobalFlags};
use crate::context::AppContext;

/// Dispatch a parsed command to its handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Auth { action } => auth::handle(&action, ctx, flags).await,
        Commands::Intervention { action } => intervention::handle(&action, ctx, flags).await,
        Commands::Comment { action } => comment::handle(&action, ctx, flags).await,
        Commands::Student { action } => student::handle(&action, ctx, flags).await,
        Commands::User { action } => user::handle(&action, ctx, flags).await,
    }
}
