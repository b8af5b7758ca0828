use clap::Subcommand;

use super::subcommands::{
    AuthCommands, CommentCommands, InterventionCommands, StudentCommands, UserCommands,
};

/// Root commands of the `aula` binary.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Sign in, sign out, and inspect the current session.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Intervention records and their lifecycle.
    Intervention {
        #[command(subcommand)]
        action: InterventionCommands,
    },
    /// Comments on an intervention.
    Comment {
        #[command(subcommand)]
        action: CommentCommands,
    },
    /// Student records.
    Student {
        #[command(subcommand)]
        action: StudentCommands,
    },
    /// Staff accounts.
    User {
        #[command(subcommand)]
        action: UserCommands,
    },
}
