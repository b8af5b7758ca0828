use clap::Subcommand;

/// Comment commands.
#[derive(Clone, Debug, Subcommand)]
pub enum CommentCommands {
    /// Comment on an intervention as the signed-in user.
    Add {
        intervention: i64,
        #[arg(long)]
        content: String,
    },
    /// Replace a comment's content.
    Update {
        intervention: i64,
        id: i64,
        #[arg(long)]
        content: String,
    },
    /// Delete a comment (admin only).
    Delete { intervention: i64, id: i64 },
}
