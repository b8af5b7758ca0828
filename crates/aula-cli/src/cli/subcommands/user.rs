use clap::{Args, Subcommand};

/// Staff account commands.
#[derive(Clone, Debug, Subcommand)]
pub enum UserCommands {
    List(UserListArgs),
    Get { id: i64 },
    /// Active profesionales and profesores.
    Professionals,
    /// Active profesores.
    Teachers,
    Activate { id: i64 },
    Deactivate { id: i64 },
}

#[derive(Clone, Debug, Default, Args)]
pub struct UserListArgs {
    #[arg(long)]
    pub search: Option<String>,
    /// admin, profesor, or profesional; repeat for several.
    #[arg(long = "role")]
    pub roles: Vec<String>,
    #[arg(long)]
    pub staff_type: Option<String>,
    #[arg(long)]
    pub active: Option<bool>,
    #[arg(long)]
    pub department: Option<String>,
}
