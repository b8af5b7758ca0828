use clap::{Args, Subcommand};

/// Authentication commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AuthCommands {
    /// Sign in with email and password.
    Login(AuthLoginArgs),
    /// End the session locally and on the server.
    Logout,
    /// Show whether a session is stored and for whom.
    Status,
    /// Refresh the cached profile from the server.
    Profile,
}

#[derive(Clone, Debug, Args)]
pub struct AuthLoginArgs {
    #[arg(long)]
    pub email: String,
    /// Password; read from AULA_PASSWORD when omitted.
    #[arg(long, env = "AULA_PASSWORD", hide_env_values = true)]
    pub password: String,
}
