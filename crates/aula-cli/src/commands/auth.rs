use aula_core::entities::UserRecord;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuthCommands;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AuthStatus {
    authenticated: bool,
    user: Option<UserRecord>,
    api_base_url: String,
    session_dir: Option<String>,
}

/// Handle `aula auth <subcommand>`.
pub async fn handle(action: &AuthCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        AuthCommands::Login(args) => {
            let session = ctx.auth().login(&args.email, &args.password).await?;
            output(&status(ctx, Some(session.user)), flags.format)
        }
        AuthCommands::Logout => {
            ctx.auth().logout().await;
            output(&status(ctx, None), flags.format)
        }
        AuthCommands::Status => output(&status(ctx, ctx.session.user()), flags.format),
        AuthCommands::Profile => {
            let user = ctx.auth().profile().await?;
            output(&UserRecord::from(user), flags.format)
        }
    }
}

fn status(ctx: &AppContext, user: Option<aula_core::entities::User>) -> AuthStatus {
    AuthStatus {
        authenticated: user.is_some(),
        user: user.map(UserRecord::from),
        api_base_url: ctx.config.api.base_url.clone(),
        session_dir: ctx
            .session
            .store()
            .map(|store| store.dir().display().to_string()),
    }
}
