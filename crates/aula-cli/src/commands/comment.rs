use aula_client::InterventionState;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::CommentCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `aula comment <subcommand>`.
pub async fn handle(action: &CommentCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.require_user()?;
    match action {
        CommentCommands::Add {
            intervention,
            content,
        } => {
            let mut state = InterventionState::new(ctx.interventions(), *intervention);
            let comment = state.add_comment(content.as_str()).await?;
            output(&comment, flags.format)
        }
        CommentCommands::Update {
            intervention,
            id,
            content,
        } => {
            let mut state = InterventionState::new(ctx.interventions(), *intervention);
            let comment = state.update_comment(*id, content.as_str()).await?;
            output(&comment, flags.format)
        }
        CommentCommands::Delete { intervention, id } => {
            let mut state = InterventionState::new(ctx.interventions(), *intervention);
            state.delete_comment(*id).await?;
            output(&json!({ "deleted": id }), flags.format)
        }
    }
}
