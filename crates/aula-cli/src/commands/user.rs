use aula_core::enums::Role;
use aula_core::filter::UserFilter;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{UserCommands, UserListArgs};
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::parse::parse_value;
use crate::context::AppContext;
use crate::output::{output, output_list};

const LIST_COLUMNS: &[&str] = &["id", "fullName", "email", "roleLabel", "department", "isActive"];

/// Handle `aula user <subcommand>`.
pub async fn handle(action: &UserCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.require_user()?;
    let service = ctx.users();
    let limit = effective_limit(flags.limit, ctx.config.general.default_limit);
    match action {
        UserCommands::List(args) => {
            let mut users = service.list(&filter_from(args)?).await?;
            users.truncate(limit);
            output_list(&users, flags.format, LIST_COLUMNS)
        }
        UserCommands::Get { id } => output(&service.get(*id).await?, flags.format),
        UserCommands::Professionals => {
            let mut users = service.professionals().await?;
            users.truncate(limit);
            output_list(&users, flags.format, LIST_COLUMNS)
        }
        UserCommands::Teachers => {
            let mut users = service.teachers().await?;
            users.truncate(limit);
            output_list(&users, flags.format, LIST_COLUMNS)
        }
        UserCommands::Activate { id } => output(&service.set_active(*id, true).await?, flags.format),
        UserCommands::Deactivate { id } => output(&service.set_active(*id, false).await?, flags.format),
    }
}

fn filter_from(args: &UserListArgs) -> anyhow::Result<UserFilter> {
    Ok(UserFilter {
        search: args.search.clone(),
        roles: args
            .roles
            .iter()
            .map(|role| parse_value::<Role>(role, "role"))
            .collect::<anyhow::Result<_>>()?,
        staff_type: args.staff_type.clone(),
        is_active: args.active,
        department: args.department.clone(),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn roles_parse_in_order() {
        let args = UserListArgs {
            roles: vec!["profesor".to_string(), "profesional".to_string()],
            ..UserListArgs::default()
        };
        assert_eq!(
            filter_from(&args).unwrap().roles,
            vec![Role::Profesor, Role::Profesional]
        );
    }

    #[test]
    fn unknown_role_is_rejected() {
        let args = UserListArgs {
            roles: vec!["director".to_string()],
            ..UserListArgs::default()
        };
        assert!(filter_from(&args).is_err());
    }
}
