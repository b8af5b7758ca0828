use aula_client::{ApiClient, Computed, InterventionState};
use aula_core::drafts::InterventionDraft;
use aula_core::entities::{InterventionDetails, RecordId};
use aula_core::enums::{InterventionStatus, Priority};
use aula_core::filter::{InterventionFilter, SortKey, SortOrder, paginate, sort_interventions};
use aula_core::format::format_intervention_for_display;
use aula_core::permissions::{InterventionPermissions, allowed_transitions, can_delete, is_valid_status_change};
use chrono::Utc;
use serde::Serialize;
use serde_json::json;

use crate::cli::subcommands::{
    Direction, InterventionCommands, InterventionFields, InterventionListArgs, SortField,
};
use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::parse::{parse_follow_up, parse_optional, parse_optional_day, parse_value};
use crate::context::AppContext;
use crate::output::{output, output_list};

const LIST_COLUMNS: &[&str] = &[
    "id",
    "title",
    "type",
    "statusLabel",
    "priorityLabel",
    "dateReported",
    "responsibleId",
];

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TransitionsView {
    id: RecordId,
    status: InterventionStatus,
    /// Every status the table allows from here.
    allowed: &'static [InterventionStatus],
    /// The subset the signed-in user may choose.
    available: Vec<InterventionStatus>,
    permissions: InterventionPermissions,
    computed: Option<Computed>,
}

/// Handle `aula intervention <subcommand>`.
pub async fn handle(
    action: &InterventionCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        InterventionCommands::List(args) => list(args, ctx, flags).await,
        InterventionCommands::Get { id, plain } => {
            let details = ctx.interventions().get_with_details(*id).await?;
            if *plain {
                output(&details, flags.format)
            } else {
                show(&details, flags)
            }
        }
        InterventionCommands::Create(fields) => {
            let user = ctx.require_user()?;
            let mut draft = draft_from(fields)?;
            draft.informer_id.get_or_insert(user.id);
            let created = ctx.interventions().create(&draft).await?;
            output(&created, flags.format)
        }
        InterventionCommands::Update { id, fields } => {
            if fields.informer.is_some() {
                tracing::warn!("the informer of an existing intervention cannot be changed; ignoring --informer");
            }
            let change = draft_from(fields)?;
            let mut state = state(ctx, *id)?;
            let details = state.update(change).await?;
            show(details, flags)
        }
        InterventionCommands::Delete { id } => {
            let user = ctx.require_user()?;
            let service = ctx.interventions();
            let record = service.get(*id).await?;
            if !can_delete(Some(&record.intervention), Some(&user)) {
                anyhow::bail!(
                    "No tiene permisos para eliminar esta intervención (estado {})",
                    record.status_label
                );
            }
            service.delete(*id).await?;
            output(&json!({ "deleted": id }), flags.format)
        }
        InterventionCommands::Status {
            id,
            status,
            resolution,
        } => {
            let next = parse_value::<InterventionStatus>(status, "status")?;
            let mut state = state(ctx, *id)?;
            let details = state.change_status(next, resolution.clone()).await?;
            show(details, flags)
        }
        InterventionCommands::Transitions { id } => {
            let user = ctx.require_user()?;
            let mut state = state(ctx, *id)?;
            let current = state.load().await?.intervention().status;
            let allowed = allowed_transitions(Some(current));
            let view = TransitionsView {
                id: *id,
                status: current,
                allowed,
                available: allowed
                    .iter()
                    .copied()
                    .filter(|next| is_valid_status_change(Some(current), Some(*next), Some(&user)))
                    .collect(),
                permissions: state.permissions(),
                computed: state.computed(Utc::now()),
            };
            output(&view, flags.format)
        }
        InterventionCommands::Actions { id, actions } => {
            let mut state = state(ctx, *id)?;
            let details = state.update_actions_taken(actions.clone()).await?;
            show(details, flags)
        }
        InterventionCommands::FollowUp { id, date } => {
            let at = parse_follow_up(date)?;
            let mut state = state(ctx, *id)?;
            let details = state.schedule_follow_up(at).await?;
            show(details, flags)
        }
        InterventionCommands::Feedback { id, text } => {
            let mut state = state(ctx, *id)?;
            let details = state.update_parent_feedback(text.as_str()).await?;
            show(details, flags)
        }
        InterventionCommands::Referral { id, details } => {
            let mut state = state(ctx, *id)?;
            let updated = state.update_external_referral(details.as_str()).await?;
            show(updated, flags)
        }
        InterventionCommands::Outcome { id, text } => {
            let mut state = state(ctx, *id)?;
            let details = state.update_outcome_evaluation(text.as_str()).await?;
            show(details, flags)
        }
    }
}

async fn list(args: &InterventionListArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let filter = filter_from(args)?;
    let mut records = ctx.interventions().list(&filter).await?;
    sort_interventions(&mut records, sort_key(args.sort), sort_order(args.order));

    let per_page = effective_limit(flags.limit, ctx.config.general.default_limit);
    let page = paginate(records, args.page, per_page);
    if flags.format == OutputFormat::Table {
        output_list(&page.items, flags.format, LIST_COLUMNS)?;
        if !flags.quiet {
            eprintln!(
                "página {} de {} ({} en total)",
                page.page + 1,
                page.total_pages().max(1),
                page.total
            );
        }
        Ok(())
    } else {
        output(&page, flags.format)
    }
}

fn state(ctx: &AppContext, id: RecordId) -> anyhow::Result<InterventionState<ApiClient>> {
    ctx.require_user()?;
    Ok(InterventionState::new(ctx.interventions(), id))
}

fn show(details: &InterventionDetails, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&format_intervention_for_display(details, true), flags.format)
}

fn filter_from(args: &InterventionListArgs) -> anyhow::Result<InterventionFilter> {
    Ok(InterventionFilter {
        status: parse_optional(args.status.as_deref(), "status")?,
        priority: parse_optional(args.priority.as_deref(), "priority")?,
        student_id: args.student,
        responsible_id: args.responsible,
        intervention_type: parse_optional(args.kind.as_deref(), "type")?,
        date_from: parse_optional_day(args.from.as_deref(), "from")?,
        date_to: parse_optional_day(args.to.as_deref(), "to")?,
        student_search: args.student_name.clone(),
        responsible_search: args.responsible_name.clone(),
    })
}

/// Type, scope, and status strings are passed through as given so the
/// validator reports them with its own messages.
fn draft_from(fields: &InterventionFields) -> anyhow::Result<InterventionDraft> {
    let priority = parse_optional::<Priority>(fields.priority.as_deref(), "priority")?;
    Ok(InterventionDraft {
        title: fields.title.clone(),
        description: fields.description.clone(),
        intervention_type: fields.kind.clone(),
        priority: priority.map(|p| i64::from(p.as_number())),
        intervention_scope: fields.scope.clone(),
        student_id: fields.student,
        responsible_id: fields.responsible,
        informer_id: fields.informer,
        follow_up_date: fields.follow_up.as_deref().map(parse_follow_up).transpose()?,
        parent_feedback: fields.parent_feedback.clone(),
        ..InterventionDraft::default()
    })
}

const fn sort_key(field: SortField) -> SortKey {
    match field {
        SortField::Date => SortKey::DateReported,
        SortField::Priority => SortKey::Priority,
        SortField::Status => SortKey::Status,
        SortField::Title => SortKey::Title,
    }
}

const fn sort_order(direction: Direction) -> SortOrder {
    match direction {
        Direction::Asc => SortOrder::Asc,
        Direction::Desc => SortOrder::Desc,
    }
}

#[cfg(test)]
mod tests {
    use aula_core::enums::InterventionType;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn filter_parses_wire_values_and_days() {
        let args = InterventionListArgs {
            status: Some("En Proceso".to_string()),
            priority: Some("Alta".to_string()),
            kind: Some("Asistencia".to_string()),
            from: Some("2024-03-01".to_string()),
            student_name: Some("pérez".to_string()),
            ..InterventionListArgs::default()
        };
        let filter = filter_from(&args).unwrap();
        assert_eq!(filter.status, Some(InterventionStatus::InProgress));
        assert_eq!(filter.priority, Some(Priority::High));
        assert_eq!(filter.intervention_type, Some(InterventionType::Attendance));
        assert_eq!(filter.date_from, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(filter.student_search.as_deref(), Some("pérez"));
    }

    #[test]
    fn filter_rejects_unknown_status() {
        let args = InterventionListArgs {
            status: Some("Abierto".to_string()),
            ..InterventionListArgs::default()
        };
        assert!(filter_from(&args).is_err());
    }

    #[test]
    fn draft_keeps_omitted_fields_unset() {
        let fields = InterventionFields {
            title: Some("Conflicto en recreo".to_string()),
            priority: Some("2".to_string()),
            ..InterventionFields::default()
        };
        let draft = draft_from(&fields).unwrap();
        assert_eq!(draft.title.as_deref(), Some("Conflicto en recreo"));
        assert_eq!(draft.priority, Some(2));
        assert_eq!(draft.status, None);
        assert_eq!(draft.description, None);
        assert_eq!(draft.informer_id, None);
    }

    #[test]
    fn sort_flags_map_onto_core_keys() {
        assert_eq!(sort_key(SortField::Date), SortKey::DateReported);
        assert_eq!(sort_order(Direction::Asc), SortOrder::Asc);
    }
}
