use aula_core::drafts::StudentDraft;
use aula_core::enums::StudentType;
use aula_core::filter::{SortOrder, StudentFilter};
use aula_core::rut;
use serde::Serialize;
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{StudentCommands, StudentFields, StudentListArgs};
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::parse::{parse_optional, parse_optional_day};
use crate::context::AppContext;
use crate::output::{output, output_list};

const LIST_COLUMNS: &[&str] = &["id", "fullName", "displayRut", "grade", "studentType", "isActive"];

#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
struct RutCheck {
    input: String,
    valid: bool,
    canonical: Option<String>,
    display: Option<String>,
}

/// Handle `aula student <subcommand>`.
pub async fn handle(action: &StudentCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    if let StudentCommands::CheckRut { rut } = action {
        return output(&check_rut(rut), flags.format);
    }

    ctx.require_user()?;
    let service = ctx.students();
    match action {
        StudentCommands::List(args) => {
            let mut students = service.list(&filter_from(args)?).await?;
            students.truncate(effective_limit(flags.limit, ctx.config.general.default_limit));
            output_list(&students, flags.format, LIST_COLUMNS)
        }
        StudentCommands::Get {
            id,
            with_interventions,
        } => {
            let student = if *with_interventions {
                service.get_with_interventions(*id).await?
            } else {
                service.get(*id).await?
            };
            output(&student, flags.format)
        }
        StudentCommands::Create(fields) => {
            let created = service.create(&draft_from(fields)?).await?;
            output(&created, flags.format)
        }
        StudentCommands::Update { id, fields } => {
            let updated = service.update(*id, &draft_from(fields)?).await?;
            output(&updated, flags.format)
        }
        StudentCommands::Delete { id } => {
            service.delete(*id).await?;
            output(&json!({ "deleted": id }), flags.format)
        }
        StudentCommands::CheckRut { .. } => Ok(()),
    }
}

fn check_rut(raw: &str) -> RutCheck {
    let valid = rut::is_valid(raw);
    RutCheck {
        input: raw.to_string(),
        valid,
        canonical: valid.then(|| rut::canonical(raw)),
        display: valid.then(|| rut::format_display(raw)),
    }
}

fn filter_from(args: &StudentListArgs) -> anyhow::Result<StudentFilter> {
    Ok(StudentFilter {
        search: args.search.clone(),
        grade: args.grade.clone(),
        student_type: parse_optional::<StudentType>(args.kind.as_deref(), "type")?,
        is_active: args.active,
        order_by: args.order_by.clone(),
        order: args
            .order_by
            .as_ref()
            .map(|_| if args.desc { SortOrder::Desc } else { SortOrder::Asc }),
    })
}

fn draft_from(fields: &StudentFields) -> anyhow::Result<StudentDraft> {
    Ok(StudentDraft {
        first_name: fields.first_name.clone(),
        last_name: fields.last_name.clone(),
        rut: fields.rut.clone(),
        email: fields.email.clone(),
        birth_date: parse_optional_day(fields.birth_date.as_deref(), "birthDate")?,
        grade: fields.grade.clone(),
        student_type: fields.kind.clone(),
        academic_year: fields.academic_year,
        enrollment_date: parse_optional_day(fields.enrollment_date.as_deref(), "enrollmentDate")?,
        has_scholarship: fields.scholarship.as_ref().map(|_| true),
        scholarship_details: fields.scholarship.clone(),
        guardian1_name: fields.guardian1_name.clone(),
        guardian1_contact: fields.guardian1_contact.clone(),
        guardian2_name: fields.guardian2_name.clone(),
        guardian2_contact: fields.guardian2_contact.clone(),
        address: fields.address.clone(),
        health_info: fields.health_info.clone(),
        medical_conditions: fields.medical_conditions.clone(),
        allergies: fields.allergies.clone(),
        is_active: fields.active,
    })
}
