use clap::{Args, Subcommand, ValueEnum};

/// Intervention commands.
#[derive(Clone, Debug, Subcommand)]
pub enum InterventionCommands {
    /// List interventions, filtered on the server and again locally.
    List(InterventionListArgs),
    /// Show one intervention with its relations and comments.
    Get {
        id: i64,
        /// Print the raw record instead of the formatted view.
        #[arg(long)]
        plain: bool,
    },
    /// Create an intervention. The informer defaults to the signed-in user.
    Create(InterventionFields),
    /// Change fields of an intervention you may edit.
    Update {
        id: i64,
        #[command(flatten)]
        fields: InterventionFields,
    },
    /// Delete an intervention.
    Delete { id: i64 },
    /// Move an intervention to another status.
    Status {
        id: i64,
        /// Target status: Pendiente, "En Proceso", Resuelto, Cerrado.
        status: String,
        /// Outcome evaluation stored when resolving.
        #[arg(long)]
        resolution: Option<String>,
    },
    /// Show the reachable statuses and your permissions.
    Transitions { id: i64 },
    /// Replace the list of actions taken.
    Actions {
        id: i64,
        /// One action; repeat for several.
        #[arg(long = "action", required = true)]
        actions: Vec<String>,
    },
    /// Schedule the follow-up date (YYYY-MM-DD or RFC 3339).
    FollowUp {
        id: i64,
        #[arg(long)]
        date: String,
    },
    /// Record the parents' feedback.
    Feedback {
        id: i64,
        #[arg(long)]
        text: String,
    },
    /// Refer the case to an external service.
    Referral {
        id: i64,
        #[arg(long)]
        details: String,
    },
    /// Record the outcome evaluation.
    Outcome {
        id: i64,
        #[arg(long)]
        text: String,
    },
}

#[derive(Clone, Debug, Default, Args)]
pub struct InterventionListArgs {
    #[arg(long)]
    pub status: Option<String>,
    /// 1 (Alta), 2 (Media), 3 (Baja), or the label.
    #[arg(long)]
    pub priority: Option<String>,
    #[arg(long = "type")]
    pub kind: Option<String>,
    #[arg(long)]
    pub student: Option<i64>,
    #[arg(long)]
    pub responsible: Option<i64>,
    /// Reported on or after this day (YYYY-MM-DD).
    #[arg(long)]
    pub from: Option<String>,
    /// Reported on or before this day (YYYY-MM-DD).
    #[arg(long)]
    pub to: Option<String>,
    /// Substring of the student's name.
    #[arg(long)]
    pub student_name: Option<String>,
    /// Substring of the responsible's name.
    #[arg(long)]
    pub responsible_name: Option<String>,
    #[arg(long, value_enum, default_value = "date")]
    pub sort: SortField,
    #[arg(long, value_enum, default_value = "desc")]
    pub order: Direction,
    /// Zero-based page.
    #[arg(long, default_value_t = 0)]
    pub page: usize,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum SortField {
    #[default]
    Date,
    Priority,
    Status,
    Title,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum Direction {
    Asc,
    #[default]
    Desc,
}

/// Editable intervention fields. Omitted flags are left unchanged.
#[derive(Clone, Debug, Default, Args)]
pub struct InterventionFields {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long = "type")]
    pub kind: Option<String>,
    #[arg(long)]
    pub priority: Option<String>,
    /// Individual, Grupal, or Familiar.
    #[arg(long)]
    pub scope: Option<String>,
    #[arg(long)]
    pub student: Option<i64>,
    #[arg(long)]
    pub responsible: Option<i64>,
    #[arg(long)]
    pub informer: Option<i64>,
    #[arg(long)]
    pub follow_up: Option<String>,
    #[arg(long)]
    pub parent_feedback: Option<String>,
}
