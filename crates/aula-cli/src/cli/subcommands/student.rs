use clap::{Args, Subcommand};

/// Student commands.
#[derive(Clone, Debug, Subcommand)]
pub enum StudentCommands {
    List(StudentListArgs),
    Get {
        id: i64,
        /// Include the student's interventions.
        #[arg(long)]
        with_interventions: bool,
    },
    Create(StudentFields),
    Update {
        id: i64,
        #[command(flatten)]
        fields: StudentFields,
    },
    Delete { id: i64 },
    /// Validate a RUT and print its canonical and display forms.
    CheckRut { rut: String },
}

#[derive(Clone, Debug, Default, Args)]
pub struct StudentListArgs {
    /// Matches name or RUT on the server.
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long)]
    pub grade: Option<String>,
    #[arg(long = "type")]
    pub kind: Option<String>,
    #[arg(long)]
    pub active: Option<bool>,
    #[arg(long)]
    pub order_by: Option<String>,
    #[arg(long, requires = "order_by")]
    pub desc: bool,
}

/// Editable student fields. Omitted flags are left unchanged.
#[derive(Clone, Debug, Default, Args)]
pub struct StudentFields {
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub rut: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    /// YYYY-MM-DD.
    #[arg(long)]
    pub birth_date: Option<String>,
    #[arg(long)]
    pub grade: Option<String>,
    /// Regular or "Programa Integración".
    #[arg(long = "type")]
    pub kind: Option<String>,
    #[arg(long)]
    pub academic_year: Option<i32>,
    /// YYYY-MM-DD.
    #[arg(long)]
    pub enrollment_date: Option<String>,
    /// Scholarship details; marks the student as a scholarship holder.
    #[arg(long)]
    pub scholarship: Option<String>,
    #[arg(long)]
    pub guardian1_name: Option<String>,
    #[arg(long)]
    pub guardian1_contact: Option<String>,
    #[arg(long)]
    pub guardian2_name: Option<String>,
    #[arg(long)]
    pub guardian2_contact: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub health_info: Option<String>,
    #[arg(long)]
    pub medical_conditions: Option<String>,
    #[arg(long)]
    pub allergies: Option<String>,
    #[arg(long)]
    pub active: Option<bool>,
}
