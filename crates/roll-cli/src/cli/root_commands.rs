use clap::{Args, Subcommand, ValueEnum};

use crate::cli::subcommands::{CourseCommands, UserCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Submit a lecture session payload (JSON file, or `-` for stdin).
    Submit(SubmitArgs),
    /// Re-apply a recorded session to eligibility state.
    Retry(RetryArgs),
    /// Retry every session whose eligibility update is still pending.
    Reconcile(ReconcileArgs),
    /// Print the edge-device snapshot of a course.
    Snapshot(SnapshotArgs),
    /// Show a recorded session with its attendance and propagation state.
    Session(SessionArgs),
    /// Show eligibility standings of a course.
    Eligibility(EligibilityArgs),
    /// Directory users.
    User {
        #[command(subcommand)]
        action: UserCommands,
    },
    /// Courses, lecturer assignment, and enrollment.
    Course {
        #[command(subcommand)]
        action: CourseCommands,
    },
    /// Print a JSON Schema.
    Schema(SchemaArgs),
}

#[derive(Clone, Debug, Args)]
pub struct SubmitArgs {
    /// Path to the payload, or `-` to read stdin.
    pub input: String,
}

#[derive(Clone, Debug, Args)]
pub struct RetryArgs {
    pub session_id: i64,
}

#[derive(Clone, Debug, Args)]
pub struct ReconcileArgs {
    /// Maximum sessions to retry (defaults to `propagation.reconcile_batch`).
    #[arg(long)]
    pub limit: Option<u32>,
}

#[derive(Clone, Debug, Args)]
pub struct SnapshotArgs {
    pub course_code: String,
}

#[derive(Clone, Debug, Args)]
pub struct SessionArgs {
    pub session_id: i64,
}

#[derive(Clone, Debug, Args)]
pub struct EligibilityArgs {
    pub course_code: String,
    /// Only this student's standing.
    #[arg(long, conflicts_with = "lecturer")]
    pub student: Option<String>,
    /// This lecturer's delivered lecture count instead of student standings.
    #[arg(long)]
    pub lecturer: Option<String>,
}

/// Types whose JSON Schema can be exported.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SchemaName {
    Submission,
    Snapshot,
    Session,
    EligibilityBatch,
    StudentEligibility,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    pub name: SchemaName,
}
