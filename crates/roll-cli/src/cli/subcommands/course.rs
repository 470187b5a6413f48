use clap::Subcommand;

/// Course commands.
#[derive(Clone, Debug, Subcommand)]
pub enum CourseCommands {
    /// Register a course.
    Add {
        code: String,
        #[arg(long)]
        title: String,
    },
    /// Make a lecturer the course's single active lecturer.
    AssignLecturer {
        course_code: String,
        lecturer_id: String,
    },
    /// Enroll one or more students.
    Enroll {
        course_code: String,
        #[arg(required = true)]
        student_ids: Vec<String>,
    },
    /// List the course's recorded sessions, oldest first.
    Sessions { course_code: String },
}
