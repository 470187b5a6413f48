use roll_core::entities::Course;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::CourseCommands;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct AssignmentResponse<'a> {
    course_code: &'a str,
    lecturer_id: &'a str,
    active: bool,
}

#[derive(Debug, Serialize)]
struct EnrollmentResponse<'a> {
    course_code: &'a str,
    enrolled: &'a [String],
}

/// Handle `rollcall course`.
pub async fn handle(
    action: &CourseCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let store = ctx.service.store();
    match action {
        CourseCommands::Add { code, title } => {
            let course = Course {
                code: code.clone(),
                title: title.clone(),
            };
            store.register_course(&course).await?;
            output(&course, flags.format)
        }
        CourseCommands::AssignLecturer {
            course_code,
            lecturer_id,
        } => {
            store.assign_lecturer(course_code, lecturer_id).await?;
            output(
                &AssignmentResponse {
                    course_code,
                    lecturer_id,
                    active: true,
                },
                flags.format,
            )
        }
        CourseCommands::Enroll {
            course_code,
            student_ids,
        } => {
            for student_id in student_ids {
                store.enroll_student(course_code, student_id).await?;
            }
            output(
                &EnrollmentResponse {
                    course_code,
                    enrolled: student_ids,
                },
                flags.format,
            )
        }
        CourseCommands::Sessions { course_code } => {
            let sessions = store.list_lecture_sessions(course_code).await?;
            output(&sessions, flags.format)
        }
    }
}
