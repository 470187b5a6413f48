use anyhow::bail;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::EligibilityArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `rollcall eligibility`.
pub async fn handle(
    args: &EligibilityArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let ledger = ctx.ledger();

    if let Some(lecturer_id) = &args.lecturer {
        let Some(availability) = ledger
            .lecturer_availability(&args.course_code, lecturer_id)
            .await?
        else {
            bail!("no lectures recorded for {lecturer_id} in {}", args.course_code);
        };
        return output(&availability, flags.format);
    }

    if let Some(student_id) = &args.student {
        let Some(standing) = ledger
            .student_eligibility(&args.course_code, student_id)
            .await?
        else {
            bail!("no attendance recorded for {student_id} in {}", args.course_code);
        };
        return output(&standing, flags.format);
    }

    let standings = ledger.course_eligibility(&args.course_code).await?;
    output(&standings, flags.format)
}
