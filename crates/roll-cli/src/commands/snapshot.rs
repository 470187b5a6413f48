use crate::cli::GlobalFlags;
use crate::cli::root_commands::SnapshotArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `rollcall snapshot`.
pub async fn handle(args: &SnapshotArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let snapshot = ctx.service.get_attendance_snapshot(&args.course_code).await?;
    output(&snapshot, flags.format)
}
