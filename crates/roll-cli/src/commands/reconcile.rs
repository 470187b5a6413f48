use crate::cli::GlobalFlags;
use crate::cli::root_commands::ReconcileArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `rollcall reconcile`.
pub async fn handle(
    args: &ReconcileArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let limit = args
        .limit
        .unwrap_or(ctx.config.propagation.reconcile_batch);
    let report = ctx.service.reconcile_pending(limit).await?;
    if !report.is_clean() {
        tracing::warn!(
            failed = report.failed.len(),
            "some sessions are still pending eligibility propagation"
        );
    }
    output(&report, flags.format)
}
