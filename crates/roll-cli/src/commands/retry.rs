use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::RetryArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct RetryResponse {
    session_id: i64,
    applied: bool,
}

/// Handle `rollcall retry`.
pub async fn handle(args: &RetryArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.service.retry_propagation(args.session_id).await?;
    output(
        &RetryResponse {
            session_id: args.session_id,
            applied: true,
        },
        flags.format,
    )
}
