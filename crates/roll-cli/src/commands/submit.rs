use std::io::Read;

use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SubmitArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `rollcall submit`.
pub async fn handle(args: &SubmitArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let payload = read_payload(&args.input)?;

    let detail = ctx.service.submit_json(&payload).await.map_err(|error| {
        if error.is_committed() {
            anyhow::Error::new(error).context(
                "session recorded but eligibility not updated; run `rollcall retry <session-id>` instead of resubmitting",
            )
        } else {
            anyhow::Error::new(error).context("submission rejected")
        }
    })?;

    output(&detail, flags.format)
}

fn read_payload(input: &str) -> anyhow::Result<String> {
    if input == "-" {
        let mut payload = String::new();
        std::io::stdin()
            .read_to_string(&mut payload)
            .context("failed to read payload from stdin")?;
        return Ok(payload);
    }
    std::fs::read_to_string(input).with_context(|| format!("failed to read payload file {input}"))
}
