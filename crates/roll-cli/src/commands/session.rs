use roll_core::entities::{LectureSessionDetail, PropagationState};
use roll_db::error::DatabaseError;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SessionArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct SessionResponse {
    #[serde(flatten)]
    detail: LectureSessionDetail,
    propagation: Option<PropagationState>,
}

/// Handle `rollcall session`.
pub async fn handle(args: &SessionArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let detail = ctx.service.get_lecture_session(args.session_id).await?;
    let propagation = match ctx.service.store().get_propagation_state(args.session_id).await {
        Ok(state) => Some(state),
        Err(DatabaseError::NoResult) => None,
        Err(error) => return Err(error.into()),
    };
    output(&SessionResponse { detail, propagation }, flags.format)
}
