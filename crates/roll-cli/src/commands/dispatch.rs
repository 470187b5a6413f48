use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Submit(args) => commands::submit::handle(&args, ctx, flags).await,
        Commands::Retry(args) => commands::retry::handle(&args, ctx, flags).await,
        Commands::Reconcile(args) => commands::reconcile::handle(&args, ctx, flags).await,
        Commands::Snapshot(args) => commands::snapshot::handle(&args, ctx, flags).await,
        Commands::Session(args) => commands::session::handle(&args, ctx, flags).await,
        Commands::Eligibility(args) => commands::eligibility::handle(&args, ctx, flags).await,
        Commands::User { action } => commands::user::handle(&action, ctx, flags).await,
        Commands::Course { action } => commands::course::handle(&action, ctx, flags).await,
        Commands::Schema(_) => unreachable!("schema is pre-dispatched in main"),
    }
}
