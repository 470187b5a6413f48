use roll_core::entities::User;
use roll_core::enums::UserRole;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::UserCommands;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

/// Handle `rollcall user`.
pub async fn handle(action: &UserCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let store = ctx.service.store();
    match action {
        UserCommands::Add {
            unique_id,
            card_uid,
            name,
            role,
        } => {
            let user = User {
                unique_id: unique_id.clone(),
                card_uid: card_uid.clone(),
                full_name: name.clone(),
                role: parse_enum::<UserRole>(role, "role")?,
            };
            store.register_user(&user).await?;
            output(&user, flags.format)
        }
        UserCommands::Get { unique_id } => {
            let user = store.get_user(unique_id).await?;
            output(&user, flags.format)
        }
    }
}
