use clap::Subcommand;

/// Directory user commands.
#[derive(Clone, Debug, Subcommand)]
pub enum UserCommands {
    /// Register a student or lecturer.
    Add {
        /// School-issued unique id.
        unique_id: String,
        /// Identity card UID read by edge devices.
        #[arg(long)]
        card_uid: String,
        /// Full display name.
        #[arg(long)]
        name: String,
        /// student or lecturer.
        #[arg(long)]
        role: String,
    },
    /// Show a registered user.
    Get { unique_id: String },
}
