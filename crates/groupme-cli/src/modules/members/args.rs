use clap::{Args, ValueEnum};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Args)]
pub struct TargetGroupsArgs {
    #[arg(
        long = "group",
        value_name = "GROUP_ID",
        value_delimiter = ',',
        help = "Target group (repeatable); defaults to every configured group"
    )]
    pub groups: Vec<String>,
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Args)]
pub struct UsersArgs {
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Args)]
pub struct AddArgs {
    pub user_id: String,
    #[arg(long)]
    pub nickname: Option<String>,
    #[command(flatten)]
    pub target: TargetGroupsArgs,
}

#[derive(Args)]
pub struct InviteArgs {
    #[arg(long, required_unless_present = "phone", conflicts_with = "phone")]
    pub user_id: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub nickname: Option<String>,
    #[command(flatten)]
    pub target: TargetGroupsArgs,
}

#[derive(Args)]
pub struct RemoveArgs {
    pub user_id: String,
    #[arg(long, help = "Re-add to each group under this nickname after removal")]
    pub nickname: Option<String>,
    #[arg(long, help = "Only remove, even if --nickname is given")]
    pub only: bool,
    #[command(flatten)]
    pub target: TargetGroupsArgs,
}

#[derive(Args)]
pub struct RenameArgs {
    pub user_id: String,
    pub nickname: String,
    #[command(flatten)]
    pub target: TargetGroupsArgs,
}
