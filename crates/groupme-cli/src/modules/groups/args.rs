use clap::Args;

use crate::modules::members::args::OutputFormat;

#[derive(Args)]
pub struct GroupsArgs {
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}
