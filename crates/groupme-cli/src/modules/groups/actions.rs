use groupme_core::group_labels;

use crate::cli_args::*;
use crate::modules::members::print_json;
use crate::modules::system::CommandContext;

pub(crate) async fn handle_groups(
    args: GroupsArgs,
    ctx: &CommandContext<'_>,
) -> anyhow::Result<()> {
    let labels = group_labels(ctx.gateway, ctx.settings, &ctx.settings.group_ids).await?;
    match args.format {
        OutputFormat::Text => {
            let id_width = labels
                .iter()
                .map(|label| label.group_id.as_str().len())
                .max()
                .unwrap_or(0)
                .max("GROUP ID".len());
            println!("{:<id_width$}  NAME", "GROUP ID");
            for label in &labels {
                println!("{:<id_width$}  {}", label.group_id.as_str(), label.label);
            }
        }
        OutputFormat::Json => print_json(&labels)?,
    }
    Ok(())
}
