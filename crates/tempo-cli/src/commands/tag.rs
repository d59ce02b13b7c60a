use anyhow::Result;
use owo_colors::OwoColorize;
use tempo_core::repository::Repository;

use crate::cli::{TagCommand, TagSubcommand};
use crate::views::table::display_tags;

pub async fn tag_command(repo: &impl Repository, command: TagCommand) -> Result<()> {
    match command.command {
        TagSubcommand::Add(cmd) => {
            let tag = repo.add_tag(cmd.name, cmd.color).await?;
            println!("{} Created tag: {}", "✓".green().bold(), tag.name.bold());
        }
        TagSubcommand::List => {
            let tags = repo.find_tags().await?;
            display_tags(&tags);
        }
        TagSubcommand::Delete(cmd) => {
            repo.delete_tag(&cmd.name).await?;
            println!("Deleted tag '{}'. Tasks using it were detached.", cmd.name);
        }
    }

    Ok(())
}
