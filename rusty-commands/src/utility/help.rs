use twilight_model::{
    channel::message::embed::Embed, gateway::payload::incoming::MessageCreate,
};

use crate::utility::embeds::{
    command_help_description, no_commands_message, page_out_of_range_message,
    unknown_category_message,
};
use crate::{COMMANDS, CommandMeta, open_pagination};
use rusty_core::Context;
use rusty_utils::embed::build_page_embed_with_footer_note;
use rusty_utils::pagination::{Invocation, PaginationBuilder, PaginationOptions};

pub const META: CommandMeta = CommandMeta {
    name: "help",
    desc: "Lists out all available commands, one page per command.",
    category: "utility",
    usage: "!help [page|category]",
};

/// Render the command catalog, optionally filtered by category or opened at a page.
pub async fn run(ctx: Context, msg: Box<MessageCreate>, arg1: Option<&str>) -> anyhow::Result<()> {
    let http = &ctx.http;
    let parsed_page = arg1.and_then(|raw| raw.parse::<usize>().ok().filter(|page| *page >= 1));
    let category = match (arg1, parsed_page) {
        (Some(raw), None) => Some(raw),
        _ => None,
    };

    let mut categories: Vec<&str> = COMMANDS.iter().map(|c| c.category).collect();
    categories.sort_unstable();
    categories.dedup();

    if let Some(wanted_category) = category
        && !categories.contains(&wanted_category)
    {
        let out = unknown_category_message(wanted_category, &categories);
        http.create_message(msg.channel_id).content(&out).await?;
        return Ok(());
    }

    let commands = sorted_commands(category);
    if commands.is_empty() {
        let out = no_commands_message(category);
        http.create_message(msg.channel_id).content(&out).await?;
        return Ok(());
    }

    let requested_page = parsed_page.unwrap_or(1);
    if requested_page > commands.len() {
        let out = page_out_of_range_message(requested_page, commands.len());
        http.create_message(msg.channel_id).content(&out).await?;
        return Ok(());
    }

    let pages = help_pages(&commands)?;

    // A single page has nothing to navigate.
    if pages.len() == 1 {
        http.create_message(msg.channel_id).embeds(&pages).await?;
        return Ok(());
    }

    let options = PaginationOptions {
        start_page: requested_page,
        ..ctx.pagination.clone()
    };
    let builder = PaginationBuilder::new(Invocation::from_message(&msg), options).pages(pages);

    open_pagination(&ctx, &msg, builder).await
}

fn help_pages(commands: &[&CommandMeta]) -> anyhow::Result<Vec<Embed>> {
    commands
        .iter()
        .map(|command| {
            let title = format!("{}{}", rusty_utils::COMMAND_PREFIX, command.name);
            let note = format!("Category: {}", command.category);
            build_page_embed_with_footer_note(
                &title,
                command_help_description(command),
                Some(note.as_str()),
            )
        })
        .collect()
}

fn sorted_commands(category: Option<&str>) -> Vec<&'static CommandMeta> {
    let mut filtered: Vec<&'static CommandMeta> = COMMANDS
        .iter()
        .filter(|cmd| match category {
            Some(wanted) => cmd.category == wanted,
            None => true,
        })
        .collect();

    filtered.sort_unstable_by(|left, right| {
        left.category
            .cmp(right.category)
            .then_with(|| left.name.cmp(right.name))
    });

    filtered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_are_sorted_by_category_then_name() {
        let names: Vec<_> = sorted_commands(None).iter().map(|c| c.name).collect();
        assert_eq!(names, ["pages", "help"]);
    }

    #[test]
    fn category_filter_is_exact() {
        let names: Vec<_> = sorted_commands(Some("utility"))
            .iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, ["help"]);
        assert!(sorted_commands(Some("util")).is_empty());
    }

    #[test]
    fn one_embed_per_command() {
        let pages = help_pages(&sorted_commands(None)).unwrap();
        assert_eq!(pages.len(), COMMANDS.len());
        assert_eq!(pages[1].title.as_deref(), Some("!help"));
    }
}
