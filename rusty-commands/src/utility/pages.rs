use std::sync::Arc;

use twilight_model::gateway::payload::incoming::MessageCreate;

use crate::{CommandMeta, open_pagination, report_configuration_error};
use rusty_core::Context;
use rusty_utils::embed::build_page_embed;
use rusty_utils::pagination::{
    ActionButton, ActionOutcome, ConfigurationError, Invocation, MessagePayload, Page,
    PaginationBuilder, PaginationOptions, chunk_items, parse_one_based_page,
};

pub const META: CommandMeta = CommandMeta {
    name: "pages",
    desc: "Open a reaction-driven demo pagination.",
    category: "pagination",
    usage: "!pages [start]",
};

const ITEMS_PER_PAGE: usize = 5;
const STAR_EMOJI: &str = "⭐";

/// Demo pagination mixing embed, text, and full-message pages.
///
/// Inputs:
/// - optional start page: `!pages [start]`.
///
/// Error behavior:
/// - returns usage text on invalid page input.
/// - an out-of-range start page is reported by the session's validation.
pub async fn run(ctx: Context, msg: Box<MessageCreate>, arg1: Option<&str>) -> anyhow::Result<()> {
    let Some(start_page) = parse_one_based_page(arg1) else {
        let usage = format!("Usage: `{}` (page starts at 1)", META.usage);
        ctx.http.create_message(msg.channel_id).content(&usage).await?;
        return Ok(());
    };

    let options = PaginationOptions {
        start_page,
        ..ctx.pagination.clone()
    };

    let http = Arc::clone(&ctx.http);
    let channel_id = msg.channel_id;
    let author_id = msg.author.id;
    let star = ActionButton::new(STAR_EMOJI, move || {
        let http = Arc::clone(&http);
        async move {
            http.create_message(channel_id)
                .content(&format!("{STAR_EMOJI} <@{author_id}> starred this pagination."))
                .await?;
            Ok(ActionOutcome::Unchanged)
        }
    });

    let builder = match demo_builder(Invocation::from_message(&msg), options, star) {
        Ok(builder) => builder,
        Err(DemoError::Configuration(source)) => {
            return report_configuration_error(&ctx, &msg, &source).await;
        }
        Err(DemoError::Embed(source)) => return Err(source),
    };

    open_pagination(&ctx, &msg, builder).await
}

enum DemoError {
    Configuration(ConfigurationError),
    Embed(anyhow::Error),
}

fn demo_builder(
    invocation: Invocation,
    options: PaginationOptions,
    star: ActionButton,
) -> Result<PaginationBuilder, DemoError> {
    let pages = demo_pages().map_err(DemoError::Embed)?;

    PaginationBuilder::new(invocation, options)
        .pages(pages)
        .action_button(star)
        .map_err(DemoError::Configuration)
}

fn demo_pages() -> anyhow::Result<Vec<Page>> {
    let items: Vec<String> = (1..=15).map(|index| format!("Item #{index}")).collect();

    let mut pages = Vec::new();
    for (index, chunk) in chunk_items(&items, ITEMS_PER_PAGE).into_iter().enumerate() {
        let title = format!("Demo Items ({})", index + 1);
        pages.push(Page::Embed(build_page_embed(&title, chunk.join("\n"))?));
    }

    pages.push(Page::Text(
        "Plain text page. Navigation controls work the same here.".to_owned(),
    ));
    pages.push(Page::Message(MessagePayload {
        content: Some("Last page, sent exactly as built.".to_owned()),
        embeds: vec![build_page_embed(
            "The End",
            format!("React with {STAR_EMOJI} to star this pagination."),
        )?],
    }));

    Ok(pages)
}
