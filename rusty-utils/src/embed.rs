use twilight_model::channel::message::embed::Embed;
use twilight_util::builder::embed::{EmbedBuilder, EmbedFooterBuilder};

/// Default embed color used across the bot UI.
pub const DEFAULT_EMBED_COLOR: u32 = 0x90_54_30;

/// Build a standard content embed with consistent styling.
pub fn build_page_embed(title: &str, description: impl Into<String>) -> anyhow::Result<Embed> {
    build_page_embed_with_footer_note(title, description, None)
}

/// Build a standard content embed with an optional footer note.
pub fn build_page_embed_with_footer_note(
    title: &str,
    description: impl Into<String>,
    footer_note: Option<&str>,
) -> anyhow::Result<Embed> {
    let builder = EmbedBuilder::new()
        .title(title)
        .color(DEFAULT_EMBED_COLOR)
        .description(description);

    let embed = match footer_note {
        Some(note) if !note.is_empty() => {
            let footer = EmbedFooterBuilder::new(note).build();
            builder.footer(footer).validate()?.build()
        }
        _ => builder.validate()?.build(),
    };

    Ok(embed)
}

/// Build an embed carrying nothing but a footer line.
///
/// Text pages use this to show the page label under their content.
pub fn build_footer_embed(text: impl Into<String>) -> Embed {
    EmbedBuilder::new()
        .color(DEFAULT_EMBED_COLOR)
        .footer(EmbedFooterBuilder::new(text).build())
        .build()
}
