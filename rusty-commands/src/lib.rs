pub mod utility;

use tracing::debug;
use twilight_model::gateway::payload::incoming::MessageCreate;

use rusty_core::Context;
use rusty_utils::COMMAND_PREFIX;
use rusty_utils::pagination::{ConfigurationError, PaginationBuilder, PaginationError};

// Global command meta data
pub struct CommandMeta {
    pub name: &'static str,
    pub desc: &'static str,
    pub category: &'static str,
    pub usage: &'static str,
}

pub const COMMANDS: &[CommandMeta] = &[
    utility::help::META,
    utility::pages::META,
    // Add new commands here
];

pub async fn handle_message(ctx: Context, msg: Box<MessageCreate>) -> anyhow::Result<()> {
    if msg.author.bot {
        return Ok(());
    }

    let content = msg.content.trim();

    if !content.starts_with(COMMAND_PREFIX) {
        return Ok(());
    }

    let content = content.trim_start_matches(COMMAND_PREFIX).trim();
    let mut command_and_rest = content.splitn(2, char::is_whitespace);
    let cmd = command_and_rest.next().unwrap_or("").to_ascii_lowercase();
    let arg1 = command_and_rest
        .next()
        .and_then(|rest| rest.split_whitespace().next())
        .map(ToOwned::to_owned);
    let arg1 = arg1.as_deref();

    match cmd.as_str() {
        "help" => utility::help::run(ctx.clone(), msg, arg1).await?,
        "pages" => utility::pages::run(ctx.clone(), msg, arg1).await?,
        // Add new commands here
        _ => {}
    }

    Ok(())
}

/// Start a pagination session in the background.
///
/// Configuration errors are reported to the invoking channel; platform errors are
/// returned to the caller.
pub(crate) async fn open_pagination(
    ctx: &Context,
    msg: &MessageCreate,
    builder: PaginationBuilder,
) -> anyhow::Result<()> {
    match builder.start(&ctx.platform(), &ctx.reactions).await {
        Ok(_session) => Ok(()),
        Err(PaginationError::Configuration(source)) => {
            report_configuration_error(ctx, msg, &source).await
        }
        Err(source) => Err(source.into()),
    }
}

/// Tell the invoking channel why a pagination could not be opened.
pub(crate) async fn report_configuration_error(
    ctx: &Context,
    msg: &MessageCreate,
    source: &ConfigurationError,
) -> anyhow::Result<()> {
    debug!(?source, channel_id = msg.channel_id.get(), "rejected pagination");
    let out = configuration_error_reply(source);
    ctx.http.create_message(msg.channel_id).content(&out).await?;
    Ok(())
}

fn configuration_error_reply(source: &ConfigurationError) -> String {
    format!("Cannot paginate: {source}.")
}
