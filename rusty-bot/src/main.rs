mod config;

use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use twilight_gateway::{EventTypeFlags, Intents, Shard, ShardId, StreamExt as _};
use twilight_http::Client;
use twilight_model::gateway::event::Event;

use rustls::crypto::ring::default_provider;

use rusty_commands::handle_message;
use rusty_core::Context;
use rusty_utils::pagination::{ReactionEvent, ReactionHub};

use crate::config::BotConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("failed to install rustls ring provider"))?;

    // Load the .env file
    dotenvy::dotenv().ok();
    let config = BotConfig::from_env()?;

    // Create a single shared HTTP Client
    let http = Arc::new(Client::new(config.token.clone()));
    let bot_user_id = http.current_user().await?.model().await?.id;
    let ctx = Context::new(
        Arc::clone(&http),
        ReactionHub::default(),
        bot_user_id,
        config.pagination,
    );

    // Reactions drive every open pagination, in guilds and DMs alike
    let intents = Intents::GUILDS
        | Intents::GUILD_MESSAGES
        | Intents::MESSAGE_CONTENT
        | Intents::GUILD_MESSAGE_REACTIONS
        | Intents::DIRECT_MESSAGES
        | Intents::DIRECT_MESSAGE_REACTIONS;

    // A shard is one Gateway WebSocket connection to Discord
    let mut shard = Shard::new(ShardId::new(0, 1), config.token, intents);

    info!(bot_user_id = bot_user_id.get(), "Rusty is connecting...");

    while let Some(item) = shard.next_event(EventTypeFlags::all()).await {
        let event = match item {
            Ok(event) => event,
            Err(source) => {
                error!(?source, "gateway event stream error");
                continue;
            }
        };

        match event {
            Event::Ready(_) => {
                info!("Rusty has successfully awoken!");
            }

            Event::MessageCreate(msg) => {
                let ctx = ctx.clone();
                tokio::spawn(async move {
                    if let Err(source) = handle_message(ctx, msg).await {
                        error!(?source, "command failed");
                    }
                });
            }
            Event::ReactionAdd(reaction) => {
                ctx.reactions.publish(ReactionEvent::from_gateway(&reaction));
            }
            _ => {} // Ignore unused events
        }
    }
    Ok(()) // Return Success, shutdown cleanly
}
