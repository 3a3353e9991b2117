//! Message and reaction requests for paginated messages over the Discord HTTP API.

use async_trait::async_trait;
use twilight_http::{Client, request::channel::reaction::RequestReactionType};
use twilight_model::id::{
    Id,
    marker::{ChannelMarker, UserMarker},
};

use super::error::PlatformError;
use super::platform::{MessageApi, MessageHandle};
use super::view::MessagePayload;

/// Convert a control symbol into a reaction request.
///
/// `name:id` addresses a custom emoji, anything else is sent as unicode.
pub fn request_reaction(symbol: &str) -> RequestReactionType<'_> {
    if let Some((name, raw_id)) = symbol.rsplit_once(':')
        && let Some(id) = raw_id.parse::<u64>().ok().and_then(Id::new_checked)
    {
        return RequestReactionType::Custom {
            id,
            name: Some(name),
        };
    }

    RequestReactionType::Unicode { name: symbol }
}

#[async_trait]
impl MessageApi for Client {
    async fn send(
        &self,
        channel_id: Id<ChannelMarker>,
        payload: &MessagePayload,
    ) -> Result<MessageHandle, PlatformError> {
        let mut request = self.create_message(channel_id).embeds(&payload.embeds);
        if let Some(content) = payload.content.as_deref() {
            request = request.content(content);
        }

        let created = request.await?.model().await?;

        Ok(MessageHandle {
            channel_id: created.channel_id,
            message_id: created.id,
        })
    }

    async fn edit(
        &self,
        message: MessageHandle,
        payload: &MessagePayload,
    ) -> Result<(), PlatformError> {
        self.update_message(message.channel_id, message.message_id)
            .content(payload.content.as_deref())
            .embeds(Some(payload.embeds.as_slice()))
            .await?;

        Ok(())
    }

    async fn delete(&self, message: MessageHandle) -> Result<(), PlatformError> {
        self.delete_message(message.channel_id, message.message_id)
            .await?;

        Ok(())
    }

    async fn add_reaction(&self, message: MessageHandle, emoji: &str) -> Result<(), PlatformError> {
        let reaction = request_reaction(emoji);
        self.create_reaction(message.channel_id, message.message_id, &reaction)
            .await?;

        Ok(())
    }

    async fn remove_reaction(
        &self,
        message: MessageHandle,
        emoji: &str,
        user_id: Id<UserMarker>,
    ) -> Result<(), PlatformError> {
        let reaction = request_reaction(emoji);
        self.delete_reaction(message.channel_id, message.message_id, &reaction, user_id)
            .await?;

        Ok(())
    }

    async fn remove_all_reactions(&self, message: MessageHandle) -> Result<(), PlatformError> {
        self.delete_all_reactions(message.channel_id, message.message_id)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unicode_symbols_stay_unicode() {
        assert!(matches!(
            request_reaction("➡"),
            RequestReactionType::Unicode { name: "➡" }
        ));
    }

    #[test]
    fn name_and_id_address_custom_emoji() {
        let RequestReactionType::Custom { id, name } = request_reaction("pepe:42") else {
            panic!("expected a custom emoji");
        };
        assert_eq!(id.get(), 42);
        assert_eq!(name, Some("pepe"));
    }

    #[test]
    fn invalid_ids_fall_back_to_unicode() {
        assert!(matches!(
            request_reaction("a:b"),
            RequestReactionType::Unicode { name: "a:b" }
        ));
        assert!(matches!(
            request_reaction("zero:0"),
            RequestReactionType::Unicode { .. }
        ));
    }
}
