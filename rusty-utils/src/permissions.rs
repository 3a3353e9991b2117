use async_trait::async_trait;
use twilight_http::Client;
use twilight_model::{
    channel::{
        ChannelType,
        permission_overwrite::{PermissionOverwrite, PermissionOverwriteType},
    },
    guild::Permissions,
    id::{
        Id,
        marker::{ChannelMarker, GuildMarker, RoleMarker, UserMarker},
    },
};

use crate::pagination::{PermissionApi, PlatformError};

/// Combine the @everyone role with the member's roles.
///
/// `ADMINISTRATOR` on any role grants every permission.
pub fn guild_permissions(
    guild_id: Id<GuildMarker>,
    member_roles: &[Id<RoleMarker>],
    roles: impl IntoIterator<Item = (Id<RoleMarker>, Permissions)>,
) -> Permissions {
    let mut resolved = Permissions::empty();

    for (role_id, permissions) in roles {
        if role_id == guild_id.cast() || member_roles.contains(&role_id) {
            resolved |= permissions;
        }
    }

    if resolved.contains(Permissions::ADMINISTRATOR) {
        return Permissions::all();
    }

    resolved
}

/// Apply channel overwrites in Discord's order: @everyone, roles, then the member.
pub fn apply_channel_overwrites(
    base: Permissions,
    guild_id: Id<GuildMarker>,
    user_id: Id<UserMarker>,
    member_roles: &[Id<RoleMarker>],
    overwrites: &[PermissionOverwrite],
) -> Permissions {
    if base.contains(Permissions::ADMINISTRATOR) {
        return base;
    }

    let mut resolved = base;

    if let Some(everyone) = overwrites.iter().find(|overwrite| {
        overwrite.kind == PermissionOverwriteType::Role && overwrite.id == guild_id.cast()
    }) {
        resolved.remove(everyone.deny);
        resolved.insert(everyone.allow);
    }

    let mut role_allow = Permissions::empty();
    let mut role_deny = Permissions::empty();
    for overwrite in overwrites.iter().filter(|overwrite| {
        overwrite.kind == PermissionOverwriteType::Role
            && member_roles.contains(&overwrite.id.cast())
    }) {
        role_allow |= overwrite.allow;
        role_deny |= overwrite.deny;
    }
    resolved.remove(role_deny);
    resolved.insert(role_allow);

    if let Some(member) = overwrites.iter().find(|overwrite| {
        overwrite.kind == PermissionOverwriteType::Member && overwrite.id == user_id.cast()
    }) {
        resolved.remove(member.deny);
        resolved.insert(member.allow);
    }

    resolved
}

/// Channel whose overwrites apply instead of the channel's own.
///
/// Threads inherit the overwrites of their parent.
pub fn overwrite_source(
    kind: ChannelType,
    parent_id: Option<Id<ChannelMarker>>,
) -> Option<Id<ChannelMarker>> {
    let is_thread = matches!(
        kind,
        ChannelType::AnnouncementThread | ChannelType::PublicThread | ChannelType::PrivateThread
    );

    parent_id.filter(|_| is_thread)
}

/// Resolve a member's effective permissions in a guild channel.
pub async fn resolve_channel_permissions(
    http: &Client,
    guild_id: Id<GuildMarker>,
    channel_id: Id<ChannelMarker>,
    user_id: Id<UserMarker>,
) -> Result<Permissions, PlatformError> {
    let member = http.guild_member(guild_id, user_id).await?.model().await?;
    let roles = http.roles(guild_id).await?.model().await?;

    let base = guild_permissions(
        guild_id,
        &member.roles,
        roles.iter().map(|role| (role.id, role.permissions)),
    );
    if base.contains(Permissions::ADMINISTRATOR) {
        return Ok(base);
    }

    let channel = http.channel(channel_id).await?.model().await?;
    let overwrites = match overwrite_source(channel.kind, channel.parent_id) {
        Some(parent_id) => {
            http.channel(parent_id)
                .await?
                .model()
                .await?
                .permission_overwrites
        }
        None => channel.permission_overwrites,
    }
    .unwrap_or_default();

    Ok(apply_channel_overwrites(
        base,
        guild_id,
        user_id,
        &member.roles,
        &overwrites,
    ))
}

#[async_trait]
impl PermissionApi for Client {
    async fn has_permission(
        &self,
        user_id: Id<UserMarker>,
        guild_id: Id<GuildMarker>,
        channel_id: Id<ChannelMarker>,
        required: Permissions,
    ) -> Result<bool, PlatformError> {
        let permissions = resolve_channel_permissions(self, guild_id, channel_id, user_id).await?;
        Ok(permissions.contains(required))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GUILD: u64 = 100;
    const USER: u64 = 200;
    const MOD_ROLE: u64 = 300;

    fn overwrite(
        id: u64,
        kind: PermissionOverwriteType,
        allow: Permissions,
        deny: Permissions,
    ) -> PermissionOverwrite {
        PermissionOverwrite {
            allow,
            deny,
            id: Id::new(id),
            kind,
        }
    }

    #[test]
    fn member_roles_and_everyone_are_combined() {
        let roles = [
            (Id::new(GUILD), Permissions::SEND_MESSAGES),
            (Id::new(MOD_ROLE), Permissions::MANAGE_MESSAGES),
            (Id::new(999), Permissions::BAN_MEMBERS),
        ];

        let resolved = guild_permissions(Id::new(GUILD), &[Id::new(MOD_ROLE)], roles);

        assert!(resolved.contains(Permissions::SEND_MESSAGES | Permissions::MANAGE_MESSAGES));
        assert!(!resolved.contains(Permissions::BAN_MEMBERS));
    }

    #[test]
    fn administrator_grants_everything() {
        let roles = [(Id::new(MOD_ROLE), Permissions::ADMINISTRATOR)];
        let resolved = guild_permissions(Id::new(GUILD), &[Id::new(MOD_ROLE)], roles);
        assert_eq!(resolved, Permissions::all());
    }

    #[test]
    fn role_deny_is_overridden_by_member_allow() {
        let overwrites = [
            overwrite(
                MOD_ROLE,
                PermissionOverwriteType::Role,
                Permissions::empty(),
                Permissions::MANAGE_MESSAGES,
            ),
            overwrite(
                USER,
                PermissionOverwriteType::Member,
                Permissions::MANAGE_MESSAGES,
                Permissions::empty(),
            ),
        ];

        let resolved = apply_channel_overwrites(
            Permissions::MANAGE_MESSAGES,
            Id::new(GUILD),
            Id::new(USER),
            &[Id::new(MOD_ROLE)],
            &overwrites,
        );

        assert!(resolved.contains(Permissions::MANAGE_MESSAGES));
    }

    #[test]
    fn threads_use_parent_overwrites() {
        let parent = Some(Id::new(400));

        assert_eq!(overwrite_source(ChannelType::PublicThread, parent), parent);
        assert_eq!(overwrite_source(ChannelType::PrivateThread, parent), parent);
        assert_eq!(overwrite_source(ChannelType::AnnouncementThread, parent), parent);
    }

    #[test]
    fn regular_channels_use_their_own_overwrites() {
        // Text channels under a category still carry their own overwrites.
        assert_eq!(overwrite_source(ChannelType::GuildText, Some(Id::new(400))), None);
        assert_eq!(overwrite_source(ChannelType::PublicThread, None), None);
    }

    #[test]
    fn everyone_deny_removes_guild_permission() {
        let overwrites = [overwrite(
            GUILD,
            PermissionOverwriteType::Role,
            Permissions::empty(),
            Permissions::MANAGE_MESSAGES,
        )];

        let resolved = apply_channel_overwrites(
            Permissions::MANAGE_MESSAGES | Permissions::SEND_MESSAGES,
            Id::new(GUILD),
            Id::new(USER),
            &[],
            &overwrites,
        );

        assert!(!resolved.contains(Permissions::MANAGE_MESSAGES));
        assert!(resolved.contains(Permissions::SEND_MESSAGES));
    }
}
