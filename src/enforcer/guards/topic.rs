//! Topic guard: revert unauthorized topic changes and enforce the prefix.

use slirc_proto::Hostmask;

use super::GuardContext;
use crate::enforcer::{Action, Responder};
use crate::policy::Capability;
use crate::state::ChannelStateStore;

/// Hydrate the cache from the post-join handshake. Never produces actions.
pub fn sync(channels: &mut ChannelStateStore, channel: &str, topic: &str) {
    channels.sync_topic(channel, topic);
}

pub fn check(
    ctx: &GuardContext<'_>,
    channels: &mut ChannelStateStore,
    channel: &str,
    actor: &Hostmask,
    topic: &str,
    out: &mut Responder,
) {
    channels.observe(channel);

    // The bot is exempt here but not from the prefix check below.
    let authorized = ctx.is_bot(&actor.nick)
        || ctx
            .policy
            .has_any(actor, channel, &[Capability::Op, Capability::Topic]);
    if !authorized {
        out.push(Action::Topic(
            channel.to_string(),
            channels.get_topic(channel).to_string(),
        ));
        out.kick_if_revenge(
            channel,
            &actor.nick,
            format!(
                "You don't have the {} capability.",
                Capability::Topic.scoped(channel)
            ),
        );
        return;
    }

    let prefix = channels.topic_prefix(channel).to_string();
    if !topic.starts_with(&prefix) {
        out.push(Action::Topic(channel.to_string(), format!("{}{}", prefix, topic)));
        out.kick_if_revenge(
            channel,
            &actor.nick,
            format!("Topics must begin with the prefix \"{}\"", prefix),
        );
        return;
    }

    channels.accept_topic(channel, topic);
}
