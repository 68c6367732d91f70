//! Join guard: kick banned users, hand out the best role a user holds.

use slirc_proto::Hostmask;

use super::GuardContext;
use crate::enforcer::{Action, Responder};
use crate::policy::Capability;

/// Role grants in precedence order.
const GRANTS: [(Capability, fn(String, String) -> Action); 3] = [
    (Capability::Op, Action::Op),
    (Capability::Halfop, Action::Halfop),
    (Capability::Voice, Action::Voice),
];

pub fn check(ctx: &GuardContext<'_>, channel: &str, actor: &Hostmask, out: &mut Responder) {
    // Bans first, so a banned user never holds a role before removal.
    if ctx.policy.is_banned(actor, channel) {
        out.ban_and_kick(channel, actor);
        return;
    }

    if let Some((_, grant)) = GRANTS
        .iter()
        .find(|(cap, _)| ctx.policy.has_capability(actor, channel, *cap))
    {
        out.push(grant(channel.to_string(), actor.nick.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enforcer::guards::fixture::{Fixture, hostmask};
    use crate::policy::StaticCapabilityStore;

    fn run(fx: &Fixture, who: &str) -> Vec<Action> {
        let mut out = Responder::new(false);
        check(&fx.ctx(), "#rust", &hostmask(who), &mut out);
        out.into_actions()
    }

    #[test]
    fn test_ban_beats_op() {
        let fx = Fixture::new(
            StaticCapabilityStore::new()
                .with_user("eve", &["eve!*@*"], &["#rust,op", "#rust,voice"])
                .with_ban("#rust", "*!*@*.evil.net"),
        );
        assert_eq!(
            run(&fx, "eve!e@box.evil.net"),
            vec![
                Action::Ban("#rust".into(), "*!*@*.evil.net".into()),
                Action::Kick("#rust".into(), "eve".into(), None),
            ]
        );
    }

    #[test]
    fn test_highest_grant_only() {
        let fx = Fixture::new(
            StaticCapabilityStore::new()
                .with_user("alice", &["alice!*@*"], &["#rust,voice", "#rust,halfop"])
                .with_user("bob", &["bob!*@*"], &["#rust,voice"]),
        );
        assert_eq!(
            run(&fx, "alice!a@h"),
            vec![Action::Halfop("#rust".into(), "alice".into())]
        );
        assert_eq!(run(&fx, "bob!b@h"), vec![Action::Voice("#rust".into(), "bob".into())]);
        assert!(run(&fx, "carol!c@h").is_empty());
    }

    #[test]
    fn test_repeat_join_is_idempotent() {
        let fx = Fixture::new(StaticCapabilityStore::new().with_user("op", &["op!*@*"], &["#rust,op"]));
        let first = run(&fx, "op!o@h");
        assert_eq!(first, vec![Action::Op("#rust".into(), "op".into())]);
        assert_eq!(run(&fx, "op!o@h"), first);
    }
}
