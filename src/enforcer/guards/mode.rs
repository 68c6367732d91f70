//! Mode guard: undo unwanted promotions, restore demoted protected users,
//! and lift bans set by non-operators.

use slirc_proto::{ChannelMode, Hostmask, ModeDelta, irc_eq};
use tracing::debug;

use super::GuardContext;
use crate::enforcer::{Action, Responder};
use crate::error::EnforcerError;
use crate::policy::Capability;

type Ctor = fn(String, String) -> Action;

/// How to grant, revoke and block one privilege mode.
struct Privilege {
    anti: Capability,
    grant: Ctor,
    revoke: Ctor,
}

fn privilege(mode: &ChannelMode) -> Option<Privilege> {
    let privilege = match mode {
        ChannelMode::Oper => Privilege {
            anti: Capability::AntiOp,
            grant: Action::Op,
            revoke: Action::Deop,
        },
        ChannelMode::Halfop => Privilege {
            anti: Capability::AntiHalfop,
            grant: Action::Halfop,
            revoke: Action::Dehalfop,
        },
        ChannelMode::Voice => Privilege {
            anti: Capability::AntiVoice,
            grant: Action::Voice,
            revoke: Action::Devoice,
        },
        _ => return None,
    };
    Some(privilege)
}

/// A promotion is undone when the channel itself carries the anti-capability,
/// or when the target does. Targets missing from the roster are judged by nick.
fn blocks_promotion(ctx: &GuardContext<'_>, channel: &str, target: &str, anti: Capability) -> bool {
    if ctx.policy.channel_has(channel, anti) {
        return true;
    }
    let hostmask = ctx
        .resolve(target)
        .unwrap_or_else(|| Hostmask::new(target, "", ""));
    ctx.policy.has_capability(&hostmask, channel, anti)
}

/// Walk the deltas in order. A privilege delta without a target aborts the
/// walk; whatever was pushed before it stays in `out`.
pub fn check(
    ctx: &GuardContext<'_>,
    channel: &str,
    actor: &Hostmask,
    deltas: &[ModeDelta],
    out: &mut Responder,
) -> Result<(), EnforcerError> {
    if ctx.is_bot(&actor.nick) || ctx.policy.has_capability(actor, channel, Capability::Op) {
        return Ok(());
    }

    for delta in deltas {
        if delta.arg().is_some_and(|arg| irc_eq(arg, &actor.nick)) {
            continue;
        }

        if delta.mode == ChannelMode::Ban {
            // A bare +b is a ban list query.
            if let (true, Some(mask)) = (delta.adding, delta.arg()) {
                out.push(Action::Unban(channel.to_string(), mask.to_string()));
                out.retaliate(channel, actor);
            }
            continue;
        }

        let Some(privilege) = privilege(&delta.mode) else {
            continue;
        };
        let Some(target) = delta.arg() else {
            return Err(EnforcerError::malformed(format!(
                "{}{} without a target",
                delta.sign(),
                delta.mode
            )));
        };

        if delta.adding {
            if ctx.is_bot(target) {
                continue;
            }
            if blocks_promotion(ctx, channel, target, privilege.anti) {
                out.push((privilege.revoke)(channel.to_string(), target.to_string()));
            }
        } else {
            let Some(hostmask) = ctx.resolve(target) else {
                debug!(nick = %target, "Demoted nick not in roster, treating as unprotected");
                continue;
            };
            if ctx.policy.is_protected(&hostmask, channel) {
                out.push((privilege.grant)(channel.to_string(), target.to_string()));
                out.retaliate(channel, actor);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enforcer::guards::fixture::{BOT, Fixture, hostmask};
    use crate::policy::StaticCapabilityStore;

    fn fixture() -> Fixture {
        Fixture::new(
            StaticCapabilityStore::new()
                .with_user("vip", &["vip!*@*"], &["#rust,protected"])
                .with_user("boss", &["boss!*@*"], &["#rust,op"])
                .with_user("muted", &["muted!*@*"], &["#rust,-voice", "#rust,-op"])
                .with_user("hushed", &["hushed!*@*"], &["#rust,-halfop"]),
        )
        .with_present(&["vip!v@h", "boss!b@h", "muted!m@h", "hushed!x@h", "plain!p@h"])
    }

    fn run(
        fx: &Fixture,
        revenge: bool,
        who: &str,
        modes: &[&str],
    ) -> Result<Vec<Action>, EnforcerError> {
        let deltas = ModeDelta::parse(modes).unwrap();
        let mut out = Responder::new(revenge);
        check(&fx.ctx(), "#rust", &hostmask(who), &deltas, &mut out)?;
        Ok(out.into_actions())
    }

    #[test]
    fn test_deop_of_protected_user() {
        let fx = fixture();
        assert_eq!(
            run(&fx, false, "rogue!r@h", &["-o", "vip"]).unwrap(),
            vec![
                Action::Op("#rust".into(), "vip".into()),
                Action::Deop("#rust".into(), "rogue".into()),
            ]
        );
        assert_eq!(
            run(&fx, true, "rogue!r@10.0.0.9", &["-o", "boss"]).unwrap(),
            vec![
                Action::Op("#rust".into(), "boss".into()),
                Action::Ban("#rust".into(), "*!*@10.0.0.*".into()),
                Action::Kick("#rust".into(), "rogue".into(), None),
            ]
        );
    }

    #[test]
    fn test_devoice_of_plain_user_is_ignored() {
        let fx = fixture();
        assert!(run(&fx, true, "rogue!r@h", &["-v", "plain"]).unwrap().is_empty());
        assert!(run(&fx, true, "rogue!r@h", &["-h", "ghost"]).unwrap().is_empty());
    }

    #[test]
    fn test_promotion_reverted_only_with_anti_capability() {
        let fx = fixture();
        assert_eq!(
            run(&fx, false, "rogue!r@h", &["+vvo", "muted", "plain", "muted"]).unwrap(),
            vec![
                Action::Devoice("#rust".into(), "muted".into()),
                Action::Deop("#rust".into(), "muted".into()),
            ]
        );
        assert!(run(&fx, false, "rogue!r@h", &["+h", "muted"]).unwrap().is_empty());
    }

    #[test]
    fn test_halfop_and_voice_restored_for_protected_user() {
        let fx = fixture();
        assert_eq!(
            run(&fx, false, "rogue!r@h", &["-h", "vip"]).unwrap(),
            vec![
                Action::Halfop("#rust".into(), "vip".into()),
                Action::Deop("#rust".into(), "rogue".into()),
            ]
        );
        assert_eq!(
            run(&fx, true, "rogue!r@10.0.0.9", &["-h", "vip"]).unwrap(),
            vec![
                Action::Halfop("#rust".into(), "vip".into()),
                Action::Ban("#rust".into(), "*!*@10.0.0.*".into()),
                Action::Kick("#rust".into(), "rogue".into(), None),
            ]
        );
        assert_eq!(
            run(&fx, false, "rogue!r@h", &["-v", "vip"]).unwrap(),
            vec![
                Action::Voice("#rust".into(), "vip".into()),
                Action::Deop("#rust".into(), "rogue".into()),
            ]
        );
        assert_eq!(
            run(&fx, true, "rogue!r@10.0.0.9", &["-v", "vip"]).unwrap(),
            vec![
                Action::Voice("#rust".into(), "vip".into()),
                Action::Ban("#rust".into(), "*!*@10.0.0.*".into()),
                Action::Kick("#rust".into(), "rogue".into(), None),
            ]
        );
    }

    #[test]
    fn test_halfop_reverted_for_anti_halfop() {
        let fx = fixture();
        for revenge in [false, true] {
            assert_eq!(
                run(&fx, revenge, "rogue!r@h", &["+h", "hushed"]).unwrap(),
                vec![Action::Dehalfop("#rust".into(), "hushed".into())]
            );
        }
        assert!(run(&fx, false, "rogue!r@h", &["+v", "hushed"]).unwrap().is_empty());
    }

    #[test]
    fn test_channel_anti_capability_blocks_any_target() {
        let fx = Fixture::new(StaticCapabilityStore::new().with_channel_capability("#Rust", "-op"));
        assert_eq!(
            run(&fx, false, "rogue!r@h", &["+o", "stranger"]).unwrap(),
            vec![Action::Deop("#rust".into(), "stranger".into())]
        );
        assert!(run(&fx, false, "rogue!r@h", &["+v", "stranger"]).unwrap().is_empty());
    }

    #[test]
    fn test_unresolved_target_judged_by_nick() {
        let fx = Fixture::new(
            StaticCapabilityStore::new().with_user("everyone", &["*!*@*"], &["#rust,-op"]),
        );
        assert_eq!(
            run(&fx, false, "rogue!r@h", &["+o", "stranger"]).unwrap(),
            vec![Action::Deop("#rust".into(), "stranger".into())]
        );
    }

    #[test]
    fn test_ban_by_non_operator() {
        let fx = fixture();
        assert_eq!(
            run(&fx, false, "rogue!r@h", &["+b", "*!*@victim"]).unwrap(),
            vec![
                Action::Unban("#rust".into(), "*!*@victim".into()),
                Action::Deop("#rust".into(), "rogue".into()),
            ]
        );
        assert!(run(&fx, false, "rogue!r@h", &["+b"]).unwrap().is_empty());
        assert!(run(&fx, false, "rogue!r@h", &["-b", "*!*@x"]).unwrap().is_empty());
    }

    #[test]
    fn test_exemptions() {
        let fx = fixture();
        let bot = format!("{}!bot@h", BOT);
        assert!(run(&fx, true, &bot, &["-o", "vip"]).unwrap().is_empty());
        assert!(run(&fx, true, "boss!b@h", &["-o+b", "vip", "*!*@x"]).unwrap().is_empty());
        assert!(run(&fx, true, "vip!v@h", &["-o", "VIP"]).unwrap().is_empty());
        assert!(run(&fx, true, "rogue!r@h", &["+o", BOT]).unwrap().is_empty());
    }

    #[test]
    fn test_missing_target_keeps_earlier_actions() {
        let fx = fixture();
        let deltas = vec![
            ModeDelta::minus(ChannelMode::Oper, Some("vip")),
            ModeDelta::minus(ChannelMode::Voice, None),
        ];
        let mut out = Responder::new(false);
        let err = check(&fx.ctx(), "#rust", &hostmask("rogue!r@h"), &deltas, &mut out)
            .unwrap_err();
        assert!(matches!(err, EnforcerError::MalformedEvent { .. }));
        assert_eq!(out.actions().len(), 2);
    }
}
