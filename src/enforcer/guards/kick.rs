//! Kick guard: invite protected users back and punish the kicker.

use slirc_proto::{Hostmask, irc_to_lower};
use std::collections::HashSet;
use tracing::debug;

use super::GuardContext;
use crate::enforcer::{Action, Responder};
use crate::error::EnforcerError;
use crate::policy::Capability;

pub fn check(
    ctx: &GuardContext<'_>,
    channel: &str,
    actor: &Hostmask,
    kicked: &[String],
    out: &mut Responder,
) -> Result<(), EnforcerError> {
    if kicked.is_empty() {
        return Err(EnforcerError::malformed("kick without a target"));
    }
    if ctx.is_bot(&actor.nick) || ctx.policy.has_capability(actor, channel, Capability::Op) {
        return Ok(());
    }

    let mut any_protected = false;
    let mut seen = HashSet::new();
    for nick in kicked {
        if !seen.insert(irc_to_lower(nick)) {
            continue;
        }
        let Some(target) = ctx.resolve(nick) else {
            debug!(nick = %nick, "Kicked nick not in roster, treating as unprotected");
            continue;
        };
        if ctx.policy.is_protected(&target, channel) {
            out.push(Action::Invite(channel.to_string(), nick.clone()));
            any_protected = true;
        }
    }

    if any_protected {
        out.retaliate(channel, actor);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enforcer::guards::fixture::{Fixture, hostmask};
    use crate::policy::StaticCapabilityStore;

    fn fixture() -> Fixture {
        Fixture::new(
            StaticCapabilityStore::new()
                .with_user("vip", &["vip!*@*"], &["#rust,protected"])
                .with_user("boss", &["boss!*@*"], &["#rust,op"]),
        )
        .with_present(&["vip!v@h", "boss!b@h", "nobody!n@h"])
    }

    fn run(
        fx: &Fixture,
        revenge: bool,
        who: &str,
        kicked: &[&str],
    ) -> Result<Vec<Action>, EnforcerError> {
        let mut out = Responder::new(revenge);
        let kicked: Vec<String> = kicked.iter().map(|s| s.to_string()).collect();
        check(&fx.ctx(), "#rust", &hostmask(who), &kicked, &mut out)?;
        Ok(out.into_actions())
    }

    #[test]
    fn test_protected_kick_is_undone_once() {
        let fx = fixture();
        let actions = run(&fx, false, "rogue!r@h", &["vip", "nobody", "boss"]).unwrap();
        assert_eq!(
            actions,
            vec![
                Action::Invite("#rust".into(), "vip".into()),
                Action::Invite("#rust".into(), "boss".into()),
                Action::Deop("#rust".into(), "rogue".into()),
            ]
        );
    }

    #[test]
    fn test_repeated_nick_invited_once() {
        let fx = fixture();
        let actions = run(&fx, false, "rogue!r@h", &["vip", "VIP", "vip"]).unwrap();
        assert_eq!(
            actions,
            vec![
                Action::Invite("#rust".into(), "vip".into()),
                Action::Deop("#rust".into(), "rogue".into()),
            ]
        );
    }

    #[test]
    fn test_protected_kick_with_revenge() {
        let fx = fixture();
        let actions = run(&fx, true, "rogue!r@bad.example.com", &["vip"]).unwrap();
        assert_eq!(
            actions,
            vec![
                Action::Invite("#rust".into(), "vip".into()),
                Action::Ban("#rust".into(), "*!*@*.example.com".into()),
                Action::Kick("#rust".into(), "rogue".into(), None),
            ]
        );
    }

    #[test]
    fn test_ops_and_unprotected_targets_are_ignored() {
        let fx = fixture();
        assert!(run(&fx, true, "boss!b@h", &["vip"]).unwrap().is_empty());
        assert!(run(&fx, true, "rogue!r@h", &["nobody", "ghost"]).unwrap().is_empty());
    }

    #[test]
    fn test_empty_kick_is_malformed() {
        let fx = fixture();
        let err = run(&fx, true, "rogue!r@h", &[]).unwrap_err();
        assert_eq!(err.error_code(), "malformed_event");
    }
}
