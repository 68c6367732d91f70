//! Ordered action buffer with the revenge policy applied uniformly.

use slirc_proto::Hostmask;

use super::action::Action;

/// Collects the actions decided for one event in the order they must be sent.
///
/// Guards never decide how to retaliate themselves; they call
/// [`Responder::retaliate`], which escalates to ban+kick when revenge is on
/// and falls back to a deop otherwise.
#[derive(Debug, Clone)]
pub struct Responder {
    revenge: bool,
    actions: Vec<Action>,
}

impl Responder {
    pub fn new(revenge: bool) -> Self {
        Self {
            revenge,
            actions: Vec::new(),
        }
    }

    pub fn push(&mut self, action: Action) {
        self.actions.push(action);
    }

    /// Ban the user's banmask, then kick them. Never the other way round.
    pub fn ban_and_kick(&mut self, channel: &str, who: &Hostmask) {
        self.push(Action::Ban(channel.to_string(), who.banmask()));
        self.push(Action::Kick(channel.to_string(), who.nick.clone(), None));
    }

    /// Punish an actor who undid something they were not allowed to.
    pub fn retaliate(&mut self, channel: &str, actor: &Hostmask) {
        if self.revenge {
            self.ban_and_kick(channel, actor);
        } else {
            self.push(Action::Deop(channel.to_string(), actor.nick.clone()));
        }
    }

    /// Kick with a reason, only when revenge is on.
    pub fn kick_if_revenge(&mut self, channel: &str, nick: &str, reason: String) {
        if self.revenge {
            self.push(Action::Kick(channel.to_string(), nick.to_string(), Some(reason)));
        }
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn into_actions(self) -> Vec<Action> {
        self.actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor() -> Hostmask {
        Hostmask::new("rogue", "r", "10.1.2.3")
    }

    #[test]
    fn test_retaliate_with_revenge() {
        let mut responder = Responder::new(true);
        responder.retaliate("#rust", &actor());
        assert_eq!(
            responder.into_actions(),
            vec![
                Action::Ban("#rust".into(), "*!*@10.1.2.*".into()),
                Action::Kick("#rust".into(), "rogue".into(), None),
            ]
        );
    }

    #[test]
    fn test_retaliate_without_revenge() {
        let mut responder = Responder::new(false);
        responder.retaliate("#rust", &actor());
        responder.kick_if_revenge("#rust", "rogue", "ignored".into());
        assert_eq!(
            responder.actions(),
            &[Action::Deop("#rust".into(), "rogue".into())]
        );
    }
}
