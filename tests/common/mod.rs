//! Integration test common infrastructure.
//!
//! Spawns an enforcer actor over a channel sink and collects the wire lines
//! it sends.

use slirc_enforcer::enforcer::StartArgs;
use slirc_enforcer::policy::StaticCapabilityStore;
use slirc_enforcer::state::Roster;
use slirc_enforcer::{Enforcer, EnforcerActor, EnforcerHandle};
use slirc_proto::{Command, Hostmask};
use std::sync::Arc;
use tokio::sync::mpsc;

pub const BOT: &str = "warden";
pub const ADMIN: &str = "root!root@admin.example";

pub fn hostmask(s: &str) -> Hostmask {
    s.parse().expect("test hostmask")
}

/// The policy most tests run under.
pub fn default_store() -> StaticCapabilityStore {
    StaticCapabilityStore::new()
        .with_user("root", &["root!*@admin.example"], &["admin"])
        .with_user("alice", &["alice!*@*"], &["#rust,op"])
        .with_user("vip", &["vip!*@*"], &["#rust,protected"])
        .with_user("speaker", &["speaker!*@*"], &["#rust,voice", "#rust,topic"])
        .with_user("muted", &["muted!*@*"], &["#rust,-voice"])
        .with_ban("#rust", "*!*@*.spam.example")
}

pub struct TestEnforcer {
    pub handle: EnforcerHandle,
    pub roster: Arc<Roster>,
    rx: mpsc::Receiver<Command>,
}

impl TestEnforcer {
    pub fn spawn(store: StaticCapabilityStore) -> Self {
        let roster = Arc::new(Roster::new());
        let enforcer = Enforcer::new(BOT, Arc::new(store), roster.clone());
        let (tx, rx) = mpsc::channel(64);
        let handle = EnforcerActor::spawn(enforcer, Arc::new(tx), 16);
        Self { handle, roster, rx }
    }

    /// Start as the admin with the given argument text; discards the reply.
    pub async fn arm(&mut self, args: &str) -> anyhow::Result<()> {
        let args = StartArgs::parse(args)?;
        self.handle.start(hostmask(ADMIN), args).await?;
        self.drain();
        Ok(())
    }

    /// Make `masks` resolvable by nick.
    pub fn present(&self, masks: &[&str]) {
        for mask in masks {
            self.roster.observe(hostmask(mask));
        }
    }

    /// Everything sent so far, as wire lines.
    pub fn drain(&mut self) -> Vec<String> {
        let mut lines = Vec::new();
        while let Ok(command) = self.rx.try_recv() {
            lines.push(command.to_string());
        }
        lines
    }
}
