//! JSON-lines event replay.
//!
//! Plays the part of the external dispatcher for dry runs: each line is one
//! observed message, the roster is kept current from joins, parts, quits,
//! nick changes and kicks, and every channel event is handed to the
//! enforcer in file order. A nick stays resolvable until it has left every
//! channel it was seen on, or quit.
//!
//! ```text
//! {"type":"start","from":"root!r@admin.host","args":"ChanServ on [OFFICIAL] "}
//! {"type":"topic_sync","channel":"#rust","topic":"[OFFICIAL] welcome"}
//! {"type":"join","channel":"#rust","from":"alice!a@home.example.org"}
//! {"type":"mode","channel":"#rust","from":"rogue!r@10.0.0.9","modes":"-o alice"}
//! {"type":"kick","channel":"#rust","from":"rogue!r@10.0.0.9","targets":"alice,bob"}
//! ```

use serde::Deserialize;
use slirc_proto::{Hostmask, ModeDelta};
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};

use crate::enforcer::{Event, StartArgs};
use crate::error::EnforcerError;
use crate::runtime::EnforcerHandle;
use crate::state::Roster;

/// One input line. `from` is always a full `nick!user@host`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReplayLine {
    Start {
        from: String,
        #[serde(default)]
        args: String,
    },
    Join {
        channel: String,
        from: String,
    },
    Part {
        channel: String,
        from: String,
    },
    Quit {
        from: String,
    },
    Nick {
        from: String,
        nick: String,
    },
    Topic {
        channel: String,
        from: String,
        topic: String,
    },
    TopicSync {
        channel: String,
        topic: String,
    },
    /// `targets` is comma-separated, as on the wire.
    Kick {
        channel: String,
        from: String,
        targets: String,
    },
    /// `modes` is the mode string and its arguments, space-separated.
    Mode {
        channel: String,
        from: String,
        modes: String,
    },
}

/// Counters reported when a replay finishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub lines: usize,
    pub events: usize,
    pub actions: usize,
    pub errors: usize,
    pub skipped: usize,
}

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to read events: {0}")]
    Io(#[from] std::io::Error),
    #[error("enforcer actor stopped during replay")]
    ActorGone,
}

/// Replay every line from `reader`. Unparseable lines are logged and
/// skipped; only I/O failure or a dead actor stops the replay.
pub async fn run<R>(
    reader: R,
    handle: &EnforcerHandle,
    roster: &Roster,
) -> Result<ReplaySummary, ReplayError>
where
    R: AsyncBufRead + Unpin,
{
    let mut summary = ReplaySummary::default();
    let mut lines = reader.lines();
    let mut line_no = 0usize;

    while let Some(line) = lines.next_line().await? {
        line_no += 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        summary.lines += 1;

        let parsed = match serde_json::from_str::<ReplayLine>(trimmed) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(line = line_no, error = %e, "Skipping unparseable line");
                summary.skipped += 1;
                continue;
            }
        };

        match to_event(parsed, handle, roster).await {
            Ok(Some(event)) => dispatch(event, handle, roster, &mut summary).await?,
            Ok(None) => {}
            Err(Skip(reason)) => {
                warn!(line = line_no, reason = %reason, "Skipping line");
                summary.skipped += 1;
            }
        }
    }

    Ok(summary)
}

struct Skip(String);

fn hostmask(from: &str) -> Result<Hostmask, Skip> {
    from.parse()
        .map_err(|e| Skip(format!("bad hostmask {:?}: {}", from, e)))
}

/// Apply roster bookkeeping and build the event, if the line is one.
async fn to_event(
    line: ReplayLine,
    handle: &EnforcerHandle,
    roster: &Roster,
) -> Result<Option<Event>, Skip> {
    let event = match line {
        ReplayLine::Start { from, args } => {
            let requester = hostmask(&from)?;
            let args = StartArgs::parse(&args).map_err(|e| Skip(e.to_string()))?;
            if let Err(e) = handle.start(requester, args).await {
                warn!(error = %e, "Start command failed");
            }
            return Ok(None);
        }
        ReplayLine::Join { channel, from } => {
            let actor = hostmask(&from)?;
            roster.join(&channel, actor.clone());
            Event::Join { channel, actor }
        }
        ReplayLine::Part { channel, from } => {
            let who = hostmask(&from)?;
            debug!(channel = %channel, nick = %who.nick, "Part");
            roster.part(&channel, &who.nick);
            return Ok(None);
        }
        ReplayLine::Quit { from } => {
            roster.forget(&hostmask(&from)?.nick);
            return Ok(None);
        }
        ReplayLine::Nick { from, nick } => {
            let who = hostmask(&from)?;
            roster.observe(who.clone());
            roster.rename(&who.nick, &nick);
            return Ok(None);
        }
        ReplayLine::Topic {
            channel,
            from,
            topic,
        } => {
            let actor = hostmask(&from)?;
            roster.join(&channel, actor.clone());
            Event::Topic {
                channel,
                actor,
                topic,
            }
        }
        ReplayLine::TopicSync { channel, topic } => Event::TopicSync { channel, topic },
        ReplayLine::Kick {
            channel,
            from,
            targets,
        } => {
            let actor = hostmask(&from)?;
            roster.join(&channel, actor.clone());
            let kicked = targets
                .split(',')
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect();
            Event::Kick {
                channel,
                actor,
                kicked,
            }
        }
        ReplayLine::Mode {
            channel,
            from,
            modes,
        } => {
            let actor = hostmask(&from)?;
            roster.join(&channel, actor.clone());
            let pieces: Vec<&str> = modes.split_whitespace().collect();
            let deltas = ModeDelta::parse(&pieces).map_err(|e| Skip(e.to_string()))?;
            Event::ModeChange {
                channel,
                actor,
                deltas,
            }
        }
    };
    Ok(Some(event))
}

async fn dispatch(
    event: Event,
    handle: &EnforcerHandle,
    roster: &Roster,
    summary: &mut ReplaySummary,
) -> Result<(), ReplayError> {
    // Kicked users leave the channel once the kick has been judged.
    let departed = match &event {
        Event::Kick {
            channel, kicked, ..
        } => Some((channel.clone(), kicked.clone())),
        _ => None,
    };

    summary.events += 1;
    match handle.dispatch_and_wait(event).await {
        Ok(actions) => summary.actions += actions.len(),
        Err(EnforcerError::ActorGone) => return Err(ReplayError::ActorGone),
        Err(EnforcerError::MalformedEvent { reason, decided }) => {
            warn!(reason = %reason, "Malformed event");
            summary.errors += 1;
            summary.actions += decided.len();
        }
        Err(e) => {
            warn!(error = %e, "Event failed");
            summary.errors += 1;
        }
    }

    if let Some((channel, kicked)) = departed {
        for nick in kicked {
            roster.part(&channel, &nick);
        }
    }
    Ok(())
}
