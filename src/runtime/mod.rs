//! Actor runtime for the enforcer.
//!
//! The [`EnforcerActor`] owns one [`Enforcer`] on its own Tokio task and
//! takes [`EnforcerRequest`]s from a bounded inbox one at a time. An event's
//! actions are all pushed to the [`CommandSink`] before the next request is
//! read, so nothing decided for two events can interleave.

mod sink;

pub use sink::CommandSink;

use slirc_proto::{Command, Hostmask};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, warn};

use crate::enforcer::{Action, Enforcer, Event, StartArgs, start_reply};
use crate::error::EnforcerError;
use crate::metrics;

/// Requests accepted by the actor.
#[derive(Debug)]
pub enum EnforcerRequest {
    /// Run the start command on behalf of `requester`. The NOTICE reply is
    /// sent through the sink; the result comes back on `reply_tx`.
    Start {
        requester: Hostmask,
        args: StartArgs,
        reply_tx: oneshot::Sender<Result<(), EnforcerError>>,
    },
    /// Handle one channel event. `reply_tx` is optional for fire-and-forget
    /// dispatch.
    Event {
        event: Event,
        reply_tx: Option<oneshot::Sender<Result<Vec<Action>, EnforcerError>>>,
    },
}

/// Owns the enforcer and its sink.
pub struct EnforcerActor {
    enforcer: Enforcer,
    sink: Arc<dyn CommandSink>,
}

impl EnforcerActor {
    pub fn new(enforcer: Enforcer, sink: Arc<dyn CommandSink>) -> Self {
        Self { enforcer, sink }
    }

    /// Spawn the actor and return a handle to it.
    pub fn spawn(
        enforcer: Enforcer,
        sink: Arc<dyn CommandSink>,
        queue_depth: usize,
    ) -> EnforcerHandle {
        let (tx, rx) = mpsc::channel(queue_depth.max(1));
        let actor = Self::new(enforcer, sink);

        tokio::spawn(async move {
            actor.run(rx).await;
        });

        EnforcerHandle { tx }
    }

    /// The main actor loop. Ends when every handle is dropped.
    pub async fn run(mut self, mut rx: mpsc::Receiver<EnforcerRequest>) {
        info!(bot = %self.enforcer.bot_nick(), "Enforcer actor started");
        while let Some(request) = rx.recv().await {
            self.handle_request(request).await;
        }
        debug!("Enforcer actor stopped");
    }

    async fn handle_request(&mut self, request: EnforcerRequest) {
        match request {
            EnforcerRequest::Start {
                requester,
                args,
                reply_tx,
            } => {
                let result = self.enforcer.start(&requester, args);
                if let Some(reply) = start_reply(&requester, &result) {
                    self.send(reply).await;
                }
                let _ = reply_tx.send(result);
            }
            EnforcerRequest::Event { event, reply_tx } => {
                let result = self.enforcer.handle_event(&event);
                match &result {
                    Ok(actions) => self.dispatch(actions).await,
                    Err(EnforcerError::MalformedEvent { decided, .. }) => {
                        self.dispatch(decided).await
                    }
                    Err(e) => debug!(error = %e, "Event produced no actions"),
                }
                if let Some(tx) = reply_tx {
                    let _ = tx.send(result);
                }
            }
        }
    }

    async fn dispatch(&self, actions: &[Action]) {
        for action in actions {
            self.send(action.to_command()).await;
        }
    }

    async fn send(&self, command: Command) {
        let name = command.name();
        if let Err(e) = self.sink.send(command).await {
            error!(command = name, error = %e, "Failed to send command");
            metrics::record_sink_failure();
        }
    }
}

/// Cloneable front end to a running [`EnforcerActor`].
#[derive(Clone, Debug)]
pub struct EnforcerHandle {
    tx: mpsc::Sender<EnforcerRequest>,
}

impl EnforcerHandle {
    /// Run the start command and wait for the outcome.
    pub async fn start(&self, requester: Hostmask, args: StartArgs) -> Result<(), EnforcerError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(EnforcerRequest::Start {
                requester,
                args,
                reply_tx,
            })
            .await
            .map_err(|_| EnforcerError::ActorGone)?;
        reply_rx.await.map_err(|_| EnforcerError::ActorGone)?
    }

    /// Queue an event without waiting for it to be handled.
    pub async fn dispatch(&self, event: Event) -> Result<(), EnforcerError> {
        self.tx
            .send(EnforcerRequest::Event {
                event,
                reply_tx: None,
            })
            .await
            .map_err(|_| {
                warn!("Enforcer actor gone, event lost");
                EnforcerError::ActorGone
            })
    }

    /// Queue an event and wait until its actions have been handed to the sink.
    pub async fn dispatch_and_wait(&self, event: Event) -> Result<Vec<Action>, EnforcerError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(EnforcerRequest::Event {
                event,
                reply_tx: Some(reply_tx),
            })
            .await
            .map_err(|_| EnforcerError::ActorGone)?;
        reply_rx.await.map_err(|_| EnforcerError::ActorGone)?
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}
