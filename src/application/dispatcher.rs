//! Dispatcher - one actor per conversation.
//!
//! Events of one conversation are handled strictly in arrival order by a
//! dedicated task; different conversations run concurrently. Idle actors
//! stop on their own and are respawned on the next event. A respawned actor
//! waits for its predecessor to drain before handling anything.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::domain::dialogue::Inbound;
use crate::domain::foundation::ConversationId;

use super::PlaceBot;

/// How long an actor waits for its next event before stopping.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(600);

/// How often finished actors are swept from the routing table.
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

struct Actor {
    sender: mpsc::UnboundedSender<Inbound>,
    handle: JoinHandle<()>,
}

/// Routes inbound events to per-conversation actors.
pub struct Dispatcher {
    bot: Arc<PlaceBot>,
    idle_timeout: Duration,
    actors: HashMap<ConversationId, Actor>,
}

impl Dispatcher {
    pub fn new(bot: Arc<PlaceBot>) -> Self {
        Self {
            bot,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
            actors: HashMap::new(),
        }
    }

    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    /// Number of conversations with a running actor.
    pub fn active_actors(&self) -> usize {
        self.actors
            .values()
            .filter(|actor| !actor.handle.is_finished())
            .count()
    }

    /// Hands one event to its conversation's actor, spawning it if needed.
    pub fn dispatch(&mut self, inbound: Inbound) {
        let conversation = inbound.conversation;

        let inbound = match self.actors.get(&conversation) {
            Some(actor) => match actor.sender.send(inbound) {
                Ok(()) => return,
                // Actor went idle; respawn below
                Err(mpsc::error::SendError(inbound)) => inbound,
            },
            None => inbound,
        };

        let previous = self.actors.remove(&conversation).map(|actor| actor.handle);
        let (sender, receiver) = mpsc::unbounded_channel();
        // Fresh channel with a live receiver; this send cannot fail
        let _ = sender.send(inbound);

        let handle = tokio::spawn(run_actor(
            Arc::clone(&self.bot),
            conversation,
            receiver,
            previous,
            self.idle_timeout,
        ));
        tracing::debug!(%conversation, "Actor spawned");
        self.actors.insert(conversation, Actor { sender, handle });
    }

    /// Dispatches until the inbound channel closes, then waits for every
    /// actor to finish its queued events.
    pub async fn run(mut self, mut inbound: mpsc::Receiver<Inbound>) {
        let mut sweep = tokio::time::interval(SWEEP_INTERVAL);

        loop {
            tokio::select! {
                next = inbound.recv() => match next {
                    Some(event) => self.dispatch(event),
                    None => break,
                },
                _ = sweep.tick() => self.sweep(),
            }
        }

        self.shutdown().await;
    }

    /// Closes every actor's queue and waits for them to drain.
    pub async fn shutdown(self) {
        tracing::info!(actors = self.actors.len(), "Draining conversation actors");
        let handles: Vec<_> = self
            .actors
            .into_values()
            .map(|actor| {
                drop(actor.sender);
                actor.handle
            })
            .collect();

        for handle in handles {
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "Conversation actor panicked");
            }
        }
    }

    fn sweep(&mut self) {
        self.actors
            .retain(|_, actor| !(actor.handle.is_finished() && actor.sender.is_closed()));
    }
}

async fn run_actor(
    bot: Arc<PlaceBot>,
    conversation: ConversationId,
    mut receiver: mpsc::UnboundedReceiver<Inbound>,
    previous: Option<JoinHandle<()>>,
    idle_timeout: Duration,
) {
    if let Some(previous) = previous {
        if let Err(e) = previous.await {
            tracing::error!(%conversation, error = %e, "Previous actor panicked");
        }
    }

    loop {
        let inbound = match tokio::time::timeout(idle_timeout, receiver.recv()).await {
            Ok(Some(inbound)) => inbound,
            Ok(None) => break,
            Err(_) => {
                // Refuse new events, then finish whatever slipped in
                receiver.close();
                while let Ok(inbound) = receiver.try_recv() {
                    handle(&bot, inbound).await;
                }
                tracing::debug!(%conversation, "Actor idle, stopping");
                break;
            }
        };
        handle(&bot, inbound).await;
    }
}

async fn handle(bot: &PlaceBot, inbound: Inbound) {
    let conversation = inbound.conversation;
    if let Err(e) = bot.handle(inbound).await {
        tracing::error!(%conversation, error = %e, "Event handling failed");
    }
}
