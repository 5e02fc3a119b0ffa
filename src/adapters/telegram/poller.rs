//! Long-polling loop feeding inbound events to the dispatcher.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};

use crate::domain::dialogue::Inbound;

use super::client::TelegramClient;
use super::convert::to_inbound;

/// Pause before retrying after a failed `getUpdates`.
const RETRY_DELAY: Duration = Duration::from_secs(3);

/// Pulls updates with `getUpdates` and forwards them in arrival order.
pub struct TelegramPoller {
    client: Arc<TelegramClient>,
    sink: mpsc::Sender<Inbound>,
    offset: Option<i64>,
}

impl TelegramPoller {
    pub fn new(client: Arc<TelegramClient>, sink: mpsc::Sender<Inbound>) -> Self {
        Self {
            client,
            sink,
            offset: None,
        }
    }

    /// Polls until `shutdown` flips to true or the sink is closed.
    ///
    /// Failed polls are logged and retried after a short pause.
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        tracing::info!(
            poll_timeout_secs = self.client.poll_timeout().as_secs(),
            "Polling for updates"
        );

        loop {
            if *shutdown.borrow() {
                break;
            }

            let updates = tokio::select! {
                _ = shutdown.changed() => break,
                result = self.client.get_updates(self.offset) => result,
            };

            match updates {
                Ok(updates) => {
                    for update in updates {
                        let update_id = update.update_id;
                        self.offset = Some(update_id + 1);
                        let Some(inbound) = to_inbound(update) else {
                            tracing::debug!(update_id, "Skipping unsupported update kind");
                            continue;
                        };
                        if self.sink.send(inbound).await.is_err() {
                            tracing::info!("Dispatcher closed, stopping poller");
                            return;
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, "getUpdates failed, retrying");
                    tokio::select! {
                        _ = shutdown.changed() => break,
                        _ = tokio::time::sleep(RETRY_DELAY) => {}
                    }
                }
            }
        }

        tracing::info!("Poller stopped");
    }
}
