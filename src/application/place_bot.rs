//! PlaceBot - handles one inbound event for one conversation.
//!
//! Loads the session, runs the dialogue step, stores the session and then
//! carries out the resulting effect against the ports.

use std::sync::Arc;

use crate::domain::dialogue::{
    Command, CompletedDraft, ConfirmationAnswer, DialogueContext, Effect, Inbound, InboundEvent,
    Reply, Session,
};
use crate::domain::foundation::{ConversationId, Coordinates, DomainError};
use crate::domain::nearest::NearestOutcome;
use crate::domain::place::Place;
use crate::ports::{
    ChatTransport, PhotoStorage, PlaceRepository, SessionStore, SessionStoreError, StorageError,
    TransportError,
};

use super::NearestPlaceMatcher;

/// Number of places shown by `/list`.
pub const LIST_LIMIT: u32 = 10;

/// Faults the bot could not turn into a regular reply.
#[derive(Debug, thiserror::Error)]
pub enum BotError {
    #[error("Session store error: {0}")]
    Session(#[from] SessionStoreError),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Photo storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}

/// Event handler coordinating the ports.
pub struct PlaceBot {
    sessions: Arc<dyn SessionStore>,
    places: Arc<dyn PlaceRepository>,
    photos: Arc<dyn PhotoStorage>,
    transport: Arc<dyn ChatTransport>,
    matcher: NearestPlaceMatcher,
}

impl PlaceBot {
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        places: Arc<dyn PlaceRepository>,
        photos: Arc<dyn PhotoStorage>,
        transport: Arc<dyn ChatTransport>,
        matcher: NearestPlaceMatcher,
    ) -> Self {
        Self {
            sessions,
            places,
            photos,
            transport,
            matcher,
        }
    }

    /// Handles one event.
    ///
    /// On failure the session is dropped and the user gets a generic error
    /// reply; the error is still returned for logging.
    #[tracing::instrument(skip(self, inbound), fields(conversation = %inbound.conversation, kind = inbound.event.kind()))]
    pub async fn handle(&self, inbound: Inbound) -> Result<(), BotError> {
        let chat = inbound.conversation;
        match self.process(inbound).await {
            Ok(()) => Ok(()),
            Err(e) => {
                if let Err(clear_err) = self.sessions.clear(chat).await {
                    tracing::error!(error = %clear_err, "Failed to clear session after fault");
                }
                if let Err(send_err) = self.reply(chat, Reply::InternalError).await {
                    tracing::error!(error = %send_err, "Failed to report fault to user");
                }
                Err(e)
            }
        }
    }

    async fn process(&self, inbound: Inbound) -> Result<(), BotError> {
        let chat = inbound.conversation;

        // 1. Load session and the facts the step needs
        let mut session = self.sessions.load(chat).await?;
        let context = self.context_for(chat, &session, &inbound.event).await?;

        // 2. Step the dialogue
        let before = session.state();
        let step = session.apply(&inbound.event, context);
        tracing::debug!(from = %before, to = %session.state(), "Dialogue step");

        // 3. Persist session before side effects so a slow effect never replays
        self.sessions.save(chat, session).await?;

        // 4. Carry out the effect
        match step? {
            Effect::Reply(reply) => {
                if matches!(
                    reply,
                    Reply::Unrecognized | Reply::InvalidName | Reply::NameTooLong
                        | Reply::ExpectedPhoto | Reply::InvalidCoordinates
                        | Reply::ExpectedCurrentLocation
                ) {
                    tracing::warn!(event = inbound.event.kind(), state = %before, "Input rejected");
                }
                self.reply(chat, reply).await?;
            }
            Effect::SavePlace(draft) => self.save_place(chat, draft).await?,
            Effect::ListPlaces => self.list_places(chat).await?,
            Effect::FindNearest(origin) => self.find_nearest(chat, origin).await?,
            Effect::RequestResetConfirmation => self.request_reset(chat).await?,
            Effect::ResolveReset {
                answer,
                callback_id,
            } => self.resolve_reset(chat, answer, &callback_id).await?,
            Effect::AcknowledgeCallback { callback_id } => {
                tracing::warn!("Unexpected callback payload acknowledged");
                self.transport.acknowledge_callback(&callback_id).await?;
            }
        }

        Ok(())
    }

    /// Only `/nearest` from idle needs to know whether places exist.
    async fn context_for(
        &self,
        chat: ConversationId,
        session: &Session,
        event: &InboundEvent,
    ) -> Result<DialogueContext, BotError> {
        let needs_count =
            session.state().is_idle() && matches!(event, InboundEvent::Command(Command::Nearest));
        let has_saved_places = needs_count && self.places.count(chat).await? > 0;
        Ok(DialogueContext { has_saved_places })
    }

    async fn reply(&self, chat: ConversationId, reply: Reply) -> Result<(), TransportError> {
        self.transport.send_text(chat, &reply.text()).await?;
        Ok(())
    }

    async fn save_place(&self, chat: ConversationId, draft: CompletedDraft) -> Result<(), BotError> {
        match self.persist_draft(chat, draft).await {
            Ok(place) => {
                tracing::info!(place = %place.id(), "Place saved");
                self.reply(chat, Reply::PlaceSaved).await?;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to save place");
                self.reply(chat, Reply::SaveFailed).await?;
            }
        }
        Ok(())
    }

    /// Photo first, then the rows. A photo orphaned by a failed insert is left behind.
    async fn persist_draft(
        &self,
        chat: ConversationId,
        draft: CompletedDraft,
    ) -> Result<Place, BotError> {
        let content = self.transport.download_photo(&draft.photo).await?;
        let photo = self.photos.write(chat, &content).await?;
        let place = Place::new(chat, draft.name, photo, draft.coordinates)?;
        self.places.save(&place).await?;
        Ok(place)
    }

    async fn list_places(&self, chat: ConversationId) -> Result<(), BotError> {
        let places = self.places.list_recent(chat, LIST_LIMIT).await?;
        if places.is_empty() {
            self.reply(chat, Reply::NoPlaces).await?;
            return Ok(());
        }

        for place in &places {
            self.show_place(chat, place).await?;
        }
        tracing::info!(count = places.len(), "Places listed");
        Ok(())
    }

    /// Photo captioned with the name (plain name if the file is gone), then the marker.
    async fn show_place(&self, chat: ConversationId, place: &Place) -> Result<(), BotError> {
        match self.photos.read(place.photo()).await {
            Ok(content) => {
                self.transport
                    .send_photo(chat, content, place.name())
                    .await?;
            }
            Err(e) => {
                tracing::warn!(place = %place.id(), error = %e, "Photo unavailable, sending name only");
                self.transport.send_text(chat, place.name()).await?;
            }
        }
        self.transport
            .send_location(chat, *place.coordinates())
            .await?;
        Ok(())
    }

    async fn find_nearest(&self, chat: ConversationId, origin: Coordinates) -> Result<(), BotError> {
        let places = self.places.list_all(chat).await?;
        if places.is_empty() {
            self.reply(chat, Reply::NoPlaces).await?;
            return Ok(());
        }

        let status = self
            .transport
            .send_text(chat, &Reply::Searching.text())
            .await?;

        let transport = &self.transport;
        let report = self
            .matcher
            .find_nearest(origin, places, |place| async move {
                transport.send_text(chat, place.name()).await?;
                transport.send_location(chat, *place.coordinates()).await
            })
            .await?;

        let reply = match &report.outcome {
            NearestOutcome::NearFound => Reply::NearFound(report.reported.len()),
            NearestOutcome::NoneNear => Reply::NoneNearby,
            NearestOutcome::ProviderError(status) => Reply::ProviderError(status.clone()),
        };
        tracing::info!(outcome = ?report.outcome, reported = report.reported.len(), "Nearest search finished");

        self.transport
            .edit_text(chat, status, &reply.text())
            .await?;
        Ok(())
    }

    async fn request_reset(&self, chat: ConversationId) -> Result<(), BotError> {
        if self.places.count(chat).await? == 0 {
            self.reply(chat, Reply::NoPlaces).await?;
            return Ok(());
        }
        self.transport
            .send_confirmation(chat, &Reply::ConfirmReset.text(), &ConfirmationAnswer::ALL)
            .await?;
        Ok(())
    }

    async fn resolve_reset(
        &self,
        chat: ConversationId,
        answer: ConfirmationAnswer,
        callback_id: &str,
    ) -> Result<(), BotError> {
        self.transport.acknowledge_callback(callback_id).await?;

        match answer {
            ConfirmationAnswer::Yes => {
                let deleted = self.places.delete_all(chat).await?;
                self.photos.delete_all(chat).await?;
                tracing::info!(deleted, "Places deleted");
                self.reply(chat, Reply::PlacesDeleted).await?;
            }
            ConfirmationAnswer::No => {
                self.reply(chat, Reply::PlacesKept).await?;
            }
        }
        Ok(())
    }
}
