//! Per-conversation session and the dialogue step function.
//!
//! `Session::apply` is the whole transition table: it validates the event
//! against the armed state, updates the draft, moves the state and says what
//! the application layer must do next. It performs no I/O.

use crate::domain::foundation::{Coordinates, DomainError, ErrorCode, StateMachine};

use super::input::{parse_coordinates, validate_place_name, NameRejection};
use super::{
    largest_photo, Command, CompletedDraft, ConfirmationAnswer, DialogueState, InboundEvent,
    PlaceDraft, Reply,
};

/// Facts the step function needs but cannot look up itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DialogueContext {
    /// Whether the conversation owns at least one saved place.
    /// Only consulted for `/nearest`.
    pub has_saved_places: bool,
}

/// Outcome of one dialogue step.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Send a text; nothing else to do.
    Reply(Reply),
    /// Persist the finished draft, then confirm.
    SavePlace(CompletedDraft),
    /// Run the nearest-place matcher from this origin.
    FindNearest(Coordinates),
    /// Show recent places.
    ListPlaces,
    /// Ask for the reset confirmation (if there is anything to delete).
    RequestResetConfirmation,
    /// A confirmation button was pressed.
    ResolveReset {
        answer: ConfirmationAnswer,
        callback_id: String,
    },
    /// A button press we do not understand; only acknowledge it.
    AcknowledgeCallback { callback_id: String },
}

/// Dialogue state plus the draft being collected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    state: DialogueState,
    draft: PlaceDraft,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DialogueState {
        self.state
    }

    pub fn draft(&self) -> &PlaceDraft {
        &self.draft
    }

    /// True when the session carries nothing worth keeping.
    pub fn is_pristine(&self) -> bool {
        self.state.is_idle() && self.draft.is_empty()
    }

    /// Applies one inbound event.
    ///
    /// Rejected input never changes the state nor drops collected draft fields.
    ///
    /// # Errors
    ///
    /// `InvalidStateTransition` / `InternalError` only on a broken invariant;
    /// the session is reset to idle in that case.
    pub fn apply(
        &mut self,
        event: &InboundEvent,
        context: DialogueContext,
    ) -> Result<Effect, DomainError> {
        let result = self.step(event, context);
        if result.is_err() {
            self.reset();
        }
        result
    }

    fn step(&mut self, event: &InboundEvent, context: DialogueContext) -> Result<Effect, DomainError> {
        match event {
            InboundEvent::Command(command) => self.on_command(command, context),
            InboundEvent::Callback { callback_id, data } => {
                let callback_id = callback_id.clone();
                match data.parse::<ConfirmationAnswer>() {
                    Ok(answer) => {
                        self.reset();
                        Ok(Effect::ResolveReset {
                            answer,
                            callback_id,
                        })
                    }
                    Err(_) => Ok(Effect::AcknowledgeCallback { callback_id }),
                }
            }
            payload => self.on_payload(payload),
        }
    }

    fn on_command(
        &mut self,
        command: &Command,
        context: DialogueContext,
    ) -> Result<Effect, DomainError> {
        let effect = match command {
            Command::Cancel => {
                self.reset();
                Effect::Reply(Reply::Cancelled)
            }
            Command::Start | Command::Help => Effect::Reply(Reply::Help),
            Command::List => Effect::ListPlaces,
            Command::Reset => Effect::RequestResetConfirmation,
            Command::Add if self.state.is_idle() => {
                self.draft = PlaceDraft::default();
                self.move_to(DialogueState::AwaitingName)?;
                Effect::Reply(Reply::AskName)
            }
            Command::Nearest if self.state.is_idle() => {
                if !context.has_saved_places {
                    Effect::Reply(Reply::NoPlaces)
                } else {
                    self.move_to(DialogueState::AwaitingNearestLocation)?;
                    Effect::Reply(Reply::AskCurrentLocation)
                }
            }
            Command::Add | Command::Nearest => Effect::Reply(Reply::FlowInProgress),
            Command::Unknown(_) => Effect::Reply(self.reprompt()),
        };
        Ok(effect)
    }

    fn on_payload(&mut self, event: &InboundEvent) -> Result<Effect, DomainError> {
        use DialogueState::*;

        let effect = match (self.state, event) {
            (AwaitingName, InboundEvent::Text(text)) => match validate_place_name(text) {
                Ok(name) => {
                    self.draft.name = Some(name);
                    self.move_to(AwaitingPhoto)?;
                    Effect::Reply(Reply::AskPhoto)
                }
                Err(NameRejection::NoLetters) => Effect::Reply(Reply::InvalidName),
                Err(NameRejection::TooLong) => Effect::Reply(Reply::NameTooLong),
            },
            (AwaitingPhoto, InboundEvent::Photo(sizes)) => match largest_photo(sizes) {
                Some(photo) => {
                    self.draft.photo = Some(photo);
                    self.move_to(AwaitingLocation)?;
                    Effect::Reply(Reply::AskLocation)
                }
                None => Effect::Reply(Reply::ExpectedPhoto),
            },
            (AwaitingLocation, InboundEvent::Text(text)) => match parse_coordinates(text) {
                Some(coordinates) => self.finish_draft(coordinates)?,
                None => Effect::Reply(Reply::InvalidCoordinates),
            },
            (AwaitingLocation, InboundEvent::Location(coordinates)) => {
                self.finish_draft(*coordinates)?
            }
            (AwaitingNearestLocation, InboundEvent::Location(origin)) => {
                self.reset();
                Effect::FindNearest(*origin)
            }
            _ => Effect::Reply(self.reprompt()),
        };
        Ok(effect)
    }

    fn finish_draft(&mut self, coordinates: Coordinates) -> Result<Effect, DomainError> {
        self.draft.coordinates = Some(coordinates);
        let completed = self.draft.complete().ok_or_else(|| {
            DomainError::new(
                ErrorCode::InternalError,
                "Draft reached the location step without a name or photo",
            )
        })?;
        self.reset();
        Ok(Effect::SavePlace(completed))
    }

    /// What to say when the event does not fit the armed state.
    fn reprompt(&self) -> Reply {
        match self.state {
            DialogueState::Idle => Reply::Unrecognized,
            DialogueState::AwaitingName => Reply::InvalidName,
            DialogueState::AwaitingPhoto => Reply::ExpectedPhoto,
            DialogueState::AwaitingLocation => Reply::InvalidCoordinates,
            DialogueState::AwaitingNearestLocation => Reply::ExpectedCurrentLocation,
        }
    }

    fn move_to(&mut self, target: DialogueState) -> Result<(), DomainError> {
        self.state = self.state.transition_to(target)?;
        Ok(())
    }

    fn reset(&mut self) {
        self.state = DialogueState::Idle;
        self.draft = PlaceDraft::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dialogue::{PhotoRef, PhotoSize};
    use proptest::prelude::*;

    fn text(s: &str) -> InboundEvent {
        InboundEvent::from_text(s)
    }

    fn command(c: Command) -> InboundEvent {
        InboundEvent::Command(c)
    }

    fn photo(id: &str) -> InboundEvent {
        InboundEvent::Photo(vec![
            PhotoSize {
                file_id: format!("{id}-thumb"),
                width: 90,
                height: 90,
                file_size: Some(900),
            },
            PhotoSize {
                file_id: id.to_string(),
                width: 1280,
                height: 960,
                file_size: Some(120_000),
            },
        ])
    }

    fn location(lat: f64, lng: f64) -> InboundEvent {
        InboundEvent::Location(Coordinates::new(lat, lng).unwrap())
    }

    fn apply(session: &mut Session, event: InboundEvent) -> Effect {
        session.apply(&event, DialogueContext::default()).unwrap()
    }

    fn with_places() -> DialogueContext {
        DialogueContext {
            has_saved_places: true,
        }
    }

    /// Drives a fresh session into the given state.
    fn session_in(state: DialogueState) -> Session {
        let mut session = Session::new();
        match state {
            DialogueState::Idle => {}
            DialogueState::AwaitingNearestLocation => {
                session
                    .apply(&command(Command::Nearest), with_places())
                    .unwrap();
            }
            _ => {
                apply(&mut session, command(Command::Add));
                if state != DialogueState::AwaitingName {
                    apply(&mut session, text("Central Park"));
                }
                if state == DialogueState::AwaitingLocation {
                    apply(&mut session, photo("photo-1"));
                }
            }
        }
        assert_eq!(session.state(), state);
        session
    }

    #[test]
    fn add_flow_collects_name_photo_and_typed_coordinates() {
        let mut session = Session::new();

        assert_eq!(apply(&mut session, command(Command::Add)), Effect::Reply(Reply::AskName));
        assert_eq!(session.state(), DialogueState::AwaitingName);

        assert_eq!(apply(&mut session, text("Central Park")), Effect::Reply(Reply::AskPhoto));
        assert_eq!(session.state(), DialogueState::AwaitingPhoto);

        assert_eq!(apply(&mut session, photo("photo-1")), Effect::Reply(Reply::AskLocation));
        assert_eq!(session.state(), DialogueState::AwaitingLocation);

        let effect = apply(&mut session, text("40.785, -73.968"));
        assert_eq!(
            effect,
            Effect::SavePlace(CompletedDraft {
                name: "Central Park".to_string(),
                photo: PhotoRef::new("photo-1"),
                coordinates: Coordinates::new(40.785, -73.968).unwrap(),
            })
        );
        assert!(session.is_pristine());
    }

    #[test]
    fn native_location_completes_add_flow() {
        let mut session = session_in(DialogueState::AwaitingLocation);
        let effect = apply(&mut session, location(58.39, 26.35));
        assert!(matches!(effect, Effect::SavePlace(ref d) if d.coordinates.latitude() == 58.39));
        assert_eq!(session.state(), DialogueState::Idle);
    }

    #[test]
    fn invalid_name_holds_state() {
        let mut session = session_in(DialogueState::AwaitingName);
        assert_eq!(apply(&mut session, text("12345")), Effect::Reply(Reply::InvalidName));
        assert_eq!(session.state(), DialogueState::AwaitingName);
    }

    #[test]
    fn overlong_name_is_refused() {
        let mut session = session_in(DialogueState::AwaitingName);
        let name = "a".repeat(crate::domain::place::MAX_NAME_LENGTH + 1);
        assert_eq!(apply(&mut session, text(&name)), Effect::Reply(Reply::NameTooLong));
        assert!(session.draft().name.is_none());
    }

    #[test]
    fn non_photo_in_photo_step_keeps_name() {
        let mut session = session_in(DialogueState::AwaitingPhoto);
        assert_eq!(apply(&mut session, text("here you go")), Effect::Reply(Reply::ExpectedPhoto));
        assert_eq!(apply(&mut session, InboundEvent::Photo(vec![])), Effect::Reply(Reply::ExpectedPhoto));
        assert_eq!(session.state(), DialogueState::AwaitingPhoto);
        assert_eq!(session.draft().name.as_deref(), Some("Central Park"));
    }

    #[test]
    fn malformed_coordinates_keep_name_and_photo() {
        let mut session = session_in(DialogueState::AwaitingLocation);
        assert_eq!(
            apply(&mut session, text("40.785,-73.968")),
            Effect::Reply(Reply::InvalidCoordinates)
        );
        assert_eq!(session.state(), DialogueState::AwaitingLocation);
        assert_eq!(session.draft().photo, Some(PhotoRef::new("photo-1")));

        // retry succeeds without restarting the flow
        assert!(matches!(
            apply(&mut session, text("40.785, -73.968")),
            Effect::SavePlace(_)
        ));
    }

    #[test]
    fn cancel_from_every_state_discards_draft() {
        for state in DialogueState::ALL {
            let mut session = session_in(state);
            assert_eq!(apply(&mut session, command(Command::Cancel)), Effect::Reply(Reply::Cancelled));
            assert_eq!(session.state(), DialogueState::Idle);
            assert!(session.draft().is_empty());
        }
    }

    #[test]
    fn nearest_without_places_stays_idle() {
        let mut session = Session::new();
        assert_eq!(apply(&mut session, command(Command::Nearest)), Effect::Reply(Reply::NoPlaces));
        assert_eq!(session.state(), DialogueState::Idle);
    }

    #[test]
    fn nearest_with_places_waits_for_location() {
        let mut session = Session::new();
        let effect = session.apply(&command(Command::Nearest), with_places()).unwrap();
        assert_eq!(effect, Effect::Reply(Reply::AskCurrentLocation));

        assert_eq!(
            apply(&mut session, text("Times Square")),
            Effect::Reply(Reply::ExpectedCurrentLocation)
        );
        assert_eq!(session.state(), DialogueState::AwaitingNearestLocation);

        let effect = apply(&mut session, location(10.0, 10.0));
        assert_eq!(effect, Effect::FindNearest(Coordinates::new(10.0, 10.0).unwrap()));
        assert_eq!(session.state(), DialogueState::Idle);
    }

    #[test]
    fn typed_coordinates_do_not_answer_nearest() {
        let mut session = session_in(DialogueState::AwaitingNearestLocation);
        assert_eq!(
            apply(&mut session, text("10.0, 10.0")),
            Effect::Reply(Reply::ExpectedCurrentLocation)
        );
    }

    #[test]
    fn starting_another_flow_mid_flow_is_refused() {
        let mut session = session_in(DialogueState::AwaitingPhoto);
        assert_eq!(apply(&mut session, command(Command::Add)), Effect::Reply(Reply::FlowInProgress));
        let effect = session.apply(&command(Command::Nearest), with_places()).unwrap();
        assert_eq!(effect, Effect::Reply(Reply::FlowInProgress));
        assert_eq!(session.state(), DialogueState::AwaitingPhoto);
        assert_eq!(session.draft().name.as_deref(), Some("Central Park"));
    }

    #[test]
    fn stateless_commands_leave_flow_untouched() {
        let mut session = session_in(DialogueState::AwaitingLocation);
        assert_eq!(apply(&mut session, command(Command::List)), Effect::ListPlaces);
        assert_eq!(apply(&mut session, command(Command::Help)), Effect::Reply(Reply::Help));
        assert_eq!(apply(&mut session, command(Command::Reset)), Effect::RequestResetConfirmation);
        assert_eq!(session.state(), DialogueState::AwaitingLocation);
        assert!(session.draft().photo.is_some());
    }

    #[test]
    fn idle_payloads_get_a_hint() {
        let mut session = Session::new();
        assert_eq!(apply(&mut session, text("hello")), Effect::Reply(Reply::Unrecognized));
        assert_eq!(apply(&mut session, location(1.0, 1.0)), Effect::Reply(Reply::Unrecognized));
        assert_eq!(
            apply(&mut session, command(Command::Unknown("weather".into()))),
            Effect::Reply(Reply::Unrecognized)
        );
        assert!(session.is_pristine());
    }

    #[test]
    fn confirmation_answer_resets_session() {
        let mut session = session_in(DialogueState::AwaitingName);
        let effect = apply(
            &mut session,
            InboundEvent::Callback {
                callback_id: "cb-1".to_string(),
                data: "Yes".to_string(),
            },
        );
        assert_eq!(
            effect,
            Effect::ResolveReset {
                answer: ConfirmationAnswer::Yes,
                callback_id: "cb-1".to_string(),
            }
        );
        assert!(session.is_pristine());
    }

    #[test]
    fn unknown_callback_is_only_acknowledged() {
        let mut session = session_in(DialogueState::AwaitingPhoto);
        let effect = apply(
            &mut session,
            InboundEvent::Callback {
                callback_id: "cb-2".to_string(),
                data: "Maybe".to_string(),
            },
        );
        assert_eq!(effect, Effect::AcknowledgeCallback { callback_id: "cb-2".to_string() });
        assert_eq!(session.state(), DialogueState::AwaitingPhoto);
    }

    proptest! {
        #[test]
        fn letterless_names_never_advance(name in "[0-9 .,!?#%&*()_+=-]{0,30}") {
            let mut session = session_in(DialogueState::AwaitingName);
            let effect = apply(&mut session, InboundEvent::Text(name));
            prop_assert_eq!(effect, Effect::Reply(Reply::InvalidName));
            prop_assert_eq!(session.state(), DialogueState::AwaitingName);
        }

        #[test]
        fn native_locations_always_complete(lat in -90.0f64..=90.0, lng in -180.0f64..=180.0) {
            let mut session = session_in(DialogueState::AwaitingLocation);
            let effect = apply(&mut session, location(lat, lng));
            prop_assert!(matches!(effect, Effect::SavePlace(_)));
            prop_assert_eq!(session.state(), DialogueState::Idle);
        }
    }
}
