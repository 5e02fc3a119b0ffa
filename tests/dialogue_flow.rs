//! End-to-end dialogue scenarios.
//!
//! Drives `PlaceBot` with in-memory adapters, a recording transport, photos
//! on a temporary directory and a scripted distance provider.

use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;

use place_keeper::adapters::chat::Sent;
use place_keeper::adapters::{
    InMemoryPlaceRepository, InMemorySessionStore, LocalPhotoStorage, MockDistanceProvider,
    RecordingTransport,
};
use place_keeper::application::{NearestPlaceMatcher, PlaceBot};
use place_keeper::domain::dialogue::{
    ConfirmationAnswer, DialogueState, Inbound, InboundEvent, PhotoSize, Reply,
};
use place_keeper::domain::foundation::{ConversationId, Coordinates};
use place_keeper::domain::nearest::DistanceMatrix;
use place_keeper::ports::{PlaceRepository, SessionStore};

// =============================================================================
// Test Infrastructure
// =============================================================================

const CHAT: i64 = 4242;

const CENTRAL_PARK: (f64, f64) = (40.785091, -73.968285);
const BROOKLYN_BRIDGE: (f64, f64) = (40.706086, -73.996864);

fn coordinates((lat, lng): (f64, f64)) -> Coordinates {
    Coordinates::new(lat, lng).unwrap()
}

struct Harness {
    bot: PlaceBot,
    transport: RecordingTransport,
    sessions: InMemorySessionStore,
    places: InMemoryPlaceRepository,
    photos: TempDir,
}

impl Harness {
    fn new(provider: MockDistanceProvider) -> Self {
        let transport = RecordingTransport::new().with_photo("park-photo", b"\xff\xd8park".to_vec());
        let sessions = InMemorySessionStore::new();
        let places = InMemoryPlaceRepository::new();
        let photos = TempDir::new().unwrap();

        let bot = PlaceBot::new(
            Arc::new(sessions.clone()),
            Arc::new(places.clone()),
            Arc::new(LocalPhotoStorage::new(photos.path())),
            Arc::new(transport.clone()),
            NearestPlaceMatcher::new(Arc::new(provider), 1, Duration::from_secs(5)),
        );

        Self {
            bot,
            transport,
            sessions,
            places,
            photos,
        }
    }

    async fn send(&self, event: InboundEvent) {
        self.bot
            .handle(Inbound::new(ConversationId::new(CHAT), event))
            .await
            .expect("event handled");
    }

    async fn text(&self, text: &str) {
        self.send(InboundEvent::from_text(text)).await;
    }

    async fn state(&self) -> DialogueState {
        self.sessions
            .load(ConversationId::new(CHAT))
            .await
            .unwrap()
            .state()
    }

    async fn add_place(&self, name: &str, photo: &str, location: (f64, f64)) {
        self.text("/add").await;
        self.text(name).await;
        self.send(photo_event(photo)).await;
        self.send(InboundEvent::Location(coordinates(location))).await;
    }

    fn user_photo_dir(&self) -> std::path::PathBuf {
        self.photos.path().join(format!("user_{}", CHAT))
    }
}

fn photo_event(file_id: &str) -> InboundEvent {
    InboundEvent::Photo(vec![
        PhotoSize {
            file_id: format!("{file_id}-small"),
            width: 90,
            height: 67,
            file_size: Some(1_500),
        },
        PhotoSize {
            file_id: file_id.to_string(),
            width: 1280,
            height: 960,
            file_size: Some(150_000),
        },
    ])
}

// =============================================================================
// Add + list
// =============================================================================

#[tokio::test]
async fn central_park_is_saved_and_listed() {
    let h = Harness::new(MockDistanceProvider::new());

    h.text("/add").await;
    assert_eq!(h.state().await, DialogueState::AwaitingName);
    h.text("Central Park").await;
    assert_eq!(h.state().await, DialogueState::AwaitingPhoto);
    h.send(photo_event("park-photo")).await;
    assert_eq!(h.state().await, DialogueState::AwaitingLocation);
    h.text("40.785, -73.968").await;

    assert_eq!(h.state().await, DialogueState::Idle);
    assert_eq!(h.transport.last_text(), Some(Reply::PlaceSaved.text()));

    h.transport.clear();
    h.text("/list").await;

    let sent = h.transport.sent();
    assert_eq!(sent.len(), 2);
    match &sent[0] {
        Sent::Photo { photo, caption, .. } => {
            assert_eq!(caption, "Central Park");
            assert_eq!(photo, b"\xff\xd8park");
        }
        other => panic!("expected photo, got {:?}", other),
    }
    assert_eq!(
        sent[1],
        Sent::Location {
            chat: ConversationId::new(CHAT),
            coordinates: Coordinates::new(40.785, -73.968).unwrap(),
        }
    );
}

#[tokio::test]
async fn largest_photo_variant_is_stored() {
    let h = Harness::new(MockDistanceProvider::new());

    h.add_place("Central Park", "park-photo", CENTRAL_PARK).await;

    let stored: Vec<_> = std::fs::read_dir(h.user_photo_dir())
        .unwrap()
        .map(|entry| std::fs::read(entry.unwrap().path()).unwrap())
        .collect();
    assert_eq!(stored, vec![b"\xff\xd8park".to_vec()]);
}

#[tokio::test]
async fn invalid_inputs_are_reprompted_without_losing_progress() {
    let h = Harness::new(MockDistanceProvider::new());

    h.text("/add").await;
    h.text("12345").await;
    assert_eq!(h.transport.last_text(), Some(Reply::InvalidName.text()));
    assert_eq!(h.state().await, DialogueState::AwaitingName);

    h.text("Central Park").await;
    h.text("not a photo").await;
    assert_eq!(h.transport.last_text(), Some(Reply::ExpectedPhoto.text()));
    assert_eq!(h.state().await, DialogueState::AwaitingPhoto);

    h.send(photo_event("park-photo")).await;
    h.text("40.785,-73.968").await;
    assert_eq!(h.transport.last_text(), Some(Reply::InvalidCoordinates.text()));
    h.text("95.0, 10.0").await;
    assert_eq!(h.transport.last_text(), Some(Reply::InvalidCoordinates.text()));
    assert_eq!(h.state().await, DialogueState::AwaitingLocation);

    h.text("-33.856784, 151.215297").await;
    assert_eq!(h.transport.last_text(), Some(Reply::PlaceSaved.text()));
    let saved = h.places.list_all(ConversationId::new(CHAT)).await.unwrap();
    assert_eq!(saved[0].name(), "Central Park");
}

#[tokio::test]
async fn cancel_discards_draft() {
    let h = Harness::new(MockDistanceProvider::new());

    h.text("/add").await;
    h.text("Central Park").await;
    h.text("/cancel").await;

    assert_eq!(h.transport.last_text(), Some(Reply::Cancelled.text()));
    assert!(h.sessions.is_empty().await);
    assert_eq!(h.places.count(ConversationId::new(CHAT)).await.unwrap(), 0);
}

#[tokio::test]
async fn list_shows_ten_newest_first() {
    let h = Harness::new(MockDistanceProvider::new());
    for i in 0..11 {
        h.add_place(&format!("Place {i}"), "park-photo", CENTRAL_PARK).await;
    }
    h.transport.clear();

    h.text("/list").await;

    let captions: Vec<_> = h
        .transport
        .sent()
        .into_iter()
        .filter_map(|sent| match sent {
            Sent::Photo { caption, .. } => Some(caption),
            _ => None,
        })
        .collect();
    assert_eq!(captions.len(), 10);
    assert_eq!(captions[0], "Place 10");
    assert_eq!(captions[9], "Place 1");
}

// =============================================================================
// Nearest
// =============================================================================

#[tokio::test]
async fn nearest_without_places_gives_guidance() {
    let h = Harness::new(MockDistanceProvider::new());

    h.text("/nearest").await;

    assert_eq!(h.transport.last_text(), Some(Reply::NoPlaces.text()));
    assert_eq!(h.state().await, DialogueState::Idle);
}

#[tokio::test]
async fn nearest_reports_close_places_and_edits_status() {
    let provider = MockDistanceProvider::new()
        .with_distance(coordinates(CENTRAL_PARK), "0,3 km")
        .with_distance(coordinates(BROOKLYN_BRIDGE), "9.4 km");
    let h = Harness::new(provider);
    h.add_place("Central Park", "park-photo", CENTRAL_PARK).await;
    h.add_place("Brooklyn Bridge", "park-photo", BROOKLYN_BRIDGE).await;
    h.transport.clear();

    h.text("/nearest").await;
    assert_eq!(h.state().await, DialogueState::AwaitingNearestLocation);
    h.send(InboundEvent::Location(coordinates((40.7812, -73.9665)))).await;

    let sent = h.transport.sent();
    let status = match &sent[1] {
        Sent::Text { message, text, .. } => {
            assert_eq!(text, &Reply::Searching.text());
            *message
        }
        other => panic!("expected status message, got {:?}", other),
    };
    assert_eq!(sent[2].text(), Some("Central Park"));
    assert!(matches!(sent[3], Sent::Location { .. }));
    assert_eq!(
        sent[4],
        Sent::Edit {
            chat: ConversationId::new(CHAT),
            message: status,
            text: Reply::NearFound(1).text(),
        }
    );
    assert_eq!(sent.len(), 5);
    assert_eq!(h.state().await, DialogueState::Idle);
}

#[tokio::test]
async fn zero_results_means_nothing_nearby() {
    let provider = MockDistanceProvider::new();
    let h = Harness::new(provider);
    h.add_place("Central Park", "park-photo", CENTRAL_PARK).await;

    h.text("/nearest").await;
    h.send(InboundEvent::Location(coordinates((51.5, -0.12)))).await;

    assert_eq!(h.transport.last_text(), Some(Reply::NoneNearby.text()));
}

#[tokio::test]
async fn over_query_limit_surfaces_status_after_reported_places() {
    let provider = MockDistanceProvider::new()
        .with_distance(coordinates(CENTRAL_PARK), "0.2 km")
        .with_matrix(
            coordinates(BROOKLYN_BRIDGE),
            DistanceMatrix::failed("OVER_QUERY_LIMIT"),
        );
    let h = Harness::new(provider);
    h.add_place("Central Park", "park-photo", CENTRAL_PARK).await;
    h.add_place("Brooklyn Bridge", "park-photo", BROOKLYN_BRIDGE).await;
    h.transport.clear();

    h.text("/nearest").await;
    h.send(InboundEvent::Location(coordinates((40.7812, -73.9665)))).await;

    let texts = h.transport.texts();
    assert!(texts.contains(&"Central Park".to_string()));
    assert_eq!(
        h.transport.last_text(),
        Some(Reply::ProviderError("OVER_QUERY_LIMIT".to_string()).text())
    );
    assert!(h
        .transport
        .last_text()
        .unwrap()
        .contains("Error: OVER_QUERY_LIMIT"));
}

#[tokio::test]
async fn add_during_nearest_is_refused_and_flow_kept() {
    let h = Harness::new(MockDistanceProvider::new());
    h.add_place("Central Park", "park-photo", CENTRAL_PARK).await;

    h.text("/nearest").await;
    h.text("/add").await;

    assert_eq!(h.transport.last_text(), Some(Reply::FlowInProgress.text()));
    assert_eq!(h.state().await, DialogueState::AwaitingNearestLocation);
}

// =============================================================================
// Reset
// =============================================================================

async fn confirm(h: &Harness, answer: ConfirmationAnswer) {
    h.send(InboundEvent::Callback {
        callback_id: "cb-1".to_string(),
        data: answer.label().to_string(),
    })
    .await;
}

#[tokio::test]
async fn confirmed_reset_removes_places_and_photos() {
    let h = Harness::new(MockDistanceProvider::new());
    h.add_place("Central Park", "park-photo", CENTRAL_PARK).await;
    h.add_place("Brooklyn Bridge", "park-photo", BROOKLYN_BRIDGE).await;
    assert!(h.user_photo_dir().exists());

    h.text("/reset").await;
    match h.transport.sent().last() {
        Some(Sent::Confirmation { text, answers, .. }) => {
            assert_eq!(text, &Reply::ConfirmReset.text());
            assert_eq!(answers, &vec![ConfirmationAnswer::Yes, ConfirmationAnswer::No]);
        }
        other => panic!("expected confirmation, got {:?}", other),
    }

    confirm(&h, ConfirmationAnswer::Yes).await;

    assert!(h.transport.sent().contains(&Sent::CallbackAck {
        callback_id: "cb-1".to_string()
    }));
    assert_eq!(h.transport.last_text(), Some(Reply::PlacesDeleted.text()));
    assert!(!h.places.has_user(ConversationId::new(CHAT)).await);
    assert!(!h.user_photo_dir().exists());

    h.text("/list").await;
    assert_eq!(h.transport.last_text(), Some(Reply::NoPlaces.text()));
}

#[tokio::test]
async fn declined_reset_keeps_everything() {
    let h = Harness::new(MockDistanceProvider::new());
    h.add_place("Central Park", "park-photo", CENTRAL_PARK).await;

    h.text("/reset").await;
    confirm(&h, ConfirmationAnswer::No).await;

    assert_eq!(h.transport.last_text(), Some(Reply::PlacesKept.text()));
    assert_eq!(h.places.count(ConversationId::new(CHAT)).await.unwrap(), 1);
    assert!(h.user_photo_dir().exists());
}

#[tokio::test]
async fn reset_answer_ends_a_pending_flow() {
    let h = Harness::new(MockDistanceProvider::new());
    h.add_place("Central Park", "park-photo", CENTRAL_PARK).await;
    h.text("/reset").await;
    h.text("/add").await;

    confirm(&h, ConfirmationAnswer::No).await;

    assert_eq!(h.state().await, DialogueState::Idle);
}
