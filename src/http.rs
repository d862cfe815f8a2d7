use crate::{
    backend::{RentalBackend, Repository, UnitFilter},
    error::ApiError,
    overlap::{DateRange, Decision},
    record::Record,
    reservations::Reservations,
    types::{
        Address, Booking, BookingDraft, BookingPatch, FinancialTransaction, MaintenanceTicket,
        Message, MessageDraft, Property, Report, Review, Unit, User,
    },
};
use axum::{
    extract::{FromRequest, Path, Query, Request, State},
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
    routing::get,
    Json, Router,
};
use axum_valid::Valid;
use chrono::{DateTime, Utc};
use futures::Stream;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::convert::Infallible;
use tokio::sync::broadcast;
use tokio_stream::{
    wrappers::{errors::BroadcastStreamRecvError, BroadcastStream},
    StreamExt,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{debug, info, warn};
use uuid::Uuid;
use validator::Validate;

/// Messages buffered per chat subscriber before it starts lagging.
const CHAT_FEED_CAPACITY: usize = 256;

#[derive(Clone)]
pub struct AppState<T: RentalBackend> {
    backend: T,
    reservations: Reservations,
    chat_feed: broadcast::Sender<Message>,
}

/// A validated JSON body. Rejections use the same error body as every other failure.
struct ValidJson<T>(T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Valid(Json(value)) = Valid::<Json<T>>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AvailabilityQuery {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UnitRating {
    unit_id: Uuid,
    average_rating: Option<f64>,
    review_count: usize,
}

pub fn create_app<T: RentalBackend>(backend: T) -> Router {
    let (chat_feed, _) = broadcast::channel(CHAT_FEED_CAPACITY);
    let state = AppState {
        backend,
        reservations: Reservations::default(),
        chat_feed,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let bookings = Router::new()
        .route("/bookings", get(list::<T, Booking>).post(create_booking))
        .route(
            "/bookings/{id}",
            get(fetch::<T, Booking>)
                .patch(reschedule_booking)
                .delete(remove::<T, Booking>),
        )
        .route("/bookings/unit/{unit_id}", get(bookings_for_unit))
        .route("/bookings/user/{user_id}", get(bookings_for_user));

    let chats = Router::new()
        .route("/messages", get(list::<T, Message>).post(create_message))
        .route(
            "/messages/{id}",
            get(fetch::<T, Message>)
                .patch(update::<T, Message>)
                .delete(remove::<T, Message>),
        )
        .route("/chats/{chat_id}/messages", get(messages_in_chat))
        .route("/chats/{chat_id}/stream", get(chat_stream));

    let search = Router::new()
        .route("/properties/owner/{owner_id}", get(properties_by_owner))
        .route("/properties/type/{property_type}", get(properties_by_type))
        .route("/properties/{id}/units", get(units_by_property))
        .route("/units/search", get(search_units))
        .route("/units/{id}/availability", get(unit_availability))
        .route("/units/{id}/rating", get(unit_rating));

    Router::new()
        .merge(collection::<T, Address>("/addresses"))
        .merge(collection::<T, User>("/users"))
        .merge(collection::<T, Property>("/properties"))
        .merge(collection::<T, Unit>("/units"))
        .merge(collection::<T, Review>("/reviews"))
        .merge(collection::<T, FinancialTransaction>("/transactions"))
        .merge(collection::<T, MaintenanceTicket>("/maintenance-tickets"))
        .merge(collection::<T, Report>("/reports"))
        .merge(bookings)
        .merge(chats)
        .merge(search)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Plain create/read/update/delete routes for one kind of record.
fn collection<T, R>(path: &str) -> Router<AppState<T>>
where
    T: RentalBackend + Repository<R>,
    R: Record,
{
    Router::new()
        .route(path, get(list::<T, R>).post(create::<T, R>))
        .route(
            &format!("{path}/{{id}}"),
            get(fetch::<T, R>)
                .patch(update::<T, R>)
                .delete(remove::<T, R>),
        )
}

async fn list<T, R>(State(state): State<AppState<T>>) -> Result<Json<Vec<R>>, ApiError>
where
    T: RentalBackend + Repository<R>,
    R: Record,
{
    Ok(Json(Repository::<R>::all(&state.backend)?))
}

async fn fetch<T, R>(
    State(state): State<AppState<T>>,
    Path(id): Path<Uuid>,
) -> Result<Json<R>, ApiError>
where
    T: RentalBackend + Repository<R>,
    R: Record,
{
    Ok(Json(Repository::<R>::find(&state.backend, id)?))
}

async fn create<T, R>(
    State(state): State<AppState<T>>,
    ValidJson(draft): ValidJson<R::Draft>,
) -> Result<(StatusCode, Json<R>), ApiError>
where
    T: RentalBackend + Repository<R>,
    R: Record,
{
    let record = R::from_draft(Uuid::new_v4(), Utc::now(), draft);
    let record = Repository::<R>::insert(&state.backend, record)?;
    info!(id = %record.id(), "Created {}", R::NAME);
    Ok((StatusCode::CREATED, Json(record)))
}

async fn update<T, R>(
    State(state): State<AppState<T>>,
    Path(id): Path<Uuid>,
    ValidJson(patch): ValidJson<R::Patch>,
) -> Result<Json<R>, ApiError>
where
    T: RentalBackend + Repository<R>,
    R: Record,
{
    let mut record = Repository::<R>::find(&state.backend, id)?;
    record.apply(patch);
    Ok(Json(Repository::<R>::save(&state.backend, record)?))
}

async fn remove<T, R>(
    State(state): State<AppState<T>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
    T: RentalBackend + Repository<R>,
    R: Record,
{
    Repository::<R>::remove(&state.backend, id)?;
    info!(%id, "Removed {}", R::NAME);
    Ok(StatusCode::NO_CONTENT)
}

async fn create_booking<T: RentalBackend>(
    State(state): State<AppState<T>>,
    ValidJson(draft): ValidJson<BookingDraft>,
) -> Result<(StatusCode, Json<Booking>), ApiError> {
    let booking = state.reservations.reserve(&state.backend, draft)?;
    Ok((StatusCode::CREATED, Json(booking)))
}

async fn reschedule_booking<T: RentalBackend>(
    State(state): State<AppState<T>>,
    Path(id): Path<Uuid>,
    ValidJson(patch): ValidJson<BookingPatch>,
) -> Result<Json<Booking>, ApiError> {
    Ok(Json(state.reservations.reschedule(&state.backend, id, patch)?))
}

/// Bookings of a unit that have not ended yet.
async fn bookings_for_unit<T: RentalBackend>(
    State(state): State<AppState<T>>,
    Path(unit_id): Path<Uuid>,
) -> Result<Json<Vec<Booking>>, ApiError> {
    let now = Utc::now();
    let bookings = state
        .backend
        .bookings_for_unit(unit_id)?
        .into_iter()
        .filter(|booking| !booking.is_past(now))
        .collect();
    Ok(Json(bookings))
}

async fn bookings_for_user<T: RentalBackend>(
    State(state): State<AppState<T>>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<Booking>>, ApiError> {
    Ok(Json(state.backend.bookings_for_user(user_id)?))
}

async fn properties_by_owner<T: RentalBackend>(
    State(state): State<AppState<T>>,
    Path(owner_id): Path<Uuid>,
) -> Result<Json<Vec<Property>>, ApiError> {
    Ok(Json(state.backend.properties_by_owner(owner_id)?))
}

async fn properties_by_type<T: RentalBackend>(
    State(state): State<AppState<T>>,
    Path(property_type): Path<String>,
) -> Result<Json<Vec<Property>>, ApiError> {
    Ok(Json(state.backend.properties_by_type(&property_type)?))
}

async fn units_by_property<T: RentalBackend>(
    State(state): State<AppState<T>>,
    Path(property_id): Path<Uuid>,
) -> Result<Json<Vec<Unit>>, ApiError> {
    Repository::<Property>::find(&state.backend, property_id)?;
    Ok(Json(state.backend.units_by_property(property_id)?))
}

async fn search_units<T: RentalBackend>(
    State(state): State<AppState<T>>,
    Query(filter): Query<UnitFilter>,
) -> Result<Json<Vec<Unit>>, ApiError> {
    Ok(Json(state.backend.search_units(&filter)?))
}

async fn unit_availability<T: RentalBackend>(
    State(state): State<AppState<T>>,
    Path(unit_id): Path<Uuid>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<Decision>, ApiError> {
    let range = DateRange::new(query.start, query.end)?;
    Ok(Json(
        state
            .reservations
            .availability(&state.backend, unit_id, &range)?,
    ))
}

async fn unit_rating<T: RentalBackend>(
    State(state): State<AppState<T>>,
    Path(unit_id): Path<Uuid>,
) -> Result<Json<UnitRating>, ApiError> {
    Repository::<Unit>::find(&state.backend, unit_id)?;
    let reviews = state.backend.reviews_for_unit(unit_id)?;

    let review_count = reviews.len();
    let average_rating = (review_count > 0).then(|| {
        let total: f64 = reviews.iter().map(|review| f64::from(review.rating)).sum();
        total / review_count as f64
    });

    Ok(Json(UnitRating {
        unit_id,
        average_rating,
        review_count,
    }))
}

async fn create_message<T: RentalBackend>(
    State(state): State<AppState<T>>,
    ValidJson(draft): ValidJson<MessageDraft>,
) -> Result<(StatusCode, Json<Message>), ApiError> {
    let message = Message::from_draft(Uuid::new_v4(), Utc::now(), draft);
    let message = Repository::<Message>::insert(&state.backend, message)?;

    if state.chat_feed.send(message.clone()).is_err() {
        debug!(chat_id = %message.chat_id, "No chat listeners");
    }
    Ok((StatusCode::CREATED, Json(message)))
}

async fn messages_in_chat<T: RentalBackend>(
    State(state): State<AppState<T>>,
    Path(chat_id): Path<Uuid>,
) -> Result<Json<Vec<Message>>, ApiError> {
    Ok(Json(state.backend.messages_in_chat(chat_id)?))
}

/// New messages of one chat as server-sent events.
async fn chat_stream<T: RentalBackend>(
    State(state): State<AppState<T>>,
    Path(chat_id): Path<Uuid>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let stream =
        BroadcastStream::new(state.chat_feed.subscribe()).filter_map(move |message| match message {
            Ok(message) if message.chat_id == chat_id => Event::default()
                .event("message")
                .json_data(&message)
                .ok()
                .map(Ok),
            Ok(_) => None,
            Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                warn!(%chat_id, skipped, "Chat subscriber lagged behind");
                None
            }
        });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
