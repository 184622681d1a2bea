use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    Json,
};
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::error::AppError;
use crate::meals::dto::{MealBody, MealResponse, MealsResponse};
use crate::meals::repo;
use crate::meals::summary::{summarize, Summary};
use crate::session::{session_cookie, OptionalSessionId, SessionId};
use crate::state::AppState;
use crate::validate::ValidatedJson;

#[instrument(skip(state))]
pub async fn list_meals(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
) -> Result<Json<MealsResponse>, AppError> {
    let meals = repo::list_by_session(&state.db, session_id).await?;
    Ok(Json(MealsResponse { meals }))
}

#[instrument(skip(state))]
pub async fn get_meal(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
    Path(id): Path<Uuid>,
) -> Result<Json<MealResponse>, AppError> {
    let meal = repo::find_by_id(&state.db, session_id, id).await?;
    Ok(Json(MealResponse { meal }))
}

#[instrument(skip(state))]
pub async fn summary(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
) -> Result<Json<Summary>, AppError> {
    let flags = repo::diet_flags(&state.db, session_id).await?;
    Ok(Json(summarize(&flags)))
}

/// The only unguarded operation: establishes the session scope, minting a
/// token when the request carried none.
#[instrument(skip(state, body))]
pub async fn create_meal(
    State(state): State<AppState>,
    OptionalSessionId(session): OptionalSessionId,
    ValidatedJson(body): ValidatedJson<MealBody>,
) -> Result<(StatusCode, HeaderMap), AppError> {
    let mut headers = HeaderMap::new();

    let session_id = match session {
        Some(id) => id,
        None => {
            let minted = Uuid::new_v4();
            let cookie = session_cookie(
                &state.config.session.cookie_name,
                minted,
                state.config.session.ttl_days,
            );
            // Best-effort metadata on an otherwise-successful response
            if let Ok(value) = cookie.parse() {
                headers.insert(header::SET_COOKIE, value);
            }
            debug!(session_id = %minted, "minted session token");
            minted
        }
    };

    repo::insert(
        &state.db,
        Uuid::new_v4(),
        session_id,
        &body.name,
        &body.description,
        body.datetime,
        body.diet,
    )
    .await?;

    Ok((StatusCode::CREATED, headers))
}

#[instrument(skip(state, body))]
pub async fn update_meal(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
    Path(id): Path<Uuid>,
    ValidatedJson(body): ValidatedJson<MealBody>,
) -> Result<StatusCode, AppError> {
    let affected = repo::update(
        &state.db,
        session_id,
        id,
        &body.name,
        &body.description,
        body.datetime,
        body.diet,
    )
    .await?;

    if affected == 0 {
        return Err(AppError::NotFound);
    }
    Ok(StatusCode::OK)
}

#[instrument(skip(state))]
pub async fn delete_meal(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let affected = repo::delete(&state.db, session_id, id).await?;

    if affected == 0 {
        return Err(AppError::NotFound);
    }
    Ok(StatusCode::OK)
}
