use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{OriginalUri, Path, Query, State},
    http::StatusCode,
    routing::{get, patch},
};
use axum_extra::extract::WithRejection;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait, Set};
use serde::Deserialize;

use crate::{
    AppState,
    entities::{actor, film, film_actor},
    error::{AppError, AppResult},
    models::ActorPayload,
    query::{self, Page, PageQuery},
};

use super::films::{FilmFilter, find_film};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/actors/", get(list_actors).post(create_actor))
        .route("/api/actors/{actor_id}", get(read_actor).put(update_actor).delete(delete_actor))
        .route("/api/actors/{actor_id}/films", get(read_films))
        .route("/api/actors/{actor_id}/films/{film_id}", patch(add_film).delete(remove_film))
}

#[derive(Debug, Default, Deserialize)]
pub struct ActorFilter {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

pub(crate) async fn find_actor(db: &DatabaseConnection, actor_id: i32) -> AppResult<actor::Model> {
    actor::Entity::find_by_id(actor_id).one(db).await?.ok_or(AppError::NotFound)
}

async fn list_actors(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
    Query(filter): Query<ActorFilter>,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<Page<actor::Model>>> {
    let select = query::contains_filters(
        actor::Entity::find(),
        &[
            (actor::Column::FirstName, filter.first_name.as_str()),
            (actor::Column::LastName, filter.last_name.as_str()),
        ],
    );
    let page = query::paginate(&state.db, select, page.params(), uri.path()).await?;
    Ok(Json(page))
}

async fn read_actor(
    State(state): State<Arc<AppState>>,
    Path(actor_id): Path<i32>,
) -> AppResult<Json<actor::Model>> {
    let actor = find_actor(&state.db, actor_id).await?;
    Ok(Json(actor))
}

async fn create_actor(
    State(state): State<Arc<AppState>>,
    WithRejection(Json(payload), _): WithRejection<Json<ActorPayload>, AppError>,
) -> AppResult<(StatusCode, Json<actor::Model>)> {
    payload.validate()?;

    let actor = actor::ActiveModel {
        first_name: Set(payload.first_name),
        last_name: Set(payload.last_name),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(actor)))
}

async fn update_actor(
    State(state): State<Arc<AppState>>,
    Path(actor_id): Path<i32>,
    WithRejection(Json(payload), _): WithRejection<Json<ActorPayload>, AppError>,
) -> AppResult<Json<actor::Model>> {
    payload.validate()?;

    let mut actor: actor::ActiveModel = find_actor(&state.db, actor_id).await?.into();
    actor.first_name = Set(payload.first_name);
    actor.last_name = Set(payload.last_name);
    let actor = actor.update(&state.db).await?;

    Ok(Json(actor))
}

async fn delete_actor(
    State(state): State<Arc<AppState>>,
    Path(actor_id): Path<i32>,
) -> AppResult<Json<actor::Model>> {
    let actor = find_actor(&state.db, actor_id).await?;
    actor.clone().delete(&state.db).await?;
    Ok(Json(actor))
}

async fn read_films(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
    Path(actor_id): Path<i32>,
    Query(filter): Query<FilmFilter>,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<Page<film::Model>>> {
    let actor = find_actor(&state.db, actor_id).await?;

    let select = query::contains_filters(
        actor.find_related(film::Entity),
        &[
            (film::Column::Title, filter.title.as_str()),
            (film::Column::Description, filter.description.as_str()),
        ],
    );
    let page = query::paginate(&state.db, select, page.params(), uri.path()).await?;

    Ok(Json(page))
}

async fn add_film(
    State(state): State<Arc<AppState>>,
    Path((actor_id, film_id)): Path<(i32, i32)>,
) -> AppResult<(StatusCode, Json<film::Model>)> {
    find_actor(&state.db, actor_id).await?;
    let film = find_film(&state.db, film_id).await?;

    let link = film_actor::ActiveModel {
        actor_id: Set(actor_id),
        film_id: Set(film_id),
        last_update: Set(super::now_sec()),
    };
    film_actor::Entity::insert(link).exec_without_returning(&state.db).await?;

    Ok((StatusCode::CREATED, Json(film)))
}

async fn remove_film(
    State(state): State<Arc<AppState>>,
    Path((actor_id, film_id)): Path<(i32, i32)>,
) -> AppResult<Json<film::Model>> {
    find_actor(&state.db, actor_id).await?;
    let film = find_film(&state.db, film_id).await?;

    let link = film_actor::Entity::find_by_id((actor_id, film_id))
        .one(&state.db)
        .await?
        .ok_or(AppError::Removal)?;
    link.delete(&state.db).await?;

    Ok(Json(film))
}
