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
    entities::{actor, category, film, film_actor, film_category},
    error::{AppError, AppResult},
    models::FilmPayload,
    query::{self, Page, PageQuery},
};

use super::actors::{ActorFilter, find_actor};
use super::categories::{CategoryFilter, find_category};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/films/", get(list_films).post(create_film))
        .route("/api/films/{film_id}", get(read_film).put(update_film).delete(delete_film))
        .route("/api/films/{film_id}/actors", get(read_actors))
        .route("/api/films/{film_id}/actors/{actor_id}", patch(add_actor).delete(remove_actor))
        .route("/api/films/{film_id}/categories", get(read_categories))
        .route(
            "/api/films/{film_id}/categories/{category_id}",
            patch(add_category).delete(remove_category),
        )
}

#[derive(Debug, Default, Deserialize)]
pub struct FilmFilter {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

pub(crate) async fn find_film(db: &DatabaseConnection, film_id: i32) -> AppResult<film::Model> {
    film::Entity::find_by_id(film_id).one(db).await?.ok_or(AppError::NotFound)
}

async fn list_films(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
    Query(filter): Query<FilmFilter>,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<Page<film::Model>>> {
    let select = query::contains_filters(
        film::Entity::find(),
        &[
            (film::Column::Title, filter.title.as_str()),
            (film::Column::Description, filter.description.as_str()),
        ],
    );
    let page = query::paginate(&state.db, select, page.params(), uri.path()).await?;
    Ok(Json(page))
}

async fn read_film(
    State(state): State<Arc<AppState>>,
    Path(film_id): Path<i32>,
) -> AppResult<Json<film::Model>> {
    let film = find_film(&state.db, film_id).await?;
    Ok(Json(film))
}

async fn create_film(
    State(state): State<Arc<AppState>>,
    WithRejection(Json(payload), _): WithRejection<Json<FilmPayload>, AppError>,
) -> AppResult<(StatusCode, Json<film::Model>)> {
    payload.validate()?;

    let film = film::ActiveModel {
        title: Set(payload.title),
        description: Set(payload.description),
        release_year: Set(payload.release_year),
        length: Set(payload.length),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(film)))
}

async fn update_film(
    State(state): State<Arc<AppState>>,
    Path(film_id): Path<i32>,
    WithRejection(Json(payload), _): WithRejection<Json<FilmPayload>, AppError>,
) -> AppResult<Json<film::Model>> {
    payload.validate()?;

    let mut film: film::ActiveModel = find_film(&state.db, film_id).await?.into();
    film.title = Set(payload.title);
    film.description = Set(payload.description);
    film.release_year = Set(payload.release_year);
    film.length = Set(payload.length);
    let film = film.update(&state.db).await?;

    Ok(Json(film))
}

async fn delete_film(
    State(state): State<Arc<AppState>>,
    Path(film_id): Path<i32>,
) -> AppResult<Json<film::Model>> {
    let film = find_film(&state.db, film_id).await?;
    film.clone().delete(&state.db).await?;
    Ok(Json(film))
}

async fn read_actors(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
    Path(film_id): Path<i32>,
    Query(filter): Query<ActorFilter>,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<Page<actor::Model>>> {
    let film = find_film(&state.db, film_id).await?;

    let select = query::contains_filters(
        film.find_related(actor::Entity),
        &[
            (actor::Column::FirstName, filter.first_name.as_str()),
            (actor::Column::LastName, filter.last_name.as_str()),
        ],
    );
    let page = query::paginate(&state.db, select, page.params(), uri.path()).await?;

    Ok(Json(page))
}

async fn add_actor(
    State(state): State<Arc<AppState>>,
    Path((film_id, actor_id)): Path<(i32, i32)>,
) -> AppResult<(StatusCode, Json<actor::Model>)> {
    find_film(&state.db, film_id).await?;
    let actor = find_actor(&state.db, actor_id).await?;

    let link = film_actor::ActiveModel {
        actor_id: Set(actor_id),
        film_id: Set(film_id),
        last_update: Set(super::now_sec()),
    };
    film_actor::Entity::insert(link).exec_without_returning(&state.db).await?;

    Ok((StatusCode::CREATED, Json(actor)))
}

async fn remove_actor(
    State(state): State<Arc<AppState>>,
    Path((film_id, actor_id)): Path<(i32, i32)>,
) -> AppResult<Json<actor::Model>> {
    find_film(&state.db, film_id).await?;
    let actor = find_actor(&state.db, actor_id).await?;

    let link = film_actor::Entity::find_by_id((actor_id, film_id))
        .one(&state.db)
        .await?
        .ok_or(AppError::Removal)?;
    link.delete(&state.db).await?;

    Ok(Json(actor))
}

async fn read_categories(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
    Path(film_id): Path<i32>,
    Query(filter): Query<CategoryFilter>,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<Page<category::Model>>> {
    let film = find_film(&state.db, film_id).await?;

    let select = query::contains_filters(
        film.find_related(category::Entity),
        &[(category::Column::Name, filter.name.as_str())],
    );
    let page = query::paginate(&state.db, select, page.params(), uri.path()).await?;

    Ok(Json(page))
}

async fn add_category(
    State(state): State<Arc<AppState>>,
    Path((film_id, category_id)): Path<(i32, i32)>,
) -> AppResult<(StatusCode, Json<category::Model>)> {
    find_film(&state.db, film_id).await?;
    let category = find_category(&state.db, category_id).await?;

    let link = film_category::ActiveModel {
        category_id: Set(category_id),
        film_id: Set(film_id),
        last_update: Set(super::now_sec()),
    };
    film_category::Entity::insert(link).exec_without_returning(&state.db).await?;

    Ok((StatusCode::CREATED, Json(category)))
}

async fn remove_category(
    State(state): State<Arc<AppState>>,
    Path((film_id, category_id)): Path<(i32, i32)>,
) -> AppResult<Json<category::Model>> {
    find_film(&state.db, film_id).await?;
    let category = find_category(&state.db, category_id).await?;

    let link = film_category::Entity::find_by_id((category_id, film_id))
        .one(&state.db)
        .await?
        .ok_or(AppError::Removal)?;
    link.delete(&state.db).await?;

    Ok(Json(category))
}
