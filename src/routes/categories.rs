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
    entities::{category, film, film_category},
    error::{AppError, AppResult},
    models::CategoryPayload,
    query::{self, Page, PageQuery},
};

use super::films::{FilmFilter, find_film};

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/categories/", get(list_categories).post(create_category))
        .route(
            "/api/categories/{category_id}",
            get(read_category).put(update_category).delete(delete_category),
        )
        .route("/api/categories/{category_id}/films", get(read_films))
        .route("/api/categories/{category_id}/films/{film_id}", patch(add_film).delete(remove_film))
}

#[derive(Debug, Default, Deserialize)]
pub struct CategoryFilter {
    #[serde(default)]
    pub name: String,
}

pub(crate) async fn find_category(
    db: &DatabaseConnection,
    category_id: i32,
) -> AppResult<category::Model> {
    category::Entity::find_by_id(category_id).one(db).await?.ok_or(AppError::NotFound)
}

async fn list_categories(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
    Query(filter): Query<CategoryFilter>,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<Page<category::Model>>> {
    let select = query::contains_filters(
        category::Entity::find(),
        &[(category::Column::Name, filter.name.as_str())],
    );
    let page = query::paginate(&state.db, select, page.params(), uri.path()).await?;
    Ok(Json(page))
}

async fn read_category(
    State(state): State<Arc<AppState>>,
    Path(category_id): Path<i32>,
) -> AppResult<Json<category::Model>> {
    let category = find_category(&state.db, category_id).await?;
    Ok(Json(category))
}

async fn create_category(
    State(state): State<Arc<AppState>>,
    WithRejection(Json(payload), _): WithRejection<Json<CategoryPayload>, AppError>,
) -> AppResult<(StatusCode, Json<category::Model>)> {
    payload.validate()?;

    let category = category::ActiveModel {
        name: Set(payload.name),
        ..Default::default()
    }
    .insert(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(category)))
}

async fn update_category(
    State(state): State<Arc<AppState>>,
    Path(category_id): Path<i32>,
    WithRejection(Json(payload), _): WithRejection<Json<CategoryPayload>, AppError>,
) -> AppResult<Json<category::Model>> {
    payload.validate()?;

    let mut category: category::ActiveModel =
        find_category(&state.db, category_id).await?.into();
    category.name = Set(payload.name);
    let category = category.update(&state.db).await?;

    Ok(Json(category))
}

async fn delete_category(
    State(state): State<Arc<AppState>>,
    Path(category_id): Path<i32>,
) -> AppResult<Json<category::Model>> {
    let category = find_category(&state.db, category_id).await?;
    category.clone().delete(&state.db).await?;
    Ok(Json(category))
}

async fn read_films(
    State(state): State<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
    Path(category_id): Path<i32>,
    Query(filter): Query<FilmFilter>,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<Page<film::Model>>> {
    let category = find_category(&state.db, category_id).await?;

    let select = query::contains_filters(
        category.find_related(film::Entity),
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
    Path((category_id, film_id)): Path<(i32, i32)>,
) -> AppResult<(StatusCode, Json<film::Model>)> {
    find_category(&state.db, category_id).await?;
    let film = find_film(&state.db, film_id).await?;

    let link = film_category::ActiveModel {
        category_id: Set(category_id),
        film_id: Set(film_id),
        last_update: Set(super::now_sec()),
    };
    film_category::Entity::insert(link).exec_without_returning(&state.db).await?;

    Ok((StatusCode::CREATED, Json(film)))
}

async fn remove_film(
    State(state): State<Arc<AppState>>,
    Path((category_id, film_id)): Path<(i32, i32)>,
) -> AppResult<Json<film::Model>> {
    find_category(&state.db, category_id).await?;
    let film = find_film(&state.db, film_id).await?;

    let link = film_category::Entity::find_by_id((category_id, film_id))
        .one(&state.db)
        .await?
        .ok_or(AppError::Removal)?;
    link.delete(&state.db).await?;

    Ok(Json(film))
}
