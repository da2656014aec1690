use axum::Json;
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::{Router, extract::State, response::IntoResponse, routing::get};

use crate::model::entity::Lesson;
use crate::model::{ListingParams, ResourceTyped};
use crate::web::dto::lessons::{LessonListing, LessonRequest, LessonViewModel};
use crate::web::error::ErrorResponse;
use crate::web::{AppState, WebError, WebResult};
use crate::model::WriteResult;

pub fn routes<S>(state: AppState) -> Router<S> {
    Router::new()
        .route("/", get(lessons_list_handler).post(lessons_create_handler))
        .route(
            "/{id}",
            get(lessons_get_handler)
                .put(lessons_update_handler)
                .delete(lessons_delete_handler),
        )
        .with_state(state)
}

fn validate(request: &LessonRequest) -> WebResult<()> {
    if request.is_valid() {
        Ok(())
    } else {
        Err(WebError::resource_bad_request(
            Lesson::get_resource_type(),
            "title must not be empty",
        ))
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/lessons/",
    description = "List lessons one page at a time. Send `current_filter`, `current_sort` and `course_id` from the previous response back, together with `page_number`, to keep paging through the same result set. `sort_order` wins over `current_sort` when both are given",
    params(ListingParams),
    responses(
        (status = 200, description = "Page of lessons", body = LessonListing),
        (status = 400, description = "Malformed query parameters"),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "lessons"
)]
async fn lessons_list_handler(
    State(state): State<AppState>,
    Query(params): Query<ListingParams>,
) -> WebResult<impl IntoResponse> {
    let listing = state
        .lessons()
        .get_all_filter(params)
        .await
        .map_err(|e| WebError::resource_fetch_error(Lesson::get_resource_type(), e))?;

    Ok((StatusCode::OK, Json(listing)))
}

#[utoipa::path(
    get,
    path = "/api/v1/lessons/{lesson_id}",
    description = "Fetch a single lesson",
    params(
        ("lesson_id" = i32, Path, description = "ID of the lesson to get")
    ),
    responses(
        (status = 200, description = "Lesson found", body = LessonViewModel),
        (status = 404, description = "Lesson not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "lessons"
)]
async fn lessons_get_handler(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> WebResult<impl IntoResponse> {
    let lesson = state
        .lessons()
        .get_by_id(id)
        .await
        .map_err(|e| WebError::resource_fetch_error(Lesson::get_resource_type(), e))?
        .ok_or(WebError::resource_not_found(Lesson::get_resource_type()))?;

    Ok((StatusCode::OK, Json(lesson)))
}

#[utoipa::path(
    post,
    path = "/api/v1/lessons/",
    description = "Create a lesson",
    request_body = LessonRequest,
    responses(
        (status = 201, description = "Lesson created", body = WriteResult),
        (status = 400, description = "Invalid lesson", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "lessons"
)]
async fn lessons_create_handler(
    State(state): State<AppState>,
    Json(request): Json<LessonRequest>,
) -> WebResult<impl IntoResponse> {
    validate(&request)?;

    let result = state
        .lessons()
        .create(request)
        .await
        .map_err(|e| WebError::resource_write_error(Lesson::get_resource_type(), e))?;

    if !result.written() {
        return Err(WebError::resource_write_failed(Lesson::get_resource_type()));
    }

    Ok((StatusCode::CREATED, Json(result)))
}

#[utoipa::path(
    put,
    path = "/api/v1/lessons/{lesson_id}",
    description = "Replace title, introduction and course of an existing lesson",
    params(
        ("lesson_id" = i32, Path, description = "ID of the lesson to update")
    ),
    request_body = LessonRequest,
    responses(
        (status = 200, description = "Lesson updated", body = WriteResult),
        (status = 400, description = "Invalid lesson", body = ErrorResponse),
        (status = 404, description = "Lesson not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "lessons"
)]
async fn lessons_update_handler(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<LessonRequest>,
) -> WebResult<impl IntoResponse> {
    validate(&request)?;

    let rows = state
        .lessons()
        .update(id, request)
        .await
        .map_err(|e| WebError::resource_write_error(Lesson::get_resource_type(), e))?;

    Ok((StatusCode::OK, Json(WriteResult::new(rows, id))))
}

#[utoipa::path(
    delete,
    path = "/api/v1/lessons/{lesson_id}",
    description = "Delete a lesson. Deleting a missing lesson succeeds with zero affected rows",
    params(
        ("lesson_id" = i32, Path, description = "ID of the lesson to delete")
    ),
    responses(
        (status = 200, description = "Lesson deleted or already absent", body = WriteResult),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "lessons"
)]
async fn lessons_delete_handler(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> WebResult<impl IntoResponse> {
    let rows = state
        .lessons()
        .delete(id)
        .await
        .map_err(|e| WebError::resource_write_error(Lesson::get_resource_type(), e))?;

    Ok((StatusCode::OK, Json(WriteResult::new(rows, id))))
}
