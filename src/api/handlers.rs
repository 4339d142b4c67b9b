use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use mongodb::bson::{Document, oid::ObjectId};

use crate::data_models::Post;

use super::AppState;
use super::models::{
    AckResponse, CreatePostRequest, GenerateImageRequest, GenerateImageResponse, MessageResponse,
    PostListResponse, SinglePostResponse, UpdatePostRequest,
};

type HandlerError = (StatusCode, String);

fn database_error(e: anyhow::Error) -> HandlerError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("Database error: {:#}", e),
    )
}

fn parse_object_id(raw: &str) -> Result<ObjectId, HandlerError> {
    ObjectId::parse_str(raw)
        .map_err(|_| (StatusCode::BAD_REQUEST, format!("Invalid post id: {raw}")))
}

pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Hello from DALL.E!".to_string(),
    })
}

pub async fn list_posts(
    State(state): State<AppState>,
) -> Result<Json<PostListResponse>, HandlerError> {
    let posts = state.posts.list_all().await.map_err(database_error)?;

    Ok(Json(PostListResponse {
        success: true,
        data: posts.into_iter().map(Into::into).collect(),
    }))
}

pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SinglePostResponse>, HandlerError> {
    let id = parse_object_id(&id)?;

    match state.posts.find_by_id(id).await.map_err(database_error)? {
        Some(post) => Ok(Json(SinglePostResponse {
            success: true,
            data: post.into(),
        })),
        None => Err((StatusCode::NOT_FOUND, format!("No post with id {id}"))),
    }
}

pub async fn create_post(
    State(state): State<AppState>,
    Json(request): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<SinglePostResponse>), HandlerError> {
    if request.prompt.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Prompt cannot be empty".to_string()));
    }
    if request.photo.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Photo cannot be empty".to_string()));
    }

    let post = Post::new(request.name, request.prompt, request.photo);
    state.posts.insert(&post).await.map_err(database_error)?;

    Ok((
        StatusCode::CREATED,
        Json(SinglePostResponse {
            success: true,
            data: post.into(),
        }),
    ))
}

pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdatePostRequest>,
) -> Result<Json<SinglePostResponse>, HandlerError> {
    let id = parse_object_id(&id)?;

    let mut update = Document::new();
    if let Some(name) = request.name {
        update.insert("name", name);
    }
    if let Some(prompt) = request.prompt {
        update.insert("prompt", prompt);
    }
    if let Some(photo) = request.photo {
        update.insert("photo", photo);
    }
    if update.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Nothing to update".to_string()));
    }

    let matched = state
        .posts
        .update(id, update)
        .await
        .map_err(database_error)?;
    if !matched {
        return Err((StatusCode::NOT_FOUND, format!("No post with id {id}")));
    }

    let post = state
        .posts
        .find_by_id(id)
        .await
        .map_err(database_error)?
        .ok_or((StatusCode::NOT_FOUND, format!("No post with id {id}")))?;

    Ok(Json(SinglePostResponse {
        success: true,
        data: post.into(),
    }))
}

pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AckResponse>, HandlerError> {
    let id = parse_object_id(&id)?;

    if state
        .posts
        .delete_by_id(id)
        .await
        .map_err(database_error)?
    {
        Ok(Json(AckResponse { success: true }))
    } else {
        Err((StatusCode::NOT_FOUND, format!("No post with id {id}")))
    }
}

pub async fn generate_image(
    State(state): State<AppState>,
    Json(request): Json<GenerateImageRequest>,
) -> Result<Json<GenerateImageResponse>, HandlerError> {
    if request.prompt.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Prompt cannot be empty".to_string()));
    }

    let photo = state.dalle.generate(&request.prompt).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Image generation error: {:#}", e),
        )
    })?;

    Ok(Json(GenerateImageResponse { photo }))
}
