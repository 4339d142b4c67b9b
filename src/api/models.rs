use serde::{Deserialize, Serialize};

use crate::data_models::Post;

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub name: String,
    pub prompt: String,
    pub photo: String,
}

/// Partial update; absent fields are left untouched.
#[derive(Debug, Deserialize)]
pub struct UpdatePostRequest {
    pub name: Option<String>,
    pub prompt: Option<String>,
    pub photo: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateImageRequest {
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateImageResponse {
    pub photo: String,
}

#[derive(Debug, Serialize)]
pub struct PostData {
    pub id: String,
    pub name: String,
    pub prompt: String,
    pub photo: String,
    pub created_at: String,
}

impl From<Post> for PostData {
    fn from(post: Post) -> PostData {
        PostData {
            id: post.id.to_hex(),
            name: post.name,
            prompt: post.prompt,
            photo: post.photo,
            created_at: post
                .created_at
                .try_to_rfc3339_string()
                .unwrap_or_else(|_| "".to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PostListResponse {
    pub success: bool,
    pub data: Vec<PostData>,
}

#[derive(Debug, Serialize)]
pub struct SinglePostResponse {
    pub success: bool,
    pub data: PostData,
}

#[derive(Debug, Serialize)]
pub struct AckResponse {
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
