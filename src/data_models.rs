use mongodb::bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};

/// A generated-image post as persisted in MongoDB. `photo` holds either an
/// image URL or base64-encoded image data, exactly as submitted.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: ObjectId,

    pub name: String,
    pub prompt: String,
    pub photo: String,
    pub created_at: DateTime,
}

impl Post {
    pub fn new(name: String, prompt: String, photo: String) -> Post {
        Post {
            id: ObjectId::new(),
            name,
            prompt,
            photo,
            created_at: DateTime::now(),
        }
    }
}
