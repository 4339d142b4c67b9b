use anyhow::{Context, Result};
use mongodb::options::ClientOptions;
use mongodb::{
    Client, Collection, Database as MongoDatabase,
    bson::{Document, doc, oid::ObjectId},
};
use serde::{Serialize, de::DeserializeOwned};

use crate::data_models::Post;

/// Collection names as constants for consistency
pub mod collections {
    pub const POSTS: &str = "posts";
}

/// Main database wrapper providing connection management and collection access.
/// Constructed once at boot and handed to the router state; there is no
/// process-global instance.
#[derive(Debug, Clone)]
pub struct Database {
    client: Client,
    db: MongoDatabase,
}

impl Database {
    /// Create a Database instance without verifying the connection. The
    /// MongoDB client is lazy, so this performs no I/O beyond parsing the
    /// URI. The database named in the URI path is used when present,
    /// otherwise `fallback_db_name`.
    pub async fn new(uri: &str, fallback_db_name: &str) -> Result<Self> {
        let client_options = ClientOptions::parse(uri)
            .await
            .context("Failed to parse MongoDB connection string")?;

        let client =
            Client::with_options(client_options).context("Failed to create MongoDB client")?;

        let db = client
            .default_database()
            .unwrap_or_else(|| client.database(fallback_db_name));

        Ok(Self { client, db })
    }

    /// Create a Database instance and verify the connection with a ping.
    /// This is the boot path: failure here is fatal to startup. No retry and
    /// no explicit timeout, the driver's own defaults apply.
    pub async fn connect(uri: &str, fallback_db_name: &str) -> Result<Self> {
        let db = Self::new(uri, fallback_db_name).await?;

        db.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .context("Failed to connect to MongoDB")?;

        tracing::info!("Connected to MongoDB database: {}", db.db.name());

        Ok(db)
    }

    /// Get a typed collection by name
    pub fn collection<T>(&self, name: &str) -> Collection<T>
    where
        T: Send + Sync,
    {
        self.db.collection(name)
    }

    /// Get the underlying MongoDB client (for advanced operations)
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Get the underlying MongoDB database (for advanced operations)
    pub fn database(&self) -> &MongoDatabase {
        &self.db
    }

    /// Get the posts collection
    pub fn posts(&self) -> Collection<Post> {
        self.collection(collections::POSTS)
    }

    /// Get a repository for Post documents
    pub fn posts_repo(&self) -> Repository<Post> {
        Repository::new(self.posts())
    }
}

// =============================================================================
// Generic CRUD operations
// =============================================================================

/// Generic repository for common CRUD operations over a typed collection.
pub struct Repository<T>
where
    T: Send + Sync,
{
    collection: Collection<T>,
}

impl<T> Repository<T>
where
    T: Serialize + DeserializeOwned + Unpin + Send + Sync,
{
    pub fn new(collection: Collection<T>) -> Self {
        Self { collection }
    }

    /// Insert a single document
    pub async fn insert(&self, doc: &T) -> Result<ObjectId> {
        let result = self
            .collection
            .insert_one(doc)
            .await
            .context("Failed to insert document")?;

        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| anyhow::anyhow!("Failed to get inserted ObjectId"))
    }

    /// Find a document by ObjectId
    pub async fn find_by_id(&self, id: ObjectId) -> Result<Option<T>> {
        let filter = doc! { "_id": id };
        self.collection
            .find_one(filter)
            .await
            .context("Failed to find document by id")
    }

    /// Find all documents matching a filter
    pub async fn find(&self, filter: Document) -> Result<Vec<T>> {
        use futures::TryStreamExt;

        let cursor = self
            .collection
            .find(filter)
            .await
            .context("Failed to execute find query")?;

        cursor
            .try_collect()
            .await
            .context("Failed to collect results")
    }

    /// Find all documents in the collection
    pub async fn find_all(&self) -> Result<Vec<T>> {
        self.find(doc! {}).await
    }

    /// Update a document by ObjectId
    pub async fn update_by_id(&self, id: ObjectId, update: Document) -> Result<bool> {
        let filter = doc! { "_id": id };
        let result = self
            .collection
            .update_one(filter, doc! { "$set": update })
            .await
            .context("Failed to update document")?;

        Ok(result.matched_count > 0)
    }

    /// Delete a document by ObjectId
    pub async fn delete_by_id(&self, id: ObjectId) -> Result<bool> {
        let filter = doc! { "_id": id };
        let result = self
            .collection
            .delete_one(filter)
            .await
            .context("Failed to delete document")?;

        Ok(result.deleted_count > 0)
    }
}

// =============================================================================
// Post-specific operations
// =============================================================================

/// Extended operations specific to the posts collection
pub struct PostRepo {
    repo: Repository<Post>,
}

impl PostRepo {
    pub fn new(db: &Database) -> Self {
        Self {
            repo: db.posts_repo(),
        }
    }

    /// Insert a new post
    pub async fn insert(&self, post: &Post) -> Result<ObjectId> {
        self.repo.insert(post).await
    }

    /// Find by ID
    pub async fn find_by_id(&self, id: ObjectId) -> Result<Option<Post>> {
        self.repo.find_by_id(id).await
    }

    /// List all posts
    pub async fn list_all(&self) -> Result<Vec<Post>> {
        self.repo.find_all().await
    }

    /// Apply a partial update to a post. Returns false when no post matched.
    pub async fn update(&self, id: ObjectId, update: Document) -> Result<bool> {
        self.repo.update_by_id(id, update).await
    }

    /// Delete by ID
    pub async fn delete_by_id(&self, id: ObjectId) -> Result<bool> {
        self.repo.delete_by_id(id).await
    }
}
