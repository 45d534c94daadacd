use bson::{doc, Document};
use futures::TryStreamExt;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

/// Name of the backing database. Fixed, not configurable.
pub const DATABASE_NAME: &str = "docstore";

/// Name of the collection holding all documents. Fixed, not configurable.
pub const COLLECTION_NAME: &str = "data";

/// Errors from the storage layer.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid document: {0}")]
    InvalidDocument(#[from] bson::ser::Error),

    #[error(transparent)]
    Mongo(#[from] mongodb::error::Error),
}

/// Handle to the MongoDB connection, created once at startup and cloned
/// into request handlers. The driver client is internally pooled and safe
/// to share across tasks.
#[derive(Clone)]
pub struct DocumentStore {
    db: Database,
}

impl DocumentStore {
    /// Build the client handle from configuration. The driver defers socket
    /// I/O until the first operation; call `health_check` to verify the
    /// server is actually reachable.
    pub async fn connect(config: &crate::config::StorageConfig) -> Result<Self, StoreError> {
        info!("Connecting to MongoDB at {}:{}", config.host, config.port);

        let uri = config.connection_uri(DATABASE_NAME);
        let mut options = ClientOptions::parse(&uri).await?;
        // Fail fast on an unreachable server instead of hanging on the
        // driver's 30s default.
        options.server_selection_timeout = Some(Duration::from_secs(3));

        let client = Client::with_options(options)?;
        let db = client.database(DATABASE_NAME);

        Ok(Self { db })
    }

    /// Pings the target database to ensure connectivity.
    pub async fn health_check(&self) -> Result<(), StoreError> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    /// Persist one JSON object as a new document. The collection assigns
    /// the `_id`; nothing is returned to the caller beyond success.
    pub async fn insert(&self, document: &Value) -> Result<(), StoreError> {
        let doc = bson::to_document(document)?;
        self.collection().insert_one(doc).await?;
        Ok(())
    }

    /// Every stored document, `_id` included. Callers that expose documents
    /// over the API are responsible for stripping the identifier.
    pub async fn find_all(&self) -> Result<Vec<Document>, StoreError> {
        let cursor = self.collection().find(doc! {}).await?;
        let documents = cursor.try_collect().await?;
        Ok(documents)
    }

    fn collection(&self) -> Collection<Document> {
        self.db.collection(COLLECTION_NAME)
    }
}
