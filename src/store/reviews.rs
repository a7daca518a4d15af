use serde::{Deserialize, Serialize};
use sqlx::{migrate::Migrator, SqlitePool};

use super::{required, scalar, StoreError, StoreResult};

static MIGRATOR: Migrator = sqlx::migrate!("./migrations/reviews");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Review {
    pub id: i64,
    pub author: String,
    pub content: String,
    pub timestamp: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct NewReview {
    #[serde(default, deserialize_with = "scalar::truthy_text")]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "scalar::truthy_text")]
    pub content: Option<String>,
}

#[derive(Clone)]
pub struct ReviewStore {
    pool: Option<SqlitePool>,
}

impl ReviewStore {
    pub async fn open(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = super::open(url, max_connections, &MIGRATOR).await?;
        Ok(Self { pool: Some(pool) })
    }

    pub fn unavailable() -> Self {
        Self { pool: None }
    }

    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
        }
    }

    fn pool(&self) -> StoreResult<&SqlitePool> {
        self.pool.as_ref().ok_or(StoreError::Unavailable("review"))
    }

    #[tracing::instrument(name = "Insert review", skip_all)]
    pub async fn create(&self, new: NewReview) -> StoreResult<i64> {
        let (Some(author), Some(content)) = (required(new.author), required(new.content)) else {
            return Err(StoreError::Validation("Author and content are required."));
        };

        let id = sqlx::query("INSERT INTO reviews (author, content) VALUES (?, ?)")
            .bind(author)
            .bind(content)
            .execute(self.pool()?)
            .await?
            .last_insert_rowid();

        Ok(id)
    }

    #[tracing::instrument(name = "List reviews", skip(self))]
    pub async fn list(&self) -> StoreResult<Vec<Review>> {
        let reviews = sqlx::query_as::<_, Review>(
            "SELECT id, author, content, timestamp FROM reviews ORDER BY timestamp DESC, id DESC",
        )
        .fetch_all(self.pool()?)
        .await?;

        Ok(reviews)
    }

    #[tracing::instrument(name = "Delete review", skip(self))]
    pub async fn delete_by_id(&self, id: i64) -> StoreResult<()> {
        let deleted = sqlx::query("DELETE FROM reviews WHERE id = ?")
            .bind(id)
            .execute(self.pool()?)
            .await?
            .rows_affected();

        if deleted == 0 {
            return Err(StoreError::NotFound("review"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    async fn store() -> (TempDir, ReviewStore) {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("reviews.db").display());
        let store = ReviewStore::open(&url, 4).await.unwrap();
        (dir, store)
    }

    fn review(author: &str, content: &str) -> NewReview {
        NewReview {
            author: Some(author.into()),
            content: Some(content.into()),
        }
    }

    #[tokio::test]
    async fn newest_review_is_listed_first() {
        let (_dir, store) = store().await;
        store.create(review("Bob", "Fine.")).await.unwrap();
        let id = store.create(review("Ann", "Great!")).await.unwrap();

        let reviews = store.list().await.unwrap();
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].id, id);
        assert_eq!(reviews[0].author, "Ann");
        assert_eq!(reviews[0].content, "Great!");
        assert!(!reviews[0].timestamp.is_empty());
    }

    #[tokio::test]
    async fn missing_content_is_rejected() {
        let (_dir, store) = store().await;

        let result = store
            .create(NewReview {
                author: Some("Ann".into()),
                content: None,
            })
            .await;
        assert!(matches!(result, Err(StoreError::Validation(_))));

        let result = store.create(review("", "Great!")).await;
        assert!(matches!(result, Err(StoreError::Validation(_))));

        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_removes_the_review() {
        let (_dir, store) = store().await;
        let id = store.create(review("Ann", "Great!")).await.unwrap();

        store.delete_by_id(id).await.unwrap();
        assert!(store.list().await.unwrap().is_empty());

        assert!(matches!(
            store.delete_by_id(id).await,
            Err(StoreError::NotFound("review"))
        ));
    }

    #[tokio::test]
    async fn unavailable_store_faults() {
        let store = ReviewStore::unavailable();
        assert!(matches!(store.list().await, Err(StoreError::Unavailable(_))));
    }
}
