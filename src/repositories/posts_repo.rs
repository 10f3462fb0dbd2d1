use async_trait::async_trait;

use crate::{
    models::posts::{NewPost, Post, UpdatePostDto},
    Error, Result,
};

use super::{MemoryRepo, PostgresRepo};

/// Persistence for posts. Every call is its own unit of work: a reader never
/// sees a half-written row.
#[async_trait]
pub trait PostsRepository: Sync + Send {
    async fn list(&self) -> Result<Vec<Post>>;
    async fn find(&self, post_id: i32) -> Result<Option<Post>>;
    async fn create(&self, post: &NewPost) -> Result<Post>;
    /// Overwrites the present fields only. Returns whether a row matched.
    async fn update(&self, post_id: i32, changes: &UpdatePostDto) -> Result<bool>;
    /// Returns whether a row matched.
    async fn delete(&self, post_id: i32) -> Result<bool>;
    async fn count(&self) -> Result<i64>;
}

#[async_trait]
impl PostsRepository for PostgresRepo {
    async fn list(&self) -> Result<Vec<Post>> {
        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, title, content FROM posts ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(posts)
    }

    async fn find(&self, post_id: i32) -> Result<Option<Post>> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, title, content FROM posts WHERE id = $1
            "#,
        )
        .bind(post_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(post)
    }

    async fn create(&self, post: &NewPost) -> Result<Post> {
        let mut tx = self.pool.begin().await?;

        let post = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (title, content)
            VALUES ($1, $2)
            RETURNING id, title, content
            "#,
        )
        .bind(&post.title)
        .bind(&post.content)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(post)
    }

    async fn update(&self, post_id: i32, changes: &UpdatePostDto) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE posts
            SET title = COALESCE($2, title),
                content = COALESCE($3, content)
            WHERE id = $1
            "#,
        )
        .bind(post_id)
        .bind(changes.title.as_deref())
        .bind(changes.content.as_deref())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, post_id: i32) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            DELETE FROM posts WHERE id = $1
            "#,
        )
        .bind(post_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[async_trait]
impl PostsRepository for MemoryRepo {
    async fn list(&self) -> Result<Vec<Post>> {
        let state = self.state.read().await;
        Ok(state.rows.values().cloned().collect())
    }

    async fn find(&self, post_id: i32) -> Result<Option<Post>> {
        let state = self.state.read().await;
        Ok(state.rows.get(&post_id).cloned())
    }

    async fn create(&self, post: &NewPost) -> Result<Post> {
        let mut state = self.state.write().await;
        let id = state
            .last_id
            .checked_add(1)
            .ok_or_else(|| Error::Unexpected("post id space exhausted".to_string()))?;

        let post = Post {
            id,
            title: post.title.clone(),
            content: post.content.clone(),
        };
        state.last_id = id;
        state.rows.insert(id, post.clone());
        Ok(post)
    }

    async fn update(&self, post_id: i32, changes: &UpdatePostDto) -> Result<bool> {
        let mut state = self.state.write().await;
        let Some(post) = state.rows.get_mut(&post_id) else {
            return Ok(false);
        };

        if let Some(title) = &changes.title {
            post.title = title.clone();
        }
        if let Some(content) = &changes.content {
            post.content = content.clone();
        }
        Ok(true)
    }

    async fn delete(&self, post_id: i32) -> Result<bool> {
        let mut state = self.state.write().await;
        Ok(state.rows.remove(&post_id).is_some())
    }

    async fn count(&self) -> Result<i64> {
        let state = self.state.read().await;
        Ok(state.rows.len() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_post(title: &str, content: &str) -> NewPost {
        NewPost {
            title: title.to_string(),
            content: content.to_string(),
        }
    }

    #[tokio::test]
    async fn create_then_find_returns_same_fields() {
        let repo = MemoryRepo::new();
        let created = repo.create(&new_post("hello", "world")).await.unwrap();
        assert_eq!(created.id, 1);

        let found = repo.find(created.id).await.unwrap().unwrap();
        assert_eq!(found, created);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let repo = MemoryRepo::new();
        let first = repo.create(&new_post("a", "a")).await.unwrap();
        assert!(repo.delete(first.id).await.unwrap());
        assert!(!repo.delete(first.id).await.unwrap());

        let second = repo.create(&new_post("b", "b")).await.unwrap();
        assert_eq!(second.id, first.id + 1);
    }

    #[tokio::test]
    async fn update_applies_present_fields_only() {
        let repo = MemoryRepo::new();
        let post = repo.create(&new_post("title", "body")).await.unwrap();

        let changes = UpdatePostDto {
            title: Some("renamed".into()),
            content: None,
        };
        assert!(repo.update(post.id, &changes).await.unwrap());

        let stored = repo.find(post.id).await.unwrap().unwrap();
        assert_eq!(stored.title, "renamed");
        assert_eq!(stored.content, "body");

        assert!(!repo.update(post.id + 1, &changes).await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn list_is_ordered_by_id() {
        let repo = MemoryRepo::new();
        assert!(repo.list().await.unwrap().is_empty());

        for title in ["one", "two", "three"] {
            repo.create(&new_post(title, "x")).await.unwrap();
        }
        let titles: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, ["one", "two", "three"]);
    }
}
