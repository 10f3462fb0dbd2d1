use std::sync::Arc;

use tracing::{debug, info};

use crate::{
    models::posts::{CreatePostDto, NewPost, Post, UpdatePostDto},
    repositories::posts_repo::PostsRepository,
    validation::{validate_create, validate_update},
    Error, Result,
};

const SEED_TITLE: &str = "Introduction to Rust";
const SEED_CONTENT: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt ut labore et dolore magna aliqua. Ut enim ad minim veniam, quis nostrud exercitation ullamco laboris nisi ut aliquip ex ea commodo consequat. Duis aute irure dolor in reprehenderit in voluptate velit esse cillum dolore eu fugiat nulla pariatur. Excepteur sint occaecat cupidatat non proident, sunt in culpa qui officia deserunt mollit anim id est laborum";

#[derive(Clone)]
pub struct PostsService {
    repo: Arc<dyn PostsRepository>,
}

impl PostsService {
    pub fn new(repo: Arc<dyn PostsRepository>) -> Self {
        Self { repo }
    }

    pub async fn get_posts(&self) -> Result<Vec<Post>> {
        self.repo.list().await
    }

    pub async fn get_post(&self, post_id: i32) -> Result<Post> {
        self.repo.find(post_id).await?.ok_or(Error::NotFound)
    }

    pub async fn create_post(&self, params: CreatePostDto) -> Result<Post> {
        let new_post = validate_create(params)?;
        let post = self.repo.create(&new_post).await?;
        debug!(post_id = post.id, "post created");
        Ok(post)
    }

    pub async fn update_post(&self, post_id: i32, changes: UpdatePostDto) -> Result<Post> {
        validate_update(&changes)?;

        if !self.repo.update(post_id, &changes).await? {
            return Err(Error::NotFound);
        }
        debug!(post_id, "post updated");

        self.get_post(post_id).await
    }

    /// Deletes the post and returns it as it was before deletion.
    pub async fn delete_post(&self, post_id: i32) -> Result<Post> {
        let post = self.get_post(post_id).await?;

        // A concurrent delete may win between the read and this call.
        if !self.repo.delete(post_id).await? {
            return Err(Error::NotFound);
        }
        debug!(post_id, "post deleted");

        Ok(post)
    }

    /// Inserts the introductory post when the store is empty. Returns whether
    /// anything was written.
    pub async fn seed_if_empty(&self) -> Result<bool> {
        if self.repo.count().await? > 0 {
            return Ok(false);
        }

        let post = self
            .repo
            .create(&NewPost {
                title: SEED_TITLE.to_string(),
                content: SEED_CONTENT.to_string(),
            })
            .await?;
        info!(post_id = post.id, "seeded empty posts table");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use crate::repositories::MemoryRepo;

    use super::*;

    fn service() -> PostsService {
        PostsService::new(Arc::new(MemoryRepo::new()))
    }

    #[tokio::test]
    async fn missing_ids_are_not_found() {
        let service = service();
        assert!(matches!(service.get_post(999).await, Err(Error::NotFound)));
        assert!(matches!(
            service.update_post(999, UpdatePostDto::default()).await,
            Err(Error::NotFound)
        ));
        assert!(matches!(service.delete_post(999).await, Err(Error::NotFound)));
    }

    #[tokio::test]
    async fn invalid_create_never_reaches_the_store() {
        let service = service();
        let result = service.create_post(CreatePostDto::new("", "x")).await;
        assert!(matches!(result, Err(Error::Validation(ref e)) if e.len() == 1));
        assert!(service.get_posts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn invalid_update_leaves_row_untouched() {
        let service = service();
        let post = service
            .create_post(CreatePostDto::new("hello", "world"))
            .await
            .unwrap();

        let changes = UpdatePostDto {
            title: Some(String::new()),
            content: Some("changed".into()),
        };
        assert!(matches!(
            service.update_post(post.id, changes).await,
            Err(Error::Validation(_))
        ));
        assert_eq!(service.get_post(post.id).await.unwrap(), post);
    }

    #[tokio::test]
    async fn delete_twice_reports_not_found() {
        let service = service();
        let post = service
            .create_post(CreatePostDto::new("hello", "world"))
            .await
            .unwrap();

        assert_eq!(service.delete_post(post.id).await.unwrap(), post);
        assert!(matches!(
            service.delete_post(post.id).await,
            Err(Error::NotFound)
        ));
    }

    #[tokio::test]
    async fn seeding_is_idempotent() {
        let service = service();
        assert!(service.seed_if_empty().await.unwrap());
        assert!(!service.seed_if_empty().await.unwrap());

        let posts = service.get_posts().await.unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, SEED_TITLE);
    }
}
