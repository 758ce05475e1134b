//! Post repository — CRUD, publication transitions, and public projections.
//!
//! Public listings only ever see `published` posts; drafts are visible to the
//! admin listing alone. Ordering is `published_at` descending with insertion
//! order breaking ties.

use chrono::Utc;

use vv_core::access::Action;
use vv_core::entities::{NewPost, Post};
use vv_core::enums::{Category, PostStatus};
use vv_core::ids::PREFIX_POST;
use vv_core::validate::FieldErrors;

use crate::error::StoreError;
use crate::helpers::{get_opt_string, parse_datetime, parse_enum, parse_json, parse_optional_datetime, to_json};
use crate::service::VvService;
use crate::updates::post::PostUpdate;

const SELECT_COLS: &str = "id, title, excerpt, content, author_id, author_name, category, \
     status, published_at, image_url, read_time, tags, created_at, updated_at";

fn row_to_post(row: &libsql::Row) -> Result<Post, StoreError> {
    let read_time = u32::try_from(row.get::<i64>(10)?)
        .map_err(|e| StoreError::Query(format!("negative read_time: {e}")))?;
    Ok(Post {
        id: row.get(0)?,
        title: row.get(1)?,
        excerpt: row.get(2)?,
        content: row.get(3)?,
        author_id: row.get(4)?,
        author_name: row.get(5)?,
        category: parse_enum(&row.get::<String>(6)?)?,
        status: parse_enum(&row.get::<String>(7)?)?,
        published_at: parse_optional_datetime(get_opt_string(row, 8)?.as_deref())?,
        image_url: get_opt_string(row, 9)?,
        read_time,
        tags: parse_json(&row.get::<String>(11)?)?,
        created_at: parse_datetime(&row.get::<String>(12)?)?,
        updated_at: parse_datetime(&row.get::<String>(13)?)?,
    })
}

impl VvService {
    /// Create a post in the caller-chosen initial state.
    ///
    /// `published_at` is stamped only when the initial state is `published`.
    /// The referenced author's `posts_count` is incremented in the same
    /// transaction.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Validation` with a field map when input is
    /// invalid (nothing is written), `StoreError::AccessDenied` below the
    /// author role.
    pub async fn create_post(
        &self,
        new: NewPost,
        status: PostStatus,
    ) -> Result<Post, StoreError> {
        self.require(Action::CreatePost)?;

        let mut errors = FieldErrors::new();
        errors.require("title", &new.title);
        errors.require("excerpt", &new.excerpt);
        errors.require("content", &new.content);
        if new.read_time < 1 {
            errors.insert("read_time", "read time must be at least 1 minute");
        }
        let author = match self.get_author(&new.author_id).await {
            Ok(author) => author,
            Err(StoreError::NotFound { .. }) => {
                errors.insert("author_id", "author does not exist");
                return Err(StoreError::Validation(errors));
            }
            Err(e) => return Err(e),
        };
        if !errors.is_empty() {
            return Err(StoreError::Validation(errors));
        }

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_POST).await?;
        let published_at = match status {
            PostStatus::Published => Some(now),
            PostStatus::Draft => None,
        };

        let tx = self.db().conn().transaction().await?;
        tx.execute(
            &format!(
                "INSERT INTO posts ({SELECT_COLS})
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)"
            ),
            libsql::params![
                id.as_str(),
                new.title.as_str(),
                new.excerpt.as_str(),
                new.content.as_str(),
                new.author_id.as_str(),
                author.name.as_str(),
                new.category.as_str(),
                status.as_str(),
                published_at.map(|dt| dt.to_rfc3339()),
                new.image_url.as_deref(),
                i64::from(new.read_time),
                to_json(&new.tags)?,
                now.to_rfc3339(),
                now.to_rfc3339()
            ],
        )
        .await?;
        tx.execute(
            "UPDATE authors SET posts_count = posts_count + 1 WHERE id = ?1",
            [new.author_id.as_str()],
        )
        .await?;
        tx.commit().await?;

        tracing::info!(post_id = id.as_str(), status = status.as_str(), "post created");

        Ok(Post {
            id,
            title: new.title,
            excerpt: new.excerpt,
            content: new.content,
            author_id: new.author_id,
            author_name: author.name,
            category: new.category,
            status,
            published_at,
            image_url: new.image_url,
            read_time: new.read_time,
            tags: new.tags,
            created_at: now,
            updated_at: now,
        })
    }

    /// Fetch a single post, any status.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no post has this id.
    pub async fn get_post(&self, id: &str) -> Result<Post, StoreError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM posts WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or_else(|| StoreError::NotFound {
            entity: "post",
            id: id.to_string(),
        })?;
        row_to_post(&row)
    }

    /// Partial update.
    ///
    /// `published_at` is stamped on the first transition into `published`
    /// and preserved on every later edit, including unpublish/republish.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` for an unknown id,
    /// `StoreError::Validation` when a patched field fails the same checks
    /// applied at creation, `StoreError::AccessDenied` below the author role.
    pub async fn update_post(
        &self,
        post_id: &str,
        update: PostUpdate,
    ) -> Result<Post, StoreError> {
        self.require(Action::EditPost)?;

        let current = self.get_post(post_id).await?;
        if update.is_empty() {
            return Ok(current);
        }

        // Patched fields meet the same requirements as at creation.
        let mut errors = FieldErrors::new();
        if let Some(ref title) = update.title {
            errors.require("title", title);
        }
        if let Some(ref excerpt) = update.excerpt {
            errors.require("excerpt", excerpt);
        }
        if let Some(ref content) = update.content {
            errors.require("content", content);
        }
        if update.read_time.is_some_and(|rt| rt < 1) {
            errors.insert("read_time", "read time must be at least 1 minute");
        }
        if !errors.is_empty() {
            return Err(StoreError::Validation(errors));
        }

        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();
        let mut idx = 1usize;

        if let Some(ref title) = update.title {
            sets.push(format!("title = ?{idx}"));
            params.push(title.clone().into());
            idx += 1;
        }
        if let Some(ref excerpt) = update.excerpt {
            sets.push(format!("excerpt = ?{idx}"));
            params.push(excerpt.clone().into());
            idx += 1;
        }
        if let Some(ref content) = update.content {
            sets.push(format!("content = ?{idx}"));
            params.push(content.clone().into());
            idx += 1;
        }
        if let Some(category) = update.category {
            sets.push(format!("category = ?{idx}"));
            params.push(category.as_str().into());
            idx += 1;
        }
        if let Some(status) = update.status {
            sets.push(format!("status = ?{idx}"));
            params.push(status.as_str().into());
            idx += 1;
        }
        if let Some(ref image_url) = update.image_url {
            sets.push(format!("image_url = ?{idx}"));
            params.push(image_url.clone().map_or(libsql::Value::Null, Into::into));
            idx += 1;
        }
        if let Some(read_time) = update.read_time {
            sets.push(format!("read_time = ?{idx}"));
            params.push(i64::from(read_time).into());
            idx += 1;
        }
        if let Some(ref tags) = update.tags {
            sets.push(format!("tags = ?{idx}"));
            params.push(to_json(tags)?.into());
            idx += 1;
        }

        let now = Utc::now();

        // First transition into published stamps the publication time.
        if update.status == Some(PostStatus::Published) && current.published_at.is_none() {
            sets.push(format!("published_at = ?{idx}"));
            params.push(now.to_rfc3339().into());
            idx += 1;
        }

        sets.push(format!("updated_at = ?{idx}"));
        params.push(now.to_rfc3339().into());
        idx += 1;

        params.push(post_id.into());
        let sql = format!("UPDATE posts SET {} WHERE id = ?{idx}", sets.join(", "));
        self.db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;

        self.get_post(post_id).await
    }

    /// Hard delete. Comments on the post are kept as orphans; the author's
    /// `posts_count` is decremented in the same transaction.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` for an unknown id,
    /// `StoreError::AccessDenied` below the author role.
    pub async fn delete_post(&self, post_id: &str) -> Result<(), StoreError> {
        self.require(Action::DeletePost)?;

        let post = self.get_post(post_id).await?;

        let tx = self.db().conn().transaction().await?;
        tx.execute("DELETE FROM posts WHERE id = ?1", [post_id]).await?;
        tx.execute(
            "UPDATE authors SET posts_count = MAX(posts_count - 1, 0) WHERE id = ?1",
            [post.author_id.as_str()],
        )
        .await?;
        tx.commit().await?;

        tracing::info!(post_id, "post deleted");
        Ok(())
    }

    /// All posts regardless of status, newest first. Admin dashboard view.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::AccessDenied` for non-admin sessions.
    pub async fn list_all_posts(&self) -> Result<Vec<Post>, StoreError> {
        self.require(Action::ViewAdminDashboard)?;
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM posts ORDER BY created_at DESC, rowid DESC"
                ),
                (),
            )
            .await?;
        let mut items = Vec::new();
        while let Some(row) = rows.next().await? {
            items.push(row_to_post(&row)?);
        }
        Ok(items)
    }

    /// Published posts in a category, newest first.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails.
    pub async fn list_by_category(&self, category: Category) -> Result<Vec<Post>, StoreError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM posts
                     WHERE status = 'published' AND category = ?1
                     ORDER BY published_at DESC, rowid ASC"
                ),
                [category.as_str()],
            )
            .await?;
        let mut items = Vec::new();
        while let Some(row) = rows.next().await? {
            items.push(row_to_post(&row)?);
        }
        Ok(items)
    }

    /// The `limit` most recently published posts (home page).
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails.
    pub async fn list_featured(&self, limit: u32) -> Result<Vec<Post>, StoreError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM posts
                     WHERE status = 'published'
                     ORDER BY published_at DESC, rowid ASC
                     LIMIT ?1"
                ),
                [i64::from(limit)],
            )
            .await?;
        let mut items = Vec::new();
        while let Some(row) = rows.next().await? {
            items.push(row_to_post(&row)?);
        }
        Ok(items)
    }

    /// Published posts by one author, newest first.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails.
    pub async fn list_by_author(&self, author_id: &str) -> Result<Vec<Post>, StoreError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM posts
                     WHERE status = 'published' AND author_id = ?1
                     ORDER BY published_at DESC, rowid ASC"
                ),
                [author_id],
            )
            .await?;
        let mut items = Vec::new();
        while let Some(row) = rows.next().await? {
            items.push(row_to_post(&row)?);
        }
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::*;
    use crate::updates::post::PostUpdateBuilder;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn create_post_stamps_published_at_only_when_published() {
        let svc = admin_service().await;
        let author = seed_author(&svc).await;

        let draft = seed_post(&svc, &author.id, PostStatus::Draft).await;
        assert_eq!(draft.status, PostStatus::Draft);
        assert!(draft.published_at.is_none());

        let live = seed_post(&svc, &author.id, PostStatus::Published).await;
        assert_eq!(live.status, PostStatus::Published);
        assert!(live.published_at.is_some());
    }

    #[tokio::test]
    async fn create_post_increments_posts_count() {
        let svc = admin_service().await;
        let author = seed_author(&svc).await;
        seed_post(&svc, &author.id, PostStatus::Published).await;
        seed_post(&svc, &author.id, PostStatus::Draft).await;

        let author = svc.get_author(&author.id).await.unwrap();
        assert_eq!(author.posts_count, 2);
    }

    #[tokio::test]
    async fn create_post_validation_aborts_before_writing() {
        let svc = admin_service().await;
        let author = seed_author(&svc).await;
        let result = svc
            .create_post(
                NewPost {
                    title: String::new(),
                    excerpt: "E".into(),
                    content: "C".into(),
                    author_id: author.id.clone(),
                    category: Category::Books,
                    image_url: None,
                    read_time: 0,
                    tags: vec![],
                },
                PostStatus::Draft,
            )
            .await;
        let Err(StoreError::Validation(errors)) = result else {
            panic!("expected validation error");
        };
        assert!(errors.get("title").is_some());
        assert!(errors.get("read_time").is_some());

        // No partial write, and posts_count untouched.
        let author = svc.get_author(&author.id).await.unwrap();
        assert_eq!(author.posts_count, 0);
        assert!(svc.list_all_posts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_post_rejects_unknown_author() {
        let svc = admin_service().await;
        let result = svc
            .create_post(
                NewPost {
                    title: "T".into(),
                    excerpt: "E".into(),
                    content: "C".into(),
                    author_id: "aut-00000000".into(),
                    category: Category::Art,
                    image_url: None,
                    read_time: 3,
                    tags: vec![],
                },
                PostStatus::Draft,
            )
            .await;
        let Err(StoreError::Validation(errors)) = result else {
            panic!("expected validation error");
        };
        assert!(errors.get("author_id").is_some());
    }

    #[tokio::test]
    async fn drafts_are_excluded_from_public_listings() {
        let svc = admin_service().await;
        let author = seed_author(&svc).await;
        seed_post(&svc, &author.id, PostStatus::Draft).await;
        let live = seed_post(&svc, &author.id, PostStatus::Published).await;

        let featured = svc.list_featured(10).await.unwrap();
        assert_eq!(featured.len(), 1);
        assert_eq!(featured[0].id, live.id);

        let by_category = svc.list_by_category(Category::Art).await.unwrap();
        assert_eq!(by_category.len(), 1);

        let by_author = svc.list_by_author(&author.id).await.unwrap();
        assert_eq!(by_author.len(), 1);

        // Admin view still sees both.
        assert_eq!(svc.list_all_posts().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn publish_draft_stamps_published_at_once() {
        let svc = admin_service().await;
        let author = seed_author(&svc).await;
        let draft = seed_post(&svc, &author.id, PostStatus::Draft).await;

        let published = svc
            .update_post(
                &draft.id,
                PostUpdateBuilder::new().status(PostStatus::Published).build(),
            )
            .await
            .unwrap();
        assert_eq!(published.status, PostStatus::Published);
        let first_stamp = published.published_at.expect("stamped on publish");

        // Unpublish and republish: the original stamp survives.
        svc.update_post(
            &draft.id,
            PostUpdateBuilder::new().status(PostStatus::Draft).build(),
        )
        .await
        .unwrap();
        let republished = svc
            .update_post(
                &draft.id,
                PostUpdateBuilder::new().status(PostStatus::Published).build(),
            )
            .await
            .unwrap();
        assert_eq!(republished.published_at, Some(first_stamp));
    }

    #[tokio::test]
    async fn update_rejects_blank_field_patches() {
        let svc = admin_service().await;
        let author = seed_author(&svc).await;
        let post = seed_post(&svc, &author.id, PostStatus::Published).await;

        let result = svc
            .update_post(
                &post.id,
                PostUpdateBuilder::new().title("").content("  ").build(),
            )
            .await;
        let Err(StoreError::Validation(errors)) = result else {
            panic!("expected validation error");
        };
        assert!(errors.get("title").is_some());
        assert!(errors.get("content").is_some());

        // Nothing was written.
        let unchanged = svc.get_post(&post.id).await.unwrap();
        assert_eq!(unchanged.title, post.title);
        assert_eq!(unchanged.content, post.content);
    }

    #[tokio::test]
    async fn update_preserves_unpatched_fields() {
        let svc = admin_service().await;
        let author = seed_author(&svc).await;
        let post = seed_post(&svc, &author.id, PostStatus::Published).await;

        let updated = svc
            .update_post(&post.id, PostUpdateBuilder::new().excerpt("New excerpt").build())
            .await
            .unwrap();
        assert_eq!(updated.excerpt, "New excerpt");
        assert_eq!(updated.title, post.title);
        assert_eq!(updated.content, post.content);
        assert_eq!(updated.published_at, post.published_at);
    }

    #[tokio::test]
    async fn listings_order_newest_first() {
        let svc = admin_service().await;
        let author = seed_author(&svc).await;
        let first = seed_post(&svc, &author.id, PostStatus::Published).await;
        let second = seed_post(&svc, &author.id, PostStatus::Published).await;

        let featured = svc.list_featured(10).await.unwrap();
        assert_eq!(featured.len(), 2);
        assert!(
            featured[0].published_at >= featured[1].published_at,
            "expected newest first"
        );
        let ids: Vec<_> = featured.iter().map(|p| p.id.as_str()).collect();
        assert!(ids.contains(&first.id.as_str()));
        assert!(ids.contains(&second.id.as_str()));
    }

    #[tokio::test]
    async fn list_featured_respects_limit() {
        let svc = admin_service().await;
        let author = seed_author(&svc).await;
        for _ in 0..3 {
            seed_post(&svc, &author.id, PostStatus::Published).await;
        }
        assert_eq!(svc.list_featured(2).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn delete_post_decrements_posts_count() {
        let svc = admin_service().await;
        let author = seed_author(&svc).await;
        let post = seed_post(&svc, &author.id, PostStatus::Published).await;

        svc.delete_post(&post.id).await.unwrap();
        assert!(matches!(
            svc.get_post(&post.id).await,
            Err(StoreError::NotFound { .. })
        ));
        let author = svc.get_author(&author.id).await.unwrap();
        assert_eq!(author.posts_count, 0);
    }

    #[tokio::test]
    async fn post_writes_denied_below_author_role() {
        for svc in [anon_service().await, user_service().await] {
            let result = svc
                .create_post(
                    NewPost {
                        title: "T".into(),
                        excerpt: "E".into(),
                        content: "C".into(),
                        author_id: "aut-00000000".into(),
                        category: Category::Art,
                        image_url: None,
                        read_time: 1,
                        tags: vec![],
                    },
                    PostStatus::Draft,
                )
                .await;
            assert!(matches!(result, Err(StoreError::AccessDenied { .. })));
        }
    }

    #[tokio::test]
    async fn author_role_can_write_but_not_see_the_admin_listing() {
        let svc = author_service().await;
        assert!(svc.require(Action::CreatePost).is_ok());
        assert!(svc.require(Action::EditPost).is_ok());
        assert!(matches!(
            svc.list_all_posts().await,
            Err(StoreError::AccessDenied { .. })
        ));
    }
}
