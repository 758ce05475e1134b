//! Comment repository — submission, moderation, and public listing.
//!
//! New comments take their initial status from the content policy: instant
//! publish (`approved`) by default, or `pending` when the site runs a
//! review-first moderation queue.

use chrono::Utc;

use vv_core::access::Action;
use vv_core::entities::Comment;
use vv_core::enums::CommentStatus;
use vv_core::ids::PREFIX_COMMENT;
use vv_core::validate::FieldErrors;

use crate::error::StoreError;
use crate::helpers::{get_opt_string, parse_datetime, parse_enum};
use crate::service::VvService;

const SELECT_COLS: &str = "id, post_id, author, content, email, status, created_at";

fn row_to_comment(row: &libsql::Row) -> Result<Comment, StoreError> {
    Ok(Comment {
        id: row.get(0)?,
        post_id: row.get(1)?,
        author: row.get(2)?,
        content: row.get(3)?,
        email: get_opt_string(row, 4)?,
        status: parse_enum(&row.get::<String>(5)?)?,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
    })
}

impl VvService {
    /// Submit a comment on a post. Open to anonymous visitors.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Validation` for a blank author or content,
    /// `StoreError::NotFound` when the post does not exist. Nothing is
    /// persisted in either case.
    pub async fn add_comment(
        &self,
        post_id: &str,
        author: &str,
        content: &str,
        email: Option<&str>,
    ) -> Result<Comment, StoreError> {
        self.require(Action::SubmitComment)?;

        let mut errors = FieldErrors::new();
        errors.require("author", author);
        errors.require("content", content);
        if !errors.is_empty() {
            return Err(StoreError::Validation(errors));
        }

        // The referenced post must exist at submission time. (Deleting the
        // post later orphans the comment; that is accepted.)
        let mut rows = self
            .db()
            .conn()
            .query("SELECT 1 FROM posts WHERE id = ?1", [post_id])
            .await?;
        if rows.next().await?.is_none() {
            return Err(StoreError::NotFound {
                entity: "post",
                id: post_id.to_string(),
            });
        }

        let status = if self.policy().auto_approve_comments {
            CommentStatus::Approved
        } else {
            CommentStatus::Pending
        };
        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_COMMENT).await?;

        self.db()
            .conn()
            .execute(
                &format!(
                    "INSERT INTO comments ({SELECT_COLS})
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"
                ),
                libsql::params![
                    id.as_str(),
                    post_id,
                    author,
                    content,
                    email,
                    status.as_str(),
                    now.to_rfc3339()
                ],
            )
            .await?;

        Ok(Comment {
            id,
            post_id: post_id.to_string(),
            author: author.to_string(),
            content: content.to_string(),
            email: email.map(String::from),
            status,
            created_at: now,
        })
    }

    /// Fetch a single comment.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no comment has this id.
    pub async fn get_comment(&self, id: &str) -> Result<Comment, StoreError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM comments WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or_else(|| StoreError::NotFound {
            entity: "comment",
            id: id.to_string(),
        })?;
        row_to_comment(&row)
    }

    /// Approved comments for a post, newest first. The only publicly
    /// visible projection.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails.
    pub async fn list_approved(&self, post_id: &str) -> Result<Vec<Comment>, StoreError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM comments
                     WHERE post_id = ?1 AND status = 'approved'
                     ORDER BY created_at DESC, rowid DESC"
                ),
                [post_id],
            )
            .await?;
        let mut items = Vec::new();
        while let Some(row) = rows.next().await? {
            items.push(row_to_comment(&row)?);
        }
        Ok(items)
    }

    /// Every comment in every state, newest first. Moderation queue view.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::AccessDenied` for non-admin sessions.
    pub async fn list_comments(&self) -> Result<Vec<Comment>, StoreError> {
        self.require(Action::ModerateComment)?;
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM comments ORDER BY created_at DESC, rowid DESC"
                ),
                (),
            )
            .await?;
        let mut items = Vec::new();
        while let Some(row) = rows.next().await? {
            items.push(row_to_comment(&row)?);
        }
        Ok(items)
    }

    /// Moderate a comment: unconditional overwrite to any status.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` for an unknown id,
    /// `StoreError::AccessDenied` for non-admin sessions.
    pub async fn set_comment_status(
        &self,
        comment_id: &str,
        status: CommentStatus,
    ) -> Result<Comment, StoreError> {
        self.require(Action::ModerateComment)?;

        let current = self.get_comment(comment_id).await?;
        self.db()
            .conn()
            .execute(
                "UPDATE comments SET status = ?1 WHERE id = ?2",
                libsql::params![status.as_str(), comment_id],
            )
            .await?;

        tracing::info!(
            comment_id,
            from = current.status.as_str(),
            to = status.as_str(),
            "comment moderated"
        );

        Ok(Comment { status, ..current })
    }

    /// Hard delete, irreversible.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` for an unknown id,
    /// `StoreError::AccessDenied` for non-admin sessions.
    pub async fn delete_comment(&self, comment_id: &str) -> Result<(), StoreError> {
        self.require(Action::DeleteComment)?;
        self.get_comment(comment_id).await?;
        self.db()
            .conn()
            .execute("DELETE FROM comments WHERE id = ?1", [comment_id])
            .await?;
        tracing::info!(comment_id, "comment deleted");
        Ok(())
    }
}
