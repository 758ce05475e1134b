//! Author repository — CRUD plus rename-safe post denormalization.

use chrono::Utc;

use vv_core::access::Action;
use vv_core::entities::{Author, SocialLinks};
use vv_core::ids::PREFIX_AUTHOR;
use vv_core::validate::FieldErrors;

use crate::error::StoreError;
use crate::helpers::{get_opt_string, parse_datetime, parse_json, to_json};
use crate::service::VvService;
use crate::updates::author::AuthorUpdate;

const SELECT_COLS: &str =
    "id, name, email, bio, expertise, avatar, social_links, posts_count, joined_at";

fn row_to_author(row: &libsql::Row) -> Result<Author, StoreError> {
    let posts_count = u32::try_from(row.get::<i64>(7)?)
        .map_err(|e| StoreError::Query(format!("negative posts_count: {e}")))?;
    Ok(Author {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        bio: row.get(3)?,
        expertise: get_opt_string(row, 4)?,
        avatar: get_opt_string(row, 5)?,
        social_links: parse_json(&row.get::<String>(6)?)?,
        posts_count,
        joined_at: parse_datetime(&row.get::<String>(8)?)?,
    })
}

impl VvService {
    /// Create an author directly (admin path; approval is the other path).
    ///
    /// # Errors
    ///
    /// Returns `StoreError::AccessDenied` for non-admin sessions,
    /// `StoreError::Validation` for missing fields or a duplicate email.
    pub async fn create_author(
        &self,
        name: &str,
        email: &str,
        bio: &str,
        expertise: Option<&str>,
        avatar: Option<&str>,
        social_links: SocialLinks,
    ) -> Result<Author, StoreError> {
        self.require(Action::ManageAuthors)?;

        let mut errors = FieldErrors::new();
        errors.require("name", name);
        errors.require_email("email", email);
        errors.require("bio", bio);
        if !errors.is_empty() {
            return Err(StoreError::Validation(errors));
        }

        let mut rows = self
            .db()
            .conn()
            .query("SELECT 1 FROM authors WHERE email = ?1", [email])
            .await?;
        if rows.next().await?.is_some() {
            let mut errors = FieldErrors::new();
            errors.insert("email", "an author with this email already exists");
            return Err(StoreError::Validation(errors));
        }

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_AUTHOR).await?;

        self.db()
            .conn()
            .execute(
                &format!(
                    "INSERT INTO authors ({SELECT_COLS})
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"
                ),
                libsql::params![
                    id.as_str(),
                    name,
                    email,
                    bio,
                    expertise,
                    avatar,
                    to_json(&social_links)?,
                    0i64,
                    now.to_rfc3339()
                ],
            )
            .await?;

        tracing::info!(author_id = id.as_str(), "author created");

        Ok(Author {
            id,
            name: name.to_string(),
            email: email.to_string(),
            bio: bio.to_string(),
            expertise: expertise.map(String::from),
            avatar: avatar.map(String::from),
            social_links,
            posts_count: 0,
            joined_at: now,
        })
    }

    /// Fetch a single author.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no author has this id.
    pub async fn get_author(&self, id: &str) -> Result<Author, StoreError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM authors WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or_else(|| StoreError::NotFound {
            entity: "author",
            id: id.to_string(),
        })?;
        row_to_author(&row)
    }

    /// All authors, ordered by display name. Public directory listing.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails.
    pub async fn list_authors(&self) -> Result<Vec<Author>, StoreError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM authors ORDER BY name"),
                (),
            )
            .await?;
        let mut items = Vec::new();
        while let Some(row) = rows.next().await? {
            items.push(row_to_author(&row)?);
        }
        Ok(items)
    }

    /// Partial update. Renames also refresh the denormalized `author_name`
    /// on the author's posts, in the same transaction, so a rename never
    /// orphans their byline.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` for an unknown id,
    /// `StoreError::AccessDenied` for non-admin sessions.
    pub async fn update_author(
        &self,
        author_id: &str,
        update: AuthorUpdate,
    ) -> Result<Author, StoreError> {
        self.require(Action::ManageAuthors)?;

        let current = self.get_author(author_id).await?;
        if update.is_empty() {
            return Ok(current);
        }

        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();
        let mut idx = 1usize;

        if let Some(ref name) = update.name {
            sets.push(format!("name = ?{idx}"));
            params.push(name.clone().into());
            idx += 1;
        }
        if let Some(ref bio) = update.bio {
            sets.push(format!("bio = ?{idx}"));
            params.push(bio.clone().into());
            idx += 1;
        }
        if let Some(ref expertise) = update.expertise {
            sets.push(format!("expertise = ?{idx}"));
            params.push(expertise.clone().map_or(libsql::Value::Null, Into::into));
            idx += 1;
        }
        if let Some(ref avatar) = update.avatar {
            sets.push(format!("avatar = ?{idx}"));
            params.push(avatar.clone().map_or(libsql::Value::Null, Into::into));
            idx += 1;
        }
        if let Some(ref links) = update.social_links {
            sets.push(format!("social_links = ?{idx}"));
            params.push(to_json(links)?.into());
            idx += 1;
        }

        params.push(author_id.into());
        let sql = format!("UPDATE authors SET {} WHERE id = ?{idx}", sets.join(", "));

        let renamed = update
            .name
            .as_ref()
            .filter(|name| **name != current.name)
            .cloned();

        let tx = self.db().conn().transaction().await?;
        tx.execute(&sql, libsql::params_from_iter(params)).await?;
        if let Some(ref new_name) = renamed {
            tx.execute(
                "UPDATE posts SET author_name = ?1 WHERE author_id = ?2",
                libsql::params![new_name.as_str(), author_id],
            )
            .await?;
        }
        tx.commit().await?;

        if renamed.is_some() {
            tracing::info!(author_id, "author renamed; post bylines refreshed");
        }

        self.get_author(author_id).await
    }

    /// Hard delete. The author's posts are kept (their `author_id` now
    /// dangles; bylines keep the last known name).
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` for an unknown id,
    /// `StoreError::AccessDenied` for non-admin sessions.
    pub async fn delete_author(&self, author_id: &str) -> Result<(), StoreError> {
        self.require(Action::ManageAuthors)?;
        self.get_author(author_id).await?;
        self.db()
            .conn()
            .execute("DELETE FROM authors WHERE id = ?1", [author_id])
            .await?;
        tracing::info!(author_id, "author deleted");
        Ok(())
    }
}
