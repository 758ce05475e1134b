//! Author application repository — submission and one-way review decisions.
//!
//! `approve` and `reject` are single transactions covering the status stamp,
//! the Author record (approve only), the decision notification, and the role
//! elevation. The status stamp is a conditional write (`WHERE status =
//! 'pending'`), so two admins racing on the same application cannot both
//! decide it: the loser's update matches zero rows and the transaction rolls
//! back with `InvalidTransition`.

use chrono::Utc;

use vv_core::access::Action;
use vv_core::entities::{Author, AuthorApplication, NewApplication, NotificationData, SocialLinks};
use vv_core::enums::{ApplicationStatus, NotificationKind, Role};
use vv_core::ids::{PREFIX_APPLICATION, PREFIX_AUTHOR, PREFIX_NOTIFICATION};
use vv_core::validate::FieldErrors;

use crate::error::StoreError;
use crate::helpers::{get_opt_string, parse_datetime, parse_enum, parse_json, parse_optional_datetime, to_json};
use crate::service::VvService;

const SELECT_COLS: &str = "id, name, email, bio, writing_experience, preferred_categories, \
     sample_title, sample_excerpt, motivation, user_id, status, submitted_at, \
     approved_at, rejected_at, rejection_reason, author_id";

const DEFAULT_REJECTION_REASON: &str = "Application was not approved at this time.";

const APPROVED_TITLE: &str = "Author Application Approved!";
const APPROVED_MESSAGE: &str = "Congratulations! Your application to become an author has been \
     approved. You can now start writing and publishing posts on Voices and Viewpoints.";

const REJECTED_TITLE: &str = "Author Application Update";
const REJECTED_MESSAGE: &str = "Your application to become an author was not approved at this \
     time. You can reapply in the future.";

fn row_to_application(row: &libsql::Row) -> Result<AuthorApplication, StoreError> {
    Ok(AuthorApplication {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        bio: row.get(3)?,
        writing_experience: row.get(4)?,
        preferred_categories: parse_json(&row.get::<String>(5)?)?,
        sample_title: row.get(6)?,
        sample_excerpt: row.get(7)?,
        motivation: get_opt_string(row, 8)?,
        user_id: get_opt_string(row, 9)?,
        status: parse_enum(&row.get::<String>(10)?)?,
        submitted_at: parse_datetime(&row.get::<String>(11)?)?,
        approved_at: parse_optional_datetime(get_opt_string(row, 12)?.as_deref())?,
        rejected_at: parse_optional_datetime(get_opt_string(row, 13)?.as_deref())?,
        rejection_reason: get_opt_string(row, 14)?,
        author_id: get_opt_string(row, 15)?,
    })
}

impl VvService {
    /// Submit an application to become an author. Open to anonymous visitors.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Validation` with a field map when required fields
    /// are missing (nothing is persisted).
    pub async fn submit_application(
        &self,
        new: NewApplication,
    ) -> Result<AuthorApplication, StoreError> {
        self.require(Action::SubmitApplication)?;

        let mut errors = FieldErrors::new();
        errors.require("name", &new.name);
        errors.require_email("email", &new.email);
        errors.require("bio", &new.bio);
        errors.require("writing_experience", &new.writing_experience);
        if new.preferred_categories.is_empty() {
            errors.insert("preferred_categories", "select at least one category");
        }
        errors.require("sample_title", &new.sample_title);
        errors.require("sample_excerpt", &new.sample_excerpt);
        if !errors.is_empty() {
            return Err(StoreError::Validation(errors));
        }

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_APPLICATION).await?;

        self.db()
            .conn()
            .execute(
                &format!(
                    "INSERT INTO applications
                     (id, name, email, bio, writing_experience, preferred_categories,
                      sample_title, sample_excerpt, motivation, user_id, status, submitted_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)"
                ),
                libsql::params![
                    id.as_str(),
                    new.name.as_str(),
                    new.email.as_str(),
                    new.bio.as_str(),
                    new.writing_experience.as_str(),
                    to_json(&new.preferred_categories)?,
                    new.sample_title.as_str(),
                    new.sample_excerpt.as_str(),
                    new.motivation.as_deref(),
                    new.user_id.as_deref(),
                    ApplicationStatus::Pending.as_str(),
                    now.to_rfc3339()
                ],
            )
            .await?;

        tracing::info!(application_id = id.as_str(), "application submitted");

        Ok(AuthorApplication {
            id,
            name: new.name,
            email: new.email,
            bio: new.bio,
            writing_experience: new.writing_experience,
            preferred_categories: new.preferred_categories,
            sample_title: new.sample_title,
            sample_excerpt: new.sample_excerpt,
            motivation: new.motivation,
            user_id: new.user_id,
            status: ApplicationStatus::Pending,
            submitted_at: now,
            approved_at: None,
            rejected_at: None,
            rejection_reason: None,
            author_id: None,
        })
    }

    /// Fetch a single application.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no application has this id.
    pub async fn get_application(&self, id: &str) -> Result<AuthorApplication, StoreError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM applications WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or_else(|| StoreError::NotFound {
            entity: "application",
            id: id.to_string(),
        })?;
        row_to_application(&row)
    }

    /// All applications, newest submissions first. Admin review queue.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::AccessDenied` for non-admin sessions.
    pub async fn list_applications(&self) -> Result<Vec<AuthorApplication>, StoreError> {
        self.require(Action::ViewAdminDashboard)?;
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM applications
                     ORDER BY submitted_at DESC, rowid DESC"
                ),
                (),
            )
            .await?;
        let mut items = Vec::new();
        while let Some(row) = rows.next().await? {
            items.push(row_to_application(&row)?);
        }
        Ok(items)
    }

    /// Approve a pending application.
    ///
    /// One transaction: create the Author, stamp the application, insert the
    /// `application_approved` notification, and elevate the applicant's
    /// stored role to `author` (when they applied signed-in). Partial effects
    /// cannot persist.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidTransition` when the application is no
    /// longer pending, `StoreError::NotFound` for an unknown id,
    /// `StoreError::AccessDenied` for non-admin sessions.
    pub async fn approve_application(&self, application_id: &str) -> Result<Author, StoreError> {
        self.require(Action::ApproveApplication)?;

        let application = self.get_application(application_id).await?;
        if !application
            .status
            .can_transition_to(ApplicationStatus::Approved)
        {
            return Err(StoreError::InvalidTransition(format!(
                "application {application_id} is already {}",
                application.status
            )));
        }

        let now = Utc::now();
        let author_id = self.db().generate_id(PREFIX_AUTHOR).await?;
        let notification_id = self.db().generate_id(PREFIX_NOTIFICATION).await?;

        let tx = self.db().conn().transaction().await?;

        // Conditional stamp closes the check-then-act window: if another
        // admin decided first, zero rows match and we bail out.
        let stamped = tx
            .execute(
                "UPDATE applications
                 SET status = ?1, approved_at = ?2, author_id = ?3
                 WHERE id = ?4 AND status = ?5",
                libsql::params![
                    ApplicationStatus::Approved.as_str(),
                    now.to_rfc3339(),
                    author_id.as_str(),
                    application_id,
                    ApplicationStatus::Pending.as_str()
                ],
            )
            .await?;
        if stamped == 0 {
            return Err(StoreError::InvalidTransition(format!(
                "application {application_id} was decided concurrently"
            )));
        }

        tx.execute(
            "INSERT INTO authors
             (id, name, email, bio, expertise, avatar, social_links, posts_count, joined_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            libsql::params![
                author_id.as_str(),
                application.name.as_str(),
                application.email.as_str(),
                application.bio.as_str(),
                application.writing_experience.as_str(),
                Option::<&str>::None,
                to_json(&SocialLinks::default())?,
                0i64,
                now.to_rfc3339()
            ],
        )
        .await?;

        tx.execute(
            "INSERT INTO notifications
             (id, user_id, kind, title, message, is_read, created_at, data)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            libsql::params![
                notification_id.as_str(),
                application.user_id.clone().unwrap_or_default(),
                NotificationKind::ApplicationApproved.as_str(),
                APPROVED_TITLE,
                APPROVED_MESSAGE,
                0i64,
                now.to_rfc3339(),
                to_json(&NotificationData {
                    application_id: Some(application_id.to_string()),
                    author_id: Some(author_id.clone()),
                    reason: None,
                })?
            ],
        )
        .await?;

        if let Some(ref uid) = application.user_id {
            tx.execute(
                "UPDATE users SET role = ?1 WHERE uid = ?2 AND role = ?3",
                libsql::params![Role::Author.as_str(), uid.as_str(), Role::User.as_str()],
            )
            .await?;
        }

        tx.commit().await?;

        tracing::info!(
            application_id,
            author_id = author_id.as_str(),
            "application approved"
        );

        Ok(Author {
            id: author_id,
            name: application.name,
            email: application.email,
            bio: application.bio,
            expertise: Some(application.writing_experience),
            avatar: None,
            social_links: SocialLinks::default(),
            posts_count: 0,
            joined_at: now,
        })
    }

    /// Reject a pending application.
    ///
    /// One transaction: stamp the application and insert the
    /// `application_rejected` notification.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidTransition` when the application is no
    /// longer pending, `StoreError::NotFound` for an unknown id,
    /// `StoreError::AccessDenied` for non-admin sessions.
    pub async fn reject_application(
        &self,
        application_id: &str,
        reason: Option<&str>,
    ) -> Result<AuthorApplication, StoreError> {
        self.require(Action::RejectApplication)?;

        let application = self.get_application(application_id).await?;
        if !application
            .status
            .can_transition_to(ApplicationStatus::Rejected)
        {
            return Err(StoreError::InvalidTransition(format!(
                "application {application_id} is already {}",
                application.status
            )));
        }

        let now = Utc::now();
        let notification_id = self.db().generate_id(PREFIX_NOTIFICATION).await?;
        let stored_reason = reason.unwrap_or(DEFAULT_REJECTION_REASON);
        let message = reason.unwrap_or(REJECTED_MESSAGE);

        let tx = self.db().conn().transaction().await?;

        let stamped = tx
            .execute(
                "UPDATE applications
                 SET status = ?1, rejected_at = ?2, rejection_reason = ?3
                 WHERE id = ?4 AND status = ?5",
                libsql::params![
                    ApplicationStatus::Rejected.as_str(),
                    now.to_rfc3339(),
                    stored_reason,
                    application_id,
                    ApplicationStatus::Pending.as_str()
                ],
            )
            .await?;
        if stamped == 0 {
            return Err(StoreError::InvalidTransition(format!(
                "application {application_id} was decided concurrently"
            )));
        }

        tx.execute(
            "INSERT INTO notifications
             (id, user_id, kind, title, message, is_read, created_at, data)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            libsql::params![
                notification_id.as_str(),
                application.user_id.clone().unwrap_or_default(),
                NotificationKind::ApplicationRejected.as_str(),
                REJECTED_TITLE,
                message,
                0i64,
                now.to_rfc3339(),
                to_json(&NotificationData {
                    application_id: Some(application_id.to_string()),
                    author_id: None,
                    reason: reason.map(String::from),
                })?
            ],
        )
        .await?;

        tx.commit().await?;

        tracing::info!(application_id, "application rejected");

        self.get_application(application_id).await
    }

    /// Hard delete an application record.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` for an unknown id,
    /// `StoreError::AccessDenied` for non-admin sessions.
    pub async fn delete_application(&self, application_id: &str) -> Result<(), StoreError> {
        self.require(Action::ViewAdminDashboard)?;
        self.get_application(application_id).await?;
        self.db()
            .conn()
            .execute("DELETE FROM applications WHERE id = ?1", [application_id])
            .await?;
        tracing::info!(application_id, "application deleted");
        Ok(())
    }
}
