//! Newsletter subscriber repository.

use chrono::Utc;

use vv_core::access::Action;
use vv_core::entities::Subscriber;
use vv_core::ids::PREFIX_SUBSCRIBER;
use vv_core::validate::FieldErrors;

use crate::error::StoreError;
use crate::helpers::parse_datetime;
use crate::service::VvService;

const SELECT_COLS: &str = "id, email, created_at";

fn row_to_subscriber(row: &libsql::Row) -> Result<Subscriber, StoreError> {
    Ok(Subscriber {
        id: row.get(0)?,
        email: row.get(1)?,
        created_at: parse_datetime(&row.get::<String>(2)?)?,
    })
}

impl VvService {
    /// Subscribe an email address. Idempotent: re-subscribing returns the
    /// existing record unchanged.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Validation` for a malformed address.
    pub async fn add_subscriber(&self, email: &str) -> Result<Subscriber, StoreError> {
        let mut errors = FieldErrors::new();
        errors.require_email("email", email);
        if !errors.is_empty() {
            return Err(StoreError::Validation(errors));
        }
        let email = email.trim();

        // The unique index on email arbitrates concurrent signups; the
        // conditional insert keeps the first record.
        let id = self.db().generate_id(PREFIX_SUBSCRIBER).await?;
        self.db()
            .conn()
            .execute(
                &format!(
                    "INSERT INTO subscribers ({SELECT_COLS}) VALUES (?1, ?2, ?3)
                     ON CONFLICT(email) DO NOTHING"
                ),
                libsql::params![id.as_str(), email, Utc::now().to_rfc3339()],
            )
            .await?;

        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM subscribers WHERE email = ?1"),
                [email],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| StoreError::Query("subscriber insert returned no row".into()))?;
        row_to_subscriber(&row)
    }

    /// All subscribers, oldest first. Admin export view.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::AccessDenied` for non-admin sessions.
    pub async fn list_subscribers(&self) -> Result<Vec<Subscriber>, StoreError> {
        self.require(Action::ViewAdminDashboard)?;
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM subscribers ORDER BY created_at, rowid"),
                (),
            )
            .await?;
        let mut items = Vec::new();
        while let Some(row) = rows.next().await? {
            items.push(row_to_subscriber(&row)?);
        }
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn subscribe_and_list() {
        let svc = admin_service().await;
        svc.add_subscriber("reader@example.com").await.unwrap();
        svc.add_subscriber("other@example.com").await.unwrap();

        let subscribers = svc.list_subscribers().await.unwrap();
        assert_eq!(subscribers.len(), 2);
    }

    #[tokio::test]
    async fn resubscribe_is_idempotent() {
        let svc = admin_service().await;
        let first = svc.add_subscriber("reader@example.com").await.unwrap();
        let second = svc.add_subscriber("reader@example.com").await.unwrap();
        assert_eq!(first, second);
        assert_eq!(svc.list_subscribers().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn malformed_email_is_rejected() {
        let svc = admin_service().await;
        assert!(matches!(
            svc.add_subscriber("not-an-email").await,
            Err(StoreError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn listing_subscribers_is_admin_only() {
        let svc = anon_service().await;
        svc.add_subscriber("reader@example.com").await.unwrap();
        assert!(matches!(
            svc.list_subscribers().await,
            Err(StoreError::AccessDenied { .. })
        ));
    }
}
