//! Notification repository — per-user inbox reads and read-marking.
//!
//! Notifications are only ever created inside application-decision
//! transactions (see `repos::application`); this module covers the consuming
//! side.

use vv_core::entities::Notification;

use crate::error::StoreError;
use crate::helpers::{parse_datetime, parse_enum, parse_json};
use crate::service::VvService;

const SELECT_COLS: &str = "id, user_id, kind, title, message, is_read, created_at, data";

fn row_to_notification(row: &libsql::Row) -> Result<Notification, StoreError> {
    Ok(Notification {
        id: row.get(0)?,
        user_id: row.get(1)?,
        kind: parse_enum(&row.get::<String>(2)?)?,
        title: row.get(3)?,
        message: row.get(4)?,
        is_read: row.get::<i64>(5)? != 0,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
        data: parse_json(&row.get::<String>(7)?)?,
    })
}

impl VvService {
    /// A user's notifications, newest first.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails.
    pub async fn list_notifications(&self, user_id: &str) -> Result<Vec<Notification>, StoreError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM notifications
                     WHERE user_id = ?1
                     ORDER BY created_at DESC, rowid DESC"
                ),
                [user_id],
            )
            .await?;
        let mut items = Vec::new();
        while let Some(row) = rows.next().await? {
            items.push(row_to_notification(&row)?);
        }
        Ok(items)
    }

    /// Count of a user's unread notifications (badge counter).
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the query fails.
    pub async fn unread_notification_count(&self, user_id: &str) -> Result<u64, StoreError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT COUNT(*) FROM notifications WHERE user_id = ?1 AND is_read = 0",
                [user_id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| StoreError::Query("count returned no row".into()))?;
        let count = row.get::<i64>(0)?;
        Ok(u64::try_from(count).unwrap_or(0))
    }

    /// Mark one notification as read.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no notification has this id.
    pub async fn mark_notification_read(&self, notification_id: &str) -> Result<(), StoreError> {
        let updated = self
            .db()
            .conn()
            .execute(
                "UPDATE notifications SET is_read = 1 WHERE id = ?1",
                [notification_id],
            )
            .await?;
        if updated == 0 {
            return Err(StoreError::NotFound {
                entity: "notification",
                id: notification_id.to_string(),
            });
        }
        Ok(())
    }
}
