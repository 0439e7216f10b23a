//! Notification ledger reads.

use std::sync::Arc;

use barterhub_core::error::AppError;
use barterhub_core::types::{NotificationId, UserId};
use barterhub_database::store::SwapStore;
use barterhub_entity::notification::Notification;

use crate::context::RequestContext;
use crate::deadline::StoreDeadline;

/// Reads the caller's notification ledger.
#[derive(Debug, Clone)]
pub struct NotificationService {
    store: Arc<dyn SwapStore>,
    deadline: StoreDeadline,
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(store: Arc<dyn SwapStore>, deadline: StoreDeadline) -> Self {
        Self { store, deadline }
    }

    /// Swap proposals awaiting the user's decision, newest first.
    ///
    /// Callers may only read their own ledger. An empty result is `NotFound`.
    pub async fn list_open(
        &self,
        ctx: &RequestContext,
        user_id: UserId,
    ) -> Result<Vec<Notification>, AppError> {
        if ctx.user_id != user_id {
            return Err(AppError::forbidden(
                "Notifications can only be read by their recipient",
            ));
        }

        let open = self
            .deadline
            .run("list_open_notifications", self.store.list_open_notifications(user_id))
            .await?;
        if open.is_empty() {
            return Err(AppError::not_found("No notifications found"));
        }
        Ok(open)
    }

    /// Gets the unread notification count.
    pub async fn unread_count(&self, ctx: &RequestContext) -> Result<i64, AppError> {
        self.deadline
            .run(
                "count_unread_notifications",
                self.store.count_unread_notifications(ctx.user_id),
            )
            .await
    }

    /// Marks one of the caller's notifications as read.
    ///
    /// Returns the number of rows flipped; re-marking a read notification is 0.
    pub async fn mark_read(
        &self,
        ctx: &RequestContext,
        notification_id: NotificationId,
    ) -> Result<u64, AppError> {
        let notification = self
            .deadline
            .run("find_notification", self.store.find_notification(notification_id))
            .await?
            .ok_or_else(|| AppError::not_found(format!("Notification {notification_id} not found")))?;
        if notification.user_id != ctx.user_id {
            return Err(AppError::forbidden(
                "Notifications can only be read by their recipient",
            ));
        }

        self.deadline
            .run(
                "mark_notification_read",
                self.store.mark_notification_read(notification_id, ctx.user_id),
            )
            .await
    }

    /// Marks all notifications as read for the current user.
    pub async fn mark_all_read(&self, ctx: &RequestContext) -> Result<u64, AppError> {
        self.deadline
            .run(
                "mark_all_notifications_read",
                self.store.mark_all_notifications_read(ctx.user_id),
            )
            .await
    }
}
