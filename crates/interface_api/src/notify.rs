//! Notification dispatch
//!
//! Outbound email is delegated to the host ERP's mailer in production;
//! this process only logs what it would send. The port keeps handlers
//! and jobs testable with a recording stub.

use async_trait::async_trait;
use tracing::info;

use core_kernel::{NotificationSender, PortError};

/// Logs notifications instead of sending them
#[derive(Debug, Default, Clone)]
pub struct LogNotifier;

#[async_trait]
impl NotificationSender for LogNotifier {
    async fn send(
        &self,
        recipients: &[String],
        subject: &str,
        _body: &str,
    ) -> Result<(), PortError> {
        info!(recipients = ?recipients, subject, "notification dispatched");
        Ok(())
    }
}
