//! Command execution
//!
//! Event handlers return commands; this module persists them and
//! dispatches notifications. Shared by the hook endpoints and the
//! scheduled jobs. Entry writes share one transaction so a failing
//! command rolls back the whole batch, and notifications go out only
//! after the commit.

use serde::Serialize;
use uuid::Uuid;

use domain_settlement::Command;
use infra_db::{DatabaseError, EntryRepository};

use crate::error::ApiError;
use crate::AppState;

/// What a batch of commands did, reported back to the caller
#[derive(Debug, Default, Serialize)]
pub struct CommandOutcome {
    pub created_entries: Vec<Uuid>,
    pub updated_entries: Vec<Uuid>,
    pub notifications_sent: usize,
}

pub async fn execute(state: &AppState, commands: Vec<Command>) -> Result<CommandOutcome, ApiError> {
    let mut outcome = CommandOutcome::default();
    let mut notifications = Vec::new();

    let mut tx = state.pool.begin().await.map_err(DatabaseError::from)?;
    for command in commands {
        match command {
            Command::CreateEntry(entry) => {
                EntryRepository::insert_with(&mut *tx, &entry).await?;
                outcome.created_entries.push(entry.id.into());
            }
            Command::UpdateEntry(entry) => {
                EntryRepository::update_with(&mut *tx, &entry).await?;
                outcome.updated_entries.push(entry.id.into());
            }
            Command::Notify {
                recipients,
                subject,
                body,
            } => notifications.push((recipients, subject, body)),
        }
    }
    tx.commit().await.map_err(DatabaseError::from)?;

    for (recipients, subject, body) in notifications {
        state.notifier.send(&recipients, &subject, &body).await?;
        outcome.notifications_sent += 1;
    }
    Ok(outcome)
}
