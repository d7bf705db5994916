//! Post-commit hooks.
//!
//! Hooks run strictly after an operation's transaction has committed.
//! Each hook is contained independently: a failure is logged and never
//! affects the committed state, the other hooks, or the caller's result.

use std::sync::Arc;

use async_trait::async_trait;
use semillero_core::types::DbId;
use semillero_db::models::notification::CreateNotification;
use semillero_db::repositories::{NotificationRepo, UserRepo};
use semillero_db::DbPool;
use semillero_events::bus::EVENT_PROJECT_GRADED;
use semillero_events::delivery::EmailDelivery;
use semillero_events::{EventBus, PlatformEvent};

/// Error raised by a post-commit hook. Only ever logged.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct HookError(pub String);

impl HookError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// A best-effort side effect executed after commit confirmation.
#[async_trait]
pub trait PostCommitHook: Send + Sync {
    /// Short name used in log lines.
    fn name(&self) -> &'static str;

    /// Run the hook for one committed transition.
    async fn run(&self, pool: &DbPool, event: &PlatformEvent) -> Result<(), HookError>;
}

/// Run every hook in order, containing failures per hook.
pub async fn dispatch_all(hooks: &[Arc<dyn PostCommitHook>], pool: &DbPool, event: &PlatformEvent) {
    for hook in hooks {
        if let Err(e) = hook.run(pool, event).await {
            tracing::warn!(
                hook = hook.name(),
                event_type = %event.event_type,
                error = %e,
                "Post-commit hook failed"
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Event bus hook
// ---------------------------------------------------------------------------

/// Publishes every committed transition on the in-process event bus.
pub struct EventBusHook {
    bus: Arc<EventBus>,
}

impl EventBusHook {
    pub fn new(bus: Arc<EventBus>) -> Self {
        Self { bus }
    }
}

#[async_trait]
impl PostCommitHook for EventBusHook {
    fn name(&self) -> &'static str {
        "event_bus"
    }

    async fn run(&self, _pool: &DbPool, event: &PlatformEvent) -> Result<(), HookError> {
        self.bus.publish(event.clone());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// In-app notification hook
// ---------------------------------------------------------------------------

/// Writes one in-app notification per affected team member when a project
/// is graded.
pub struct InAppNotificationHook;

#[async_trait]
impl PostCommitHook for InAppNotificationHook {
    fn name(&self) -> &'static str {
        "in_app_notification"
    }

    async fn run(&self, pool: &DbPool, event: &PlatformEvent) -> Result<(), HookError> {
        if event.event_type != EVENT_PROJECT_GRADED {
            return Ok(());
        }

        let project_id = event.source_entity_id;
        let body = grading_body(event, project_id);

        // One failed insert must not block the remaining members.
        for code in member_codes(event) {
            let create = CreateNotification {
                user_code: code.clone(),
                project_id,
                title: "Your project was graded".to_string(),
                body: body.clone(),
            };
            if let Err(e) = NotificationRepo::create(pool, &create).await {
                tracing::warn!(user_code = %code, error = %e, "Failed to write grading notification");
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Email hook
// ---------------------------------------------------------------------------

/// Sends one grading email per affected team member.
pub struct EmailHook {
    delivery: EmailDelivery,
}

impl EmailHook {
    pub fn new(delivery: EmailDelivery) -> Self {
        Self { delivery }
    }
}

#[async_trait]
impl PostCommitHook for EmailHook {
    fn name(&self) -> &'static str {
        "email"
    }

    async fn run(&self, pool: &DbPool, event: &PlatformEvent) -> Result<(), HookError> {
        if event.event_type != EVENT_PROJECT_GRADED {
            return Ok(());
        }

        let codes = member_codes(event);
        if codes.is_empty() {
            return Ok(());
        }

        let users = UserRepo::find_by_codes(pool, &codes)
            .await
            .map_err(|e| HookError::new(format!("recipient lookup failed: {e}")))?;

        for user in users {
            if let Err(e) = self.delivery.deliver(&user.email, event).await {
                tracing::warn!(user_code = %user.code, error = %e, "Failed to send grading email");
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Payload helpers
// ---------------------------------------------------------------------------

/// Team member codes carried in a grading event payload.
fn member_codes(event: &PlatformEvent) -> Vec<String> {
    event.payload["member_codes"]
        .as_array()
        .map(|values| {
            values
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

fn grading_body(event: &PlatformEvent, project_id: Option<DbId>) -> String {
    let observation = event.payload["observation"].as_str().unwrap_or_default();
    match project_id {
        Some(id) if !observation.is_empty() => {
            format!("Project {id} was graded. Feedback: {observation}")
        }
        Some(id) => format!("Project {id} was graded."),
        None => "Your project was graded.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_codes_reads_payload_array() {
        let event = PlatformEvent::new(EVENT_PROJECT_GRADED)
            .with_payload(serde_json::json!({"member_codes": ["U1", "U2"]}));
        assert_eq!(member_codes(&event), vec!["U1", "U2"]);
    }

    #[test]
    fn member_codes_tolerates_missing_payload() {
        let event = PlatformEvent::new(EVENT_PROJECT_GRADED);
        assert!(member_codes(&event).is_empty());
    }

    #[test]
    fn grading_body_includes_feedback_when_present() {
        let event = PlatformEvent::new(EVENT_PROJECT_GRADED)
            .with_payload(serde_json::json!({"observation": "solid work"}));
        assert_eq!(
            grading_body(&event, Some(9)),
            "Project 9 was graded. Feedback: solid work"
        );
    }
}
