//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods.
//! Methods accept `impl PgExecutor<'_>` so the same call runs against the
//! pool directly or inside a workflow transaction.

pub mod activity_repo;
pub mod group_repo;
pub mod idea_history_repo;
pub mod idea_repo;
pub mod notification_repo;
pub mod project_history_repo;
pub mod project_repo;
pub mod status_repo;
pub mod team_member_repo;
pub mod team_repo;
pub mod user_repo;

pub use activity_repo::ActivityRepo;
pub use group_repo::GroupRepo;
pub use idea_history_repo::IdeaHistoryRepo;
pub use idea_repo::IdeaRepo;
pub use notification_repo::NotificationRepo;
pub use project_history_repo::ProjectHistoryRepo;
pub use project_repo::ProjectRepo;
pub use status_repo::StatusRepo;
pub use team_member_repo::TeamMemberRepo;
pub use team_repo::TeamRepo;
pub use user_repo::UserRepo;
