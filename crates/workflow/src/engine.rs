//! The review-and-progression workflow engine.
//!
//! Each public operation is one atomic unit of work: load entities,
//! validate preconditions, resolve every status it references, apply the
//! transition and its side effects inside a single transaction, append one
//! audit record, commit, then dispatch post-commit hooks.

use std::sync::Arc;

use serde::Serialize;
use serde_json::json;

use semillero_core::error::CoreError;
use semillero_core::proposal::ProjectDetails;
use semillero_core::status::{
    ReviewAction, STATUS_APROBADO, STATUS_CALIFICADO, STATUS_EN_CURSO, STATUS_LIBRE,
    STATUS_RECHAZADO, STATUS_REVISION, STATUS_SELECCIONADO, STATUS_STAND_BY,
};
use semillero_core::types::{DbId, GroupAffiliation};

use semillero_db::models::activity::Activity;
use semillero_db::models::idea::Idea;
use semillero_db::models::project::{CreateProject, Project};
use semillero_db::models::team::Team;
use semillero_db::repositories::{
    ActivityRepo, GroupRepo, IdeaRepo, ProjectRepo, TeamMemberRepo, UserRepo,
};
use semillero_db::DbPool;

use semillero_events::bus::{
    EVENT_CORRECTION_REJECTED, EVENT_IDEA_REVIEWED, EVENT_PROJECT_CONTINUED, EVENT_PROJECT_CREATED,
    EVENT_PROJECT_GRADED, EVENT_PROJECT_RELEASED, EVENT_PROJECT_REVIEWED, EVENT_PROPOSAL_ADOPTED,
};
use semillero_events::PlatformEvent;

use crate::catalog::StatusCatalog;
use crate::error::{classify_insert_error, WorkflowResult};
use crate::history::HistoryRecorder;
use crate::hooks::{self, PostCommitHook};
use crate::teams::TeamLifecycle;

// ---------------------------------------------------------------------------
// Operation outcomes
// ---------------------------------------------------------------------------

/// Result of [`WorkflowEngine::review_idea`].
#[derive(Debug, Serialize)]
pub struct ReviewedIdea {
    pub message: String,
    pub idea: Idea,
}

/// Result of [`WorkflowEngine::create_project_from_idea`].
#[derive(Debug, Serialize)]
pub struct CreatedProject {
    pub project: Project,
    pub idea: Idea,
    pub team: Team,
    pub activity: Activity,
}

/// Result of [`WorkflowEngine::review_project`].
#[derive(Debug, Serialize)]
pub struct ReviewedProject {
    pub message: String,
    pub project: Project,
}

/// Result of [`WorkflowEngine::reject_correction`].
#[derive(Debug, Serialize)]
pub struct CorrectionRejected {
    pub message: String,
    pub project: Project,
    pub idea: Idea,
}

/// Result of [`WorkflowEngine::release_project`].
#[derive(Debug, Serialize)]
pub struct ReleasedProject {
    pub message: String,
    pub project_id: DbId,
    pub idea_id: DbId,
}

/// Result of [`WorkflowEngine::adopt_proposal`] and
/// [`WorkflowEngine::continue_project`].
#[derive(Debug, Serialize)]
pub struct AdoptedProposal {
    pub message: String,
    pub project: Project,
    pub team: Team,
}

/// Result of [`WorkflowEngine::grade_project`].
#[derive(Debug, Serialize)]
pub struct GradedProject {
    pub message: String,
    pub project: Project,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// The workflow engine. Holds no per-operation state; every operation
/// re-reads current entity state from the store.
pub struct WorkflowEngine {
    pool: DbPool,
    catalog: Arc<StatusCatalog>,
    hooks: Vec<Arc<dyn PostCommitHook>>,
}

impl WorkflowEngine {
    pub fn new(pool: DbPool, catalog: Arc<StatusCatalog>) -> Self {
        Self {
            pool,
            catalog,
            hooks: Vec::new(),
        }
    }

    /// Register a post-commit hook. Hooks run in registration order.
    pub fn with_hook(mut self, hook: Arc<dyn PostCommitHook>) -> Self {
        self.hooks.push(hook);
        self
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    // -----------------------------------------------------------------
    // Idea review
    // -----------------------------------------------------------------

    /// Review a submitted idea: approve it, request corrections, or
    /// reject it.
    pub async fn review_idea(
        &self,
        idea_id: DbId,
        action_value: &str,
        observation: &str,
        actor_code: &str,
    ) -> WorkflowResult<ReviewedIdea> {
        let action = parse_action(action_value)?;
        ensure_idea_exists(&self.pool, idea_id).await?;

        let target = match action {
            ReviewAction::Approve => self.catalog.resolve(STATUS_APROBADO)?,
            ReviewAction::ApproveWithObservations => self.catalog.resolve(STATUS_STAND_BY)?,
            ReviewAction::Reject => self.catalog.resolve(STATUS_RECHAZADO)?,
        };

        let mut tx = self.pool.begin().await?;
        let idea = IdeaRepo::set_status(&mut *tx, idea_id, target.id)
            .await?
            .ok_or_else(|| CoreError::not_found("Idea", idea_id))?;
        HistoryRecorder::record_idea(
            &mut *tx,
            idea_id,
            target.id,
            actor_code,
            &HistoryRecorder::compose(action.as_str(), observation),
        )
        .await?;
        tx.commit().await?;

        tracing::info!(idea_id, action = action.as_str(), status = %target.name, "Idea reviewed");

        let message = match action {
            ReviewAction::Approve => "Idea approved".to_string(),
            ReviewAction::ApproveWithObservations => {
                "Idea approved with observations; corrections requested".to_string()
            }
            ReviewAction::Reject => "Idea rejected".to_string(),
        };

        self.dispatch(
            PlatformEvent::new(EVENT_IDEA_REVIEWED)
                .with_source("idea", idea_id)
                .with_actor(actor_code)
                .with_payload(json!({"action": action.as_str(), "status": target.name})),
        )
        .await;

        Ok(ReviewedIdea { message, idea })
    }

    // -----------------------------------------------------------------
    // Project creation
    // -----------------------------------------------------------------

    /// Turn an approved idea into a project.
    pub async fn create_project_from_idea(
        &self,
        idea_id: DbId,
        details: &ProjectDetails,
        actor_code: &str,
    ) -> WorkflowResult<CreatedProject> {
        details.check()?;

        let idea = IdeaRepo::find_by_id(&self.pool, idea_id)
            .await?
            .ok_or_else(|| CoreError::not_found("Idea", idea_id))?;

        let aprobado = self.catalog.resolve(STATUS_APROBADO)?;
        let en_curso = self.catalog.resolve(STATUS_EN_CURSO)?;

        if idea.status_id != aprobado.id {
            return Err(CoreError::Conflict(format!(
                "Idea {idea_id} is not approved; a project cannot be created"
            ))
            .into());
        }
        if ProjectRepo::find_by_idea(&self.pool, idea_id).await?.is_some() {
            return Err(CoreError::Conflict(format!(
                "A project already exists for idea {idea_id}"
            ))
            .into());
        }

        let affiliation = idea.affiliation().ok_or_else(|| {
            CoreError::Conflict(format!("Idea {idea_id} has no group affiliation"))
        })?;

        let (activity, scope_type) = ActivityRepo::find_by_affiliation(&self.pool, &affiliation)
            .await?
            .into_iter()
            .find_map(|a| {
                let scope = a.scope_type.clone()?;
                Some((a, scope))
            })
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "No activity with a scope type is defined for group {affiliation}"
                ))
            })?;

        let team = self
            .find_actor_team(&affiliation, actor_code)
            .await?
            .ok_or_else(|| {
                CoreError::Forbidden(format!(
                    "User {actor_code} does not belong to a team in group {affiliation}"
                ))
            })?;

        let mut tx = self.pool.begin().await?;
        let project = ProjectRepo::create(
            &mut *tx,
            &CreateProject {
                idea_id,
                research_line: details.research_line.clone(),
                technologies: details.technologies.clone(),
                keywords: details.keywords.clone(),
                scope_type,
                status_id: en_curso.id,
            },
        )
        .await
        .map_err(classify_insert_error)?;
        HistoryRecorder::record_project(
            &mut *tx,
            project.id,
            Some(team.id),
            en_curso.id,
            actor_code,
            "Project created from approved idea",
        )
        .await?;
        tx.commit().await?;

        tracing::info!(
            project_id = project.id,
            idea_id,
            team_id = team.id,
            "Project created"
        );

        self.dispatch(
            PlatformEvent::new(EVENT_PROJECT_CREATED)
                .with_source("project", project.id)
                .with_actor(actor_code)
                .with_payload(json!({"idea_id": idea_id, "team_id": team.id})),
        )
        .await;

        Ok(CreatedProject {
            project,
            idea,
            team,
            activity,
        })
    }

    // -----------------------------------------------------------------
    // Project review
    // -----------------------------------------------------------------

    /// Review a project: approve, request corrections, or reject.
    ///
    /// Rejection grades the project, hard-deletes every team tied to the
    /// idea's group, and returns the idea to the proposal bank unless the
    /// project had already been graded once.
    pub async fn review_project(
        &self,
        project_id: DbId,
        action_value: &str,
        observation: &str,
        actor_code: &str,
    ) -> WorkflowResult<ReviewedProject> {
        let action = parse_action(action_value)?;
        let project = self.load_project(project_id).await?;
        let idea = self.load_idea(project.idea_id).await?;

        let en_curso = self.catalog.resolve(STATUS_EN_CURSO)?;
        let aprobado = self.catalog.resolve(STATUS_APROBADO)?;
        let stand_by = self.catalog.resolve(STATUS_STAND_BY)?;
        let calificado = self.catalog.resolve(STATUS_CALIFICADO)?;
        let libre = self.catalog.resolve(STATUS_LIBRE)?;

        let teams = match idea.affiliation() {
            Some(affiliation) => TeamLifecycle::find_by_affiliation(&self.pool, &affiliation).await?,
            None => Vec::new(),
        };
        let team_ref = self.locate_leader_team(&teams).await?;

        let mut tx = self.pool.begin().await?;
        let (project, message) = match action {
            ReviewAction::Approve => {
                let project = ProjectRepo::set_status(&mut *tx, project_id, en_curso.id)
                    .await?
                    .ok_or_else(|| CoreError::not_found("Project", project_id))?;
                IdeaRepo::set_status(&mut *tx, idea.id, aprobado.id).await?;
                HistoryRecorder::record_project(
                    &mut *tx,
                    project_id,
                    team_ref,
                    en_curso.id,
                    actor_code,
                    &HistoryRecorder::compose(action.as_str(), observation),
                )
                .await?;
                (project, "Project approved; work continues".to_string())
            }
            ReviewAction::ApproveWithObservations => {
                let project = ProjectRepo::set_status(&mut *tx, project_id, en_curso.id)
                    .await?
                    .ok_or_else(|| CoreError::not_found("Project", project_id))?;
                IdeaRepo::set_status(&mut *tx, idea.id, stand_by.id).await?;
                HistoryRecorder::record_project(
                    &mut *tx,
                    project_id,
                    team_ref,
                    stand_by.id,
                    actor_code,
                    &HistoryRecorder::compose(action.as_str(), observation),
                )
                .await?;
                (
                    project,
                    "Corrections requested; the idea is on stand-by".to_string(),
                )
            }
            ReviewAction::Reject => {
                let was_graded = project.status_id == calificado.id;
                let project = ProjectRepo::set_status(&mut *tx, project_id, calificado.id)
                    .await?
                    .ok_or_else(|| CoreError::not_found("Project", project_id))?;
                let message = if was_graded {
                    // A second rejection of an already-graded project keeps
                    // the idea approved but detaches it from the group.
                    IdeaRepo::set_status(&mut *tx, idea.id, aprobado.id).await?;
                    IdeaRepo::clear_affiliation(&mut *tx, idea.id).await?;
                    "Project rejected; the idea remains approved".to_string()
                } else {
                    IdeaRepo::release(&mut *tx, idea.id, libre.id).await?;
                    "Project rejected; the idea returns to the proposal bank".to_string()
                };
                let team_ids: Vec<DbId> = teams.iter().map(|t| t.id).collect();
                TeamLifecycle::destroy_teams(&mut tx, &team_ids).await?;
                // The teams are gone; the record carries no team reference.
                HistoryRecorder::record_project(
                    &mut *tx,
                    project_id,
                    None,
                    calificado.id,
                    actor_code,
                    &HistoryRecorder::compose(action.as_str(), observation),
                )
                .await?;
                (project, message)
            }
        };
        tx.commit().await?;

        tracing::info!(project_id, action = action.as_str(), "Project reviewed");

        self.dispatch(
            PlatformEvent::new(EVENT_PROJECT_REVIEWED)
                .with_source("project", project_id)
                .with_actor(actor_code)
                .with_payload(json!({"action": action.as_str(), "idea_id": idea.id})),
        )
        .await;

        Ok(ReviewedProject { message, project })
    }

    // -----------------------------------------------------------------
    // Correction rejection
    // -----------------------------------------------------------------

    /// The student declines to address requested corrections. The project
    /// is graded as it stands, its teams are destroyed, and the idea is
    /// detached from the group.
    pub async fn reject_correction(
        &self,
        idea_id: DbId,
        project_id: DbId,
        actor_code: &str,
    ) -> WorkflowResult<CorrectionRejected> {
        let idea = self.load_idea(idea_id).await?;
        let project = self.load_project(project_id).await?;
        if project.idea_id != idea.id {
            return Err(CoreError::Validation(format!(
                "Project {project_id} does not belong to idea {idea_id}"
            ))
            .into());
        }

        let seleccionado = self.catalog.resolve(STATUS_SELECCIONADO)?;
        let calificado = self.catalog.resolve(STATUS_CALIFICADO)?;
        let stand_by = self.catalog.resolve(STATUS_STAND_BY)?;
        let libre = self.catalog.resolve(STATUS_LIBRE)?;
        let aprobado = self.catalog.resolve(STATUS_APROBADO)?;

        let teams = match idea.affiliation() {
            Some(affiliation) => TeamLifecycle::find_by_affiliation(&self.pool, &affiliation).await?,
            None => Vec::new(),
        };
        let team_ids: Vec<DbId> = teams.iter().map(|t| t.id).collect();

        let mut tx = self.pool.begin().await?;

        let (project, idea) = if project.status_id == seleccionado.id {
            let project = ProjectRepo::set_status(&mut *tx, project_id, calificado.id)
                .await?
                .ok_or_else(|| CoreError::not_found("Project", project_id))?;
            let idea = if idea.status_id == stand_by.id {
                IdeaRepo::release(&mut *tx, idea_id, libre.id)
                    .await?
                    .ok_or_else(|| CoreError::not_found("Idea", idea_id))?
            } else {
                IdeaRepo::clear_affiliation(&mut *tx, idea_id)
                    .await?
                    .ok_or_else(|| CoreError::not_found("Idea", idea_id))?
            };
            (project, idea)
        } else if project.status_id == calificado.id {
            let idea = if idea.status_id == stand_by.id {
                IdeaRepo::set_status(&mut *tx, idea_id, aprobado.id).await?;
                IdeaRepo::clear_affiliation(&mut *tx, idea_id)
                    .await?
                    .ok_or_else(|| CoreError::not_found("Idea", idea_id))?
            } else {
                IdeaRepo::clear_affiliation(&mut *tx, idea_id)
                    .await?
                    .ok_or_else(|| CoreError::not_found("Idea", idea_id))?
            };
            (project, idea)
        } else {
            let idea = IdeaRepo::clear_affiliation(&mut *tx, idea_id)
                .await?
                .ok_or_else(|| CoreError::not_found("Idea", idea_id))?;
            (project, idea)
        };

        TeamLifecycle::destroy_teams(&mut tx, &team_ids).await?;
        HistoryRecorder::record_project(
            &mut *tx,
            project_id,
            None,
            project.status_id,
            actor_code,
            "Requested corrections declined by the team",
        )
        .await?;
        tx.commit().await?;

        tracing::info!(project_id, idea_id, "Corrections declined");

        self.dispatch(
            PlatformEvent::new(EVENT_CORRECTION_REJECTED)
                .with_source("project", project_id)
                .with_actor(actor_code)
                .with_payload(json!({"idea_id": idea_id})),
        )
        .await;

        Ok(CorrectionRejected {
            message: "Corrections declined; the project keeps its grade".to_string(),
            project,
            idea,
        })
    }

    // -----------------------------------------------------------------
    // Release to pool
    // -----------------------------------------------------------------

    /// The team leader releases the project back to the proposal bank.
    /// The team is deactivated, not deleted, so history keeps its link.
    pub async fn release_project(
        &self,
        project_id: DbId,
        actor_code: &str,
    ) -> WorkflowResult<ReleasedProject> {
        let project = self.load_project(project_id).await?;
        let idea = self.load_idea(project.idea_id).await?;
        let libre = self.catalog.resolve(STATUS_LIBRE)?;

        let affiliation = idea.affiliation().ok_or_else(|| {
            CoreError::Conflict(format!(
                "Idea {} has no group affiliation; nothing to release",
                idea.id
            ))
        })?;

        let teams = TeamLifecycle::find_by_affiliation(&self.pool, &affiliation).await?;
        let mut leader_team: Option<&Team> = None;
        for team in teams.iter().filter(|t| t.is_active) {
            if TeamLifecycle::find_leader(&self.pool, team.id, actor_code)
                .await?
                .is_some()
            {
                leader_team = Some(team);
                break;
            }
        }
        let team = leader_team.ok_or_else(|| {
            CoreError::Forbidden(format!(
                "User {actor_code} is not the leader of a team for group {affiliation}"
            ))
        })?;

        let mut tx = self.pool.begin().await?;
        IdeaRepo::release(&mut *tx, idea.id, libre.id)
            .await?
            .ok_or_else(|| CoreError::not_found("Idea", idea.id))?;
        TeamLifecycle::deactivate_team(&mut *tx, team.id).await?;
        HistoryRecorder::record_project(
            &mut *tx,
            project_id,
            Some(team.id),
            libre.id,
            actor_code,
            "Project released back to the proposal bank",
        )
        .await?;
        tx.commit().await?;

        tracing::info!(project_id, idea_id = idea.id, team_id = team.id, "Project released");

        self.dispatch(
            PlatformEvent::new(EVENT_PROJECT_RELEASED)
                .with_source("project", project_id)
                .with_actor(actor_code)
                .with_payload(json!({"idea_id": idea.id, "team_id": team.id})),
        )
        .await;

        Ok(ReleasedProject {
            message: "Project released back to the proposal bank".to_string(),
            project_id,
            idea_id: idea.id,
        })
    }

    // -----------------------------------------------------------------
    // Adoption and continuation
    // -----------------------------------------------------------------

    /// Adopt a banked proposal: a new team forms in the target group and
    /// takes the idea back into review.
    pub async fn adopt_proposal(
        &self,
        project_id: DbId,
        actor_code: &str,
        affiliation: &GroupAffiliation,
    ) -> WorkflowResult<AdoptedProposal> {
        let project = self.load_project(project_id).await?;
        let idea = self.load_idea(project.idea_id).await?;

        let libre = self.catalog.resolve(STATUS_LIBRE)?;
        let seleccionado = self.catalog.resolve(STATUS_SELECCIONADO)?;
        let revision = self.catalog.resolve(STATUS_REVISION)?;

        if idea.status_id != libre.id {
            return Err(CoreError::Conflict(format!(
                "Idea {} is not in the proposal bank",
                idea.id
            ))
            .into());
        }
        self.ensure_group_and_user(affiliation, actor_code).await?;

        let mut tx = self.pool.begin().await?;
        let (team, _leader) = TeamLifecycle::create_team(
            &mut tx,
            affiliation,
            &team_label(&idea.title, affiliation),
            actor_code,
        )
        .await?;
        let project = ProjectRepo::set_status(&mut *tx, project_id, seleccionado.id)
            .await?
            .ok_or_else(|| CoreError::not_found("Project", project_id))?;
        IdeaRepo::reassign(&mut *tx, idea.id, revision.id, actor_code, affiliation)
            .await?
            .ok_or_else(|| CoreError::not_found("Idea", idea.id))?;
        HistoryRecorder::record_project(
            &mut *tx,
            project_id,
            Some(team.id),
            seleccionado.id,
            actor_code,
            "Proposal adopted from the bank",
        )
        .await?;
        tx.commit().await?;

        tracing::info!(project_id, idea_id = idea.id, team_id = team.id, "Proposal adopted");

        self.dispatch(
            PlatformEvent::new(EVENT_PROPOSAL_ADOPTED)
                .with_source("project", project_id)
                .with_actor(actor_code)
                .with_payload(json!({"idea_id": idea.id, "team_id": team.id})),
        )
        .await;

        Ok(AdoptedProposal {
            message: "Proposal adopted; the team may begin work".to_string(),
            project,
            team,
        })
    }

    /// Continue a graded project in a new term: a new team forms and the
    /// idea re-enters review, but the project keeps its grade.
    pub async fn continue_project(
        &self,
        project_id: DbId,
        actor_code: &str,
        affiliation: &GroupAffiliation,
    ) -> WorkflowResult<AdoptedProposal> {
        let project = self.load_project(project_id).await?;
        let idea = self.load_idea(project.idea_id).await?;

        let calificado = self.catalog.resolve(STATUS_CALIFICADO)?;
        let revision = self.catalog.resolve(STATUS_REVISION)?;

        if project.status_id != calificado.id {
            return Err(CoreError::Conflict(format!(
                "Project {project_id} is not graded; only graded projects can be continued"
            ))
            .into());
        }
        self.ensure_group_and_user(affiliation, actor_code).await?;

        let mut tx = self.pool.begin().await?;
        let (team, _leader) = TeamLifecycle::create_team(
            &mut tx,
            affiliation,
            &team_label(&idea.title, affiliation),
            actor_code,
        )
        .await?;
        IdeaRepo::reassign(&mut *tx, idea.id, revision.id, actor_code, affiliation)
            .await?
            .ok_or_else(|| CoreError::not_found("Idea", idea.id))?;
        HistoryRecorder::record_project(
            &mut *tx,
            project_id,
            Some(team.id),
            revision.id,
            actor_code,
            "Project continued in a new term",
        )
        .await?;
        tx.commit().await?;

        tracing::info!(project_id, idea_id = idea.id, team_id = team.id, "Project continued");

        self.dispatch(
            PlatformEvent::new(EVENT_PROJECT_CONTINUED)
                .with_source("project", project_id)
                .with_actor(actor_code)
                .with_payload(json!({"idea_id": idea.id, "team_id": team.id})),
        )
        .await;

        Ok(AdoptedProposal {
            message: "Project continued in the new term".to_string(),
            project,
            team,
        })
    }

    // -----------------------------------------------------------------
    // Grading
    // -----------------------------------------------------------------

    /// Grade a project. Notification fan-out to the team runs after the
    /// transaction commits and can never roll the transition back.
    pub async fn grade_project(
        &self,
        project_id: DbId,
        observation: &str,
        actor_code: &str,
    ) -> WorkflowResult<GradedProject> {
        let project = self.load_project(project_id).await?;
        let idea = self.load_idea(project.idea_id).await?;

        let calificado = self.catalog.resolve(STATUS_CALIFICADO)?;
        let aprobado = self.catalog.resolve(STATUS_APROBADO)?;

        let team = match idea.affiliation() {
            Some(affiliation) => TeamLifecycle::find_by_affiliation(&self.pool, &affiliation)
                .await?
                .into_iter()
                .find(|t| t.is_active),
            None => None,
        };
        let member_codes: Vec<String> = match &team {
            Some(team) => TeamMemberRepo::list_by_team(&self.pool, team.id)
                .await?
                .into_iter()
                .map(|m| m.user_code)
                .collect(),
            None => Vec::new(),
        };

        let mut tx = self.pool.begin().await?;
        let project = ProjectRepo::set_status(&mut *tx, project_id, calificado.id)
            .await?
            .ok_or_else(|| CoreError::not_found("Project", project_id))?;
        IdeaRepo::set_status(&mut *tx, idea.id, aprobado.id)
            .await?
            .ok_or_else(|| CoreError::not_found("Idea", idea.id))?;
        HistoryRecorder::record_project(
            &mut *tx,
            project_id,
            team.as_ref().map(|t| t.id),
            calificado.id,
            actor_code,
            &HistoryRecorder::compose("Calificar", observation),
        )
        .await?;
        tx.commit().await?;

        tracing::info!(project_id, idea_id = idea.id, "Project graded");

        self.dispatch(
            PlatformEvent::new(EVENT_PROJECT_GRADED)
                .with_source("project", project_id)
                .with_actor(actor_code)
                .with_payload(json!({
                    "idea_id": idea.id,
                    "member_codes": member_codes,
                    "observation": observation,
                })),
        )
        .await;

        Ok(GradedProject {
            message: "Project graded".to_string(),
            project,
        })
    }

    // -----------------------------------------------------------------
    // Proposal bank
    // -----------------------------------------------------------------

    /// Ideas eligible for re-adoption: banked ideas whose project has
    /// been graded. Query-only.
    pub async fn list_free_proposals(&self) -> WorkflowResult<Vec<Idea>> {
        let libre = self.catalog.resolve(STATUS_LIBRE)?;
        let calificado = self.catalog.resolve(STATUS_CALIFICADO)?;
        Ok(IdeaRepo::find_free_proposals(&self.pool, libre.id, calificado.id).await?)
    }

    // -----------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------

    async fn load_idea(&self, idea_id: DbId) -> WorkflowResult<Idea> {
        Ok(IdeaRepo::find_by_id(&self.pool, idea_id)
            .await?
            .ok_or_else(|| CoreError::not_found("Idea", idea_id))?)
    }

    async fn load_project(&self, project_id: DbId) -> WorkflowResult<Project> {
        Ok(ProjectRepo::find_by_id(&self.pool, project_id)
            .await?
            .ok_or_else(|| CoreError::not_found("Project", project_id))?)
    }

    /// The first active team of the affiliation the actor belongs to.
    async fn find_actor_team(
        &self,
        affiliation: &GroupAffiliation,
        actor_code: &str,
    ) -> WorkflowResult<Option<Team>> {
        let teams = TeamLifecycle::find_by_affiliation(&self.pool, affiliation).await?;
        for team in teams.into_iter().filter(|t| t.is_active) {
            if TeamMemberRepo::find(&self.pool, team.id, actor_code)
                .await?
                .is_some()
            {
                return Ok(Some(team));
            }
        }
        Ok(None)
    }

    /// The team whose members include a leader, preferred for history
    /// linkage; falls back to the first team.
    async fn locate_leader_team(&self, teams: &[Team]) -> WorkflowResult<Option<DbId>> {
        for team in teams.iter().filter(|t| t.is_active) {
            let members = TeamMemberRepo::list_by_team(&self.pool, team.id).await?;
            if members.iter().any(|m| m.is_leader) {
                return Ok(Some(team.id));
            }
        }
        Ok(teams.first().map(|t| t.id))
    }

    /// Target group and acting user must both exist before adoption or
    /// continuation creates anything.
    async fn ensure_group_and_user(
        &self,
        affiliation: &GroupAffiliation,
        actor_code: &str,
    ) -> WorkflowResult<()> {
        GroupRepo::find(&self.pool, affiliation)
            .await?
            .ok_or_else(|| CoreError::not_found_key("Group", affiliation.to_string()))?;
        UserRepo::find_by_code(&self.pool, actor_code)
            .await?
            .ok_or_else(|| CoreError::not_found_key("User", actor_code))?;
        Ok(())
    }

    async fn dispatch(&self, event: PlatformEvent) {
        hooks::dispatch_all(&self.hooks, &self.pool, &event).await;
    }
}

/// Parse a review action wire value.
fn parse_action(value: &str) -> Result<ReviewAction, CoreError> {
    ReviewAction::parse(value)
        .ok_or_else(|| CoreError::Validation(format!("Invalid review action '{value}'")))
}

/// Verify an idea exists without loading it into the operation.
async fn ensure_idea_exists(pool: &DbPool, idea_id: DbId) -> WorkflowResult<()> {
    IdeaRepo::find_by_id(pool, idea_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Idea", idea_id))?;
    Ok(())
}

/// Descriptive label for a newly formed team.
fn team_label(idea_title: &str, affiliation: &GroupAffiliation) -> String {
    format!("{idea_title} ({affiliation})")
}
