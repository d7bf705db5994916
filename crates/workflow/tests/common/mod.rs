//! Shared fixtures for workflow engine integration tests.

use std::sync::Arc;

use sqlx::PgPool;

use semillero_core::types::{GroupAffiliation, StatusId};
use semillero_db::models::activity::CreateActivity;
use semillero_db::models::group::CreateGroup;
use semillero_db::models::idea::{CreateIdea, Idea};
use semillero_db::models::team::{CreateTeam, Team};
use semillero_db::models::team_member::CreateTeamMember;
use semillero_db::models::user::CreateUser;
use semillero_db::repositories::{
    ActivityRepo, GroupRepo, IdeaRepo, StatusRepo, TeamMemberRepo, TeamRepo, UserRepo,
};
use semillero_workflow::{StatusCatalog, WorkflowEngine};

pub fn affiliation() -> GroupAffiliation {
    GroupAffiliation::new("CS101", "A", "1", 2024)
}

pub fn other_affiliation() -> GroupAffiliation {
    GroupAffiliation::new("CS101", "B", "1", 2025)
}

pub async fn engine(pool: &PgPool) -> WorkflowEngine {
    let catalog = Arc::new(StatusCatalog::load(pool).await.unwrap());
    WorkflowEngine::new(pool.clone(), catalog)
}

pub async fn status_id(pool: &PgPool, name: &str) -> StatusId {
    StatusRepo::find_by_name(pool, name)
        .await
        .unwrap()
        .unwrap_or_else(|| panic!("status {name} not seeded"))
        .id
}

pub async fn seed_group(pool: &PgPool, affiliation: &GroupAffiliation) {
    GroupRepo::create(
        pool,
        &CreateGroup {
            subject_code: affiliation.subject_code.clone(),
            group_letter: affiliation.group_letter.clone(),
            period: affiliation.period.clone(),
            year: affiliation.year,
            subject_name: "Software Projects".to_string(),
            professor_code: Some("P100".to_string()),
        },
    )
    .await
    .unwrap();
}

pub async fn seed_user(pool: &PgPool, code: &str) {
    UserRepo::create(
        pool,
        &CreateUser {
            code: code.to_string(),
            full_name: format!("Student {code}"),
            email: format!("{}@campus.test", code.to_lowercase()),
        },
    )
    .await
    .unwrap();
}

/// Create an idea owned by `owner` in `affiliation`, in the given status.
pub async fn seed_idea(
    pool: &PgPool,
    status_name: &str,
    affiliation: &GroupAffiliation,
    owner: &str,
) -> Idea {
    let status_id = status_id(pool, status_name).await;
    IdeaRepo::create(
        pool,
        &CreateIdea {
            title: "Smart campus sensors".to_string(),
            problem_statement: "Campus energy usage is opaque".to_string(),
            justification: "Metering enables savings".to_string(),
            general_objective: "Build a sensor network".to_string(),
            specific_objectives: "Deploy; collect; visualize".to_string(),
            affiliation: affiliation.clone(),
            user_code: owner.to_string(),
            status_id,
        },
    )
    .await
    .unwrap()
}

pub async fn seed_activity(pool: &PgPool, affiliation: &GroupAffiliation, scope: Option<&str>) {
    ActivityRepo::create(
        pool,
        &CreateActivity {
            name: "Term project".to_string(),
            affiliation: affiliation.clone(),
            scope_type: scope.map(str::to_string),
            starts_at: None,
            ends_at: None,
        },
    )
    .await
    .unwrap();
}

/// Create a team in `affiliation` with `leader` (seeded as a user) plus
/// any extra members.
pub async fn seed_team(
    pool: &PgPool,
    affiliation: &GroupAffiliation,
    label: &str,
    leader: &str,
    members: &[&str],
) -> Team {
    let team = TeamRepo::create(
        pool,
        &CreateTeam {
            label: label.to_string(),
            affiliation: affiliation.clone(),
        },
    )
    .await
    .unwrap();

    TeamMemberRepo::create(
        pool,
        &CreateTeamMember {
            team_id: team.id,
            user_code: leader.to_string(),
            is_leader: true,
        },
    )
    .await
    .unwrap();

    for member in members {
        TeamMemberRepo::create(
            pool,
            &CreateTeamMember {
                team_id: team.id,
                user_code: member.to_string(),
                is_leader: false,
            },
        )
        .await
        .unwrap();
    }

    team
}

/// The bank invariant: a LIBRE idea carries neither affiliation nor owner.
pub fn assert_bank_invariant(idea: &Idea) {
    assert!(idea.affiliation().is_none());
    assert!(idea.subject_code.is_none());
    assert!(idea.group_letter.is_none());
    assert!(idea.period.is_none());
    assert!(idea.year.is_none());
    assert!(idea.user_code.is_none());
}
