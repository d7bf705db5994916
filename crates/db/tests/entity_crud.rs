//! Integration tests for the repository layer against a real database:
//! - Composite-affiliation lookups joining on all four fields
//! - Idea transition helpers (release, reassign, clear)
//! - The one-project-per-idea unique constraint
//! - Bulk team/membership deletion
//! - The proposal-bank query

use semillero_core::types::{GroupAffiliation, StatusId};
use semillero_db::models::group::CreateGroup;
use semillero_db::models::idea::CreateIdea;
use semillero_db::models::project::CreateProject;
use semillero_db::models::team::CreateTeam;
use semillero_db::models::team_member::CreateTeamMember;
use semillero_db::models::user::CreateUser;
use semillero_db::repositories::{
    GroupRepo, IdeaRepo, ProjectRepo, StatusRepo, TeamMemberRepo, TeamRepo, UserRepo,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn affiliation() -> GroupAffiliation {
    GroupAffiliation::new("CS101", "A", "1", 2024)
}

async fn status_id(pool: &PgPool, name: &str) -> StatusId {
    StatusRepo::find_by_name(pool, name)
        .await
        .unwrap()
        .unwrap()
        .id
}

async fn seed_group(pool: &PgPool, affiliation: &GroupAffiliation) {
    GroupRepo::create(
        pool,
        &CreateGroup {
            subject_code: affiliation.subject_code.clone(),
            group_letter: affiliation.group_letter.clone(),
            period: affiliation.period.clone(),
            year: affiliation.year,
            subject_name: "Software Projects".to_string(),
            professor_code: None,
        },
    )
    .await
    .unwrap();
}

async fn seed_user(pool: &PgPool, code: &str) {
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

fn new_idea(affiliation: &GroupAffiliation, owner: &str, status_id: StatusId) -> CreateIdea {
    CreateIdea {
        title: "Library occupancy tracker".to_string(),
        problem_statement: "Students cannot find free seats".to_string(),
        justification: "Occupancy data shortens search time".to_string(),
        general_objective: "Track seat usage in real time".to_string(),
        specific_objectives: "Sense; aggregate; display".to_string(),
        affiliation: affiliation.clone(),
        user_code: owner.to_string(),
        status_id,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn group_lookup_matches_all_four_fields(pool: PgPool) {
    seed_group(&pool, &affiliation()).await;

    assert!(GroupRepo::find(&pool, &affiliation()).await.unwrap().is_some());

    // Any single differing field misses.
    let other_year = GroupAffiliation::new("CS101", "A", "1", 2025);
    assert!(GroupRepo::find(&pool, &other_year).await.unwrap().is_none());
    let other_letter = GroupAffiliation::new("CS101", "B", "1", 2024);
    assert!(GroupRepo::find(&pool, &other_letter).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn idea_release_clears_owner_and_affiliation(pool: PgPool) {
    seed_group(&pool, &affiliation()).await;
    seed_user(&pool, "U1").await;
    let revision = status_id(&pool, "REVISION").await;
    let libre = status_id(&pool, "LIBRE").await;

    let idea = IdeaRepo::create(&pool, &new_idea(&affiliation(), "U1", revision))
        .await
        .unwrap();
    assert_eq!(idea.affiliation(), Some(affiliation()));

    let released = IdeaRepo::release(&pool, idea.id, libre)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(released.status_id, libre);
    assert!(released.affiliation().is_none());
    assert!(released.user_code.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn idea_reassign_sets_owner_and_affiliation_together(pool: PgPool) {
    seed_group(&pool, &affiliation()).await;
    seed_user(&pool, "U1").await;
    seed_user(&pool, "U5").await;
    let revision = status_id(&pool, "REVISION").await;
    let libre = status_id(&pool, "LIBRE").await;

    let idea = IdeaRepo::create(&pool, &new_idea(&affiliation(), "U1", revision))
        .await
        .unwrap();
    IdeaRepo::release(&pool, idea.id, libre).await.unwrap();

    let target = GroupAffiliation::new("CS101", "B", "2", 2025);
    let reassigned = IdeaRepo::reassign(&pool, idea.id, revision, "U5", &target)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(reassigned.status_id, revision);
    assert_eq!(reassigned.user_code.as_deref(), Some("U5"));
    assert_eq!(reassigned.affiliation(), Some(target));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn second_project_for_an_idea_violates_unique_constraint(pool: PgPool) {
    seed_group(&pool, &affiliation()).await;
    seed_user(&pool, "U1").await;
    let aprobado = status_id(&pool, "APROBADO").await;
    let en_curso = status_id(&pool, "EN_CURSO").await;

    let idea = IdeaRepo::create(&pool, &new_idea(&affiliation(), "U1", aprobado))
        .await
        .unwrap();

    let create = CreateProject {
        idea_id: idea.id,
        research_line: "IoT".to_string(),
        technologies: None,
        keywords: None,
        scope_type: "Prototype".to_string(),
        status_id: en_curso,
    };
    ProjectRepo::create(&pool, &create).await.unwrap();

    let err = ProjectRepo::create(&pool, &create).await.unwrap_err();
    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.code().as_deref(), Some("23505"));
            assert_eq!(db_err.constraint(), Some("uq_projects_idea_id"));
        }
        other => panic!("expected a unique violation, got {other:?}"),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn bulk_delete_removes_memberships_then_teams(pool: PgPool) {
    seed_group(&pool, &affiliation()).await;
    seed_user(&pool, "U1").await;
    seed_user(&pool, "U2").await;

    let team_a = TeamRepo::create(
        &pool,
        &CreateTeam {
            label: "Team A".to_string(),
            affiliation: affiliation(),
        },
    )
    .await
    .unwrap();
    let team_b = TeamRepo::create(
        &pool,
        &CreateTeam {
            label: "Team B".to_string(),
            affiliation: affiliation(),
        },
    )
    .await
    .unwrap();

    for (team_id, code, lead) in [(team_a.id, "U1", true), (team_b.id, "U2", true)] {
        TeamMemberRepo::create(
            &pool,
            &CreateTeamMember {
                team_id,
                user_code: code.to_string(),
                is_leader: lead,
            },
        )
        .await
        .unwrap();
    }

    let ids = vec![team_a.id, team_b.id];
    let members_removed = TeamMemberRepo::delete_by_team_ids(&pool, &ids).await.unwrap();
    assert_eq!(members_removed, 2);
    let teams_removed = TeamRepo::delete_by_ids(&pool, &ids).await.unwrap();
    assert_eq!(teams_removed, 2);

    assert!(TeamRepo::find_by_affiliation(&pool, &affiliation())
        .await
        .unwrap()
        .is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn free_proposals_require_a_graded_project(pool: PgPool) {
    seed_group(&pool, &affiliation()).await;
    seed_user(&pool, "U1").await;
    let libre = status_id(&pool, "LIBRE").await;
    let revision = status_id(&pool, "REVISION").await;
    let en_curso = status_id(&pool, "EN_CURSO").await;
    let calificado = status_id(&pool, "CALIFICADO").await;

    // Banked idea with a graded project: eligible.
    let banked = IdeaRepo::create(&pool, &new_idea(&affiliation(), "U1", revision))
        .await
        .unwrap();
    ProjectRepo::create(
        &pool,
        &CreateProject {
            idea_id: banked.id,
            research_line: "IoT".to_string(),
            technologies: None,
            keywords: None,
            scope_type: "Prototype".to_string(),
            status_id: calificado,
        },
    )
    .await
    .unwrap();
    IdeaRepo::release(&pool, banked.id, libre).await.unwrap();

    // Banked idea whose project is still running: not eligible.
    let running = IdeaRepo::create(&pool, &new_idea(&affiliation(), "U1", revision))
        .await
        .unwrap();
    ProjectRepo::create(
        &pool,
        &CreateProject {
            idea_id: running.id,
            research_line: "IoT".to_string(),
            technologies: None,
            keywords: None,
            scope_type: "Prototype".to_string(),
            status_id: en_curso,
        },
    )
    .await
    .unwrap();
    IdeaRepo::release(&pool, running.id, libre).await.unwrap();

    // Banked idea with no project at all: not eligible.
    let bare = IdeaRepo::create(&pool, &new_idea(&affiliation(), "U1", revision))
        .await
        .unwrap();
    IdeaRepo::release(&pool, bare.id, libre).await.unwrap();

    let proposals = IdeaRepo::find_free_proposals(&pool, libre, calificado)
        .await
        .unwrap();
    assert_eq!(proposals.len(), 1);
    assert_eq!(proposals[0].id, banked.id);
}
