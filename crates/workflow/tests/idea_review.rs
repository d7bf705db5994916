//! Integration tests for the idea review operation.

mod common;

use assert_matches::assert_matches;
use sqlx::PgPool;

use common::{affiliation, engine, seed_group, seed_idea, seed_user, status_id};
use semillero_core::error::CoreError;
use semillero_core::status::{STATUS_APROBADO, STATUS_RECHAZADO, STATUS_REVISION, STATUS_STAND_BY};
use semillero_db::repositories::IdeaHistoryRepo;
use semillero_workflow::WorkflowError;

#[sqlx::test(migrations = "../../db/migrations")]
async fn approve_moves_idea_to_aprobado(pool: PgPool) {
    seed_group(&pool, &affiliation()).await;
    seed_user(&pool, "U1").await;
    let idea = seed_idea(&pool, STATUS_REVISION, &affiliation(), "U1").await;
    let engine = engine(&pool).await;

    let outcome = engine
        .review_idea(idea.id, "Aprobar", "looks solid", "P100")
        .await
        .unwrap();

    assert_eq!(
        outcome.idea.status_id,
        status_id(&pool, STATUS_APROBADO).await
    );
    assert!(outcome.message.contains("approved"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn approve_with_observations_moves_idea_to_stand_by(pool: PgPool) {
    seed_group(&pool, &affiliation()).await;
    seed_user(&pool, "U1").await;
    let idea = seed_idea(&pool, STATUS_REVISION, &affiliation(), "U1").await;
    let engine = engine(&pool).await;

    let outcome = engine
        .review_idea(idea.id, "Aprobar_Con_Observacion", "tighten scope", "P100")
        .await
        .unwrap();

    assert_eq!(
        outcome.idea.status_id,
        status_id(&pool, STATUS_STAND_BY).await
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reject_moves_idea_to_rechazado(pool: PgPool) {
    seed_group(&pool, &affiliation()).await;
    seed_user(&pool, "U1").await;
    let idea = seed_idea(&pool, STATUS_REVISION, &affiliation(), "U1").await;
    let engine = engine(&pool).await;

    let outcome = engine
        .review_idea(idea.id, "Rechazar", "out of scope for the course", "P100")
        .await
        .unwrap();

    assert_eq!(
        outcome.idea.status_id,
        status_id(&pool, STATUS_RECHAZADO).await
    );
    // Rejection never clears the group or owner at the idea stage.
    assert!(outcome.idea.affiliation().is_some());
    assert_eq!(outcome.idea.user_code.as_deref(), Some("U1"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn each_review_appends_exactly_one_history_record(pool: PgPool) {
    seed_group(&pool, &affiliation()).await;
    seed_user(&pool, "U1").await;
    let idea = seed_idea(&pool, STATUS_REVISION, &affiliation(), "U1").await;
    let engine = engine(&pool).await;

    engine
        .review_idea(idea.id, "Aprobar_Con_Observacion", "add a timeline", "P100")
        .await
        .unwrap();
    engine
        .review_idea(idea.id, "Aprobar", "", "P100")
        .await
        .unwrap();

    let history = IdeaHistoryRepo::list_by_idea(&pool, idea.id).await.unwrap();
    assert_eq!(history.len(), 2);
    // Newest first: the approval, then the request for corrections.
    assert_eq!(history[0].status_id, status_id(&pool, STATUS_APROBADO).await);
    assert_eq!(history[0].user_code, "P100");
    assert_eq!(history[1].status_id, status_id(&pool, STATUS_STAND_BY).await);
    assert!(history[1].observation.contains("add a timeline"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_action_is_a_validation_error(pool: PgPool) {
    seed_group(&pool, &affiliation()).await;
    seed_user(&pool, "U1").await;
    let idea = seed_idea(&pool, STATUS_REVISION, &affiliation(), "U1").await;
    let engine = engine(&pool).await;

    let err = engine
        .review_idea(idea.id, "Approve", "", "P100")
        .await
        .unwrap_err();
    assert_matches!(err, WorkflowError::Core(CoreError::Validation(_)));

    // The invalid call left no history behind.
    let history = IdeaHistoryRepo::list_by_idea(&pool, idea.id).await.unwrap();
    assert!(history.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn reviewing_a_missing_idea_is_not_found(pool: PgPool) {
    let engine = engine(&pool).await;
    let err = engine
        .review_idea(9999, "Aprobar", "", "P100")
        .await
        .unwrap_err();
    assert_matches!(err, WorkflowError::Core(CoreError::NotFound { .. }));
}
