//! Migration and seed-data smoke tests.

use semillero_db::repositories::StatusRepo;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn migrations_seed_the_status_vocabulary(pool: PgPool) {
    let statuses = StatusRepo::list_all(&pool).await.unwrap();
    let names: Vec<&str> = statuses.iter().map(|s| s.name.as_str()).collect();

    for expected in [
        "LIBRE",
        "REVISION",
        "STAND_BY",
        "APROBADO",
        "RECHAZADO",
        "EN_CURSO",
        "SELECCIONADO",
        "CALIFICADO",
    ] {
        assert!(names.contains(&expected), "missing status {expected}");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn find_by_name_is_exact(pool: PgPool) {
    let status = StatusRepo::find_by_name(&pool, "APROBADO").await.unwrap();
    assert!(status.is_some());

    let missing = StatusRepo::find_by_name(&pool, "aprobado").await.unwrap();
    assert!(missing.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn health_check_succeeds(pool: PgPool) {
    semillero_db::health_check(&pool).await.unwrap();
}
