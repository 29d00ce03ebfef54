use sqlx::PgPool;

/// Connect, migrate, and verify the seeded lookup data.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    kobonat_db::health_check(&pool).await.unwrap();

    let roles: Vec<(i64, String)> = sqlx::query_as("SELECT id, name FROM roles ORDER BY id")
        .fetch_all(&pool)
        .await
        .unwrap();
    assert_eq!(
        roles,
        vec![
            (1, "admin".to_string()),
            (2, "staff".to_string()),
            (3, "member".to_string()),
        ]
    );
}

/// A fresh database has no settings row until someone asks for it.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_settings_row_is_lazy(pool: PgPool) {
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM app_settings")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count.0, 0);
}
