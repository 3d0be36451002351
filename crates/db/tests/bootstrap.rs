use sqlx::PgPool;

/// Full bootstrap test: connect, migrate, verify schema.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    feedback_db::health_check(&pool).await.unwrap();

    let tables = ["workspaces", "boards", "posts", "post_merges", "tags", "post_tags"];
    for table in tables {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}

/// Unknown board system types are rejected by the check constraint.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_board_system_type_is_constrained(pool: PgPool) {
    let ws: (i64,) =
        sqlx::query_as("INSERT INTO workspaces (slug, name) VALUES ('acme', 'Acme') RETURNING id")
            .fetch_one(&pool)
            .await
            .unwrap();

    let result = sqlx::query(
        "INSERT INTO boards (workspace_id, slug, name, system_type) VALUES ($1, 'x', 'X', 'bogus')",
    )
    .bind(ws.0)
    .execute(&pool)
    .await;
    assert!(result.is_err());
}

/// Workspace slugs are unique and resolve back to the same row.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_workspace_slug_lookup(pool: PgPool) {
    use feedback_db::models::workspace::CreateWorkspace;
    use feedback_db::repositories::WorkspaceRepo;

    let input = CreateWorkspace {
        slug: "acme".to_string(),
        name: "Acme".to_string(),
    };
    let created = WorkspaceRepo::create(&pool, &input).await.unwrap();

    let found = WorkspaceRepo::find_by_slug(&pool, "acme").await.unwrap().unwrap();
    assert_eq!(found.id, created.id);
    assert_eq!(
        WorkspaceRepo::find_id_by_slug(&pool, "acme").await.unwrap(),
        Some(created.id)
    );
    assert_eq!(WorkspaceRepo::find_by_slug(&pool, "ghost").await.unwrap().map(|w| w.id), None);

    let duplicate = WorkspaceRepo::create(&pool, &input).await;
    assert!(duplicate.is_err());
}
