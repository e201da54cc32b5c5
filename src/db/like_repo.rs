use sqlx::PgPool;

/// Check whether an IP has already liked a post
pub async fn has_liked(pool: &PgPool, post_id: i64, user_ip: &str) -> Result<bool, sqlx::Error> {
    let row: (bool,) = sqlx::query_as(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM board.likes WHERE post_id = $1 AND user_ip = $2
        )
        "#,
    )
    .bind(post_id)
    .bind(user_ip)
    .fetch_one(pool)
    .await?;

    Ok(row.0)
}

/// Toggle the like of `(post_id, user_ip)` and adjust the post counter.
///
/// Both steps run in one transaction so the like row and `like_count`
/// cannot drift apart. Returns `true` when the post is liked after the
/// call, `false` when the like was removed.
pub async fn toggle_like(
    pool: &PgPool,
    post_id: i64,
    user_ip: &str,
) -> Result<bool, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let removed = sqlx::query(
        r#"
        DELETE FROM board.likes
        WHERE post_id = $1 AND user_ip = $2
        "#,
    )
    .bind(post_id)
    .bind(user_ip)
    .execute(tx.as_mut())
    .await?
    .rows_affected();

    let liked = if removed > 0 {
        sqlx::query(
            r#"
            UPDATE board.posts
            SET like_count = GREATEST(like_count - 1, 0)
            WHERE id = $1
            "#,
        )
        .bind(post_id)
        .execute(tx.as_mut())
        .await?;

        false
    } else {
        // ON CONFLICT covers the race where two requests from the same IP
        // both miss the delete; only an actual insert bumps the counter.
        let inserted = sqlx::query(
            r#"
            INSERT INTO board.likes (post_id, user_ip)
            VALUES ($1, $2)
            ON CONFLICT (post_id, user_ip) DO NOTHING
            "#,
        )
        .bind(post_id)
        .bind(user_ip)
        .execute(tx.as_mut())
        .await?
        .rows_affected();

        if inserted > 0 {
            sqlx::query(
                r#"
                UPDATE board.posts
                SET like_count = like_count + 1
                WHERE id = $1
                "#,
            )
            .bind(post_id)
            .execute(tx.as_mut())
            .await?;
        }

        true
    };

    tx.commit().await?;

    Ok(liked)
}
