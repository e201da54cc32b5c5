use crate::models::{Post, PostSummary};
use sqlx::PgPool;

/// List every post for the index page, newest first
pub async fn list_posts(pool: &PgPool) -> Result<Vec<PostSummary>, sqlx::Error> {
    let posts = sqlx::query_as::<_, PostSummary>(
        r#"
        SELECT id, title, author, created_at, view_count, like_count
        FROM board.posts
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// Create a new post
/// Returns the id of the created row
pub async fn create_post(
    pool: &PgPool,
    title: &str,
    author: &str,
    content: &str,
) -> Result<i64, sqlx::Error> {
    let (id,) = sqlx::query_as::<_, (i64,)>(
        r#"
        INSERT INTO board.posts (title, author, content)
        VALUES ($1, $2, $3)
        RETURNING id
        "#,
    )
    .bind(title)
    .bind(author)
    .bind(content)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Find a post by ID
pub async fn find_post_by_id(pool: &PgPool, post_id: i64) -> Result<Option<Post>, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        SELECT id, title, author, content, created_at, updated_at, view_count, like_count
        FROM board.posts
        WHERE id = $1
        "#,
    )
    .bind(post_id)
    .fetch_optional(pool)
    .await?;

    Ok(post)
}

/// Increment view count
/// Silently a no-op when the id does not exist; every visit counts, there
/// is no per-viewer dedup.
pub async fn increment_view_count(pool: &PgPool, post_id: i64) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE board.posts
        SET view_count = view_count + 1
        WHERE id = $1
        "#,
    )
    .bind(post_id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Update post title and content, bumping `updated_at`
pub async fn update_post(
    pool: &PgPool,
    post_id: i64,
    title: &str,
    content: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE board.posts
        SET title = $1, content = $2, updated_at = NOW()
        WHERE id = $3
        "#,
    )
    .bind(title)
    .bind(content)
    .bind(post_id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Delete a post by id
pub async fn delete_post(pool: &PgPool, post_id: i64) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        DELETE FROM board.posts
        WHERE id = $1
        "#,
    )
    .bind(post_id)
    .execute(pool)
    .await?;

    Ok(())
}
