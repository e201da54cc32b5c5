use crate::models::Comment;
use sqlx::PgPool;

/// List all comments on a post, oldest first
pub async fn find_comments_by_post(
    pool: &PgPool,
    post_id: i64,
) -> Result<Vec<Comment>, sqlx::Error> {
    let comments = sqlx::query_as::<_, Comment>(
        r#"
        SELECT id, post_id, author, content, created_at
        FROM board.comments
        WHERE post_id = $1
        ORDER BY created_at ASC
        "#,
    )
    .bind(post_id)
    .fetch_all(pool)
    .await?;

    Ok(comments)
}

/// Attach a comment to a post
pub async fn create_comment(
    pool: &PgPool,
    post_id: i64,
    author: &str,
    content: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO board.comments (post_id, author, content)
        VALUES ($1, $2, $3)
        "#,
    )
    .bind(post_id)
    .bind(author)
    .bind(content)
    .execute(pool)
    .await?;

    Ok(())
}
