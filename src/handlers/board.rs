/// Board handlers - HTTP endpoints for the bulletin board pages
use crate::db::{comment_repo, like_repo, post_repo};
use crate::error::Result;
use crate::handlers::{html_response, notice_texts};
use crate::models::{Comment, Post, PostSummary};
use actix_web::http::header;
use actix_web::{web, HttpRequest, HttpResponse};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use askama::Template;
use serde::Deserialize;
use sqlx::PgPool;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PostForm {
    pub title: String,
    pub author: String,
    pub content: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct EditForm {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CommentForm {
    pub author: String,
    pub content: String,
}

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    posts: Vec<PostSummary>,
    notices: Vec<String>,
}

#[derive(Template)]
#[template(path = "create.html")]
struct CreateTemplate {
    notices: Vec<String>,
}

#[derive(Template)]
#[template(path = "view.html")]
struct ViewTemplate {
    post: Post,
    comments: Vec<Comment>,
    liked: bool,
    notices: Vec<String>,
}

#[derive(Template)]
#[template(path = "edit.html")]
struct EditTemplate {
    post: Post,
    notices: Vec<String>,
}

fn redirect_to(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location.to_string()))
        .finish()
}

/// Requesting client's IP, as the like identity.
/// Behind the reverse proxy this reads the forwarded address.
fn client_ip(req: &HttpRequest) -> String {
    req.connection_info()
        .realip_remote_addr()
        .unwrap_or("unknown")
        .to_string()
}

/// List all posts, newest first
pub async fn index(
    pool: web::Data<PgPool>,
    messages: IncomingFlashMessages,
) -> Result<HttpResponse> {
    let posts = post_repo::list_posts(pool.get_ref()).await?;

    let body = IndexTemplate {
        posts,
        notices: notice_texts(&messages),
    }
    .render()?;
    Ok(html_response(body))
}

/// Show the empty post creation form
pub async fn create_form(messages: IncomingFlashMessages) -> Result<HttpResponse> {
    let body = CreateTemplate {
        notices: notice_texts(&messages),
    }
    .render()?;
    Ok(html_response(body))
}

/// Create a new post from the submitted form
pub async fn create_post(
    pool: web::Data<PgPool>,
    form: web::Form<PostForm>,
) -> Result<HttpResponse> {
    let title = form.title.trim();
    let author = form.author.trim();
    let content = form.content.trim();

    if title.is_empty() || author.is_empty() || content.is_empty() {
        FlashMessage::error("모든 필드를 똑바로 채워주세요!!!!").send();
        return Ok(redirect_to("/create/"));
    }

    let post_id = post_repo::create_post(pool.get_ref(), title, author, content).await?;

    FlashMessage::info("게시글이 성공적으로 등록되었음").send();
    Ok(redirect_to(&format!("/post/{}", post_id)))
}

/// Show a post with its comments
///
/// Every visit counts: the view counter is bumped before the post is
/// fetched, with no per-viewer dedup.
pub async fn view_post(
    pool: web::Data<PgPool>,
    post_id: web::Path<i64>,
    req: HttpRequest,
    messages: IncomingFlashMessages,
) -> Result<HttpResponse> {
    let post_id = post_id.into_inner();

    post_repo::increment_view_count(pool.get_ref(), post_id).await?;

    let post = match post_repo::find_post_by_id(pool.get_ref(), post_id).await? {
        Some(post) => post,
        None => {
            FlashMessage::error("게시글을 찾을 수 없습니다.").send();
            return Ok(redirect_to("/"));
        }
    };

    let comments = comment_repo::find_comments_by_post(pool.get_ref(), post_id).await?;
    let liked = like_repo::has_liked(pool.get_ref(), post_id, &client_ip(&req)).await?;

    let body = ViewTemplate {
        post,
        comments,
        liked,
        notices: notice_texts(&messages),
    }
    .render()?;
    Ok(html_response(body))
}

/// Show the edit form for a post
pub async fn edit_form(
    pool: web::Data<PgPool>,
    post_id: web::Path<i64>,
    messages: IncomingFlashMessages,
) -> Result<HttpResponse> {
    let post = match post_repo::find_post_by_id(pool.get_ref(), *post_id).await? {
        Some(post) => post,
        None => {
            FlashMessage::error("게시글을 찾을 수 없습니다.").send();
            return Ok(redirect_to("/"));
        }
    };

    let body = EditTemplate {
        post,
        notices: notice_texts(&messages),
    }
    .render()?;
    Ok(html_response(body))
}

/// Apply an edit to a post's title and content
pub async fn edit_post(
    pool: web::Data<PgPool>,
    post_id: web::Path<i64>,
    form: web::Form<EditForm>,
) -> Result<HttpResponse> {
    let post_id = post_id.into_inner();
    let title = form.title.trim();
    let content = form.content.trim();

    if title.is_empty() || content.is_empty() {
        FlashMessage::error("제목과 내용을 모두 입력해주세요.").send();
        return Ok(redirect_to(&format!("/edit/{}", post_id)));
    }

    post_repo::update_post(pool.get_ref(), post_id, title, content).await?;

    FlashMessage::info("게시글이 성공적으로 수정되었습니다.").send();
    Ok(redirect_to(&format!("/post/{}", post_id)))
}

/// Delete a post
pub async fn delete_post(
    pool: web::Data<PgPool>,
    post_id: web::Path<i64>,
) -> Result<HttpResponse> {
    post_repo::delete_post(pool.get_ref(), *post_id).await?;

    FlashMessage::info("게시글이 성공적으로 삭제되었습니다.").send();
    Ok(redirect_to("/"))
}

/// Attach a comment to a post
pub async fn add_comment(
    pool: web::Data<PgPool>,
    post_id: web::Path<i64>,
    form: web::Form<CommentForm>,
) -> Result<HttpResponse> {
    let post_id = post_id.into_inner();
    let author = form.author.trim();
    let content = form.content.trim();

    if author.is_empty() || content.is_empty() {
        FlashMessage::error("작성자와 내용을 모두 입력해주세요.").send();
        return Ok(redirect_to(&format!("/post/{}", post_id)));
    }

    comment_repo::create_comment(pool.get_ref(), post_id, author, content).await?;

    FlashMessage::info("댓글이 등록되었습니다.").send();
    Ok(redirect_to(&format!("/post/{}", post_id)))
}

/// Toggle the requesting IP's like on a post
pub async fn like_post(
    pool: web::Data<PgPool>,
    post_id: web::Path<i64>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let post_id = post_id.into_inner();
    let liked = like_repo::toggle_like(pool.get_ref(), post_id, &client_ip(&req)).await?;

    if liked {
        FlashMessage::info("좋아요가 등록되었습니다.").send();
    } else {
        FlashMessage::info("좋아요가 취소되었습니다.").send();
    }
    Ok(redirect_to(&format!("/post/{}", post_id)))
}
