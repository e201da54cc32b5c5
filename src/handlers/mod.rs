/// HTTP handlers for board-service pages
///
/// This module contains handlers for:
/// - Board: server-rendered post CRUD, comments and like toggling
/// - FMS: shipment result table, analytics dashboard, delivery map
///
/// Every page is rendered server-side; mutating routes answer with a
/// 302 redirect carrying a one-shot flash notice.
pub mod board;
pub mod fms;

use actix_web::HttpResponse;
use actix_web_flash_messages::IncomingFlashMessages;

// Re-export handler functions at module level
pub use board::{
    add_comment, create_form, create_post, delete_post, edit_form, edit_post, index, like_post,
    view_post,
};
pub use fms::{fms_analytics, fms_map, fms_result};

/// Build a rendered HTML page response
pub(crate) fn html_response(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

/// Collect pending flash notices for template rendering
pub(crate) fn notice_texts(messages: &IncomingFlashMessages) -> Vec<String> {
    messages.iter().map(|m| m.content().to_string()).collect()
}
