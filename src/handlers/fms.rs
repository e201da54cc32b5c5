/// FMS handlers - shipment analytics endpoints
///
/// All three pages read the external `fms.total_result` view; nothing
/// here writes to the database.
use crate::config::Config;
use crate::db::shipment_repo;
use crate::error::Result;
use crate::handlers::{html_response, notice_texts};
use crate::models::ShipmentResult;
use crate::services::{charts, map};
use actix_web::{web, HttpResponse};
use actix_web_flash_messages::IncomingFlashMessages;
use askama::Template;
use sqlx::PgPool;

#[derive(Template)]
#[template(path = "fms_result.html")]
struct FmsResultTemplate {
    results: Vec<ShipmentResult>,
    notices: Vec<String>,
}

#[derive(Template)]
#[template(path = "fms_analytics.html")]
struct FmsAnalyticsTemplate {
    breed_pie_json: String,
    status_bars_json: String,
    daily_line_json: String,
    map_html: String,
    notices: Vec<String>,
}

#[derive(Template)]
#[template(path = "fms_map.html")]
struct FmsMapTemplate {
    map_html: String,
    notices: Vec<String>,
}

/// Shipment result table, newest arrival first
pub async fn fms_result(
    pool: web::Data<PgPool>,
    messages: IncomingFlashMessages,
) -> Result<HttpResponse> {
    let results = shipment_repo::list_results(pool.get_ref()).await?;

    let body = FmsResultTemplate {
        results,
        notices: notice_texts(&messages),
    }
    .render()?;
    Ok(html_response(body))
}

/// Analytics dashboard: breed pie, pass/fail stacked bars, daily line
/// and the delivery map on one page
pub async fn fms_analytics(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    messages: IncomingFlashMessages,
) -> Result<HttpResponse> {
    let breed_rows = shipment_repo::count_by_breed(pool.get_ref()).await?;
    let status_rows = shipment_repo::count_by_breed_status(pool.get_ref()).await?;
    let daily_rows = shipment_repo::count_by_day(pool.get_ref()).await?;
    let route_rows = shipment_repo::count_by_route(pool.get_ref()).await?;

    let body = FmsAnalyticsTemplate {
        breed_pie_json: charts::to_embed_json(&charts::breed_pie(&breed_rows))?,
        status_bars_json: charts::to_embed_json(&charts::breed_status_bars(&status_rows))?,
        daily_line_json: charts::to_embed_json(&charts::daily_line(&daily_rows))?,
        map_html: map::render_embed(&route_rows, config.map.tile_url.as_deref())?,
        notices: notice_texts(&messages),
    }
    .render()?;
    Ok(html_response(body))
}

/// Delivery map on a standalone page
pub async fn fms_map(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    messages: IncomingFlashMessages,
) -> Result<HttpResponse> {
    let route_rows = shipment_repo::count_by_route(pool.get_ref()).await?;
    let map_html = map::render_embed(&route_rows, config.map.tile_url.as_deref())?;

    let body = FmsMapTemplate {
        map_html,
        notices: notice_texts(&messages),
    }
    .render()?;
    Ok(html_response(body))
}
