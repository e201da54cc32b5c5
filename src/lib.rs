/// Board Service Library
///
/// Server-rendered bulletin board (posts, comments, likes) plus analytics
/// pages over the FMS shipment view: result table, Chart.js dashboard and
/// a Leaflet delivery map.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers rendering HTML pages
/// - `models`: Data structures for posts, comments and shipment rows
/// - `services`: Chart building and delivery map rendering
/// - `db`: Database access layer and repositories
/// - `error`: Error types and handling
/// - `config`: Configuration management
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
