/// Data models for board-service
///
/// This module defines structures for:
/// - Post: Bulletin-board posts and their list-view projection
/// - Comment: Flat comments attached to a post
/// - ShipmentResult: Rows from the external FMS shipment view
/// - Aggregate rows: Typed GROUP BY results feeding charts and the map
///
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ========================================
// Board Models
// ========================================

/// Post database entity
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub view_count: i32,
    pub like_count: i32,
}

impl Post {
    pub fn created_label(&self) -> String {
        self.created_at.format("%Y-%m-%d %H:%M").to_string()
    }
}

/// Post projection for the index listing (no body text)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PostSummary {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub view_count: i32,
    pub like_count: i32,
}

impl PostSummary {
    pub fn created_label(&self) -> String {
        self.created_at.format("%Y-%m-%d %H:%M").to_string()
    }
}

/// Comment database entity
///
/// Comments are insert-only; the application never edits or deletes them.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub author: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn created_label(&self) -> String {
        self.created_at.format("%Y-%m-%d %H:%M").to_string()
    }
}

// ========================================
// Shipment Models
// ========================================

/// Row from the read-only `fms.total_result` view
///
/// The view carries Korean column names; queries alias them to the ASCII
/// field names here so decoding stays typed.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ShipmentResult {
    pub arrival_date: Option<NaiveDate>,
    pub breed: String,
    pub customer: String,
    pub destination: String,
    pub status: String,
}

impl ShipmentResult {
    /// Arrival date as `YYYY-MM-DD`, or empty when the view has no date.
    pub fn arrival_label(&self) -> String {
        self.arrival_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }
}

/// Shipment count per breed
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct BreedCount {
    pub breed: String,
    pub count: i64,
}

/// Shipment count per (breed, inspection status) pair
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct BreedStatusCount {
    pub breed: String,
    pub status: String,
    pub count: i64,
}

/// Shipment count per arrival date
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct DailyCount {
    pub arrival_date: Option<NaiveDate>,
    pub count: i64,
}

/// Shipment count per (customer, destination) route
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct RouteCount {
    pub customer: String,
    pub destination: String,
    pub count: i64,
}
