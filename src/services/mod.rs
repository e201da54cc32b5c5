/// Business logic layer for board-service
///
/// This module provides:
/// - Chart building: Reshape shipment aggregates into Chart.js payloads
/// - Map building: Join route counts with city coordinates and render the
///   embeddable Leaflet fragment
///
/// Board CRUD has no service layer; handlers call the repositories
/// directly, the operations are single statements.
pub mod charts;
pub mod map;
