use crate::models::{BreedCount, BreedStatusCount, DailyCount, RouteCount, ShipmentResult};
use sqlx::PgPool;

/// Fetch every row of the shipment view, newest arrival first.
///
/// `fms.total_result` is an external view with Korean column names; the
/// aliases keep the Rust side ASCII. The view is read-only for this
/// service, its schema is owned by the FMS pipeline.
pub async fn list_results(pool: &PgPool) -> Result<Vec<ShipmentResult>, sqlx::Error> {
    let results = sqlx::query_as::<_, ShipmentResult>(
        r#"
        SELECT "도착일" AS arrival_date,
               COALESCE("품종", '') AS breed,
               COALESCE("고객사", '') AS customer,
               COALESCE("도착지", '') AS destination,
               COALESCE("부적합여부", '') AS status
        FROM fms.total_result
        ORDER BY "도착일" DESC NULLS LAST
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(results)
}

/// Shipment count per breed, most shipped first
pub async fn count_by_breed(pool: &PgPool) -> Result<Vec<BreedCount>, sqlx::Error> {
    let counts = sqlx::query_as::<_, BreedCount>(
        r#"
        SELECT "품종" AS breed, COUNT(*) AS count
        FROM fms.total_result
        WHERE "품종" IS NOT NULL
        GROUP BY "품종"
        ORDER BY count DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(counts)
}

/// Shipment count per (breed, inspection status) pair
pub async fn count_by_breed_status(
    pool: &PgPool,
) -> Result<Vec<BreedStatusCount>, sqlx::Error> {
    let counts = sqlx::query_as::<_, BreedStatusCount>(
        r#"
        SELECT "품종" AS breed, "부적합여부" AS status, COUNT(*) AS count
        FROM fms.total_result
        WHERE "품종" IS NOT NULL AND "부적합여부" IS NOT NULL
        GROUP BY "품종", "부적합여부"
        ORDER BY "품종", "부적합여부"
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(counts)
}

/// Shipment count per arrival date, in date order.
/// Rows with no arrival date group under NULL and sort last.
pub async fn count_by_day(pool: &PgPool) -> Result<Vec<DailyCount>, sqlx::Error> {
    let counts = sqlx::query_as::<_, DailyCount>(
        r#"
        SELECT "도착일" AS arrival_date, COUNT(*) AS count
        FROM fms.total_result
        GROUP BY "도착일"
        ORDER BY "도착일"
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(counts)
}

/// Shipment count per (customer, destination) route, busiest first
pub async fn count_by_route(pool: &PgPool) -> Result<Vec<RouteCount>, sqlx::Error> {
    let counts = sqlx::query_as::<_, RouteCount>(
        r#"
        SELECT "고객사" AS customer, "도착지" AS destination, COUNT(*) AS count
        FROM fms.total_result
        WHERE "고객사" IS NOT NULL AND "도착지" IS NOT NULL
        GROUP BY "고객사", "도착지"
        ORDER BY count DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(counts)
}
