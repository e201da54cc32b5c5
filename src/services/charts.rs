use crate::models::{BreedCount, BreedStatusCount, DailyCount};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Fixed pastel palette shared by every chart; datasets and pie slices
/// cycle through it by index.
pub const PASTEL_COLORS: [&str; 8] = [
    "#FFB5E8", "#B5DEFF", "#C7CEEA", "#E2F0CB", "#FFDAC1", "#FF9AA2", "#B5EAD7", "#E7FFAC",
];

pub fn palette_color(index: usize) -> &'static str {
    PASTEL_COLORS[index % PASTEL_COLORS.len()]
}

/// Serialize a value for embedding inside an inline `<script>` block.
/// `<` is escaped so a stray `</script>` in user data cannot terminate
/// the surrounding tag; the escaped form is still valid JSON.
pub fn to_embed_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    Ok(serde_json::to_string(value)?.replace('<', "\\u003c"))
}

/// Pie chart payload in Chart.js `data` shape
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PieChart {
    pub labels: Vec<String>,
    pub datasets: Vec<PieDataset>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PieDataset {
    pub data: Vec<i64>,
    pub background_color: Vec<String>,
    pub border_width: u32,
}

/// Stacked bar chart payload, one dataset per inspection status
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackedBarChart {
    pub labels: Vec<String>,
    pub datasets: Vec<BarDataset>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarDataset {
    pub label: String,
    pub data: Vec<i64>,
    pub background_color: String,
    pub border_width: u32,
}

/// Line chart payload for the daily shipment series
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineChart {
    pub labels: Vec<String>,
    pub datasets: Vec<LineDataset>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineDataset {
    pub label: String,
    pub data: Vec<i64>,
    pub border_color: String,
    pub background_color: String,
    pub border_width: u32,
    pub fill: bool,
}

/// Pie of shipments per breed. Slice order follows the input rows
/// (the query sorts by count descending), colors cycle the palette.
pub fn breed_pie(rows: &[BreedCount]) -> PieChart {
    let labels = rows.iter().map(|r| r.breed.clone()).collect();
    let data = rows.iter().map(|r| r.count).collect();
    let background_color = (0..rows.len())
        .map(|i| palette_color(i).to_string())
        .collect();

    PieChart {
        labels,
        datasets: vec![PieDataset {
            data,
            background_color,
            border_width: 1,
        }],
    }
}

/// Stacked bars of shipments per breed, split by inspection status.
///
/// The breed axis is the sorted set of distinct breeds, one dataset per
/// sorted distinct status. A (breed, status) pair absent from the input
/// stays 0 in that dataset.
pub fn breed_status_bars(rows: &[BreedStatusCount]) -> StackedBarChart {
    let breeds: Vec<String> = rows
        .iter()
        .map(|r| r.breed.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let statuses: Vec<String> = rows
        .iter()
        .map(|r| r.status.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let breed_index: HashMap<&str, usize> = breeds
        .iter()
        .enumerate()
        .map(|(i, b)| (b.as_str(), i))
        .collect();
    let status_index: HashMap<&str, usize> = statuses
        .iter()
        .enumerate()
        .map(|(i, s)| (s.as_str(), i))
        .collect();

    let mut datasets: Vec<BarDataset> = statuses
        .iter()
        .enumerate()
        .map(|(i, status)| BarDataset {
            label: status.clone(),
            data: vec![0; breeds.len()],
            background_color: palette_color(i).to_string(),
            border_width: 1,
        })
        .collect();

    for row in rows {
        let si = status_index[row.status.as_str()];
        let bi = breed_index[row.breed.as_str()];
        datasets[si].data[bi] = row.count;
    }

    StackedBarChart {
        labels: breeds,
        datasets,
    }
}

/// Line of shipments per arrival date. Rows without a date keep their
/// slot with an empty label.
pub fn daily_line(rows: &[DailyCount]) -> LineChart {
    let labels = rows
        .iter()
        .map(|r| {
            r.arrival_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default()
        })
        .collect();
    let data = rows.iter().map(|r| r.count).collect();

    LineChart {
        labels,
        datasets: vec![LineDataset {
            label: "날짜별 출하량".to_string(),
            data,
            border_color: palette_color(0).to_string(),
            background_color: palette_color(0).to_string(),
            border_width: 1,
            fill: false,
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn breed(breed: &str, count: i64) -> BreedCount {
        BreedCount {
            breed: breed.to_string(),
            count,
        }
    }

    fn breed_status(breed: &str, status: &str, count: i64) -> BreedStatusCount {
        BreedStatusCount {
            breed: breed.to_string(),
            status: status.to_string(),
            count,
        }
    }

    #[test]
    fn pie_keeps_row_order_and_cycles_palette() {
        let rows: Vec<BreedCount> = (0..10).map(|i| breed(&format!("b{}", i), 10 - i)).collect();

        let chart = breed_pie(&rows);
        assert_eq!(chart.labels.len(), 10);
        assert_eq!(chart.labels[0], "b0");
        assert_eq!(chart.datasets[0].data[0], 10);
        // Ten slices wrap around the eight palette entries.
        assert_eq!(chart.datasets[0].background_color[8], PASTEL_COLORS[0]);
        assert_eq!(chart.datasets[0].background_color[9], PASTEL_COLORS[1]);
        assert_eq!(chart.datasets[0].border_width, 1);
    }

    #[test]
    fn pie_from_descending_counts() {
        let chart = breed_pie(&[breed("A", 2), breed("B", 1)]);

        assert_eq!(chart.labels, vec!["A", "B"]);
        assert_eq!(chart.datasets[0].data, vec![2, 1]);
    }

    #[test]
    fn stacked_bars_sort_axes_and_zero_fill() {
        let rows = vec![
            breed_status("A", "합격", 1),
            breed_status("A", "불합격", 1),
            breed_status("B", "합격", 1),
        ];

        let chart = breed_status_bars(&rows);
        assert_eq!(chart.labels, vec!["A", "B"]);
        // Sorted status order puts 불합격 before 합격.
        assert_eq!(chart.datasets[0].label, "불합격");
        assert_eq!(chart.datasets[1].label, "합격");
        assert_eq!(chart.datasets[1].data, vec![1, 1]);
        // B was never 불합격, the cell defaults to 0.
        assert_eq!(chart.datasets[0].data, vec![1, 0]);
    }

    #[test]
    fn stacked_bars_color_per_status() {
        let rows: Vec<BreedStatusCount> = (0..9)
            .map(|i| breed_status("A", &format!("s{}", i), 1))
            .collect();

        let chart = breed_status_bars(&rows);
        assert_eq!(chart.datasets.len(), 9);
        assert_eq!(chart.datasets[0].background_color, PASTEL_COLORS[0]);
        assert_eq!(chart.datasets[8].background_color, PASTEL_COLORS[0]);
    }

    #[test]
    fn line_formats_dates_and_keeps_null_slot() {
        let rows = vec![
            DailyCount {
                arrival_date: NaiveDate::from_ymd_opt(2024, 3, 5),
                count: 4,
            },
            DailyCount {
                arrival_date: None,
                count: 2,
            },
        ];

        let chart = daily_line(&rows);
        assert_eq!(chart.labels, vec!["2024-03-05", ""]);
        assert_eq!(chart.datasets[0].data, vec![4, 2]);
        assert_eq!(chart.datasets[0].label, "날짜별 출하량");
    }

    #[test]
    fn embed_json_uses_chartjs_keys() {
        let chart = breed_pie(&[breed("한우", 3)]);

        let json = to_embed_json(&chart).unwrap();
        assert!(json.contains("\"backgroundColor\""));
        assert!(json.contains("\"borderWidth\":1"));
        assert!(json.contains("한우"));
    }

    #[test]
    fn embed_json_escapes_script_terminators() {
        let chart = breed_pie(&[breed("</script><script>alert(1)</script>", 1)]);

        let json = to_embed_json(&chart).unwrap();
        assert!(!json.contains("</script>"));
        assert!(json.contains("\\u003c/script>"));
    }
}
