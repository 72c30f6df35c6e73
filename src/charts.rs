//! Chart views derived from the flat table.
//!
//! Everything the dashboard draws is computed here; the page only renders
//! the series it is handed. Each view is `None` when the table is empty.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{Snapshot, TableRow};
use crate::transform;

// ---------------------------------------------------------------------------
// Chart primitives
// ---------------------------------------------------------------------------

/// One marker of a per-sector scatter plot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub sector: String,
    pub value: Option<f64>,
}

/// Scatter plot with sectors on the x axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterChart {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub points: Vec<ScatterPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinePoint {
    #[serde(with = "crate::models::snapshot::date_key")]
    pub date: NaiveDate,
    pub value: Option<f64>,
}

/// One sector's line in the trend chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineSeries {
    pub sector: String,
    pub points: Vec<LinePoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineChart {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub series: Vec<LineSeries>,
}

// ---------------------------------------------------------------------------
// SectorSnapshotView: latest day, one marker per sector
// ---------------------------------------------------------------------------

/// The two scatter plots of the most recent day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectorSnapshotView {
    #[serde(with = "crate::models::snapshot::date_key")]
    pub date: NaiveDate,
    pub market_cap: ScatterChart,
    pub change_24h: ScatterChart,
}

impl SectorSnapshotView {
    /// Build the view from the rows dated on the latest date in `rows`.
    pub fn from_rows(rows: &[TableRow]) -> Option<Self> {
        let date = transform::latest_date(rows)?;
        let latest = transform::rows_on(rows, date);

        let market_cap = ScatterChart {
            title: "Market Cap por Sector",
            x_label: "Sector",
            y_label: "Market Cap",
            points: latest
                .iter()
                .map(|row| ScatterPoint {
                    sector: row.sector.clone(),
                    value: row.market_cap,
                })
                .collect(),
        };
        let change_24h = ScatterChart {
            title: "Cambio en las Últimas 24 Horas por Sector",
            x_label: "Sector",
            y_label: "Cambio 24h (%)",
            points: latest
                .into_iter()
                .map(|row| ScatterPoint {
                    sector: row.sector,
                    value: row.change_24h,
                })
                .collect(),
        };

        Some(Self {
            date,
            market_cap,
            change_24h,
        })
    }
}

// ---------------------------------------------------------------------------
// TrendView: 24h change per sector across the whole history
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendView {
    pub chart: LineChart,
}

impl TrendView {
    /// One series per distinct sector, in order of first appearance. Points
    /// keep table order.
    pub fn from_rows(rows: &[TableRow]) -> Option<Self> {
        if rows.is_empty() {
            return None;
        }

        let mut series: Vec<LineSeries> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();
        for row in rows {
            let slot = *index.entry(row.sector.as_str()).or_insert_with(|| {
                series.push(LineSeries {
                    sector: row.sector.clone(),
                    points: Vec::new(),
                });
                series.len() - 1
            });
            series[slot].points.push(LinePoint {
                date: row.date,
                value: row.change_24h,
            });
        }

        Some(Self {
            chart: LineChart {
                title: "Tendencias de la Variación en 24 Horas por Sector",
                x_label: "Fecha",
                y_label: "Cambio 24h (%)",
                series,
            },
        })
    }
}

// ---------------------------------------------------------------------------
// DashboardView: everything the page shows
// ---------------------------------------------------------------------------

/// The flat table plus both chart views, re-derived on every request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub table: Vec<TableRow>,
    pub sector_snapshot: Option<SectorSnapshotView>,
    pub trend: Option<TrendView>,
}

impl DashboardView {
    pub fn from_history(history: &[Snapshot]) -> Self {
        let table = transform::flatten(history);
        Self {
            sector_snapshot: SectorSnapshotView::from_rows(&table),
            trend: TrendView::from_rows(&table),
            table,
        }
    }

    /// No rows recorded yet.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
