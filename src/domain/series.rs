use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// One OHLC bar of the primary price series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceBar {
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// One point of a value-only series (indicators, curves).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint {
    pub time: i64,
    pub value: f64,
}

/// The two pattern scans the backend supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, Serialize, Deserialize)]
pub enum PatternKind {
    #[strum(to_string = "Bowl Pattern")]
    Bowl,
    #[strum(to_string = "NRB Pattern")]
    NarrowRangeBreak,
}

impl PatternKind {
    /// The value the scan endpoint expects in its `pattern` query parameter.
    pub fn api_name(&self) -> &'static str {
        match self {
            PatternKind::Bowl => "Bowl",
            PatternKind::NarrowRangeBreak => "Narrow Range Break",
        }
    }

    pub fn is_nrb(&self) -> bool {
        matches!(self, PatternKind::NarrowRangeBreak)
    }
}

/// Secondary-series selector for the scan request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter, Serialize, Deserialize)]
pub enum SeriesSelector {
    #[default]
    #[strum(to_string = "Closing Price")]
    ClosingPrice,
    #[strum(to_string = "EMA 21")]
    Ema21,
    #[strum(to_string = "EMA 50")]
    Ema50,
    #[strum(to_string = "EMA 200")]
    Ema200,
    /// Multi-line ratio indicator: main ratio plus two smoothing series.
    #[strum(to_string = "RSC SENSEX (Ratio + EMAs)")]
    RscRatio,
}

impl SeriesSelector {
    /// The `series` query parameter value, or `None` for the plain price chart.
    pub fn query_value(&self) -> Option<&'static str> {
        match self {
            SeriesSelector::ClosingPrice => None,
            SeriesSelector::Ema21 => Some("ema21"),
            SeriesSelector::Ema50 => Some("ema50"),
            SeriesSelector::Ema200 => Some("ema200"),
            SeriesSelector::RscRatio => Some("rsc30"),
        }
    }
}

/// Normalized secondary series bundle from a scan response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SecondarySeries {
    pub name: Option<String>,
    pub points: Vec<SeriesPoint>,
    // Companion smoothing series, populated only for the ratio indicator
    pub fast_smoothing: Vec<SeriesPoint>,
    pub slow_smoothing: Vec<SeriesPoint>,
}

impl SecondarySeries {
    pub fn is_present(&self) -> bool {
        self.name.is_some() && !self.points.is_empty()
    }
}
