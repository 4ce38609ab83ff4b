//! Bar chart geometry
//!
//! Pure layout for the monthly spending chart. The UI draws the result as SVG
//! and the host serves it as JSON, so both agree on every coordinate.

use serde::{Deserialize, Serialize};

use crate::catalog::MonthlySpend;

/// Maximum number of y-axis ticks, including zero
pub const MAX_TICKS: u32 = 5;

/// Grid line dash pattern
pub const GRID_DASHARRAY: &str = "3 3";

/// Share of each band left empty on either side of a bar
const BAND_GAP: f64 = 0.1;

/// Series key, label and colour for a chart
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct ChartConfig {
    pub key: &'static str,
    pub label: &'static str,
    pub color: &'static str,
}

impl ChartConfig {
    /// The spending series
    pub const AMOUNT: ChartConfig = ChartConfig {
        key: "amount",
        label: "Amount Spent",
        color: "hsl(var(--chart-1))",
    };

    /// CSS custom property the series colour is bound to
    pub fn css_var(&self) -> String {
        format!("--color-{}", self.key)
    }

    /// Fill for bars in this series
    pub fn fill(&self) -> String {
        format!("var({})", self.css_var())
    }
}

/// Drawing area and margins, in pixels
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ChartFrame {
    pub width: f64,
    pub height: f64,
    pub margin_top: f64,
    pub margin_right: f64,
    pub margin_bottom: f64,
    pub margin_left: f64,
}

impl Default for ChartFrame {
    fn default() -> Self {
        Self::sized(600.0, 300.0)
    }
}

impl ChartFrame {
    /// Frame of the given size with the default margins
    pub fn sized(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            margin_top: 8.0,
            margin_right: 8.0,
            margin_bottom: 48.0,
            margin_left: 48.0,
        }
    }

    fn plot(&self) -> PlotArea {
        PlotArea {
            x: self.margin_left,
            y: self.margin_top,
            width: (self.width - self.margin_left - self.margin_right).max(0.0),
            height: (self.height - self.margin_top - self.margin_bottom).max(0.0),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct PlotArea {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Tick {
    pub value: u32,
    pub y: f64,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GridLine {
    pub y: f64,
    pub x1: f64,
    pub x2: f64,
    pub dasharray: &'static str,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Bar {
    pub month: String,
    pub amount: u32,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Centre of the bar, where the x-axis label goes
    pub label_x: f64,
    pub tooltip: String,
    pub fill: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LegendEntry {
    pub label: &'static str,
    pub color: &'static str,
}

/// Everything needed to draw the chart
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChartLayout {
    pub frame: ChartFrame,
    pub plot: PlotArea,
    pub axis_max: u32,
    pub ticks: Vec<Tick>,
    pub grid: Vec<GridLine>,
    pub bars: Vec<Bar>,
    pub legend: LegendEntry,
}

impl ChartLayout {
    /// Bar for a month label
    pub fn bar(&self, month: &str) -> Option<&Bar> {
        self.bars.iter().find(|b| b.month == month)
    }
}

/// Lays out a single-series bar chart
pub struct BarChart;

impl BarChart {
    /// One bar per entry, in input order, scaled against a rounded axis
    pub fn layout(series: &[MonthlySpend], config: &ChartConfig, frame: ChartFrame) -> ChartLayout {
        let plot = frame.plot();
        let peak = series.iter().map(|s| s.amount).max().unwrap_or(0);
        let (axis_max, step) = nice_axis(peak);

        let scale_y = |value: u32| plot.bottom() - f64::from(value) / f64::from(axis_max) * plot.height;

        let ticks: Vec<Tick> = (0..=axis_max / step)
            .map(|i| {
                let value = i * step;
                Tick {
                    value,
                    y: scale_y(value),
                    label: value.to_string(),
                }
            })
            .collect();

        let grid = ticks
            .iter()
            .map(|t| GridLine {
                y: t.y,
                x1: plot.x,
                x2: plot.right(),
                dasharray: GRID_DASHARRAY,
            })
            .collect();

        let band = if series.is_empty() {
            0.0
        } else {
            plot.width / series.len() as f64
        };
        let fill = config.fill();

        let bars = series
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let height = f64::from(entry.amount) / f64::from(axis_max) * plot.height;
                let band_x = plot.x + band * i as f64;
                Bar {
                    month: entry.month.to_string(),
                    amount: entry.amount,
                    x: band_x + band * BAND_GAP,
                    y: plot.bottom() - height,
                    width: band * (1.0 - 2.0 * BAND_GAP),
                    height,
                    label_x: band_x + band / 2.0,
                    tooltip: format!("{}: {}", config.label, entry.amount),
                    fill: fill.clone(),
                }
            })
            .collect();

        ChartLayout {
            frame,
            plot,
            axis_max,
            ticks,
            grid,
            bars,
            legend: LegendEntry {
                label: config.label,
                color: config.color,
            },
        }
    }
}

/// Round `peak` up to an axis maximum on a 1, 2, 2.5 or 5 × 10^k step
///
/// Returns `(axis_max, step)`. A zero peak gives a unit axis.
pub fn nice_axis(peak: u32) -> (u32, u32) {
    let intervals = u64::from(MAX_TICKS - 1);
    let raw = (u64::from(peak) + intervals - 1) / intervals;
    let raw = raw.max(1);

    let mut magnitude = 1u64;
    while magnitude * 10 <= raw {
        magnitude *= 10;
    }

    let mut candidates = vec![magnitude, magnitude * 2];
    if magnitude >= 10 {
        candidates.push(magnitude * 5 / 2);
    }
    candidates.extend([magnitude * 5, magnitude * 10]);

    let step = candidates
        .into_iter()
        .find(|c| *c >= raw)
        .unwrap_or(magnitude * 10);
    let axis = ((u64::from(peak) + step - 1) / step * step).max(step);

    (
        u32::try_from(axis).unwrap_or(u32::MAX),
        u32::try_from(step).unwrap_or(u32::MAX),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::sample::MONTHLY_SPEND;

    fn layout() -> ChartLayout {
        BarChart::layout(&MONTHLY_SPEND, &ChartConfig::AMOUNT, ChartFrame::default())
    }

    #[test]
    fn test_nice_axis() {
        assert_eq!(nice_axis(800), (800, 200));
        assert_eq!(nice_axis(700), (800, 200));
        assert_eq!(nice_axis(450), (600, 200));
        assert_eq!(nice_axis(90), (100, 25));
        assert_eq!(nice_axis(3), (3, 1));
        assert_eq!(nice_axis(0), (1, 1));
    }

    #[test]
    fn test_one_bar_per_month_in_order() {
        let layout = layout();
        let months: Vec<&str> = layout.bars.iter().map(|b| b.month.as_str()).collect();
        assert_eq!(months, vec!["Jan", "Feb", "Mar", "Apr", "May", "Jun"]);

        let xs: Vec<f64> = layout.bars.iter().map(|b| b.x).collect();
        assert!(xs.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_bar_heights_proportional() {
        let layout = layout();
        let apr = layout.bar("Apr").unwrap();
        let jan = layout.bar("Jan").unwrap();
        let feb = layout.bar("Feb").unwrap();

        assert!((apr.height - layout.plot.height).abs() < 1e-9);
        assert!((jan.height * 2.0 - apr.height).abs() < 1e-9);
        assert!((feb.height / jan.height - 0.75).abs() < 1e-9);
        assert!((apr.y - layout.plot.y).abs() < 1e-9);
    }

    #[test]
    fn test_axis_and_dashed_grid() {
        let layout = layout();
        let values: Vec<u32> = layout.ticks.iter().map(|t| t.value).collect();
        assert_eq!(values, vec![0, 200, 400, 600, 800]);
        assert_eq!(layout.grid.len(), 5);
        assert!(layout.grid.iter().all(|g| g.dasharray == "3 3"));
        assert_eq!(layout.ticks[0].y, layout.plot.bottom());
    }

    #[test]
    fn test_series_styling() {
        let layout = layout();
        let jan = layout.bar("Jan").unwrap();
        assert_eq!(jan.tooltip, "Amount Spent: 400");
        assert_eq!(jan.fill, "var(--color-amount)");
        assert_eq!(layout.legend.label, "Amount Spent");
        assert_eq!(layout.legend.color, "hsl(var(--chart-1))");
    }

    #[test]
    fn test_empty_series() {
        let layout = BarChart::layout(&[], &ChartConfig::AMOUNT, ChartFrame::default());
        assert!(layout.bars.is_empty());
        assert_eq!(layout.axis_max, 1);
        assert_eq!(layout.ticks.len(), 2);
    }

    #[test]
    fn test_frame_smaller_than_margins() {
        let layout = BarChart::layout(&MONTHLY_SPEND, &ChartConfig::AMOUNT, ChartFrame::sized(10.0, 10.0));
        assert_eq!(layout.plot.width, 0.0);
        assert!(layout.bars.iter().all(|b| b.height == 0.0));
    }
}
