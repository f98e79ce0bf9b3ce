//! SVG rendering of the price series with signal markers, and of the
//! drawdown curve.

use crate::domain::returns::ReturnSeries;
use crate::domain::signal::Signal;
use crate::domain::signal_table::SignalTable;
use crate::ports::config_port::ConfigPort;

const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 50.0;
const GRID_LINES: usize = 5;
const MARKER_SIZE: f64 = 7.0;

const PRICE_COLOR: &str = "#1f77b4";
const BUY_COLOR: &str = "green";
const SELL_COLOR: &str = "red";
const DRAWDOWN_COLOR: &str = "#d62728";
const GRID_COLOR: &str = "#e0e0e0";
const AXIS_COLOR: &str = "#999";
const TEXT_COLOR: &str = "#333";

pub const DEFAULT_TITLE: &str = "Price Data with Trading Signals";

#[derive(Debug, Clone, PartialEq)]
pub struct ChartOptions {
    pub title: String,
    pub width: f64,
    pub height: f64,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            width: 1400.0,
            height: 700.0,
        }
    }
}

impl ChartOptions {
    /// Read `[chart] title`, `width`, `height`; sizes are whole pixels and
    /// non-positive ones fall back.
    pub fn from_config(config: &dyn ConfigPort) -> Self {
        let defaults = Self::default();
        let pixels = |key: &str, fallback: f64| match config.get_int("chart", key, 0) {
            n if n > 0 => n as f64,
            _ => fallback,
        };
        Self {
            width: pixels("width", defaults.width),
            height: pixels("height", defaults.height),
            title: config.get_string("chart", "title").unwrap_or(defaults.title),
        }
    }

    fn plot_width(&self) -> f64 {
        (self.width - MARGIN_LEFT - MARGIN_RIGHT).max(1.0)
    }

    fn plot_height(&self) -> f64 {
        (self.height - MARGIN_TOP - MARGIN_BOTTOM).max(1.0)
    }
}

/// Maps series positions and values into plot coordinates.
struct Frame {
    x0: f64,
    y0: f64,
    plot_width: f64,
    plot_height: f64,
    count: usize,
    min: f64,
    max: f64,
}

impl Frame {
    fn new(opts: &ChartOptions, count: usize, min: f64, max: f64) -> Self {
        let (min, max) = if max > min {
            let pad = (max - min) * 0.05;
            (min - pad, max + pad)
        } else {
            (min - 1.0, max + 1.0)
        };
        Self {
            x0: MARGIN_LEFT,
            y0: MARGIN_TOP,
            plot_width: opts.plot_width(),
            plot_height: opts.plot_height(),
            count,
            min,
            max,
        }
    }

    fn x(&self, i: usize) -> f64 {
        self.x0 + (i as f64 / (self.count.saturating_sub(1)).max(1) as f64) * self.plot_width
    }

    fn y(&self, v: f64) -> f64 {
        self.y0 + self.plot_height - ((v - self.min) / (self.max - self.min)) * self.plot_height
    }

    fn bottom(&self) -> f64 {
        self.y0 + self.plot_height
    }

    fn right(&self) -> f64 {
        self.x0 + self.plot_width
    }
}

pub fn render_price_chart(table: &SignalTable, opts: &ChartOptions) -> String {
    if table.is_empty() {
        return String::new();
    }

    let prices = table.prices();
    let min = prices.iter().copied().fold(f64::INFINITY, f64::min);
    let max = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let frame = Frame::new(opts, prices.len(), min, max);

    let mut svg = open_svg(opts);
    push_grid(&mut svg, &frame, |v| format!("{:.2}", v));
    push_labels(&mut svg, opts, &frame, "Date", "Price");

    svg.push_str(&format!(
        "  <path class=\"price-line\" d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"1.5\"/>\n",
        line_path(&frame, &prices),
        PRICE_COLOR
    ));

    for point in table.markers(Signal::Buy) {
        svg.push_str(&triangle(
            "buy-marker",
            frame.x(point.index),
            frame.y(point.price),
            true,
            BUY_COLOR,
        ));
    }
    for point in table.markers(Signal::Sell) {
        svg.push_str(&triangle(
            "sell-marker",
            frame.x(point.index),
            frame.y(point.price),
            false,
            SELL_COLOR,
        ));
    }

    push_legend(
        &mut svg,
        &[
            LegendEntry::Line("Price", PRICE_COLOR),
            LegendEntry::Marker("Buy Signal", BUY_COLOR, true),
            LegendEntry::Marker("Sell Signal", SELL_COLOR, false),
        ],
    );

    svg.push_str("</svg>\n");
    svg
}

/// Filled area below zero for `cumulative - runningMax(cumulative)`.
pub fn render_drawdown_chart(series: &ReturnSeries, opts: &ChartOptions) -> String {
    if series.len() < 2 {
        return String::new();
    }

    let drawdowns = series.drawdowns();
    let deepest = drawdowns.iter().copied().fold(0.0, f64::min);
    let frame = Frame::new(opts, drawdowns.len(), deepest, 0.0);

    let title = ChartOptions {
        title: "Drawdown".to_string(),
        ..opts.clone()
    };
    let mut svg = open_svg(&title);
    push_grid(&mut svg, &frame, |v| format!("{:.1}%", v * 100.0));
    push_labels(&mut svg, &title, &frame, "Date", "Drawdown");

    let mut path_data = line_path(&frame, &drawdowns);
    path_data.push_str(&format!(
        " L {:.1} {:.1} L {:.1} {:.1} Z",
        frame.x(drawdowns.len() - 1),
        frame.y(0.0),
        frame.x(0),
        frame.y(0.0)
    ));
    svg.push_str(&format!(
        "  <path class=\"drawdown-area\" d=\"{}\" fill=\"{}\" fill-opacity=\"0.3\" stroke=\"{}\" stroke-width=\"1\"/>\n",
        path_data, DRAWDOWN_COLOR, DRAWDOWN_COLOR
    ));

    svg.push_str("</svg>\n");
    svg
}

fn open_svg(opts: &ChartOptions) -> String {
    let mut svg = String::new();
    svg.push_str(&format!(
        r##"<svg width="{w}" height="{h}" viewBox="0 0 {w} {h}" xmlns="http://www.w3.org/2000/svg">"##,
        w = opts.width,
        h = opts.height
    ));
    svg.push_str("\n  <rect width=\"100%\" height=\"100%\" fill=\"white\"/>\n");
    svg.push_str(&format!(
        "  <text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"16\" fill=\"{}\">{}</text>\n",
        opts.width / 2.0,
        MARGIN_TOP / 2.0 + 5.0,
        TEXT_COLOR,
        escape_xml(&opts.title)
    ));
    svg
}

fn push_grid(svg: &mut String, frame: &Frame, fmt_value: impl Fn(f64) -> String) {
    for step in 0..=GRID_LINES {
        let frac = step as f64 / GRID_LINES as f64;

        let y = frame.y0 + frac * frame.plot_height;
        let value = frame.max - frac * (frame.max - frame.min);
        svg.push_str(&format!(
            "  <line class=\"grid\" x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"{}\" stroke-width=\"1\"/>\n",
            frame.x0, y, frame.right(), y, GRID_COLOR
        ));
        svg.push_str(&format!(
            "  <text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"end\" font-size=\"10\" fill=\"{}\">{}</text>\n",
            frame.x0 - 5.0,
            y + 3.0,
            TEXT_COLOR,
            fmt_value(value)
        ));

        let x = frame.x0 + frac * frame.plot_width;
        svg.push_str(&format!(
            "  <line class=\"grid\" x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"{}\" stroke-width=\"1\"/>\n",
            x, frame.y0, x, frame.bottom(), GRID_COLOR
        ));
        let index = (frac * frame.count.saturating_sub(1) as f64).round() as usize;
        svg.push_str(&format!(
            "  <text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"10\" fill=\"{}\">{}</text>\n",
            x,
            frame.bottom() + 15.0,
            TEXT_COLOR,
            index
        ));
    }

    svg.push_str(&format!(
        "  <line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"{}\" stroke-width=\"1\"/>\n",
        frame.x0, frame.y0, frame.x0, frame.bottom(), AXIS_COLOR
    ));
    svg.push_str(&format!(
        "  <line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"{}\" stroke-width=\"1\"/>\n",
        frame.x0,
        frame.bottom(),
        frame.right(),
        frame.bottom(),
        AXIS_COLOR
    ));
}

fn push_labels(svg: &mut String, opts: &ChartOptions, frame: &Frame, x_label: &str, y_label: &str) {
    svg.push_str(&format!(
        "  <text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"12\" fill=\"{}\">{}</text>\n",
        frame.x0 + frame.plot_width / 2.0,
        opts.height - 10.0,
        TEXT_COLOR,
        x_label
    ));
    let cy = frame.y0 + frame.plot_height / 2.0;
    svg.push_str(&format!(
        "  <text x=\"15\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"12\" fill=\"{}\" transform=\"rotate(-90 15 {:.1})\">{}</text>\n",
        cy, TEXT_COLOR, cy, y_label
    ));
}

fn line_path(frame: &Frame, values: &[f64]) -> String {
    let mut path_data = String::new();
    for (i, &v) in values.iter().enumerate() {
        if i == 0 {
            path_data.push_str(&format!("M {:.1} {:.1}", frame.x(i), frame.y(v)));
        } else {
            path_data.push_str(&format!(" L {:.1} {:.1}", frame.x(i), frame.y(v)));
        }
    }
    path_data
}

fn triangle(class: &str, cx: f64, cy: f64, up: bool, color: &str) -> String {
    let h = MARKER_SIZE;
    let points = if up {
        format!(
            "{:.1},{:.1} {:.1},{:.1} {:.1},{:.1}",
            cx,
            cy - h,
            cx - h,
            cy + h,
            cx + h,
            cy + h
        )
    } else {
        format!(
            "{:.1},{:.1} {:.1},{:.1} {:.1},{:.1}",
            cx,
            cy + h,
            cx - h,
            cy - h,
            cx + h,
            cy - h
        )
    };
    format!("  <polygon class=\"{class}\" points=\"{points}\" fill=\"{color}\"/>\n")
}

enum LegendEntry<'a> {
    Line(&'a str, &'a str),
    Marker(&'a str, &'a str, bool),
}

fn push_legend(svg: &mut String, entries: &[LegendEntry]) {
    let x = MARGIN_LEFT + 10.0;
    let mut y = MARGIN_TOP + 15.0;

    svg.push_str(&format!(
        "  <rect class=\"legend\" x=\"{:.1}\" y=\"{:.1}\" width=\"120\" height=\"{:.1}\" fill=\"white\" fill-opacity=\"0.8\" stroke=\"{}\"/>\n",
        x - 5.0,
        y - 12.0,
        entries.len() as f64 * 18.0 + 6.0,
        GRID_COLOR
    ));

    for entry in entries {
        let (label, swatch) = match entry {
            LegendEntry::Line(label, color) => (
                *label,
                format!(
                    "  <line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"{}\" stroke-width=\"2\"/>\n",
                    x,
                    y - 4.0,
                    x + 16.0,
                    y - 4.0,
                    color
                ),
            ),
            LegendEntry::Marker(label, color, up) => {
                (*label, triangle("legend-marker", x + 8.0, y - 4.0, *up, color))
            }
        };
        svg.push_str(&swatch);
        svg.push_str(&format!(
            "  <text x=\"{:.1}\" y=\"{:.1}\" font-size=\"11\" fill=\"{}\">{}</text>\n",
            x + 22.0,
            y,
            TEXT_COLOR,
            label
        ));
        y += 18.0;
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
