//! Report rendering: box-drawn tables, JSON and CSV.

use std::io::Write;

use pricer_models::analytical::PricingQuote;
use pricer_pricing::mc::PricePath;
use pricer_pricing::scenario::ScenarioOutcome;
use serde::Serialize;

use crate::config::OutputFormat;
use crate::Result;

/// A flat record that can be rendered as a table row.
pub trait TableRow {
    /// Column headers, in field order
    const HEADERS: &'static [&'static str];

    /// Formatted cells, one per header
    fn cells(&self) -> Vec<String>;
}

/// One point of a simulated path
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PathRow {
    pub step: usize,
    pub time: f64,
    pub price: f64,
}

impl PathRow {
    /// Rows for every point of `path`
    pub fn from_path(path: &PricePath) -> Vec<Self> {
        path.iter()
            .enumerate()
            .map(|(step, point)| PathRow {
                step,
                time: point.time,
                price: point.price,
            })
            .collect()
    }
}

impl TableRow for PathRow {
    const HEADERS: &'static [&'static str] = &["Step", "Time", "Price"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.step.to_string(),
            format!("{:.6}", self.time),
            format!("{:.6}", self.price),
        ]
    }
}

/// A call re-priced at one point of a path
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuoteRow {
    pub step: usize,
    pub time: f64,
    pub spot: f64,
    pub time_to_maturity: f64,
    pub fair_value: f64,
}

impl QuoteRow {
    /// Pairs each quote with its path point
    pub fn from_quotes(path: &PricePath, quotes: &[PricingQuote]) -> Vec<Self> {
        path.iter()
            .zip(quotes)
            .enumerate()
            .map(|(step, (point, quote))| QuoteRow {
                step,
                time: point.time,
                spot: quote.spot,
                time_to_maturity: quote.time_to_maturity,
                fair_value: quote.fair_value,
            })
            .collect()
    }
}

impl TableRow for QuoteRow {
    const HEADERS: &'static [&'static str] = &["Step", "Time", "Spot", "T", "Fair Value"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.step.to_string(),
            format!("{:.6}", self.time),
            format!("{:.6}", self.spot),
            format!("{:.6}", self.time_to_maturity),
            format!("{:.6}", self.fair_value),
        ]
    }
}

/// Summary of one scenario run
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScenarioRow {
    pub evaluation_index: usize,
    pub evaluation_time: f64,
    pub spot: f64,
    pub strike: f64,
    pub time_to_maturity: f64,
    pub premium: f64,
    pub terminal_spot: f64,
    pub intrinsic_value: f64,
    pub profit_loss: f64,
}

impl From<&ScenarioOutcome> for ScenarioRow {
    fn from(outcome: &ScenarioOutcome) -> Self {
        ScenarioRow {
            evaluation_index: outcome.evaluation_index,
            evaluation_time: outcome.evaluation_time,
            spot: outcome.purchase.spot,
            strike: outcome.contract.strike(),
            time_to_maturity: outcome.purchase.time_to_maturity,
            premium: outcome.purchase.fair_value,
            terminal_spot: outcome.terminal_spot,
            intrinsic_value: outcome.intrinsic_value,
            profit_loss: outcome.profit_loss,
        }
    }
}

impl TableRow for ScenarioRow {
    const HEADERS: &'static [&'static str] = &[
        "Index", "Time", "Spot", "Strike", "T", "Premium", "Terminal", "Intrinsic", "P/L",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.evaluation_index.to_string(),
            format!("{:.6}", self.evaluation_time),
            format!("{:.6}", self.spot),
            format!("{:.6}", self.strike),
            format!("{:.6}", self.time_to_maturity),
            format!("{:.6}", self.premium),
            format!("{:.6}", self.terminal_spot),
            format!("{:.6}", self.intrinsic_value),
            format!("{:+.6}", self.profit_loss),
        ]
    }
}

/// A single closed-form price, with Greeks when requested
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceRow {
    pub option: &'static str,
    pub spot: f64,
    pub strike: f64,
    pub maturity: f64,
    pub rate: f64,
    pub volatility: f64,
    pub dividend_yield: f64,
    pub price: f64,
    pub delta: Option<f64>,
    pub gamma: Option<f64>,
    pub vega: Option<f64>,
    pub theta: Option<f64>,
    pub rho: Option<f64>,
}

impl TableRow for PriceRow {
    const HEADERS: &'static [&'static str] = &[
        "Option", "Spot", "Strike", "T", "Rate", "Vol", "Div", "Price", "Delta", "Gamma", "Vega",
        "Theta", "Rho",
    ];

    fn cells(&self) -> Vec<String> {
        let greek = |value: Option<f64>| value.map_or_else(|| "-".to_string(), |v| format!("{:.6}", v));
        vec![
            self.option.to_string(),
            format!("{:.4}", self.spot),
            format!("{:.4}", self.strike),
            format!("{:.4}", self.maturity),
            format!("{:.4}", self.rate),
            format!("{:.4}", self.volatility),
            format!("{:.4}", self.dividend_yield),
            format!("{:.6}", self.price),
            greek(self.delta),
            greek(self.gamma),
            greek(self.vega),
            greek(self.theta),
            greek(self.rho),
        ]
    }
}

/// Writes `rows` in the requested format.
pub fn write_rows<R, W>(format: OutputFormat, rows: &[R], out: &mut W) -> Result<()>
where
    R: TableRow + Serialize,
    W: Write,
{
    match format {
        OutputFormat::Table => write_table(rows, out),
        OutputFormat::Json => write_json(&rows, out),
        OutputFormat::Csv => write_csv(rows, out),
    }
}

/// Pretty-printed JSON followed by a newline
pub fn write_json<T, W>(value: &T, out: &mut W) -> Result<()>
where
    T: Serialize + ?Sized,
    W: Write,
{
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

/// CSV with a header row taken from the field names
pub fn write_csv<R, W>(rows: &[R], out: &mut W) -> Result<()>
where
    R: Serialize,
    W: Write,
{
    let mut writer = csv::Writer::from_writer(out);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Box-drawn table with right-aligned cells
pub fn write_table<R, W>(rows: &[R], out: &mut W) -> Result<()>
where
    R: TableRow,
    W: Write,
{
    let cells: Vec<Vec<String>> = rows.iter().map(TableRow::cells).collect();
    let widths: Vec<usize> = R::HEADERS
        .iter()
        .enumerate()
        .map(|(col, header)| {
            cells
                .iter()
                .map(|row| row[col].chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let rule = |left: &str, mid: &str, right: &str| {
        let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{}{}{}", left, segments.join(mid), right)
    };
    let line = |values: &[String]| {
        let padded: Vec<String> = values
            .iter()
            .zip(&widths)
            .map(|(value, width)| format!(" {:>width$} ", value, width = width))
            .collect();
        format!("│{}│", padded.join("│"))
    };

    let headers: Vec<String> = R::HEADERS.iter().map(|h| h.to_string()).collect();
    writeln!(out, "{}", rule("┌", "┬", "┐"))?;
    writeln!(out, "{}", line(&headers))?;
    writeln!(out, "{}", rule("├", "┼", "┤"))?;
    for row in &cells {
        writeln!(out, "{}", line(row))?;
    }
    writeln!(out, "{}", rule("└", "┴", "┘"))?;
    Ok(())
}
