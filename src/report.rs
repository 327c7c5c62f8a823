//! Plain-text pivot of the funding table.

use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::reconcile::FundingTable;
use crate::types::Platform;

const MISSING: &str = "—";

/// Format an hourly fraction as a percentage with 4 decimals.
pub fn format_rate(rate: Option<Decimal>) -> String {
    match rate {
        Some(rate) => {
            let pct = (rate * dec!(100))
                .round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero);
            format!("{:.4}%", pct)
        }
        None => MISSING.to_string(),
    }
}

/// Render `Asset | Hyperliquid/hr | Lighter/hr | Paradex/hr`, one row per
/// base in lexical order, followed by a token count and timestamp.
pub fn render_pivot(table: &FundingTable, now: DateTime<Utc>) -> String {
    if table.is_empty() {
        return "No data to display.\n".to_string();
    }

    let mut header = vec!["Asset".to_string()];
    header.extend(Platform::COLUMNS.iter().map(|p| format!("{}/hr", p)));

    let rows: Vec<Vec<String>> = table
        .iter()
        .map(|(base, row)| {
            let mut cells = vec![base.to_string()];
            cells.extend(
                Platform::COLUMNS
                    .iter()
                    .map(|p| format_rate(row.get(p).copied())),
            );
            cells
        })
        .collect();

    let widths: Vec<usize> = (0..header.len())
        .map(|col| {
            std::iter::once(&header)
                .chain(rows.iter())
                .map(|cells| cells[col].chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = "-".repeat(widths.iter().sum::<usize>() + 3 * widths.len() + 1);
    let format_row = |cells: &[String]| {
        let inner: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect();
        format!("| {} |", inner.join(" | "))
    };

    let mut out = String::new();
    out.push_str(&line);
    out.push('\n');
    out.push_str(&format_row(header.as_slice()));
    out.push('\n');
    out.push_str(&line);
    out.push('\n');
    for row in &rows {
        out.push_str(&format_row(row.as_slice()));
        out.push('\n');
    }
    out.push_str(&line);
    out.push('\n');
    out.push_str(&format!(
        "{} tokens • {}\n",
        rows.len(),
        now.to_rfc3339_opts(SecondsFormat::Secs, false)
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_rate() {
        assert_eq!(format_rate(Some(dec!(0.000125))), "0.0125%");
        assert_eq!(format_rate(Some(dec!(-0.00001))), "-0.0010%");
        assert_eq!(format_rate(None), "—");
    }

    #[test]
    fn test_render_pivot() {
        let mut table = FundingTable::default();
        table.insert("ETH", Platform::Lighter, dec!(0.0001));
        table.insert("BTC", Platform::Hyperliquid, dec!(0.0000125));
        table.insert("BTC", Platform::Paradex, dec!(-0.0002));
        table.ensure_asset("ZK");

        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let out = render_pivot(&table, now);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 8);
        assert_eq!(
            lines[1],
            "| Asset | Hyperliquid/hr | Lighter/hr | Paradex/hr |"
        );
        assert_eq!(
            lines[3],
            "| BTC   | 0.0013%        | —          | -0.0200%   |"
        );
        assert!(lines[4].starts_with("| ETH   | —"));
        assert!(lines[5].starts_with("| ZK "));
        assert_eq!(lines[0].chars().count(), lines[1].chars().count());
        assert_eq!(lines[7], "3 tokens • 2024-05-01T12:00:00+00:00");
    }

    #[test]
    fn test_empty_table() {
        let out = render_pivot(&FundingTable::default(), Utc::now());
        assert_eq!(out, "No data to display.\n");
    }
}
