//! Plain-text table rendering for the two report tables.

use tenk_core::FinancialFact;
use tenk_report::SpendRow;

/// Renders the primary metrics table (metric, value, form, filed date).
pub(crate) fn metrics_table(metrics: &[FinancialFact]) -> String {
    let rows: Vec<[String; 4]> = metrics
        .iter()
        .map(|fact| {
            [
                fact.label.to_string(),
                fact.value.to_string(),
                fact.form.clone(),
                fact.filed.to_string(),
            ]
        })
        .collect();

    render(["Metric", "Value", "Form", "Filed"], &rows)
}

/// Renders the competitor cloud-spend comparison table.
pub(crate) fn comparison_table(rows: &[SpendRow]) -> String {
    let rows: Vec<[String; 2]> = rows
        .iter()
        .map(|row| [row.label.to_string(), row.value.to_string()])
        .collect();

    render(["Metric", "Value"], &rows)
}

/// Left-aligns every column to the widest cell, two spaces between columns.
fn render<const N: usize>(header: [&str; N], rows: &[[String; N]]) -> String {
    let mut widths: [usize; N] = header.map(str::len);
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &widths, &header.map(String::from));
    push_row(&mut out, &widths, &widths.map(|width| "-".repeat(width)));
    for row in rows {
        push_row(&mut out, &widths, row);
    }
    out
}

fn push_row<const N: usize>(out: &mut String, widths: &[usize; N], cells: &[String; N]) {
    let mut line = String::new();
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        let width = *width;
        line.push_str(&format!("{cell:<width$}"));
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tenk_core::MetricValue;

    fn fact(label: &'static str, value: MetricValue) -> FinancialFact {
        FinancialFact::new(
            label,
            value,
            "10-K",
            NaiveDate::from_ymd_opt(2024, 7, 30).unwrap(),
        )
    }

    #[test]
    fn metrics_table_aligns_columns() {
        let metrics = vec![
            fact("Revenue", MetricValue::Usd(1000.0)),
            fact("Gross Margin", MetricValue::Percent(40.0)),
        ];

        let table = metrics_table(&metrics);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Metric"));
        assert!(lines[1].chars().all(|c| c == '-' || c == ' '));

        let value_col = lines[0].find("Value").unwrap();
        let form_col = lines[0].find("Form").unwrap();
        assert!(lines[2][value_col..].starts_with("$1,000.00"));
        assert!(lines[3][value_col..].starts_with("40.00%"));
        assert!(lines[2][form_col..].starts_with("10-K"));
        assert!(lines[2].ends_with("2024-07-30"));
    }

    #[test]
    fn comparison_table_aligns_columns() {
        let rows = vec![
            SpendRow {
                label: "OCI Spend (Including Support Rewards)",
                value: MetricValue::Usd(397_500.0),
            },
            SpendRow {
                label: "SGA when Using OCI",
                value: MetricValue::Usd(39_750.0),
            },
        ];

        let table = comparison_table(&rows);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        let value_col = lines[0].find("Value").unwrap();
        assert!(lines[2][value_col..].starts_with("$397,500.00"));
        assert!(lines[3][value_col..].starts_with("$39,750.00"));
    }

    #[test]
    fn empty_table_is_just_the_header() {
        let table = metrics_table(&[]);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].trim_end(), "Metric  Value  Form  Filed");
    }
}
