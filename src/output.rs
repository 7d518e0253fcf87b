use std::fmt::Write;

use crate::error::{Error, Result};
use crate::mapping::{INTER_ARRIVAL, SERVICE};
use crate::models::{NewsvendorConfig, QueueConfig};
use crate::state::{
    format_optional, seed_label, NewsvendorResult, SimulationResult, DAY_COLUMNS, RECORD_COLUMNS,
};

pub trait Formatter {
    fn write_queue(&self, result: &SimulationResult) -> Result<String>;
    fn write_newsvendor(&self, result: &NewsvendorResult) -> Result<String>;
}

pub struct HumanFormatter;
pub struct SummaryFormatter;
pub struct JsonFormatter;

impl Formatter for HumanFormatter {
    fn write_queue(&self, result: &SimulationResult) -> Result<String> {
        let mut output = String::new();
        write_queue_metadata(&mut output, result);
        output.push_str("Customers:\n");
        let rows = result
            .records
            .iter()
            .map(|record| record.values().iter().map(u64::to_string).collect())
            .collect();
        output.push_str(&render_table(&RECORD_COLUMNS, rows));
        write_rows(&mut output, &result.summary.rows());
        Ok(output)
    }

    fn write_newsvendor(&self, result: &NewsvendorResult) -> Result<String> {
        let mut output = String::new();
        write_newsvendor_metadata(&mut output, result);
        output.push_str("Days:\n");
        let rows = result
            .days
            .iter()
            .map(|day| {
                vec![
                    day.day.to_string(),
                    format!("{:.4}", day.random_for_type),
                    day.day_type.clone(),
                    format!("{:.4}", day.random_for_demand),
                    day.demand.to_string(),
                    day.ordered.to_string(),
                    day.sold.to_string(),
                    day.unsold.to_string(),
                    day.unmet.to_string(),
                    format!("{:.2}", day.revenue),
                    format!("{:.2}", day.cost),
                    format!("{:.2}", day.salvage),
                    format!("{:.2}", day.lost_profit),
                    format!("{:.2}", day.daily_profit),
                    format!("{:.2}", day.cumulative_profit),
                ]
            })
            .collect();
        output.push_str(&render_table(&DAY_COLUMNS, rows));
        write_newsvendor_summary(&mut output, result);
        Ok(output)
    }
}

impl Formatter for SummaryFormatter {
    fn write_queue(&self, result: &SimulationResult) -> Result<String> {
        let mut output = String::new();
        write_queue_metadata(&mut output, result);
        write_rows(&mut output, &result.summary.rows());
        Ok(output)
    }

    fn write_newsvendor(&self, result: &NewsvendorResult) -> Result<String> {
        let mut output = String::new();
        write_newsvendor_metadata(&mut output, result);
        write_newsvendor_summary(&mut output, result);
        Ok(output)
    }
}

impl Formatter for JsonFormatter {
    fn write_queue(&self, result: &SimulationResult) -> Result<String> {
        to_json(result)
    }

    fn write_newsvendor(&self, result: &NewsvendorResult) -> Result<String> {
        to_json(result)
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    let mut output =
        serde_json::to_string_pretty(value).map_err(|err| Error::Serialize(err.to_string()))?;
    output.push('\n');
    Ok(output)
}

fn write_queue_metadata(output: &mut String, result: &SimulationResult) {
    let metadata = &result.metadata;
    output.push_str("Metadata:\n");
    let _ = writeln!(output, "customers: {}", metadata.customers);
    let _ = writeln!(output, "seed: {}", metadata.seed);
    let _ = writeln!(output, "rn_iat: {}", metadata.rn_iat);
    let _ = writeln!(output, "rn_st: {}", metadata.rn_st);
}

fn write_newsvendor_metadata(output: &mut String, result: &NewsvendorResult) {
    let metadata = &result.metadata;
    output.push_str("Metadata:\n");
    let _ = writeln!(output, "days: {}", metadata.days);
    let _ = writeln!(output, "order_quantity: {}", metadata.order_quantity);
    let _ = writeln!(
        output,
        "lost_profit: {}",
        if metadata.include_lost_profit {
            "subtracted"
        } else {
            "ignored"
        }
    );
    let _ = writeln!(output, "seed: {}", metadata.seed);
}

fn write_newsvendor_summary(output: &mut String, result: &NewsvendorResult) {
    write_rows(output, &result.summary.rows());
    output.push_str("Profit by type of day:\n");
    for group in &result.summary.by_day_type {
        let _ = writeln!(
            output,
            "{}: {} days (mean: {:.2}, std: {}, total: {:.2})",
            group.name,
            group.count,
            group.mean,
            format_optional(group.std),
            group.sum
        );
    }
}

fn write_rows(output: &mut String, rows: &[(&'static str, String)]) {
    output.push_str("Summary:\n");
    for (label, value) in rows {
        let _ = writeln!(output, "{}: {}", label, value);
    }
}

/// Right-aligned columns, each as wide as its widest cell, separated by two
/// spaces.
pub fn render_table(headers: &[&str], rows: Vec<Vec<String>>) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|header| header.len()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let mut output = String::new();
    let header_cells: Vec<String> = headers.iter().map(|header| header.to_string()).collect();
    for cells in std::iter::once(&header_cells).chain(rows.iter()) {
        let line = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:>width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join("  ");
        output.push_str(&line);
        output.push('\n');
    }
    output
}

pub fn render_bands() -> String {
    let mut output = String::new();
    for table in [INTER_ARRIVAL, SERVICE] {
        let _ = writeln!(
            output,
            "{} (random numbers {}..={}):",
            table.kind,
            table.min,
            table.max()
        );
        for (lower, upper, value, probability) in table.ranges() {
            let _ = writeln!(
                output,
                "  {}..={} -> {} (p={:.3})",
                lower, upper, value, probability
            );
        }
    }
    output
}

pub fn render_queue_config(config: &QueueConfig) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "Customers: {}", config.customers);
    let _ = writeln!(output, "Seed: {}", seed_label(config.seed));
    let _ = writeln!(output, "RN_IAT: {}", describe_draws(config.rn_iat.as_deref()));
    let _ = writeln!(output, "RN_ST: {}", describe_draws(config.rn_st.as_deref()));
    output
}

/// Parameters first, then the day-type and demand tables with one column per
/// day type.
pub fn render_newsvendor_config(config: &NewsvendorConfig) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "Days: {}", config.days);
    let _ = writeln!(output, "Order quantity: {}", config.order_quantity);
    let _ = writeln!(output, "Selling price: {:.2}", config.selling_price);
    let _ = writeln!(output, "Cost price: {:.2}", config.cost_price);
    let _ = writeln!(output, "Salvage price: {:.2}", config.salvage_price);
    let _ = writeln!(
        output,
        "Lost profit: {}",
        if config.include_lost_profit {
            "subtracted"
        } else {
            "ignored"
        }
    );
    let _ = writeln!(output, "Seed: {}", seed_label(config.seed));

    output.push_str("Day types:\n");
    let rows = config
        .day_types
        .iter()
        .map(|day_type| vec![day_type.name.clone(), format!("{:.2}", day_type.probability)])
        .collect();
    output.push_str(&render_table(&["Type", "Probability"], rows));

    output.push_str("Demand distribution:\n");
    let mut headers = vec!["Demand"];
    headers.extend(config.day_types.iter().map(|day_type| day_type.name.as_str()));
    let rows = config
        .demand_levels
        .iter()
        .enumerate()
        .map(|(idx, level)| {
            let mut row = vec![level.to_string()];
            row.extend(config.day_types.iter().map(|day_type| {
                day_type
                    .demand
                    .get(idx)
                    .map(|p| format!("{:.2}", p))
                    .unwrap_or_else(|| "-".to_string())
            }));
            row
        })
        .collect();
    output.push_str(&render_table(&headers, rows));
    output
}

fn describe_draws(draws: Option<&[u32]>) -> String {
    match draws {
        Some(draws) => draws
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(", "),
        None => "generated".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::run_simulation;

    fn late_arrival() -> SimulationResult {
        run_simulation(&QueueConfig {
            customers: 2,
            rn_iat: Some(vec![500, 1000]),
            rn_st: Some(vec![1, 100]),
            seed: Some(1),
        })
        .unwrap()
    }

    #[test]
    fn table_pads_to_widest_cell() {
        let table = render_table(
            &["A", "Long"],
            vec![
                vec!["10".to_string(), "1".to_string()],
                vec!["2".to_string(), "300".to_string()],
            ],
        );
        assert_eq!(table, " A  Long\n10     1\n 2   300\n");
    }

    #[test]
    fn summary_format_lists_metadata_and_kpis() {
        let output = SummaryFormatter.write_queue(&late_arrival()).unwrap();
        let expected = concat!(
            "Metadata:\n",
            "customers: 2\n",
            "seed: seeded(1)\n",
            "rn_iat: supplied\n",
            "rn_st: supplied\n",
            "Summary:\n",
            "Average waiting time: 0.00\n",
            "Maximum waiting time: 0\n",
            "Total server idle time: 7\n",
            "Server utilization (%): 50.00%\n",
            "Simulation horizon end: 14\n",
        );
        assert_eq!(output, expected);
    }

    #[test]
    fn human_format_includes_customer_table() {
        let output = HumanFormatter.write_queue(&late_arrival()).unwrap();
        assert!(output.contains(
            "Cust  RN_IAT  IAT  Arrival  RN_ST  ST  TSB  Wait  TSE  TimeInSystem  ServerIdle\n"
        ));
        assert!(output.contains(
            "   2    1000    8        8    100   6    8     0   14             6           7\n"
        ));
    }

    #[test]
    fn json_format_uses_column_names() {
        let output = JsonFormatter.write_queue(&late_arrival()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["records"][1]["TSE"], 14);
        assert_eq!(value["records"][1]["ServerIdle"], 7);
        assert_eq!(value["summary"]["utilization"], 0.5);
        assert_eq!(value["metadata"]["rn_iat"], "supplied");
    }

    #[test]
    fn bands_list_every_range() {
        let output = render_bands();
        assert!(output.starts_with("IAT (random numbers 1..=1000):\n  1..=125 -> 1 (p=0.125)\n"));
        assert!(output.contains("ST (random numbers 1..=100):\n  1..=29 -> 1 (p=0.290)\n"));
        assert!(output.ends_with("  75..=100 -> 6 (p=0.260)\n"));
    }

    #[test]
    fn queue_config_description_marks_generated_streams() {
        let config = QueueConfig {
            customers: 3,
            rn_iat: Some(vec![1, 2, 3]),
            rn_st: None,
            seed: None,
        };
        assert_eq!(
            render_queue_config(&config),
            "Customers: 3\nSeed: entropy\nRN_IAT: 1, 2, 3\nRN_ST: generated\n"
        );
    }

    #[test]
    fn newsvendor_config_lists_parameters_and_tables() {
        let output = render_newsvendor_config(&NewsvendorConfig::default());
        assert!(output.starts_with(concat!(
            "Days: 1000\n",
            "Order quantity: 70\n",
            "Selling price: 0.50\n",
            "Cost price: 0.33\n",
            "Salvage price: 0.05\n",
            "Lost profit: subtracted\n",
            "Seed: seeded(42)\n",
            "Day types:\n",
            "Type  Probability\n",
            "Good         0.35\n",
        )));
        assert!(output.contains("Demand distribution:\nDemand  Good  Fair  Poor\n    40  0.03  0.10  0.44\n"));
        assert!(output.ends_with("   100  0.07  0.00  0.00\n"));
    }

    struct Unserializable;

    impl serde::Serialize for Unserializable {
        fn serialize<S: serde::Serializer>(&self, _: S) -> std::result::Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("not representable"))
        }
    }

    #[test]
    fn json_failure_is_a_serialize_error() {
        let err = to_json(&Unserializable).unwrap_err();
        assert!(matches!(err, Error::Serialize(_)));
        assert_eq!(err.to_string(), "failed to serialize result: not representable");
    }
}
