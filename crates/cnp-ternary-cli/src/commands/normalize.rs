//! Concentration normalization command.

use anyhow::{Context, Result};
use cnp_ternary::{ReferenceRatio, normalize, project};
use serde::Serialize;
use tracing::debug;

use crate::output::{OutputFormat, print_csv, print_json};

/// One normalized sample, shares in N, C, P order.
#[derive(Debug, Serialize)]
struct Row {
    sample: usize,
    nitrogen: f64,
    carbon: f64,
    phosphorus: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    y: Option<f64>,
}

pub fn run(
    carbon: &[f64],
    nitrogen: &[f64],
    phosphorus: &[f64],
    ratio: &ReferenceRatio,
    with_projection: bool,
    format: OutputFormat,
) -> Result<()> {
    debug!(samples = carbon.len(), %ratio, "normalizing concentrations");

    let shares = normalize(carbon, nitrogen, phosphorus, ratio)
        .with_context(|| format!("Failed to normalize against {ratio}"))?;

    let rows: Vec<Row> = shares
        .iter()
        .enumerate()
        .map(|(sample, s)| {
            let xy = with_projection.then(|| project(*s));
            Row {
                sample,
                nitrogen: s.nitrogen,
                carbon: s.carbon,
                phosphorus: s.phosphorus,
                x: xy.map(|p| p.x),
                y: xy.map(|p| p.y),
            }
        })
        .collect();

    match format {
        OutputFormat::Json => print_json(&rows),
        OutputFormat::Csv => print_csv(&rows),
        OutputFormat::Table => {
            println!("Reference ratio C:N:P = {ratio}");
            println!();
            if with_projection {
                println!(
                    "{:>6} {:>10} {:>10} {:>10} {:>10} {:>10}",
                    "Sample", "N %", "C %", "P %", "x", "y"
                );
                println!("{:-<61}", "");
            } else {
                println!("{:>6} {:>10} {:>10} {:>10}", "Sample", "N %", "C %", "P %");
                println!("{:-<39}", "");
            }

            for row in &rows {
                print!(
                    "{:>6} {:>10.4} {:>10.4} {:>10.4}",
                    row.sample, row.nitrogen, row.carbon, row.phosphorus
                );
                if let (Some(x), Some(y)) = (row.x, row.y) {
                    print!(" {:>10.4} {:>10.4}", x, y);
                }
                println!();
            }
            Ok(())
        }
    }
}
