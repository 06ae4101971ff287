//! Cyclic perimeter (drift) command.

use anyhow::{Context, Result};
use cnp_ternary::{DriftReport, TernaryPoint};
use serde::Serialize;
use tracing::debug;

use crate::output::{OutputFormat, print_csv, print_json};

/// One edge of the closed polygon.
#[derive(Debug, Serialize)]
struct EdgeRow {
    from: usize,
    to: usize,
    length: f64,
}

/// Perimeter summary without the per-edge list.
#[derive(Debug, Serialize)]
struct SummaryRow {
    points: usize,
    perimeter: f64,
    longest_edge: Option<usize>,
}

pub fn run(points: &[TernaryPoint], show_edges: bool, format: OutputFormat) -> Result<()> {
    debug!(points = points.len(), "computing cyclic perimeter");

    let report = DriftReport::compute(points).context("Failed to compute cyclic perimeter")?;

    debug!(perimeter = report.perimeter, longest_edge = ?report.longest_edge, "drift computed");

    let n = report.points;
    let edges: Vec<EdgeRow> = report
        .edges
        .iter()
        .enumerate()
        .map(|(i, &length)| EdgeRow {
            from: i,
            to: (i + 1) % n,
            length,
        })
        .collect();

    match format {
        OutputFormat::Json => print_json(&report),
        OutputFormat::Csv if show_edges => print_csv(&edges),
        OutputFormat::Csv => print_csv(&[SummaryRow {
            points: report.points,
            perimeter: report.perimeter,
            longest_edge: report.longest_edge,
        }]),
        OutputFormat::Table => {
            println!("Points: {}", report.points);
            println!("Perimeter: {:.6}", report.perimeter);

            if show_edges {
                println!();
                println!("{:>6} {:>6} {:>12}", "From", "To", "Length");
                println!("{:-<26}", "");
                for edge in &edges {
                    let marker = if report.longest_edge == Some(edge.from) { " *" } else { "" };
                    println!("{:>6} {:>6} {:>12.6}{}", edge.from, edge.to, edge.length, marker);
                }
            }
            Ok(())
        }
    }
}
