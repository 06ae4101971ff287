//! Ternary projection command.

use anyhow::Result;
use cnp_ternary::{TernaryPoint, project_all};
use serde::Serialize;
use tracing::debug;

use crate::output::{OutputFormat, print_csv, print_json};

#[derive(Debug, Serialize)]
struct Row {
    a: f64,
    b: f64,
    c: f64,
    x: f64,
    y: f64,
}

pub fn run(points: &[TernaryPoint], format: OutputFormat) -> Result<()> {
    debug!(points = points.len(), "projecting points");

    let rows: Vec<Row> = points
        .iter()
        .zip(project_all(points))
        .map(|(p, xy)| Row {
            a: p.a,
            b: p.b,
            c: p.c,
            x: xy.x,
            y: xy.y,
        })
        .collect();

    match format {
        OutputFormat::Json => print_json(&rows),
        OutputFormat::Csv => print_csv(&rows),
        OutputFormat::Table => {
            println!("{:>10} {:>10} {:>10} {:>12} {:>12}", "a", "b", "c", "x", "y");
            println!("{:-<58}", "");
            for row in &rows {
                println!(
                    "{:>10.4} {:>10.4} {:>10.4} {:>12.6} {:>12.6}",
                    row.a, row.b, row.c, row.x, row.y
                );
            }
            Ok(())
        }
    }
}
