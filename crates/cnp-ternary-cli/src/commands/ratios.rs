//! Reference ratio listing command.

use anyhow::Result;
use cnp_ternary::ReferenceRatio;

pub fn run() -> Result<()> {
    println!("{:<16} {:>12}", "Name", "C:N:P");
    println!("{:-<29}", "");
    for (name, ratio) in ReferenceRatio::NAMED {
        let default = if ratio == ReferenceRatio::default() { " (default)" } else { "" };
        println!("{:<16} {:>12}{}", name, ratio.to_string(), default);
    }
    Ok(())
}
