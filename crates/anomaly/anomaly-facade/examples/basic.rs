//! Basic example: fit a site model and score a fresh hour of readings.
//!
//! Run with: cargo run --example basic -p anomaly-facade

use anomaly_facade::{anomaly_count, classify, fit, Reading};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== anomaly-facade Basic Example ===\n");

    let training: Vec<Reading> = [70.0, 71.0, 69.5, 70.5, 72.0, 68.0, 70.2, 69.8]
        .iter()
        .enumerate()
        .map(|(i, &v)| Reading::new("RTU1", "zone_temp", v, i as i64))
        .chain(
            [0.42, 0.40, 0.45, 0.44, 0.41]
                .iter()
                .enumerate()
                .map(|(i, &v)| Reading::new("RTU1", "damper_pos", v, i as i64)),
        )
        .collect();

    let params = fit(&training)?;
    println!("Fitted parameters:");
    for p in &params {
        println!(
            "   ({}, {}): mean={:.3} std={:.3}",
            p.asset_name, p.point_name, p.mean, p.std
        );
    }

    let live = vec![
        Reading::new("RTU1", "zone_temp", 70.4, 100),
        Reading::new("RTU1", "zone_temp", 78.9, 101),
        Reading::new("RTU1", "damper_pos", 0.43, 100),
        Reading::new("RTU1", "damper_pos", 0.95, 101),
    ];
    let classified = classify(&live, &params)?;

    println!("\nClassified readings:");
    for c in &classified {
        println!(
            "   ({}, {}) value={:.2} -> {:?}",
            c.reading.asset_name, c.reading.point_name, c.reading.value, c.label
        );
    }
    println!("\n{} of {} readings flagged", anomaly_count(&classified), classified.len());

    Ok(())
}
