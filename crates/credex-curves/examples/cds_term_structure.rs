//! CDS Term Structure Example
//!
//! Bootstraps a piecewise-constant hazard curve from a ten-tenor CDS spread
//! curve, discounting on a quarterly zero curve out to 30 years, and prints
//! the hazard rates, survival probabilities and repricing report.
//!
//! Run with: cargo run --example cds_term_structure
//!
//! Set `RUST_LOG=credex_curves=debug` to see each tenor as it is solved.

use credex_curves::prelude::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// CDS tenors in years.
const CDS_TENORS: [f64; 10] = [0.5, 1.0, 2.0, 3.0, 4.0, 5.0, 7.0, 10.0, 20.0, 30.0];

/// CDS par spreads in basis points.
const CDS_SPREADS_BPS: [f64; 10] = [
    24.130, 30.280, 40.800, 51.230, 61.900, 72.590, 85.030, 95.670, 106.920, 115.570,
];

/// Continuously compounded zero rates at 0.25Y, 0.50Y, ..., 30.00Y.
const YIELD_RATES: [f64; 120] = [
    0.0247, 0.0265, 0.0308, 0.0323, 0.0504, 0.0613, 0.0682, 0.0726, 0.0756, 0.0775, 0.0789,
    0.0797, 0.0803, 0.0808, 0.0811, 0.0813, 0.0815, 0.0816, 0.0818, 0.0820, 0.0822, 0.0824,
    0.0827, 0.0830, 0.0833, 0.0836, 0.0840, 0.0844, 0.0848, 0.0852, 0.0857, 0.0862, 0.0867,
    0.0872, 0.0877, 0.0882, 0.0888, 0.0893, 0.0899, 0.0905, 0.0910, 0.0916, 0.0922, 0.0928,
    0.0933, 0.0939, 0.0945, 0.0950, 0.0956, 0.0961, 0.0967, 0.0972, 0.0977, 0.0982, 0.0987,
    0.0992, 0.0996, 0.1001, 0.1005, 0.1010, 0.1014, 0.1018, 0.1021, 0.1025, 0.1028, 0.1031,
    0.1034, 0.1037, 0.1039, 0.1042, 0.1044, 0.1045, 0.1047, 0.1048, 0.1049, 0.1050, 0.1051,
    0.1051, 0.1051, 0.1051, 0.1051, 0.1050, 0.1049, 0.1048, 0.1047, 0.1045, 0.1043, 0.1041,
    0.1039, 0.1036, 0.1033, 0.1030, 0.1027, 0.1024, 0.1020, 0.1016, 0.1012, 0.1008, 0.1003,
    0.0998, 0.0994, 0.0989, 0.0983, 0.0978, 0.0973, 0.0967, 0.0961, 0.0956, 0.0950, 0.0944,
    0.0938, 0.0932, 0.0925, 0.0919, 0.0913, 0.0906, 0.0900, 0.0894, 0.0887, 0.0881,
];

fn main() -> CurveResult<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let yield_tenors: Vec<f64> = (1..=YIELD_RATES.len()).map(|i| i as f64 * 0.25).collect();
    let discount = DiscountCurve::new(yield_tenors, YIELD_RATES.to_vec())?;

    let quotes = CDS_TENORS
        .iter()
        .zip(CDS_SPREADS_BPS)
        .map(|(&tenor, bps)| CdsQuote::from_bps(tenor, bps))
        .collect::<CurveResult<Vec<_>>>()?;

    let config = BootstrapConfig::default()
        .with_premium_frequency(4)
        .with_recovery_rate(0.4);

    let result = CdsBootstrapper::new(discount)
        .add_quotes(quotes)
        .with_config(config)
        .bootstrap_validated()?;

    println!("╔══════════════════════════════════════════════════════╗");
    println!("║            BOOTSTRAPPED HAZARD CURVE                 ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();
    println!("{:>8} {:>12} {:>14} {:>14}", "Tenor", "Spread", "Hazard", "Survival");
    println!("{}", "-".repeat(52));

    let curve = result.curve();
    for (i, segment) in curve.segments().iter().enumerate() {
        println!(
            "{:>7.2}Y {:>10.3}bp {:>14.8} {:>14.8}",
            segment.end,
            CDS_SPREADS_BPS[i],
            segment.hazard_rate,
            curve.survival_probabilities()[i],
        );
    }

    println!();
    println!("5Y default probability:  {:.4}%", curve.default_probability(5.0)? * 100.0);
    println!("10Y default probability: {:.4}%", curve.default_probability(10.0)? * 100.0);
    println!();
    println!("{result}");

    Ok(())
}
