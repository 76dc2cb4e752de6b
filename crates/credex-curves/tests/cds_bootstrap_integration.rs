//! Integration test: bootstrap a hazard curve from a CDS term structure.
//!
//! Market data: ten-tenor CDS spread curve with a quarterly zero curve out
//! to 30 years.
//!
//! | Tenor | Spread (bp) |
//! |-------|-------------|
//! | 6M    | 24.130      |
//! | 1Y    | 30.280      |
//! | 2Y    | 40.800      |
//! | 3Y    | 51.230      |
//! | 4Y    | 61.900      |
//! | 5Y    | 72.590      |
//! | 7Y    | 85.030      |
//! | 10Y   | 95.670      |
//! | 20Y   | 106.920     |
//! | 30Y   | 115.570     |

use approx::assert_relative_eq;
use proptest::prelude::*;

use credex_curves::prelude::*;

const CDS_TENORS: [f64; 10] = [0.5, 1.0, 2.0, 3.0, 4.0, 5.0, 7.0, 10.0, 20.0, 30.0];

const CDS_SPREADS_BPS: [f64; 10] = [
    24.130, 30.280, 40.800, 51.230, 61.900, 72.590, 85.030, 95.670, 106.920, 115.570,
];

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

fn yield_tenors() -> Vec<f64> {
    (1..=YIELD_RATES.len()).map(|i| i as f64 * 0.25).collect()
}

fn cds_spreads() -> Vec<f64> {
    CDS_SPREADS_BPS.iter().map(|bp| bp / 10_000.0).collect()
}

fn sample_discount_curve() -> DiscountCurve {
    DiscountCurve::new(yield_tenors(), YIELD_RATES.to_vec()).unwrap()
}

fn sample_bootstrapper() -> CdsBootstrapper {
    CdsBootstrapper::new(sample_discount_curve())
        .add_quotes(CdsQuote::from_arrays(&CDS_TENORS, &cds_spreads()).unwrap())
        .with_premium_frequency(4)
        .with_recovery_rate(0.4)
}

/// Hazard rates for the sample term structure, rounded to 8 decimals.
const EXPECTED_HAZARDS: [f64; 10] = [
    0.00402167, 0.00609290, 0.00872390, 0.01261168, 0.01690757, 0.02140114, 0.02176151,
    0.02337607, 0.02462189, 0.04441764,
];

/// Survival probabilities at each sample tenor.
const EXPECTED_SURVIVAL: [f64; 10] = [
    0.9979911854, 0.9949554815, 0.9863133408, 0.9739523826, 0.9576236432, 0.9373471495,
    0.8974260164, 0.8366471981, 0.6540498514, 0.4194763610,
];

/// Premium and protection PVs of the quote ending at `tenors[last]`,
/// accumulated quarter by quarter from the solved hazards.
fn quarterly_legs(
    hazards: &[f64],
    tenors: &[f64],
    spread: f64,
    discount: &DiscountCurve,
    last: usize,
) -> (f64, f64) {
    let (mut premium, mut protection) = (0.0, 0.0);
    let (mut start, mut accrued): (f64, f64) = (0.0, 0.0);

    for (&end, &h) in tenors.iter().zip(hazards).take(last + 1) {
        let periods = ((end - start) * 4.0).round() as usize;
        let step = (end - start) / periods as f64;
        let mut s_prev = (-accrued).exp();
        for k in 1..=periods {
            let t = start + step * k as f64;
            let s_curr = (-accrued - h * (t - start)).exp();
            let df = discount.discount_factor(t);
            premium += spread * 0.25 * df * 0.5 * (s_prev + s_curr);
            protection += df * 0.6 * (s_prev - s_curr);
            s_prev = s_curr;
        }
        accrued += h * (end - start);
        start = end;
    }
    (premium, protection)
}

#[test]
fn test_single_tenor_scenario() {
    let (hazards, survival) =
        bootstrap_hazard_curve(&[1.0], &[0.01], &[1.0], &[0.02], 4, 0.4).unwrap();

    assert_relative_eq!(hazards[0], 0.01667, epsilon = 1e-4);
    assert_relative_eq!(survival[0], 0.9835, epsilon = 1e-4);
}

#[test]
fn test_three_tenor_monotonic_spreads() {
    let (hazards, survival) = bootstrap_hazard_curve(
        &[1.0, 2.0, 3.0],
        &[0.0100, 0.0150, 0.0200],
        &[1.0, 3.0],
        &[0.02, 0.02],
        4,
        0.4,
    )
    .unwrap();

    assert!(hazards.windows(2).all(|w| w[1] >= w[0]), "{hazards:?}");
    assert!(survival.windows(2).all(|w| w[1] < w[0]), "{survival:?}");
}

#[test]
fn test_malformed_input_rejected_before_solving() {
    let err = bootstrap_hazard_curve(
        &[1.0, 2.0, 3.0, 4.0, 5.0],
        &[0.01, 0.02, 0.03, 0.04],
        &yield_tenors(),
        &YIELD_RATES,
        4,
        0.4,
    )
    .unwrap_err();

    assert!(err.is_validation_error());
    assert!(matches!(
        err,
        CurveError::LengthMismatch {
            expected: 5,
            actual: 4,
            ..
        }
    ));
}

#[test]
fn test_sample_term_structure() {
    let result = sample_bootstrapper().bootstrap_validated().unwrap();
    let curve = result.curve();

    println!("=== BOOTSTRAPPED HAZARD CURVE ===");
    for (segment, survival) in curve.segments().iter().zip(curve.survival_probabilities()) {
        println!(
            "{:>5.2}Y  h={:.8}  S={:.8}",
            segment.end, segment.hazard_rate, survival
        );
    }
    println!("{}", result.repricing_report);

    assert_eq!(curve.len(), CDS_TENORS.len());
    assert_eq!(curve.tenors(), CDS_TENORS.to_vec());
    assert!(curve.hazard_rates().iter().all(|&h| h >= 0.0));

    let survival = curve.survival_probabilities();
    assert!(survival.iter().all(|&s| s > 0.0 && s <= 1.0));
    assert!(survival.windows(2).all(|w| w[1] <= w[0]));

    for (i, (h, s)) in curve.hazard_rates().iter().zip(survival).enumerate() {
        assert_relative_eq!(*h, EXPECTED_HAZARDS[i], epsilon = 1e-9);
        assert_relative_eq!(*s, EXPECTED_SURVIVAL[i], epsilon = 1e-9);
    }

    assert!(
        result.is_valid(),
        "Max error: {:.2e}, failed: {:?}",
        result.max_error(),
        result.failed_instruments()
    );
}

#[test]
fn test_forward_consistency() {
    let discount = sample_discount_curve();
    let curve = sample_bootstrapper().bootstrap().unwrap();
    let hazards = curve.hazard_rates();

    for (i, spread) in cds_spreads().into_iter().enumerate() {
        let (premium, protection) = quarterly_legs(&hazards, &CDS_TENORS, spread, &discount, i);
        let diff = (premium - protection).abs();
        assert!(diff < 1e-6, "tenor {} misprices by {diff:.3e}", CDS_TENORS[i]);
    }
}

#[test]
fn test_bisection_solver_reproduces_sample() {
    let curve = sample_bootstrapper()
        .with_solver(HazardSolverMethod::Bisection)
        .bootstrap()
        .unwrap();

    for (h, expected) in curve.hazard_rates().iter().zip(EXPECTED_HAZARDS) {
        assert_relative_eq!(*h, expected, epsilon = 2e-8);
    }
}

#[test]
fn test_determinism() {
    let first = sample_bootstrapper().bootstrap().unwrap();
    let second = sample_bootstrapper().bootstrap().unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_array_entry_point_matches_builder() {
    let (hazards, survival) = bootstrap_hazard_curve(
        &CDS_TENORS,
        &cds_spreads(),
        &yield_tenors(),
        &YIELD_RATES,
        4,
        0.4,
    )
    .unwrap();
    let curve = sample_bootstrapper().bootstrap().unwrap();

    assert_eq!(hazards, curve.hazard_rates());
    assert_eq!(survival, curve.survival_probabilities().to_vec());
}

#[test]
fn test_curve_queries_on_sample() {
    let curve = sample_bootstrapper().bootstrap().unwrap();

    // Tenor nodes agree with the stored survival array
    for (i, &tenor) in CDS_TENORS.iter().enumerate() {
        assert_relative_eq!(
            curve.survival_probability(tenor).unwrap(),
            curve.survival_probabilities()[i],
            epsilon = 1e-12
        );
    }

    let pd_5y = curve.default_probability(5.0).unwrap();
    let pd_10y = curve.default_probability(10.0).unwrap();
    assert!(pd_10y > pd_5y);

    let marginal = curve.marginal_default_probability(5.0, 10.0).unwrap();
    assert_relative_eq!(marginal, pd_10y - pd_5y, epsilon = 1e-12);

    // Flat beyond the last tenor
    assert_relative_eq!(
        curve.hazard_rate_at(40.0).unwrap(),
        curve.hazard_rates()[9],
        epsilon = 1e-15
    );
}

#[test]
fn test_curve_json_roundtrip() {
    let curve = sample_bootstrapper().bootstrap().unwrap();

    let json = serde_json::to_string(&curve).unwrap();
    let restored: HazardCurve = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.len(), curve.len());
    for (a, b) in restored.hazard_rates().iter().zip(curve.hazard_rates()) {
        assert_relative_eq!(*a, b, epsilon = 1e-15);
    }
}

#[test]
fn test_minimize_solver_matches_default() {
    let brent = sample_bootstrapper().bootstrap().unwrap();
    let minimize = sample_bootstrapper()
        .with_solver(HazardSolverMethod::Minimize)
        .bootstrap()
        .unwrap();

    for (a, b) in brent.hazard_rates().iter().zip(minimize.hazard_rates()) {
        assert_relative_eq!(*a, b, epsilon = 1e-7);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_increasing_spreads_give_valid_curve(
        base_bps in 10.0f64..200.0,
        steps in prop::collection::vec(0.0f64..30.0, 4),
        rate in 0.0f64..0.08,
        recovery in 0.0f64..0.8,
    ) {
        let tenors = [1.0, 2.0, 3.0, 5.0, 7.0];
        let mut spreads = vec![base_bps / 10_000.0];
        for step in &steps {
            let last = spreads[spreads.len() - 1];
            spreads.push(last + step / 10_000.0);
        }

        let (hazards, survival) =
            bootstrap_hazard_curve(&tenors, &spreads, &[1.0], &[rate], 4, recovery).unwrap();

        prop_assert!(hazards.iter().all(|&h| h >= 0.0));
        prop_assert!(survival.iter().all(|&s| s > 0.0 && s <= 1.0));
        prop_assert!(survival.windows(2).all(|w| w[1] <= w[0]));
    }
}
