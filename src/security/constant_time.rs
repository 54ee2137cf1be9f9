/*!
 * Constant-Time Verification Framework
 *
 * Timing harness that runs an operation on two classes of inputs and checks
 * that the class cannot be distinguished from the execution time. Used to
 * check that GCM tag verification does not depend on where a mismatch is.
 */

use crate::error::{error_codes, CryptoError, CryptoResult};
use crate::gcm::tag::verify_tag;
use crate::gcm::DEFAULT_TAG_SIZE;
use std::hint::black_box;
use std::time::{Duration, Instant};

/// Input class fed to the operation under test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimingClass {
    /// Inputs that differ from the reference early
    Early,
    /// Inputs that differ from the reference late
    Late,
}

/// Statistical tests for timing analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatisticalTest {
    /// Welch's t-test on the class means
    WelchTTest,
    /// Two-sample Kolmogorov-Smirnov test on the class distributions
    KolmogorovSmirnov,
}

/// Configuration for constant-time testing
#[derive(Debug, Clone)]
pub struct ConstantTimeConfig {
    /// Measured iterations, split evenly between the two classes
    pub iterations: usize,
    pub warmup_iterations: usize,
    /// Largest accepted difference between the class medians
    pub max_variance_threshold: Duration,
    pub statistical_test: StatisticalTest,
    /// Welch |t| above this value is treated as a leak
    pub t_threshold: f64,
    /// KS significance level
    pub alpha: f64,
    /// Fraction of the slowest samples dropped before analysis
    pub crop_fraction: f64,
}

impl Default for ConstantTimeConfig {
    fn default() -> Self {
        Self {
            iterations: 20_000,
            warmup_iterations: 1_000,
            max_variance_threshold: Duration::from_nanos(100),
            statistical_test: StatisticalTest::WelchTTest,
            t_threshold: 4.5,
            alpha: 0.001,
            crop_fraction: 0.05,
        }
    }
}

/// Result of constant-time verification
#[derive(Debug, Clone)]
pub struct ConstantTimeResult {
    pub is_constant_time: bool,
    pub samples_per_class: usize,
    pub mean_early_ns: f64,
    pub mean_late_ns: f64,
    pub median_difference: Duration,
    /// Welch t or KS D, depending on the configured test
    pub statistic: f64,
    /// Value the statistic was compared against
    pub critical_value: f64,
}

/// Run `operation` on inputs of both classes and analyse the timings.
///
/// Classes alternate so that slow drift of the machine affects both
/// equally. Returns `SideChannelViolation` when the classes are
/// distinguishable.
pub fn verify_constant_time<F, G, T, R>(
    mut operation: F,
    mut input_generator: G,
    config: &ConstantTimeConfig,
) -> CryptoResult<ConstantTimeResult>
where
    F: FnMut(&T) -> R,
    G: FnMut(TimingClass) -> T,
{
    for i in 0..config.warmup_iterations {
        let input = input_generator(class_for(i));
        black_box(operation(&input));
    }

    let mut early = Vec::with_capacity(config.iterations / 2 + 1);
    let mut late = Vec::with_capacity(config.iterations / 2 + 1);

    for i in 0..config.iterations {
        let class = class_for(i);
        let input = input_generator(class);

        std::sync::atomic::compiler_fence(std::sync::atomic::Ordering::SeqCst);
        let start = Instant::now();
        black_box(operation(black_box(&input)));
        let elapsed = start.elapsed();
        std::sync::atomic::compiler_fence(std::sync::atomic::Ordering::SeqCst);

        match class {
            TimingClass::Early => early.push(elapsed),
            TimingClass::Late => late.push(elapsed),
        }
    }

    let result = analyze_timing_classes(&early, &late, config)?;

    if !result.is_constant_time {
        log::warn!(
            "timing classes distinguishable: statistic {:.3} > {:.3}, median difference {}ns",
            result.statistic,
            result.critical_value,
            result.median_difference.as_nanos()
        );
        return Err(CryptoError::SideChannelViolation {
            test_name: "constant_time_verification".to_string(),
            details: format!(
                "statistic {:.3} exceeds {:.3} with median difference {}ns",
                result.statistic,
                result.critical_value,
                result.median_difference.as_nanos()
            ),
            error_code: error_codes::SIDE_CHANNEL_LEAK,
        });
    }

    Ok(result)
}

/// Check that GCM tag verification time does not depend on the position
/// of the first mismatching byte.
pub fn verify_tag_comparison_timing(config: &ConstantTimeConfig) -> CryptoResult<ConstantTimeResult> {
    let reference = [0x5au8; DEFAULT_TAG_SIZE];

    verify_constant_time(
        |candidate: &[u8; DEFAULT_TAG_SIZE]| verify_tag(&reference, candidate).is_ok(),
        |class| {
            let mut candidate = reference;
            match class {
                TimingClass::Early => candidate[0] ^= 0x01,
                TimingClass::Late => candidate[DEFAULT_TAG_SIZE - 1] ^= 0x01,
            }
            candidate
        },
        config,
    )
}

fn class_for(iteration: usize) -> TimingClass {
    if iteration % 2 == 0 {
        TimingClass::Early
    } else {
        TimingClass::Late
    }
}

/// Compare two sets of timing measurements
pub fn analyze_timing_classes(
    early: &[Duration],
    late: &[Duration],
    config: &ConstantTimeConfig,
) -> CryptoResult<ConstantTimeResult> {
    let cutoff = crop_cutoff(early, late, config.crop_fraction);
    let early = below(early, cutoff);
    let late = below(late, cutoff);

    if early.len() < 2 || late.len() < 2 {
        return Err(CryptoError::invalid_parameter(
            "measurements",
            "at least two samples per timing class",
            &format!("{} and {}", early.len(), late.len()),
        ));
    }

    let mean_early = mean(&early);
    let mean_late = mean(&late);
    let median_difference = Duration::from_nanos(median(&early).abs_diff(median(&late)));

    let (statistic, critical_value) = match config.statistical_test {
        StatisticalTest::WelchTTest => (welch_t(&early, &late).abs(), config.t_threshold),
        StatisticalTest::KolmogorovSmirnov => (
            ks_statistic(&early, &late),
            ks_critical_value(early.len(), late.len(), config.alpha),
        ),
    };

    let is_constant_time =
        statistic <= critical_value || median_difference <= config.max_variance_threshold;

    Ok(ConstantTimeResult {
        is_constant_time,
        samples_per_class: early.len().min(late.len()),
        mean_early_ns: mean_early,
        mean_late_ns: mean_late,
        median_difference,
        statistic,
        critical_value,
    })
}

/// Largest sample kept once the slowest `fraction` of both classes is dropped
fn crop_cutoff(a: &[Duration], b: &[Duration], fraction: f64) -> u64 {
    let mut combined: Vec<u64> = a.iter().chain(b).map(to_nanos).collect();
    if combined.is_empty() || fraction <= 0.0 {
        return u64::MAX;
    }
    combined.sort_unstable();

    let keep = ((combined.len() as f64) * (1.0 - fraction.min(1.0))).ceil() as usize;
    combined[keep.clamp(1, combined.len()) - 1]
}

fn below(samples: &[Duration], cutoff: u64) -> Vec<u64> {
    samples
        .iter()
        .map(to_nanos)
        .filter(|&ns| ns <= cutoff)
        .collect()
}

fn to_nanos(d: &Duration) -> u64 {
    u64::try_from(d.as_nanos()).unwrap_or(u64::MAX)
}

fn mean(values: &[u64]) -> f64 {
    values.iter().map(|&v| v as f64).sum::<f64>() / values.len() as f64
}

fn variance(values: &[u64], mean: f64) -> f64 {
    values
        .iter()
        .map(|&v| {
            let diff = v as f64 - mean;
            diff * diff
        })
        .sum::<f64>()
        / (values.len() - 1) as f64
}

fn median(values: &[u64]) -> u64 {
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    sorted[sorted.len() / 2]
}

/// Welch's t statistic for the difference of the two means
fn welch_t(a: &[u64], b: &[u64]) -> f64 {
    let (mean_a, mean_b) = (mean(a), mean(b));
    let se = (variance(a, mean_a) / a.len() as f64 + variance(b, mean_b) / b.len() as f64).sqrt();

    if se == 0.0 {
        if mean_a == mean_b {
            0.0
        } else {
            f64::INFINITY
        }
    } else {
        (mean_a - mean_b) / se
    }
}

/// Two-sample Kolmogorov-Smirnov D statistic
fn ks_statistic(a: &[u64], b: &[u64]) -> f64 {
    let mut a = a.to_vec();
    let mut b = b.to_vec();
    a.sort_unstable();
    b.sort_unstable();

    let (n, m) = (a.len() as f64, b.len() as f64);
    let (mut i, mut j) = (0usize, 0usize);
    let mut d: f64 = 0.0;

    while i < a.len() && j < b.len() {
        let x = a[i].min(b[j]);
        while i < a.len() && a[i] == x {
            i += 1;
        }
        while j < b.len() && b[j] == x {
            j += 1;
        }
        d = d.max((i as f64 / n - j as f64 / m).abs());
    }

    d
}

/// Asymptotic critical value of D for significance `alpha`
fn ks_critical_value(n: usize, m: usize, alpha: f64) -> f64 {
    let (n, m) = (n as f64, m as f64);
    let c = (-0.5 * (alpha / 2.0).ln()).sqrt();
    c * ((n + m) / (n * m)).sqrt()
}
