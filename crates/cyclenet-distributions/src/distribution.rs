//! Tagged union of inter-arrival distribution kinds (`spec.md` §4.2).
//!
//! No runtime-type-sniffing (`spec.md` §9 "Distribution factory"): every
//! scenario distribution is one explicit, parameter-validated variant and
//! sampling dispatches on it directly.

use cyclenet_core::SimRng;

use crate::error::{DistributionError, DistributionResult};

/// A configured inter-arrival-time distribution for one origin node.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Distribution {
    /// `λ>0`. Sampler: `-ln(U)/λ`. The scenario-load default when a node has
    /// no configured distribution (`λ=0.5`).
    Exponential { lambda: f64 },
    /// `μ, σ>0`. Box–Muller, truncated at 0.
    Normal { mu: f64, sigma: f64 },
    /// `μ, σ>0`. Sampler: `exp(μ + σ·Z)`.
    Lognormal { mu: f64, sigma: f64 },
    /// `k>0, θ>0`. Marsaglia–Tsang sampler.
    Gamma { shape: f64, scale: f64 },
    /// `k>0, λ>0`. Sampler: `λ·(−ln(U))^(1/k)`.
    Weibull { shape: f64, scale: f64 },
}

impl Distribution {
    /// Default per-node distribution when a scenario leaves one unspecified
    /// (`spec.md` §6: `Distributions` — "Default: exponential(λ=0.5) per
    /// node if absent").
    pub fn default_exponential() -> Self {
        Distribution::Exponential { lambda: 0.5 }
    }

    /// Validate parameters are in-domain. Called once at scenario load
    /// (`reset()`); a failure here is a `spec.md` §7 "Distribution domain"
    /// error and fails `reset()` fast.
    pub fn validate(&self) -> DistributionResult<()> {
        match *self {
            Distribution::Exponential { lambda } => {
                if !(lambda > 0.0) {
                    return Err(DistributionError::InvalidLambda(lambda));
                }
            }
            Distribution::Normal { mu: _, sigma } => {
                require_positive("sigma", sigma)?;
            }
            Distribution::Lognormal { mu: _, sigma } => {
                require_positive("sigma", sigma)?;
            }
            Distribution::Gamma { shape, scale } => {
                require_positive("shape", shape)?;
                require_positive("scale", scale)?;
            }
            Distribution::Weibull { shape, scale } => {
                require_positive("shape", shape)?;
                require_positive("scale", scale)?;
            }
        }
        Ok(())
    }

    /// The distribution's theoretical mean, used only by property tests
    /// (`spec.md` §8 P9) to check sampler fidelity — never consulted by the
    /// simulation itself.
    pub fn mean(&self) -> f64 {
        match *self {
            Distribution::Exponential { lambda } => 1.0 / lambda,
            Distribution::Normal { mu, .. } => mu.max(0.0),
            Distribution::Lognormal { mu, sigma } => (mu + sigma * sigma / 2.0).exp(),
            Distribution::Gamma { shape, scale } => shape * scale,
            Distribution::Weibull { shape, scale } => scale * gamma_fn(1.0 + 1.0 / shape),
        }
    }

    /// The rate implied by this distribution, used by the single-global-
    /// generator compatibility mode (`spec.md` §4.2): "for exponential,
    /// `r_o = λ`; for non-exponential, `r_o = 1/mean`".
    pub fn rate(&self) -> f64 {
        match *self {
            Distribution::Exponential { lambda } => lambda,
            _ => 1.0 / self.mean(),
        }
    }

    /// Draw one inter-arrival sample in seconds, clamped to `>= 0`
    /// (`spec.md` §4.2 step 1: "`Δ<0` is clamped to 0").
    pub fn sample(&self, rng: &mut SimRng) -> f64 {
        let raw = match *self {
            Distribution::Exponential { lambda } => sample_exponential(rng, lambda),
            Distribution::Normal { mu, sigma } => sample_normal(rng, mu, sigma),
            Distribution::Lognormal { mu, sigma } => sample_lognormal(rng, mu, sigma),
            Distribution::Gamma { shape, scale } => sample_gamma(rng, shape, scale),
            Distribution::Weibull { shape, scale } => sample_weibull(rng, shape, scale),
        };
        raw.max(0.0)
    }
}

fn require_positive(param: &'static str, value: f64) -> DistributionResult<()> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(DistributionError::InvalidParam { param, value })
    }
}

// ── Samplers ────────────────────────────────────────────────────────────────

fn sample_exponential(rng: &mut SimRng, lambda: f64) -> f64 {
    let u = rng.uniform01().max(f64::MIN_POSITIVE);
    -u.ln() / lambda
}

/// Box–Muller transform, truncated at 0 (negative draws clamped by the
/// caller in [`Distribution::sample`]).
fn sample_normal(rng: &mut SimRng, mu: f64, sigma: f64) -> f64 {
    let u1 = rng.uniform01().max(f64::MIN_POSITIVE);
    let u2 = rng.uniform01();
    let z = (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos();
    mu + sigma * z
}

fn sample_lognormal(rng: &mut SimRng, mu: f64, sigma: f64) -> f64 {
    let z = sample_normal(rng, 0.0, 1.0);
    (mu + sigma * z).exp()
}

/// Marsaglia–Tsang method, valid for `shape >= 1`; shapes in `(0,1)` are
/// boosted via the standard `Gamma(k+1) * U^(1/k)` trick.
fn sample_gamma(rng: &mut SimRng, shape: f64, scale: f64) -> f64 {
    if shape < 1.0 {
        let g = sample_gamma(rng, shape + 1.0, 1.0);
        let u = rng.uniform01().max(f64::MIN_POSITIVE);
        return g * u.powf(1.0 / shape) * scale;
    }

    let d = shape - 1.0 / 3.0;
    let c = 1.0 / (9.0 * d).sqrt();

    loop {
        let (x, v) = loop {
            let z = sample_normal(rng, 0.0, 1.0);
            let v = (1.0 + c * z).powi(3);
            if v > 0.0 {
                break (z, v);
            }
        };

        let u = rng.uniform01().max(f64::MIN_POSITIVE);
        let d_v = d * v;
        if u < 1.0 - 0.0331 * x.powi(4) {
            return d_v * scale;
        }
        if u.ln() < 0.5 * x * x + d * (1.0 - v + v.ln()) {
            return d_v * scale;
        }
    }
}

fn sample_weibull(rng: &mut SimRng, shape: f64, scale: f64) -> f64 {
    let u = rng.uniform01().max(f64::MIN_POSITIVE);
    scale * (-u.ln()).powf(1.0 / shape)
}

/// Minimal Lanczos-approximation Gamma function, sufficient for the P9 mean
/// check on `Weibull::mean()`. Not exposed outside this crate.
fn gamma_fn(x: f64) -> f64 {
    const G: f64 = 7.0;
    const COEFFS: [f64; 9] = [
        0.999_999_999_999_809_93,
        676.520_368_121_885_1,
        -1_259.139_216_722_402_8,
        771.323_428_777_653_1,
        -176.615_029_162_140_6,
        12.507_343_278_686_905,
        -0.138_571_095_265_720_12,
        9.984_369_578_019_572e-6,
        1.505_632_735_149_311_6e-7,
    ];

    if x < 0.5 {
        std::f64::consts::PI / ((std::f64::consts::PI * x).sin() * gamma_fn(1.0 - x))
    } else {
        let x = x - 1.0;
        let mut a = COEFFS[0];
        let t = x + G + 0.5;
        for (i, coeff) in COEFFS.iter().enumerate().skip(1) {
            a += coeff / (x + i as f64);
        }
        (std::f64::consts::TAU).sqrt() * t.powf(x + 0.5) * (-t).exp() * a
    }
}
