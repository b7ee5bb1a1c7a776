use crate::error::AnalyzerError;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Plain and zero-bounded extremes of the alpha and beta values, used for
/// axis scaling and color normalization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Extrema {
    pub min_alpha: f64,
    pub max_alpha: f64,
    pub min_beta: f64,
    pub max_beta: f64,
    /// `min(min_alpha, min_beta, 0)`.
    pub min: f64,
    /// `max(max_alpha, max_beta, 0)`.
    pub max: f64,
}

impl Extrema {
    pub fn from_values(alphas: &[f64], betas: &[f64]) -> Result<Self, AnalyzerError> {
        let (min_alpha, max_alpha) = find_min_max(alphas).ok_or(AnalyzerError::EmptyInput)?;
        let (min_beta, max_beta) = find_min_max(betas).ok_or(AnalyzerError::EmptyInput)?;

        Ok(Self {
            min_alpha,
            max_alpha,
            min_beta,
            max_beta,
            min: min_alpha.min(min_beta).min(0.0),
            max: max_alpha.max(max_beta).max(0.0),
        })
    }

    /// Value-axis limits with `padding` applied to both zero-bounded extremes.
    pub fn axis_limits(&self, padding: f64) -> (f64, f64) {
        (self.min * padding, self.max * padding)
    }

    /// Vertical gap between a bar end and its value label.
    pub fn label_offset(&self) -> f64 {
        0.02 * (self.max - self.min)
    }
}

/// Benchmarks in presentation order with their betas and alphas aligned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedResult {
    pub labels: Vec<String>,
    pub betas: Vec<f64>,
    pub alphas: Vec<f64>,
    pub extrema: Extrema,
}

impl RankedResult {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Orders benchmarks by descending beta, breaking ties by descending label,
/// and reindexes the alphas to match.
///
/// The comparison is a total order over `(beta, label)`, so identical inputs
/// always produce identical output.
pub fn rank(
    betas: &BTreeMap<String, f64>,
    alphas: &BTreeMap<String, f64>,
) -> Result<RankedResult, AnalyzerError> {
    if betas.is_empty() {
        return Err(AnalyzerError::EmptyInput);
    }

    let mut ordered: Vec<(&String, f64)> = betas.iter().map(|(label, beta)| (label, *beta)).collect();
    ordered.sort_by(|a, b| compare_desc(a, b));

    let mut labels = Vec::with_capacity(ordered.len());
    let mut sorted_betas = Vec::with_capacity(ordered.len());
    let mut sorted_alphas = Vec::with_capacity(ordered.len());
    for (label, beta) in ordered {
        let alpha = alphas
            .get(label)
            .copied()
            .ok_or_else(|| AnalyzerError::MissingAlpha(label.clone()))?;
        labels.push(label.clone());
        sorted_betas.push(beta);
        sorted_alphas.push(alpha);
    }

    let extrema = Extrema::from_values(&sorted_alphas, &sorted_betas)?;

    Ok(RankedResult {
        labels,
        betas: sorted_betas,
        alphas: sorted_alphas,
        extrema,
    })
}

fn compare_desc(a: &(&String, f64), b: &(&String, f64)) -> Ordering {
    b.1.total_cmp(&a.1).then_with(|| b.0.cmp(a.0))
}

fn find_min_max(values: &[f64]) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }
    Some(
        values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), &val| {
                (min.min(val), max.max(val))
            }),
    )
}
