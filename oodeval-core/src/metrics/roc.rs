use crate::error::OodError;
use crate::metrics::scores::ScoreSource;
use log::debug;
use std::cmp::Ordering;

/// ROC curve of an OOD detector, plus the area under it.
///
/// `fpr[i]` and `tpr[i]` are the rates obtained when every item scoring at
/// least `thresholds[i]` is flagged as OOD. Thresholds decrease; the first
/// one is `+inf` so the curve always starts at `(0, 0)` and ends at `(1, 1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct RocCurve {
    pub fpr: Vec<f64>,
    pub tpr: Vec<f64>,
    pub thresholds: Vec<f64>,
    pub auc: f64,
}

impl RocCurve {
    /// Splits the curve into the `(fpr, tpr, auc)` triple.
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>, f64) {
        (self.fpr, self.tpr, self.auc)
    }
}

/// Scores ID items against OOD items.
///
/// OOD items are the positive class (label 1) and are placed first, followed
/// by the ID items (label 0). Higher scores are expected to mean "more OOD",
/// as with predictive entropy.
///
/// # Errors
///
/// `EmptyInput` if either side has no scores, `InvalidScore` on a NaN, and
/// whatever the sources themselves report (e.g. a rank-2 tensor).
pub fn compute_roc<I, O>(id_scores: &I, ood_scores: &O) -> Result<RocCurve, OodError>
where
    I: ScoreSource + ?Sized,
    O: ScoreSource + ?Sized,
{
    let id = id_scores.to_scores()?;
    let ood = ood_scores.to_scores()?;
    if id.is_empty() {
        return Err(OodError::EmptyInput("no in-distribution scores".to_string()));
    }
    if ood.is_empty() {
        return Err(OodError::EmptyInput("no out-of-distribution scores".to_string()));
    }
    debug!("compute_roc: {} OOD scores vs {} ID scores", ood.len(), id.len());

    let mut labels = vec![true; ood.len()];
    labels.resize(ood.len() + id.len(), false);
    let mut scores = ood;
    scores.extend(id);

    roc_curve(&labels, &scores)
}

/// Computes the ROC curve for binary `labels` (`true` = positive) and scores.
///
/// Items are visited by decreasing score and tied scores produce a single
/// point. No intermediate points are dropped.
///
/// # Errors
///
/// `ShapeMismatch` on a length mismatch, `InvalidScore` on NaN, and
/// `InvalidArgument` if one of the two classes is absent.
pub fn roc_curve(labels: &[bool], scores: &[f64]) -> Result<RocCurve, OodError> {
    if labels.len() != scores.len() {
        return Err(OodError::ShapeMismatch {
            expected: format!("{} scores", labels.len()),
            actual: format!("{} scores", scores.len()),
            operation: "roc_curve".to_string(),
        });
    }
    if let Some(index) = scores.iter().position(|s| s.is_nan()) {
        return Err(OodError::InvalidScore {
            index,
            value: scores[index],
        });
    }

    let total_pos = labels.iter().filter(|&&l| l).count();
    let total_neg = labels.len() - total_pos;
    if total_pos == 0 || total_neg == 0 {
        return Err(OodError::InvalidArgument(format!(
            "roc_curve needs both classes, got {} positives and {} negatives",
            total_pos, total_neg
        )));
    }

    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[b].partial_cmp(&scores[a]).unwrap_or(Ordering::Equal));

    let p = total_pos as f64;
    let n = total_neg as f64;
    let mut fpr = vec![0.0];
    let mut tpr = vec![0.0];
    let mut thresholds = vec![f64::INFINITY];

    let (mut tp, mut fp) = (0usize, 0usize);
    let mut i = 0;
    while i < order.len() {
        let current = scores[order[i]];
        while i < order.len() && scores[order[i]] == current {
            if labels[order[i]] {
                tp += 1;
            } else {
                fp += 1;
            }
            i += 1;
        }
        fpr.push(fp as f64 / n);
        tpr.push(tp as f64 / p);
        thresholds.push(current);
    }

    let auc = trapezoid_auc(&fpr, &tpr)?;
    Ok(RocCurve {
        fpr,
        tpr,
        thresholds,
        auc,
    })
}

/// Area under a piecewise-linear curve by the trapezoidal rule.
///
/// `x` must be monotonic. A decreasing `x` gives the same area as the
/// reversed curve.
pub fn trapezoid_auc(x: &[f64], y: &[f64]) -> Result<f64, OodError> {
    if x.len() != y.len() {
        return Err(OodError::ShapeMismatch {
            expected: format!("{} y values", x.len()),
            actual: format!("{} y values", y.len()),
            operation: "trapezoid_auc".to_string(),
        });
    }
    if x.len() < 2 {
        return Err(OodError::EmptyInput(
            "at least 2 points are needed to compute an area".to_string(),
        ));
    }
    let increasing = x.windows(2).all(|w| w[1] >= w[0]);
    let decreasing = x.windows(2).all(|w| w[1] <= w[0]);
    if !increasing && !decreasing {
        return Err(OodError::InvalidArgument(
            "x is neither increasing nor decreasing".to_string(),
        ));
    }
    let area: f64 = x
        .windows(2)
        .zip(y.windows(2))
        .map(|(xs, ys)| (xs[1] - xs[0]) * (ys[1] + ys[0]) / 2.0)
        .sum();
    Ok(if increasing { area } else { -area })
}

#[cfg(test)]
#[path = "roc_test.rs"]
mod tests;
