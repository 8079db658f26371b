//! Calculation pass: raw session input to derived metrics
//!
//! Every function here is total over arbitrary user input. Numeric text
//! that fails to parse degrades to zero and divisions by zero yield zero,
//! so the form always has a defined result to render.

use serde::{Deserialize, Serialize};

use crate::models::{BatchRow, RoastLevel, RoastLevels, Session};

/// Parse free-text numeric input, accepting comma or dot decimal
/// separators. Anything that does not parse to a finite number degrades to
/// zero.
pub fn to_number(text: &str) -> f64 {
    let normalized = text.trim().replace(',', ".");
    match normalized.parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => 0.0,
    }
}

/// Round to two decimal places, ties away from zero.
pub fn round2(n: f64) -> f64 {
    (n * 100.0).round() / 100.0
}

/// A row together with its derived metrics. Recomputed on every pass,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputedRow {
    #[serde(flatten)]
    pub source: BatchRow,
    /// Parsed drop weight in grams
    pub drop_grams: f64,
    /// Charge minus drop, rounded
    pub loss: f64,
    /// Loss as a percentage of charge, rounded; zero when charge is zero
    pub loss_percent: f64,
    pub level: RoastLevel,
}

/// Derived totals across all rows
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aggregates {
    pub total_drop: f64,
    pub avg_drop: f64,
    pub avg_loss_percent: f64,
    /// Cupping consumption; may exceed total drop
    pub total_cupping: f64,
    /// Total drop minus cupping; negative values are kept as a signal
    pub remain_after_cupping: f64,
    /// Charge that leaves the target weight at the observed average loss
    pub suggested_charge: f64,
}

/// Output of one full calculation pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Computation {
    /// Parsed charge weight applied to every row
    pub charge: f64,
    pub items: Vec<ComputedRow>,
    pub aggregates: Aggregates,
}

/// Compute one row's loss metrics against the shared charge weight.
pub fn compute_row(charge: f64, row: &BatchRow, levels: &RoastLevels) -> ComputedRow {
    let drop = to_number(&row.drop_weight);
    let loss = round2(charge - drop);
    let loss_percent = if charge > 0.0 {
        round2((charge - drop) / charge * 100.0)
    } else {
        0.0
    };
    ComputedRow {
        source: row.clone(),
        drop_grams: drop,
        loss,
        loss_percent,
        level: levels.classify(loss_percent),
    }
}

/// Green charge that leaves `target_remain` grams after roasting at
/// `loss_percent` average loss. Zero when the loss rate eats the whole
/// charge (denominator at or below zero).
pub fn suggest_charge_for_target_remain(target_remain: f64, loss_percent: f64) -> f64 {
    let remain_ratio = 1.0 - loss_percent / 100.0;
    if remain_ratio <= 0.0 {
        0.0
    } else {
        target_remain / remain_ratio
    }
}

/// Run the full calculation pass over a session.
///
/// Everything is recomputed from scratch; there is no incremental state.
pub fn compute(session: &Session) -> Computation {
    let charge = to_number(&session.charge);
    let items: Vec<ComputedRow> = session
        .rows
        .iter()
        .map(|row| compute_row(charge, row, &session.levels))
        .collect();

    // Sum the unrounded drops and round once, to avoid accumulating
    // per-row rounding drift.
    let total_drop = round2(items.iter().map(|x| x.drop_grams).sum::<f64>());
    let count = items.len();
    let avg_drop = if count > 0 {
        round2(total_drop / count as f64)
    } else {
        0.0
    };
    let avg_loss_percent = if count > 0 {
        round2(items.iter().map(|x| x.loss_percent).sum::<f64>() / count as f64)
    } else {
        0.0
    };

    let cupping_per_session = to_number(&session.cupping_per_session);
    let total_cupping = if session.per_batch_cupping {
        // One draw per batch that has actually been dropped
        cupping_per_session * items.iter().filter(|x| x.drop_grams > 0.0).count() as f64
    } else {
        cupping_per_session * to_number(&session.cupping_sessions)
    };
    let remain_after_cupping = round2(total_drop - total_cupping);

    let suggested_charge = if avg_loss_percent > 0.0 {
        round2(suggest_charge_for_target_remain(
            to_number(&session.target_remain),
            avg_loss_percent,
        ))
    } else {
        0.0
    };

    Computation {
        charge,
        items,
        aggregates: Aggregates {
            total_drop,
            avg_drop,
            avg_loss_percent,
            total_cupping,
            remain_after_cupping,
            suggested_charge,
        },
    }
}
