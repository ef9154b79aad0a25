//! Static evaluation table shown next to simulated results
//!
//! These figures describe the offline models the simulation pretends to run.
//! Nothing in this crate computes them.

use crate::models::ModelPerformance;

pub const MODEL_PERFORMANCE: &[ModelPerformance] = &[
    ModelPerformance {
        model: "MLP",
        accuracy: 0.912,
        precision: 0.887,
        recall: 0.869,
        f1: 0.878,
        roc_auc: 0.951,
    },
    ModelPerformance {
        model: "FT-Transformer",
        accuracy: 0.934,
        precision: 0.915,
        recall: 0.896,
        f1: 0.905,
        roc_auc: 0.968,
    },
];

pub fn find_model(name: &str) -> Option<&'static ModelPerformance> {
    MODEL_PERFORMANCE
        .iter()
        .find(|m| m.model.eq_ignore_ascii_case(name))
}
