use adherence_core::models::{FeatureVector, PredictionFactor};

use crate::model::LinearModel;

/// Largest contributions by absolute magnitude. Zero contributions are skipped.
pub fn top_factors(model: &LinearModel, features: &FeatureVector, max: usize) -> Vec<PredictionFactor> {
    let mut contributions: Vec<_> = model
        .contributions(features)
        .into_iter()
        .filter(|(_, impact)| *impact != 0.0)
        .collect();
    contributions.sort_by(|a, b| b.1.abs().total_cmp(&a.1.abs()));
    contributions.truncate(max);

    contributions
        .into_iter()
        .map(|(feature, impact)| {
            let direction = if impact > 0.0 { "raises" } else { "lowers" };
            PredictionFactor {
                feature,
                impact,
                description: format!(
                    "{} {} the predicted adherence by {:.1} points",
                    feature.label(),
                    direction,
                    impact.abs() * 100.0
                ),
            }
        })
        .collect()
}
