use serde::Serialize;

use crate::constants::{
    FINAL_SCORE_DECIMALS, SEMANTIC_WEIGHT, SIMILARITY_DECIMALS, SKILL_PERCENT_DECIMALS,
    SKILL_WEIGHT,
};

use super::error::ScoringError;

/// Rounds to `decimals` places, ties to even (`0.125` -> `0.12`). `-0.0` becomes `0.0`.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor + 0.0
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
/// Blend of semantic similarity and skill overlap.
pub struct ScoringWeights {
    pub semantic: f64,
    pub skill: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            semantic: SEMANTIC_WEIGHT,
            skill: SKILL_WEIGHT,
        }
    }
}

impl ScoringWeights {
    pub fn new(semantic: f64, skill: f64) -> Result<Self, ScoringError> {
        let weights = Self { semantic, skill };
        weights.validate()?;
        Ok(weights)
    }

    /// Weights must be finite, non-negative and sum to 1.
    pub fn validate(&self) -> Result<(), ScoringError> {
        for (name, value) in [("semantic", self.semantic), ("skill", self.skill)] {
            if !value.is_finite() || value < 0.0 {
                return Err(ScoringError::InvalidWeights {
                    reason: format!("{name} weight must be a non-negative number, got {value}"),
                });
            }
        }

        let sum = self.semantic + self.skill;
        if (sum - 1.0).abs() > 1e-6 {
            return Err(ScoringError::InvalidWeights {
                reason: format!("weights must sum to 1, got {sum}"),
            });
        }

        Ok(())
    }

    pub fn blend(&self, semantic_score: f64, skill_score: f64) -> f64 {
        self.semantic * semantic_score + self.skill * skill_score
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Rounded scores of one posting.
pub struct MatchResult {
    pub job_title: String,
    /// Cosine similarity, 3 decimals.
    pub similarity_score: f64,
    /// Share of job phrases found in the resume, as a percentage with 2 decimals.
    pub skill_match_percent: f64,
    /// Weighted blend of the unrounded scores, 3 decimals.
    pub final_score: f64,
}

impl MatchResult {
    /// Builds a result from unrounded scores.
    pub fn from_scores(
        job_title: impl Into<String>,
        semantic_score: f64,
        skill_score: f64,
        weights: &ScoringWeights,
    ) -> Self {
        let final_score = weights.blend(semantic_score, skill_score);

        Self {
            job_title: job_title.into(),
            similarity_score: round_to(semantic_score, SIMILARITY_DECIMALS),
            skill_match_percent: round_to(skill_score * 100.0, SKILL_PERCENT_DECIMALS),
            final_score: round_to(final_score, FINAL_SCORE_DECIMALS),
        }
    }
}
