use std::sync::Arc;

use tracing::{debug, info};

use crate::embedding::SentenceEncoder;
use crate::jobs::{JobPosting, JobTable};
use crate::phrases::{PhraseExtractor, PhraseSet};

use super::error::ScoringError;
use super::types::{MatchResult, ScoringWeights};

/// Cosine similarity clamped to `[-1, 1]`. A zero vector scores `0`.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f64, ScoringError> {
    if a.len() != b.len() {
        return Err(ScoringError::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (x, y) in a.iter().zip(b) {
        let (x, y) = (f64::from(*x), f64::from(*y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 || !denom.is_finite() {
        return Ok(0.0);
    }

    let similarity = dot / denom;
    if similarity.is_nan() {
        return Ok(0.0);
    }
    Ok(similarity.clamp(-1.0, 1.0))
}

/// Fraction of `job_keywords` also present in `resume_skills`; `0` when the job has none.
pub fn skill_overlap(resume_skills: &PhraseSet, job_keywords: &PhraseSet) -> f64 {
    if job_keywords.is_empty() {
        return 0.0;
    }
    let shared = job_keywords.intersection(resume_skills).count();
    shared as f64 / job_keywords.len() as f64
}

/// Scores postings against one resume.
pub struct MatchScorer {
    encoder: Arc<SentenceEncoder>,
    phrases: Arc<PhraseExtractor>,
    weights: ScoringWeights,
}

impl std::fmt::Debug for MatchScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchScorer")
            .field("encoder", &self.encoder)
            .field("phrases", &self.phrases.mode())
            .field("weights", &self.weights)
            .finish()
    }
}

impl MatchScorer {
    pub fn new(encoder: Arc<SentenceEncoder>, phrases: Arc<PhraseExtractor>) -> Self {
        Self {
            encoder,
            phrases,
            weights: ScoringWeights::default(),
        }
    }

    pub fn with_weights(mut self, weights: ScoringWeights) -> Result<Self, ScoringError> {
        weights.validate()?;
        self.weights = weights;
        Ok(self)
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn encoder(&self) -> &SentenceEncoder {
        &self.encoder
    }

    pub fn phrases(&self) -> &PhraseExtractor {
        &self.phrases
    }

    /// Scores a single posting.
    pub fn score_job(
        &self,
        resume_text: &str,
        resume_skills: &PhraseSet,
        job: &JobPosting,
    ) -> Result<MatchResult, ScoringError> {
        let resume_embedding = self.encoder.encode(resume_text)?;
        let job_embedding = self.encoder.encode(&job.description)?;
        self.score_embedded(&resume_embedding, resume_skills, job, &job_embedding)
    }

    /// Scores every posting in table order. The resume is encoded once and all
    /// descriptions in one batch.
    pub fn score_table(
        &self,
        resume_text: &str,
        resume_skills: &PhraseSet,
        jobs: &JobTable,
    ) -> Result<Vec<MatchResult>, ScoringError> {
        if jobs.is_empty() {
            debug!("No postings to score");
            return Ok(vec![]);
        }

        let resume_embedding = self.encoder.encode(resume_text)?;
        let descriptions: Vec<&str> = jobs.iter().map(|job| job.description.as_str()).collect();
        let job_embeddings = self.encoder.encode_batch(&descriptions)?;

        let results = jobs
            .iter()
            .zip(&job_embeddings)
            .map(|(job, embedding)| {
                self.score_embedded(&resume_embedding, resume_skills, job, embedding)
            })
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            postings = results.len(),
            resume_skills = resume_skills.len(),
            "Scored postings"
        );
        Ok(results)
    }

    fn score_embedded(
        &self,
        resume_embedding: &[f32],
        resume_skills: &PhraseSet,
        job: &JobPosting,
        job_embedding: &[f32],
    ) -> Result<MatchResult, ScoringError> {
        let semantic_score = cosine_similarity(resume_embedding, job_embedding)?;
        let job_keywords = self.phrases.extract(&job.description)?;
        let skill_score = skill_overlap(resume_skills, &job_keywords);

        debug!(
            title = %job.title,
            semantic_score,
            skill_score,
            job_keywords = job_keywords.len(),
            "Scored posting"
        );

        Ok(MatchResult::from_scores(
            job.title.as_str(),
            semantic_score,
            skill_score,
            &self.weights,
        ))
    }
}
