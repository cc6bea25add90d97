//! Full match pipeline and the process-wide model singletons.
//!
//! A [`MatchEngine`] owns the sentence encoder and the phrase extractor. Both
//! load once and are read-only afterwards, so one engine serves every request.

mod error;


pub use error::MatchError;

use std::sync::{Arc, OnceLock};

use tracing::{info, instrument};

use crate::config::Config;
use crate::embedding::{EncoderConfig, SentenceEncoder};
use crate::jobs::JobTable;
use crate::phrases::{PhraseConfig, PhraseExtractor};
use crate::report::MatchReport;
use crate::resume::{ResumeDocument, extract_pdf_text};
use crate::scoring::{MatchScorer, ScoringWeights, rank};

static GLOBAL_ENGINE: OnceLock<Arc<MatchEngine>> = OnceLock::new();

/// Resume-to-postings matcher.
#[derive(Debug)]
pub struct MatchEngine {
    scorer: MatchScorer,
    default_top_k: usize,
}

impl MatchEngine {
    /// Loads both models. An absent encoder must be requested explicitly via a
    /// stub [`EncoderConfig`].
    pub fn load(
        encoder: EncoderConfig,
        phrases: PhraseConfig,
        default_top_k: usize,
    ) -> Result<Self, MatchError> {
        let encoder = SentenceEncoder::load(encoder)?;
        let phrases = PhraseExtractor::load(phrases)?;

        info!(
            encoder = encoder.mode(),
            phrase_pipeline = %phrases.mode(),
            default_top_k,
            "Match engine loaded"
        );

        Ok(Self::from_parts(
            Arc::new(encoder),
            Arc::new(phrases),
            default_top_k,
        ))
    }

    /// Loads the engine described by service configuration.
    pub fn from_config(config: &Config) -> Result<Self, MatchError> {
        Self::load(config.encoder_config(), config.phrase_config(), config.top_k)
    }

    /// Stub encoder plus lexicon phrases; needs no model files.
    pub fn stub() -> Result<Self, MatchError> {
        Self::load(
            EncoderConfig::stub(),
            PhraseConfig::lexicon(),
            crate::constants::DEFAULT_TOP_K,
        )
    }

    pub fn from_parts(
        encoder: Arc<SentenceEncoder>,
        phrases: Arc<PhraseExtractor>,
        default_top_k: usize,
    ) -> Self {
        Self {
            scorer: MatchScorer::new(encoder, phrases),
            default_top_k: default_top_k.max(1),
        }
    }

    pub fn with_weights(mut self, weights: ScoringWeights) -> Result<Self, MatchError> {
        self.scorer = self.scorer.with_weights(weights)?;
        Ok(self)
    }

    /// Installs the process-wide engine. Returns the engine already installed
    /// if another caller got there first.
    pub fn install_global(engine: MatchEngine) -> Arc<MatchEngine> {
        GLOBAL_ENGINE.get_or_init(|| Arc::new(engine)).clone()
    }

    /// The process-wide engine, if installed.
    pub fn global() -> Option<Arc<MatchEngine>> {
        GLOBAL_ENGINE.get().cloned()
    }

    /// Returns the installed engine, loading it with `init` on first use.
    pub fn global_or_try_init<F>(init: F) -> Result<Arc<MatchEngine>, MatchError>
    where
        F: FnOnce() -> Result<MatchEngine, MatchError>,
    {
        if let Some(engine) = Self::global() {
            return Ok(engine);
        }
        Ok(Self::install_global(init()?))
    }

    pub fn default_top_k(&self) -> usize {
        self.default_top_k
    }

    pub fn encoder(&self) -> &SentenceEncoder {
        self.scorer.encoder()
    }

    pub fn phrases(&self) -> &PhraseExtractor {
        self.scorer.phrases()
    }

    /// Extracts, cleans and phrase-tags a PDF resume.
    pub fn read_resume_pdf(&self, pdf: &[u8]) -> Result<ResumeDocument, MatchError> {
        let text = extract_pdf_text(pdf)?;
        self.read_resume_text(text)
    }

    pub fn read_resume_text(&self, text: impl Into<String>) -> Result<ResumeDocument, MatchError> {
        Ok(ResumeDocument::from_text(text, self.phrases())?)
    }

    /// Scores and ranks every posting against the resume.
    #[instrument(skip_all, fields(postings = jobs.len(), skills = resume.skills.len()))]
    pub fn match_jobs(
        &self,
        resume: &ResumeDocument,
        jobs: &JobTable,
        top_k: Option<usize>,
    ) -> Result<MatchReport, MatchError> {
        let top_k = top_k.unwrap_or(self.default_top_k);
        let scored = self
            .scorer
            .score_table(&resume.cleaned_text, &resume.skills, jobs)?;
        let matches = rank(scored, top_k);

        info!(returned = matches.len(), top_k, "Match complete");

        Ok(MatchReport {
            matches,
            top_k,
            postings_scored: jobs.len(),
            resume_skills: resume.skills.len(),
            encoder: self.encoder().mode(),
            phrase_pipeline: self.phrases().mode(),
        })
    }

    /// PDF resume plus CSV postings to a ranked report.
    pub fn run_pdf(
        &self,
        resume_pdf: &[u8],
        jobs_csv: &[u8],
        top_k: Option<usize>,
    ) -> Result<MatchReport, MatchError> {
        let resume = self.read_resume_pdf(resume_pdf)?;
        let jobs = JobTable::from_csv(jobs_csv)?;
        self.match_jobs(&resume, &jobs, top_k)
    }

    /// Plain-text resume plus CSV postings to a ranked report.
    pub fn run_text(
        &self,
        resume_text: &str,
        jobs_csv: &[u8],
        top_k: Option<usize>,
    ) -> Result<MatchReport, MatchError> {
        let resume = self.read_resume_text(resume_text)?;
        let jobs = JobTable::from_csv(jobs_csv)?;
        self.match_jobs(&resume, &jobs, top_k)
    }
}
