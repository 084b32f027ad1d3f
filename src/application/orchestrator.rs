//! AnalysisOrchestrator - Analyze a transcript, degrading to the fallback.
//!
//! The primary extractor runs under a bounded timeout. Any failure (network,
//! timeout, malformed reply) or a missing primary path yields the fallback
//! classification instead. No error crosses `analyze`.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::adapters::ai::provider_from_config;
use crate::adapters::extraction::LlmCriteriaExtractor;
use crate::config::{AppConfig, ConfigError};
use crate::domain::intake::{
    Analysis, AnalysisSource, EmergencyDetector, ExtractionResult, FallbackExtractor, Lexicon,
    Transcript, TranscriptView, Vocabulary,
};
use crate::ports::{CriteriaExtractor, ExtractionError};

/// Default upper bound on one primary extraction.
pub const DEFAULT_PRIMARY_TIMEOUT: Duration = Duration::from_secs(15);

/// Entry point for transcript analysis.
///
/// Stateless between calls: share one instance behind an `Arc` and call
/// `analyze` concurrently on independent transcripts. Dropping the future
/// returned by `analyze` cancels the in-flight primary call.
pub struct AnalysisOrchestrator {
    primary: Option<Arc<dyn CriteriaExtractor>>,
    fallback: FallbackExtractor,
    emergency: EmergencyDetector,
    primary_timeout: Duration,
}

impl AnalysisOrchestrator {
    /// Creates a fallback-only orchestrator over the given lexicon.
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self {
            primary: None,
            fallback: FallbackExtractor::new(Arc::clone(&lexicon)),
            emergency: EmergencyDetector::new(lexicon),
            primary_timeout: DEFAULT_PRIMARY_TIMEOUT,
        }
    }

    /// Sets the primary extractor.
    pub fn with_primary(mut self, primary: Arc<dyn CriteriaExtractor>) -> Self {
        self.primary = Some(primary);
        self
    }

    /// Sets the primary-path timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.primary_timeout = timeout;
        self
    }

    /// Wires vocabulary, provider and timeout from configuration.
    ///
    /// A missing API key is not an error; the result is fallback-only.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration is invalid, the vocabulary
    /// override cannot be loaded or compiled, or the HTTP client cannot be
    /// built.
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let lexicon = match config.analyzer.vocabulary_path {
            Some(ref path) => {
                let vocabulary = Vocabulary::load(path)?;
                Arc::new(Lexicon::compile(&vocabulary)?)
            }
            None => Lexicon::builtin(),
        };

        let mut orchestrator =
            Self::new(lexicon).with_timeout(config.analyzer.primary_timeout());

        if !config.analyzer.primary_enabled {
            debug!("primary extraction disabled by configuration");
            return Ok(orchestrator);
        }

        let provider = provider_from_config(&config.ai)
            .map_err(|e| ConfigError::Provider(e.to_string()))?;

        match provider {
            Some(provider) => {
                let info = provider.provider_info();
                debug!(provider = %info.name, model = %info.model, "primary extraction configured");
                orchestrator = orchestrator.with_primary(Arc::new(LlmCriteriaExtractor::new(provider)));
            }
            None => debug!("no AI credentials configured, running fallback only"),
        }

        Ok(orchestrator)
    }

    /// True when a primary extractor is wired.
    pub fn has_primary(&self) -> bool {
        self.primary.is_some()
    }

    /// The primary-path timeout.
    pub fn primary_timeout(&self) -> Duration {
        self.primary_timeout
    }

    /// Analyzes a transcript.
    ///
    /// A previous analysis is accepted from callers that track the last analysis; every
    /// call recomputes from the full transcript.
    pub async fn analyze(&self, transcript: &Transcript, _previous: Option<&Analysis>) -> Analysis {
        let view = TranscriptView::new(transcript);

        let analysis = match self.primary {
            Some(ref primary) => match self.run_primary(primary.as_ref(), transcript).await {
                Ok(result) => self.primary_analysis(result, &view),
                Err(err) => {
                    warn!(
                        extractor = %primary.name(),
                        error_kind = err.kind(),
                        error = %err,
                        "primary extraction failed, using fallback"
                    );
                    self.fallback_analysis(&view)
                }
            },
            None => {
                debug!("no primary extractor, using fallback");
                self.fallback_analysis(&view)
            }
        };

        log_completed(transcript, &analysis);
        analysis
    }

    /// Analyzes with the deterministic fallback only. Performs no I/O.
    pub fn analyze_offline(&self, transcript: &Transcript) -> Analysis {
        let analysis = self.fallback_analysis(&TranscriptView::new(transcript));
        log_completed(transcript, &analysis);
        analysis
    }

    async fn run_primary(
        &self,
        primary: &dyn CriteriaExtractor,
        transcript: &Transcript,
    ) -> Result<ExtractionResult, ExtractionError> {
        match tokio::time::timeout(self.primary_timeout, primary.extract(transcript)).await {
            Ok(result) => result,
            Err(_) => Err(ExtractionError::Timeout {
                timeout_secs: self.primary_timeout.as_secs(),
            }),
        }
    }

    /// The model's flag is widened by the local red-flag scan.
    fn primary_analysis(&self, result: ExtractionResult, view: &TranscriptView) -> Analysis {
        let emergency_detected = result.emergency_detected || self.emergency.detect(view);
        Analysis::new(
            result.criteria,
            emergency_detected,
            result.severity,
            AnalysisSource::Primary,
        )
    }

    fn fallback_analysis(&self, view: &TranscriptView) -> Analysis {
        Analysis::from_extraction(self.fallback.extract(view), AnalysisSource::Fallback)
    }
}

impl Default for AnalysisOrchestrator {
    fn default() -> Self {
        Self::new(Lexicon::builtin())
    }
}

fn log_completed(transcript: &Transcript, analysis: &Analysis) {
    info!(
        messages = transcript.len(),
        completed = analysis.completed_criteria(),
        stage = %analysis.stage(),
        severity = %analysis.severity(),
        emergency = analysis.emergency_detected(),
        source = %analysis.source(),
        "intake analysis completed"
    );
}
