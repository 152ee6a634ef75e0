//! Extremum detection on a single recording channel.

use super::*;
use crate::extrema::{PeakFinder, Polarity, Signal};

/// Runs the extremum detector over one channel
#[derive(Clone, Debug)]
pub struct ExtremaAnalyzer {
    /// Channel to scan
    pub channel: String,
    pub finder: PeakFinder,
}

impl Default for ExtremaAnalyzer {
    fn default() -> Self {
        Self {
            channel: "A1".to_string(),
            finder: PeakFinder::default(),
        }
    }
}

impl Analyzer for ExtremaAnalyzer {
    fn id(&self) -> &str {
        "extrema"
    }

    fn name(&self) -> &str {
        "Extremum Finder"
    }

    fn description(&self) -> &str {
        "Noise tolerant peak or valley detection. An extremum is reported only \
         once the signal has moved at least the threshold away from it."
    }

    fn category(&self) -> &str {
        "Extrema"
    }

    fn required_channels(&self) -> Vec<&str> {
        vec![&self.channel]
    }

    fn analyze(&self, recording: &Recording) -> Result<AnalysisResult, AnalysisError> {
        let data = require_channel(recording, &self.channel)?;
        require_min_length(data, 1)?;

        let signal = Signal::from(data);
        let (report, computation_time) = timed_analyze(|| self.finder.find(&signal));
        let report = report?;

        let mut warnings = vec![];
        if report.is_empty() {
            warnings.push("No significant peaks found".to_string());
        }
        if report.degenerate {
            warnings.push("Channel is monotone; only an endpoint can qualify".to_string());
        }

        Ok(AnalysisResult::new(
            format!("{} ({})", self.channel, report.polarity),
            AnalysisOutput::Peaks(report.peaks),
        )
        .with_metadata(AnalysisMetadata {
            algorithm: "Alternating peak/valley scan".to_string(),
            parameters: vec![
                ("channel".to_string(), self.channel.clone()),
                ("polarity".to_string(), report.polarity.to_string()),
                ("threshold".to_string(), format!("{:.6e}", report.threshold)),
                ("candidates".to_string(), report.candidate_count.to_string()),
            ],
            warnings,
            computation_time_ms: computation_time,
        }))
    }

    fn get_config(&self) -> AnalyzerConfig {
        let mut params = HashMap::new();
        params.insert("channel".to_string(), self.channel.clone());
        params.insert("polarity".to_string(), self.finder.polarity.to_string());
        params.insert(
            "threshold".to_string(),
            self.finder
                .threshold
                .map_or_else(|| "auto".to_string(), |t| t.to_string()),
        );

        AnalyzerConfig {
            id: self.id().to_string(),
            name: self.name().to_string(),
            parameters: params,
        }
    }

    fn set_config(&mut self, config: &AnalyzerConfig) {
        if let Some(ch) = config.parameters.get("channel") {
            self.channel = ch.clone();
        }
        if let Some(p) = config.parameters.get("polarity") {
            if let Ok(polarity) = Polarity::parse(p) {
                self.finder.polarity = polarity;
            }
        }
        if let Some(t) = config.parameters.get("threshold") {
            if t.eq_ignore_ascii_case("auto") || t.is_empty() {
                self.finder.threshold = None;
            } else if let Ok(threshold) = t.parse() {
                self.finder.threshold = Some(threshold);
            }
        }
    }

    fn clone_box(&self) -> Box<dyn Analyzer> {
        Box::new(self.clone())
    }
}
