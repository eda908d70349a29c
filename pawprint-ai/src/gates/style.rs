//! Style/context gate: how likely the media is stylised (CGI, animation, film)

use crate::stats::FeatureStats;
use crate::vocabulary::{NormalizedText, STYLIZATION_PHRASES};

const CAPTION_CGI: f64 = 0.5;

/// Flat, low-entropy embeddings typical of rendered frames
const FLAT_KURTOSIS_ABS: f64 = 1.0;
const FLAT_ENTROPY_LO: f64 = 0.45;
const FLAT_CGI: f64 = 0.2;

/// Low spread with low entropy (clean synthetic palette)
const LOW_SPREAD_VARIANCE: f64 = 0.55;
const LOW_SPREAD_ENTROPY: f64 = 0.40;
const LOW_SPREAD_CGI: f64 = 0.15;

const LIVE_ACTION_SLOPE: f64 = 0.85;

#[derive(Debug, Clone, PartialEq)]
pub struct StyleHints {
    /// CGI/animation likelihood in [0, 1]
    pub cgi_likelihood: f64,
    /// `1 − 0.85·cgi`
    pub live_action_likelihood: f64,
    pub notes: Vec<String>,
}

impl Default for StyleHints {
    fn default() -> Self {
        Self {
            cgi_likelihood: 0.0,
            live_action_likelihood: 1.0,
            notes: Vec::new(),
        }
    }
}

/// Estimate stylisation from caption phrases and embedding statistics
///
/// Embedding rules apply only when statistics are available.
pub fn estimate_style(stats: Option<&FeatureStats>, caption: Option<&str>) -> StyleHints {
    let mut cgi = 0.0;
    let mut notes = Vec::new();

    if let Some(caption) = caption {
        let hits = NormalizedText::new(caption).matches(STYLIZATION_PHRASES);
        if !hits.is_empty() {
            cgi += CAPTION_CGI;
            notes.push(format!("Style: stylised context in caption ({}).", hits.join(", ")));
        }
    }

    if let Some(stats) = stats {
        if stats.kurtosis.abs() < FLAT_KURTOSIS_ABS && stats.entropy < FLAT_ENTROPY_LO {
            cgi += FLAT_CGI;
        }
        if stats.variance < LOW_SPREAD_VARIANCE && stats.entropy < LOW_SPREAD_ENTROPY {
            cgi += LOW_SPREAD_CGI;
        }
    }

    let cgi = cgi.clamp(0.0, 1.0);
    if cgi > 0.0 {
        notes.push(format!("Style: CGI/animation likelihood {:.0}%.", cgi * 100.0));
    }

    StyleHints {
        cgi_likelihood: cgi,
        live_action_likelihood: 1.0 - LIVE_ACTION_SLOPE * cgi,
        notes,
    }
}
