//! Text/hashtag proxy
//!
//! Reads AI-disclosure hashtags (from the hashtag list and from `#tags`
//! inside the caption) and stylistic hint words in the caption.

use super::{BucketScorer, ScorerOutput};
use crate::error::ScorerError;
use crate::models::{BucketKind, EvidenceVector};
use crate::params::ThresholdConfig;
use crate::vocabulary::{extract_hashtags, normalize_hashtag, NormalizedText, AI_HASHTAGS, AI_HINT_WORDS};

pub struct TextScorer;

/// Distinct normalised hashtags, list order first, then caption order
fn collect_hashtags(evidence: &EvidenceVector) -> Vec<String> {
    let listed = evidence.hashtags.iter().flatten().map(|t| normalize_hashtag(t));
    let inline = evidence
        .caption_text
        .as_deref()
        .map(extract_hashtags)
        .unwrap_or_default();

    let mut tags: Vec<String> = Vec::new();
    for tag in listed.chain(inline) {
        if tag.len() > 1 && !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags
}

impl BucketScorer for TextScorer {
    fn name(&self) -> &'static str {
        "text"
    }

    fn bucket(&self) -> BucketKind {
        BucketKind::Text
    }

    fn score(
        &self,
        evidence: &EvidenceVector,
        config: &ThresholdConfig,
    ) -> Result<Option<ScorerOutput>, ScorerError> {
        if evidence.caption_text.is_none() && evidence.hashtags.is_none() {
            return Ok(None);
        }

        let ai_tags: Vec<String> = collect_hashtags(evidence)
            .into_iter()
            .filter(|tag| AI_HASHTAGS.contains(&tag.as_str()))
            .collect();
        let hint_words = evidence
            .caption_text
            .as_deref()
            .map(|caption| NormalizedText::new(caption).matches(AI_HINT_WORDS))
            .unwrap_or_default();

        let contribution = (ai_tags.len() as f64 * config.hashtag_contribution
            + hint_words.len() as f64 * config.hint_word_contribution)
            .min(1.0);

        let mut output = ScorerOutput::new(
            self.bucket(),
            contribution,
            format!("{} AI hashtags, {} hint words", ai_tags.len(), hint_words.len()),
        );
        if !ai_tags.is_empty() {
            output = output.with_note(format!("Hashtags: AI disclosure tags ({}).", ai_tags.join(", ")));
        }
        if !hint_words.is_empty() {
            output = output.with_note(format!(
                "Caption: stylistic hint words ({}).",
                hint_words.join(", ")
            ));
        }
        Ok(Some(output))
    }
}
