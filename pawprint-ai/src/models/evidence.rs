//! Evidence input supplied per analysis request
//!
//! Every field is optional. A missing field means "no signal available" and
//! makes the dependent buckets absent; it is never read as authenticity.

use serde::{Deserialize, Serialize};

/// One sampled frame's measurements, produced by the frame-extraction collaborator
///
/// All ratios are expected in [0, 1]; `shadow_direction_deg` in [0, 360).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameMeasurement {
    /// Relative position in the clip (0 = start, 1 = end)
    pub position: f64,
    /// Share of spectral energy in high frequencies (low = suppression)
    pub high_freq_energy_ratio: Option<f64>,
    /// Periodic-artifact energy (grid/upsampling patterns)
    pub periodic_energy: Option<f64>,
    /// Embedding distance to the previous sampled frame
    pub embedding_delta: Option<f64>,
    /// Interpolation blur estimate
    pub interpolation_blur: Option<f64>,
    /// Pose-model joint angle implausibility
    pub joint_angle_anomaly: Option<f64>,
    /// Texture uniformity (fur/skin too even)
    pub texture_uniformity: Option<f64>,
    /// Natural micro-movement level
    pub micro_motion: Option<f64>,
    /// Dominant shadow direction in degrees
    pub shadow_direction_deg: Option<f64>,
    /// Optical flow smoothness
    pub flow_smoothness: Option<f64>,
    /// Frame stutter estimate
    pub stutter: Option<f64>,
}

/// Heterogeneous evidence about one piece of media
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvidenceVector {
    /// Global media embedding (e.g. CLIP features)
    pub embedding: Option<Vec<f64>>,
    /// Caption text (post caption and/or generated caption)
    pub caption_text: Option<String>,
    /// Hashtags attached to the post
    pub hashtags: Option<Vec<String>>,
    /// Visual anomaly score from an external model (0..1)
    pub anomaly_score: Option<f64>,
    /// Fake probability from a deepfake detection model (0..1)
    pub deepfake_probability: Option<f64>,
    /// Number of frames the extractor sampled
    pub frame_sample_count: Option<u32>,
    /// Per-sample frame measurements
    pub frame_measurements: Option<Vec<FrameMeasurement>>,
}

impl EvidenceVector {
    /// True when no field carries any evidence
    pub fn is_empty(&self) -> bool {
        self.embedding.is_none()
            && self.caption_text.is_none()
            && self.hashtags.is_none()
            && self.anomaly_score.is_none()
            && self.deepfake_probability.is_none()
            && self.frame_sample_count.is_none()
            && self.frame_measurements.is_none()
    }

    /// Fill fields that are still absent from `other` (first supplier wins)
    pub fn merge_missing(&mut self, other: EvidenceVector) {
        fn fill<T>(slot: &mut Option<T>, value: Option<T>) {
            if slot.is_none() {
                *slot = value;
            }
        }
        fill(&mut self.embedding, other.embedding);
        fill(&mut self.caption_text, other.caption_text);
        fill(&mut self.hashtags, other.hashtags);
        fill(&mut self.anomaly_score, other.anomaly_score);
        fill(&mut self.deepfake_probability, other.deepfake_probability);
        fill(&mut self.frame_sample_count, other.frame_sample_count);
        fill(&mut self.frame_measurements, other.frame_measurements);
    }
}
