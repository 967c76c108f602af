//! Sound-cue data model.
//!
//! A [`SoundCue`] is what the cue-generation collaborator proposes: a
//! description, the transcript phrase it should anchor to, a duration,
//! and an intensity. A [`PlacedCue`] is the same cue after the locator
//! has (or has not) resolved its phrase to a playback time.
//!
//! All DTOs serialize camelCase; intensities serialize lowercase.

use serde::{Deserialize, Serialize};

use crate::locate::PhraseMatch;

/// Whether the effect plays under or over the narration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CueIntensity {
    Background,
    Foreground,
}

/// A model-proposed sound effect, not yet anchored in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoundCue {
    /// Short description of the sound, also the synthesis prompt.
    pub description: String,
    /// The phrase or sentence in the transcript where the sound belongs.
    /// Free text; no guarantee it quotes the transcript verbatim.
    pub position: String,
    /// How long the effect should play, in seconds.
    pub duration: f64,
    pub intensity: CueIntensity,
}

/// A cue with its locator outcome attached.
///
/// `timestamp` stays `None` when no transcript window cleared the
/// acceptance threshold; callers must surface that explicitly rather
/// than defaulting to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedCue {
    #[serde(flatten)]
    pub cue: SoundCue,
    /// Playback time in seconds, when the phrase was located.
    pub timestamp: Option<f64>,
    /// Combined locator score of the winning window.
    pub match_score: Option<f64>,
    /// The transcript words the locator matched, in their original form.
    pub matched_text: Option<String>,
    /// Synthesized audio as a base64 data URL, once generated.
    pub audio_url: Option<String>,
}

impl PlacedCue {
    pub fn matched(cue: SoundCue, m: &PhraseMatch) -> Self {
        Self {
            cue,
            timestamp: Some(m.start),
            match_score: Some(m.score),
            matched_text: Some(m.matched_text.clone()),
            audio_url: None,
        }
    }

    pub fn unmatched(cue: SoundCue) -> Self {
        Self {
            cue,
            timestamp: None,
            match_score: None,
            matched_text: None,
            audio_url: None,
        }
    }

    pub fn is_placed(&self) -> bool {
        self.timestamp.is_some()
    }
}

/// One planning result: all cues for a transcript, placed where possible.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CueSheet {
    pub cues: Vec<PlacedCue>,
    /// Count of cues that resolved to a timestamp.
    pub matched: usize,
    /// Count of cues with no sufficient match.
    pub unmatched: usize,
}

impl CueSheet {
    pub fn new(cues: Vec<PlacedCue>) -> Self {
        let matched = cues.iter().filter(|c| c.is_placed()).count();
        let unmatched = cues.len() - matched;
        Self {
            cues,
            matched,
            unmatched,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cue() -> SoundCue {
        SoundCue {
            description: "low rumble of thunder".into(),
            position: "the storm arrived".into(),
            duration: 4.0,
            intensity: CueIntensity::Background,
        }
    }

    #[test]
    fn sound_cue_deserializes_from_model_output_shape() {
        let json = r#"{
            "description": "door creaks open",
            "position": "she opened the door",
            "duration": 2.5,
            "intensity": "foreground"
        }"#;
        let cue: SoundCue = serde_json::from_str(json).expect("deserialize cue");
        assert_eq!(cue.intensity, CueIntensity::Foreground);
        assert!((cue.duration - 2.5).abs() < 1e-9);
    }

    #[test]
    fn intensity_rejects_non_lowercase_values() {
        let err = serde_json::from_str::<CueIntensity>(r#""Background""#);
        assert!(err.is_err(), "expected invalid casing to fail");
    }

    #[test]
    fn placed_cue_flattens_and_uses_camel_case() {
        let placed = PlacedCue {
            cue: cue(),
            timestamp: Some(12.5),
            match_score: Some(0.91),
            matched_text: Some("the storm arrived".into()),
            audio_url: None,
        };

        let json = serde_json::to_value(&placed).expect("serialize placed cue");
        assert_eq!(json["description"], "low rumble of thunder");
        assert_eq!(json["intensity"], "background");
        let ts = json["timestamp"].as_f64().expect("timestamp is a number");
        assert!((ts - 12.5).abs() < 1e-9);
        assert_eq!(json["matchScore"].as_f64().map(|s| s > 0.9), Some(true));
        assert_eq!(json["audioUrl"], serde_json::Value::Null);
    }

    #[test]
    fn cue_sheet_counts_matched_and_unmatched() {
        let sheet = CueSheet::new(vec![
            PlacedCue::unmatched(cue()),
            PlacedCue {
                cue: cue(),
                timestamp: Some(3.0),
                match_score: Some(0.8),
                matched_text: Some("the storm".into()),
                audio_url: None,
            },
        ]);
        assert_eq!(sheet.matched, 1);
        assert_eq!(sheet.unmatched, 1);
    }
}
