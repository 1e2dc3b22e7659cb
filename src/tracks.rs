/*!
 * Track classification.
 *
 * Turns the structural description reported by the container inspector into
 * per-type lists of [`Track`] records, flagging which tracks carry the
 * requested language for their type.
 */

use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;

/// Structural description of a container as reported by `mkvmerge -J`
///
/// Only the fields used for classification are modelled; everything else in
/// the identification output is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrackStructure {
    #[serde(default)]
    pub tracks: Vec<TrackEntry>,
}

/// One entry of the inspector's track list
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrackEntry {
    /// Zero-based track id assigned by the inspector
    #[serde(default)]
    pub id: u64,

    /// Track type ("audio", "subtitles", "video", ...)
    #[serde(rename = "type", default)]
    pub track_type: String,

    #[serde(default)]
    pub properties: TrackProperties,
}

/// Per-track property bundle; every field is optional in practice
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrackProperties {
    /// Track number used to address the track in edit commands
    #[serde(default)]
    pub number: Option<u64>,

    #[serde(default)]
    pub track_name: Option<String>,

    #[serde(default)]
    pub language: Option<String>,

    #[serde(default)]
    pub default_track: Option<bool>,
}

/// Kind of stream a track carries
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TrackType {
    Audio,
    Subtitles,
    /// Any other type, kept under its reported name
    Other(String),
}

impl TrackType {
    pub fn from_name(name: &str) -> Self {
        match name {
            "audio" => Self::Audio,
            "subtitles" => Self::Subtitles,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Audio => "audio",
            Self::Subtitles => "subtitles",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for TrackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Target language per track type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetLanguages {
    pub audio: String,
    pub subtitles: String,
}

impl TargetLanguages {
    pub fn new(audio: impl Into<String>, subtitles: impl Into<String>) -> Self {
        Self {
            audio: audio.into(),
            subtitles: subtitles.into(),
        }
    }

    /// Target for a given track type; other types have none
    pub fn for_type(&self, track_type: &TrackType) -> Option<&str> {
        match track_type {
            TrackType::Audio => Some(&self.audio),
            TrackType::Subtitles => Some(&self.subtitles),
            TrackType::Other(_) => None,
        }
    }
}

/// A classified audio or subtitle stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub id: u64,
    pub display_name: String,
    pub language: String,
    /// Flag state before any edit, informational only
    pub is_default: bool,
    pub matches_requested_language: bool,
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "track '{}' id {} lang {} default {} matching requested lang {}",
            self.display_name, self.id, self.language, self.is_default, self.matches_requested_language
        )
    }
}

/// Tracks of one container grouped by type, each group in source order
#[derive(Debug, Clone, Default)]
pub struct ClassifiedTracks {
    groups: HashMap<TrackType, Vec<Track>>,
}

impl ClassifiedTracks {
    /// Tracks of the given type, empty when the container has none
    pub fn tracks_of(&self, track_type: &TrackType) -> &[Track] {
        self.groups
            .get(track_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn audio(&self) -> &[Track] {
        self.tracks_of(&TrackType::Audio)
    }

    pub fn subtitles(&self) -> &[Track] {
        self.tracks_of(&TrackType::Subtitles)
    }

    /// Total number of tracks across all groups
    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Classify every track of a container against the target languages
pub fn classify_tracks(structure: &TrackStructure, targets: &TargetLanguages) -> ClassifiedTracks {
    let mut groups: HashMap<TrackType, Vec<Track>> = HashMap::new();

    for entry in &structure.tracks {
        let track_type = TrackType::from_name(&entry.track_type);
        let props = &entry.properties;
        let language = props.language.clone().unwrap_or_default();

        let matches_requested_language = targets
            .for_type(&track_type)
            .is_some_and(|target| target == language);

        let track = Track {
            // mkvpropedit counts tracks from 1, the inspector id from 0
            id: props.number.unwrap_or(entry.id + 1),
            display_name: props.track_name.clone().unwrap_or_default(),
            language,
            is_default: props.default_track.unwrap_or(false),
            matches_requested_language,
        };

        groups.entry(track_type).or_default().push(track);
    }

    ClassifiedTracks { groups }
}
