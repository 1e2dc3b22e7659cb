/*!
 * Default-flag selection.
 *
 * Given the classified tracks of one type, decides which tracks become the
 * default and which lose the flag. Selection is all-or-nothing: unless at
 * least one track is chosen, no edit is produced for the type.
 */

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::tracks::Track;

/// Display-name fragments that disqualify a track from becoming the default
pub const EXCLUDED_NAME_KEYWORDS: [&str; 3] = ["commentary", "song", "sing"];

/// What to do with a track whose language matches but whose name is excluded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExcludedTrackPolicy {
    /// Emit no edit, the prior flag stays as it is
    Keep,
    /// Explicitly clear the default flag
    Clear,
}

/// Selection rules for one track type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionRules {
    pub excluded: ExcludedTrackPolicy,
}

impl SelectionRules {
    /// Audio commentary/song tracks keep their flag
    pub fn audio() -> Self {
        Self { excluded: ExcludedTrackPolicy::Keep }
    }

    /// Subtitle commentary/song tracks are forced non-default
    pub fn subtitles() -> Self {
        Self { excluded: ExcludedTrackPolicy::Clear }
    }
}

/// A single flag change addressed to one track
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagEdit {
    pub track_id: u64,
    pub default: bool,
}

impl FlagEdit {
    pub fn set(track_id: u64) -> Self {
        Self { track_id, default: true }
    }

    pub fn clear(track_id: u64) -> Self {
        Self { track_id, default: false }
    }
}

impl fmt::Display for FlagEdit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = if self.default { "set" } else { "clear" };
        write!(f, "{}({})", verb, self.track_id)
    }
}

/// Ordered, never-empty list of flag edits for one container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditBatch {
    edits: Vec<FlagEdit>,
}

impl EditBatch {
    /// Build a batch, `None` when there is nothing to apply
    pub fn new(edits: Vec<FlagEdit>) -> Option<Self> {
        if edits.is_empty() {
            None
        } else {
            Some(Self { edits })
        }
    }

    pub fn edits(&self) -> &[FlagEdit] {
        &self.edits
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FlagEdit> {
        self.edits.iter()
    }
}

/// Outcome for one track
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagAction {
    Set,
    Clear,
    /// No edit, prior flag preserved
    Keep,
}

/// Why a track got its action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionReason {
    Preferred,
    LanguageMismatch,
    /// Name contains the given excluded keyword
    Excluded(&'static str),
}

impl fmt::Display for DecisionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Preferred => f.write_str("requested language"),
            Self::LanguageMismatch => f.write_str("language mismatch"),
            Self::Excluded(keyword) => write!(f, "name contains '{}'", keyword),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackDecision {
    pub track_id: u64,
    pub display_name: String,
    pub action: FlagAction,
    pub reason: DecisionReason,
}

/// Result of running the selector over one track type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// At least one track was chosen; the batch carries every computed edit
    Apply {
        batch: EditBatch,
        decisions: Vec<TrackDecision>,
    },
    /// Nothing qualified, no edit is issued at all
    NoSuitableTrack { decisions: Vec<TrackDecision> },
}

impl Selection {
    pub fn decisions(&self) -> &[TrackDecision] {
        match self {
            Self::Apply { decisions, .. } | Self::NoSuitableTrack { decisions } => decisions,
        }
    }

    pub fn batch(&self) -> Option<&EditBatch> {
        match self {
            Self::Apply { batch, .. } => Some(batch),
            Self::NoSuitableTrack { .. } => None,
        }
    }

    /// Ids of the tracks chosen as default
    pub fn selected_ids(&self) -> Vec<u64> {
        self.decisions()
            .iter()
            .filter(|d| d.action == FlagAction::Set)
            .map(|d| d.track_id)
            .collect()
    }
}

/// Accumulates per-track decisions, committed only if one track was set
#[derive(Debug, Default)]
pub struct EditListBuilder {
    edits: Vec<FlagEdit>,
    decisions: Vec<TrackDecision>,
    selected: bool,
}

impl EditListBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, track: &Track, action: FlagAction, reason: DecisionReason) {
        match action {
            FlagAction::Set => {
                self.selected = true;
                self.edits.push(FlagEdit::set(track.id));
            }
            FlagAction::Clear => self.edits.push(FlagEdit::clear(track.id)),
            FlagAction::Keep => {}
        }
        self.decisions.push(TrackDecision {
            track_id: track.id,
            display_name: track.display_name.clone(),
            action,
            reason,
        });
    }

    /// Finish the list; pending clears are dropped unless a track was set
    pub fn commit(self) -> Selection {
        if !self.selected {
            return Selection::NoSuitableTrack { decisions: self.decisions };
        }
        match EditBatch::new(self.edits) {
            Some(batch) => Selection::Apply { batch, decisions: self.decisions },
            None => Selection::NoSuitableTrack { decisions: self.decisions },
        }
    }
}

/// First excluded keyword found in a display name, case-insensitively
pub fn excluded_keyword(display_name: &str) -> Option<&'static str> {
    let name = display_name.to_lowercase();
    EXCLUDED_NAME_KEYWORDS
        .iter()
        .copied()
        .find(|keyword| name.contains(keyword))
}

/// Decide default flags for the tracks of one type
pub fn select_defaults(tracks: &[Track], rules: SelectionRules) -> Selection {
    let mut builder = EditListBuilder::new();

    for track in tracks {
        if !track.matches_requested_language {
            builder.record(track, FlagAction::Clear, DecisionReason::LanguageMismatch);
            continue;
        }

        if let Some(keyword) = excluded_keyword(&track.display_name) {
            let action = match rules.excluded {
                ExcludedTrackPolicy::Keep => FlagAction::Keep,
                ExcludedTrackPolicy::Clear => FlagAction::Clear,
            };
            builder.record(track, action, DecisionReason::Excluded(keyword));
            continue;
        }

        builder.record(track, FlagAction::Set, DecisionReason::Preferred);
    }

    builder.commit()
}

/// Audio variant: excluded tracks are left untouched
pub fn select_default_audio(tracks: &[Track]) -> Selection {
    select_defaults(tracks, SelectionRules::audio())
}

/// Subtitle variant: excluded tracks are cleared
pub fn select_default_subtitles(tracks: &[Track]) -> Selection {
    select_defaults(tracks, SelectionRules::subtitles())
}
