/*!
 * Tests for default-flag selection
 */

use trackpick::selection::{
    DecisionReason, EditBatch, EditListBuilder, ExcludedTrackPolicy, FlagAction, FlagEdit,
    Selection, SelectionRules, excluded_keyword, select_default_audio, select_default_subtitles,
    select_defaults,
};
use crate::common::track;

fn edits(selection: &Selection) -> Vec<FlagEdit> {
    selection.batch().map(|b| b.edits().to_vec()).unwrap_or_default()
}

/// Matching track is set, mismatching track is cleared
#[test]
fn test_select_default_audio_withJapaneseAndEnglishCommentary_shouldSetFirstClearSecond() {
    let tracks = vec![
        track(1, "jpn", "", true, true),
        track(2, "eng", "Commentary", false, false),
    ];

    let selection = select_default_audio(&tracks);

    assert_eq!(edits(&selection), vec![FlagEdit::set(1), FlagEdit::clear(2)]);
    assert_eq!(selection.selected_ids(), vec![1]);
}

/// Song subtitle is cleared, full subtitle is set
#[test]
fn test_select_default_subtitles_withSongAndFull_shouldClearSongSetFull() {
    let tracks = vec![
        track(5, "eng", "Song Lyrics", false, true),
        track(6, "eng", "Full", true, true),
    ];

    let selection = select_default_subtitles(&tracks);

    assert_eq!(edits(&selection), vec![FlagEdit::clear(5), FlagEdit::set(6)]);
    assert_eq!(
        selection.decisions()[0].reason,
        DecisionReason::Excluded("song")
    );
}

/// No matching audio discards the computed clears
#[test]
fn test_select_default_audio_withNoMatchingTrack_shouldReturnNoSuitableTrack() {
    let tracks = vec![
        track(1, "eng", "", true, false),
        track(2, "fre", "", false, false),
    ];

    let selection = select_default_audio(&tracks);

    assert!(matches!(selection, Selection::NoSuitableTrack { .. }));
    assert!(selection.batch().is_none());
    assert_eq!(selection.decisions().len(), 2);
    assert!(selection
        .decisions()
        .iter()
        .all(|d| d.action == FlagAction::Clear && d.reason == DecisionReason::LanguageMismatch));
}

/// Matching but excluded audio tracks get no edit
#[test]
fn test_select_default_audio_withMatchingCommentary_shouldEmitNoEditForIt() {
    let tracks = vec![
        track(1, "jpn", "Director's COMMENTARY", true, true),
        track(2, "jpn", "Main", false, true),
    ];

    let selection = select_default_audio(&tracks);

    assert_eq!(edits(&selection), vec![FlagEdit::set(2)]);
    assert_eq!(selection.decisions()[0].action, FlagAction::Keep);
}

/// Matching but excluded subtitle tracks are cleared explicitly
#[test]
fn test_select_default_subtitles_withMatchingExcluded_shouldClearEach() {
    let tracks = vec![
        track(3, "eng", "Commentary", true, true),
        track(4, "eng", "Sing-along", false, true),
        track(5, "eng", "Dialogue", false, true),
    ];

    let selection = select_default_subtitles(&tracks);

    assert_eq!(
        edits(&selection),
        vec![FlagEdit::clear(3), FlagEdit::clear(4), FlagEdit::set(5)]
    );
}

/// Only excluded tracks match: nothing is emitted, for either variant
#[test]
fn test_select_defaults_withOnlyExcludedMatches_shouldEmitNothing() {
    let tracks = vec![
        track(1, "jpn", "Songs", true, true),
        track(2, "eng", "", false, false),
    ];

    assert!(select_default_audio(&tracks).batch().is_none());
    assert!(select_default_subtitles(&tracks).batch().is_none());
}

/// Every qualifying track is set exactly once
#[test]
fn test_select_default_audio_withTwoQualifyingTracks_shouldSetEachOnce() {
    let tracks = vec![
        track(1, "jpn", "Stereo", false, true),
        track(2, "jpn", "5.1", false, true),
    ];

    let selection = select_default_audio(&tracks);
    let batch = edits(&selection);

    assert_eq!(batch, vec![FlagEdit::set(1), FlagEdit::set(2)]);
    for id in [1, 2] {
        assert_eq!(batch.iter().filter(|e| e.track_id == id).count(), 1);
    }
}

/// Decisions depend on language and name only, not on the prior flag
#[test]
fn test_select_defaults_withFlippedPriorFlags_shouldBeIdempotent() {
    let before = vec![
        track(1, "eng", "", true, false),
        track(2, "jpn", "", false, true),
        track(3, "jpn", "Commentary", false, true),
    ];
    let after: Vec<_> = before
        .iter()
        .map(|t| {
            let mut t = t.clone();
            t.is_default = t.id == 2;
            t
        })
        .collect();

    assert_eq!(select_default_audio(&before), select_default_audio(&after));
    assert_eq!(select_default_subtitles(&before), select_default_subtitles(&after));
}

/// Empty input has nothing to select
#[test]
fn test_select_defaults_withEmptyInput_shouldReturnNoSuitableTrack() {
    let selection = select_default_subtitles(&[]);

    assert_eq!(selection, Selection::NoSuitableTrack { decisions: vec![] });
}

/// Configured policy overrides the per-type default
#[test]
fn test_select_defaults_withClearPolicyForAudio_shouldClearExcluded() {
    let tracks = vec![
        track(1, "jpn", "Commentary", true, true),
        track(2, "jpn", "", false, true),
    ];
    let rules = SelectionRules { excluded: ExcludedTrackPolicy::Clear };

    let selection = select_defaults(&tracks, rules);

    assert_eq!(edits(&selection), vec![FlagEdit::clear(1), FlagEdit::set(2)]);
}

/// Keyword detection is case-insensitive and substring based
#[test]
fn test_excluded_keyword_withVariousNames_shouldDetectKeywords() {
    assert_eq!(excluded_keyword("Audio COMMENTARY"), Some("commentary"));
    assert_eq!(excluded_keyword("Opening Songs"), Some("song"));
    assert_eq!(excluded_keyword("Karaoke (Singing)"), Some("sing"));
    assert_eq!(excluded_keyword("Full Subtitles"), None);
    assert_eq!(excluded_keyword(""), None);
}

/// Builder rolls back to nothing without a set edit
#[test]
fn test_edit_list_builder_withClearsOnly_shouldCommitToNoSuitableTrack() {
    let mut builder = EditListBuilder::new();
    builder.record(&track(1, "eng", "", true, false), FlagAction::Clear, DecisionReason::LanguageMismatch);

    assert!(matches!(builder.commit(), Selection::NoSuitableTrack { .. }));
}

/// An edit batch can never be empty
#[test]
fn test_edit_batch_withNoEdits_shouldNotBuild() {
    assert!(EditBatch::new(vec![]).is_none());
    assert_eq!(EditBatch::new(vec![FlagEdit::set(1)]).map(|b| b.len()), Some(1));
}

/// Display form used in logs
#[test]
fn test_flag_edit_display_shouldShowVerbAndId() {
    assert_eq!(FlagEdit::set(3).to_string(), "set(3)");
    assert_eq!(FlagEdit::clear(7).to_string(), "clear(7)");
}
