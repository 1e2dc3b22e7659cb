/*!
 * Tests for MKVToolNix command construction and output parsing
 */

use anyhow::Result;
use std::path::{Path, PathBuf};
use trackpick::errors::ToolError;
use trackpick::mkvtoolnix::{ContainerTools, MkvToolNix, check_tool, propedit_args};
use trackpick::selection::{EditBatch, FlagEdit};
use trackpick::tracks::{TargetLanguages, TrackStructure, classify_tracks};
use crate::common;

/// One --edit/--set pair per edit, in batch order
#[test]
fn test_propedit_args_withBatch_shouldBuildEditPairs() {
    let batch = EditBatch::new(vec![FlagEdit::set(2), FlagEdit::clear(3)]).unwrap();

    let args = propedit_args(Path::new("/media/ep 01.mkv"), &batch);

    assert_eq!(
        args,
        vec![
            "/media/ep 01.mkv",
            "--edit", "track:2", "--set", "flag-default=1",
            "--edit", "track:3", "--set", "flag-default=0",
        ]
    );
}

/// Real identification output parses and classifies
#[test]
fn test_identify_output_withRealisticJson_shouldClassify() -> Result<()> {
    let json = std::fs::read_to_string(common::test_resource_path("mkvmerge_identify.json"))?;
    let structure: TrackStructure = serde_json::from_str(&json)?;

    let classified = classify_tracks(&structure, &TargetLanguages::new("jpn", "eng"));

    assert_eq!(classified.len(), 7);
    let audio: Vec<(u64, bool)> = classified
        .audio()
        .iter()
        .map(|t| (t.id, t.matches_requested_language))
        .collect();
    assert_eq!(audio, vec![(2, true), (3, false), (4, true)]);

    let subtitles = classified.subtitles();
    assert_eq!(subtitles[0].display_name, "Signs & Songs");
    assert!(subtitles[0].is_default);
    assert_eq!(subtitles[2].display_name, "");
    assert!(!subtitles[2].matches_requested_language);
    Ok(())
}

/// A missing executable is reported as unavailable
#[tokio::test]
async fn test_check_tool_withUnknownTool_shouldBeUnavailable() {
    let info = check_tool("trackpick-no-such-tool-1f3a").await;

    assert!(!info.available);
    assert!(info.path.is_none());
    assert!(info.version.is_none());
}

/// Spawn failure surfaces as ExecutionFailed
#[tokio::test]
async fn test_inspect_withMissingExecutable_shouldFailToExecute() {
    let tools = MkvToolNix::with_paths(
        PathBuf::from("/nonexistent/mkvmerge"),
        PathBuf::from("/nonexistent/mkvpropedit"),
    );

    let err = tools.inspect(Path::new("episode.mkv")).await.unwrap_err();

    assert!(matches!(err, ToolError::ExecutionFailed { ref tool, .. } if tool == "mkvmerge"));
}
