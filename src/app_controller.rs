use anyhow::{Result, anyhow};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::mkvtoolnix::ContainerTools;
use crate::selection::{FlagAction, Selection, SelectionRules, select_defaults};
use crate::tracks::{TargetLanguages, Track, TrackType, classify_tracks};

// @module: Application controller for default-track processing

/// What happened to one track type of one file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeOutcome {
    /// Edits were issued (or would have been, in dry-run mode)
    Edited { edits: usize },
    /// No track qualified, nothing was issued
    NoSuitableTrack,
    /// The mutator failed for this type
    Failed,
}

/// Result of processing one container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub path: PathBuf,
    pub audio: TypeOutcome,
    pub subtitles: TypeOutcome,
}

/// Totals over a batch run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Files inspected successfully
    pub processed: usize,
    /// Files for which at least one track type was edited
    pub edited: usize,
    /// Files that could not be inspected or edited
    pub failed: usize,
}

/// Main application controller
pub struct Controller<T: ContainerTools> {
    // @field: App configuration
    config: Config,
    // @field: Inspector and mutator
    tools: T,
    // @field: Decide and log only
    dry_run: bool,
}

impl<T: ContainerTools> Controller<T> {
    // @method: Create a new controller with the given configuration and tools
    pub fn new(config: Config, tools: T) -> Self {
        Self {
            config,
            tools,
            dry_run: false,
        }
    }

    /// Compute and log edits without applying them
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn tools(&self) -> &T {
        &self.tools
    }

    /// Process every container file in a directory, one at a time
    pub async fn run_folder(&self, input_dir: &Path) -> Result<RunSummary> {
        if !FileManager::dir_exists(input_dir) {
            return Err(anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        info!("scanning folder: {:?}", input_dir);
        let containers =
            FileManager::find_containers(input_dir, &self.config.extensions, self.config.recursive)?;

        if containers.is_empty() {
            warn!("No container files found in {:?}", input_dir);
        }

        let mut summary = RunSummary::default();
        for path in containers {
            match self.process_file(&path).await {
                Ok(report) => {
                    summary.processed += 1;
                    let edited = |o: TypeOutcome| matches!(o, TypeOutcome::Edited { .. });
                    if edited(report.audio) || edited(report.subtitles) {
                        summary.edited += 1;
                    }
                    if report.audio == TypeOutcome::Failed || report.subtitles == TypeOutcome::Failed {
                        summary.failed += 1;
                    }
                }
                Err(e) => {
                    error!("Error processing {:?}: {}", path, e);
                    summary.failed += 1;
                }
            }
        }

        info!(
            "done: {} processed, {} edited, {} failed",
            summary.processed, summary.edited, summary.failed
        );

        Ok(summary)
    }

    /// Inspect one container and rewrite its audio then subtitle default flags
    pub async fn process_file(&self, path: &Path) -> Result<FileReport> {
        let structure = self.tools.inspect(path).await?;
        let tracks = classify_tracks(&structure, &self.target_languages());

        info!("editing {:?}...", path);

        let audio = self
            .process_type(path, &TrackType::Audio, tracks.audio(), self.config.audio_rules())
            .await;
        let subtitles = self
            .process_type(
                path,
                &TrackType::Subtitles,
                tracks.subtitles(),
                self.config.subtitle_rules(),
            )
            .await;

        Ok(FileReport {
            path: path.to_path_buf(),
            audio,
            subtitles,
        })
    }

    async fn process_type(
        &self,
        path: &Path,
        track_type: &TrackType,
        tracks: &[Track],
        rules: SelectionRules,
    ) -> TypeOutcome {
        info!("guessing correct {} track", track_type);
        for track in tracks {
            debug!("{}", track);
        }

        let selection = select_defaults(tracks, rules);
        Self::log_decisions(track_type, &selection);

        let batch = match &selection {
            Selection::Apply { batch, .. } => batch,
            Selection::NoSuitableTrack { .. } => {
                warn!("did not find suitable {} track, doing nothing...", track_type);
                return TypeOutcome::NoSuitableTrack;
            }
        };

        let summary = batch.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ");
        if self.dry_run {
            info!("dry run, not applying {} edits: {}", track_type, summary);
            return TypeOutcome::Edited { edits: batch.len() };
        }

        debug!("applying {} edits: {}", track_type, summary);
        match self.tools.apply_edits(path, batch).await {
            Ok(()) => TypeOutcome::Edited { edits: batch.len() },
            Err(e) => {
                error!("Failed to apply {} edits to {:?}: {}", track_type, path, e);
                TypeOutcome::Failed
            }
        }
    }

    fn log_decisions(track_type: &TrackType, selection: &Selection) {
        for decision in selection.decisions() {
            match decision.action {
                FlagAction::Set => info!(
                    "setting default {} track on '{}' id {}",
                    track_type, decision.display_name, decision.track_id
                ),
                FlagAction::Clear => debug!(
                    "clearing default {} track '{}' id {} ({})",
                    track_type, decision.display_name, decision.track_id, decision.reason
                ),
                FlagAction::Keep => debug!(
                    "leaving {} track '{}' id {} untouched ({})",
                    track_type, decision.display_name, decision.track_id, decision.reason
                ),
            }
        }
    }

    fn target_languages(&self) -> TargetLanguages {
        self.config.target_languages()
    }
}
