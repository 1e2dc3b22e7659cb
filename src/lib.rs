/*!
 * # trackpick - default track picker for Matroska files
 *
 * A Rust library for normalizing the default audio and subtitle tracks of a
 * folder of Matroska containers.
 *
 * ## Features
 *
 * - Inspect track structure with `mkvmerge -J`
 * - Prefer a target audio language (default Japanese) and a target subtitle
 *   language (default English)
 * - Skip commentary and song tracks when choosing the default
 * - Apply all flag changes for a file with a single `mkvpropedit` call
 * - ISO 639-1 and ISO 639-2 language code support
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `tracks`: Track classification against target languages
 * - `selection`: Default-flag selection and edit batches
 * - `mkvtoolnix`: Container inspection/mutation port and its MKVToolNix implementation
 * - `file_utils`: Container discovery
 * - `app_controller`: Per-file and per-folder orchestration
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod mkvtoolnix;
pub mod selection;
pub mod tracks;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, FileReport, RunSummary, TypeOutcome};
pub use errors::{AppError, ConfigError, ToolError};
pub use mkvtoolnix::{ContainerTools, MkvToolNix};
pub use selection::{EditBatch, FlagEdit, Selection, select_default_audio, select_default_subtitles};
pub use tracks::{Track, TrackStructure, TrackType, classify_tracks};
