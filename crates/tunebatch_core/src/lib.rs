//! Tunebatch core: pure orchestration state for batch audio extraction.
//!
//! Owns the job list, the playlist selection set and the validation and
//! parsing rules around them. Nothing here performs IO; the engine does the
//! work and reports back through [`Msg`], and [`update`] answers with
//! [`Effect`]s.
mod dependencies;
mod effect;
mod job_list;
mod msg;
mod playlist;
mod run;
mod selection;
mod state;
mod status;
mod update;
mod validate;
mod view_model;

pub use dependencies::{DependencyReport, EXTRACTOR_NAME, TRANSCODER_NAME};
pub use effect::Effect;
pub use job_list::{JobItem, JobList, JobStatus, Rejection, MAX_JOBS};
pub use msg::Msg;
pub use playlist::{
    format_duration, parse_duration, parse_listing, FetchError, PlaylistEntry, LISTING_TEMPLATE,
    NOT_AVAILABLE, UNKNOWN_DURATION,
};
pub use run::{BatchResult, DownloadableItem, RunKind, RunOutcome, RunRejection};
pub use selection::{SelectionSet, SelectionSummary};
pub use state::AppState;
pub use status::{LogLevel, StatusEvent, StatusSink};
pub use update::update;
pub use validate::{is_acceptable, is_playlist_url};
pub use view_model::{playlist_counter_label, AppViewModel, JobRowView, PlaylistRowView};
