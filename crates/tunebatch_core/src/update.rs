use crate::{
    is_playlist_url, AppState, BatchResult, DependencyReport, DownloadableItem, Effect,
    FetchError, JobStatus, LogLevel, Msg, PlaylistEntry, Rejection, RunKind, RunRejection,
    SelectionSet, StatusEvent, EXTRACTOR_NAME, TRANSCODER_NAME,
};

/// Progress shown while a playlist listing is outstanding.
const FETCH_PROGRESS: f32 = 0.1;

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::AddUrl(raw) => match state.jobs_mut().add(&raw) {
            Ok(item) => vec![
                list_changed(&state),
                log(
                    LogLevel::Success,
                    format!("Added song {}: {}", item.position + 1, item.url),
                ),
            ],
            Err(rejection) => vec![log(rejection_level(&rejection), rejection.to_string())],
        },
        Msg::RemoveJob(position) => match state.jobs_mut().remove_at(position) {
            Ok(removed) => {
                state.release_run_member(&removed.url);
                vec![
                    list_changed(&state),
                    log(LogLevel::Info, format!("Removed song {}", position + 1)),
                ]
            }
            Err(rejection) => vec![log(rejection_level(&rejection), rejection.to_string())],
        },
        Msg::ClearJobs => {
            if state.jobs().is_empty() {
                Vec::new()
            } else {
                let count = state.jobs_mut().clear();
                state.release_all_run_members();
                vec![
                    list_changed(&state),
                    log(LogLevel::Info, format!("Cleared {count} songs")),
                ]
            }
        }
        Msg::SetDestination(root) => {
            let message = format!("Download location updated: {}", root.display());
            state.set_destination_root(root);
            vec![log(LogLevel::Info, message)]
        }
        Msg::LoadPlaylist(raw) => load_playlist(&mut state, raw.trim()),
        Msg::PlaylistFetched(result) => playlist_fetched(&mut state, result),
        Msg::ToggleEntry(position) => {
            if state.selection().is_included(position).is_none() {
                Vec::new()
            } else {
                state.selection_mut().toggle(position);
                vec![selection_changed(&state)]
            }
        }
        Msg::IncludeAll => bulk_selection(&mut state, SelectionSet::include_all),
        Msg::ExcludeAll => bulk_selection(&mut state, SelectionSet::exclude_all),
        Msg::InvertSelection => bulk_selection(&mut state, SelectionSet::invert),
        Msg::StartSongsRun => {
            let items: Vec<DownloadableItem> =
                state.jobs().items().iter().map(DownloadableItem::from).collect();
            start_run(&mut state, RunKind::Songs, items)
        }
        Msg::StartPlaylistRun => {
            let items: Vec<DownloadableItem> = state
                .selection()
                .included_entries()
                .map(DownloadableItem::from)
                .collect();
            start_run(&mut state, RunKind::Playlist, items)
        }
        Msg::CheckDependencies => vec![Effect::ProbeDependencies],
        Msg::DependenciesProbed(report) => dependencies_probed(&mut state, report),
        Msg::RunLog { message, level } => vec![log(level, message)],
        Msg::RunProgress(fraction) => {
            state.set_progress(fraction);
            vec![Effect::Status(StatusEvent::Progress {
                fraction: state.progress(),
            })]
        }
        Msg::ItemStarted { kind, url } => {
            set_job_status(&mut state, kind, &url, JobStatus::Downloading)
        }
        Msg::ItemFinished {
            kind,
            url,
            succeeded,
        } => {
            let status = if succeeded {
                JobStatus::Completed
            } else {
                JobStatus::Failed
            };
            set_job_status(&mut state, kind, &url, status)
        }
        Msg::RunFinished(result) => run_finished(&mut state, result),
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn load_playlist(state: &mut AppState, url: &str) -> Vec<Effect> {
    if url.is_empty() {
        return vec![log(LogLevel::Warning, "Please enter a playlist URL")];
    }
    if !is_playlist_url(url) {
        return vec![log(
            LogLevel::Error,
            "Please enter a valid YouTube playlist URL",
        )];
    }
    if state.is_fetching() {
        return vec![log(LogLevel::Warning, "A playlist is already loading")];
    }
    if state.active_run() == Some(RunKind::Playlist) {
        return vec![log(
            LogLevel::Warning,
            "Cannot load a playlist while a playlist download is running",
        )];
    }

    state.set_fetching(true);
    let mut effects = vec![log(
        LogLevel::Info,
        "Loading playlist... This may take a moment",
    )];
    if state.active_run().is_none() {
        state.set_progress(FETCH_PROGRESS);
        effects.push(progress(FETCH_PROGRESS));
    }
    effects.push(Effect::FetchPlaylist {
        url: url.to_string(),
    });
    effects
}

fn playlist_fetched(
    state: &mut AppState,
    result: Result<Vec<PlaylistEntry>, FetchError>,
) -> Vec<Effect> {
    state.set_fetching(false);
    let mut effects = match result {
        Ok(entries) => {
            state.selection_mut().replace(entries);
            let selection = state.selection();
            vec![
                Effect::Status(StatusEvent::PlaylistLoaded {
                    entries: selection.snapshot(),
                    summary: selection.counted(),
                }),
                log(
                    LogLevel::Success,
                    format!("Loaded {} songs from playlist", selection.entries().len()),
                ),
            ]
        }
        Err(error) => vec![log(LogLevel::Error, fetch_failure_message(&error))],
    };
    // A concurrent run owns the progress bar.
    if state.active_run().is_none() {
        state.set_progress(0.0);
        effects.push(progress(0.0));
    }
    effects
}

fn fetch_failure_message(error: &FetchError) -> String {
    match error {
        FetchError::InvalidPlaylistUrl => "Please enter a valid YouTube playlist URL".to_string(),
        FetchError::ExternalToolError(stderr) => format!("Failed to load playlist: {stderr}"),
        FetchError::Timeout { after_secs } => {
            format!("Playlist loading timed out ({after_secs}s)")
        }
        FetchError::InvocationError(message) => format!("Error loading playlist: {message}"),
    }
}

fn bulk_selection(state: &mut AppState, apply: fn(&mut SelectionSet)) -> Vec<Effect> {
    if !state.selection().is_loaded() {
        return Vec::new();
    }
    apply(state.selection_mut());
    vec![selection_changed(state)]
}

fn start_run(state: &mut AppState, kind: RunKind, items: Vec<DownloadableItem>) -> Vec<Effect> {
    let rejection = if state.active_run().is_some() {
        Some(RunRejection::AlreadyRunning)
    } else if items.is_empty() {
        Some(match kind {
            RunKind::Songs => RunRejection::NoSongs,
            RunKind::Playlist => RunRejection::NothingSelected,
        })
    } else {
        None
    };
    if let Some(rejection) = rejection {
        let level = match rejection {
            RunRejection::AlreadyRunning => LogLevel::Error,
            _ => LogLevel::Warning,
        };
        return vec![log(level, rejection.to_string())];
    }

    let members: Vec<String> = match kind {
        RunKind::Songs => items.iter().map(|item| item.url.clone()).collect(),
        RunKind::Playlist => Vec::new(),
    };
    state.begin_run(kind, members);
    let message = match kind {
        RunKind::Songs => format!("Starting download of {} songs...", items.len()),
        RunKind::Playlist => format!("Starting download of {} selected songs...", items.len()),
    };
    vec![
        log(LogLevel::Info, message),
        Effect::StartRun {
            kind,
            items,
            destination_root: state.destination_root().to_path_buf(),
        },
    ]
}

fn set_job_status(
    state: &mut AppState,
    kind: RunKind,
    url: &str,
    status: JobStatus,
) -> Vec<Effect> {
    if kind != RunKind::Songs || !state.is_run_member(url) {
        return Vec::new();
    }
    if state.jobs_mut().set_status(url, status) {
        vec![list_changed(state)]
    } else {
        Vec::new()
    }
}

fn run_finished(state: &mut AppState, result: BatchResult) -> Vec<Effect> {
    let kind = result.kind;
    state.finish_run(result);
    vec![Effect::Status(StatusEvent::RunFinished { kind })]
}

fn dependencies_probed(state: &mut AppState, report: DependencyReport) -> Vec<Effect> {
    let mut effects = Vec::with_capacity(4);
    effects.push(if report.extractor_ok {
        let version = report.extractor_version.as_deref().unwrap_or("Ready");
        log(LogLevel::Success, format!("{EXTRACTOR_NAME}: {version}"))
    } else {
        log(LogLevel::Error, format!("{EXTRACTOR_NAME}: Not found"))
    });
    effects.push(if report.transcoder_ok {
        let version = report.transcoder_short_version().unwrap_or("Ready");
        log(LogLevel::Success, format!("{TRANSCODER_NAME}: {version}"))
    } else {
        log(LogLevel::Error, format!("{TRANSCODER_NAME}: Not found"))
    });

    if report.all_ready() {
        effects.push(log(LogLevel::Success, "All dependencies ready!"));
    } else {
        effects.push(log(
            LogLevel::Warning,
            format!("Missing dependencies: {}", report.missing().join(", ")),
        ));
        effects.push(log(
            LogLevel::Info,
            "Install missing dependencies to enable downloads",
        ));
    }
    state.set_dependencies(report);
    effects
}

fn rejection_level(rejection: &Rejection) -> LogLevel {
    match rejection {
        Rejection::InvalidUrl => LogLevel::Error,
        Rejection::Empty
        | Rejection::CapacityExceeded { .. }
        | Rejection::Duplicate
        | Rejection::OutOfRange { .. } => LogLevel::Warning,
    }
}

fn list_changed(state: &AppState) -> Effect {
    Effect::Status(StatusEvent::ListChanged {
        items: state.jobs().snapshot(),
    })
}

fn selection_changed(state: &AppState) -> Effect {
    let selection = state.selection();
    Effect::Status(StatusEvent::SelectionChanged {
        entries: selection.snapshot(),
        summary: selection.counted(),
    })
}

fn progress(fraction: f32) -> Effect {
    Effect::Status(StatusEvent::Progress { fraction })
}

fn log(level: LogLevel, message: impl Into<String>) -> Effect {
    Effect::Status(StatusEvent::log(level, message))
}
