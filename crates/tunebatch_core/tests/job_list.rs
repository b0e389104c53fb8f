use pretty_assertions::assert_eq;
use tunebatch_core::{JobList, JobStatus, Rejection, MAX_JOBS};

fn watch_url(n: usize) -> String {
    format!("https://www.youtube.com/watch?v=track{n:03}")
}

#[test]
fn add_assigns_synthetic_title_and_position() {
    let mut jobs = JobList::new();
    let first = jobs.add("https://youtu.be/abc123").unwrap();
    let second = jobs.add(" https://music.youtube.com/watch?v=xyz ").unwrap();

    assert_eq!(first.title, "Song 1");
    assert_eq!(first.position, 0);
    assert_eq!(first.status, JobStatus::Pending);
    assert_eq!(second.title, "Song 2");
    assert_eq!(second.position, 1);
    assert_eq!(second.url, "https://music.youtube.com/watch?v=xyz");
}

#[test]
fn sixteenth_url_is_rejected_and_length_unchanged() {
    let mut jobs = JobList::new();
    for n in 0..MAX_JOBS {
        jobs.add(&watch_url(n)).unwrap();
    }
    assert_eq!(jobs.len(), 15);

    let err = jobs.add(&watch_url(99)).unwrap_err();
    assert_eq!(err, Rejection::CapacityExceeded { max: 15 });
    assert_eq!(jobs.len(), 15);
}

#[test]
fn capacity_is_checked_before_url_shape() {
    let mut jobs = JobList::new();
    for n in 0..MAX_JOBS {
        jobs.add(&watch_url(n)).unwrap();
    }
    assert_eq!(
        jobs.add("not-a-youtube-link").unwrap_err(),
        Rejection::CapacityExceeded { max: MAX_JOBS }
    );
}

#[test]
fn duplicate_url_is_rejected() {
    let mut jobs = JobList::new();
    jobs.add("https://youtu.be/abc123").unwrap();

    assert_eq!(
        jobs.add("https://youtu.be/abc123").unwrap_err(),
        Rejection::Duplicate
    );
    assert_eq!(jobs.len(), 1);
}

#[test]
fn blank_and_invalid_urls_are_rejected() {
    let mut jobs = JobList::new();
    assert_eq!(jobs.add("   ").unwrap_err(), Rejection::Empty);
    assert_eq!(
        jobs.add("not-a-youtube-link").unwrap_err(),
        Rejection::InvalidUrl
    );
    assert!(jobs.is_empty());
}

#[test]
fn remove_reindexes_remaining_items_in_order() {
    let mut jobs = JobList::new();
    for n in 0..4 {
        jobs.add(&watch_url(n)).unwrap();
    }

    let removed = jobs.remove_at(1).unwrap();
    assert_eq!(removed.url, watch_url(1));

    let positions: Vec<_> = jobs.items().iter().map(|item| item.position).collect();
    let urls: Vec<_> = jobs.items().iter().map(|item| item.url.clone()).collect();
    assert_eq!(positions, vec![0, 1, 2]);
    assert_eq!(urls, vec![watch_url(0), watch_url(2), watch_url(3)]);
    // Titles are labels, not indices, and are not renumbered.
    assert_eq!(jobs.items()[1].title, "Song 3");
}

#[test]
fn remove_out_of_range_is_rejected() {
    let mut jobs = JobList::new();
    jobs.add(&watch_url(0)).unwrap();

    assert_eq!(
        jobs.remove_at(1).unwrap_err(),
        Rejection::OutOfRange {
            position: 1,
            len: 1
        }
    );
    assert_eq!(jobs.len(), 1);
}

#[test]
fn clear_reports_dropped_count_and_is_idempotent() {
    let mut jobs = JobList::new();
    jobs.add(&watch_url(0)).unwrap();
    jobs.add(&watch_url(1)).unwrap();

    assert_eq!(jobs.clear(), 2);
    assert_eq!(jobs.clear(), 0);
    assert!(jobs.is_empty());
}

#[test]
fn set_status_is_keyed_by_url() {
    let mut jobs = JobList::new();
    jobs.add(&watch_url(0)).unwrap();
    jobs.add(&watch_url(1)).unwrap();

    assert!(jobs.set_status(&watch_url(1), JobStatus::Failed));
    assert!(!jobs.set_status(&watch_url(7), JobStatus::Completed));
    assert_eq!(jobs.items()[0].status, JobStatus::Pending);
    assert_eq!(jobs.items()[1].status, JobStatus::Failed);
}

#[test]
fn rejection_messages_are_user_facing() {
    assert_eq!(
        Rejection::CapacityExceeded { max: 15 }.to_string(),
        "Maximum 15 URLs allowed"
    );
    assert_eq!(
        Rejection::OutOfRange {
            position: 4,
            len: 2
        }
        .to_string(),
        "No song at position 5 (list has 2)"
    );
}
