use super::display::*;
use super::model::{MediaEntry, Thumbnail, UNKNOWN_AUTHOR};
use std::path::{Path, PathBuf};
use std::sync::Arc;

fn entry(path: &str) -> MediaEntry {
    MediaEntry {
        path: PathBuf::from(path),
        name: name_from_path(Path::new(path)),
        format: format_from_path(Path::new(path)),
        duration_secs: 12.5,
        size_bytes: 1_572_864,
        created_at: "2024-01-02 03:04:05".to_string(),
        author: UNKNOWN_AUTHOR.to_string(),
        thumbnail: None,
    }
}

#[test]
fn format_is_uppercased_extension() {
    assert_eq!(format_from_path(Path::new("/v/Foo.MP4")), "MP4");
    assert_eq!(format_from_path(Path::new("/v/clip.webm")), "WEBM");
    assert_eq!(format_from_path(Path::new("/v/a.b.Mkv")), "MKV");
    assert_eq!(format_from_path(Path::new("/v/noext")), "");
}

#[test]
fn name_is_file_name() {
    assert_eq!(name_from_path(Path::new("/v/sub/b.mkv")), "b.mkv");
    assert_eq!(name_from_path(Path::new("/")), "/");
}

#[test]
fn list_lines_use_two_decimals() {
    let e = entry("/v/Foo.MP4");
    assert_eq!(summary_line(&e), "MP4 · 12.50 s · 1.50 MB");
    assert_eq!(provenance_line(&e), "2024-01-02 03:04:05 · unknown author");
    assert_eq!(duration_text(-1.0), "0.00 s");
    assert_eq!(size_text(0), "0.00 MB");
}

#[test]
fn details_include_path() {
    let text = details_text(&entry("/v/Foo.MP4"));
    assert!(text.contains("Name: Foo.MP4"));
    assert!(text.contains("Path: /v/Foo.MP4"));
}

#[test]
fn entries_are_identified_by_path() {
    let mut a = entry("/v/a.mp4");
    let b = entry("/v/a.mp4");
    a.duration_secs = 99.0;
    assert_eq!(a, b);
    assert_ne!(a, entry("/v/b.mp4"));
}

#[test]
fn thumbnail_file_is_removed_with_last_reference() {
    let dir = tempfile::tempdir().unwrap();
    let png = dir.path().join("thumb.png");
    std::fs::write(&png, b"png").unwrap();

    let thumb = Arc::new(Thumbnail::new(png.clone()));
    let mut e = entry("/v/a.mp4");
    e.thumbnail = Some(thumb.clone());
    let copy = e.clone();

    drop(thumb);
    drop(e);
    assert!(png.exists());

    drop(copy);
    assert!(!png.exists());
}

mod store {
    use super::entry;
    use crate::library::LibraryStore;

    fn loaded(paths: &[&str]) -> LibraryStore {
        let mut store = LibraryStore::new();
        store.begin_scan();
        store.complete_scan(paths.iter().map(|p| entry(p)).collect());
        store
    }

    #[test]
    fn scan_lifecycle_toggles_loading() {
        let mut store = LibraryStore::new();
        assert!(!store.is_loading());
        store.begin_scan();
        assert!(store.is_loading());
        store.complete_scan(vec![entry("/v/a.mp4")]);
        assert!(!store.is_loading());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn failed_scan_keeps_previous_entries() {
        let mut store = loaded(&["/v/a.mp4", "/v/b.mp4"]);
        store.begin_scan();
        store.fail_scan();
        assert!(!store.is_loading());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn empty_rescan_leaves_selection_dangling() {
        let mut store = loaded(&["/v/a.mp4", "/v/b.mp4"]);
        assert!(store.select(entry("/v/b.mp4")));

        store.begin_scan();
        store.complete_scan(Vec::new());

        assert!(!store.is_loading());
        assert!(store.is_empty());
        assert_eq!(store.selected().map(|e| e.name.as_str()), Some("b.mp4"));
        assert_eq!(store.selected_index(), None);
    }

    #[test]
    fn select_reports_membership() {
        let mut store = loaded(&["/v/a.mp4"]);
        assert!(store.select(entry("/v/a.mp4")));
        assert_eq!(store.selected_index(), Some(0));
        assert!(!store.select(entry("/elsewhere/z.mp4")));
        assert_eq!(store.selected_index(), None);
    }

    #[test]
    fn double_toggle_restores_loop_and_selection() {
        let mut store = loaded(&["/v/a.mp4", "/v/b.mp4"]);
        store.select(entry("/v/b.mp4"));
        let before = store.is_looping();

        store.toggle_loop();
        assert_ne!(store.is_looping(), before);
        store.toggle_loop();

        assert_eq!(store.is_looping(), before);
        assert_eq!(store.selected_index(), Some(1));
    }
}

mod looping {
    use super::entry;
    use crate::library::{LibraryStore, LoopController, LoopState};
    use std::path::Path;

    fn loaded(paths: &[&str]) -> LibraryStore {
        let mut store = LibraryStore::new();
        store.complete_scan(paths.iter().map(|p| entry(p)).collect());
        store
    }

    #[test]
    fn toggle_moves_between_idle_and_looping() {
        let mut store = loaded(&["/v/a.mp4"]);
        let mut ctl = LoopController::new(&store);
        assert_eq!(ctl.state(), LoopState::Idle);

        ctl.toggle(&mut store);
        assert_eq!(ctl.state(), LoopState::Looping);
        assert!(store.is_looping());

        ctl.toggle(&mut store);
        assert_eq!(ctl.state(), LoopState::Idle);
        assert!(!store.is_looping());
    }

    #[test]
    fn subscription_follows_selected_resource() {
        let mut store = loaded(&["/v/a.mp4", "/v/b.mp4"]);
        let mut ctl = LoopController::new(&store);

        store.select(entry("/v/a.mp4"));
        ctl.reconcile(&store);
        assert!(ctl.subscription().is_none(), "idle never subscribes");

        ctl.toggle(&mut store);
        assert_eq!(
            ctl.subscription().map(|s| s.resource()),
            Some(Path::new("/v/a.mp4"))
        );

        store.select(entry("/v/b.mp4"));
        ctl.reconcile(&store);
        assert_eq!(
            ctl.subscription().map(|s| s.resource()),
            Some(Path::new("/v/b.mp4"))
        );

        ctl.toggle(&mut store);
        assert!(ctl.subscription().is_none());
    }

    #[test]
    fn completions_cycle_through_every_entry() {
        let paths = ["/v/a.mp4", "/v/b.mp4", "/v/c.mp4", "/v/d.mp4"];
        let mut store = loaded(&paths);
        let mut ctl = LoopController::new(&store);
        ctl.toggle(&mut store);

        store.select(entry(paths[0]));
        ctl.reconcile(&store);

        for step in 1..=paths.len() {
            let current = store.selected().unwrap().path.clone();
            let next = ctl
                .on_playback_completed(&current, &mut store)
                .expect("loop advances");
            let expected = step % paths.len();
            assert_eq!(store.selected_index(), Some(expected));
            assert_eq!(next.path, Path::new(paths[expected]));
        }
        assert_eq!(store.selected_index(), Some(0));
    }

    #[test]
    fn single_entry_loops_onto_itself() {
        let mut store = loaded(&["/v/a.mp4"]);
        let mut ctl = LoopController::new(&store);
        ctl.toggle(&mut store);
        store.select(entry("/v/a.mp4"));
        ctl.reconcile(&store);

        let next = ctl.on_playback_completed(Path::new("/v/a.mp4"), &mut store);
        assert_eq!(next.map(|e| e.name), Some("a.mp4".to_string()));
        assert_eq!(store.selected_index(), Some(0));
    }

    #[test]
    fn stale_or_idle_completions_are_ignored() {
        let mut store = loaded(&["/v/a.mp4", "/v/b.mp4"]);
        let mut ctl = LoopController::new(&store);
        store.select(entry("/v/a.mp4"));
        ctl.reconcile(&store);

        // Idle: nothing happens.
        assert!(ctl.on_playback_completed(Path::new("/v/a.mp4"), &mut store).is_none());

        ctl.toggle(&mut store);
        // Completion of a resource we are not watching.
        assert!(ctl.on_playback_completed(Path::new("/v/b.mp4"), &mut store).is_none());
        assert_eq!(store.selected_index(), Some(0));
    }

    #[test]
    fn empty_library_makes_looping_inert() {
        let mut store = LibraryStore::new();
        let mut ctl = LoopController::new(&store);
        ctl.toggle(&mut store);
        store.select(entry("/v/gone.mp4"));
        ctl.reconcile(&store);

        assert!(ctl.on_playback_completed(Path::new("/v/gone.mp4"), &mut store).is_none());
        assert_eq!(store.selected().map(|e| e.name.as_str()), Some("gone.mp4"));
    }

    #[test]
    fn dangling_selection_restarts_from_first_entry() {
        let mut store = loaded(&["/v/old.mp4"]);
        let mut ctl = LoopController::new(&store);
        ctl.toggle(&mut store);
        store.select(entry("/v/old.mp4"));
        ctl.reconcile(&store);

        store.complete_scan(vec![entry("/w/x.mp4"), entry("/w/y.mp4")]);
        let next = ctl.on_playback_completed(Path::new("/v/old.mp4"), &mut store);
        assert_eq!(next.map(|e| e.name), Some("x.mp4".to_string()));
        assert_eq!(store.selected_index(), Some(0));
    }
}

mod pick {
    use crate::error::PickError;
    use crate::library::resolve_directory;

    #[test]
    fn resolve_directory_accepts_existing_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let input = format!("  {}  ", dir.path().display());
        assert_eq!(resolve_directory(&input).unwrap(), dir.path());
    }

    #[test]
    fn resolve_directory_rejects_bad_input() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.mp4");
        std::fs::write(&file, b"v").unwrap();

        assert_eq!(resolve_directory("   "), Err(PickError::Empty));
        assert_eq!(
            resolve_directory(file.to_str().unwrap()),
            Err(PickError::NotADirectory(file.clone()))
        );
        let gone = dir.path().join("gone");
        assert_eq!(
            resolve_directory(gone.to_str().unwrap()),
            Err(PickError::Missing(gone.clone()))
        );
    }
}

mod worker {
    use crate::config::LibrarySettings;
    use crate::error::{ExtractError, ScanError};
    use crate::library::display::{format_from_path, name_from_path};
    use crate::library::{MediaEntry, ScanEvent, ScanWorker, UNKNOWN_AUTHOR};
    use crate::media::Extractor;
    use std::path::Path;
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    struct NamesOnly;

    impl Extractor for NamesOnly {
        fn extract(&self, path: &Path) -> Result<MediaEntry, ExtractError> {
            Ok(MediaEntry {
                path: path.to_path_buf(),
                name: name_from_path(path),
                format: format_from_path(path),
                duration_secs: 2.0,
                size_bytes: 0,
                created_at: "unknown".to_string(),
                author: UNKNOWN_AUTHOR.to_string(),
                thumbnail: None,
            })
        }
    }

    fn run_to_end(worker: &ScanWorker) -> Vec<ScanEvent> {
        let deadline = Instant::now() + Duration::from_secs(10);
        let mut events = Vec::new();
        while Instant::now() < deadline {
            events.extend(worker.poll());
            if matches!(events.last(), Some(ScanEvent::Finished(_))) {
                return events;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        panic!("scan did not finish");
    }

    #[test]
    fn worker_reports_progress_then_result() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.mp4"), b"v").unwrap();
        std::fs::write(dir.path().join("b.mkv"), b"v").unwrap();

        let worker = ScanWorker::spawn(
            dir.path().to_path_buf(),
            LibrarySettings::default(),
            Arc::new(NamesOnly),
        );
        assert_eq!(worker.root(), dir.path());

        let events = run_to_end(&worker);
        let progress: Vec<usize> = events
            .iter()
            .filter_map(|e| match e {
                ScanEvent::Progress { found } => Some(*found),
                _ => None,
            })
            .collect();
        assert_eq!(progress, vec![1, 2]);
        match events.last() {
            Some(ScanEvent::Finished(Ok(entries))) => assert_eq!(entries.len(), 2),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn worker_reports_traversal_failure() {
        let dir = tempfile::tempdir().unwrap();
        let worker = ScanWorker::spawn(
            dir.path().join("missing"),
            LibrarySettings::default(),
            Arc::new(NamesOnly),
        );
        let events = run_to_end(&worker);
        assert!(matches!(
            events.last(),
            Some(ScanEvent::Finished(Err(ScanError::Walk(_))))
        ));
    }
}
