use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

use movie_sorter_core::taxonomy::{GENRES, MANUAL_CHECKING, MOVIES_INFO};
use movie_sorter_core::{
    AppConfig, MetadataClient, MetadataRecord, Organizer, ReleaseNameParser, RunContext,
    SilentReporter,
};

/// Canned answers keyed by title; anything else is a miss.
#[derive(Default)]
struct FakeClient {
    records: HashMap<String, MetadataRecord>,
    calls: RefCell<Vec<String>>,
}

impl FakeClient {
    fn with(mut self, title: &str, genre: &str) -> Self {
        self.records
            .insert(title.to_string(), MetadataRecord::new(title, genre));
        self
    }
}

impl MetadataClient for FakeClient {
    fn lookup(&self, title: &str) -> Option<MetadataRecord> {
        self.calls.borrow_mut().push(title.to_string());
        self.records.get(title).cloned()
    }
}

fn top_level_dirs(root: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(root)
        .unwrap()
        .flatten()
        .filter(|entry| entry.path().is_dir())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Layout:
///   root/
///     The.Matrix.1999.1080p.BluRay.x264-GROUP/movie.mkv
///     The Matrix 720p/movie.mkv          <- same title, wins on string ordering
///     Airplane.1980.DVDRip/movie.avi
///     Unknown.Film.2020.WEBRip/movie.mkv <- lookup misses
///     ___/readme.txt                     <- unparsable
///     notes.txt                          <- not a folder
fn create_test_tree(root: &Path) {
    for (folder, file) in [
        ("The.Matrix.1999.1080p.BluRay.x264-GROUP", "movie.mkv"),
        ("The Matrix 720p", "movie.mkv"),
        ("Airplane.1980.DVDRip", "movie.avi"),
        ("Unknown.Film.2020.WEBRip", "movie.mkv"),
        ("___", "readme.txt"),
    ] {
        let dir = root.join(folder);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(file), folder).unwrap();
    }
    fs::write(root.join("notes.txt"), "keep me").unwrap();
}

#[test]
fn test_full_organize_pipeline() {
    let tmp = tempdir().unwrap();
    let root = tmp.path();
    create_test_tree(root);

    let client = FakeClient::default()
        .with("The Matrix", "Action, Sci-Fi")
        .with("Airplane", "Comedy");
    let context = RunContext::new(root, AppConfig::default()).unwrap();
    let organizer = Organizer::new(context, ReleaseNameParser::new(), &client);

    let result = organizer.run(&SilentReporter).unwrap();

    // One lookup per distinct parsed title.
    let mut calls = client.calls.borrow().clone();
    calls.sort();
    assert_eq!(calls, vec!["Airplane", "The Matrix", "Unknown Film"]);
    assert_eq!(result.titles, 3);

    // "720p" > "1080p" as strings: the 720p copy is the one kept.
    assert!(root.join("Action").join("The Matrix 720p").is_dir());
    assert!(!root.join("Action").join("The Matrix 1999 1080p").exists());
    assert!(!root.join("The Matrix 1999 1080p").exists());
    assert_eq!(result.report.removed(), 1);

    assert!(root
        .join("Comedy")
        .join("Airplane 1980")
        .join("movie.avi")
        .is_file());
    assert!(root
        .join(MANUAL_CHECKING)
        .join("Unknown Film 2020")
        .join("movie.mkv")
        .is_file());

    // The unparsable folder and the stray file are left alone.
    assert!(root.join("___").join("readme.txt").is_file());
    assert!(root.join("notes.txt").is_file());

    // Metadata saved for found titles only.
    let info = root.join(MOVIES_INFO);
    assert!(info.join("The Matrix_about.txt").is_file());
    assert!(info.join("Airplane_about.txt").is_file());
    assert!(!info.join("Unknown Film_about.txt").exists());
    assert_eq!(fs::read_dir(&info).unwrap().count(), 2);

    // Unused genre buckets are pruned; reserved buckets stay.
    assert_eq!(
        top_level_dirs(root),
        vec!["Action", "Comedy", "Manual Checking", "___", "movies info"]
    );
    for genre in GENRES {
        if *genre != "Action" && *genre != "Comedy" {
            assert!(!root.join(genre).exists(), "{} should be pruned", genre);
        }
    }

    // Summary counts every top-level directory, buckets included.
    assert_eq!(result.summary.manual_count, 1);
    assert_eq!(result.summary.total_count, 5);
    assert_eq!(
        fs::read_to_string(root.join("process_summary.txt")).unwrap(),
        "1 / 5 movies are in 'Manual Checking'\n"
    );
    assert_eq!(result.summary_path, root.join("process_summary.txt"));
    assert_eq!(result.report.failed_count(), 0);
}

#[test]
fn test_second_run_is_stable() {
    let tmp = tempdir().unwrap();
    let root = tmp.path();
    create_test_tree(root);

    let client = FakeClient::default()
        .with("The Matrix", "Action")
        .with("Airplane", "Comedy");
    let organizer = Organizer::new(
        RunContext::new(root, AppConfig::default()).unwrap(),
        ReleaseNameParser::new(),
        &client,
    );
    organizer.run(&SilentReporter).unwrap();
    let before = top_level_dirs(root);

    client.calls.borrow_mut().clear();
    let second = organizer.run(&SilentReporter).unwrap();

    // Only the unparsable folder is still at the root, so nothing is looked up again.
    assert!(client.calls.borrow().is_empty());
    assert_eq!(second.titles, 0);
    assert_eq!(top_level_dirs(root), before);
    assert!(root.join("Action").join("The Matrix 720p").is_dir());
    assert!(root.join(MANUAL_CHECKING).join("Unknown Film 2020").is_dir());
}

#[test]
fn test_ignored_folders_are_left_alone() {
    let tmp = tempdir().unwrap();
    let root = tmp.path();
    fs::create_dir(root.join("Heat.1995.1080p")).unwrap();
    fs::create_dir(root.join("@eaDir")).unwrap();

    let config = AppConfig {
        ignore_patterns: vec!["@*".to_string()],
        ..AppConfig::default()
    };
    let client = FakeClient::default().with("Heat", "Crime");
    let organizer = Organizer::new(
        RunContext::new(root, config).unwrap(),
        ReleaseNameParser::new(),
        &client,
    );
    organizer.run(&SilentReporter).unwrap();

    assert!(root.join("@eaDir").is_dir());
    assert!(root.join("Crime").join("Heat 1995 1080p").is_dir());
    assert_eq!(*client.calls.borrow(), vec!["Heat".to_string()]);
}

#[test]
fn test_titles_ending_in_a_year_are_not_merged() {
    let tmp = tempdir().unwrap();
    let root = tmp.path();
    for folder in [
        "Blade.Runner.1982.1080p.BluRay",
        "Blade.Runner.2049.2017.2160p.UHD",
    ] {
        fs::create_dir(root.join(folder)).unwrap();
        fs::write(root.join(folder).join("movie.mkv"), folder).unwrap();
    }

    let client = FakeClient::default()
        .with("Blade Runner", "Sci-Fi, Thriller")
        .with("Blade Runner 2049", "Action, Drama");
    let organizer = Organizer::new(
        RunContext::new(root, AppConfig::default()).unwrap(),
        ReleaseNameParser::new(),
        &client,
    );
    let result = organizer.run(&SilentReporter).unwrap();

    assert_eq!(result.titles, 2);
    assert_eq!(result.report.removed(), 0);
    assert!(root
        .join("Sci-Fi")
        .join("Blade Runner 1982 1080p")
        .join("movie.mkv")
        .is_file());
    assert!(root
        .join("Action")
        .join("Blade Runner 2049 2017 2160p")
        .join("movie.mkv")
        .is_file());

    let mut calls = client.calls.borrow().clone();
    calls.sort();
    assert_eq!(calls, vec!["Blade Runner", "Blade Runner 2049"]);
}
