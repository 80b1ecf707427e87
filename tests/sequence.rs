use std::fs::{self, File};
use std::path::Path;

use partio_kit::sequence::{resolve_for_channel, SequencePattern};
use tempfile::tempdir;

fn touch(dir: &Path, name: &str) {
    File::create(dir.join(name)).expect("create cache file");
}

#[test]
fn resolves_the_padded_file_for_a_frame() {
    let dir = tempdir().expect("tempdir");
    touch(dir.path(), "burst.0012.bin");
    touch(dir.path(), "burst.0013.bin");
    touch(dir.path(), "burst.112.bin");
    touch(dir.path(), "burst.0012.prt");
    touch(dir.path(), "spray.0012.bin");

    let channel_value = dir.path().join("burst.####.bin");
    let pattern = SequencePattern::from_path(&channel_value).expect("pattern");
    let found = pattern.resolve_frame(12).expect("scan").expect("frame 12 exists");
    assert_eq!(found, dir.path().join("burst.0012.bin"));
}

#[test]
fn a_concrete_frame_path_finds_its_siblings() {
    let dir = tempdir().expect("tempdir");
    touch(dir.path(), "burst.0001.bin");
    touch(dir.path(), "burst.0002.bin");

    // the channel usually holds one frame of the sequence, not a #### mask
    let channel_value = dir.path().join("burst.0001.bin");
    let pattern = SequencePattern::from_path(&channel_value).expect("pattern");
    let found = pattern.resolve_frame(2).expect("scan").expect("frame 2 exists");
    assert_eq!(found, dir.path().join("burst.0002.bin"));
}

#[test]
fn padding_ties_pick_the_first_name_in_sort_order() {
    let dir = tempdir().expect("tempdir");
    touch(dir.path(), "burst.12.bin");
    touch(dir.path(), "burst.012.bin");
    touch(dir.path(), "burst.0012.bin");

    let pattern = SequencePattern::from_path(&dir.path().join("burst.####.bin")).expect("pattern");
    let first = pattern.resolve_frame(12).expect("scan").expect("frame 12 exists");
    let second = pattern.resolve_frame(12).expect("scan").expect("frame 12 exists");
    assert_eq!(first, dir.path().join("burst.0012.bin"));
    assert_eq!(first, second);
}

#[test]
fn frames_without_files_resolve_to_none() {
    let dir = tempdir().expect("tempdir");
    touch(dir.path(), "burst.0012.bin");

    let pattern = SequencePattern::from_path(&dir.path().join("burst.####.bin")).expect("pattern");
    assert_eq!(pattern.resolve_frame(13).expect("scan"), None);
}

#[test]
fn matching_directories_are_ignored() {
    let dir = tempdir().expect("tempdir");
    fs::create_dir(dir.path().join("burst.0012.bin")).expect("create dir");

    let pattern = SequencePattern::from_path(&dir.path().join("burst.####.bin")).expect("pattern");
    assert_eq!(pattern.resolve_frame(12).expect("scan"), None);
}

#[test]
fn placeholder_channel_values_resolve_to_none() {
    assert_eq!(resolve_for_channel("*.*", 5).expect("placeholder"), None);
    assert_eq!(resolve_for_channel("burst.bin", 5).expect("bare name"), None);
}

#[test]
fn missing_cache_directory_is_an_error() {
    let pattern =
        SequencePattern::from_path(Path::new("/nonexistent/partio/burst.####.bin")).expect("pattern");
    let err = pattern.resolve_frame(1).unwrap_err();
    assert!(format!("{err:#}").contains("scanning cache directory"));
}
