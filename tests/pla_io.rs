//! PLA file round-trips through real files

use std::io::Write;

use ristretto_logic::{Cover, CoverType, Minimizable, PLAReader, PLAWriter};

#[test]
fn file_round_trip() {
    let mut input = tempfile::NamedTempFile::new().unwrap();
    write!(
        input,
        ".i 3\n.o 2\n.ilb a b c\n.ob x y\n.p 3\n000 11\n01- 10\n1-1 01\n.e\n"
    )
    .unwrap();
    input.flush().unwrap();

    let cover = Cover::from_pla_file(input.path()).unwrap();
    assert_eq!(cover.num_inputs(), 3);
    assert_eq!(cover.num_outputs(), 2);
    assert_eq!(cover.num_cubes(), 3);

    let output = tempfile::NamedTempFile::new().unwrap();
    cover.to_pla_file(output.path(), CoverType::F).unwrap();
    let again = Cover::from_pla_file(output.path()).unwrap();
    assert_eq!(again.num_cubes(), 3);
    let labels: Vec<&str> = again.input_labels().iter().map(|l| l.as_ref()).collect();
    assert_eq!(labels, vec!["a", "b", "c"]);
}

#[test]
fn minimize_from_file_to_writer() {
    let mut input = tempfile::NamedTempFile::new().unwrap();
    write!(input, ".i 2\n.o 1\n.p 2\n00 1\n01 1\n.e\n").unwrap();
    input.flush().unwrap();

    let cover = Cover::from_pla_file(input.path()).unwrap();
    let minimized = cover.minimize().unwrap();

    let mut buffer = Vec::new();
    minimized.write_pla(&mut buffer, CoverType::F).unwrap();
    let text = String::from_utf8(buffer).unwrap();
    assert!(text.contains(".p 1"));
    assert!(text.contains("0- 1"));
}

#[test]
fn fd_round_trip_keeps_dont_cares() {
    let text = ".i 2\n.o 1\n.type fd\n10 1\n11 -\n.e\n";
    let cover = Cover::from_pla_string(text).unwrap();
    let written = cover.to_pla_string(CoverType::FD).unwrap();
    // One ON row and one DC row in the output.
    assert!(written.contains("10 1"));
    assert!(written.contains("11 2"));
    let back = Cover::from_pla_string(&written).unwrap();
    assert_eq!(back.num_cubes(), 1);
    assert_eq!(back.cover_type(), CoverType::FD);
}

#[test]
fn missing_file_is_io_error() {
    let err = Cover::from_pla_file("/nonexistent/path.pla").unwrap_err();
    assert!(matches!(err, ristretto_logic::PLAReadError::Io(_)));
}

#[test]
fn fr_type_reads_explicit_offset() {
    let text = ".i 2\n.o 1\n.type fr\n11 1\n00 0\n01 0\n10 0\n.e\n";
    let cover = Cover::from_pla_string(text).unwrap();
    assert_eq!(cover.cover_type(), CoverType::FR);
    // FR covers count every row.
    assert_eq!(cover.num_cubes(), 4);
    let minimized = cover.minimize().unwrap();
    // The ON-set is the single minterm 11.
    let on_rows = minimized
        .rows_as_strings()
        .into_iter()
        .filter(|r| r.ends_with('1'))
        .count();
    assert_eq!(on_rows, 1);
}

trait RowsAsStrings {
    fn rows_as_strings(&self) -> Vec<String>;
}

impl RowsAsStrings for Cover {
    fn rows_as_strings(&self) -> Vec<String> {
        self.to_pla_string(CoverType::F)
            .unwrap()
            .lines()
            .filter(|l| !l.starts_with('.'))
            .map(str::to_string)
            .collect()
    }
}
