use crate::utils::{column_names, disclosure_csv, write_archive};
use arrow::array::{Array, Int64Array};
use disclosure_merge::reader::CsvOptions;
use disclosure_merge::schema::open_payments::{CURRENT_GENERAL_COLUMNS, LEGACY_RESEARCH_COLUMNS};
use disclosure_merge::{AllowList, DisclosureError, extract_archive, open_payments_registry, process_archive};

#[test]
fn test_extract_lists_top_level_csv_files_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_archive(
        &dir.path().join("PGYR2019.ZIP"),
        &[
            ("OP_DTL_RSRCH_PGYR2019.csv", "a\n1\n".to_string()),
            ("OP_DTL_GNRL_PGYR2019.csv", "a\n1\n".to_string()),
            ("README.txt", "notes".to_string()),
            ("OP_DTL_OWNRSHP_PGYR2019.CSV", "a\n1\n".to_string()),
            ("nested/OP_DTL_GNRL_PGYR2018.csv", "a\n1\n".to_string()),
        ],
    );

    let extracted = extract_archive(&path, None).unwrap();
    let names: Vec<_> = extracted
        .csv_files()
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["OP_DTL_GNRL_PGYR2019.csv", "OP_DTL_RSRCH_PGYR2019.csv"]);
    assert_eq!(extracted.source(), path.as_path());
}

#[test]
fn test_scratch_directory_is_removed_on_drop() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_archive(
        &dir.path().join("PGYR2019.ZIP"),
        &[("OP_DTL_GNRL_PGYR2019.csv", "a\n1\n".to_string())],
    );

    let extracted = extract_archive(&path, None).unwrap();
    let scratch = extracted.scratch_dir().to_path_buf();
    assert!(scratch.join("OP_DTL_GNRL_PGYR2019.csv").exists());

    drop(extracted);
    assert!(!scratch.exists());
}

#[test]
fn test_process_archive_skips_unregistered_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_archive(
        &dir.path().join("PGYR2019.ZIP"),
        &[
            (
                "OP_DTL_GNRL_PGYR2019_P01172020.csv",
                disclosure_csv(CURRENT_GENERAL_COLUMNS, &["303", "101", "999"], 2019),
            ),
            ("OP_DTL_GNRL_PGYR2031_P01172032.csv", disclosure_csv(CURRENT_GENERAL_COLUMNS, &["101"], 2031)),
            ("OP_DTL_REMOVED_PGYR2019.csv", "Record_ID\n1\n".to_string()),
            ("readme.csv", "anything\n1\n".to_string()),
        ],
    );
    let allow = AllowList::new(vec![101, 303]);

    let tables = process_archive(&path, None, open_payments_registry(), &allow, &CsvOptions::default()).unwrap();
    assert_eq!(tables.len(), 1);

    let table = &tables[0];
    let names = column_names(table);
    assert_eq!(names[0], "Profile_ID");
    assert_eq!(names[1], "NPI");
    assert_eq!(names.last().map(String::as_str), Some("Category"));
    assert_eq!(names.len(), CURRENT_GENERAL_COLUMNS.len() + 1);

    let ids = table.column(0).as_any().downcast_ref::<Int64Array>().unwrap();
    assert_eq!(ids.values().to_vec(), vec![101, 303]);
}

#[test]
fn test_missing_column_aborts_archive() {
    let dir = tempfile::tempdir().unwrap();
    let truncated = &LEGACY_RESEARCH_COLUMNS[..LEGACY_RESEARCH_COLUMNS.len() - 1];
    let path = write_archive(
        &dir.path().join("PGYR2014.ZIP"),
        &[("OP_DTL_RSRCH_PGYR2014.csv", disclosure_csv(truncated, &["1"], 2014))],
    );
    let allow = AllowList::new(vec![1]);
    let scratch_root = tempfile::tempdir().unwrap();

    let err = process_archive(
        &path,
        Some(scratch_root.path()),
        open_payments_registry(),
        &allow,
        &CsvOptions::default(),
    )
    .unwrap_err();
    match err {
        DisclosureError::MissingColumns { missing, .. } => assert_eq!(missing, vec!["Program_Year".to_string()]),
        other => panic!("unexpected error: {other}"),
    }

    // The scratch directory is gone even though the archive failed part way
    let leftovers: Vec<_> = std::fs::read_dir(scratch_root.path()).unwrap().collect();
    assert!(leftovers.is_empty(), "scratch directories left behind: {leftovers:?}");
}

#[test]
fn test_scratch_root_is_used_and_emptied() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_archive(
        &dir.path().join("PGYR2019.ZIP"),
        &[("OP_DTL_GNRL_PGYR2019.csv", "a\n1\n".to_string())],
    );
    let scratch_root = tempfile::tempdir().unwrap();

    let extracted = extract_archive(&path, Some(scratch_root.path())).unwrap();
    assert!(extracted.scratch_dir().starts_with(scratch_root.path()));
    let name = extracted.scratch_dir().file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("disclosure-"));

    extracted.close();
    assert_eq!(std::fs::read_dir(scratch_root.path()).unwrap().count(), 0);
}
