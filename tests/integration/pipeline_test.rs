use crate::utils::{AUTHOR_FILE_NAME, column_names, disclosure_csv, read_output, text_column, write_archive, write_author_file};
use disclosure_merge::schema::open_payments::{
    CURRENT_OWNERSHIP_COLUMNS, LEGACY_GENERAL_COLUMNS, LEGACY_RESEARCH_COLUMNS,
};
use disclosure_merge::{ArticleNumberSource, CONTRIBUTED_ARTICLES, DisclosureError, PipelineConfig, run};
use std::path::Path;

fn fixture(root: &Path) -> PipelineConfig {
    let data = root.join("data");
    std::fs::create_dir_all(&data).unwrap();
    std::fs::create_dir_all(root.join("scratch")).unwrap();

    write_archive(
        &data.join("PGYR2015.ZIP"),
        &[
            (
                "OP_DTL_GNRL_PGYR2015_P06302021.csv",
                disclosure_csv(LEGACY_GENERAL_COLUMNS, &["202", "150", "101"], 2015),
            ),
            (
                "OP_DTL_RSRCH_PGYR2015_P06302021.csv",
                disclosure_csv(LEGACY_RESEARCH_COLUMNS, &["202"], 2015),
            ),
        ],
    );
    write_archive(
        &data.join("PGYR2019.ZIP"),
        &[
            (
                "OP_DTL_OWNRSHP_PGYR2019_P01172020.csv",
                disclosure_csv(CURRENT_OWNERSHIP_COLUMNS, &["101", "404"], 2019),
            ),
            ("readme.csv", "text\nhello\n".to_string()),
        ],
    );
    // Lowercase extension is not an archive
    std::fs::write(data.join("PGYR2018.zip"), b"not an archive").unwrap();

    let authors = write_author_file(
        root,
        AUTHOR_FILE_NAME,
        "Author_ID;ArticleID_1;ArticleID_2;ArticleID_3\n101;5;;9\n202;;;\n",
    );

    PipelineConfig::new()
        .with_data_dir(&data)
        .with_results_dir(root.join("results"))
        .with_author_file(authors)
        .with_scratch_dir(root.join("scratch"))
        .with_progress(false)
}

#[test]
fn test_end_to_end_merge() {
    let dir = tempfile::tempdir().unwrap();
    let config = fixture(dir.path());

    let summary = run(&config).unwrap();
    assert_eq!(summary.output_path, dir.path().join("results").join("FINAL_20240628.csv"));
    assert_eq!(summary.archives, 2);
    assert_eq!(summary.tables, 3);
    assert_eq!(summary.rows, 4);
    assert_eq!(std::fs::read_dir(dir.path().join("scratch")).unwrap().count(), 0);

    let output = read_output(&summary.output_path);
    let names = column_names(&output);
    assert_eq!(names.len(), summary.columns);
    assert_eq!(names[0], "Profile_ID");
    assert_eq!(names.last().map(String::as_str), Some(CONTRIBUTED_ARTICLES));
    assert!(names.contains(&"Name_of_Study".to_string()));
    assert!(names.contains(&"NPI".to_string()));
    assert!(!names.iter().any(|n| n.starts_with("Physician_")));

    assert_eq!(
        text_column(&output, "Profile_ID"),
        vec![Some("101".into()), Some("202".into()), Some("202".into()), Some("101".into())]
    );
    assert_eq!(
        text_column(&output, "Category"),
        vec![Some("GNRL".into()), Some("GNRL".into()), Some("RSRCH".into()), Some("OWNRSHP".into())]
    );
    // Empty strings read back as nulls
    assert_eq!(
        text_column(&output, CONTRIBUTED_ARTICLES),
        vec![Some("5, 9".into()), None, None, Some("5, 9".into())]
    );
    // Columns absent from a category are null for its rows
    assert_eq!(text_column(&output, "Name_of_Study")[0], None);
    assert_eq!(text_column(&output, "Name_of_Study")[2], Some("Name_of_Study_0".into()));
}

#[test]
fn test_slot_suffix_numbering_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let config = fixture(dir.path()).with_article_number_source(ArticleNumberSource::SlotSuffix);

    let summary = run(&config).unwrap();
    let output = read_output(&summary.output_path);
    assert_eq!(text_column(&output, CONTRIBUTED_ARTICLES)[0], Some("1, 3".into()));
}

#[test]
fn test_missing_date_token_fails_before_reading_archives() {
    let dir = tempfile::tempdir().unwrap();
    let authors = write_author_file(dir.path(), "authors.csv", "Author_ID;ArticleID_1\n1;2\n");
    let config = PipelineConfig::new()
        .with_data_dir(dir.path().join("does-not-exist"))
        .with_results_dir(dir.path().join("results"))
        .with_author_file(authors)
        .with_progress(false);

    let err = run(&config).unwrap_err();
    assert!(matches!(err, DisclosureError::MissingDateToken(_)));
    assert!(!dir.path().join("results").exists());
}

#[test]
fn test_no_tables_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("data");
    std::fs::create_dir_all(&data).unwrap();
    write_archive(&data.join("EMPTY.ZIP"), &[("readme.csv", "a\n1\n".to_string())]);
    let authors = write_author_file(dir.path(), AUTHOR_FILE_NAME, "Author_ID;ArticleID_1\n1;2\n");

    let config = PipelineConfig::new()
        .with_data_dir(&data)
        .with_results_dir(dir.path().join("results"))
        .with_author_file(authors)
        .with_progress(false);

    let err = run(&config).unwrap_err();
    assert!(matches!(err, DisclosureError::NoTables));
}
