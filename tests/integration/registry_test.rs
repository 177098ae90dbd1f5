use crate::utils::{column_names, disclosure_csv};
use disclosure_merge::loader::normalize_disclosure;
use disclosure_merge::reader::CsvOptions;
use disclosure_merge::schema::CATEGORY_COLUMN;
use disclosure_merge::{AllowList, open_payments_registry};

/// Every registered layout normalizes to its renamed read columns plus the tag
#[test]
fn test_every_layout_normalizes_to_renamed_columns() {
    let dir = tempfile::tempdir().unwrap();
    let registry = open_payments_registry();
    let allow = AllowList::new(vec![42]);

    for key in registry.keys() {
        let columns = registry.columns(key.category, key.year).unwrap();
        let names: Vec<&str> = columns.iter().map(String::as_str).collect();
        let path = dir.path().join(format!("OP_DTL_{}_PGYR{}.csv", key.category.code(), key.year));
        std::fs::write(&path, disclosure_csv(&names, &["42", "7"], key.year)).unwrap();

        let table = normalize_disclosure(
            &path,
            columns,
            key.category,
            key.year,
            registry,
            &allow,
            &CsvOptions::default(),
        )
        .unwrap();

        let mut expected = registry.normalized_columns(key.category, key.year).unwrap();
        expected.push(CATEGORY_COLUMN.to_string());
        assert_eq!(column_names(&table), expected, "layout {} {}", key.category, key.year);
        assert_eq!(table.num_rows(), 1);
    }
}
