use std::io::Write;

use housing_explorer::analysis::aggregate::{
    avg_income_bedrooms_gt_n, avg_population_bedrooms_gt_n,
};
use housing_explorer::analysis::group::average_income_by_bedrooms;
use housing_explorer::analysis::missing::{clean_missing, count_missing_per_column};
use housing_explorer::analysis::stats::{compute_column_stats, income_mean, mean_of_column};
use housing_explorer::analysis::AnalysisError;
use housing_explorer::data::loader::load_file;
use housing_explorer::menu::Menu;
use housing_explorer::state::Session;
use housing_explorer::ui::TextSink;
use tempfile::NamedTempFile;

const HEADER: &str = "lon,lat,age,rooms,bedrooms,pop,households,income,value\n";

fn write_csv(body: &str) -> NamedTempFile {
    let mut tmp = NamedTempFile::new().unwrap();
    write!(tmp, "{HEADER}{body}").unwrap();
    tmp
}

#[test]
fn end_to_end_two_row_scenario() {
    let tmp = write_csv("0,0,0,10,5,1200,300,8.0,500000\n0,0,0,20,3,800,200,5.0,300000\n");
    let ds = load_file(tmp.path()).unwrap();
    assert_eq!(ds.len(), 2);
    assert_eq!(ds.column_names.len(), 9);

    assert_eq!(avg_population_bedrooms_gt_n(&ds, 4.0), Ok(1200.0));

    let grouped = average_income_by_bedrooms(&ds).unwrap();
    assert_eq!(grouped.groups, vec![3.0, 5.0]);
    assert_eq!(grouped.averages, vec![5.0, 8.0]);

    assert!(matches!(
        avg_income_bedrooms_gt_n(&ds, 100.0),
        Err(AnalysisError::EmptyDataset { .. })
    ));
}

#[test]
fn missing_values_propagate_until_cleanup() {
    let tmp = write_csv("0,0,0,10,,1200,300,8.0,500000\n0,0,0,20,3,800,200,,300000\n");
    let mut ds = load_file(tmp.path()).unwrap();
    assert_eq!(count_missing_per_column(&ds), vec![0, 0, 0, 0, 1, 0, 0, 1, 0]);
    assert!(income_mean(&ds).unwrap().is_nan());

    let stats = compute_column_stats(&ds, &ds.column_names).unwrap();
    assert!(stats.columns[4].mode.is_nan());

    clean_missing(&mut ds);
    assert_eq!(count_missing_per_column(&ds), vec![0; 9]);
    assert_eq!(income_mean(&ds), Ok(4.0));
    assert_eq!(mean_of_column(&ds, 4), Ok(1.5));

    let snapshot = ds.clone();
    clean_missing(&mut ds);
    assert_eq!(ds, snapshot);
}

#[test]
fn grouped_counts_cover_every_row() {
    let tmp = write_csv(
        "0,0,0,1,2,0,0,1,0\n0,0,0,1,2,0,0,3,0\n0,0,0,1,7,0,0,5,0\n0,0,0,1,1,0,0,9,0\n",
    );
    let ds = load_file(tmp.path()).unwrap();
    let grouped = average_income_by_bedrooms(&ds).unwrap();
    assert_eq!(grouped.groups, vec![1.0, 2.0, 7.0]);
    assert_eq!(grouped.averages, vec![9.0, 2.0, 5.0]);
    assert_eq!(grouped.counts.iter().sum::<usize>(), ds.len());
}

#[test]
fn headless_menu_session() {
    let tmp = write_csv("0,0,0,10,5,1200,300,8.0,500000\n0,0,0,20,3,800,200,5.0,300000\n");
    let session = Session::open(tmp.path());
    let script = "5\n6\n1\n9\n10\n8\n";
    let mut menu = Menu::new(
        session,
        script.as_bytes(),
        Vec::new(),
        TextSink::new(Vec::new()),
        10,
    );
    menu.run().unwrap();
    let out = String::from_utf8(menu.into_output()).unwrap();

    assert!(out.contains("Column 'bedrooms': Mean=4, Max=5, Median=4, Mode=3"));
    assert!(out.contains("Income Mean: 6.5"));
    assert!(out.contains("Exiting the program."));
}

#[test]
fn missing_file_menu_still_exits() {
    let session = Session::open(std::path::Path::new("/no/such/dir/housing.csv"));
    let mut menu = Menu::new(
        session,
        "3\n8\n".as_bytes(),
        Vec::new(),
        TextSink::new(Vec::new()),
        10,
    );
    menu.run().unwrap();
    let out = String::from_utf8(menu.into_output()).unwrap();
    assert!(out.contains("dataset file not found"));
    assert!(out.contains("No dataset loaded"));
    assert!(out.contains("Exiting the program."));
}

#[test]
fn signed_nan_bedrooms_share_one_group() {
    let tmp = write_csv("0,0,0,1,-nan,0,0,100,0\n0,0,0,1,2,0,0,4,0\n0,0,0,1,nan,0,0,6,0\n");
    let ds = load_file(tmp.path()).unwrap();
    let grouped = average_income_by_bedrooms(&ds).unwrap();
    assert_eq!(grouped.groups.len(), 2);
    assert_eq!(grouped.groups[0], 2.0);
    assert!(grouped.groups[1].is_nan());
    assert_eq!(grouped.averages, vec![4.0, 53.0]);
    assert_eq!(grouped.counts, vec![1, 2]);
}
