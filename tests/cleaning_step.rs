//! End-to-end tests of the cleaning step over a filesystem-backed store.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use nyc_clean::data::loader::load_csv;
use nyc_clean::data::model::{CellValue, Table};
use nyc_clean::error::CleanError;
use nyc_clean::step::{self, CleaningParams, CLEAN_FILE_NAME};
use nyc_clean::store::{ArtifactSpec, ArtifactStore, LocalDirStore};

const HEADER: &str = "id,name,price,longitude,latitude,last_review";

struct Fixture {
    _dir: TempDir,
    work_dir: PathBuf,
    store: LocalDirStore,
}

impl Fixture {
    /// A store with `sample.csv` registered at v1 holding the given rows.
    fn with_rows(rows: &[&str]) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let work_dir = dir.path().join("work");
        fs::create_dir_all(&work_dir).unwrap();
        let store = LocalDirStore::open(dir.path().join("artifacts")).unwrap();

        let mut contents = String::from(HEADER);
        contents.push('\n');
        for row in rows {
            contents.push_str(row);
            contents.push('\n');
        }
        let raw = dir.path().join("sample.csv");
        fs::write(&raw, contents).unwrap();
        store
            .register(
                &ArtifactSpec {
                    name: "sample.csv".into(),
                    kind: "raw_data".into(),
                    description: "raw listings".into(),
                },
                &raw,
            )
            .unwrap();

        Fixture {
            _dir: dir,
            work_dir,
            store,
        }
    }

    fn params(min_price: f64, max_price: f64) -> CleaningParams {
        CleaningParams {
            input_artifact: "sample.csv:latest".into(),
            output_artifact: "clean_sample.csv".into(),
            output_type: "clean_sample".into(),
            output_description: "cleaned listings".into(),
            min_price,
            max_price,
        }
    }

    fn run(&self, min_price: f64, max_price: f64) -> Result<Table, CleanError> {
        let handle = step::run(&self.store, &Self::params(min_price, max_price), &self.work_dir)?;
        Ok(load_csv(&handle.path).unwrap())
    }
}

fn prices(table: &Table) -> Vec<f64> {
    let idx = table.column_index("price").unwrap();
    table
        .rows
        .iter()
        .map(|row| row[idx].as_f64().unwrap())
        .collect()
}

#[test]
fn price_range_scenario_keeps_inclusive_bounds() {
    let fixture = Fixture::with_rows(&[
        "1,a,10,-73.95,40.70,2019-05-21",
        "2,b,50,-73.95,40.70,2019-05-21",
        "3,c,200,-73.95,40.70,2019-05-21",
        "4,d,500,-73.95,40.70,2019-05-21",
        "5,e,1000,-73.95,40.70,2019-05-21",
    ]);
    let table = fixture.run(50.0, 500.0).unwrap();
    assert_eq!(prices(&table), vec![50.0, 200.0, 500.0]);
}

#[test]
fn out_of_box_longitude_dropped_regardless_of_price() {
    let fixture = Fixture::with_rows(&[
        "1,a,100,-75.0,40.70,2019-05-21",
        "2,b,100,-73.95,40.70,2019-05-21",
    ]);
    let table = fixture.run(0.0, 1000.0).unwrap();
    assert_eq!(table.len(), 1);
    let idx = table.column_index("id").unwrap();
    assert_eq!(table.value(0, idx), &CellValue::Integer(2));
}

#[test]
fn empty_input_yields_empty_output_with_columns() {
    let fixture = Fixture::with_rows(&[]);
    let table = fixture.run(10.0, 350.0).unwrap();
    assert!(table.is_empty());
    assert_eq!(table.columns.join(","), HEADER);
}

#[test]
fn inverted_price_range_drops_everything() {
    let fixture = Fixture::with_rows(&[
        "1,a,100,-73.95,40.70,2019-05-21",
        "2,b,200,-73.95,40.70,2019-05-21",
    ]);
    let table = fixture.run(500.0, 50.0).unwrap();
    assert!(table.is_empty());
}

#[test]
fn unparseable_last_review_becomes_null_not_a_dropped_row() {
    let fixture = Fixture::with_rows(&[
        "1,a,100,-73.95,40.70,never reviewed",
        "2,b,100,-73.95,40.70,2019-05-21",
        "3,c,100,-73.95,40.70,",
    ]);
    let table = fixture.run(0.0, 1000.0).unwrap();
    assert_eq!(table.len(), 3);

    let idx = table.column_index("last_review").unwrap();
    assert_eq!(table.value(0, idx), &CellValue::Null);
    assert!(matches!(table.value(1, idx), CellValue::Date(_)));
    assert_eq!(table.value(2, idx), &CellValue::Null);
}

#[test]
fn retained_rows_satisfy_both_filters() {
    let fixture = Fixture::with_rows(&[
        "1,a,5,-73.95,40.70,2019-05-21",    // price too low
        "2,b,120,-73.95,40.70,2019-05-21",  // kept
        "3,c,120,-74.30,40.70,2019-05-21",  // longitude out
        "4,d,120,-73.95,41.50,2019-05-21",  // latitude out
        "5,e,,-73.95,40.70,2019-05-21",     // missing price
        "6,f,400,-75.00,41.00,2019-05-21",  // longitude out
    ]);
    let table = fixture.run(10.0, 350.0).unwrap();

    assert_eq!(prices(&table), vec![120.0]);

    let lon = table.column_index("longitude").unwrap();
    let lat = table.column_index("latitude").unwrap();
    let price = table.column_index("price").unwrap();
    for row in 0..table.len() {
        let p = table.value(row, price).as_f64().unwrap();
        let x = table.value(row, lon).as_f64().unwrap();
        let y = table.value(row, lat).as_f64().unwrap();
        assert!((10.0..=350.0).contains(&p));
        assert!((-74.25..=-73.50).contains(&x));
        assert!((40.5..=41.2).contains(&y));
    }
}

#[test]
fn intermediate_file_is_left_in_the_working_directory() {
    let fixture = Fixture::with_rows(&["1,a,100,-73.95,40.70,2019-05-21"]);
    fixture.run(0.0, 1000.0).unwrap();
    assert!(fixture.work_dir.join(CLEAN_FILE_NAME).exists());
}

#[test]
fn rerunning_registers_a_new_version() {
    let fixture = Fixture::with_rows(&["1,a,100,-73.95,40.70,2019-05-21"]);
    let first = step::run(
        &fixture.store,
        &Fixture::params(0.0, 1000.0),
        &fixture.work_dir,
    )
    .unwrap();
    let second = step::run(
        &fixture.store,
        &Fixture::params(0.0, 1000.0),
        &fixture.work_dir,
    )
    .unwrap();
    assert_eq!(first.version, 1);
    assert_eq!(second.version, 2);
}

#[test]
fn unresolvable_input_aborts_before_registration() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalDirStore::open(dir.path().join("artifacts")).unwrap();

    let err = step::run(&store, &Fixture::params(0.0, 1000.0), dir.path()).unwrap_err();
    assert!(matches!(err, CleanError::Resolution { .. }), "got {err:?}");

    // No output artifact directory was created.
    assert!(!store.root().join("clean_sample.csv").exists());
    assert!(!dir.path().join(CLEAN_FILE_NAME).exists());
}

#[test]
fn run_configuration_is_recorded_for_provenance() {
    let fixture = Fixture::with_rows(&["1,a,100,-73.95,40.70,2019-05-21"]);
    fixture.run(0.0, 1000.0).unwrap();

    let runs_dir = fixture.store.root().join("runs");
    let entries: Vec<_> = fs::read_dir(&runs_dir).unwrap().collect();
    assert_eq!(entries.len(), 1);

    let path = entries[0].as_ref().unwrap().path();
    let config: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(config["input_artifact"], "sample.csv:latest");
    assert_eq!(config["min_price"], 0.0);
}

#[test]
fn passthrough_columns_survive_untouched() {
    let fixture = Fixture::with_rows(&["7,Quiet room in Harlem,100,-73.95,40.80,2019-05-21"]);
    let table = fixture.run(0.0, 1000.0).unwrap();
    let name = table.column_index("name").unwrap();
    assert_eq!(
        table.value(0, name),
        &CellValue::String("Quiet room in Harlem".into())
    );
}
