use std::io::Write;

use flate2::Compression;
use flate2::write::GzEncoder;
use kira_trendqc::error::PipelineError;
use kira_trendqc::input::{InputFormat, parse, read_upload};
use tempfile::TempDir;

const CSV: &str = "date,category,value\n\
2024-01-02,A,12\n\
2024-01-01,A,10\n\
2024-01-01,B,5\n\
not-a-date,A,99\n\
2024-01-03,A,\n\
2024-01-03,,7\n";

#[test]
fn csv_groups_by_category_and_sorts_by_date() {
    let series = parse(CSV.as_bytes(), InputFormat::Csv).unwrap();
    let keys: Vec<&str> = series.keys().map(|k| k.as_str()).collect();
    assert_eq!(keys, vec!["category_A", "category_B"]);

    let a = &series["category_A"];
    assert_eq!(a.category, "A");
    assert_eq!(a.len(), 3);
    assert_eq!(a.values(), vec![Some(10.0), Some(12.0), None]);
    let ts = a.timestamps();
    assert!(ts.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(series["category_B"].len(), 1);
}

#[test]
fn csv_accepts_reordered_columns_and_datetimes() {
    let csv = "value,date,category\n1.5,2024-02-01 10:30:00,x\n2.5,2024-02-01T11:30:00,x\n";
    let series = parse(csv.as_bytes(), InputFormat::Csv).unwrap();
    assert_eq!(series["category_x"].values(), vec![Some(1.5), Some(2.5)]);
}

#[test]
fn csv_non_finite_values_become_missing() {
    let csv = "date,category,value\n2024-01-01,A,inf\n2024-01-02,A,NaN\n2024-01-03,A,1e309\n";
    let series = parse(csv.as_bytes(), InputFormat::Csv).unwrap();
    assert_eq!(series["category_A"].missing_count(), 3);
}

#[test]
fn json_out_of_range_numbers_become_missing() {
    let doc = r#"[{"date":"2024-01-01","category":"A","value":1.0},
                  {"date":"2024-01-02","category":"A","value":1e400},
                  {"date":"2024-01-03","category":"A","value":-1e400},
                  {"date":"2024-01-04","category":"A","value":3.0}]"#;
    let series = parse(doc.as_bytes(), InputFormat::Json).unwrap();
    assert_eq!(series["category_A"].values(), vec![Some(1.0), None, None, Some(3.0)]);

    let csv = "date,category,value\n2024-01-01,A,1.0\n2024-01-02,A,1e400\n2024-01-03,A,3.0\n";
    let from_csv = parse(csv.as_bytes(), InputFormat::Csv).unwrap();
    assert_eq!(from_csv["category_A"].values(), vec![Some(1.0), None, Some(3.0)]);
}

#[test]
fn csv_rejects_non_standard_columns() {
    let csv = "date,pair,value\n2024-01-01,A,1\n";
    let err = parse(csv.as_bytes(), InputFormat::Csv).unwrap_err();
    assert!(matches!(err, PipelineError::InvalidInput(_)));

    let csv = "date,category,value,extra\n2024-01-01,A,1,2\n";
    let err = parse(csv.as_bytes(), InputFormat::Csv).unwrap_err();
    assert!(matches!(err, PipelineError::InvalidInput(_)));
}

#[test]
fn json_accepts_list_or_data_object() {
    let list = r#"[{"date":"2024-01-01","category":"A","value":1},
                   {"date":"2024-01-02","category":"A","value":"2"}]"#;
    let series = parse(list.as_bytes(), InputFormat::Json).unwrap();
    assert_eq!(series["category_A"].values(), vec![Some(1.0), Some(2.0)]);

    let wrapped = r#"{"data":[{"date":"2024-01-01","category":7,"value":3.5}]}"#;
    let series = parse(wrapped.as_bytes(), InputFormat::Json).unwrap();
    assert_eq!(series["category_7"].values(), vec![Some(3.5)]);
}

#[test]
fn json_malformed_structure_is_invalid_input() {
    for doc in [r#"{"rows":[]}"#, r#"{"data":{}}"#, "42", "{not json", r#"[1,2]"#] {
        let err = parse(doc.as_bytes(), InputFormat::Json).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidInput(_)), "{}", doc);
    }
}

#[test]
fn json_empty_list_parses_to_nothing() {
    let series = parse(b"[]", InputFormat::Json).unwrap();
    assert!(series.is_empty());
}

#[test]
fn format_detection_by_extension() {
    assert_eq!(InputFormat::detect("upload.csv").unwrap(), (InputFormat::Csv, false));
    assert_eq!(InputFormat::detect("UPLOAD.JSON").unwrap(), (InputFormat::Json, false));
    assert_eq!(InputFormat::detect("upload.csv.gz").unwrap(), (InputFormat::Csv, true));
    for name in ["upload.txt", "upload.xlsx", "upload.gz", "upload"] {
        let err = InputFormat::detect(name).unwrap_err();
        assert!(matches!(err, PipelineError::UnsupportedFormat(_)), "{}", name);
    }
}

#[test]
fn read_upload_decompresses_gzip() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("upload.csv.gz");
    let mut enc = GzEncoder::new(Vec::new(), Compression::default());
    enc.write_all(CSV.as_bytes()).unwrap();
    std::fs::write(&path, enc.finish().unwrap()).unwrap();

    let (content, format) = read_upload(&path, None).unwrap();
    assert_eq!(format, InputFormat::Csv);
    assert_eq!(content, CSV.as_bytes());
}

#[test]
fn declared_format_overrides_extension() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("upload.txt");
    std::fs::write(&path, CSV).unwrap();
    assert!(read_upload(&path, None).is_err());
    let (_, format) = read_upload(&path, Some(InputFormat::Csv)).unwrap();
    assert_eq!(format, InputFormat::Csv);
}
