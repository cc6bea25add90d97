//! Shared inputs for the pipeline integration tests.

pub const PYTHON_RESUME: &str = "Experienced Python developer with machine learning skills";

pub const PYTHON_POSTING: &str = "We need a Python developer with machine learning experience";

pub const GARDENING_POSTING: &str =
    "Gardener wanted to prune hedges, mow lawns and plant flower beds every spring";

/// Builds a job CSV with the given header row and data rows.
pub fn csv_bytes(headers: &[&str], rows: &[&[&str]]) -> Vec<u8> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(headers).unwrap();
    for row in rows {
        writer.write_record(*row).unwrap();
    }
    writer.into_inner().unwrap()
}

/// Canonical two-column job CSV.
pub fn jobs_csv(rows: &[(&str, &str)]) -> Vec<u8> {
    let rows: Vec<[&str; 2]> = rows.iter().map(|(t, d)| [*t, *d]).collect();
    let rows: Vec<&[&str]> = rows.iter().map(|r| r.as_slice()).collect();
    csv_bytes(&["Job Title", "Job Description"], &rows)
}

/// Gardening first so a correct ranking has to reorder the rows.
pub fn python_vs_gardening() -> Vec<u8> {
    jobs_csv(&[
        ("Gardener", GARDENING_POSTING),
        ("Python Developer", PYTHON_POSTING),
    ])
}
