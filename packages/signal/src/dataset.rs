//! Synthetic dataset CSV file.
//!
//! Columns follow [`TRAINING_COLUMNS`]. Integer-valued signals are written
//! without a fractional part and festival intensity is rounded to two
//! decimals, matching the files the regression model was fitted on.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use serde::Deserialize;
use wpi_signal_models::{FeatureSet, TRAINING_COLUMNS, TrainingRow};

use crate::{GenerateError, round2};

/// Writes `rows` as CSV with a header line.
///
/// # Errors
///
/// Returns an error if writing to `writer` fails.
pub fn write_csv<W: Write>(rows: &[TrainingRow], writer: W) -> Result<(), GenerateError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(TRAINING_COLUMNS)?;

    for row in rows {
        let f = &row.features;
        csv_writer.write_record([
            row.ward_id.clone(),
            row.ward_name.clone(),
            row.zone.clone(),
            row.month.to_string(),
            row.day_of_month.to_string(),
            f.festival_flag().to_string(),
            round2(f.festival_intensity).to_string(),
            f.complaint_intensity.to_string(),
            f.crowd_index.to_string(),
            f.weather_risk.to_string(),
            row.wpi.to_string(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Writes `rows` to a CSV file at `path`, creating parent directories.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be created or written.
pub fn write_csv_file(rows: &[TrainingRow], path: &Path) -> Result<(), GenerateError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    write_csv(rows, file)?;
    log::info!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

/// Flat CSV record. `TrainingRow` flattens its feature set, which the
/// `csv` deserializer cannot handle directly.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    ward_id: String,
    ward_name: String,
    zone: String,
    month: u32,
    day_of_month: u32,
    is_festival_window: u8,
    festival_intensity: f64,
    complaint_intensity: f64,
    crowd_index: f64,
    weather_risk: f64,
    wpi: u32,
}

impl From<CsvRecord> for TrainingRow {
    fn from(record: CsvRecord) -> Self {
        Self {
            ward_id: record.ward_id,
            ward_name: record.ward_name,
            zone: record.zone,
            month: record.month,
            day_of_month: record.day_of_month,
            features: FeatureSet {
                is_festival_window: record.is_festival_window != 0,
                festival_intensity: record.festival_intensity,
                complaint_intensity: record.complaint_intensity,
                crowd_index: record.crowd_index,
                weather_risk: record.weather_risk,
            },
            wpi: record.wpi,
        }
    }
}

/// Reads training rows from CSV with a header line.
///
/// # Errors
///
/// Returns an error if the data is not valid CSV or a field does not parse.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<TrainingRow>, GenerateError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    csv_reader
        .deserialize::<CsvRecord>()
        .map(|record| -> Result<TrainingRow, GenerateError> { Ok(record?.into()) })
        .collect()
}

/// Reads training rows from the CSV file at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or parsed.
pub fn read_csv_file(path: &Path) -> Result<Vec<TrainingRow>, GenerateError> {
    read_csv(File::open(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::DatasetGenerator;
    use crate::profiles;
    use crate::progress::NullProgress;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn sample_row() -> TrainingRow {
        TrainingRow {
            ward_id: "X001".to_string(),
            ward_name: "Fort".to_string(),
            zone: "Island City".to_string(),
            month: 9,
            day_of_month: 12,
            features: FeatureSet {
                is_festival_window: true,
                festival_intensity: 0.9,
                complaint_intensity: 118.0,
                crowd_index: 140.0,
                weather_risk: 33.0,
            },
            wpi: 56,
        }
    }

    #[test]
    fn writes_header_and_integer_columns() {
        let mut out = Vec::new();
        write_csv(&[sample_row()], &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some(
                "ward_id,ward_name,zone,month,day_of_month,is_festival_window,\
                 festival_intensity,complaint_intensity,crowd_index,weather_risk,wpi"
            )
        );
        assert_eq!(lines.next(), Some("X001,Fort,Island City,9,12,1,0.9,118,140,33,56"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn reads_back_generated_rows() {
        let generator = DatasetGenerator::new(profiles::profile("v1").unwrap()).unwrap();
        let rows = generator
            .generate(300, &mut StdRng::seed_from_u64(21), &NullProgress)
            .unwrap();

        let mut out = Vec::new();
        write_csv(&rows, &mut out).unwrap();
        let back = read_csv(out.as_slice()).unwrap();

        assert_eq!(back.len(), rows.len());
        for (written, read) in rows.iter().zip(&back) {
            assert_eq!(written.ward_id, read.ward_id);
            assert_eq!(written.wpi, read.wpi);
            assert_eq!(
                written.features.is_festival_window,
                read.features.is_festival_window
            );
            assert!(
                (round2(written.features.festival_intensity) - read.features.festival_intensity)
                    .abs()
                    < 1e-9
            );
        }
    }

    #[test]
    fn rejects_malformed_rows() {
        let data = "ward_id,ward_name,zone,month,day_of_month,is_festival_window,\
                    festival_intensity,complaint_intensity,crowd_index,weather_risk,wpi\n\
                    W001,Colaba,South,nine,1,0,0.1,40,50,20,20\n";
        assert!(matches!(read_csv(data.as_bytes()), Err(GenerateError::Csv(_))));
    }
}
