//! Fleet database codec.
//!
//! The database is a CSV document whose first row is exactly
//! `type,name,year,make_model,length,price,expenses`, followed by one row per
//! boat in fleet order. Reals are written in shortest round-trip form, so a
//! reload reproduces every value bit for bit. The header doubles as the
//! format marker: a file with any other first row is rejected.

use crate::domain::{Boat, BoatType, Fleet, Storage};
use crate::utils::error::{FleetError, Result};
use serde::{Deserialize, Serialize};

pub const DATABASE_FILE: &str = "FleetData.db";

const HEADER: [&str; 7] = [
    "type",
    "name",
    "year",
    "make_model",
    "length",
    "price",
    "expenses",
];

#[derive(Debug, Serialize, Deserialize)]
struct BoatRecord {
    #[serde(rename = "type")]
    boat_type: BoatType,
    name: String,
    year: i32,
    make_model: String,
    length: f64,
    price: f64,
    expenses: f64,
}

impl From<&Boat> for BoatRecord {
    fn from(boat: &Boat) -> Self {
        Self {
            boat_type: boat.boat_type(),
            name: boat.name().to_string(),
            year: boat.year(),
            make_model: boat.make_model().to_string(),
            length: boat.length(),
            price: boat.price(),
            expenses: boat.expenses(),
        }
    }
}

impl TryFrom<BoatRecord> for Boat {
    type Error = FleetError;

    fn try_from(record: BoatRecord) -> Result<Self> {
        if record.name.is_empty() {
            return Err(FleetError::decode("boat with empty name"));
        }
        if !record.length.is_finite() || !record.price.is_finite() || record.price < 0.0 {
            return Err(FleetError::decode(format!(
                "boat '{}' has invalid length or price",
                record.name
            )));
        }
        Boat::new(
            record.boat_type,
            record.name,
            record.year,
            record.make_model,
            record.length,
            record.price,
        )
        .with_expenses(record.expenses)
    }
}

pub fn encode(fleet: &Fleet) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(HEADER)?;
    for boat in fleet.boats() {
        writer.serialize(BoatRecord::from(boat))?;
    }

    writer
        .into_inner()
        .map_err(|e| FleetError::IoError(e.into_error()))
}

pub fn decode(data: &[u8]) -> Result<Fleet> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(data);

    let headers = reader.headers()?;
    if headers.iter().ne(HEADER) {
        return Err(FleetError::decode(format!(
            "unexpected header {:?}",
            headers.iter().collect::<Vec<_>>()
        )));
    }

    let boats = reader
        .deserialize::<BoatRecord>()
        .map(|record| Boat::try_from(record?))
        .collect::<Result<Vec<_>>>()?;

    Ok(Fleet::from_boats(boats))
}

/// Reads and decodes the database at `path`. Callers treat any error as
/// "no saved fleet".
pub fn load<S: Storage>(storage: &S, path: &str) -> Result<Fleet> {
    let data = storage.read_file(path)?;
    let fleet = decode(&data)?;
    tracing::info!("Loaded {} boats from {}", fleet.len(), path);
    Ok(fleet)
}

pub fn save<S: Storage>(storage: &S, path: &str, fleet: &Fleet) -> Result<()> {
    let data = encode(fleet)?;
    storage.write_file(path, &data)?;
    tracing::info!("Saved {} boats to {}", fleet.len(), path);
    Ok(())
}
