use igo_common::{Error, Result};
use igo_graph::CongestionMeasurement;
use std::collections::HashMap;

/// Parses the highway directory CSV: `id, description, coordinates` with a
/// header row to skip, `coordinates` a flat `lon1,lat1,lon2,lat2,...` list.
///
/// Grounded on `igo.py::_download_highways` (csv.reader with `,` delimiter,
/// `"` quoting, `next(reader)` to skip the header).
pub fn parse_highway_directory(text: &str) -> Result<HashMap<i64, Vec<(f64, f64)>>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b',')
        .quote(b'"')
        .has_headers(true)
        .from_reader(text.as_bytes());

    let mut highways = HashMap::new();
    for record in reader.records() {
        let record = record.map_err(|e| Error::Parse(e.to_string()))?;
        if record.len() != 3 {
            return Err(Error::Parse(format!(
                "expected 3 columns (id, description, coordinates), got {}",
                record.len()
            )));
        }
        let way_id: i64 = record[0]
            .parse()
            .map_err(|_| Error::Parse(format!("invalid way_id: {}", &record[0])))?;
        let coords = parse_flat_coords(&record[2])?;
        highways.insert(way_id, coords);
    }
    Ok(highways)
}

fn parse_flat_coords(field: &str) -> Result<Vec<(f64, f64)>> {
    let values: std::result::Result<Vec<f64>, _> = field.split(',').map(|v| v.trim().parse::<f64>()).collect();
    let values = values.map_err(|_| Error::Parse(format!("non-numeric coordinate in: {field}")))?;
    if values.len() % 2 != 0 {
        return Err(Error::Parse(format!(
            "odd number of coordinate components ({}) in: {field}",
            values.len()
        )));
    }
    Ok(values.chunks_exact(2).map(|c| (c[0], c[1])).collect())
}

/// Parses the `#`-delimited congestion feed: `way_id#date#actual#predicted`,
/// no header row, retaining only the newest `date` per `way_id`.
///
/// Grounded on `igo.py::_download_congestions`.
pub fn parse_congestion_feed(text: &str) -> Result<HashMap<i64, CongestionMeasurement>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'#')
        .has_headers(false)
        .from_reader(text.as_bytes());

    let mut congestions: HashMap<i64, CongestionMeasurement> = HashMap::new();
    for record in reader.records() {
        let record = record.map_err(|e| Error::Parse(e.to_string()))?;
        if record.len() != 4 {
            return Err(Error::Parse(format!(
                "expected 4 columns (way_id, date, actual, predicted), got {}",
                record.len()
            )));
        }
        let parse_i64 = |field: &str| -> Result<i64> {
            field.trim().parse().map_err(|_| Error::Parse(format!("non-integer field: {field}")))
        };
        let way_id = parse_i64(&record[0])?;
        let date = parse_i64(&record[1])?;
        let actual = parse_i64(&record[2])?;
        let predicted = parse_i64(&record[3])?;

        let measurement = CongestionMeasurement {
            way_id,
            date,
            actual: actual as u8,
            predicted: predicted as u8,
        };

        match congestions.get(&way_id) {
            Some(existing) if existing.date >= date => {}
            _ => {
                congestions.insert(way_id, measurement);
            }
        }
    }
    Ok(congestions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_highway_csv_skipping_header() {
        let csv = "id,description,coordinates\n\
                    1001,\"Gran Via\",\"2.15,41.38,2.16,41.39,2.17,41.40\"\n";
        let highways = parse_highway_directory(csv).unwrap();
        assert_eq!(highways.len(), 1);
        assert_eq!(
            highways[&1001],
            vec![(2.15, 41.38), (2.16, 41.39), (2.17, 41.40)]
        );
    }

    #[test]
    fn rejects_odd_coordinate_count() {
        let csv = "id,description,coordinates\n1001,\"x\",\"1.0,2.0,3.0\"\n";
        assert!(parse_highway_directory(csv).is_err());
    }

    #[test]
    fn congestion_feed_keeps_only_newest_date_per_way() {
        let feed = "1001#100#2#3\n1001#200#4#5\n1002#50#1#1\n";
        let congestions = parse_congestion_feed(feed).unwrap();
        assert_eq!(congestions.len(), 2);
        assert_eq!(congestions[&1001].date, 200);
        assert_eq!(congestions[&1001].actual, 4);
        assert_eq!(congestions[&1002].actual, 1);
    }
}
