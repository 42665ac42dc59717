//! CSV ingestion and row-level preprocessing
//!
//! Reads the transaction and identity tables, left-joins them on
//! `TransactionID`, imputes missing values (median for numeric columns, mode
//! for categorical), label-encodes categoricals, and optionally down-samples
//! to a fixed row budget with a seeded RNG.

use std::collections::HashMap;
use std::path::Path;

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::{Error, Result};

const JOIN_KEY: &str = "TransactionID";
const TARGET: &str = "isFraud";

/// Raw delimited table: header row plus string fields, empty field = missing
struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

fn read_table(path: &Path) -> Result<RawTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_path(path)
        .map_err(|e| Error::DataLoad(format!("{}: {e}", path.display())))?;

    let headers = reader
        .headers()
        .map_err(|e| Error::DataLoad(format!("{}: {e}", path.display())))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| Error::DataLoad(format!("{}: {e}", path.display())))?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(RawTable { headers, rows })
}

fn column_index(table: &RawTable, name: &str, path: &Path) -> Result<usize> {
    table.headers.iter().position(|h| h == name).ok_or_else(|| {
        Error::DataLoad(format!("{}: missing column '{name}'", path.display()))
    })
}

/// Left-join `identity` onto `transactions`; absent identity rows become
/// all-missing fields.
fn left_join(transactions: RawTable, identity: RawTable, id_path: &Path) -> Result<RawTable> {
    let tx_key = transactions
        .headers
        .iter()
        .position(|h| h == JOIN_KEY)
        .ok_or_else(|| Error::DataLoad(format!("transaction table: missing column '{JOIN_KEY}'")))?;
    let id_key = column_index(&identity, JOIN_KEY, id_path)?;

    let mut by_key: HashMap<&str, &Vec<String>> = HashMap::new();
    for row in &identity.rows {
        by_key.insert(row[id_key].as_str(), row);
    }

    let id_width = identity.headers.len() - 1;
    let mut headers = transactions.headers.clone();
    headers.extend(
        identity
            .headers
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != id_key)
            .map(|(_, h)| h.clone()),
    );

    let mut rows = Vec::with_capacity(transactions.rows.len());
    for tx_row in transactions.rows {
        let key = tx_row[tx_key].clone();
        let mut merged = tx_row;
        match by_key.get(key.as_str()) {
            Some(id_row) => merged.extend(
                id_row
                    .iter()
                    .enumerate()
                    .filter(|&(i, _)| i != id_key)
                    .map(|(_, v)| v.clone()),
            ),
            None => merged.extend(std::iter::repeat(String::new()).take(id_width)),
        }
        rows.push(merged);
    }

    Ok(RawTable { headers, rows })
}

fn median(mut values: Vec<f64>) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        values[mid]
    } else {
        (values[mid - 1] + values[mid]) / 2.0
    }
}

fn mode<'a>(values: impl Iterator<Item = &'a str>) -> String {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for v in values {
        *counts.entry(v).or_default() += 1;
    }
    counts
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(a.0)))
        .map(|(v, _)| v.to_string())
        .unwrap_or_default()
}

/// One encoded feature column
fn encode_column(fields: &[&str]) -> Vec<f64> {
    let present: Vec<&str> = fields.iter().copied().filter(|f| !f.is_empty()).collect();
    let numeric = !present.is_empty() && present.iter().all(|f| f.parse::<f64>().is_ok());

    if numeric {
        let fill = median(
            present
                .iter()
                .filter_map(|f| f.parse::<f64>().ok())
                .collect(),
        );
        fields
            .iter()
            .map(|f| f.parse::<f64>().unwrap_or(fill))
            .collect()
    } else {
        // Categorical: impute with the mode, then label-encode over the
        // sorted distinct values so the mapping is order-independent
        let fill = mode(present.iter().copied());
        let mut distinct: Vec<&str> = fields
            .iter()
            .map(|f| if f.is_empty() { fill.as_str() } else { f })
            .collect();
        distinct.sort_unstable();
        distinct.dedup();
        let codes: HashMap<&str, f64> = distinct
            .iter()
            .enumerate()
            .map(|(i, &v)| (v, i as f64))
            .collect();
        fields
            .iter()
            .map(|f| {
                let v = if f.is_empty() { fill.as_str() } else { f };
                codes.get(v).copied().unwrap_or(0.0)
            })
            .collect()
    }
}

/// Load the fraud dataset and produce a numeric feature matrix plus binary
/// labels.
///
/// The two tables are joined on `TransactionID`; the `isFraud` column of the
/// transaction table becomes the label vector and every remaining column a
/// feature. When the joined table exceeds `sample_size` rows, a seeded
/// uniform sample of exactly `sample_size` rows is kept.
pub fn load_dataset(
    transaction_path: &Path,
    identity_path: &Path,
    sample_size: usize,
    seed: u64,
) -> Result<(Array2<f64>, Vec<u8>)> {
    let transactions = read_table(transaction_path)?;
    let identity = read_table(identity_path)?;

    let mut merged = left_join(transactions, identity, identity_path)?;

    let target_idx = merged
        .headers
        .iter()
        .position(|h| h == TARGET)
        .ok_or_else(|| Error::DataLoad(format!("merged table: missing column '{TARGET}'")))?;

    if merged.rows.is_empty() {
        return Err(Error::DataLoad("no rows in transaction table".to_string()));
    }

    // Seeded down-sample before any encoding
    if merged.rows.len() > sample_size {
        let mut rng = StdRng::seed_from_u64(seed);
        let keep = rand::seq::index::sample(&mut rng, merged.rows.len(), sample_size);
        let mut keep: Vec<usize> = keep.into_iter().collect();
        keep.sort_unstable();
        merged.rows = keep.into_iter().map(|i| merged.rows[i].clone()).collect();
    }

    // Labels
    let mut labels = Vec::with_capacity(merged.rows.len());
    for (row_no, row) in merged.rows.iter().enumerate() {
        let field = &row[target_idx];
        let value: f64 = field.parse().map_err(|_| {
            Error::DataLoad(format!("row {row_no}: target '{field}' is not numeric"))
        })?;
        labels.push(u8::from(value != 0.0));
    }

    // Encode every non-target column
    let n_rows = merged.rows.len();
    let feature_cols: Vec<usize> = (0..merged.headers.len())
        .filter(|&i| i != target_idx)
        .collect();

    let mut matrix = Array2::zeros((n_rows, feature_cols.len()));
    for (out_col, &col) in feature_cols.iter().enumerate() {
        let fields: Vec<&str> = merged.rows.iter().map(|r| r[col].as_str()).collect();
        for (row_no, value) in encode_column(&fields).into_iter().enumerate() {
            matrix[[row_no, out_col]] = value;
        }
    }

    Ok((matrix, labels))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_csv(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    fn tiny_dataset(dir: &TempDir) -> (std::path::PathBuf, std::path::PathBuf) {
        let tx = write_csv(
            dir,
            "tx.csv",
            "TransactionID,amount,card,isFraud\n\
             1,10.5,visa,0\n\
             2,99.0,amex,1\n\
             3,,visa,0\n\
             4,20.0,mc,1\n",
        );
        let id = write_csv(
            dir,
            "id.csv",
            "TransactionID,device\n\
             1,mobile\n\
             2,desktop\n\
             4,mobile\n",
        );
        (tx, id)
    }

    #[test]
    fn test_load_shapes_and_labels() {
        let dir = TempDir::new().unwrap();
        let (tx, id) = tiny_dataset(&dir);
        let (x, y) = load_dataset(&tx, &id, 1000, 42).unwrap();

        // TransactionID, amount, card, device
        assert_eq!(x.ncols(), 4);
        assert_eq!(x.nrows(), 4);
        assert_eq!(y, vec![0, 1, 0, 1]);
    }

    #[test]
    fn test_numeric_missing_imputed_with_median() {
        let dir = TempDir::new().unwrap();
        let (tx, id) = tiny_dataset(&dir);
        let (x, _) = load_dataset(&tx, &id, 1000, 42).unwrap();

        // amount column: [10.5, 99.0, missing, 20.0]; median of present = 20.0
        assert_eq!(x[[2, 1]], 20.0);
    }

    #[test]
    fn test_categorical_label_encoding_is_sorted() {
        let dir = TempDir::new().unwrap();
        let (tx, id) = tiny_dataset(&dir);
        let (x, _) = load_dataset(&tx, &id, 1000, 42).unwrap();

        // card column distinct sorted: amex=0, mc=1, visa=2
        assert_eq!(x[[0, 2]], 2.0);
        assert_eq!(x[[1, 2]], 0.0);
        assert_eq!(x[[3, 2]], 1.0);
    }

    #[test]
    fn test_unmatched_identity_rows_get_imputed() {
        let dir = TempDir::new().unwrap();
        let (tx, id) = tiny_dataset(&dir);
        let (x, _) = load_dataset(&tx, &id, 1000, 42).unwrap();

        // device: [mobile, desktop, missing->mode(mobile), mobile]
        // sorted distinct: desktop=0, mobile=1
        assert_eq!(x[[2, 3]], 1.0);
    }

    #[test]
    fn test_sample_size_caps_rows_deterministically() {
        let dir = TempDir::new().unwrap();
        let (tx, id) = tiny_dataset(&dir);
        let (x1, y1) = load_dataset(&tx, &id, 2, 7).unwrap();
        let (x2, y2) = load_dataset(&tx, &id, 2, 7).unwrap();
        assert_eq!(x1.nrows(), 2);
        assert_eq!(x1, x2);
        assert_eq!(y1, y2);
    }

    #[test]
    fn test_missing_file_is_data_load_error() {
        let dir = TempDir::new().unwrap();
        let (tx, _) = tiny_dataset(&dir);
        let err = load_dataset(&tx, Path::new("/nonexistent.csv"), 10, 0).unwrap_err();
        assert!(matches!(err, Error::DataLoad(_)));
    }

    #[test]
    fn test_missing_target_column_is_data_load_error() {
        let dir = TempDir::new().unwrap();
        let tx = write_csv(&dir, "tx.csv", "TransactionID,amount\n1,10.0\n");
        let id = write_csv(&dir, "id.csv", "TransactionID,device\n1,mobile\n");
        let err = load_dataset(&tx, &id, 10, 0).unwrap_err();
        assert!(matches!(err, Error::DataLoad(ref m) if m.contains("isFraud")));
    }

    #[test]
    fn test_missing_join_key_is_data_load_error() {
        let dir = TempDir::new().unwrap();
        let tx = write_csv(&dir, "tx.csv", "TransactionID,isFraud\n1,0\n");
        let id = write_csv(&dir, "id.csv", "device\nmobile\n");
        let err = load_dataset(&tx, &id, 10, 0).unwrap_err();
        assert!(matches!(err, Error::DataLoad(ref m) if m.contains("TransactionID")));
    }
}
