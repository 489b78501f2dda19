use std::{fs::File, io::BufReader, path::Path};

use log::debug;

use crate::core::types::Record;

use super::{Error, Result};

/// Reads the whole record list from a JSON array file.
pub fn load_records(path: &Path) -> Result<Vec<Record>> {
    if !path.is_file() {
        return Err(Error::NotFound(path.to_path_buf()));
    }

    let reader = BufReader::new(File::open(path)?);
    let records: Vec<Record> = serde_json::from_reader(reader)?;
    debug!("Read {} records from {}", records.len(), path.display());

    Ok(records)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn source(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_records() {
        let file = source(
            r#"[
                {"id": 1, "age": -5.0, "name": "Ann"},
                {"id": 2, "age": 5, "name": "Bob"}
            ]"#,
        );

        let records = load_records(file.path()).unwrap();
        assert_eq!(
            records,
            vec![Record::new(1, -5.0, "Ann"), Record::new(2, 5.0, "Bob")]
        );
    }

    #[test]
    fn test_empty_array_loads() {
        let file = source("[]");
        assert!(load_records(file.path()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_file() {
        let err = load_records(Path::new("/no/such/records.json")).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_malformed() {
        let file = source(r#"[{"id": "one"}]"#);
        let err = load_records(file.path()).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
