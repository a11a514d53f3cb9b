//! CSV export of model descriptors: `smiles,b0,...,b1023`.
//!
//! Uses the same toolkit and fingerprint parameters as `/predict`, so a model
//! trained on this output sees identical features at serving time.

use std::io;

use tracing::warn;

use affinity_chem::{ChemToolkit, DESCRIPTOR_LENGTH};

/// Rows written and inputs skipped as invalid SMILES.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub written: usize,
    pub skipped: usize,
}

pub fn header() -> Vec<String> {
    std::iter::once("smiles".to_string())
        .chain((0..DESCRIPTOR_LENGTH).map(|i| format!("b{i}")))
        .collect()
}

/// Write one record per parseable input. Blank lines are ignored; toolkit
/// failures other than a bad SMILES abort the export.
pub fn write_csv<W, I, S>(chem: &dyn ChemToolkit, inputs: I, out: W, with_header: bool) -> anyhow::Result<Summary>
where
    W: io::Write,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut writer = csv::Writer::from_writer(out);
    if with_header {
        writer.write_record(header())?;
    }

    let mut summary = Summary::default();
    for line in inputs {
        let smiles = line.as_ref().trim();
        if smiles.is_empty() {
            continue;
        }
        match chem.descriptors(smiles) {
            Ok(descriptors) => {
                let bits = descriptors.as_slice().iter().map(u8::to_string);
                writer.write_record(std::iter::once(smiles.to_string()).chain(bits))?;
                summary.written += 1;
            }
            Err(e) if e.is_invalid_smiles() => {
                warn!("Skipping {}: {}", smiles, e);
                summary.skipped += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }
    writer.flush()?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use affinity_chem::{ChemError, DepictOptions, Descriptors};

    use super::*;

    /// Sets bit `len % 1024`; anything containing `(` without `)` is invalid.
    struct LengthBit;

    impl ChemToolkit for LengthBit {
        fn name(&self) -> String {
            "length-bit".into()
        }

        fn descriptors(&self, smiles: &str) -> affinity_chem::Result<Descriptors> {
            if smiles.contains('(') && !smiles.contains(')') {
                return Err(ChemError::InvalidSmiles(smiles.into()));
            }
            if smiles == "BROKEN" {
                return Err(ChemError::Toolkit("toolkit crashed".into()));
            }
            let mut bits = vec![0u8; DESCRIPTOR_LENGTH];
            bits[smiles.len() % DESCRIPTOR_LENGTH] = 1;
            Descriptors::from_bits(bits)
        }

        fn render_png(&self, smiles: &str, _opts: &DepictOptions) -> affinity_chem::Result<Vec<u8>> {
            Err(ChemError::InvalidSmiles(smiles.into()))
        }
    }

    fn records(bytes: &[u8]) -> (csv::StringRecord, Vec<csv::StringRecord>) {
        let mut reader = csv::Reader::from_reader(bytes);
        let header = reader.headers().unwrap().clone();
        let rows = reader.records().collect::<Result<Vec<_>, _>>().unwrap();
        (header, rows)
    }

    #[test]
    fn test_one_row_per_valid_smiles() {
        let mut out = Vec::new();
        let summary = write_csv(&LengthBit, ["CCO", "C(C", "  ", "c1ccccc1"], &mut out, true).unwrap();
        assert_eq!(summary, Summary { written: 2, skipped: 1 });

        let (header, rows) = records(&out);
        assert_eq!(header.len(), DESCRIPTOR_LENGTH + 1);
        assert_eq!(&header[0], "smiles");
        assert_eq!(&header[1024], "b1023");

        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "CCO");
        assert_eq!(&rows[1][0], "c1ccccc1");
        assert!(rows.iter().all(|row| row.len() == DESCRIPTOR_LENGTH + 1));
        // "CCO" has length 3, so column b3 is set
        assert_eq!(&rows[0][4], "1");
        assert_eq!(rows[0].iter().skip(1).filter(|bit| *bit == "1").count(), 1);
    }

    #[test]
    fn test_smiles_with_comma_is_quoted() {
        let mut out = Vec::new();
        write_csv(&LengthBit, ["C,C"], &mut out, false).unwrap();
        assert!(String::from_utf8(out.clone()).unwrap().starts_with("\"C,C\","));

        let mut reader = csv::ReaderBuilder::new().has_headers(false).from_reader(out.as_slice());
        let row = reader.records().next().unwrap().unwrap();
        assert_eq!(&row[0], "C,C");
    }

    #[test]
    fn test_without_header() {
        let mut out = Vec::new();
        write_csv(&LengthBit, ["CC"], &mut out, false).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("CC,"));
    }

    #[test]
    fn test_toolkit_failure_aborts() {
        let mut out = Vec::new();
        assert!(write_csv(&LengthBit, ["CCO", "BROKEN"], &mut out, true).is_err());
    }
}
