use anyhow::{anyhow, Context, Result};
use polars::prelude::*;
use secret_santa::Roster;

/// Load and validate a roster CSV.
///
/// The file needs a `name` column; `partner` and `previous` columns are
/// optional. Every column is read as text and an empty cell means "no
/// partner" / "no history" for that row.
pub fn load_roster(path: &str) -> Result<Roster> {
    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(0)) // no inference: every column stays text
        .finish()
        .with_context(|| format!("opening roster {path}"))?
        .collect()
        .with_context(|| format!("reading roster {path}"))?;
    let names = text_column(&df, "name")?
        .ok_or_else(|| anyhow!("roster {path} has no `name` column"))?;
    let partners = text_column(&df, "partner")?;
    let previous = text_column(&df, "previous")?;
    Roster::new(names, partners, previous).with_context(|| format!("validating roster {path}"))
}

/// Pull a column out as plain strings; `Ok(None)` when it is absent.
fn text_column(df: &DataFrame, name: &str) -> Result<Option<Vec<String>>> {
    let series = match df.column(name) {
        Ok(series) => series,
        Err(PolarsError::ColumnNotFound(_)) => return Ok(None),
        Err(err) => return Err(err.into()),
    };
    let values = series
        .str()
        .with_context(|| format!("roster column `{name}` must be text"))?;
    Ok(Some(
        values
            .into_iter()
            .map(|cell| cell.unwrap_or("").to_string())
            .collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secret_santa::AssignCfg;
    use std::fs;
    use tempfile::tempdir;

    fn write_roster(contents: &str) -> (tempfile::TempDir, String) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("roster.csv");
        fs::write(&path, contents).unwrap();
        let path = path.to_string_lossy().into_owned();
        (dir, path)
    }

    #[test]
    fn loads_names_partners_and_previous() {
        let (_dir, path) = write_roster(
            "name,partner,previous\nAdam,Eve,Jill\nEve,Adam,Jack\nJack,Jill,Eve\nJill,Jack,Adam\n",
        );
        let roster = load_roster(&path).unwrap();
        assert_eq!(roster.len(), 4);
        assert!(roster.has_partners());
        assert!(roster.has_previous());

        // Both exclusions leave exactly one legal matching for this roster.
        let cfg = AssignCfg {
            prohibit_partners: true,
            prohibit_previous_recipients: true,
        };
        let assignment = roster.assign(cfg, 7).unwrap();
        let drawn: Vec<&str> = assignment
            .reveal()
            .iter()
            .map(|pair| pair.recipient.as_str())
            .collect();
        assert_eq!(drawn, ["Jack", "Jill", "Adam", "Eve"]);
    }

    #[test]
    fn empty_cells_mean_no_partner() {
        let (_dir, path) = write_roster("name,partner\nAdam,Eve\nEve,Adam\nJack,\nJill,\n");
        let roster = load_roster(&path).unwrap();
        assert_eq!(roster.len(), 4);
        assert!(roster.has_partners());
        assert!(!roster.has_previous());
    }

    #[test]
    fn optional_columns_may_be_absent() {
        let (_dir, path) = write_roster("name\nAdam\nEve\n");
        let roster = load_roster(&path).unwrap();
        assert!(!roster.has_partners());
        assert!(!roster.has_previous());
        let names: Vec<&str> = roster.names().iter().map(String::as_str).collect();
        assert_eq!(names, ["Adam", "Eve"]);
    }

    #[test]
    fn numeric_looking_names_stay_text() {
        // Schema inference is off, so these cells load as strings rather
        // than integers and resolve against each other as names.
        let (_dir, path) = write_roster("name,partner\n1,2\n2,1\n");
        let roster = load_roster(&path).unwrap();
        assert!(roster.has_partners());
        let names: Vec<&str> = roster.names().iter().map(String::as_str).collect();
        assert_eq!(names, ["1", "2"]);
    }

    #[test]
    fn missing_name_column_is_an_error() {
        let (_dir, path) = write_roster("person,partner\nAdam,Eve\n");
        let err = load_roster(&path).unwrap_err();
        assert!(err.to_string().contains("`name`"));
    }

    #[test]
    fn validation_failures_name_the_culprit() {
        let (_dir, path) = write_roster("name\nAdam\nAdam\n");
        let err = load_roster(&path).unwrap_err();
        assert!(err.root_cause().to_string().contains("more than once"));
    }
}
