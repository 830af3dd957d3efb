use anyhow::{Context, Result};
use secret_santa::Assignment;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Write one `<giver>.txt` note per pairing under `dir`, each holding only
/// the recipient's name; returns the created paths in roster order.
///
/// Notes are created with `create_new`, so a second export into the same
/// directory fails on the first existing note instead of overwriting an
/// earlier round. Notes written before the collision are left in place.
pub fn write_notes(dir: &Path, assignment: &Assignment) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(assignment.len());
    for pair in assignment.reveal() {
        let path = dir.join(format!("{}.txt", pair.giver));
        let mut note = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .with_context(|| format!("creating note {}", path.display()))?;
        note.write_all(pair.recipient.as_bytes())
            .with_context(|| format!("writing note {}", path.display()))?;
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use secret_santa::{AssignCfg, Roster};
    use std::fs;
    use std::io::ErrorKind;
    use tempfile::tempdir;

    fn drawn() -> Assignment {
        let names = ["Adam", "Eve", "Jack"].iter().map(|s| s.to_string()).collect();
        let roster = Roster::new(names, None, None).unwrap();
        let cfg = AssignCfg {
            prohibit_partners: false,
            prohibit_previous_recipients: false,
        };
        roster.assign(cfg, 42).unwrap()
    }

    #[test]
    fn writes_one_note_per_giver() {
        let dir = tempdir().unwrap();
        let assignment = drawn();
        let written = write_notes(dir.path(), &assignment).unwrap();
        assert_eq!(written.len(), 3);
        for (pair, path) in assignment.reveal().iter().zip(&written) {
            assert_eq!(path, &dir.path().join(format!("{}.txt", pair.giver)));
            assert_eq!(fs::read_to_string(path).unwrap(), pair.recipient);
        }
    }

    #[test]
    fn refuses_to_overwrite_existing_notes() {
        let dir = tempdir().unwrap();
        let assignment = drawn();
        write_notes(dir.path(), &assignment).unwrap();
        let err = write_notes(dir.path(), &assignment).unwrap_err();
        let io = err
            .root_cause()
            .downcast_ref::<std::io::Error>()
            .expect("io error cause");
        assert_eq!(io.kind(), ErrorKind::AlreadyExists);
    }
}
