//! Roster import: team lists from CSV (`team_name,seed`).

use serde::Deserialize;
use std::io::Read;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// Line numbers are 1-based and count the header row.
    #[error("Line {line}: team name is empty")]
    MissingName { line: u64 },
    #[error("Line {line}: invalid seed '{value}'")]
    InvalidSeed { line: u64, value: String },
}

/// One parsed roster row, before the competition assigns a team id.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RosterEntry {
    pub team_name: String,
    pub seed: Option<u32>,
}

#[derive(Deserialize)]
struct RosterRow {
    team_name: String,
    #[serde(default)]
    seed: Option<String>,
}

/// Parse a CSV roster with a header row. `seed` may be missing or blank.
pub fn parse_teams_csv<R: Read>(reader: R) -> Result<Vec<RosterEntry>, RosterError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let mut entries = Vec::new();
    for record in rdr.deserialize::<RosterRow>() {
        let row = record?;
        let line = entries.len() as u64 + 2;
        if row.team_name.is_empty() {
            return Err(RosterError::MissingName { line });
        }
        let seed = match row.seed.as_deref() {
            None | Some("") => None,
            Some(value) => Some(value.parse::<u32>().map_err(|_| RosterError::InvalidSeed {
                line,
                value: value.to_string(),
            })?),
        };
        entries.push(RosterEntry {
            team_name: row.team_name,
            seed,
        });
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_seeded_and_unseeded_rows() {
        let csv = "team_name,seed\nHawks,1\n  Owls , \nRavens,3\n";
        let entries = parse_teams_csv(csv.as_bytes()).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].seed, Some(1));
        assert_eq!(entries[1].team_name, "Owls");
        assert_eq!(entries[1].seed, None);
    }

    #[test]
    fn seed_column_is_optional() {
        let entries = parse_teams_csv("team_name\nHawks\nOwls\n".as_bytes()).unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.seed.is_none()));
    }

    #[test]
    fn rejects_bad_seed_with_line_number() {
        let err = parse_teams_csv("team_name,seed\nHawks,1\nOwls,first\n".as_bytes()).unwrap_err();
        assert!(matches!(err, RosterError::InvalidSeed { line: 3, .. }));
    }

    #[test]
    fn rejects_blank_name() {
        let err = parse_teams_csv("team_name,seed\n,2\n".as_bytes()).unwrap_err();
        assert!(matches!(err, RosterError::MissingName { line: 2 }));
    }
}
