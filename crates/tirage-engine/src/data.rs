//! Loading historical draws from disk.
//!
//! Two formats are accepted, chosen by file extension:
//!
//! - `.json` - an array of [`HistoricalDraw`] objects
//! - anything else - a `;`-separated CSV file with a header row:
//!
//! ```text
//! date_de_tirage;num1;num2;num3;num4;num5;etoile1;etoile2
//! 2024-01-02;4;11;23;38;45;3;9
//! ```
//!
//! Secondary columns are named after [`RuleSet::secondary_name`]. Dates are
//! `YYYY-MM-DD` or `DD/MM/YYYY`. Extra columns are ignored.
//!
//! Loaded draws are sorted chronologically (oldest first). Every draw must hold
//! exactly the rule set's item count per pool, each item within its range.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;

use crate::{
    draw::{HistoricalDraw, Pool},
    rules::RuleSet,
};

const DATE_COLUMNS: &[&str] = &["date_de_tirage", "date"];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y"];
const PRIMARY_PREFIX: &str = "num";

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum LoadError {
    #[display("failed to read {}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[display("failed to parse {}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[display("{}: missing column `{column}`", path.display())]
    MissingColumn { path: PathBuf, column: String },
    #[display("{}:{line}: {reason}", path.display())]
    InvalidRecord {
        path: PathBuf,
        line: usize,
        reason: String,
    },
}

/// Loads the historical draws of `path` for the game described by `rules`.
pub fn load_draws<P>(path: P, rules: &RuleSet) -> Result<Vec<HistoricalDraw>, LoadError>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_owned(),
        source,
    })?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let mut draws = if is_json {
        let draws = serde_json::from_str::<Vec<HistoricalDraw>>(&content).map_err(|source| {
            LoadError::Json {
                path: path.to_owned(),
                source,
            }
        })?;
        // JSON records are reported by their position in the array
        for (i, draw) in draws.iter().enumerate() {
            check_draw(draw, rules).map_err(|reason| LoadError::InvalidRecord {
                path: path.to_owned(),
                line: i + 1,
                reason,
            })?;
        }
        draws
    } else {
        parse_csv(path, &content, rules)?
    };

    draws.sort_by_key(|draw| draw.date);
    Ok(draws)
}

fn parse_csv(
    path: &Path,
    content: &str,
    rules: &RuleSet,
) -> Result<Vec<HistoricalDraw>, LoadError> {
    let mut lines = content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());
    let Some((_, header)) = lines.next() else {
        return Ok(vec![]);
    };
    let header = header
        .split(';')
        .map(|name| name.trim().to_ascii_lowercase())
        .collect::<Vec<_>>();

    let find_column = |name: &str| {
        header
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| LoadError::MissingColumn {
                path: path.to_owned(),
                column: name.to_owned(),
            })
    };

    let date_column = DATE_COLUMNS
        .iter()
        .find_map(|name| header.iter().position(|h| h == name))
        .ok_or_else(|| LoadError::MissingColumn {
            path: path.to_owned(),
            column: DATE_COLUMNS[0].to_owned(),
        })?;
    let primary_columns = (1..=rules.primary_count)
        .map(|i| find_column(&format!("{PRIMARY_PREFIX}{i}")))
        .collect::<Result<Vec<_>, _>>()?;
    let secondary_columns = (1..=rules.secondary_count)
        .map(|i| find_column(&format!("{}{i}", rules.secondary_name)))
        .collect::<Result<Vec<_>, _>>()?;

    lines
        .map(|(index, line)| {
            let line_no = index + 1;
            let invalid = |reason: String| LoadError::InvalidRecord {
                path: path.to_owned(),
                line: line_no,
                reason,
            };
            let fields = line.split(';').map(str::trim).collect::<Vec<_>>();
            let field = |column: usize| {
                fields
                    .get(column)
                    .copied()
                    .ok_or_else(|| invalid(format!("expected at least {} fields", column + 1)))
            };
            let date = parse_date(field(date_column)?)
                .ok_or_else(|| invalid(format!("invalid date `{}`", fields[date_column])))?;
            let parse_items = |columns: &[usize]| {
                columns
                    .iter()
                    .map(|&column| {
                        let value = field(column)?;
                        value
                            .parse::<u32>()
                            .map_err(|_| invalid(format!("invalid item `{value}`")))
                    })
                    .collect::<Result<Vec<_>, _>>()
            };
            let draw = HistoricalDraw::new(
                date,
                parse_items(&primary_columns)?,
                parse_items(&secondary_columns)?,
            );
            check_draw(&draw, rules).map_err(&invalid)?;
            Ok(draw)
        })
        .collect()
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(s, format).ok())
}

fn check_draw(draw: &HistoricalDraw, rules: &RuleSet) -> Result<(), String> {
    for pool in Pool::ALL {
        let items = draw.items(pool);
        if items.len() != rules.count(pool) {
            return Err(format!(
                "expected {} {pool} items, found {}",
                rules.count(pool),
                items.len()
            ));
        }
        let range = rules.range(pool);
        if let Some(item) = draw.items(pool).iter().find(|item| !range.contains(**item)) {
            return Err(format!("{pool} item {item} is outside {range}"));
        }
    }
    Ok(())
}
