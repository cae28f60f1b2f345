// Field map: logical stat roles mapped to the column names of the input tables,
// plus the table files, CSV dialect and eligibility threshold.

use crate::error::{StatsError, StatsResult};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Typical at-bat cutoff used for official rate statistics.
pub const MINIMUM_AT_BATS: f64 = 500.0;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("failed to parse field map: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },
}

// ---------------------------------------------------------------------------
// Column roles
// ---------------------------------------------------------------------------

/// A logical column the pipeline reads through the field map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Hits,
    AtBats,
    Walks,
    Doubles,
    Triples,
    HomeRuns,
    PlayerId,
    YearId,
    FirstName,
    LastName,
}

impl Role {
    pub const ALL: [Role; 10] = [
        Role::Hits,
        Role::AtBats,
        Role::Walks,
        Role::Doubles,
        Role::Triples,
        Role::HomeRuns,
        Role::PlayerId,
        Role::YearId,
        Role::FirstName,
        Role::LastName,
    ];

    /// The key used for this role in field map files and error messages.
    pub fn key(self) -> &'static str {
        match self {
            Role::Hits => "hits",
            Role::AtBats => "atbats",
            Role::Walks => "walks",
            Role::Doubles => "doubles",
            Role::Triples => "triples",
            Role::HomeRuns => "homeruns",
            Role::PlayerId => "playerid",
            Role::YearId => "yearid",
            Role::FirstName => "firstname",
            Role::LastName => "lastname",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// ---------------------------------------------------------------------------
// FieldMap
// ---------------------------------------------------------------------------

/// Indirection from logical stat roles to the concrete layout of a dataset.
///
/// Every operation reads columns through [`FieldMap::column`], so the same
/// pipeline runs against differently labeled tables. Roles are optional here;
/// an operation that needs a missing role fails with
/// [`StatsError::Configuration`].
#[derive(Debug, Clone, PartialEq)]
pub struct FieldMap {
    pub columns: HashMap<Role, String>,
    pub batting_file: Option<PathBuf>,
    pub master_file: Option<PathBuf>,
    pub separator: u8,
    pub quote: u8,
    /// Numeric columns summed per player for career totals.
    pub batting_fields: Option<Vec<String>>,
    /// Minimum at-bats for a non-zero rate statistic.
    pub min_at_bats: f64,
}

impl Default for FieldMap {
    fn default() -> Self {
        FieldMap {
            columns: HashMap::new(),
            batting_file: None,
            master_file: None,
            separator: b',',
            quote: b'"',
            batting_fields: None,
            min_at_bats: MINIMUM_AT_BATS,
        }
    }
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Field map for the Lahman baseball database (`Batting.csv`,
    /// `Master.csv`) stored under `dir`.
    pub fn lahman(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        FieldMap::new()
            .with_column(Role::Hits, "H")
            .with_column(Role::AtBats, "AB")
            .with_column(Role::Walks, "BB")
            .with_column(Role::Doubles, "2B")
            .with_column(Role::Triples, "3B")
            .with_column(Role::HomeRuns, "HR")
            .with_column(Role::PlayerId, "playerID")
            .with_column(Role::YearId, "yearID")
            .with_column(Role::FirstName, "nameFirst")
            .with_column(Role::LastName, "nameLast")
            .with_batting_file(dir.join("Batting.csv"))
            .with_master_file(dir.join("Master.csv"))
            .with_batting_fields(["AB", "H", "2B", "3B", "HR", "BB"])
    }

    pub fn with_column(mut self, role: Role, column: impl Into<String>) -> Self {
        self.columns.insert(role, column.into());
        self
    }

    pub fn with_batting_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.batting_file = Some(path.into());
        self
    }

    pub fn with_master_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.master_file = Some(path.into());
        self
    }

    pub fn with_dialect(mut self, separator: u8, quote: u8) -> Self {
        self.separator = separator;
        self.quote = quote;
        self
    }

    pub fn with_batting_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.batting_fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_min_at_bats(mut self, min_at_bats: f64) -> Self {
        self.min_at_bats = min_at_bats;
        self
    }

    /// Column name mapped to `role`.
    pub fn column(&self, role: Role) -> StatsResult<&str> {
        self.columns
            .get(&role)
            .map(String::as_str)
            .ok_or(StatsError::Configuration { role: role.key() })
    }

    /// Fail fast if any of `roles` is unmapped.
    pub fn require(&self, roles: &[Role]) -> StatsResult<()> {
        for &role in roles {
            self.column(role)?;
        }
        Ok(())
    }

    pub fn batting_file(&self) -> StatsResult<&Path> {
        self.batting_file
            .as_deref()
            .ok_or(StatsError::Configuration { role: "battingfile" })
    }

    pub fn master_file(&self) -> StatsResult<&Path> {
        self.master_file
            .as_deref()
            .ok_or(StatsError::Configuration { role: "masterfile" })
    }

    pub fn batting_fields(&self) -> StatsResult<&[String]> {
        self.batting_fields
            .as_deref()
            .ok_or(StatsError::Configuration {
                role: "battingfields",
            })
    }

    /// Parse a field map from TOML text. Relative file paths are kept as-is.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let file: FieldMapFile = toml::from_str(text)?;
        build(file)
    }

    /// Resolve relative table paths against `dir`.
    fn rooted_at(mut self, dir: &Path) -> Self {
        let resolve = |p: PathBuf| if p.is_relative() { dir.join(p) } else { p };
        self.batting_file = self.batting_file.map(resolve);
        self.master_file = self.master_file.map(resolve);
        self
    }
}

// ---------------------------------------------------------------------------
// TOML file structs
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
struct FieldMapFile {
    #[serde(default)]
    files: FilesSection,
    #[serde(default)]
    columns: ColumnsSection,
    #[serde(default)]
    career: CareerSection,
    #[serde(default)]
    eligibility: EligibilitySection,
}

#[derive(Debug, Default, Deserialize)]
struct FilesSection {
    batting: Option<PathBuf>,
    master: Option<PathBuf>,
    separator: Option<String>,
    quote: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ColumnsSection {
    hits: Option<String>,
    atbats: Option<String>,
    walks: Option<String>,
    doubles: Option<String>,
    triples: Option<String>,
    homeruns: Option<String>,
    playerid: Option<String>,
    yearid: Option<String>,
    firstname: Option<String>,
    lastname: Option<String>,
}

impl ColumnsSection {
    fn into_map(self) -> HashMap<Role, String> {
        [
            (Role::Hits, self.hits),
            (Role::AtBats, self.atbats),
            (Role::Walks, self.walks),
            (Role::Doubles, self.doubles),
            (Role::Triples, self.triples),
            (Role::HomeRuns, self.homeruns),
            (Role::PlayerId, self.playerid),
            (Role::YearId, self.yearid),
            (Role::FirstName, self.firstname),
            (Role::LastName, self.lastname),
        ]
        .into_iter()
        .filter_map(|(role, column)| column.map(|c| (role, c)))
        .collect()
    }
}

#[derive(Debug, Default, Deserialize)]
struct CareerSection {
    fields: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
struct EligibilitySection {
    min_at_bats: Option<f64>,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load a field map from a TOML file. Relative table paths are resolved
/// against the directory containing the file.
pub fn load_field_map(path: &Path) -> Result<FieldMap, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })?;
    let info = FieldMap::from_toml_str(&text).map_err(|e| match e {
        ConfigError::Toml(source) => ConfigError::ParseError {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })?;
    Ok(match path.parent() {
        Some(dir) => info.rooted_at(dir),
        None => info,
    })
}

fn build(file: FieldMapFile) -> Result<FieldMap, ConfigError> {
    let defaults = FieldMap::default();
    let separator = match file.files.separator {
        Some(s) => single_byte("files.separator", &s)?,
        None => defaults.separator,
    };
    let quote = match file.files.quote {
        Some(s) => single_byte("files.quote", &s)?,
        None => defaults.quote,
    };

    let min_at_bats = file
        .eligibility
        .min_at_bats
        .unwrap_or(defaults.min_at_bats);
    if !min_at_bats.is_finite() || min_at_bats <= 0.0 {
        return Err(ConfigError::ValidationError {
            field: "eligibility.min_at_bats".into(),
            message: format!("must be a finite number > 0, got {min_at_bats}"),
        });
    }

    Ok(FieldMap {
        columns: file.columns.into_map(),
        batting_file: file.files.batting,
        master_file: file.files.master,
        separator,
        quote,
        batting_fields: file.career.fields,
        min_at_bats,
    })
}

fn single_byte(field: &str, value: &str) -> Result<u8, ConfigError> {
    match value.as_bytes() {
        [b] if b.is_ascii() => Ok(*b),
        _ => Err(ConfigError::ValidationError {
            field: field.into(),
            message: format!("must be a single ASCII character, got {value:?}"),
        }),
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
