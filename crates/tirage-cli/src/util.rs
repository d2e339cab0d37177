use std::{
    fs::File,
    io::{self, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::{Context, bail};
use tirage_engine::{GameRules, RuleSet};
use tirage_scoring::{ModuleManager, builtin};

/// Output path argument meaning "write to stdout".
pub const STDOUT_PATH: &str = "-";

#[derive(Debug)]
pub enum Output {
    Stdout {
        writer: StdoutLock<'static>,
    },
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    pub fn save_json<T>(value: &T, output_path: Option<PathBuf>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = Output::from_output_path(output_path)?;
        output.write_json(value)
    }

    /// Opens `output_path`, or stdout when it is `None` or `-`.
    pub fn from_output_path(output_path: Option<PathBuf>) -> anyhow::Result<Self> {
        match output_path {
            Some(path) if path != Path::new(STDOUT_PATH) => Output::open(path),
            _ => Ok(Output::stdout()),
        }
    }

    pub fn stdout() -> Self {
        Output::Stdout {
            writer: io::stdout().lock(),
        }
    }

    pub fn open(path: PathBuf) -> anyhow::Result<Self> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub fn display_path(&self) -> String {
        match self {
            Output::Stdout { .. } => "stdout".to_string(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    pub fn write_json<T>(&mut self, value: T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut *self, &value)
            .with_context(|| format!("Failed to write JSON to {}", self.display_path()))?;
        writeln!(&mut *self).with_context(|| {
            format!(
                "Failed to write newline after JSON to {}",
                self.display_path()
            )
        })?;
        self.flush()
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))?;
        Ok(())
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout { writer } => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout { writer } => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

/// Looks up a known game, failing on unknown keys.
pub fn game_rules(game: &str) -> anyhow::Result<RuleSet> {
    let rules = GameRules::lookup(game);
    if rules.is_empty() {
        bail!(
            "Unknown game `{game}` (known games: {})",
            GameRules::keys().join(", ")
        );
    }
    Ok(rules)
}

/// Builds the module set from built-in module ids.
///
/// An empty list selects the default module set.
pub fn scoring_modules(ids: &[String]) -> anyhow::Result<ModuleManager> {
    if ids.is_empty() {
        return Ok(ModuleManager::new(builtin::all_scoring_modules()));
    }
    let modules = ids
        .iter()
        .map(|id| {
            builtin::scoring_module_by_id(id).with_context(|| {
                let known = builtin::builtin_scoring_modules()
                    .iter()
                    .map(|m| m.id().to_owned())
                    .collect::<Vec<_>>();
                format!(
                    "Unknown scoring module `{id}` (available: {})",
                    known.join(", ")
                )
            })
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(ModuleManager::new(modules))
}
