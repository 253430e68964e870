use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AutoVersionError, Result};
use crate::record::VersionRecord;
use crate::ui;

/// Directory segment conventionally reserved for bundled runtime resources.
/// An ignore file must not end up inside it, so it is written one level up.
const RESOURCES_SEGMENT: &str = "Resources";

/// Create-or-update persistence for a [VersionRecord] at a fixed TOML path.
///
/// Single-writer by assumption: no locking is performed, and concurrent
/// passes against the same path are out of scope.
pub struct RecordStore {
    path: PathBuf,
    create_gitignore: bool,
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>, create_gitignore: bool) -> Self {
        RecordStore {
            path: path.into(),
            create_gitignore,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the record if one exists at the store path.
    pub fn load(&self) -> Result<Option<VersionRecord>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(&self.path)?;
        let record = toml::from_str(&text).map_err(|e| {
            AutoVersionError::record(format!("could not parse '{}': {}", self.path.display(), e))
        })?;
        Ok(Some(record))
    }

    /// Loads the record, or persists and returns an all-zero one if the file
    /// does not exist yet.
    pub fn load_or_create(&self) -> Result<VersionRecord> {
        match self.load()? {
            Some(record) => Ok(record),
            None => {
                let record = VersionRecord::default();
                self.create(&record)?;
                Ok(record)
            }
        }
    }

    /// Persists the record, overwriting all fields in place when the file
    /// already exists. First-time creation also generates the ignore file
    /// (when enabled); repeated saves never do.
    pub fn save(&self, record: &VersionRecord) -> Result<()> {
        if self.path.exists() {
            self.write(record)
        } else {
            self.create(record)
        }
    }

    fn create(&self, record: &VersionRecord) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        self.write(record)?;
        ui::display_success(&format!(
            "Created a new version record: '{}'",
            self.path.display()
        ));

        if self.create_gitignore {
            // Best-effort: a missing ignore file must not fail the save
            if let Err(e) = write_ignore_file(&self.path) {
                ui::display_status(&format!("Could not create .gitignore: {}", e));
            }
        }
        Ok(())
    }

    fn write(&self, record: &VersionRecord) -> Result<()> {
        let text = toml::to_string_pretty(record).map_err(|e| {
            AutoVersionError::record(format!("could not serialize version record: {}", e))
        })?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}

/// Writes a `.gitignore` excluding the record file (and its companion
/// `.meta` file) from version control.
///
/// When the record path contains a `Resources` segment, the ignore file goes
/// one directory level above that segment and lists the path from the
/// segment down, so the ignore rule itself stays out of the resource bundle.
/// Otherwise it sits next to the record and lists just the file name.
///
/// Returns the path of the ignore file written.
pub fn write_ignore_file(record_path: &Path) -> Result<PathBuf> {
    let components: Vec<&std::ffi::OsStr> = record_path.iter().collect();

    let (gitignore, ignored) = match components.iter().position(|c| *c == RESOURCES_SEGMENT) {
        Some(index) => {
            let above: PathBuf = components[..index].iter().collect();
            let below = components[index..]
                .iter()
                .map(|c| c.to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            (above.join(".gitignore"), below)
        }
        None => {
            let name = record_path
                .file_name()
                .ok_or_else(|| {
                    AutoVersionError::record(format!(
                        "'{}' has no file name to ignore",
                        record_path.display()
                    ))
                })?
                .to_string_lossy()
                .into_owned();
            let dir = record_path.parent().unwrap_or_else(|| Path::new("."));
            (dir.join(".gitignore"), name)
        }
    };

    fs::write(&gitignore, format!("{}\n{}.meta\n", ignored, ignored))?;
    Ok(gitignore)
}
