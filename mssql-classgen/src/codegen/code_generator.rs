//! Main class generator orchestrator

use std::cell::OnceCell;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::class_generator::{ClassEmitter, SOURCE_EXTENSION};
use super::composite_key::{generate_composite_keys, CompositeKeyReport};
use super::options::GenerationOptions;
use super::template::TemplateStore;
use super::type_map::TypeMap;
use crate::error::{ClassgenError, Result};
use crate::parser::Table;

/// Progress of a generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    /// Templates and type map are being loaded
    LoadingAssets,
    /// A table is about to be generated (`index` starts at 1)
    Table {
        index: usize,
        total: usize,
        name: String,
    },
    /// The composite key code is being generated
    CompositeKeys,
    /// All classes were written
    Finished { classes: usize },
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Progress::LoadingAssets => write!(f, "Load templates and type conversions..."),
            Progress::Table { index, total, name } => {
                write!(f, "{} of {} > Generate class for table '{}'...", index, total, name)
            }
            Progress::CompositeKeys => write!(f, "Generate composite key code..."),
            Progress::Finished { classes } => write!(f, "{} classes generated.", classes),
        }
    }
}

/// Where templates and type map come from; `None` selects the built-in one
#[derive(Debug, Clone, Default)]
pub struct AssetPaths {
    pub template_dir: Option<PathBuf>,
    pub type_map_file: Option<PathBuf>,
}

/// Templates and type map of a run
#[derive(Debug, Clone)]
pub struct Assets {
    pub type_map: TypeMap,
    pub templates: TemplateStore,
}

impl Assets {
    /// The templates and the type map shipped with the crate
    pub fn builtin() -> Result<Self> {
        Ok(Self {
            type_map: TypeMap::builtin()?,
            templates: TemplateStore::builtin(),
        })
    }

    /// Load the assets; missing files degrade to empty values
    pub fn load(paths: &AssetPaths) -> Result<Self> {
        let type_map = match &paths.type_map_file {
            Some(path) => TypeMap::load(path)?,
            None => TypeMap::builtin()?,
        };
        let templates = match &paths.template_dir {
            Some(dir) => TemplateStore::load(dir)?,
            None => TemplateStore::builtin(),
        };
        debug!("Loaded {} type conversions", type_map.len());
        Ok(Self {
            type_map,
            templates,
        })
    }
}

/// Generates the classes of a table list.
///
/// The assets are loaded on the first run and reused by later runs of the
/// same manager.
#[derive(Debug, Default)]
pub struct ClassManager {
    paths: AssetPaths,
    assets: OnceCell<Assets>,
}

impl ClassManager {
    /// Create a manager loading its assets from the given paths
    pub fn new(paths: AssetPaths) -> Self {
        Self {
            paths,
            assets: OnceCell::new(),
        }
    }

    /// Create a manager with already loaded assets
    pub fn with_assets(assets: Assets) -> Self {
        Self {
            paths: AssetPaths::default(),
            assets: OnceCell::from(assets),
        }
    }

    /// The assets, loaded on first access
    pub fn assets(&self) -> Result<&Assets> {
        if let Some(assets) = self.assets.get() {
            return Ok(assets);
        }
        let assets = Assets::load(&self.paths)?;
        Ok(self.assets.get_or_init(|| assets))
    }

    /// Generate one class file per table, in the given order.
    ///
    /// Fails before writing anything when the output directory does not
    /// exist. Any I/O error aborts the remaining tables; files written up to
    /// that point stay on disk. With `db_model` set, the returned report holds
    /// the key configuration of all tables with a composite key.
    pub fn generate(
        &self,
        options: &GenerationOptions,
        tables: &[Table],
        progress: &mut dyn FnMut(&Progress),
    ) -> Result<CompositeKeyReport> {
        if !options.output.is_dir() {
            return Err(ClassgenError::DirectoryNotFound(options.output.clone()));
        }

        if options.clean_before_export {
            let removed = clean_output_dir(&options.output)?;
            info!("Removed {} files from {}", removed, options.output.display());
        }

        progress(&Progress::LoadingAssets);
        let assets = self.assets()?;

        let emitter = ClassEmitter::new(options, &assets.type_map, &assets.templates);
        let total = tables.len();
        for (index, table) in tables.iter().enumerate() {
            progress(&Progress::Table {
                index: index + 1,
                total,
                name: table.name.clone(),
            });
            emitter.write_class(table)?;
        }

        let report = if options.db_model {
            progress(&Progress::CompositeKeys);
            let report = generate_composite_keys(tables);
            info!("{} tables with a composite key", report.table_count);
            report
        } else {
            CompositeKeyReport::default()
        };

        progress(&Progress::Finished { classes: total });
        Ok(report)
    }
}

/// Delete the generated-source files directly inside the directory
fn clean_output_dir(dir: &Path) -> Result<usize> {
    let mut removed = 0;
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_source = path.is_file()
            && path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(SOURCE_EXTENSION));
        if is_source {
            debug!("Removing {}", path.display());
            fs::remove_file(&path)?;
            removed += 1;
        }
    }
    Ok(removed)
}
