//! Line templates and the template store

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, error};

use crate::error::Result;

/// File extension of template files
pub const TEMPLATE_EXTENSION: &str = "cgt";

/// Initializer appended to string declarations
const STRING_DEFAULT: &str = " = string.Empty";

/// The fixed set of templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateKind {
    /// Class with namespace
    ClassDefaultWithNs,
    /// Class with namespace and summary
    ClassDefaultWithNsComment,
    /// Property with backing field and summaries
    PropertyBackingFieldComment,
    /// Property with backing field, `SetProperty` setter and summaries
    PropertyBackingFieldCommentSetField,
    /// Property with backing field
    PropertyBackingFieldDefault,
    /// Property with backing field and `SetProperty` setter
    PropertyBackingFieldDefaultSetField,
    /// Auto property
    PropertyDefault,
    /// Auto property with summary
    PropertyDefaultComment,
}

impl TemplateKind {
    /// All kinds, in store order
    pub const ALL: [TemplateKind; 8] = [
        TemplateKind::ClassDefaultWithNs,
        TemplateKind::ClassDefaultWithNsComment,
        TemplateKind::PropertyBackingFieldComment,
        TemplateKind::PropertyBackingFieldCommentSetField,
        TemplateKind::PropertyBackingFieldDefault,
        TemplateKind::PropertyBackingFieldDefaultSetField,
        TemplateKind::PropertyDefault,
        TemplateKind::PropertyDefaultComment,
    ];

    /// Canonical name, also the file name prefix of the template file
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ClassDefaultWithNs => "ClassDefaultWithNs",
            Self::ClassDefaultWithNsComment => "ClassDefaultWithNsComment",
            Self::PropertyBackingFieldComment => "PropertyBackingFieldComment",
            Self::PropertyBackingFieldCommentSetField => "PropertyBackingFieldCommentSetField",
            Self::PropertyBackingFieldDefault => "PropertyBackingFieldDefault",
            Self::PropertyBackingFieldDefaultSetField => "PropertyBackingFieldDefaultSetField",
            Self::PropertyDefault => "PropertyDefault",
            Self::PropertyDefaultComment => "PropertyDefaultComment",
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }

    /// Built-in template body
    fn builtin(&self) -> &'static str {
        match self {
            Self::ClassDefaultWithNs => include_str!("../../templates/ClassDefaultWithNs.cgt"),
            Self::ClassDefaultWithNsComment => {
                include_str!("../../templates/ClassDefaultWithNsComment.cgt")
            }
            Self::PropertyBackingFieldComment => {
                include_str!("../../templates/PropertyBackingFieldComment.cgt")
            }
            Self::PropertyBackingFieldCommentSetField => {
                include_str!("../../templates/PropertyBackingFieldCommentSetField.cgt")
            }
            Self::PropertyBackingFieldDefault => {
                include_str!("../../templates/PropertyBackingFieldDefault.cgt")
            }
            Self::PropertyBackingFieldDefaultSetField => {
                include_str!("../../templates/PropertyBackingFieldDefaultSetField.cgt")
            }
            Self::PropertyDefault => include_str!("../../templates/PropertyDefault.cgt"),
            Self::PropertyDefaultComment => {
                include_str!("../../templates/PropertyDefaultComment.cgt")
            }
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A template: its kind and its raw lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub kind: TemplateKind,
    pub lines: Vec<String>,
}

impl Template {
    /// Create a template by splitting the content into lines
    pub fn parse(kind: TemplateKind, content: &str) -> Self {
        Self {
            kind,
            lines: content.lines().map(str::to_string).collect(),
        }
    }

    /// A template without lines
    pub fn empty(kind: TemplateKind) -> Self {
        Self {
            kind,
            lines: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Copy of the template whose declaration initializes strings to `string.Empty`.
    ///
    /// The patched line is the first one declaring the backing field (`$NAME2$`),
    /// or the first one with the property name (`$NAME$`) when there is no
    /// backing field. The template itself is left untouched.
    pub fn with_string_default(&self) -> Template {
        let mut patched = self.clone();

        let target = patched
            .lines
            .iter()
            .position(|l| l.contains("$NAME2$"))
            .or_else(|| patched.lines.iter().position(|l| l.contains("$NAME$")));

        if let Some(index) = target {
            let line = &mut patched.lines[index];
            let trimmed_len = line.trim_end().len();
            line.truncate(trimmed_len);

            if line.ends_with(';') {
                line.insert_str(trimmed_len - 1, STRING_DEFAULT);
            } else {
                line.push_str(STRING_DEFAULT);
                line.push(';');
            }
        }

        patched
    }
}

/// All templates of a run, one per kind
#[derive(Debug, Clone)]
pub struct TemplateStore {
    templates: Vec<Template>,
}

impl TemplateStore {
    /// The templates shipped with the crate
    pub fn builtin() -> Self {
        Self {
            templates: TemplateKind::ALL
                .iter()
                .map(|kind| Template::parse(*kind, kind.builtin()))
                .collect(),
        }
    }

    /// Create a store from explicit templates; kinds without one get an empty template
    pub fn from_templates(templates: impl IntoIterator<Item = Template>) -> Self {
        let mut store = Self {
            templates: TemplateKind::ALL.iter().map(|k| Template::empty(*k)).collect(),
        };
        for template in templates {
            let index = template.kind.index();
            store.templates[index] = template;
        }
        store
    }

    /// Load the `*.cgt` files of a directory.
    ///
    /// A file belongs to a kind when its name starts with the kind's name,
    /// ignoring case. Kinds without a readable file are logged and get an
    /// empty template, which degrades the output but does not stop the run.
    pub fn load(dir: &Path) -> Result<Self> {
        let files = list_template_files(dir);
        let mut templates = Vec::with_capacity(TemplateKind::ALL.len());

        for kind in TemplateKind::ALL {
            match find_template_file(kind, &files) {
                Some(path) => {
                    debug!("Loading template {} from {}", kind, path.display());
                    match fs::read_to_string(path) {
                        Ok(content) => templates.push(Template::parse(kind, &content)),
                        Err(e) => {
                            error!("Can't read the template {}: {}", path.display(), e);
                            templates.push(Template::empty(kind));
                        }
                    }
                }
                None => {
                    error!("The template for '{}' is missing.", kind);
                    templates.push(Template::empty(kind));
                }
            }
        }

        Ok(Self { templates })
    }

    /// The template of a kind (empty when it could not be loaded)
    pub fn get(&self, kind: TemplateKind) -> &Template {
        &self.templates[kind.index()]
    }
}

/// List the template files of a directory, sorted by name
fn list_template_files(dir: &Path) -> Vec<PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            error!("Can't read the template directory {}: {}", dir.display(), e);
            return Vec::new();
        }
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case(TEMPLATE_EXTENSION))
        })
        .collect();
    files.sort();
    files
}

/// Find the file of a kind.
///
/// `ClassDefaultWithNs` is a prefix of `ClassDefaultWithNsComment`, so a file
/// is skipped when a longer kind name matches it as well.
fn find_template_file(kind: TemplateKind, files: &[PathBuf]) -> Option<&PathBuf> {
    let starts_with = |stem: &str, name: &str| {
        stem.get(..name.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(name))
    };

    files
        .iter()
        .filter_map(|path| {
            let stem = path.file_stem()?.to_str()?;
            starts_with(stem, kind.as_str()).then_some((path, stem))
        })
        .filter(|(_, stem)| {
            !TemplateKind::ALL.iter().any(|other| {
                other.as_str().len() > kind.as_str().len() && starts_with(stem, other.as_str())
            })
        })
        .min_by_key(|(_, stem)| stem.len())
        .map(|(path, _)| path)
}
