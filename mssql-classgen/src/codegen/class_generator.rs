//! Class generator - renders one C# class per table

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::naming::{backing_field_name, clean_namespace, generate_class_name, generate_property_name};
use super::options::GenerationOptions;
use super::renderer::{render, Replacement, NEW_LINE};
use super::template::{TemplateKind, TemplateStore};
use super::type_map::{TypeMap, STRING_TYPE};
use crate::error::Result;
use crate::parser::{Column, Table};

/// Extension of the generated files
pub const SOURCE_EXTENSION: &str = "cs";

/// Using directive needed by `ObservableObject`
const OBSERVABLE_USING: &str = "using CommunityToolkit.Mvvm.ComponentModel;";

/// Base type clause of observable classes
const OBSERVABLE_BASE: &str = " : ObservableObject";

/// Renders the classes of one run
pub struct ClassEmitter<'a> {
    options: &'a GenerationOptions,
    type_map: &'a TypeMap,
    templates: &'a TemplateStore,
}

impl<'a> ClassEmitter<'a> {
    pub fn new(
        options: &'a GenerationOptions,
        type_map: &'a TypeMap,
        templates: &'a TemplateStore,
    ) -> Self {
        Self {
            options,
            type_map,
            templates,
        }
    }

    /// Render the class of a table and write it to `{output}/{ClassName}.cs`,
    /// replacing an existing file
    pub fn write_class(&self, table: &Table) -> Result<PathBuf> {
        let class_name = generate_class_name(table.class_name());
        let path = class_file_path(&self.options.output, &class_name);
        debug!("Generating class {} -> {}", class_name, path.display());

        fs::write(&path, self.render_class(table))?;
        Ok(path)
    }

    /// Render the class of a table
    pub fn render_class(&self, table: &Table) -> String {
        let mut template = self.templates.get(class_template_kind(self.options)).clone();

        let properties = table
            .ordered_columns()
            .into_iter()
            .map(|column| self.render_property(column))
            .collect::<Vec<_>>()
            .join(NEW_LINE);

        let mut inherits = "";
        if self.options.add_set_property {
            template.lines.insert(0, OBSERVABLE_USING.to_string());
            template.lines.insert(1, String::new());
            inherits = OBSERVABLE_BASE;
        }

        let sealed = if self.options.sealed { " sealed" } else { "" };

        let replacements = [
            Replacement::indented("properties", properties.trim_end_matches(['\r', '\n'])),
            Replacement::new("namespace", clean_namespace(&self.options.namespace)),
            Replacement::new("modifier", self.options.modifier()),
            Replacement::new("sealed", sealed),
            Replacement::new("name", generate_class_name(table.class_name())),
            Replacement::new("inherits", inherits),
            Replacement::new("attributes", class_attributes(self.options, table)),
        ];

        render(&template, &replacements)
    }

    /// Render the property of a column
    pub fn render_property(&self, column: &Column) -> String {
        let template = self.templates.get(property_template_kind(self.options));
        let data_type = self.type_map.resolve(&column.data_type);

        // Strings start out empty instead of null
        let patched;
        let template = if data_type == STRING_TYPE {
            patched = template.with_string_default();
            &patched
        } else {
            template
        };

        let property_name = generate_property_name(column.property_name());
        let nullable = if column.is_nullable { "?" } else { "" };

        let replacements = [
            Replacement::new("type", data_type),
            Replacement::new("nullable", nullable),
            Replacement::new("name2", backing_field_name(&property_name)),
            Replacement::new("name", property_name),
            Replacement::new("attributes", property_attributes(self.options, column, data_type)),
        ];

        render(template, &replacements)
    }
}

/// Path of the generated file of a class
pub fn class_file_path(output: &Path, class_name: &str) -> PathBuf {
    output.join(format!("{}.{}", class_name, SOURCE_EXTENSION))
}

/// Class template for the options
pub fn class_template_kind(options: &GenerationOptions) -> TemplateKind {
    if options.add_summary {
        TemplateKind::ClassDefaultWithNsComment
    } else {
        TemplateKind::ClassDefaultWithNs
    }
}

/// Property template for the options
pub fn property_template_kind(options: &GenerationOptions) -> TemplateKind {
    match (
        options.add_summary,
        options.has_backing_field(),
        options.add_set_property,
    ) {
        (true, true, false) => TemplateKind::PropertyBackingFieldComment,
        (true, true, true) => TemplateKind::PropertyBackingFieldCommentSetField,
        (true, false, _) => TemplateKind::PropertyDefaultComment,
        (false, true, false) => TemplateKind::PropertyBackingFieldDefault,
        (false, true, true) => TemplateKind::PropertyBackingFieldDefaultSetField,
        (false, false, _) => TemplateKind::PropertyDefault,
    }
}

/// Attributes placed above the class, one per line
pub fn class_attributes(options: &GenerationOptions, table: &Table) -> String {
    let mut attributes = Vec::new();

    if options.add_table_name_to_summary {
        attributes.push("/// <remarks>".to_string());
        attributes.push(format!("/// Table <c>{}</c>", table.name));
        attributes.push("/// </remarks>".to_string());
    }

    if options.db_model {
        attributes.push(if table.schema.trim().is_empty() {
            format!("[Table(\"{}\")]", table.name)
        } else {
            format!("[Table(\"{}\", Schema = \"{}\")]", table.name, table.schema)
        });
    }

    attributes.join(NEW_LINE)
}

/// Attributes placed above a property, one per line
pub fn property_attributes(options: &GenerationOptions, column: &Column, data_type: &str) -> String {
    if !options.db_model && !options.add_column_attribute {
        return String::new();
    }

    let mut attributes = Vec::new();

    if options.db_model && column.is_primary_key {
        attributes.push("[Key]".to_string());
    }

    if options.add_column_attribute || column.has_distinct_alias() {
        attributes.push(format!("[Column(\"{}\")]", column.name));
    }

    if column.data_type.eq_ignore_ascii_case("date") {
        attributes.push("[DataType(DataType.Date)]".to_string());
    }

    if data_type == STRING_TYPE {
        // -1 is NVARCHAR(MAX)
        attributes.push(if column.max_length == -1 {
            "[MaxLength(int.MaxValue)]".to_string()
        } else {
            format!("[MaxLength({})]", column.max_length)
        });
    }

    attributes.join(NEW_LINE)
}
