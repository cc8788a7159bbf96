//! End-to-end tests for mssql-classgen
//!
//! Every test drives the public library API against the fixture files in
//! `fixtures/` and writes into its own temporary output directory.

use std::fs;
use std::path::{Path, PathBuf};

use mssql_classgen::codegen::{AssetPaths, ClassManager, GenerationOptions, Progress};
use mssql_classgen::{load_tables, ClassgenBuilder, ClassgenConfig, ClassgenError};
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures").join(name)
}

fn read_class(dir: &TempDir, class_name: &str) -> String {
    fs::read_to_string(dir.path().join(format!("{class_name}.cs"))).unwrap()
}

/// Lines of a generated file, independent of the platform line break
fn lines(content: &str) -> Vec<&str> {
    content.lines().collect()
}

fn customer_builder(out: &TempDir) -> ClassgenBuilder {
    ClassgenBuilder::new(fixture("schema.sql"))
        .output_dir(out.path())
        .namespace("Demo.Models")
        .filter("Customer")
}

#[test]
fn test_plain_class() {
    let out = TempDir::new().unwrap();

    let report = customer_builder(&out).generate().unwrap();
    assert!(report.is_empty());

    let content = read_class(&out, "Customer");
    assert_eq!(
        lines(&content),
        vec![
            "namespace Demo.Models;",
            "",
            "public class Customer",
            "{",
            "    public int Id { get; set; }",
            "",
            "    public string? Name { get; set; } = string.Empty;",
            "}",
        ]
    );
    assert!(!content.contains('['));

    // Only the filtered table is written
    assert!(!out.path().join("OrderLine.cs").exists());
}

#[test]
fn test_ssms_script() {
    let out = TempDir::new().unwrap();

    let report = ClassgenBuilder::new(fixture("ssms_schema.sql"))
        .output_dir(out.path())
        .namespace("Demo.Models")
        .db_model()
        .generate()
        .unwrap();

    let customer = read_class(&out, "Customer");
    let lines = lines(&customer);
    assert!(lines.contains(&"[Table(\"Customer\", Schema = \"dbo\")]"));
    assert!(lines.contains(&"    public int Id { get; set; }"));
    assert!(lines.contains(&"    [MaxLength(50)]"));
    assert!(lines.contains(&"    public string? Name { get; set; } = string.Empty;"));

    let order_line = read_class(&out, "OrderLine");
    assert!(order_line.contains("[MaxLength(int.MaxValue)]"));
    assert!(!order_line.contains("object"));

    assert_eq!(report.table_count, 1);
    assert!(report.code.contains("k.OrderId,"));
}

#[test]
fn test_db_model_class() {
    let out = TempDir::new().unwrap();

    customer_builder(&out).db_model().generate().unwrap();

    let content = read_class(&out, "Customer");
    let lines = lines(&content);
    let table_attr = lines
        .iter()
        .position(|l| *l == "[Table(\"Customer\", Schema = \"dbo\")]")
        .expect("table attribute");
    assert_eq!(lines[table_attr + 1], "public class Customer");

    let id = lines
        .iter()
        .position(|l| l.trim() == "public int Id { get; set; }")
        .expect("Id property");
    assert_eq!(lines[id - 1].trim(), "[Key]");

    let name = lines
        .iter()
        .position(|l| l.trim() == "public string? Name { get; set; } = string.Empty;")
        .expect("Name property");
    assert_eq!(lines[name - 1].trim(), "[MaxLength(50)]");
}

#[test]
fn test_composite_key_report() -> anyhow::Result<()> {
    let out = TempDir::new()?;

    let report = ClassgenBuilder::new(fixture("schema.sql"))
        .output_dir(out.path())
        .namespace("Demo.Models")
        .db_model()
        .generate()?;

    assert_eq!(report.table_count, 1);
    assert_eq!(
        lines(&report.code),
        vec![
            "protected override void OnModelCreating(ModelBuilder modelBuilder)",
            "{",
            "    modelBuilder.Entity<OrderLine>().HasKey(k => new",
            "    {",
            "        k.OrderId,",
            "        k.LineNumber",
            "    });",
            "}",
        ]
    );

    let json = serde_json::to_value(&report)?;
    assert_eq!(json["table_count"], 1);

    // Both classes are written, the underscore is gone from the class name
    let order_line = read_class(&out, "OrderLine");
    assert!(order_line.contains("[Table(\"order_line\", Schema = \"dbo\")]"));
    assert!(order_line.contains("[MaxLength(int.MaxValue)]"));
    assert!(order_line.contains("[DataType(DataType.Date)]"));
    assert!(order_line.contains("public DateTime? DeliveryDate { get; set; }"));
    assert!(out.path().join("Customer.cs").exists());
    Ok(())
}

#[test]
fn test_no_composite_keys_without_db_model() {
    let out = TempDir::new().unwrap();

    let report = ClassgenBuilder::new(fixture("schema.sql"))
        .output_dir(out.path())
        .namespace("Demo.Models")
        .generate()
        .unwrap();

    assert!(report.is_empty());
    assert_eq!(report.table_count, 0);
}

#[test]
fn test_namespace_is_cleaned() {
    let out = TempDir::new().unwrap();

    ClassgenBuilder::new(fixture("schema.sql"))
        .output_dir(out.path())
        .namespace("some name.sub space")
        .filter("Customer")
        .generate()
        .unwrap();

    let content = read_class(&out, "Customer");
    assert_eq!(lines(&content)[0], "namespace Somename.Subspace;");
}

#[test]
fn test_snapshot_with_aliases() {
    let out = TempDir::new().unwrap();

    ClassgenBuilder::from_snapshot(fixture("tables.json"))
        .output_dir(out.path())
        .namespace("Shop")
        .db_model()
        .generate()
        .unwrap();

    let content = read_class(&out, "Kunde");
    let lines = lines(&content);
    assert!(lines.contains(&"[Table(\"tbl_kunde\", Schema = \"sales\")]"));

    let number = lines
        .iter()
        .position(|l| l.trim() == "public int Nummer { get; set; }")
        .expect("Nummer property");
    assert_eq!(lines[number - 2].trim(), "[Key]");
    assert_eq!(lines[number - 1].trim(), "[Column(\"kd_nr\")]");

    assert!(lines.contains(&"    public string? Strasse { get; set; } = string.Empty;"));
    assert!(lines.contains(&"    public DateTime Geaendert { get; set; }"));
}

#[test]
fn test_observable_backing_fields() {
    let out = TempDir::new().unwrap();

    customer_builder(&out).set_property().sealed().generate().unwrap();

    let content = read_class(&out, "Customer");
    let lines = lines(&content);
    assert_eq!(lines[0], "using CommunityToolkit.Mvvm.ComponentModel;");
    assert_eq!(lines[1], "");
    assert_eq!(lines[2], "namespace Demo.Models;");
    assert!(lines.contains(&"public sealed class Customer : ObservableObject"));
    assert!(lines.contains(&"    private string? _name = string.Empty;"));
    assert!(lines.contains(&"        set => SetProperty(ref _name, value);"));
    assert!(lines.contains(&"    private int _id;"));
}

#[test]
fn test_summaries() {
    let out = TempDir::new().unwrap();

    customer_builder(&out)
        .summary()
        .table_name_in_summary()
        .generate()
        .unwrap();

    let content = read_class(&out, "Customer");
    let lines = lines(&content);
    let class = lines
        .iter()
        .position(|l| *l == "public class Customer")
        .expect("class line");
    assert_eq!(lines[class - 1], "/// </remarks>");
    assert_eq!(lines[class - 2], "/// Table <c>Customer</c>");
    assert!(lines.iter().filter(|l| l.trim() == "/// <summary>").count() >= 3);
}

#[test]
fn test_clean_before_export() {
    let out = TempDir::new().unwrap();
    fs::write(out.path().join("Stale.cs"), "class Stale {}").unwrap();
    fs::write(out.path().join("notes.txt"), "keep me").unwrap();

    customer_builder(&out).clean().generate().unwrap();

    assert!(!out.path().join("Stale.cs").exists());
    assert!(out.path().join("notes.txt").exists());
    assert!(out.path().join("Customer.cs").exists());
}

#[test]
fn test_missing_output_directory() {
    let out = TempDir::new().unwrap();
    let missing = out.path().join("does-not-exist");

    let result = ClassgenBuilder::new(fixture("schema.sql"))
        .output_dir(&missing)
        .namespace("Demo")
        .generate();

    match result {
        Err(ClassgenError::DirectoryNotFound(path)) => assert_eq!(path, missing),
        other => panic!("expected DirectoryNotFound, got {:?}", other),
    }
}

#[test]
fn test_missing_templates_degrade_output() {
    let out = TempDir::new().unwrap();
    let templates = TempDir::new().unwrap();
    fs::write(
        templates.path().join("ClassDefaultWithNs.cgt"),
        "namespace $NAMESPACE$;\n\nclass $NAME$\n{\n    $PROPERTIES$\n}\n",
    )
    .unwrap();

    customer_builder(&out)
        .template_dir(templates.path())
        .generate()
        .unwrap();

    // No property template, so the class has no members
    let content = read_class(&out, "Customer");
    assert_eq!(
        lines(&content),
        vec!["namespace Demo.Models;", "", "class Customer", "{", "}"]
    );
}

#[test]
fn test_custom_type_map() {
    let out = TempDir::new().unwrap();
    let type_map = out.path().join("types.json");
    fs::write(
        &type_map,
        r#"[{ "SqlType": "int", "CsharpType": "long" }]"#,
    )
    .unwrap();

    customer_builder(&out).type_map_file(&type_map).generate().unwrap();

    let content = read_class(&out, "Customer");
    assert!(content.contains("    public long Id { get; set; }"));
    // Unmapped types fall back to object
    assert!(content.contains("    public object? Name { get; set; }"));
}

#[test]
fn test_config_file() {
    let out = TempDir::new().unwrap();
    let config_path = out.path().join("mssql-classgen.toml");
    let toml = format!(
        "schema_file = {:?}\noutput_dir = {:?}\nnamespace = \"Demo.Data\"\nmodifier = \"internal\"\nfilter = \"*line\"\n",
        fixture("schema.sql").display().to_string(),
        out.path().display().to_string(),
    );
    fs::write(&config_path, toml).unwrap();

    let config = ClassgenConfig::from_file(&config_path).unwrap();
    config.validate().unwrap();
    mssql_classgen::generate(&config).unwrap();

    let content = read_class(&out, "OrderLine");
    assert!(content.contains("internal class OrderLine"));
    assert!(!out.path().join("Customer.cs").exists());
}

#[test]
fn test_manager_reports_progress_in_order() {
    let out = TempDir::new().unwrap();
    let config = ClassgenConfig {
        schema_file: fixture("schema.sql"),
        namespace: "Demo".to_string(),
        output_dir: out.path().to_path_buf(),
        db_model: true,
        ..Default::default()
    };
    let tables = load_tables(&config).unwrap();

    let manager = ClassManager::new(AssetPaths::default());
    let options: GenerationOptions = config.to_options();
    let mut events = Vec::new();
    manager
        .generate(&options, &tables, &mut |p| events.push(p.clone()))
        .unwrap();

    assert_eq!(events.first(), Some(&Progress::LoadingAssets));
    assert!(matches!(
        &events[1],
        Progress::Table { index: 1, total: 2, name } if name == "Customer"
    ));
    assert!(matches!(
        &events[2],
        Progress::Table { index: 2, total: 2, name } if name == "order_line"
    ));
    assert_eq!(events[3], Progress::CompositeKeys);
    assert_eq!(events.last(), Some(&Progress::Finished { classes: 2 }));
}
