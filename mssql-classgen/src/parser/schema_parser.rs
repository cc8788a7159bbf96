//! T-SQL schema parser using sqlparser-rs

use sqlparser::ast::{
    ColumnOption, Expr, IndexColumn, ObjectName, PrimaryKeyConstraint, Statement,
    TableConstraint,
};
use sqlparser::dialect::MsSqlDialect;
use sqlparser::parser::Parser;
use tracing::{debug, warn};

use super::metadata::*;
use crate::error::Result;

/// Default value text for columns without a default constraint
const NO_DEFAULT: &str = "NULL";

/// Parse a T-SQL schema script into tables
///
/// The script is split into batches on lines that only contain `GO`, and the
/// storage clauses SSMS scripts carry are removed before parsing. A batch
/// without `CREATE TABLE` that fails to parse (`SET ANSI_NULLS ON`,
/// `ALTER TABLE ... ADD DEFAULT`, ...) is skipped with a warning; a failing
/// table batch is an error. Statements other than `CREATE TABLE` are ignored.
pub fn parse_schema(sql: &str) -> Result<Vec<Table>> {
    let dialect = MsSqlDialect {};
    let mut tables = Vec::new();

    for batch in split_batches(sql) {
        let batch = strip_storage_clauses(&batch);
        let statements = match Parser::parse_sql(&dialect, &batch) {
            Ok(statements) => statements,
            Err(e) if !declares_table(&batch) => {
                warn!("Skipping batch that can't be parsed: {}", e);
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        for stmt in statements {
            if let Statement::CreateTable(create_table) = stmt {
                let id = tables.len() as i32 + 1;
                let table = extract_table(&create_table, id);
                debug!(
                    "Parsed table {}.{} with {} columns",
                    table.schema,
                    table.name,
                    table.columns.len()
                );
                tables.push(table);
            }
        }
    }

    Ok(tables)
}

/// Split a script into batches on `GO` lines, which are client-side batch
/// separators and not T-SQL. Blank batches are dropped.
fn split_batches(sql: &str) -> Vec<String> {
    let mut batches = vec![String::new()];
    for line in sql.lines() {
        if line.trim().eq_ignore_ascii_case("go") {
            batches.push(String::new());
        } else if let Some(batch) = batches.last_mut() {
            batch.push_str(line);
            batch.push('\n');
        }
    }
    batches.retain(|b| !b.trim().is_empty());
    batches
}

fn declares_table(batch: &str) -> bool {
    let words: Vec<&str> = batch.split_whitespace().collect();
    words.windows(2).any(|w| {
        w[0].eq_ignore_ascii_case("CREATE") && w[1].eq_ignore_ascii_case("TABLE")
    })
}

/// Keywords followed by a filegroup or partition scheme
const STORAGE_KEYWORDS: [&str; 3] = ["ON", "TEXTIMAGE_ON", "FILESTREAM_ON"];

/// Remove the storage clauses sqlparser can't read: `ON [PRIMARY]`,
/// `TEXTIMAGE_ON [PRIMARY]`, `FILESTREAM_ON [..]`, `ON [scheme]([col])` and
/// option lists such as `WITH (PAD_INDEX = OFF, ...)`.
///
/// String literals, bracketed identifiers and comments are copied as they
/// are. `ON` without a bracketed name (`ON DELETE CASCADE`) is kept.
fn strip_storage_clauses(batch: &str) -> String {
    let chars: Vec<char> = batch.chars().collect();
    let mut out = String::with_capacity(batch.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();

        let end = match c {
            '\'' => skip_quoted(&chars, i, '\''),
            '[' => skip_quoted(&chars, i, ']'),
            '-' if next == Some('-') => skip_until(&chars, i, "\n"),
            '/' if next == Some('*') => skip_until(&chars, i, "*/"),
            c if is_word_char(c) => {
                let mut end = i;
                while end < chars.len() && is_word_char(chars[end]) {
                    end += 1;
                }
                let word: String = chars[i..end].iter().collect();
                if let Some(clause_end) = storage_clause_end(&word, &chars, end) {
                    i = clause_end;
                    continue;
                }
                end
            }
            _ => i + 1,
        };

        out.extend(&chars[i..end]);
        i = end;
    }

    out
}

/// End of the storage clause starting with `word`, if it starts one
fn storage_clause_end(word: &str, chars: &[char], pos: usize) -> Option<usize> {
    let next = skip_whitespace(chars, pos);

    if word.eq_ignore_ascii_case("WITH") {
        return (chars.get(next) == Some(&'(')).then(|| skip_parens(chars, next));
    }

    let is_storage = STORAGE_KEYWORDS
        .iter()
        .any(|k| word.eq_ignore_ascii_case(k));
    if !is_storage || chars.get(next) != Some(&'[') {
        return None;
    }

    let end = skip_quoted(chars, next, ']');
    let after = skip_whitespace(chars, end);
    if chars.get(after) == Some(&'(') {
        Some(skip_parens(chars, after))
    } else {
        Some(end)
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '@' || c == '#'
}

fn skip_whitespace(chars: &[char], mut pos: usize) -> usize {
    while pos < chars.len() && chars[pos].is_whitespace() {
        pos += 1;
    }
    pos
}

/// Index after a quoted token opened at `start`; a doubled `close` is an escape
fn skip_quoted(chars: &[char], start: usize, close: char) -> usize {
    let mut pos = start + 1;
    while pos < chars.len() {
        if chars[pos] == close {
            if chars.get(pos + 1) == Some(&close) {
                pos += 2;
                continue;
            }
            return pos + 1;
        }
        pos += 1;
    }
    chars.len()
}

/// Index after `terminator`, or the end of the input
fn skip_until(chars: &[char], start: usize, terminator: &str) -> usize {
    let terminator: Vec<char> = terminator.chars().collect();
    let mut pos = start + 2;
    while pos < chars.len() {
        if chars[pos..].starts_with(&terminator) {
            return pos + terminator.len();
        }
        pos += 1;
    }
    chars.len()
}

/// Index after the parenthesis matching the one at `open`
fn skip_parens(chars: &[char], open: usize) -> usize {
    let mut depth = 0;
    let mut pos = open;
    while pos < chars.len() {
        match chars[pos] {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return pos + 1;
                }
            }
            '\'' => {
                pos = skip_quoted(chars, pos, '\'');
                continue;
            }
            '[' => {
                pos = skip_quoted(chars, pos, ']');
                continue;
            }
            _ => {}
        }
        pos += 1;
    }
    chars.len()
}

/// Extract a table from a CREATE TABLE statement
fn extract_table(create: &sqlparser::ast::CreateTable, id: i32) -> Table {
    let (schema, name) = split_object_name(&create.name);

    let mut columns: Vec<Column> = create
        .columns
        .iter()
        .enumerate()
        .map(|(index, col_def)| extract_column(col_def, id, index as i32 + 1))
        .collect();

    for constraint in &create.constraints {
        if let TableConstraint::PrimaryKey(PrimaryKeyConstraint {
            columns: pk_cols, ..
        }) = constraint
        {
            for pk_col in pk_cols {
                let col_name = extract_ident_from_index_column(pk_col);
                if let Some(col) = columns
                    .iter_mut()
                    .find(|c| c.name.eq_ignore_ascii_case(&col_name))
                {
                    col.is_primary_key = true;
                    col.is_nullable = false;
                }
            }
        }
    }

    Table {
        id,
        name,
        schema,
        alias: String::new(),
        columns,
    }
}

/// Extract a column from a column definition
fn extract_column(col_def: &sqlparser::ast::ColumnDef, table_id: i32, order: i32) -> Column {
    let (data_type, max_length) = split_data_type(&col_def.data_type.to_string());

    // SQL Server columns are nullable unless declared otherwise
    let mut is_nullable = true;
    let mut is_primary_key = false;
    let mut default_value = NO_DEFAULT.to_string();

    for option in &col_def.options {
        match &option.option {
            ColumnOption::NotNull => {
                is_nullable = false;
            }
            ColumnOption::Null => {
                is_nullable = true;
            }
            ColumnOption::Default(expr) => {
                default_value = format!("{}", expr);
            }
            ColumnOption::PrimaryKey(_) => {
                is_primary_key = true;
                is_nullable = false;
            }
            _ => {}
        }
    }

    Column {
        table_id,
        name: col_def.name.value.clone(),
        alias: String::new(),
        order,
        data_type,
        max_length,
        is_nullable,
        is_primary_key,
        default_value,
    }
}

/// Split a rendered data type like `NVARCHAR(50)` or `[nvarchar](50)` into
/// the unquoted lower-case base name and the length (`-1` for `MAX`, `0` when
/// there is none)
fn split_data_type(rendered: &str) -> (String, i32) {
    let (base, args) = match rendered.split_once('(') {
        Some((base, rest)) => (base, rest.trim_end_matches(')')),
        None => (rendered, ""),
    };

    let first_arg = args.split(',').next().unwrap_or_default().trim();
    let max_length = if first_arg.eq_ignore_ascii_case("max") {
        -1
    } else {
        first_arg.parse().unwrap_or(0)
    };

    let base: String = base
        .trim()
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | '"'))
        .collect();
    (base.to_lowercase(), max_length)
}

/// Split an ObjectName into schema (may be empty) and object name
fn split_object_name(name: &ObjectName) -> (String, String) {
    let parts: Vec<String> = name
        .0
        .iter()
        .filter_map(|part| part.as_ident())
        .map(|ident| ident.value.clone())
        .collect();

    match parts.as_slice() {
        [] => (String::new(), String::new()),
        [table] => (String::new(), table.clone()),
        [.., schema, table] => (schema.clone(), table.clone()),
    }
}

/// Extract a column name string from an IndexColumn
fn extract_ident_from_index_column(ic: &IndexColumn) -> String {
    match &ic.column.expr {
        Expr::Identifier(ident) => ident.value.clone(),
        other => format!("{}", other),
    }
}
