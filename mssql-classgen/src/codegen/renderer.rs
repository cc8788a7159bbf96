//! Placeholder substitution for line templates

use super::template::Template;

/// Line break of the generated files
#[cfg(windows)]
pub const NEW_LINE: &str = "\r\n";
/// Line break of the generated files
#[cfg(not(windows))]
pub const NEW_LINE: &str = "\n";

/// Indent added to the continuation lines of indented values
pub const TAB: &str = "    ";

/// Marks placeholders such as `$NAME$`
const MARKER: char = '$';

/// A value for one placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    /// Placeholder name without markers, matched case-insensitively
    pub key: String,
    /// Replacement text, may span multiple lines
    pub value: String,
    /// Indent the continuation lines of a multi-line value
    pub indent: bool,
}

impl Replacement {
    pub fn new(key: &str, value: impl Into<String>) -> Self {
        Self {
            key: key.to_string(),
            value: value.into(),
            indent: false,
        }
    }

    pub fn indented(key: &str, value: impl Into<String>) -> Self {
        Self {
            key: key.to_string(),
            value: value.into(),
            indent: true,
        }
    }

    /// The placeholder as it appears in a template, e.g. `$NAME$`
    pub fn token(&self) -> String {
        format!("{MARKER}{}{MARKER}", self.key.to_uppercase())
    }

    /// The value as inserted into a line
    fn text(&self) -> String {
        if !self.indent {
            return self.value.clone();
        }

        split_lines(&self.value)
            .enumerate()
            .map(|(i, line)| {
                if i == 0 || line.is_empty() {
                    line.to_string()
                } else {
                    format!("{TAB}{line}")
                }
            })
            .collect::<Vec<_>>()
            .join(NEW_LINE)
    }
}

/// Render a template with the replacements, applied in order.
///
/// Lines without a placeholder marker are copied unchanged. Lines with a
/// marker are dropped when they are blank after the substitution. Every
/// emitted line ends with [`NEW_LINE`].
pub fn render(template: &Template, replacements: &[Replacement]) -> String {
    render_lines(&template.lines, replacements)
}

/// Render raw template lines, see [`render`]
pub fn render_lines(lines: &[String], replacements: &[Replacement]) -> String {
    let substitutions: Vec<(String, String)> =
        replacements.iter().map(|r| (r.token(), r.text())).collect();

    let mut result = String::new();

    for line in lines {
        if !line.contains(MARKER) {
            result.push_str(line);
            result.push_str(NEW_LINE);
            continue;
        }

        let mut content = line.clone();
        for (token, text) in &substitutions {
            content = content.replace(token.as_str(), text);
        }

        if content.trim().is_empty() {
            continue;
        }

        result.push_str(&content);
        result.push_str(NEW_LINE);
    }

    result
}

/// Split on `\n`, dropping the `\r` of `\r\n` line breaks
fn split_lines(value: &str) -> impl Iterator<Item = &str> {
    value.split('\n').map(|line| line.strip_suffix('\r').unwrap_or(line))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::template::TemplateKind;

    fn template(lines: &[&str]) -> Template {
        Template {
            kind: TemplateKind::PropertyDefault,
            lines: lines.iter().map(|l| l.to_string()).collect(),
        }
    }

    fn joined(lines: &[&str]) -> String {
        lines.iter().map(|l| format!("{l}{NEW_LINE}")).collect()
    }

    #[test]
    fn test_replaces_all_occurrences() {
        let t = template(&["get => $NAME2$; set => $NAME2$ = value;"]);
        let out = render(&t, &[Replacement::new("name2", "_id")]);
        assert_eq!(out, joined(&["get => _id; set => _id = value;"]));
    }

    #[test]
    fn test_key_is_case_insensitive() {
        let t = template(&["public $TYPE$ $NAME$"]);
        let out = render(
            &t,
            &[Replacement::new("Type", "int"), Replacement::new("NAME", "Id")],
        );
        assert_eq!(out, joined(&["public int Id"]));
    }

    #[test]
    fn test_lines_without_marker_are_copied() {
        let t = template(&["{", "", "   ", "    // note", "$X$", "}"]);
        let out = render(&t, &[Replacement::new("x", "value")]);
        assert_eq!(out, joined(&["{", "", "   ", "    // note", "value", "}"]));
    }

    #[test]
    fn test_empty_placeholder_line_is_dropped() {
        let t = template(&["$ATTRIBUTES$", "  $NULLABLE$  ", "public int Id;"]);
        let out = render(
            &t,
            &[
                Replacement::new("attributes", ""),
                Replacement::new("nullable", ""),
            ],
        );
        assert_eq!(out, joined(&["public int Id;"]));
    }

    #[test]
    fn test_unknown_placeholder_is_kept() {
        let t = template(&["price in $USD$"]);
        let out = render(&t, &[Replacement::new("name", "x")]);
        assert_eq!(out, joined(&["price in $USD$"]));
    }

    #[test]
    fn test_indented_multiline_value() {
        let t = template(&["{", "    $PROPERTIES$", "}"]);
        let value = format!("[Key]{NEW_LINE}public int Id {{ get; set; }}{NEW_LINE}{NEW_LINE}public string Name {{ get; set; }}");
        let out = render(&t, &[Replacement::indented("properties", value)]);
        assert_eq!(
            out,
            joined(&[
                "{",
                "    [Key]",
                "    public int Id { get; set; }",
                "",
                "    public string Name { get; set; }",
                "}",
            ])
        );
    }

    #[test]
    fn test_multiline_value_without_indent() {
        let t = template(&["$ATTRIBUTES$", "class A"]);
        let out = render(&t, &[Replacement::new("attributes", "[A]\n[B]")]);
        assert_eq!(out, format!("[A]\n[B]{NEW_LINE}class A{NEW_LINE}"));
    }

    #[test]
    fn test_render_is_idempotent() {
        let t = template(&["$A$ and $B$", "plain", "$C$"]);
        let replacements = [
            Replacement::new("a", "1"),
            Replacement::indented("b", "x\ny"),
            Replacement::new("c", ""),
        ];
        assert_eq!(render(&t, &replacements), render(&t, &replacements));
    }
}
