//! Naming utilities: turn raw schema identifiers into C# identifiers

/// Replacements applied to every identifier
const UMLAUTS: [(&str, &str); 8] = [
    (" ", ""),
    ("ä", "ae"),
    ("ö", "oe"),
    ("ü", "ue"),
    ("ß", "ss"),
    ("Ä", "Ae"),
    ("Ö", "Oe"),
    ("Ü", "Ue"),
];

/// Prefix for namespaces starting with a digit
const NAMESPACE_PREFIX: &str = "Ns";

/// Prefix for class names starting with a digit
const CLASS_PREFIX: &str = "Class";

/// Prefix for property names starting with a digit
const PROPERTY_PREFIX: &str = "Column";

/// Clean a namespace: every dot-separated segment is trimmed, gets an upper
/// case first letter and loses its spaces
///
/// `"some name.sub space"` becomes `"Somename.Subspace"`.
pub fn clean_namespace(raw: &str) -> String {
    let joined = raw
        .split('.')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(first_char_to_upper)
        .collect::<Vec<_>>()
        .join(".");

    with_prefix(replace_invalid_chars(&joined, false), NAMESPACE_PREFIX)
}

/// Generate a class name from a table name (or its alias)
///
/// Names with underscores are split on them and every part is capitalized,
/// so `order_line` becomes `OrderLine`.
pub fn generate_class_name(raw: &str) -> String {
    let name = if raw.contains('_') {
        raw.split('_')
            .filter(|part| !part.is_empty())
            .map(first_char_to_upper)
            .collect::<String>()
    } else {
        first_char_to_upper(raw)
    };

    with_prefix(replace_invalid_chars(&name, false), CLASS_PREFIX)
}

/// Generate a property name from a column name (or its alias)
///
/// Underscores are dropped without capitalizing the following letter.
pub fn generate_property_name(raw: &str) -> String {
    let name = first_char_to_upper(&replace_invalid_chars(raw, true));
    with_prefix(name, PROPERTY_PREFIX)
}

/// Name of the backing field of a property: `Name` becomes `_name`
pub fn backing_field_name(property_name: &str) -> String {
    format!("_{}", first_char_to_lower(property_name))
}

/// Replace umlauts and spaces, optionally dropping underscores too
pub fn replace_invalid_chars(value: &str, remove_underscore: bool) -> String {
    let mut result = value.to_string();
    for (from, to) in UMLAUTS {
        result = result.replace(from, to);
    }
    if remove_underscore {
        result = result.replace('_', "");
    }
    result
}

/// Upper-case the first character
pub fn first_char_to_upper(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lower-case the first character
pub fn first_char_to_lower(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Prefix names that start with a digit; an empty name becomes the prefix
fn with_prefix(name: String, prefix: &str) -> String {
    match name.chars().next() {
        None => prefix.to_string(),
        Some(first) if first.is_ascii_digit() => format!("{}{}", prefix, name),
        Some(_) => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_namespace() {
        assert_eq!(clean_namespace("some name.sub space"), "Somename.Subspace");
        assert_eq!(clean_namespace("demo.models"), "Demo.Models");
        assert_eq!(clean_namespace(" demo . models "), "Demo.Models");
        assert_eq!(clean_namespace("demo..models"), "Demo.Models");
        assert_eq!(clean_namespace("Übersicht.daten"), "Uebersicht.Daten");
        assert_eq!(clean_namespace("1st.models"), "Ns1st.Models");
    }

    #[test]
    fn test_generate_class_name() {
        assert_eq!(generate_class_name("customer"), "Customer");
        assert_eq!(generate_class_name("order_line"), "OrderLine");
        assert_eq!(generate_class_name("__tbl__order_line_"), "TblOrderLine");
        assert_eq!(generate_class_name("größe"), "Groesse");
        assert_eq!(generate_class_name("my table"), "Mytable");
        assert_eq!(generate_class_name("2020_sales"), "Class2020Sales");
        assert_eq!(generate_class_name("_"), "Class");
    }

    #[test]
    fn test_generate_property_name() {
        assert_eq!(generate_property_name("id"), "Id");
        assert_eq!(generate_property_name("first_name"), "Firstname");
        assert_eq!(generate_property_name("straße"), "Strasse");
        assert_eq!(generate_property_name("Zip Code"), "ZipCode");
        assert_eq!(generate_property_name("1_line"), "Column1line");
    }

    #[test]
    fn test_backing_field_name() {
        assert_eq!(backing_field_name("Name"), "_name");
        assert_eq!(backing_field_name("ZipCode"), "_zipCode");
    }

    #[test]
    fn test_sanitized_names_never_start_with_digit() {
        for raw in ["1", "9abc", "0_x", " 7 ", "42.foo"] {
            for name in [
                clean_namespace(raw),
                generate_class_name(raw),
                generate_property_name(raw),
            ] {
                let first = name.chars().next().unwrap();
                assert!(!first.is_ascii_digit(), "{raw:?} -> {name:?}");
            }
        }
    }

    #[test]
    fn test_class_name_without_underscores() {
        for raw in ["a_b", "_a", "a__b_", "x_1_y"] {
            assert!(!generate_class_name(raw).contains('_'));
        }
    }
}
