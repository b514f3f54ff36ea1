//! Display helpers for offer values.

use crate::helpers::format_number;
use serde_json::Value;

/// Splits `input` into groups of three characters counted from the right. The leftmost group
/// holds whatever is left over (one to three characters).
/// 
/// `"1234567"` becomes `["1", "234", "567"]`.
pub fn trisect_groups(input: &str) -> Vec<&str> {
    // Byte offsets of every character boundary, including the end of the string.
    let boundaries = input
        .char_indices()
        .map(|(index, _)| index)
        .chain(std::iter::once(input.len()))
        .collect::<Vec<_>>();
    let count = boundaries.len() - 1;
    let mut groups = Vec::with_capacity(count.div_ceil(3));
    let mut from = 0;
    let mut to = match count % 3 {
        0 => count.min(3),
        leftover => leftover,
    };
    
    while from < count {
        groups.push(&input[boundaries[from]..boundaries[to]]);
        from = to;
        to += 3;
    }
    
    groups
}

/// Wraps every group from [`trisect_groups`] in a `dec-sp` span so digit groups can be spaced
/// apart when rendered. An empty input gives an empty string.
pub fn trisect(input: &str) -> String {
    trisect_groups(input)
        .into_iter()
        .map(|group| format!(r#"<span class="dec-sp">{group}</span>"#))
        .collect()
}

/// [`trisect`] for a JSON value. Falsy values (`null`, `false`, `0`, `""`) give an empty string.
pub fn trisect_value(value: &Value) -> String {
    match value {
        Value::Null | Value::Bool(false) => String::new(),
        Value::Number(number) => match number.as_f64() {
            Some(number) => trisect_number(number),
            None => trisect(&number.to_string()),
        },
        Value::String(text) => trisect(text),
        other => trisect(&other.to_string()),
    }
}

/// [`trisect`] for a number. Whole numbers are written without a fractional part; zero and NaN
/// give an empty string.
pub fn trisect_number(number: f64) -> String {
    if number == 0.0 || number.is_nan() {
        return String::new();
    }
    
    trisect(&format_number(number))
}

/// Strips the coordinates from a location, e.g. `"Giran x:5 y:3"` becomes `"Giran"`. A location
/// without coordinates is returned unchanged.
pub fn noloc(input: &str) -> &str {
    match input.find(" x:") {
        Some(index) => &input[..index],
        None => input,
    }
}

/// [`noloc`] for a location that may be missing. A missing location gives an empty string.
pub fn noloc_or_empty(input: Option<&str>) -> &str {
    input.map(noloc).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    
    #[test]
    fn groups_from_the_right() {
        assert_eq!(trisect_groups("1234567"), vec!["1", "234", "567"]);
        assert_eq!(trisect_groups("123456"), vec!["123", "456"]);
        assert_eq!(trisect_groups("12"), vec!["12"]);
    }
    
    #[test]
    fn empty_input_is_empty() {
        assert!(trisect_groups("").is_empty());
        assert_eq!(trisect(""), "");
    }
    
    #[test]
    fn wraps_groups() {
        assert_eq!(
            trisect("1234567"),
            r#"<span class="dec-sp">1</span><span class="dec-sp">234</span><span class="dec-sp">567</span>"#,
        );
    }
    
    #[test]
    fn groups_multibyte_characters() {
        assert_eq!(trisect_groups("1 234"), vec!["1 ", "234"]);
        assert_eq!(trisect_groups("ä1234"), vec!["ä1", "234"]);
    }
    
    #[test]
    fn trisects_numbers() {
        assert_eq!(trisect_number(1234567.0), trisect("1234567"));
        assert_eq!(trisect_number(1234.5), trisect("1234.5"));
        assert_eq!(trisect_number(0.0), "");
    }
    
    #[test]
    fn trisects_values() {
        assert_eq!(trisect_value(&serde_json::json!(4800000)), trisect("4800000"));
        assert_eq!(trisect_value(&serde_json::json!("1000")), trisect("1000"));
        assert_eq!(trisect_value(&Value::Null), "");
        assert_eq!(trisect_value(&serde_json::json!(0)), "");
    }
    
    #[test]
    fn strips_location() {
        assert_eq!(noloc("Foo x:5 y:3"), "Foo");
        assert_eq!(noloc("Giran Castle x:-12 y:40"), "Giran Castle");
    }
    
    #[test]
    fn keeps_input_without_location() {
        assert_eq!(noloc("Foo"), "Foo");
        assert_eq!(noloc(""), "");
        assert_eq!(noloc_or_empty(None), "");
        assert_eq!(noloc_or_empty(Some("Dion x:1 y:2")), "Dion");
    }
}
