//! Turns free-form ingredient lines ("1 1/2 cups flour") into count, unit and
//! ingredient text.
//!
//! Parsing is driven by two tables: [`UNIT_SYNONYMS`] folds verbose unit names
//! into their short form and [`RULES`] lists the line shapes that are tried in
//! order. The last rule accepts any input, so every line yields a result.

use serde::{Deserialize, Serialize};

/// A single ingredient line split into its parts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedIngredient {
    /// Quantity, `None` when the line does not start with one
    pub count: Option<f64>,
    /// Short unit name, empty when no unit was recognised
    pub unit: String,
    pub ingredient: String,
}

/// Verbose unit spellings and the short form they are folded into
pub const UNIT_SYNONYMS: &[(&str, &str)] = &[
    ("tablespoons", "tbsp"),
    ("tablespoon", "tbsp"),
    ("ounces", "oz"),
    ("ounce", "oz"),
    ("teaspoons", "tsp"),
    ("teaspoon", "tsp"),
    ("cups", "cup"),
    ("pounds", "pound"),
    ("grams", "g"),
    ("kilograms", "kg"),
];

/// Units recognised after synonym folding
pub const UNITS: &[&str] = &["tbsp", "oz", "tsp", "cup", "pound", "kg", "g"];

const VULGAR_FRACTIONS: &[(char, f64)] = &[
    ('½', 0.5),
    ('⅓', 1.0 / 3.0),
    ('⅔', 2.0 / 3.0),
    ('¼', 0.25),
    ('¾', 0.75),
    ('⅛', 0.125),
];

type Rule = fn(&[&str]) -> Option<ParsedIngredient>;

/// Line shapes, tried first to last
pub const RULES: &[(&str, Rule)] = &[
    ("leading unit", leading_unit),
    ("leading quantity", leading_quantity),
    ("plain text", plain_text),
];

/// Parse one raw ingredient line. Never fails.
pub fn parse_ingredient(line: &str) -> ParsedIngredient {
    let cleaned = strip_parenthesized(line);
    let tokens: Vec<&str> = cleaned.split_whitespace().collect();

    RULES
        .iter()
        .find_map(|(_, rule)| rule(&tokens))
        .unwrap_or_else(|| ParsedIngredient {
            count: None,
            unit: String::new(),
            ingredient: tokens.join(" "),
        })
}

fn leading_unit(tokens: &[&str]) -> Option<ParsedIngredient> {
    let unit = normalize_unit(tokens.first()?)?;
    Some(ParsedIngredient {
        count: None,
        unit: unit.to_string(),
        ingredient: tokens[1..].join(" "),
    })
}

fn leading_quantity(tokens: &[&str]) -> Option<ParsedIngredient> {
    let first = parse_quantity(tokens.first()?)?;

    // "1 1/2" is a mixed number spread over two tokens
    let (count, mut rest) = match tokens.get(1) {
        Some(next) if is_whole_number(tokens[0]) && next.contains('/') => {
            match parse_quantity(next) {
                Some(fraction) => (first + fraction, 2),
                None => (first, 1),
            }
        }
        _ => (first, 1),
    };

    let unit = match tokens.get(rest).and_then(|token| normalize_unit(token)) {
        Some(unit) => {
            rest += 1;
            unit.to_string()
        }
        None => String::new(),
    };

    Some(ParsedIngredient {
        count: Some(count),
        unit,
        ingredient: tokens[rest..].join(" "),
    })
}

fn plain_text(tokens: &[&str]) -> Option<ParsedIngredient> {
    Some(ParsedIngredient {
        count: None,
        unit: String::new(),
        ingredient: tokens.join(" "),
    })
}

/// Map a token to its short unit name, if it is one
fn normalize_unit(token: &str) -> Option<&'static str> {
    let lower = token.trim_end_matches(['.', ',']).to_lowercase();
    UNIT_SYNONYMS
        .iter()
        .find(|(long, _)| *long == lower)
        .map(|(_, short)| *short)
        .or_else(|| UNITS.iter().find(|unit| **unit == lower).copied())
}

/// Accepts "2", "0.5", "1/2", "½", "1-1/2" (mixed) and "2-3" (range, lower bound)
fn parse_quantity(token: &str) -> Option<f64> {
    if let Some((left, right)) = token.split_once('-') {
        let low = parse_simple(left)?;
        return if right.contains('/') {
            Some(low + parse_simple(right)?)
        } else {
            parse_simple(right).map(|_| low)
        };
    }
    parse_simple(token)
}

fn parse_simple(token: &str) -> Option<f64> {
    if let Some((numerator, denominator)) = token.split_once('/') {
        let numerator = parse_decimal(numerator)?;
        let denominator = parse_decimal(denominator)?;
        return (denominator != 0.0).then(|| numerator / denominator);
    }

    let mut chars = token.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if let Some((_, value)) = VULGAR_FRACTIONS.iter().find(|(f, _)| *f == c) {
            return Some(*value);
        }
    }

    parse_decimal(token)
}

fn parse_decimal(token: &str) -> Option<f64> {
    if token.is_empty() || !token.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }
    token.parse::<f64>().ok()
}

fn is_whole_number(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_digit())
}

fn strip_parenthesized(line: &str) -> String {
    let mut depth = 0usize;
    let mut out = String::with_capacity(line.len());
    for c in line.chars() {
        match c {
            '(' => {
                depth += 1;
                out.push(' ');
            }
            ')' if depth > 0 => depth -= 1,
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    out
}

const FRACTION_EPSILON: f64 = 1e-3;

/// Render a count as a whole or mixed number ("2", "1/3", "2 1/2").
/// Counts that do not land near a fraction with a small denominator fall back
/// to two decimals.
pub fn format_count(count: Option<f64>) -> String {
    let Some(count) = count else {
        return String::new();
    };
    if !count.is_finite() {
        return count.to_string();
    }

    let sign = if count < 0.0 { "-" } else { "" };
    let value = count.abs();
    let whole = value.trunc() as u64;
    let fraction = value.fract();

    if fraction < FRACTION_EPSILON {
        return format!("{}{}", sign, whole);
    }
    if 1.0 - fraction < FRACTION_EPSILON {
        return format!("{}{}", sign, whole + 1);
    }

    for denominator in 2..=16u32 {
        let numerator = (fraction * denominator as f64).round();
        if numerator >= 1.0 && (fraction - numerator / denominator as f64).abs() < FRACTION_EPSILON
        {
            return if whole == 0 {
                format!("{}{}/{}", sign, numerator as u32, denominator)
            } else {
                format!("{}{} {}/{}", sign, whole, numerator as u32, denominator)
            };
        }
    }

    format!("{}{:.2}", sign, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(count: Option<f64>, unit: &str, ingredient: &str) -> ParsedIngredient {
        ParsedIngredient {
            count,
            unit: unit.to_string(),
            ingredient: ingredient.to_string(),
        }
    }

    #[test]
    fn test_fraction_with_unit() {
        assert_eq!(
            parse_ingredient("1/2 cup Sugar"),
            parsed(Some(0.5), "cup", "Sugar")
        );
    }

    #[test]
    fn test_count_without_unit() {
        assert_eq!(parse_ingredient("2 apples"), parsed(Some(2.0), "", "apples"));
    }

    #[test]
    fn test_mixed_number_over_two_tokens() {
        assert_eq!(
            parse_ingredient("1 1/2 cups all-purpose flour"),
            parsed(Some(1.5), "cup", "all-purpose flour")
        );
    }

    #[test]
    fn test_dash_joined_mixed_number_and_range() {
        assert_eq!(
            parse_ingredient("1-1/2 Tablespoons olive oil"),
            parsed(Some(1.5), "tbsp", "olive oil")
        );
        assert_eq!(
            parse_ingredient("2-3 cloves garlic"),
            parsed(Some(2.0), "", "cloves garlic")
        );
    }

    #[test]
    fn test_synonyms_are_folded() {
        let cases = [
            ("3 tablespoons butter", "tbsp"),
            ("1 teaspoon salt", "tsp"),
            ("8 ounces cream cheese", "oz"),
            ("1 ounce chocolate", "oz"),
            ("2 pounds chicken", "pound"),
            ("500 grams pasta", "g"),
            ("1 kg potatoes", "kg"),
            ("2 Tbsp. honey", "tbsp"),
        ];
        for (line, unit) in cases {
            assert_eq!(parse_ingredient(line).unit, unit, "line: {}", line);
        }
    }

    #[test]
    fn test_leading_unit_without_count() {
        assert_eq!(
            parse_ingredient("cup of milk"),
            parsed(None, "cup", "of milk")
        );
    }

    #[test]
    fn test_plain_text_line() {
        assert_eq!(
            parse_ingredient("Salt and pepper to taste"),
            parsed(None, "", "Salt and pepper to taste")
        );
    }

    #[test]
    fn test_parenthesized_notes_removed() {
        assert_eq!(
            parse_ingredient("1 (8 ounce) package cream cheese"),
            parsed(Some(1.0), "", "package cream cheese")
        );
        assert_eq!(
            parse_ingredient("2 cups water (optional)"),
            parsed(Some(2.0), "cup", "water")
        );
    }

    #[test]
    fn test_vulgar_fraction() {
        assert_eq!(
            parse_ingredient("½ tsp cinnamon"),
            parsed(Some(0.5), "tsp", "cinnamon")
        );
    }

    #[test]
    fn test_number_in_second_position_is_not_a_fraction() {
        assert_eq!(
            parse_ingredient("2 14 oz cans tomatoes"),
            parsed(Some(2.0), "", "14 oz cans tomatoes")
        );
    }

    #[test]
    fn test_parsing_is_total_and_deterministic() {
        let lines = [
            "",
            "   ",
            "(",
            ")",
            "((unbalanced",
            "1/0 cup",
            "/",
            "-",
            "1-",
            "-1/2",
            "nan cups",
            "inf",
            "1..2 g",
            "cup",
            "¾",
            "ß ounces",
            "1 1/ cup",
            "🍕 2 slices",
        ];
        for line in lines {
            let first = parse_ingredient(line);
            let second = parse_ingredient(line);
            assert_eq!(first, second, "line: {:?}", line);
        }
        assert_eq!(parse_ingredient(""), parsed(None, "", ""));
        assert_eq!(parse_ingredient("1/0 cup"), parsed(None, "", "1/0 cup"));
        assert_eq!(parse_ingredient("1 1/ cup"), parsed(Some(1.0), "", "1/ cup"));
    }

    #[test]
    fn test_last_rule_accepts_anything() {
        let (name, rule) = RULES.last().unwrap();
        assert_eq!(*name, "plain text");
        assert!(rule(&[]).is_some());
        assert!(rule(&["anything", "at", "all"]).is_some());
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(None), "");
        assert_eq!(format_count(Some(2.0)), "2");
        assert_eq!(format_count(Some(2.5)), "2 1/2");
        assert_eq!(format_count(Some(0.5)), "1/2");
        assert_eq!(format_count(Some(1.0 / 3.0)), "1/3");
        assert_eq!(format_count(Some(0.625)), "5/8");
        assert_eq!(format_count(Some(1.9999)), "2");
        assert_eq!(format_count(Some(0.123)), "0.12");
        assert_eq!(format_count(Some(-1.5)), "-1 1/2");
    }
}
