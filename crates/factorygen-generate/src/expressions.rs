use std::collections::BTreeMap;
use std::fmt;

/// A fake-value expression emitted into a generated factory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueExpression {
    /// A short random word.
    Word,
    /// A random integer in `[min, max]`.
    IntegerBetween { min: i64, max: i64 },
    /// The current timestamp.
    Now,
    /// A literal expression supplied by configuration.
    Custom(String),
}

impl fmt::Display for ValueExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueExpression::Word => f.write_str("$faker->word"),
            ValueExpression::IntegerBetween { min, max } => {
                write!(f, "$faker->numberBetween({min}, {max})")
            }
            ValueExpression::Now => f.write_str("\\Illuminate\\Support\\Carbon::now()"),
            ValueExpression::Custom(expression) => f.write_str(expression),
        }
    }
}

/// Base type keyword of a raw column type.
///
/// `int(10) unsigned` → `int`, `varchar(255)` → `varchar`.
pub fn family_token(raw_type: &str) -> &str {
    let first = raw_type.split_whitespace().next().unwrap_or("");
    first.split('(').next().unwrap_or("")
}

/// Built-in mapping from a raw column type to a fake-value expression.
///
/// Matching is case-sensitive on the family token. Returns `None` for
/// families without a built-in expression.
pub fn map_type_to_expression(raw_type: &str) -> Option<ValueExpression> {
    match family_token(raw_type) {
        "char" | "text" | "varchar" => Some(ValueExpression::Word),
        "int" | "bigint" | "tinyint" => Some(ValueExpression::IntegerBetween { min: 0, max: 10 }),
        "datetime" => Some(ValueExpression::Now),
        _ => None,
    }
}

/// Expression mapping with configured per-family overrides.
#[derive(Debug, Clone, Default)]
pub struct ExpressionMapper {
    overrides: BTreeMap<String, String>,
}

impl ExpressionMapper {
    pub fn new(overrides: BTreeMap<String, String>) -> Self {
        Self { overrides }
    }

    pub fn map(&self, raw_type: &str) -> Option<ValueExpression> {
        let family = family_token(raw_type);
        match self.overrides.get(family) {
            Some(expression) => Some(ValueExpression::Custom(expression.clone())),
            None => map_type_to_expression(raw_type),
        }
    }
}
