use num_traits::{PrimInt, Unsigned};

/// Vertex identifiers accepted by the converter.
/// Any unsigned primitive integer that can be parsed from text and printed back qualifies.
pub trait ValidGraphType:
    PrimInt + Unsigned + std::str::FromStr + std::hash::Hash + std::fmt::Display + std::fmt::Debug
{
    /// Parses a single whitespace-free token into a vertex id.
    fn parse_token(token: &str) -> Option<Self> {
        token.parse::<Self>().ok()
    }
}

impl<T> ValidGraphType for T where
    T: PrimInt + Unsigned + std::str::FromStr + std::hash::Hash + std::fmt::Display + std::fmt::Debug
{
}

/// Formats a duration in seconds the way the report prints it: always with a fractional part.
pub fn format_seconds(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}
