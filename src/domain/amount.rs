use std::fmt;

/// Parse an operator-supplied amount string into a whole number of silver.
/// Embedded spaces are tolerated as thousands separators: "10 000" -> 10000.
/// Sign survives parsing; positivity is the service's rule, not the parser's.
pub fn parse_amount(input: &str) -> Result<i64, ParseAmountError> {
    let compact: String = input.chars().filter(|c| *c != ' ').collect();
    if compact.is_empty() {
        return Err(ParseAmountError::Empty);
    }
    compact
        .parse()
        .map_err(|_| ParseAmountError::InvalidFormat)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseAmountError {
    Empty,
    InvalidFormat,
}

impl fmt::Display for ParseAmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseAmountError::Empty => write!(f, "empty amount"),
            ParseAmountError::InvalidFormat => write!(f, "invalid amount format"),
        }
    }
}

impl std::error::Error for ParseAmountError {}
