//! Error types for the instance loader. The search engine itself has no
//! recoverable errors (see `context::debug_assert` usages); everything that can
//! go wrong does so while parsing and validating the input matrix, so it all
//! lives here.

use std::num::ParseIntError;

/// Errors that can occur while reading and validating a matrix file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// There was an io related error while reading the instance file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// A count on the header line could not be parsed as an integer.
    #[error("malformed count: {0}")]
    ParseInt(#[from] ParseIntError),
    /// The file ended before all the declared items or options were read.
    #[error("unexpected end of file, expected {expected}")]
    UnexpectedEof { expected: &'static str },
    /// An option referenced a name that was not declared on the item line.
    #[error("unknown item name {name:?} in option {option}")]
    UnknownItem { name: String, option: usize },
    /// Two items were declared with the same name.
    #[error("duplicate item name {0:?}")]
    DuplicateItemName(String),
    /// An option contained the same item name twice (raised by the text parser,
    /// which still has the original names at hand).
    #[error("option {option} contains item {name:?} more than once")]
    DuplicateItemInOption { option: usize, name: String },
    /// An option contained the same item index twice (raised by the lower-level
    /// `Instance` constructor, which only ever sees resolved indices).
    #[error("option {option} references item {item} more than once")]
    DuplicateItemIndex { option: usize, item: usize },
    /// An option did not contain any primary item.
    #[error("option {0} has no primary item")]
    OptionWithoutPrimaryItem(usize),
    /// The `|` primary/secondary separator token appeared in an option line.
    #[error("option {0} may not contain the '|' separator")]
    SeparatorInOption(usize),
    /// An identifier was longer than the 64-byte limit.
    #[error("identifier {0:?} exceeds the 64-byte limit")]
    IdentifierTooLong(String),
    /// The header declared a number of options that did not match the number
    /// of option lines actually present in the file.
    #[error("header declared {declared} options but {actual} were read")]
    OptionCountMismatch { declared: usize, actual: usize },
    /// The header declared a number of items that did not match the number of
    /// names on the item line.
    #[error("header declared {declared} items but {actual} names were read")]
    ItemCountMismatch { declared: usize, actual: usize },
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################

#[cfg(test)]
mod test_error {
    use super::*;

    #[test]
    fn display_messages_are_human_readable() {
        let e = LoadError::OptionWithoutPrimaryItem(3);
        assert_eq!(e.to_string(), "option 3 has no primary item");

        let e = LoadError::DuplicateItemName("A".to_string());
        assert_eq!(e.to_string(), "duplicate item name \"A\"");
    }

    #[test]
    fn io_error_converts_via_from() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let e: LoadError = io.into();
        assert!(matches!(e, LoadError::Io(_)));
    }
}
