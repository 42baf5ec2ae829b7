//! The matrix file format reader (component H, the other half of the external
//! I/O boundary alongside `progress`). Turns a plain-text, whitespace-delimited
//! instance description into a validated `Instance`.

use std::io::BufRead;

use crate::error::LoadError;
use crate::instance::Instance;

const MAX_IDENTIFIER_LEN: usize = 64;

/// Parses an instance from any line-buffered reader in the matrix format:
///
/// ```text
/// <n_items> <n_options>
/// <item name> <item name> ... [ | <item name> ...]
/// <item name> <item name> ...   (one line per option)
/// ```
///
/// The `|` token on line 2, if present, separates primary items (before it)
/// from secondary items (after it); if absent, every item is primary.
pub fn parse<R: BufRead>(mut reader: R) -> Result<Instance, LoadError> {
    let header = read_nonblank_line(&mut reader, "header line")?;
    let mut header_fields = header.split_whitespace();
    let n_items: usize = header_fields
        .next()
        .ok_or(LoadError::UnexpectedEof { expected: "item count" })?
        .parse()?;
    let n_options: usize = header_fields
        .next()
        .ok_or(LoadError::UnexpectedEof { expected: "option count" })?
        .parse()?;

    let names_line = read_nonblank_line(&mut reader, "item name line")?;
    let (item_names, n_primary) = parse_item_names(&names_line)?;
    if item_names.len() != n_items {
        return Err(LoadError::ItemCountMismatch { declared: n_items, actual: item_names.len() });
    }

    let mut name_index = std::collections::HashMap::with_capacity(n_items);
    for (idx, name) in item_names.iter().enumerate() {
        if name_index.insert(name.clone(), idx).is_some() {
            return Err(LoadError::DuplicateItemName(name.clone()));
        }
    }

    let mut options = Vec::with_capacity(n_options);
    for opt_index in 0..n_options {
        let line = read_nonblank_line(&mut reader, "option line")?;
        if line.contains('|') {
            return Err(LoadError::SeparatorInOption(opt_index));
        }

        let mut opt_items = Vec::new();
        let mut seen_names = std::collections::HashSet::new();
        for token in line.split_whitespace() {
            if !seen_names.insert(token) {
                return Err(LoadError::DuplicateItemInOption { option: opt_index, name: token.to_string() });
            }
            let &idx = name_index
                .get(token)
                .ok_or_else(|| LoadError::UnknownItem { name: token.to_string(), option: opt_index })?;
            opt_items.push(idx);
        }
        options.push(opt_items);
    }

    if options.len() != n_options {
        return Err(LoadError::OptionCountMismatch { declared: n_options, actual: options.len() });
    }

    Instance::try_new(n_items, n_primary, item_names, options)
}

/// Splits the item-name line on an optional `|` separator, validating each
/// identifier's length and returning `(names, n_primary)`.
fn parse_item_names(line: &str) -> Result<(Vec<String>, usize), LoadError> {
    let (primary_part, secondary_part) = match line.split_once('|') {
        Some((a, b)) => (a, Some(b)),
        None => (line, None),
    };

    let mut names = Vec::new();
    for token in primary_part.split_whitespace() {
        check_identifier_len(token)?;
        names.push(token.to_string());
    }
    let n_primary = names.len();

    if let Some(rest) = secondary_part {
        for token in rest.split_whitespace() {
            check_identifier_len(token)?;
            names.push(token.to_string());
        }
    }

    Ok((names, n_primary))
}

fn check_identifier_len(token: &str) -> Result<(), LoadError> {
    if token.len() > MAX_IDENTIFIER_LEN {
        return Err(LoadError::IdentifierTooLong(token.to_string()));
    }
    Ok(())
}

/// Reads lines until it finds one with non-whitespace content, skipping
/// blank lines the way a hand-edited matrix file tends to accumulate.
fn read_nonblank_line<R: BufRead>(reader: &mut R, expected: &'static str) -> Result<String, LoadError> {
    let mut line = String::new();
    loop {
        line.clear();
        let bytes_read = reader.read_line(&mut line)?;
        if bytes_read == 0 {
            return Err(LoadError::UnexpectedEof { expected });
        }
        if !line.trim().is_empty() {
            return Ok(line);
        }
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################
