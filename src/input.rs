//! Parsing helpers shared by the day modules.

use std::fmt::Display;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("missing {delim:?} in {text:?}")]
    MissingDelimiter {delim: &'static str, text: String},
    #[error("cannot parse {text:?}: {reason}")]
    BadValue {text: String, reason: String},
    #[error("unexpected {found:?} at row {row}, column {col}")]
    BadCell {found: char, row: usize, col: usize},
    #[error("row {row} is {found} cells wide, expected {expected}")]
    RaggedGrid {row: usize, expected: usize, found: usize},
    #[error("input is empty")]
    Empty,
}

pub fn split_pair<'a>(text: &'a str, delim: &'static str) -> Result<(&'a str, &'a str), InputError> {
    text.split_once(delim).ok_or_else(|| InputError::MissingDelimiter {delim, text: text.to_owned()})
}

pub fn parse<T>(text: &str) -> Result<T, InputError>
where
    T: FromStr,
    T::Err: Display,
{
    text.trim().parse().map_err(|err: T::Err| InputError::BadValue {text: text.to_owned(), reason: err.to_string()})
}

/// One value per non-blank line.
pub fn numbers<T>(input: &str) -> Result<Vec<T>, InputError>
where
    T: FromStr,
    T::Err: Display,
{
    let values = input.lines().filter(|line| !line.trim().is_empty()).map(parse::<T>).collect::<Result<Vec<T>, _>>()?;
    if values.is_empty() {return Err(InputError::Empty)};
    Ok(values)
}

pub fn comma_separated<T>(text: &str) -> Result<Vec<T>, InputError>
where
    T: FromStr,
    T::Err: Display,
{
    text.trim().split(',').map(parse::<T>).collect()
}

/// Groups of lines separated by blank lines. Empty groups are skipped.
pub fn blocks(input: &str) -> Vec<Vec<&str>> {
    let mut blocks = vec![];
    let mut current = vec![];
    for line in input.lines().map(str::trim_end) {
        if line.is_empty() {
            if !current.is_empty() {blocks.push(std::mem::take(&mut current))};
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {blocks.push(current)};
    blocks
}

/// A rectangular block of ASCII cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<u8>,
}

impl Grid {
    /// Reads non-blank lines as rows, accepting only the bytes in `allowed`.
    pub fn parse<'a>(lines: impl IntoIterator<Item = &'a str>, allowed: &[u8]) -> Result<Grid, InputError> {
        let mut width = None;
        let mut cells = vec![];
        let mut height = 0;
        for line in lines.into_iter().map(str::trim).filter(|line| !line.is_empty()) {
            let expected = *width.get_or_insert(line.len());
            if line.len() != expected {
                return Err(InputError::RaggedGrid {row: height, expected, found: line.len()});
            }
            if let Some((col, found)) = line.char_indices().find(|&(_, c)| !c.is_ascii() || !allowed.contains(&(c as u8))) {
                return Err(InputError::BadCell {found, row: height, col});
            }
            cells.extend_from_slice(line.as_bytes());
            height += 1;
        }
        let Some(width) = width else {return Err(InputError::Empty)};
        Ok(Grid {width, height, cells})
    }

    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        (row < self.height && col < self.width).then(|| self.cells[row * self.width + col])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.cells.chunks(self.width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks_split_on_blank_lines() {
        let text = "a\nb\n\n\nc\r\n\r\nd\n";
        assert_eq!(blocks(text), vec![vec!["a", "b"], vec!["c"], vec!["d"]]);
    }

    #[test]
    fn numbers_report_the_bad_line() {
        assert_eq!(numbers::<u32>("1\n2\n\n3\n").unwrap(), vec![1, 2, 3]);
        let err = numbers::<u32>("1\nx2\n").unwrap_err();
        assert!(err.to_string().contains("\"x2\""), "{}", err);
        assert!(matches!(numbers::<u32>("\n"), Err(InputError::Empty)));
    }

    #[test]
    fn grid_checks_shape_and_cells() {
        let grid = Grid::parse("#.\n.#\n".lines(), b".#").unwrap();
        assert_eq!((grid.width, grid.height), (2, 2));
        assert_eq!(grid.get(1, 1), Some(b'#'));
        assert_eq!(grid.get(2, 0), None);
        assert_eq!(grid.rows().count(), 2);
        assert!(matches!(Grid::parse("#.\n.\n".lines(), b".#"), Err(InputError::RaggedGrid {row: 1, ..})));
        assert!(matches!(Grid::parse("#x\n".lines(), b".#"), Err(InputError::BadCell {found: 'x', row: 0, col: 1})));
    }

    #[test]
    fn split_pair_names_the_delimiter() {
        assert_eq!(split_pair("a: b", ": ").unwrap(), ("a", "b"));
        let err = split_pair("ab", ": ").unwrap_err();
        assert_eq!(err.to_string(), "missing \": \" in \"ab\"");
    }
}
