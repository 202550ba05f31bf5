//! Text format for `parseCustomCardList`/`loadLocalCustomCardList`.
//!
//! Either a flat cube (one `<count> <cardId>` pair per line) or a set of
//! named sheets, each introduced by a `[SheetName] count=N` header:
//!
//! ```text
//! [Common] count=10
//! 4 101
//! 6 102
//!
//! [Rare] count=1
//! 1 201
//! ```
//!
//! Lines are blank-or-`#`-comment tolerant. A file with no `[...]`
//! headers at all is parsed as a single cube.
use draft_booster::{CustomCardList, Sheet};
use draft_cards::CardId;
use draft_core::DraftError;
use std::collections::HashMap;

pub fn parse(text: &str) -> Result<CustomCardList, DraftError> {
    let mut sheets: HashMap<String, Sheet> = HashMap::new();
    let mut cube: Vec<(CardId, u32)> = Vec::new();
    let mut current: Option<String> = None;

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(rest) = line.strip_prefix('[') {
            let (name, count) = parse_header(rest)?;
            sheets.insert(name.clone(), Sheet { count, cards: Vec::new() });
            current = Some(name);
            continue;
        }
        let (count, id) = parse_entry(line)?;
        match &current {
            Some(name) => sheets.get_mut(name).expect("header always inserts before use").cards.push((id, count)),
            None => cube.push((id, count)),
        }
    }

    if sheets.is_empty() {
        if cube.is_empty() {
            return Err(DraftError::bad_input("custom card list is empty"));
        }
        Ok(CustomCardList::Cube { cards: cube })
    } else {
        Ok(CustomCardList::Sheets { sheets })
    }
}

fn parse_header(rest: &str) -> Result<(String, u32), DraftError> {
    let end = rest.find(']').ok_or_else(|| DraftError::bad_input("sheet header missing ']'"))?;
    let name = rest[..end].trim().to_string();
    if name.is_empty() {
        return Err(DraftError::bad_input("sheet header has an empty name"));
    }
    let tail = rest[end + 1..].trim();
    let count = match tail.strip_prefix("count=") {
        Some(v) => v.trim().parse().map_err(|_| DraftError::bad_input("invalid sheet count"))?,
        None => 1,
    };
    Ok((name, count))
}

fn parse_entry(line: &str) -> Result<(u32, CardId), DraftError> {
    let mut parts = line.split_whitespace();
    let count = parts
        .next()
        .ok_or_else(|| DraftError::bad_input("custom card list line missing a count"))?
        .parse::<u32>()
        .map_err(|_| DraftError::bad_input("custom card list count is not a number"))?;
    let id = parts
        .next()
        .ok_or_else(|| DraftError::bad_input("custom card list line missing a card id"))?
        .parse::<u32>()
        .map_err(|_| DraftError::bad_input("custom card list card id is not a number"))?;
    Ok((count, CardId(id)))
}

/// Resolves `name` against a fixed local directory. Rejects anything
/// that looks like a path escape — this reads operator-provided fixture
/// lists, not arbitrary client-supplied file paths.
pub fn load_local(name: &str) -> Result<CustomCardList, DraftError> {
    if name.contains('/') || name.contains('\\') || name.contains("..") {
        return Err(DraftError::bad_input("custom card list name must be a bare file name"));
    }
    let path = std::path::Path::new("custom_lists").join(name);
    let text = std::fs::read_to_string(&path).map_err(|e| DraftError::bad_input(format!("could not read {}: {e}", path.display())))?;
    parse(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_lines_with_no_header_become_a_cube() {
        let list = parse("4 101\n2 102\n").unwrap();
        assert!(matches!(list, CustomCardList::Cube { cards } if cards.len() == 2));
    }

    #[test]
    fn headers_group_entries_into_named_sheets() {
        let list = parse("[Common] count=10\n4 101\n\n[Rare] count=1\n1 201\n").unwrap();
        match list {
            CustomCardList::Sheets { sheets } => {
                assert_eq!(sheets["Common"].count, 10);
                assert_eq!(sheets["Rare"].cards, vec![(CardId(201), 1)]);
            }
            _ => panic!("expected sheets"),
        }
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let list = parse("# a cube\n\n4 101\n").unwrap();
        assert!(matches!(list, CustomCardList::Cube { .. }));
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(parse("# only a comment\n").is_err());
    }

    #[test]
    fn local_list_names_cannot_escape_the_fixture_directory() {
        assert!(load_local("../secrets.txt").is_err());
    }
}
