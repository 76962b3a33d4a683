// Element Tests
// Tests for shelf contents and element conversion

use shelfstore::shelf::{Shelf, ShelfElement, ShelfError};

/// Element whose markup is a list of book titles
#[derive(Debug, PartialEq)]
struct TitleList(Vec<String>);

impl ShelfElement for TitleList {
    fn to_markup(&self) -> String {
        let items: String = self.0.iter().map(|t| format!("<li>{}</li>", t)).collect();
        format!("<ul>{}</ul>", items)
    }

    fn from_markup(markup: &str) -> Result<Self, ShelfError> {
        if markup.is_empty() {
            return Err(ShelfError::EmptyMarkup);
        }
        let inner = markup
            .strip_prefix("<ul>")
            .and_then(|m| m.strip_suffix("</ul>"))
            .ok_or_else(|| ShelfError::InvalidMarkup("expected <ul> root".to_string()))?;
        Ok(TitleList(
            inner
                .split("</li>")
                .filter_map(|item| item.strip_prefix("<li>"))
                .map(str::to_string)
                .collect(),
        ))
    }
}

// ============================================================================
// SHELF CONTENTS
// ============================================================================

#[test]
fn test_capture_and_restore_element() {
    let list = TitleList(vec!["Dune".to_string(), "Emma".to_string()]);

    let shelf = Shelf::capture(&list);

    assert_eq!(shelf.markup(), "<ul><li>Dune</li><li>Emma</li></ul>");
    assert_eq!(shelf.restore::<TitleList>().unwrap(), list);
}

#[test]
fn test_restore_empty_markup() {
    let shelf = Shelf::default();

    assert!(shelf.is_empty());
    assert_eq!(shelf.restore::<TitleList>(), Err(ShelfError::EmptyMarkup));
}

#[test]
fn test_shelf_display_is_markup() {
    let shelf = Shelf::from("<div>x</div>");
    assert_eq!(shelf.to_string(), "<div>x</div>");
}
