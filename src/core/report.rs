//! Renders feed items into the headline table.

use super::document::{
    CellRef, DocumentError, ParagraphSpacing, TableId, TabularDocument, TextStyle,
};
use super::feed::types::FeedItem;

pub const REPORT_HEADING: &str = "YLE News Headlines";
pub const HEADER_LABELS: [&str; 3] = ["Title", "Link", "Description"];

const HEADER_COLOR: &str = "800000";
const LINK_COLOR: &str = "0000FF";
const CELL_SPACING: ParagraphSpacing = ParagraphSpacing {
    before_pt: 6,
    after_pt: 12,
};

const TITLE_COLUMN: usize = 0;
const LINK_COLUMN: usize = 1;
const DESCRIPTION_COLUMN: usize = 2;

/// Adds the report heading and table to `doc`: a header row, then for every
/// item a content row followed by an empty spacer row.
pub fn build_document<D: TabularDocument>(
    mut doc: D,
    items: &[FeedItem],
) -> Result<D, DocumentError> {
    doc.add_heading(REPORT_HEADING, 0);
    let table = doc.add_table(HEADER_LABELS.len());
    style_header(&mut doc, table)?;

    for item in items {
        let row = doc.add_row(table)?;
        doc.set_cell_text(
            CellRef::new(table, row, TITLE_COLUMN),
            &item.title,
            TextStyle::plain(),
        )?;
        render_hyperlink(
            &mut doc,
            CellRef::new(table, row, LINK_COLUMN),
            &item.link,
            &item.link,
        )?;
        doc.set_cell_text(
            CellRef::new(table, row, DESCRIPTION_COLUMN),
            &item.description,
            TextStyle::plain(),
        )?;
        doc.add_row(table)?;
    }

    tracing::debug!(items = items.len(), "report document built");
    Ok(doc)
}

/// Labels the header row in bold maroon and spaces out every cell of the table.
pub fn style_header<D: TabularDocument>(doc: &mut D, table: TableId) -> Result<(), DocumentError> {
    let header_style = TextStyle {
        bold: true,
        underline: false,
        color: Some(HEADER_COLOR.to_string()),
    };
    for (column, label) in HEADER_LABELS.iter().enumerate() {
        doc.set_cell_text(CellRef::new(table, 0, column), label, header_style.clone())?;
    }
    doc.set_table_spacing(table, CELL_SPACING)
}

pub fn render_hyperlink<D: TabularDocument>(
    doc: &mut D,
    cell: CellRef,
    url: &str,
    display_text: &str,
) -> Result<(), DocumentError> {
    let link_style = TextStyle {
        bold: false,
        underline: true,
        color: Some(LINK_COLOR.to_string()),
    };
    doc.set_cell_hyperlink(cell, url, display_text, link_style)
}
