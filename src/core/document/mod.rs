//! Minimal tabular document model.
//!
//! The report only needs a heading and one table, so the interface stops
//! there. Backends keep the model and render it on `save`.

pub mod docx;

use std::path::Path;

pub use docx::DocxDocument;

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("table {0} does not exist")]
    UnknownTable(usize),
    #[error("cell ({row}, {column}) is outside table {table} ({rows} rows x {columns} columns)")]
    CellOutOfRange {
        table: usize,
        row: usize,
        column: usize,
        rows: usize,
        columns: usize,
    },
    #[error("document io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("document render error: {0}")]
    Render(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRef {
    pub table: TableId,
    pub row: usize,
    pub column: usize,
}

impl CellRef {
    pub fn new(table: TableId, row: usize, column: usize) -> Self {
        Self { table, row, column }
    }
}

/// Character formatting for a run of text. Colors are `RRGGBB` hex.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextStyle {
    pub bold: bool,
    pub underline: bool,
    pub color: Option<String>,
}

impl TextStyle {
    pub fn plain() -> Self {
        Self::default()
    }
}

/// Paragraph spacing in points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParagraphSpacing {
    pub before_pt: u32,
    pub after_pt: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CellContent {
    #[default]
    Empty,
    Text {
        text: String,
        style: TextStyle,
    },
    Hyperlink {
        url: String,
        text: String,
        style: TextStyle,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    columns: usize,
    rows: Vec<Vec<CellContent>>,
    spacing: Option<ParagraphSpacing>,
}

impl Table {
    /// New table holding one empty row, the header.
    pub fn new(columns: usize) -> Self {
        Self {
            columns,
            rows: vec![vec![CellContent::Empty; columns]],
            spacing: None,
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> &[Vec<CellContent>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn spacing(&self) -> Option<ParagraphSpacing> {
        self.spacing
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&CellContent> {
        self.rows.get(row).and_then(|cells| cells.get(column))
    }

    pub(crate) fn push_row(&mut self) -> usize {
        self.rows.push(vec![CellContent::Empty; self.columns]);
        self.rows.len() - 1
    }

    pub(crate) fn set_spacing(&mut self, spacing: ParagraphSpacing) {
        self.spacing = Some(spacing);
    }

    pub(crate) fn cell_mut(
        &mut self,
        cell: CellRef,
    ) -> Result<&mut CellContent, DocumentError> {
        let rows = self.rows.len();
        let columns = self.columns;
        self.rows
            .get_mut(cell.row)
            .and_then(|cells| cells.get_mut(cell.column))
            .ok_or(DocumentError::CellOutOfRange {
                table: cell.table.0,
                row: cell.row,
                column: cell.column,
                rows,
                columns,
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { text: String, level: u8 },
    Table(Table),
}

/// A document made of headings and grids of text / hyperlink cells.
pub trait TabularDocument {
    /// Level 0 is the document title; 1..=9 are section headings.
    fn add_heading(&mut self, text: &str, level: u8);

    fn add_table(&mut self, columns: usize) -> TableId;

    fn add_row(&mut self, table: TableId) -> Result<usize, DocumentError>;

    /// Spacing applied to every cell paragraph of the table, rows added later included.
    fn set_table_spacing(
        &mut self,
        table: TableId,
        spacing: ParagraphSpacing,
    ) -> Result<(), DocumentError>;

    fn set_cell_text(
        &mut self,
        cell: CellRef,
        text: &str,
        style: TextStyle,
    ) -> Result<(), DocumentError>;

    /// Replaces the cell content with a clickable link to `url` showing `text`.
    fn set_cell_hyperlink(
        &mut self,
        cell: CellRef,
        url: &str,
        text: &str,
        style: TextStyle,
    ) -> Result<(), DocumentError>;

    fn table(&self, table: TableId) -> Option<&Table>;

    fn save(&self, path: &Path) -> Result<(), DocumentError>;
}
