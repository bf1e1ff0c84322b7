use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fs::File;
use std::path::Path;

use docx_rs::{
    Docx, Hyperlink, HyperlinkType, LineSpacing, Paragraph, Run, Style, StyleType, TableCell,
    TableRow,
};

use super::{
    Block, CellContent, CellRef, DocumentError, ParagraphSpacing, Table, TableId, TabularDocument,
    TextStyle,
};

/// Twentieths of a point, the unit of WordprocessingML spacing.
const TWIPS_PER_POINT: u32 = 20;
/// Usable width of an A4 page with default margins, in twips.
const CONTENT_WIDTH_TWIPS: usize = 9_000;
const MAX_HEADING_LEVEL: u8 = 9;

/// `TabularDocument` backend producing Office Open XML (`.docx`) files.
#[derive(Debug, Clone, Default)]
pub struct DocxDocument {
    blocks: Vec<Block>,
}

impl DocxDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    fn table_mut(&mut self, table: TableId) -> Result<&mut Table, DocumentError> {
        match self.blocks.get_mut(table.0) {
            Some(Block::Table(found)) => Ok(found),
            _ => Err(DocumentError::UnknownTable(table.0)),
        }
    }

    fn render(&self) -> Docx {
        let mut docx = Docx::new();
        let heading_levels: BTreeSet<u8> = self
            .blocks
            .iter()
            .filter_map(|block| match block {
                Block::Heading { level, .. } => Some(*level),
                Block::Table(_) => None,
            })
            .collect();
        for level in heading_levels {
            docx = docx.add_style(heading_style(level));
        }

        for block in &self.blocks {
            docx = match block {
                Block::Heading { text, level } => docx.add_paragraph(
                    Paragraph::new()
                        .style(&heading_style_id(*level))
                        .add_run(Run::new().add_text(xml_safe(text))),
                ),
                Block::Table(table) => docx.add_table(render_table(table)),
            };
        }
        docx
    }
}

impl TabularDocument for DocxDocument {
    fn add_heading(&mut self, text: &str, level: u8) {
        self.blocks.push(Block::Heading {
            text: text.to_string(),
            level: level.min(MAX_HEADING_LEVEL),
        });
    }

    fn add_table(&mut self, columns: usize) -> TableId {
        self.blocks.push(Block::Table(Table::new(columns)));
        TableId(self.blocks.len() - 1)
    }

    fn add_row(&mut self, table: TableId) -> Result<usize, DocumentError> {
        Ok(self.table_mut(table)?.push_row())
    }

    fn set_table_spacing(
        &mut self,
        table: TableId,
        spacing: ParagraphSpacing,
    ) -> Result<(), DocumentError> {
        self.table_mut(table)?.set_spacing(spacing);
        Ok(())
    }

    fn set_cell_text(
        &mut self,
        cell: CellRef,
        text: &str,
        style: TextStyle,
    ) -> Result<(), DocumentError> {
        *self.table_mut(cell.table)?.cell_mut(cell)? = CellContent::Text {
            text: text.to_string(),
            style,
        };
        Ok(())
    }

    fn set_cell_hyperlink(
        &mut self,
        cell: CellRef,
        url: &str,
        text: &str,
        style: TextStyle,
    ) -> Result<(), DocumentError> {
        *self.table_mut(cell.table)?.cell_mut(cell)? = CellContent::Hyperlink {
            url: url.to_string(),
            text: text.to_string(),
            style,
        };
        Ok(())
    }

    fn table(&self, table: TableId) -> Option<&Table> {
        match self.blocks.get(table.0) {
            Some(Block::Table(found)) => Some(found),
            _ => None,
        }
    }

    fn save(&self, path: &Path) -> Result<(), DocumentError> {
        let file = File::create(path)?;
        self.render()
            .build()
            .pack(file)
            .map_err(|error| DocumentError::Render(error.to_string()))
    }
}

fn heading_style_id(level: u8) -> String {
    if level == 0 {
        "Title".to_string()
    } else {
        format!("Heading{level}")
    }
}

fn heading_style(level: u8) -> Style {
    let (name, half_points) = match level {
        0 => ("Title".to_string(), 56),
        1 => ("Heading 1".to_string(), 32),
        2 => ("Heading 2".to_string(), 28),
        other => (format!("Heading {other}"), 24),
    };
    Style::new(heading_style_id(level), StyleType::Paragraph)
        .name(name)
        .size(half_points)
        .bold()
}

fn render_table(table: &Table) -> docx_rs::Table {
    let column_width = CONTENT_WIDTH_TWIPS / table.columns().max(1);
    let rows = table
        .rows()
        .iter()
        .map(|cells| {
            TableRow::new(
                cells
                    .iter()
                    .map(|content| {
                        TableCell::new().add_paragraph(render_cell(content, table.spacing()))
                    })
                    .collect(),
            )
        })
        .collect();
    docx_rs::Table::new(rows).set_grid(vec![column_width; table.columns()])
}

// Every cell gets a paragraph, empty ones included; Word rejects a bare `w:tc`.
fn render_cell(content: &CellContent, spacing: Option<ParagraphSpacing>) -> Paragraph {
    let mut paragraph = Paragraph::new();
    if let Some(spacing) = spacing {
        paragraph = paragraph.line_spacing(
            LineSpacing::new()
                .before(spacing.before_pt * TWIPS_PER_POINT)
                .after(spacing.after_pt * TWIPS_PER_POINT),
        );
    }
    match content {
        CellContent::Empty => paragraph,
        CellContent::Text { text, style } => paragraph.add_run(styled_run(text, style)),
        CellContent::Hyperlink { url, text, style } => paragraph.add_hyperlink(
            Hyperlink::new(xml_safe(url), HyperlinkType::External)
                .add_run(styled_run(text, style)),
        ),
    }
}

fn styled_run(text: &str, style: &TextStyle) -> Run {
    let mut run = Run::new().add_text(xml_safe(text));
    if style.bold {
        run = run.bold();
    }
    if style.underline {
        run = run.underline("single");
    }
    if let Some(color) = &style.color {
        run = run.color(color);
    }
    run
}

/// Drops characters outside the XML 1.0 `Char` production. Feed text may
/// carry control characters that would make `document.xml` unreadable.
fn xml_safe(text: &str) -> Cow<'_, str> {
    if text.chars().all(is_xml_char) {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(text.chars().filter(|c| is_xml_char(*c)).collect())
    }
}

fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\r'
            | '\u{20}'..='\u{D7FF}'
            | '\u{E000}'..='\u{FFFD}'
            | '\u{10000}'..='\u{10FFFF}'
    )
}
