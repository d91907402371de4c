//! Table assembly: drops malformed records, orders rows and fixes the
//! column set for a layout.

use super::format::{DisplayRecord, FormatError};
use crate::shared::config::ColumnLayout;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Key,
    Summary,
    Type,
    Status,
    Link,
    Created,
    Updated,
}

impl Column {
    pub fn header(self) -> &'static str {
        match self {
            Self::Key => "Key",
            Self::Summary => "Summary",
            Self::Type => "Type",
            Self::Status => "Status",
            Self::Link => "Link",
            Self::Created => "Created",
            Self::Updated => "Updated",
        }
    }
}

/// Content of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellValue<'a> {
    Text(&'a str),
    /// Text rendered as a hyperlink to `url`.
    Link { text: &'a str, url: &'a str },
}

impl ColumnLayout {
    pub fn columns(self) -> &'static [Column] {
        match self {
            Self::Standard => &[
                Column::Key,
                Column::Summary,
                Column::Type,
                Column::Status,
                Column::Link,
                Column::Created,
                Column::Updated,
            ],
            Self::Linked => &[
                Column::Link,
                Column::Summary,
                Column::Type,
                Column::Status,
                Column::Created,
                Column::Updated,
            ],
        }
    }

    pub fn cell<'a>(self, column: Column, record: &'a DisplayRecord) -> CellValue<'a> {
        match column {
            Column::Key => CellValue::Text(&record.key),
            Column::Summary => CellValue::Text(&record.summary),
            Column::Type => CellValue::Text(&record.issue_type),
            Column::Status => CellValue::Text(&record.status),
            Column::Link => match self {
                Self::Standard => CellValue::Text(&record.link),
                Self::Linked => CellValue::Link {
                    text: &record.key,
                    url: &record.link,
                },
            },
            Column::Created => CellValue::Text(&record.created_local),
            Column::Updated => CellValue::Text(&record.updated_local),
        }
    }
}

/// Sorted, non-empty set of rows with a fixed column layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultTable {
    layout: ColumnLayout,
    records: Vec<DisplayRecord>,
}

impl ResultTable {
    pub fn headers(&self) -> Vec<&'static str> {
        self.layout.columns().iter().map(|c| c.header()).collect()
    }

    pub fn records(&self) -> &[DisplayRecord] {
        &self.records
    }

    /// Cells of every row, in column order.
    pub fn rows(&self) -> impl Iterator<Item = Vec<CellValue<'_>>> + '_ {
        self.records.iter().map(|record| {
            self.layout
                .columns()
                .iter()
                .map(|&column| self.layout.cell(column, record))
                .collect()
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableView {
    /// Nothing left to show; render "No issues found." instead of a grid.
    NoIssues,
    Table(ResultTable),
}

/// Builds the table from formatter outputs.
///
/// Malformed entries are dropped. Rows are ordered by status, then by the
/// created timestamp value; the sort is stable so ties keep fetch order.
pub fn assemble(
    outputs: impl IntoIterator<Item = Result<DisplayRecord, FormatError>>,
    layout: ColumnLayout,
) -> TableView {
    let mut records: Vec<DisplayRecord> = outputs.into_iter().filter_map(Result::ok).collect();

    if records.is_empty() {
        return TableView::NoIssues;
    }

    records.sort_by(|a, b| {
        a.status
            .cmp(&b.status)
            .then_with(|| a.created_at.cmp(&b.created_at))
    });

    TableView::Table(ResultTable { layout, records })
}
