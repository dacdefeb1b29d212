use crate::app_settings::ParserSettings;
use crate::errors::{Result, ScheduleError};
use crate::types::RE_GROUP_NAME;
use crate::workbook::Worksheet;

/// A group name from the header row and the column holding its schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupColumn {
    pub name: String,
    pub column: usize,
}

fn without_spaces(value: &str) -> String {
    value.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Row index of the header with the group names. Only the top-left
/// `header_scan_rows` x `header_scan_columns` cells are searched, and a
/// cell must start with a group name.
pub fn find_group_row(worksheet: &Worksheet, settings: &ParserSettings) -> Result<usize> {
    for (row_idx, row) in worksheet.rows.iter().take(settings.header_scan_rows).enumerate() {
        let found = row
            .iter()
            .take(settings.header_scan_columns)
            .flatten()
            .any(|value| RE_GROUP_NAME.find(&without_spaces(value)).is_some_and(|m| m.start() == 0));
        if found {
            return Ok(row_idx);
        }
    }

    Err(ScheduleError::GroupRowNotFound {
        worksheet: worksheet.title.clone(),
    })
}

/// Every group named in the header row, left to right.
pub fn get_group_columns(worksheet: &Worksheet, group_row: usize) -> Vec<GroupColumn> {
    worksheet
        .row(group_row)
        .iter()
        .enumerate()
        .filter_map(|(column, value)| {
            let value = without_spaces(value.as_deref()?);
            let caps = RE_GROUP_NAME.captures(&value)?;
            Some(GroupColumn {
                name: caps[1].to_string(),
                column,
            })
        })
        .collect()
}

/// Column at a signed offset from `column`, if it exists.
pub fn offset_column(column: usize, offset: isize) -> Option<usize> {
    column.checked_add_signed(offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_sheet() -> Worksheet {
        Worksheet::from_rows(
            "Лист1",
            vec![
                vec!["Расписание занятий", "", "", ""],
                vec!["", "", "", ""],
                vec!["", "ИКБО-01-20", "", "ИКБО - 02 - 20 (1 подгр.)"],
            ],
        )
    }

    #[test]
    fn test_find_group_row() {
        let settings = ParserSettings::default();
        assert_eq!(find_group_row(&header_sheet(), &settings).unwrap(), 2);
    }

    #[test]
    fn test_group_row_outside_scan_area() {
        let settings = ParserSettings {
            header_scan_rows: 2,
            ..ParserSettings::default()
        };
        assert!(matches!(
            find_group_row(&header_sheet(), &settings),
            Err(ScheduleError::GroupRowNotFound { .. })
        ));
    }

    #[test]
    fn test_get_group_columns() {
        let columns = get_group_columns(&header_sheet(), 2);
        assert_eq!(
            columns,
            vec![
                GroupColumn { name: "ИКБО-01-20".to_string(), column: 1 },
                GroupColumn { name: "ИКБО-02-20".to_string(), column: 3 },
            ]
        );
    }

    #[test]
    fn test_offset_column() {
        assert_eq!(offset_column(5, -5), Some(0));
        assert_eq!(offset_column(4, -5), None);
        assert_eq!(offset_column(4, 3), Some(7));
    }
}
