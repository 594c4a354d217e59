//! # Spreadsheet Rendering
//!
//! Encodes an [`ExportSheet`] as an `.xlsx` workbook: a bold header row
//! followed by one row per exported record.

use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use inventory_core::export::{CellValue, ExportSheet};
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use tracing::{debug, error};

use crate::error::{ApiError, ApiResult};

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Writes `sheet` into an in-memory workbook.
pub fn render_xlsx(sheet: &ExportSheet) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(&sheet.sheet_name)?;

    for (col, title) in sheet.headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *title, &header)?;
    }

    for (idx, row) in sheet.rows.iter().enumerate() {
        let row_num = idx as u32 + 1;
        for (col, cell) in row.iter().enumerate() {
            match cell {
                CellValue::Text(text) => worksheet.write_string(row_num, col as u16, text)?,
                CellValue::Number(value) => worksheet.write_number(row_num, col as u16, *value)?,
            };
        }
    }

    workbook.save_to_buffer()
}

/// Renders `sheet` as a download response.
pub fn xlsx_response(sheet: &ExportSheet) -> ApiResult<Response> {
    let bytes = render_xlsx(sheet).map_err(|e| {
        error!(error = %e, sheet = %sheet.sheet_name, "Workbook rendering failed");
        ApiError::internal(format!("Failed to build spreadsheet: {}", e))
    })?;

    debug!(
        file = %sheet.file_name,
        rows = sheet.rows.len(),
        bytes = bytes.len(),
        "Spreadsheet rendered"
    );

    let disposition = format!("attachment; filename=\"{}\"", sheet.file_name);
    Ok((
        [
            (CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}
