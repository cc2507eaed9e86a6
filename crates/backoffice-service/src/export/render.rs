//! Renders a [`SheetLayout`] into an in-memory `.xlsx` document.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Color, Format, Workbook, Worksheet, XlsxError};

use backoffice_core::error::{AppError, ErrorKind};
use backoffice_core::result::AppResult;

use super::layout::{ITEM_HEADERS, SheetLayout, SheetRow, TOTAL_LABEL};

/// Column widths for name, quantity and price.
const COLUMN_WIDTHS: [f64; 3] = [40.0, 12.0, 14.0];

/// Fill color of lines without a usable price.
const MISSING_PRICE_FILL: u32 = 0xFFE699;

const PRICE_FORMAT: &str = "#,##0.00";

struct Styles {
    plain: Format,
    bold: Format,
    italic: Format,
    price: Format,
    flagged: Format,
    flagged_price: Format,
    total: Format,
}

impl Styles {
    fn new() -> Self {
        let fill = Color::RGB(MISSING_PRICE_FILL);
        Self {
            plain: Format::new(),
            bold: Format::new().set_bold(),
            italic: Format::new().set_italic(),
            price: Format::new().set_num_format(PRICE_FORMAT),
            flagged: Format::new().set_background_color(fill),
            flagged_price: Format::new()
                .set_background_color(fill)
                .set_num_format(PRICE_FORMAT),
            total: Format::new().set_bold().set_num_format(PRICE_FORMAT),
        }
    }
}

/// Render the whole workbook into a byte buffer.
///
/// Nothing is returned until the document is complete, so a failure never
/// yields a partial file.
pub fn render_workbook(layout: &SheetLayout, sheet_name: &str) -> AppResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    write_sheet(worksheet, layout, sheet_name).map_err(export_error)?;

    workbook.save_to_buffer().map_err(export_error)
}

fn write_sheet(
    worksheet: &mut Worksheet,
    layout: &SheetLayout,
    sheet_name: &str,
) -> Result<(), XlsxError> {
    let styles = Styles::new();

    worksheet.set_name(sheet_name)?;
    for (col, width) in COLUMN_WIDTHS.iter().enumerate() {
        worksheet.set_column_width(col as u16, *width)?;
    }

    for (idx, row) in layout.rows.iter().enumerate() {
        let r = idx as u32;
        match row {
            SheetRow::Field { label, value } => {
                worksheet.write_string_with_format(r, 0, *label, &styles.bold)?;
                worksheet.write_string(r, 1, value)?;
            }
            SheetRow::Blank => {}
            SheetRow::CategoryTitle(name) => {
                worksheet.write_string_with_format(r, 0, name, &styles.bold)?;
            }
            SheetRow::ItemHeader => {
                let [name, quantity, price] = ITEM_HEADERS;
                worksheet.write_string(r, 0, name)?;
                worksheet.write_string_with_format(r, 1, quantity, &styles.italic)?;
                worksheet.write_string(r, 2, price)?;
            }
            SheetRow::Item {
                name,
                quantity,
                price,
                highlight,
            } => {
                let (text_format, price_format) = if *highlight {
                    (&styles.flagged, &styles.flagged_price)
                } else {
                    (&styles.plain, &styles.price)
                };
                worksheet.write_string_with_format(r, 0, name, text_format)?;
                worksheet.write_number_with_format(r, 1, f64::from(*quantity), text_format)?;
                match price {
                    Some(p) => {
                        worksheet.write_number_with_format(r, 2, to_f64(*p), price_format)?;
                    }
                    None => {
                        worksheet.write_blank(r, 2, price_format)?;
                    }
                }
            }
            SheetRow::GrandTotal(total) => {
                worksheet.write_string_with_format(r, 0, TOTAL_LABEL, &styles.bold)?;
                worksheet.write_number_with_format(r, 2, to_f64(*total), &styles.total)?;
            }
        }
    }
    Ok(())
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

fn export_error(e: XlsxError) -> AppError {
    AppError::with_source(
        ErrorKind::Export,
        format!("Failed to render spreadsheet: {e}"),
        e,
    )
}
