//! Builds the downloadable workbook for one customer.

use std::sync::Arc;

use tracing::info;

use backoffice_core::config::ExportConfig;
use backoffice_core::error::AppError;
use backoffice_core::result::AppResult;
use backoffice_core::types::CustomerId;
use backoffice_database::repositories::{AssignmentRepository, CustomerRepository};

use crate::context::RequestContext;

use super::layout::SheetLayout;
use super::render::render_workbook;

/// MIME type of the produced document.
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// A fully rendered workbook ready to be sent.
#[derive(Debug, Clone)]
pub struct ExportFile {
    /// Suggested download name.
    pub filename: String,
    /// MIME type.
    pub content_type: &'static str,
    /// Document bytes.
    pub bytes: Vec<u8>,
}

/// Spreadsheet export of a customer's assignments.
#[derive(Debug, Clone)]
pub struct ExportService {
    customer_repo: Arc<CustomerRepository>,
    assignment_repo: Arc<AssignmentRepository>,
    config: ExportConfig,
}

impl ExportService {
    /// Creates a new export service.
    pub fn new(
        customer_repo: Arc<CustomerRepository>,
        assignment_repo: Arc<AssignmentRepository>,
        config: ExportConfig,
    ) -> Self {
        Self {
            customer_repo,
            assignment_repo,
            config,
        }
    }

    /// Render every assignment of the customer, billed or not, grouped by
    /// category, into one worksheet.
    pub async fn export_customer(
        &self,
        ctx: &RequestContext,
        customer_id: CustomerId,
    ) -> AppResult<ExportFile> {
        let customer = self
            .customer_repo
            .find_by_id(customer_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Customer {customer_id} not found")))?;

        let views = self.assignment_repo.list_for_customer(customer_id).await?;
        let layout = SheetLayout::build(&customer, &views, &self.config.uncategorized_label);
        let bytes = render_workbook(&layout, &self.config.sheet_name)?;

        info!(
            user_id = %ctx.user_id,
            customer_id = %customer_id,
            lines = views.len(),
            total = %layout.grand_total,
            size = bytes.len(),
            "Customer workbook exported"
        );

        Ok(ExportFile {
            filename: format!("kunde_{customer_id}.xlsx"),
            content_type: XLSX_CONTENT_TYPE,
            bytes,
        })
    }
}
