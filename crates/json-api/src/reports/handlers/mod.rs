//! Report Handlers

pub(crate) mod order_count;
pub(crate) mod sales_csv;
pub(crate) mod total_sales;
