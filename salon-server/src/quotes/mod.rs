//! 预算 (presupuesto) 导出
//!
//! - [`totals`]: 金额计算 (Decimal 运算，输出保留两位小数)
//! - [`document`]: 将预算渲染为分页 PDF

pub mod document;
pub mod totals;

pub use document::{QuotePayload, render_quote};
pub use totals::{QuoteTotals, compute_totals, line_subtotal};
