//! Promotion evaluation
//!
//! Runs the rule registry once per cart line and rewrites that line's
//! promotional view.
//!
//! Per line:
//! 1. Facts are `{voucherCode, size, quantity}` with the base quantity, so
//!    evaluating twice gives the same answer.
//! 2. Promotional fields reset to the base fields.
//! 3. Matched events for the line's size apply in registry order; a later
//!    event overwrites an earlier one field by field.
//!
//! A line whose rules cannot be evaluated keeps its previous promotional
//! fields and the failure is logged; the other lines are unaffected.

use crate::line::CartLine;
use pizzeria_rules::{EvaluationError, Facts, PromotionEvent, RuleRegistry};

/// Outcome counts of one evaluation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvaluationReport {
    /// Lines evaluated
    pub lines: usize,
    /// Lines whose promotional view differs from the base view
    pub promoted: usize,
    /// Lines left untouched because matching failed
    pub failed: usize,
}

/// Applies registry promotions to cart lines
#[derive(Debug, Clone, Copy)]
pub struct PromotionEvaluator<'a> {
    registry: &'a RuleRegistry,
}

impl<'a> PromotionEvaluator<'a> {
    /// Create evaluator over `registry`
    #[inline]
    #[must_use]
    pub fn new(registry: &'a RuleRegistry) -> Self {
        Self { registry }
    }

    /// Re-evaluate every line under `voucher_code`
    pub fn evaluate(&self, voucher_code: &str, lines: &mut [CartLine]) -> EvaluationReport {
        let mut report = EvaluationReport {
            lines: lines.len(),
            ..EvaluationReport::default()
        };

        for line in lines.iter_mut() {
            match self.evaluate_line(voucher_code, line) {
                Ok(()) => {
                    if line.has_promotion() {
                        report.promoted += 1;
                    }
                }
                Err(e) => {
                    report.failed += 1;
                    metrics::counter!("pizzeria_promotion_failures_total").increment(1);
                    tracing::warn!(
                        product_id = %line.product_id,
                        error = %e,
                        "promotion evaluation failed, keeping previous promotion"
                    );
                }
            }
        }

        tracing::debug!(
            voucher = %voucher_code,
            lines = report.lines,
            promoted = report.promoted,
            failed = report.failed,
            "promotions evaluated"
        );
        report
    }

    /// Evaluate one line
    ///
    /// # Errors
    /// The registry's matching error; `line` is not modified in that case.
    pub fn evaluate_line(
        &self,
        voucher_code: &str,
        line: &mut CartLine,
    ) -> Result<(), EvaluationError> {
        let facts = Facts::for_line(voucher_code, line.size, line.quantity);
        let matched = self.registry.run(&facts)?;

        line.reset_promotion();
        for m in &matched {
            if m.event.size() != line.size {
                continue;
            }
            let applied = apply_event(line, &m.event);
            if applied {
                metrics::counter!("pizzeria_promotions_applied_total", "kind" => m.event.kind())
                    .increment(1);
            }
            tracing::debug!(
                product_id = %line.product_id,
                rule = %m.rule,
                kind = m.event.kind(),
                applied,
                "promotion event"
            );
        }
        Ok(())
    }
}

fn apply_event(line: &mut CartLine, event: &PromotionEvent) -> bool {
    match event {
        PromotionEvent::Deal { buy, deal, .. } => line.apply_deal(*buy, *deal),
        PromotionEvent::Discount { price, .. } => {
            line.apply_discount(*price);
            true
        }
    }
}
