use crate::domain::AccountStatement;

/// Renders an account statement to text. The exact layout is the
/// formatter's concern; the service only guarantees the snapshot it passes
/// is internally consistent.
pub trait StatementFormatter: Send + Sync {
    fn format(&self, statement: &AccountStatement) -> String;
}

/// Plain-text statement: account header, last balance, then one line per
/// operation, newest first.
pub struct HumanReadableFormatter;

impl StatementFormatter for HumanReadableFormatter {
    fn format(&self, statement: &AccountStatement) -> String {
        let mut lines = vec![
            format!("Account : {}", statement.account_id),
            format!("Last balance : {}", statement.balance),
            "Operations :".to_string(),
            format!("{:<20} {:<12} {:>12}", "Date", "Type", "Amount"),
        ];

        for operation in &statement.operations {
            lines.push(format!(
                "{:<20} {:<12} {:>12}",
                operation.recorded_at.format("%Y-%m-%d %H:%M"),
                operation.kind.as_str(),
                operation.amount,
            ));
        }

        lines.join("\n")
    }
}
