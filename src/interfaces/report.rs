use crate::domain::outcome::PaymentOutcome;
use std::io::{self, Write};

/// Renders payment outcomes for the terminal.
pub struct OutcomeWriter<W: Write> {
    writer: W,
}

impl<W: Write> OutcomeWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Labelled lines, skipping fields the outcome does not carry.
    pub fn write_text(&mut self, outcome: &PaymentOutcome) -> io::Result<()> {
        writeln!(self.writer, "Status: {}", outcome.status)?;
        if !outcome.transaction_id.is_empty() {
            writeln!(self.writer, "Transaction ID: {}", outcome.transaction_id)?;
        }
        if let Some(payment_id) = &outcome.payment_id {
            writeln!(self.writer, "Payment ID: {payment_id}")?;
        }
        writeln!(self.writer, "Message: {}", outcome.message)?;
        if let Some(amount) = &outcome.amount {
            writeln!(self.writer, "Amount: {amount}")?;
        }
        self.writer.flush()
    }

    pub fn write_json(&mut self, outcome: &PaymentOutcome) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, outcome)?;
        writeln!(self.writer)?;
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::outcome::OutcomeStatus;

    fn success() -> PaymentOutcome {
        PaymentOutcome {
            status: OutcomeStatus::Success,
            transaction_id: "T1".to_string(),
            payment_id: Some("P1".to_string()),
            amount: Some("100".to_string()),
            merchant_key: None,
            message: "payment successful".to_string(),
        }
    }

    #[test]
    fn test_text_report() {
        let mut out = Vec::new();
        OutcomeWriter::new(&mut out).write_text(&success()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "Status: SUCCESS\nTransaction ID: T1\nPayment ID: P1\nMessage: payment successful\nAmount: 100\n"
        );
    }

    #[test]
    fn test_text_report_skips_absent_fields() {
        let mut out = Vec::new();
        let outcome = PaymentOutcome::error("T1", "no payment data received");
        OutcomeWriter::new(&mut out).write_text(&outcome).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Status: ERROR\n"));
        assert!(!text.contains("Payment ID"));
        assert!(!text.contains("Amount"));
    }

    #[test]
    fn test_json_report() {
        let mut out = Vec::new();
        OutcomeWriter::new(&mut out).write_json(&success()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["status"], "success");
        assert_eq!(value["paymentId"], "P1");
    }
}
