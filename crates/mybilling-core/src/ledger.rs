//! # Settlement & Customer Ledger
//!
//! Payment status of a saved bill and the ledger rows it posts to the
//! customer's account.
//!
//! ## Running Balance
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Customer balance = what the customer owes the shop                    │
//! │                                                                         │
//! │  opening 500.00                                                         │
//! │     │                                                                   │
//! │     ├── PURCHASE  Bill #42      debit  1180.00   balance 1680.00        │
//! │     └── PAYMENT   PAY-42        credit 1000.00   balance  680.00        │
//! │                                                                         │
//! │  net impact of Bill #42 = Σdebit − Σcredit = 180.00                     │
//! │                                                                         │
//! │  Edit bill   → balance − old net impact, then post again               │
//! │  Delete bill → balance − old net impact                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything here is pure: the caller loads the current balance and old
//! entries, and stores whatever comes back.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::{quantize_amount, zero};

// =============================================================================
// Payment Status
// =============================================================================

/// How much of a bill has been paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,
    Partial,
    Unpaid,
}

impl PaymentStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "paid",
            PaymentStatus::Partial => "partial",
            PaymentStatus::Unpaid => "unpaid",
        }
    }
}

// =============================================================================
// Settlement
// =============================================================================

/// Paid / due split of a bill total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Settlement {
    #[ts(as = "String")]
    pub total_amount: Decimal,
    #[ts(as = "String")]
    pub paid_amount: Decimal,
    #[ts(as = "String")]
    pub due_amount: Decimal,
    pub status: PaymentStatus,
}

/// Settles a bill total against the amount paid so far.
///
/// ## Rules
/// - `due = q(total − paid)`
/// - `due ≤ 0` → `Paid`, and due is reported as `0.00` (overpayment is not
///   carried as negative due)
/// - nothing paid → `Unpaid`
/// - otherwise → `Partial`
///
/// ## Example
/// ```rust
/// use mybilling_core::ledger::{settle_bill, PaymentStatus};
/// use rust_decimal::Decimal;
///
/// let s = settle_bill(Decimal::new(21240, 2), Decimal::from(100)).unwrap();
/// assert_eq!(s.status, PaymentStatus::Partial);
/// assert_eq!(s.due_amount.to_string(), "112.40");
/// ```
pub fn settle_bill(total: Decimal, paid: Decimal) -> CoreResult<Settlement> {
    let total_amount = quantize_amount("total_amount", total)?;
    let paid_amount = quantize_amount("paid_amount", paid)?;
    let due = balance_step("due_amount", total_amount.checked_sub(paid_amount))?;

    let (due_amount, status) = if due <= Decimal::ZERO {
        (zero(), PaymentStatus::Paid)
    } else if paid_amount <= Decimal::ZERO {
        (due, PaymentStatus::Unpaid)
    } else {
        (due, PaymentStatus::Partial)
    };

    Ok(Settlement {
        total_amount,
        paid_amount,
        due_amount,
        status,
    })
}

/// Records a further payment against a settled bill.
///
/// ## Errors
/// `amount ≤ 0` is rejected; refunds are not payments.
pub fn apply_payment(settlement: &Settlement, amount: Decimal) -> CoreResult<Settlement> {
    if amount <= Decimal::ZERO {
        return Err(ValidationError::MustBePositive {
            field: "payment_amount".to_string(),
        }
        .into());
    }

    let paid = settlement
        .paid_amount
        .checked_add(amount)
        .ok_or_else(|| CoreError::invalid("paid_amount", "result is outside the decimal range"))?;

    settle_bill(settlement.total_amount, paid)
}

// =============================================================================
// Ledger Entries
// =============================================================================

/// Kind of customer ledger row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LedgerEntryKind {
    /// Goods sold on a bill (debit).
    Purchase,
    /// Money received against a bill (credit).
    Payment,
}

/// One row of a customer's ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LedgerEntry {
    #[serde(rename = "entry_type")]
    pub kind: LedgerEntryKind,
    #[ts(as = "String")]
    pub transaction_date: NaiveDate,
    pub invoice_no: String,
    pub particulars: String,
    #[ts(as = "String")]
    pub debit_amount: Decimal,
    #[ts(as = "String")]
    pub credit_amount: Decimal,
    /// Customer balance after this row.
    #[ts(as = "String")]
    pub balance_amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Rows posted for one bill and the balance around them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LedgerPosting {
    pub entries: Vec<LedgerEntry>,
    #[ts(as = "String")]
    pub opening_balance: Decimal,
    #[ts(as = "String")]
    pub closing_balance: Decimal,
}

fn balance_step(field: &str, result: Option<Decimal>) -> CoreResult<Decimal> {
    let value =
        result.ok_or_else(|| CoreError::invalid(field, "result is outside the decimal range"))?;
    quantize_amount(field, value)
}

// =============================================================================
// Posting
// =============================================================================

/// Posts a saved bill to the customer ledger.
///
/// ## Rules
/// - Always one `PURCHASE` row: debit = bill total
/// - A `PAYMENT` row only when something was paid: credit = paid amount,
///   invoice number `PAY-<bill>`
/// - Each row carries the running balance after it
pub fn post_bill(
    opening_balance: Decimal,
    bill_number: &str,
    bill_date: NaiveDate,
    settlement: &Settlement,
) -> CoreResult<LedgerPosting> {
    let opening_balance = quantize_amount("opening_balance", opening_balance)?;
    let mut entries = Vec::with_capacity(2);

    let mut balance = balance_step(
        "balance_amount",
        opening_balance.checked_add(settlement.total_amount),
    )?;
    entries.push(LedgerEntry {
        kind: LedgerEntryKind::Purchase,
        transaction_date: bill_date,
        invoice_no: bill_number.to_string(),
        particulars: format!("Purchase - Bill #{}", bill_number),
        debit_amount: settlement.total_amount,
        credit_amount: zero(),
        balance_amount: balance,
        notes: None,
    });

    if settlement.paid_amount > Decimal::ZERO {
        balance = balance_step("balance_amount", balance.checked_sub(settlement.paid_amount))?;
        entries.push(LedgerEntry {
            kind: LedgerEntryKind::Payment,
            transaction_date: bill_date,
            invoice_no: format!("PAY-{}", bill_number),
            particulars: format!("Payment for Bill #{}", bill_number),
            debit_amount: zero(),
            credit_amount: settlement.paid_amount,
            balance_amount: balance,
            notes: Some(format!("Payment received ({})", settlement.status.as_str())),
        });
    }

    Ok(LedgerPosting {
        entries,
        opening_balance,
        closing_balance: balance,
    })
}

/// What a set of rows added to the customer balance: `Σdebit − Σcredit`.
pub fn net_impact(entries: &[LedgerEntry]) -> CoreResult<Decimal> {
    entries.iter().try_fold(zero(), |acc, entry| {
        let with_debit = balance_step("net_impact", acc.checked_add(entry.debit_amount))?;
        balance_step("net_impact", with_debit.checked_sub(entry.credit_amount))
    })
}

/// Customer balance after a bill and its rows are deleted.
pub fn reverse_bill(current_balance: Decimal, old_entries: &[LedgerEntry]) -> CoreResult<Decimal> {
    let impact = net_impact(old_entries)?;
    balance_step("balance_amount", current_balance.checked_sub(impact))
}

/// Re-posts an edited bill: backs out the old rows, then posts the new
/// settlement from the restored balance.
pub fn repost_bill(
    current_balance: Decimal,
    old_entries: &[LedgerEntry],
    bill_number: &str,
    bill_date: NaiveDate,
    settlement: &Settlement,
) -> CoreResult<LedgerPosting> {
    let restored = reverse_bill(current_balance, old_entries)?;
    post_bill(restored, bill_number, bill_date, settlement)
}

// =============================================================================
// Summary
// =============================================================================

/// Aggregates over a customer's ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LedgerSummary {
    pub total_entries: usize,
    #[ts(as = "String")]
    pub total_purchases: Decimal,
    #[ts(as = "String")]
    pub total_payments: Decimal,
    #[ts(as = "Option<String>")]
    pub last_transaction_date: Option<NaiveDate>,
}

/// Totals a customer's ledger rows.
///
/// ## Rules
/// - `total_purchases` = Σdebit, `total_payments` = Σcredit
/// - `last_transaction_date` is the latest date, whatever the row order
/// - Empty input → zero counts and `None`
///
/// ## Errors
/// [`CoreError::InvalidArgument`] when a sum leaves the decimal range.
pub fn summarize_ledger(entries: &[LedgerEntry]) -> CoreResult<LedgerSummary> {
    let mut summary = LedgerSummary {
        total_purchases: zero(),
        total_payments: zero(),
        ..LedgerSummary::default()
    };

    for entry in entries {
        summary.total_entries += 1;
        summary.total_purchases = balance_step(
            "total_purchases",
            summary.total_purchases.checked_add(entry.debit_amount),
        )?;
        summary.total_payments = balance_step(
            "total_payments",
            summary.total_payments.checked_add(entry.credit_amount),
        )?;
        if summary.last_transaction_date.map_or(true, |d| entry.transaction_date > d) {
            summary.last_transaction_date = Some(entry.transaction_date);
        }
    }

    Ok(summary)
}

// =============================================================================
// Unit Tests
// =============================================================================
