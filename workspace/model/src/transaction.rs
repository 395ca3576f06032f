use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::fmt;

/// Direction of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionType {
    /// Increases the balance on the settlement date.
    Income,
    /// Decreases the balance on the settlement date.
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "INCOME",
            TransactionType::Expense => "EXPENSE",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settlement status of a ledger entry.
///
/// The status is descriptive only: projections include every transaction
/// dated on a simulated day regardless of its status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TransactionStatus {
    #[default]
    Pending,
    Completed,
    Overdue,
    Processed,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "PENDING",
            TransactionStatus::Completed => "COMPLETED",
            TransactionStatus::Overdue => "OVERDUE",
            TransactionStatus::Processed => "PROCESSED",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents a single scheduled cash movement.
///
/// The `amount` is expected to be non-negative, the sign is carried by the
/// transaction type. The projection engine rejects ledgers that break this
/// rule, the model itself does not validate.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    id: String,
    date: NaiveDate,
    amount: Decimal,
    kind: TransactionType,
    status: TransactionStatus,
    entity: String,
    responsible: String,
    concept: String,
}

impl Transaction {
    /// Creates a new pending Transaction without descriptive metadata.
    pub fn new(
        id: impl Into<String>,
        date: NaiveDate,
        amount: Decimal,
        kind: TransactionType,
    ) -> Self {
        Self {
            id: id.into(),
            date,
            amount,
            kind,
            status: TransactionStatus::default(),
            entity: String::new(),
            responsible: String::new(),
            concept: String::new(),
        }
    }

    /// Creates a new income Transaction.
    pub fn income(id: impl Into<String>, date: NaiveDate, amount: Decimal) -> Self {
        Self::new(id, date, amount, TransactionType::Income)
    }

    /// Creates a new expense Transaction.
    pub fn expense(id: impl Into<String>, date: NaiveDate, amount: Decimal) -> Self {
        Self::new(id, date, amount, TransactionType::Expense)
    }

    pub fn with_status(mut self, status: TransactionStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = entity.into();
        self
    }

    pub fn with_responsible(mut self, responsible: impl Into<String>) -> Self {
        self.responsible = responsible.into();
        self
    }

    pub fn with_concept(mut self, concept: impl Into<String>) -> Self {
        self.concept = concept.into();
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Gets the settlement date of the transaction.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Gets the unsigned amount of the transaction.
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn kind(&self) -> TransactionType {
        self.kind
    }

    pub fn status(&self) -> TransactionStatus {
        self.status
    }

    pub fn entity(&self) -> &str {
        &self.entity
    }

    pub fn responsible(&self) -> &str {
        &self.responsible
    }

    pub fn concept(&self) -> &str {
        &self.concept
    }
}
