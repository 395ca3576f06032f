//! Mapping between the core model and the transport types in `common`.

use chrono::NaiveDate;
use common::{
    AlertDto, AlertTypeDto, CashFlowSummaryDto, DateRange, InsightReportDto, PeriodBucketDto,
    ProjectionPoint, ProjectionTimeseries, RiskLevelDto, RiskStatusDto, TransactionDto,
    TransactionStatusDto, TransactionTypeDto,
};
use compute::ledger::parse_date;
use compute::rollup::PeriodBucket;
use compute::summary::CashFlowSummary;
use model::{
    Alert, AlertType, DailyProjection, InsightReport, RiskLevel, RiskStatus, Transaction,
    TransactionStatus, TransactionType,
};
use rust_decimal::Decimal;

/// Parameters a projection was computed with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionParams {
    pub reference_date: NaiveDate,
    pub horizon_days: i64,
    pub starting_balance: Decimal,
    pub min_operative_balance: Decimal,
}

impl ProjectionParams {
    pub fn cache_key(&self) -> String {
        format!(
            "projection_{}_{}_{}_{}",
            self.reference_date, self.horizon_days, self.starting_balance, self.min_operative_balance
        )
    }
}

pub fn transaction_to_dto(tx: &Transaction) -> TransactionDto {
    TransactionDto {
        id: tx.id().to_string(),
        date: tx.date().format(compute::ledger::DATE_FORMAT).to_string(),
        amount: tx.amount(),
        kind: match tx.kind() {
            TransactionType::Income => TransactionTypeDto::Income,
            TransactionType::Expense => TransactionTypeDto::Expense,
        },
        status: match tx.status() {
            TransactionStatus::Pending => TransactionStatusDto::Pending,
            TransactionStatus::Completed => TransactionStatusDto::Completed,
            TransactionStatus::Overdue => TransactionStatusDto::Overdue,
            TransactionStatus::Processed => TransactionStatusDto::Processed,
        },
        entity: tx.entity().to_string(),
        responsible: tx.responsible().to_string(),
        concept: tx.concept().to_string(),
    }
}

/// Converts a wire transaction, rejecting malformed dates.
///
/// Amount validation is left to [`compute::Ledger::new`].
pub fn dto_to_transaction(dto: TransactionDto) -> compute::Result<Transaction> {
    let date = parse_date(&dto.date)?;
    let kind = match dto.kind {
        TransactionTypeDto::Income => TransactionType::Income,
        TransactionTypeDto::Expense => TransactionType::Expense,
    };
    let status = match dto.status {
        TransactionStatusDto::Pending => TransactionStatus::Pending,
        TransactionStatusDto::Completed => TransactionStatus::Completed,
        TransactionStatusDto::Overdue => TransactionStatus::Overdue,
        TransactionStatusDto::Processed => TransactionStatus::Processed,
    };

    Ok(Transaction::new(dto.id, date, dto.amount, kind)
        .with_status(status)
        .with_entity(dto.entity)
        .with_responsible(dto.responsible)
        .with_concept(dto.concept))
}

pub fn status_to_dto(status: RiskStatus) -> RiskStatusDto {
    match status {
        RiskStatus::Normal => RiskStatusDto::Normal,
        RiskStatus::Warning => RiskStatusDto::Warning,
        RiskStatus::Critical => RiskStatusDto::Critical,
    }
}

pub fn projection_to_point(projection: &DailyProjection) -> ProjectionPoint {
    ProjectionPoint {
        date: projection.date,
        initial_balance: projection.initial_balance,
        incomes: projection.incomes,
        expenses: projection.expenses,
        final_balance: projection.final_balance,
        status: status_to_dto(projection.status),
    }
}

pub fn projections_to_timeseries(
    params: &ProjectionParams,
    projections: &[DailyProjection],
) -> ProjectionTimeseries {
    let end_date = projections
        .last()
        .map(|p| p.date)
        .unwrap_or(params.reference_date);

    ProjectionTimeseries {
        reference_date: params.reference_date,
        horizon_days: params.horizon_days,
        starting_balance: params.starting_balance,
        min_operative_balance: params.min_operative_balance,
        date_range: DateRange::new(params.reference_date, end_date),
        points: projections.iter().map(projection_to_point).collect(),
    }
}

pub fn alert_to_dto(alert: &Alert) -> AlertDto {
    AlertDto {
        id: alert.id.clone(),
        timestamp: alert.timestamp,
        alert_type: match alert.alert_type {
            AlertType::Critical => AlertTypeDto::Critical,
            AlertType::Warning => AlertTypeDto::Warning,
        },
        message: alert.message.clone(),
        amount: alert.amount,
        critical_date: alert.critical_date,
    }
}

pub fn bucket_to_dto(bucket: &PeriodBucket) -> PeriodBucketDto {
    PeriodBucketDto {
        period: bucket.period.to_string(),
        start: bucket.start,
        end: bucket.end,
        days: bucket.days,
        opening_balance: bucket.opening_balance,
        incomes: bucket.incomes,
        expenses: bucket.expenses,
        closing_balance: bucket.closing_balance,
        status: status_to_dto(bucket.status),
    }
}

pub fn summary_to_dto(
    params: &ProjectionParams,
    summary: CashFlowSummary,
    first_critical: Option<&Alert>,
) -> CashFlowSummaryDto {
    CashFlowSummaryDto {
        reference_date: params.reference_date,
        horizon_days: params.horizon_days,
        current_liquidity: summary.current_liquidity,
        window_days: summary.window_days,
        incomes: summary.incomes,
        expenses: summary.expenses,
        lowest_balance: summary.lowest_balance,
        lowest_balance_date: summary.lowest_balance_date,
        critical_days: summary.critical_days,
        warning_days: summary.warning_days,
        first_critical_date: summary.first_critical_date,
        first_critical_alert: first_critical.map(alert_to_dto),
    }
}

pub fn insight_to_dto(provider: &str, report: InsightReport) -> InsightReportDto {
    InsightReportDto {
        provider: provider.to_string(),
        summary: report.summary,
        recommendations: report.recommendations,
        risk_level: match report.risk_level {
            RiskLevel::Low => RiskLevelDto::Low,
            RiskLevel::Medium => RiskLevelDto::Medium,
            RiskLevel::High => RiskLevelDto::High,
            RiskLevel::NotAvailable => RiskLevelDto::NotAvailable,
        },
        available: report.available,
    }
}
