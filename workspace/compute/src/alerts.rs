use chrono::{DateTime, Utc};
use model::{Alert, AlertType, DailyProjection};
use tracing::{debug, instrument, warn};

/// Scans projections for threshold breaches, stamping alerts with the current time.
pub fn detect_alerts(projections: &[DailyProjection]) -> Vec<Alert> {
    detect_alerts_at(projections, Utc::now())
}

/// Scans projections for threshold breaches.
///
/// Emits one alert per critical or warning day, in input order. Normal days
/// produce nothing. The input is expected to be in strictly ascending date
/// order as produced by the projection engine; a malformed sequence is logged
/// but still processed.
#[instrument(skip(projections), fields(days = projections.len()))]
pub fn detect_alerts_at(projections: &[DailyProjection], timestamp: DateTime<Utc>) -> Vec<Alert> {
    if projections.windows(2).any(|pair| pair[1].date <= pair[0].date) {
        warn!("Projection dates are not strictly ascending, alert order may be meaningless");
    }

    let alerts: Vec<Alert> = projections
        .iter()
        .filter_map(|projection| alert_for(projection, timestamp))
        .collect();

    debug!(
        "Detected {} alerts ({} critical)",
        alerts.len(),
        alerts.iter().filter(|a| a.is_critical()).count()
    );

    alerts
}

/// The most urgent alert: the nearest-future deficit.
pub fn first_critical(alerts: &[Alert]) -> Option<&Alert> {
    alerts.iter().find(|alert| alert.is_critical())
}

fn alert_for(projection: &DailyProjection, timestamp: DateTime<Utc>) -> Option<Alert> {
    let alert_type = AlertType::from_status(projection.status)?;
    let date = projection.date;

    let (message, amount) = match alert_type {
        AlertType::Critical => (
            format!("Projected cash deficit on {}", date.format("%Y-%m-%d")),
            projection.final_balance.abs(),
        ),
        AlertType::Warning => (
            format!(
                "Balance below the minimum operative level on {}",
                date.format("%Y-%m-%d")
            ),
            projection.final_balance,
        ),
    };

    Some(Alert {
        id: Alert::id_for(date, alert_type),
        timestamp,
        alert_type,
        message,
        amount,
        critical_date: date,
    })
}
