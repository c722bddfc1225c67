pub mod console;
pub mod json;

use cloudmap_domain::DomainReport;
use json::OutputRecord;
use tokio::sync::mpsc;

/// Print every report as it arrives; keep JSON records when a file sink is wanted.
pub async fn drain(
    mut reports: mpsc::Receiver<DomainReport>,
    keep_records: bool,
) -> Vec<OutputRecord> {
    let mut records = Vec::new();

    while let Some(report) = reports.recv().await {
        console::print_report(&report);
        if keep_records {
            records.extend(json::records_from(&report));
        }
    }

    records
}
