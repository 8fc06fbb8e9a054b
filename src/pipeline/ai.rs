use super::report::Report;
use crate::ai::client::Analyst;
use crate::error::Error;
use crate::store::record::CombinedRecord;
use crate::store::results::Results;

/// Phase two: enrich exactly the selected hands with paid AI analysis.
/// Strictly sequential; the endpoint is billed per call and rate
/// limited. The analyst is never invoked for a hand outside `ids`, and
/// never for an id with no prior gto record. That id was asked for by
/// name, so its absence is reported as a per-hand `MissingRecord`
/// rather than silently skipped.
pub async fn run<A>(ids: &[String], analyst: &A, results: &Results) -> Report
where
    A: Analyst,
{
    log::info!("enriching {} selected hands", ids.len());
    let mut report = Report::default();
    for hand_id in ids {
        match results.latest(hand_id) {
            Err(e) => report.failure(hand_id.clone(), e),
            Ok(None) => report.failure(hand_id.clone(), Error::MissingRecord(hand_id.clone())),
            Ok(Some(gto)) => match analyst.review(&gto.hand, &gto.solver).await {
                Err(e) => report.failure(hand_id.clone(), e),
                Ok(analysis) => {
                    match results.save_combined(&CombinedRecord::from((gto, analysis))) {
                        Err(e) => report.failure(hand_id.clone(), e),
                        Ok(_) => {
                            log::info!("hand #{} enriched", hand_id);
                            report.success(hand_id.clone());
                        }
                    }
                }
            },
        }
    }
    report
}
