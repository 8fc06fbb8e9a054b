use super::report::Report;
use crate::error::Error;
use crate::hands::store::HandStore;
use crate::solver::client::Solver;
use crate::store::record::GtoRecord;
use crate::store::results::Results;
use futures::StreamExt;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Phase one: every stored hand goes through the solver, gets scored,
/// and lands in the result store as one gto-only artifact. No AI cost
/// is incurred here. Hands are independent, so solver calls run under a
/// semaphore of `width` concurrent requests; persistence stays atomic
/// per hand and the accounting is merged by this single consumer after
/// the stream drains. One hand's failure never aborts the batch, and
/// interrupting between hands leaves every persisted artifact whole.
pub async fn run<H, S>(
    hands: &H,
    solver: &S,
    results: &Results,
    width: usize,
) -> Result<Report, Error>
where
    H: HandStore,
    S: Solver + Sync,
{
    let hands = hands.list()?;
    let width = width.max(1);
    log::info!("solving {} hands ({} in flight)", hands.len(), width);
    let semaphore = Arc::new(Semaphore::new(width));
    let outcomes = futures::stream::iter(hands)
        .map(|hand| {
            let semaphore = semaphore.clone();
            async move {
                let _permit = semaphore.acquire().await;
                let hand_id = hand.hand_id.clone();
                let outcome = match solver.solve(&hand).await {
                    Ok(solved) => {
                        let record = GtoRecord::from((hand, solved));
                        results.save_gto(&record).map(|_| record.deviation)
                    }
                    Err(e) => Err(e),
                };
                (hand_id, outcome)
            }
        })
        .buffer_unordered(width)
        .collect::<Vec<_>>()
        .await;
    let mut report = Report::default();
    for (hand_id, outcome) in outcomes {
        match outcome {
            Ok(deviation) => {
                log::info!("hand #{} scored {:.2}", hand_id, deviation);
                report.success(hand_id);
            }
            Err(e) => report.failure(hand_id, e),
        }
    }
    Ok(report.sorted())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hands::hand::HandRecord;
    use crate::solver::result::SolverResult;
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;
    use std::sync::atomic::Ordering;

    struct Fixed(Vec<HandRecord>);
    impl HandStore for Fixed {
        fn list(&self) -> Result<Vec<HandRecord>, Error> {
            Ok(self.0.clone())
        }
    }

    /// Fails for one designated hand, counts every call.
    struct Flaky {
        poison: &'static str,
        calls: AtomicUsize,
    }
    #[async_trait]
    impl Solver for Flaky {
        async fn solve(&self, hand: &HandRecord) -> Result<SolverResult, Error> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if hand.hand_id == self.poison {
                Err(Error::SolverUnavailable("timed out".to_string()))
            } else {
                Ok(SolverResult {
                    ev_analysis: [("line".to_string(), -1.0)].into(),
                    ..SolverResult::default()
                })
            }
        }
        async fn health(&self) -> bool {
            true
        }
    }

    fn hands(n: usize) -> Vec<HandRecord> {
        (1..=n)
            .map(|i| HandRecord::parse(&format!("h{}", i), "no header\nx"))
            .collect()
    }

    fn scratch() -> Results {
        Results::from(std::env::temp_dir().join(format!("gto-run-{}", uuid::Uuid::now_v7())))
    }

    #[tokio::test]
    async fn one_failure_does_not_abort_the_batch() {
        let results = scratch();
        let solver = Flaky {
            poison: "h3",
            calls: AtomicUsize::new(0),
        };
        let report = run(&Fixed(hands(5)), &solver, &results, 1).await.unwrap();
        assert_eq!(report.succeeded, vec!["h1", "h2", "h4", "h5"]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, "h3");
        assert_eq!(solver.calls.load(Ordering::SeqCst), 5);
        assert_eq!(results.load_gto().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn parallel_width_merges_accounting() {
        let results = scratch();
        let solver = Flaky {
            poison: "h2",
            calls: AtomicUsize::new(0),
        };
        let report = run(&Fixed(hands(6)), &solver, &results, 3).await.unwrap();
        assert_eq!(report.succeeded.len(), 5);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(results.load_gto().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn empty_store_is_a_clean_run() {
        let report = run(
            &Fixed(Vec::new()),
            &Flaky {
                poison: "",
                calls: AtomicUsize::new(0),
            },
            &scratch(),
            2,
        )
        .await
        .unwrap();
        assert!(report.succeeded.is_empty());
        assert!(report.failed.is_empty());
    }
}
