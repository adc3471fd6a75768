//! Background insight generation.
//!
//! The service call runs on its own thread and reports back over a channel
//! that the UI loop polls, so a slow service never blocks a frame.

use std::sync::Arc;

use crossbeam_channel::{Receiver, TryRecvError};

use crate::error::InsightError;

use super::client::InsightService;
use super::request::{InsightRequest, InsightSummary};

/// Shown in place of a summary when generation fails.
pub const FALLBACK_MESSAGE: &str = "Failed to generate insights. Please try again.";

type JobResult = Result<InsightSummary, InsightError>;

/// An outstanding service call.
pub struct InsightJob {
    receiver: Receiver<JobResult>,
}

/// Spawn a worker thread for one request.
pub fn spawn_insight_job(service: Arc<dyn InsightService>, request: InsightRequest) -> InsightJob {
    let (sender, receiver) = crossbeam_channel::bounded(1);
    std::thread::spawn(move || {
        let result = service.summarize(&request);
        let _ = sender.send(result);
    });
    InsightJob { receiver }
}

impl InsightJob {
    /// Non-blocking check. A worker that exits without sending counts as a
    /// failure.
    pub fn poll(&self) -> Option<JobResult> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(InsightError::Worker)),
        }
    }

    /// Block until the worker reports.
    #[cfg(test)]
    pub fn wait(self) -> JobResult {
        self.receiver.recv().unwrap_or(Err(InsightError::Worker))
    }
}

// ---------------------------------------------------------------------------
// Panel state
// ---------------------------------------------------------------------------

/// Summary panel state: at most one request in flight.
#[derive(Default)]
pub struct InsightPanel {
    job: Option<InsightJob>,
    summary: Option<String>,
    /// Years (display form) the current summary covers.
    summary_years: Vec<String>,
    last_error: Option<String>,
}

impl InsightPanel {
    pub fn is_loading(&self) -> bool {
        self.job.is_some()
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub fn summary_years(&self) -> &[String] {
        &self.summary_years
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Dispatch a request unless one is already outstanding.
    pub fn begin(
        &mut self,
        service: Arc<dyn InsightService>,
        request: InsightRequest,
        years: Vec<String>,
    ) -> bool {
        if self.is_loading() {
            log::debug!("Insight request ignored: one is already running");
            return false;
        }
        log::info!(
            "Requesting insights for {} categories over {} years",
            request.categories.len(),
            request.years.len()
        );
        self.summary = None;
        self.last_error = None;
        self.summary_years = years;
        self.job = Some(spawn_insight_job(service, request));
        true
    }

    /// Collect a finished job. Returns true when the job ended, whatever the
    /// outcome; the loading flag is clear afterwards in every case.
    pub fn poll(&mut self) -> bool {
        let Some(result) = self.job.as_ref().and_then(InsightJob::poll) else {
            return false;
        };
        self.job = None;
        self.finish(result);
        true
    }

    fn finish(&mut self, result: JobResult) {
        match result {
            Ok(reply) => {
                log::info!("Insight summary received ({} chars)", reply.summary.len());
                self.summary = Some(reply.summary);
            }
            Err(e) => {
                log::error!("Error generating insights: {e}");
                self.summary = Some(FALLBACK_MESSAGE.to_string());
                self.last_error = Some(e.to_string());
            }
        }
    }

    /// Drop any outstanding job. Its thread finishes on its own and the
    /// result is discarded.
    pub fn abandon(&mut self) {
        self.job = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    struct Canned(&'static str);

    impl InsightService for Canned {
        fn summarize(&self, request: &InsightRequest) -> Result<InsightSummary, InsightError> {
            Ok(InsightSummary {
                summary: format!("{} ({} years)", self.0, request.years.len()),
            })
        }
    }

    struct Failing;

    impl InsightService for Failing {
        fn summarize(&self, _request: &InsightRequest) -> Result<InsightSummary, InsightError> {
            Err(InsightError::Status {
                status: 500,
                body: "boom".into(),
            })
        }
    }

    struct Panicking;

    impl InsightService for Panicking {
        fn summarize(&self, _request: &InsightRequest) -> Result<InsightSummary, InsightError> {
            panic!("worker crashed");
        }
    }

    fn request() -> InsightRequest {
        InsightRequest {
            years: vec![2022, 2023],
            categories: vec!["Education".into()],
            data: "[]".into(),
        }
    }

    fn poll_until_done(panel: &mut InsightPanel) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while !panel.poll() {
            assert!(Instant::now() < deadline, "insight job did not finish");
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn job_reports_result() {
        let job = spawn_insight_job(Arc::new(Canned("ok")), request());
        assert_eq!(job.wait().unwrap().summary, "ok (2 years)");
    }

    #[test]
    fn success_sets_summary_and_clears_loading() {
        let mut panel = InsightPanel::default();
        assert!(panel.begin(Arc::new(Canned("Growth")), request(), vec!["2022-23".into()]));
        assert!(panel.is_loading());
        poll_until_done(&mut panel);
        assert!(!panel.is_loading());
        assert_eq!(panel.summary(), Some("Growth (2 years)"));
        assert_eq!(panel.summary_years(), ["2022-23".to_string()]);
        assert_eq!(panel.last_error(), None);
    }

    #[test]
    fn failure_shows_fallback_and_clears_loading() {
        let mut panel = InsightPanel::default();
        panel.begin(Arc::new(Failing), request(), vec![]);
        poll_until_done(&mut panel);
        assert!(!panel.is_loading());
        assert_eq!(panel.summary(), Some(FALLBACK_MESSAGE));
        assert!(panel.last_error().unwrap_or_default().contains("500"));
    }

    #[test]
    fn crashed_worker_clears_loading() {
        let mut panel = InsightPanel::default();
        panel.begin(Arc::new(Panicking), request(), vec![]);
        poll_until_done(&mut panel);
        assert!(!panel.is_loading());
        assert_eq!(panel.summary(), Some(FALLBACK_MESSAGE));
    }

    #[test]
    fn second_request_refused_while_loading() {
        let mut panel = InsightPanel::default();
        assert!(panel.begin(Arc::new(Canned("first")), request(), vec![]));
        assert!(!panel.begin(Arc::new(Canned("second")), request(), vec![]));
        poll_until_done(&mut panel);
        assert_eq!(panel.summary(), Some("first (2 years)"));
    }

    #[test]
    fn poll_without_job_is_noop() {
        let mut panel = InsightPanel::default();
        assert!(!panel.poll());
        assert!(!panel.is_loading());
    }
}
