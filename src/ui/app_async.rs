use std::time::{Duration, Instant};

use eframe::egui;
use poll_promise::Promise;

use crate::config::DEBUG_FLAGS;
use crate::data::{ScanRequest, ScanService, Week52High};
use crate::engine::ScanSnapshot;
use crate::ui::app::{AppError, PatternScopeApp, ScanPhase};

pub(super) struct ScanOutcome {
    pub(super) seq: u64,
    pub(super) scan: Result<ScanSnapshot, AppError>,
    // The 52-week-high lookup is best-effort; its failure never fails the scan
    pub(super) week52: Option<Week52High>,
    elapsed: Duration,
}

impl PatternScopeApp {
    /// Validate the form and kick off a scan cycle on a background thread.
    ///
    /// Submitting while a previous cycle is in flight supersedes it: the new
    /// sequence token makes the old response stale, and `poll_scan_promise`
    /// drops stale responses on arrival.
    pub(super) fn start_analysis(&mut self) {
        let request = match self.form.validate() {
            Ok(request) => request,
            Err(errors) => {
                self.form_errors = errors;
                return;
            }
        };
        self.form_errors.clear();

        // Zone/group selection only means something for NRB scans
        if !request.pattern.is_nrb() {
            self.selection.selected_group_id = None;
        }

        let (Some(service), Some(runtime)) = (self.service.clone(), self.runtime.clone()) else {
            self.data.last_error = Some(AppError::ScanFailed(
                "scan service is not initialized".to_string(),
            ));
            self.phase = ScanPhase::Failure;
            return;
        };

        self.request_seq += 1;
        let seq = self.request_seq;
        self.phase = ScanPhase::Loading;

        let promise = Promise::spawn_thread("pattern_scan", move || {
            run_scan_cycle(service, runtime, request, seq)
        });
        self.scan_promise = Some(promise);
    }

    pub(super) fn poll_scan_promise(&mut self, ctx: &egui::Context) {
        let Some(promise) = self.scan_promise.take() else {
            return;
        };

        match promise.try_take() {
            Err(still_running) => {
                self.scan_promise = Some(still_running);
                ctx.request_repaint();
            }
            Ok(outcome) => self.apply_scan_outcome(outcome),
        }
    }

    fn apply_scan_outcome(&mut self, outcome: ScanOutcome) {
        if outcome.seq != self.request_seq {
            log::info!(
                "discarding stale scan response (seq {} < {})",
                outcome.seq,
                self.request_seq
            );
            return;
        }

        match outcome.scan {
            Ok(snapshot) => {
                if DEBUG_FLAGS.print_scan_requests {
                    log::info!(
                        "scan for {} completed in {:.2}s ({} markers, {} groups)",
                        snapshot.symbol,
                        outcome.elapsed.as_secs_f32(),
                        snapshot.markers.len(),
                        snapshot.groups.len()
                    );
                }
                // Whole-snapshot replacement; nothing from the previous
                // analysis survives into the new one
                self.data.snapshot = Some(snapshot);
                self.data.week52 = outcome.week52;
                self.data.last_error = None;
                self.has_analyzed = true;
                self.phase = ScanPhase::Success;
            }
            Err(error) => {
                log::error!("{}", error);
                // Previous chart stays up; only the status changes
                self.data.last_error = Some(error);
                self.phase = ScanPhase::Failure;
            }
        }
    }

    pub(super) fn is_scanning(&self) -> bool {
        self.scan_promise.is_some()
    }
}

fn run_scan_cycle(
    service: ScanService,
    runtime: tokio::runtime::Handle,
    request: ScanRequest,
    seq: u64,
) -> ScanOutcome {
    let started = Instant::now();

    let (scan, week52) = runtime.block_on(async {
        futures::join!(
            service.fetch_pattern_scan(&request),
            service.fetch_week52_high(&request.symbol),
        )
    });

    let week52 = match week52 {
        Ok(high) => Some(high),
        Err(error) => {
            log::warn!("52-week-high lookup failed: {:#}", error);
            None
        }
    };

    ScanOutcome {
        seq,
        scan: scan.map_err(|error| AppError::ScanFailed(format!("{:#}", error))),
        week52,
        elapsed: started.elapsed(),
    }
}
