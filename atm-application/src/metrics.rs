use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct Metrics {
    reports_created: AtomicU64,
    report_errors: AtomicU64,
    validation_rejections: AtomicU64,
    read_failures: AtomicU64,
}

impl Metrics {
    pub fn record_report_created(&self) {
        self.reports_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_report_error(&self) {
        self.report_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_validation_rejection(&self) {
        self.validation_rejections.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_read_failure(&self) {
        self.read_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn reports_created(&self) -> u64 {
        self.reports_created.load(Ordering::Relaxed)
    }

    pub fn read_failures(&self) -> u64 {
        self.read_failures.load(Ordering::Relaxed)
    }

    pub fn render_prometheus(&self) -> String {
        let created = self.reports_created.load(Ordering::Relaxed);
        let errors = self.report_errors.load(Ordering::Relaxed);
        let rejections = self.validation_rejections.load(Ordering::Relaxed);
        let read_failures = self.read_failures.load(Ordering::Relaxed);

        format!(
            "# TYPE atm_reports_created_total counter\n\
atm_reports_created_total {}\n\
# TYPE atm_report_errors_total counter\n\
atm_report_errors_total {}\n\
# TYPE atm_report_validation_rejections_total counter\n\
atm_report_validation_rejections_total {}\n\
# TYPE atm_read_failures_total counter\n\
atm_read_failures_total {}\n",
            created, errors, rejections, read_failures
        )
    }
}
