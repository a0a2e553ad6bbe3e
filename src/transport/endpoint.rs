use crate::domain::JobId;

const CUSTOMER_NUMBER_TAG: &str = "{custNr}";
const JOB_ID_TAG: &str = "{jobId}";

const JOBS_PATH: &str = "/{custNr}/fax";
const REPORTS_PATH: &str = "/{custNr}/fax/reports";
const SINGLE_REPORT_PATH: &str = "/{custNr}/fax/reports/{jobId}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Service endpoints relative to a send or fetch base URL.
pub enum RequestUrl {
    SendFax,
    FetchReport,
    DeleteReport,
    FetchReports,
    DeleteReports,
    BulkOperation,
}

impl RequestUrl {
    fn template(self) -> &'static str {
        match self {
            Self::SendFax => JOBS_PATH,
            Self::FetchReport | Self::DeleteReport => SINGLE_REPORT_PATH,
            Self::FetchReports | Self::DeleteReports | Self::BulkOperation => REPORTS_PATH,
        }
    }

    /// Substitute the customer number into the template and append it to `base_url`.
    pub fn render(self, base_url: &str, customer_number: &str) -> String {
        let path = self.template().replace(CUSTOMER_NUMBER_TAG, customer_number);
        format!("{}{}", base_url.trim_end_matches('/'), path)
    }

    /// Like [`RequestUrl::render`], additionally substituting a job id.
    pub fn render_for_job(self, base_url: &str, customer_number: &str, job_id: &JobId) -> String {
        self.render(base_url, customer_number)
            .replace(JOB_ID_TAG, job_id.as_str())
    }
}
