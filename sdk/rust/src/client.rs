use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

/// Contact form payload. Optional fields are omitted from the JSON when unset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AckBody {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// What the service decided about a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted { message: String },
    Rejected { status: u16, error: String },
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmitOutcome::Accepted { .. })
    }

    pub fn status(&self) -> u16 {
        match self {
            SubmitOutcome::Accepted { .. } => StatusCode::OK.as_u16(),
            SubmitOutcome::Rejected { status, .. } => *status,
        }
    }
}

pub struct ContactClient {
    client: Client,
    base_url: String,
    forwarded_for: Option<String>,
}

impl ContactClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            forwarded_for: None,
        }
    }

    /// Send submissions as if relayed for `address`.
    pub fn forwarded_for(mut self, address: &str) -> Self {
        self.forwarded_for = Some(address.to_string());
        self
    }

    /// Submit a contact form.
    pub async fn submit(&self, form: &ContactForm) -> Result<SubmitOutcome, Box<dyn std::error::Error>> {
        let mut req = self
            .client
            .post(format!("{}/api/contact", self.base_url))
            .json(form);
        if let Some(addr) = &self.forwarded_for {
            req = req.header("x-forwarded-for", addr);
        }

        let resp = req.send().await?;
        let status = resp.status();
        let text = resp.text().await?;

        if status.is_success() {
            let ack: AckBody = serde_json::from_str(&text)?;
            Ok(SubmitOutcome::Accepted { message: ack.message })
        } else {
            let error = serde_json::from_str::<ErrorBody>(&text)
                .map(|b| b.error)
                .unwrap_or(text);
            Ok(SubmitOutcome::Rejected {
                status: status.as_u16(),
                error,
            })
        }
    }

    /// Fetch the health document.
    pub async fn health(&self) -> Result<serde_json::Value, reqwest::Error> {
        self.client
            .get(format!("{}/health", self.base_url))
            .send()
            .await?
            .json()
            .await
    }
}
