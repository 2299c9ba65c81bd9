//! Contact form handling.
//!
//! Submission is simulated: after a fixed delay the form always reports
//! success and resets. The only rejection is a missing required field.

use std::time::Duration;

use log::info;
use metrics::increment_counter;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when submitting the contact form
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ContactError {
    #[error("Missing required field: {0}")]
    MissingField(ContactField),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactField {
    Name,
    Email,
    Message,
}

impl std::fmt::Display for ContactField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Name => write!(f, "name"),
            Self::Email => write!(f, "email"),
            Self::Message => write!(f, "message"),
        }
    }
}

/// Contents of the contact form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

impl ContactForm {
    /// Every field must be present; content is not inspected further.
    /// Only the email is trimmed, the way an email input strips whitespace.
    pub fn validate(&self) -> Result<(), ContactError> {
        let fields = [
            (ContactField::Name, self.name.as_str()),
            (ContactField::Email, self.email.trim()),
            (ContactField::Message, self.message.as_str()),
        ];
        for (field, value) in fields {
            if value.is_empty() {
                return Err(ContactError::MissingField(field));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmitStatus {
    Success,
    // never produced; submission cannot fail
    Error,
}

/// State of one contact form
#[derive(Debug, Clone)]
pub struct ContactSession {
    form: ContactForm,
    status: Option<SubmitStatus>,
    submit_delay: Duration,
}

impl ContactSession {
    pub fn new(submit_delay: Duration) -> Self {
        Self {
            form: ContactForm::default(),
            status: None,
            submit_delay,
        }
    }

    pub fn with_form(submit_delay: Duration, form: ContactForm) -> Self {
        Self {
            form,
            ..Self::new(submit_delay)
        }
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn status(&self) -> Option<SubmitStatus> {
        self.status
    }

    /// Submit the form: wait the simulated delay, then report success and
    /// clear every field.
    pub async fn submit(&mut self) -> Result<SubmitStatus, ContactError> {
        self.form.validate()?;

        tokio::time::sleep(self.submit_delay).await;

        info!("Contact form submitted by {} <{}>", self.form.name, self.form.email);
        increment_counter!("contact_submissions_total");
        self.status = Some(SubmitStatus::Success);
        self.form = ContactForm::default();
        Ok(SubmitStatus::Success)
    }
}
