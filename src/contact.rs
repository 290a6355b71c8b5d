// Contact form.
// Client-side validation and a simulated submission; nothing is delivered.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info};

use crate::config::ContactConfig;
use crate::error::ContactError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    pub fn new(name: &str, email: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        }
    }

    /// Every field must be non-blank and the email must look like one.
    pub fn validate(&self) -> Result<(), ContactError> {
        for (field, value) in [
            ("name", &self.name),
            ("email", &self.email),
            ("message", &self.message),
        ] {
            if value.trim().is_empty() {
                return Err(ContactError::MissingField(field));
            }
        }

        match self.email.trim().split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
            _ => Err(ContactError::InvalidEmail),
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormStatus {
    #[default]
    Idle,
    Submitting,
    Success,
    Error,
}

/// Pretends to send the form after a fixed delay, then resets the status.
pub struct ContactSubmitter {
    submit_delay: Duration,
    reset_delay: Duration,
    status: Arc<watch::Sender<FormStatus>>,
    /// Bumped when a submission starts; a reset only applies to the latest one.
    generation: Arc<AtomicU64>,
}

impl ContactSubmitter {
    pub fn new(submit_delay: Duration, reset_delay: Duration) -> Self {
        let (status, _) = watch::channel(FormStatus::Idle);
        Self {
            submit_delay,
            reset_delay,
            status: Arc::new(status),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn from_config(config: &ContactConfig) -> Self {
        Self::new(
            Duration::from_millis(config.submit_delay_ms),
            Duration::from_millis(config.reset_delay_ms),
        )
    }

    pub fn status(&self) -> FormStatus {
        *self.status.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<FormStatus> {
        self.status.subscribe()
    }

    /// Run one simulated submission and return its result status.
    ///
    /// The form is cleared on success. The status returns to `Idle` after the
    /// reset delay unless another submission has started by then. A call made
    /// while a submission is in flight is ignored and returns `Submitting`.
    pub async fn submit(&self, form: &mut ContactForm) -> FormStatus {
        let mut generation = 0;
        let started = self.status.send_if_modified(|status| {
            if *status == FormStatus::Submitting {
                return false;
            }
            *status = FormStatus::Submitting;
            generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            true
        });
        if !started {
            debug!("submission already in flight");
            return FormStatus::Submitting;
        }

        tokio::time::sleep(self.submit_delay).await;

        let result = match form.validate() {
            Ok(()) => {
                info!("contact form submitted");
                form.clear();
                FormStatus::Success
            }
            Err(e) => {
                debug!(error = %e, "contact form rejected");
                FormStatus::Error
            }
        };
        self.status.send_replace(result);

        let status = Arc::clone(&self.status);
        let latest = Arc::clone(&self.generation);
        let reset_delay = self.reset_delay;
        tokio::spawn(async move {
            tokio::time::sleep(reset_delay).await;
            status.send_if_modified(|current| {
                if latest.load(Ordering::SeqCst) == generation && *current == result {
                    *current = FormStatus::Idle;
                    true
                } else {
                    false
                }
            });
        });

        result
    }
}
