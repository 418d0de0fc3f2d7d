// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! Recording mailer double.

use async_trait::async_trait;
use contact_relay::email::{DispatchError, Mailer, OutboundEmail};
use std::sync::Mutex;
use std::time::Duration;

/// Records every email it is asked to send.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<OutboundEmail>>,
    /// Zero-based send attempts that should fail
    fail_attempts: Vec<usize>,
    /// Delay before every send
    delay: Option<Duration>,
}

impl RecordingMailer {
    /// Fail the given zero-based send attempts with a provider error.
    pub fn failing_on(attempts: &[usize]) -> Self {
        Self {
            fail_attempts: attempts.to_vec(),
            ..Default::default()
        }
    }

    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), DispatchError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let attempt = {
            let mut sent = self.sent.lock().unwrap();
            sent.push(email.clone());
            sent.len() - 1
        };

        if self.fail_attempts.contains(&attempt) {
            return Err(DispatchError::Provider {
                status: 422,
                body: "The `from` domain is not verified".into(),
            });
        }
        Ok(())
    }
}
