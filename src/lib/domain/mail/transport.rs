//! Mail transport capability

use async_trait::async_trait;

#[cfg(test)]
use mockall::mock;

use super::errors::DeliveryError;
use super::message::Mail;

/// Delivery capability for composed mails.
///
/// A transport receives a fully composed [`Mail`] and is responsible for
/// delivery; the mail's accessors expose everything a transport needs
/// (title, final bodies, from, recipients, attachments, encoding). One
/// hand-off per mail: the composition side never retries, queues or
/// batches.
#[async_trait]
pub trait MailTransport: Clone + Send + Sync + 'static {
    /// Sends the given mail.
    ///
    /// # Errors
    /// Fails with [`DeliveryError`] when the mail could not be delivered.
    async fn send(&self, mail: &Mail) -> Result<(), DeliveryError>;
}

#[cfg(test)]
mock! {
    pub MailTransport {}

    impl Clone for MailTransport {
        fn clone(&self) -> Self;
    }

    #[async_trait]
    impl MailTransport for MailTransport {
        async fn send(&self, mail: &Mail) -> Result<(), DeliveryError>;
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[tokio::test]
    async fn test_transport_receives_the_composed_mail() -> TestResult {
        let mut transport = MockMailTransport::new();

        transport
            .expect_send()
            .times(1)
            .withf(|mail| mail.title() == "Welcome")
            .returning(|_| Ok(()));

        let mut mail = Mail::new("Welcome");
        mail.set_body_html("<p>Hi</p>");

        transport.send(&mail).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_delivery_failure_propagates() {
        let mut transport = MockMailTransport::new();

        transport
            .expect_send()
            .times(1)
            .returning(|_| Err(DeliveryError::SendError));

        let mail = Mail::new("Welcome");

        let result = transport.send(&mail).await;

        assert!(matches!(result.unwrap_err(), DeliveryError::SendError));
    }
}
