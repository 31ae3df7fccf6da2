//! Outbound mail abstraction and message templates.
//!
//! Auth flows hand finished messages to a [`Mailer`]; the implementation
//! decides how to deliver them. The default sender logs the message, which
//! keeps local development and tests free of SMTP infrastructure.

use anyhow::Result;
use tracing::info;

/// A fully rendered outbound message.
#[derive(Debug, Clone)]
pub struct OutboundMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Mail delivery abstraction.
pub trait Mailer: Send + Sync {
    /// Deliver a message or return an error.
    fn send(&self, mail: &OutboundMail) -> Result<()>;
}

/// Local dev sender that logs instead of delivering.
#[derive(Debug, Clone, Default)]
pub struct LogMailer;

impl Mailer for LogMailer {
    fn send(&self, mail: &OutboundMail) -> Result<()> {
        info!(to = %mail.to, subject = %mail.subject, "mail send (log only)");
        Ok(())
    }
}

/// Password-reset email with the tokenized reset link.
pub fn password_reset_mail(to: &str, name: &str, reset_link: &str) -> OutboundMail {
    OutboundMail {
        to: to.to_string(),
        subject: "[routed] Reset Your Password".to_string(),
        body: format!(
            "Hi {name},\n\n\
             We received a request to reset your password.\n\
             Click the link below to choose a new password:\n\n\
             {reset_link}\n\n\
             This link will expire in 15 minutes.\n\
             If you didn't request a password reset, you can safely ignore this email.\n\n\
             Thanks,\nThe routed team."
        ),
    }
}

/// One-time login code for drivers.
pub fn login_otp_mail(to: &str, name: &str, code: &str) -> OutboundMail {
    OutboundMail {
        to: to.to_string(),
        subject: format!("[routed] {code} is your OTP code for login"),
        body: format!(
            "Hi {name},\n\
             Your One-Time Password for login is:\n\n\
             {code}\n\n\
             This code is valid for the next 5 minutes.\n\
             Please do not share this code with anyone. If you did not request \
             this code, please ignore this email.\n\n\
             Thanks,\nThe routed team."
        ),
    }
}
