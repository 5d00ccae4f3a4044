//! Message bodies sent for an accepted submission.

use crate::config::{BusinessConfig, NotificationConfig};
use crate::intake::ValidSubmission;
use crate::notify::catalog::service_label;
use crate::notify::email::EmailMessage;
use crate::notify::sms::SmsMessage;

const NOT_SPECIFIED: &str = "Not specified";
const NO_MESSAGE: &str = "No message provided";

/// Builds the outbound messages from business settings.
#[derive(Debug, Clone)]
pub struct Templates {
    business_name: String,
    business_phone_display: String,
    business_email: String,
    business_sms: String,
    from_email: String,
}

impl Templates {
    pub fn new(business: &BusinessConfig, notifications: &NotificationConfig) -> Self {
        Self {
            business_name: business.name.clone(),
            business_phone_display: business.phone.clone(),
            business_email: notifications.business_email.clone(),
            business_sms: notifications.business_phone.clone(),
            from_email: notifications.from_email.clone(),
        }
    }

    /// Lead details for the business inbox.
    pub fn contact_email(&self, sub: &ValidSubmission) -> EmailMessage {
        let html = format!(
            "<h2>New Contact Form Submission</h2>\n\
             <p><strong>Name:</strong> {name}</p>\n\
             <p><strong>Email:</strong> {email}</p>\n\
             <p><strong>Phone:</strong> {phone}</p>\n\
             <p><strong>Service:</strong> {service}</p>\n\
             <p><strong>Message:</strong></p>\n\
             <p>{message}</p>",
            name = sub.name,
            email = sub.email,
            phone = sub.phone,
            service = service_text(sub),
            message = sub.message().unwrap_or(NO_MESSAGE),
        );

        EmailMessage::new(
            self.business_email.clone(),
            format!("New Quote Request from {}", sub.name),
            html,
        )
        .with_from(self.from_email.clone())
    }

    /// Acknowledgment to the person who filled in the form.
    pub fn confirmation_email(&self, sub: &ValidSubmission) -> EmailMessage {
        let html = format!(
            "<h2>Thank You for Contacting {business}!</h2>\n\
             <p>Hi {name},</p>\n\
             <p>We've received your inquiry and will get back to you within 24 hours.</p>\n\
             <p>In the meantime, if you have any urgent questions, please call us at {phone}.</p>\n\
             <br>\n\
             <p>Best regards,</p>\n\
             <p>{business} Team</p>",
            business = self.business_name,
            name = sub.name,
            phone = self.business_phone_display,
        );

        EmailMessage::new(
            sub.email.clone(),
            format!("Thank You for Your Inquiry - {}", self.business_name),
            html,
        )
        .with_from(self.from_email.clone())
    }

    /// Short alert to the business phone. `None` when no number is configured.
    pub fn lead_sms(&self, sub: &ValidSubmission) -> Option<SmsMessage> {
        if self.business_sms.is_empty() {
            return None;
        }
        Some(SmsMessage {
            to: self.business_sms.clone(),
            body: format!(
                "New Lead!\nName: {}\nPhone: {}\nService: {}",
                sub.name,
                sub.phone,
                service_text(sub)
            ),
        })
    }

    pub fn customer_sms(&self, sub: &ValidSubmission) -> SmsMessage {
        SmsMessage {
            to: sub.phone.clone(),
            body: format!(
                "Hi {}! Thanks for contacting {}. We've received your inquiry and will call you back shortly. Questions? Call {}",
                sub.name, self.business_name, self.business_phone_display
            ),
        }
    }
}

fn service_text(sub: &ValidSubmission) -> &str {
    sub.service().map_or(NOT_SPECIFIED, service_label)
}
