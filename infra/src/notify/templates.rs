//! Message bodies for verification email and SMS

use super::EmailMessage;

pub const EMAIL_SUBJECT: &str = "Verify your Storefront email address";

/// Link the user follows to confirm their email address
pub fn verification_link(app_base_url: &str, token: &str) -> String {
    format!("{}/verify-email/{}", app_base_url.trim_end_matches('/'), token)
}

/// Render the verification email for a recipient
pub fn verification_email(
    to_email: &str,
    to_name: &str,
    app_base_url: &str,
    token: &str,
    expiry_minutes: i64,
) -> EmailMessage {
    let link = verification_link(app_base_url, token);
    let greeting = if to_name.trim().is_empty() {
        "Hello".to_string()
    } else {
        format!("Hello {}", to_name.trim())
    };
    let validity = describe_minutes(expiry_minutes);

    let html = format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <h2>{greeting},</h2>
  <p>Thanks for creating a Storefront account. Please confirm your email address by clicking the button below.</p>
  <p style="text-align: center; margin: 32px 0;">
    <a href="{link}" style="background-color: #2563eb; color: #ffffff; padding: 12px 24px; text-decoration: none; border-radius: 4px;">Verify email</a>
  </p>
  <p>Or paste this link into your browser:<br><a href="{link}">{link}</a></p>
  <p>This link expires in {validity}. If you did not create an account, you can ignore this email.</p>
</div>"#
    );

    let text = format!(
        "{greeting},\n\nThanks for creating a Storefront account. Confirm your email address by opening this link:\n\n{link}\n\nThis link expires in {validity}. If you did not create an account, you can ignore this email.\n"
    );

    EmailMessage {
        to_email: to_email.to_string(),
        to_name: Some(to_name.trim().to_string()).filter(|n| !n.is_empty()),
        subject: EMAIL_SUBJECT.to_string(),
        html,
        text,
    }
}

/// Render the verification SMS
pub fn verification_sms(code: &str, expiry_minutes: i64) -> String {
    format!(
        "Your Storefront verification code is: {}. It expires in {} minutes.",
        code, expiry_minutes
    )
}

fn describe_minutes(minutes: i64) -> String {
    if minutes >= 60 && minutes % 60 == 0 {
        let hours = minutes / 60;
        if hours == 1 {
            "1 hour".to_string()
        } else {
            format!("{} hours", hours)
        }
    } else if minutes == 1 {
        "1 minute".to_string()
    } else {
        format!("{} minutes", minutes)
    }
}
