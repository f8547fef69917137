//! Contact form handler
//!
//! Best effort end to end: the message is stored if the store is up and
//! mailed if SMTP is configured, but the user always sees the success
//! flash. Neither collaborator is allowed to block or fail the flow.

use super::flash::flash;
use crate::AppState;
use axum::{
    extract::{Form, State},
    response::Redirect,
};
use axum_extra::extract::cookie::CookieJar;
use pitchside_core::ContactMessage;
use serde::Deserialize;
use tracing::info;

/// Contact form fields
#[derive(Debug, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Contact form submission endpoint
pub async fn submit_contact(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<ContactForm>,
) -> (CookieJar, Redirect) {
    info!(name = %form.name, "Contact form submitted");

    let message = ContactMessage::new(form.name, form.email, form.message);

    // Save to the contact store; a storage failure is logged and swallowed.
    if let Err(e) = state.contacts.insert(message.clone()).await {
        e.log();
    }

    // Send the notification email (if configured); also best-effort.
    state
        .mailer
        .send_contact_notification(&message.name, &message.email, &message.message)
        .await;

    let jar = jar.add(flash(
        "success",
        "Thanks for reaching out! We'll get back to you soon.",
    ));
    (jar, Redirect::to("/contact"))
}
