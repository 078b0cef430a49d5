//! Status toast and inline form messages

use maud::{Markup, html};

use crate::state::{StatusKind, StatusMessage};

/// Editor toast; renders nothing without a message.
pub fn status_toast(status: Option<&StatusMessage>) -> Markup {
    html! {
        @if let Some(status) = status {
            @let class = match status.kind {
                StatusKind::Success => "toast toast-success",
                StatusKind::Error => "toast toast-error",
            };
            div class=(class) role="status" {
                @match status.kind {
                    StatusKind::Success => { i class="ph ph-check-circle" {} }
                    StatusKind::Error => { i class="ph ph-warning-circle" {} }
                }
                " " (status.text)
            }
        }
    }
}

/// Message under an account form, e.g. after a failed sign in.
pub fn form_message(message: Option<&str>, success: bool) -> Markup {
    let class = if success {
        "form-message form-success"
    } else {
        "form-message form-error"
    };
    html! {
        @if let Some(text) = message {
            p class=(class) role="alert" { (text) }
        }
    }
}
