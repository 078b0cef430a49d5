//! Login and signup page generation

use maud::{Markup, html};

use crate::components::feedback::form_message;
use crate::components::layout::{PageContext, page_wrapper};
use crate::session::{Route, SIGNUP_COMPLETE};

/// Generates the login or signup form.
///
/// `message` is what the previous auth action left for this page; the
/// sign-up confirmation is styled as a success, anything else as an error.
/// Any route other than [`Route::Signup`] renders the login form.
pub fn generate(ctx: &PageContext<'_>, route: Route, message: Option<&str>) -> Markup {
    let signup = route == Route::Signup;
    let (title, heading, lede, submit) = if signup {
        ("Sign up", "Create an account", "It's free.", "Sign up")
    } else {
        (
            "Log in",
            "Welcome back",
            "Enter your details to access your account.",
            "Log in",
        )
    };
    let success = message == Some(SIGNUP_COMPLETE);

    page_wrapper(
        ctx,
        title,
        &["assets/account.css"],
        html! {
            header class="account-bar" {
                a href=(ctx.href(Route::Home.path())) class="brand" {
                    span class="brand-mark" { "D" }
                    span class="brand-name" { (ctx.site_title) }
                }
            }

            main class="account-page" {
                div class="account-card" {
                    h1 { (heading) }
                    p class="account-lede" { (lede) }

                    form class="account-form" method="post"
                        action=(if signup { "signup" } else { "login" }) {
                        label {
                            "Email"
                            input type="email" name="email" placeholder="name@company.com" required;
                        }
                        label {
                            "Password"
                            input type="password" name="password" placeholder="••••••••"
                                minlength="6" required;
                        }
                        button type="submit" class="button button-primary" { (submit) }
                        (form_message(message, success))
                    }

                    p class="account-switch" {
                        @if signup {
                            "Already have an account? "
                            a href=(ctx.href(Route::Login.path())) { "Log in" }
                        } @else {
                            "Don't have an account? "
                            a href=(ctx.href(Route::Signup.path())) { "Sign up for free" }
                        }
                    }
                }
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::INVALID_CREDENTIALS;

    #[test]
    fn test_login_with_error_message() {
        // Arrange
        let ctx = PageContext::new("Devlog", None);

        // Act
        let html = generate(&ctx, Route::Login, Some(INVALID_CREDENTIALS)).into_string();

        // Assert
        assert!(html.contains("Welcome back"));
        assert!(html.contains("form-error"));
        assert!(html.contains(INVALID_CREDENTIALS));
        assert!(html.contains("href=\"signup.html\""));
    }

    #[test]
    fn test_login_after_signup_is_success() {
        let ctx = PageContext::new("Devlog", None);

        let html = generate(&ctx, Route::Login, Some(SIGNUP_COMPLETE)).into_string();

        assert!(html.contains("form-success"));
    }

    #[test]
    fn test_signup_page() {
        let ctx = PageContext::new("Devlog", None);

        let html = generate(&ctx, Route::Signup, None).into_string();

        assert!(html.contains("Create an account"));
        assert!(html.contains("<title>Sign up - Devlog</title>"));
        assert!(!html.contains("form-message"));
    }
}
