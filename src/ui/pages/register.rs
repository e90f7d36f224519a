//! Register page component
//!
//! Reads the referral code from `/register/:code` or `?ref=code`.

use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_params_map, use_query_map};

use super::login::AuthPageShell;
use crate::core::session::HOME_ROUTE;
use crate::ui::auth::{RegisterForm, use_auth_context};

/// Referral code from the path segment, falling back to the query string
fn referral_code(path: Option<String>, query: Option<String>) -> Option<String> {
    path.or(query)
        .map(|code| code.trim().to_string())
        .filter(|code| !code.is_empty())
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let auth = use_auth_context();
    let navigate = use_navigate();
    let params = use_params_map();
    let query = use_query_map();

    let referral = referral_code(
        params.with_untracked(|p| p.get("code")),
        query.with_untracked(|q| q.get("ref")),
    );

    // Signed in, whether by registering or from an earlier session
    Effect::new(move |_| {
        if auth.is_authenticated() {
            navigate(HOME_ROUTE, Default::default());
        }
    });

    view! {
        <AuthPageShell>
            <RegisterForm referral=referral/>
        </AuthPageShell>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_referral_code_sources() {
        assert_eq!(
            referral_code(Some("BRAVO2".into()), Some("OTHER".into())),
            Some("BRAVO2".to_string())
        );
        assert_eq!(
            referral_code(None, Some(" BRAVO2 ".into())),
            Some("BRAVO2".to_string())
        );
        assert_eq!(referral_code(None, Some("  ".into())), None);
        assert_eq!(referral_code(None, None), None);
    }
}
