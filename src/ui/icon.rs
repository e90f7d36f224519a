use leptos::prelude::*;

#[component]
pub fn Icon(
    /// Icon name (file stem under /icons)
    name: &'static str,
    /// CSS classes
    #[prop(default = "w-5 h-5")]
    class: &'static str,
) -> impl IntoView {
    let icon_path = format!("/icons/{}.svg", name);

    view! {
        <img
            src=icon_path
            class=class
            alt=name
            draggable=false
        />
    }
}

/// Icon names shipped in `public/icons`
pub mod icons {
    pub const ALERT_CIRCLE: &str = "alert-circle";
    pub const INFORMATION_CIRCLE: &str = "information-circle";
    pub const LOADER: &str = "loader";
    pub const X: &str = "x";
    pub const EYE: &str = "eye";
    pub const EYE_CLOSED: &str = "eye-closed";
    pub const TRASH: &str = "trash";
    pub const PLUS: &str = "plus";
    pub const CHEVRON_RIGHT: &str = "chevron-right";
    pub const HOME: &str = "home";
    pub const CALENDAR: &str = "calendar";
    pub const UNITS: &str = "users";
    pub const CLIPBOARD: &str = "clipboard";
    pub const CREDIT_CARD: &str = "credit-card";
    pub const LOGOUT: &str = "logout";
}

#[cfg(test)]
mod tests {
    use super::icons;
    use std::path::Path;

    #[test]
    fn test_every_icon_ships_an_svg() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("public/icons");
        for name in [
            icons::ALERT_CIRCLE,
            icons::INFORMATION_CIRCLE,
            icons::LOADER,
            icons::X,
            icons::EYE,
            icons::EYE_CLOSED,
            icons::TRASH,
            icons::PLUS,
            icons::CHEVRON_RIGHT,
            icons::HOME,
            icons::CALENDAR,
            icons::UNITS,
            icons::CLIPBOARD,
            icons::CREDIT_CARD,
            icons::LOGOUT,
        ] {
            let file = dir.join(format!("{}.svg", name));
            assert!(file.is_file(), "missing {}", file.display());
        }
    }
}
