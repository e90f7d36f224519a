use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::components::{ParentRoute, Redirect, Route, Router, Routes};
use leptos_router::path;

use crate::core::session::HOME_ROUTE;
use crate::ui::auth::provide_auth_context;
use crate::ui::pages::{
    AarsPage, DashboardPage, EventsAdminPage, LoginPage, NewAarPage, NotFoundPage, PricingPage,
    RegisterPage, UnitsPage,
};
use crate::ui::{AppLayout, NotificationsContainer, provide_notifications, provide_query_client};

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone() />
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();

    // Order matters: auth reads the other two
    provide_notifications();
    provide_query_client();
    provide_auth_context();

    view! {
        // id=leptos means cargo-leptos will hot-reload this stylesheet
        <Stylesheet id="leptos" href="/pkg/afteraction.css"/>

        <Title text="AfterAction - After-Action Reviews"/>

        <NotificationsContainer/>

        <Router>
            <Routes fallback=|| view! { <NotFoundPage/> }>
                <Route path=path!("/") view=|| view! { <Redirect path=HOME_ROUTE/> }/>
                <Route path=path!("/login") view=LoginPage/>
                <Route path=path!("/register") view=RegisterPage/>
                <Route path=path!("/register/:code") view=RegisterPage/>
                <ParentRoute path=path!("") view=AppLayout>
                    <Route path=path!("/dashboard") view=DashboardPage/>
                    <Route path=path!("/events") view=EventsAdminPage/>
                    <Route path=path!("/units") view=UnitsPage/>
                    <Route path=path!("/aars") view=AarsPage/>
                    <Route path=path!("/aars/new") view=NewAarPage/>
                    <Route path=path!("/pricing") view=PricingPage/>
                </ParentRoute>
            </Routes>
        </Router>
    }
}
