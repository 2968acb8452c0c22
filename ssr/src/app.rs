use consts::APP_NAME;
use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::{
    components::{Route, Router, Routes},
    path,
};
use page::{
    account::{Login, Signup},
    logout::Logout,
    not_found::NotFound,
    root::RootPage,
    upload::UploadPage,
};
use state::session::SessionState;

/// Links the css bundle by the name cargo-leptos gave it, hash included
#[component]
fn AppStylesheet(options: LeptosOptions) -> impl IntoView {
    view! { <HashedStylesheet options id="leptos" /> }
}

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <AutoReload options=options.clone() />
                <HydrationScripts options=options.clone() />
                <AppStylesheet options />
                <MetaTags />
            </head>
            <body>
                <App />
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    provide_context(SessionState::new());

    view! {
        <Title text=APP_NAME />
        <Router>
            <main>
                <Routes fallback=|| view! { <NotFound /> }>
                    <Route path=path!("/") view=RootPage />
                    <Route path=path!("/login") view=Login />
                    <Route path=path!("/signup") view=Signup />
                    <Route path=path!("/logout") view=Logout />
                    <Route path=path!("/upload") view=UploadPage />
                </Routes>
            </main>
        </Router>
    }
}
