use crate::auth::SessionProvider;
use crate::components::Layout;
use crate::routes::{Route, switch};
use yew::prelude::*;
use yew_router::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <BrowserRouter>
            <SessionProvider>
                <Layout>
                    <Switch<Route> render={switch} />
                </Layout>
            </SessionProvider>
        </BrowserRouter>
    }
}
