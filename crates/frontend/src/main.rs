use docuchat_frontend::{App, logging};

fn main() {
    console_error_panic_hook::set_once();
    logging::init();
    yew::Renderer::<App>::new().render();
}
