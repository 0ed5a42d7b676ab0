//! Scan Dashboard Browser Behaviors

mod app;
mod behaviors;
mod dom;
mod exports;

fn main() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();

    app::run_when_ready();
}
