use iced::Application;

fn main() -> iced::Result {
    // load environment from .env (optional)
    let _ = dotenvy::dotenv();
    env_logger::init();
    fraudlens::client::gui::app::FraudLensApp::run(iced::Settings::default())
}
