use std::sync::Arc;
use std::time::Duration;

use iced::widget::{Column, Container, Text};
use iced::{Application, Command, Element, Length, Theme};
use tokio::sync::Mutex;

use crate::client::gui::views;
use crate::client::models::app_state::{DashAppState, Screen};
use crate::client::models::messages::Message;
use crate::client::services::api_client::ApiClient;
use crate::client::services::session::SessionManager;
use crate::client::utils::session_store::KeyringStore;
use crate::config::ClientConfig;

pub struct FraudLensApp {
    pub state: DashAppState,
    pub session: Arc<Mutex<SessionManager>>,
    pub api: Arc<ApiClient>,
}

impl Application for FraudLensApp {
    type Message = Message;
    type Theme = Theme;
    type Executor = iced::executor::Default;
    type Flags = ();

    fn new(_flags: ()) -> (Self, Command<Message>) {
        let config = ClientConfig::from_env();
        let api = Arc::new(
            ApiClient::new(
                config.api_base_url.clone(),
                Duration::from_secs(config.request_timeout_secs),
            )
            .expect("failed to build HTTP client"),
        );
        let store = KeyringStore::new(config.data_dir.clone());
        let session = Arc::new(Mutex::new(SessionManager::new(api.clone(), Box::new(store))));

        let app = FraudLensApp {
            state: DashAppState::new(config),
            session: session.clone(),
            api,
        };

        // Startup session check: try to restore a persisted session before
        // showing anything beyond the splash.
        let cmd = Command::perform(
            async move {
                let mut guard = session.lock().await;
                let authenticated = guard.restore().await;
                Message::SessionChecked {
                    authenticated,
                    email: guard.current_email(),
                }
            },
            |m| m,
        );

        (app, cmd)
    }

    fn title(&self) -> String {
        "FraudLens".to_string()
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        self.state.update(message, &self.session, &self.api)
    }

    fn view(&self) -> Element<Message> {
        match self.state.screen {
            Screen::CheckingSession => checking_session_view(),
            Screen::Login => views::login::view(&self.state),
            Screen::Onboarding => views::onboarding::view(&self.state),
            Screen::Dashboard => views::dashboard::view(&self.state),
            Screen::AuditLog => views::audit_log::view(&self.state),
            Screen::Operations => views::operations::view(&self.state),
        }
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn checking_session_view() -> Element<'static, Message> {
    let content = Column::new()
        .spacing(12)
        .align_items(iced::Alignment::Center)
        .push(Text::new("FraudLens").size(36))
        .push(Text::new("Checking session...").size(16));

    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x()
        .center_y()
        .style(iced::theme::Container::Custom(Box::new(
            |_: &Theme| iced::widget::container::Appearance {
                background: Some(iced::Background::Color(iced::Color::from_rgb(
                    0.06, 0.07, 0.18,
                ))),
                text_color: Some(iced::Color::WHITE),
                ..Default::default()
            },
        )))
        .into()
}
