use iced::widget::{Container, Row, Space, Text};
use iced::{Alignment, Color, Element, Font, Length};

use crate::client::models::messages::Message;

// Consistent color palette with the other views
const BAR_BG: Color = Color::from_rgb(0.12, 0.13, 0.26);
const SUCCESS_COLOR: Color = Color::from_rgb(0.0, 0.7, 0.3);
const ERROR_COLOR: Color = Color::from_rgb(1.0, 0.3, 0.3);
const INFO_COLOR: Color = Color::from_rgb(0.2, 0.6, 1.0);
const WARNING_COLOR: Color = Color::from_rgb(1.0, 0.8, 0.0);

const EMOJI_FONT: Font = Font::with_name("Segoe UI Emoji");
const BOLD_FONT: Font = Font {
    family: iced::font::Family::SansSerif,
    weight: iced::font::Weight::Bold,
    ..Font::DEFAULT
};

#[derive(Debug, Clone)]
pub enum LogLevel {
    Success,
    Error,
    Info,
    Warning,
}

impl LogLevel {
    fn accent(&self) -> Color {
        match self {
            LogLevel::Success => SUCCESS_COLOR,
            LogLevel::Error => ERROR_COLOR,
            LogLevel::Info => INFO_COLOR,
            LogLevel::Warning => WARNING_COLOR,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            LogLevel::Success => "Success",
            LogLevel::Error => "Error",
            LogLevel::Info => "Info",
            LogLevel::Warning => "Warning",
        }
    }

    fn emoji(&self) -> &'static str {
        match self {
            LogLevel::Success => "✅",
            LogLevel::Error => "❌",
            LogLevel::Info => "ℹ️",
            LogLevel::Warning => "⚠️",
        }
    }
}

/// One entry in the transient status feed shown above the active screen.
#[derive(Debug, Clone)]
pub struct LogMessage {
    pub level: LogLevel,
    pub message: String,
}

/// Renders the newest entry as a dark bar with a level-colored border and
/// label; older entries are not stacked. Empty feed renders nothing.
pub fn logger_view(messages: &[LogMessage]) -> Element<'_, Message> {
    let Some(log) = messages.last() else {
        return Space::new(Length::Fill, Length::Fixed(0.0)).into();
    };
    let accent = log.level.accent();

    Container::new(
        Row::new()
            .spacing(12)
            .align_items(Alignment::Center)
            .push(Text::new(log.level.emoji()).font(EMOJI_FONT).size(16))
            .push(
                Text::new(log.level.label())
                    .font(BOLD_FONT)
                    .size(14)
                    .style(accent),
            )
            .push(Text::new(&log.message).size(14).style(Color::WHITE)),
    )
    .padding([10, 16])
    .width(Length::Fill)
    .style(iced::theme::Container::Custom(Box::new(
        move |_: &iced::Theme| iced::widget::container::Appearance {
            background: Some(iced::Background::Color(BAR_BG)),
            text_color: Some(Color::WHITE),
            border: iced::Border {
                width: 1.0,
                color: accent,
                radius: 8.0.into(),
            },
            shadow: iced::Shadow {
                offset: iced::Vector::new(0.0, 2.0),
                blur_radius: 8.0,
                color: Color::from_rgba(0.0, 0.0, 0.0, 0.25),
            },
        },
    )))
    .into()
}
