use iced::widget::{Button, Column, Container, Row, Space, Text};
use iced::{Alignment, Color, Element, Font, Length};

use crate::client::gui::views::dashboard::header;
use crate::client::gui::views::logger::logger_view;
use crate::client::models::app_state::DashAppState;
use crate::client::models::messages::Message;
use crate::client::models::types::AuditEntry;

// Consistent color palette with dashboard
const BG_MAIN: Color = Color::from_rgb(0.06, 0.07, 0.18);
const CARD_BG: Color = Color::from_rgb(0.18, 0.19, 0.36);
const INPUT_BG: Color = Color::from_rgb(0.12, 0.13, 0.26);
const TEXT_PRIMARY: Color = Color::WHITE;
const TEXT_SECONDARY: Color = Color::from_rgb(0.7, 0.7, 0.7);
const ERROR_COLOR: Color = Color::from_rgb(1.0, 0.3, 0.3);

const EMOJI_FONT: Font = Font::with_name("Segoe UI Emoji");
const BOLD_FONT: Font = Font {
    family: iced::font::Family::SansSerif,
    weight: iced::font::Weight::Bold,
    ..Font::DEFAULT
};

fn bg_main_appearance(_: &iced::Theme) -> iced::widget::container::Appearance {
    iced::widget::container::Appearance {
        background: Some(iced::Background::Color(BG_MAIN)),
        text_color: Some(TEXT_PRIMARY),
        border: iced::Border {
            width: 0.0,
            color: Color::TRANSPARENT,
            radius: 0.0.into(),
        },
        shadow: iced::Shadow {
            offset: iced::Vector::new(0.0, 0.0),
            blur_radius: 0.0,
            color: Color::TRANSPARENT,
        },
    }
}

fn card_appearance(_: &iced::Theme) -> iced::widget::container::Appearance {
    iced::widget::container::Appearance {
        background: Some(iced::Background::Color(CARD_BG)),
        text_color: Some(TEXT_PRIMARY),
        border: iced::Border {
            width: 0.0,
            color: Color::TRANSPARENT,
            radius: 16.0.into(),
        },
        shadow: iced::Shadow {
            offset: iced::Vector::new(0.0, 4.0),
            blur_radius: 12.0,
            color: Color::from_rgba(0.0, 0.0, 0.0, 0.3),
        },
    }
}

fn entry_appearance(_: &iced::Theme) -> iced::widget::container::Appearance {
    iced::widget::container::Appearance {
        background: Some(iced::Background::Color(INPUT_BG)),
        text_color: Some(TEXT_PRIMARY),
        border: iced::Border {
            width: 1.0,
            color: Color::from_rgb(0.2, 0.2, 0.3),
            radius: 8.0.into(),
        },
        shadow: iced::Shadow {
            offset: iced::Vector::new(0.0, 0.0),
            blur_radius: 0.0,
            color: Color::TRANSPARENT,
        },
    }
}

fn action_emoji(action: &str) -> &'static str {
    let lower = action.to_lowercase();
    if lower.contains("upload") {
        "📤"
    } else if lower.contains("fraud") || lower.contains("detect") {
        "🚨"
    } else if lower.contains("clean") {
        "🧹"
    } else if lower.contains("export") {
        "📄"
    } else if lower.contains("login") || lower.contains("logout") {
        "👤"
    } else {
        "📋"
    }
}

fn audit_row(entry: &AuditEntry) -> Element<'_, Message> {
    let mut detail_column = Column::new().spacing(4).width(Length::Fill).push(
        Row::new()
            .spacing(8)
            .align_items(Alignment::Center)
            .push(Text::new(action_emoji(&entry.action)).font(EMOJI_FONT).size(16))
            .push(Text::new(&entry.action).font(BOLD_FONT).size(14).style(TEXT_PRIMARY)),
    );

    if let Some(details) = &entry.details {
        detail_column = detail_column.push(Text::new(details).size(13).style(TEXT_SECONDARY));
    }
    if let Some(transaction_id) = &entry.transaction_id {
        detail_column = detail_column.push(
            Text::new(format!("Transaction: {}", transaction_id))
                .size(12)
                .style(TEXT_SECONDARY),
        );
    }

    let meta_column = Column::new()
        .spacing(4)
        .align_items(Alignment::End)
        .push(Text::new(&entry.timestamp).size(12).style(TEXT_SECONDARY))
        .push(
            Text::new(entry.user.as_deref().unwrap_or("system"))
                .size(12)
                .style(TEXT_SECONDARY),
        );

    Container::new(
        Row::new()
            .spacing(12)
            .align_items(Alignment::Center)
            .push(detail_column)
            .push(meta_column),
    )
    .padding([12, 16])
    .width(Length::Fill)
    .style(iced::theme::Container::Custom(Box::new(entry_appearance)))
    .into()
}

pub fn view(state: &DashAppState) -> Element<Message> {
    let fetch = state.audit.state();

    let refresh_button = if state.audit.is_loading() {
        Button::new(
            Row::new()
                .spacing(6)
                .align_items(Alignment::Center)
                .push(Text::new("⏳").font(EMOJI_FONT).size(14))
                .push(Text::new("Refreshing...").size(14).style(TEXT_SECONDARY)),
        )
        .style(iced::theme::Button::Secondary)
        .padding([10, 14])
    } else {
        Button::new(
            Row::new()
                .spacing(6)
                .align_items(Alignment::Center)
                .push(Text::new("🔄").font(EMOJI_FONT).size(14))
                .push(Text::new("Refresh").font(BOLD_FONT).size(14)),
        )
        .style(iced::theme::Button::Primary)
        .on_press(Message::RefreshAuditLog)
        .padding([10, 14])
    };

    let section_header = Row::new()
        .align_items(Alignment::Center)
        .push(
            Text::new("Audit Log")
                .font(BOLD_FONT)
                .size(20)
                .style(TEXT_PRIMARY)
                .width(Length::Fill),
        )
        .push(refresh_button);

    let mut body = Column::new().spacing(16).padding([16, 24]).push(section_header);

    if let Some(error) = &fetch.error {
        body = body.push(
            Container::new(
                Row::new()
                    .spacing(8)
                    .align_items(Alignment::Center)
                    .push(Text::new("❌").font(EMOJI_FONT).size(16))
                    .push(Text::new(&error.message).size(14).style(ERROR_COLOR)),
            )
            .padding(16)
            .width(Length::Fill)
            .style(iced::theme::Container::Custom(Box::new(card_appearance))),
        );
    }

    match &fetch.data {
        Some(entries) if entries.is_empty() => {
            body = body.push(
                Container::new(
                    Text::new("No recorded activity yet.")
                        .size(14)
                        .style(TEXT_SECONDARY),
                )
                .padding(24)
                .width(Length::Fill)
                .center_x(),
            );
        }
        Some(entries) => {
            for entry in entries {
                body = body.push(audit_row(entry));
            }
        }
        None if state.audit.is_loading() => {
            body = body.push(
                Container::new(
                    Row::new()
                        .spacing(8)
                        .align_items(Alignment::Center)
                        .push(Text::new("⏳").font(EMOJI_FONT).size(16))
                        .push(Text::new("Loading audit log...").size(14).style(TEXT_SECONDARY)),
                )
                .padding(24)
                .width(Length::Fill)
                .center_x(),
            );
        }
        None => {}
    }

    let logger_bar: Element<Message> = if !state.logger.is_empty() {
        Container::new(logger_view(&state.logger))
            .width(Length::Fill)
            .padding([8, 12, 0, 12])
            .into()
    } else {
        Space::new(Length::Fill, Length::Fixed(0.0)).into()
    };

    let main_content = Column::new()
        .push(logger_bar)
        .push(header(state))
        .push(
            iced::widget::scrollable(body)
                .width(Length::Fill)
                .height(Length::Fill),
        )
        .width(Length::Fill)
        .height(Length::Fill);

    Container::new(main_content)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(iced::theme::Container::Custom(Box::new(bg_main_appearance)))
        .into()
}
