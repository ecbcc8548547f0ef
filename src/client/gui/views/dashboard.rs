use iced::widget::{Button, Column, Container, Row, Space, Text};
use iced::{Alignment, Color, Element, Font, Length};

use crate::client::gui::views::logger::logger_view;
use crate::client::models::app_state::{DashAppState, Screen};
use crate::client::models::messages::Message;
use crate::client::models::types::Transaction;

// Consistent color palette with login and operations
const BG_MAIN: Color = Color::from_rgb(0.06, 0.07, 0.18);
const CARD_BG: Color = Color::from_rgb(0.18, 0.19, 0.36);
const INPUT_BG: Color = Color::from_rgb(0.12, 0.13, 0.26);
const ACCENT_COLOR: Color = Color::from_rgb(0.0, 0.7, 0.3);
const TEXT_PRIMARY: Color = Color::WHITE;
const TEXT_SECONDARY: Color = Color::from_rgb(0.7, 0.7, 0.7);
const FRAUD_COLOR: Color = Color::from_rgb(1.0, 0.3, 0.3);
const PENDING_COLOR: Color = Color::from_rgb(1.0, 0.8, 0.0);

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

fn header_appearance(_: &iced::Theme) -> iced::widget::container::Appearance {
    iced::widget::container::Appearance {
        background: Some(iced::Background::Color(INPUT_BG)),
        text_color: Some(TEXT_PRIMARY),
        border: iced::Border {
            width: 0.0,
            color: Color::TRANSPARENT,
            radius: 0.0.into(),
        },
        shadow: iced::Shadow {
            offset: iced::Vector::new(0.0, 2.0),
            blur_radius: 8.0,
            color: Color::from_rgba(0.0, 0.0, 0.0, 0.2),
        },
    }
}

fn row_appearance(_: &iced::Theme) -> iced::widget::container::Appearance {
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

fn nav_button(label: &str, target: Screen, current: &Screen) -> Button<'static, Message> {
    let active = *current == target;
    let text = if active {
        Text::new(label.to_string()).font(BOLD_FONT).size(14).style(TEXT_PRIMARY)
    } else {
        Text::new(label.to_string()).size(14).style(TEXT_SECONDARY)
    };
    let button = Button::new(text)
        .style(if active {
            iced::theme::Button::Primary
        } else {
            iced::theme::Button::Secondary
        })
        .padding([10, 16]);
    if active {
        button
    } else {
        button.on_press(Message::Navigate(target))
    }
}

/// Shared top bar: title, section navigation, logged-in user and logout.
pub fn header(state: &DashAppState) -> Element<'static, Message> {
    let title = Row::new()
        .spacing(8)
        .align_items(Alignment::Center)
        .push(Text::new("🔍").font(EMOJI_FONT).size(24))
        .push(Text::new("FraudLens").font(BOLD_FONT).size(24).style(TEXT_PRIMARY));

    let nav = Row::new()
        .spacing(8)
        .push(nav_button("Dashboard", Screen::Dashboard, &state.screen))
        .push(nav_button("Audit Log", Screen::AuditLog, &state.screen))
        .push(nav_button("Operations", Screen::Operations, &state.screen));

    let user_label = state.current_user.clone().unwrap_or_default();
    let logout_button = Button::new(
        Row::new()
            .spacing(6)
            .align_items(Alignment::Center)
            .push(Text::new("🚪").font(EMOJI_FONT).size(14))
            .push(Text::new("Logout").font(BOLD_FONT).size(14)),
    )
    .style(iced::theme::Button::Destructive)
    .on_press(Message::Logout)
    .padding([10, 14]);

    let header_row = Row::new()
        .spacing(16)
        .align_items(Alignment::Center)
        .push(title)
        .push(Space::new(Length::Fixed(24.0), Length::Fixed(0.0)))
        .push(nav)
        .push(Space::new(Length::Fill, Length::Fixed(0.0)))
        .push(Text::new(user_label).size(14).style(ACCENT_COLOR))
        .push(logout_button);

    Container::new(header_row)
        .padding([16, 24])
        .width(Length::Fill)
        .style(iced::theme::Container::Custom(Box::new(header_appearance)))
        .into()
}

fn stat_card<'a>(emoji: &'a str, label: &'a str, value: String, color: Color) -> Element<'a, Message> {
    let content = Column::new()
        .spacing(8)
        .padding(20)
        .align_items(Alignment::Center)
        .push(Text::new(emoji).font(EMOJI_FONT).size(24))
        .push(Text::new(value).font(BOLD_FONT).size(26).style(color))
        .push(Text::new(label).size(13).style(TEXT_SECONDARY));

    Container::new(content)
        .width(Length::Fill)
        .center_x()
        .style(iced::theme::Container::Custom(Box::new(card_appearance)))
        .into()
}

fn status_color(txn: &Transaction) -> Color {
    if txn.is_fraud
        || txn.status.eq_ignore_ascii_case("fraud")
        || txn.status.eq_ignore_ascii_case("rejected")
    {
        FRAUD_COLOR
    } else if txn.status.eq_ignore_ascii_case("pending") {
        PENDING_COLOR
    } else {
        ACCENT_COLOR
    }
}

fn transaction_row(txn: &Transaction) -> Element<'_, Message> {
    let row = Row::new()
        .spacing(12)
        .align_items(Alignment::Center)
        .push(
            Text::new(&txn.transaction_id)
                .size(13)
                .style(TEXT_SECONDARY)
                .width(Length::FillPortion(3)),
        )
        .push(
            Text::new(&txn.merchant)
                .size(13)
                .style(TEXT_PRIMARY)
                .width(Length::FillPortion(3)),
        )
        .push(
            Text::new(format!("{:.2} €", txn.amount))
                .size(13)
                .style(TEXT_PRIMARY)
                .width(Length::FillPortion(2)),
        )
        .push(
            Text::new(format!("{:.0}%", txn.fraud_score * 100.0))
                .size(13)
                .style(TEXT_SECONDARY)
                .width(Length::FillPortion(1)),
        )
        .push(
            Text::new(txn.status.clone())
                .font(BOLD_FONT)
                .size(13)
                .style(status_color(txn))
                .width(Length::FillPortion(2)),
        )
        .push(
            Text::new(txn.date.clone().unwrap_or_default())
                .size(12)
                .style(TEXT_SECONDARY)
                .width(Length::FillPortion(3)),
        );

    Container::new(row)
        .padding([10, 14])
        .width(Length::Fill)
        .style(iced::theme::Container::Custom(Box::new(row_appearance)))
        .into()
}

pub fn view(state: &DashAppState) -> Element<Message> {
    let fetch = state.dashboard.state();

    let refresh_button = if state.dashboard.is_loading() {
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
        .on_press(Message::RefreshDashboard)
        .padding([10, 14])
    };

    let section_header = Row::new()
        .align_items(Alignment::Center)
        .push(
            Text::new("Overview")
                .font(BOLD_FONT)
                .size(20)
                .style(TEXT_PRIMARY)
                .width(Length::Fill),
        )
        .push(refresh_button);

    let mut body = Column::new().spacing(20).padding([16, 24]).push(section_header);

    if let Some(error) = &fetch.error {
        body = body.push(
            Container::new(
                Row::new()
                    .spacing(8)
                    .align_items(Alignment::Center)
                    .push(Text::new("❌").font(EMOJI_FONT).size(16))
                    .push(Text::new(&error.message).size(14).style(FRAUD_COLOR)),
            )
            .padding(16)
            .width(Length::Fill)
            .style(iced::theme::Container::Custom(Box::new(card_appearance))),
        );
    }

    match &fetch.data {
        Some(data) => {
            let stats = &data.stats;
            let stats_row = Row::new()
                .spacing(16)
                .push(stat_card(
                    "💳",
                    "Total Transactions",
                    stats.total_transactions.to_string(),
                    TEXT_PRIMARY,
                ))
                .push(stat_card(
                    "🚨",
                    "Fraud Detected",
                    stats.fraud_detected.to_string(),
                    FRAUD_COLOR,
                ))
                .push(stat_card(
                    "⏳",
                    "Pending Review",
                    stats.pending_review.to_string(),
                    PENDING_COLOR,
                ))
                .push(stat_card(
                    "💰",
                    "Total Amount",
                    format!("{:.2} €", stats.total_amount),
                    ACCENT_COLOR,
                ));
            body = body.push(stats_row);

            let table_header = Container::new(
                Row::new()
                    .spacing(12)
                    .push(Text::new("ID").font(BOLD_FONT).size(12).style(TEXT_SECONDARY).width(Length::FillPortion(3)))
                    .push(Text::new("Merchant").font(BOLD_FONT).size(12).style(TEXT_SECONDARY).width(Length::FillPortion(3)))
                    .push(Text::new("Amount").font(BOLD_FONT).size(12).style(TEXT_SECONDARY).width(Length::FillPortion(2)))
                    .push(Text::new("Score").font(BOLD_FONT).size(12).style(TEXT_SECONDARY).width(Length::FillPortion(1)))
                    .push(Text::new("Status").font(BOLD_FONT).size(12).style(TEXT_SECONDARY).width(Length::FillPortion(2)))
                    .push(Text::new("Date").font(BOLD_FONT).size(12).style(TEXT_SECONDARY).width(Length::FillPortion(3))),
            )
            .padding([4, 14]);

            let mut table = Column::new().spacing(8).push(
                Text::new("Recent Transactions")
                    .font(BOLD_FONT)
                    .size(16)
                    .style(TEXT_PRIMARY),
            );
            table = table.push(table_header);

            if data.transactions.is_empty() {
                table = table.push(
                    Container::new(
                        Text::new("No transactions yet. Upload a CSV to get started.")
                            .size(14)
                            .style(TEXT_SECONDARY),
                    )
                    .padding(16)
                    .width(Length::Fill)
                    .center_x(),
                );
            } else {
                for txn in &data.transactions {
                    table = table.push(transaction_row(txn));
                }
            }

            body = body.push(
                Container::new(table)
                    .padding(20)
                    .width(Length::Fill)
                    .style(iced::theme::Container::Custom(Box::new(card_appearance))),
            );
        }
        None if state.dashboard.is_loading() => {
            body = body.push(
                Container::new(
                    Row::new()
                        .spacing(8)
                        .align_items(Alignment::Center)
                        .push(Text::new("⏳").font(EMOJI_FONT).size(16))
                        .push(Text::new("Loading dashboard...").size(14).style(TEXT_SECONDARY)),
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
