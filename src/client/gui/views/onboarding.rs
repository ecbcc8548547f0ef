use iced::widget::{Button, Column, Container, Row, Space, Text, TextInput};
use iced::{Alignment, Color, Element, Font, Length};

use crate::client::gui::views::logger::logger_view;
use crate::client::models::app_state::DashAppState;
use crate::client::models::messages::Message;

// Consistent color palette with login and dashboard
const BG_MAIN: Color = Color::from_rgb(0.06, 0.07, 0.18);
const CARD_BG: Color = Color::from_rgb(0.18, 0.19, 0.36);
const INPUT_BG: Color = Color::from_rgb(0.12, 0.13, 0.26);
const TEXT_PRIMARY: Color = Color::WHITE;
const TEXT_SECONDARY: Color = Color::from_rgb(0.7, 0.7, 0.7);

const BOLD_FONT: Font = Font {
    family: iced::font::Family::SansSerif,
    weight: iced::font::Weight::Bold,
    ..Font::DEFAULT
};

const EMOJI_FONT: Font = Font::with_name("Segoe UI Emoji");

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

fn input_appearance(_: &iced::Theme) -> iced::widget::container::Appearance {
    iced::widget::container::Appearance {
        background: Some(iced::Background::Color(INPUT_BG)),
        text_color: Some(TEXT_PRIMARY),
        border: iced::Border {
            width: 1.0,
            color: Color::from_rgb(0.3, 0.3, 0.4),
            radius: 12.0.into(),
        },
        shadow: iced::Shadow {
            offset: iced::Vector::new(0.0, 0.0),
            blur_radius: 0.0,
            color: Color::TRANSPARENT,
        },
    }
}

fn profile_field<'a>(
    label: &'a str,
    placeholder: &'a str,
    value: &'a str,
    on_input: fn(String) -> Message,
) -> Column<'a, Message> {
    Column::new()
        .spacing(8)
        .push(Text::new(label).size(14).style(TEXT_SECONDARY))
        .push(
            Container::new(
                TextInput::new(placeholder, value)
                    .on_input(on_input)
                    .width(Length::Fill)
                    .padding(12)
                    .size(14),
            )
            .style(iced::theme::Container::Custom(Box::new(input_appearance))),
        )
}

/// Shown once after the first successful sign-in; the dashboard stays
/// blocked until the profile is saved.
pub fn view(state: &DashAppState) -> Element<Message> {
    let logger_bar = if !state.logger.is_empty() {
        Container::new(logger_view(&state.logger))
            .width(Length::Fill)
            .padding([8, 12, 0, 12])
    } else {
        Container::new(Space::new(Length::Fill, Length::Fixed(0.0))).width(Length::Fill)
    };

    let title = Text::new("Welcome to FraudLens")
        .size(32)
        .font(BOLD_FONT)
        .style(TEXT_PRIMARY)
        .horizontal_alignment(iced::alignment::Horizontal::Center);

    let subtitle = Text::new("Tell us a bit about yourself to get started")
        .size(15)
        .style(TEXT_SECONDARY)
        .horizontal_alignment(iced::alignment::Horizontal::Center);

    let name_valid = !state.profile.name.trim().is_empty();

    let submit_button = if name_valid {
        Button::new(
            Container::new(
                Row::new()
                    .spacing(8)
                    .align_items(Alignment::Center)
                    .push(Text::new("🚀").font(EMOJI_FONT).size(16))
                    .push(
                        Text::new("Get Started")
                            .font(BOLD_FONT)
                            .size(16)
                            .style(TEXT_PRIMARY),
                    ),
            )
            .width(Length::Fill)
            .center_x(),
        )
        .on_press(Message::CompleteOnboarding)
        .style(iced::theme::Button::Primary)
        .width(Length::Fill)
        .padding(16)
    } else {
        Button::new(
            Container::new(
                Text::new("Get Started")
                    .size(16)
                    .style(TEXT_SECONDARY)
                    .horizontal_alignment(iced::alignment::Horizontal::Center),
            )
            .width(Length::Fill)
            .center_x(),
        )
        .style(iced::theme::Button::Secondary)
        .width(Length::Fill)
        .padding(16)
    };

    let card_content = Column::new()
        .width(Length::Fixed(460.0))
        .spacing(20)
        .padding(32)
        .push(
            Column::new()
                .spacing(8)
                .align_items(Alignment::Center)
                .width(Length::Fill)
                .push(title)
                .push(subtitle),
        )
        .push(Space::new(Length::Fill, Length::Fixed(8.0)))
        .push(profile_field(
            "Full Name",
            "Jane Doe",
            &state.profile.name,
            Message::ProfileNameChanged,
        ))
        .push(profile_field(
            "Phone",
            "+1 555 0100",
            &state.profile.phone,
            Message::ProfilePhoneChanged,
        ))
        .push(profile_field(
            "Country",
            "Italy",
            &state.profile.country,
            Message::ProfileCountryChanged,
        ))
        .push(profile_field(
            "Job Title",
            "Fraud Analyst",
            &state.profile.job,
            Message::ProfileJobChanged,
        ))
        .push(profile_field(
            "Industry",
            "Banking",
            &state.profile.industry,
            Message::ProfileIndustryChanged,
        ))
        .push(Space::new(Length::Fill, Length::Fixed(8.0)))
        .push(submit_button);

    let card = Container::new(card_content)
        .style(iced::theme::Container::Custom(Box::new(card_appearance)))
        .center_x()
        .center_y();

    let main_content = Column::new()
        .width(Length::Fill)
        .height(Length::Fill)
        .push(logger_bar)
        .push(
            Container::new(iced::widget::scrollable(
                Container::new(card).width(Length::Fill).center_x().padding(24),
            ))
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x()
            .center_y(),
        );

    Container::new(main_content)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(iced::theme::Container::Custom(Box::new(bg_main_appearance)))
        .into()
}
