use iced::widget::{Button, Column, Container, Row, Space, Text, TextInput};
use iced::{Alignment, Color, Element, Font, Length};

use crate::client::gui::views::logger::logger_view;
use crate::client::models::app_state::DashAppState;
use crate::client::models::messages::Message;

// Consistent color palette with dashboard and operations
const BG_MAIN: Color = Color::from_rgb(0.06, 0.07, 0.18); // Deep navy
const CARD_BG: Color = Color::from_rgb(0.18, 0.19, 0.36); // Muted indigo for card bodies
const INPUT_BG: Color = Color::from_rgb(0.12, 0.13, 0.26); // Input background
const ACCENT_COLOR: Color = Color::from_rgb(0.0, 0.7, 0.3); // Green accent
const TEXT_PRIMARY: Color = Color::WHITE;
const TEXT_SECONDARY: Color = Color::from_rgb(0.7, 0.7, 0.7);
const ERROR_COLOR: Color = Color::from_rgb(1.0, 0.3, 0.3);

const BOLD_FONT: Font = Font {
    family: iced::font::Family::SansSerif,
    weight: iced::font::Weight::Bold,
    ..Font::DEFAULT
};

const EMOJI_FONT: Font = Font::with_name("Segoe UI Emoji");

// Custom container styles
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

fn labeled_input<'a>(
    emoji: &'a str,
    label: &'a str,
    input: TextInput<'a, Message>,
) -> Column<'a, Message> {
    Column::new()
        .spacing(8)
        .push(
            Row::new()
                .spacing(8)
                .align_items(Alignment::Center)
                .push(Text::new(emoji).font(EMOJI_FONT).size(16).style(TEXT_SECONDARY))
                .push(Text::new(label).size(14).style(TEXT_SECONDARY)),
        )
        .push(
            Container::new(input.width(Length::Fill).padding(12).size(14))
                .style(iced::theme::Container::Custom(Box::new(input_appearance))),
        )
}

pub fn view(state: &DashAppState) -> Element<Message> {
    let email = &state.email;
    let password = &state.password;
    let confirm_password = &state.confirm_password;
    let is_login = state.is_login;
    let loading = state.auth_loading;
    let show_password = state.show_password;

    // Validation
    let email_valid = email.contains('@') && email.contains('.') && email.len() >= 5;
    let password_valid = !password.is_empty() && password.len() >= 6;
    let confirm_valid = is_login || (!confirm_password.is_empty() && confirm_password == password);
    let submit_enabled = email_valid && password_valid && confirm_valid && !loading;

    // Top logger bar
    let logger_bar = if !state.logger.is_empty() {
        Container::new(logger_view(&state.logger))
            .width(Length::Fill)
            .padding([8, 12, 0, 12])
    } else {
        Container::new(Space::new(Length::Fill, Length::Fixed(0.0))).width(Length::Fill)
    };

    // Main title
    let title = Text::new("FraudLens")
        .size(42)
        .font(BOLD_FONT)
        .style(TEXT_PRIMARY)
        .horizontal_alignment(iced::alignment::Horizontal::Center);

    let subtitle = Text::new("Transaction Fraud Detection")
        .size(16)
        .style(TEXT_SECONDARY)
        .horizontal_alignment(iced::alignment::Horizontal::Center);

    // Tab system
    let login_tab = if is_login {
        Button::new(
            Container::new(
                Text::new("Login")
                    .font(BOLD_FONT)
                    .size(16)
                    .horizontal_alignment(iced::alignment::Horizontal::Center)
                    .style(TEXT_PRIMARY),
            )
            .width(Length::Fill)
            .center_x(),
        )
        .style(iced::theme::Button::Primary)
        .width(Length::Fill)
        .padding([12, 16])
    } else {
        Button::new(
            Container::new(
                Text::new("Login")
                    .size(16)
                    .horizontal_alignment(iced::alignment::Horizontal::Center)
                    .style(TEXT_SECONDARY),
            )
            .width(Length::Fill)
            .center_x(),
        )
        .on_press(Message::ToggleLoginRegister)
        .style(iced::theme::Button::Secondary)
        .width(Length::Fill)
        .padding([12, 16])
    };

    let register_tab = if !is_login {
        Button::new(
            Container::new(
                Text::new("Register")
                    .font(BOLD_FONT)
                    .size(16)
                    .horizontal_alignment(iced::alignment::Horizontal::Center)
                    .style(TEXT_PRIMARY),
            )
            .width(Length::Fill)
            .center_x(),
        )
        .style(iced::theme::Button::Primary)
        .width(Length::Fill)
        .padding([12, 16])
    } else {
        Button::new(
            Container::new(
                Text::new("Register")
                    .size(16)
                    .horizontal_alignment(iced::alignment::Horizontal::Center)
                    .style(TEXT_SECONDARY),
            )
            .width(Length::Fill)
            .center_x(),
        )
        .on_press(Message::ToggleLoginRegister)
        .style(iced::theme::Button::Secondary)
        .width(Length::Fill)
        .padding([12, 16])
    };

    let tabs = Row::new().spacing(2).push(login_tab).push(register_tab);

    let submit_msg = if submit_enabled {
        Message::SubmitAuth
    } else {
        Message::None
    };

    let email_field = labeled_input(
        "📧",
        "Email",
        TextInput::new("Enter your email", email)
            .on_input(Message::EmailChanged)
            .on_submit(submit_msg.clone()),
    );

    let password_field = Column::new()
        .spacing(8)
        .push(
            Row::new()
                .spacing(8)
                .align_items(Alignment::Center)
                .push(Text::new("🔒").font(EMOJI_FONT).size(16).style(TEXT_SECONDARY))
                .push(Text::new("Password").size(14).style(TEXT_SECONDARY)),
        )
        .push(
            Container::new(
                Row::new()
                    .align_items(Alignment::Center)
                    .push(
                        TextInput::new("Enter your password", password)
                            .on_input(Message::PasswordChanged)
                            .on_submit(submit_msg.clone())
                            .secure(!show_password)
                            .width(Length::Fill)
                            .padding(12)
                            .size(14),
                    )
                    .push(
                        Button::new(
                            Text::new(if show_password { "🙈" } else { "👁️" })
                                .font(EMOJI_FONT)
                                .size(16),
                        )
                        .on_press(Message::ToggleShowPassword)
                        .style(iced::theme::Button::Text)
                        .padding([8, 12]),
                    ),
            )
            .style(iced::theme::Container::Custom(Box::new(input_appearance))),
        );

    let confirm_field: Element<Message> = if !is_login {
        labeled_input(
            "🔒",
            "Confirm Password",
            TextInput::new("Repeat your password", confirm_password)
                .on_input(Message::ConfirmPasswordChanged)
                .on_submit(submit_msg.clone())
                .secure(!show_password),
        )
        .into()
    } else {
        Space::new(Length::Fill, Length::Fixed(0.0)).into()
    };

    // Validation indicators
    let mut validation_indicators = Column::new()
        .spacing(4)
        .push(
            Row::new()
                .spacing(8)
                .align_items(Alignment::Center)
                .push(
                    Text::new(if email_valid { "✅" } else { "❌" })
                        .font(EMOJI_FONT)
                        .size(12),
                )
                .push(
                    Text::new("Valid email address")
                        .size(12)
                        .style(if email_valid { ACCENT_COLOR } else { TEXT_SECONDARY }),
                ),
        )
        .push(
            Row::new()
                .spacing(8)
                .align_items(Alignment::Center)
                .push(
                    Text::new(if password_valid { "✅" } else { "❌" })
                        .font(EMOJI_FONT)
                        .size(12),
                )
                .push(
                    Text::new("Password (6+ characters)")
                        .size(12)
                        .style(if password_valid { ACCENT_COLOR } else { TEXT_SECONDARY }),
                ),
        );

    if !is_login {
        validation_indicators = validation_indicators.push(
            Row::new()
                .spacing(8)
                .align_items(Alignment::Center)
                .push(
                    Text::new(if confirm_valid { "✅" } else { "❌" })
                        .font(EMOJI_FONT)
                        .size(12),
                )
                .push(
                    Text::new("Passwords match")
                        .size(12)
                        .style(if confirm_valid { ACCENT_COLOR } else { TEXT_SECONDARY }),
                ),
        );
    }

    // Server-reported error (invalid credentials, email taken, ...)
    let error_element: Element<Message> = if let Some(error) = &state.error_message {
        Container::new(
            Row::new()
                .spacing(8)
                .align_items(Alignment::Center)
                .push(Text::new("❌").font(EMOJI_FONT).size(14))
                .push(Text::new(error).size(14).style(ERROR_COLOR)),
        )
        .width(Length::Fill)
        .center_x()
        .into()
    } else {
        Space::new(Length::Fill, Length::Fixed(0.0)).into()
    };

    // Submit button
    let submit_button = if submit_enabled {
        Button::new(
            Container::new(
                Row::new()
                    .spacing(8)
                    .align_items(Alignment::Center)
                    .push(
                        Text::new(if is_login { "🚀" } else { "✨" })
                            .font(EMOJI_FONT)
                            .size(16),
                    )
                    .push(
                        Text::new(if is_login { "Sign In" } else { "Create Account" })
                            .font(BOLD_FONT)
                            .size(16)
                            .style(TEXT_PRIMARY),
                    ),
            )
            .width(Length::Fill)
            .center_x(),
        )
        .on_press(Message::SubmitAuth)
        .style(iced::theme::Button::Primary)
        .width(Length::Fill)
        .padding(16)
    } else {
        Button::new(
            Container::new(
                Row::new()
                    .spacing(8)
                    .align_items(Alignment::Center)
                    .push(Text::new("⏳").font(EMOJI_FONT).size(16))
                    .push(
                        Text::new(if loading {
                            "Signing in..."
                        } else if is_login {
                            "Sign In"
                        } else {
                            "Create Account"
                        })
                        .size(16)
                        .style(TEXT_SECONDARY),
                    ),
            )
            .width(Length::Fill)
            .center_x(),
        )
        .style(iced::theme::Button::Secondary)
        .width(Length::Fill)
        .padding(16)
    };

    // Main card content
    let card_content = Column::new()
        .width(Length::Fixed(420.0))
        .spacing(24)
        .padding(32)
        .align_items(Alignment::Center)
        .push(
            Column::new()
                .spacing(8)
                .align_items(Alignment::Center)
                .push(title)
                .push(subtitle),
        )
        .push(Space::new(Length::Fill, Length::Fixed(8.0)))
        .push(tabs)
        .push(Space::new(Length::Fill, Length::Fixed(8.0)))
        .push(email_field)
        .push(password_field)
        .push(confirm_field)
        .push(Space::new(Length::Fill, Length::Fixed(8.0)))
        .push(validation_indicators)
        .push(error_element)
        .push(Space::new(Length::Fill, Length::Fixed(8.0)))
        .push(submit_button);

    let card = Container::new(card_content)
        .style(iced::theme::Container::Custom(Box::new(card_appearance)))
        .center_x()
        .center_y();

    // Main layout
    let main_content = Column::new()
        .width(Length::Fill)
        .height(Length::Fill)
        .push(logger_bar)
        .push(
            Container::new(card)
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
