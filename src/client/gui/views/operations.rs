use iced::widget::{Button, Column, Container, Row, Space, Text, TextInput};
use iced::{Alignment, Color, Element, Font, Length};

use crate::client::controllers::action::{ActionState, ReportFormat};
use crate::client::gui::views::dashboard::header;
use crate::client::gui::views::logger::logger_view;
use crate::client::models::app_state::DashAppState;
use crate::client::models::messages::Message;

// Consistent color palette with dashboard and login
const BG_MAIN: Color = Color::from_rgb(0.06, 0.07, 0.18);
const CARD_BG: Color = Color::from_rgb(0.18, 0.19, 0.36);
const INPUT_BG: Color = Color::from_rgb(0.12, 0.13, 0.26);
const ACCENT_COLOR: Color = Color::from_rgb(0.0, 0.7, 0.3);
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

fn card_title<'a>(emoji: &'a str, title: &'a str) -> Row<'a, Message> {
    Row::new()
        .spacing(12)
        .align_items(Alignment::Center)
        .push(Text::new(emoji).font(EMOJI_FONT).size(24).style(TEXT_PRIMARY))
        .push(Text::new(title).font(BOLD_FONT).size(20).style(TEXT_PRIMARY))
}

fn action_button(label: &str, running: bool, msg: Message) -> Button<'static, Message> {
    if running {
        Button::new(
            Row::new()
                .spacing(6)
                .align_items(Alignment::Center)
                .push(Text::new("⏳").font(EMOJI_FONT).size(14))
                .push(Text::new("Running...").size(14).style(TEXT_SECONDARY)),
        )
        .style(iced::theme::Button::Secondary)
        .padding(12)
    } else {
        Button::new(Text::new(label.to_string()).font(BOLD_FONT).size(14).style(TEXT_PRIMARY))
            .style(iced::theme::Button::Primary)
            .on_press(msg)
            .padding(12)
    }
}

/// Last-outcome line under an action card. `Running` is reflected on the
/// button itself; `Idle` renders nothing.
fn outcome_line<T>(state: &ActionState<T>, describe: impl Fn(&T) -> String) -> Element<'_, Message> {
    match state {
        ActionState::Succeeded(value) => Row::new()
            .spacing(8)
            .align_items(Alignment::Center)
            .push(Text::new("✅").font(EMOJI_FONT).size(14))
            .push(Text::new(describe(value)).size(13).style(ACCENT_COLOR))
            .into(),
        ActionState::Failed(err) => Row::new()
            .spacing(8)
            .align_items(Alignment::Center)
            .push(Text::new("❌").font(EMOJI_FONT).size(14))
            .push(Text::new(err.message.clone()).size(13).style(ERROR_COLOR))
            .into(),
        ActionState::Idle | ActionState::Running => {
            Space::new(Length::Fill, Length::Fixed(0.0)).into()
        }
    }
}

fn upload_card(state: &DashAppState) -> Element<Message> {
    let running = state.upload.is_running();
    let has_file = !state.upload_path.trim().is_empty();

    let path_input = Container::new(
        TextInput::new("Path to a transactions CSV file", &state.upload_path)
            .on_input(Message::UploadPathChanged)
            .on_submit(if has_file && !running {
                Message::SubmitUpload
            } else {
                Message::None
            })
            .width(Length::Fill)
            .padding(12)
            .size(14),
    )
    .style(iced::theme::Container::Custom(Box::new(input_appearance)));

    // Without a file the button stays inert; no error is raised
    let button: Element<Message> = if has_file {
        action_button("Upload CSV", running, Message::SubmitUpload).into()
    } else {
        Button::new(Text::new("Upload CSV").size(14).style(TEXT_SECONDARY))
            .style(iced::theme::Button::Secondary)
            .padding(12)
            .into()
    };

    let content = Column::new()
        .spacing(16)
        .padding(24)
        .push(card_title("📤", "Upload Transactions"))
        .push(
            Text::new("Import a CSV of transactions into the store")
                .size(14)
                .style(Color::from_rgb(0.85, 0.85, 0.85)),
        )
        .push(path_input)
        .push(button)
        .push(outcome_line(state.upload.state(), |o| {
            format!("{} ({} rows, {} total)", o.message, o.rows, o.total_rows)
        }));

    Container::new(content)
        .width(Length::Fill)
        .style(iced::theme::Container::Custom(Box::new(card_appearance)))
        .into()
}

fn detection_card(state: &DashAppState) -> Element<Message> {
    let content = Column::new()
        .spacing(16)
        .padding(24)
        .push(card_title("🚨", "Fraud Detection"))
        .push(
            Text::new("Score every stored transaction and flag suspicious ones")
                .size(14)
                .style(Color::from_rgb(0.85, 0.85, 0.85)),
        )
        .push(action_button(
            "Run Detection",
            state.detection.is_running(),
            Message::RunDetection,
        ))
        .push(outcome_line(state.detection.state(), |o| {
            format!(
                "{} flagged out of {} ({:.1}s)",
                o.fraud_detected, o.transactions_processed, o.duration_seconds
            )
        }));

    Container::new(content)
        .width(Length::Fill)
        .style(iced::theme::Container::Custom(Box::new(card_appearance)))
        .into()
}

fn cleansing_card(state: &DashAppState) -> Element<Message> {
    let stats_fetch = state.cleansing_stats.state();

    let stats_line: Element<Message> = match &stats_fetch.data {
        Some(stats) => Row::new()
            .spacing(16)
            .push(
                Text::new(format!("{} transactions", stats.total_transactions))
                    .size(13)
                    .style(TEXT_SECONDARY),
            )
            .push(
                Text::new(format!("{} duplicates", stats.duplicates_count))
                    .size(13)
                    .style(if stats.duplicates_count > 0 {
                        ERROR_COLOR
                    } else {
                        ACCENT_COLOR
                    }),
            )
            .push(
                Text::new(match &stats.last_cleansed {
                    Some(when) => format!("last cleansed {}", when),
                    None => "never cleansed".to_string(),
                })
                .size(13)
                .style(TEXT_SECONDARY),
            )
            .into(),
        None if state.cleansing_stats.is_loading() => {
            Text::new("Loading stats...").size(13).style(TEXT_SECONDARY).into()
        }
        None => Space::new(Length::Fill, Length::Fixed(0.0)).into(),
    };

    let content = Column::new()
        .spacing(16)
        .padding(24)
        .push(card_title("🧹", "Data Cleansing"))
        .push(
            Text::new("Remove duplicates and normalize merchant names and amounts")
                .size(14)
                .style(Color::from_rgb(0.85, 0.85, 0.85)),
        )
        .push(stats_line)
        .push(action_button(
            "Run Cleansing",
            state.cleansing.is_running(),
            Message::RunCleansing,
        ))
        .push(outcome_line(state.cleansing.state(), |o| {
            format!(
                "{} ({} duplicates removed, {} normalized)",
                o.message, o.duplicates_removed, o.records_normalized
            )
        }));

    Container::new(content)
        .width(Length::Fill)
        .style(iced::theme::Container::Custom(Box::new(card_appearance)))
        .into()
}

fn export_card(state: &DashAppState) -> Element<Message> {
    let export_button = |label: &str, format: ReportFormat| {
        action_button(label, state.exports.is_running(format), Message::ExportReport(format))
    };

    let content = Column::new()
        .spacing(16)
        .padding(24)
        .push(card_title("📄", "Export Report"))
        .push(
            Text::new("Download the fraud report and save it locally")
                .size(14)
                .style(Color::from_rgb(0.85, 0.85, 0.85)),
        )
        .push(
            Row::new()
                .spacing(12)
                .push(export_button("Export CSV", ReportFormat::Csv))
                .push(export_button("Export PDF", ReportFormat::Pdf)),
        )
        .push(outcome_line(state.exports.state(ReportFormat::Csv), |path| {
            format!("CSV saved to {}", path.display())
        }))
        .push(outcome_line(state.exports.state(ReportFormat::Pdf), |path| {
            format!("PDF saved to {}", path.display())
        }));

    Container::new(content)
        .width(Length::Fill)
        .style(iced::theme::Container::Custom(Box::new(card_appearance)))
        .into()
}

pub fn view(state: &DashAppState) -> Element<Message> {
    let cards = Column::new()
        .spacing(20)
        .padding([16, 24])
        .push(
            Text::new("Operations")
                .font(BOLD_FONT)
                .size(20)
                .style(TEXT_PRIMARY),
        )
        .push(upload_card(state))
        .push(detection_card(state))
        .push(cleansing_card(state))
        .push(export_card(state));

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
            iced::widget::scrollable(cards)
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
