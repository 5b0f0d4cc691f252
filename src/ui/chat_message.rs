use crate::session::{Message, Role};
use crate::theme::Theme;
use chrono::{DateTime, Local, Utc};
use eframe::egui::{self, Align, Layout, RichText};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BubbleSide {
    Left,
    Right,
}

impl BubbleSide {
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::User => Self::Right,
            Role::Assistant | Role::System => Self::Left,
        }
    }

    fn layout(self) -> Layout {
        match self {
            Self::Left => Layout::left_to_right(Align::TOP),
            Self::Right => Layout::right_to_left(Align::TOP),
        }
    }
}

pub fn local_time(timestamp: DateTime<Utc>) -> String {
    timestamp.with_timezone(&Local).format("%H:%M:%S").to_string()
}

pub fn show(ui: &mut egui::Ui, theme: &Theme, message: &Message) {
    let max_width = ui.available_width() * Theme::BUBBLE_WIDTH_RATIO;
    let text_color = theme.bubble_text(message.role);

    ui.with_layout(BubbleSide::for_role(message.role).layout(), |ui| {
        theme.bubble_frame(message.role).show(ui, |ui| {
            ui.set_max_width(max_width);
            ui.vertical(|ui| {
                ui.label(RichText::new(&message.content).color(text_color));
                ui.label(
                    RichText::new(local_time(message.timestamp))
                        .small()
                        .color(text_color.gamma_multiply(0.7)),
                );
            });
        });
    });
}
