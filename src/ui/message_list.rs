use crate::session::state::ConversationState;
use crate::session::Message;
use crate::theme::Theme;
use crate::ui::chat_message;
use eframe::egui::{self, RichText, ScrollArea};

pub const EMPTY_STATE_TEXT: &str = "Send a message to start chatting with your AI Mentor";
pub const THINKING_TEXT: &str = "AI Mentor is thinking...";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TranscriptRow<'a> {
    Empty,
    Message(&'a Message),
    Thinking,
    Error(&'a str),
}

/// Rows shown for a state. The thinking and error lines follow the
/// messages, or the empty-state text when there are none.
pub fn transcript_rows(state: &ConversationState) -> Vec<TranscriptRow<'_>> {
    let mut rows: Vec<_> = if state.messages.is_empty() {
        vec![TranscriptRow::Empty]
    } else {
        state.messages.iter().map(TranscriptRow::Message).collect()
    };
    if state.is_loading {
        rows.push(TranscriptRow::Thinking);
    }
    if let Some(error) = state.error.as_deref() {
        rows.push(TranscriptRow::Error(error));
    }
    rows
}

#[derive(Debug, Default)]
pub struct MessageList {
    rendered_count: usize,
}

impl MessageList {
    pub fn show(&mut self, ui: &mut egui::Ui, theme: &Theme, state: &ConversationState, height: f32) {
        let scroll_to_bottom = state.messages.len() != self.rendered_count;
        self.rendered_count = state.messages.len();

        ScrollArea::vertical()
            .id_salt("chat_transcript")
            .max_height(height)
            .min_scrolled_height(height)
            .auto_shrink([false, false])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                for row in transcript_rows(state) {
                    match row {
                        TranscriptRow::Empty => {
                            ui.add_space((height / 2.0 - theme.spacing_16).max(0.0));
                            ui.vertical_centered(|ui| {
                                ui.label(RichText::new(EMPTY_STATE_TEXT).color(theme.text_muted));
                            });
                        }
                        TranscriptRow::Message(message) => chat_message::show(ui, theme, message),
                        TranscriptRow::Thinking => {
                            ui.vertical_centered(|ui| {
                                ui.label(RichText::new(THINKING_TEXT).color(theme.text_muted));
                            });
                        }
                        TranscriptRow::Error(error) => {
                            ui.vertical_centered(|ui| {
                                ui.label(RichText::new(format!("Error: {error}")).color(theme.danger));
                            });
                        }
                    }
                }

                if scroll_to_bottom {
                    ui.scroll_to_cursor(Some(egui::Align::BOTTOM));
                }
            });
    }
}
