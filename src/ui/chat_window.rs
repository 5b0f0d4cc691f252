use crate::session::store::ChatStore;
use crate::theme::Theme;
use crate::ui::chat_input::ChatInput;
use crate::ui::message_list::MessageList;
use eframe::egui::{self, Align, Layout, RichText, TextEdit};

const TRANSCRIPT_HEIGHT: f32 = 420.0;

/// User intent collected while rendering, applied to the store afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatAction {
    Send(String),
    Reset,
    LoadHistory(String),
}

pub fn dispatch(store: &mut ChatStore, action: ChatAction) {
    match action {
        ChatAction::Send(text) => store.send_message(&text),
        ChatAction::Reset => store.reset_chat(),
        ChatAction::LoadHistory(session_id) => store.load_history(&session_id),
    }
}

/// Composes the header, transcript and composer around the store.
#[derive(Debug, Default)]
pub struct ChatWindow {
    input: ChatInput,
    messages: MessageList,
    session_lookup: String,
}

impl ChatWindow {
    pub fn show(&mut self, ui: &mut egui::Ui, theme: &Theme, store: &mut ChatStore) {
        let mut actions = Vec::new();

        theme.card_frame().show(ui, |ui| {
            let state = store.state();

            ui.horizontal(|ui| {
                ui.strong(RichText::new("AI Student Mentor").size(18.0));
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    if ui.button("New Chat").clicked() {
                        actions.push(ChatAction::Reset);
                    }
                });
            });

            ui.horizontal(|ui| {
                let session_label = match state.session_id.as_deref() {
                    Some(id) => format!("Session {id}"),
                    None => "No session yet".to_string(),
                };
                ui.label(RichText::new(session_label).small().color(theme.text_muted));
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    let lookup = self.session_lookup.trim();
                    let can_load = !state.is_loading && !lookup.is_empty();
                    if ui.add_enabled(can_load, egui::Button::new("Load")).clicked() {
                        actions.push(ChatAction::LoadHistory(lookup.to_string()));
                    }
                    ui.add(
                        TextEdit::singleline(&mut self.session_lookup)
                            .hint_text("Session id")
                            .desired_width(220.0),
                    );
                });
            });

            ui.separator();
            self.messages.show(ui, theme, state, TRANSCRIPT_HEIGHT);
            ui.separator();

            if let Some(text) = self.input.show(ui, theme, state.is_loading) {
                actions.push(ChatAction::Send(text));
            }
        });

        let changed = !actions.is_empty();
        for action in actions {
            dispatch(store, action);
        }
        if changed {
            ui.ctx().request_repaint();
        }
    }
}
