use crate::theme::Theme;
use eframe::egui::{self, Button, Id, Key, Modifiers, TextEdit};

const INPUT_ID: &str = "chat_draft_input";
const SEND_BUTTON_WIDTH: f32 = 72.0;

/// Draft buffer for the composer. Holds only uncommitted text.
#[derive(Debug, Default)]
pub struct ChatInput {
    draft: String,
}

impl ChatInput {
    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, draft: impl Into<String>) {
        self.draft = draft.into();
    }

    pub fn can_submit(&self, is_loading: bool) -> bool {
        !is_loading && !self.draft.trim().is_empty()
    }

    /// Returns the trimmed draft and clears it, or `None` when submission is
    /// not allowed (loading, or nothing but whitespace).
    pub fn take_submission(&mut self, is_loading: bool) -> Option<String> {
        if !self.can_submit(is_loading) {
            return None;
        }
        let text = self.draft.trim().to_string();
        self.draft.clear();
        Some(text)
    }

    pub fn show(&mut self, ui: &mut egui::Ui, theme: &Theme, is_loading: bool) -> Option<String> {
        let id = Id::new(INPUT_ID);

        // Plain Enter submits; Shift+Enter falls through to the editor as a newline.
        let has_focus = ui.memory(|memory| memory.has_focus(id));
        let mut submit = has_focus
            && ui.input_mut(|input| {
                !input.modifiers.shift && input.consume_key(Modifiers::NONE, Key::Enter)
            });

        theme.composer_frame().show(ui, |ui| {
            ui.horizontal(|ui| {
                let editor_width = (ui.available_width() - SEND_BUTTON_WIDTH - theme.spacing_12).max(120.0);
                ui.add(
                    TextEdit::multiline(&mut self.draft)
                        .id(id)
                        .hint_text("Type your message here...")
                        .desired_rows(3)
                        .desired_width(editor_width),
                );

                let clicked = ui
                    .add_enabled(
                        self.can_submit(is_loading),
                        Button::new("Send").min_size(egui::vec2(SEND_BUTTON_WIDTH, 36.0)),
                    )
                    .clicked();
                submit |= clicked;
            });
        });

        if submit {
            self.take_submission(is_loading)
        } else {
            None
        }
    }
}
