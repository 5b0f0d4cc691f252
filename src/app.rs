use crate::session::store::ChatStore;
use crate::theme::Theme;
use crate::ui::chat_window::ChatWindow;
use eframe::egui::{self, RichText};

const PAGE_TITLE: &str = "AI Student Mentoring Platform";
const CONTENT_MAX_WIDTH: f32 = 768.0;

pub struct MentorApp {
    store: ChatStore,
    chat_window: ChatWindow,
    theme: Theme,
}

impl MentorApp {
    pub fn new(store: ChatStore) -> Self {
        Self {
            store,
            chat_window: ChatWindow::default(),
            theme: Theme::default(),
        }
    }

    /// Hooks the store up to the egui context once the window exists.
    pub fn attach(&mut self, ctx: &egui::Context) {
        self.theme.apply_visuals(ctx);
        let repaint = ctx.clone();
        self.store.set_waker(move || repaint.request_repaint());
    }

    fn render_page(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let side_margin = ((ui.available_width() - CONTENT_MAX_WIDTH) / 2.0).max(0.0);
            ui.add_space(self.theme.spacing_16);
            ui.vertical_centered(|ui| {
                ui.heading(RichText::new(PAGE_TITLE).strong());
            });
            ui.add_space(self.theme.spacing_16);

            ui.horizontal(|ui| {
                ui.add_space(side_margin);
                ui.vertical(|ui| {
                    ui.set_max_width(CONTENT_MAX_WIDTH.min(ui.available_width()));
                    self.chat_window.show(ui, &self.theme, &mut self.store);
                });
            });
        });
    }
}

impl eframe::App for MentorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.store.drain_events() {
            ctx.request_repaint();
        }
        self.render_page(ctx);
    }
}
