use crate::session::Role;
use eframe::egui::{self, Color32, CornerRadius, FontId, Frame, Margin, Stroke, TextStyle};

/// Light chat palette: blue user bubbles, grey mentor bubbles on a white card.
#[derive(Debug, Clone)]
pub struct Theme {
    pub page_fill: Color32,
    pub card_fill: Color32,
    pub card_border: Color32,
    pub composer_fill: Color32,
    pub user_bubble: Color32,
    pub mentor_bubble: Color32,
    pub text: Color32,
    pub text_muted: Color32,
    pub text_on_user: Color32,
    pub danger: Color32,
    pub spacing_12: f32,
    pub spacing_16: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            page_fill: Color32::from_rgb(0xF9, 0xFA, 0xFB),
            card_fill: Color32::WHITE,
            card_border: Color32::from_rgb(0xE5, 0xE7, 0xEB),
            composer_fill: Color32::from_rgb(0xF3, 0xF4, 0xF6),
            user_bubble: Color32::from_rgb(0x3B, 0x82, 0xF6),
            mentor_bubble: Color32::from_rgb(0xE5, 0xE7, 0xEB),
            text: Color32::from_rgb(0x11, 0x18, 0x27),
            text_muted: Color32::from_rgb(0x6B, 0x72, 0x80),
            text_on_user: Color32::WHITE,
            danger: Color32::from_rgb(0xEF, 0x44, 0x44),
            spacing_12: 12.0,
            spacing_16: 16.0,
        }
    }
}

impl Theme {
    /// Bubbles never take more than this share of the transcript width.
    pub const BUBBLE_WIDTH_RATIO: f32 = 0.8;
    const RADIUS: u8 = 8;

    pub fn apply_visuals(&self, ctx: &egui::Context) {
        let mut visuals = egui::Visuals::light();
        visuals.panel_fill = self.page_fill;
        visuals.override_text_color = Some(self.text);
        visuals.extreme_bg_color = self.card_fill;
        visuals.selection.bg_fill = self.user_bubble.gamma_multiply(0.4);
        visuals.widgets.active.bg_fill = self.user_bubble;

        let mut style = (*ctx.style()).clone();
        style.visuals = visuals;
        style.spacing.item_spacing = egui::vec2(8.0, 8.0);
        style.spacing.button_padding = egui::vec2(12.0, 6.0);
        style.text_styles.insert(TextStyle::Heading, FontId::proportional(26.0));
        style.text_styles.insert(TextStyle::Body, FontId::proportional(14.0));
        style.text_styles.insert(TextStyle::Small, FontId::proportional(11.0));
        ctx.set_style(style);
    }

    pub fn card_frame(&self) -> Frame {
        Frame::new()
            .fill(self.card_fill)
            .inner_margin(Margin::same(self.spacing_16 as i8))
            .corner_radius(CornerRadius::same(Self::RADIUS))
            .stroke(Stroke::new(1.0, self.card_border))
    }

    pub fn composer_frame(&self) -> Frame {
        Frame::new()
            .fill(self.composer_fill)
            .inner_margin(Margin::same(self.spacing_12 as i8))
            .corner_radius(CornerRadius::same(Self::RADIUS))
    }

    pub fn bubble_frame(&self, role: Role) -> Frame {
        let fill = match role {
            Role::User => self.user_bubble,
            Role::Assistant | Role::System => self.mentor_bubble,
        };
        Frame::new()
            .fill(fill)
            .inner_margin(Margin::symmetric(16, 8))
            .corner_radius(CornerRadius::same(Self::RADIUS))
    }

    pub fn bubble_text(&self, role: Role) -> Color32 {
        match role {
            Role::User => self.text_on_user,
            Role::Assistant | Role::System => self.text,
        }
    }
}
