use std::time::Duration;

use aura_core::{Message, Sender};
use gpui::prelude::FluentBuilder as _;
use gpui::*;
use gpui_component::{h_flex, label::Label, v_flex};

use crate::chat::scroll_manager::ScrollManager;
use crate::theme::Palette;

const BUBBLE_MAX_WIDTH: Pixels = px(540.);
const BUBBLE_PADDING_X: Pixels = px(14.);
const BUBBLE_PADDING_Y: Pixels = px(10.);
const TYPING_DOT_SIZE: Pixels = px(8.);
const TYPING_DOT_COUNT: usize = 3;
const TYPING_CYCLE: Duration = Duration::from_millis(1200);
const TYPING_MIN_OPACITY: f32 = 0.3;

/// Ordered message bubbles plus the typing indicator while a reply is pending.
pub struct MessageList {
    messages: Vec<Message>,
    is_loading: bool,
    palette: Palette,
    scroll_manager: ScrollManager,
}

impl MessageList {
    pub fn new(palette: Palette, _cx: &mut Context<Self>) -> Self {
        Self {
            messages: Vec::new(),
            is_loading: false,
            palette,
            scroll_manager: ScrollManager::new(),
        }
    }

    /// Replaces the rendered history. Any change in length or loading state scrolls to the tail.
    pub fn set_messages(&mut self, messages: &[Message], is_loading: bool, cx: &mut Context<Self>) {
        let changed = messages.len() != self.messages.len() || is_loading != self.is_loading;

        self.messages = messages.to_vec();
        self.is_loading = is_loading;
        if changed {
            self.scroll_manager.request_scroll_to_bottom();
        }

        cx.notify();
    }

    pub fn set_palette(&mut self, palette: Palette, cx: &mut Context<Self>) {
        self.palette = palette;
        cx.notify();
    }

    fn render_message_row(&self, message: &Message) -> AnyElement {
        let palette = self.palette;
        let (background, foreground) = match message.sender {
            Sender::User => (palette.user_message_background, palette.user_message_text),
            Sender::Ai => (palette.ai_message_background, palette.ai_message_text),
        };

        v_flex()
            .id(("message", message.id.0))
            .w_full()
            .map(|row| {
                if message.is_user() {
                    row.items_end()
                } else {
                    row.items_start()
                }
            })
            .child(
                div()
                    .max_w(BUBBLE_MAX_WIDTH)
                    .px(BUBBLE_PADDING_X)
                    .py(BUBBLE_PADDING_Y)
                    .rounded_lg()
                    .bg(background)
                    .text_color(foreground)
                    .child(Label::new(message.text.clone()).text_sm()),
            )
            .into_any_element()
    }

    fn render_typing_indicator(&self) -> AnyElement {
        let palette = self.palette;

        h_flex()
            .id("typing-indicator")
            .w_full()
            .items_start()
            .child(
                h_flex()
                    .gap_1()
                    .px(BUBBLE_PADDING_X)
                    .py(BUBBLE_PADDING_Y)
                    .rounded_lg()
                    .bg(palette.ai_message_background)
                    .children((0..TYPING_DOT_COUNT).map(|index| {
                        div()
                            .size(TYPING_DOT_SIZE)
                            .rounded_full()
                            .bg(palette.ai_message_text)
                            .with_animation(
                                ("typing-dot", index),
                                Animation::new(TYPING_CYCLE).repeat(),
                                move |dot, delta| dot.opacity(typing_dot_opacity(delta, index)),
                            )
                    })),
            )
            .into_any_element()
    }
}

impl Render for MessageList {
    fn render(&mut self, window: &mut Window, _cx: &mut Context<Self>) -> impl IntoElement {
        self.scroll_manager.update_follow_state();
        if self.scroll_manager.apply_pending_scroll() {
            window.request_animation_frame();
        }

        let rows = self
            .messages
            .iter()
            .map(|message| self.render_message_row(message))
            .collect::<Vec<_>>();

        v_flex()
            .id("message-list")
            .size_full()
            .min_h_0()
            .overflow_y_scroll()
            .track_scroll(self.scroll_manager.handle())
            .px_4()
            .py_3()
            .gap_4()
            .bg(self.palette.background)
            .children(rows)
            .when(self.is_loading, |list| {
                list.child(self.render_typing_indicator())
            })
    }
}

/// Opacity of dot `index` at animation progress `delta`, staggered by a third of a cycle.
fn typing_dot_opacity(delta: f32, index: usize) -> f32 {
    let phase = (delta + index as f32 / TYPING_DOT_COUNT as f32).fract();
    let wave = 1.0 - (2.0 * phase - 1.0).abs();
    TYPING_MIN_OPACITY + (1.0 - TYPING_MIN_OPACITY) * wave
}
