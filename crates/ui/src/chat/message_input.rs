use gpui::*;
use gpui_component::{
    Disableable, IconName, Sizable,
    button::{Button, ButtonVariants},
    h_flex,
    input::{Input, InputEvent, InputState},
};

use crate::theme::Palette;

/// Emitted when the user sends the current input text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submit {
    pub content: String,
}

pub struct MessageInput {
    input_state: Entity<InputState>,
    is_sending: bool,
    palette: Palette,
}

impl EventEmitter<Submit> for MessageInput {}

impl MessageInput {
    pub fn new(palette: Palette, window: &mut Window, cx: &mut Context<Self>) -> Self {
        let input_state = cx.new(|cx| InputState::new(window, cx).placeholder("Type your message..."));

        cx.subscribe_in(
            &input_state,
            window,
            |this, _, event: &InputEvent, window, cx| {
                if let InputEvent::PressEnter { .. } = event {
                    this.handle_submit(window, cx);
                }
            },
        )
        .detach();

        Self {
            input_state,
            is_sending: false,
            palette,
        }
    }

    pub fn set_sending(&mut self, sending: bool, cx: &mut Context<Self>) {
        self.is_sending = sending;
        cx.notify();
    }

    pub fn set_palette(&mut self, palette: Palette, cx: &mut Context<Self>) {
        self.palette = palette;
        cx.notify();
    }

    pub fn clear(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        self.input_state.update(cx, |state, cx| {
            state.set_value("", window, cx);
        });
    }

    fn handle_submit(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        if self.is_sending {
            return;
        }

        let content = self.input_state.read(cx).value().to_string();
        if content.trim().is_empty() {
            return;
        }

        cx.emit(Submit { content });
        self.clear(window, cx);
    }
}

impl Render for MessageInput {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let palette = self.palette;
        let is_sending = self.is_sending;

        h_flex()
            .w_full()
            .gap_2()
            .p_3()
            .bg(palette.background)
            .border_t_1()
            .border_color(palette.border)
            .child(
                div()
                    .flex_1()
                    .min_w_0()
                    .px_3()
                    .py_2()
                    .rounded_lg()
                    .border_1()
                    .border_color(palette.border)
                    .bg(palette.input_background)
                    .child(Input::new(&self.input_state).w_full().disabled(is_sending)),
            )
            .child(
                Button::new("send")
                    .small()
                    .primary()
                    .icon(IconName::ArrowUp)
                    .child("Send")
                    .disabled(is_sending)
                    .on_click(cx.listener(|this, _, window, cx| {
                        this.handle_submit(window, cx);
                    })),
            )
    }
}
