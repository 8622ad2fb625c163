use aura_core::theme::DARK_TOKENS;
use aura_core::{AccountStore, AuthForm, SessionController, Username};
use gpui::prelude::FluentBuilder as _;
use gpui::*;
use gpui_component::{
    Sizable,
    button::{Button, ButtonVariants},
    h_flex,
    input::{Input, InputEvent, InputState},
    label::Label,
    v_flex,
};

use crate::theme::{Palette, render_logo};

const CARD_WIDTH: f32 = 380.0;
const LOGO_SIZE: f32 = 32.0;

/// Emitted once the form has logged a user in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authenticated {
    pub user: Username,
}

/// Register/login screen. Always drawn with the dark palette.
pub struct AuthScreen {
    app_name: SharedString,
    form: AuthForm,
    accounts: AccountStore,
    session: Entity<SessionController>,
    username_input: Entity<InputState>,
}

impl EventEmitter<Authenticated> for AuthScreen {}

impl AuthScreen {
    pub fn new(
        app_name: impl Into<SharedString>,
        accounts: AccountStore,
        session: Entity<SessionController>,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> Self {
        let username_input =
            cx.new(|cx| InputState::new(window, cx).placeholder("Enter your username"));

        cx.subscribe_in(
            &username_input,
            window,
            |this, _, event: &InputEvent, window, cx| {
                if let InputEvent::PressEnter { .. } = event {
                    this.handle_submit(window, cx);
                }
            },
        )
        .detach();

        Self {
            app_name: app_name.into(),
            form: AuthForm::new(),
            accounts,
            session,
            username_input,
        }
    }

    fn handle_submit(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        let raw = self.username_input.read(cx).value().to_string();
        let form = &mut self.form;
        let accounts = &self.accounts;
        let outcome = self
            .session
            .update(cx, |session, _| form.submit(&raw, accounts, session));

        if let Ok(user) = outcome {
            tracing::info!(user = %user, mode = ?self.form.mode(), "authenticated");
            self.username_input.update(cx, |state, cx| {
                state.set_value("", window, cx);
            });
            cx.emit(Authenticated { user });
        }
        cx.notify();
    }

    fn toggle_mode(&mut self, cx: &mut Context<Self>) {
        self.form.toggle_mode();
        cx.notify();
    }
}

impl Render for AuthScreen {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let palette = Palette::from_tokens(&DARK_TOKENS);
        let mode = self.form.mode();
        let error = self.form.error().map(|error| error.to_string());

        v_flex()
            .id("auth-screen")
            .size_full()
            .items_center()
            .justify_center()
            .bg(palette.background)
            .text_color(palette.text)
            .child(
                v_flex()
                    .w(px(CARD_WIDTH))
                    .gap_4()
                    .p_6()
                    .rounded_lg()
                    .border_1()
                    .border_color(palette.border)
                    .bg(palette.sidebar_background)
                    .child(
                        h_flex()
                            .gap_3()
                            .items_center()
                            .child(render_logo(palette, LOGO_SIZE))
                            .child(
                                Label::new(self.app_name.clone())
                                    .text_xl()
                                    .font_weight(FontWeight::BOLD)
                                    .text_color(palette.accent),
                            ),
                    )
                    .child(
                        v_flex()
                            .gap_1()
                            .child(
                                Label::new(mode.title())
                                    .text_lg()
                                    .font_weight(FontWeight::SEMIBOLD),
                            )
                            .child(
                                Label::new(mode.subtitle())
                                    .text_sm()
                                    .text_color(palette.text.opacity(0.65)),
                            ),
                    )
                    .child(
                        div()
                            .w_full()
                            .rounded_md()
                            .bg(palette.input_background)
                            .child(Input::new(&self.username_input).w_full()),
                    )
                    .when_some(error, |card, error| {
                        card.child(Label::new(error).text_sm().text_color(palette.error))
                    })
                    .child(
                        Button::new("auth-submit")
                            .primary()
                            .w_full()
                            .child(mode.submit_label())
                            .on_click(cx.listener(|this, _, window, cx| {
                                this.handle_submit(window, cx);
                            })),
                    )
                    .child(
                        h_flex()
                            .gap_1()
                            .items_center()
                            .justify_center()
                            .child(
                                Label::new(mode.toggle_prompt())
                                    .text_sm()
                                    .text_color(palette.text.opacity(0.65)),
                            )
                            .child(
                                Button::new("auth-toggle-mode")
                                    .ghost()
                                    .small()
                                    .child(mode.toggle_label())
                                    .on_click(cx.listener(|this, _, _window, cx| {
                                        this.toggle_mode(cx);
                                    })),
                            ),
                    ),
            )
    }
}
